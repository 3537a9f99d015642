//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

/// Hierarchical composite aggregates: file-system and organization trees with derived weights
#[derive(Parser, Debug)]
#[command(name = "rscomposite")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Additional config file layered over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and print one of the example hierarchies
    Demo {
        #[arg(value_enum)]
        example: DemoKind,
    },

    /// Mirror a directory as a composite and print sizes
    Scan {
        /// Directory to scan
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        /// Print only the summary line
        #[arg(short, long)]
        summary: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoKind {
    /// Files and folders weighted by size
    Filesystem,
    /// Developers, designers and managers weighted by salary
    Organization,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,
}
