//! Command dispatch

use std::io;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::{
    filesystem_example, listing, organization_example, summary, to_tree, Measure, TreeSummary,
};
use crate::cli::args::{Cli, Commands, ConfigCommands, DemoKind};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::infrastructure::DirectoryScanner;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Demo { example }) => {
            let settings = Settings::load(cli.config.as_deref())?;
            match example {
                DemoKind::Filesystem => _demo_filesystem(&settings),
                DemoKind::Organization => _demo_organization(&settings),
            }
        }
        Some(Commands::Scan { dir, summary }) => {
            let settings = Settings::load(cli.config.as_deref())?;
            _scan(&settings, dir, *summary)
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => _config_show(cli),
            ConfigCommands::Path => _config_path(),
        },
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "rscomposite", &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::InvalidArgs(
            "no command given, see --help".to_string(),
        )),
    }
}

#[instrument(skip(settings))]
fn _demo_filesystem(settings: &Settings) -> CliResult<()> {
    let mut example = filesystem_example(settings.max_depth)?;
    let measure = Measure::size(&settings.display.size_unit);
    let root = example.fs.root();

    output::header("Folder listing");
    for line in listing(example.fs.arena(), example.docs, &measure)? {
        output::info(&line);
    }

    output::header("\nTree");
    let tree = to_tree(example.fs.arena(), root, &measure, settings.display.show_weights)?;
    output::info(&tree);

    let removed = example.fs.detach(root, example.docs)?;
    debug!("docs detached: {}", removed);
    output::header("\nAfter removing docs");
    for line in listing(example.fs.arena(), root, &measure)? {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _demo_organization(settings: &Settings) -> CliResult<()> {
    let example = organization_example(settings.max_depth)?;
    let org = &example.org;
    let arena = org.arena();
    let measure = Measure::salary(&settings.display.salary_unit);

    output::header("Organization");
    let tree = to_tree(arena, org.root(), &measure, settings.display.show_weights)?;
    output::info(&tree);

    output::header("Roles");
    for &member in arena.children(org.root())? {
        let role = org
            .role(member)
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        output::detail(&format!("{} ({})", arena.name(member)?, role));
    }

    output::total("Payroll", &measure.format(org.payroll(org.root())?));
    output::total("Headcount", &org.headcount(org.root()));
    Ok(())
}

#[instrument(skip(settings))]
fn _scan(settings: &Settings, dir: &std::path::Path, summary_only: bool) -> CliResult<()> {
    let fs = DirectoryScanner::new(settings.max_depth).scan(dir)?;
    let measure = Measure::size(&settings.display.size_unit);

    if !summary_only {
        let tree = to_tree(fs.arena(), fs.root(), &measure, settings.display.show_weights)?;
        output::info(&tree);
    }
    print_summary(&summary(fs.arena(), fs.root())?, &measure);
    Ok(())
}

fn print_summary(s: &TreeSummary, measure: &Measure) {
    output::total(
        &s.name,
        &format!(
            "{} files, {} folders, depth {}, total {}",
            s.leaves,
            s.containers,
            s.depth,
            measure.format(s.total)
        ),
    );
}

fn _config_show(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    output::info(&settings.to_toml()?);
    Ok(())
}

fn _config_path() -> CliResult<()> {
    match global_config_path() {
        Some(path) => {
            let state = if path.exists() { "" } else { " (not found)" };
            output::info(&format!("{}{}", path.display(), state));
        }
        None => output::info("no config directory available"),
    }
    Ok(())
}
