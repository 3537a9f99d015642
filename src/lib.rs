//! rscomposite: hierarchical composite aggregates
//!
//! Leaves carry a fixed weight, containers derive theirs from their children.
//! Layers: `domain` (arena, invariants) → `application` (display, examples)
//! → `infrastructure` (directory scanning) → `cli`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{ComponentArena, ComponentId, DomainError, FileSystem, Organization, Weight};
