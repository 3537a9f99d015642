//! Application layer: use cases on top of the domain
//!
//! Display and traversal helpers consumed by the CLI.

pub mod demo;
pub mod error;
pub mod report;

pub use demo::{filesystem_example, organization_example, FileSystemExample, OrganizationExample};
pub use error::{ApplicationError, ApplicationResult};
pub use report::{listing, summary, to_tree, Measure, TreeSummary};
