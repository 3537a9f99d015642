//! Infrastructure layer: building composites from the real filesystem

pub mod error;
pub mod scanner;

pub use error::{InfraError, InfraResult};
pub use scanner::DirectoryScanner;
