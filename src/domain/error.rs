//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree invariants.
/// These are independent of display and I/O concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid weight for {name}: {weight} (must be finite and >= 0)")]
    InvalidWeight { name: String, weight: f64 },

    #[error("inserting {component} into {container} would create a cycle")]
    CyclicStructure { container: String, component: String },

    #[error("not a container: {0}")]
    NotAContainer(String),

    #[error("unknown component handle")]
    UnknownComponent,

    #[error("tree depth limit exceeded: {limit}")]
    DepthLimitExceeded { limit: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
