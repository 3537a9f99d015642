//! Domain layer: composite trees and their invariants
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod filesystem;
pub mod organization;
pub mod weight;

pub use arena::{
    ComponentArena, ComponentId, ComponentKind, ComponentNode, PostOrderIterator,
    PreOrderIterator, DEFAULT_MAX_DEPTH,
};
pub use error::{DomainError, DomainResult};
pub use filesystem::FileSystem;
pub use organization::{Organization, Role};
pub use weight::Weight;
