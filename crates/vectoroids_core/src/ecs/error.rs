//! # ECS Error Types
//!
//! All operations in the core are synchronous and local: they either
//! succeed deterministically or report a programming-contract violation.
//! There is no retry logic anywhere. Cache staleness is never an error;
//! the invalidation policy guarantees it is never observable.

use thiserror::Error;

/// Errors that can occur in the ECS core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// An entity handle at or past the current entity count was used.
    ///
    /// Handles are dense indices and are only valid until the next removal
    /// flush; a handle held across a flush boundary must be reacquired.
    #[error("invalid entity handle {entity}: store holds {alive} entities")]
    InvalidEntity {
        /// The offending handle.
        entity: usize,
        /// Number of entities alive at the time of the call.
        alive: usize,
    },
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;
