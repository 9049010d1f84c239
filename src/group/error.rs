//! Errors produced by group lifecycle operations.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Errors produced by a [`super::Group`] and the primitives it schedules.
#[derive(Debug, Error)]
pub enum GroupError {
    /// The owning group's pool has been shut down.
    #[error("group's pool has been shut down")]
    PoolShutdown,
}

impl From<crate::pool::PoolError> for GroupError {
    fn from(_: crate::pool::PoolError) -> Self {
        Self::PoolShutdown
    }
}
