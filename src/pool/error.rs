//! Errors produced by pool submission.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Errors produced by [`super::Pool::submit`] and friends.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Submission was rejected because the owning pool has been shut down.
    #[error("pool has been shut down, no further submissions are accepted")]
    Shutdown,

    /// The spawned unit of work panicked or was cancelled.
    #[error("submitted work failed to complete: {reason}")]
    JoinFailed { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_display() {
        assert!(PoolError::Shutdown.to_string().contains("shut down"));
    }

    #[test]
    fn test_join_failed_display() {
        let err = PoolError::JoinFailed {
            reason: "panicked".to_string(),
        };
        assert!(err.to_string().contains("panicked"));
    }
}
