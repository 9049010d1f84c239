//! Errors surfaced by [`super::Monitor`] implementations.

use thiserror::Error;

/// Errors that can occur while recording or reading back monitoring events.
#[derive(Debug, Error)]
pub enum MonitoringError {
    /// Recording an event failed (e.g. the in-memory ring buffer's lock was
    /// poisoned by a panicking writer).
    #[error("failed to record event: {message}")]
    RecordError {
        /// Description of the recording failure.
        message: String,
    },

    /// Producing a snapshot of recorded events failed.
    #[error("failed to generate snapshot: {message}")]
    SnapshotError {
        /// Description of the snapshot failure.
        message: String,
    },

    /// Clearing recorded events failed.
    #[error("failed to reset monitor: {message}")]
    ResetError {
        /// Description of the reset failure.
        message: String,
    },
}

impl MonitoringError {
    /// Creates a new record error.
    pub fn record(message: impl Into<String>) -> Self {
        Self::RecordError { message: message.into() }
    }

    /// Creates a new snapshot error.
    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::SnapshotError { message: message.into() }
    }

    /// Creates a new reset error.
    pub fn reset(message: impl Into<String>) -> Self {
        Self::ResetError { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_creation() {
        let error = MonitoringError::record("failed to acquire lock");
        assert!(error.to_string().contains("failed to acquire lock"));
    }

    #[test]
    fn test_snapshot_error_creation() {
        let error = MonitoringError::snapshot("buffer overflow");
        assert!(error.to_string().contains("buffer overflow"));
    }

    #[test]
    fn test_reset_error_creation() {
        let error = MonitoringError::reset("cannot reset while recording");
        assert!(error.to_string().contains("cannot reset while recording"));
    }
}
