//! Errors produced by dataflow variables, streams, operators, and selectors.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Errors surfaced by [`super::var::DataflowVariable`], [`super::stream::DataflowStream`],
/// [`super::operator::Operator`], and [`super::selector::Selector`].
#[derive(Debug, Error)]
pub enum DataflowError {
    /// A second `bind` was attempted on an already-bound variable.
    #[error("dataflow variable is already bound to a different value")]
    AlreadyBound,

    /// An operator or selector body returned an error; the participant has
    /// stopped.
    #[error("dataflow body failed: {0}")]
    BodyFailure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_bound_display() {
        assert!(DataflowError::AlreadyBound.to_string().contains("already bound"));
    }

    #[test]
    fn test_body_failure_display() {
        let err = DataflowError::BodyFailure("boom".to_string());
        assert!(err.to_string().contains("boom"));
    }
}
