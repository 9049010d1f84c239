//! Errors produced by actor send/reply/lifecycle operations.

// Layer 1: Standard library imports
use std::error::Error as StdError;

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Errors surfaced by [`super::handle::ActorRef`] and [`super::context::ActorContext`].
///
/// Mirrors the error kinds named by the runtime's error taxonomy: a failed
/// handler never propagates synchronously to the sender, it is caught at the
/// actor boundary and converted into a state transition plus one of these
/// values where relevant (`HandlerFailure` is recorded via monitoring, not
/// returned to a caller).
#[derive(Debug, Error)]
pub enum ActorError {
    /// `send` targeted an actor that has already reached `Stopped`, or whose
    /// mailbox has otherwise closed.
    #[error("mailbox closed: actor is no longer accepting messages")]
    MailboxClosed,

    /// `reply` was called on a message with no `reply_to`, or the
    /// `reply_to` address no longer resolves to a live actor of the
    /// expected message type.
    #[error("no reply-to address available for this message")]
    NoReplyTo,

    /// A user handler returned an error; the actor has transitioned to `Stopped`.
    #[error("actor handler failed: {source}")]
    HandlerFailure {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl ActorError {
    /// Wrap a handler's error type as a `HandlerFailure`.
    pub fn handler_failure<E: StdError + Send + Sync + 'static>(source: E) -> Self {
        Self::HandlerFailure {
            source: Box::new(source),
        }
    }
}
