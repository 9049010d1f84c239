//! Core Actor trait: the user-implemented message handler.
//!
//! # Example
//!
//! ```rust
//! use concurro::{Actor, ActorContext, Message};
//! use async_trait::async_trait;
//! use std::fmt;
//!
//! #[derive(Debug, Clone)]
//! struct PingMessage;
//!
//! impl Message for PingMessage {
//!     const MESSAGE_TYPE: &'static str = "ping";
//! }
//!
//! struct PingActor {
//!     count: u32,
//! }
//!
//! #[derive(Debug)]
//! struct PingError;
//!
//! impl fmt::Display for PingError {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "Ping error")
//!     }
//! }
//!
//! impl std::error::Error for PingError {}
//!
//! #[async_trait]
//! impl Actor for PingActor {
//!     type Message = PingMessage;
//!     type Error = PingError;
//!
//!     async fn handle_message(
//!         &mut self,
//!         _message: Self::Message,
//!         _context: &mut ActorContext<Self::Message>,
//!     ) -> Result<(), Self::Error> {
//!         self.count += 1;
//!         Ok(())
//!     }
//! }
//! ```

// Layer 1: Standard library imports
use std::error::Error;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::context::ActorContext;
use crate::message::Message;

/// Core Actor trait implemented by every user-defined actor behavior.
///
/// There is no supervision decision to return from a failed handler: an
/// uncaught error always moves the actor to `Stopped` (the runtime has no
/// retry or restart policy). `on_failure` is the notification hook for that
/// terminal transition.
#[async_trait]
pub trait Actor: Send + Sync + 'static {
    /// The type of messages this actor can handle.
    type Message: Message;

    /// The error type returned by actor operations.
    type Error: Error + Send + Sync + 'static;

    /// Handle an incoming message. This is the actor's behavior.
    async fn handle_message(
        &mut self,
        message: Self::Message,
        context: &mut ActorContext<Self::Message>,
    ) -> Result<(), Self::Error>;

    /// Called once before the actor starts receiving messages.
    /// Default implementation does nothing.
    async fn pre_start(
        &mut self,
        _context: &mut ActorContext<Self::Message>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once on an orderly stop, after the mailbox has drained, before
    /// the actor transitions to `Stopped`. Not called on `terminate()` or on
    /// an uncaught failure (see `on_failure`).
    /// Default implementation does nothing.
    async fn post_stop(
        &mut self,
        _context: &mut ActorContext<Self::Message>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once when an uncaught error from `handle_message` terminates
    /// the actor. This is the "on-failure callback" named by the error
    /// handling design: the actor has already moved to `Stopped` by the
    /// time this runs. Default implementation does nothing; the failure is
    /// still recorded as an `ActorEvent::Failed` through the group's
    /// monitor regardless of whether this hook is overridden.
    async fn on_failure(&mut self, _error: Self::Error, _context: &mut ActorContext<Self::Message>) {}
}
