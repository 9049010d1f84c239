//! # Actor Module (C3)
//!
//! Independent units of state reacting to messages one at a time. Two
//! scheduling flavors share the same [`Actor`] trait and [`ActorRef`]
//! handle: pinned (one dedicated pool worker for its whole life) and
//! cooperative (wakes onto the pool only while its mailbox has work).
//!
//! There is no supervision tree here and no restart/retry policy: an
//! uncaught handler error moves the actor straight to a terminal `Stopped`
//! state. `Actor::on_failure` is purely a notification hook.
//!
//! # Module Organization (§4.3)
//!
//! This mod.rs file contains ONLY module declarations and re-exports.
//!
//! - `traits.rs` - the `Actor` trait
//! - `context.rs` - `ActorContext`, the per-message handle and reply path
//! - `lifecycle.rs` - `ActorLifecycle`, `ActorState`
//! - `handle.rs` - `ActorRef`, the cloneable send-side handle
//! - `error.rs` - `ActorError`
//! - `core.rs` - the pinned/cooperative run loops (crate-internal)
//!
//! # See Also
//!
//! - [`message`](crate::message) - message types actors exchange
//! - [`group`](crate::group) - the factory that spawns actors onto a pool

pub(crate) mod core;
pub mod context;
pub mod error;
pub mod handle;
pub mod lifecycle;
pub mod traits;

pub use context::ActorContext;
pub use error::ActorError;
pub use handle::ActorRef;
pub use lifecycle::{ActorLifecycle, ActorState};
pub use traits::Actor;
