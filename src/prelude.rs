//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits for
//! building on concurro. Import this module to get started quickly:
//!
//! ```rust
//! use concurro::prelude::*;
//! ```
//!
//! # What's Included
//!
//! ## Core Actor System
//! - [`Actor`] - Core trait for actors
//! - [`ActorContext`] - Actor execution context
//! - [`ActorRef`] - Cloneable send-side handle to a live actor
//! - [`ActorLifecycle`] - Actor lifecycle tracking
//! - [`ActorState`] - Lifecycle state enum
//! - [`ActorError`] - Actor-facing error type
//!
//! ## Messaging
//! - [`Message`] - Core trait for messages
//! - [`MessageEnvelope`] - Message wrapper with metadata
//! - [`MessagePriority`] - Priority levels (High, Normal, Low)
//!
//! ## Mailbox
//! - [`BoundedMailbox`] - Capacity-limited mailbox
//! - [`UnboundedMailbox`] - Unlimited capacity mailbox
//! - [`BackpressureStrategy`] - Flow control strategies
//! - [`MailboxReceiver`] - Trait for receiving messages
//! - [`MailboxSender`] - Trait for sending messages
//!
//! ## Scheduling
//! - [`Pool`] - The worker pool (C1)
//! - [`PoolKind`] - Fork-join, fixed, or cached pool flavor
//! - [`Group`] - The shared-scheduling unit (C9)
//! - [`GroupConfig`] - Configuration for constructing a `Group`
//!
//! ## Dataflow
//! - [`Agent`] - Mutable cell serialized through a cooperative actor (C4)
//! - [`DataflowVariable`] - Single-assignment cell (C5)
//! - [`DataflowStream`] / [`StreamReader`] - Append-only fan-out sequence (C6)
//! - [`Operator`] - Standing computation over input/output streams (C7)
//! - [`Selector`] / [`PrioritySelect`] - Merge several streams (C8)
//! - [`task`] - Submit work, get back a variable bound with the result (C10)
//!
//! ## Monitoring
//! - [`Monitor`] - Core monitoring trait
//! - [`InMemoryMonitor`] - Production monitor
//! - [`NoopMonitor`] - Zero-overhead no-op monitor
//! - [`MonitoringEvent`] - Trait for events
//! - [`EventSeverity`] - Event severity levels
//! - [`ActorEvent`] - Actor lifecycle events
//! - [`PoolEvent`] - Pool lifecycle events
//! - [`GroupEvent`] - Group lifecycle events
//!
//! ## Utilities
//! - [`ActorAddress`] - Actor address type
//! - [`ActorId`] - Actor identifier
//! - [`GroupId`] - Group identifier
//! - [`MessageId`] - Message identifier

// Core actor system
pub use crate::actor::{Actor, ActorContext, ActorError, ActorLifecycle, ActorRef, ActorState};

// Messaging
pub use crate::message::{Message, MessageEnvelope, MessagePriority};

// Mailbox
pub use crate::mailbox::{
    BackpressureStrategy, BoundedMailbox, BoundedMailboxSender, MailboxReceiver, MailboxSender,
    UnboundedMailbox, UnboundedMailboxSender,
};

// Scheduling
pub use crate::group::{Group, GroupConfig};
pub use crate::pool::{Pool, PoolKind};

// Dataflow
pub use crate::agent::{Agent, AgentError};
pub use crate::dataflow::{
    DataflowError, DataflowStream, DataflowVariable, Operator, PrioritySelect, Selector, StreamReader,
};
pub use crate::task::{task, TaskFailure, TaskOutcome};

// Monitoring
pub use crate::monitoring::{
    ActorEvent, EventSeverity, GroupEvent, InMemoryMonitor, Monitor, MonitoringEvent, NoopMonitor,
    PoolEvent,
};

// Utilities
pub use crate::util::{ActorAddress, ActorId, GroupId, MessageId};
