//! # concurro - Actors, Dataflow, and Shared Scheduling
//!
//! A concurrency runtime combining an actor model with dataflow primitives,
//! woven together by a [`Group`] that owns a worker [`pool::Pool`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use concurro::prelude::*;
//! use async_trait::async_trait;
//!
//! #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
//! enum CounterMsg {
//!     Increment,
//! }
//!
//! impl Message for CounterMsg {
//!     const MESSAGE_TYPE: &'static str = "counter";
//! }
//!
//! struct CounterActor {
//!     count: u64,
//! }
//!
//! #[async_trait]
//! impl Actor for CounterActor {
//!     type Message = CounterMsg;
//!     type Error = std::convert::Infallible;
//!
//!     async fn handle_message(
//!         &mut self,
//!         msg: Self::Message,
//!         _ctx: &mut ActorContext<Self::Message>,
//!     ) -> Result<(), Self::Error> {
//!         match msg {
//!             CounterMsg::Increment => self.count += 1,
//!         }
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let group = Group::new(GroupConfig::default());
//!     let actor = group.spawn_pinned(CounterActor { count: 0 });
//!     actor.send(CounterMsg::Increment).await.unwrap();
//! }
//! ```
//!
//! # Module Organization
//!
//! ## Scheduling
//! - [`pool`] - the worker pool (C1): fork-join, fixed, and cached flavors
//! - [`group`] - the shared-scheduling unit (C9) that owns a pool and spawns
//!   every other primitive
//!
//! ## Actors
//! - [`actor`] - the `Actor` trait, pinned and cooperative run loops (C3, C4)
//! - [`message`] - message envelopes and priority (C2 payloads)
//! - [`mailbox`] - bounded/unbounded mailboxes with backpressure (C2)
//!
//! ## Dataflow
//! - [`agent`] - a mutable cell serialized through a cooperative actor (C4)
//! - [`dataflow`] - single-assignment variables, streams, operators, and
//!   selectors (C5-C8)
//! - [`task`] - submit a body to a group's pool, get back a variable that
//!   binds with the result (C10)
//! - [`ambient`] - the group a pool-scheduled task body inherits implicitly
//!
//! ## Observability
//! - [`monitoring`] - event tracking across pool, actor, agent, dataflow, and
//!   group activity
//!
//! ## Infrastructure
//! - [`util`] - identifiers and addresses shared across modules
//!
//! # Architecture Principles
//!
//! - **No supervision tree, no restart policy**: an uncaught handler error
//!   moves an actor straight to a terminal `Stopped` state. There is no
//!   retry, no poison-pill promotion; `Actor::on_failure` is a notification
//!   hook only.
//! - **Two actor scheduling flavors, one trait**: pinned actors hold a pool
//!   worker for their whole life; cooperative actors wake onto the pool only
//!   while their mailbox has work.
//! - **chrono `DateTime<Utc>`** for every timestamp recorded by monitoring.

pub mod actor;
pub mod agent;
pub mod ambient;
pub mod dataflow;
pub mod group;
pub mod mailbox;
pub mod message;
pub mod monitoring;
pub mod pool;
pub mod task;
pub mod util;

pub mod prelude;

// Re-export commonly used types
pub use actor::{Actor, ActorContext, ActorError, ActorLifecycle, ActorRef, ActorState};
pub use agent::{Agent, AgentError};
pub use dataflow::{DataflowError, DataflowStream, DataflowVariable, Operator, PrioritySelect, Selector, StreamReader};
pub use group::{Group, GroupConfig, GroupError};
pub use mailbox::{
    BackpressureStrategy, BoundedMailbox, BoundedMailboxSender, MailboxReceiver, MailboxSender,
    UnboundedMailbox, UnboundedMailboxSender,
};
pub use message::{Message, MessageEnvelope, MessagePriority};
pub use monitoring::{
    ActorEvent, ActorEventKind, AgentEvent, AgentEventKind, DataflowEvent, DataflowEventKind,
    EventSeverity, GroupEvent, GroupEventKind, InMemoryMonitor, Monitor, MonitoringConfig,
    MonitoringError, MonitoringEvent, MonitoringSnapshot, NoopMonitor, PoolEvent, PoolEventKind,
};
pub use pool::{Pool, PoolKind};
pub use task::{task, TaskFailure, TaskOutcome};
pub use util::{ActorAddress, ActorId, GroupId, MessageId};
