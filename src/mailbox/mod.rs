//! Mailbox (C2): the per-actor message queue an [`crate::actor::ActorRef`]
//! sends into and an actor's run loop drains.
//!
//! [`BoundedMailbox`] enforces a capacity and a [`BackpressureStrategy`] for
//! what happens when it's full; [`UnboundedMailbox`] has neither and should
//! only back actors known to keep up with their senders. Both are generic
//! over `R: MetricsRecorder` (default [`AtomicMetrics`]) so send/receive/drop
//! counts are always available without a `dyn` indirection.

pub mod backpressure;
pub mod bounded;
pub mod metrics;
pub mod traits;
pub mod unbounded;

pub use backpressure::BackpressureStrategy;
pub use bounded::{BoundedMailbox, BoundedMailboxSender};
pub use metrics::{AtomicMetrics, MetricsRecorder};
pub use traits::{MailboxCapacity, MailboxError, MailboxReceiver, MailboxSender, TryRecvError};
pub use unbounded::{UnboundedMailbox, UnboundedMailboxSender};
