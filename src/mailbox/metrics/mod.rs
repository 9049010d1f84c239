//! Mailbox traffic counters.
//!
//! `BoundedMailbox<M, R>` and `UnboundedMailbox<M, R>` are generic over
//! `R: MetricsRecorder` rather than a `dyn` object, so the counter
//! implementation is chosen at compile time. [`AtomicMetrics`] is the only
//! implementation this crate ships and is the default type parameter on
//! both mailbox kinds.

mod atomic;
mod recorder;

pub use atomic::AtomicMetrics;
pub use recorder::MetricsRecorder;
