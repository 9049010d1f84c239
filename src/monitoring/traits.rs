//! Core monitoring traits: the `Monitor<E>` sink and the `MonitoringEvent`
//! events it accepts.

use std::fmt::Debug;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::MonitoringError;
use super::types::MonitoringSnapshot;

/// Event severity, ordered lowest to highest for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum EventSeverity {
    /// Fine-grained firings (stream writes, operator firings, selector picks).
    Trace,
    /// Development-only diagnostics.
    Debug,
    /// Normal lifecycle transitions (actor spawned, group shut down).
    Info,
    /// Recoverable but noteworthy conditions (mailbox nearing capacity).
    Warning,
    /// Operation failures (actor handler error, pool submission rejected).
    Error,
    /// Failures that take down a whole group or pool.
    Critical,
}

/// An event type `Monitor<E>` can record. Implemented by this crate's
/// `ActorEventKind`, `PoolEventKind`, `DataflowEventKind`, and
/// `AgentEventKind` — see [`super::types`].
pub trait MonitoringEvent: Send + Sync + Clone + Debug + Serialize + 'static {
    /// Static event type identifier for categorization.
    const EVENT_TYPE: &'static str;

    /// When this event occurred.
    fn timestamp(&self) -> DateTime<Utc>;

    /// Severity used for filtering and [`EventSeverity`] comparisons.
    fn severity(&self) -> EventSeverity;
}

/// A sink for events of type `E`. [`super::NoopMonitor`] discards
/// everything at zero cost; [`super::InMemoryMonitor`] keeps a bounded
/// history queryable via [`Monitor::snapshot`].
#[async_trait]
pub trait Monitor<E: MonitoringEvent>: Send + Sync + Clone {
    /// Record one event.
    ///
    /// # Errors
    /// Returns `MonitoringError::RecordError` if the event cannot be recorded.
    async fn record(&self, event: E) -> Result<(), MonitoringError>;

    /// Snapshot of whatever state this monitor keeps.
    ///
    /// # Errors
    /// Returns `MonitoringError::SnapshotError` if the snapshot cannot be generated.
    async fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError>;

    /// Clear all recorded history.
    ///
    /// # Errors
    /// Returns `MonitoringError::ResetError` if the reset operation fails.
    async fn reset(&self) -> Result<(), MonitoringError>;
}
