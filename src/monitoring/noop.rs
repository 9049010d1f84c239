//! [`Monitor`] implementation that discards every event.
//!
//! Lets a [`crate::group::Group`] be built with monitoring wired through its
//! public API but effectively disabled, without branching the call sites in
//! `Group`/`ActorContext` on whether monitoring is enabled.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;

use super::error::MonitoringError;
use super::traits::{Monitor, MonitoringEvent};
use super::types::MonitoringSnapshot;

/// Discards everything recorded into it; `snapshot()` always reports zero
/// events. All methods are `#[inline(always)]` so a group configured with
/// `NoopMonitor` pays nothing beyond the trait dispatch itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor<E: MonitoringEvent> {
    _phantom: PhantomData<E>,
}

impl<E: MonitoringEvent> NoopMonitor<E> {
    /// Creates a new no-op monitor.
    #[inline(always)]
    pub fn new() -> Self {
        Self { _phantom: PhantomData }
    }
}

#[async_trait]
impl<E: MonitoringEvent> Monitor<E> for NoopMonitor<E> {
    #[inline(always)]
    async fn record(&self, _event: E) -> Result<(), MonitoringError> {
        Ok(())
    }

    #[inline(always)]
    async fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError> {
        Ok(MonitoringSnapshot {
            timestamp: Utc::now(),
            total_events: 0,
            trace_count: 0,
            debug_count: 0,
            info_count: 0,
            warning_count: 0,
            error_count: 0,
            critical_count: 0,
            recent_events: Vec::new(),
        })
    }

    #[inline(always)]
    async fn reset(&self) -> Result<(), MonitoringError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::monitoring::types::{ActorEvent, ActorEventKind};
    use crate::util::ActorId;

    fn create_test_event() -> ActorEvent {
        ActorEvent {
            timestamp: Utc::now(),
            actor_id: ActorId::new(),
            event_kind: ActorEventKind::Started,
            metadata: HashMap::new(),
        }
    }

    #[tokio::test]
    #[allow(clippy::expect_used)]
    async fn test_noop_record_ignores_events() {
        let monitor = NoopMonitor::new();

        for _ in 0..100 {
            let event = create_test_event();
            monitor.record(event).await.expect("record should succeed");
        }

        let snapshot = monitor.snapshot().await.expect("snapshot should succeed");
        assert_eq!(snapshot.total_events, 0);
        assert_eq!(snapshot.recent_events.len(), 0);
    }

    #[tokio::test]
    #[allow(clippy::expect_used)]
    async fn test_noop_snapshot_always_empty() {
        let monitor = NoopMonitor::<ActorEvent>::new();

        let snapshot = monitor.snapshot().await.expect("snapshot should succeed");
        assert_eq!(snapshot.trace_count, 0);
        assert_eq!(snapshot.critical_count, 0);
        assert_eq!(snapshot.recent_events.len(), 0);
    }

    #[tokio::test]
    #[allow(clippy::expect_used)]
    async fn test_noop_reset_always_succeeds() {
        let monitor = NoopMonitor::<ActorEvent>::new();
        monitor.reset().await.expect("reset should succeed");
        let snapshot = monitor.snapshot().await.expect("snapshot should succeed");
        assert_eq!(snapshot.total_events, 0);
    }

    #[tokio::test]
    #[allow(clippy::expect_used)]
    async fn test_noop_clone() {
        let monitor1 = NoopMonitor::<ActorEvent>::new();
        let monitor2 = monitor1.clone();

        let snapshot1 = monitor1.snapshot().await.expect("snapshot should succeed");
        let snapshot2 = monitor2.snapshot().await.expect("snapshot should succeed");
        assert_eq!(snapshot1.total_events, snapshot2.total_events);
    }

    #[tokio::test]
    #[allow(clippy::expect_used)]
    async fn test_noop_concurrent_safety() {
        use tokio::task;

        let handles: Vec<_> = (0..10)
            .map(|_| {
                task::spawn(async move {
                    let local_monitor = NoopMonitor::<ActorEvent>::new();
                    for _ in 0..10 {
                        let event = create_test_event();
                        local_monitor.record(event).await.expect("record should succeed");
                    }
                    local_monitor.snapshot().await.expect("snapshot should succeed")
                })
            })
            .collect();

        for handle in handles {
            let snapshot = handle.await.expect("task should complete");
            assert_eq!(snapshot.total_events, 0);
        }
    }
}
