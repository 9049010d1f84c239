//! In-memory monitor backed by atomic severity counters and a bounded ring
//! buffer of recent events.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use super::error::MonitoringError;
use super::traits::{EventSeverity, Monitor, MonitoringEvent};
use super::types::{MonitoringConfig, MonitoringSnapshot};

/// Records every event above `config.severity_filter`, tallying one atomic
/// counter per severity and keeping the most recent `config.max_history_size`
/// events for [`Monitor::snapshot`]. Cloning is cheap — clones share the
/// same `Arc<InMemoryMonitorInner>`.
#[derive(Debug)]
pub struct InMemoryMonitor<E: MonitoringEvent> {
    inner: Arc<InMemoryMonitorInner<E>>,
}

#[derive(Debug)]
struct InMemoryMonitorInner<E: MonitoringEvent> {
    config: MonitoringConfig,

    total_events: AtomicU64,
    trace_count: AtomicU64,
    debug_count: AtomicU64,
    info_count: AtomicU64,
    warning_count: AtomicU64,
    error_count: AtomicU64,
    critical_count: AtomicU64,

    history: RwLock<VecDeque<E>>,
}

impl<E: MonitoringEvent> InMemoryMonitor<E> {
    /// Creates a new in-memory monitor with the given configuration.
    pub fn new(config: MonitoringConfig) -> Self {
        Self {
            inner: Arc::new(InMemoryMonitorInner {
                config,
                total_events: AtomicU64::new(0),
                trace_count: AtomicU64::new(0),
                debug_count: AtomicU64::new(0),
                info_count: AtomicU64::new(0),
                warning_count: AtomicU64::new(0),
                error_count: AtomicU64::new(0),
                critical_count: AtomicU64::new(0),
                history: RwLock::new(VecDeque::new()),
            }),
        }
    }

    fn increment_severity_counter(&self, severity: EventSeverity) {
        match severity {
            EventSeverity::Trace => self.inner.trace_count.fetch_add(1, Ordering::Relaxed),
            EventSeverity::Debug => self.inner.debug_count.fetch_add(1, Ordering::Relaxed),
            EventSeverity::Info => self.inner.info_count.fetch_add(1, Ordering::Relaxed),
            EventSeverity::Warning => self.inner.warning_count.fetch_add(1, Ordering::Relaxed),
            EventSeverity::Error => self.inner.error_count.fetch_add(1, Ordering::Relaxed),
            EventSeverity::Critical => self.inner.critical_count.fetch_add(1, Ordering::Relaxed),
        };
    }
}

impl<E: MonitoringEvent> Clone for InMemoryMonitor<E> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

#[async_trait]
impl<E: MonitoringEvent> Monitor<E> for InMemoryMonitor<E> {
    async fn record(&self, event: E) -> Result<(), MonitoringError> {
        if !self.inner.config.enabled {
            return Ok(());
        }

        let severity = event.severity();
        if severity < self.inner.config.severity_filter {
            return Ok(());
        }

        self.inner.total_events.fetch_add(1, Ordering::Relaxed);
        self.increment_severity_counter(severity);

        let mut history = self
            .inner
            .history
            .write()
            .map_err(|e| MonitoringError::record(format!("failed to acquire write lock: {e}")))?;

        if history.len() >= self.inner.config.max_history_size {
            history.pop_front();
        }
        history.push_back(event);

        Ok(())
    }

    async fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError> {
        let history = self
            .inner
            .history
            .read()
            .map_err(|e| MonitoringError::snapshot(format!("failed to acquire read lock: {e}")))?;

        Ok(MonitoringSnapshot {
            timestamp: Utc::now(),
            total_events: self.inner.total_events.load(Ordering::Relaxed),
            trace_count: self.inner.trace_count.load(Ordering::Relaxed),
            debug_count: self.inner.debug_count.load(Ordering::Relaxed),
            info_count: self.inner.info_count.load(Ordering::Relaxed),
            warning_count: self.inner.warning_count.load(Ordering::Relaxed),
            error_count: self.inner.error_count.load(Ordering::Relaxed),
            critical_count: self.inner.critical_count.load(Ordering::Relaxed),
            recent_events: history.iter().cloned().collect(),
        })
    }

    async fn reset(&self) -> Result<(), MonitoringError> {
        self.inner.total_events.store(0, Ordering::Relaxed);
        self.inner.trace_count.store(0, Ordering::Relaxed);
        self.inner.debug_count.store(0, Ordering::Relaxed);
        self.inner.info_count.store(0, Ordering::Relaxed);
        self.inner.warning_count.store(0, Ordering::Relaxed);
        self.inner.error_count.store(0, Ordering::Relaxed);
        self.inner.critical_count.store(0, Ordering::Relaxed);

        let mut history = self
            .inner
            .history
            .write()
            .map_err(|e| MonitoringError::reset(format!("failed to acquire write lock: {e}")))?;
        history.clear();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::monitoring::types::{ActorEvent, ActorEventKind};
    use crate::util::ActorId;

    fn create_test_event(_severity: EventSeverity) -> ActorEvent {
        ActorEvent {
            timestamp: Utc::now(),
            actor_id: ActorId::new(),
            event_kind: ActorEventKind::Started,
            metadata: HashMap::new(),
        }
    }

    fn create_test_event_with_kind(kind: ActorEventKind) -> ActorEvent {
        ActorEvent { timestamp: Utc::now(), actor_id: ActorId::new(), event_kind: kind, metadata: HashMap::new() }
    }

    #[tokio::test]
    #[allow(clippy::expect_used)]
    async fn test_record_multiple_events() {
        let monitor = InMemoryMonitor::new(MonitoringConfig::default());

        for _ in 0..10 {
            let event = create_test_event(EventSeverity::Info);
            monitor.record(event).await.expect("record should succeed");
        }

        let snapshot = monitor.snapshot().await.expect("snapshot should succeed");
        assert_eq!(snapshot.total_events, 10);
        assert_eq!(snapshot.info_count, 10);
        assert_eq!(snapshot.recent_events.len(), 10);
    }

    #[tokio::test]
    #[allow(clippy::expect_used)]
    async fn test_severity_filtering() {
        let config = MonitoringConfig { severity_filter: EventSeverity::Warning, ..MonitoringConfig::default() };
        let monitor = InMemoryMonitor::new(config);

        let info_event = create_test_event_with_kind(ActorEventKind::Started);
        monitor.record(info_event).await.expect("record should succeed");

        let error_event =
            create_test_event_with_kind(ActorEventKind::Failed { error: "test error".to_string() });
        monitor.record(error_event).await.expect("record should succeed");

        let snapshot = monitor.snapshot().await.expect("snapshot should succeed");
        assert_eq!(snapshot.total_events, 1);
        assert_eq!(snapshot.error_count, 1);
        assert_eq!(snapshot.info_count, 0);
    }

    #[tokio::test]
    #[allow(clippy::expect_used)]
    async fn test_ring_buffer_overflow() {
        let config = MonitoringConfig { max_history_size: 5, ..MonitoringConfig::default() };
        let monitor = InMemoryMonitor::new(config);

        for _ in 0..10 {
            let event = create_test_event(EventSeverity::Info);
            monitor.record(event).await.expect("record should succeed");
        }

        let snapshot = monitor.snapshot().await.expect("snapshot should succeed");
        assert_eq!(snapshot.total_events, 10);
        assert_eq!(snapshot.recent_events.len(), 5);
    }

    #[tokio::test]
    #[allow(clippy::expect_used)]
    async fn test_reset_functionality() {
        let monitor = InMemoryMonitor::new(MonitoringConfig::default());

        for _ in 0..5 {
            let event = create_test_event(EventSeverity::Info);
            monitor.record(event).await.expect("record should succeed");
        }
        monitor.reset().await.expect("reset should succeed");

        let snapshot = monitor.snapshot().await.expect("snapshot should succeed");
        assert_eq!(snapshot.total_events, 0);
        assert_eq!(snapshot.recent_events.len(), 0);
    }

    #[tokio::test]
    #[allow(clippy::expect_used)]
    async fn test_clone_shares_state() {
        let monitor1 = InMemoryMonitor::new(MonitoringConfig::default());
        let event = create_test_event(EventSeverity::Info);
        monitor1.record(event).await.expect("record should succeed");

        let monitor2 = monitor1.clone();
        let snapshot1 = monitor1.snapshot().await.expect("snapshot should succeed");
        let snapshot2 = monitor2.snapshot().await.expect("snapshot should succeed");
        assert_eq!(snapshot1.total_events, snapshot2.total_events);
    }

    #[tokio::test]
    #[allow(clippy::expect_used)]
    async fn test_disabled_monitoring_records_nothing() {
        let config = MonitoringConfig { enabled: false, ..MonitoringConfig::default() };
        let monitor = InMemoryMonitor::new(config);

        let event = create_test_event(EventSeverity::Info);
        monitor.record(event).await.expect("record should succeed");

        let snapshot = monitor.snapshot().await.expect("snapshot should succeed");
        assert_eq!(snapshot.total_events, 0);
    }

    #[tokio::test]
    #[allow(clippy::expect_used)]
    async fn test_severity_counters() {
        let config = MonitoringConfig { severity_filter: EventSeverity::Trace, ..MonitoringConfig::default() };
        let monitor = InMemoryMonitor::new(config);

        let events = vec![
            create_test_event_with_kind(ActorEventKind::Spawned),
            create_test_event_with_kind(ActorEventKind::Started),
            create_test_event_with_kind(ActorEventKind::Failed { error: "test".to_string() }),
        ];
        for event in events {
            monitor.record(event).await.expect("record should succeed");
        }

        let snapshot = monitor.snapshot().await.expect("snapshot should succeed");
        assert_eq!(snapshot.total_events, 3);
        assert_eq!(snapshot.debug_count, 1);
        assert_eq!(snapshot.info_count, 1);
        assert_eq!(snapshot.error_count, 1);
    }

    #[tokio::test]
    #[allow(clippy::expect_used)]
    async fn test_concurrent_recording() {
        use tokio::task;

        let monitor = InMemoryMonitor::new(MonitoringConfig::default());
        let handles: Vec<_> = (0..10)
            .map(|_| {
                let monitor_clone = monitor.clone();
                task::spawn(async move {
                    for _ in 0..10 {
                        let event = create_test_event(EventSeverity::Info);
                        monitor_clone.record(event).await.expect("record should succeed");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.expect("task should complete");
        }

        let snapshot = monitor.snapshot().await.expect("snapshot should succeed");
        assert_eq!(snapshot.total_events, 100);
        assert_eq!(snapshot.info_count, 100);
    }
}
