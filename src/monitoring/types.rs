//! Monitoring event types and configuration structures.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::traits::{EventSeverity, MonitoringEvent};
use crate::util::{ActorId, GroupId};

/// Configuration for monitoring behavior.
///
/// Controls how events are recorded, filtered, and stored in the monitor.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringConfig {
    /// Whether monitoring is enabled
    pub enabled: bool,

    /// Maximum number of events to keep in history
    pub max_history_size: usize,

    /// Minimum severity level to record (events below this are filtered)
    pub severity_filter: EventSeverity,

    /// Interval for snapshot generation (if using background snapshots)
    #[serde(with = "crate::util::duration_serde")]
    pub snapshot_interval: Duration,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_history_size: 1000,
            severity_filter: EventSeverity::Info,
            snapshot_interval: Duration::from_secs(60),
        }
    }
}

/// Snapshot of monitoring state at a point in time.
///
/// Provides queryable access to monitoring counters and recent event history.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSnapshot<E: MonitoringEvent> {
    /// Timestamp when snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Total number of events recorded
    pub total_events: u64,

    /// Number of trace-level events
    pub trace_count: u64,

    /// Number of debug-level events
    pub debug_count: u64,

    /// Number of info-level events
    pub info_count: u64,

    /// Number of warning-level events
    pub warning_count: u64,

    /// Number of error-level events
    pub error_count: u64,

    /// Number of critical-level events
    pub critical_count: u64,

    /// Recent events (up to max_history_size)
    pub recent_events: Vec<E>,
}

// ============================================================================
// Pool Events
// ============================================================================

/// Events related to worker pool lifecycle and scheduling.
#[derive(Debug, Clone, Serialize)]
pub struct PoolEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// Specific pool event type
    pub event_kind: PoolEventKind,

    /// Additional event metadata
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for PoolEvent {
    const EVENT_TYPE: &'static str = "pool";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            PoolEventKind::Started { .. } => EventSeverity::Info,
            PoolEventKind::TaskSubmitted => EventSeverity::Trace,
            PoolEventKind::TaskCompleted { .. } => EventSeverity::Trace,
            PoolEventKind::SaturationReached { .. } => EventSeverity::Warning,
            PoolEventKind::ShuttingDown => EventSeverity::Info,
            PoolEventKind::Shutdown => EventSeverity::Info,
        }
    }
}

/// Specific types of pool events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum PoolEventKind {
    /// Pool started with a given worker ceiling
    Started {
        /// Configured worker ceiling (permits), if bounded
        worker_limit: Option<usize>,
    },

    /// A unit of work was submitted to the pool
    TaskSubmitted,

    /// A submitted unit of work completed
    TaskCompleted {
        /// Wall-clock duration the task held a worker, in microseconds
        duration_micros: u64,
    },

    /// All permits are in use; new submissions will wait
    SaturationReached {
        /// Number of submissions currently waiting for a permit
        queued: usize,
    },

    /// Pool shutdown was requested; draining in-flight work
    ShuttingDown,

    /// Pool fully shut down, no further submissions accepted
    Shutdown,
}

// ============================================================================
// Actor Events
// ============================================================================

/// Events related to actor lifecycle and message processing.
#[derive(Debug, Clone, Serialize)]
pub struct ActorEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// ID of the actor
    pub actor_id: ActorId,

    /// Specific actor event type
    pub event_kind: ActorEventKind,

    /// Additional event metadata
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for ActorEvent {
    const EVENT_TYPE: &'static str = "actor";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            ActorEventKind::Spawned => EventSeverity::Debug,
            ActorEventKind::Started => EventSeverity::Info,
            ActorEventKind::MessageReceived { .. } => EventSeverity::Trace,
            ActorEventKind::MessageProcessed { .. } => EventSeverity::Trace,
            ActorEventKind::Failed { .. } => EventSeverity::Error,
            ActorEventKind::Stopping => EventSeverity::Debug,
            ActorEventKind::Stopped => EventSeverity::Info,
        }
    }
}

/// Specific types of actor events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ActorEventKind {
    /// Actor was spawned onto a group
    Spawned,

    /// Actor transitioned to Running and began processing its mailbox
    Started,

    /// Actor received a message
    MessageReceived {
        /// Message type name
        message_type: String,
    },

    /// Actor finished processing a message
    MessageProcessed {
        /// Message type name
        message_type: String,
        /// Processing duration in microseconds
        duration_micros: u64,
    },

    /// Handler returned an uncaught failure; actor moves straight to Stopped
    Failed {
        /// Error message from the failed handler
        error: String,
    },

    /// Actor is draining its mailbox before stopping
    Stopping,

    /// Actor reached its terminal Stopped state
    Stopped,
}

// ============================================================================
// Agent Events
// ============================================================================

/// Events related to agent value mutation.
#[derive(Debug, Clone, Serialize)]
pub struct AgentEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// ID of the actor backing the agent
    pub actor_id: ActorId,

    /// Specific agent event type
    pub event_kind: AgentEventKind,

    /// Additional event metadata
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for AgentEvent {
    const EVENT_TYPE: &'static str = "agent";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            AgentEventKind::UpdateQueued { .. } => EventSeverity::Trace,
            AgentEventKind::UpdateApplied { .. } => EventSeverity::Trace,
            AgentEventKind::UpdateFailed { .. } => EventSeverity::Error,
        }
    }
}

/// Specific types of agent events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AgentEventKind {
    /// An update closure was queued for serialized application
    UpdateQueued {
        /// Number of updates waiting ahead of this one
        queue_depth: usize,
    },

    /// An update closure was applied to the agent's value
    UpdateApplied {
        /// Duration the update closure took to run, in microseconds
        duration_micros: u64,
    },

    /// An update closure panicked or otherwise failed
    UpdateFailed {
        /// Error message
        error: String,
    },
}

// ============================================================================
// Dataflow Events
// ============================================================================

/// Events related to dataflow variables, streams, operators, and selectors.
#[derive(Debug, Clone, Serialize)]
pub struct DataflowEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// Specific dataflow event type
    pub event_kind: DataflowEventKind,

    /// Additional event metadata
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for DataflowEvent {
    const EVENT_TYPE: &'static str = "dataflow";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            DataflowEventKind::VariableBound { .. } => EventSeverity::Trace,
            DataflowEventKind::VariableRebindRejected => EventSeverity::Warning,
            DataflowEventKind::StreamWritten { .. } => EventSeverity::Trace,
            DataflowEventKind::OperatorFired { .. } => EventSeverity::Trace,
            DataflowEventKind::SelectorFired { .. } => EventSeverity::Trace,
        }
    }
}

/// Specific types of dataflow events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum DataflowEventKind {
    /// A dataflow variable was bound for the first and only time
    VariableBound {
        /// Number of waiters woken by the bind
        waiters_woken: usize,
    },

    /// A second bind was attempted on an already-bound variable
    VariableRebindRejected,

    /// A value was written to a dataflow stream
    StreamWritten {
        /// Stream length after the write
        length: usize,
    },

    /// An operator fired after all inputs became available
    OperatorFired {
        /// Index of this firing (0-based, strictly increasing per operator)
        firing_index: u64,
    },

    /// A selector (or priority selector) fired on a ready input
    SelectorFired {
        /// Index of the input channel that was selected
        input_index: usize,
    },
}

// ============================================================================
// Group Events
// ============================================================================

/// Events related to group lifecycle and component registration.
#[derive(Debug, Clone, Serialize)]
pub struct GroupEvent {
    /// Timestamp when event occurred (§3.2 chrono DateTime<Utc>)
    pub timestamp: DateTime<Utc>,

    /// ID of the group
    pub group_id: GroupId,

    /// Specific group event type
    pub event_kind: GroupEventKind,

    /// Additional event metadata
    pub metadata: HashMap<String, String>,
}

impl MonitoringEvent for GroupEvent {
    const EVENT_TYPE: &'static str = "group";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.event_kind {
            GroupEventKind::Created => EventSeverity::Info,
            GroupEventKind::ComponentRegistered { .. } => EventSeverity::Debug,
            GroupEventKind::ComponentDeregistered { .. } => EventSeverity::Debug,
            GroupEventKind::ShuttingDown => EventSeverity::Info,
            GroupEventKind::Shutdown => EventSeverity::Info,
        }
    }
}

/// Specific types of group events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum GroupEventKind {
    /// Group was created with a fresh pool
    Created,

    /// A component (actor, agent, operator, selector) registered with the group
    ComponentRegistered {
        /// Human-readable kind of component ("actor", "agent", "operator", "selector")
        kind: String,
    },

    /// A component deregistered from the group, usually on stop
    ComponentDeregistered {
        /// Human-readable kind of component
        kind: String,
    },

    /// Group shutdown requested; cascading to owned components
    ShuttingDown,

    /// Group and its pool fully shut down
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitoring_config_default() {
        let config = MonitoringConfig::default();
        assert!(config.enabled);
        assert_eq!(config.max_history_size, 1000);
        assert_eq!(config.severity_filter, EventSeverity::Info);
        assert_eq!(config.snapshot_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_pool_event_severity() {
        let event = PoolEvent {
            timestamp: Utc::now(),
            event_kind: PoolEventKind::SaturationReached { queued: 3 },
            metadata: HashMap::new(),
        };

        assert_eq!(event.severity(), EventSeverity::Warning);
        assert_eq!(PoolEvent::EVENT_TYPE, "pool");
    }

    #[test]
    fn test_actor_event_severity() {
        let actor_id = ActorId::new();
        let event = ActorEvent {
            timestamp: Utc::now(),
            actor_id,
            event_kind: ActorEventKind::Started,
            metadata: HashMap::new(),
        };

        assert_eq!(event.severity(), EventSeverity::Info);
        assert_eq!(ActorEvent::EVENT_TYPE, "actor");
    }

    #[test]
    fn test_actor_event_failed_severity() {
        let event = ActorEvent {
            timestamp: Utc::now(),
            actor_id: ActorId::new(),
            event_kind: ActorEventKind::Failed {
                error: "handler panicked".to_string(),
            },
            metadata: HashMap::new(),
        };

        assert_eq!(event.severity(), EventSeverity::Error);
    }

    #[test]
    fn test_agent_event_severity() {
        let event = AgentEvent {
            timestamp: Utc::now(),
            actor_id: ActorId::new(),
            event_kind: AgentEventKind::UpdateFailed {
                error: "closure panicked".to_string(),
            },
            metadata: HashMap::new(),
        };

        assert_eq!(event.severity(), EventSeverity::Error);
        assert_eq!(AgentEvent::EVENT_TYPE, "agent");
    }

    #[test]
    fn test_dataflow_event_severity() {
        let event = DataflowEvent {
            timestamp: Utc::now(),
            event_kind: DataflowEventKind::VariableRebindRejected,
            metadata: HashMap::new(),
        };

        assert_eq!(event.severity(), EventSeverity::Warning);
        assert_eq!(DataflowEvent::EVENT_TYPE, "dataflow");
    }

    #[test]
    fn test_group_event_severity() {
        let event = GroupEvent {
            timestamp: Utc::now(),
            group_id: GroupId::new(),
            event_kind: GroupEventKind::Created,
            metadata: HashMap::new(),
        };

        assert_eq!(event.severity(), EventSeverity::Info);
        assert_eq!(GroupEvent::EVENT_TYPE, "group");
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_actor_event_kind_message_processed() {
        let kind = ActorEventKind::MessageProcessed {
            message_type: "PingMessage".to_string(),
            duration_micros: 150,
        };

        let json = serde_json::to_string(&kind).expect("Serialization should succeed");
        assert!(json.contains("MessageProcessed"));
        assert!(json.contains("150"));
    }

    #[test]
    fn test_monitoring_snapshot_creation() {
        let snapshot = MonitoringSnapshot::<ActorEvent> {
            timestamp: Utc::now(),
            total_events: 100,
            trace_count: 10,
            debug_count: 20,
            info_count: 30,
            warning_count: 25,
            error_count: 10,
            critical_count: 5,
            recent_events: vec![],
        };

        assert_eq!(snapshot.total_events, 100);
        assert_eq!(snapshot.trace_count, 10);
        assert_eq!(snapshot.critical_count, 5);
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_event_metadata() {
        let mut metadata = HashMap::new();
        metadata.insert("custom_key".to_string(), "custom_value".to_string());

        let event = GroupEvent {
            timestamp: Utc::now(),
            group_id: GroupId::new(),
            event_kind: GroupEventKind::ShuttingDown,
            metadata,
        };

        assert_eq!(
            event.metadata.get("custom_key").expect("Key should exist"),
            "custom_value"
        );
    }
}
