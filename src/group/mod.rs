//! # Group Module (C9)
//!
//! A unit of shared scheduling: owns a [`crate::pool::Pool`] plus a
//! fairness default, and is the factory and lifecycle owner for actors,
//! agents, dataflow primitives, and tasks.

pub mod config;
pub mod error;

pub use config::GroupConfig;
pub use error::GroupError;

// Layer 1: Standard library imports
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use chrono::Utc; // §3.2 MANDATORY
use dashmap::DashMap;

// Layer 3: Internal module imports
use crate::actor::core::{spawn_cooperative, spawn_pinned};
use crate::actor::{Actor, ActorRef};
use crate::agent::Agent;
use crate::dataflow::{DataflowStream, DataflowVariable, Operator, PrioritySelect, Selector, StreamReader};
use crate::message::Message;
use crate::monitoring::{
    ActorEvent, ActorEventKind, AgentEvent, AgentEventKind, DataflowEvent, DataflowEventKind,
    GroupEvent, GroupEventKind, InMemoryMonitor, Monitor, MonitoringConfig, PoolEvent,
    PoolEventKind,
};
use crate::pool::Pool;
use crate::task::{self, TaskOutcome};
use crate::util::{ActorId, GroupId};

struct GroupInner {
    id: GroupId,
    config: GroupConfig,
    pool: Pool,
    actor_registry: DashMap<ActorId, Box<dyn Any + Send + Sync>>,
    pool_monitor: InMemoryMonitor<PoolEvent>,
    actor_monitor: InMemoryMonitor<ActorEvent>,
    agent_monitor: InMemoryMonitor<AgentEvent>,
    dataflow_monitor: InMemoryMonitor<DataflowEvent>,
    group_monitor: InMemoryMonitor<GroupEvent>,
    shutdown: AtomicBool,
}

/// Owns a Pool plus a fairness default; factory entry point for every other
/// primitive in the runtime (C3–C8, C10).
///
/// `Group` is a cheap-to-clone handle: all clones share the same pool,
/// actor registry, and monitors. Dropping the last clone does not shut
/// anything down; call [`Group::shutdown`] explicitly.
#[derive(Clone)]
pub struct Group(Arc<GroupInner>);

impl Group {
    /// Construct a new group from `config`.
    pub fn new(config: GroupConfig) -> Self {
        let pool = Pool::new(config.pool_kind, config.pool_size, config.daemon);
        let monitoring_config = MonitoringConfig::default();
        let group = Self(Arc::new(GroupInner {
            id: GroupId::new(),
            config,
            pool,
            actor_registry: DashMap::new(),
            pool_monitor: InMemoryMonitor::new(monitoring_config.clone()),
            actor_monitor: InMemoryMonitor::new(monitoring_config.clone()),
            agent_monitor: InMemoryMonitor::new(monitoring_config.clone()),
            dataflow_monitor: InMemoryMonitor::new(monitoring_config.clone()),
            group_monitor: InMemoryMonitor::new(monitoring_config),
            shutdown: AtomicBool::new(false),
        }));
        let group_for_event = group.clone();
        group.record_group_event_blocking(GroupEventKind::Created);
        let _ = &group_for_event;
        group
    }

    /// This group's identifier.
    pub fn id(&self) -> GroupId {
        self.0.id
    }

    /// The configuration this group was constructed with.
    pub fn config(&self) -> &GroupConfig {
        &self.0.config
    }

    /// The pool backing this group's primitives.
    pub fn pool(&self) -> &Pool {
        &self.0.pool
    }

    /// The default fairness for cooperative actors spawned from this group.
    pub fn fair_default(&self) -> bool {
        self.0.config.fair_default
    }

    /// Whether `shutdown()` has been called.
    pub fn is_shutdown(&self) -> bool {
        self.0.shutdown.load(Ordering::Acquire)
    }

    /// Spawn a thread-bound actor: it acquires one pool worker for its
    /// entire life and blocks on its mailbox between messages.
    pub fn spawn_pinned<A: Actor>(&self, actor: A) -> ActorRef<A::Message> {
        self.spawn_pinned_named(ActorAddressKind::Anonymous, actor, None)
    }

    /// Like [`Group::spawn_pinned`] with an explicit mailbox capacity
    /// (bounded) and actor name.
    pub fn spawn_pinned_with<A: Actor>(
        &self,
        name: Option<&str>,
        actor: A,
        mailbox_capacity: Option<usize>,
    ) -> ActorRef<A::Message> {
        let address = name.map(ActorAddressKind::named).unwrap_or(ActorAddressKind::Anonymous);
        self.spawn_pinned_named(address, actor, mailbox_capacity)
    }

    /// Spawn a cooperative (pooled) actor: it holds no worker while idle,
    /// waking onto the pool only when it has messages to process.
    pub fn spawn_cooperative<A: Actor>(&self, actor: A) -> ActorRef<A::Message> {
        let fair = self.fair_default();
        spawn_cooperative(self.clone(), ActorAddressKind::Anonymous.into(), actor, None, fair)
    }

    /// Like [`Group::spawn_cooperative`] with explicit mailbox capacity and
    /// fairness override.
    pub fn spawn_cooperative_with<A: Actor>(
        &self,
        name: Option<&str>,
        actor: A,
        mailbox_capacity: Option<usize>,
        fair: Option<bool>,
    ) -> ActorRef<A::Message> {
        let address = name.map(ActorAddressKind::named).unwrap_or(ActorAddressKind::Anonymous);
        spawn_cooperative(
            self.clone(),
            address.into(),
            actor,
            mailbox_capacity,
            fair.unwrap_or_else(|| self.fair_default()),
        )
    }

    /// Create an [`Agent`] holding `initial`, backed by this group's pool.
    pub fn agent<T: Send + Sync + Clone + 'static>(&self, initial: T) -> Agent<T> {
        Agent::new(self, initial)
    }

    /// Create an unbound [`DataflowVariable`] (C5).
    pub fn dataflow_variable<T: Clone + Send + Sync + 'static>(&self) -> DataflowVariable<T> {
        DataflowVariable::new(self.clone())
    }

    /// Create an unbounded [`DataflowStream`] (C6).
    pub fn stream<T: Clone + Send + Sync + 'static>(&self) -> DataflowStream<T> {
        DataflowStream::new(self.clone())
    }

    /// Create a bounded [`DataflowStream`] (C6) that suspends writers once
    /// `capacity` unread values have accumulated.
    pub fn bounded_stream<T: Clone + Send + Sync + 'static>(&self, capacity: usize) -> DataflowStream<T> {
        DataflowStream::bounded(self.clone(), capacity)
    }

    /// Start an [`Operator`] (C7) firing `body` on one value pulled from
    /// each of `inputs`, publishing to `outputs`.
    pub fn operator<T, F>(
        &self,
        inputs: Vec<StreamReader<T>>,
        outputs: Vec<Arc<DataflowStream<T>>>,
        body: F,
    ) -> Operator
    where
        T: Clone + Send + Sync + 'static,
        F: crate::dataflow::operator::OperatorBody<T>,
    {
        Operator::spawn(self.clone(), inputs, outputs, body)
    }

    /// Start a [`Selector`] (C8) merging `inputs` fairly.
    pub fn selector<T: Clone + Send + Sync + 'static>(&self, inputs: Vec<StreamReader<T>>) -> Selector<T> {
        Selector::new(self.clone(), inputs)
    }

    /// Start a [`PrioritySelect`] (C8) merging `inputs`, lowest index wins.
    pub fn priority_select<T: Clone + Send + Sync + 'static>(
        &self,
        inputs: Vec<StreamReader<T>>,
    ) -> PrioritySelect<T> {
        PrioritySelect::new(self.clone(), inputs)
    }

    /// Submit `body` to this group's pool (C10); see [`crate::task::task`].
    pub fn task<F, Fut, T, E>(&self, body: F) -> DataflowVariable<TaskOutcome<T>>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<T, E>> + Send + 'static,
        T: Clone + Send + Sync + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        task::task(self.clone(), body)
    }

    fn spawn_pinned_named<A: Actor>(
        &self,
        address: ActorAddressKind,
        actor: A,
        mailbox_capacity: Option<usize>,
    ) -> ActorRef<A::Message> {
        spawn_pinned(self.clone(), address.into(), actor, mailbox_capacity)
    }

    /// Register a live actor so other actors can resolve it by address for
    /// `reply()`.
    pub(crate) fn register_actor<M: Message>(&self, id: ActorId, actor_ref: ActorRef<M>) {
        self.0.actor_registry.insert(id, Box::new(actor_ref));
    }

    /// Resolve a previously-registered actor by id and expected message type.
    pub(crate) fn lookup<M: Message>(&self, id: &ActorId) -> Option<ActorRef<M>> {
        self.0
            .actor_registry
            .get(id)
            .and_then(|entry| entry.downcast_ref::<ActorRef<M>>().cloned())
    }

    /// Remove an actor from the registry once it has stopped.
    pub(crate) fn deregister_actor(&self, id: &ActorId) {
        self.0.actor_registry.remove(id);
    }

    /// Request an orderly shutdown: the pool stops accepting new
    /// submissions, in-flight primitives are allowed to reach a safe
    /// stopping point.
    pub fn shutdown(&self) {
        self.0.shutdown.store(true, Ordering::Release);
        self.0.pool.shutdown();
        self.record_group_event_blocking(GroupEventKind::ShuttingDown);
    }

    /// Snapshot monitor for pool lifecycle events.
    pub fn pool_events(&self) -> &InMemoryMonitor<PoolEvent> {
        &self.0.pool_monitor
    }

    /// Snapshot monitor for actor lifecycle events.
    pub fn actor_events(&self) -> &InMemoryMonitor<ActorEvent> {
        &self.0.actor_monitor
    }

    /// Snapshot monitor for agent update events.
    pub fn agent_events(&self) -> &InMemoryMonitor<AgentEvent> {
        &self.0.agent_monitor
    }

    /// Snapshot monitor for dataflow bind/fire events.
    pub fn dataflow_events(&self) -> &InMemoryMonitor<DataflowEvent> {
        &self.0.dataflow_monitor
    }

    /// Snapshot monitor for group lifecycle events.
    pub fn group_events(&self) -> &InMemoryMonitor<GroupEvent> {
        &self.0.group_monitor
    }

    pub(crate) async fn record_actor_event(&self, kind: ActorEventKind, actor_id: ActorId) {
        let event = ActorEvent {
            timestamp: Utc::now(), // §3.2
            actor_id,
            event_kind: kind,
            metadata: HashMap::new(),
        };
        let _ = self.0.actor_monitor.record(event).await;
    }

    pub(crate) async fn record_pool_event(&self, kind: PoolEventKind) {
        let event = PoolEvent {
            timestamp: Utc::now(), // §3.2
            event_kind: kind,
            metadata: HashMap::new(),
        };
        let _ = self.0.pool_monitor.record(event).await;
    }

    pub(crate) async fn record_agent_event(&self, kind: AgentEventKind, actor_id: ActorId) {
        let event = AgentEvent {
            timestamp: Utc::now(), // §3.2
            actor_id,
            event_kind: kind,
            metadata: HashMap::new(),
        };
        let _ = self.0.agent_monitor.record(event).await;
    }

    pub(crate) async fn record_dataflow_event(&self, kind: DataflowEventKind) {
        let event = DataflowEvent {
            timestamp: Utc::now(), // §3.2
            event_kind: kind,
            metadata: HashMap::new(),
        };
        let _ = self.0.dataflow_monitor.record(event).await;
    }

    fn record_group_event_blocking(&self, kind: GroupEventKind) {
        let event = GroupEvent {
            timestamp: Utc::now(), // §3.2
            group_id: self.0.id,
            event_kind: kind,
            metadata: HashMap::new(),
        };
        let monitor = self.0.group_monitor.clone();
        // Construction/shutdown are sync call sites; the in-memory monitor's
        // record is cheap enough to run to completion on a throwaway task
        // without making `Group::new`/`shutdown` async themselves.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let _ = monitor.record(event).await;
            });
        }
    }
}

/// Internal helper distinguishing named vs anonymous actor construction
/// without exposing `ActorAddress` variants at every call site.
pub(crate) enum ActorAddressKind {
    Named(String),
    Anonymous,
}

impl ActorAddressKind {
    fn named(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<ActorAddressKind> for crate::util::ActorAddress {
    fn from(kind: ActorAddressKind) -> Self {
        match kind {
            ActorAddressKind::Named(name) => crate::util::ActorAddress::named(name),
            ActorAddressKind::Anonymous => crate::util::ActorAddress::anonymous(),
        }
    }
}
