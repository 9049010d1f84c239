//! Dataflow Selector (C8): merges several stream readers into one ordered
//! feed, consuming exactly one value per input per firing.

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use tokio::sync::Notify;

// Layer 3: Internal module imports
use super::stream::StreamReader;
use crate::group::Group;
use crate::monitoring::DataflowEventKind;

struct Inbox<T> {
    entries: Mutex<VecDeque<(usize, T)>>,
    notify: Notify,
}

/// Merges several [`StreamReader`]s into a single feed.
///
/// Each input is drained by its own background puller task, so a read from
/// one input can never be blocked behind a slow read from another — the
/// selector only ever chooses among values that have already arrived.
/// `next()` picks fairly across inputs (round-robin); see
/// [`PrioritySelect`] for strict priority ordering.
///
/// [`Selector::stop`] prevents further pulling but cannot interrupt a
/// puller already blocked inside a `read()` call.
pub struct Selector<T> {
    inbox: Arc<Inbox<T>>,
    num_inputs: usize,
    next_cursor: Mutex<usize>,
    stopped: Arc<AtomicBool>,
    group: Group,
}

impl<T: Clone + Send + Sync + 'static> Selector<T> {
    /// Start pulling from every reader in `inputs`, indexed in the order
    /// given.
    pub fn new(group: Group, inputs: Vec<StreamReader<T>>) -> Self {
        let inbox = Arc::new(Inbox { entries: Mutex::new(VecDeque::new()), notify: Notify::new() });
        let stopped = Arc::new(AtomicBool::new(false));
        let num_inputs = inputs.len();
        for (index, reader) in inputs.into_iter().enumerate() {
            let inbox = inbox.clone();
            let stopped = stopped.clone();
            let _ = group.pool().spawn_background(async move {
                while !stopped.load(Ordering::Acquire) {
                    let value = reader.read().await;
                    inbox.entries.lock().push_back((index, value));
                    inbox.notify.notify_waiters();
                }
            });
        }
        Self { inbox, num_inputs, next_cursor: Mutex::new(0), stopped, group }
    }

    /// Await and consume the next available value, fairly across inputs in
    /// round-robin order among whatever is currently buffered.
    ///
    /// Synonym for [`Selector::select`].
    pub async fn next(&self) -> (usize, T) {
        self.select().await
    }

    /// Synchronous pull of the next available value; same semantics as
    /// [`Selector::next`].
    pub async fn select(&self) -> (usize, T) {
        loop {
            {
                let mut entries = self.inbox.entries.lock();
                if !entries.is_empty() {
                    let cursor = *self.next_cursor.lock();
                    let pick = Self::pick_round_robin(&entries, cursor, self.num_inputs);
                    let (index, value) = entries.remove(pick).expect("pick is a valid index");
                    *self.next_cursor.lock() = (index + 1) % self.num_inputs.max(1);
                    drop(entries);
                    self.group
                        .record_dataflow_event(DataflowEventKind::SelectorFired { input_index: index })
                        .await;
                    return (index, value);
                }
            }
            self.inbox.notify.notified().await;
        }
    }

    /// Like [`Selector::select`], but gives up and returns `None` if nothing
    /// arrives within `timeout`.
    pub async fn select_timeout(&self, timeout: Duration) -> Option<(usize, T)> {
        tokio::time::timeout(timeout, self.select()).await.ok()
    }

    fn pick_round_robin(entries: &VecDeque<(usize, T)>, cursor: usize, num_inputs: usize) -> usize {
        for offset in 0..num_inputs {
            let candidate_input = (cursor + offset) % num_inputs.max(1);
            if let Some(pos) = entries.iter().position(|(index, _)| *index == candidate_input) {
                return pos;
            }
        }
        0
    }

    /// Stop pulling further values. Pullers already inside a blocking
    /// `read()` finish that one read before observing the stop flag.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }
}

/// Like [`Selector`], but `next()` always prefers the lowest-indexed input
/// that has a value buffered, rather than rotating fairly.
pub struct PrioritySelect<T> {
    inbox: Arc<Inbox<T>>,
    stopped: Arc<AtomicBool>,
    group: Group,
}

impl<T: Clone + Send + Sync + 'static> PrioritySelect<T> {
    /// Start pulling from every reader in `inputs`; index 0 is highest
    /// priority.
    pub fn new(group: Group, inputs: Vec<StreamReader<T>>) -> Self {
        let inbox = Arc::new(Inbox { entries: Mutex::new(VecDeque::new()), notify: Notify::new() });
        let stopped = Arc::new(AtomicBool::new(false));
        for (index, reader) in inputs.into_iter().enumerate() {
            let inbox = inbox.clone();
            let stopped = stopped.clone();
            let _ = group.pool().spawn_background(async move {
                while !stopped.load(Ordering::Acquire) {
                    let value = reader.read().await;
                    inbox.entries.lock().push_back((index, value));
                    inbox.notify.notify_waiters();
                }
            });
        }
        Self { inbox, stopped, group }
    }

    /// Await and consume the next value, always preferring the lowest input
    /// index among whatever is currently buffered.
    ///
    /// Synonym for [`PrioritySelect::select`].
    pub async fn next(&self) -> (usize, T) {
        self.select().await
    }

    /// Synchronous pull of the next value; same semantics as
    /// [`PrioritySelect::next`].
    pub async fn select(&self) -> (usize, T) {
        loop {
            {
                let mut entries = self.inbox.entries.lock();
                if let Some(pos) = Self::lowest_index_position(&entries) {
                    let (index, value) = entries.remove(pos).expect("pos came from this deque");
                    drop(entries);
                    self.group
                        .record_dataflow_event(DataflowEventKind::SelectorFired { input_index: index })
                        .await;
                    return (index, value);
                }
            }
            self.inbox.notify.notified().await;
        }
    }

    /// Like [`PrioritySelect::select`], but gives up and returns `None` if
    /// nothing arrives within `timeout`.
    pub async fn select_timeout(&self, timeout: Duration) -> Option<(usize, T)> {
        tokio::time::timeout(timeout, self.select()).await.ok()
    }

    fn lowest_index_position(entries: &VecDeque<(usize, T)>) -> Option<usize> {
        entries
            .iter()
            .enumerate()
            .min_by_key(|(_, (index, _))| *index)
            .map(|(pos, _)| pos)
    }

    /// Stop pulling further values.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
    }
}
