//! Dataflow Stream (C6): an append-only, fan-out sequence built from a
//! linked chain of single-assignment cells.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use tokio::sync::Semaphore;

// Layer 3: Internal module imports
use super::error::DataflowError;
use super::var::DataflowVariable;
use crate::group::Group;
use crate::monitoring::DataflowEventKind;

/// One link in a [`DataflowStream`]'s chain: a value plus the cell for
/// whatever comes after it.
struct LinkCell<T> {
    value: T,
    next: DataflowVariable<LinkCell<T>>,
}

impl<T: Clone> Clone for LinkCell<T> {
    fn clone(&self) -> Self {
        Self { value: self.value.clone(), next: self.next.clone() }
    }
}

/// An append-only sequence that any number of [`StreamReader`]s can consume
/// independently, each at its own pace, without removing values for others.
///
/// Writers call [`DataflowStream::write`]; readers are created with
/// [`DataflowStream::reader`] and pull values with [`StreamReader::read`].
pub struct DataflowStream<T> {
    group: Group,
    write_cursor: Mutex<DataflowVariable<LinkCell<T>>>,
    unread: Option<Arc<Semaphore>>,
    written: AtomicUsize,
}

impl<T: Clone + Send + Sync + 'static> DataflowStream<T> {
    /// An unbounded stream: writers never block.
    pub fn new(group: Group) -> Self {
        Self::with_capacity(group, None)
    }

    /// A bounded stream: once `capacity` unread values accumulate across the
    /// slowest reader, [`DataflowStream::write`] blocks until a reader
    /// catches up.
    pub fn bounded(group: Group, capacity: usize) -> Self {
        Self::with_capacity(group, Some(capacity))
    }

    fn with_capacity(group: Group, capacity: Option<usize>) -> Self {
        let head = DataflowVariable::new(group.clone());
        Self {
            group,
            write_cursor: Mutex::new(head),
            unread: capacity.map(|c| Arc::new(Semaphore::new(c))),
            written: AtomicUsize::new(0),
        }
    }

    /// Append `value` to the stream, waking any reader waiting on the cell
    /// this write resolves. Blocks if the stream is bounded and full.
    pub async fn write(&self, value: T) -> Result<(), DataflowError> {
        if let Some(unread) = &self.unread {
            let permit = unread.clone().acquire_owned().await.map_err(|_| {
                DataflowError::BodyFailure("stream backpressure semaphore closed".to_string())
            })?;
            permit.forget();
        }
        let current = {
            let cursor = self.write_cursor.lock();
            cursor.clone()
        };
        let next = DataflowVariable::new(self.group.clone());
        current.bind_unique(LinkCell { value, next: next.clone() }).await?;
        *self.write_cursor.lock() = next;
        let length = self.written.fetch_add(1, Ordering::AcqRel) + 1;
        self.group.record_dataflow_event(DataflowEventKind::StreamWritten { length }).await;
        Ok(())
    }

    /// A new independent reader positioned at the start of the stream.
    pub fn reader(&self) -> StreamReader<T> {
        let head = {
            // The head is the cell the *first* writer will bind; since the
            // write cursor only ever advances, cloning it here is safe even
            // concurrently with writes that have not yet happened.
            let cursor = self.write_cursor.lock();
            cursor.clone()
        };
        StreamReader { cursor: Arc::new(Mutex::new(head)), unread: self.unread.clone() }
    }
}

/// An independent read position into a [`DataflowStream`]. Cloning a reader
/// gives two readers pointing at the *same* position (they will race for
/// the same values); use [`DataflowStream::reader`] for independent ones.
#[derive(Clone)]
pub struct StreamReader<T> {
    cursor: Arc<Mutex<DataflowVariable<LinkCell<T>>>>,
    unread: Option<Arc<Semaphore>>,
}

impl<T: Clone + Send + Sync + 'static> StreamReader<T> {
    /// Await and consume the next value, advancing this reader's position.
    pub async fn read(&self) -> T {
        let current = {
            let cursor = self.cursor.lock();
            cursor.clone()
        };
        let cell = current.val().await;
        *self.cursor.lock() = cell.next;
        if let Some(unread) = &self.unread {
            unread.add_permits(1);
        }
        cell.value
    }
}
