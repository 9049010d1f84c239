//! Dataflow Variable (C5): a single-assignment cell with a wait-list.

// Layer 1: Standard library imports
use std::sync::Arc;

// Layer 2: Third-party crate imports
use parking_lot::Mutex;
use tokio::sync::oneshot;

// Layer 3: Internal module imports
use super::error::DataflowError;
use crate::group::Group;
use crate::monitoring::DataflowEventKind;

type Handler<T> = Box<dyn FnOnce(T) + Send>;

enum Waiter<T> {
    Reply(oneshot::Sender<T>),
    Callback(Handler<T>),
}

enum VarState<T> {
    Unbound { waiters: Vec<Waiter<T>> },
    Bound(T),
}

struct DataflowVariableInner<T> {
    group: Group,
    state: Mutex<VarState<T>>,
}

/// A single-assignment cell: any number of readers, exactly one successful
/// writer. Cloning a `DataflowVariable` shares the same underlying cell.
pub struct DataflowVariable<T>(Arc<DataflowVariableInner<T>>);

impl<T> Clone for DataflowVariable<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// What [`DataflowVariable::val`] should do: the value is already there, or
/// it has to wait on a fresh one-shot channel registered under the lock.
enum Next<T> {
    Ready(T),
    Wait(oneshot::Receiver<T>),
}

impl<T: Clone + Send + Sync + 'static> DataflowVariable<T> {
    /// Construct a fresh, unbound variable scheduled on `group`'s pool.
    pub fn new(group: Group) -> Self {
        Self(Arc::new(DataflowVariableInner {
            group,
            state: Mutex::new(VarState::Unbound { waiters: Vec::new() }),
        }))
    }

    /// Strict bind: transitions Unbound -> Bound with `value`. Fails with
    /// `AlreadyBound` if a value is already present, regardless of equality.
    ///
    /// Used internally by [`super::stream::DataflowStream`], where each cell
    /// has exactly one writer and equality semantics are irrelevant.
    pub async fn bind_unique(&self, value: T) -> Result<(), DataflowError> {
        let waiters = {
            let mut state = self.0.state.lock();
            if matches!(&*state, VarState::Bound(_)) {
                return Err(DataflowError::AlreadyBound);
            }
            let VarState::Unbound { waiters } =
                std::mem::replace(&mut *state, VarState::Bound(value.clone()))
            else {
                unreachable!("checked above that state was Unbound")
            };
            waiters
        };
        self.resolve_waiters(waiters, value).await;
        Ok(())
    }

    /// Await the bound value, blocking (asynchronously) until some writer
    /// calls `bind`/`bind_unique` if not already bound.
    pub async fn val(&self) -> T {
        let next = {
            let mut state = self.0.state.lock();
            match &mut *state {
                VarState::Bound(value) => Next::Ready(value.clone()),
                VarState::Unbound { waiters } => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(Waiter::Reply(tx));
                    Next::Wait(rx)
                }
            }
        };
        match next {
            Next::Ready(value) => value,
            #[allow(clippy::expect_used)]
            Next::Wait(rx) => rx.await.expect(
                "sender half is held by resolve_waiters and always fires before being dropped",
            ),
        }
    }

    /// Wait up to `timeout` for a bind; returns `None` if it elapses first.
    /// The variable itself is left Unbound by a timeout — a later `val()`
    /// or `get_val_or_nil()` call can still observe a subsequent bind.
    pub async fn get_val_or_nil(&self, timeout: std::time::Duration) -> Option<T> {
        tokio::time::timeout(timeout, self.val()).await.ok()
    }

    /// Register `handler` to run with the bound value. If already bound, it
    /// is scheduled onto the group pool immediately; otherwise it joins the
    /// wait-list and fires exactly once, when the variable becomes bound.
    ///
    /// Handler ordering across multiple `when_bound` registrations is an
    /// implementation detail (FIFO here) — callers must not depend on it.
    pub fn when_bound<F>(&self, handler: F)
    where
        F: FnOnce(T) + Send + 'static,
    {
        let value = {
            let mut state = self.0.state.lock();
            match &mut *state {
                VarState::Bound(value) => value.clone(),
                VarState::Unbound { waiters } => {
                    waiters.push(Waiter::Callback(Box::new(handler)));
                    return;
                }
            }
        };
        let _ = self.0.group.pool().spawn_background(async move {
            handler(value);
        });
    }

    /// Convenience alias for [`DataflowVariable::when_bound`], named after
    /// the `>>` notation used in some dataflow literature.
    pub fn right_shift<F>(&self, handler: F)
    where
        F: FnOnce(T) + Send + 'static,
    {
        self.when_bound(handler);
    }

    async fn resolve_waiters(&self, waiters: Vec<Waiter<T>>, value: T) {
        let woken = waiters.len();
        for waiter in waiters {
            match waiter {
                Waiter::Reply(tx) => {
                    let _ = tx.send(value.clone());
                }
                Waiter::Callback(handler) => {
                    let v = value.clone();
                    let _ = self.0.group.pool().spawn_background(async move {
                        handler(v);
                    });
                }
            }
        }
        self.0
            .group
            .record_dataflow_event(DataflowEventKind::VariableBound { waiters_woken: woken })
            .await;
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> DataflowVariable<T> {
    /// Identity-by-default bind: rebinding with a value equal to the one
    /// already present silently succeeds (no-op); rebinding with a
    /// different value fails with `AlreadyBound`.
    pub async fn bind(&self, value: T) -> Result<(), DataflowError> {
        let waiters = {
            let mut state = self.0.state.lock();
            match &*state {
                VarState::Bound(existing) if *existing == value => return Ok(()),
                VarState::Bound(_) => return Err(DataflowError::AlreadyBound),
                VarState::Unbound { .. } => {
                    let VarState::Unbound { waiters } =
                        std::mem::replace(&mut *state, VarState::Bound(value.clone()))
                    else {
                        unreachable!("checked above that state was Unbound")
                    };
                    waiters
                }
            }
        };
        self.resolve_waiters(waiters, value).await;
        Ok(())
    }
}
