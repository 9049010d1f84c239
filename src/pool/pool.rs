//! Worker-thread scheduler executing submitted units of work.

// Layer 1: Standard library imports
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use tokio::runtime::{Handle, Runtime};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;

// Layer 3: Internal module imports
use super::error::PoolError;

/// Executor shape for a [`Pool`].
///
/// `Fixed` enforces a hard ceiling on concurrently-running submissions via
/// a semaphore sized to the configured worker count. `ForkJoin` and
/// `Cached` both submit onto the ambient Tokio runtime without an
/// additional ceiling (Tokio's own work-stealing scheduler already behaves
/// like a cached thread pool); they are distinguished here for
/// configuration readability, not by different runtime behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolKind {
    /// Fork-join style: unbounded concurrent submissions over the runtime's
    /// worker threads.
    ForkJoin,

    /// A hard ceiling of `size` concurrently-running submissions.
    Fixed,

    /// Grows on demand, no hard ceiling (thin wrapper over the runtime).
    Cached,
}

struct PoolInner {
    kind: PoolKind,
    handle: Handle,
    _owned_runtime: Option<Runtime>,
    semaphore: Option<Arc<Semaphore>>,
    configured_size: AtomicUsize,
    daemon: bool,
    shutdown: AtomicBool,
}

/// A set of worker threads, a submission queue, and a daemon flag.
///
/// A Pool is created by a [`crate::group::Group`] and shut down with it.
/// Cloning a `Pool` is cheap: all clones share the same underlying
/// scheduler and shutdown flag.
#[derive(Clone)]
pub struct Pool(Arc<PoolInner>);

impl Pool {
    /// Construct a pool of the given kind and (for `Fixed`) worker ceiling.
    ///
    /// If called from within a Tokio runtime, the pool submits onto that
    /// runtime's handle. Otherwise it creates and owns a dedicated
    /// multi-threaded runtime.
    pub fn new(kind: PoolKind, size: Option<usize>, daemon: bool) -> Self {
        let (handle, owned_runtime) = match Handle::try_current() {
            Ok(handle) => (handle, None),
            Err(_) => {
                // clippy::expect_used is denied; a pool that cannot obtain any
                // runtime at all has nothing sensible to fall back to.
                #[allow(clippy::expect_used)]
                let runtime = Runtime::new().expect("failed to create a Tokio runtime for the pool");
                let handle = runtime.handle().clone();
                (handle, Some(runtime))
            }
        };

        let worker_ceiling = size.unwrap_or_else(num_cpus_fallback);
        let semaphore = match kind {
            PoolKind::Fixed => Some(Arc::new(Semaphore::new(worker_ceiling))),
            PoolKind::ForkJoin | PoolKind::Cached => None,
        };

        Self(Arc::new(PoolInner {
            kind,
            handle,
            _owned_runtime: owned_runtime,
            semaphore,
            configured_size: AtomicUsize::new(worker_ceiling),
            daemon,
            shutdown: AtomicBool::new(false),
        }))
    }

    /// This pool's executor shape.
    pub fn kind(&self) -> PoolKind {
        self.0.kind
    }

    /// Whether this pool is a daemon pool (does not block process exit).
    pub fn is_daemon(&self) -> bool {
        self.0.daemon
    }

    /// Whether `shutdown()` has been called.
    pub fn is_shutdown(&self) -> bool {
        self.0.shutdown.load(Ordering::Acquire)
    }

    /// Submit `fut`, run it on a worker, and await its result.
    ///
    /// For `Fixed` pools the permit is held only for the duration of `fut`,
    /// giving "fairness between cooperating participants" at the layer
    /// above (cooperative actors release it between bursts; pinned actors
    /// instead call [`Pool::spawn_pinned`] to hold a permit for their whole
    /// life).
    pub async fn submit<F, T>(&self, fut: F) -> Result<T, PoolError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        if self.is_shutdown() {
            return Err(PoolError::Shutdown);
        }

        let permit = self.acquire_permit().await?;
        let handle: JoinHandle<T> = self.0.handle.spawn(async move {
            let result = fut.await;
            drop(permit);
            result
        });
        handle.await.map_err(|e| PoolError::JoinFailed {
            reason: e.to_string(),
        })
    }

    /// Spawn `fut` in the background without awaiting completion.
    ///
    /// Used by pinned actors, which acquire a permit once for their entire
    /// life: the permit is threaded into `fut` itself (the caller is
    /// expected to hold it across the whole run loop), this method only
    /// enforces that the pool has not been shut down.
    pub fn spawn_background<F>(&self, fut: F) -> Result<JoinHandle<()>, PoolError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_shutdown() {
            return Err(PoolError::Shutdown);
        }
        Ok(self.0.handle.spawn(fut))
    }

    /// Acquire an owned permit for the lifetime of a pinned actor.
    /// Returns `None` for pools with no worker ceiling.
    pub async fn acquire_lifetime_permit(&self) -> Result<Option<OwnedSemaphorePermit>, PoolError> {
        self.acquire_permit().await
    }

    async fn acquire_permit(&self) -> Result<Option<OwnedSemaphorePermit>, PoolError> {
        match &self.0.semaphore {
            Some(semaphore) => {
                let permit = semaphore
                    .clone()
                    .acquire_owned()
                    .await
                    .map_err(|_| PoolError::Shutdown)?;
                Ok(Some(permit))
            }
            None => Ok(None),
        }
    }

    /// Change the worker ceiling. No-op for `ForkJoin`/`Cached` pools.
    /// In-flight work keeps running on its original worker; only future
    /// submissions observe the new ceiling.
    pub fn resize(&self, new_size: usize) {
        let Some(semaphore) = &self.0.semaphore else {
            return;
        };
        let current = self.0.configured_size.load(Ordering::SeqCst);
        if new_size > current {
            semaphore.add_permits(new_size - current);
        } else if new_size < current {
            let to_remove = current - new_size;
            if let Ok(permits) = semaphore.clone().try_acquire_many_owned(to_remove as u32) {
                permits.forget();
            }
        }
        self.0.configured_size.store(new_size, Ordering::SeqCst);
    }

    /// Stop accepting new submissions. In-flight work runs to completion.
    pub fn shutdown(&self) {
        self.0.shutdown.store(true, Ordering::Release);
    }
}

fn num_cpus_fallback() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
