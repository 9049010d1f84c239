//! Configuration knobs recognized by a [`super::Group`].

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use crate::pool::PoolKind;

/// Configuration for constructing a [`super::Group`].
///
/// Mirrors the configuration knobs named by the external interfaces design:
/// `{poolType, poolSize, daemon, fairDefault}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Executor shape for the group's pool.
    pub pool_kind: PoolKind,

    /// Worker ceiling for `Fixed` pools. `None` defers to the number of
    /// available CPUs.
    pub pool_size: Option<usize>,

    /// Daemon pools do not block process exit.
    pub daemon: bool,

    /// Default fairness for cooperative actors spawned from this group.
    /// `true` makes `makeFair()` the default (release the worker after
    /// every message); `false` (the default) allows bursts.
    pub fair_default: bool,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            pool_kind: PoolKind::ForkJoin,
            pool_size: None,
            daemon: true,
            fair_default: false,
        }
    }
}

impl GroupConfig {
    /// Builder-style constructor starting from defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed-size pool with the given worker ceiling.
    pub fn with_fixed_pool(mut self, size: usize) -> Self {
        self.pool_kind = PoolKind::Fixed;
        self.pool_size = Some(size);
        self
    }

    /// Set the daemon flag.
    pub fn with_daemon(mut self, daemon: bool) -> Self {
        self.daemon = daemon;
        self
    }

    /// Set the default fairness for cooperative actors.
    pub fn with_fair_default(mut self, fair_default: bool) -> Self {
        self.fair_default = fair_default;
        self
    }
}
