//! # Pool Module (C1)
//!
//! Worker-thread scheduler executing submitted units of work. Supports
//! fork-join and fixed-size executor modes and honors daemon/non-daemon
//! lifecycle. Owned exclusively by a [`crate::group::Group`]; user code
//! never constructs a `Pool` directly.

pub mod error;
#[allow(clippy::module_inception)]
pub mod pool;

pub use error::PoolError;
pub use pool::{Pool, PoolKind};
