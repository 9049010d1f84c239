//! Ambient group context: the `Group` a unit of pool-scheduled work
//! inherits when it creates nested dataflow constructs without being handed
//! one explicitly.
//!
//! Scoped strictly to the lifetime of one future via [`tokio::task_local!`]
//! and [`run_with_ambient`]; it never leaks between unrelated work units
//! sharing the same worker thread.

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use tokio::task_local;

// Layer 3: Internal module imports
use crate::group::Group;

task_local! {
    static AMBIENT_GROUP: Group;
}

/// Run `fut` with `group` installed as the ambient group for its duration.
///
/// Used by [`crate::task::task`] before invoking the task body, so nested
/// `whenBound` handlers and dataflow constructs created inside the body
/// default to this group.
pub async fn run_with_ambient<F, T>(group: Group, fut: F) -> T
where
    F: std::future::Future<Output = T>,
{
    AMBIENT_GROUP.scope(group, fut).await
}

/// The group installed by the innermost enclosing [`run_with_ambient`] call,
/// if any. `None` outside of a pool-scheduled task body.
pub fn current() -> Option<Group> {
    AMBIENT_GROUP.try_with(|group| group.clone()).ok()
}
