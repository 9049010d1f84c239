//! Task (C10): submit a body to a group's pool and get back a dataflow
//! variable that binds with the result.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use crate::ambient;
use crate::dataflow::DataflowVariable;
use crate::group::Group;

/// A task body failed; carried as the bound value when a [`task`] future
/// returns `Err`.
#[derive(Debug, Clone)]
pub struct TaskFailure(pub String);

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task failed: {}", self.0)
    }
}

/// The outcome a [`task`]'s dataflow variable binds with: the body's own
/// success value, or a [`TaskFailure`] describing why it did not run to
/// completion.
#[derive(Debug, Clone)]
pub enum TaskOutcome<T> {
    /// The body returned `Ok(value)`.
    Ok(T),
    /// The body returned `Err`, described by its `Display` output.
    Failed(TaskFailure),
}

/// Submit `body` to `group`'s pool. Before invoking it, installs `group` as
/// the ambient group (see [`ambient`]) so nested dataflow constructs and
/// `whenBound` handlers created inside `body` default to it.
///
/// Returns immediately with a [`DataflowVariable`] that binds once `body`
/// completes: `TaskOutcome::Ok` on success, `TaskOutcome::Failed` if the
/// future returned an error.
pub fn task<F, Fut, T, E>(group: Group, body: F) -> DataflowVariable<TaskOutcome<T>>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = Result<T, E>> + Send + 'static,
    T: Clone + Send + Sync + 'static,
    E: std::fmt::Display + Send + 'static,
{
    let result_var = DataflowVariable::new(group.clone());
    let bind_var = result_var.clone();
    let run_group = group.clone();
    let _ = group.pool().spawn_background(async move {
        let outcome = ambient::run_with_ambient(run_group, body()).await;
        let outcome = match outcome {
            Ok(value) => TaskOutcome::Ok(value),
            Err(error) => TaskOutcome::Failed(TaskFailure(error.to_string())),
        };
        let _ = bind_var.bind_unique(outcome).await;
    });
    result_var
}
