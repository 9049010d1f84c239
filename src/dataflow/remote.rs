//! Remote dataflow variable registry stub.
//!
//! Naming and lookup only; no transport is implemented (distributed
//! consensus and network transport are out of scope).

// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
// (none)

// Layer 3: Internal module imports
use super::error::DataflowError;
use super::var::DataflowVariable;

/// Names a [`DataflowVariable`] so it could, in principle, be resolved from
/// another process. Binding happens locally exactly as with
/// [`DataflowVariable::bind_unique`]; `host`/`port`/`name` are opaque labels
/// this implementation does not use to open a connection.
pub trait RemoteDataflow<T> {
    /// Bind `dfv` under `name` for later remote lookup.
    fn bind_remote(&self, name: &str, dfv: DataflowVariable<T>) -> Result<(), DataflowError>;

    /// Look up a previously-bound variable by `host`, `port`, and `name`.
    fn get_remote(&self, host: &str, port: u16, name: &str) -> Result<DataflowVariable<T>, DataflowError>;
}
