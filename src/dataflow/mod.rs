//! # Dataflow Module (C5-C8)
//!
//! Declarative, single-assignment concurrency primitives: variables that
//! bind at most once, streams built from chains of them, operators that
//! fire on their inputs, and selectors that merge several streams.

pub mod error;
pub mod operator;
pub mod remote;
pub mod selector;
pub mod stream;
pub mod var;

pub use error::DataflowError;
pub use operator::Operator;
pub use remote::RemoteDataflow;
pub use selector::{PrioritySelect, Selector};
pub use stream::{DataflowStream, StreamReader};
pub use var::DataflowVariable;
