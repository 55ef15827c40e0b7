//! Core error, tracing and value types for the searchstate search-request library.
//!
//! This crate defines the error type (`SearchStateError`), the tracing naming
//! conventions shared by every searchstate crate, and the small value types
//! (`NumericOperator`, `ParamValue`) that appear in refinement state and in the
//! wire parameter mapping.
//!
//! It has minimal external dependencies and is intended to be depended on by every
//! other crate in the workspace.

pub mod error;
pub mod tracing_config;
pub mod types;

pub use error::{SearchStateError, SearchStateResult};
pub use types::{NumericOperator, ParamValue};
