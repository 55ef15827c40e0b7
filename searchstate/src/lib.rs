//! searchstate: immutable search-request state for faceted search helpers.
//!
//! Re-exports the workspace crates under one name:
//!
//! - `core`: error type, tracing conventions, `NumericOperator`, `ParamValue`.
//! - `params`: `SearchParameters`, the refinement engine, the wire mapping and
//!   the config loader.

pub use searchstate_core as core;
pub use searchstate_params as params;

pub use searchstate_core::{NumericOperator, ParamValue, SearchStateError, SearchStateResult};
pub use searchstate_params::config::{ConfigLoadResult, load_from_path, load_from_str};
pub use searchstate_params::{
    MANAGED_PARAMETERS, QueryParams, SearchParameters, SearchParametersPatch, TuningParameters,
};

/// Common imports for consumers.
pub mod prelude {
    pub use searchstate_core::{NumericOperator, ParamValue, SearchStateError, SearchStateResult};
    pub use searchstate_params::{QueryParams, SearchParameters, SearchParametersPatch};
}
