//! Immutable search parameters for a faceted search helper.
//!
//! [`SearchParameters`] describes one fully specified search request: query text,
//! pagination, facet declarations, conjunctive / exclude / disjunctive facet
//! refinements, numeric refinements and passthrough tuning options. Every change
//! produces a new value; the old one stays valid, so a state can be shared
//! freely between threads and kept around as history.
//!
//! [`SearchParameters::query_params`] yields the flat mapping a request encoder
//! sends to the backend. Refinements are not part of it.

pub mod config;
mod derivation;
pub mod parameters;
pub mod query_params;
mod refinements;
pub mod tuning;

pub use parameters::{
    DEFAULT_HITS_PER_PAGE, DEFAULT_MAX_VALUES_PER_FACET, FacetRefinements, FacetValueLists,
    NumericRefinements, SearchParameters, SearchParametersPatch,
};
pub use query_params::{MANAGED_PARAMETERS, QUERY_PARAMETER_FIELDS, QueryField, QueryParams};
pub use tuning::TuningParameters;
