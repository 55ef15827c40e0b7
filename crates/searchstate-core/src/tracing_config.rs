//! Tracing conventions for searchstate.
//!
//! The library never installs a subscriber. It only emits events under a fixed
//! target prefix so that consumers can filter them:
//!
//! ```text
//! RUST_LOG=searchstate=trace
//! ```

/// Target prefix used by all searchstate tracing spans and events.
pub const TARGET_PREFIX: &str = "searchstate";

/// Standard tracing targets and span names used across the crates.
pub mod span_names {
    /// Copy-on-write mutations of `SearchParameters`.
    pub const PARAMS: &str = "searchstate::params";
    /// Config file / environment loading.
    pub const CONFIG: &str = "searchstate::config";
}
