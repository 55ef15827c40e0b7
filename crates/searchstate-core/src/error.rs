/// Error type for the few fallible edges of searchstate.
///
/// State operations on `SearchParameters` are total and never produce an error.
/// Failures only arise when building an initial state from outside input: a
/// config file that cannot be read, a TOML/JSON patch that does not parse, or an
/// environment override with a malformed value.
#[derive(Debug, thiserror::Error)]
pub enum SearchStateError {
    // === Configuration errors ===
    /// A configuration value is invalid.
    #[error("Invalid config: {field} = \"{value}\" ({reason})")]
    InvalidConfig {
        /// Which config field or environment key.
        field: String,
        /// The invalid value.
        value: String,
        /// Why it is invalid.
        reason: String,
    },

    /// A parameter patch document could not be decoded.
    #[error("Invalid {format} parameter patch: {detail}. Field names use camelCase wire names.")]
    InvalidPatch {
        /// Document format (`json` or `toml`).
        format: &'static str,
        /// What went wrong.
        detail: String,
    },

    // === I/O errors ===
    /// Wraps `std::io::Error` for config file reads.
    #[error("I/O error: {0}. Check that the config file is readable.")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the searchstate crates.
pub type SearchStateResult<T> = Result<T, SearchStateError>;
