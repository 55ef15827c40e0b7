//! Initial search state from a TOML file and environment overrides.
//!
//! Precedence is `env > file > defaults`. The file holds a
//! [`SearchParametersPatch`] using the wire field names:
//!
//! ```toml
//! query = "lamp"
//! hitsPerPage = 40
//! disjunctiveFacets = ["color", "price"]
//! typoTolerance = "min"
//!
//! [disjunctiveFacetsRefinements]
//! color = ["red"]
//!
//! [numericRefinements.price]
//! ">=" = 10
//! ```

use std::collections::HashMap;
use std::fs;
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};

use searchstate_core::tracing_config::span_names;
use searchstate_core::{SearchStateError, SearchStateResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::parameters::{SearchParameters, SearchParametersPatch};
use crate::query_params::{MANAGED_PARAMETERS, QUERY_PARAMETER_FIELDS};

pub const ENV_QUERY: &str = "SEARCHSTATE_QUERY";
pub const ENV_HITS_PER_PAGE: &str = "SEARCHSTATE_HITS_PER_PAGE";
pub const ENV_MAX_VALUES_PER_FACET: &str = "SEARCHSTATE_MAX_VALUES_PER_FACET";
pub const ENV_TYPO_TOLERANCE: &str = "SEARCHSTATE_TYPO_TOLERANCE";
pub const ENV_FACETS: &str = "SEARCHSTATE_FACETS";
pub const ENV_DISJUNCTIVE_FACETS: &str = "SEARCHSTATE_DISJUNCTIVE_FACETS";

pub const PRECEDENCE: [ConfigSource; 3] =
    [ConfigSource::Env, ConfigSource::File, ConfigSource::Defaults];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Env,
    File,
    Defaults,
}

/// A non-fatal problem found while loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ConfigLoadResult {
    pub parameters: SearchParameters,
    pub source_precedence: [ConfigSource; 3],
    pub config_file_used: Option<PathBuf>,
    pub env_keys_used: Vec<String>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load the initial state from an optional TOML file plus environment overrides.
///
/// A path that does not exist is treated as "no file".
///
/// # Errors
///
/// Returns `SearchStateError::Io` if reading an existing file fails and
/// `SearchStateError::InvalidConfig` for parse failures.
pub fn load_from_path<S>(
    config_file: Option<&Path>,
    env: &HashMap<String, String, S>,
) -> SearchStateResult<ConfigLoadResult>
where
    S: BuildHasher,
{
    let (contents, used) = match config_file {
        Some(path) if path.exists() => (Some(fs::read_to_string(path)?), Some(path)),
        Some(_) | None => (None, None),
    };
    load_from_str(contents.as_deref(), used, env)
}

/// Load the initial state from raw TOML plus environment overrides.
///
/// # Errors
///
/// Returns `SearchStateError::InvalidConfig` when the document does not parse or
/// an environment value is malformed.
pub fn load_from_str<S>(
    config_toml: Option<&str>,
    config_file_path: Option<&Path>,
    env: &HashMap<String, String, S>,
) -> SearchStateResult<ConfigLoadResult>
where
    S: BuildHasher,
{
    let mut patch = SearchParametersPatch::default();
    let mut warnings = Vec::new();

    if let Some(config_toml) = config_toml {
        warnings.extend(collect_unknown_key_warnings(config_toml)?);
        patch = toml::from_str(config_toml).map_err(|error| SearchStateError::InvalidConfig {
            field: "config_file".into(),
            value: "<toml>".into(),
            reason: error.to_string(),
        })?;
    }

    let env_keys_used = apply_env_overrides(&mut patch, env)?;

    let result = ConfigLoadResult {
        parameters: SearchParameters::from_patch(patch),
        source_precedence: PRECEDENCE,
        config_file_used: config_file_path.map(Path::to_path_buf),
        env_keys_used,
        warnings,
    };
    emit_config_loaded(&result);
    Ok(result)
}

pub fn emit_config_loaded(result: &ConfigLoadResult) {
    for warning in &result.warnings {
        warn!(
            target: span_names::CONFIG,
            key = %warning.key,
            reason = %warning.reason,
            "ignoring search parameter config entry"
        );
    }
    info!(
        target: span_names::CONFIG,
        precedence = ?result.source_precedence,
        config_file_used = ?result.config_file_used,
        env_keys_used = ?result.env_keys_used,
        warning_count = result.warnings.len(),
        "search parameters loaded"
    );
}

fn collect_unknown_key_warnings(config_toml: &str) -> SearchStateResult<Vec<ConfigWarning>> {
    let value: toml::Value =
        toml::from_str(config_toml).map_err(|error| SearchStateError::InvalidConfig {
            field: "config_file".into(),
            value: "<toml>".into(),
            reason: error.to_string(),
        })?;

    let root = value.as_table().ok_or_else(|| SearchStateError::InvalidConfig {
        field: "config_file".into(),
        value: "<toml>".into(),
        reason: "expected table at root".into(),
    })?;

    let warnings = root
        .keys()
        .filter(|key| !is_known_key(key))
        .map(|key| ConfigWarning {
            key: key.clone(),
            reason: "unknown search parameter".into(),
        })
        .collect();
    Ok(warnings)
}

fn is_known_key(key: &str) -> bool {
    MANAGED_PARAMETERS.contains(&key) || QUERY_PARAMETER_FIELDS.iter().any(|f| f.name == key)
}

fn apply_env_overrides<S>(
    patch: &mut SearchParametersPatch,
    env: &HashMap<String, String, S>,
) -> SearchStateResult<Vec<String>>
where
    S: BuildHasher,
{
    let mut used = Vec::new();

    if let Some(value) = env.get(ENV_QUERY) {
        patch.query = Some(value.clone());
        used.push(ENV_QUERY.to_owned());
    }
    if let Some(value) = env.get(ENV_HITS_PER_PAGE) {
        patch.hits_per_page = Some(parse_u32(ENV_HITS_PER_PAGE, value)?);
        used.push(ENV_HITS_PER_PAGE.to_owned());
    }
    if let Some(value) = env.get(ENV_MAX_VALUES_PER_FACET) {
        patch.max_values_per_facet = Some(parse_u32(ENV_MAX_VALUES_PER_FACET, value)?);
        used.push(ENV_MAX_VALUES_PER_FACET.to_owned());
    }
    if let Some(value) = env.get(ENV_TYPO_TOLERANCE) {
        patch.tuning.typo_tolerance = Some(value.trim().to_owned());
        used.push(ENV_TYPO_TOLERANCE.to_owned());
    }
    if let Some(value) = env.get(ENV_FACETS) {
        patch.facets = Some(split_list(value));
        used.push(ENV_FACETS.to_owned());
    }
    if let Some(value) = env.get(ENV_DISJUNCTIVE_FACETS) {
        patch.disjunctive_facets = Some(split_list(value));
        used.push(ENV_DISJUNCTIVE_FACETS.to_owned());
    }

    Ok(used)
}

fn parse_u32(key: &str, value: &str) -> SearchStateResult<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| SearchStateError::InvalidConfig {
            field: key.to_owned(),
            value: value.to_owned(),
            reason: "expected a non-negative integer".into(),
        })
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
