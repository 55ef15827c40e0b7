//! Passthrough tuning parameters.
//!
//! These are forwarded to the search backend untouched. Nothing in searchstate
//! reads them apart from the query-parameter schema table. Options with several
//! accepted spellings are free-form strings.

use serde::{Deserialize, Serialize};

/// Backend tuning options carried verbatim by `SearchParameters`.
///
/// Every field is optional; `None` means "let the backend use its index
/// setting" and is omitted from the wire mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TuningParameters {
    /// `prefixAll`, `prefixLast` or `prefixNone`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
    /// `true`, `false`, `min` or `strict`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typo_tolerance: Option<String>,
    #[serde(rename = "minWordSizefor1Typo", skip_serializing_if = "Option::is_none")]
    pub min_word_size_for_1_typo: Option<u32>,
    #[serde(rename = "minWordSizefor2Typos", skip_serializing_if = "Option::is_none")]
    pub min_word_size_for_2_typos: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_typos_on_numeric_tokens: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_plurals: Option<bool>,
    /// Comma separated attribute list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrict_searchable_attributes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advanced_syntax: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<bool>,
    /// Comma separated tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_synonyms_in_highlight: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_words: Option<String>,
    /// `lastWords`, `firstWords`, `allOptional` or `none`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_words_if_no_results: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_retrieve: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_highlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_ranking_info: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_filters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct: Option<bool>,
    /// `"lat,lng"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub around_lat_lng: Option<String>,
    #[serde(rename = "aroundLatLngViaIP", skip_serializing_if = "Option::is_none")]
    pub around_lat_lng_via_ip: Option<bool>,
    /// Meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub around_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub around_precision: Option<u32>,
    /// `"p1Lat,p1Lng,p2Lat,p2Lng"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inside_bounding_box: Option<String>,
}
