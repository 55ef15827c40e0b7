//! The `SearchParameters` value and its construction.
//!
//! `SearchParameters` is a persistent value: once built it is never modified.
//! Every "setter" clones the current state, applies one change to the clone and
//! returns it, leaving the receiver untouched. The fields are private to this
//! crate, so outside code can only observe a state, never alter it.
//!
//! ```
//! use searchstate_params::SearchParameters;
//!
//! let base = SearchParameters::default().set_page(3);
//! let next = base.set_query("shoes");
//! assert_eq!(base.page(), 3);
//! assert_eq!(next.page(), 0);
//! assert_eq!(next.query(), "shoes");
//! ```

use indexmap::IndexMap;
use searchstate_core::tracing_config::span_names;
use searchstate_core::{NumericOperator, SearchStateError, SearchStateResult};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::tuning::TuningParameters;

/// Page size used when none (or zero) is given.
pub const DEFAULT_HITS_PER_PAGE: u32 = 20;
/// Facet value cap used when none (or zero) is given.
pub const DEFAULT_MAX_VALUES_PER_FACET: u32 = 10;

// Refinement maps keep keys in the order they were first refined. Removing a
// key and refining it again moves it to the end.

/// Conjunctive refinements: one selected value per facet.
pub type FacetRefinements = IndexMap<String, String>;
/// Exclude or disjunctive refinements: selected values per facet, in insertion order.
pub type FacetValueLists = IndexMap<String, Vec<String>>;
/// Numeric refinements: one value per (attribute, operator) pair.
pub type NumericRefinements = IndexMap<String, IndexMap<NumericOperator, f64>>;

/// Complete description of a search request.
///
/// Serializes with the backend's camelCase field names; deserializes through
/// [`SearchParametersPatch`], so partial documents are filled with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SearchParametersPatch")]
#[must_use]
pub struct SearchParameters {
    pub(crate) query: String,
    pub(crate) facets: Vec<String>,
    pub(crate) disjunctive_facets: Vec<String>,
    pub(crate) facets_refinements: FacetRefinements,
    pub(crate) facets_excludes: FacetValueLists,
    pub(crate) disjunctive_facets_refinements: FacetValueLists,
    pub(crate) numeric_refinements: NumericRefinements,
    pub(crate) hits_per_page: u32,
    pub(crate) max_values_per_facet: u32,
    pub(crate) page: u32,
    #[serde(flatten)]
    pub(crate) tuning: TuningParameters,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            query: String::new(),
            facets: Vec::new(),
            disjunctive_facets: Vec::new(),
            facets_refinements: FacetRefinements::new(),
            facets_excludes: FacetValueLists::new(),
            disjunctive_facets_refinements: FacetValueLists::new(),
            numeric_refinements: NumericRefinements::new(),
            hits_per_page: DEFAULT_HITS_PER_PAGE,
            max_values_per_facet: DEFAULT_MAX_VALUES_PER_FACET,
            page: 0,
            tuning: TuningParameters::default(),
        }
    }
}

impl SearchParameters {
    /// Build a state from a partial set of fields; absent fields take defaults.
    ///
    /// A zero `hits_per_page` or `max_values_per_facet` counts as absent.
    pub fn from_patch(patch: SearchParametersPatch) -> Self {
        Self {
            query: patch.query.unwrap_or_default(),
            facets: patch.facets.unwrap_or_default(),
            disjunctive_facets: patch.disjunctive_facets.unwrap_or_default(),
            facets_refinements: patch.facets_refinements.unwrap_or_default(),
            facets_excludes: patch.facets_excludes.unwrap_or_default(),
            disjunctive_facets_refinements: patch.disjunctive_facets_refinements.unwrap_or_default(),
            numeric_refinements: patch.numeric_refinements.unwrap_or_default(),
            hits_per_page: patch
                .hits_per_page
                .filter(|n| *n != 0)
                .unwrap_or(DEFAULT_HITS_PER_PAGE),
            max_values_per_facet: patch
                .max_values_per_facet
                .filter(|n| *n != 0)
                .unwrap_or(DEFAULT_MAX_VALUES_PER_FACET),
            page: patch.page.unwrap_or(0),
            tuning: patch.tuning,
        }
    }

    /// Clone `self`, apply `change` to the clone, and return it.
    ///
    /// The only way a new state is derived from an existing one. Zero page
    /// sizes are replaced by the defaults afterwards, as on construction.
    pub(crate) fn mutate(&self, operation: &'static str, change: impl FnOnce(&mut Self)) -> Self {
        let mut next = self.clone();
        change(&mut next);
        next.apply_size_defaults();
        trace!(
            target: span_names::PARAMS,
            operation,
            page = next.page,
            "search parameters derived"
        );
        next
    }

    const fn apply_size_defaults(&mut self) {
        if self.hits_per_page == 0 {
            self.hits_per_page = DEFAULT_HITS_PER_PAGE;
        }
        if self.max_values_per_facet == 0 {
            self.max_values_per_facet = DEFAULT_MAX_VALUES_PER_FACET;
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn hits_per_page(&self) -> u32 {
        self.hits_per_page
    }

    #[must_use]
    pub const fn max_values_per_facet(&self) -> u32 {
        self.max_values_per_facet
    }

    /// Declared conjunctive facets.
    #[must_use]
    pub fn facets(&self) -> &[String] {
        &self.facets
    }

    /// Declared disjunctive facets.
    #[must_use]
    pub fn disjunctive_facets(&self) -> &[String] {
        &self.disjunctive_facets
    }

    #[must_use]
    pub const fn facets_refinements(&self) -> &FacetRefinements {
        &self.facets_refinements
    }

    #[must_use]
    pub const fn facets_excludes(&self) -> &FacetValueLists {
        &self.facets_excludes
    }

    #[must_use]
    pub const fn disjunctive_facets_refinements(&self) -> &FacetValueLists {
        &self.disjunctive_facets_refinements
    }

    #[must_use]
    pub const fn numeric_refinements(&self) -> &NumericRefinements {
        &self.numeric_refinements
    }

    /// Passthrough tuning options.
    #[must_use]
    pub const fn tuning(&self) -> &TuningParameters {
        &self.tuning
    }

    #[must_use]
    pub fn typo_tolerance(&self) -> Option<&str> {
        self.tuning.typo_tolerance.as_deref()
    }

    #[must_use]
    pub fn query_type(&self) -> Option<&str> {
        self.tuning.query_type.as_deref()
    }

    // ── Setters ────────────────────────────────────────────────────────

    /// Replace the query text. Resets the page.
    pub fn set_query(&self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.mutate("set_query", move |next| {
            next.query = query;
            next.page = 0;
        })
    }

    /// Move to another page of results.
    pub fn set_page(&self, page: u32) -> Self {
        self.mutate("set_page", |next| next.page = page)
    }

    /// Replace the declared conjunctive facets. Does not reset the page.
    pub fn set_facets<I, S>(&self, facets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let facets = facets.into_iter().map(Into::into).collect();
        self.mutate("set_facets", move |next| next.facets = facets)
    }

    /// Replace the declared disjunctive facets. Does not reset the page.
    pub fn set_disjunctive_facets<I, S>(&self, facets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let facets = facets.into_iter().map(Into::into).collect();
        self.mutate("set_disjunctive_facets", move |next| {
            next.disjunctive_facets = facets;
        })
    }

    /// Change the page size. Resets the page; zero means the default.
    pub fn set_hits_per_page(&self, hits_per_page: u32) -> Self {
        self.mutate("set_hits_per_page", |next| {
            next.hits_per_page = hits_per_page;
            next.page = 0;
        })
    }

    /// Change typo tolerance (`true`, `false`, `min` or `strict`). Resets the page.
    pub fn set_typo_tolerance(&self, typo_tolerance: impl Into<String>) -> Self {
        let typo_tolerance = typo_tolerance.into();
        self.mutate("set_typo_tolerance", move |next| {
            next.tuning.typo_tolerance = Some(typo_tolerance);
            next.page = 0;
        })
    }
}

impl From<SearchParametersPatch> for SearchParameters {
    fn from(patch: SearchParametersPatch) -> Self {
        Self::from_patch(patch)
    }
}

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

/// A partial set of `SearchParameters` fields.
///
/// Used to construct a state from outside input (config files, JSON documents,
/// URL state) and to copy an existing state field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParametersPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disjunctive_facets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets_refinements: Option<FacetRefinements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets_excludes: Option<FacetValueLists>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disjunctive_facets_refinements: Option<FacetValueLists>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_refinements: Option<NumericRefinements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_values_per_facet: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(flatten)]
    pub tuning: TuningParameters,
}

impl SearchParametersPatch {
    /// Decode a patch from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `SearchStateError::InvalidPatch` if the document is not a JSON
    /// object with correctly typed fields.
    pub fn from_json_str(json: &str) -> SearchStateResult<Self> {
        serde_json::from_str(json).map_err(|error| SearchStateError::InvalidPatch {
            format: "json",
            detail: error.to_string(),
        })
    }

    /// Decode a patch from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `SearchStateError::InvalidPatch` if the document does not parse.
    pub fn from_toml_str(document: &str) -> SearchStateResult<Self> {
        toml::from_str(document).map_err(|error| SearchStateError::InvalidPatch {
            format: "toml",
            detail: error.to_string(),
        })
    }
}

impl From<&SearchParameters> for SearchParametersPatch {
    fn from(params: &SearchParameters) -> Self {
        Self {
            query: Some(params.query.clone()),
            facets: Some(params.facets.clone()),
            disjunctive_facets: Some(params.disjunctive_facets.clone()),
            facets_refinements: Some(params.facets_refinements.clone()),
            facets_excludes: Some(params.facets_excludes.clone()),
            disjunctive_facets_refinements: Some(params.disjunctive_facets_refinements.clone()),
            numeric_refinements: Some(params.numeric_refinements.clone()),
            hits_per_page: Some(params.hits_per_page),
            max_values_per_facet: Some(params.max_values_per_facet),
            page: Some(params.page),
            tuning: params.tuning.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Construction ───────────────────────────────────────────────────

    #[test]
    fn defaults() {
        let params = SearchParameters::default();
        assert_eq!(params.query(), "");
        assert!(params.facets().is_empty());
        assert!(params.disjunctive_facets().is_empty());
        assert!(params.facets_refinements().is_empty());
        assert!(params.facets_excludes().is_empty());
        assert!(params.disjunctive_facets_refinements().is_empty());
        assert!(params.numeric_refinements().is_empty());
        assert_eq!(params.hits_per_page(), 20);
        assert_eq!(params.max_values_per_facet(), 10);
        assert_eq!(params.page(), 0);
        assert_eq!(params.tuning(), &TuningParameters::default());
    }

    #[test]
    fn empty_patch_equals_default() {
        let params = SearchParameters::from_patch(SearchParametersPatch::default());
        assert_eq!(params, SearchParameters::default());
    }

    #[test]
    fn patch_fields_are_applied() {
        let params = SearchParameters::from_patch(SearchParametersPatch {
            query: Some("boots".into()),
            facets: Some(vec!["brand".into()]),
            hits_per_page: Some(50),
            page: Some(2),
            tuning: TuningParameters {
                analytics: Some(false),
                ..TuningParameters::default()
            },
            ..SearchParametersPatch::default()
        });
        assert_eq!(params.query(), "boots");
        assert_eq!(params.facets(), ["brand"]);
        assert_eq!(params.hits_per_page(), 50);
        assert_eq!(params.max_values_per_facet(), 10);
        assert_eq!(params.page(), 2);
        assert_eq!(params.tuning().analytics, Some(false));
    }

    #[test]
    fn zero_page_size_falls_back_to_default() {
        let params = SearchParameters::from_patch(SearchParametersPatch {
            hits_per_page: Some(0),
            max_values_per_facet: Some(0),
            ..SearchParametersPatch::default()
        });
        assert_eq!(params.hits_per_page(), DEFAULT_HITS_PER_PAGE);
        assert_eq!(params.max_values_per_facet(), DEFAULT_MAX_VALUES_PER_FACET);
    }

    #[test]
    fn copy_through_patch_is_identical() {
        let original = SearchParameters::default()
            .set_query("lamp")
            .set_facets(["brand"])
            .add_facet_refinement("brand", "acme")
            .add_numeric_refinement("price", ">", 5.0)
            .set_typo_tolerance("min")
            .set_page(4);
        let copy = SearchParameters::from_patch(SearchParametersPatch::from(&original));
        assert_eq!(copy, original);
    }

    // ── Setters ────────────────────────────────────────────────────────

    #[test]
    fn set_query_resets_page_and_leaves_receiver() {
        let before = SearchParameters::default().set_page(7);
        let after = before.set_query("chair");
        assert_eq!(after.query(), "chair");
        assert_eq!(after.page(), 0);
        assert_eq!(before.query(), "");
        assert_eq!(before.page(), 7);
    }

    #[test]
    fn set_hits_per_page_resets_page() {
        let params = SearchParameters::default().set_page(3).set_hits_per_page(40);
        assert_eq!(params.hits_per_page(), 40);
        assert_eq!(params.page(), 0);
    }

    #[test]
    fn zero_hits_per_page_falls_back_on_every_derivation() {
        let params = SearchParameters::default()
            .set_page(3)
            .set_hits_per_page(0);
        assert_eq!(params.hits_per_page(), DEFAULT_HITS_PER_PAGE);
        assert_eq!(params.page(), 0);
        assert_eq!(params.set_query("lamp").hits_per_page(), DEFAULT_HITS_PER_PAGE);
    }

    #[test]
    fn set_typo_tolerance_resets_page() {
        let params = SearchParameters::default()
            .set_page(3)
            .set_typo_tolerance("strict");
        assert_eq!(params.typo_tolerance(), Some("strict"));
        assert_eq!(params.page(), 0);
    }

    #[test]
    fn facet_declarations_keep_page() {
        let params = SearchParameters::default()
            .set_page(5)
            .set_facets(["brand", "type"])
            .set_disjunctive_facets(vec!["color".to_owned()]);
        assert_eq!(params.page(), 5);
        assert_eq!(params.facets(), ["brand", "type"]);
        assert_eq!(params.disjunctive_facets(), ["color"]);
    }

    #[test]
    fn set_page_only_touches_page() {
        let base = SearchParameters::default().set_query("sofa");
        let paged = base.set_page(9);
        assert_eq!(paged.page(), 9);
        assert_eq!(paged.query(), "sofa");
    }

    // ── Serde ──────────────────────────────────────────────────────────

    #[test]
    fn serializes_with_wire_names() {
        let params = SearchParameters::default()
            .set_disjunctive_facets(["color"])
            .add_disjunctive_facet_refinement("color", "red")
            .add_numeric_refinement("price", ">=", 10.0);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["disjunctiveFacets"], serde_json::json!(["color"]));
        assert_eq!(
            json["disjunctiveFacetsRefinements"],
            serde_json::json!({"color": ["red"]})
        );
        assert_eq!(json["numericRefinements"]["price"][">="], 10.0);
        assert_eq!(json["hitsPerPage"], 20);
        assert!(json.get("typoTolerance").is_none(), "None tuning omitted");
    }

    #[test]
    fn refinement_maps_serialize_in_insertion_order() {
        let params = SearchParameters::default()
            .add_facet_refinement("type", "chair")
            .add_facet_refinement("brand", "acme")
            .add_numeric_refinement("width", "<", 90.0)
            .add_numeric_refinement("price", ">", 10.0)
            .add_numeric_refinement("price", "<", 50.0);
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains(r#""facetsRefinements":{"type":"chair","brand":"acme"}"#));
        assert!(json.contains(
            r#""numericRefinements":{"width":{"<":90.0},"price":{">":10.0,"<":50.0}}"#
        ));
    }

    #[test]
    fn deserializes_partial_document_with_defaults() {
        let params: SearchParameters = serde_json::from_str(
            r#"{"query":"desk","numericRefinements":{"width":{"<":120}},"typoTolerance":"min"}"#,
        )
        .unwrap();
        assert_eq!(params.query(), "desk");
        assert_eq!(params.get_numeric_refinement("width", "<"), Some(120.0));
        assert_eq!(params.typo_tolerance(), Some("min"));
        assert_eq!(params.hits_per_page(), 20);
    }

    #[test]
    fn json_round_trip_preserves_state() {
        let params = SearchParameters::default()
            .set_query("rug")
            .add_exclude_refinement("brand", "noname")
            .add_numeric_refinement("size", "=~", 3.0);
        let json = serde_json::to_string(&params).unwrap();
        let decoded: SearchParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, params);
    }

    #[test]
    fn patch_from_json_rejects_wrong_types() {
        let err = SearchParametersPatch::from_json_str(r#"{"hitsPerPage":"lots"}"#).unwrap_err();
        assert!(matches!(
            err,
            SearchStateError::InvalidPatch { format: "json", .. }
        ));
    }

    #[test]
    fn patch_from_toml() {
        let patch = SearchParametersPatch::from_toml_str(
            r#"
            query = "mug"
            disjunctiveFacets = ["color"]

            [numericRefinements.price]
            ">" = 10
            "#,
        )
        .unwrap();
        let params = SearchParameters::from(patch);
        assert_eq!(params.query(), "mug");
        assert_eq!(params.get_numeric_refinement("price", ">"), Some(10.0));
    }
}
