//! Flat request parameter mapping.
//!
//! The wire mapping is produced from an explicit schema table rather than by
//! walking struct fields. Adding a tuning option means adding one row to
//! [`QUERY_PARAMETER_FIELDS`].
//!
//! Refinement state and facet declarations are never part of the mapping; the
//! caller translates them into the backend's filter syntax itself.

use searchstate_core::ParamValue;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::parameters::SearchParameters;

/// Fields kept out of the flat mapping because the caller encodes them separately.
pub const MANAGED_PARAMETERS: [&str; 6] = [
    "facets",
    "disjunctiveFacets",
    "facetsRefinements",
    "facetsExcludes",
    "disjunctiveFacetsRefinements",
    "numericRefinements",
];

/// One row of the serialization schema: a wire name and how to read it.
#[derive(Clone, Copy)]
pub struct QueryField {
    pub name: &'static str,
    read: fn(&SearchParameters) -> Option<ParamValue>,
}

impl QueryField {
    /// Read this field from `params`; `None` means "omit from the mapping".
    #[must_use]
    pub fn read(&self, params: &SearchParameters) -> Option<ParamValue> {
        (self.read)(params)
    }
}

impl std::fmt::Debug for QueryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryField").field("name", &self.name).finish()
    }
}

fn text(value: Option<&str>) -> Option<ParamValue> {
    value.map(ParamValue::from)
}

fn integer(value: Option<u32>) -> Option<ParamValue> {
    value.map(ParamValue::from)
}

fn flag(value: Option<bool>) -> Option<ParamValue> {
    value.map(ParamValue::Bool)
}

/// Every serializable field, in wire order.
pub static QUERY_PARAMETER_FIELDS: &[QueryField] = &[
    QueryField { name: "query", read: |p| Some(ParamValue::Text(p.query.clone())) },
    QueryField { name: "hitsPerPage", read: |p| integer(Some(p.hits_per_page)) },
    QueryField { name: "maxValuesPerFacet", read: |p| integer(Some(p.max_values_per_facet)) },
    QueryField { name: "page", read: |p| integer(Some(p.page)) },
    QueryField { name: "queryType", read: |p| text(p.tuning.query_type.as_deref()) },
    QueryField { name: "typoTolerance", read: |p| text(p.tuning.typo_tolerance.as_deref()) },
    QueryField { name: "minWordSizefor1Typo", read: |p| integer(p.tuning.min_word_size_for_1_typo) },
    QueryField { name: "minWordSizefor2Typos", read: |p| integer(p.tuning.min_word_size_for_2_typos) },
    QueryField { name: "allowTyposOnNumericTokens", read: |p| flag(p.tuning.allow_typos_on_numeric_tokens) },
    QueryField { name: "ignorePlurals", read: |p| flag(p.tuning.ignore_plurals) },
    QueryField { name: "restrictSearchableAttributes", read: |p| text(p.tuning.restrict_searchable_attributes.as_deref()) },
    QueryField { name: "advancedSyntax", read: |p| flag(p.tuning.advanced_syntax) },
    QueryField { name: "analytics", read: |p| flag(p.tuning.analytics) },
    QueryField { name: "analyticsTags", read: |p| text(p.tuning.analytics_tags.as_deref()) },
    QueryField { name: "synonyms", read: |p| flag(p.tuning.synonyms) },
    QueryField { name: "replaceSynonymsInHighlight", read: |p| flag(p.tuning.replace_synonyms_in_highlight) },
    QueryField { name: "optionalWords", read: |p| text(p.tuning.optional_words.as_deref()) },
    QueryField { name: "removeWordsIfNoResults", read: |p| text(p.tuning.remove_words_if_no_results.as_deref()) },
    QueryField { name: "attributesToRetrieve", read: |p| text(p.tuning.attributes_to_retrieve.as_deref()) },
    QueryField { name: "attributesToHighlight", read: |p| text(p.tuning.attributes_to_highlight.as_deref()) },
    QueryField { name: "attributesToSnippet", read: |p| text(p.tuning.attributes_to_snippet.as_deref()) },
    QueryField { name: "getRankingInfo", read: |p| integer(p.tuning.get_ranking_info) },
    QueryField { name: "tagFilters", read: |p| text(p.tuning.tag_filters.as_deref()) },
    QueryField { name: "distinct", read: |p| flag(p.tuning.distinct) },
    QueryField { name: "aroundLatLng", read: |p| text(p.tuning.around_lat_lng.as_deref()) },
    QueryField { name: "aroundLatLngViaIP", read: |p| flag(p.tuning.around_lat_lng_via_ip) },
    QueryField { name: "aroundRadius", read: |p| integer(p.tuning.around_radius) },
    QueryField { name: "aroundPrecision", read: |p| integer(p.tuning.around_precision) },
    QueryField { name: "insideBoundingBox", read: |p| text(p.tuning.inside_bounding_box.as_deref()) },
];

/// Request-ready parameters, in schema order, with absent fields omitted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryParams {
    entries: Vec<(&'static str, ParamValue)>,
}

impl QueryParams {
    /// The value emitted for wire name `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wire names present in the mapping.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    /// Convert to a JSON object in schema order.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let object = self
            .entries
            .iter()
            .map(|(name, value)| ((*name).to_owned(), param_to_json(value)))
            .collect();
        serde_json::Value::Object(object)
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = &'a (&'static str, ParamValue);
    type IntoIter = std::slice::Iter<'a, (&'static str, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn param_to_json(value: &ParamValue) -> serde_json::Value {
    match value {
        ParamValue::Bool(b) => serde_json::Value::Bool(*b),
        ParamValue::Integer(n) => serde_json::Value::from(*n),
        ParamValue::Text(text) => serde_json::Value::String(text.clone()),
    }
}

impl Serialize for QueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl SearchParameters {
    /// The flat parameter mapping to hand to a request encoder.
    ///
    /// Contains `query`, `hitsPerPage`, `maxValuesPerFacet`, `page` and every
    /// tuning option that is set. Facet declarations and refinements are left
    /// out (see [`MANAGED_PARAMETERS`]).
    #[must_use]
    pub fn query_params(&self) -> QueryParams {
        let entries = QUERY_PARAMETER_FIELDS
            .iter()
            .filter_map(|field| field.read(self).map(|value| (field.name, value)))
            .collect();
        QueryParams { entries }
    }
}
