//! Refinement engine: add, remove, toggle and test facet and numeric refinements.
//!
//! Four collections are maintained:
//!
//! - **Conjunctive** (`facets_refinements`): a single value per facet; adding
//!   overwrites, removing clears the facet.
//! - **Exclude** (`facets_excludes`) and **disjunctive**
//!   (`disjunctive_facets_refinements`): value lists per facet; adding appends,
//!   removing drops the first occurrence and prunes the facet once its list is
//!   empty.
//! - **Numeric** (`numeric_refinements`): one value per (attribute, operator);
//!   the attribute is pruned once its last operator is removed.
//!
//! Every operation that changes a collection resets the page to 0.

use searchstate_core::NumericOperator;

use crate::parameters::{FacetValueLists, SearchParameters};

impl SearchParameters {
    // ── Numeric ────────────────────────────────────────────────────────

    /// Set `attribute <operator> value`, replacing any value already stored for
    /// that operator. Only one value per (attribute, operator) is representable.
    pub fn add_numeric_refinement(
        &self,
        attribute: impl Into<String>,
        operator: impl Into<NumericOperator>,
        value: f64,
    ) -> Self {
        let attribute = attribute.into();
        let operator = operator.into();
        self.mutate("add_numeric_refinement", move |next| {
            next.page = 0;
            next.numeric_refinements
                .entry(attribute)
                .or_default()
                .insert(operator, value);
        })
    }

    /// Remove the value stored for (attribute, operator).
    ///
    /// The page is reset whenever the attribute carries numeric refinements,
    /// even if `operator` is not one of them. An attribute without refinements
    /// leaves the state unchanged.
    pub fn remove_numeric_refinement(
        &self,
        attribute: &str,
        operator: impl Into<NumericOperator>,
    ) -> Self {
        let operator = operator.into();
        self.mutate("remove_numeric_refinement", |next| {
            let Some(operators) = next.numeric_refinements.get_mut(attribute) else {
                return;
            };
            next.page = 0;
            if operators.shift_remove(&operator).is_some() && operators.is_empty() {
                next.numeric_refinements.shift_remove(attribute);
            }
        })
    }

    /// The value stored for (attribute, operator), if any.
    #[must_use]
    pub fn get_numeric_refinement(
        &self,
        attribute: &str,
        operator: impl Into<NumericOperator>,
    ) -> Option<f64> {
        self.numeric_refinements
            .get(attribute)?
            .get(&operator.into())
            .copied()
    }

    pub(crate) fn clear_numeric_refinements(&mut self, attribute: Option<&str>) {
        match attribute {
            None => self.numeric_refinements.clear(),
            Some(attribute) => {
                self.numeric_refinements.shift_remove(attribute);
            }
        }
    }

    // ── Conjunctive ────────────────────────────────────────────────────

    /// Select `value` for `facet`, replacing the previous selection.
    pub fn add_facet_refinement(&self, facet: impl Into<String>, value: impl Into<String>) -> Self {
        let facet = facet.into();
        let value = value.into();
        self.mutate("add_facet_refinement", move |next| {
            next.page = 0;
            next.facets_refinements.insert(facet, value);
        })
    }

    /// Clear the selection of `facet`, whatever value it holds.
    pub fn remove_facet_refinement(&self, facet: &str) -> Self {
        self.mutate("remove_facet_refinement", |next| {
            next.page = 0;
            next.clear_facet_refinements(Some(facet));
        })
    }

    /// Remove the selection of `facet` if it is exactly `value`, otherwise select
    /// `value`.
    pub fn toggle_facet_refinement(&self, facet: &str, value: &str) -> Self {
        if self.is_facet_refined(facet, value) {
            self.remove_facet_refinement(facet)
        } else {
            self.add_facet_refinement(facet, value)
        }
    }

    #[must_use]
    pub fn is_facet_refined(&self, facet: &str, value: &str) -> bool {
        self.facets_refinements
            .get(facet)
            .is_some_and(|selected| selected == value)
    }

    pub(crate) fn clear_facet_refinements(&mut self, facet: Option<&str>) {
        match facet {
            None => self.facets_refinements.clear(),
            Some(facet) => {
                self.facets_refinements.shift_remove(facet);
            }
        }
    }

    // ── Exclude ────────────────────────────────────────────────────────

    /// Append `value` to the excluded values of `facet`. Duplicates are kept.
    pub fn add_exclude_refinement(
        &self,
        facet: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let facet = facet.into();
        let value = value.into();
        self.mutate("add_exclude_refinement", move |next| {
            next.page = 0;
            append_value(&mut next.facets_excludes, facet, value);
        })
    }

    /// Drop the first occurrence of `value` from the excluded values of `facet`.
    pub fn remove_exclude_refinement(&self, facet: &str, value: &str) -> Self {
        self.mutate("remove_exclude_refinement", |next| {
            if remove_first_value(&mut next.facets_excludes, facet, value) {
                next.page = 0;
            }
        })
    }

    pub fn toggle_exclude_facet_refinement(&self, facet: &str, value: &str) -> Self {
        if self.is_exclude_refined(facet, value) {
            self.remove_exclude_refinement(facet, value)
        } else {
            self.add_exclude_refinement(facet, value)
        }
    }

    #[must_use]
    pub fn is_exclude_refined(&self, facet: &str, value: &str) -> bool {
        contains_value(&self.facets_excludes, facet, value)
    }

    pub(crate) fn clear_exclude_refinements(&mut self, facet: Option<&str>) {
        clear_lists(&mut self.facets_excludes, facet);
    }

    // ── Disjunctive ────────────────────────────────────────────────────

    /// Append `value` to the selected values of disjunctive `facet`. Duplicates
    /// are kept.
    pub fn add_disjunctive_facet_refinement(
        &self,
        facet: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let facet = facet.into();
        let value = value.into();
        self.mutate("add_disjunctive_facet_refinement", move |next| {
            next.page = 0;
            append_value(&mut next.disjunctive_facets_refinements, facet, value);
        })
    }

    /// Drop the first occurrence of `value` from the selected values of
    /// disjunctive `facet`.
    pub fn remove_disjunctive_facet_refinement(&self, facet: &str, value: &str) -> Self {
        self.mutate("remove_disjunctive_facet_refinement", |next| {
            if remove_first_value(&mut next.disjunctive_facets_refinements, facet, value) {
                next.page = 0;
            }
        })
    }

    pub fn toggle_disjunctive_facet_refinement(&self, facet: &str, value: &str) -> Self {
        if self.is_disjunctive_facet_refined(facet, value) {
            self.remove_disjunctive_facet_refinement(facet, value)
        } else {
            self.add_disjunctive_facet_refinement(facet, value)
        }
    }

    #[must_use]
    pub fn is_disjunctive_facet_refined(&self, facet: &str, value: &str) -> bool {
        contains_value(&self.disjunctive_facets_refinements, facet, value)
    }

    pub(crate) fn clear_disjunctive_facet_refinements(&mut self, facet: Option<&str>) {
        clear_lists(&mut self.disjunctive_facets_refinements, facet);
    }

    // ── Bulk ───────────────────────────────────────────────────────────

    /// Remove every refinement of every kind, or only those on `name`.
    /// Always resets the page.
    pub fn clear_refinements(&self, name: Option<&str>) -> Self {
        self.mutate("clear_refinements", |next| {
            next.page = 0;
            next.clear_numeric_refinements(name);
            next.clear_facet_refinements(name);
            next.clear_exclude_refinements(name);
            next.clear_disjunctive_facet_refinements(name);
        })
    }
}

fn append_value(lists: &mut FacetValueLists, facet: String, value: String) {
    lists.entry(facet).or_default().push(value);
}

/// Returns whether `facet` had a value list at all.
fn remove_first_value(lists: &mut FacetValueLists, facet: &str, value: &str) -> bool {
    let Some(values) = lists.get_mut(facet) else {
        return false;
    };
    if let Some(index) = values.iter().position(|v| v == value) {
        values.remove(index);
        if values.is_empty() {
            lists.shift_remove(facet);
        }
    }
    true
}

fn contains_value(lists: &FacetValueLists, facet: &str, value: &str) -> bool {
    lists
        .get(facet)
        .is_some_and(|values| values.iter().any(|v| v == value))
}

fn clear_lists(lists: &mut FacetValueLists, facet: Option<&str>) {
    match facet {
        None => lists.clear(),
        Some(facet) => {
            lists.shift_remove(facet);
        }
    }
}
