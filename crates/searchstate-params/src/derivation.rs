//! Refined / unrefined disjunctive facet derivation.
//!
//! A disjunctive facet counts as refined when it has selected values, or when it
//! is declared disjunctive and carries a numeric refinement (range sliders on a
//! disjunctive attribute).

use crate::parameters::SearchParameters;

impl SearchParameters {
    /// Attributes refined as disjunctive facets.
    ///
    /// Facets with selected values come first, followed by declared disjunctive
    /// facets refined numerically. Each part is in the order the attributes were
    /// first refined. An attribute refined both ways is listed twice.
    #[must_use]
    pub fn refined_disjunctive_facets(&self) -> Vec<String> {
        let numerically_refined = self
            .numeric_refinements
            .keys()
            .filter(|attribute| self.disjunctive_facets.contains(attribute));
        self.disjunctive_facets_refinements
            .keys()
            .chain(numerically_refined)
            .cloned()
            .collect()
    }

    /// Declared disjunctive facets that are not refined, in declaration order.
    #[must_use]
    pub fn unrefined_disjunctive_facets(&self) -> Vec<String> {
        let refined = self.refined_disjunctive_facets();
        self.disjunctive_facets
            .iter()
            .filter(|facet| !refined.contains(facet))
            .cloned()
            .collect()
    }
}
