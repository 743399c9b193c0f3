//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern, and the shared
//! standard pipeline used by `matches_filters` and `compute_match_score`.

use crate::criteria::FilterCriteria;
use crate::filters::*;
use crate::scoring::MatchBreakdown;
use crate::traits::Filter;
use data_loader::Candidate;
use std::sync::LazyLock;

static STANDARD: LazyLock<FilterPipeline> = LazyLock::new(|| {
    let pipeline = FilterPipeline::standard();
    tracing::debug!(filters = ?pipeline.filter_names(), "Built standard filter pipeline");
    pipeline
});

/// The standard pipeline, built once and shared.
pub fn standard_pipeline() -> &'static FilterPipeline {
    &STANDARD
}

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(SubjectFilter)
///     .add_filter(ExperienceFilter)
///     .add_filter(VisibilityFilter);
///
/// let filtered = pipeline.apply(index.candidates().iter().collect(), &criteria);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Every criteria dimension, then the visibility gate.
    ///
    /// Order: subjects, grades, availability, country, minimum experience,
    /// work permit, employment type, visibility.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(SubjectFilter)
            .add_filter(GradeFilter)
            .add_filter(AvailabilityFilter)
            .add_filter(CountryFilter)
            .add_filter(ExperienceFilter)
            .add_filter(WorkPermitFilter)
            .add_filter(EmploymentTypeFilter)
            .add_filter(VisibilityFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    ///
    /// # Arguments
    /// * `filter` - Any type implementing the Filter trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// ## Algorithm
    /// 1. Start with the input candidates
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set, in input order
    pub fn apply<'a>(
        &self,
        candidates: Vec<&'a Candidate>,
        criteria: &FilterCriteria,
    ) -> Vec<&'a Candidate> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, criteria);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }

    /// True when every filter accepts the candidate
    pub fn accepts(&self, candidate: &Candidate, criteria: &FilterCriteria) -> bool {
        self.filters
            .iter()
            .all(|filter| filter.accepts(candidate, criteria))
    }

    /// Sum of every filter's tally
    pub fn tally(&self, candidate: &Candidate, criteria: &FilterCriteria) -> MatchBreakdown {
        self.filters
            .iter()
            .map(|filter| filter.tally(candidate, criteria))
            .sum()
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::teacher;

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let criteria = FilterCriteria::new().with_min_experience(50);

        let candidates = vec![teacher("t1").build(), teacher("t2").hidden().build()];

        let filtered = pipeline.apply(candidates.iter().collect(), &criteria);
        assert_eq!(filtered.len(), 2);
        assert_eq!(pipeline.tally(&candidates[0], &criteria), MatchBreakdown::default());
    }

    #[test]
    fn test_single_filter() {
        let pipeline = FilterPipeline::new().add_filter(ExperienceFilter);
        let criteria = FilterCriteria::new().with_min_experience(5);

        let candidates = vec![
            teacher("t1").experience(2).build(),
            teacher("t2").experience(7).build(),
        ];

        let filtered = pipeline.apply(candidates.iter().collect(), &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "t2");
    }

    #[test]
    fn test_standard_order() {
        assert_eq!(
            standard_pipeline().filter_names(),
            vec![
                "SubjectFilter",
                "GradeFilter",
                "AvailabilityFilter",
                "CountryFilter",
                "ExperienceFilter",
                "WorkPermitFilter",
                "EmploymentTypeFilter",
                "VisibilityFilter",
            ]
        );
    }

    #[test]
    fn test_apply_agrees_with_accepts() {
        let criteria = FilterCriteria::new()
            .with_subjects(["Mathematics"])
            .with_country("Singapore");

        let candidates = vec![
            teacher("t1").subjects(&["Mathematics"]).country("Singapore").build(),
            teacher("t2").subjects(&["Mathematics"]).country("India").build(),
            teacher("t3").subjects(&["Mathematics"]).country("Singapore").hidden().build(),
            teacher("t4").subjects(&["Art"]).country("Singapore").build(),
        ];

        let pipeline = standard_pipeline();
        let filtered = pipeline.apply(candidates.iter().collect(), &criteria);
        let accepted: Vec<_> = candidates
            .iter()
            .filter(|c| pipeline.accepts(c, &criteria))
            .collect();

        assert_eq!(filtered, accepted);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "t1");
    }
}
