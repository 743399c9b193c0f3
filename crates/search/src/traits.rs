//! Core trait for the search filters.
//!
//! Each filter owns one dimension of `FilterCriteria`. It answers two
//! questions about a candidate: does it pass the dimension as a hard filter,
//! and how many of the dimension's selected items does it satisfy when the
//! dimension is used as a soft preference.

use crate::criteria::FilterCriteria;
use crate::scoring::MatchBreakdown;
use data_loader::Candidate;

/// Core trait for filtering and scoring candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
/// `Send + Sync` lets the pipeline be shared and used from rayon workers.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Hard filter: false removes the candidate from results.
    ///
    /// An unconstrained dimension accepts everyone.
    fn accepts(&self, candidate: &Candidate, criteria: &FilterCriteria) -> bool;

    /// Soft preference: contribution of this dimension to the match score.
    ///
    /// Unconstrained dimensions, and dimensions that only gate inclusion,
    /// contribute nothing.
    fn tally(&self, _candidate: &Candidate, _criteria: &FilterCriteria) -> MatchBreakdown {
        MatchBreakdown::default()
    }

    /// Keep only the candidates this filter accepts, preserving order
    fn apply<'a>(
        &self,
        candidates: Vec<&'a Candidate>,
        criteria: &FilterCriteria,
    ) -> Vec<&'a Candidate> {
        candidates
            .into_iter()
            .filter(|candidate| self.accepts(candidate, criteria))
            .collect()
    }
}
