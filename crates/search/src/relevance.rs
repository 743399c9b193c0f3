//! The two relevance questions asked of a single candidate.

use crate::criteria::FilterCriteria;
use crate::filter_pipeline::standard_pipeline;
use crate::scoring::MatchBreakdown;
use data_loader::Candidate;

/// Hard filter: does the candidate satisfy every constrained dimension and
/// have a visible profile?
///
/// Set-valued dimensions need any overlap, the rest need equality (or at
/// least the minimum, for experience).
pub fn matches_filters(candidate: &Candidate, criteria: &FilterCriteria) -> bool {
    standard_pipeline().accepts(candidate, criteria)
}

/// Matched and total criteria items behind `compute_match_score`
pub fn match_breakdown(candidate: &Candidate, criteria: &FilterCriteria) -> MatchBreakdown {
    standard_pipeline().tally(candidate, criteria)
}

/// Soft relevance score in `0..=100`.
///
/// Visibility is not looked at; combine with `matches_filters` before
/// showing the result to anyone.
pub fn compute_match_score(candidate: &Candidate, criteria: &FilterCriteria) -> u8 {
    match_breakdown(candidate, criteria).score()
}
