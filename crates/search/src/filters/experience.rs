//! Filter on years of professional experience.

use crate::criteria::FilterCriteria;
use crate::scoring::MatchBreakdown;
use crate::traits::Filter;
use data_loader::Candidate;

/// Removes candidates with fewer years than `criteria.min_experience`.
///
/// A minimum of 0 means "no constraint".
pub struct ExperienceFilter;

impl Filter for ExperienceFilter {
    fn name(&self) -> &str {
        "ExperienceFilter"
    }

    fn accepts(&self, candidate: &Candidate, criteria: &FilterCriteria) -> bool {
        criteria.min_experience == 0 || candidate.years_experience >= criteria.min_experience
    }

    fn tally(&self, candidate: &Candidate, criteria: &FilterCriteria) -> MatchBreakdown {
        if criteria.min_experience == 0 {
            return MatchBreakdown::default();
        }
        MatchBreakdown::single(candidate.years_experience >= criteria.min_experience)
    }
}
