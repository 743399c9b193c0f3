//! Filter that hides profiles their owners have switched off.
//!
//! This is always the last filter in the standard pipeline and is not a
//! scoring dimension: a hidden profile is never a search result, whatever
//! its score would have been.

use crate::criteria::FilterCriteria;
use crate::traits::Filter;
use data_loader::Candidate;

/// Removes candidates whose `profile_visible` flag is false.
pub struct VisibilityFilter;

impl Filter for VisibilityFilter {
    fn name(&self) -> &str {
        "VisibilityFilter"
    }

    fn accepts(&self, candidate: &Candidate, _criteria: &FilterCriteria) -> bool {
        candidate.profile_visible
    }
}
