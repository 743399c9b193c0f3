//! Filter on the grade levels a teacher has taught.

use crate::criteria::FilterCriteria;
use crate::scoring::MatchBreakdown;
use crate::traits::Filter;
use data_loader::Candidate;

/// Keeps candidates covering at least one selected grade.
///
/// Scored per selected grade, like `SubjectFilter`.
pub struct GradeFilter;

impl Filter for GradeFilter {
    fn name(&self) -> &str {
        "GradeFilter"
    }

    fn accepts(&self, candidate: &Candidate, criteria: &FilterCriteria) -> bool {
        criteria.grades.is_empty()
            || criteria
                .grades
                .iter()
                .any(|grade| candidate.teaches_grade(grade))
    }

    fn tally(&self, candidate: &Candidate, criteria: &FilterCriteria) -> MatchBreakdown {
        MatchBreakdown::count_items(&criteria.grades, |grade| candidate.teaches_grade(grade))
    }
}
