//! Filter on the subjects a teacher can teach.
//!
//! Usually the most selective dimension, so it runs first in the
//! standard pipeline.

use crate::criteria::FilterCriteria;
use crate::scoring::MatchBreakdown;
use crate::traits::Filter;
use data_loader::Candidate;

/// Keeps candidates teaching at least one selected subject.
///
/// ## Scoring
/// Every selected subject counts on its own: a teacher with two of three
/// selected subjects scores 2/3 on this dimension, not 1/1.
pub struct SubjectFilter;

impl Filter for SubjectFilter {
    fn name(&self) -> &str {
        "SubjectFilter"
    }

    fn accepts(&self, candidate: &Candidate, criteria: &FilterCriteria) -> bool {
        criteria.subjects.is_empty()
            || criteria
                .subjects
                .iter()
                .any(|subject| candidate.teaches_subject(subject))
    }

    fn tally(&self, candidate: &Candidate, criteria: &FilterCriteria) -> MatchBreakdown {
        MatchBreakdown::count_items(&criteria.subjects, |subject| {
            candidate.teaches_subject(subject)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::teacher;

    #[test]
    fn test_subject_filter() {
        let criteria = FilterCriteria::new().with_subjects(["Mathematics", "Chemistry"]);

        let candidates = vec![
            teacher("t1").subjects(&["Mathematics", "Physics"]).build(), // overlap
            teacher("t2").subjects(&["English"]).build(),                // no overlap
            teacher("t3").subjects(&["Chemistry"]).build(),              // overlap
        ];

        let filtered = SubjectFilter.apply(candidates.iter().collect(), &criteria);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, "t1");
        assert_eq!(filtered[1].id, "t3");
    }

    #[test]
    fn test_subject_tally_counts_each_selected_subject() {
        let criteria =
            FilterCriteria::new().with_subjects(["Mathematics", "Physics", "Chemistry"]);
        let candidate = teacher("t1").subjects(&["Mathematics", "Physics"]).build();

        let tally = SubjectFilter.tally(&candidate, &criteria);
        assert_eq!(tally, MatchBreakdown { matched: 2, total: 3 });
    }

    #[test]
    fn test_no_subjects_selected() {
        let criteria = FilterCriteria::new();
        let candidate = teacher("t1").subjects(&[]).build();

        assert!(SubjectFilter.accepts(&candidate, &criteria));
        assert_eq!(SubjectFilter.tally(&candidate, &criteria), MatchBreakdown::default());
    }
}
