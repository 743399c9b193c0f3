//! Filters on the single-valued profile labels: availability, work permit
//! and employment type. All three are exact matches against an optional
//! wanted value.

use crate::criteria::FilterCriteria;
use crate::scoring::MatchBreakdown;
use crate::traits::Filter;
use data_loader::Candidate;

fn accepts_exact<T: PartialEq>(wanted: Option<&T>, actual: &T) -> bool {
    wanted.is_none_or(|wanted| wanted == actual)
}

fn tally_exact<T: PartialEq>(wanted: Option<&T>, actual: &T) -> MatchBreakdown {
    match wanted {
        Some(wanted) => MatchBreakdown::single(wanted == actual),
        None => MatchBreakdown::default(),
    }
}

/// Keeps candidates with the selected availability status
pub struct AvailabilityFilter;

impl Filter for AvailabilityFilter {
    fn name(&self) -> &str {
        "AvailabilityFilter"
    }

    fn accepts(&self, candidate: &Candidate, criteria: &FilterCriteria) -> bool {
        accepts_exact(criteria.availability.as_ref(), &candidate.availability_status)
    }

    fn tally(&self, candidate: &Candidate, criteria: &FilterCriteria) -> MatchBreakdown {
        tally_exact(criteria.availability.as_ref(), &candidate.availability_status)
    }
}

/// Keeps candidates with the selected work-permit status
pub struct WorkPermitFilter;

impl Filter for WorkPermitFilter {
    fn name(&self) -> &str {
        "WorkPermitFilter"
    }

    fn accepts(&self, candidate: &Candidate, criteria: &FilterCriteria) -> bool {
        accepts_exact(criteria.work_permit.as_ref(), &candidate.work_permit_status)
    }

    fn tally(&self, candidate: &Candidate, criteria: &FilterCriteria) -> MatchBreakdown {
        tally_exact(criteria.work_permit.as_ref(), &candidate.work_permit_status)
    }
}

/// Keeps candidates looking for the selected employment type
pub struct EmploymentTypeFilter;

impl Filter for EmploymentTypeFilter {
    fn name(&self) -> &str {
        "EmploymentTypeFilter"
    }

    fn accepts(&self, candidate: &Candidate, criteria: &FilterCriteria) -> bool {
        accepts_exact(criteria.employment_type.as_ref(), &candidate.employment_type)
    }

    fn tally(&self, candidate: &Candidate, criteria: &FilterCriteria) -> MatchBreakdown {
        tally_exact(criteria.employment_type.as_ref(), &candidate.employment_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::teacher;
    use data_loader::{AvailabilityStatus, EmploymentType, WorkPermitStatus};

    #[test]
    fn test_availability_filter() {
        let criteria = FilterCriteria::new().with_availability(AvailabilityStatus::Available);

        let candidates = vec![
            teacher("t1").availability(AvailabilityStatus::Available).build(),
            teacher("t2").availability(AvailabilityStatus::Interviewing).build(),
            teacher("t3").availability(AvailabilityStatus::Inactive).build(),
        ];

        let filtered = AvailabilityFilter.apply(candidates.iter().collect(), &criteria);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "t1");
    }

    #[test]
    fn test_work_permit_filter() {
        let criteria = FilterCriteria::new().with_work_permit(WorkPermitStatus::EuCitizen);

        let eu = teacher("t1").work_permit(WorkPermitStatus::EuCitizen).build();
        let holder = teacher("t2").work_permit(WorkPermitStatus::WorkPermitHolder).build();

        assert!(WorkPermitFilter.accepts(&eu, &criteria));
        assert!(!WorkPermitFilter.accepts(&holder, &criteria));
        assert_eq!(WorkPermitFilter.tally(&holder, &criteria), MatchBreakdown::single(false));
    }

    #[test]
    fn test_employment_type_filter() {
        let criteria = FilterCriteria::new().with_employment_type(EmploymentType::PartTime);

        let part_time = teacher("t1").employment(EmploymentType::PartTime).build();
        let contract = teacher("t2").employment(EmploymentType::Contract).build();

        assert!(EmploymentTypeFilter.accepts(&part_time, &criteria));
        assert!(!EmploymentTypeFilter.accepts(&contract, &criteria));
        assert_eq!(
            EmploymentTypeFilter.tally(&part_time, &criteria),
            MatchBreakdown { matched: 1, total: 1 }
        );
    }

    #[test]
    fn test_any_status_accepts_everyone() {
        let criteria = FilterCriteria::new();
        let candidate = teacher("t1").availability(AvailabilityStatus::Inactive).build();

        assert!(AvailabilityFilter.accepts(&candidate, &criteria));
        assert!(WorkPermitFilter.accepts(&candidate, &criteria));
        assert!(EmploymentTypeFilter.accepts(&candidate, &criteria));
    }
}
