//! Filter on country of residence.

use crate::criteria::FilterCriteria;
use crate::scoring::MatchBreakdown;
use crate::traits::Filter;
use data_loader::Candidate;

/// Keeps candidates living in the selected country (exact match).
pub struct CountryFilter;

impl Filter for CountryFilter {
    fn name(&self) -> &str {
        "CountryFilter"
    }

    fn accepts(&self, candidate: &Candidate, criteria: &FilterCriteria) -> bool {
        match &criteria.country {
            Some(country) => candidate.country == *country,
            None => true,
        }
    }

    fn tally(&self, candidate: &Candidate, criteria: &FilterCriteria) -> MatchBreakdown {
        match &criteria.country {
            Some(country) => MatchBreakdown::single(candidate.country == *country),
            None => MatchBreakdown::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::teacher;

    #[test]
    fn test_country_filter() {
        let criteria = FilterCriteria::new().with_country("Singapore");

        let local = teacher("t1").country("Singapore").build();
        let abroad = teacher("t2").country("India").build();

        assert!(CountryFilter.accepts(&local, &criteria));
        assert!(!CountryFilter.accepts(&abroad, &criteria));
        assert_eq!(CountryFilter.tally(&abroad, &criteria), MatchBreakdown::single(false));
        assert!(CountryFilter.accepts(&abroad, &FilterCriteria::new()));
    }
}
