//! Filter criteria selected by a searching user.
//!
//! A `FilterCriteria` is built fresh for each search interaction and passed
//! by reference into the pure matching and scoring functions. Every field has
//! an "unconstrained" value: an empty set, zero, or `None` for "any".

use data_loader::{AvailabilityStatus, EmploymentType, WorkPermitStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Selected subjects; a candidate needs at least one of them
    pub subjects: BTreeSet<String>,
    /// Selected grade levels; a candidate needs at least one of them
    pub grades: BTreeSet<String>,
    /// Minimum years of experience, 0 means no constraint
    pub min_experience: u32,
    pub work_permit: Option<WorkPermitStatus>,
    pub country: Option<String>,
    pub availability: Option<AvailabilityStatus>,
    pub employment_type: Option<EmploymentType>,
}

impl FilterCriteria {
    /// Criteria with no constraint on any dimension
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects = subjects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_grades<I, S>(mut self, grades: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grades = grades.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_experience(mut self, years: u32) -> Self {
        self.min_experience = years;
        self
    }

    pub fn with_work_permit(mut self, status: WorkPermitStatus) -> Self {
        self.work_permit = Some(status);
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_availability(mut self, status: AvailabilityStatus) -> Self {
        self.availability = Some(status);
        self
    }

    pub fn with_employment_type(mut self, employment_type: EmploymentType) -> Self {
        self.employment_type = Some(employment_type);
        self
    }

    /// How many of the seven dimensions are constrained
    pub fn active_filter_count(&self) -> usize {
        [
            !self.subjects.is_empty(),
            !self.grades.is_empty(),
            self.availability.is_some(),
            self.country.is_some(),
            self.min_experience > 0,
            self.work_permit.is_some(),
            self.employment_type.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active_filter_count() == 0
    }
}
