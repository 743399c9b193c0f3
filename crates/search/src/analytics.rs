//! Roster analytics for the admin dashboard.

use data_loader::{AvailabilityStatus, Candidate};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Subjects shown in the supply chart
pub const DEFAULT_TOP_SUBJECTS: usize = 8;

/// Aggregate view of the candidate roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSummary {
    pub total_candidates: usize,
    pub visible_candidates: usize,
    /// Every status, in declaration order, zero counts included
    pub availability: Vec<(AvailabilityStatus, usize)>,
    /// Teachers per subject, most common first
    pub subject_supply: Vec<(String, usize)>,
    /// Teachers per country of residence, most common first
    pub countries: Vec<(String, usize)>,
}

impl RosterSummary {
    pub fn build(candidates: &[Candidate], top_subjects: usize) -> Self {
        let mut subject_supply = subject_supply(candidates);
        subject_supply.truncate(top_subjects);

        Self {
            total_candidates: candidates.len(),
            visible_candidates: candidates.iter().filter(|c| c.profile_visible).count(),
            availability: availability_breakdown(candidates),
            subject_supply,
            countries: country_distribution(candidates),
        }
    }
}

pub fn availability_breakdown(candidates: &[Candidate]) -> Vec<(AvailabilityStatus, usize)> {
    AvailabilityStatus::ALL
        .iter()
        .map(|&status| {
            let count = candidates
                .iter()
                .filter(|c| c.availability_status == status)
                .count();
            (status, count)
        })
        .collect()
}

/// Teachers per subject. A subject listed twice on one profile counts once.
pub fn subject_supply(candidates: &[Candidate]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for candidate in candidates {
        let unique: HashSet<&str> = candidate.subjects.iter().map(String::as_str).collect();
        for subject in unique {
            *counts.entry(subject).or_insert(0) += 1;
        }
    }
    sorted_counts(counts)
}

pub fn country_distribution(candidates: &[Candidate]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for candidate in candidates {
        *counts.entry(candidate.country.as_str()).or_insert(0) += 1;
    }
    sorted_counts(counts)
}

/// Descending by count, ties by name
fn sorted_counts(counts: HashMap<&str, usize>) -> Vec<(String, usize)> {
    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}
