//! Free-text lookups over the roster and the job board.
//!
//! Unlike criteria search these do not score and do not hide anything: they
//! back the admin candidate database and the job board, where every record
//! is listed.

use data_loader::{AvailabilityStatus, Candidate, JobListing};

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Normalised search text, `None` when blank
fn needle(text: &Option<String>) -> Option<String> {
    text.as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

/// Candidate database query
#[derive(Debug, Clone, Default)]
pub struct CandidateQuery {
    /// Matches name, any subject or country, case-insensitively
    pub text: Option<String>,
    pub availability: Option<AvailabilityStatus>,
    /// Exact country
    pub country: Option<String>,
}

impl CandidateQuery {
    pub fn matches(&self, candidate: &Candidate) -> bool {
        let text_ok = match needle(&self.text) {
            Some(needle) => {
                contains_ignore_case(&candidate.name, &needle)
                    || candidate
                        .subjects
                        .iter()
                        .any(|s| contains_ignore_case(s, &needle))
                    || contains_ignore_case(&candidate.country, &needle)
            }
            None => true,
        };

        text_ok
            && self
                .availability
                .is_none_or(|status| candidate.availability_status == status)
            && self
                .country
                .as_ref()
                .is_none_or(|country| candidate.country == *country)
    }
}

/// Job board query
#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    /// Matches title, role overview or any needed subject
    pub text: Option<String>,
    pub country: Option<String>,
    /// Exact subject among the subjects needed
    pub subject: Option<String>,
}

impl JobQuery {
    pub fn matches(&self, job: &JobListing) -> bool {
        let text_ok = match needle(&self.text) {
            Some(needle) => {
                contains_ignore_case(&job.title, &needle)
                    || contains_ignore_case(&job.role_overview, &needle)
                    || job
                        .subjects_needed
                        .iter()
                        .any(|s| contains_ignore_case(s, &needle))
            }
            None => true,
        };

        text_ok
            && self
                .country
                .as_ref()
                .is_none_or(|country| job.country == *country)
            && self
                .subject
                .as_ref()
                .is_none_or(|subject| job.subjects_needed.contains(subject))
    }
}

pub fn search_candidates<'a>(
    candidates: &'a [Candidate],
    query: &CandidateQuery,
) -> Vec<&'a Candidate> {
    candidates.iter().filter(|c| query.matches(c)).collect()
}

pub fn search_jobs<'a>(jobs: &'a [JobListing], query: &JobQuery) -> Vec<&'a JobListing> {
    jobs.iter().filter(|j| query.matches(j)).collect()
}
