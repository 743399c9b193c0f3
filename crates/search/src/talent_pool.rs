//! Talent pool membership.
//!
//! A pool stores its criteria as raw JSON. They are parsed each time the pool
//! is evaluated; criteria that do not parse match nobody.
//!
//! A dimension that is absent, `null` or `""` does not constrain. A listed
//! dimension needs at least one match, so an empty list admits nobody.

use data_loader::{AvailabilityStatus, Candidate, TalentPool};
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// Structured form of a pool's `filters` JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PoolCriteria {
    #[serde(deserialize_with = "list_or_blank")]
    pub subjects: Option<Vec<String>>,
    #[serde(deserialize_with = "list_or_blank")]
    pub grades: Option<Vec<String>>,
    #[serde(deserialize_with = "label_or_blank")]
    pub availability_status: Option<AvailabilityStatus>,
    /// Candidate needs at least one of these
    #[serde(deserialize_with = "list_or_blank")]
    pub certifications: Option<Vec<String>>,
}

/// Accepts a list, `null` or `""`
#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrBlank {
    List(Vec<String>),
    Blank(String),
}

fn list_or_blank<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<ListOrBlank>::deserialize(deserializer)? {
        None => Ok(None),
        Some(ListOrBlank::List(items)) => Ok(Some(items)),
        Some(ListOrBlank::Blank(text)) if text.is_empty() => Ok(None),
        Some(ListOrBlank::Blank(text)) => Err(serde::de::Error::custom(format!(
            "expected a list, found \"{}\"",
            text
        ))),
    }
}

fn label_or_blank<'de, D>(deserializer: D) -> Result<Option<AvailabilityStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(label) if label.is_empty() => Ok(None),
        Some(label) => label.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// `None` passes; otherwise some listed item must be held
fn any_listed(listed: &Option<Vec<String>>, held: impl Fn(&str) -> bool) -> bool {
    listed
        .as_ref()
        .is_none_or(|items| items.iter().any(|item| held(item.as_str())))
}

impl PoolCriteria {
    pub fn parse(filters: &str) -> serde_json::Result<Self> {
        serde_json::from_str(filters)
    }

    /// Visible and passing every constrained dimension
    pub fn admits(&self, candidate: &Candidate) -> bool {
        any_listed(&self.subjects, |s| candidate.teaches_subject(s))
            && any_listed(&self.grades, |g| candidate.teaches_grade(g))
            && self
                .availability_status
                .is_none_or(|status| candidate.availability_status == status)
            && any_listed(&self.certifications, |c| candidate.holds_certification(c))
            && candidate.profile_visible
    }
}

/// Parse a pool's criteria, logging and returning `None` when malformed
pub fn pool_criteria(pool: &TalentPool) -> Option<PoolCriteria> {
    match PoolCriteria::parse(&pool.filters) {
        Ok(criteria) => Some(criteria),
        Err(e) => {
            warn!("Talent pool {} has unreadable filters: {}", pool.id, e);
            None
        }
    }
}

/// Members of `pool`, in roster order
pub fn pool_members<'a>(pool: &TalentPool, candidates: &'a [Candidate]) -> Vec<&'a Candidate> {
    match pool_criteria(pool) {
        Some(criteria) => candidates.iter().filter(|c| criteria.admits(c)).collect(),
        None => Vec::new(),
    }
}

/// Number of members of `pool`
pub fn pool_size(pool: &TalentPool, candidates: &[Candidate]) -> usize {
    match pool_criteria(pool) {
        Some(criteria) => candidates.iter().filter(|c| criteria.admits(c)).count(),
        None => 0,
    }
}
