//! Core domain types for the recruitment marketplace.
//!
//! Records mirror what the remote data actor hands out: teacher profiles
//! (candidates), job listings, pipeline entries and talent pools. Status-like
//! fields that the source data carries as free strings are closed enums here,
//! so an invalid label is rejected once at load time instead of silently
//! failing every comparison later.

use crate::error::DataLoadError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Identifiers
// =============================================================================

/// Opaque identifier of a teacher profile
pub type CandidateId = String;

/// Opaque identifier of a job listing
pub type JobId = String;

/// Opaque identifier of a pipeline entry
pub type EntryId = String;

/// Opaque identifier of a talent pool
pub type PoolId = String;

// =============================================================================
// Labelled enums
// =============================================================================

/// Declares a closed enum whose variants round-trip through a fixed wire
/// label (serde, `Display` and case-insensitive `FromStr`).
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label $(, alias = $alias)*)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire label of this variant
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = DataLoadError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $(
                    if wanted.eq_ignore_ascii_case($label)
                        $(|| wanted.eq_ignore_ascii_case($alias))*
                    {
                        return Ok($name::$variant);
                    }
                )+
                Err(DataLoadError::InvalidValue {
                    field: $field.to_string(),
                    value: s.to_string(),
                })
            }
        }
    };
}

labelled_enum! {
    /// Whether a teacher can currently be put forward for a role
    AvailabilityStatus, "availabilityStatus" {
        Available => "Available",
        Interviewing => "Interviewing",
        Placed => "Placed",
        Inactive => "Inactive",
    }
}

labelled_enum! {
    /// Right-to-work status of a teacher in their country of residence
    WorkPermitStatus, "workPermitStatus" {
        Citizen => "Citizen",
        /// Older profiles were written with "PR Holder"
        PermanentResident => "Permanent Resident" | "PR Holder",
        WorkPermitHolder => "Work Permit Holder",
        EuCitizen => "EU Citizen",
    }
}

labelled_enum! {
    /// Kind of contract a teacher is looking for
    EmploymentType, "employmentType" {
        FullTime => "Full-Time",
        PartTime => "Part-Time",
        Contract => "Contract",
    }
}

labelled_enum! {
    /// Lifecycle of a job listing
    JobStatus, "status" {
        Open => "Open",
        Filled => "Filled",
        Closed => "Closed",
    }
}

labelled_enum! {
    /// Stage of a candidate in a job's hiring pipeline
    Stage, "stage" {
        Sourced => "Sourced",
        Screening => "Screening",
        Interview => "Interview",
        Offer => "Offer",
        Placed => "Placed",
        Rejected => "Rejected",
    }
}

impl Stage {
    /// The forward/backward sequence. `Rejected` is a side exit and is not part of it.
    pub const PROGRESSION: [Stage; 5] = [
        Stage::Sourced,
        Stage::Screening,
        Stage::Interview,
        Stage::Offer,
        Stage::Placed,
    ];

    /// Position in `PROGRESSION`, `None` for `Rejected`
    pub fn progression_index(&self) -> Option<usize> {
        Self::PROGRESSION.iter().position(|s| s == self)
    }

    /// `Placed` and `Rejected` accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Placed | Stage::Rejected)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Sourced
    }
}

// =============================================================================
// Records
// =============================================================================

/// A teacher profile available for matching.
///
/// `subjects` and `grades` have set semantics: order and duplicates carry no
/// meaning for matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub subjects: Vec<String>,
    pub grades: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub years_experience: u32,
    pub country: String,
    #[serde(default)]
    pub nationality: String,
    pub work_permit_status: WorkPermitStatus,
    pub employment_type: EmploymentType,
    pub availability_status: AvailabilityStatus,
    /// Hidden profiles never appear in search results or talent pools
    pub profile_visible: bool,
}

impl Candidate {
    pub fn teaches_subject(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    pub fn teaches_grade(&self, grade: &str) -> bool {
        self.grades.iter().any(|g| g == grade)
    }

    pub fn holds_certification(&self, certification: &str) -> bool {
        self.certifications.iter().any(|c| c == certification)
    }
}

/// An opening posted by a school
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub region: String,
    pub country: String,
    #[serde(default)]
    pub school_type: String,
    #[serde(default)]
    pub role_overview: String,
    #[serde(default)]
    pub subjects_needed: Vec<String>,
    #[serde(default)]
    pub grades_needed: Vec<String>,
    pub status: JobStatus,
}

/// One candidate's progress against one job opening
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineEntry {
    pub id: EntryId,
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub stage: Stage,
}

/// A saved, named view over the candidate roster.
///
/// `filters` stays as the raw JSON the pool was created with; it is parsed
/// when the pool is evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TalentPool {
    pub id: PoolId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub filters: String,
}

// =============================================================================
// DataIndex - in-memory snapshot of the marketplace
// =============================================================================

/// Holds every record of a snapshot with O(1) lookup by id.
///
/// Records are kept in insertion order: ranking ties and board columns keep
/// the order the data actor returned them in.
#[derive(Debug, Default, Clone)]
pub struct DataIndex {
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) candidate_positions: HashMap<CandidateId, usize>,
    pub(crate) jobs: Vec<JobListing>,
    pub(crate) job_positions: HashMap<JobId, usize>,
    pub(crate) entries: Vec<PipelineEntry>,
    pub(crate) entry_positions: HashMap<EntryId, usize>,
    pub(crate) pools: Vec<TalentPool>,
    pub(crate) pool_positions: HashMap<PoolId, usize>,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_candidate(&self, id: &str) -> Option<&Candidate> {
        self.candidate_positions.get(id).map(|&i| &self.candidates[i])
    }

    pub fn get_job(&self, id: &str) -> Option<&JobListing> {
        self.job_positions.get(id).map(|&i| &self.jobs[i])
    }

    pub fn get_entry(&self, id: &str) -> Option<&PipelineEntry> {
        self.entry_positions.get(id).map(|&i| &self.entries[i])
    }

    pub fn get_pool(&self, id: &str) -> Option<&TalentPool> {
        self.pool_positions.get(id).map(|&i| &self.pools[i])
    }

    /// All candidates in insertion order
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn jobs(&self) -> &[JobListing] {
        &self.jobs
    }

    pub fn pipeline_entries(&self) -> &[PipelineEntry] {
        &self.entries
    }

    pub fn talent_pools(&self) -> &[TalentPool] {
        &self.pools
    }

    /// Insert a candidate, replacing the profile with the same id in place
    pub fn insert_candidate(&mut self, candidate: Candidate) {
        let id = candidate.id.clone();
        upsert(&mut self.candidates, &mut self.candidate_positions, id, candidate);
    }

    pub fn insert_job(&mut self, job: JobListing) {
        upsert(&mut self.jobs, &mut self.job_positions, job.id.clone(), job);
    }

    pub fn insert_entry(&mut self, entry: PipelineEntry) {
        upsert(&mut self.entries, &mut self.entry_positions, entry.id.clone(), entry);
    }

    pub fn insert_pool(&mut self, pool: TalentPool) {
        upsert(&mut self.pools, &mut self.pool_positions, pool.id.clone(), pool);
    }

    /// Change a candidate's availability. Returns false if the id is unknown.
    pub fn set_availability(&mut self, id: &str, status: AvailabilityStatus) -> bool {
        match self.candidate_positions.get(id) {
            Some(&i) => {
                self.candidates[i].availability_status = status;
                true
            }
            None => false,
        }
    }

    /// Overwrite the stage of a pipeline entry. Returns false if the id is unknown.
    ///
    /// No transition rules are checked here; that is the stage machine's job.
    pub fn set_stage(&mut self, id: &str, stage: Stage) -> bool {
        match self.entry_positions.get(id) {
            Some(&i) => {
                self.entries[i].stage = stage;
                true
            }
            None => false,
        }
    }

    /// Get counts for debugging/validation: (candidates, jobs, entries, pools)
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.candidates.len(),
            self.jobs.len(),
            self.entries.len(),
            self.pools.len(),
        )
    }
}

fn upsert<T>(items: &mut Vec<T>, positions: &mut HashMap<String, usize>, id: String, item: T) {
    match positions.get(&id) {
        Some(&i) => items[i] = item,
        None => {
            positions.insert(id, items.len());
            items.push(item);
        }
    }
}
