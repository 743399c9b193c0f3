//! DataIndex building and indexing logic.
//!
//! Builds the DataIndex from a snapshot directory:
//! - Parse all record files in parallel
//! - Build the id lookups (insertion order preserved)
//! - Validate ids and cross references

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

impl DataIndex {
    /// Load a marketplace snapshot from a directory.
    ///
    /// Steps:
    /// 1. Parse candidates, jobs, pipeline entries and pools (in parallel)
    /// 2. Reject duplicate ids and index the records
    /// 3. Validate references
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading marketplace snapshot from {:?}", data_dir);

        let candidates_path = data_dir.join("candidates.json");
        let jobs_path = data_dir.join("jobs.json");
        let pipeline_path = data_dir.join("pipeline.json");
        let pools_path = data_dir.join("pools.json");

        let ((candidates, jobs), (entries, pools)) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_candidates(&candidates_path),
                    || parser::parse_jobs(&jobs_path),
                )
            },
            || {
                rayon::join(
                    || parser::parse_pipeline_entries(&pipeline_path),
                    || parser::parse_talent_pools(&pools_path),
                )
            },
        );

        let index = Self::from_records(candidates?, jobs?, entries?, pools?)?;

        let (c, j, e, p) = index.counts();
        info!(
            "Loaded {} candidates, {} jobs, {} pipeline entries, {} talent pools",
            c, j, e, p
        );
        Ok(index)
    }

    /// Write the snapshot back to `data_dir`, one file per record kind
    pub fn save_to_dir(&self, data_dir: &Path) -> Result<()> {
        parser::write_records(&data_dir.join("candidates.json"), &self.candidates)?;
        parser::write_records(&data_dir.join("jobs.json"), &self.jobs)?;
        parser::write_records(&data_dir.join("pipeline.json"), &self.entries)?;
        parser::write_records(&data_dir.join("pools.json"), &self.pools)?;
        info!("Saved marketplace snapshot to {:?}", data_dir);
        Ok(())
    }

    /// Build a validated index from already parsed records
    pub fn from_records(
        candidates: Vec<Candidate>,
        jobs: Vec<JobListing>,
        entries: Vec<PipelineEntry>,
        pools: Vec<TalentPool>,
    ) -> Result<Self> {
        ensure_unique("Candidate", candidates.iter().map(|c| c.id.as_str()))?;
        ensure_unique("Job", jobs.iter().map(|j| j.id.as_str()))?;
        ensure_unique("PipelineEntry", entries.iter().map(|e| e.id.as_str()))?;
        ensure_unique("TalentPool", pools.iter().map(|p| p.id.as_str()))?;

        let mut index = DataIndex::new();
        for candidate in candidates {
            index.insert_candidate(candidate);
        }
        for job in jobs {
            index.insert_job(job);
        }
        for entry in entries {
            index.insert_entry(entry);
        }
        for pool in pools {
            index.insert_pool(pool);
        }

        index.validate()?;
        Ok(index)
    }

    /// Validate referential integrity: every pipeline entry must point at an
    /// existing candidate and job.
    pub fn validate(&self) -> Result<()> {
        for entry in &self.entries {
            if self.get_candidate(&entry.candidate_id).is_none() {
                return Err(DataLoadError::MissingReference {
                    entity: "Candidate".to_string(),
                    id: entry.candidate_id.clone(),
                });
            }
            if self.get_job(&entry.job_id).is_none() {
                return Err(DataLoadError::MissingReference {
                    entity: "Job".to_string(),
                    id: entry.job_id.clone(),
                });
            }
        }
        Ok(())
    }
}

fn ensure_unique<'a>(entity: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DataLoadError::DuplicateId {
                entity: entity.to_string(),
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn candidate(id: &str, subjects: &[&str], country: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: format!("Teacher {}", id),
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            grades: vec!["Grade 10".to_string()],
            qualifications: vec![],
            certifications: vec![],
            years_experience: 4,
            country: country.to_string(),
            nationality: String::new(),
            work_permit_status: WorkPermitStatus::Citizen,
            employment_type: EmploymentType::FullTime,
            availability_status: AvailabilityStatus::Available,
            profile_visible: true,
        }
    }

    fn job(id: &str) -> JobListing {
        JobListing {
            id: id.to_string(),
            title: "Mathematics Teacher".to_string(),
            region: String::new(),
            country: "South Africa".to_string(),
            school_type: String::new(),
            role_overview: String::new(),
            subjects_needed: vec!["Mathematics".to_string()],
            grades_needed: vec![],
            status: JobStatus::Open,
        }
    }

    fn entry(id: &str, candidate_id: &str, job_id: &str) -> PipelineEntry {
        PipelineEntry {
            id: id.to_string(),
            candidate_id: candidate_id.to_string(),
            job_id: job_id.to_string(),
            stage: Stage::Sourced,
        }
    }

    #[test]
    fn test_records_keep_insertion_order() {
        let index = DataIndex::from_records(
            vec![
                candidate("t2", &["Mathematics"], "Singapore"),
                candidate("t1", &["Mathematics", "Physics"], "South Africa"),
            ],
            vec![job("j1")],
            vec![],
            vec![],
        )
        .unwrap();

        let ids: Vec<&str> = index.candidates().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t1"]);
        assert_eq!(index.get_candidate("t1").unwrap().country, "South Africa");
    }

    #[test]
    fn test_duplicate_candidate_rejected() {
        let result = DataIndex::from_records(
            vec![candidate("t1", &[], "X"), candidate("t1", &[], "Y")],
            vec![],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(DataLoadError::DuplicateId { .. })));
    }

    #[test]
    fn test_entry_with_unknown_job_rejected() {
        let result = DataIndex::from_records(
            vec![candidate("t1", &[], "X")],
            vec![job("j1")],
            vec![entry("pe1", "t1", "j9")],
            vec![],
        );
        match result {
            Err(DataLoadError::MissingReference { entity, id }) => {
                assert_eq!(entity, "Job");
                assert_eq!(id, "j9");
            }
            other => panic!("expected missing reference, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = vec![candidate("t1", &["English"], "France")];
        fs::write(
            dir.path().join("candidates.json"),
            serde_json::to_string(&candidates).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join("jobs.json"),
            serde_json::to_string(&vec![job("j1")]).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join("pipeline.json"),
            serde_json::to_string(&vec![entry("pe1", "t1", "j1")]).unwrap(),
        )
        .unwrap();

        let index = DataIndex::load_from_dir(dir.path()).unwrap();
        assert_eq!(index.counts(), (1, 1, 1, 0));
        assert_eq!(index.get_entry("pe1").unwrap().stage, Stage::Sourced);
    }

    #[test]
    fn test_save_then_load_keeps_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut index = DataIndex::from_records(
            vec![candidate("t1", &["English"], "France")],
            vec![job("j1")],
            vec![entry("pe1", "t1", "j1")],
            vec![],
        )
        .unwrap();
        index.set_stage("pe1", Stage::Offer);
        index.set_availability("t1", AvailabilityStatus::Interviewing);

        index.save_to_dir(dir.path()).unwrap();
        let reloaded = DataIndex::load_from_dir(dir.path()).unwrap();

        assert_eq!(reloaded.get_entry("pe1").unwrap().stage, Stage::Offer);
        assert_eq!(
            reloaded.get_candidate("t1").unwrap().availability_status,
            AvailabilityStatus::Interviewing
        );
        assert_eq!(reloaded.get_candidate("t1").unwrap().country, "France");
    }
}
