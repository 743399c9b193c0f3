//! The data actor: the store that owns profiles, jobs, pipeline entries and
//! talent pools.
//!
//! The marketplace core never touches storage directly. It reads whole
//! collections and writes single fields through this trait.

use std::path::Path;

use async_trait::async_trait;
use data_loader::{
    AvailabilityStatus, Candidate, CandidateId, DataIndex, DataLoadError, EntryId, JobId,
    JobListing, PipelineEntry, Stage, TalentPool,
};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

/// Errors reported by a data actor
#[derive(Error, Debug)]
pub enum ActorError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] DataLoadError),

    #[error("Snapshot task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type ActorResult<T> = std::result::Result<T, ActorError>;

/// Read and write operations offered by the data actor.
#[async_trait]
pub trait DataActor: Send + Sync + 'static {
    async fn fetch_candidates(&self) -> ActorResult<Vec<Candidate>>;

    async fn fetch_job_listings(&self) -> ActorResult<Vec<JobListing>>;

    async fn fetch_pipeline_entries(&self) -> ActorResult<Vec<PipelineEntry>>;

    async fn fetch_talent_pools(&self) -> ActorResult<Vec<TalentPool>>;

    /// Store a new entry and return its id
    async fn create_pipeline_entry(
        &self,
        candidate_id: &str,
        job_id: &str,
        stage: Stage,
    ) -> ActorResult<EntryId>;

    async fn update_pipeline_stage(&self, entry_id: &str, stage: Stage) -> ActorResult<()>;

    async fn update_availability(
        &self,
        candidate_id: &str,
        status: AvailabilityStatus,
    ) -> ActorResult<()>;
}

/// A data actor holding a whole snapshot in memory
pub struct InMemoryActor {
    index: RwLock<DataIndex>,
}

impl InMemoryActor {
    pub fn new(index: DataIndex) -> Self {
        Self {
            index: RwLock::new(index),
        }
    }

    /// Load a snapshot directory
    pub fn load(data_dir: &Path) -> ActorResult<Self> {
        Ok(Self::new(DataIndex::load_from_dir(data_dir)?))
    }

    /// Write the current state back to a snapshot directory.
    ///
    /// The write happens on a blocking thread against a copy, so the lock is
    /// only held while cloning.
    pub async fn save(&self, data_dir: &Path) -> ActorResult<()> {
        let snapshot = self.snapshot().await;
        let data_dir = data_dir.to_path_buf();
        tokio::task::spawn_blocking(move || snapshot.save_to_dir(&data_dir)).await??;
        Ok(())
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> DataIndex {
        self.index.read().await.clone()
    }
}

/// First `pe-<n>` id not already taken
fn next_entry_id(index: &DataIndex) -> EntryId {
    let mut n = index.pipeline_entries().len() + 1;
    loop {
        let id = format!("pe-{n}");
        if index.get_entry(&id).is_none() {
            return id;
        }
        n += 1;
    }
}

#[async_trait]
impl DataActor for InMemoryActor {
    async fn fetch_candidates(&self) -> ActorResult<Vec<Candidate>> {
        Ok(self.index.read().await.candidates().to_vec())
    }

    async fn fetch_job_listings(&self) -> ActorResult<Vec<JobListing>> {
        Ok(self.index.read().await.jobs().to_vec())
    }

    async fn fetch_pipeline_entries(&self) -> ActorResult<Vec<PipelineEntry>> {
        Ok(self.index.read().await.pipeline_entries().to_vec())
    }

    async fn fetch_talent_pools(&self) -> ActorResult<Vec<TalentPool>> {
        Ok(self.index.read().await.talent_pools().to_vec())
    }

    async fn create_pipeline_entry(
        &self,
        candidate_id: &str,
        job_id: &str,
        stage: Stage,
    ) -> ActorResult<EntryId> {
        let mut index = self.index.write().await;
        if index.get_candidate(candidate_id).is_none() {
            return Err(not_found("Candidate", candidate_id));
        }
        if index.get_job(job_id).is_none() {
            return Err(not_found("Job", job_id));
        }

        let id = next_entry_id(&index);
        index.insert_entry(PipelineEntry {
            id: id.clone(),
            candidate_id: CandidateId::from(candidate_id),
            job_id: JobId::from(job_id),
            stage,
        });
        debug!("Created pipeline entry {}", id);
        Ok(id)
    }

    async fn update_pipeline_stage(&self, entry_id: &str, stage: Stage) -> ActorResult<()> {
        if self.index.write().await.set_stage(entry_id, stage) {
            Ok(())
        } else {
            Err(not_found("PipelineEntry", entry_id))
        }
    }

    async fn update_availability(
        &self,
        candidate_id: &str,
        status: AvailabilityStatus,
    ) -> ActorResult<()> {
        if self.index.write().await.set_availability(candidate_id, status) {
            Ok(())
        } else {
            Err(not_found("Candidate", candidate_id))
        }
    }
}

fn not_found(entity: &'static str, id: &str) -> ActorError {
    ActorError::NotFound {
        entity,
        id: id.to_string(),
    }
}
