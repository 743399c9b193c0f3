//! # Marketplace Service
//!
//! This module combines the data actor with the pure search and recruitment
//! logic:
//! 1. Fetch the collections a request needs (concurrently with `tokio::join!`)
//! 2. Run filtering and ranking on a blocking thread
//! 3. Apply stage transitions and write back only what changed
//!
//! Unknown ids are errors. Transitions that are not allowed are not: they
//! come back as `Transition::Unchanged`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, instrument};

use data_loader::{AvailabilityStatus, Candidate, JobListing, PipelineEntry, Stage, TalentPool};
use recruitment::{
    create_entry, job_titles, JobFilter, PipelineBoard, StageAction, StageMachine, Transition,
};
use search::{
    pool_members, pool_size, search_candidates, search_jobs, top_candidates, CandidateQuery,
    FilterCriteria, JobQuery, MatchBreakdown, RankedCandidate, RosterSummary,
    DEFAULT_TOP_SUBJECTS,
};

use crate::actor::DataActor;

/// Number of search results returned when the caller does not ask for a limit
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// A ranked search result, detached from the fetched roster
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub candidate: Candidate,
    pub score: u8,
    pub breakdown: MatchBreakdown,
}

impl From<RankedCandidate<'_>> for SearchHit {
    fn from(ranked: RankedCandidate<'_>) -> Self {
        Self {
            candidate: ranked.candidate.clone(),
            score: ranked.score,
            breakdown: ranked.breakdown,
        }
    }
}

/// A pipeline entry with the names a recruiter recognises
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCard {
    pub entry: PipelineEntry,
    pub candidate_name: String,
    pub job_title: String,
}

/// The kanban board: one column per stage, plus the job selector options
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub columns: Vec<(Stage, Vec<BoardCard>)>,
    pub job_titles: Vec<String>,
}

impl BoardView {
    pub fn column(&self, stage: Stage) -> &[BoardCard] {
        self.columns
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, cards)| cards.as_slice())
            .unwrap_or(&[])
    }

    pub fn stage_counts(&self) -> Vec<(Stage, usize)> {
        self.columns
            .iter()
            .map(|(stage, cards)| (*stage, cards.len()))
            .collect()
    }
}

/// Entry point for every marketplace operation
pub struct MarketplaceService<A: DataActor> {
    actor: Arc<A>,
    default_limit: usize,
}

impl<A: DataActor> Clone for MarketplaceService<A> {
    fn clone(&self) -> Self {
        Self {
            actor: self.actor.clone(),
            default_limit: self.default_limit,
        }
    }
}

impl<A: DataActor> MarketplaceService<A> {
    pub fn new(actor: Arc<A>) -> Self {
        Self {
            actor,
            default_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Change the number of search results returned when no limit is given
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn actor(&self) -> &Arc<A> {
        &self.actor
    }

    /// Criteria search: hard filter, score, rank, truncate.
    #[instrument(skip(self, criteria), fields(active_filters = criteria.active_filter_count()))]
    pub async fn search_candidates(
        &self,
        criteria: FilterCriteria,
        limit: Option<usize>,
    ) -> Result<Vec<SearchHit>> {
        let start_time = Instant::now();
        let limit = limit.unwrap_or(self.default_limit);

        let candidates = self
            .actor
            .fetch_candidates()
            .await
            .context("Failed to fetch candidates")?;
        let roster_size = candidates.len();

        let hits = tokio::task::spawn_blocking(move || {
            top_candidates(&candidates, &criteria, limit)
                .into_iter()
                .map(SearchHit::from)
                .collect::<Vec<_>>()
        })
        .await
        .context("Ranking task panicked")?;

        info!(
            "Search returned {} of {} candidates in {:.2?}",
            hits.len(),
            roster_size,
            start_time.elapsed()
        );
        Ok(hits)
    }

    /// Keyword lookup over the whole roster, hidden profiles included
    pub async fn find_candidates(&self, query: &CandidateQuery) -> Result<Vec<Candidate>> {
        let candidates = self
            .actor
            .fetch_candidates()
            .await
            .context("Failed to fetch candidates")?;
        Ok(search_candidates(&candidates, query)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn candidate(&self, candidate_id: &str) -> Result<Candidate> {
        let candidates = self
            .actor
            .fetch_candidates()
            .await
            .context("Failed to fetch candidates")?;
        candidates
            .into_iter()
            .find(|c| c.id == candidate_id)
            .with_context(|| format!("Candidate {} not found", candidate_id))
    }

    pub async fn find_jobs(&self, query: &JobQuery) -> Result<Vec<JobListing>> {
        let jobs = self
            .actor
            .fetch_job_listings()
            .await
            .context("Failed to fetch job listings")?;
        Ok(search_jobs(&jobs, query).into_iter().cloned().collect())
    }

    /// Members of one talent pool
    #[instrument(skip(self))]
    pub async fn pool_members(&self, pool_id: &str) -> Result<(TalentPool, Vec<Candidate>)> {
        let (pools, candidates) =
            tokio::join!(self.actor.fetch_talent_pools(), self.actor.fetch_candidates());
        let pools = pools.context("Failed to fetch talent pools")?;
        let candidates = candidates.context("Failed to fetch candidates")?;

        let pool = pools
            .into_iter()
            .find(|p| p.id == pool_id)
            .with_context(|| format!("Talent pool {} not found", pool_id))?;
        let members: Vec<Candidate> = pool_members(&pool, &candidates)
            .into_iter()
            .cloned()
            .collect();

        info!("Pool {} has {} members", pool.name, members.len());
        Ok((pool, members))
    }

    /// Every talent pool with its current member count
    pub async fn pool_sizes(&self) -> Result<Vec<(TalentPool, usize)>> {
        let (pools, candidates) =
            tokio::join!(self.actor.fetch_talent_pools(), self.actor.fetch_candidates());
        let pools = pools.context("Failed to fetch talent pools")?;
        let candidates = candidates.context("Failed to fetch candidates")?;

        Ok(pools
            .into_iter()
            .map(|pool| {
                let size = pool_size(&pool, &candidates);
                (pool, size)
            })
            .collect())
    }

    /// The kanban board, optionally restricted to some jobs.
    ///
    /// `job_filter` is a job id or a piece of a job title.
    #[instrument(skip(self))]
    pub async fn pipeline_board(&self, job_filter: Option<&str>) -> Result<BoardView> {
        let (entries, jobs, candidates) = tokio::join!(
            self.actor.fetch_pipeline_entries(),
            self.actor.fetch_job_listings(),
            self.actor.fetch_candidates()
        );
        let entries = entries.context("Failed to fetch pipeline entries")?;
        let jobs = jobs.context("Failed to fetch job listings")?;
        let candidates = candidates.context("Failed to fetch candidates")?;

        let jobs_by_id: HashMap<&str, &JobListing> =
            jobs.iter().map(|job| (job.id.as_str(), job)).collect();
        let names_by_id: HashMap<&str, &str> = candidates
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str()))
            .collect();
        let lookup = |id: &str| jobs_by_id.get(id).copied();

        let filter = job_filter.map(|input| JobFilter::parse(input, jobs_by_id.keys().copied()));
        let board = PipelineBoard::build(&entries, filter.as_ref(), lookup);

        let columns = board
            .columns()
            .map(|(stage, entries)| {
                let cards = entries
                    .iter()
                    .map(|entry| BoardCard {
                        entry: (*entry).clone(),
                        candidate_name: names_by_id
                            .get(entry.candidate_id.as_str())
                            .map(|name| name.to_string())
                            .unwrap_or_else(|| entry.candidate_id.clone()),
                        job_title: lookup(entry.job_id.as_str())
                            .map(|job| job.title.clone())
                            .unwrap_or_else(|| entry.job_id.clone()),
                    })
                    .collect();
                (stage, cards)
            })
            .collect();

        info!("Pipeline board has {} entries", board.total());
        Ok(BoardView {
            columns,
            job_titles: job_titles(&entries, lookup)
                .into_iter()
                .map(String::from)
                .collect(),
        })
    }

    /// Put a candidate on a job's pipeline, starting in `Sourced`
    #[instrument(skip(self))]
    pub async fn add_to_pipeline(&self, candidate_id: &str, job_id: &str) -> Result<PipelineEntry> {
        let entry_id = self
            .actor
            .create_pipeline_entry(candidate_id, job_id, Stage::Sourced)
            .await
            .with_context(|| {
                format!("Failed to add candidate {} to job {}", candidate_id, job_id)
            })?;

        info!("Added candidate {} to job {} as {}", candidate_id, job_id, entry_id);
        Ok(create_entry(entry_id, candidate_id, job_id))
    }

    pub async fn advance(&self, entry_id: &str) -> Result<Transition> {
        self.move_entry(entry_id, StageAction::Advance).await
    }

    pub async fn regress(&self, entry_id: &str) -> Result<Transition> {
        self.move_entry(entry_id, StageAction::Regress).await
    }

    pub async fn reject(&self, entry_id: &str) -> Result<Transition> {
        self.move_entry(entry_id, StageAction::Reject).await
    }

    #[instrument(skip(self))]
    async fn move_entry(&self, entry_id: &str, action: StageAction) -> Result<Transition> {
        let entries = self
            .actor
            .fetch_pipeline_entries()
            .await
            .context("Failed to fetch pipeline entries")?;
        let mut entry = entries
            .into_iter()
            .find(|e| e.id == entry_id)
            .with_context(|| format!("Pipeline entry {} not found", entry_id))?;

        let (transition, change) = StageMachine::apply(&mut entry, action);
        if let Some(change) = change {
            self.actor
                .update_pipeline_stage(&change.entry_id, change.to)
                .await
                .with_context(|| format!("Failed to store stage of {}", entry_id))?;
        }
        Ok(transition)
    }

    #[instrument(skip(self))]
    pub async fn set_availability(
        &self,
        candidate_id: &str,
        status: AvailabilityStatus,
    ) -> Result<()> {
        self.actor
            .update_availability(candidate_id, status)
            .await
            .with_context(|| format!("Failed to update availability of {}", candidate_id))?;
        info!("Candidate {} is now {}", candidate_id, status);
        Ok(())
    }

    pub async fn roster_summary(&self) -> Result<RosterSummary> {
        let candidates = self
            .actor
            .fetch_candidates()
            .await
            .context("Failed to fetch candidates")?;
        Ok(RosterSummary::build(&candidates, DEFAULT_TOP_SUBJECTS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorResult, InMemoryActor};
    use data_loader::{DataIndex, EmploymentType, EntryId, JobStatus, WorkPermitStatus};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn candidate(id: &str, name: &str, subjects: &[&str], visible: bool) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: name.to_string(),
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            grades: vec!["Grade 11".to_string(), "Grade 12".to_string()],
            qualifications: vec![],
            certifications: vec![],
            years_experience: 8,
            country: "South Africa".to_string(),
            nationality: "South African".to_string(),
            work_permit_status: WorkPermitStatus::Citizen,
            employment_type: EmploymentType::FullTime,
            availability_status: AvailabilityStatus::Available,
            profile_visible: visible,
        }
    }

    fn job(id: &str, title: &str) -> JobListing {
        JobListing {
            id: id.to_string(),
            title: title.to_string(),
            region: "Gauteng".to_string(),
            country: "South Africa".to_string(),
            school_type: "Independent".to_string(),
            role_overview: String::new(),
            subjects_needed: vec![],
            grades_needed: vec![],
            status: JobStatus::Open,
        }
    }

    fn entry(id: &str, candidate_id: &str, job_id: &str, stage: Stage) -> PipelineEntry {
        PipelineEntry {
            id: id.to_string(),
            candidate_id: candidate_id.to_string(),
            job_id: job_id.to_string(),
            stage,
        }
    }

    fn build_test_index() -> DataIndex {
        DataIndex::from_records(
            vec![
                candidate("t1", "James Mokoena", &["Mathematics", "Physics"], true),
                candidate("t2", "Lerato Dlamini", &["Mathematics", "Physics", "Chemistry"], true),
                candidate("t3", "Hidden Teacher", &["Mathematics", "Physics", "Chemistry"], false),
                candidate("t4", "Anna Schmidt", &["German"], true),
            ],
            vec![job("j1", "Senior Mathematics Teacher"), job("j2", "German Teacher")],
            vec![
                entry("pe1", "t1", "j1", Stage::Interview),
                entry("pe2", "t4", "j2", Stage::Placed),
                entry("pe3", "t2", "j1", Stage::Screening),
            ],
            vec![TalentPool {
                id: "pool1".to_string(),
                name: "Science".to_string(),
                description: String::new(),
                filters: r#"{"subjects":["Chemistry"]}"#.to_string(),
            }],
        )
        .unwrap()
    }

    fn service() -> MarketplaceService<InMemoryActor> {
        MarketplaceService::new(Arc::new(InMemoryActor::new(build_test_index())))
    }

    /// Counts stage writes on top of an in-memory actor
    struct CountingActor {
        inner: InMemoryActor,
        stage_writes: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl DataActor for CountingActor {
        async fn fetch_candidates(&self) -> ActorResult<Vec<Candidate>> {
            self.inner.fetch_candidates().await
        }

        async fn fetch_job_listings(&self) -> ActorResult<Vec<JobListing>> {
            self.inner.fetch_job_listings().await
        }

        async fn fetch_pipeline_entries(&self) -> ActorResult<Vec<PipelineEntry>> {
            self.inner.fetch_pipeline_entries().await
        }

        async fn fetch_talent_pools(&self) -> ActorResult<Vec<TalentPool>> {
            self.inner.fetch_talent_pools().await
        }

        async fn create_pipeline_entry(
            &self,
            candidate_id: &str,
            job_id: &str,
            stage: Stage,
        ) -> ActorResult<EntryId> {
            self.inner.create_pipeline_entry(candidate_id, job_id, stage).await
        }

        async fn update_pipeline_stage(&self, entry_id: &str, stage: Stage) -> ActorResult<()> {
            self.stage_writes.fetch_add(1, Ordering::SeqCst);
            self.inner.update_pipeline_stage(entry_id, stage).await
        }

        async fn update_availability(
            &self,
            candidate_id: &str,
            status: AvailabilityStatus,
        ) -> ActorResult<()> {
            self.inner.update_availability(candidate_id, status).await
        }
    }

    // ============================================================================
    // Search
    // ============================================================================

    #[tokio::test]
    async fn test_search_ranks_and_hides() {
        let service = service();
        let criteria = FilterCriteria::new().with_subjects(["Mathematics", "Physics", "Chemistry"]);

        let hits = service.search_candidates(criteria, None).await.unwrap();
        let ranked: Vec<(&str, u8)> = hits
            .iter()
            .map(|hit| (hit.candidate.id.as_str(), hit.score))
            .collect();

        assert_eq!(ranked, vec![("t2", 100), ("t1", 67)]);
    }

    #[tokio::test]
    async fn test_search_limit() {
        let service = service().with_default_limit(2);

        let hits = service.search_candidates(FilterCriteria::new(), None).await.unwrap();
        assert_eq!(hits.len(), 2);

        let hits = service.search_candidates(FilterCriteria::new(), Some(1)).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].candidate.id, "t1");
    }

    #[tokio::test]
    async fn test_keyword_lookup_includes_hidden() {
        let service = service();
        let query = CandidateQuery {
            text: Some("hidden".to_string()),
            ..Default::default()
        };

        let found = service.find_candidates(&query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(service.candidate("t404").await.is_err());
    }

    // ============================================================================
    // Talent pools
    // ============================================================================

    #[tokio::test]
    async fn test_pools() {
        let service = service();

        let (pool, members) = service.pool_members("pool1").await.unwrap();
        assert_eq!(pool.name, "Science");
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, "t2");

        let sizes = service.pool_sizes().await.unwrap();
        assert_eq!(sizes[0].1, 1);

        assert!(service.pool_members("pool404").await.is_err());
    }

    // ============================================================================
    // Pipeline
    // ============================================================================

    #[tokio::test]
    async fn test_board_with_title_filter() {
        let service = service();

        let board = service.pipeline_board(Some("mathematics")).await.unwrap();
        assert_eq!(board.column(Stage::Interview).len(), 1);
        assert_eq!(board.column(Stage::Interview)[0].candidate_name, "James Mokoena");
        assert!(board.column(Stage::Placed).is_empty());

        let everything = service.pipeline_board(None).await.unwrap();
        assert_eq!(everything.column(Stage::Placed)[0].job_title, "German Teacher");
        assert_eq!(
            everything.job_titles,
            vec!["Senior Mathematics Teacher".to_string(), "German Teacher".to_string()]
        );
    }

    #[tokio::test]
    async fn test_board_with_id_filter() {
        let service = service();

        let board = service.pipeline_board(Some("j2")).await.unwrap();
        let total: usize = board.stage_counts().iter().map(|(_, n)| n).sum();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_stage_moves_write_only_on_change() {
        let actor = Arc::new(CountingActor {
            inner: InMemoryActor::new(build_test_index()),
            stage_writes: AtomicUsize::new(0),
        });
        let service = MarketplaceService::new(actor.clone());

        let moved = service.advance("pe1").await.unwrap();
        assert_eq!(moved, Transition::Moved { from: Stage::Interview, to: Stage::Offer });

        // Placed entries ignore every action
        assert_eq!(service.advance("pe2").await.unwrap(), Transition::Unchanged(Stage::Placed));
        assert_eq!(service.reject("pe2").await.unwrap(), Transition::Unchanged(Stage::Placed));
        assert_eq!(service.regress("pe2").await.unwrap(), Transition::Unchanged(Stage::Placed));

        assert_eq!(actor.stage_writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reject_twice() {
        let service = service();

        assert!(service.reject("pe3").await.unwrap().is_moved());
        assert_eq!(
            service.reject("pe3").await.unwrap(),
            Transition::Unchanged(Stage::Rejected)
        );
        assert!(service.advance("pe404").await.is_err());
    }

    #[tokio::test]
    async fn test_add_to_pipeline() {
        let service = service();

        let entry = service.add_to_pipeline("t4", "j1").await.unwrap();
        assert_eq!(entry.stage, Stage::Sourced);

        let board = service.pipeline_board(None).await.unwrap();
        assert_eq!(board.column(Stage::Sourced).len(), 1);
        assert_eq!(board.column(Stage::Sourced)[0].entry.id, entry.id);

        assert!(service.add_to_pipeline("t404", "j1").await.is_err());
    }

    // ============================================================================
    // Profiles and analytics
    // ============================================================================

    #[tokio::test]
    async fn test_set_availability_and_summary() {
        let service = service();

        service.set_availability("t1", AvailabilityStatus::Placed).await.unwrap();
        assert!(service.set_availability("t404", AvailabilityStatus::Placed).await.is_err());

        let summary = service.roster_summary().await.unwrap();
        assert_eq!(summary.total_candidates, 4);
        assert_eq!(summary.availability[0], (AvailabilityStatus::Available, 3));
        assert_eq!(summary.availability[2], (AvailabilityStatus::Placed, 1));
    }
}
