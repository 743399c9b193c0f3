//! Kanban view of the recruitment pipeline.

use data_loader::{JobId, JobListing, PipelineEntry, Stage};
use serde::Serialize;
use std::collections::HashSet;

/// Restricts the board to some jobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobFilter {
    /// Exactly this job
    Id(JobId),
    /// Jobs whose title contains the text, ignoring case
    Title(String),
}

impl JobFilter {
    /// Parse user input: a known job id selects that job, anything else is
    /// a title search.
    pub fn parse<'a>(input: &str, mut job_ids: impl Iterator<Item = &'a str>) -> Self {
        let input = input.trim();
        if job_ids.any(|id| id == input) {
            JobFilter::Id(input.to_string())
        } else {
            JobFilter::Title(input.to_string())
        }
    }

    pub fn matches(&self, job: &JobListing) -> bool {
        match self {
            JobFilter::Id(id) => job.id == *id,
            JobFilter::Title(text) => job.title.to_lowercase().contains(&text.to_lowercase()),
        }
    }
}

/// Entries in `stage`, restricted to jobs passing `filter` when one is given.
///
/// `job_lookup` resolves an entry's job; entries whose job is unknown never
/// pass a filter.
pub fn entries_by_stage<'a, 'j>(
    entries: &'a [PipelineEntry],
    stage: Stage,
    filter: Option<&JobFilter>,
    job_lookup: impl Fn(&str) -> Option<&'j JobListing>,
) -> Vec<&'a PipelineEntry> {
    entries
        .iter()
        .filter(|entry| entry.stage == stage)
        .filter(|entry| match filter {
            Some(filter) => {
                job_lookup(entry.job_id.as_str()).is_some_and(|job| filter.matches(job))
            }
            None => true,
        })
        .collect()
}

/// One column per stage, entries in their original order
#[derive(Debug, Clone, Serialize)]
pub struct PipelineBoard<'a> {
    columns: Vec<(Stage, Vec<&'a PipelineEntry>)>,
}

impl<'a> PipelineBoard<'a> {
    pub fn build<'j>(
        entries: &'a [PipelineEntry],
        filter: Option<&JobFilter>,
        job_lookup: impl Fn(&str) -> Option<&'j JobListing>,
    ) -> Self {
        let columns = Stage::ALL
            .iter()
            .map(|&stage| (stage, entries_by_stage(entries, stage, filter, &job_lookup)))
            .collect();
        Self { columns }
    }

    pub fn column(&self, stage: Stage) -> &[&'a PipelineEntry] {
        self.columns
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or(&[])
    }

    pub fn columns(&self) -> impl Iterator<Item = (Stage, &[&'a PipelineEntry])> {
        self.columns.iter().map(|(stage, entries)| (*stage, entries.as_slice()))
    }

    /// Funnel counts, in stage order
    pub fn stage_counts(&self) -> Vec<(Stage, usize)> {
        self.columns
            .iter()
            .map(|(stage, entries)| (*stage, entries.len()))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(|(_, entries)| entries.len()).sum()
    }
}

/// Unique job titles of the entries, first-seen order, for the job selector
pub fn job_titles<'j>(
    entries: &[PipelineEntry],
    job_lookup: impl Fn(&str) -> Option<&'j JobListing>,
) -> Vec<&'j str> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter_map(|entry| job_lookup(entry.job_id.as_str()))
        .map(|job| job.title.as_str())
        .filter(|title| seen.insert(*title))
        .collect()
}
