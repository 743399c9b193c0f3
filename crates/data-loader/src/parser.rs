//! Parser for marketplace snapshot files.
//!
//! A snapshot is a directory of JSON arrays as returned by the data actor's
//! fetch-all operations:
//! - candidates.json: teacher profiles
//! - jobs.json: job listings
//! - pipeline.json: recruitment pipeline entries
//! - pools.json: talent pools (optional)
//!
//! Field names are camelCase and enum values use their display labels
//! ("Full-Time", "EU Citizen", ...).

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole file, mapping a missing file to `FileNotFound`
fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Parse a JSON array of records from a string.
///
/// `file` is only used to give parse errors some context.
pub fn parse_records<T: DeserializeOwned>(file: &str, content: &str) -> Result<Vec<T>> {
    serde_json::from_str(content).map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = read_file(path)?;
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_records(&file, &content)
}

/// Parse the candidates.json file
pub fn parse_candidates(path: &Path) -> Result<Vec<Candidate>> {
    parse_file(path)
}

/// Parse the jobs.json file
pub fn parse_jobs(path: &Path) -> Result<Vec<JobListing>> {
    parse_file(path)
}

/// Parse the pipeline.json file
pub fn parse_pipeline_entries(path: &Path) -> Result<Vec<PipelineEntry>> {
    parse_file(path)
}

/// Parse the pools.json file. A missing file means the snapshot has no pools.
pub fn parse_talent_pools(path: &Path) -> Result<Vec<TalentPool>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    parse_file(path)
}

/// Write records as a pretty-printed JSON array, replacing the file
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).map_err(|e| DataLoadError::ParseError {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    fs::write(path, json)?;
    Ok(())
}
