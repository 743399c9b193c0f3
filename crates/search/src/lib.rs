//! Search relevance engine for the teacher marketplace.
//!
//! This crate provides:
//! - `FilterCriteria`, the selections a searching user makes
//! - Filter trait and one implementation per criteria dimension
//! - FilterPipeline for composing filters
//! - `matches_filters` (hard filter) and `compute_match_score` (0-100 score)
//! - Ranking, talent pool membership, keyword search and roster analytics
//!
//! ## Architecture
//! Each dimension is a filter that can both reject a candidate and tally how
//! many of its selected items the candidate satisfies. The standard pipeline
//! runs every dimension and then hides invisible profiles:
//! 1. Filters remove candidates that miss any constrained dimension
//! 2. Tallies are summed into a `MatchBreakdown`
//! 3. The breakdown becomes a rounded percentage used for ranking
//!
//! ## Example Usage
//! ```ignore
//! use search::{FilterCriteria, rank_candidates};
//!
//! let criteria = FilterCriteria::new()
//!     .with_subjects(["Mathematics", "Physics"])
//!     .with_min_experience(5);
//!
//! for hit in rank_candidates(index.candidates(), &criteria) {
//!     println!("{} {}%", hit.candidate.name, hit.score);
//! }
//! ```

pub mod criteria;
pub mod traits;
pub mod scoring;
pub mod filters;
pub mod filter_pipeline;
pub mod relevance;
pub mod ranking;
pub mod talent_pool;
pub mod keyword;
pub mod analytics;

// Re-export main types
pub use criteria::FilterCriteria;
pub use traits::Filter;
pub use scoring::MatchBreakdown;
pub use filter_pipeline::{standard_pipeline, FilterPipeline};
pub use relevance::{compute_match_score, match_breakdown, matches_filters};
pub use ranking::{rank_candidates, top_candidates, RankedCandidate};
pub use talent_pool::{pool_members, pool_size, PoolCriteria};
pub use keyword::{search_candidates, search_jobs, CandidateQuery, JobQuery};
pub use analytics::{RosterSummary, DEFAULT_TOP_SUBJECTS};
