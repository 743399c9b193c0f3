//! Ranking of search results.
//!
//! Filter with the standard pipeline, score every survivor in parallel, then
//! sort by descending score. The sort is stable and the parallel collect keeps
//! input order, so equal scores stay in the order the roster listed them.

use crate::criteria::FilterCriteria;
use crate::filter_pipeline::standard_pipeline;
use crate::scoring::MatchBreakdown;
use data_loader::Candidate;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Reverse;

/// A search hit with its score
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate<'a> {
    pub candidate: &'a Candidate,
    pub score: u8,
    pub breakdown: MatchBreakdown,
}

/// Filter, score and order candidates for a search.
pub fn rank_candidates<'a>(
    candidates: &'a [Candidate],
    criteria: &FilterCriteria,
) -> Vec<RankedCandidate<'a>> {
    let pipeline = standard_pipeline();
    let matching = pipeline.apply(candidates.iter().collect(), criteria);

    let mut ranked: Vec<RankedCandidate<'a>> = matching
        .into_par_iter()
        .map(|candidate| {
            let breakdown = pipeline.tally(candidate, criteria);
            RankedCandidate {
                candidate,
                score: breakdown.score(),
                breakdown,
            }
        })
        .collect();

    ranked.sort_by_key(|hit| Reverse(hit.score));
    tracing::debug!("Ranked {} of {} candidates", ranked.len(), candidates.len());
    ranked
}

/// `rank_candidates` cut down to the first `limit` hits
pub fn top_candidates<'a>(
    candidates: &'a [Candidate],
    criteria: &FilterCriteria,
    limit: usize,
) -> Vec<RankedCandidate<'a>> {
    let mut ranked = rank_candidates(candidates, criteria);
    ranked.truncate(limit);
    ranked
}
