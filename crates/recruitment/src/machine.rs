//! Stage transitions of a pipeline entry.
//!
//! Entries move along `Stage::PROGRESSION` one step at a time, or leave it
//! for `Rejected`. `Placed` and `Rejected` are terminal. A transition that is
//! not allowed leaves the entry untouched and is reported as
//! `Transition::Unchanged`, never as an error.

use data_loader::{CandidateId, EntryId, JobId, PipelineEntry, Stage};
use serde::Serialize;
use std::fmt;
use tracing::info;

/// A move requested by a recruiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageAction {
    Advance,
    Regress,
    Reject,
}

impl fmt::Display for StageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageAction::Advance => "advance",
            StageAction::Regress => "regress",
            StageAction::Reject => "reject",
        };
        f.write_str(name)
    }
}

/// Outcome of applying a `StageAction`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: Stage, to: Stage },
    /// The action was not allowed; carries the stage the entry stays in
    Unchanged(Stage),
}

impl Transition {
    pub fn is_moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }

    /// Stage the entry is in after the action
    pub fn stage(&self) -> Stage {
        match *self {
            Transition::Moved { to, .. } => to,
            Transition::Unchanged(stage) => stage,
        }
    }
}

/// Emitted for every successful move
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageChange {
    pub entry_id: EntryId,
    pub candidate_id: CandidateId,
    pub job_id: JobId,
    pub from: Stage,
    pub to: Stage,
}

impl StageChange {
    fn notify(&self) {
        info!(
            entry = %self.entry_id,
            candidate = %self.candidate_id,
            job = %self.job_id,
            "Pipeline entry moved from {} to {}",
            self.from,
            self.to
        );
    }
}

pub struct StageMachine;

impl StageMachine {
    /// Stage reached by `action` from `stage`, `None` if not allowed.
    pub fn next_stage(stage: Stage, action: StageAction) -> Option<Stage> {
        if stage.is_terminal() {
            return None;
        }
        match action {
            StageAction::Reject => Some(Stage::Rejected),
            StageAction::Advance => {
                let index = stage.progression_index()?;
                Stage::PROGRESSION.get(index + 1).copied()
            }
            StageAction::Regress => {
                let index = stage.progression_index()?;
                index.checked_sub(1).map(|prev| Stage::PROGRESSION[prev])
            }
        }
    }

    /// Apply `action` to `entry` in place.
    ///
    /// Returns the change notification alongside the transition when the
    /// entry moved.
    pub fn apply(
        entry: &mut PipelineEntry,
        action: StageAction,
    ) -> (Transition, Option<StageChange>) {
        let from = entry.stage;
        match Self::next_stage(from, action) {
            Some(to) => {
                entry.stage = to;
                let change = StageChange {
                    entry_id: entry.id.clone(),
                    candidate_id: entry.candidate_id.clone(),
                    job_id: entry.job_id.clone(),
                    from,
                    to,
                };
                change.notify();
                (Transition::Moved { from, to }, Some(change))
            }
            None => {
                tracing::debug!("Ignoring {} on entry {} in {}", action, entry.id, from);
                (Transition::Unchanged(from), None)
            }
        }
    }
}

/// A new entry for `candidate_id` on `job_id`, starting in `Sourced`
pub fn create_entry(
    id: impl Into<EntryId>,
    candidate_id: impl Into<CandidateId>,
    job_id: impl Into<JobId>,
) -> PipelineEntry {
    PipelineEntry {
        id: id.into(),
        candidate_id: candidate_id.into(),
        job_id: job_id.into(),
        stage: Stage::default(),
    }
}
