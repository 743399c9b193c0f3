//! Recruitment pipeline for the teacher marketplace.
//!
//! This crate provides:
//! - `StageMachine`: legal moves of a pipeline entry between stages
//! - `PipelineBoard`: entries bucketed into one column per stage
//!
//! ## Example Usage
//! ```ignore
//! use recruitment::{StageAction, StageMachine};
//!
//! let (transition, change) = StageMachine::apply(&mut entry, StageAction::Advance);
//! if let Some(change) = change {
//!     actor.update_pipeline_stage(&change.entry_id, change.to).await?;
//! }
//! ```

pub mod machine;
pub mod board;

// Re-export main types
pub use machine::{create_entry, StageAction, StageChange, StageMachine, Transition};
pub use board::{entries_by_stage, job_titles, JobFilter, PipelineBoard};
