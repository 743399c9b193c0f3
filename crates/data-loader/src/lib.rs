//! # Data Loader Crate
//!
//! This crate holds the marketplace records and loads them from a snapshot
//! of the remote data actor.
//!
//! ## Main Components
//!
//! - **types**: Domain records (Candidate, JobListing, PipelineEntry, TalentPool),
//!   closed label enums and the in-memory `DataIndex`
//! - **parser**: Parse the snapshot's JSON files into Rust structs
//! - **index**: Build and validate the `DataIndex`
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_dir(Path::new("data/sample"))?;
//!
//! let teacher = index.get_candidate("t002").unwrap();
//! let placed = index
//!     .candidates()
//!     .iter()
//!     .filter(|c| c.availability_status == AvailabilityStatus::Placed)
//!     .count();
//!
//! println!("{} teaches {:?}; {} teachers placed", teacher.name, teacher.subjects, placed);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Identifiers
    CandidateId,
    EntryId,
    JobId,
    PoolId,
    // Records
    Candidate,
    JobListing,
    PipelineEntry,
    TalentPool,
    DataIndex,
    // Enums
    AvailabilityStatus,
    EmploymentType,
    JobStatus,
    Stage,
    WorkPermitStatus,
};
