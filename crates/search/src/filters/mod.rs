//! Filter implementations for candidate search.
//!
//! One filter per criteria dimension, plus the visibility gate. They can be
//! composed freely into a FilterPipeline; `FilterPipeline::standard` wires
//! all of them up in the usual order.

pub mod subjects;
pub mod grades;
pub mod status;
pub mod country;
pub mod experience;
pub mod visibility;

// Re-export for convenience
pub use subjects::SubjectFilter;
pub use grades::GradeFilter;
pub use status::{AvailabilityFilter, EmploymentTypeFilter, WorkPermitFilter};
pub use country::CountryFilter;
pub use experience::ExperienceFilter;
pub use visibility::VisibilityFilter;
