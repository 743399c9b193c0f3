//! Server crate for the classmatch marketplace.
//!
//! This crate contains the data actor abstraction and the service that
//! coordinates it with the search and recruitment logic.

pub mod actor;
pub mod orchestrator;

pub use actor::{ActorError, ActorResult, DataActor, InMemoryActor};
pub use orchestrator::{BoardCard, BoardView, MarketplaceService, SearchHit, DEFAULT_SEARCH_LIMIT};
