//! Server crate for the ReelRecs recommendation engine.
//!
//! This crate wires the catalog, the similarity matrix, the poster resolver
//! and the activity logs together behind one orchestrator.

pub mod activity;
pub mod config;
pub mod orchestrator;

pub use activity::{ActivityError, ActivityLog, RecommendationRecord, UserActionRecord};
pub use config::Settings;
pub use orchestrator::{MovieRecommendation, RecommendationOrchestrator, RecommendationReport};
pub use pipeline::NOT_FOUND;
