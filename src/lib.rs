//! Studypath - Personalized Learning Recommendations
//!
//! This library turns assessment outcomes into ranked, personalized learning
//! recommendations. It handles:
//! - Weak-area and mastery analysis over assessment history
//! - Study, practice, advancement, and retake recommendation generation
//! - Personalization by learning style, pace, experience, and time budget
//! - Relevance scoring and ranking of the final list
//! - A SQLite-backed qualification catalog and resource library

pub mod analytics;
pub mod catalog;
pub mod models;
pub mod recommendations;
pub mod resources;

pub use catalog::QualificationCatalog;
pub use recommendations::engine::generate_recommendations;
pub use recommendations::types::{Recommendation, RecommendationContext};
pub use resources::ResourceLibrary;

/// Error type for catalog and resource lookups
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Storage error: {0}")]
    Storage(#[from] catalog::sqlite::StoreError),

    #[error("Lookup backend unavailable: {0}")]
    Unavailable(String),
}
