//! Recommendation generation
//!
//! The pipeline that turns an assessment outcome into a ranked list of
//! learning recommendations:
//! - `types` defines the recommendation shape and the generation context
//! - `engine` runs the four generators and assembles the final list
//! - `pacing` scales study-time estimates to the learner's profile
//! - `ranking` applies time-budget adjustments and relevance ordering

pub mod engine;
pub mod pacing;
pub mod ranking;
pub mod types;
