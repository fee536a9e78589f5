//! Data models module
//!
//! Contains the domain entities consumed by the recommendation engine:
//! - Qualification and difficulty types
//! - Assessment result types
//! - Learner progress and preference types
//! - Learning resource types

pub mod assessment;
pub mod personalization;
pub mod progress;
pub mod qualification;
pub mod resource;
