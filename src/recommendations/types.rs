//! Recommendation types
//!
//! Data structures for representing next-step learning recommendations and
//! the per-call context they are generated from.

use serde::{Deserialize, Serialize};

use crate::analytics::ProgressAnalytics;
use crate::models::assessment::AssessmentResult;
use crate::models::personalization::PersonalizationFactors;
use crate::models::progress::UserProgress;
use crate::models::qualification::Qualification;
use crate::models::resource::LearningResource;

/// Kind of next-step action being recommended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    /// Focused study of a topic or category
    Study,
    /// Practice drills or practice assessments
    Practice,
    /// Move on to a further qualification
    Advance,
    /// Retake the failed assessment
    Retake,
}

impl RecommendationType {
    /// Get display label for the recommendation type
    pub fn label(&self) -> &'static str {
        match self {
            Self::Study => "Study",
            Self::Practice => "Practice",
            Self::Advance => "Advance",
            Self::Retake => "Retake",
        }
    }
}

/// Initial urgency tag assigned by the generators. Feeds the numeric
/// relevance score; final ordering is by score, never by this tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Base contribution to the relevance score
    pub fn base_score(&self) -> u32 {
        match self {
            Self::High => 100,
            Self::Medium => 60,
            Self::Low => 30,
        }
    }

    /// Get display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// A single actionable recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    /// Kind of action
    pub rec_type: RecommendationType,
    /// Short title
    pub title: String,
    /// Detailed description; personalization may append notes here
    pub description: String,
    /// Urgency tag assigned at generation time
    pub priority: Priority,
    /// Estimated time investment in minutes; may be compressed to fit the
    /// learner's weekly budget
    pub estimated_time_minutes: u32,
    /// Supporting learning resources (at most 5 after tailoring)
    pub resources: Vec<LearningResource>,
    /// Category this recommendation targets, when category-scoped
    pub category: Option<String>,
    /// Qualification the recommendation applies to. Differs from the
    /// current qualification for advancement suggestions.
    pub qualification_id: String,
}

/// Immutable per-call input to the recommendation engine.
///
/// Built by the caller from persisted assessment and progress records;
/// generation never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationContext {
    /// Learner identity (opaque to the engine beyond catalog lookups)
    pub user_id: String,
    /// The qualification being pursued
    pub qualification: Qualification,
    /// Outcome of the most recent attempt
    pub assessment_result: AssessmentResult,
    /// Cumulative progress for this qualification
    pub user_progress: UserProgress,
    /// Derived performance signals
    pub progress_analytics: ProgressAnalytics,
    /// Stated preferences, if the learner has provided any
    pub personalization: Option<PersonalizationFactors>,
}

impl RecommendationContext {
    /// The preference bundle to use for this call: the learner's stated
    /// factors, or the default profile when none were provided.
    pub fn factors(&self) -> PersonalizationFactors {
        self.personalization.clone().unwrap_or_default()
    }
}
