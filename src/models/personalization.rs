//! Learner preference types
//!
//! The personalization bundle used to scale study-time estimates, filter
//! resources, and weight the final ranking: learning style, pace, weekly
//! time budget, motivation, and experience level.

use serde::{Deserialize, Serialize};

/// Preferred learning modality, used to dispatch resource lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningStyle {
    Visual,
    Auditory,
    Kinesthetic,
    Reading,
}

impl LearningStyle {
    /// Get display label for the style
    pub fn label(&self) -> &'static str {
        match self {
            Self::Visual => "Visual",
            Self::Auditory => "Auditory",
            Self::Kinesthetic => "Kinesthetic",
            Self::Reading => "Reading",
        }
    }
}

/// Preferred study pace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    Slow,
    Moderate,
    Fast,
}

impl Pace {
    /// Multiplier applied to study-time estimates
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Slow => 1.5,
            Self::Moderate => 1.0,
            Self::Fast => 0.7,
        }
    }
}

/// Prior experience with the subject matter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[serde(rename = "none")]
    NoExperience,
    Beginner,
    #[serde(rename = "some")]
    SomeExperience,
    Experienced,
}

impl ExperienceLevel {
    /// Multiplier applied to study-time estimates
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::NoExperience => 1.3,
            Self::Beginner => 1.1,
            Self::SomeExperience => 1.0,
            Self::Experienced => 0.8,
        }
    }
}

/// Why the learner is here
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motivation {
    /// Working toward the credential itself
    Certification,
    /// General skill development
    SkillGrowth,
    /// Preparing for a career move
    CareerChange,
    /// Learning for its own sake
    Curiosity,
}

/// The full preference bundle for one learner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalizationFactors {
    /// Preferred learning modality
    pub learning_style: LearningStyle,
    /// Preferred study pace
    pub preferred_pace: Pace,
    /// Weekly study time budget
    pub available_time_per_week: f64,
    /// Stated motivation
    pub motivation: Motivation,
    /// Prior experience with the subject
    pub experience_level: ExperienceLevel,
}

impl Default for PersonalizationFactors {
    /// Profile substituted when a learner has stated no preferences
    fn default() -> Self {
        Self {
            learning_style: LearningStyle::Reading,
            preferred_pace: Pace::Moderate,
            available_time_per_week: 10.0,
            motivation: Motivation::Certification,
            experience_level: ExperienceLevel::SomeExperience,
        }
    }
}
