//! Qualification types
//!
//! A qualification is a credential a learner can pursue: it carries the
//! passing bar, the expected time investment, prerequisite links, and the
//! retake policy that governs failed attempts.

use serde::{Deserialize, Serialize};

/// Difficulty tier of a qualification or learning resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    /// Get display label for the difficulty tier
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }

    /// The next tier up, if any
    pub fn next(&self) -> Option<Difficulty> {
        match self {
            Self::Beginner => Some(Self::Intermediate),
            Self::Intermediate => Some(Self::Advanced),
            Self::Advanced => Some(Self::Expert),
            Self::Expert => None,
        }
    }

    /// Get all tiers in ascending order
    pub fn all() -> Vec<Difficulty> {
        vec![
            Self::Beginner,
            Self::Intermediate,
            Self::Advanced,
            Self::Expert,
        ]
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }
}

/// Retake policy for failed attempts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetakePolicy {
    /// Whether failed attempts may be retaken at all
    pub allow_retakes: bool,
    /// Mandatory wait in hours between a failed attempt and a retake
    pub retake_cooldown_hours: f64,
}

impl Default for RetakePolicy {
    fn default() -> Self {
        Self {
            allow_retakes: true,
            retake_cooldown_hours: 24.0,
        }
    }
}

/// A credential a learner can pursue on the platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Qualification {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Subject category (e.g. "mathematics")
    pub category: String,
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// Minimum score (0-100) required to pass
    pub passing_score: f64,
    /// Estimated time to complete the full assessment, in minutes
    pub estimated_duration_minutes: u32,
    /// Qualification IDs that should be completed first
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Policy governing failed attempts
    #[serde(default)]
    pub retake_policy: RetakePolicy,
}
