//! Assessment result types
//!
//! Outcome of a single assessment attempt: the overall score, pass/fail,
//! per-category score breakdown, and answer counts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of the most recent assessment attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentResult {
    /// Overall score (0-100)
    pub score: f64,
    /// Whether the attempt met the passing bar
    pub passed: bool,
    /// Per-category scores (category name -> 0-100). Ordered map so that
    /// downstream iteration order is deterministic across calls.
    #[serde(default)]
    pub category_scores: BTreeMap<String, f64>,
    /// Total number of questions in the assessment
    pub total_questions: u32,
    /// Number answered correctly
    pub correct_answers: u32,
    /// Number answered incorrectly
    pub incorrect_answers: u32,
}

impl AssessmentResult {
    /// Score for a category, falling back to the overall score when the
    /// category breakdown is missing or does not cover this category.
    pub fn category_score(&self, category: &str) -> f64 {
        self.category_scores
            .get(category)
            .copied()
            .unwrap_or(self.score)
    }

    /// Categories scoring in the moderate band [60, 80), in key order
    pub fn moderate_categories(&self) -> Vec<(String, f64)> {
        self.category_scores
            .iter()
            .filter(|(_, s)| (60.0..80.0).contains(*s))
            .map(|(c, s)| (c.clone(), *s))
            .collect()
    }

    /// Fraction of questions answered correctly (0.0 when empty)
    pub fn accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.correct_answers as f64 / self.total_questions as f64
        }
    }
}
