//! Learner progress types
//!
//! Cumulative per-qualification state: attempt history and timing, used by
//! the retake cooldown logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cumulative progress for a learner on one qualification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProgress {
    /// Qualification this progress belongs to
    pub qualification_id: String,
    /// Number of attempts made so far
    pub attempt_count: u32,
    /// Timestamp of the most recent attempt, if any
    pub last_attempt_at: Option<DateTime<Utc>>,
    /// Best score achieved across attempts
    pub best_score: Option<f64>,
}

impl UserProgress {
    /// Create fresh progress with no attempts recorded
    pub fn new(qualification_id: String) -> Self {
        Self {
            qualification_id,
            attempt_count: 0,
            last_attempt_at: None,
            best_score: None,
        }
    }

    /// Hours elapsed since the last attempt, relative to `now`.
    /// `None` when no attempt has been recorded.
    pub fn hours_since_last_attempt(&self, now: DateTime<Utc>) -> Option<f64> {
        self.last_attempt_at
            .map(|last| (now - last).num_minutes() as f64 / 60.0)
    }

    /// Record an attempt at `at` with the given score
    pub fn record_attempt(&mut self, at: DateTime<Utc>, score: f64) {
        self.attempt_count += 1;
        self.last_attempt_at = Some(at);
        self.best_score = Some(match self.best_score {
            Some(best) => best.max(score),
            None => score,
        });
    }
}
