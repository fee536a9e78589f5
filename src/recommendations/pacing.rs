//! Study-time estimation helpers
//!
//! Pure scaling functions shared by the generators: study time from a score
//! gap, and preparation time ahead of a retake.

use crate::models::personalization::PersonalizationFactors;

/// Floor for any study-time estimate, in minutes
const MIN_STUDY_MINUTES: f64 = 30.0;

/// Floor for retake-preparation time, in minutes
const MIN_RETAKE_PREP_MINUTES: f64 = 60.0;

/// Estimate study time in minutes for closing a score gap.
///
/// Base is `max(30, gap * 2)` minutes, scaled by the learner's pace and
/// experience multipliers.
pub fn estimate_study_time(score_gap_points: f64, factors: &PersonalizationFactors) -> u32 {
    let base = (score_gap_points * 2.0).max(MIN_STUDY_MINUTES);
    let scaled = base
        * factors.preferred_pace.multiplier()
        * factors.experience_level.multiplier();
    scaled.round() as u32
}

/// Suggested preparation minutes ahead of a retake, from the points still
/// needed to pass: `max(60, points * 4)`.
pub fn retake_prep_minutes(points_needed: f64) -> u32 {
    (points_needed * 4.0).max(MIN_RETAKE_PREP_MINUTES).round() as u32
}
