//! Personalization adjustment and ranking
//!
//! Applied after all generators have run: first the concatenated list is
//! adjusted to the learner's stated preferences, then each recommendation
//! gets a numeric relevance score and the list is stably sorted on it.
//! Ties keep their generation order; no secondary sort key exists.
//!
//! Both the time-budget compression and the time-feasibility bonus apply
//! only when the learner has actually stated a weekly budget; the default
//! profile covers pace and experience scaling, not these.

use std::cmp::Reverse;

use crate::models::personalization::{Motivation, PersonalizationFactors};

use super::types::{Priority, Recommendation, RecommendationType};

/// Note appended when an estimate is compressed to fit the weekly budget
const SPLIT_SESSIONS_NOTE: &str =
    " Consider splitting this into multiple sessions across the week.";

/// Resource-richness bonus per attached resource
const RESOURCE_BONUS: u32 = 5;

/// Cap on the total resource-richness bonus
const RESOURCE_BONUS_CAP: u32 = 20;

/// Adjust generated recommendations to the learner's stated preferences:
/// - estimates larger than twice the weekly budget shrink to 1.5x the
///   budget, with a session-splitting note appended
/// - certification-motivated learners get practice recommendations bumped
///   to high priority
///
/// No-op when the learner stated no preferences.
pub fn apply_personalization(
    recommendations: &mut [Recommendation],
    stated: Option<&PersonalizationFactors>,
) {
    let Some(factors) = stated else {
        return;
    };
    let budget = factors.available_time_per_week;

    for rec in recommendations.iter_mut() {
        if (rec.estimated_time_minutes as f64) > budget * 2.0 {
            rec.estimated_time_minutes = (budget * 1.5).round() as u32;
            rec.description.push_str(SPLIT_SESSIONS_NOTE);
        }

        if factors.motivation == Motivation::Certification
            && rec.rec_type == RecommendationType::Practice
        {
            rec.priority = Priority::High;
        }
    }
}

/// Relevance score for one recommendation.
///
/// Base comes from the priority tag; bonuses reward the action type most
/// appropriate to the overall score band, time feasibility against a known
/// weekly budget, and resource richness.
pub fn relevance_score(
    rec: &Recommendation,
    overall_score: f64,
    weekly_budget: Option<f64>,
) -> u32 {
    let mut score = rec.priority.base_score();

    score += match rec.rec_type {
        RecommendationType::Study if overall_score < 60.0 => 50,
        RecommendationType::Practice if (60.0..80.0).contains(&overall_score) => 40,
        RecommendationType::Advance if overall_score >= 80.0 => 30,
        _ => 0,
    };

    if let Some(budget) = weekly_budget {
        let time = rec.estimated_time_minutes as f64;
        if time <= budget {
            score += 20;
        } else if time <= budget * 2.0 {
            score += 10;
        }
    }

    score += (rec.resources.len() as u32 * RESOURCE_BONUS).min(RESOURCE_BONUS_CAP);

    score
}

/// Stable sort, highest relevance first. Equal scores keep the order the
/// generators produced them in.
pub fn rank(
    recommendations: &mut [Recommendation],
    overall_score: f64,
    weekly_budget: Option<f64>,
) {
    recommendations
        .sort_by_key(|rec| Reverse(relevance_score(rec, overall_score, weekly_budget)));
}
