//! Recommendation engine
//!
//! Core pipeline for turning an assessment outcome and accumulated learner
//! context into a ranked list of next-step recommendations. Runs four
//! generators in order (study, practice, advancement, retake), then the
//! shared personalization and ranking stages, then truncates to the cap.
//!
//! Generation never mutates the context. Collaborator lookup failures are
//! logged and degrade to empty lists; they never remove a recommendation.

use chrono::Utc;

use crate::catalog::QualificationCatalog;
use crate::models::personalization::PersonalizationFactors;
use crate::models::qualification::Difficulty;
use crate::resources::{self, ResourceLibrary};
use crate::LookupError;

use super::pacing::{estimate_study_time, retake_prep_minutes};
use super::ranking;
use super::types::{Priority, Recommendation, RecommendationContext, RecommendationType};

/// Thresholds for generator triggers
mod thresholds {
    /// Category score below this gets a high-urgency study recommendation
    pub const HIGH_URGENCY_BELOW: f64 = 50.0;
    /// Category score below this (and above the high bar) gets medium urgency
    pub const MEDIUM_URGENCY_BELOW: f64 = 70.0;
    /// Overall score below this adds a foundational study recommendation
    pub const FOUNDATIONAL_BELOW: f64 = 60.0;
    /// Overall score band that triggers a full practice assessment
    pub const FULL_PRACTICE_MIN: f64 = 60.0;
    pub const FULL_PRACTICE_MAX: f64 = 85.0;
    /// Overall score below this marks the lower difficulty tiers as weak
    pub const DIFFICULTY_WEAKNESS_BELOW: f64 = 70.0;
    /// Minimum passing score for advancement suggestions
    pub const ADVANCEMENT_MIN: f64 = 85.0;
    /// Minimum score for the career-opportunities suggestion
    pub const CAREER_MIN: f64 = 75.0;
    /// Retakes within this many points of passing are high priority
    pub const RETAKE_CLOSE_MARGIN: f64 = 10.0;
    /// Hard cap on returned recommendations
    pub const MAX_RECOMMENDATIONS: usize = 8;
    /// At most this many next-level qualifications are surfaced
    pub const MAX_NEXT_LEVEL: usize = 2;
}

/// Generate ranked next-step recommendations for one learner context.
///
/// Returns at most eight recommendations, each carrying at most five
/// resources. The list may be short or empty when nothing applies; that is
/// a valid outcome, not an error.
pub async fn generate_recommendations(
    context: &RecommendationContext,
    catalog: &dyn QualificationCatalog,
    library: &dyn ResourceLibrary,
) -> Vec<Recommendation> {
    let factors = context.factors();

    let mut recommendations = Vec::new();
    recommendations.extend(generate_study(context, catalog, library, &factors).await);
    recommendations.extend(generate_practice(context, library, &factors).await);
    recommendations.extend(generate_advancement(context, catalog, library, &factors).await);
    recommendations.extend(generate_retake(context, library, &factors).await);

    // Budget compression and motivation overrides honor only stated
    // preferences; scoring likewise treats the budget as known only when
    // the learner provided one.
    let stated = context.personalization.as_ref();
    ranking::apply_personalization(&mut recommendations, stated);
    ranking::rank(
        &mut recommendations,
        context.assessment_result.score,
        stated.map(|f| f.available_time_per_week),
    );
    recommendations.truncate(thresholds::MAX_RECOMMENDATIONS);

    tracing::debug!(
        user = %context.user_id,
        qualification = %context.qualification.id,
        count = recommendations.len(),
        "generated recommendations"
    );

    recommendations
}

/// Study recommendations: one per weak area, a foundational one when the
/// overall score is low, and one per missing prerequisite.
async fn generate_study(
    context: &RecommendationContext,
    catalog: &dyn QualificationCatalog,
    library: &dyn ResourceLibrary,
    factors: &PersonalizationFactors,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();
    let result = &context.assessment_result;
    let qualification = &context.qualification;

    for area in &context.progress_analytics.weak_areas {
        let area_score = result.category_score(area);
        let priority = if area_score < thresholds::HIGH_URGENCY_BELOW {
            Priority::High
        } else if area_score < thresholds::MEDIUM_URGENCY_BELOW {
            Priority::Medium
        } else {
            Priority::Low
        };
        let gap = (qualification.passing_score - area_score).max(0.0);
        let attached = resources::personalized_resources(
            library,
            std::slice::from_ref(area),
            qualification.difficulty,
            factors,
        )
        .await;

        recs.push(Recommendation {
            rec_type: RecommendationType::Study,
            title: format!("Strengthen {area}"),
            description: format!(
                "You scored {area_score:.0}% in {area}. Focused study here will lift \
                your overall result the most."
            ),
            priority,
            estimated_time_minutes: estimate_study_time(gap, factors),
            resources: attached,
            category: Some(area.clone()),
            qualification_id: qualification.id.clone(),
        });
    }

    if result.score < thresholds::FOUNDATIONAL_BELOW {
        let gap = (qualification.passing_score - result.score).max(0.0);
        let attached = resources::tailor(
            ok_or_empty(
                library.foundational_resources(&qualification.category).await,
                "foundational resources",
            ),
            factors,
        );

        recs.push(Recommendation {
            rec_type: RecommendationType::Study,
            title: format!("Build your {} foundations", qualification.category),
            description: format!(
                "Your overall score of {:.0}% suggests gaps in the fundamentals. \
                A broad review of {} will pay off across every topic.",
                result.score, qualification.category
            ),
            priority: Priority::High,
            estimated_time_minutes: estimate_study_time(gap, factors),
            resources: attached,
            category: Some(qualification.category.clone()),
            qualification_id: qualification.id.clone(),
        });
    }

    if !qualification.prerequisites.is_empty() {
        let missing = ok_or_empty(
            catalog.missing_prerequisites(context).await,
            "missing prerequisites",
        );
        for prerequisite in missing {
            let attached = resources::tailor(
                ok_or_empty(
                    library.category_resources(&prerequisite.category).await,
                    "prerequisite resources",
                ),
                factors,
            );

            recs.push(Recommendation {
                rec_type: RecommendationType::Study,
                title: format!("Complete prerequisite: {}", prerequisite.name),
                description: format!(
                    "{} builds on {}, which you have not completed yet. \
                    Closing that gap first will make the rest easier.",
                    qualification.name, prerequisite.name
                ),
                priority: Priority::High,
                estimated_time_minutes: prerequisite.estimated_duration_minutes,
                resources: attached,
                category: Some(prerequisite.category.clone()),
                qualification_id: prerequisite.id.clone(),
            });
        }
    }

    recs
}

/// Practice recommendations: drills per moderate-band category, a full
/// practice assessment in the mid band, and per-tier drills for weak
/// difficulty tiers.
async fn generate_practice(
    context: &RecommendationContext,
    library: &dyn ResourceLibrary,
    factors: &PersonalizationFactors,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();
    let result = &context.assessment_result;
    let qualification = &context.qualification;

    for (category, category_score) in result.moderate_categories() {
        let attached = resources::tailor(
            ok_or_empty(
                library.category_resources(&category).await,
                "category resources",
            ),
            factors,
        );

        recs.push(Recommendation {
            rec_type: RecommendationType::Practice,
            title: format!("Practice {category} drills"),
            description: format!(
                "{category} sits at {category_score:.0}%, close to mastery. \
                Targeted drills should push it over the line."
            ),
            priority: Priority::Medium,
            estimated_time_minutes: 45,
            resources: attached,
            category: Some(category),
            qualification_id: qualification.id.clone(),
        });
    }

    if (thresholds::FULL_PRACTICE_MIN..thresholds::FULL_PRACTICE_MAX).contains(&result.score) {
        let attached = resources::tailor(
            ok_or_empty(
                library.difficulty_resources(qualification.difficulty).await,
                "difficulty resources",
            ),
            factors,
        );

        recs.push(Recommendation {
            rec_type: RecommendationType::Practice,
            title: "Take a full practice assessment".to_string(),
            description: format!(
                "At {:.0}% overall you are within reach of a strong result. \
                A timed practice run of the whole assessment will sharpen your pacing.",
                result.score
            ),
            priority: Priority::Medium,
            estimated_time_minutes: qualification.estimated_duration_minutes,
            resources: attached,
            category: None,
            qualification_id: qualification.id.clone(),
        });
    }

    // Placeholder heuristic: below 70 overall, treat the two lower tiers as
    // weak rather than doing per-tier analysis.
    if result.score < thresholds::DIFFICULTY_WEAKNESS_BELOW {
        for tier in [Difficulty::Beginner, Difficulty::Intermediate] {
            let attached = resources::tailor(
                ok_or_empty(
                    library.difficulty_resources(tier).await,
                    "difficulty resources",
                ),
                factors,
            );

            recs.push(Recommendation {
                rec_type: RecommendationType::Practice,
                title: format!("Drill {}-level questions", tier.label().to_lowercase()),
                description: format!(
                    "Working through {}-level question sets will shore up the \
                    ground the harder material stands on.",
                    tier.label().to_lowercase()
                ),
                priority: Priority::Low,
                estimated_time_minutes: 30,
                resources: attached,
                category: None,
                qualification_id: qualification.id.clone(),
            });
        }
    }

    recs
}

/// Advancement recommendations: only for a strong pass. Up to two
/// next-level qualifications, one related track, one specialization, and a
/// career-opportunities pointer.
async fn generate_advancement(
    context: &RecommendationContext,
    catalog: &dyn QualificationCatalog,
    library: &dyn ResourceLibrary,
    factors: &PersonalizationFactors,
) -> Vec<Recommendation> {
    let result = &context.assessment_result;
    if !result.passed || result.score < thresholds::ADVANCEMENT_MIN {
        return Vec::new();
    }

    let mut recs = Vec::new();
    let qualification = &context.qualification;

    let (next_level, related, specializations) = futures::join!(
        catalog.next_level_qualifications(qualification),
        catalog.related_qualifications(qualification),
        catalog.specializations(qualification),
    );

    let mut next_level = ok_or_empty(next_level, "next-level qualifications");
    next_level.truncate(thresholds::MAX_NEXT_LEVEL);
    for target in next_level {
        recs.push(Recommendation {
            rec_type: RecommendationType::Advance,
            title: format!("Advance to {}", target.name),
            description: format!(
                "You passed with {:.0}%. {} is the natural next step up in {}.",
                result.score, target.name, target.category
            ),
            priority: Priority::Medium,
            estimated_time_minutes: target.estimated_duration_minutes,
            resources: Vec::new(),
            category: None,
            qualification_id: target.id,
        });
    }

    let mut related = ok_or_empty(related, "related qualifications");
    related.truncate(1);
    for target in related {
        recs.push(Recommendation {
            rec_type: RecommendationType::Advance,
            title: format!("Broaden into {}", target.name),
            description: format!(
                "{} covers adjacent ground in {} and rounds out your profile.",
                target.name, target.category
            ),
            priority: Priority::Low,
            estimated_time_minutes: target.estimated_duration_minutes,
            resources: Vec::new(),
            category: None,
            qualification_id: target.id,
        });
    }

    let mut specializations = ok_or_empty(specializations, "specializations");
    specializations.truncate(1);
    for target in specializations {
        recs.push(Recommendation {
            rec_type: RecommendationType::Advance,
            title: format!("Specialize in {}", target.name),
            description: format!(
                "With the fundamentals mastered, {} lets you go deep.",
                target.name
            ),
            priority: Priority::Low,
            estimated_time_minutes: target.estimated_duration_minutes,
            resources: Vec::new(),
            category: None,
            qualification_id: target.id,
        });
    }

    if result.score >= thresholds::CAREER_MIN {
        let attached = resources::tailor(
            ok_or_empty(
                library.career_resources(&qualification.category).await,
                "career resources",
            ),
            factors,
        );

        recs.push(Recommendation {
            rec_type: RecommendationType::Advance,
            title: "Explore career opportunities".to_string(),
            description: format!(
                "A {:.0}% result in {} opens doors. Take a look at where this \
                credential is in demand.",
                result.score, qualification.category
            ),
            priority: Priority::Low,
            estimated_time_minutes: 60,
            resources: attached,
            category: Some(qualification.category.clone()),
            qualification_id: qualification.id.clone(),
        });
    }

    recs
}

/// Retake guidance for a failed attempt, when the policy allows retakes:
/// either the retake itself (cooldown elapsed) or productive preparation
/// for the remaining wait.
async fn generate_retake(
    context: &RecommendationContext,
    library: &dyn ResourceLibrary,
    factors: &PersonalizationFactors,
) -> Vec<Recommendation> {
    let result = &context.assessment_result;
    let qualification = &context.qualification;
    if result.passed || !qualification.retake_policy.allow_retakes {
        return Vec::new();
    }

    let cooldown_hours = qualification.retake_policy.retake_cooldown_hours;
    // No recorded attempt time means there is no wait basis; treat the
    // cooldown as elapsed.
    let remaining_hours = match context
        .user_progress
        .hours_since_last_attempt(Utc::now())
    {
        Some(elapsed) => cooldown_hours - elapsed,
        None => 0.0,
    };
    let points_needed = (qualification.passing_score - result.score).max(0.0);

    if remaining_hours <= 0.0 {
        let priority = if points_needed <= thresholds::RETAKE_CLOSE_MARGIN {
            Priority::High
        } else {
            Priority::Medium
        };

        vec![Recommendation {
            rec_type: RecommendationType::Retake,
            title: "Retake Assessment".to_string(),
            description: format!(
                "You scored {:.0}%, {:.0} points short of the {:.0}% passing bar. \
                The cooldown has elapsed, so attempt {} is open now.",
                result.score,
                points_needed,
                qualification.passing_score,
                context.user_progress.attempt_count + 1
            ),
            priority,
            estimated_time_minutes: qualification.estimated_duration_minutes,
            resources: Vec::new(),
            category: None,
            qualification_id: qualification.id.clone(),
        }]
    } else {
        let prep_minutes = retake_prep_minutes(points_needed);
        let attached = resources::tailor(
            ok_or_empty(
                library.retake_prep_resources(&qualification.id).await,
                "retake prep resources",
            ),
            factors,
        );

        vec![Recommendation {
            rec_type: RecommendationType::Study,
            title: "Prepare for Retake".to_string(),
            description: format!(
                "The retake cooldown has {:.0} hours remaining. Use the wait: \
                around {prep_minutes} minutes of focused preparation should close \
                the {points_needed:.0}-point gap.",
                remaining_hours.round()
            ),
            priority: Priority::Medium,
            estimated_time_minutes: remaining_hours.round() as u32,
            resources: attached,
            category: None,
            qualification_id: qualification.id.clone(),
        }]
    }
}

/// Unwrap a collaborator lookup, degrading failures to an empty list
fn ok_or_empty<T>(result: Result<Vec<T>, LookupError>, what: &str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, "{what} lookup failed");
            Vec::new()
        }
    }
}
