//! Progress analytics
//!
//! Derives performance signals from a learner's assessment history:
//! - Per-category score averages across attempts
//! - Weak-area detection (categories lagging the mastery threshold)
//! - A coarse mastery rating for dashboard display
//!
//! The recommendation engine consumes the resulting [`ProgressAnalytics`];
//! callers run [`analyze_results`] when building a recommendation context.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::assessment::AssessmentResult;

/// Category averages below this are flagged as weak areas
pub const WEAK_AREA_THRESHOLD: f64 = 70.0;

/// Coarse mastery rating derived from the average overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryRating {
    /// >= 85
    Mastered,
    /// 70 - 85
    Proficient,
    /// 50 - 70
    Developing,
    /// < 50
    Struggling,
}

impl MasteryRating {
    /// Get rating from an average score
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Self::Mastered
        } else if score >= 70.0 {
            Self::Proficient
        } else if score >= 50.0 {
            Self::Developing
        } else {
            Self::Struggling
        }
    }

    /// Get display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mastered => "Mastered",
            Self::Proficient => "Proficient",
            Self::Developing => "Developing",
            Self::Struggling => "Struggling",
        }
    }
}

/// Derived performance signals for one learner on one qualification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressAnalytics {
    /// Categories whose average score lags the mastery threshold, in
    /// category order
    pub weak_areas: Vec<String>,
    /// Average score per category across all analyzed attempts
    pub category_averages: BTreeMap<String, f64>,
    /// Average overall score across attempts
    pub average_score: f64,
    /// Coarse rating derived from the average score
    pub mastery: MasteryRating,
    /// Number of attempts analyzed
    pub attempts_analyzed: u32,
}

impl ProgressAnalytics {
    /// Empty analytics for a learner with no attempts yet
    pub fn empty() -> Self {
        Self {
            weak_areas: Vec::new(),
            category_averages: BTreeMap::new(),
            average_score: 0.0,
            mastery: MasteryRating::Struggling,
            attempts_analyzed: 0,
        }
    }
}

/// Analyze a learner's assessment history into progress signals.
///
/// Categories are averaged across every attempt that reports them; a
/// category is weak when its average falls below [`WEAK_AREA_THRESHOLD`].
pub fn analyze_results(results: &[AssessmentResult]) -> ProgressAnalytics {
    if results.is_empty() {
        return ProgressAnalytics::empty();
    }

    let mut category_totals: BTreeMap<String, (f64, u32)> = BTreeMap::new();
    for result in results {
        for (category, score) in &result.category_scores {
            let entry = category_totals.entry(category.clone()).or_insert((0.0, 0));
            entry.0 += score;
            entry.1 += 1;
        }
    }

    let category_averages: BTreeMap<String, f64> = category_totals
        .into_iter()
        .map(|(category, (total, count))| (category, total / count as f64))
        .collect();

    let weak_areas: Vec<String> = category_averages
        .iter()
        .filter(|(_, avg)| **avg < WEAK_AREA_THRESHOLD)
        .map(|(category, _)| category.clone())
        .collect();

    let average_score =
        results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;

    tracing::debug!(
        attempts = results.len(),
        weak_areas = weak_areas.len(),
        average_score,
        "analyzed assessment history"
    );

    ProgressAnalytics {
        weak_areas,
        category_averages,
        average_score,
        mastery: MasteryRating::from_score(average_score),
        attempts_analyzed: results.len() as u32,
    }
}
