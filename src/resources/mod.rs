//! Learning-resource lookup seam
//!
//! The engine never owns content; it asks a [`ResourceLibrary`] for it.
//! Lookups are dispatched by the learner's style, then tailored: filtered
//! against the weekly time budget, adjusted for experience level, and
//! capped at five per recommendation. A failed lookup degrades to an empty
//! list and never removes the enclosing recommendation.

use async_trait::async_trait;

use crate::models::personalization::{ExperienceLevel, LearningStyle, PersonalizationFactors};
use crate::models::qualification::Difficulty;
use crate::models::resource::LearningResource;
use crate::LookupError;

/// Maximum resources attached to any single recommendation
pub const MAX_RESOURCES: usize = 5;

/// Provider seam for external learning content.
///
/// The style-specific methods back [`personalized_resources`]; the rest
/// serve the individual generators (category drills, difficulty drills,
/// foundational study, career exploration, retake preparation).
#[async_trait]
pub trait ResourceLibrary: Send + Sync {
    /// Visual content (videos, diagrams) for a topic
    async fn visual_resources(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError>;

    /// Audio content (lectures, podcasts) for a topic
    async fn auditory_resources(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError>;

    /// Hands-on content (labs, exercises) for a topic
    async fn kinesthetic_resources(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError>;

    /// Written content (articles, courses) for a topic
    async fn reading_resources(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError>;

    /// Content covering a whole category
    async fn category_resources(
        &self,
        category: &str,
    ) -> Result<Vec<LearningResource>, LookupError>;

    /// Drills targeting one difficulty tier
    async fn difficulty_resources(
        &self,
        difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError>;

    /// Broad foundational material for a category
    async fn foundational_resources(
        &self,
        category: &str,
    ) -> Result<Vec<LearningResource>, LookupError>;

    /// Career-path material for a category
    async fn career_resources(
        &self,
        category: &str,
    ) -> Result<Vec<LearningResource>, LookupError>;

    /// Preparation material ahead of a retake
    async fn retake_prep_resources(
        &self,
        qualification_id: &str,
    ) -> Result<Vec<LearningResource>, LookupError>;
}

/// Style-dispatched resource lookup for a set of topics, tailored to the
/// learner. Lookup failures are logged and degrade to no resources.
pub async fn personalized_resources(
    library: &dyn ResourceLibrary,
    topics: &[String],
    difficulty: Difficulty,
    factors: &PersonalizationFactors,
) -> Vec<LearningResource> {
    let mut collected = Vec::new();

    for topic in topics {
        let lookup = match factors.learning_style {
            LearningStyle::Visual => library.visual_resources(topic, difficulty).await,
            LearningStyle::Auditory => library.auditory_resources(topic, difficulty).await,
            LearningStyle::Kinesthetic => {
                library.kinesthetic_resources(topic, difficulty).await
            }
            LearningStyle::Reading => library.reading_resources(topic, difficulty).await,
        };

        match lookup {
            Ok(resources) => collected.extend(resources),
            Err(e) => {
                tracing::warn!(topic = %topic, error = %e, "resource lookup failed");
            }
        }
    }

    tailor(collected, factors)
}

/// Tailor a raw resource list to the learner: drop anything longer than
/// half the weekly budget, drop tiers outside the learner's experience
/// range, cap at [`MAX_RESOURCES`].
pub fn tailor(
    resources: Vec<LearningResource>,
    factors: &PersonalizationFactors,
) -> Vec<LearningResource> {
    let time_cap = factors.available_time_per_week * 0.5;

    let mut tailored: Vec<LearningResource> = resources
        .into_iter()
        .filter(|r| (r.estimated_time_minutes as f64) <= time_cap)
        .filter(|r| fits_experience(r.difficulty, factors.experience_level))
        .collect();

    tailored.truncate(MAX_RESOURCES);
    tailored
}

/// Whether a resource tier suits the learner's experience level
fn fits_experience(difficulty: Difficulty, experience: ExperienceLevel) -> bool {
    match experience {
        ExperienceLevel::NoExperience | ExperienceLevel::Beginner => !matches!(
            difficulty,
            Difficulty::Advanced | Difficulty::Expert
        ),
        ExperienceLevel::SomeExperience => true,
        ExperienceLevel::Experienced => difficulty != Difficulty::Beginner,
    }
}

/// A library with no content. Every lookup returns an empty list.
pub struct EmptyLibrary;

#[async_trait]
impl ResourceLibrary for EmptyLibrary {
    async fn visual_resources(
        &self,
        _topic: &str,
        _difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(Vec::new())
    }

    async fn auditory_resources(
        &self,
        _topic: &str,
        _difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(Vec::new())
    }

    async fn kinesthetic_resources(
        &self,
        _topic: &str,
        _difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(Vec::new())
    }

    async fn reading_resources(
        &self,
        _topic: &str,
        _difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(Vec::new())
    }

    async fn category_resources(
        &self,
        _category: &str,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(Vec::new())
    }

    async fn difficulty_resources(
        &self,
        _difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(Vec::new())
    }

    async fn foundational_resources(
        &self,
        _category: &str,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(Vec::new())
    }

    async fn career_resources(
        &self,
        _category: &str,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(Vec::new())
    }

    async fn retake_prep_resources(
        &self,
        _qualification_id: &str,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resource::ResourceFormat;
    use std::sync::Mutex;

    fn create_resource(id: &str, minutes: u32, difficulty: Difficulty) -> LearningResource {
        LearningResource {
            id: id.to_string(),
            title: format!("Resource {id}"),
            url: None,
            format: ResourceFormat::Article,
            difficulty,
            topic: "algebra".to_string(),
            estimated_time_minutes: minutes,
        }
    }

    fn roomy_factors() -> PersonalizationFactors {
        PersonalizationFactors {
            available_time_per_week: 600.0,
            ..Default::default()
        }
    }

    /// Records which style provider was called
    struct RecordingLibrary {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingLibrary {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, style: &str) -> Result<Vec<LearningResource>, LookupError> {
            self.calls.lock().unwrap().push(style.to_string());
            Ok(vec![create_resource(style, 15, Difficulty::Intermediate)])
        }
    }

    #[async_trait]
    impl ResourceLibrary for RecordingLibrary {
        async fn visual_resources(
            &self,
            _topic: &str,
            _difficulty: Difficulty,
        ) -> Result<Vec<LearningResource>, LookupError> {
            self.record("visual")
        }

        async fn auditory_resources(
            &self,
            _topic: &str,
            _difficulty: Difficulty,
        ) -> Result<Vec<LearningResource>, LookupError> {
            self.record("auditory")
        }

        async fn kinesthetic_resources(
            &self,
            _topic: &str,
            _difficulty: Difficulty,
        ) -> Result<Vec<LearningResource>, LookupError> {
            self.record("kinesthetic")
        }

        async fn reading_resources(
            &self,
            _topic: &str,
            _difficulty: Difficulty,
        ) -> Result<Vec<LearningResource>, LookupError> {
            self.record("reading")
        }

        async fn category_resources(
            &self,
            _category: &str,
        ) -> Result<Vec<LearningResource>, LookupError> {
            Ok(Vec::new())
        }

        async fn difficulty_resources(
            &self,
            _difficulty: Difficulty,
        ) -> Result<Vec<LearningResource>, LookupError> {
            Ok(Vec::new())
        }

        async fn foundational_resources(
            &self,
            _category: &str,
        ) -> Result<Vec<LearningResource>, LookupError> {
            Ok(Vec::new())
        }

        async fn career_resources(
            &self,
            _category: &str,
        ) -> Result<Vec<LearningResource>, LookupError> {
            Ok(Vec::new())
        }

        async fn retake_prep_resources(
            &self,
            _qualification_id: &str,
        ) -> Result<Vec<LearningResource>, LookupError> {
            Ok(Vec::new())
        }
    }

    /// Fails every lookup
    struct FailingLibrary;

    #[async_trait]
    impl ResourceLibrary for FailingLibrary {
        async fn visual_resources(
            &self,
            _topic: &str,
            _difficulty: Difficulty,
        ) -> Result<Vec<LearningResource>, LookupError> {
            Err(LookupError::Unavailable("offline".to_string()))
        }

        async fn auditory_resources(
            &self,
            _topic: &str,
            _difficulty: Difficulty,
        ) -> Result<Vec<LearningResource>, LookupError> {
            Err(LookupError::Unavailable("offline".to_string()))
        }

        async fn kinesthetic_resources(
            &self,
            _topic: &str,
            _difficulty: Difficulty,
        ) -> Result<Vec<LearningResource>, LookupError> {
            Err(LookupError::Unavailable("offline".to_string()))
        }

        async fn reading_resources(
            &self,
            _topic: &str,
            _difficulty: Difficulty,
        ) -> Result<Vec<LearningResource>, LookupError> {
            Err(LookupError::Unavailable("offline".to_string()))
        }

        async fn category_resources(
            &self,
            _category: &str,
        ) -> Result<Vec<LearningResource>, LookupError> {
            Err(LookupError::Unavailable("offline".to_string()))
        }

        async fn difficulty_resources(
            &self,
            _difficulty: Difficulty,
        ) -> Result<Vec<LearningResource>, LookupError> {
            Err(LookupError::Unavailable("offline".to_string()))
        }

        async fn foundational_resources(
            &self,
            _category: &str,
        ) -> Result<Vec<LearningResource>, LookupError> {
            Err(LookupError::Unavailable("offline".to_string()))
        }

        async fn career_resources(
            &self,
            _category: &str,
        ) -> Result<Vec<LearningResource>, LookupError> {
            Err(LookupError::Unavailable("offline".to_string()))
        }

        async fn retake_prep_resources(
            &self,
            _qualification_id: &str,
        ) -> Result<Vec<LearningResource>, LookupError> {
            Err(LookupError::Unavailable("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_style_dispatch() {
        let library = RecordingLibrary::new();
        let topics = vec!["algebra".to_string()];

        for (style, expected) in [
            (LearningStyle::Visual, "visual"),
            (LearningStyle::Auditory, "auditory"),
            (LearningStyle::Kinesthetic, "kinesthetic"),
            (LearningStyle::Reading, "reading"),
        ] {
            let factors = PersonalizationFactors {
                learning_style: style,
                ..roomy_factors()
            };
            let resources =
                personalized_resources(&library, &topics, Difficulty::Intermediate, &factors)
                    .await;
            assert_eq!(resources.len(), 1);
            assert_eq!(library.calls.lock().unwrap().last().unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_lookup_failure_degrades_to_empty() {
        let resources = personalized_resources(
            &FailingLibrary,
            &["algebra".to_string()],
            Difficulty::Intermediate,
            &roomy_factors(),
        )
        .await;
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn test_empty_library_returns_nothing() {
        let resources = personalized_resources(
            &EmptyLibrary,
            &["algebra".to_string()],
            Difficulty::Intermediate,
            &roomy_factors(),
        )
        .await;
        assert!(resources.is_empty());
    }

    #[test]
    fn test_tailor_time_filter() {
        let factors = PersonalizationFactors {
            available_time_per_week: 60.0,
            ..Default::default()
        };

        let resources = vec![
            create_resource("short", 20, Difficulty::Intermediate),
            create_resource("exact", 30, Difficulty::Intermediate),
            create_resource("long", 45, Difficulty::Intermediate),
        ];

        let tailored = tailor(resources, &factors);
        let ids: Vec<&str> = tailored.iter().map(|r| r.id.as_str()).collect();
        // Only resources at or under half the weekly budget survive
        assert_eq!(ids, vec!["short", "exact"]);
    }

    #[test]
    fn test_tailor_caps_at_five() {
        let resources: Vec<LearningResource> = (0..10)
            .map(|i| create_resource(&format!("r{i}"), 10, Difficulty::Intermediate))
            .collect();

        let tailored = tailor(resources, &roomy_factors());
        assert_eq!(tailored.len(), MAX_RESOURCES);
    }

    #[test]
    fn test_tailor_experience_adjustment() {
        let resources = vec![
            create_resource("easy", 10, Difficulty::Beginner),
            create_resource("mid", 10, Difficulty::Intermediate),
            create_resource("hard", 10, Difficulty::Expert),
        ];

        let newcomer = PersonalizationFactors {
            experience_level: ExperienceLevel::Beginner,
            ..roomy_factors()
        };
        let ids: Vec<String> = tailor(resources.clone(), &newcomer)
            .iter()
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(ids, vec!["easy", "mid"]);

        let veteran = PersonalizationFactors {
            experience_level: ExperienceLevel::Experienced,
            ..roomy_factors()
        };
        let ids: Vec<String> = tailor(resources, &veteran)
            .iter()
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(ids, vec!["mid", "hard"]);
    }
}
