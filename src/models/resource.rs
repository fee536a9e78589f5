//! Learning resource types
//!
//! External content references attached to recommendations. This crate only
//! defines the shape and retrieval seams; content lives in the catalog.

use serde::{Deserialize, Serialize};

use super::qualification::Difficulty;

/// Delivery format of a learning resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceFormat {
    Video,
    Audio,
    Interactive,
    Article,
    Course,
}

impl ResourceFormat {
    /// Get display label for the format
    pub fn label(&self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Interactive => "Interactive",
            Self::Article => "Article",
            Self::Course => "Course",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "video" => Some(Self::Video),
            "audio" => Some(Self::Audio),
            "interactive" => Some(Self::Interactive),
            "article" => Some(Self::Article),
            "course" => Some(Self::Course),
            _ => None,
        }
    }
}

/// A reference to one piece of external learning content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LearningResource {
    /// Stable identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Link to the content, when hosted externally
    pub url: Option<String>,
    /// Delivery format
    pub format: ResourceFormat,
    /// Difficulty tier of the content
    pub difficulty: Difficulty,
    /// Topic or category the content covers
    pub topic: String,
    /// Estimated time to work through, in minutes
    pub estimated_time_minutes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_labels() {
        assert_eq!(ResourceFormat::Video.label(), "Video");
        assert_eq!(ResourceFormat::Course.label(), "Course");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(ResourceFormat::from_str("video"), Some(ResourceFormat::Video));
        assert_eq!(
            ResourceFormat::from_str("Interactive"),
            Some(ResourceFormat::Interactive)
        );
        assert_eq!(ResourceFormat::from_str("podcast"), None);
    }

    #[test]
    fn test_resource_serialization() {
        let resource = LearningResource {
            id: "res-1".to_string(),
            title: "Intro to Algebra".to_string(),
            url: Some("https://example.com/algebra".to_string()),
            format: ResourceFormat::Article,
            difficulty: Difficulty::Beginner,
            topic: "algebra".to_string(),
            estimated_time_minutes: 20,
        };

        let json = serde_json::to_string(&resource).unwrap();
        assert!(json.contains("\"format\":\"article\""));
        assert!(json.contains("\"difficulty\":\"beginner\""));
    }
}
