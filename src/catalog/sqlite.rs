//! SQLite-backed catalog
//!
//! Default implementation of both collaborator seams over a local SQLite
//! database: qualification discovery (next-level, related, specialization,
//! prerequisite lookups) and resource retrieval. Intended for platforms
//! that sync their catalog down to a file rather than calling a remote
//! content service.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use thiserror::Error;

use crate::models::personalization::LearningStyle;
use crate::models::qualification::{Difficulty, Qualification, RetakePolicy};
use crate::models::resource::{LearningResource, ResourceFormat};
use crate::recommendations::types::RecommendationContext;
use crate::resources::ResourceLibrary;
use crate::LookupError;

use super::QualificationCatalog;

/// Catalog storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Lock poisoned")]
    LockPoisoned,

    #[error("Unknown difficulty in catalog row: {0}")]
    UnknownDifficulty(String),

    #[error("Unknown resource format in catalog row: {0}")]
    UnknownFormat(String),
}

/// SQL schema for the catalog tables
const SCHEMA: &str = r#"
-- Qualifications on offer
CREATE TABLE IF NOT EXISTS qualifications (
    qualification_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    difficulty TEXT NOT NULL,
    passing_score REAL NOT NULL,
    estimated_duration_minutes INTEGER NOT NULL,
    allow_retakes INTEGER DEFAULT 1,
    retake_cooldown_hours REAL DEFAULT 24.0,
    is_specialization INTEGER DEFAULT 0,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_qualifications_category ON qualifications(category);
CREATE INDEX IF NOT EXISTS idx_qualifications_difficulty ON qualifications(difficulty);

-- Declared prerequisite links
CREATE TABLE IF NOT EXISTS qualification_prerequisites (
    qualification_id TEXT NOT NULL REFERENCES qualifications(qualification_id) ON DELETE CASCADE,
    prerequisite_id TEXT NOT NULL,
    PRIMARY KEY (qualification_id, prerequisite_id)
);

-- Passing completions per learner, consulted for prerequisite checks
CREATE TABLE IF NOT EXISTS completions (
    user_id TEXT NOT NULL,
    qualification_id TEXT NOT NULL,
    passed INTEGER NOT NULL,
    completed_at TEXT DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (user_id, qualification_id)
);

-- Learning resources. The audience column partitions general content from
-- foundational, career, and retake-prep material; retake-prep rows carry
-- the qualification id in the topic column.
CREATE TABLE IF NOT EXISTS resources (
    resource_id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    url TEXT,
    format TEXT NOT NULL,
    difficulty TEXT NOT NULL,
    topic TEXT NOT NULL,
    category TEXT NOT NULL,
    estimated_time_minutes INTEGER NOT NULL,
    audience TEXT DEFAULT 'general',
    created_at TEXT DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_resources_topic ON resources(topic);
CREATE INDEX IF NOT EXISTS idx_resources_category ON resources(category);
CREATE INDEX IF NOT EXISTS idx_resources_audience ON resources(audience);
"#;

/// Columns selected for every qualification query
const QUALIFICATION_COLUMNS: &str = "qualification_id, name, category, difficulty, \
    passing_score, estimated_duration_minutes, allow_retakes, retake_cooldown_hours";

/// SQLite-backed qualification catalog and resource library
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
}

impl SqliteCatalog {
    /// Open a catalog database at the given path
    pub fn new(path: PathBuf) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory catalog (tests, ephemeral seeding)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create the catalog schema
    pub fn initialize(&self) -> Result<(), StoreError> {
        self.with_connection(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
    }

    /// Run a closure against the locked connection
    fn with_connection<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError>,
    {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&conn)
    }

    /// Insert or replace a qualification and its prerequisite links
    pub fn insert_qualification(
        &self,
        qualification: &Qualification,
        is_specialization: bool,
    ) -> Result<(), StoreError> {
        self.with_connection(|conn| {
            conn.execute(
                r#"
                INSERT OR REPLACE INTO qualifications
                    (qualification_id, name, category, difficulty, passing_score,
                     estimated_duration_minutes, allow_retakes, retake_cooldown_hours,
                     is_specialization)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    qualification.id,
                    qualification.name,
                    qualification.category,
                    qualification.difficulty.label().to_lowercase(),
                    qualification.passing_score,
                    qualification.estimated_duration_minutes,
                    qualification.retake_policy.allow_retakes,
                    qualification.retake_policy.retake_cooldown_hours,
                    is_specialization,
                ],
            )?;

            conn.execute(
                "DELETE FROM qualification_prerequisites WHERE qualification_id = ?1",
                params![qualification.id],
            )?;
            for prerequisite_id in &qualification.prerequisites {
                conn.execute(
                    r#"
                    INSERT INTO qualification_prerequisites (qualification_id, prerequisite_id)
                    VALUES (?1, ?2)
                    "#,
                    params![qualification.id, prerequisite_id],
                )?;
            }
            Ok(())
        })
    }

    /// Insert or replace a resource under the given audience partition
    pub fn insert_resource(
        &self,
        resource: &LearningResource,
        category: &str,
        audience: &str,
    ) -> Result<(), StoreError> {
        self.with_connection(|conn| {
            conn.execute(
                r#"
                INSERT OR REPLACE INTO resources
                    (resource_id, title, url, format, difficulty, topic, category,
                     estimated_time_minutes, audience)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    resource.id,
                    resource.title,
                    resource.url,
                    resource.format.label().to_lowercase(),
                    resource.difficulty.label().to_lowercase(),
                    resource.topic,
                    category,
                    resource.estimated_time_minutes,
                    audience,
                ],
            )?;
            Ok(())
        })
    }

    /// Record whether a learner passed a qualification
    pub fn record_completion(
        &self,
        user_id: &str,
        qualification_id: &str,
        passed: bool,
    ) -> Result<(), StoreError> {
        self.with_connection(|conn| {
            conn.execute(
                r#"
                INSERT OR REPLACE INTO completions (user_id, qualification_id, passed)
                VALUES (?1, ?2, ?3)
                "#,
                params![user_id, qualification_id, passed],
            )?;
            Ok(())
        })
    }

    /// Load one qualification by id, with its prerequisite links
    pub fn qualification_by_id(&self, id: &str) -> Result<Option<Qualification>, StoreError> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {QUALIFICATION_COLUMNS} FROM qualifications WHERE qualification_id = ?1"
            ))?;
            let mut rows = stmt.query_map(params![id], map_qualification_row)?;
            match rows.next() {
                Some(row) => {
                    let mut qualification = row??;
                    qualification.prerequisites = prerequisites_of(conn, &qualification.id)?;
                    Ok(Some(qualification))
                }
                None => Ok(None),
            }
        })
    }

    fn qualifications_where(
        &self,
        condition: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<Qualification>, StoreError> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {QUALIFICATION_COLUMNS} FROM qualifications WHERE {condition} ORDER BY name"
            ))?;
            let rows = stmt.query_map(args, map_qualification_row)?;

            let mut qualifications = Vec::new();
            for row in rows {
                let mut qualification = row??;
                qualification.prerequisites = prerequisites_of(conn, &qualification.id)?;
                qualifications.push(qualification);
            }
            Ok(qualifications)
        })
    }

    fn resources_where(
        &self,
        condition: &str,
        args: Vec<String>,
    ) -> Result<Vec<LearningResource>, StoreError> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                r#"
                SELECT resource_id, title, url, format, difficulty, topic,
                       estimated_time_minutes
                FROM resources
                WHERE {condition}
                ORDER BY estimated_time_minutes, resource_id
                "#
            ))?;
            let rows = stmt.query_map(params_from_iter(args), map_resource_row)?;

            let mut resources = Vec::new();
            for row in rows {
                resources.push(row??);
            }
            Ok(resources)
        })
    }

    fn style_resources(
        &self,
        style: LearningStyle,
        topic: &str,
    ) -> Result<Vec<LearningResource>, StoreError> {
        let formats = formats_for_style(style);
        let placeholders: Vec<String> = (2..2 + formats.len()).map(|i| format!("?{i}")).collect();
        let condition = format!(
            "topic = ?1 AND audience = 'general' AND format IN ({})",
            placeholders.join(", ")
        );

        let mut args = vec![topic.to_string()];
        args.extend(formats.iter().map(|f| f.label().to_lowercase()));
        self.resources_where(&condition, args)
    }
}

/// Formats each learning style prefers
fn formats_for_style(style: LearningStyle) -> &'static [ResourceFormat] {
    match style {
        LearningStyle::Visual => &[ResourceFormat::Video],
        LearningStyle::Auditory => &[ResourceFormat::Audio],
        LearningStyle::Kinesthetic => &[ResourceFormat::Interactive],
        LearningStyle::Reading => &[ResourceFormat::Article, ResourceFormat::Course],
    }
}

fn map_qualification_row(
    row: &rusqlite::Row<'_>,
) -> rusqlite::Result<Result<Qualification, StoreError>> {
    let difficulty_text: String = row.get(3)?;
    let difficulty = match Difficulty::from_str(&difficulty_text) {
        Some(d) => d,
        None => return Ok(Err(StoreError::UnknownDifficulty(difficulty_text))),
    };

    Ok(Ok(Qualification {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        difficulty,
        passing_score: row.get(4)?,
        estimated_duration_minutes: row.get(5)?,
        prerequisites: Vec::new(),
        retake_policy: RetakePolicy {
            allow_retakes: row.get(6)?,
            retake_cooldown_hours: row.get(7)?,
        },
    }))
}

fn map_resource_row(
    row: &rusqlite::Row<'_>,
) -> rusqlite::Result<Result<LearningResource, StoreError>> {
    let format_text: String = row.get(3)?;
    let format = match ResourceFormat::from_str(&format_text) {
        Some(f) => f,
        None => return Ok(Err(StoreError::UnknownFormat(format_text))),
    };
    let difficulty_text: String = row.get(4)?;
    let difficulty = match Difficulty::from_str(&difficulty_text) {
        Some(d) => d,
        None => return Ok(Err(StoreError::UnknownDifficulty(difficulty_text))),
    };

    Ok(Ok(LearningResource {
        id: row.get(0)?,
        title: row.get(1)?,
        url: row.get(2)?,
        format,
        difficulty,
        topic: row.get(5)?,
        estimated_time_minutes: row.get(6)?,
    }))
}

fn prerequisites_of(conn: &Connection, qualification_id: &str) -> Result<Vec<String>, StoreError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT prerequisite_id FROM qualification_prerequisites
        WHERE qualification_id = ?1
        ORDER BY prerequisite_id
        "#,
    )?;
    let rows = stmt.query_map(params![qualification_id], |row| row.get::<_, String>(0))?;

    let mut prerequisites = Vec::new();
    for row in rows {
        prerequisites.push(row?);
    }
    Ok(prerequisites)
}

#[async_trait]
impl QualificationCatalog for SqliteCatalog {
    async fn missing_prerequisites(
        &self,
        context: &RecommendationContext,
    ) -> Result<Vec<Qualification>, LookupError> {
        let mut missing = Vec::new();
        for prerequisite_id in &context.qualification.prerequisites {
            let passed: bool = self.with_connection(|conn| {
                let passed = conn
                    .query_row(
                        r#"
                        SELECT passed FROM completions
                        WHERE user_id = ?1 AND qualification_id = ?2
                        "#,
                        params![context.user_id, prerequisite_id],
                        |row| row.get::<_, bool>(0),
                    )
                    .optional()?;
                Ok(passed.unwrap_or(false))
            })?;

            if !passed {
                if let Some(qualification) = self.qualification_by_id(prerequisite_id)? {
                    missing.push(qualification);
                } else {
                    tracing::warn!(
                        prerequisite = %prerequisite_id,
                        "declared prerequisite not present in catalog"
                    );
                }
            }
        }
        Ok(missing)
    }

    async fn next_level_qualifications(
        &self,
        qualification: &Qualification,
    ) -> Result<Vec<Qualification>, LookupError> {
        let Some(next_tier) = qualification.difficulty.next() else {
            return Ok(Vec::new());
        };
        let tier = next_tier.label().to_lowercase();
        Ok(self.qualifications_where(
            "category = ?1 AND difficulty = ?2 AND is_specialization = 0 \
             AND qualification_id != ?3",
            &[
                &qualification.category as &dyn rusqlite::ToSql,
                &tier,
                &qualification.id,
            ],
        )?)
    }

    async fn related_qualifications(
        &self,
        qualification: &Qualification,
    ) -> Result<Vec<Qualification>, LookupError> {
        let tier = qualification.difficulty.label().to_lowercase();
        Ok(self.qualifications_where(
            "category = ?1 AND difficulty = ?2 AND is_specialization = 0 \
             AND qualification_id != ?3",
            &[
                &qualification.category as &dyn rusqlite::ToSql,
                &tier,
                &qualification.id,
            ],
        )?)
    }

    async fn specializations(
        &self,
        qualification: &Qualification,
    ) -> Result<Vec<Qualification>, LookupError> {
        Ok(self.qualifications_where(
            "category = ?1 AND is_specialization = 1",
            &[&qualification.category as &dyn rusqlite::ToSql],
        )?)
    }
}

#[async_trait]
impl ResourceLibrary for SqliteCatalog {
    async fn visual_resources(
        &self,
        topic: &str,
        _difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(self.style_resources(LearningStyle::Visual, topic)?)
    }

    async fn auditory_resources(
        &self,
        topic: &str,
        _difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(self.style_resources(LearningStyle::Auditory, topic)?)
    }

    async fn kinesthetic_resources(
        &self,
        topic: &str,
        _difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(self.style_resources(LearningStyle::Kinesthetic, topic)?)
    }

    async fn reading_resources(
        &self,
        topic: &str,
        _difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(self.style_resources(LearningStyle::Reading, topic)?)
    }

    async fn category_resources(
        &self,
        category: &str,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(self.resources_where(
            "category = ?1 AND audience = 'general'",
            vec![category.to_string()],
        )?)
    }

    async fn difficulty_resources(
        &self,
        difficulty: Difficulty,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(self.resources_where(
            "difficulty = ?1 AND audience = 'general'",
            vec![difficulty.label().to_lowercase()],
        )?)
    }

    async fn foundational_resources(
        &self,
        category: &str,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(self.resources_where(
            "category = ?1 AND audience = 'foundational'",
            vec![category.to_string()],
        )?)
    }

    async fn career_resources(
        &self,
        category: &str,
    ) -> Result<Vec<LearningResource>, LookupError> {
        Ok(self.resources_where(
            "category = ?1 AND audience = 'career'",
            vec![category.to_string()],
        )?)
    }

    async fn retake_prep_resources(
        &self,
        qualification_id: &str,
    ) -> Result<Vec<LearningResource>, LookupError> {
        // Retake-prep rows carry the qualification id in the topic column
        Ok(self.resources_where(
            "topic = ?1 AND audience = 'retake_prep'",
            vec![qualification_id.to_string()],
        )?)
    }
}
