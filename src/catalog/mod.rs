//! Qualification catalog seam
//!
//! Discovery of qualifications the engine may point a learner toward:
//! missing prerequisites, next-level credentials, related tracks, and
//! specializations. The engine only decides whether and how many to
//! surface; which ones exist is the catalog's business.
//!
//! [`sqlite::SqliteCatalog`] is the bundled implementation; [`EmptyCatalog`]
//! serves callers without a catalog.

pub mod sqlite;

use async_trait::async_trait;

use crate::models::qualification::Qualification;
use crate::recommendations::types::RecommendationContext;
use crate::LookupError;

/// Discovery seam for qualification lookups
#[async_trait]
pub trait QualificationCatalog: Send + Sync {
    /// Declared prerequisites of the context's qualification that the
    /// learner has not yet passed
    async fn missing_prerequisites(
        &self,
        context: &RecommendationContext,
    ) -> Result<Vec<Qualification>, LookupError>;

    /// Qualifications one difficulty tier up in the same category
    async fn next_level_qualifications(
        &self,
        qualification: &Qualification,
    ) -> Result<Vec<Qualification>, LookupError>;

    /// Other qualifications in the same category at the same tier
    async fn related_qualifications(
        &self,
        qualification: &Qualification,
    ) -> Result<Vec<Qualification>, LookupError>;

    /// Specialization tracks branching off this qualification's category
    async fn specializations(
        &self,
        qualification: &Qualification,
    ) -> Result<Vec<Qualification>, LookupError>;
}

/// A catalog that knows nothing. Every lookup returns an empty list.
pub struct EmptyCatalog;

#[async_trait]
impl QualificationCatalog for EmptyCatalog {
    async fn missing_prerequisites(
        &self,
        _context: &RecommendationContext,
    ) -> Result<Vec<Qualification>, LookupError> {
        Ok(Vec::new())
    }

    async fn next_level_qualifications(
        &self,
        _qualification: &Qualification,
    ) -> Result<Vec<Qualification>, LookupError> {
        Ok(Vec::new())
    }

    async fn related_qualifications(
        &self,
        _qualification: &Qualification,
    ) -> Result<Vec<Qualification>, LookupError> {
        Ok(Vec::new())
    }

    async fn specializations(
        &self,
        _qualification: &Qualification,
    ) -> Result<Vec<Qualification>, LookupError> {
        Ok(Vec::new())
    }
}
