use serde::{Deserialize, Serialize};

use super::domain::{Profile, Scholarship, ScholarshipId, UserId};

/// Persisted match row, replaced wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub user_id: UserId,
    pub scholarship_id: ScholarshipId,
    pub match_score: f64,
    pub is_eligible: bool,
}

/// Read access to student profiles.
pub trait ProfileSource: Send + Sync {
    fn profile(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError>;
}

/// Read access to scholarship listings and the applications made against them.
pub trait ScholarshipSource: Send + Sync {
    fn scholarships(&self) -> Result<Vec<Scholarship>, RepositoryError>;
    fn scholarship(&self, id: &ScholarshipId) -> Result<Option<Scholarship>, RepositoryError>;
    /// Scholarships the user holds a non-withdrawn application for.
    fn active_applications(&self, user_id: &UserId) -> Result<Vec<ScholarshipId>, RepositoryError>;
}

/// Write access for the denormalized match cache.
pub trait MatchSink: Send + Sync {
    fn replace_matches(
        &self,
        user_id: &UserId,
        records: Vec<MatchRecord>,
    ) -> Result<(), RepositoryError>;
}

/// Error enumeration for collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
