use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{Profile, Scholarship, ScholarshipId, UserId};
use super::evaluation::{is_eligible, match_reasons, unmet_criteria, Criterion, MatchReason};
use super::lifecycle;
use super::ranking::{rank_by_relevance, rank_by_similarity};
use super::repository::{
    MatchRecord, MatchSink, ProfileSource, RepositoryError, ScholarshipSource,
};
use crate::config::MatchingConfig;

/// Service composing the profile and scholarship sources, the rules engine and the match cache.
pub struct MatchService<P, S, M> {
    profiles: Arc<P>,
    scholarships: Arc<S>,
    sink: Arc<M>,
    config: MatchingConfig,
}

/// Eligible scholarship annotated with its relevance and the criteria it matched on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScholarshipMatch {
    pub scholarship: Scholarship,
    pub match_score: f64,
    pub match_reasons: Vec<MatchReason>,
}

/// Result of a match refresh for one student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub user_id: UserId,
    pub matches: Vec<ScholarshipMatch>,
    pub total_eligible: usize,
}

/// Per-listing verdict backing a scholarship detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibilityReport {
    pub scholarship_id: ScholarshipId,
    pub user_id: UserId,
    pub eligible: bool,
    pub match_reasons: Vec<MatchReason>,
    pub unmet_criteria: Vec<Criterion>,
    pub required_documents: Vec<String>,
}

/// Listing sharing an audience with the one being viewed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarListing {
    pub scholarship: Scholarship,
    pub score: u32,
}

/// Eligible listing whose deadline is close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlineEntry {
    pub scholarship_id: ScholarshipId,
    pub title: String,
    pub deadline: NaiveDate,
    pub days_remaining: i64,
}

impl<P, S, M> MatchService<P, S, M>
where
    P: ProfileSource + 'static,
    S: ScholarshipSource + 'static,
    M: MatchSink + 'static,
{
    pub fn new(profiles: Arc<P>, scholarships: Arc<S>, sink: Arc<M>, config: MatchingConfig) -> Self {
        Self {
            profiles,
            scholarships,
            sink,
            config,
        }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Recompute a student's matches, replace the cached match set, and return the best ones.
    ///
    /// Only open listings the student has not already applied to are considered.
    pub fn refresh_matches(
        &self,
        user_id: &UserId,
        today: NaiveDate,
    ) -> Result<MatchSummary, MatchServiceError> {
        let profile = self.load_profile(user_id)?;
        let applied: HashSet<ScholarshipId> = self
            .scholarships
            .active_applications(user_id)?
            .into_iter()
            .collect();
        let catalog = self.scholarships.scholarships()?;

        let eligible: Vec<&Scholarship> = catalog
            .iter()
            .filter(|scholarship| lifecycle::is_open(scholarship, today))
            .filter(|scholarship| !applied.contains(&scholarship.id))
            .filter(|scholarship| is_eligible(scholarship, &profile))
            .collect();

        info!(
            %user_id,
            eligible = eligible.len(),
            total = catalog.len(),
            "evaluated scholarship eligibility"
        );

        let ranked = rank_by_relevance(&profile, eligible.iter().copied());

        let records: Vec<MatchRecord> = ranked
            .iter()
            .take(self.config.persist_limit)
            .map(|entry| MatchRecord {
                user_id: user_id.clone(),
                scholarship_id: entry.scholarship.id.clone(),
                match_score: entry.score,
                is_eligible: true,
            })
            .collect();
        let persisted = records.len();
        self.sink.replace_matches(user_id, records)?;
        debug!(%user_id, persisted, "replaced cached matches");

        let matches = ranked
            .into_iter()
            .take(self.config.response_limit)
            .map(|entry| ScholarshipMatch {
                scholarship: entry.scholarship.clone(),
                match_score: entry.score,
                match_reasons: match_reasons(entry.scholarship, &profile),
            })
            .collect();

        Ok(MatchSummary {
            user_id: user_id.clone(),
            matches,
            total_eligible: eligible.len(),
        })
    }

    /// Explain how one listing relates to one student.
    pub fn eligibility(
        &self,
        scholarship_id: &ScholarshipId,
        user_id: &UserId,
    ) -> Result<EligibilityReport, MatchServiceError> {
        let scholarship = self.load_scholarship(scholarship_id)?;
        let profile = self.load_profile(user_id)?;

        Ok(EligibilityReport {
            scholarship_id: scholarship.id.clone(),
            user_id: user_id.clone(),
            eligible: is_eligible(&scholarship, &profile),
            match_reasons: match_reasons(&scholarship, &profile),
            unmet_criteria: unmet_criteria(&scholarship, &profile),
            required_documents: scholarship.required_documents.clone(),
        })
    }

    /// Listings that share categories, states or education levels with `scholarship_id`.
    pub fn similar(
        &self,
        scholarship_id: &ScholarshipId,
    ) -> Result<Vec<SimilarListing>, MatchServiceError> {
        let target = self.load_scholarship(scholarship_id)?;
        let catalog = self.scholarships.scholarships()?;
        let pool = catalog
            .iter()
            .filter(|candidate| candidate.id != target.id)
            .take(self.config.similar_pool);

        Ok(rank_by_similarity(&target, pool, self.config.similar_limit)
            .into_iter()
            .map(|similar| SimilarListing {
                scholarship: similar.scholarship.clone(),
                score: similar.score,
            })
            .collect())
    }

    /// Eligible, open listings closing within the reminder window, earliest first.
    pub fn closing_soon(
        &self,
        user_id: &UserId,
        today: NaiveDate,
    ) -> Result<Vec<DeadlineEntry>, MatchServiceError> {
        let profile = self.load_profile(user_id)?;
        let catalog = self.scholarships.scholarships()?;

        let mut entries: Vec<DeadlineEntry> = catalog
            .iter()
            .filter(|scholarship| {
                lifecycle::closes_within(scholarship, today, self.config.reminder_window_days)
            })
            .filter(|scholarship| is_eligible(scholarship, &profile))
            .filter_map(|scholarship| {
                let deadline = scholarship.deadline?;
                Some(DeadlineEntry {
                    scholarship_id: scholarship.id.clone(),
                    title: scholarship.title.clone(),
                    deadline,
                    days_remaining: (deadline - today).num_days(),
                })
            })
            .collect();

        entries.sort_by_key(|entry| entry.deadline);
        Ok(entries)
    }

    /// Listings whose deadline passed longer ago than the configured grace period.
    pub fn stale_listings(&self, today: NaiveDate) -> Result<Vec<ScholarshipId>, MatchServiceError> {
        let catalog = self.scholarships.scholarships()?;
        Ok(catalog
            .iter()
            .filter(|scholarship| {
                lifecycle::is_stale(scholarship, today, self.config.expiry_grace_days)
            })
            .map(|scholarship| scholarship.id.clone())
            .collect())
    }

    fn load_profile(&self, user_id: &UserId) -> Result<Profile, MatchServiceError> {
        match self.profiles.profile(user_id)? {
            Some(profile) => Ok(profile),
            None => {
                warn!(%user_id, "no profile on record");
                Err(MatchServiceError::ProfileNotFound(user_id.clone()))
            }
        }
    }

    fn load_scholarship(&self, id: &ScholarshipId) -> Result<Scholarship, MatchServiceError> {
        self.scholarships
            .scholarship(id)?
            .ok_or_else(|| MatchServiceError::ScholarshipNotFound(id.clone()))
    }
}

/// Error raised by the match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error("no profile found for user {0}")]
    ProfileNotFound(UserId),
    #[error("scholarship {0} not found")]
    ScholarshipNotFound(ScholarshipId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
