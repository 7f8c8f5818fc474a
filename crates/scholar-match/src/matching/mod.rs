//! Scholarship eligibility matching and ranking.
//!
//! `rules` normalizes admin-authored eligibility documents, `evaluation`
//! decides admissibility and explains it, and `ranking` orders listings by text
//! relevance or audience overlap. Those three are pure and stateless. The
//! service and router compose them with the storage collaborators.

pub mod domain;
pub mod evaluation;
pub mod lifecycle;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Profile, Scholarship, ScholarshipId, UserId};
pub use evaluation::{is_eligible, match_reasons, unmet_criteria, Criterion, MatchReason};
pub use ranking::{rank_by_relevance, rank_by_similarity, ScoredScholarship, SimilarScholarship};
pub use repository::{MatchRecord, MatchSink, ProfileSource, RepositoryError, ScholarshipSource};
pub use router::match_router;
pub use rules::{EligibilityRules, GenderRule};
pub use service::{
    DeadlineEntry, EligibilityReport, MatchService, MatchServiceError, MatchSummary,
    ScholarshipMatch, SimilarListing,
};
