//! Relevance and similarity ranking over scholarship batches.

mod similarity;
mod tokenizer;
mod vector;

pub use similarity::{
    overlap_score, rank_by_similarity, SimilarScholarship, CATEGORY_OVERLAP_POINTS,
    EDUCATION_OVERLAP_POINTS, STATE_OVERLAP_POINTS,
};
pub use tokenizer::tokenize;
pub use vector::TermVector;

use serde::Serialize;

use super::domain::{Profile, Scholarship};

/// Scholarship paired with its text relevance to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredScholarship<'a> {
    pub scholarship: &'a Scholarship,
    pub score: f64,
}

/// Order scholarships by cosine similarity between the profile's interests
/// (field of study and education level) and each title plus description.
///
/// The sort is stable: equal scores keep their input order.
pub fn rank_by_relevance<'a, I>(profile: &Profile, scholarships: I) -> Vec<ScoredScholarship<'a>>
where
    I: IntoIterator<Item = &'a Scholarship>,
{
    let query = TermVector::from_text(&profile.interest_text());

    let mut ranked: Vec<ScoredScholarship<'a>> = scholarships
        .into_iter()
        .map(|scholarship| ScoredScholarship {
            scholarship,
            score: query.cosine(&TermVector::from_text(&scholarship.content_text())),
        })
        .collect();

    ranked.sort_by(|left, right| right.score.total_cmp(&left.score));
    ranked
}
