use serde::Serialize;

use super::super::domain::Scholarship;
use super::super::rules::EligibilityRules;

pub const CATEGORY_OVERLAP_POINTS: u32 = 2;
pub const STATE_OVERLAP_POINTS: u32 = 2;
pub const EDUCATION_OVERLAP_POINTS: u32 = 1;

/// Candidate scored by how much of its audience it shares with a target listing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarScholarship<'a> {
    pub scholarship: &'a Scholarship,
    pub score: u32,
}

/// Points for shared categories, states and education levels.
pub fn overlap_score(target: &EligibilityRules, candidate: &EligibilityRules) -> u32 {
    let mut score = 0;
    if overlaps(target.categories.as_deref(), candidate.categories.as_deref()) {
        score += CATEGORY_OVERLAP_POINTS;
    }
    if overlaps(target.states.as_deref(), candidate.states.as_deref()) {
        score += STATE_OVERLAP_POINTS;
    }
    if overlaps(
        target.education_levels.as_deref(),
        candidate.education_levels.as_deref(),
    ) {
        score += EDUCATION_OVERLAP_POINTS;
    }
    score
}

/// Rank `candidates` by rule overlap with `target`, best first, at most `limit`.
///
/// The target itself is skipped. When nothing overlaps, the first `limit`
/// candidates are returned in input order with a score of zero.
pub fn rank_by_similarity<'a, I>(
    target: &Scholarship,
    candidates: I,
    limit: usize,
) -> Vec<SimilarScholarship<'a>>
where
    I: IntoIterator<Item = &'a Scholarship>,
{
    let pool: Vec<&'a Scholarship> = candidates
        .into_iter()
        .filter(|candidate| candidate.id != target.id)
        .collect();

    let mut scored: Vec<SimilarScholarship<'a>> = pool
        .iter()
        .map(|candidate| SimilarScholarship {
            scholarship: *candidate,
            score: overlap_score(&target.eligibility_rules, &candidate.eligibility_rules),
        })
        .filter(|similar| similar.score > 0)
        .collect();

    if scored.is_empty() {
        return pool
            .into_iter()
            .take(limit)
            .map(|scholarship| SimilarScholarship {
                scholarship,
                score: 0,
            })
            .collect();
    }

    scored.sort_by(|left, right| right.score.cmp(&left.score));
    scored.truncate(limit);
    scored
}

fn overlaps(left: Option<&[String]>, right: Option<&[String]>) -> bool {
    match (left, right) {
        (Some(left), Some(right)) => left.iter().any(|entry| {
            let folded = entry.to_lowercase();
            right.iter().any(|other| other.to_lowercase() == folded)
        }),
        _ => false,
    }
}
