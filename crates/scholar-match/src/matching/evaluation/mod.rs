mod criteria;

pub use criteria::Criterion;

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{Profile, Scholarship};
use criteria::{check, describe, Verdict, EVALUATION_ORDER, REASON_ORDER};

/// Satisfied criterion surfaced to the student as an explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReason {
    pub criterion: Criterion,
    pub detail: String,
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

/// Admissibility verdict. Stops at the first violated criterion.
///
/// Missing rules, unreadable bounds and blank profile fields never reject.
pub fn is_eligible(scholarship: &Scholarship, profile: &Profile) -> bool {
    let rules = &scholarship.eligibility_rules;
    if rules.is_empty() {
        return true;
    }

    EVALUATION_ORDER
        .iter()
        .all(|criterion| check(*criterion, rules, profile) != Verdict::Violated)
}

/// Criteria that are constrained on both sides and satisfied, in display order.
/// An `"Any"` gender or an empty list is not reported.
pub fn match_reasons(scholarship: &Scholarship, profile: &Profile) -> Vec<MatchReason> {
    let rules = &scholarship.eligibility_rules;
    REASON_ORDER
        .iter()
        .filter(|criterion| check(**criterion, rules, profile) == Verdict::Satisfied)
        .map(|criterion| MatchReason {
            criterion: *criterion,
            detail: describe(*criterion, rules, profile),
        })
        .collect()
}

/// Criteria the profile fails, in display order. Empty exactly when eligible.
pub fn unmet_criteria(scholarship: &Scholarship, profile: &Profile) -> Vec<Criterion> {
    let rules = &scholarship.eligibility_rules;
    REASON_ORDER
        .iter()
        .copied()
        .filter(|criterion| check(*criterion, rules, profile) == Verdict::Violated)
        .collect()
}
