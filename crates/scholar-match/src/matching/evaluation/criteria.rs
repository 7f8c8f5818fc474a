use serde::{Deserialize, Serialize};

use super::super::domain::Profile;
use super::super::rules::{EligibilityRules, GenderRule};

/// Eligibility dimensions understood by the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    State,
    Category,
    Income,
    Marks,
    Gender,
    Education,
}

impl Criterion {
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::State => "state",
            Criterion::Category => "category",
            Criterion::Income => "income",
            Criterion::Marks => "marks",
            Criterion::Gender => "gender",
            Criterion::Education => "education",
        }
    }
}

/// Gating order; cheap numeric checks first.
pub(crate) const EVALUATION_ORDER: [Criterion; 6] = [
    Criterion::Marks,
    Criterion::Income,
    Criterion::Education,
    Criterion::State,
    Criterion::Category,
    Criterion::Gender,
];

/// Display order for match reasons.
pub(crate) const REASON_ORDER: [Criterion; 6] = [
    Criterion::State,
    Criterion::Category,
    Criterion::Income,
    Criterion::Marks,
    Criterion::Gender,
    Criterion::Education,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    Unconstrained,
    Satisfied,
    Violated,
}

pub(crate) fn check(criterion: Criterion, rules: &EligibilityRules, profile: &Profile) -> Verdict {
    match criterion {
        Criterion::Marks => bound(rules.min_marks, profile.marks, |marks, min| marks >= min),
        Criterion::Income => bound(rules.max_income, profile.family_income, |income, max| {
            income <= max
        }),
        Criterion::Education => inclusion(
            rules.education_levels.as_deref(),
            profile.education_level.as_deref(),
        ),
        Criterion::State => inclusion(rules.states.as_deref(), profile.state.as_deref()),
        Criterion::Category => inclusion(rules.categories.as_deref(), profile.category.as_deref()),
        Criterion::Gender => match &rules.gender {
            Some(GenderRule::OneOf(values)) => {
                inclusion(Some(values.as_slice()), profile.gender.as_deref())
            }
            Some(GenderRule::Any) | None => Verdict::Unconstrained,
        },
    }
}

/// Human-readable explanation of a satisfied criterion.
pub(crate) fn describe(criterion: Criterion, rules: &EligibilityRules, profile: &Profile) -> String {
    let text = |value: &Option<String>| value.as_deref().unwrap_or_default().trim().to_string();
    match criterion {
        Criterion::State => format!("State: {}", text(&profile.state)),
        Criterion::Category => format!("Category: {}", text(&profile.category)),
        Criterion::Income => format!(
            "Income: {} (within limit of {})",
            format_amount(profile.family_income.unwrap_or_default()),
            format_amount(rules.max_income.unwrap_or_default())
        ),
        Criterion::Marks => format!(
            "Marks: {}% (meets minimum of {}%)",
            format_amount(profile.marks.unwrap_or_default()),
            format_amount(rules.min_marks.unwrap_or_default())
        ),
        Criterion::Gender => format!("Gender: {}", text(&profile.gender)),
        Criterion::Education => format!("Education: {}", text(&profile.education_level)),
    }
}

fn bound(rule: Option<f64>, value: Option<f64>, passes: impl Fn(f64, f64) -> bool) -> Verdict {
    match (rule, value) {
        (Some(limit), Some(value)) if value.is_finite() => {
            if passes(value, limit) {
                Verdict::Satisfied
            } else {
                Verdict::Violated
            }
        }
        _ => Verdict::Unconstrained,
    }
}

fn inclusion(rule: Option<&[String]>, value: Option<&str>) -> Verdict {
    let value = value.map(str::trim).filter(|value| !value.is_empty());
    match (rule, value) {
        (Some(allowed), Some(value)) if !allowed.is_empty() => {
            let folded = value.to_lowercase();
            if allowed.iter().any(|entry| entry.to_lowercase() == folded) {
                Verdict::Satisfied
            } else {
                Verdict::Violated
            }
        }
        _ => Verdict::Unconstrained,
    }
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
