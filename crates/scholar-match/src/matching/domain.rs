use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::rules::{parse_lenient_number, EligibilityRules};

/// Identifier wrapper for student accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

/// Identifier wrapper for scholarship listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScholarshipId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for ScholarshipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Student attributes consulted by the eligibility rules and the relevance ranker.
///
/// Every field is optional. A rule evaluated against a missing (or blank) field
/// is treated as satisfied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(alias = "full_name")]
    pub name: Option<String>,
    pub state: Option<String>,
    pub category: Option<String>,
    pub gender: Option<String>,
    pub education_level: Option<String>,
    pub field_of_study: Option<String>,
    pub current_year: Option<u8>,
    #[serde(deserialize_with = "lenient_number")]
    pub marks: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub family_income: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Accepts a number or numeric text like `"₹3,00,000"`; anything unreadable becomes `None`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    let parsed = match value {
        Some(NumberOrText::Number(number)) => Some(number),
        Some(NumberOrText::Text(raw)) => parse_lenient_number(&raw),
        Some(NumberOrText::Other(_)) | None => None,
    };
    Ok(parsed.filter(|number| number.is_finite()))
}

impl Profile {
    /// Free text describing what the student studies, used as the relevance query.
    pub fn interest_text(&self) -> String {
        format!(
            "{} {}",
            self.field_of_study.as_deref().unwrap_or_default(),
            self.education_level.as_deref().unwrap_or_default()
        )
    }
}

/// Scholarship listing as stored by the admin surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scholarship {
    pub id: ScholarshipId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub application_steps: Vec<String>,
    #[serde(default)]
    pub required_documents: Vec<String>,
    #[serde(default)]
    pub eligibility_rules: EligibilityRules,
}

impl Scholarship {
    /// Title and description joined, the document compared against a profile's interests.
    pub fn content_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}
