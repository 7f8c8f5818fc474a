//! Typed eligibility rules parsed from admin-authored documents.
//!
//! Scholarship rules arrive as loose JSON: structured objects, JSON-encoded
//! strings, spelling variants of every key, comma-joined text where arrays are
//! expected. [`EligibilityRules::from_value`] is the single ingestion point; it
//! never fails, and anything it cannot read imposes no restriction.

mod lookup;

pub use lookup::{parse_lenient_number, split_list};

use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use lookup::{
    find_value, list_values, numeric_bound, CATEGORY_KEYS, EDUCATION_KEYS, GENDER_KEYS,
    MAX_INCOME_KEYS, MIN_MARKS_KEYS, STATE_KEYS,
};

/// Literal an admin writes to lift the gender restriction.
pub const ANY_GENDER: &str = "Any";

/// Normalized eligibility constraints attached to a scholarship.
///
/// `None` means the criterion is unconstrained. An empty list is also
/// unconstrained but is kept so the document round-trips.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_marks: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_income: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_levels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<GenderRule>,
}

impl EligibilityRules {
    /// Normalize any rules representation. Strings are decoded as JSON; a
    /// string that does not decode, or any non-object value, yields no rules.
    /// An array document contributes its first element.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            Value::String(raw) => match serde_json::from_str::<Value>(raw) {
                Ok(decoded @ (Value::Object(_) | Value::Array(_))) => Self::from_value(&decoded),
                _ => Self::default(),
            },
            Value::Array(items) => items.first().map(Self::from_value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Parse a raw JSON document, failing open.
    pub fn from_json_str(raw: &str) -> Self {
        Self::from_value(&Value::String(raw.to_string()))
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            min_marks: find_value(map, MIN_MARKS_KEYS).and_then(numeric_bound),
            max_income: find_value(map, MAX_INCOME_KEYS).and_then(numeric_bound),
            education_levels: find_value(map, EDUCATION_KEYS).map(list_values),
            states: find_value(map, STATE_KEYS).map(list_values),
            categories: find_value(map, CATEGORY_KEYS).map(list_values),
            gender: find_value(map, GENDER_KEYS).map(GenderRule::from_value),
        }
    }

    /// True when no criterion is present at all.
    pub fn is_empty(&self) -> bool {
        self.min_marks.is_none()
            && self.max_income.is_none()
            && self.education_levels.is_none()
            && self.states.is_none()
            && self.categories.is_none()
            && self.gender.is_none()
    }
}

impl<'de> Deserialize<'de> for EligibilityRules {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Gender restriction. `Any` is only produced by the exact literal `"Any"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenderRule {
    Any,
    OneOf(Vec<String>),
}

impl GenderRule {
    fn from_value(value: &Value) -> Self {
        let any = match value {
            Value::String(raw) => raw == ANY_GENDER,
            Value::Array(items) => items.iter().any(|item| item.as_str() == Some(ANY_GENDER)),
            _ => false,
        };

        if any {
            GenderRule::Any
        } else {
            GenderRule::OneOf(list_values(value))
        }
    }

    /// Whether the rule names specific genders.
    pub fn is_specific(&self) -> bool {
        matches!(self, GenderRule::OneOf(values) if !values.is_empty())
    }
}

impl Serialize for GenderRule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            GenderRule::Any => serializer.serialize_str(ANY_GENDER),
            GenderRule::OneOf(values) if values.len() == 1 => serializer.serialize_str(&values[0]),
            GenderRule::OneOf(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
        }
    }
}
