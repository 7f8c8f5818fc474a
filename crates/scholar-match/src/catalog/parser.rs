use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Raw CSV row as written by the admin export.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) id: Option<String>,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) amount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) deadline: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) source: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) external_url: Option<String>,
    #[serde(default)]
    pub(crate) min_marks: String,
    #[serde(default)]
    pub(crate) max_income: String,
    #[serde(default)]
    pub(crate) states: String,
    #[serde(default)]
    pub(crate) categories: String,
    #[serde(default)]
    pub(crate) education_levels: String,
    #[serde(default)]
    pub(crate) gender: String,
    #[serde(default)]
    pub(crate) required_documents: String,
    #[serde(default)]
    pub(crate) application_steps: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub(crate) eligibility_rules: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CatalogRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<CatalogRow>().collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub(crate) fn parse_deadline(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.naive_utc().date())
}

/// Application steps are pipe-separated since the steps themselves contain commas.
pub(crate) fn split_steps(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .map(str::to_string)
        .collect()
}
