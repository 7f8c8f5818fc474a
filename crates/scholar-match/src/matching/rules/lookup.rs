use serde_json::{Map, Value};

pub(crate) const MIN_MARKS_KEYS: &[&str] = &["minMarks", "min_marks", "marks", "percentage"];
pub(crate) const MAX_INCOME_KEYS: &[&str] = &["maxIncome", "max_income", "familyIncome", "income"];
pub(crate) const EDUCATION_KEYS: &[&str] = &["educationLevels", "education_level", "educationLevel"];
pub(crate) const STATE_KEYS: &[&str] = &["states", "state", "domicile"];
pub(crate) const CATEGORY_KEYS: &[&str] = &["categories", "category", "caste"];
pub(crate) const GENDER_KEYS: &[&str] = &["gender", "sex"];

/// Resolve a synonym group against a rules document.
///
/// Synonyms are tried in order; for each one an exact key wins over a
/// case-insensitive match. Null and blank values count as missing.
pub(crate) fn find_value<'a>(rules: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    for key in keys {
        if let Some(value) = rules.get(*key).filter(|value| is_populated(value)) {
            return Some(value);
        }

        let folded = rules
            .iter()
            .find(|(candidate, _)| candidate.to_lowercase() == key.to_lowercase())
            .map(|(_, value)| value);
        if let Some(value) = folded.filter(|value| is_populated(value)) {
            return Some(value);
        }
    }

    None
}

fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(raw) => !raw.trim().is_empty(),
        _ => true,
    }
}

/// Numeric bound for marks/income rules. Zero and unparseable values impose no bound.
pub(crate) fn numeric_bound(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => parse_lenient_number(raw),
        _ => None,
    };

    parsed.filter(|bound| bound.is_finite() && *bound != 0.0)
}

/// Parse currency or percentage text such as `"₹5,00,000"` or `"85%"`.
///
/// Everything except ASCII digits and `.` is discarded, then the longest
/// numeric prefix is converted, so `"1.5.2"` reads as `1.5`.
pub fn parse_lenient_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    for (index, c) in cleaned.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        end = index + c.len_utf8();
    }

    cleaned[..end].parse::<f64>().ok()
}

/// Values of an inclusion rule. Arrays are taken element-wise; scalar text is
/// read as a hand-authored comma-separated list.
pub(crate) fn list_values(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(scalar_text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect(),
        other => scalar_text(other)
            .map(|text| split_list(&text))
            .unwrap_or_default(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(raw) => Some(raw.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Split `"Maharashtra, Delhi"` into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
