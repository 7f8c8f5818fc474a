//! Scholarship catalog import from the admin CSV export.
//!
//! Cells are free text the way the authoring form collects them: comma-joined
//! lists, numbers with currency symbols, blanks for "no restriction".

mod parser;

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::{json, Value};
use tracing::warn;

use crate::matching::domain::{Scholarship, ScholarshipId};
use crate::matching::rules::{parse_lenient_number, split_list, EligibilityRules, ANY_GENDER};
use parser::{parse_deadline, parse_rows, split_steps, CatalogRow};

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidDeadline { row: usize, value: String },
    InvalidAmount { row: usize, value: String },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read scholarship catalog: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid scholarship catalog CSV: {}", err),
            CatalogImportError::InvalidDeadline { row, value } => {
                write!(f, "row {row}: deadline '{value}' is not a date")
            }
            CatalogImportError::InvalidAmount { row, value } => {
                write!(f, "row {row}: amount '{value}' is not a number")
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::InvalidDeadline { .. } | CatalogImportError::InvalidAmount { .. } => {
                None
            }
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Scholarship>, CatalogImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows repeating an earlier id are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Scholarship>, CatalogImportError> {
        let mut seen: HashSet<ScholarshipId> = HashSet::new();
        let mut scholarships = Vec::new();

        for (index, row) in parse_rows(reader)?.into_iter().enumerate() {
            let scholarship = scholarship_from_row(index + 1, row)?;
            if !seen.insert(scholarship.id.clone()) {
                warn!(id = %scholarship.id, "skipping duplicate catalog row");
                continue;
            }
            scholarships.push(scholarship);
        }

        Ok(scholarships)
    }
}

fn scholarship_from_row(line: usize, row: CatalogRow) -> Result<Scholarship, CatalogImportError> {
    let amount = match row.amount.as_deref() {
        Some(raw) => Some(parse_lenient_number(raw).ok_or_else(|| {
            CatalogImportError::InvalidAmount {
                row: line,
                value: raw.to_string(),
            }
        })?),
        None => None,
    };

    let deadline = match row.deadline.as_deref() {
        Some(raw) => Some(parse_deadline(raw).ok_or_else(|| {
            CatalogImportError::InvalidDeadline {
                row: line,
                value: raw.to_string(),
            }
        })?),
        None => None,
    };

    let eligibility_rules = match row.eligibility_rules.as_deref() {
        Some(raw) => EligibilityRules::from_json_str(raw),
        None => EligibilityRules::from_value(&authored_rules(&row)),
    };

    Ok(Scholarship {
        id: ScholarshipId(row.id.unwrap_or_else(|| format!("sch-{line:04}"))),
        title: row.title,
        description: row.description,
        amount,
        deadline,
        source: row.source,
        external_url: row.external_url,
        application_steps: split_steps(&row.application_steps),
        required_documents: split_list(&row.required_documents),
        eligibility_rules,
    })
}

/// Rules document shaped like the authoring form's output: blank numbers become
/// zero and a blank gender becomes "Any".
fn authored_rules(row: &CatalogRow) -> Value {
    let gender = match row.gender.trim() {
        "" => ANY_GENDER,
        other => other,
    };

    json!({
        "minMarks": parse_lenient_number(&row.min_marks).unwrap_or(0.0),
        "maxIncome": parse_lenient_number(&row.max_income).unwrap_or(0.0),
        "states": split_list(&row.states),
        "categories": split_list(&row.categories),
        "educationLevels": split_list(&row.education_levels),
        "gender": gender,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::rules::GenderRule;
    use chrono::NaiveDate;
    use std::io::Cursor;

    const HEADER: &str = "id,title,description,amount,deadline,source,external_url,min_marks,max_income,states,categories,education_levels,gender,required_documents,application_steps,eligibility_rules\n";

    fn import(body: &str) -> Result<Vec<Scholarship>, CatalogImportError> {
        CatalogImporter::from_reader(Cursor::new(format!("{HEADER}{body}")))
    }

    #[test]
    fn comma_joined_cells_become_rule_lists() {
        let scholarships = import(
            "nsp-1,Post Matric,For SC/ST students,\"₹12,000\",2025-11-30,Government,https://scholarships.gov.in,60%,\"2,50,000\",\"Maharashtra, Delhi\",\"SC, ST\",Bachelors,,\"Aadhaar, Income Certificate\",Register on portal | Upload documents,\n",
        )
        .expect("import succeeds");

        let scholarship = &scholarships[0];
        assert_eq!(scholarship.id, ScholarshipId("nsp-1".to_string()));
        assert_eq!(scholarship.amount, Some(12_000.0));
        assert_eq!(
            scholarship.deadline,
            NaiveDate::from_ymd_opt(2025, 11, 30)
        );
        assert_eq!(
            scholarship.required_documents,
            vec!["Aadhaar".to_string(), "Income Certificate".to_string()]
        );
        assert_eq!(
            scholarship.application_steps,
            vec!["Register on portal".to_string(), "Upload documents".to_string()]
        );

        let rules = &scholarship.eligibility_rules;
        assert_eq!(rules.min_marks, Some(60.0));
        assert_eq!(rules.max_income, Some(250_000.0));
        assert_eq!(
            rules.states,
            Some(vec!["Maharashtra".to_string(), "Delhi".to_string()])
        );
        assert_eq!(rules.gender, Some(GenderRule::Any));
    }

    #[test]
    fn blank_cells_impose_no_restriction() {
        let scholarships = import(",Open Grant,,,,,,,,,,,,,,\n").expect("import succeeds");
        let scholarship = &scholarships[0];

        assert_eq!(scholarship.id, ScholarshipId("sch-0001".to_string()));
        assert_eq!(scholarship.deadline, None);
        assert_eq!(scholarship.eligibility_rules.min_marks, None);
        assert_eq!(scholarship.eligibility_rules.max_income, None);
        assert_eq!(scholarship.eligibility_rules.states, Some(Vec::new()));
    }

    #[test]
    fn raw_rules_cell_overrides_columns_and_fails_open() {
        let scholarships = import(
            "a,With JSON,,,,,,90,,Goa,,,,,,\"{\"\"sex\"\": \"\"Female\"\"}\"\nb,Broken JSON,,,,,,90,,Goa,,,,,,{not json\n",
        )
        .expect("import succeeds");

        assert_eq!(
            scholarships[0].eligibility_rules.gender,
            Some(GenderRule::OneOf(vec!["Female".to_string()]))
        );
        assert_eq!(scholarships[0].eligibility_rules.min_marks, None);
        assert!(scholarships[1].eligibility_rules.is_empty());
    }

    #[test]
    fn rfc3339_deadlines_are_accepted() {
        let scholarships =
            import("x,Timed,,,2025-12-01T18:30:00Z,,,,,,,,,,,\n").expect("import succeeds");
        assert_eq!(scholarships[0].deadline, NaiveDate::from_ymd_opt(2025, 12, 1));
    }

    #[test]
    fn invalid_deadline_reports_row() {
        let error = import("ok,Fine,,,2025-01-01,,,,,,,,,,,\nbad,Broken,,,next week,,,,,,,,,,,\n")
            .expect_err("deadline rejected");
        match error {
            CatalogImportError::InvalidDeadline { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "next week");
            }
            other => panic!("expected deadline error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_ids_keep_the_first_row() {
        let scholarships =
            import("dup,First,,,,,,,,,,,,,,\ndup,Second,,,,,,,,,,,,,,\n").expect("import succeeds");
        assert_eq!(scholarships.len(), 1);
        assert_eq!(scholarships[0].title, "First");
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = CatalogImporter::from_path("./does-not-exist.csv").expect_err("io error");
        assert!(matches!(error, CatalogImportError::Io(_)));
    }
}
