use chrono::NaiveDate;
use scholar_match::catalog::{CatalogImportError, CatalogImporter};
use scholar_match::matching::{GenderRule, ScholarshipId};

#[test]
fn importer_handles_sample_catalog() {
    let data = include_bytes!("../scholarships.csv");
    let scholarships = CatalogImporter::from_reader(&data[..]).expect("sample catalog imports");

    assert_eq!(scholarships.len(), 6);

    let nsp = &scholarships[0];
    assert_eq!(nsp.id, ScholarshipId("nsp-post-matric-sc".to_string()));
    assert_eq!(nsp.amount, Some(12_000.0));
    assert_eq!(nsp.deadline, NaiveDate::from_ymd_opt(2025, 11, 30));
    assert_eq!(nsp.application_steps.len(), 4);
    assert_eq!(
        nsp.eligibility_rules.education_levels,
        Some(vec![
            "Higher Secondary".to_string(),
            "Bachelors".to_string(),
            "Masters".to_string()
        ])
    );
    assert_eq!(nsp.eligibility_rules.gender, Some(GenderRule::Any));

    let pragati = scholarships
        .iter()
        .find(|scholarship| scholarship.id.0 == "aicte-pragati")
        .expect("pragati present");
    assert_eq!(
        pragati.eligibility_rules.gender,
        Some(GenderRule::OneOf(vec!["Female".to_string()]))
    );
    assert_eq!(pragati.eligibility_rules.max_income, Some(800_000.0));

    let open = scholarships.last().expect("rows present");
    assert_eq!(open.deadline, None);
    assert!(open.required_documents.is_empty());
}

#[test]
fn importer_rejects_unreadable_amounts() {
    let csv = "id,title,amount\nsch-1,Grant,to be announced\n";
    let error = CatalogImporter::from_reader(csv.as_bytes()).expect_err("amount rejected");
    assert!(matches!(
        error,
        CatalogImportError::InvalidAmount { row: 1, .. }
    ));
}

#[test]
fn importer_requires_a_title_column() {
    let csv = "id,description\nsch-1,No title here\n";
    let error = CatalogImporter::from_reader(csv.as_bytes()).expect_err("title required");
    assert!(matches!(error, CatalogImportError::Csv(_)));
}
