use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::config::MatchingConfig;
use crate::matching::domain::{Profile, Scholarship, ScholarshipId, UserId};
use crate::matching::repository::{
    MatchRecord, MatchSink, ProfileSource, RepositoryError, ScholarshipSource,
};
use crate::matching::rules::EligibilityRules;
use crate::matching::{match_router, MatchService};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn today() -> NaiveDate {
    date(2025, 10, 15)
}

pub(super) fn student() -> Profile {
    Profile {
        name: Some("Ananya Rao".to_string()),
        state: Some("Karnataka".to_string()),
        category: Some("General".to_string()),
        gender: Some("Female".to_string()),
        education_level: Some("Bachelors".to_string()),
        field_of_study: Some("Computer Science".to_string()),
        current_year: Some(2),
        marks: Some(88.0),
        family_income: Some(300_000.0),
    }
}

pub(super) fn listing(id: &str, title: &str, rules: Value) -> Scholarship {
    Scholarship {
        id: ScholarshipId(id.to_string()),
        title: title.to_string(),
        description: String::new(),
        amount: Some(50_000.0),
        deadline: None,
        source: Some("State Government".to_string()),
        external_url: None,
        application_steps: Vec::new(),
        required_documents: vec!["Aadhaar".to_string()],
        eligibility_rules: EligibilityRules::from_value(&rules),
    }
}

pub(super) fn described(id: &str, title: &str, description: &str) -> Scholarship {
    let mut scholarship = listing(id, title, Value::Null);
    scholarship.description = description.to_string();
    scholarship
}

pub(super) fn karnataka_rules() -> Value {
    json!({
        "minMarks": 80,
        "maxIncome": 500000,
        "states": ["Karnataka", "Kerala"],
        "categories": ["General", "OBC"],
        "gender": "Any",
        "educationLevels": ["Bachelors", "Masters"],
    })
}

/// Catalog used by the service and routing tests, relative to [`today`].
pub(super) fn catalog() -> Vec<Scholarship> {
    let mut engineering = listing(
        "sch-engineering",
        "Computer Science Merit Award",
        karnataka_rules(),
    );
    engineering.description = "Support for bachelors students in computer science".to_string();
    engineering.deadline = Some(date(2025, 10, 20));

    let mut arts = listing(
        "sch-arts",
        "Fine Arts Fellowship",
        json!({ "states": "Karnataka, Goa", "educationLevels": ["Bachelors"] }),
    );
    arts.description = "Painting and sculpture".to_string();
    arts.deadline = Some(date(2025, 12, 31));

    let mut expired = listing("sch-expired", "Computer Science Summer Grant", Value::Null);
    expired.deadline = Some(date(2025, 9, 1));

    let high_bar = listing("sch-toppers", "Toppers Scholarship", json!({ "percentage": "95%" }));

    let mut applied = listing("sch-applied", "Science Bursary", Value::Null);
    applied.deadline = Some(date(2025, 10, 18));

    vec![engineering, arts, expired, high_bar, applied]
}

#[derive(Default)]
pub(super) struct MemoryProfiles {
    profiles: Mutex<HashMap<UserId, Profile>>,
}

impl MemoryProfiles {
    pub(super) fn with(user_id: &UserId, profile: Profile) -> Self {
        let store = Self::default();
        store
            .profiles
            .lock()
            .expect("profile mutex poisoned")
            .insert(user_id.clone(), profile);
        store
    }
}

impl ProfileSource for MemoryProfiles {
    fn profile(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError> {
        Ok(self
            .profiles
            .lock()
            .expect("profile mutex poisoned")
            .get(user_id)
            .cloned())
    }
}

#[derive(Default)]
pub(super) struct MemoryScholarships {
    listings: Vec<Scholarship>,
    applications: HashMap<UserId, Vec<ScholarshipId>>,
}

impl MemoryScholarships {
    pub(super) fn new(listings: Vec<Scholarship>) -> Self {
        Self {
            listings,
            applications: HashMap::new(),
        }
    }

    pub(super) fn with_application(mut self, user_id: &UserId, scholarship_id: &str) -> Self {
        self.applications
            .entry(user_id.clone())
            .or_default()
            .push(ScholarshipId(scholarship_id.to_string()));
        self
    }
}

impl ScholarshipSource for MemoryScholarships {
    fn scholarships(&self) -> Result<Vec<Scholarship>, RepositoryError> {
        Ok(self.listings.clone())
    }

    fn scholarship(&self, id: &ScholarshipId) -> Result<Option<Scholarship>, RepositoryError> {
        Ok(self
            .listings
            .iter()
            .find(|scholarship| &scholarship.id == id)
            .cloned())
    }

    fn active_applications(&self, user_id: &UserId) -> Result<Vec<ScholarshipId>, RepositoryError> {
        Ok(self.applications.get(user_id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub(super) struct MemorySink {
    records: Mutex<HashMap<UserId, Vec<MatchRecord>>>,
    writes: Mutex<usize>,
}

impl MemorySink {
    pub(super) fn records(&self, user_id: &UserId) -> Vec<MatchRecord> {
        self.records
            .lock()
            .expect("sink mutex poisoned")
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub(super) fn writes(&self) -> usize {
        *self.writes.lock().expect("sink mutex poisoned")
    }
}

impl MatchSink for MemorySink {
    fn replace_matches(
        &self,
        user_id: &UserId,
        records: Vec<MatchRecord>,
    ) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .expect("sink mutex poisoned")
            .insert(user_id.clone(), records);
        *self.writes.lock().expect("sink mutex poisoned") += 1;
        Ok(())
    }
}

pub(super) struct UnavailableScholarships;

impl ScholarshipSource for UnavailableScholarships {
    fn scholarships(&self) -> Result<Vec<Scholarship>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn scholarship(&self, _id: &ScholarshipId) -> Result<Option<Scholarship>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn active_applications(&self, _user_id: &UserId) -> Result<Vec<ScholarshipId>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) type MemoryService = MatchService<MemoryProfiles, MemoryScholarships, MemorySink>;

pub(super) fn user() -> UserId {
    UserId("user-42".to_string())
}

/// Service over [`catalog`] where [`user`] already applied to `sch-applied`.
pub(super) fn build_service() -> (MemoryService, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::default());
    let service = MatchService::new(
        Arc::new(MemoryProfiles::with(&user(), student())),
        Arc::new(MemoryScholarships::new(catalog()).with_application(&user(), "sch-applied")),
        sink.clone(),
        MatchingConfig::default(),
    );
    (service, sink)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    match_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
