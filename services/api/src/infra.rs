use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use scholar_match::catalog::CatalogImporter;
use scholar_match::config::MatchingConfig;
use scholar_match::error::AppError;
use scholar_match::matching::{
    MatchRecord, MatchSink, Profile, ProfileSource, RepositoryError, Scholarship, ScholarshipId,
    ScholarshipSource, UserId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

const SAMPLE_CATALOG: &[u8] = include_bytes!("../../../crates/scholar-match/scholarships.csv");
const SAMPLE_PROFILES: &[u8] = include_bytes!("../data/profiles.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) matching: MatchingConfig,
}

/// Process-local stand-in for the profile, scholarship and match tables.
#[derive(Default)]
pub(crate) struct InMemoryStore {
    profiles: Mutex<HashMap<UserId, Profile>>,
    catalog: Mutex<Vec<Scholarship>>,
    applications: Mutex<HashMap<UserId, Vec<ScholarshipId>>>,
    matches: Mutex<HashMap<UserId, Vec<MatchRecord>>>,
}

impl InMemoryStore {
    pub(crate) fn new(catalog: Vec<Scholarship>, profiles: HashMap<UserId, Profile>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
            catalog: Mutex::new(catalog),
            ..Self::default()
        }
    }

    pub(crate) fn record_application(&self, user_id: &UserId, scholarship_id: ScholarshipId) {
        self.applications
            .lock()
            .expect("application mutex poisoned")
            .entry(user_id.clone())
            .or_default()
            .push(scholarship_id);
    }

    pub(crate) fn matches(&self, user_id: &UserId) -> Vec<MatchRecord> {
        self.matches
            .lock()
            .expect("match mutex poisoned")
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn profile_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self
            .profiles
            .lock()
            .expect("profile mutex poisoned")
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}

impl ProfileSource for InMemoryStore {
    fn profile(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }
}

impl ScholarshipSource for InMemoryStore {
    fn scholarships(&self) -> Result<Vec<Scholarship>, RepositoryError> {
        let guard = self.catalog.lock().expect("catalog mutex poisoned");
        Ok(guard.clone())
    }

    fn scholarship(&self, id: &ScholarshipId) -> Result<Option<Scholarship>, RepositoryError> {
        let guard = self.catalog.lock().expect("catalog mutex poisoned");
        Ok(guard.iter().find(|scholarship| &scholarship.id == id).cloned())
    }

    fn active_applications(&self, user_id: &UserId) -> Result<Vec<ScholarshipId>, RepositoryError> {
        let guard = self.applications.lock().expect("application mutex poisoned");
        Ok(guard.get(user_id).cloned().unwrap_or_default())
    }
}

impl MatchSink for InMemoryStore {
    fn replace_matches(
        &self,
        user_id: &UserId,
        records: Vec<MatchRecord>,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.matches.lock().expect("match mutex poisoned");
        guard.insert(user_id.clone(), records);
        Ok(())
    }
}

/// Catalog from `path`, or the bundled sample catalog.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<Vec<Scholarship>, AppError> {
    let catalog = match path {
        Some(path) => CatalogImporter::from_path(path)?,
        None => CatalogImporter::from_reader(SAMPLE_CATALOG)?,
    };
    Ok(catalog)
}

/// Profiles keyed by user id from a JSON object, or the bundled sample profiles.
pub(crate) fn load_profiles(path: Option<&Path>) -> Result<HashMap<UserId, Profile>, AppError> {
    let profiles = match path {
        Some(path) => serde_json::from_reader(File::open(path)?),
        None => serde_json::from_slice(SAMPLE_PROFILES),
    };
    profiles.map_err(|err| AppError::Io(err.into()))
}

pub(crate) fn load_profile(path: &Path) -> Result<Profile, AppError> {
    serde_json::from_reader(File::open(path)?).map_err(|err| AppError::Io(err.into()))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_data_loads() {
        let catalog = load_catalog(None).expect("sample catalog");
        let profiles = load_profiles(None).expect("sample profiles");

        assert!(!catalog.is_empty());
        let ananya = profiles
            .get(&UserId("ananya".to_string()))
            .expect("ananya present");
        assert_eq!(ananya.name.as_deref(), Some("Ananya Rao"));
        assert_eq!(ananya.marks, Some(88.0));
    }

    #[test]
    fn store_tracks_applications_and_matches() {
        let store = InMemoryStore::new(
            load_catalog(None).expect("sample catalog"),
            load_profiles(None).expect("sample profiles"),
        );
        let user = UserId("rahul".to_string());

        store.record_application(&user, ScholarshipId("nsp-post-matric-sc".to_string()));
        assert_eq!(
            store.active_applications(&user).expect("applications"),
            vec![ScholarshipId("nsp-post-matric-sc".to_string())]
        );

        store
            .replace_matches(&user, Vec::new())
            .expect("replace succeeds");
        assert!(store.matches(&user).is_empty());
        assert_eq!(store.profile_ids().len(), 3);
    }

    #[test]
    fn single_profile_file_loads() {
        let profile = load_profile(Path::new("data/profile.json")).expect("profile loads");
        assert_eq!(profile.field_of_study.as_deref(), Some("Computer Science"));
        assert!(matches!(
            load_profile(Path::new("data/missing.json")),
            Err(AppError::Io(_))
        ));
    }

    #[test]
    fn parse_date_reports_bad_input() {
        assert_eq!(
            parse_date(" 2025-10-15 "),
            Ok(NaiveDate::from_ymd_opt(2025, 10, 15).expect("valid date"))
        );
        assert!(parse_date("15/10/2025").is_err());
    }
}
