use crate::infra::{load_catalog, load_profile, load_profiles, parse_date, InMemoryStore};
use chrono::{Local, NaiveDate};
use clap::Args;
use scholar_match::config::MatchingConfig;
use scholar_match::error::AppError;
use scholar_match::matching::{
    MatchService, MatchSummary, Profile, ScholarshipId, SimilarListing, UserId,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

type StoreService = MatchService<InMemoryStore, InMemoryStore, InMemoryStore>;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Profile JSON file
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Scholarship catalog CSV (defaults to the bundled sample)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Maximum number of matches to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct SimilarArgs {
    /// Listing to find neighbours for
    #[arg(long)]
    pub(crate) scholarship_id: String,
    /// Scholarship catalog CSV (defaults to the bundled sample)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Maximum number of listings to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        profile,
        catalog,
        today,
        limit,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let profile = load_profile(&profile)?;
    let user_id = UserId("cli".to_string());

    let mut profiles = HashMap::new();
    profiles.insert(user_id.clone(), profile.clone());
    let store = Arc::new(InMemoryStore::new(load_catalog(catalog.as_deref())?, profiles));

    let mut config = MatchingConfig::default();
    if let Some(limit) = limit {
        config.response_limit = limit;
    }
    let service = store_service(&store, config);

    let summary = service.refresh_matches(&user_id, today)?;
    render_matches(&profile, &summary, today);
    Ok(())
}

pub(crate) fn run_similar(args: SimilarArgs) -> Result<(), AppError> {
    let SimilarArgs {
        scholarship_id,
        catalog,
        limit,
    } = args;

    let store = Arc::new(InMemoryStore::new(
        load_catalog(catalog.as_deref())?,
        HashMap::new(),
    ));
    let mut config = MatchingConfig::default();
    if let Some(limit) = limit {
        config.similar_limit = limit;
    }
    let service = store_service(&store, config);

    let similar = service.similar(&ScholarshipId(scholarship_id.clone()))?;
    println!("Scholarships similar to {scholarship_id}");
    render_similar(&similar);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let store = Arc::new(InMemoryStore::new(load_catalog(None)?, load_profiles(None)?));
    let profile_ids = store.profile_ids();
    if let Some(first) = profile_ids.first() {
        store.record_application(first, ScholarshipId("aicte-pragati".to_string()));
    }
    let service = store_service(&store, MatchingConfig::default());

    println!("Scholarship matching demo (evaluated {today})");

    for user_id in &profile_ids {
        let summary = service.refresh_matches(user_id, today)?;
        println!("\n== {user_id} ==");
        let pragati = service.eligibility(&ScholarshipId("aicte-pragati".to_string()), user_id)?;
        if !pragati.eligible {
            println!(
                "AICTE Pragati unmet criteria: {}",
                pragati
                    .unmet_criteria
                    .iter()
                    .map(|criterion| criterion.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        render_summary(&summary);
        println!("Cached match records: {}", store.matches(user_id).len());

        let reminders = service.closing_soon(user_id, today)?;
        if reminders.is_empty() {
            println!("Closing soon: none");
        } else {
            println!("Closing soon");
            for entry in &reminders {
                println!(
                    "- {} closes {} ({} days left)",
                    entry.title, entry.deadline, entry.days_remaining
                );
            }
        }

        if let Some(top) = summary.matches.first() {
            println!("Similar to {}", top.scholarship.title);
            render_similar(&service.similar(&top.scholarship.id)?);
        }
    }

    let stale = service.stale_listings(today)?;
    if stale.is_empty() {
        println!("\nStale listings: none");
    } else {
        println!("\nStale listings ready for cleanup");
        for id in &stale {
            println!("- {id}");
        }
    }

    Ok(())
}

fn store_service(store: &Arc<InMemoryStore>, config: MatchingConfig) -> StoreService {
    MatchService::new(store.clone(), store.clone(), store.clone(), config)
}

fn render_matches(profile: &Profile, summary: &MatchSummary, today: NaiveDate) {
    let name = profile.name.as_deref().unwrap_or("Student");
    println!("Scholarship matches for {name} (evaluated {today})");
    render_summary(summary);
}

fn render_summary(summary: &MatchSummary) {
    println!(
        "{} eligible scholarships, showing {}",
        summary.total_eligible,
        summary.matches.len()
    );

    for (rank, entry) in summary.matches.iter().enumerate() {
        let deadline = entry
            .scholarship
            .deadline
            .map(|date| date.to_string())
            .unwrap_or_else(|| "rolling".to_string());
        println!(
            "{}. {} | relevance {:.2} | deadline {}",
            rank + 1,
            entry.scholarship.title,
            entry.match_score,
            deadline
        );
        for reason in &entry.match_reasons {
            println!("   - {reason}");
        }
    }
}

fn render_similar(similar: &[SimilarListing]) {
    if similar.is_empty() {
        println!("- none");
        return;
    }

    for entry in similar {
        println!("- {} (overlap {})", entry.scholarship.title, entry.score);
    }
}
