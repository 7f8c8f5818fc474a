use crate::cli::ServeArgs;
use crate::infra::{load_catalog, load_profiles, AppState, InMemoryStore};
use crate::routes::with_match_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scholar_match::config::AppConfig;
use scholar_match::error::AppError;
use scholar_match::matching::MatchService;
use scholar_match::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        matching: config.matching.clone(),
    };

    let catalog = load_catalog(args.catalog.as_deref())?;
    let profiles = load_profiles(args.profiles.as_deref())?;
    info!(
        scholarships = catalog.len(),
        profiles = profiles.len(),
        "loaded scholarship catalog"
    );

    let store = Arc::new(InMemoryStore::new(catalog, profiles));
    let match_service = Arc::new(MatchService::new(
        store.clone(),
        store.clone(),
        store,
        config.matching.clone(),
    ));

    let app = with_match_routes(match_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scholarship matcher ready");

    axum::serve(listener, app).await?;
    Ok(())
}
