use crate::cli::ServeArgs;
use crate::infra::{fixture_grants, seed_fixtures, AppState, Board, StaticTokenVerifier};
use crate::routes::with_board_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_board::config::{AppConfig, AppEnvironment};
use job_board::error::AppError;
use job_board::identity::SharedVerifier;
use job_board::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    let seed = args.seed || config.seed_fixtures;

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let board = Board::in_memory();
    let mut grants = config.auth.tokens.clone();
    if seed {
        if config.environment == AppEnvironment::Production {
            warn!("seeding fixture data and tokens in production");
        }
        let summary = seed_fixtures(&board)?;
        grants.extend(fixture_grants());
        info!(
            jobs = summary.jobs,
            applications = summary.applications,
            "fixture data loaded"
        );
    }

    let verifier = StaticTokenVerifier::from_grants(&grants);
    if verifier.len() == 0 {
        warn!("no API tokens configured; every authenticated route will answer 401");
    }
    let verifier: SharedVerifier = Arc::new(verifier);

    let app = with_board_routes(&board, verifier)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job board ready");

    axum::serve(listener, app).await?;
    Ok(())
}
