mod config;
mod db;
mod errors;
mod matching;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::matching::orchestrator::MatchOrchestrator;
use crate::matching::remote::MatchServiceClient;
use crate::matching::scorer::{CompositeScorer, ScoringConfig};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::postgres::PgDocumentStore;
use crate::store::DocumentStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Matcher API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL document store
    let db = create_pool(&config.database_url).await?;
    ensure_schema(&db).await?;
    let store: Arc<dyn DocumentStore> = Arc::new(PgDocumentStore::new(db));

    // Local scorer is always present; it is the fallback for every item
    let scorer = CompositeScorer::new(ScoringConfig::default());
    let mut orchestrator = MatchOrchestrator::new(scorer, Arc::clone(&store))
        .with_concurrency(config.match_batch_concurrency)
        .with_timeouts(config.match_probe_timeout, config.match_score_timeout);

    match &config.match_service_url {
        Some(url) => {
            let client = MatchServiceClient::new(
                url.as_str(),
                config.match_probe_timeout,
                config.match_score_timeout,
                scorer,
            )?;
            info!("External matching service configured at {}", client.base_url());
            orchestrator = orchestrator.with_primary(Arc::new(client));
        }
        None => info!("No MATCH_SERVICE_URL set, all scoring is local"),
    }

    // Build app state
    let state = AppState {
        store,
        orchestrator: Arc::new(orchestrator),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
