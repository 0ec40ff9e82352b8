// Property Desk Backend

use axum::Router;
use std::fmt::Write as FmtWrite;
use std::fs::OpenOptions;
use std::io::LineWriter;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Custom time formatter: [HH:mm:ss] [desk]
#[derive(Clone)]
struct DeskTimer;

impl FormatTime for DeskTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        write!(w, "[{}] [desk]", now.format("%H:%M:%S"))
    }
}

mod analytics;
mod config;
mod models;
mod routes;
mod services;

use config::Config;
use routes::{
    awareness_routes, dashboard_routes, health_routes, profile_routes, projects_routes,
    shopping_routes, tasks_routes, AwarenessCache,
};
use services::{ExtractService, LookupService, PropertyStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PropertyStore>,
    pub lookup: Arc<LookupService>,
    pub extract: Arc<ExtractService>,
    pub config: Arc<Config>,
    pub awareness_cache: AwarenessCache,
}

#[tokio::main]
async fn main() {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    // Open log file, wrapped in LineWriter so lines appear immediately
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .expect("Failed to open log file");
    let line_writer = LineWriter::new(log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(line_writer);

    // Initialize tracing with both stdout and file output
    // Format: [HH:mm:ss] [desk] message
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "property_desk_backend=info,tower_http=info".into()),
        )
        .with(
            fmt::layer()
                .with_timer(DeskTimer)
                .with_target(false)
                .with_level(false)
                .with_ansi(true),
        )
        .with(
            fmt::layer()
                .with_timer(DeskTimer)
                .with_target(false)
                .with_level(false)
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .init();

    if let Err(e) = config.validate() {
        tracing::error!("Configuration error: {}", e);
    }

    // Open the store, loading any existing snapshot
    let store = match PropertyStore::open(Some(config.store_path.clone().into())) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("Failed to open store at {}: {}", config.store_path, e);
            std::process::exit(1);
        }
    };

    let lookup = Arc::new(LookupService::new(&config));
    let extract = Arc::new(ExtractService::new(&config));

    let state = AppState {
        store,
        lookup,
        extract,
        config: Arc::new(config.clone()),
        awareness_cache: AwarenessCache::default(),
    };

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(health_routes())
        .merge(tasks_routes())
        .merge(projects_routes())
        .merge(dashboard_routes())
        .merge(awareness_routes())
        .merge(profile_routes())
        .merge(shopping_routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting Property Desk Backend on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server port");
    axum::serve(listener, app).await.expect("Server error");
}
