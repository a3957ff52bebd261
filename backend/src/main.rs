//! TAP Grading Platform - Backend Server
//!
//! Grades palm fruit bunch deliveries at the mill: computes the TAP
//! deductions, collects shipment identity, uploads driver photos, and
//! records each delivery to the audit spreadsheet.

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod models;
mod routes;
mod services;

use external::{DriveClient, GoogleAuth, ServiceAccountKey, SheetsClient};

pub use config::Config;

/// Driver photos are phone camera shots; anything larger is rejected early
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sheets: SheetsClient,
    pub drive: DriveClient,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tap_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting TAP Grading Server");
    tracing::info!("Environment: {}", config.environment);

    // Wire up the Google collaborators with explicitly injected credentials
    let key = ServiceAccountKey::from_file(&config.google.service_account_key_path)?;
    let auth = GoogleAuth::new(key);

    let sheets = SheetsClient::new(
        auth.clone(),
        &config.sheets.spreadsheet_id,
        config.sheets.worksheet.clone(),
    )?;
    let drive = DriveClient::new(auth, config.drive.folder_id.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        sheets,
        drive,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "TAP Grading Platform API v1.0"
}
