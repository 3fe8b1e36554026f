//! NACTAX site server.

use std::sync::Arc;

use database::{Database, Persistence};
use gemini_brain::GeminiBrain;
use site_core::SharedSecretAuthenticator;
use site_web::{app, AppState, Config};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting site server");

    // Connect to database
    let db = Arc::new(Database::connect(&config.database_url).await?);
    db.migrate().await?;
    let persistence = Persistence::new(db.clone());

    // Chat backend and admin authentication
    let brain = GeminiBrain::from_env()?;
    info!(model = %brain.config().model, "Chat backend ready");
    let authenticator = SharedSecretAuthenticator::from_env();

    // Build application state
    let state = AppState::new(
        persistence,
        Arc::new(brain),
        Arc::new(authenticator),
        config.payment_policy,
        config.session_max,
    );

    let app = app(state, &config.static_dir);

    // Start server
    info!(addr = %config.addr, "Site server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Site server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
