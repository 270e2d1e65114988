//! Nepal Airspace Server - catalogs, classification and flight plan evaluation

use anyhow::Result;
use nepal_airspace_server::{api, config::Config, state::AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("nepal_airspace_server=debug".parse()?)
            .add_directive("nepal_airspace_core=info".parse()?))
        .init();

    tracing::info!("Starting Nepal Airspace Server...");

    let config = Config::from_env();
    let port = config.server_port;
    tracing::info!(containment = ?config.containment, "Classifier configured");
    let state = Arc::new(AppState::from_config(&config)?);

    // Build the app
    let app = api::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Run server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
