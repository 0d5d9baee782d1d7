/**
 * VizRelay Server Entry Point
 *
 * Loads configuration from the environment (and `.env` if present),
 * initializes tracing, and serves the relay.
 */

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use vizrelay::backend::server::{create_app, load_config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = load_config()?;
    let port = config.port;
    let app = create_app(config)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting relay on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
