mod backend;

use anyhow::Result;
use axum::serve;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use backend::config::ServerConfig;
use backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::load()?;
    let app_state = initialize_backend(&config)?;
    let router = create_router(app_state);

    let addr: SocketAddr = config.bind_addr.parse()?;
    info!("Starting Rupaya REST API server at {}", addr);
    let listener = TcpListener::bind(addr).await?;
    serve(listener, router).await?;

    Ok(())
}
