//! HTTP server for the Meal Stipend Engine.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stipend_engine::api::{create_router, AppState};
use stipend_engine::config::ConfigLoader;

/// Computes monthly meal-stipend balances from uploaded attendance workbooks.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory holding stipend.yaml and storage.yaml.
    #[arg(long, default_value = "./config/stipend")]
    config: PathBuf,

    /// Address to listen on.
    #[arg(long, env = "STIPEND_ADDR", default_value = "127.0.0.1:8080")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = ConfigLoader::load(&args.config)?;
    let storage = config.storage();
    info!(
        config = %args.config.display(),
        input_dir = %storage.input_dir.display(),
        output_dir = %storage.output_dir.display(),
        "Configuration loaded"
    );

    let state = AppState::from_config(config)?;
    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!(addr = %args.addr, "Listening");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
