#![forbid(unsafe_code)]
//! HTTP API server for the Agora backend

use agora_backend::api::{run_server, ServiceState};
use agora_backend::config::load_config;
use agora_backend::proposals::ProposalRegistry;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = load_config()?;
    info!("Starting Agora backend (port = {})", config.server.port);

    let state = ServiceState::new(ProposalRegistry::seeded());
    run_server(state, config.server.port).await
}
