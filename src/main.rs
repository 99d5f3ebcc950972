//! Barbershop booking and loyalty server.
//!
//! Reads `BARBERSHOP_CONFIG` (shop configuration directory) and
//! `BARBERSHOP_ADDR` (listen address) from the environment.

use std::env;

use barbershop_engine::api::{AppState, create_router};
use barbershop_engine::config::ConfigLoader;
use barbershop_engine::front_desk::FrontDesk;
use barbershop_engine::store::MemoryStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/demo";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config_dir = env::var("BARBERSHOP_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let addr = env::var("BARBERSHOP_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?.into_config();
    info!(
        config_dir = %config_dir,
        tenant = %config.tenant(),
        shop = %config.shop().name,
        "Configuration loaded"
    );

    let state = AppState::new(FrontDesk::new(MemoryStore::new(), config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
