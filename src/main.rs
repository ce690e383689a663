use anyhow::Result;
use financial_dashboard::config::DashboardConfig;
use financial_dashboard::routes;
use financial_dashboard::services::store::DataStore;
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    info!("Logger initialized. Starting the application...");

    let config = DashboardConfig::from_env()?;
    info!("Using PORT: {}", config.port);

    // Loaded once; every request reads the same tables.
    let store = DataStore::load(&config);
    for warning in &store.warnings {
        warn!("{}", warning);
    }
    let store = Arc::new(store);

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET"]);

    let api = routes::routes(store).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api)
        .run(addr)
        .await;
    Ok(())
}
