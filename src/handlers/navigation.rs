// src/handlers/navigation.rs
use warp::reply::Json;
use warp::Rejection;
use std::sync::Arc;
use crate::services::store::DataStore;
use crate::services::views::navigation;
use log::info;

pub async fn get_navigation(store: Arc<DataStore>) -> Result<Json, Rejection> {
    info!("Handling request for dashboard navigation");
    Ok(warp::reply::json(&navigation(&store)))
}
