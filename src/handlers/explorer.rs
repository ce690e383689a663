// src/handlers/explorer.rs
use warp::reply::Json;
use warp::Rejection;
use std::sync::Arc;
use crate::services::store::DataStore;
use crate::services::views::explorer::explorer;
use log::info;

pub async fn get_explorer(store: Arc<DataStore>) -> Result<Json, Rejection> {
    info!("Handling request to get data explorer view");
    Ok(warp::reply::json(&explorer(&store)))
}
