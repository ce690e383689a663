// src/handlers/commodities.rs
use warp::reply::Json;
use warp::Rejection;
use std::sync::Arc;
use crate::services::store::DataStore;
use crate::services::views::commodities::commodities;
use log::info;

pub async fn get_commodities(store: Arc<DataStore>) -> Result<Json, Rejection> {
    info!("Handling request to get commodities & macro view");
    let view = commodities(&store);
    if let Some(notice) = &view.notice {
        info!("Commodities view unavailable: {}", notice);
    }
    Ok(warp::reply::json(&view))
}
