// src/handlers/metrics.rs
use warp::reply::Json;
use warp::Rejection;
use std::sync::Arc;
use crate::services::store::DataStore;
use crate::services::views::metrics::financial_metrics;
use log::info;

pub async fn get_financial_metrics(store: Arc<DataStore>) -> Result<Json, Rejection> {
    info!("Handling request to get financial metrics view");
    let view = financial_metrics(&store);
    if let Some(notice) = &view.notice {
        info!("Financial metrics view unavailable: {}", notice);
    }
    Ok(warp::reply::json(&view))
}
