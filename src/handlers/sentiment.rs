// src/handlers/sentiment.rs
use warp::reply::Json;
use warp::Rejection;
use std::sync::Arc;
use crate::services::store::DataStore;
use crate::services::views::sentiment::news_sentiment;
use log::{info, warn};

pub async fn get_sentiment(store: Arc<DataStore>) -> Result<Json, Rejection> {
    info!("Handling request to get news sentiment view");
    let view = news_sentiment(&store);
    if let Some(notice) = &view.notice {
        warn!("Sentiment visualizations skipped: {}", notice);
    }
    Ok(warp::reply::json(&view))
}
