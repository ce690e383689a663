// src/handlers/filtered.rs
use warp::reply::Json;
use warp::Rejection;
use std::sync::Arc;
use crate::services::store::DataStore;
use crate::services::views::filtered::{filtered, FilteredQuery, FilteredSelection};
use super::error::ApiError;
use log::{error, info};

pub async fn get_filtered(query: FilteredQuery, store: Arc<DataStore>) -> Result<Json, Rejection> {
    info!("Handling request to get filtered visualization: {:?}", query);

    let selection = FilteredSelection::try_from(query).map_err(|e| {
        error!("Invalid filter selection: {}", e);
        warp::reject::custom(ApiError::bad_request(e.to_string()))
    })?;

    let view = filtered(&store, &selection).map_err(|e| {
        error!("Failed to aggregate filtered view: {}", e);
        warp::reject::custom(ApiError::bad_request(e.to_string()))
    })?;

    Ok(warp::reply::json(&view))
}
