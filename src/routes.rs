// src/routes.rs
use std::sync::Arc;
use warp::reject::Rejection;
use crate::handlers::{commodities::get_commodities, explorer::get_explorer, filtered::get_filtered,
                     metrics::get_financial_metrics, navigation::get_navigation,
                     sentiment::get_sentiment};
use crate::services::store::DataStore;
use crate::services::views::filtered::FilteredQuery;
use log::info;

use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Filter, Reply};
use crate::handlers::error::ApiError;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message: String;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = e.to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(store: Arc<DataStore>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let store_filter = warp::any().map(move || store.clone());

    let views_route = warp::path!("api" / "v1" / "views")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_navigation);

    let metrics_route = warp::path!("api" / "v1" / "metrics")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_financial_metrics);

    let explorer_route = warp::path!("api" / "v1" / "explorer")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_explorer);

    let commodities_route = warp::path!("api" / "v1" / "commodities")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_commodities);

    let sentiment_route = warp::path!("api" / "v1" / "sentiment")
        .and(warp::get())
        .and(store_filter.clone())
        .and_then(get_sentiment);

    let filtered_route = warp::path!("api" / "v1" / "filtered")
        .and(warp::get())
        .and(warp::query::<FilteredQuery>())
        .and(store_filter.clone())
        .and_then(get_filtered);

    info!("All routes configured successfully.");

    views_route
        .or(metrics_route)
        .or(explorer_route)
        .or(commodities_route)
        .or(sentiment_route)
        .or(filtered_route)
        .recover(handle_rejection)
}
