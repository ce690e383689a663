// tests/api.rs
use financial_dashboard::config::DashboardConfig;
use financial_dashboard::routes::routes;
use financial_dashboard::services::store::DataStore;
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};
use warp::http::StatusCode;

const FINANCIALS: &str = "\
Date,Total Revenue,Total Assets,Shareholder's Equity,Return on Equity
2023-01-31,100,1000,400,12.5
2023-02-28,110,1100,420,13.0
2024-01-31,130,1200,450,14.0
";

const COMMODITIES: &str = "\
Date,CPIAUCSL,WTISPLC,PCOPPUSDM,GDP
2023-01-01,299.2,78.0,9000.5,26000
2023-02-01,300.8,76.0,8900.0,26100
";

const SENTIMENT: &str = "\
date,title,sentiment_score
2024-02-20,Rates hold,0.4
2024-02-21,Oil slides,-0.2
2024-02-22,Markets flat,0
2024-02-23,Earnings beat,0.6
";

fn data_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn store_from(dir: &TempDir) -> Arc<DataStore> {
    let config = DashboardConfig {
        data_dir: dir.path().to_path_buf(),
        ..DashboardConfig::default()
    };
    Arc::new(DataStore::load(&config))
}

fn full_store() -> (TempDir, Arc<DataStore>) {
    let dir = data_dir(&[
        ("financials_cleaned_for_plots.csv", FINANCIALS),
        ("commodities.csv", COMMODITIES),
        ("senti.csv", SENTIMENT),
    ]);
    let store = store_from(&dir);
    (dir, store)
}

async fn get(store: Arc<DataStore>, path: &str) -> (StatusCode, Value) {
    let api = routes(store);
    let res = warp::test::request().method("GET").path(path).reply(&api).await;
    let body: Value = serde_json::from_slice(res.body()).unwrap();
    (res.status(), body)
}

#[tokio::test]
async fn test_views_lists_five_pages_without_warnings() {
    let (_dir, store) = full_store();
    let (status, body) = get(store, "/api/v1/views").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Financial Analytics Dashboard");
    let labels: Vec<&str> = body["views"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Financial Metrics",
            "Data Explorer",
            "Commodities & Macro",
            "News Sentiments",
            "Filtered Visualizations"
        ]
    );
    assert_eq!(body["warnings"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_missing_files_surface_as_warnings_and_notices() {
    let dir = data_dir(&[("commodities.csv", COMMODITIES)]);
    let store = store_from(&dir);

    let (_, nav) = get(store.clone(), "/api/v1/views").await;
    let warnings = nav["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].as_str().unwrap().starts_with("Financial data file not found"));

    let (status, metrics) = get(store.clone(), "/api/v1/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(metrics["notice"], "No financial data available");

    let (_, sentiment) = get(store.clone(), "/api/v1/sentiment").await;
    assert_eq!(sentiment["notice"], "No sentiment data loaded");

    let (_, commodities) = get(store, "/api/v1/commodities").await;
    assert!(commodities["notice"].is_null());
}

#[tokio::test]
async fn test_metrics_view() {
    let (_dir, store) = full_store();
    let (status, body) = get(store, "/api/v1/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["header"]["first_year"], 2023);
    assert_eq!(body["header"]["last_year"], 2024);
    assert_eq!(body["cards"][0]["title"], "Latest Revenue");
    assert_eq!(body["cards"][0]["value"], "130.00");
    assert_eq!(body["cards"][0]["direction"], "up");
    assert_eq!(body["cards"][0]["period"], "Jan 2024");

    let equity = body["sections"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["title"] == "Equity Analysis")
        .unwrap();
    assert_eq!(equity["series"][0]["points"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_explorer_uses_display_header() {
    let (_dir, store) = full_store();
    let (_, body) = get(store, "/api/v1/explorer").await;

    assert_eq!(body["columns"][3], "Shareholder's Equity");
    assert_eq!(body["rows"][0][1], "100.00");
}

#[tokio::test]
async fn test_sentiment_counts() {
    let (_dir, store) = full_store();
    let (_, body) = get(store, "/api/v1/sentiment").await;

    assert_eq!(body["score_column"], "sentiment_score");
    assert_eq!(body["cards"][0]["value"], "2 (50.0%)");
    assert_eq!(body["cards"][1]["value"], "1 (25.0%)");
    assert_eq!(body["cards"][2]["value"], "1 (25.0%)");
}

#[tokio::test]
async fn test_filtered_defaults() {
    let (_dir, store) = full_store();
    let (status, body) = get(store, "/api/v1/filtered").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metric"], "Total Revenue");
    assert_eq!(body["aggregation"], "monthly");
    assert_eq!(body["buckets"][0]["bucket"], "January");
    assert_eq!(body["buckets"][0]["value"], 115.0);
    assert_eq!(body["buckets"][1]["bucket"], "February");
    assert!(body["table"].is_null());
}

#[tokio::test]
async fn test_filtered_yearly_commodities_with_table() {
    let (_dir, store) = full_store();
    let (status, body) = get(
        store,
        "/api/v1/filtered?dataset=commodities&metric=Oil&aggregation=yearly&show_table=true",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chart_title"], "Yearly Oil");
    assert_eq!(body["buckets"][0]["bucket"], 2023);
    assert_eq!(body["table"][0]["value"], "77.00");
}

#[tokio::test]
async fn test_filtered_rejects_bad_selection() {
    let (_dir, store) = full_store();

    let (status, body) = get(store.clone(), "/api/v1/filtered?aggregation=weekly").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("weekly"));

    let (status, _) = get(store.clone(), "/api/v1/filtered?dataset=financial&metric=Oil").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(store, "/api/v1/filtered?show_table=maybe").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (_dir, store) = full_store();
    let (status, body) = get(store, "/api/v1/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}
