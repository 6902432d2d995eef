// tests/server.rs
#![cfg(feature = "server")]
mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use imdb_scrape::core::StaticSource;
use imdb_scrape::server::{AppState, handlers::ScrapeResponse, router};
use serde_json::{Value, json};

use common::*;

fn server_with(html: Option<String>, name: &str) -> (TestServer, std::path::PathBuf) {
    let dir = tmp_dir(name);
    let state = match html {
        Some(h) => AppState::new(Arc::new(StaticSource::new(h)), &dir),
        None => AppState::new(Arc::new(CountingSource::new(None)), &dir),
    };
    (TestServer::new(router(state)).unwrap(), dir)
}

#[tokio::test]
async fn health_is_ok() {
    let (server, _) = server_with(Some(top250_page()), "srv_health");
    let res = server.get("/health").await;
    res.assert_status_ok();
    assert_eq!(res.text(), "OK");
}

#[tokio::test]
async fn scrape_returns_chart_and_download_urls() {
    let (server, dir) = server_with(Some(top250_page()), "srv_scrape");
    let res = server.post("/").json(&json!({ "top": "5", "plot": "pie", "export": "csv" })).await;
    res.assert_status_ok();
    let body: ScrapeResponse = res.json();
    assert_eq!(body.count, 5);
    assert_eq!(body.chart_url, format!("/charts/{}", body.id));
    assert_eq!(body.download_url.as_deref(), Some("/download/imdb_top_movies.csv"));
    assert!(dir.join("imdb_top_movies.csv").is_file());

    let chart = server.get(&body.chart_url).await;
    chart.assert_status_ok();
    assert_eq!(chart.header("content-type"), "image/png");
    assert_eq!(&chart.as_bytes()[1..4], b"PNG");

    let latest = server.get("/chart.png").await;
    assert_eq!(latest.as_bytes(), chart.as_bytes());

    let file = server.get("/download/imdb_top_movies.csv").await;
    file.assert_status_ok();
    assert!(file.text().starts_with("Rank,Title,Rating,Genres"));
    assert!(file.header("content-disposition").to_str().unwrap().starts_with("attachment"));
}

#[tokio::test]
async fn each_request_gets_its_own_chart() {
    let (server, _) = server_with(Some(top250_page()), "srv_ids");
    let a: ScrapeResponse = server.post("/").json(&json!({ "top": 3, "plot": "bar" })).await.json();
    let b: ScrapeResponse = server.post("/").json(&json!({ "top": 3, "plot": "hist" })).await.json();
    assert_ne!(a.id, b.id);
    assert!(a.download_url.is_none());
    let chart_a = server.get(&a.chart_url).await;
    let chart_b = server.get(&b.chart_url).await;
    chart_a.assert_status_ok();
    assert_ne!(chart_a.as_bytes(), chart_b.as_bytes());
}

#[tokio::test]
async fn unknown_export_means_no_download() {
    let (server, dir) = server_with(Some(top250_page()), "srv_unknown_export");
    let body: ScrapeResponse =
        server.post("/").json(&json!({ "top": 10, "plot": "bar", "export": "parquet" })).await.json();
    assert!(body.download_url.is_none());
    assert!(dir_is_empty(&dir));
}

#[tokio::test]
async fn bad_input_is_422() {
    let (server, _) = server_with(Some(top250_page()), "srv_422");
    for body in [json!({ "top": 0 }), json!({ "top": "ten" }), json!({ "plot": "scatter" })] {
        let res = server.post("/").json(&body).await;
        res.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert!(res.json::<Value>()["error"].is_string());
    }
}

#[tokio::test]
async fn scrape_failure_is_400_with_message() {
    let (server, dir) = server_with(None, "srv_400");
    let res = server.post("/").json(&json!({ "top": 10, "plot": "bar", "export": "json" })).await;
    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>()["error"], "Failed to scrape the page.");
    assert!(dir_is_empty(&dir));

    let missing = server.post("/").json(&json!({})).await;
    missing.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_chart_and_file_are_404() {
    let (server, _) = server_with(Some(top250_page()), "srv_404");
    server.get("/chart.png").await.assert_status(StatusCode::NOT_FOUND);
    server.get("/charts/not-a-uuid").await.assert_status(StatusCode::NOT_FOUND);
    server
        .get("/charts/00000000-0000-4000-8000-000000000000")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let res = server.get("/download/imdb_top_movies.csv").await;
    res.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>()["error"], "File not found.");
    server.get("/download/..%2Fsecret.csv").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn form_page_and_script_are_served() {
    let (server, _) = server_with(Some(top250_page()), "srv_index");
    let page = server.get("/").await;
    page.assert_status_ok();
    assert!(page.header("content-type").to_str().unwrap().starts_with("text/html"));
    let html = page.text();
    assert!(html.contains("id=\"scraperForm\""));
    assert!(html.contains("/static/js/script.js"));

    let js = server.get("/static/js/script.js").await;
    js.assert_status_ok();
    assert!(js.text().contains("fetch(\"/\""));
}
