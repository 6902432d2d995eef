// src/server/handlers.rs
use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AppState;
use super::error::{ApiError, FILE_NOT_FOUND};
use crate::{
    chart::ChartArtifact,
    config::{
        consts::DEFAULT_TOP,
        options::{ExportFormat, ExportOptions, PlotKind, RunOptions},
    },
    error::ScrapeError,
    file, runner,
};

/* ---------------- request / response ---------------- */

/// `top` arrives as a number from JSON clients and as a string from forms.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TopField {
    Int(i64),
    Text(String),
}

impl TopField {
    pub fn value(&self) -> Result<i64, ScrapeError> {
        match self {
            TopField::Int(n) => Ok(*n),
            TopField::Text(t) => t.trim().parse().map_err(|_| {
                ScrapeError::Validation(format!("top must be an integer (got '{t}')"))
            }),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub top: Option<TopField>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub export: Option<String>,
}

impl ScrapeRequest {
    /// Missing fields fall back to the CLI defaults. Unknown plot → Validation;
    /// unknown export → no export.
    pub fn run_options(&self, state: &AppState) -> Result<RunOptions, ScrapeError> {
        let top = match &self.top {
            Some(t) => t.value()?,
            None => DEFAULT_TOP,
        };
        let plot = match self.plot.as_deref() {
            Some(p) => p.parse::<PlotKind>()?,
            None => PlotKind::Bar,
        };
        let export = self
            .export
            .as_deref()
            .and_then(ExportFormat::lenient)
            .map(|f| ExportOptions::new(f, &state.downloads_dir, &state.export_stem));
        Ok(RunOptions { top, plot, export })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub id: String,
    pub chart_url: String,
    pub download_url: Option<String>,
    pub count: usize,
}

/* ---------------- handlers ---------------- */

/// POST /
pub async fn scrape(
    State(state): State<AppState>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ScrapeError::Validation(e.body_text()))?;
    let opts = req.run_options(&state)?;
    logf!("Request: top={} plot={} export={:?}", opts.top, opts.plot, req.export);

    let source = Arc::clone(&state.source);
    let summary = tokio::task::spawn_blocking(move || runner::run(source.as_ref(), &opts, None))
        .await
        .map_err(|e| ApiError::internal(format!("scrape worker failed: {e}")))??;

    let count = summary.ranked.top();
    let download_url = summary
        .export_path
        .as_deref()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .map(|n| join!("/download/", n));
    let id = state.charts.insert(summary.chart);

    Ok(Json(ScrapeResponse {
        id: id.to_string(),
        chart_url: format!("/charts/{id}"),
        download_url,
        count,
    }))
}

const INDEX_HTML: &str = include_str!("assets/index.html");
const SCRIPT_JS: &str = include_str!("assets/script.js");

/// GET / (form page)
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /static/js/script.js
pub async fn script() -> Response {
    ([(CONTENT_TYPE, "text/javascript; charset=utf-8")], SCRIPT_JS).into_response()
}

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}

/// GET /chart.png (most recent chart)
pub async fn chart_latest(State(state): State<AppState>) -> Result<Response, ApiError> {
    let chart = state
        .charts
        .latest()
        .ok_or_else(|| ApiError::not_found("No chart has been generated yet."))?;
    Ok(png_response(&chart))
}

/// GET /charts/{id}
pub async fn chart_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let chart = Uuid::parse_str(&id)
        .ok()
        .and_then(|id| state.charts.get(&id))
        .ok_or_else(|| ApiError::not_found("Chart not found."))?;
    Ok(png_response(&chart))
}

/// GET /download/{filename}
pub async fn download(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let (path, format) = file::resolve_download(&state.downloads_dir, &name)
        .ok_or_else(|| ApiError::not_found(FILE_NOT_FOUND))?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ApiError::not_found(FILE_NOT_FOUND))?;

    let headers = [
        (CONTENT_TYPE, s!(format.mime())),
        (CONTENT_DISPOSITION, format!("attachment; filename=\"{name}\"")),
    ];
    Ok((headers, bytes).into_response())
}

fn png_response(chart: &ChartArtifact) -> Response {
    let headers = [(CONTENT_TYPE, "image/png"), (CACHE_CONTROL, "no-store")];
    (headers, chart.png.clone()).into_response()
}
