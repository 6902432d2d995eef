// src/server/mod.rs
//! HTTP surface over the same pipeline the CLI runs.
//! Each POST runs on the blocking pool; its chart is kept in a `ChartStore`.

pub mod error;
pub mod handlers;
pub mod store;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, routing::get};
use clap::Parser;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    chart::fonts,
    cli::SourceArgs,
    config::consts::{CHART_STORE_CAPACITY, DEFAULT_BIND, DEFAULT_FILENAME, DOWNLOADS_DIR},
    core::PageSource,
};
pub use store::ChartStore;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn PageSource>,
    pub charts: Arc<ChartStore>,
    pub downloads_dir: PathBuf,
    pub export_stem: String,
}

impl AppState {
    pub fn new(source: Arc<dyn PageSource>, downloads_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            charts: Arc::new(ChartStore::new(CHART_STORE_CAPACITY)),
            downloads_dir: downloads_dir.into(),
            export_stem: s!(DEFAULT_FILENAME),
        }
    }

    pub fn with_chart_capacity(mut self, capacity: usize) -> Self {
        self.charts = Arc::new(ChartStore::new(capacity));
        self
    }

    pub fn with_export_stem(mut self, stem: &str) -> Self {
        self.export_stem = s!(stem);
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::scrape))
        .route("/static/js/script.js", get(handlers::script))
        .route("/health", get(handlers::health))
        .route("/chart.png", get(handlers::chart_latest))
        .route("/charts/{id}", get(handlers::chart_by_id))
        .route("/download/{filename}", get(handlers::download))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Parser, Debug, Clone)]
#[command(name = "imdb_serve", version, about = "HTTP front end for imdb_scrape")]
pub struct ServeArgs {
    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Where exports are written and served from
    #[arg(long, default_value = DOWNLOADS_DIR)]
    pub downloads_dir: PathBuf,

    /// Charts kept in memory for /charts/{id}
    #[arg(long, default_value_t = CHART_STORE_CAPACITY)]
    pub chart_capacity: usize,

    /// Export file name without extension
    #[arg(long, default_value = DEFAULT_FILENAME)]
    pub filename: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

impl ServeArgs {
    pub fn state(&self) -> AppState {
        AppState::new(self.source.page_source(), &self.downloads_dir)
            .with_chart_capacity(self.chart_capacity)
            .with_export_stem(&self.filename)
    }
}

/// Bind and serve until Ctrl+C / SIGTERM.
pub async fn serve(args: &ServeArgs) -> std::io::Result<()> {
    fonts::init(args.source.font.as_deref());
    let app = router(args.state());

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    logf!("Listening on {}", listener.local_addr()?);
    logf!("  GET  /              form page");
    logf!("  POST /              scrape (top, plot, export)");
    logf!("  GET  /charts/{{id}}   chart for one request");
    logf!("  GET  /download/{{f}}  exported file");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    logf!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGTERM or SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            loge!("Ctrl+C handler failed: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                loge!("SIGTERM handler failed: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => logf!("Received SIGINT, shutting down"),
        _ = terminate => logf!("Received SIGTERM, shutting down"),
    }
}
