// src/cli.rs
use std::{fs, path::{Path, PathBuf}, sync::Arc, time::Duration};

use clap::{Args, Parser};

use crate::{
    chart::{ChartArtifact, fonts},
    config::{
        consts::{DEFAULT_FILENAME, DEFAULT_OUT_DIR, DEFAULT_TOP, FETCH_TIMEOUT_SECS, SOURCE_URL},
        options::{ExportFormat, ExportOptions, FetchOptions, PlotKind, RunOptions},
    },
    core::{FileSource, HttpSource, PageSource, sanitize::sanitize_filename},
    error::{Result, ScrapeError},
    progress::PrintProgress,
    runner::{self, RunSummary},
};

/// Where the page comes from and how text is drawn. Shared by both binaries.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Chart page to scrape
    #[arg(long, default_value = SOURCE_URL)]
    pub source_url: String,

    /// Read a saved page instead of fetching (offline runs)
    #[arg(long, value_name = "FILE", conflicts_with = "source_url")]
    pub input: Option<PathBuf>,

    /// Whole-request timeout for the fetch
    #[arg(long, default_value_t = FETCH_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// TrueType font used for chart text (falls back to $IMDB_SCRAPE_FONT, then system fonts)
    #[arg(long, value_name = "TTF")]
    pub font: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

impl SourceArgs {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            ..FetchOptions::with_url(&self.source_url)
        }
    }

    pub fn page_source(&self) -> Arc<dyn PageSource> {
        match &self.input {
            Some(path) => Arc::new(FileSource::new(path)),
            None => Arc::new(HttpSource::new(self.fetch_options())),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "imdb_scrape", version, about = "Scrape the IMDb Top 250, chart it, export it")]
pub struct CliArgs {
    /// Number of top movies to chart and export
    #[arg(long, default_value_t = DEFAULT_TOP, allow_negative_numbers = true)]
    pub top: i64,

    #[arg(long, value_enum, default_value_t = PlotKind::Bar)]
    pub plot: PlotKind,

    #[arg(long, value_enum)]
    pub export: Option<ExportFormat>,

    /// Export file name without extension
    #[arg(long, default_value = DEFAULT_FILENAME)]
    pub filename: String,

    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Also save the chart PNG here
    #[arg(long, value_name = "PNG")]
    pub chart_out: Option<PathBuf>,

    /// Don't open the chart window
    #[arg(long)]
    pub no_window: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

impl CliArgs {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            top: self.top,
            plot: self.plot,
            export: self
                .export
                .map(|format| ExportOptions::new(format, &self.out_dir, &self.filename)),
        }
    }

    /// `<out_dir>/<basename>.png`, used when the chart can't be shown on screen.
    pub fn default_chart_path(&self) -> PathBuf {
        self.out_dir.join(join!(&sanitize_filename(&self.filename), ".png"))
    }
}

/// One CLI run. Prints `Data exported as <file>` after an export.
pub fn run(args: &CliArgs) -> Result<RunSummary> {
    fonts::init(args.source.font.as_deref());

    let source = args.source.page_source();
    let opts = args.run_options();
    let mut progress = PrintProgress;
    let summary = runner::run(source.as_ref(), &opts, Some(&mut progress))?;

    if let Some(path) = &args.chart_out {
        save_chart(&summary.chart, path)?;
    }
    Ok(summary)
}

/// Opens a chart window; `gui::show` when the viewer is built in.
pub type Viewer = fn(&ChartArtifact, &str) -> std::result::Result<(), Box<dyn std::error::Error>>;

/// Show the chart in a window, or save it when there is no window to show.
pub fn display(chart: &ChartArtifact, args: &CliArgs) -> Result<()> {
    #[cfg(feature = "viewer")]
    let viewer: Option<Viewer> = Some(crate::gui::show as Viewer);
    #[cfg(not(feature = "viewer"))]
    let viewer: Option<Viewer> = None;
    show_or_save(chart, args, viewer)
}

/// A window that fails to open (headless host) is not a failed run:
/// the chart is saved next to the export instead.
pub fn show_or_save(chart: &ChartArtifact, args: &CliArgs, viewer: Option<Viewer>) -> Result<()> {
    if let Some(show) = viewer.filter(|_| !args.no_window) {
        let title = format!("IMDb Top {} ({})", args.top, chart.kind);
        match show(chart, &title) {
            Ok(()) => return Ok(()),
            Err(e) => logw!("Viewer: cannot open a window ({}); saving the chart instead", e),
        }
    }

    if args.chart_out.is_none() {
        save_chart(chart, &args.default_chart_path())?;
    }
    Ok(())
}

pub fn save_chart(chart: &ChartArtifact, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        crate::file::ensure_directory(dir).map_err(|e| ScrapeError::export(dir, e))?;
    }
    fs::write(path, &chart.png).map_err(|e| ScrapeError::export(path, e))?;
    println!("Chart saved as {}", path.display());
    Ok(())
}
