// src/runner.rs
use std::path::PathBuf;

use crate::{
    chart::{self, ChartArtifact},
    config::options::RunOptions,
    core::PageSource,
    data::{self, Ranked},
    error::Result,
    file,
    progress::Progress,
    specs::top_chart,
};

/// What one run produced.
#[derive(Clone, Debug)]
pub struct RunSummary {
    pub ranked: Ranked,
    pub chart: ChartArtifact,
    /// `None` when no export was requested.
    pub export_path: Option<PathBuf>,
}

/// One complete run: validate, fetch, extract, normalize, render, export.
/// Any failure aborts the run; nothing is written unless every earlier stage succeeded.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    source: &dyn PageSource,
    opts: &RunOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let result = run_stages(source, opts, progress.as_deref_mut());
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    match &result {
        Ok(s) => logf!(
            "Run: OK top={} plot={} export={}",
            s.ranked.top(),
            opts.plot,
            s.export_path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| s!("none"))
        ),
        Err(e) => loge!("Run: failed: {}", e),
    }
    result
}

fn run_stages<'p>(
    source: &dyn PageSource,
    opts: &RunOptions,
    mut progress: Option<&mut (dyn Progress + 'p)>,
) -> Result<RunSummary> {
    // bad counts never reach the network
    data::validate_top(opts.top)?;

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Fetching {}", source.describe()));
    }
    let records = top_chart::fetch_and_extract(source)?;
    if let Some(p) = progress.as_deref_mut() {
        p.extracted(records.len());
    }

    let ranked = data::normalize(records, opts.top)?;

    let chart = chart::render(opts.plot, &ranked)?;
    if let Some(p) = progress.as_deref_mut() {
        p.rendered(opts.plot);
    }

    let export_path = match &opts.export {
        Some(export) => {
            let path = file::export(ranked.prefix(), export)?;
            if let Some(p) = progress.as_deref_mut() {
                p.exported(&path);
            }
            Some(path)
        }
        None => None,
    };

    Ok(RunSummary { ranked, chart, export_path })
}
