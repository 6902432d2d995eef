// src/config/options.rs
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::ValueEnum;

use super::consts::*;
use crate::error::ScrapeError;

/* ---------------- Plot kind ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum PlotKind {
    Bar,
    #[value(name = "hist", alias = "histogram")]
    Histogram,
    Pie,
}

impl PlotKind {
    pub fn name(&self) -> &'static str {
        match self {
            PlotKind::Bar => "bar",
            PlotKind::Histogram => "hist",
            PlotKind::Pie => "pie",
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strict: an unknown plot name is a caller error, never a silent default.
impl FromStr for PlotKind {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(PlotKind::Bar),
            "hist" | "histogram" => Ok(PlotKind::Histogram),
            "pie" => Ok(PlotKind::Pie),
            other => Err(ScrapeError::Validation(format!(
                "unknown plot kind '{other}' (expected bar, hist or pie)"
            ))),
        }
    }
}

/* ---------------- Export format ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    #[value(alias = "xlsx")]
    Excel,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "excel",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
            ExportFormat::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// Lookup by file extension (download route).
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            "xlsx" => Some(ExportFormat::Excel),
            _ => None,
        }
    }

    /// Request-body parsing: anything unrecognized (including "" and "none")
    /// means "no export requested". This is a deliberate no-op, logged at info.
    pub fn lenient(s: &str) -> Option<Self> {
        match s.parse::<ExportFormat>() {
            Ok(f) => Some(f),
            Err(_) => {
                if !s.trim().is_empty() {
                    logf!("Export: '{}' is not a known format, skipping export", s.trim());
                }
                None
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            other => Err(ScrapeError::Validation(format!(
                "unknown export format '{other}' (expected csv, json or excel)"
            ))),
        }
    }
}

/* ---------------- Fetch ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub url: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            url: s!(SOURCE_URL),
            user_agent: s!(USER_AGENT),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
        }
    }
}

impl FetchOptions {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into(), ..Self::default() }
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub dir: PathBuf,
    file_stem: String, // without extension, single path component
}

impl ExportOptions {
    pub fn new(format: ExportFormat, dir: impl Into<PathBuf>, stem: &str) -> Self {
        Self {
            format,
            dir: dir.into(),
            file_stem: crate::core::sanitize::sanitize_filename(stem),
        }
    }

    /// "<stem>.<ext>"
    pub fn file_name(&self) -> String {
        join!(&self.file_stem, ".", self.format.ext())
    }

    /// "<dir>/<stem>.<ext>". Deterministic, so repeated runs overwrite.
    pub fn out_path(&self) -> PathBuf {
        self.dir.join(self.file_name())
    }
}

/* ---------------- One run ---------------- */

#[derive(Clone, Debug, PartialEq)]
pub struct RunOptions {
    /// Requested count as received; validated by the runner before any fetch.
    pub top: i64,
    pub plot: PlotKind,
    /// `None` = no export requested.
    pub export: Option<ExportOptions>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { top: DEFAULT_TOP, plot: PlotKind::Bar, export: None }
    }
}
