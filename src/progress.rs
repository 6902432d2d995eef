// src/progress.rs
use std::path::Path;

use crate::config::options::PlotKind;

/// Stage reporting for one pipeline run. Frontends implement this
/// (CLI prints lines, server logs); every method defaults to a no-op.
pub trait Progress {
    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Records extracted from the page.
    fn extracted(&mut self, _count: usize) {}

    fn rendered(&mut self, _kind: PlotKind) {}

    /// An export file was written.
    fn exported(&mut self, _path: &Path) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Prints stage lines to stdout.
pub struct PrintProgress;

impl Progress for PrintProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn extracted(&mut self, count: usize) {
        println!("Extracted {count} movies");
    }
    fn exported(&mut self, path: &Path) {
        println!("Data exported as {}", path.display());
    }
}
