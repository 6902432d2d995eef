// src/file.rs
// Export of the top-N slice to csv / json / xlsx. Files are overwritten in place.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;

use crate::config::consts::GENRE_SEP;
use crate::config::options::{ExportFormat, ExportOptions};
use crate::core::sanitize::is_plain_filename;
use crate::csv::write_row;
use crate::data::MovieRecord;
use crate::error::{Result, ScrapeError};

pub const BASE_COLUMNS: [&str; 3] = ["Rank", "Title", "Rating"];
pub const GENRES_COLUMN: &str = "Genres";

/// Genres get a column only when at least one exported row has any.
pub fn has_genres(records: &[MovieRecord]) -> bool {
    records.iter().any(|r| !r.genres().is_empty())
}

pub fn headers(with_genres: bool) -> Vec<&'static str> {
    let mut h = BASE_COLUMNS.to_vec();
    if with_genres {
        h.push(GENRES_COLUMN);
    }
    h
}

/// Write `records` as `opts.out_path()`. Creates the directory on first use.
/// Returns the path written.
pub fn export(records: &[MovieRecord], opts: &ExportOptions) -> Result<PathBuf> {
    let path = opts.out_path();
    ensure_directory(&opts.dir).map_err(|e| ScrapeError::export(&opts.dir, e))?;

    logf!(
        "Export: Begin format={}, rows={}, path={}",
        opts.format,
        records.len(),
        path.display()
    );

    match opts.format {
        ExportFormat::Csv => write_csv(&path, records),
        ExportFormat::Json => write_json(&path, records),
        ExportFormat::Excel => write_excel(&path, records),
    }?;

    logf!("Export: OK {}", path.display());
    Ok(path)
}

/* ---------------- writers ---------------- */

/// Shortest form that reads back exactly, always with a decimal point
/// (`9.0`, `8.75`), matching the JSON export.
pub fn format_rating(rating: f64) -> String {
    let s = rating.to_string();
    if s.contains('.') { s } else { join!(&s, ".0") }
}

fn record_cells(r: &MovieRecord, with_genres: bool) -> Vec<String> {
    let mut row = vec![r.rank().to_string(), s!(r.title()), format_rating(r.rating())];
    if with_genres {
        row.push(r.genres().join(GENRE_SEP));
    }
    row
}

pub fn write_csv(path: &Path, records: &[MovieRecord]) -> Result<()> {
    let fail = |e: std::io::Error| ScrapeError::export(path, e);
    let with_genres = has_genres(records);

    let mut out = BufWriter::new(File::create(path).map_err(fail)?); // truncate/overwrite
    write_row(&mut out, &headers(with_genres)).map_err(fail)?;
    for r in records {
        write_row(&mut out, &record_cells(r, with_genres)).map_err(fail)?;
    }
    out.flush().map_err(fail)
}

#[derive(Serialize)]
struct JsonRow<'a> {
    #[serde(rename = "Rank")]
    rank: u32,
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Rating")]
    rating: f64,
    #[serde(rename = "Genres", skip_serializing_if = "Option::is_none")]
    genres: Option<&'a [String]>,
}

/// JSON array of row objects, one per record.
pub fn write_json(path: &Path, records: &[MovieRecord]) -> Result<()> {
    let with_genres = has_genres(records);
    let rows: Vec<JsonRow<'_>> = records
        .iter()
        .map(|r| JsonRow {
            rank: r.rank(),
            title: r.title(),
            rating: r.rating(),
            genres: with_genres.then(|| r.genres()),
        })
        .collect();

    let file = File::create(path).map_err(|e| ScrapeError::export(path, e))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &rows).map_err(|e| ScrapeError::export(path, e))?;
    writeln!(out).and_then(|_| out.flush()).map_err(|e| ScrapeError::export(path, e))
}

pub fn write_excel(path: &Path, records: &[MovieRecord]) -> Result<()> {
    let fail = |e: rust_xlsxwriter::XlsxError| ScrapeError::export(path, e);
    let with_genres = has_genres(records);
    let bold = Format::new().set_bold();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Top Movies").map_err(fail)?;

    for (col, h) in headers(with_genres).iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *h, &bold).map_err(fail)?;
    }
    for (i, r) in records.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_number(row, 0, r.rank()).map_err(fail)?;
        sheet.write_string(row, 1, r.title()).map_err(fail)?;
        sheet.write_number(row, 2, r.rating()).map_err(fail)?;
        if with_genres {
            sheet.write_string(row, 3, r.genres().join(GENRE_SEP)).map_err(fail)?;
        }
    }
    sheet.set_column_width(1, 48).map_err(fail)?;
    if with_genres {
        sheet.set_column_width(3, 32).map_err(fail)?;
    }

    workbook.save(path).map_err(fail)
}

/* ---------------- paths ---------------- */

pub fn ensure_directory(dir: &Path) -> std::result::Result<(), String> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Resolve a download request to a file inside `dir`.
/// None for anything that is not a plain file name of a known export type,
/// or that does not exist.
pub fn resolve_download(dir: &Path, name: &str) -> Option<(PathBuf, ExportFormat)> {
    if !is_plain_filename(name) {
        return None;
    }
    let ext = Path::new(name).extension()?.to_str()?;
    let format = ExportFormat::from_ext(ext)?;
    let path = dir.join(name);
    path.is_file().then_some((path, format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_columns_follow_genre_presence() {
        assert_eq!(headers(false), ["Rank", "Title", "Rating"]);
        assert_eq!(headers(true), ["Rank", "Title", "Rating", "Genres"]);
    }

    #[test]
    fn cells_join_genres() {
        let r = MovieRecord::new(3, "Heat", 8.3, vec![s!("Action"), s!("Crime")]).unwrap();
        assert_eq!(record_cells(&r, true), ["3", "Heat", "8.3", "Action, Crime"]);
        assert_eq!(record_cells(&r, false).len(), 3);
    }

    #[test]
    fn whole_ratings_keep_a_decimal() {
        assert_eq!(format_rating(9.0), "9.0");
        assert_eq!(format_rating(10.0), "10.0");
        assert_eq!(format_rating(8.294), "8.294");
        let r = MovieRecord::new(1, "The Shawshank Redemption", 9.0, vec![]).unwrap();
        assert_eq!(record_cells(&r, false), ["1", "The Shawshank Redemption", "9.0"]);
    }

    #[test]
    fn download_names_are_checked() {
        let dir = std::env::temp_dir();
        assert!(resolve_download(&dir, "../etc/passwd.csv").is_none());
        assert!(resolve_download(&dir, "notes.txt").is_none());
        assert!(resolve_download(&dir, "definitely_missing_4f1a.csv").is_none());
    }
}
