// tests/common/mod.rs
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use imdb_scrape::core::PageSource;
use imdb_scrape::{Result, ScrapeError};
use serde_json::{Value, json};

pub const TOTAL: usize = 250;

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("imdb_scrape_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

/// Genres for position `i` (0-based):
/// Drama 0..120, Crime 100..180, Action 180..240, Comedy every 5th, Thriller every 7th.
pub fn genres_for(i: usize) -> Vec<&'static str> {
    let mut g = Vec::new();
    if i < 120 { g.push("Drama"); }
    if (100..180).contains(&i) { g.push("Crime"); }
    if (180..240).contains(&i) { g.push("Action"); }
    if i % 5 == 0 { g.push("Comedy"); }
    if i % 7 == 0 { g.push("Thriller"); }
    g
}

pub fn rating_for(i: usize) -> f64 {
    ((9.3 - i as f64 * 0.006) * 1000.0).round() / 1000.0
}

pub fn title_for(i: usize) -> String {
    format!("Movie {:03}", i + 1)
}

pub fn item(name: &str, rating: Value, genres: &[&str]) -> Value {
    json!({
        "@type": "ListItem",
        "item": {
            "@type": "Movie",
            "name": name,
            "aggregateRating": { "@type": "AggregateRating", "ratingValue": rating },
            "genre": genres
        }
    })
}

pub fn page_with(items: Vec<Value>) -> String {
    let data = json!({ "@context": "https://schema.org", "@type": "ItemList", "itemListElement": items });
    format!(
        "<!DOCTYPE html><html><head><title>Top 250</title>\n\
         <script type=\"application/ld+json\">{data}</script>\n\
         </head><body><h1>IMDb Top 250 Movies</h1></body></html>"
    )
}

/// The full 250-item chart page.
pub fn top250_page() -> String {
    page_with(
        (0..TOTAL)
            .map(|i| item(&title_for(i), json!(rating_for(i)), &genres_for(i)))
            .collect(),
    )
}

/// Counts fetches; fails if asked to fetch when `html` is None.
pub struct CountingSource {
    pub html: Option<String>,
    pub calls: AtomicUsize,
}

impl CountingSource {
    pub fn new(html: Option<String>) -> Self {
        Self { html, calls: AtomicUsize::new(0) }
    }
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PageSource for CountingSource {
    fn fetch_page(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.html.clone().ok_or_else(|| ScrapeError::Network("HTTP 503 from test".into()))
    }
    fn describe(&self) -> String {
        "counting source".into()
    }
}

pub fn dir_is_empty(dir: &std::path::Path) -> bool {
    fs::read_dir(dir).map(|mut d| d.next().is_none()).unwrap_or(true)
}
