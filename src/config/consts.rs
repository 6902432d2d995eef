// src/config/consts.rs

// Source
pub const SOURCE_URL: &str = "https://www.imdb.com/chart/top";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const CONNECT_TIMEOUT_SECS: u64 = 10;
pub const FETCH_TIMEOUT_SECS: u64 = 30;

// Records
pub const DEFAULT_TOP: i64 = 10;
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;
pub const TOP_GENRES: usize = 10;
pub const GENRE_SEP: &str = ", ";

// Chart
pub const CHART_WIDTH: u32 = 1000;
pub const CHART_HEIGHT: u32 = 600;
pub const HIST_BINS: usize = 10;
pub const KDE_POINTS: usize = 200;
pub const PIE_START_DEG: f64 = 140.0;
pub const FONT_FAMILY: &str = "sans-serif";
pub const FONT_ENV: &str = "IMDB_SCRAPE_FONT";

// Export
pub const DEFAULT_FILENAME: &str = "imdb_top_movies";
pub const DEFAULT_OUT_DIR: &str = ".";
pub const DOWNLOADS_DIR: &str = "downloads";

// Server
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const CHART_STORE_CAPACITY: usize = 32;
