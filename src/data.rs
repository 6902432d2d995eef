// src/data.rs
//! Typed records and the two pure transforms over them:
//! ranking/top-N (`normalize`) and genre counting (`aggregate_genres`).

use std::collections::HashMap;

use serde::Serialize;

use crate::config::consts::{MAX_RATING, MIN_RATING, TOP_GENRES};
use crate::error::{Result, ScrapeError};

/// One ranked movie. Immutable once built; read through accessors.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieRecord {
    #[serde(rename = "Rank")]
    rank: u32,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Rating")]
    rating: f64,
    #[serde(rename = "Genres")]
    genres: Vec<String>,
}

impl MovieRecord {
    pub fn new(rank: u32, title: impl Into<String>, rating: f64, genres: Vec<String>) -> Result<Self> {
        if rank == 0 {
            return Err(ScrapeError::Validation(s!("rank must start at 1")));
        }
        if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ScrapeError::Validation(format!(
                "rating {rating} outside {MIN_RATING}..={MAX_RATING}"
            )));
        }
        Ok(Self { rank, title: title.into(), rating, genres })
    }

    pub fn rank(&self) -> u32 { self.rank }
    pub fn title(&self) -> &str { &self.title }
    pub fn rating(&self) -> f64 { self.rating }
    pub fn genres(&self) -> &[String] { &self.genres }

    fn with_rank(mut self, rank: u32) -> Self {
        self.rank = rank;
        self
    }
}

/// Records ordered by rank, ranks contiguous from 1.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
    records: Vec<MovieRecord>,
}

impl ResultSet {
    /// Re-ranks by position: 1..=len.
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.with_rank(i as u32 + 1))
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn records(&self) -> &[MovieRecord] { &self.records }

    /// First `n` records (or all of them when fewer exist).
    pub fn prefix(&self, n: usize) -> &[MovieRecord] {
        &self.records[..n.min(self.records.len())]
    }

    pub fn ratings(&self) -> Vec<f64> {
        self.records.iter().map(MovieRecord::rating).collect()
    }
}

/// Normalizer output: the full re-ranked set and the top-N view over it.
#[derive(Clone, Debug, PartialEq)]
pub struct Ranked {
    full: ResultSet,
    top: usize,
}

impl Ranked {
    pub fn full(&self) -> &ResultSet { &self.full }

    /// The requested top-N slice; what bar charts show and exports write.
    pub fn prefix(&self) -> &[MovieRecord] { self.full.prefix(self.top) }

    /// Effective top-N length: min(requested, available).
    pub fn top(&self) -> usize { self.top }
}

/// Reject counts below 1. Called before any fetch so a bad count never
/// touches the network.
pub fn validate_top(top: i64) -> Result<usize> {
    if top < 1 {
        return Err(ScrapeError::Validation(format!("top must be at least 1 (got {top})")));
    }
    Ok(usize::try_from(top).unwrap_or(usize::MAX))
}

/// Re-rank the extracted sequence and cut the top-N view.
/// A count larger than the available records yields the whole set.
pub fn normalize(records: Vec<MovieRecord>, top: i64) -> Result<Ranked> {
    let requested = validate_top(top)?;
    let full = ResultSet::from_records(records);
    let top = requested.min(full.len());
    logd!("Normalize: {} records, top {} (requested {})", full.len(), top, requested);
    Ok(Ranked { full, top })
}

/* ---------------- Genre aggregation ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub label: String,
    pub count: usize,
}

/// Count genre labels across `records`, highest first, keep `TOP_GENRES`.
/// Equal counts keep first-seen order.
pub fn aggregate_genres(records: &[MovieRecord]) -> Vec<GenreCount> {
    let mut counts: Vec<GenreCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for genre in records.iter().flat_map(|r| r.genres.iter()) {
        match index.get(genre.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(genre.as_str(), counts.len());
                counts.push(GenreCount { label: genre.clone(), count: 1 });
            }
        }
    }

    // sort_by is stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_GENRES);
    counts
}
