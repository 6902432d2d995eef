// src/specs/top_chart.rs
// IMDb "Top 250" chart: JSON-LD ItemList → ranked MovieRecords.

use serde::Deserialize;
use serde_json::Value;

use crate::core::html::first_ld_json;
use crate::core::net::PageSource;
use crate::core::sanitize::clean_text;
use crate::data::MovieRecord;
use crate::error::{Result, ScrapeError};

/* ---------- JSON-LD shapes (only the fields we read) ---------- */

#[derive(Deserialize)]
struct ItemList {
    #[serde(rename = "itemListElement")]
    item_list_element: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct ListItem {
    item: Option<RawMovie>,
}

#[derive(Deserialize)]
struct RawMovie {
    name: Option<String>,
    #[serde(rename = "aggregateRating")]
    aggregate_rating: Option<AggregateRating>,
    // read loosely: a malformed genre never costs the movie
    #[serde(default)]
    genre: Option<Value>,
}

#[derive(Deserialize)]
struct AggregateRating {
    #[serde(rename = "ratingValue")]
    rating_value: Option<RatingValue>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RatingValue {
    Number(f64),
    Text(String),
}

impl RatingValue {
    fn to_f64(&self) -> Option<f64> {
        match self {
            RatingValue::Number(n) => Some(*n),
            RatingValue::Text(t) => t.trim().parse().ok(),
        }
    }
}

/// String entries of a scalar or array `genre`; anything else is dropped.
fn genre_list(value: Value) -> Vec<String> {
    let raw = match value {
        Value::String(g) => vec![g],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(g) => Some(g),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    raw.iter().map(|g| clean_text(g)).filter(|g| !g.is_empty()).collect()
}

/* ---------- entry points ---------- */

/// Fetch the page from `source` and extract its records.
pub fn fetch_and_extract(source: &dyn PageSource) -> Result<Vec<MovieRecord>> {
    let html = source.fetch_page()?;
    extract(&html)
}

/// Locate the JSON-LD block in `html` and decode it.
pub fn extract(html: &str) -> Result<Vec<MovieRecord>> {
    let block = first_ld_json(html).ok_or_else(|| {
        loge!("Extract: no application/ld+json block in {} bytes of HTML", html.len());
        ScrapeError::Parse(s!("structured data not found"))
    })?;
    parse_item_list(block)
}

/// Decode an ItemList JSON-LD document. Items missing a name or a usable
/// rating are skipped; ranks follow surviving positions, starting at 1.
pub fn parse_item_list(json: &str) -> Result<Vec<MovieRecord>> {
    let list: ItemList = serde_json::from_str(json.trim())
        .map_err(|e| ScrapeError::Parse(format!("structured data is not valid JSON: {e}")))?;

    let items = list
        .item_list_element
        .ok_or_else(|| ScrapeError::Parse(s!("structured data has no itemListElement")))?;

    let total = items.len();
    let mut out = Vec::with_capacity(total);

    for (pos, value) in items.into_iter().enumerate() {
        let rank = out.len() as u32 + 1;
        match to_record(value, rank) {
            Some(rec) => out.push(rec),
            None => logd!("Extract: skipped item at position {}", pos + 1),
        }
    }

    logf!("Extract: {} of {} items usable", out.len(), total);
    Ok(out)
}

/* ---------- helpers ---------- */

fn to_record(value: Value, rank: u32) -> Option<MovieRecord> {
    let wrapper: ListItem = serde_json::from_value(value).ok()?;
    let movie = wrapper.item?;

    let title = clean_text(movie.name.as_deref()?);
    if title.is_empty() {
        return None;
    }
    let rating = movie.aggregate_rating?.rating_value?.to_f64()?;
    let genres = movie.genre.map(genre_list).unwrap_or_default();

    // out-of-scale ratings fail validation and are skipped like missing ones
    MovieRecord::new(rank, title, rating, genres).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, rating: Value, genre: Value) -> Value {
        serde_json::json!({
            "@type": "ListItem",
            "item": {
                "@type": "Movie",
                "name": name,
                "aggregateRating": { "@type": "AggregateRating", "ratingValue": rating },
                "genre": genre
            }
        })
    }

    fn list(items: Vec<Value>) -> String {
        serde_json::json!({ "@type": "ItemList", "itemListElement": items }).to_string()
    }

    #[test]
    fn scalar_and_list_genres_both_become_lists() {
        let json = list(vec![
            item("A", 9.3.into(), "Drama".into()),
            item("B", 9.2.into(), serde_json::json!(["Crime", "Drama"])),
        ]);
        let recs = parse_item_list(&json).unwrap();
        assert_eq!(recs[0].genres(), ["Drama"]);
        assert_eq!(recs[1].genres(), ["Crime", "Drama"]);
    }

    #[test]
    fn odd_genre_values_keep_the_movie() {
        let json = list(vec![
            item("A", 9.3.into(), serde_json::json!(["Drama", null, 4, " Crime "])),
            item("B", 9.2.into(), 7.into()),
            item("C", 9.1.into(), serde_json::json!({ "name": "Drama" })),
        ]);
        let recs = parse_item_list(&json).unwrap();
        let got: Vec<(u32, &str)> = recs.iter().map(|r| (r.rank(), r.title())).collect();
        assert_eq!(got, vec![(1, "A"), (2, "B"), (3, "C")]);
        assert_eq!(recs[0].genres(), ["Drama", "Crime"]);
        assert!(recs[1].genres().is_empty());
        assert!(recs[2].genres().is_empty());
    }

    #[test]
    fn string_ratings_parse() {
        let json = list(vec![item("A", "8.7".into(), Value::Null)]);
        let recs = parse_item_list(&json).unwrap();
        assert_eq!(recs[0].rating(), 8.7);
        assert!(recs[0].genres().is_empty());
    }

    #[test]
    fn bad_items_skipped_and_ranks_stay_contiguous() {
        let json = list(vec![
            item("A", 9.3.into(), Value::Null),
            serde_json::json!({ "item": { "name": "No rating" } }),
            item("C", "n/a".into(), Value::Null),
            item("D", 42.0.into(), Value::Null),
            serde_json::json!("not even an object"),
            serde_json::json!({ "item": { "aggregateRating": { "ratingValue": 8.0 } } }),
            item("G", 8.1.into(), Value::Null),
        ]);
        let recs = parse_item_list(&json).unwrap();
        let got: Vec<(u32, &str)> = recs.iter().map(|r| (r.rank(), r.title())).collect();
        assert_eq!(got, vec![(1, "A"), (2, "G")]);
    }

    #[test]
    fn entities_in_titles_are_decoded() {
        let json = list(vec![item("Schindler&apos;s List", 9.0.into(), "Biography".into())]);
        assert_eq!(parse_item_list(&json).unwrap()[0].title(), "Schindler's List");
    }

    #[test]
    fn missing_block_is_parse_error() {
        let err = extract("<html><body>nothing here</body></html>").unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(ref m) if m == "structured data not found"));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let html = r#"<script type="application/ld+json">{"itemListElement": [</script>"#;
        assert!(matches!(extract(html), Err(ScrapeError::Parse(_))));
    }

    #[test]
    fn object_without_item_list_is_parse_error() {
        let html = r#"<script type="application/ld+json">{"@type":"WebPage"}</script>"#;
        assert!(matches!(extract(html), Err(ScrapeError::Parse(_))));
    }
}
