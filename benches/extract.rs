// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};
use serde_json::json;

use imdb_scrape::{
    core::html::first_ld_json,
    data::{aggregate_genres, normalize},
    specs::top_chart,
};

const GENRES: [&str; 6] = ["Drama", "Crime", "Action", "Comedy", "Thriller", "Adventure"];

/// A saved page if one is around, otherwise a synthetic 250-item chart
/// padded with inline script like the real page.
fn load_sample() -> String {
    if let Ok(page) = std::fs::read_to_string(".ignore/page_samples/top250.html") {
        return page;
    }
    let items: Vec<_> = (0..250)
        .map(|i| {
            json!({
                "@type": "ListItem",
                "item": {
                    "@type": "Movie",
                    "name": format!("Movie &amp; Title {i}"),
                    "aggregateRating": { "ratingValue": 9.3 - i as f64 * 0.006 },
                    "genre": [GENRES[i % 6], GENRES[(i / 6) % 6]]
                }
            })
        })
        .collect();
    let filler = "<script>window.__state = {\"noise\": true};</script>\n".repeat(200);
    format!(
        "<html><head>{filler}<script type=\"application/ld+json\">{}</script></head><body></body></html>",
        json!({ "@type": "ItemList", "itemListElement": items })
    )
}

fn bench_extract(c: &mut Criterion) {
    let doc = load_sample();

    c.bench_function("locate_ld_json", |b| {
        b.iter(|| black_box(first_ld_json(black_box(&doc)).map(str::len)))
    });

    c.bench_function("extract_top250", |b| {
        b.iter(|| {
            let recs = top_chart::extract(black_box(&doc)).unwrap_or_default();
            black_box(recs.len())
        })
    });

    let recs = top_chart::extract(&doc).unwrap_or_default();
    c.bench_function("normalize_and_aggregate", |b| {
        b.iter(|| {
            let ranked = normalize(black_box(recs.clone()), 10).ok();
            let genres = aggregate_genres(black_box(&recs));
            black_box((ranked.map(|r| r.top()), genres.len()))
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
