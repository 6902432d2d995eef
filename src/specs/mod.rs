// src/specs/mod.rs
//! # Page specs
//!
//! Each spec knows where the ground truth lives in one page's HTML and how to
//! read it robustly. Specs only extract: fetching is injected through
//! `core::net::PageSource`, and ranking, charts and export live elsewhere.
//!
//! ## Conventions
//! - Prefer the page's embedded structured data (JSON-LD) over markup scraping.
//!   If the data island is missing, fail; there is no markup fallback.
//! - One bad item never sinks the batch: skip it, log at debug, keep going.
//! - Specs are testable offline against captured or synthetic pages.
pub mod top_chart;
