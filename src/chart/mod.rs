// src/chart/mod.rs
//! Chart rendering: one PNG per run.
//!
//! Every chart is drawn with plotters into an in-memory RGB buffer and
//! encoded with `image`. Text is drawn only when `fonts::init` found a
//! usable font; otherwise the shapes are drawn without labels.

pub mod bar;
pub mod fonts;
pub mod hist;
pub mod pie;

use std::error::Error;
use std::fmt::Display;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::config::consts::{CHART_HEIGHT, CHART_WIDTH};
use crate::config::options::PlotKind;
use crate::data::{Ranked, aggregate_genres};
use crate::error::{Result, ScrapeError};

/// An encoded chart image. Owned by the response/run that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartArtifact {
    pub kind: PlotKind,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

pub(crate) type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Pick the right input for `kind` and draw it.
/// - bar: the top-N prefix
/// - hist: ratings of the full set
/// - pie: genre counts over the full set
pub fn render(kind: PlotKind, ranked: &Ranked) -> Result<ChartArtifact> {
    let chart = match kind {
        PlotKind::Bar => bar::draw(ranked.prefix())?,
        PlotKind::Histogram => hist::draw(&ranked.full().ratings())?,
        PlotKind::Pie => {
            let genres = aggregate_genres(ranked.full().records());
            logd!("Render: {} genre slices", genres.len());
            pie::draw(&genres, ranked.full().len())?
        }
    };
    logf!("Render: {} chart, {} bytes PNG", kind, chart.png.len());
    Ok(chart)
}

/// White canvas → `draw` → PNG.
pub(crate) fn paint<F>(kind: PlotKind, draw: F) -> Result<ChartArtifact>
where
    F: FnOnce(&Canvas<'_>) -> std::result::Result<(), Box<dyn Error>>,
{
    let (w, h) = (CHART_WIDTH, CHART_HEIGHT);
    let mut buf = vec![0u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;
        draw(&root).map_err(render_err)?;
        root.present().map_err(render_err)?;
    }
    let png = encode_png(&buf, w, h)?;
    Ok(ChartArtifact { kind, width: w, height: h, png })
}

pub fn encode_png(rgb: &[u8], w: u32, h: u32) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(rgb, w, h, ExtendedColorType::Rgb8)
        .map_err(render_err)?;
    Ok(out)
}

fn render_err<E: Display>(e: E) -> ScrapeError {
    ScrapeError::Render(e.to_string())
}

/// Five-stop viridis approximation, `t` in 0..=1.
pub(crate) fn viridis(t: f64) -> RGBColor {
    const STOPS: [(u8, u8, u8); 5] = [
        (68, 1, 84),
        (59, 82, 139),
        (33, 145, 140),
        (94, 201, 98),
        (253, 231, 37),
    ];
    let t = t.clamp(0.0, 1.0) * (STOPS.len() - 1) as f64;
    let i = (t.floor() as usize).min(STOPS.len() - 2);
    let f = t - i as f64;
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
    let (a, b) = (STOPS[i], STOPS[i + 1]);
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}
