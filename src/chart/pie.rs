// src/chart/pie.rs
// Genre share: one wedge per count, drawn in pixel space on the root area.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{ChartArtifact, fonts, paint};
use crate::config::consts::{CHART_HEIGHT, CHART_WIDTH, FONT_FAMILY, PIE_START_DEG};
use crate::config::options::PlotKind;
use crate::data::GenreCount;
use crate::error::Result;

// ColorBrewer Set3
const SET3: [RGBColor; 12] = [
    RGBColor(141, 211, 199),
    RGBColor(255, 255, 179),
    RGBColor(190, 186, 218),
    RGBColor(251, 128, 114),
    RGBColor(128, 177, 211),
    RGBColor(253, 180, 98),
    RGBColor(179, 222, 105),
    RGBColor(252, 205, 229),
    RGBColor(217, 217, 217),
    RGBColor(188, 128, 189),
    RGBColor(204, 235, 197),
    RGBColor(255, 237, 111),
];

#[derive(Clone, Debug, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub count: usize,
    /// Counter-clockwise from 3 o'clock, degrees.
    pub start_deg: f64,
    pub sweep_deg: f64,
    pub percent: f64,
}

impl Wedge {
    pub fn mid_deg(&self) -> f64 {
        self.start_deg + self.sweep_deg / 2.0
    }
}

/// Lay the counts out counter-clockwise from `PIE_START_DEG`.
pub fn wedges(counts: &[GenreCount]) -> Vec<Wedge> {
    let total: usize = counts.iter().map(|g| g.count).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = PIE_START_DEG;
    counts
        .iter()
        .map(|g| {
            let share = g.count as f64 / total as f64;
            let w = Wedge {
                label: g.label.clone(),
                count: g.count,
                start_deg: start,
                sweep_deg: 360.0 * share,
                percent: 100.0 * share,
            };
            start += w.sweep_deg;
            w
        })
        .collect()
}

fn polar(center: (i32, i32), r: f64, deg: f64) -> (i32, i32) {
    let rad = deg.to_radians();
    (
        center.0 + (r * rad.cos()).round() as i32,
        center.1 - (r * rad.sin()).round() as i32, // pixel y grows downward
    )
}

fn outline(center: (i32, i32), r: f64, w: &Wedge) -> Vec<(i32, i32)> {
    let steps = (w.sweep_deg.ceil() as usize).max(2);
    let mut pts = Vec::with_capacity(steps + 2);
    pts.push(center);
    for i in 0..=steps {
        pts.push(polar(center, r, w.start_deg + w.sweep_deg * i as f64 / steps as f64));
    }
    pts
}

/// `sample_size` is the number of movies the counts were taken from (title only).
pub fn draw(counts: &[GenreCount], sample_size: usize) -> Result<ChartArtifact> {
    let labels = fonts::available();
    let slices = wedges(counts);
    let (w, h) = (CHART_WIDTH as i32, CHART_HEIGHT as i32);
    let center = (w / 2, h / 2 + 15);
    let radius = 0.38 * w.min(h) as f64;

    paint(PlotKind::Pie, |root| {
        for (i, s) in slices.iter().enumerate() {
            let pts = outline(center, radius, s);
            let color = SET3[i % SET3.len()];
            root.draw(&Polygon::new(pts.clone(), color.filled()))?;
            let mut edge = pts;
            edge.push(center);
            root.draw(&PathElement::new(edge, WHITE.stroke_width(2)))?;
        }

        if !labels {
            return Ok(());
        }

        let title = (FONT_FAMILY, 22)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(
            format!("Distribution of Genres in Top {sample_size} IMDb Movies"),
            (w / 2, 12),
            title,
        ))?;

        let pct = (FONT_FAMILY, 14)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        for s in &slices {
            let mid = s.mid_deg();
            root.draw(&Text::new(
                format!("{:.1}%", s.percent),
                polar(center, radius * 0.6, mid),
                pct.clone(),
            ))?;

            let side = if mid.to_radians().cos() >= 0.0 { HPos::Left } else { HPos::Right };
            let label = (FONT_FAMILY, 15)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(side, VPos::Center));
            root.draw(&Text::new(s.label.clone(), polar(center, radius * 1.1, mid), label))?;
        }
        Ok(())
    })
}
