// src/chart/bar.rs
// Horizontal bars, rank 1 on top, bar length = rating.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{ChartArtifact, fonts, paint, viridis};
use crate::config::consts::{FONT_FAMILY, MAX_RATING};
use crate::config::options::PlotKind;
use crate::data::MovieRecord;
use crate::error::Result;

/// Vertical slot for the record at `index` (0 = rank 1) out of `n`:
/// (bottom, top) in chart y-units. The first record gets the topmost slot.
pub fn bar_slot(index: usize, n: usize) -> (f64, f64) {
    let top = (n - index) as f64;
    (top - 0.85, top - 0.15)
}

pub fn draw(records: &[MovieRecord]) -> Result<ChartArtifact> {
    let labels = fonts::available();
    let n = records.len();

    paint(PlotKind::Bar, |root| {
        let mut builder = ChartBuilder::on(root);
        builder.margin(20);
        if labels {
            builder
                .caption(format!("Top {n} Movies by IMDb Rating"), (FONT_FAMILY, 24).into_font())
                .x_label_area_size(40);
        }
        let mut chart = builder.build_cartesian_2d(0f64..MAX_RATING, 0f64..n.max(1) as f64)?;

        if labels {
            chart
                .configure_mesh()
                .disable_y_mesh()
                .disable_y_axis()
                .x_desc("IMDb Rating")
                .draw()?;
        }

        let shade = |i: usize| viridis(0.6 * i as f64 / n.max(2) as f64);
        chart.draw_series(records.iter().enumerate().map(|(i, rec)| {
            let (lo, hi) = bar_slot(i, n);
            Rectangle::new([(0.0, lo), (rec.rating(), hi)], shade(i).filled())
        }))?;

        if labels {
            let style = (FONT_FAMILY, 14)
                .into_font()
                .color(&WHITE)
                .pos(Pos::new(HPos::Left, VPos::Center));
            chart.draw_series(records.iter().enumerate().map(|(i, rec)| {
                let (lo, hi) = bar_slot(i, n);
                Text::new(
                    format!("{}. {}  ({:.1})", rec.rank(), rec.title(), rec.rating()),
                    (0.1, (lo + hi) / 2.0),
                    style.clone(),
                )
            }))?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_record_sits_highest() {
        let n = 10;
        let slots: Vec<(f64, f64)> = (0..n).map(|i| bar_slot(i, n)).collect();
        for w in slots.windows(2) {
            assert!(w[0].0 > w[1].0, "bars must descend in rank order");
        }
        assert!(slots[0].1 <= n as f64);
        assert!(slots[n - 1].0 >= 0.0);
    }
}
