// src/chart/hist.rs
// Rating distribution: fixed bins over the observed range + Gaussian KDE.

use plotters::prelude::*;

use super::{ChartArtifact, fonts, paint, viridis};
use crate::config::consts::{FONT_FAMILY, HIST_BINS, KDE_POINTS};
use crate::config::options::PlotKind;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// `n` equal-width bins over [min, max]. The max value lands in the last bin.
/// A single distinct value is widened to ±0.5 so bins have width.
pub fn bins(values: &[f64], n: usize) -> Vec<Bin> {
    if values.is_empty() || n == 0 {
        return Vec::new();
    }
    let (mut lo, mut hi) = min_max(values);
    if hi - lo < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / n as f64;
    let mut out: Vec<Bin> = (0..n)
        .map(|i| Bin { lo: lo + width * i as f64, hi: lo + width * (i + 1) as f64, count: 0 })
        .collect();
    for &v in values {
        let i = (((v - lo) / width).floor() as usize).min(n - 1);
        out[i].count += 1;
    }
    out
}

/// Scott's rule: σ · n^(-1/5), σ the sample standard deviation.
/// None when there is no spread to estimate.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let sd = var.sqrt();
    (sd > 0.0).then(|| sd * (n as f64).powf(-0.2))
}

/// Gaussian kernel density of `values` at each x in `xs`.
pub fn kde(values: &[f64], xs: &[f64], bandwidth: f64) -> Vec<f64> {
    let norm = 1.0 / (values.len() as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    xs.iter()
        .map(|&x| {
            norm * values
                .iter()
                .map(|&v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum::<f64>()
        })
        .collect()
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

pub fn draw(ratings: &[f64]) -> Result<ChartArtifact> {
    let labels = fonts::available();
    let bins = bins(ratings, HIST_BINS);

    // KDE is scaled to counts so it overlays the bars.
    let curve: Vec<(f64, f64)> = match (bins.first(), bins.last(), scott_bandwidth(ratings)) {
        (Some(first), Some(last), Some(bw)) => {
            let (lo, hi) = (first.lo, last.hi);
            let step = (hi - lo) / (KDE_POINTS - 1) as f64;
            let xs: Vec<f64> = (0..KDE_POINTS).map(|i| lo + step * i as f64).collect();
            let scale = ratings.len() as f64 * (first.hi - first.lo);
            let ys = kde(ratings, &xs, bw);
            xs.into_iter().zip(ys).map(|(x, y)| (x, y * scale)).collect()
        }
        _ => Vec::new(),
    };

    let (x_lo, x_hi) = match (bins.first(), bins.last()) {
        (Some(f), Some(l)) => (f.lo, l.hi),
        _ => (0.0, 10.0),
    };
    let y_max = bins
        .iter()
        .map(|b| b.count as f64)
        .chain(curve.iter().map(|&(_, y)| y))
        .fold(1.0, f64::max)
        * 1.1;

    paint(PlotKind::Histogram, |root| {
        let mut builder = ChartBuilder::on(root);
        builder.margin(20);
        if labels {
            builder
                .caption("Distribution of IMDb Ratings", (FONT_FAMILY, 24).into_font())
                .x_label_area_size(40)
                .y_label_area_size(50);
        }
        let mut chart = builder.build_cartesian_2d(x_lo..x_hi, 0f64..y_max)?;

        if labels {
            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc("IMDb Rating")
                .y_desc("Frequency")
                .draw()?;
        }

        let fill = viridis(0.35);
        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.lo, 0.0), (b.hi, b.count as f64)], fill.mix(0.7).filled())
        }))?;
        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.lo, 0.0), (b.hi, b.count as f64)], WHITE.stroke_width(1))
        }))?;

        if !curve.is_empty() {
            chart.draw_series(LineSeries::new(curve.iter().copied(), viridis(0.1).stroke_width(2)))?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_bins_cover_every_value() {
        let values: Vec<f64> = (0..250).map(|i| 9.3 - i as f64 * 0.006).collect();
        let b = bins(&values, 10);
        assert_eq!(b.len(), 10);
        assert_eq!(b.iter().map(|b| b.count).sum::<usize>(), 250);
        assert!((b[0].lo - values[249]).abs() < 1e-9);
        assert!((b[9].hi - 9.3).abs() < 1e-9);
    }

    #[test]
    fn max_lands_in_last_bin() {
        let b = bins(&[1.0, 2.0, 3.0], 2);
        assert_eq!(b[0].count, 1);
        assert_eq!(b[1].count, 2);
    }

    #[test]
    fn single_value_is_widened() {
        let b = bins(&[8.0, 8.0], 10);
        assert!((b[0].lo - 7.5).abs() < 1e-9);
        assert!((b[9].hi - 8.5).abs() < 1e-9);
        assert_eq!(b.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn empty_input_no_bins() {
        assert!(bins(&[], 10).is_empty());
    }

    #[test]
    fn bandwidth_needs_spread() {
        assert_eq!(scott_bandwidth(&[8.0]), None);
        assert_eq!(scott_bandwidth(&[8.0, 8.0, 8.0]), None);
        assert!(scott_bandwidth(&[8.0, 9.0]).unwrap() > 0.0);
    }

    #[test]
    fn kde_integrates_to_about_one() {
        let values = [8.0, 8.5, 9.0, 9.2];
        let bw = scott_bandwidth(&values).unwrap();
        let step = 0.01;
        let xs: Vec<f64> = (0..1000).map(|i| 4.0 + i as f64 * step).collect();
        let area: f64 = kde(&values, &xs, bw).iter().sum::<f64>() * step;
        assert!((area - 1.0).abs() < 0.01, "area was {area}");
    }
}
