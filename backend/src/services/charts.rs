//! Inline SVG charts rendered with `plotters`.

use std::ops::Range;

use chrono::Duration;
use plotters::coord::ranged1d::SegmentValue;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::FontTransform;
use thiserror::Error;

use crate::models::{CategoryCounts, ForecastPoint};

pub const FORECAST_TITLE: &str = "Predicted Future Bird Strikes";

const CHART_HEIGHT: u32 = 480;
const MIN_CHART_WIDTH: u32 = 900;
const MAX_CHART_WIDTH: u32 = 6000;
const BAR_SLOT_WIDTH: u32 = 28;

/// Failures while drawing a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),

    #[error("Nothing to plot: {0}")]
    Empty(&'static str),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(err.to_string())
    }
}

/// Line chart with markers of the predicted daily counts.
pub fn forecast_chart(points: &[ForecastPoint]) -> Result<String, ChartError> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Err(ChartError::Empty("forecast has no points")),
    };

    let y_range = value_range(points);
    // Keep a non-degenerate x range for a one-day horizon.
    let x_end = last.day.max(first.day + 1);

    let date_label = |day: &i64| {
        (first.date + Duration::days(*day - first.day))
            .format("%Y-%m-%d")
            .to_string()
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (MIN_CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(FORECAST_TITLE, ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(60)
            .y_label_area_size(60)
            .build_cartesian_2d(first.day..x_end, y_range)?;

        chart
            .configure_mesh()
            .x_desc("FlightDate")
            .y_desc("Predicted Count")
            .x_labels(10)
            .x_label_formatter(&date_label)
            .draw()?;

        let series: Vec<(i64, f64)> = points.iter().map(|p| (p.day, p.predicted)).collect();
        chart.draw_series(LineSeries::new(series.iter().copied(), BLUE.stroke_width(2)))?;
        chart.draw_series(
            series
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, BLUE.filled())),
        )?;

        root.present()?;
    }
    Ok(svg)
}

/// Y extent of the forecast: always includes zero, padded away from the
/// extremes so negative predictions are drawn below the axis.
fn value_range(points: &[ForecastPoint]) -> Range<f64> {
    let (lo, hi) = points
        .iter()
        .map(|p| p.predicted)
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = hi - lo;
    if span <= 0.0 {
        return 0.0..1.0;
    }
    let bottom = if lo < 0.0 { lo - span * 0.1 } else { 0.0 };
    let top = if hi > 0.0 { hi + span * 0.2 } else { span * 0.05 };
    bottom..top
}

/// Bar chart of category frequencies; bar colour follows the count.
pub fn category_chart(counts: &CategoryCounts) -> Result<String, ChartError> {
    let n = counts.counts.len();
    let slots = n.max(1) as i32;
    let max = counts.max_count();
    let y_top = f64::from(max.max(1)) * 1.1;

    let width = (BAR_SLOT_WIDTH * n as u32 + 160).clamp(MIN_CHART_WIDTH, MAX_CHART_WIDTH);
    let labels: Vec<&str> = counts.counts.iter().map(|(label, _)| label.as_str()).collect();
    let label_of = |v: &SegmentValue<i32>| match v {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => labels
            .get(*i as usize)
            .map(|s| truncate_label(s))
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&counts.title, ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(140)
            .y_label_area_size(60)
            .build_cartesian_2d((0..slots).into_segmented(), 0.0..y_top)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(counts.axis_label.as_str())
            .y_desc("Count")
            .x_labels(n.max(1))
            .x_label_formatter(&label_of)
            .x_label_style(("sans-serif", 11).into_font().transform(FontTransform::Rotate90))
            .draw()?;

        chart.draw_series(counts.counts.iter().enumerate().map(|(i, (_, count))| {
            let i = i as i32;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), f64::from(*count)),
                ],
                count_color(*count, max).filled(),
            );
            bar.set_margin(0, 0, 3, 3);
            bar
        }))?;

        root.present()?;
    }
    Ok(svg)
}

fn truncate_label(label: &str) -> String {
    const MAX_CHARS: usize = 24;
    if label.chars().count() <= MAX_CHARS {
        label.to_string()
    } else {
        let head: String = label.chars().take(MAX_CHARS - 1).collect();
        format!("{}…", head)
    }
}

/// Position `count` on a three-stop scale from dark blue (lowest) to yellow
/// (highest).
fn count_color(count: u32, max: u32) -> RGBColor {
    const STOPS: [(u8, u8, u8); 3] = [(13, 8, 135), (204, 71, 120), (240, 249, 33)];
    let t = if max == 0 {
        0.0
    } else {
        f64::from(count) / f64::from(max)
    };

    let (from, to, local) = if t <= 0.5 {
        (STOPS[0], STOPS[1], t * 2.0)
    } else {
        (STOPS[1], STOPS[2], (t - 0.5) * 2.0)
    };
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * local).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}
