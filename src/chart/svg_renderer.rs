use std::fmt::Display;

use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use tracing::{trace, warn};

use crate::error::{DashboardError, DashboardResult};

use super::{
    ChartConfig, ChartData, ChartKind, ChartRenderer, ChartSurface, Dataset, RgbColor,
    palette_color,
};

/// How much of the outer radius a doughnut cutout removes.
const DOUGHNUT_CUTOUT: f64 = 0.5;

type SvgArea<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Plotters-backed renderer producing the SVG document a dashboard embeds.
///
/// Line and bar charts draw through a cartesian plot with category labels on
/// the x axis; pie and doughnut charts draw sector polygons straight onto
/// the surface.
#[derive(Debug, Default)]
pub struct SvgRenderer;

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ChartRenderer for SvgRenderer {
    fn render(&mut self, config: &ChartConfig, surface: &mut ChartSurface) -> DashboardResult<()> {
        config.validate()?;
        let width = surface.width();
        let height = surface.height();
        let pass = {
            let buffer = surface.begin_pass();
            let root = SVGBackend::with_string(buffer, (width, height)).into_drawing_area();
            draw_document(&root, config)
        };
        if let Err(err) = pass {
            // the backend flushes on drop, so a failed pass must not leave
            // partial output behind
            surface.begin_pass();
            return Err(err);
        }
        surface.finalize(config.options)?;
        trace!(kind = config.kind.as_str(), "svg render pass complete");
        Ok(())
    }
}

fn draw_document(root: &SvgArea<'_>, config: &ChartConfig) -> DashboardResult<()> {
    root.fill(&WHITE)
        .map_err(|e| render_error("fill surface", &e))?;
    match config.kind {
        ChartKind::Line => draw_line(root, config)?,
        ChartKind::Bar => draw_bar(root, config)?,
        ChartKind::Pie => draw_sectors(root, config, 0.0)?,
        ChartKind::Doughnut => draw_sectors(root, config, DOUGHNUT_CUTOUT)?,
    }
    root.present()
        .map_err(|e| render_error("present document", &e))
}

fn draw_line(root: &SvgArea<'_>, config: &ChartConfig) -> DashboardResult<()> {
    let data = &config.data;
    let point_count = data.point_count();
    let (y_min, y_max) = padded_value_range(data);
    let x_max = point_count.saturating_sub(1).max(1) as f64;

    let mut chart = ChartBuilder::on(root)
        .margin(12)
        .x_label_area_size(30)
        .y_label_area_size(52)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .map_err(|e| render_error("build plot area", &e))?;

    chart
        .configure_mesh()
        .x_labels(point_count.min(12))
        .y_labels(6)
        .x_label_formatter(&|x| category_label(data, *x))
        .y_label_formatter(&|y| axis_label(*y))
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(|e| render_error("draw axes", &e))?;

    for (index, dataset) in data.datasets.iter().enumerate() {
        let stroke = plotters_color(dataset.stroke_color(index)?).stroke_width(2);
        let points = dataset
            .data
            .iter()
            .enumerate()
            .map(|(i, value)| (i as f64, *value));
        chart
            .draw_series(LineSeries::new(points, stroke))
            .map_err(|e| render_error("draw line series", &e))?
            .label(dataset.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], stroke));
    }

    draw_legend(&mut chart)
}

fn draw_bar(root: &SvgArea<'_>, config: &ChartConfig) -> DashboardResult<()> {
    let data = &config.data;
    let point_count = data.point_count();
    let (y_min, y_max) = bar_value_range(data);

    let mut chart = ChartBuilder::on(root)
        .margin(12)
        .x_label_area_size(30)
        .y_label_area_size(52)
        .build_cartesian_2d(-0.5..point_count as f64 - 0.5, y_min..y_max)
        .map_err(|e| render_error("build plot area", &e))?;

    chart
        .configure_mesh()
        .x_labels(point_count.min(12))
        .y_labels(6)
        .x_label_formatter(&|x| category_label(data, *x))
        .y_label_formatter(&|y| axis_label(*y))
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(|e| render_error("draw axes", &e))?;

    // Datasets share each category slot side by side, with a small gap
    // between neighboring columns.
    let group_width = 0.8;
    let column_width = group_width / data.datasets.len() as f64;
    for (index, dataset) in data.datasets.iter().enumerate() {
        let fill = plotters_color(dataset.fill_color(index)?).filled();
        let columns = dataset.data.iter().enumerate().map(|(i, value)| {
            let left = i as f64 - group_width / 2.0 + index as f64 * column_width;
            Rectangle::new([(left, 0.0), (left + column_width * 0.9, *value)], fill)
        });
        chart
            .draw_series(columns)
            .map_err(|e| render_error("draw bar series", &e))?
            .label(dataset.label.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], fill));
    }

    draw_legend(&mut chart)
}

fn draw_sectors(root: &SvgArea<'_>, config: &ChartConfig, cutout: f64) -> DashboardResult<()> {
    let data = &config.data;
    let Some(dataset) = data.datasets.first() else {
        return Err(DashboardError::InvalidData(
            "sector chart needs a dataset".to_owned(),
        ));
    };
    if data.datasets.len() > 1 {
        warn!(
            ignored = data.datasets.len() - 1,
            "sector charts render the first dataset only"
        );
    }
    if dataset.data.iter().any(|value| *value < 0.0) {
        return Err(DashboardError::InvalidData(
            "sector chart values must be non-negative".to_owned(),
        ));
    }
    let total: f64 = dataset.data.iter().sum();
    if total <= 0.0 {
        return Err(DashboardError::InvalidData(
            "sector chart needs a positive value total".to_owned(),
        ));
    }

    let (width, height) = root.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(width.min(height)) * 0.38;
    let inner = radius * cutout;

    let mut start = 0.0_f64;
    for (slice, value) in dataset.data.iter().enumerate() {
        let sweep = value / total * std::f64::consts::TAU;
        let end = start + sweep;
        if sweep > 0.0 {
            let color = sector_color(dataset, slice)?;
            root.draw(&Polygon::new(
                sector_points(center, radius, inner, start, end),
                color.filled(),
            ))
            .map_err(|e| render_error("draw sector", &e))?;

            if let Some(label) = data.labels.get(slice) {
                let mid = (start + end) / 2.0;
                let anchor = polar_point(center, radius * 1.12, mid);
                root.draw(&Text::new(
                    label.clone(),
                    anchor,
                    ("sans-serif", 12).into_font(),
                ))
                .map_err(|e| render_error("draw sector label", &e))?;
            }
        }
        start = end;
    }
    Ok(())
}

fn draw_legend<'a, 'b: 'a>(
    chart: &mut ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
) -> DashboardResult<()> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.4))
        .label_font(("sans-serif", 12))
        .draw()
        .map_err(|e| render_error("draw legend", &e))?;
    Ok(())
}

// Pads the raw extent so strokes at the extremes stay inside the plot, and
// widens degenerate ranges so the mesh always has a span to draw.
fn padded_value_range(data: &ChartData) -> (f64, f64) {
    let (min, max) = data.value_range().unwrap_or((0.0, 1.0));
    let span = max - min;
    if span <= f64::EPSILON {
        let pad = if min.abs() > f64::EPSILON {
            min.abs() * 0.1
        } else {
            1.0
        };
        return (min - pad, max + pad);
    }
    let pad = span * 0.05;
    (min - pad, max + pad)
}

// Bars grow from a zero baseline, so the range always includes it.
fn bar_value_range(data: &ChartData) -> (f64, f64) {
    let (min, max) = data.value_range().unwrap_or((0.0, 1.0));
    let floor = min.min(0.0);
    let ceil = max.max(0.0);
    let span = (ceil - floor).max(f64::EPSILON);
    let low = if floor < 0.0 { floor - span * 0.05 } else { 0.0 };
    (low, ceil + span * 0.05)
}

// Category ticks land on integer coordinates; fractional ticks between them
// stay unlabeled.
fn category_label(data: &ChartData, x: f64) -> String {
    let index = x.round();
    if index < 0.0 || (x - index).abs() > 0.25 {
        return String::new();
    }
    data.labels.get(index as usize).cloned().unwrap_or_default()
}

// Value-axis labels follow the same separator convention as the currency
// formatter: grouped integers, comma decimals only when needed.
fn axis_label(value: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let text = format!("{:.2}", value.abs());
    let (int_digits, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let mut out = String::with_capacity(text.len() + 4);
    if value < 0.0 {
        out.push('-');
    }
    let len = int_digits.len();
    for (idx, ch) in int_digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    let fraction = fraction.trim_end_matches('0');
    if !fraction.is_empty() {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

fn sector_color(dataset: &Dataset, slice: usize) -> DashboardResult<RGBColor> {
    let resolved = match &dataset.background_color {
        Some(hex) => RgbColor::parse_hex(hex)?,
        None => palette_color(slice),
    };
    Ok(plotters_color(resolved))
}

// One polygon per sector: outer arc forward, then the inner arc back (or
// the center point when there is no cutout). Arcs flatten at two-degree
// steps.
fn sector_points(
    center: (i32, i32),
    outer: f64,
    inner: f64,
    start: f64,
    end: f64,
) -> Vec<(i32, i32)> {
    let two_degrees = std::f64::consts::TAU / 180.0;
    let steps = (((end - start) / two_degrees).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps * 2 + 3);
    for step in 0..=steps {
        let angle = start + (end - start) * step as f64 / steps as f64;
        points.push(polar_point(center, outer, angle));
    }
    if inner > 0.0 {
        for step in (0..=steps).rev() {
            let angle = start + (end - start) * step as f64 / steps as f64;
            points.push(polar_point(center, inner, angle));
        }
    } else {
        points.push(center);
    }
    points
}

// Angles measure clockwise from 12 o'clock, the reading order of dashboard
// pie charts.
fn polar_point(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.sin()).round() as i32,
        center.1 - (radius * angle.cos()).round() as i32,
    )
}

fn plotters_color(color: RgbColor) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn render_error(stage: &str, err: &dyn Display) -> DashboardError {
    DashboardError::Render(format!("{stage}: {err}"))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{
        ChartData, Dataset, axis_label, bar_value_range, padded_value_range, polar_point,
        sector_points,
    };

    #[test]
    fn padded_range_widens_flat_series() {
        let data = ChartData::new(
            vec!["a".into(), "b".into()],
            vec![Dataset::new("s", vec![5.0, 5.0])],
        );
        let (min, max) = padded_value_range(&data);
        assert_relative_eq!(min, 4.5);
        assert_relative_eq!(max, 5.5);
    }

    #[test]
    fn bar_range_always_includes_the_zero_baseline() {
        let data = ChartData::new(
            vec!["a".into(), "b".into()],
            vec![Dataset::new("s", vec![4.0, 10.0])],
        );
        let (min, max) = bar_value_range(&data);
        assert_relative_eq!(min, 0.0);
        assert_relative_eq!(max, 10.5);
    }

    #[test]
    fn axis_labels_group_and_trim() {
        assert_eq!(axis_label(1_234_567.0), "1.234.567");
        assert_eq!(axis_label(12.5), "12,5");
        assert_eq!(axis_label(-4000.0), "-4.000");
        assert_eq!(axis_label(f64::NAN), "nan");
    }

    #[test]
    fn polar_points_start_at_twelve_oclock() {
        assert_eq!(polar_point((100, 100), 50.0, 0.0), (100, 50));
        let quarter = std::f64::consts::TAU / 4.0;
        assert_eq!(polar_point((100, 100), 50.0, quarter), (150, 100));
    }

    #[test]
    fn pie_sectors_close_through_the_center() {
        let quarter = std::f64::consts::TAU / 4.0;
        let points = sector_points((100, 100), 50.0, 0.0, 0.0, quarter);
        assert_eq!(points.last(), Some(&(100, 100)));
        assert_eq!(points.first(), Some(&(100, 50)));
    }

    #[test]
    fn doughnut_sectors_keep_an_inner_rim() {
        let quarter = std::f64::consts::TAU / 4.0;
        let points = sector_points((100, 100), 50.0, 25.0, 0.0, quarter);
        assert!(!points.contains(&(100, 100)));
        // inner arc ends back at the sector start angle
        assert_eq!(points.last(), Some(&(100, 75)));
    }
}
