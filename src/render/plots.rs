//! Grouped bar charts drawn with the [`plotters`] crate.
//!
//! One chart shows every category of a source along the x axis, with one bar per
//! series inside each category. PNG output goes through the bitmap backend and
//! SVG output through the SVG backend; both share the same drawing code.

use crate::aggregate::chart_data::ChartData;
use crate::api::enums::image_format::ImageFormat;
use crate::layout::bar_layout::{category_label, BarLayout};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, PlotError>;

/// Text and canvas size of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Prepended to every series label in the legend.
    pub series_prefix: String,
    pub width: u32,
    pub height: u32,
}

/// Top of the y axis: 10% headroom over the tallest bar, or `1.0` when every
/// bar is zero so the axis is never degenerate.
pub fn y_upper_bound(max_mean: f64) -> f64 {
    if max_mean > 0.0 && max_mean.is_finite() {
        max_mean * 1.1
    } else {
        1.0
    }
}

/// Legend entry of one series.
pub fn legend_label(prefix: &str, series: &str) -> String {
    format!("{}{}", prefix, series)
}

/// Draws `data` as a grouped bar chart and writes it to `output_path`.
///
/// # Arguments
/// * `data` - Means per (series, category)
/// * `layout` - Bar positions; must match the shape of `data`
/// * `style` - Caption, axis descriptions and canvas size
/// * `output_path` - Image file to write
/// * `format` - Backend to draw with
///
/// # Returns
/// * `Ok(())` - If the chart was drawn and saved
/// * `Err(PlotError)` - If the data has no categories or drawing failed
pub fn draw_grouped_bar_chart(
    data: &ChartData,
    layout: &BarLayout,
    style: &ChartStyle,
    output_path: &Path,
    format: ImageFormat,
) -> Result<()> {
    if data.categories().is_empty() {
        return Err(PlotError::InvalidData(format!(
            "Source '{}' has no categories to draw",
            data.source()
        )));
    }

    if layout.categories() != data.categories().len() || layout.series() != data.series().len() {
        return Err(PlotError::InvalidData(format!(
            "Layout of {}x{} bars does not match data of {}x{} bars",
            layout.categories(),
            layout.series(),
            data.categories().len(),
            data.series().len()
        )));
    }

    let size = (style.width, style.height);
    match format {
        ImageFormat::Png => draw_on(
            BitMapBackend::new(output_path, size).into_drawing_area(),
            data,
            layout,
            style,
        ),
        ImageFormat::Svg => draw_on(
            SVGBackend::new(output_path, size).into_drawing_area(),
            data,
            layout,
            style,
        ),
    }
}

/// One filled bar per category for `series`, from zero up to its mean.
fn series_bars<'a>(
    data: &'a ChartData,
    layout: &'a BarLayout,
    series: usize,
    color: RGBAColor,
) -> impl Iterator<Item = Rectangle<(f64, f64)>> + 'a {
    (0..layout.categories()).map(move |category| {
        let (left, right) = layout.extent(category, series);
        Rectangle::new(
            [(left, 0.0), (right, data.mean(series, category))],
            color.filled(),
        )
    })
}

fn draw_on<DB: DrawingBackend>(
    drawing_area: DrawingArea<DB, Shift>,
    data: &ChartData,
    layout: &BarLayout,
    style: &ChartStyle,
) -> Result<()> {
    drawing_area
        .fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let (x_min, x_max) = layout.x_range();
    let y_max = y_upper_bound(data.max_mean());
    let ticks: Vec<f64> = (0..layout.categories())
        .map(|category| layout.base_position(category))
        .collect();

    let mut chart_context = ChartBuilder::on(&drawing_area)
        .caption(&style.title, ("sans-serif", 32))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d((x_min..x_max).with_key_points(ticks), 0.0..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let categories = data.categories();
    let x_formatter = |x: &f64| category_label(categories, *x);
    let y_formatter = |y: &f64| format!("{:.2}", y);

    chart_context
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(categories.len())
        .x_desc(style.x_label.as_str())
        .y_desc(style.y_label.as_str())
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .label_style(("sans-serif", 20))
        .axis_desc_style(("sans-serif", 26))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    for (series, label) in data.series().iter().enumerate() {
        let color = Palette99::pick(series).to_rgba();

        chart_context
            .draw_series(series_bars(data, layout, series, color))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(legend_label(&style.series_prefix, label))
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    chart_context
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .label_font(("sans-serif", 18))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    drawing_area
        .present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}
