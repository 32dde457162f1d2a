//! SVG plot generation.
//!
//! A small hand-written renderer covering the two chart kinds the analysis needs:
//! - Line charts for the time series regimes (one polyline per run)
//! - Horizontal bar charts for cumulative totals
//!
//! The meta-model is always drawn in a fixed color so it stands out from the runs.

use crate::config::AxisOptions;
use crate::utils::config::{DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH, DEFAULT_TICKS_COUNT};
use crate::utils::error::PlotError;
use log::info;
use std::fmt::Write;

const META_COLOR: &str = "rgb(220, 20, 60)"; // Crimson

const PALETTE: &[&str] = &[
    "rgb(70, 130, 180)",  // Steel Blue
    "rgb(255, 140, 0)",   // Dark Orange
    "rgb(34, 139, 34)",   // Forest Green
    "rgb(138, 43, 226)",  // Blue Violet
    "rgb(0, 139, 139)",   // Dark Cyan
    "rgb(184, 134, 11)",  // Dark Goldenrod
    "rgb(105, 105, 105)", // Dim Gray
    "rgb(199, 21, 133)",  // Medium Violet Red
];

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 180.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;

/// Plot configuration
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub x_axis: AxisOptions,
    pub y_axis: AxisOptions,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: "Multi-Model Analysis".to_string(),
            width: DEFAULT_PLOT_WIDTH,
            height: DEFAULT_PLOT_HEIGHT,
            x_axis: AxisOptions::default(),
            y_axis: AxisOptions::default(),
        }
    }
}

impl PlotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_x_axis(mut self, axis: AxisOptions) -> Self {
        self.x_axis = axis;
        self
    }

    pub fn with_y_axis(mut self, axis: AxisOptions) -> Self {
        self.y_axis = axis;
        self
    }
}

/// One line of a line chart
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    /// Legend label
    pub label: String,

    /// `(x, y)` points in x order
    pub points: Vec<(f64, f64)>,

    pub is_meta: bool,
}

impl PlotSeries {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>, is_meta: bool) -> Self {
        Self {
            label: label.into(),
            points,
            is_meta,
        }
    }
}

/// One bar of a bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct BarEntry {
    pub label: String,
    pub value: f64,
    pub is_meta: bool,
}

/// What to draw
#[derive(Debug, Clone, PartialEq)]
pub enum PlotData {
    Lines(Vec<PlotSeries>),
    Bars(Vec<BarEntry>),
}

impl PlotData {
    pub fn is_empty(&self) -> bool {
        match self {
            PlotData::Lines(series) => series.iter().all(|s| s.points.is_empty()),
            PlotData::Bars(bars) => bars.is_empty(),
        }
    }
}

/// Pixel area the data is drawn into
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn new(config: &PlotConfig) -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (config.width as f64 - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (config.height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Generate an SVG plot
///
/// **Public** - main entry point for rendering
///
/// # Errors
/// `PlotError::EmptySeries` when there is nothing to draw
pub fn generate_plot(data: &PlotData, config: Option<&PlotConfig>) -> Result<String, PlotError> {
    if data.is_empty() {
        return Err(PlotError::EmptySeries);
    }

    let config = config.cloned().unwrap_or_default();
    let frame = Frame::new(&config);
    let mut svg = String::new();

    // Header
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height
    );
    svg.push_str(r#"<style>text { font: 12px sans-serif; } .title { font-size: 16px; font-weight: bold; }</style>"#);
    let _ = write!(
        svg,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
        config.width, config.height
    );
    let _ = write!(
        svg,
        r#"<text class="title" x="{}" y="24" text-anchor="middle">{}</text>"#,
        config.width / 2,
        escape(&config.title)
    );

    match data {
        PlotData::Lines(series) => {
            info!("Rendering line plot with {} series", series.len());
            render_lines(&mut svg, series, &config, &frame);
        }
        PlotData::Bars(bars) => {
            info!("Rendering bar plot with {} bars", bars.len());
            render_bars(&mut svg, bars, &config, &frame);
        }
    }

    svg.push_str("</svg>");

    info!("Plot generated successfully ({} bytes)", svg.len());
    Ok(svg)
}

fn render_lines(svg: &mut String, series: &[PlotSeries], config: &PlotConfig, frame: &Frame) {
    let points = series.iter().flat_map(|s| s.points.iter());
    let x_range = config
        .x_axis
        .range
        .unwrap_or_else(|| data_range(points.clone().map(|p| p.0)));
    let y_range = config
        .y_axis
        .range
        .unwrap_or_else(|| data_range(points.map(|p| p.1)));

    render_axes(svg, config, frame, x_range, y_range);

    let mut color_idx = 0;
    for (i, line) in series.iter().enumerate() {
        let color = pick_color(line.is_meta, &mut color_idx);

        let path: Vec<String> = line
            .points
            .iter()
            .map(|&(x, y)| {
                format!(
                    "{:.2},{:.2}",
                    scale(x, x_range, frame.left, frame.right()),
                    scale(y, y_range, frame.bottom(), frame.top)
                )
            })
            .collect();

        let stroke_width = if line.is_meta { 2.5 } else { 1.5 };
        let _ = write!(
            svg,
            r#"<polyline fill="none" stroke="{}" stroke-width="{}" points="{}"/>"#,
            color,
            stroke_width,
            path.join(" ")
        );

        render_legend_entry(svg, frame, i, &line.label, color);
    }
}

fn render_bars(svg: &mut String, bars: &[BarEntry], config: &PlotConfig, frame: &Frame) {
    let max_value = bars.iter().map(|b| b.value).fold(0.0, f64::max);
    let min_value = bars.iter().map(|b| b.value).fold(0.0, f64::min);
    let value_range = config.x_axis.range.unwrap_or((min_value, max_value.max(min_value + 1.0)));

    let slot = frame.height / bars.len() as f64;
    let bar_height = slot * 0.7;

    // Values run along x, one bar per model along y
    render_axes(svg, config, frame, value_range, (0.0, 0.0));

    let mut color_idx = 0;
    for (i, bar) in bars.iter().enumerate() {
        let color = pick_color(bar.is_meta, &mut color_idx);
        let y = frame.top + i as f64 * slot + (slot - bar_height) / 2.0;
        let x0 = scale(0.0_f64.max(value_range.0), value_range, frame.left, frame.right());
        let x1 = scale(bar.value, value_range, frame.left, frame.right());

        let _ = write!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"><title>{}: {:.2}</title></rect>"#,
            x0.min(x1),
            y,
            (x1 - x0).abs(),
            bar_height,
            color,
            escape(&bar.label),
            bar.value
        );
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
            frame.left - 6.0,
            y + bar_height / 2.0 + 4.0,
            escape(&bar.label)
        );
        let _ = write!(
            svg,
            r#"<text x="{:.2}" y="{:.2}">{:.2}</text>"#,
            x0.max(x1) + 4.0,
            y + bar_height / 2.0 + 4.0,
            bar.value
        );
    }
}

fn render_axes(
    svg: &mut String,
    config: &PlotConfig,
    frame: &Frame,
    x_range: (f64, f64),
    y_range: (f64, f64),
) {
    let _ = write!(
        svg,
        r#"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="black"/><line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="black"/>"#,
        l = frame.left,
        r = frame.right(),
        t = frame.top,
        b = frame.bottom()
    );

    let x_ticks = config.x_axis.ticks_count.unwrap_or(DEFAULT_TICKS_COUNT);
    for value in tick_values(x_range, x_ticks) {
        let x = scale(value, x_range, frame.left, frame.right());
        let _ = write!(
            svg,
            r#"<line x1="{x:.2}" y1="{b}" x2="{x:.2}" y2="{b5}" stroke="black"/><text x="{x:.2}" y="{b18}" text-anchor="middle">{v}</text>"#,
            x = x,
            b = frame.bottom(),
            b5 = frame.bottom() + 5.0,
            b18 = frame.bottom() + 18.0,
            v = format_tick(value)
        );
    }

    // A degenerate y range means the y axis carries categories (bar charts)
    if y_range.0 != y_range.1 {
        let y_ticks = config.y_axis.ticks_count.unwrap_or(DEFAULT_TICKS_COUNT);
        for value in tick_values(y_range, y_ticks) {
            let y = scale(value, y_range, frame.bottom(), frame.top);
            let _ = write!(
                svg,
                r#"<line x1="{l5}" y1="{y:.2}" x2="{l}" y2="{y:.2}" stroke="black"/><text x="{l8}" y="{y4:.2}" text-anchor="end">{v}</text>"#,
                l = frame.left,
                l5 = frame.left - 5.0,
                l8 = frame.left - 8.0,
                y = y,
                y4 = y + 4.0,
                v = format_tick(value)
            );
        }
    }

    let _ = write!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
        frame.left + frame.width / 2.0,
        frame.bottom() + 40.0,
        escape(&config.x_axis.label)
    );
    let _ = write!(
        svg,
        r#"<text x="20" y="{y:.2}" text-anchor="middle" transform="rotate(-90 20 {y:.2})">{}</text>"#,
        escape(&config.y_axis.label),
        y = frame.top + frame.height / 2.0
    );
}

fn render_legend_entry(svg: &mut String, frame: &Frame, index: usize, label: &str, color: &str) {
    let x = frame.right() + 15.0;
    let y = frame.top + index as f64 * 18.0;
    let _ = write!(
        svg,
        r#"<rect x="{:.2}" y="{:.2}" width="12" height="12" fill="{}"/><text x="{:.2}" y="{:.2}">{}</text>"#,
        x,
        y,
        color,
        x + 18.0,
        y + 10.0,
        escape(label)
    );
}

fn pick_color(is_meta: bool, next: &mut usize) -> &'static str {
    if is_meta {
        return META_COLOR;
    }
    let color = PALETTE[*next % PALETTE.len()];
    *next += 1;
    color
}

/// Min and max of the values, widened when they coincide
fn data_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 0.5, max + 0.5);
    }
    (min, max)
}

/// Map `value` from `range` onto the pixel interval `[from, to]`
fn scale(value: f64, range: (f64, f64), from: f64, to: f64) -> f64 {
    let span = range.1 - range.0;
    if span == 0.0 {
        return from;
    }
    from + (value - range.0) / span * (to - from)
}

fn tick_values(range: (f64, f64), count: usize) -> Vec<f64> {
    if count <= 1 {
        return vec![range.0];
    }
    let step = (range.1 - range.0) / (count - 1) as f64;
    (0..count).map(|i| range.0 + step * i as f64).collect()
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e9 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
