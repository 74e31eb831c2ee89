//! Data-driven charts of the two latency series, drawn with plotters.

pub mod comparison;
pub mod distribution;

pub use comparison::{COMPARISON_CANVAS, draw_comparison, render_comparison};
pub use distribution::{DISTRIBUTION_CANVAS, draw_distribution, render_distribution};

use plotters::style::{Color as _, FontDesc, FontFamily, IntoFont, RGBAColor, RGBColor, ShapeStyle};

use crate::{
    dataset::SampleSeries,
    foundation::core::{Color, pt},
    foundation::error::{BenchfigError, BenchfigResult},
};
#[cfg(test)]
use crate::{foundation::core::Canvas, raster::ChartArea};

pub const LATENCY_LABEL: &str = "Latency (ms)";

/// Fraction of the data span added on each side by autoscaling.
pub const AUTO_MARGIN: f64 = 0.05;
/// Spans narrower than this fraction of the values' magnitude are widened before ticking, so
/// that tick steps stay well above float resolution.
pub const MIN_RELATIVE_SPAN: f64 = 1e-9;

const TITLE_PT: f64 = 12.0;
const LABEL_PT: f64 = 10.0;
const GRID_ALPHA: f64 = 0.3;

// Pixel layout around the plotting area.
const MARGIN: u32 = 20;
const X_LABEL_AREA: u32 = 50;
const Y_LABEL_AREA: u32 = 80;

/// Expand `(lo, hi)` by [`AUTO_MARGIN`] on both sides. Degenerate and near-degenerate ranges
/// are widened around their center instead.
pub fn padded_limits(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    let magnitude = lo.abs().max(hi.abs());
    if span <= MIN_RELATIVE_SPAN * magnitude {
        let center = lo + span / 2.0;
        let delta = if magnitude == 0.0 { 0.5 } else { 0.05 * magnitude };
        return (center - delta, center + delta);
    }
    (lo - AUTO_MARGIN * span, hi + AUTO_MARGIN * span)
}

fn font(size_pt: f64) -> FontDesc<'static> {
    (FontFamily::SansSerif, pt(size_pt)).into_font()
}

fn rgb(color: Color) -> RGBColor {
    RGBColor::from(color)
}

fn grid_style() -> RGBAColor {
    rgb(Color::GRID).mix(GRID_ALPHA)
}

/// Line width in whole pixels, as plotters strokes take them.
fn stroke(color: Color, width_pt: f64) -> ShapeStyle {
    rgb(color).stroke_width(pt(width_pt).round().max(1.0) as u32)
}

fn require_samples(series: &SampleSeries) -> BenchfigResult<()> {
    if series.is_empty() {
        return Err(BenchfigError::render(format!(
            "series '{}' has no samples to plot",
            series.name
        )));
    }
    Ok(())
}

/// Draw onto an in-memory SVG area and return the markup.
#[cfg(test)]
fn chart_markup(
    canvas: Canvas,
    draw: impl FnOnce(&ChartArea<'_>) -> BenchfigResult<()>,
) -> BenchfigResult<String> {
    use plotters::{backend::SVGBackend, drawing::IntoDrawingArea};

    let mut markup = String::new();
    {
        let root = SVGBackend::with_string(&mut markup, (canvas.width, canvas.height))
            .into_drawing_area();
        draw(&root)?;
        root.present()?;
    }
    Ok(markup)
}
