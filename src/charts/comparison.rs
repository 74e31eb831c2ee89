use std::path::Path;

use plotters::prelude::{
    ChartBuilder, DashedLineSeries, EmptyElement, LineSeries, PathElement, SeriesLabelPosition,
    WHITE,
};
use plotters::style::Color as _;

use crate::{
    charts::{
        LABEL_PT, LATENCY_LABEL, MARGIN, TITLE_PT, X_LABEL_AREA, Y_LABEL_AREA, font, grid_style,
        padded_limits, require_samples, rgb, stroke,
    },
    dataset::SampleSeries,
    foundation::core::{Canvas, Color},
    foundation::error::BenchfigResult,
    raster::{ChartArea, Rasterizer},
};

/// 10 x 6 in.
pub const COMPARISON_CANVAS: Canvas = Canvas {
    width: 1000,
    height: 600,
};

pub const TITLE: &str = "Latency Comparison: CVCP vs HTTP";
pub const CVCP_LABEL: &str = "CVCP (Raw TCP)";
pub const HTTP_LABEL: &str = "HTTP (Standard)";

const LINE_PT: f64 = 2.0;
const DASH_PX: u32 = 10;
const GAP_PX: u32 = 4;
const HANDLE_PX: i32 = 24;
/// Share of the plotting area (width, height) a legend is assumed to cover.
const LEGEND_EXTENT: (f64, f64) = (0.3, 0.2);

/// Corner of the plotting area a legend may occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendCorner {
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

impl LegendCorner {
    /// Candidates, in tie-breaking order.
    pub const ALL: [Self; 4] = [
        Self::UpperRight,
        Self::UpperLeft,
        Self::LowerLeft,
        Self::LowerRight,
    ];

    fn position(self) -> SeriesLabelPosition {
        match self {
            Self::UpperRight => SeriesLabelPosition::UpperRight,
            Self::UpperLeft => SeriesLabelPosition::UpperLeft,
            Self::LowerLeft => SeriesLabelPosition::LowerLeft,
            Self::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }

    /// `ux`, `uy` are axes fractions in `0..=1`, y up.
    fn covers(self, ux: f64, uy: f64) -> bool {
        let right = matches!(self, Self::UpperRight | Self::LowerRight);
        let upper = matches!(self, Self::UpperRight | Self::UpperLeft);
        let (w, h) = LEGEND_EXTENT;
        let in_x = if right { ux >= 1.0 - w } else { ux <= w };
        let in_y = if upper { uy >= 1.0 - h } else { uy <= h };
        in_x && in_y
    }
}

/// The corner whose legend would hide the fewest samples.
pub fn legend_corner(
    series: &[&[(f64, f64)]],
    xlim: (f64, f64),
    ylim: (f64, f64),
) -> LegendCorner {
    let unit = |(x, y): (f64, f64)| {
        (
            (x - xlim.0) / (xlim.1 - xlim.0),
            (y - ylim.0) / (ylim.1 - ylim.0),
        )
    };
    LegendCorner::ALL
        .into_iter()
        .min_by_key(|corner| {
            series
                .iter()
                .flat_map(|s| s.iter().copied())
                .filter(|&p| {
                    let (ux, uy) = unit(p);
                    corner.covers(ux, uy)
                })
                .count()
        })
        .unwrap_or(LegendCorner::UpperRight)
}

/// Autoscaled `(xlim, ylim)`: each series spans its own index range.
pub fn comparison_limits(cvcp: &SampleSeries, http: &SampleSeries) -> ((f64, f64), (f64, f64)) {
    let last_index = cvcp.len().max(http.len()).saturating_sub(1) as f64;
    let (lo, hi) = [cvcp, http]
        .iter()
        .filter_map(|s| s.extent())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });
    (padded_limits(0.0, last_index), padded_limits(lo, hi))
}

/// `(sample index, latency)` pairs.
fn series_points(series: &SampleSeries) -> Vec<(f64, f64)> {
    series
        .values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect()
}

/// Overlaid line plot of both series against sample index.
pub fn draw_comparison(
    root: &ChartArea<'_>,
    cvcp: &SampleSeries,
    http: &SampleSeries,
) -> BenchfigResult<()> {
    require_samples(cvcp)?;
    require_samples(http)?;

    let (xlim, ylim) = comparison_limits(cvcp, http);
    let mut chart = ChartBuilder::on(root)
        .caption(TITLE, font(TITLE_PT))
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(xlim.0..xlim.1, ylim.0..ylim.1)?;

    chart
        .configure_mesh()
        .light_line_style(WHITE)
        .bold_line_style(grid_style())
        .x_desc("Sample Index")
        .y_desc(LATENCY_LABEL)
        .label_style(font(LABEL_PT))
        .axis_desc_style(font(LABEL_PT))
        .draw()?;

    let cvcp_points = series_points(cvcp);
    let http_points = series_points(http);
    let cvcp_style = stroke(Color::GREEN, LINE_PT);
    let http_style = stroke(Color::ORANGE, LINE_PT);

    chart
        .draw_series(LineSeries::new(cvcp_points.iter().copied(), cvcp_style))?
        .label(CVCP_LABEL)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + HANDLE_PX, y)], cvcp_style));
    chart
        .draw_series(DashedLineSeries::new(
            http_points.clone(),
            DASH_PX,
            GAP_PX,
            http_style,
        ))?
        .label(HTTP_LABEL)
        .legend(move |(x, y)| {
            let dash = DASH_PX as i32;
            let gap = GAP_PX as i32;
            EmptyElement::at((x, y))
                + PathElement::new(vec![(0, 0), (dash, 0)], http_style)
                + PathElement::new(vec![(dash + gap, 0), (HANDLE_PX, 0)], http_style)
        });

    let corner = legend_corner(&[&cvcp_points, &http_points], xlim, ylim);
    chart
        .configure_series_labels()
        .position(corner.position())
        .background_style(WHITE.mix(0.8))
        .border_style(rgb(Color::LEGEND_EDGE))
        .label_font(font(LABEL_PT))
        .draw()?;
    Ok(())
}

#[tracing::instrument(skip(rasterizer, cvcp, http), fields(cvcp = cvcp.len(), http = http.len()))]
pub fn render_comparison(
    rasterizer: &Rasterizer,
    cvcp: &SampleSeries,
    http: &SampleSeries,
    out: &Path,
) -> BenchfigResult<()> {
    rasterizer.render_chart(COMPARISON_CANVAS, out, |root| {
        draw_comparison(root, cvcp, http)
    })?;
    tracing::info!(path = %out.display(), "wrote comparison chart");
    Ok(())
}
