use std::path::Path;

use plotters::coord::combinators::BindKeyPoints;
use plotters::prelude::{ChartBuilder, Circle, PathElement, Rectangle, WHITE};
use plotters::style::Color as _;

use crate::{
    charts::{
        LABEL_PT, LATENCY_LABEL, MARGIN, TITLE_PT, X_LABEL_AREA, Y_LABEL_AREA, font, grid_style,
        padded_limits, require_samples, rgb, stroke,
    },
    dataset::SampleSeries,
    foundation::core::{Canvas, Color, pt},
    foundation::error::{BenchfigError, BenchfigResult},
    raster::{ChartArea, Rasterizer},
    stats::BoxStats,
};

/// 8 x 6 in.
pub const DISTRIBUTION_CANVAS: Canvas = Canvas {
    width: 800,
    height: 600,
};

pub const TITLE: &str = "Latency Distribution";
pub const BOX_WIDTH: f64 = 0.5;
const CAP_WIDTH: f64 = BOX_WIDTH / 2.0;
const FLIER_SIZE_PT: f64 = 6.0;
const EDGE_PT: f64 = 1.0;

/// One box of the chart, at x position `index + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxGroup {
    pub label: &'static str,
    pub stats: BoxStats,
}

pub fn summarize(cvcp: &SampleSeries, http: &SampleSeries) -> BenchfigResult<[BoxGroup; 2]> {
    require_samples(cvcp)?;
    require_samples(http)?;
    let group = |label, s: &SampleSeries| {
        BoxStats::compute(&s.values)
            .map(|stats| BoxGroup { label, stats })
            .ok_or_else(|| BenchfigError::render(format!("series '{}' has no samples", s.name)))
    };
    Ok([group("CVCP", cvcp)?, group("HTTP", http)?])
}

fn limits(groups: &[BoxGroup]) -> ((f64, f64), (f64, f64)) {
    let (lo, hi) = groups
        .iter()
        .map(|g| g.stats.drawn_extent())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });
    ((0.5, groups.len() as f64 + 0.5), padded_limits(lo, hi))
}

fn position(index: usize) -> f64 {
    index as f64 + 1.0
}

/// Label of the group sitting at `x`, if any.
fn group_label(groups: &[BoxGroup], x: f64) -> String {
    groups
        .iter()
        .enumerate()
        .find(|(i, _)| (position(*i) - x).abs() < 1e-9)
        .map(|(_, g)| g.label.to_string())
        .unwrap_or_default()
}

/// Side-by-side box-and-whisker summaries.
pub fn draw_distribution(
    root: &ChartArea<'_>,
    cvcp: &SampleSeries,
    http: &SampleSeries,
) -> BenchfigResult<()> {
    let groups = summarize(cvcp, http)?;
    let (xlim, ylim) = limits(&groups);
    let ticks: Vec<f64> = (0..groups.len()).map(position).collect();

    let mut chart = ChartBuilder::on(root)
        .caption(TITLE, font(TITLE_PT))
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d((xlim.0..xlim.1).with_key_points(ticks), ylim.0..ylim.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(WHITE)
        .bold_line_style(grid_style())
        .y_desc(LATENCY_LABEL)
        .x_label_formatter(&|x: &f64| group_label(&groups, *x))
        .label_style(font(LABEL_PT))
        .axis_desc_style(font(LABEL_PT))
        .draw()?;

    let area = chart.plotting_area();
    let line = stroke(Color::BLACK, EDGE_PT);
    let half = BOX_WIDTH / 2.0;
    let flier_radius = (pt(FLIER_SIZE_PT) / 2.0).round() as i32;

    for (i, g) in groups.iter().enumerate() {
        let x = position(i);
        let s = &g.stats;

        for (from, to) in [(s.q1, s.whisker_lo), (s.q3, s.whisker_hi)] {
            area.draw(&PathElement::new(vec![(x, from), (x, to)], line))?;
            area.draw(&PathElement::new(
                vec![(x - CAP_WIDTH / 2.0, to), (x + CAP_WIDTH / 2.0, to)],
                line,
            ))?;
        }

        let body = [(x - half, s.q3), (x + half, s.q1)];
        area.draw(&Rectangle::new(body, rgb(Color::LIGHT_BLUE).filled()))?;
        area.draw(&Rectangle::new(body, stroke(Color::BLUE, EDGE_PT)))?;
        area.draw(&PathElement::new(
            vec![(x - half, s.median), (x + half, s.median)],
            stroke(Color::RED, EDGE_PT),
        ))?;

        for &v in &s.outliers {
            area.draw(&Circle::new((x, v), flier_radius, line))?;
        }
    }
    Ok(())
}

#[tracing::instrument(skip(rasterizer, cvcp, http), fields(cvcp = cvcp.len(), http = http.len()))]
pub fn render_distribution(
    rasterizer: &Rasterizer,
    cvcp: &SampleSeries,
    http: &SampleSeries,
    out: &Path,
) -> BenchfigResult<()> {
    rasterizer.render_chart(DISTRIBUTION_CANVAS, out, |root| {
        draw_distribution(root, cvcp, http)
    })?;
    tracing::info!(path = %out.display(), "wrote distribution chart");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::chart_markup;

    fn series(name: &'static str, values: Vec<f64>) -> SampleSeries {
        SampleSeries { name, values }
    }

    #[test]
    fn summary_uses_interpolated_quartiles() {
        let [cvcp, http] = summarize(
            &series("cvcp", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            &series("http", vec![10.0, 20.0]),
        )
        .unwrap();
        assert_eq!(cvcp.label, "CVCP");
        assert_eq!(cvcp.stats.median, 3.0);
        assert_eq!(http.label, "HTTP");
        assert_eq!(http.stats.median, 15.0);
    }

    #[test]
    fn limits_cover_outliers() {
        let groups = summarize(
            &series("cvcp", vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0]),
            &series("http", vec![2.0, 3.0]),
        )
        .unwrap();
        let ((x0, x1), (y0, y1)) = limits(&groups);
        assert_eq!((x0, x1), (0.5, 2.5));
        assert!(y0 < 1.0 && y1 > 100.0);
    }

    #[test]
    fn ticks_are_labeled_by_group() {
        let groups = summarize(&series("cvcp", vec![1.0]), &series("http", vec![2.0])).unwrap();
        assert_eq!(group_label(&groups, 1.0), "CVCP");
        assert_eq!(group_label(&groups, 2.0), "HTTP");
        assert_eq!(group_label(&groups, 1.5), "");
    }

    #[test]
    fn draws_labels_median_and_outliers() {
        let svg = chart_markup(DISTRIBUTION_CANVAS, |root| {
            draw_distribution(
                root,
                &series("cvcp", vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0]),
                &series("http", vec![5.0, 6.0, 7.0]),
            )
        })
        .unwrap();
        assert!(svg.contains(">CVCP<"));
        assert!(svg.contains(">HTTP<"));
        assert!(svg.contains(TITLE));
        assert!(svg.contains("<circle"));
        let svg = svg.to_ascii_lowercase();
        assert!(svg.contains("#add8e6"));
        assert!(svg.contains("#ff0000"));
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(summarize(&series("cvcp", vec![1.0]), &series("http", vec![])).is_err());
    }
}
