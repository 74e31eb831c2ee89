//! Hidden data axes for the diagram: data units (y up) mapped onto the usual single-subplot
//! frame of the figure.

use crate::{
    foundation::core::{Canvas, Point, Rect, Vec2, pt},
    svg::{HAlign, Surface, TextStyle, VAlign},
};

/// Subplot box as fractions of the figure (left, bottom, right, top; y measured upward).
pub const SUBPLOT: [f64; 4] = [0.125, 0.11, 0.9, 0.88];

const TITLE_PAD_PT: f64 = 6.0;
const TITLE_PT: f64 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axes {
    /// Plot area in pixels.
    pub frame: Rect,
    pub xlim: (f64, f64),
    pub ylim: (f64, f64),
}

impl Axes {
    pub fn new(canvas: Canvas, xlim: (f64, f64), ylim: (f64, f64)) -> Self {
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        let [l, b, r, t] = SUBPLOT;
        Self {
            frame: Rect::new(l * w, (1.0 - t) * h, r * w, (1.0 - b) * h),
            xlim,
            ylim,
        }
    }

    /// Pixels per data unit along each axis.
    pub fn scale(&self) -> Vec2 {
        Vec2::new(
            self.frame.width() / (self.xlim.1 - self.xlim.0),
            self.frame.height() / (self.ylim.1 - self.ylim.0),
        )
    }

    /// Map a data point (y up) to a pixel point (y down).
    pub fn to_px(&self, p: Point) -> Point {
        let s = self.scale();
        Point::new(
            self.frame.x0 + (p.x - self.xlim.0) * s.x,
            self.frame.y1 - (p.y - self.ylim.0) * s.y,
        )
    }

    /// Title centered above the frame.
    pub fn draw_title(&self, surface: &mut Surface, title: &str) {
        surface.text(
            Point::new(self.frame.center().x, self.frame.y0 - pt(TITLE_PAD_PT)),
            title,
            &TextStyle::new(TITLE_PT).align(HAlign::Center, VAlign::Baseline),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn close_pt(a: Point, b: Point) -> bool {
        close(a.x, b.x) && close(a.y, b.y)
    }

    #[test]
    fn to_px_flips_y_and_spans_frame() {
        let axes = Axes::new(
            Canvas {
                width: 1000,
                height: 600,
            },
            (0.0, 10.0),
            (0.0, 1.0),
        );
        assert!(close(axes.frame.x0, 125.0));
        assert!(close(axes.frame.y0, 72.0));
        assert!(close(axes.frame.x1, 900.0));
        assert!(close(axes.frame.y1, 534.0));
        assert!(close_pt(
            axes.to_px(Point::new(0.0, 0.0)),
            Point::new(125.0, 534.0)
        ));
        assert!(close_pt(
            axes.to_px(Point::new(10.0, 1.0)),
            Point::new(900.0, 72.0)
        ));
    }

    #[test]
    fn title_sits_above_the_frame() {
        let canvas = Canvas {
            width: 1200,
            height: 800,
        };
        let axes = Axes::new(canvas, (0.0, 12.0), (0.0, 8.0));
        let mut s = Surface::new(canvas, crate::foundation::core::Color::WHITE, "DejaVu Sans");
        axes.draw_title(&mut s, "Overview");
        assert_eq!(s.element_count(), 1);
        assert!(s.to_svg().contains("Overview"));
    }
}
