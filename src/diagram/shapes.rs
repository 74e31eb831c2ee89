//! Diagram primitives drawn in data units (y up) through an [`Axes`] mapping.

use kurbo::{Ellipse, Line, RoundedRect};

use crate::{
    diagram::axes::Axes,
    foundation::core::{BezPath, Color, Point, Rect, Vec2, pt},
    svg::{HAlign, Paint, Stroke, Surface, TextStyle, VAlign},
};

/// Padding (data units) between a box's nominal rectangle and its rounded outline.
pub const BOX_PAD: f64 = 0.1;
const BOX_EDGE_PT: f64 = 2.0;
const BOX_LABEL_PT: f64 = 10.0;
const LINK_LABEL_PT: f64 = 8.0;
const ARROW_SHRINK_PT: f64 = 2.0;
const ARROW_HEAD_LEN_PT: f64 = 5.0;
const ARROW_HEAD_HALF_WIDTH_PT: f64 = 2.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorKind {
    Center,
    Right,
    Left,
    Top,
    Bottom,
}

/// Connection points of a box, all in data units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchors {
    pub center: Point,
    pub right: Point,
    pub left: Point,
    pub top: Point,
    pub bottom: Point,
}

impl Anchors {
    /// Center, right, left, top, bottom.
    pub fn to_array(self) -> [Point; 5] {
        [self.center, self.right, self.left, self.top, self.bottom]
    }

    pub fn get(&self, kind: AnchorKind) -> Point {
        match kind {
            AnchorKind::Center => self.center,
            AnchorKind::Right => self.right,
            AnchorKind::Left => self.left,
            AnchorKind::Top => self.top,
            AnchorKind::Bottom => self.bottom,
        }
    }
}

/// Labeled rectangle with its bottom-left corner at `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSpec {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub label: &'static str,
    pub fill: Color,
}

impl BoxSpec {
    pub const fn new(x: f64, y: f64, w: f64, h: f64, label: &'static str, fill: Color) -> Self {
        Self {
            x,
            y,
            w,
            h,
            label,
            fill,
        }
    }

    pub fn anchors(&self) -> Anchors {
        let (cx, cy) = (self.x + self.w / 2.0, self.y + self.h / 2.0);
        Anchors {
            center: Point::new(cx, cy),
            right: Point::new(self.x + self.w, cy),
            left: Point::new(self.x, cy),
            top: Point::new(cx, self.y + self.h),
            bottom: Point::new(cx, self.y),
        }
    }
}

/// Draw `spec` as a rounded, outlined box with a centered bold label and return its anchors.
pub fn draw_box(surface: &mut Surface, axes: &Axes, spec: &BoxSpec) -> Anchors {
    let anchors = spec.anchors();
    let outline = Rect::from_points(
        axes.to_px(Point::new(spec.x - BOX_PAD, spec.y - BOX_PAD)),
        axes.to_px(Point::new(spec.x + spec.w + BOX_PAD, spec.y + spec.h + BOX_PAD)),
    );
    let radius = BOX_PAD * axes.scale().x;
    surface.shape(
        &RoundedRect::from_rect(outline, radius),
        &Paint::fill_and_stroke(spec.fill, Stroke::solid(Color::BLACK, BOX_EDGE_PT)),
    );
    surface.text(
        axes.to_px(anchors.center),
        spec.label,
        &TextStyle::new(BOX_LABEL_PT).bold(),
    );
    anchors
}

/// Elliptical region. Contributes no anchors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudSpec {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub edge: Color,
    pub label: &'static str,
}

pub fn draw_cloud(surface: &mut Surface, axes: &Axes, spec: &CloudSpec) {
    let s = axes.scale();
    let center = axes.to_px(spec.center);
    surface.shape(
        &Ellipse::new(
            center,
            (spec.width / 2.0 * s.x, spec.height / 2.0 * s.y),
            0.0,
        ),
        &Paint::fill_and_stroke(spec.fill, Stroke::solid(spec.edge, 1.0).dashed()),
    );
    surface.text(
        center,
        spec.label,
        &TextStyle::new(BOX_LABEL_PT).color(spec.edge),
    );
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Heads at both ends.
    Both,
    /// Head at the destination only.
    Forward,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkStyle {
    pub color: Color,
    pub width_pt: f64,
    pub dashed: bool,
}

impl LinkStyle {
    fn stroke(&self) -> Stroke {
        let s = Stroke::solid(self.color, self.width_pt);
        if self.dashed { s.dashed() } else { s }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkLabel {
    pub text: &'static str,
    /// Data-unit offset from the midpoint of the two endpoints.
    pub offset: Vec2,
    /// Counter-clockwise degrees.
    pub rotation: f64,
}

impl LinkLabel {
    pub fn position(&self, from: Point, to: Point) -> Point {
        from.midpoint(to) + self.offset
    }
}

/// Open chevron with its tip at `tip`, pointing along `dir` (unit vector, pixel space).
fn arrow_head(tip: Point, dir: Vec2) -> BezPath {
    let back = tip - dir * pt(ARROW_HEAD_LEN_PT);
    let side = Vec2::new(-dir.y, dir.x) * pt(ARROW_HEAD_HALF_WIDTH_PT);
    let mut path = BezPath::new();
    path.move_to(back + side);
    path.line_to(tip);
    path.line_to(back - side);
    path
}

/// Straight connector between two data points, shrunk slightly at both ends.
pub fn draw_connector(
    surface: &mut Surface,
    axes: &Axes,
    from: Point,
    to: Point,
    style: &LinkStyle,
    direction: Direction,
    label: Option<&LinkLabel>,
) {
    let (p0, p1) = (axes.to_px(from), axes.to_px(to));
    let d = p1 - p0;
    let len = d.hypot();
    let shrink = pt(ARROW_SHRINK_PT);
    if len > 2.0 * shrink {
        let dir = d / len;
        let (a, b) = (p0 + dir * shrink, p1 - dir * shrink);
        surface.shape(&Line::new(a, b), &Paint::stroke(style.stroke()));

        let head = Paint::stroke(Stroke::solid(style.color, style.width_pt));
        surface.path(&arrow_head(b, dir), &head);
        if direction == Direction::Both {
            surface.path(&arrow_head(a, -dir), &head);
        }
    }

    if let Some(label) = label {
        let valign = if label.rotation == 0.0 {
            VAlign::Baseline
        } else {
            VAlign::Center
        };
        surface.text(
            axes.to_px(label.position(from, to)),
            label.text,
            &TextStyle::new(LINK_LABEL_PT)
                .color(style.color)
                .align(HAlign::Center, valign)
                .rotated(label.rotation),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Canvas;

    fn axes() -> Axes {
        Axes::new(
            Canvas {
                width: 1200,
                height: 800,
            },
            (0.0, 12.0),
            (0.0, 8.0),
        )
    }

    fn surface() -> Surface {
        Surface::new(
            Canvas {
                width: 1200,
                height: 800,
            },
            Color::WHITE,
            "DejaVu Sans",
        )
    }

    #[test]
    fn anchors_of_unit_example() {
        let spec = BoxSpec::new(1.0, 4.0, 2.0, 3.0, "x", Color::WHITE);
        let a = spec.anchors();
        assert_eq!(a.center, Point::new(2.0, 5.5));
        assert_eq!(a.right, Point::new(3.0, 5.5));
        assert_eq!(a.left, Point::new(1.0, 5.5));
        assert_eq!(a.top, Point::new(2.0, 7.0));
        assert_eq!(a.bottom, Point::new(2.0, 4.0));
        assert_eq!(
            a.to_array(),
            [
                Point::new(2.0, 5.5),
                Point::new(3.0, 5.5),
                Point::new(1.0, 5.5),
                Point::new(2.0, 7.0),
                Point::new(2.0, 4.0),
            ]
        );
        assert_eq!(a.get(AnchorKind::Top), a.top);
    }

    #[test]
    fn draw_box_returns_anchors_and_adds_shapes() {
        let mut s = surface();
        let ax = axes();
        let spec = BoxSpec::new(1.0, 4.0, 2.0, 3.0, "Web Browser", Color::hex(0xe1f5fe));
        let first = draw_box(&mut s, &ax, &spec);
        let again = draw_box(&mut s, &ax, &spec);
        assert_eq!(first, again);
        assert_eq!(first, spec.anchors());
        assert_eq!(s.element_count(), 4);
        let svg = s.to_svg();
        assert!(svg.contains("Web Browser"));
        assert!(svg.contains("#e1f5fe"));
    }

    #[test]
    fn label_sits_at_offset_midpoint() {
        let label = LinkLabel {
            text: "t",
            offset: Vec2::new(0.0, 0.2),
            rotation: 0.0,
        };
        let p = label.position(Point::new(3.0, 5.5), Point::new(5.0, 5.5));
        assert!((p.x - 4.0).abs() < 1e-12 && (p.y - 5.7).abs() < 1e-12);
    }

    #[test]
    fn bidirectional_connector_has_two_heads() {
        let style = LinkStyle {
            color: Color::BLUE,
            width_pt: 2.0,
            dashed: false,
        };
        let ax = axes();

        let mut both = surface();
        draw_connector(
            &mut both,
            &ax,
            Point::new(3.0, 5.5),
            Point::new(5.0, 5.5),
            &style,
            Direction::Both,
            None,
        );
        assert_eq!(both.element_count(), 3);

        let mut fwd = surface();
        draw_connector(
            &mut fwd,
            &ax,
            Point::new(3.0, 5.5),
            Point::new(5.0, 5.5),
            &style,
            Direction::Forward,
            None,
        );
        assert_eq!(fwd.element_count(), 2);
    }

    #[test]
    fn dashed_connector_and_rotated_label() {
        let mut s = surface();
        draw_connector(
            &mut s,
            &axes(),
            Point::new(2.0, 4.0),
            Point::new(2.0, 1.0),
            &LinkStyle {
                color: Color::PURPLE,
                width_pt: 2.0,
                dashed: true,
            },
            Direction::Both,
            Some(&LinkLabel {
                text: "WebRTC Media",
                offset: Vec2::ZERO,
                rotation: 90.0,
            }),
        );
        let svg = s.to_svg();
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("rotate(-90"));
        assert!(svg.contains("WebRTC Media"));
    }

    #[test]
    fn arrow_head_points_back_from_tip() {
        let path = arrow_head(Point::new(10.0, 0.0), Vec2::new(1.0, 0.0));
        let bbox = kurbo::Shape::bounding_box(&path);
        assert!((bbox.x1 - 10.0).abs() < 1e-9);
        assert!(bbox.x0 < 10.0);
    }
}
