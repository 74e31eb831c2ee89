//! Vector drawing surface.
//!
//! A [`Surface`] accumulates shapes and text as SVG markup in pixel space (origin top-left,
//! y down). It is rasterized by [`Rasterizer`](crate::Rasterizer) and then dropped, so every
//! figure starts from an empty surface.

use std::fmt::Write as _;

use kurbo::Shape;

use crate::foundation::core::{BezPath, Canvas, Color, Point, pt};

/// Flattening tolerance (pixels) for curves emitted as SVG path data.
const PATH_TOLERANCE: f64 = 0.05;

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Width in pixels.
    pub width: f64,
    /// `[on, off]` dash lengths in pixels.
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    pub fn solid(color: Color, width_pt: f64) -> Self {
        Self {
            color,
            width: pt(width_pt),
            dash: None,
        }
    }

    /// The `--` pattern: 3.7 on, 1.6 off, scaled by the line width.
    pub fn dashed(mut self) -> Self {
        self.dash = Some([3.7 * self.width, 1.6 * self.width]);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    pub fn stroke(stroke: Stroke) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke),
        }
    }

    pub fn fill_and_stroke(fill: Color, stroke: Stroke) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HAlign {
    Start,
    #[default]
    Center,
    End,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VAlign {
    /// First line's cap height hangs from the anchor.
    Top,
    #[default]
    Center,
    /// Last line's baseline sits on the anchor.
    Baseline,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f64,
    pub bold: bool,
    pub color: Color,
    pub halign: HAlign,
    pub valign: VAlign,
    /// Counter-clockwise rotation in degrees around the anchor.
    pub rotation: f64,
}

impl TextStyle {
    pub fn new(size_pt: f64) -> Self {
        Self {
            size: pt(size_pt),
            bold: false,
            color: Color::BLACK,
            halign: HAlign::Center,
            valign: VAlign::Center,
            rotation: 0.0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, halign: HAlign, valign: VAlign) -> Self {
        self.halign = halign;
        self.valign = valign;
        self
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn line_height(&self) -> f64 {
        self.size * 1.2
    }
}

/// Per-figure drawing buffer.
pub struct Surface {
    canvas: Canvas,
    background: Color,
    font_family: String,
    body: String,
    elements: usize,
}

impl Surface {
    pub(crate) fn new(canvas: Canvas, background: Color, font_family: &str) -> Self {
        tracing::debug!(width = canvas.width, height = canvas.height, "acquired surface");
        Self {
            canvas,
            background,
            font_family: font_family.to_string(),
            body: String::new(),
            elements: 0,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Number of shapes and text runs drawn so far.
    pub fn element_count(&self) -> usize {
        self.elements
    }

    pub fn path(&mut self, path: &BezPath, paint: &Paint) {
        let _ = write!(self.body, r#"<path d="{}""#, path.to_svg());
        write_paint(&mut self.body, paint);
        self.body.push_str("/>\n");
        self.elements += 1;
    }

    pub fn shape(&mut self, shape: &impl Shape, paint: &Paint) {
        self.path(&shape.to_path(PATH_TOLERANCE), paint);
    }

    /// Draw `text` at `at`. Embedded `\n` starts a new line.
    pub fn text(&mut self, at: Point, text: &str, style: &TextStyle) {
        let lines: Vec<&str> = text.split('\n').collect();
        let lh = style.line_height();
        let span = (lines.len() - 1) as f64 * lh;
        let first_baseline = match style.valign {
            VAlign::Top => at.y + 0.8 * style.size,
            VAlign::Center => at.y - span / 2.0 + 0.35 * style.size,
            VAlign::Baseline => at.y - span,
        };
        let anchor = match style.halign {
            HAlign::Start => "start",
            HAlign::Center => "middle",
            HAlign::End => "end",
        };

        let _ = write!(
            self.body,
            r#"<text font-family="{}" font-size="{}" fill="{}" text-anchor="{}""#,
            escape_xml(&self.font_family),
            Num(style.size),
            style.color,
            anchor
        );
        if style.bold {
            self.body.push_str(r#" font-weight="bold""#);
        }
        if style.rotation != 0.0 {
            let _ = write!(
                self.body,
                r#" transform="rotate({} {} {})""#,
                Num(-style.rotation),
                Num(at.x),
                Num(at.y)
            );
        }
        self.body.push('>');
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let _ = write!(
                self.body,
                r#"<tspan x="{}" y="{}">{}</tspan>"#,
                Num(at.x),
                Num(first_baseline + i as f64 * lh),
                escape_xml(line)
            );
        }
        self.body.push_str("</text>\n");
        self.elements += 1;
    }

    /// Complete SVG document for the current contents.
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.canvas.width, self.canvas.height);
        let mut out = String::with_capacity(self.body.len() + 256);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        out.push('\n');
        let _ = writeln!(
            out,
            r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
            self.background
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        tracing::debug!(elements = self.elements, "released surface");
    }
}

fn write_paint(out: &mut String, paint: &Paint) {
    match paint.fill {
        Some(c) => {
            let _ = write!(out, r#" fill="{c}""#);
        }
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(s) = &paint.stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}" stroke-linejoin="round" stroke-linecap="butt""#,
            s.color,
            Num(s.width)
        );
        if let Some([on, off]) = s.dash {
            let _ = write!(out, r#" stroke-dasharray="{} {}""#, Num(on), Num(off));
        }
    }
}

/// Fixed-precision number formatting for markup: at most three decimals, trailing zeros trimmed.
#[derive(Clone, Copy, Debug)]
struct Num(f64);

impl std::fmt::Display for Num {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = self.0;
        if !v.is_finite() {
            return f.write_str("0");
        }
        let s = format!("{v:.3}");
        let s = s.trim_end_matches('0').trim_end_matches('.');
        if s == "-0" || s.is_empty() {
            f.write_str("0")
        } else {
            f.write_str(s)
        }
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
