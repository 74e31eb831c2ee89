pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Output resolution. Figure sizes are expressed in inches at this density.
pub const DPI: f64 = 100.0;

/// Convert typographic points to output pixels.
pub fn pt(points: f64) -> f64 {
    points * DPI / 72.0
}

/// Figure size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::hex(0x000000);
    pub const WHITE: Self = Self::hex(0xffffff);
    pub const GREEN: Self = Self::hex(0x008000);
    pub const ORANGE: Self = Self::hex(0xffa500);
    pub const BLUE: Self = Self::hex(0x0000ff);
    pub const LIGHT_BLUE: Self = Self::hex(0xadd8e6);
    pub const RED: Self = Self::hex(0xff0000);
    pub const PURPLE: Self = Self::hex(0x800080);
    pub const GRAY: Self = Self::hex(0x808080);
    pub const GRID: Self = Self::hex(0xb0b0b0);
    pub const LEGEND_EDGE: Self = Self::hex(0xcccccc);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`.
    pub const fn hex(v: u32) -> Self {
        Self {
            r: ((v >> 16) & 0xff) as u8,
            g: ((v >> 8) & 0xff) as u8,
            b: (v & 0xff) as u8,
        }
    }
}

impl From<Color> for plotters::style::RGBColor {
    fn from(c: Color) -> Self {
        Self(c.r, c.g, c.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
