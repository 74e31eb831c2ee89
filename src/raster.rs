use std::path::Path;

use anyhow::Context as _;
use plotters::{
    backend::SVGBackend,
    coord::Shift,
    drawing::{DrawingArea, IntoDrawingArea},
    style::RGBColor,
};

use crate::{
    foundation::core::{Canvas, Color},
    foundation::error::{BenchfigError, BenchfigResult},
    svg::Surface,
};

#[derive(Clone, Debug)]
pub struct RenderSettings {
    pub clear_rgba: [u8; 4],
    pub font_family: String,
    /// Populate the font database from the host. Without fonts, text is skipped by the rasterizer.
    pub load_system_fonts: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_rgba: [255, 255, 255, 255],
            font_family: "DejaVu Sans".to_string(),
            load_system_fonts: true,
        }
    }
}

/// Root drawing area handed to chart builders. Charts are emitted as SVG markup and go through
/// the same rasterizer as [`Surface`] figures.
pub type ChartArea<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Straight-alpha RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Turns surfaces into PNG files. Holds the font database so it is loaded once per run.
pub struct Rasterizer {
    settings: RenderSettings,
    opts: usvg::Options<'static>,
}

impl Rasterizer {
    pub fn new(settings: RenderSettings) -> Self {
        let mut opts = usvg::Options::default();
        if settings.load_system_fonts {
            opts.fontdb_mut().load_system_fonts();
        }
        // Chart text asks for the generic family.
        opts.fontdb_mut().set_sans_serif_family(settings.font_family.clone());
        opts.font_family = settings.font_family.clone();
        tracing::debug!(
            faces = opts.fontdb_mut().len(),
            family = %settings.font_family,
            "font database ready"
        );
        Self { settings, opts }
    }

    /// Acquire a fresh surface, let `build` draw into it, then rasterize and write `out` as PNG.
    ///
    /// The surface is released when this returns, including when `build` fails.
    pub fn render_png<F>(&self, canvas: Canvas, out: &Path, build: F) -> BenchfigResult<()>
    where
        F: FnOnce(&mut Surface) -> BenchfigResult<()>,
    {
        let [r, g, b, _] = self.settings.clear_rgba;
        let mut surface = Surface::new(canvas, Color::rgb(r, g, b), &self.settings.font_family);
        build(&mut surface)?;
        let frame = self.rasterize(&surface)?;
        drop(surface);
        write_png(&frame, out)
    }

    /// Chart counterpart of [`Rasterizer::render_png`]: `build` draws on a fresh plotters area.
    ///
    /// The area is presented and dropped before rasterizing; nothing is written when `build` fails.
    pub fn render_chart<F>(&self, canvas: Canvas, out: &Path, build: F) -> BenchfigResult<()>
    where
        F: FnOnce(&ChartArea<'_>) -> BenchfigResult<()>,
    {
        let mut markup = String::new();
        {
            let root = SVGBackend::with_string(&mut markup, (canvas.width, canvas.height))
                .into_drawing_area();
            let [r, g, b, _] = self.settings.clear_rgba;
            root.fill(&RGBColor(r, g, b))?;
            build(&root)?;
            root.present()?;
        }
        tracing::debug!(
            width = canvas.width,
            height = canvas.height,
            bytes = markup.len(),
            "chart area released"
        );
        let frame = self.rasterize_markup(canvas, &markup)?;
        write_png(&frame, out)
    }

    pub fn rasterize(&self, surface: &Surface) -> BenchfigResult<FrameRGBA> {
        self.rasterize_markup(surface.canvas(), &surface.to_svg())
    }

    /// Rasterize an SVG document onto a `canvas`-sized pixmap.
    fn rasterize_markup(&self, canvas: Canvas, svg: &str) -> BenchfigResult<FrameRGBA> {
        let tree = usvg::Tree::from_str(svg, &self.opts)
            .map_err(|e| BenchfigError::render(format!("parse figure svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| {
                BenchfigError::render(format!(
                    "failed to allocate {}x{} pixmap",
                    canvas.width, canvas.height
                ))
            })?;
        let [r, g, b, a] = self.settings.clear_rgba;
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));

        let sx = (canvas.width as f32) / tree.size().width();
        let sy = (canvas.height as f32) / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        let mut data = pixmap.take();
        unpremultiply_rgba8_in_place(&mut data);
        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }
}

pub fn write_png(frame: &FrameRGBA, out: &Path) -> BenchfigResult<()> {
    image::save_buffer_with_format(
        out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))
    .map_err(|e| BenchfigError::render(format!("{e:#}")))
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use kurbo::Rect;

    use super::*;
    use crate::svg::Paint;

    fn rasterizer() -> Rasterizer {
        Rasterizer::new(RenderSettings {
            load_system_fonts: false,
            ..RenderSettings::default()
        })
    }

    #[test]
    fn unpremultiply_restores_straight_alpha() {
        let mut px = vec![64u8, 32, 0, 128, 10, 20, 30, 255, 0, 0, 0, 0];
        unpremultiply_rgba8_in_place(&mut px);
        assert_eq!(&px[0..4], &[128, 64, 0, 128]);
        assert_eq!(&px[4..8], &[10, 20, 30, 255]);
        assert_eq!(&px[8..12], &[0, 0, 0, 0]);
    }

    #[test]
    fn rasterize_fills_background_and_shapes() {
        let r = rasterizer();
        let canvas = Canvas {
            width: 8,
            height: 8,
        };
        let mut s = Surface::new(canvas, Color::WHITE, "DejaVu Sans");
        s.shape(&Rect::new(0.0, 0.0, 4.0, 8.0), &Paint::fill(Color::RED));
        let frame = r.rasterize(&s).unwrap();
        assert_eq!((frame.width, frame.height), (8, 8));
        assert_eq!(frame.data.len(), 8 * 8 * 4);

        let px = |x: usize, y: usize| {
            let i = (y * 8 + x) * 4;
            [frame.data[i], frame.data[i + 1], frame.data[i + 2], frame.data[i + 3]]
        };
        assert_eq!(px(1, 4), [255, 0, 0, 255]);
        assert_eq!(px(6, 4), [255, 255, 255, 255]);
    }

    #[test]
    fn failed_build_writes_nothing() {
        let dir = PathBuf::from("target").join("raster_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let out = dir.join("never.png");
        let _ = std::fs::remove_file(&out);

        let r = rasterizer();
        let err = r
            .render_png(
                Canvas {
                    width: 4,
                    height: 4,
                },
                &out,
                |_| Err(BenchfigError::render("boom")),
            )
            .unwrap_err();
        assert!(err.to_string().contains("boom"));
        assert!(!out.exists());
    }

    #[test]
    fn chart_areas_rasterize_like_surfaces() {
        use plotters::{element::Rectangle, style::Color as _};

        let dir = PathBuf::from("target").join("raster_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let out = dir.join("chart.png");
        let _ = std::fs::remove_file(&out);

        rasterizer()
            .render_chart(
                Canvas {
                    width: 8,
                    height: 8,
                },
                &out,
                |root| {
                    root.draw(&Rectangle::new(
                        [(0, 0), (4, 8)],
                        RGBColor::from(Color::RED).filled(),
                    ))?;
                    Ok(())
                },
            )
            .unwrap();

        let img = image::open(&out).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (8, 8));
        assert_eq!(img.get_pixel(1, 4).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(6, 4).0, [255, 255, 255, 255]);
    }

    #[test]
    fn failed_chart_build_writes_nothing() {
        let dir = PathBuf::from("target").join("raster_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let out = dir.join("never_chart.png");
        let _ = std::fs::remove_file(&out);

        let err = rasterizer()
            .render_chart(
                Canvas {
                    width: 4,
                    height: 4,
                },
                &out,
                |_| Err(BenchfigError::render("chart boom")),
            )
            .unwrap_err();
        assert!(err.to_string().contains("chart boom"));
        assert!(!out.exists());
    }

    #[test]
    fn unwritable_output_is_a_render_error() {
        let dir = PathBuf::from("target")
            .join("raster_tests")
            .join("missing_dir_for_output");
        let _ = std::fs::remove_dir_all(&dir);
        let err = rasterizer()
            .render_png(
                Canvas {
                    width: 4,
                    height: 4,
                },
                &dir.join("x.png"),
                |_| Ok(()),
            )
            .unwrap_err();
        assert!(matches!(err, BenchfigError::Render(_)));
    }
}
