use crate::draw::model::{Color, Point};
use anyhow::{Context, Result};
use image::RgbaImage;
use std::path::Path;

/// Pixel sink every shape rasterizes into.
///
/// `coverage` is the fraction of the pixel the primitive covers, in `[0, 1]`;
/// implementations scale the color's own alpha by it. Stamped (non anti-aliased)
/// drawing always passes `1.0`.
pub trait Surface {
    fn plot(&mut self, x: i32, y: i32, color: Color, coverage: f32);

    /// Solid horizontal run `[x0, x1]` on row `y`.
    fn span(&mut self, y: i32, x0: i32, x1: i32, color: Color) {
        for x in x0..=x1 {
            self.plot(x, y, color, 1.0);
        }
    }
}

/// Owned RGBA8 buffer that blends plots source-over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RgbaCanvas {
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let mut pixels = vec![0u8; (width as usize) * (height as usize) * 4];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&fill.to_rgba_array());
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba_pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn clear(&mut self, fill: Color) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&fill.to_rgba_array());
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(((y as u32 * self.width + x as u32) * 4) as usize)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let idx = self.index(x, y)?;
        Some(Color::rgba(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ))
    }

    /// Number of pixels that differ from `background`.
    pub fn count_changed(&self, background: Color) -> usize {
        let bg = background.to_rgba_array();
        self.pixels.chunks_exact(4).filter(|px| *px != bg).count()
    }

    pub fn to_image(&self) -> RgbaImage {
        // Buffer length always matches width * height * 4.
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png {}", path.display()))?;
        tracing::info!(path = %path.display(), "canvas exported");
        Ok(())
    }
}

impl Surface for RgbaCanvas {
    fn plot(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let top = color.with_coverage(coverage);
        if top.a == 0 {
            return;
        }
        let bottom = Color::rgba(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        );
        let out = blend_pixel(bottom, top);
        self.pixels[idx..idx + 4].copy_from_slice(&out.to_rgba_array());
    }
}

fn blend_pixel(bottom: Color, top: Color) -> Color {
    if top.a == 255 {
        return top;
    }
    let sa = top.a as f32 / 255.0;
    let da = bottom.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= f32::EPSILON {
        return Color::TRANSPARENT;
    }

    let blend = |s: u8, d: u8| -> u8 {
        (((s as f32 * sa) + (d as f32 * da * (1.0 - sa))) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Color::rgba(
        blend(top.r, bottom.r),
        blend(top.g, bottom.g),
        blend(top.b, bottom.b),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plot {
    pub point: Point,
    pub color: Color,
    pub coverage: f32,
}

/// Surface that keeps every plot call in order, without blending.
#[derive(Debug, Clone, Default)]
pub struct PlotRecorder {
    pub plots: Vec<Plot>,
}

impl PlotRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> Vec<Point> {
        self.plots.iter().map(|plot| plot.point).collect()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.plots.iter().any(|plot| plot.point == point)
    }

    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }
}

impl Surface for PlotRecorder {
    fn plot(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        self.plots.push(Plot {
            point: Point::new(x, y),
            color,
            coverage,
        });
    }
}

/// Draws a filled square handle of side `size` centered on `center`.
pub fn draw_marker(surface: &mut dyn Surface, center: Point, size: i32) {
    let half = size / 2;
    for y in (center.y - half)..(center.y - half + size) {
        surface.span(y, center.x - half, center.x - half + size - 1, Color::BLACK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_plot_replaces_pixel() {
        let mut canvas = RgbaCanvas::new(2, 1, Color::WHITE);
        canvas.plot(1, 0, Color::rgb(10, 20, 30), 1.0);
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(1, 0), Some(Color::rgb(10, 20, 30)));
    }

    #[test]
    fn partial_coverage_blends_over_background() {
        let mut canvas = RgbaCanvas::new(1, 1, Color::rgb(100, 100, 100));
        canvas.plot(0, 0, Color::rgb(200, 0, 0), 128.0 / 255.0);
        assert_eq!(canvas.pixel(0, 0), Some(Color::rgb(150, 50, 50)));
    }

    #[test]
    fn out_of_bounds_plots_are_ignored() {
        let mut canvas = RgbaCanvas::new(2, 2, Color::WHITE);
        canvas.plot(-1, 0, Color::BLACK, 1.0);
        canvas.plot(0, 2, Color::BLACK, 1.0);
        canvas.plot(5, 5, Color::BLACK, 1.0);
        assert_eq!(canvas.count_changed(Color::WHITE), 0);
        assert_eq!(canvas.pixel(-1, 0), None);
    }

    #[test]
    fn marker_covers_square() {
        let mut canvas = RgbaCanvas::new(16, 16, Color::WHITE);
        draw_marker(&mut canvas, Point::new(8, 8), 4);
        assert_eq!(canvas.count_changed(Color::WHITE), 16);
        assert_eq!(canvas.pixel(6, 6), Some(Color::BLACK));
        assert_eq!(canvas.pixel(9, 9), Some(Color::BLACK));
        assert_eq!(canvas.pixel(10, 10), Some(Color::WHITE));
    }

    #[test]
    fn image_export_matches_buffer() {
        let mut canvas = RgbaCanvas::new(3, 2, Color::WHITE);
        canvas.plot(2, 1, Color::rgb(1, 2, 3), 1.0);
        let image = canvas.to_image();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [1, 2, 3, 255]);
    }
}
