//! Software raster surface backed by an RGBA image.

use crate::primitives::{Color, Rect, Stroke};
use crate::surface::{Surface, SurfaceError, all_finite};
use glam::DVec2;
use image::{Rgba, RgbaImage};
use std::path::Path;
use tracing::{debug, trace};

/// CPU rasterizer with source-over alpha blending.
///
/// Polygons use the even-odd rule sampled at pixel centers. Primitives with
/// a non-finite coordinate are skipped.
pub struct PixmapSurface {
    image: RgbaImage,
    background: Color,
}

impl PixmapSurface {
    /// Create a surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidSize(width, height));
        }
        let image = RgbaImage::from_pixel(width, height, Rgba(background.to_rgba8()));
        Ok(Self { image, background })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Encode the current contents as PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), SurfaceError> {
        let path = path.as_ref();
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        debug!("Wrote {}x{} frame to {}", self.image.width(), self.image.height(), path.display());
        Ok(())
    }

    fn blend(&mut self, x: u32, y: u32, src: Color) {
        if src.a <= 0.0 {
            return;
        }
        let px = self.image.get_pixel_mut(x, y);
        let dst = Color::from_rgba8(px.0);

        let out_a = src.a + dst.a * (1.0 - src.a);
        let mix = |s: f32, d: f32| (s * src.a + d * dst.a * (1.0 - src.a)) / out_a;
        let out = Color::rgba(mix(src.r, dst.r), mix(src.g, dst.g), mix(src.b, dst.b), out_a);
        px.0 = out.to_rgba8();
    }

    /// Pixel index range covering `[lo, hi]` clamped to `0..limit`.
    fn span(lo: f64, hi: f64, limit: u32) -> Option<(u32, u32)> {
        let start = lo.floor().max(0.0);
        let end = hi.ceil().min(limit as f64);
        if start >= end {
            return None;
        }
        Some((start as u32, end as u32))
    }
}

impl Surface for PixmapSurface {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self) {
        let bg = Rgba(self.background.to_rgba8());
        for px in self.image.pixels_mut() {
            *px = bg;
        }
    }

    fn fill_polygon(&mut self, points: &[DVec2], fill: Color, outline: Option<Stroke>) {
        if points.len() < 3 {
            return;
        }
        if !all_finite(points) {
            trace!("Skipping polygon with non-finite vertices");
            return;
        }

        let (width, height) = self.size();
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        if let Some((y0, y1)) = Self::span(min_y, max_y, height) {
            let mut crossings = Vec::with_capacity(points.len());
            for y in y0..y1 {
                let sample_y = y as f64 + 0.5;
                crossings.clear();

                for (i, a) in points.iter().enumerate() {
                    let b = points[(i + 1) % points.len()];
                    // Half-open so shared vertices count once.
                    if (a.y <= sample_y) != (b.y <= sample_y) {
                        let t = (sample_y - a.y) / (b.y - a.y);
                        crossings.push(a.x + t * (b.x - a.x));
                    }
                }
                crossings.sort_by(f64::total_cmp);

                for pair in crossings.chunks_exact(2) {
                    // Pixel centers inside [pair[0], pair[1]).
                    let start = (pair[0] - 0.5).ceil().max(0.0);
                    let end = (pair[1] - 0.5).ceil().min(width as f64);
                    if start >= end {
                        continue;
                    }
                    for x in start as u32..end as u32 {
                        self.blend(x, y, fill);
                    }
                }
            }
        }

        if let Some(stroke) = outline {
            for (i, a) in points.iter().enumerate() {
                self.line(*a, points[(i + 1) % points.len()], stroke);
            }
        }
    }

    fn line(&mut self, from: DVec2, to: DVec2, stroke: Stroke) {
        if !all_finite(&[from, to]) || !stroke.width.is_finite() {
            trace!("Skipping line with non-finite coordinates");
            return;
        }

        let (width, height) = self.size();
        let radius = (stroke.width / 2.0).max(0.5);
        let Some((x0, x1)) = Self::span(from.x.min(to.x) - radius, from.x.max(to.x) + radius, width)
        else {
            return;
        };
        let Some((y0, y1)) = Self::span(from.y.min(to.y) - radius, from.y.max(to.y) + radius, height)
        else {
            return;
        };

        let dir = to - from;
        let len2 = dir.length_squared();
        for y in y0..y1 {
            for x in x0..x1 {
                let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let t = if len2 > 0.0 {
                    ((p - from).dot(dir) / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                if p.distance(from + dir * t) <= radius {
                    self.blend(x, y, stroke.color);
                }
            }
        }
    }

    fn rect(&mut self, rect: Rect, fill: Option<Color>, outline: Option<Stroke>) {
        let corners = rect.corners();
        if let Some(fill) = fill {
            self.fill_polygon(&corners, fill, None);
        }
        if let Some(stroke) = outline {
            for i in 0..4 {
                self.line(corners[i], corners[(i + 1) % 4], stroke);
            }
        }
    }
}
