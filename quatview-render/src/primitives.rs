//! Basic drawing primitives shared by all surfaces.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) color. Channels are nominally `0.0..=1.0`
/// and are clamped only when quantized by [`Color::to_rgba8`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a packed `0xRRGGBB` palette entry, as used for the
    /// face, axis and trail colors.
    pub fn from_hex(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self::from_rgba8([r, g, b, 0xff])
    }

    /// Scale the opacity, e.g. for the translucent grid and trail strokes.
    pub fn with_alpha(mut self, opacity: f32) -> Self {
        self.a *= opacity;
        self
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantize to the 8-bit pixel format of [`crate::PixmapSurface`].
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn from_rgba8(px: [u8; 4]) -> Self {
        Self::rgba(
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
            px[3] as f32 / 255.0,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Line color and width in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// An axis-aligned rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left position.
    pub pos: DVec2,
    /// Size (width, height).
    pub size: DVec2,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    /// Square of side `side` centered on `center`.
    pub fn centered(center: DVec2, side: f64) -> Self {
        Self {
            pos: center - DVec2::splat(side / 2.0),
            size: DVec2::splat(side),
        }
    }

    pub fn left(&self) -> f64 {
        self.pos.x
    }

    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f64 {
        self.pos.y
    }

    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> DVec2 {
        self.pos + self.size * 0.5
    }

    /// Corners in clockwise screen order starting top-left.
    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::new(self.left(), self.top()),
            DVec2::new(self.right(), self.top()),
            DVec2::new(self.right(), self.bottom()),
            DVec2::new(self.left(), self.bottom()),
        ]
    }
}
