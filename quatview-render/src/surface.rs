//! The drawing capability every rendering backend provides.

use crate::primitives::{Color, Rect, Stroke};
use glam::DVec2;
use thiserror::Error;

/// Errors raised by surface backends.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Invalid surface size: {0}x{1}")]
    InvalidSize(u32, u32),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Minimal immediate-mode drawing surface.
///
/// Coordinates are pixels with the origin at the top-left corner. Backends
/// must accept non-finite coordinates without panicking.
pub trait Surface {
    /// Surface dimensions (width, height) in pixels.
    fn size(&self) -> (u32, u32);

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Fill a closed polygon and optionally outline it.
    fn fill_polygon(&mut self, points: &[DVec2], fill: Color, outline: Option<Stroke>);

    /// Draw a straight line segment.
    fn line(&mut self, from: DVec2, to: DVec2, stroke: Stroke);

    /// Fill and/or outline an axis-aligned rectangle.
    fn rect(&mut self, rect: Rect, fill: Option<Color>, outline: Option<Stroke>);
}

/// True when every coordinate is finite.
pub(crate) fn all_finite(points: &[DVec2]) -> bool {
    points.iter().all(|p| p.is_finite())
}
