//! Perspective and orthographic projection onto the screen plane.
//!
//! Projected coordinates are offsets from the surface center in pixels with
//! +y pointing up. [`Viewport`] turns them into surface pixels.

use glam::{DVec2, DVec3};

/// Default distance from the eye to the projection plane, in pixels.
pub const DEFAULT_VIEW_DISTANCE: f64 = 400.0;

/// World units to pixels.
pub const WORLD_SCALE: f64 = 100.0;

/// Perspective-project `point` with the given view distance.
///
/// The returned `z` is the input `z`, kept only as a depth key. When
/// `view_distance + z * 100` is zero the result is non-finite; nothing here
/// guards against it.
pub fn project_perspective_with(point: DVec3, view_distance: f64) -> DVec3 {
    let scale = view_distance / (view_distance + point.z * WORLD_SCALE);
    DVec3::new(
        point.x * scale * WORLD_SCALE,
        point.y * scale * WORLD_SCALE,
        point.z,
    )
}

/// Perspective-project `point` with [`DEFAULT_VIEW_DISTANCE`].
pub fn project_perspective(point: DVec3) -> DVec3 {
    project_perspective_with(point, DEFAULT_VIEW_DISTANCE)
}

/// Drop `z`.
pub fn project_orthographic(point: DVec3) -> DVec2 {
    point.truncate()
}

/// Maps center-relative offsets to pixel coordinates of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Surface center in pixels.
    pub center: DVec2,
    /// Multiplier applied to offsets before mapping.
    pub scale: f64,
}

impl Viewport {
    /// Viewport centered on a `width` × `height` surface.
    pub fn centered(width: u32, height: u32) -> Self {
        Self {
            center: DVec2::new(width as f64 / 2.0, height as f64 / 2.0),
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Pixel position of a center-relative offset. Screen y grows downward.
    pub fn to_screen(&self, offset: DVec2) -> DVec2 {
        DVec2::new(
            self.center.x + offset.x * self.scale,
            self.center.y - offset.y * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_origin() {
        let p = project_perspective(DVec3::ZERO);
        assert_eq!(p, DVec3::ZERO);
    }

    #[test]
    fn test_plane_z_zero_is_unscaled() {
        let p = project_perspective(DVec3::new(0.5, -0.25, 0.0));
        assert_eq!(p, DVec3::new(50.0, -25.0, 0.0));
    }

    #[test]
    fn test_depth_shrinks_far_points() {
        let near = project_perspective(DVec3::new(1.0, 1.0, -1.0));
        let far = project_perspective(DVec3::new(1.0, 1.0, 1.0));
        // scale = 400 / 300 and 400 / 500
        assert!((near.x - 400.0 / 3.0).abs() < 1e-9);
        assert!((far.x - 80.0).abs() < 1e-9);
        assert_eq!(near.z, -1.0);
        assert_eq!(far.z, 1.0);
    }

    #[test]
    fn test_custom_view_distance() {
        let p = project_perspective_with(DVec3::new(1.0, 0.0, 1.0), 100.0);
        assert!((p.x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_denominator_is_not_finite() {
        let p = project_perspective(DVec3::new(1.0, 0.0, -4.0));
        assert!(!p.x.is_finite());
        assert!(p.y.is_nan());
    }

    #[test]
    fn test_orthographic_drops_z() {
        assert_eq!(
            project_orthographic(DVec3::new(0.3, -0.7, 9.0)),
            DVec2::new(0.3, -0.7)
        );
    }

    #[test]
    fn test_viewport_flips_y() {
        let vp = Viewport::centered(600, 400);
        assert_eq!(vp.to_screen(DVec2::ZERO), DVec2::new(300.0, 200.0));
        assert_eq!(vp.to_screen(DVec2::new(10.0, 20.0)), DVec2::new(310.0, 180.0));

        let scaled = Viewport::centered(400, 400).with_scale(100.0);
        assert_eq!(scaled.to_screen(DVec2::new(0.5, 0.5)), DVec2::new(250.0, 150.0));
    }
}
