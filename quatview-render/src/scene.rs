//! Per-frame composition of the 3D and 2D views.
//!
//! Each call clears its surface and repaints everything from the state it is
//! given. Nothing is cached between frames.

use crate::cube::{CubeRenderer, ProjectedCube};
use crate::primitives::{Color, Rect, Stroke};
use crate::surface::Surface;
use glam::{DVec2, DVec3};
use quatview_core::{
    DEFAULT_VIEW_DISTANCE, Quaternion, TRACKED_CORNER, Viewport, Visualizer, WORLD_SCALE,
    project_orthographic, project_perspective_with,
};

const GRID_COLOR: u32 = 0x333333;
const GRID_OPACITY_3D: f32 = 0.3;
const AXIS_LENGTH: f64 = 1.2;
const AXIS_COLORS: [(DVec3, u32); 3] = [
    (DVec3::X, 0xff4444),
    (DVec3::Y, 0x44ff44),
    (DVec3::Z, 0x4444ff),
];
const AXIS_2D_COLOR: u32 = 0x666666;
const TRAIL_COLOR: u32 = 0x00ff88;
const TRAIL_OPACITY_3D: f32 = 0.4;
const TRAIL_OPACITY_2D: f32 = 0.3;
const MARKER_SIZE: f64 = 10.0;

/// Draws both views for a given pose and trail.
#[derive(Debug, Clone, Default)]
pub struct SceneRenderer {
    cube: CubeRenderer,
}

impl SceneRenderer {
    pub fn new(view_distance: f64) -> Self {
        Self {
            cube: CubeRenderer::new(view_distance),
        }
    }

    pub fn cube(&self) -> &CubeRenderer {
        &self.cube
    }

    fn project(&self, point: DVec3) -> DVec2 {
        project_perspective_with(point, self.cube.view_distance()).truncate()
    }

    /// Perspective view: depth grid, axes, trail, then the cube.
    pub fn render_3d<S, I>(
        &self,
        surface: &mut S,
        q: Quaternion,
        position: DVec3,
        trail: I,
    ) -> ProjectedCube
    where
        S: Surface + ?Sized,
        I: IntoIterator<Item = DVec3>,
    {
        surface.clear();
        let (width, height) = surface.size();
        let vp = Viewport::centered(width, height);

        let grid = Stroke::new(Color::from_hex(GRID_COLOR).with_alpha(GRID_OPACITY_3D), 1.0);
        for i in -2..=2 {
            for j in -2..=2 {
                let (x, y) = (i as f64 * 0.5, j as f64 * 0.5);
                let near = self.project(DVec3::new(x, y, -1.0));
                let far = self.project(DVec3::new(x, y, 1.0));
                surface.line(vp.to_screen(near), vp.to_screen(far), grid);
            }
        }

        let origin = vp.to_screen(DVec2::ZERO);
        for (axis, color) in AXIS_COLORS {
            let end = self.project(axis * AXIS_LENGTH);
            surface.line(origin, vp.to_screen(end), Stroke::new(Color::from_hex(color), 3.0));
        }

        let trail_stroke = Stroke::new(Color::from_hex(TRAIL_COLOR).with_alpha(TRAIL_OPACITY_3D), 2.0);
        let points: Vec<DVec2> = trail
            .into_iter()
            .map(|p| vp.to_screen(self.project(p)))
            .collect();
        for pair in points.windows(2) {
            surface.line(pair[0], pair[1], trail_stroke);
        }

        self.cube.draw(surface, &vp, q, position)
    }

    /// Orthographic view: grid, axes, trail and a marker on the latest point.
    pub fn render_2d<S, I>(&self, surface: &mut S, trail: I)
    where
        S: Surface + ?Sized,
        I: IntoIterator<Item = DVec2>,
    {
        surface.clear();
        let (width, height) = surface.size();
        let (w, h) = (width as f64, height as f64);
        let vp = Viewport::centered(width, height).with_scale(WORLD_SCALE);
        let center = vp.center;

        let grid = Stroke::new(Color::from_hex(GRID_COLOR), 1.0);
        for i in -3..=3 {
            let offset = i as f64 * WORLD_SCALE / 3.0;
            surface.line(
                DVec2::new(center.x + offset, 0.0),
                DVec2::new(center.x + offset, h),
                grid,
            );
            surface.line(
                DVec2::new(0.0, center.y + offset),
                DVec2::new(w, center.y + offset),
                grid,
            );
        }

        let axis = Stroke::new(Color::from_hex(AXIS_2D_COLOR), 2.0);
        surface.line(DVec2::new(center.x, 0.0), DVec2::new(center.x, h), axis);
        surface.line(DVec2::new(0.0, center.y), DVec2::new(w, center.y), axis);

        let trail_stroke = Stroke::new(Color::from_hex(TRAIL_COLOR).with_alpha(TRAIL_OPACITY_2D), 1.0);
        let mut latest = None;
        let mut prev: Option<DVec2> = None;
        for point in trail {
            let screen = vp.to_screen(point);
            if let Some(prev) = prev {
                surface.line(prev, screen, trail_stroke);
            }
            prev = Some(screen);
            latest = Some(point);
        }

        let marker = latest.unwrap_or_else(|| project_orthographic(TRACKED_CORNER));
        surface.rect(
            Rect::centered(vp.to_screen(marker), MARKER_SIZE),
            Some(Color::from_hex(TRAIL_COLOR)),
            Some(Stroke::new(Color::WHITE, 2.0)),
        );
    }

    /// Draw both views from `state`.
    pub fn render_frame<A, B>(&self, state: &Visualizer, surface_3d: &mut A, surface_2d: &mut B) -> ProjectedCube
    where
        A: Surface + ?Sized,
        B: Surface + ?Sized,
    {
        let cube = self.render_3d(
            surface_3d,
            state.quaternion(),
            state.position(),
            state.trail_3d().iter().copied(),
        );
        self.render_2d(surface_2d, state.trail_2d().iter().copied());
        cube
    }
}

/// [`SceneRenderer::render_3d`] with the default view distance.
pub fn render_scene_3d<S, I>(surface: &mut S, q: Quaternion, position: DVec3, trail: I) -> ProjectedCube
where
    S: Surface + ?Sized,
    I: IntoIterator<Item = DVec3>,
{
    SceneRenderer::new(DEFAULT_VIEW_DISTANCE).render_3d(surface, q, position, trail)
}

/// [`SceneRenderer::render_2d`] with default settings.
pub fn render_scene_2d<S, I>(surface: &mut S, trail: I)
where
    S: Surface + ?Sized,
    I: IntoIterator<Item = DVec2>,
{
    SceneRenderer::default().render_2d(surface, trail)
}

/// Draw both views of `state` with default settings.
pub fn render_frame<A, B>(state: &Visualizer, surface_3d: &mut A, surface_2d: &mut B) -> ProjectedCube
where
    A: Surface + ?Sized,
    B: Surface + ?Sized,
{
    SceneRenderer::default().render_frame(state, surface_3d, surface_2d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixmapSurface;
    use crate::recording::{DrawCommand, RecordingSurface};

    const NO_TRAIL: [DVec3; 0] = [];
    const NO_POINTS: [DVec2; 0] = [];

    #[test]
    fn test_3d_command_counts() {
        let mut surface = RecordingSurface::new(600, 400);
        render_scene_3d(&mut surface, Quaternion::IDENTITY, DVec3::ZERO, NO_TRAIL);
        // clear + 25 grid + 3 axes + 6 faces + 12 edges
        assert_eq!(surface.commands().len(), 47);
        assert_eq!(surface.commands()[0], DrawCommand::Clear);

        let trail = [DVec3::X, DVec3::Y, DVec3::Z];
        render_scene_3d(&mut surface, Quaternion::IDENTITY, DVec3::ZERO, trail);
        assert_eq!(surface.commands().len(), 49);
    }

    #[test]
    fn test_3d_axes_start_at_center() {
        let mut surface = RecordingSurface::new(600, 400);
        render_scene_3d(&mut surface, Quaternion::IDENTITY, DVec3::ZERO, NO_TRAIL);

        let axes: Vec<_> = surface.lines().skip(25).take(3).collect();
        for (from, _, stroke) in &axes {
            assert_eq!(*from, DVec2::new(300.0, 200.0));
            assert_eq!(stroke.width, 3.0);
        }
        // X axis at z = 0 is unscaled: 1.2 * 100 pixels to the right.
        assert_eq!(axes[0].1, DVec2::new(420.0, 200.0));
        assert_eq!(axes[0].2.color, Color::from_hex(0xff4444));
        // Y axis points up on screen.
        assert_eq!(axes[1].1, DVec2::new(300.0, 80.0));
    }

    #[test]
    fn test_2d_marker_defaults_to_corner() {
        let mut surface = RecordingSurface::new(400, 400);
        render_scene_2d(&mut surface, NO_POINTS);
        // clear + 14 grid + 2 axes + marker
        assert_eq!(surface.commands().len(), 18);
        match surface.commands().last().unwrap() {
            DrawCommand::Rect { rect, fill, outline } => {
                assert_eq!(*rect, Rect::new(245.0, 145.0, 10.0, 10.0));
                assert_eq!(*fill, Some(Color::from_hex(0x00ff88)));
                assert_eq!(outline.unwrap().width, 2.0);
            }
            other => panic!("expected marker rect, got {other:?}"),
        }
    }

    #[test]
    fn test_2d_marker_follows_latest_point() {
        let mut surface = RecordingSurface::new(400, 400);
        render_scene_2d(&mut surface, [DVec2::new(0.1, 0.1), DVec2::new(-0.5, 0.25)]);
        assert_eq!(surface.commands().len(), 19);
        match surface.commands().last().unwrap() {
            DrawCommand::Rect { rect, .. } => assert_eq!(rect.center(), DVec2::new(150.0, 175.0)),
            other => panic!("expected marker rect, got {other:?}"),
        }
    }

    #[test]
    fn test_render_frame_is_deterministic() {
        let mut state = Visualizer::default();
        for i in 0..5 {
            state.set_quaternion(Quaternion::new(1.0, 0.1 * i as f64, -0.2, 0.05));
        }

        let renderer = SceneRenderer::default();
        let (mut a3, mut a2) = (RecordingSurface::new(600, 400), RecordingSurface::new(400, 400));
        let (mut b3, mut b2) = (RecordingSurface::new(600, 400), RecordingSurface::new(400, 400));
        let first = renderer.render_frame(&state, &mut a3, &mut a2);
        let second = renderer.render_frame(&state, &mut b3, &mut b2);

        assert_eq!(first.paint_order(), second.paint_order());
        assert_eq!(a3.commands(), b3.commands());
        assert_eq!(a2.commands(), b2.commands());
        // 4 trail segments in each view.
        assert_eq!(a3.commands().len(), 47 + 4);
        assert_eq!(a2.commands().len(), 18 + 4);
    }

    #[test]
    fn test_raster_frame_shows_front_face() {
        let mut s3 = PixmapSurface::new(600, 400, Color::BLACK).unwrap();
        let mut s2 = PixmapSurface::new(400, 400, Color::BLACK).unwrap();
        let mut state = Visualizer::default();
        state.set_quaternion(Quaternion::IDENTITY);

        render_frame(&state, &mut s3, &mut s2);
        assert_eq!(s3.pixel(300, 200), [0x00, 0x88, 0xff, 0xff]);
        // Marker at (250, 150) on the 2D view.
        assert_eq!(s2.pixel(250, 150), [0x00, 0xff, 0x88, 0xff]);
    }

    #[test]
    fn test_degenerate_projection_does_not_panic() {
        let mut s3 = PixmapSurface::new(64, 64, Color::BLACK).unwrap();
        // Trail point exactly at the projection singularity z = -4.
        render_scene_3d(&mut s3, Quaternion::IDENTITY, DVec3::ZERO, [DVec3::new(1.0, 0.0, -4.0), DVec3::ONE]);
        let renderer = SceneRenderer::new(50.0);
        // Cube vertices at z = -0.5 hit the singularity for view distance 50.
        let cube = renderer.render_3d(&mut s3, Quaternion::IDENTITY, DVec3::ZERO, NO_TRAIL);
        assert!(cube.projected.iter().any(|p| !p.x.is_finite()));
    }
}
