//! Unit cube geometry and the painter's-algorithm cube renderer.

use crate::primitives::{Color, Stroke};
use crate::surface::Surface;
use glam::{DVec2, DVec3};
use ordered_float::OrderedFloat;
use quatview_core::{DEFAULT_VIEW_DISTANCE, Quaternion, Viewport, project_perspective_with, rotate};
use tracing::trace;

/// Cube corners centered on the origin. Indices 0-3 are the back face
/// (z = -0.5), 4-7 the front face.
pub const VERTICES: [DVec3; 8] = [
    DVec3::new(-0.5, -0.5, -0.5),
    DVec3::new(0.5, -0.5, -0.5),
    DVec3::new(0.5, 0.5, -0.5),
    DVec3::new(-0.5, 0.5, -0.5),
    DVec3::new(-0.5, -0.5, 0.5),
    DVec3::new(0.5, -0.5, 0.5),
    DVec3::new(0.5, 0.5, 0.5),
    DVec3::new(-0.5, 0.5, 0.5),
];

/// Faces as vertex indices: back, front, bottom, top, left, right.
pub const FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 7, 6, 5],
    [0, 4, 5, 1],
    [2, 6, 7, 3],
    [0, 3, 7, 4],
    [1, 5, 6, 2],
];

pub const EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Face fill colors keyed by face index.
pub const FACE_COLORS: [u32; 6] = [0x004488, 0x0088ff, 0x440088, 0x8800ff, 0x884400, 0xff8800];

const EDGE_OPACITY: f32 = 0.8;

/// A face and its depth key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceDepth {
    /// Index into [`FACES`].
    pub index: usize,
    /// z of the face centroid in world space.
    pub depth: f64,
}

/// Transient per-call cube data.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedCube {
    /// Rotated and translated corners.
    pub world: [DVec3; 8],
    /// Perspective-projected corners; `z` is the world depth.
    pub projected: [DVec3; 8],
    /// Faces in paint order, farthest first.
    pub faces: [FaceDepth; 6],
}

impl ProjectedCube {
    /// Face indices in paint order.
    pub fn paint_order(&self) -> [usize; 6] {
        self.faces.map(|f| f.index)
    }
}

/// Draws the cube with filled faces sorted back to front, then a wireframe
/// on top.
///
/// Sorting by centroid depth is only correct for a convex mesh without
/// interpenetration, which the cube is.
#[derive(Debug, Clone)]
pub struct CubeRenderer {
    view_distance: f64,
    palette: [Color; 6],
}

impl CubeRenderer {
    pub fn new(view_distance: f64) -> Self {
        Self {
            view_distance,
            palette: FACE_COLORS.map(Color::from_hex),
        }
    }

    pub fn view_distance(&self) -> f64 {
        self.view_distance
    }

    pub fn palette(&self) -> &[Color; 6] {
        &self.palette
    }

    /// Rotate, translate and project the cube and sort its faces.
    pub fn project(&self, q: Quaternion, position: DVec3) -> ProjectedCube {
        let world = VERTICES.map(|v| rotate(q, v) + position);
        let projected = world.map(|v| project_perspective_with(v, self.view_distance));

        let mut faces: [FaceDepth; 6] = std::array::from_fn(|index| {
            let centroid = FACES[index]
                .iter()
                .fold(DVec3::ZERO, |sum, &v| sum + world[v])
                / 4.0;
            FaceDepth {
                index,
                depth: centroid.z,
            }
        });
        // Stable, so equal depths keep face order.
        faces.sort_by_key(|f| OrderedFloat(f.depth));

        ProjectedCube {
            world,
            projected,
            faces,
        }
    }

    /// Paint the cube onto `surface` and return the data it was drawn from.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        viewport: &Viewport,
        q: Quaternion,
        position: DVec3,
    ) -> ProjectedCube {
        let cube = self.project(q, position);
        let screen: [DVec2; 8] = cube.projected.map(|p| viewport.to_screen(p.truncate()));

        let outline = Stroke::new(Color::WHITE, 1.0);
        for face in &cube.faces {
            let points = FACES[face.index].map(|v| screen[v]);
            surface.fill_polygon(&points, self.palette[face.index], Some(outline));
        }

        let edge = Stroke::new(Color::WHITE.with_alpha(EDGE_OPACITY), 1.0);
        for [a, b] in EDGES {
            surface.line(screen[a], screen[b], edge);
        }

        trace!(order = ?cube.paint_order(), "Painted cube");
        cube
    }
}

impl Default for CubeRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_VIEW_DISTANCE)
    }
}
