//! Text readout of the current pose for status panels and logs.

use crate::projection::project_orthographic;
use crate::state::Visualizer;
use crate::trail::TRACKED_CORNER;
use glam::{DMat3, DVec2, DVec3};
use std::fmt;

/// Snapshot of the values shown next to the two views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    pub quaternion: crate::Quaternion,
    /// Latest trail sample, or the unrotated corner when the trail is empty.
    pub corner_3d: DVec3,
    pub corner_2d: DVec2,
    pub matrix: DMat3,
}

impl Readout {
    pub fn from_state(state: &Visualizer) -> Self {
        let corner_3d = state.trail().latest_3d().unwrap_or(TRACKED_CORNER);
        Self {
            quaternion: state.quaternion(),
            corner_3d,
            corner_2d: project_orthographic(corner_3d),
            matrix: state.rotation_matrix(),
        }
    }

    pub fn position_3d(&self) -> String {
        format!(
            "x: {:.6}, y: {:.6}, z: {:.6}",
            self.corner_3d.x, self.corner_3d.y, self.corner_3d.z
        )
    }

    pub fn position_2d(&self) -> String {
        format!("x: {:.6}, y: {:.6}", self.corner_2d.x, self.corner_2d.y)
    }

    /// One `[a, b, c]` line per matrix row, four decimals.
    pub fn matrix_rows(&self) -> [String; 3] {
        [0, 1, 2].map(|r| {
            let row = self.matrix.row(r);
            format!("[{:.4}, {:.4}, {:.4}]", row.x, row.y, row.z)
        })
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "quaternion: {}", self.quaternion)?;
        writeln!(f, "corner 3d:  {}", self.position_3d())?;
        writeln!(f, "corner 2d:  {}", self.position_2d())?;
        let rows = self.matrix_rows();
        write!(f, "matrix:     {}\n            {}\n            {}", rows[0], rows[1], rows[2])
    }
}
