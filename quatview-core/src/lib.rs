//! Quatview Core
//!
//! Quaternion math, screen projection and the corner trail that together
//! describe what the two views show. This crate has no drawing code; see
//! `quatview-render` for that.

pub mod projection;
pub mod quaternion;
pub mod readout;
pub mod state;
pub mod trail;

pub use projection::{
    DEFAULT_VIEW_DISTANCE, Viewport, WORLD_SCALE, project_orthographic, project_perspective,
    project_perspective_with,
};
pub use quaternion::{Quaternion, normalize, rotate, to_rotation_matrix};
pub use readout::Readout;
pub use state::Visualizer;
pub use trail::{DEFAULT_TRAIL_CAPACITY, TRACKED_CORNER, Trail, TrailError};
