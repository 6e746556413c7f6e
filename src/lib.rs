//! Quatview
//!
//! Visualize quaternion rotations as a rotating cube and the path one of its
//! corners traces, in a perspective 3D view and an orthographic 2D view.
//!
//! This crate re-exports the workspace members:
//! - [`quat`]: quaternion math, projection, trail and visualizer state
//! - [`data`]: quaternion stream loading
//! - [`render`]: software rendering of both views
//! - [`app`]: drivers, configuration and the headless run loop

pub use quatview_app as app;
pub use quatview_core as quat;
pub use quatview_data as data;
pub use quatview_render as render;

pub use quatview_core::{Quaternion, Visualizer};
