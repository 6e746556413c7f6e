//! Quatview Render Crate
//!
//! CPU rendering of the rotating cube and the corner trail. Drawing goes
//! through the [`Surface`] trait so the same scene code can target the
//! built-in raster, a command recorder, or a host toolkit.
//!
//! ## Modules
//!
//! - [`cube`]: cube geometry and depth-sorted face painting
//! - [`scene`]: full-frame composition of the 3D and 2D views
//! - [`raster`]: RGBA software rasterizer with PNG output
//! - [`recording`]: surface that records draw calls

pub mod cube;
pub mod primitives;
pub mod raster;
pub mod recording;
pub mod scene;
pub mod surface;

pub use cube::{CubeRenderer, FaceDepth, ProjectedCube};
pub use primitives::{Color, Rect, Stroke};
pub use raster::PixmapSurface;
pub use recording::{DrawCommand, RecordingSurface};
pub use scene::{SceneRenderer, render_frame, render_scene_2d, render_scene_3d};
pub use surface::{Surface, SurfaceError};
