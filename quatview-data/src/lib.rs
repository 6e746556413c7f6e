//! Quatview Data Crate
//!
//! Loading of recorded quaternion streams. One record per line:
//!
//! ```text
//! w: 0.9533649, x: -0.30172053, y: 0.9533649, z: -0.007400504
//! ```

mod loader;
mod sample;

pub use loader::{
    DEFAULT_STREAM_FILE, LoadError, load_default_stream, load_quaternions, parse_quaternions,
};
pub use sample::{SAMPLE_STREAM, sample_quaternions};
