//! Built-in recording used when no data file is given.

use crate::loader::parse_quaternions;
use quatview_core::Quaternion;

/// Ten consecutive samples from an IMU recording, in stream format.
pub const SAMPLE_STREAM: &str = "\
w: 0.9533649, x: -0.30172053, y: 0.9533649, z: -0.007400504
w: 0.9533656, x: -0.30172077, y: 0.9533656, z: -0.0073005026
w: 0.9533656, x: -0.30172077, y: 0.9533656, z: -0.0073005026
w: 0.9533361, x: -0.30181143, y: 0.9533361, z: -0.0074002803
w: 0.9533369, x: -0.30181167, y: 0.9533369, z: -0.0073002824
w: 0.9533081, x: -0.30190256, y: 0.9533081, z: -0.007300062
w: 0.953299, x: -0.30193135, y: 0.953299, z: -0.007300758
w: 0.9532982, x: -0.3019311, y: 0.9532982, z: -0.0074007623
w: 0.9532694, x: -0.302022, y: 0.9532694, z: -0.0074005392
w: 0.9533023, x: -0.3019324, y: 0.9533023, z: -0.006900741";

/// Parsed [`SAMPLE_STREAM`].
pub fn sample_quaternions() -> Vec<Quaternion> {
    parse_quaternions(SAMPLE_STREAM)
}
