//! Owned visualizer state: the current quaternion and the corner trail.

use crate::quaternion::{Quaternion, normalize, to_rotation_matrix};
use crate::trail::{Trail, TrailError};
use glam::{DMat3, DVec2, DVec3};
use std::collections::VecDeque;
use tracing::debug;

/// Current rotation plus trail history.
///
/// Every quaternion update records one trail sample. Rendering reads this
/// state through shared references and never mutates it.
#[derive(Debug, Clone)]
pub struct Visualizer {
    quaternion: Quaternion,
    position: DVec3,
    normalize: bool,
    trail: Trail,
}

impl Visualizer {
    /// Identity rotation, empty trail of `trail_capacity`, normalization on.
    pub fn new(trail_capacity: usize) -> Result<Self, TrailError> {
        Ok(Self {
            quaternion: Quaternion::IDENTITY,
            position: DVec3::ZERO,
            normalize: true,
            trail: Trail::new(trail_capacity)?,
        })
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set the cube's world position.
    pub fn with_position(mut self, position: DVec3) -> Self {
        self.position = position;
        self
    }

    /// Apply a user-supplied quaternion.
    ///
    /// The value is normalized first when normalization is enabled, then a
    /// trail sample is recorded. Returns the stored quaternion.
    pub fn set_quaternion(&mut self, q: Quaternion) -> Quaternion {
        let q = if self.normalize { normalize(q) } else { q };
        self.apply(q)
    }

    /// Apply a quaternion verbatim (recorded data), then record a sample.
    pub fn load_quaternion(&mut self, q: Quaternion) -> Quaternion {
        self.apply(q)
    }

    fn apply(&mut self, q: Quaternion) -> Quaternion {
        self.quaternion = q;
        self.trail.record_sample(q);
        q
    }

    pub fn quaternion(&self) -> Quaternion {
        self.quaternion
    }

    /// Rotation matrix of the current quaternion, recomputed on each call.
    pub fn rotation_matrix(&self) -> DMat3 {
        to_rotation_matrix(self.quaternion)
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn trail_3d(&self) -> &VecDeque<DVec3> {
        self.trail.points_3d()
    }

    pub fn trail_2d(&self) -> &VecDeque<DVec2> {
        self.trail.points_2d()
    }

    pub fn clear_trails(&mut self) {
        self.trail.clear();
    }

    /// Identity rotation and empty trails. No sample is recorded.
    pub fn reset(&mut self) {
        debug!("Resetting visualizer state");
        self.quaternion = Quaternion::IDENTITY;
        self.trail.clear();
    }

    pub fn set_normalize(&mut self, normalize: bool) {
        self.normalize = normalize;
    }

    pub fn normalize_enabled(&self) -> bool {
        self.normalize
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }
}

impl Default for Visualizer {
    fn default() -> Self {
        Self {
            quaternion: Quaternion::IDENTITY,
            position: DVec3::ZERO,
            normalize: true,
            trail: Trail::default(),
        }
    }
}
