//! Bounded history of the tracked cube corner in 3D and in the 2D view.

use crate::projection::project_orthographic;
use crate::quaternion::{Quaternion, rotate};
use glam::{DVec2, DVec3};
use std::collections::VecDeque;
use thiserror::Error;
use tracing::trace;

/// The cube corner whose path is recorded.
pub const TRACKED_CORNER: DVec3 = DVec3::new(0.5, 0.5, 0.5);

/// Default number of samples kept.
pub const DEFAULT_TRAIL_CAPACITY: usize = 200;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrailError {
    #[error("Trail capacity must be at least 1")]
    ZeroCapacity,
}

/// Two index-aligned FIFO histories: world-space samples and their
/// orthographic projections.
///
/// Entry `i` of [`Trail::points_2d`] is the projection of entry `i` of
/// [`Trail::points_3d`], computed once when the sample was recorded.
#[derive(Debug, Clone)]
pub struct Trail {
    points_3d: VecDeque<DVec3>,
    points_2d: VecDeque<DVec2>,
    capacity: usize,
}

impl Trail {
    /// Create an empty trail holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Result<Self, TrailError> {
        if capacity == 0 {
            return Err(TrailError::ZeroCapacity);
        }
        Ok(Self {
            points_3d: VecDeque::with_capacity(capacity + 1),
            points_2d: VecDeque::with_capacity(capacity + 1),
            capacity,
        })
    }

    /// Rotate [`TRACKED_CORNER`] by `q` and append it to both histories,
    /// evicting the oldest samples past capacity.
    pub fn record_sample(&mut self, q: Quaternion) {
        self.push(rotate(q, TRACKED_CORNER));
    }

    /// Append an already rotated sample.
    pub fn push(&mut self, sample: DVec3) {
        self.points_3d.push_back(sample);
        self.points_2d.push_back(project_orthographic(sample));

        while self.points_3d.len() > self.capacity {
            self.points_3d.pop_front();
            self.points_2d.pop_front();
        }
        trace!(len = self.points_3d.len(), "Recorded trail sample");
    }

    /// Empty both histories.
    pub fn clear(&mut self) {
        self.points_3d.clear();
        self.points_2d.clear();
    }

    pub fn points_3d(&self) -> &VecDeque<DVec3> {
        &self.points_3d
    }

    pub fn points_2d(&self) -> &VecDeque<DVec2> {
        &self.points_2d
    }

    pub fn latest_3d(&self) -> Option<DVec3> {
        self.points_3d.back().copied()
    }

    pub fn latest_2d(&self) -> Option<DVec2> {
        self.points_2d.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points_3d.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points_3d.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self {
            points_3d: VecDeque::with_capacity(DEFAULT_TRAIL_CAPACITY + 1),
            points_2d: VecDeque::with_capacity(DEFAULT_TRAIL_CAPACITY + 1),
            capacity: DEFAULT_TRAIL_CAPACITY,
        }
    }
}
