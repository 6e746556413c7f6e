//! Drivers that feed quaternions into the visualizer over time.
//!
//! Only one driver runs at a time. [`Controller`] owns the active
//! [`DriverMode`]; starting a driver replaces whichever was running, and
//! stopping returns to [`DriverMode::Idle`] so later ticks change nothing.

use quatview_core::{Quaternion, Visualizer};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Which driver, if any, is advancing the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverMode {
    #[default]
    Idle,
    AutoRotating,
    Playing,
}

impl fmt::Display for DriverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverMode::Idle => write!(f, "Idle"),
            DriverMode::AutoRotating => write!(f, "AutoRotating"),
            DriverMode::Playing => write!(f, "Playing"),
        }
    }
}

/// Smooth synthetic rotation advanced once per display frame.
#[derive(Debug, Clone, Default)]
pub struct AutoRotate {
    time: f64,
}

impl AutoRotate {
    /// Time advanced per frame.
    pub const STEP: f64 = 0.02;

    pub fn restart(&mut self) {
        self.time = 0.0;
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Advance one frame and return the (unnormalized) quaternion.
    pub fn advance(&mut self) -> Quaternion {
        self.time += Self::STEP;
        let t = self.time;
        Quaternion::new(
            (t * 0.5).cos(),
            (t * 0.3).sin() * 0.5,
            (t * 0.7).cos() * 0.5,
            (t * 0.4).sin() * 0.3,
        )
    }
}

/// Minimum delay between playback frames.
pub const MIN_FRAME_DELAY: Duration = Duration::from_millis(16);

/// Delay between playback frames for `speed` in 1..=100.
///
/// Decreases by 2 ms per speed step from 198 ms and never drops below
/// [`MIN_FRAME_DELAY`].
pub fn frame_delay(speed: u32) -> Duration {
    let speed = speed.clamp(1, 100) as u64;
    Duration::from_millis(200u64.saturating_sub(speed * 2)).max(MIN_FRAME_DELAY)
}

/// Cursor over a recorded quaternion stream.
#[derive(Debug, Clone)]
pub struct Playback {
    frames: Vec<Quaternion>,
    cursor: usize,
    looping: bool,
    speed: u32,
    next_due: Duration,
}

impl Playback {
    pub fn new(frames: Vec<Quaternion>) -> Self {
        Self {
            frames,
            cursor: 0,
            looping: true,
            speed: 10,
            next_due: Duration::ZERO,
        }
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed.clamp(1, 100);
        self
    }

    /// Replace the stream and rewind.
    pub fn set_frames(&mut self, frames: Vec<Quaternion>) {
        self.frames = frames;
        self.cursor = 0;
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(1, 100);
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn frames(&self) -> &[Quaternion] {
        &self.frames
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Owns the driver mode and both drivers.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    mode: DriverMode,
    auto_rotate: AutoRotate,
    playback: Playback,
}

impl Controller {
    pub fn new(playback: Playback) -> Self {
        Self {
            mode: DriverMode::Idle,
            auto_rotate: AutoRotate::default(),
            playback,
        }
    }

    pub fn mode(&self) -> DriverMode {
        self.mode
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    fn transition(&mut self, mode: DriverMode) {
        if self.mode != mode {
            debug!("Driver mode {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Start auto-rotation from t = 0, stopping playback.
    pub fn start_auto_rotate(&mut self) {
        self.auto_rotate.restart();
        self.transition(DriverMode::AutoRotating);
    }

    /// Stop auto-rotation if it is running, otherwise start it.
    pub fn toggle_auto_rotate(&mut self) -> DriverMode {
        if self.mode == DriverMode::AutoRotating {
            self.transition(DriverMode::Idle);
        } else {
            self.start_auto_rotate();
        }
        self.mode
    }

    /// Start playback at the current cursor, stopping auto-rotation. The
    /// first frame is due immediately. Returns false when there is nothing
    /// to play.
    ///
    /// A stream that ran to its end without looping starts over from the
    /// first frame.
    pub fn play(&mut self, now: Duration) -> bool {
        if self.playback.is_empty() {
            debug!("Ignoring play request: no frames loaded");
            return false;
        }
        if self.playback.cursor >= self.playback.frames.len() {
            self.playback.cursor = 0;
        }
        self.playback.next_due = now;
        self.transition(DriverMode::Playing);
        true
    }

    /// Pause playback, keeping the cursor.
    pub fn pause(&mut self) {
        if self.mode == DriverMode::Playing {
            self.transition(DriverMode::Idle);
        }
    }

    /// Stop whichever driver is running.
    pub fn stop(&mut self) {
        self.transition(DriverMode::Idle);
    }

    /// Move the playback cursor to `index` and apply that frame.
    pub fn seek(&mut self, index: usize, state: &mut Visualizer) -> Option<Quaternion> {
        let q = *self.playback.frames.get(index)?;
        self.playback.cursor = index;
        Some(state.load_quaternion(q))
    }

    /// Pause, rewind to the first frame, show it, and clear the trails.
    pub fn reset_playback(&mut self, state: &mut Visualizer) {
        self.pause();
        self.playback.cursor = 0;
        self.seek(0, state);
        state.clear_trails();
    }

    /// Stop all drivers and reset the visualizer.
    pub fn reset(&mut self, state: &mut Visualizer) {
        self.stop();
        state.reset();
    }

    /// Advance the active driver for a display frame at time `now`.
    ///
    /// Returns the quaternion applied to `state`, if any.
    pub fn tick(&mut self, now: Duration, state: &mut Visualizer) -> Option<Quaternion> {
        match self.mode {
            DriverMode::Idle => None,
            DriverMode::AutoRotating => {
                let q = self.auto_rotate.advance();
                Some(state.set_quaternion(q))
            }
            DriverMode::Playing => {
                if now < self.playback.next_due {
                    return None;
                }
                let Some(&frame) = self.playback.frames.get(self.playback.cursor) else {
                    debug!("Playback cursor {} past end of stream", self.playback.cursor);
                    self.playback.cursor = 0;
                    self.transition(DriverMode::Idle);
                    return None;
                };
                let q = state.load_quaternion(frame);
                self.playback.cursor += 1;

                if self.playback.cursor >= self.playback.frames.len() {
                    self.playback.cursor = 0;
                    if !self.playback.looping {
                        debug!("Playback reached the last frame");
                        self.transition(DriverMode::Idle);
                        return Some(q);
                    }
                }
                self.playback.next_due = now + frame_delay(self.playback.speed);
                Some(q)
            }
        }
    }
}
