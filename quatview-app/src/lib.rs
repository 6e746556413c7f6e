//! Quatview Application
//!
//! Headless viewer for quaternion rotations.
//!
//! Features:
//! - Manual, auto-rotate and playback driving modes
//! - JSON configuration with CLI overrides
//! - PNG output of both views per selected frame

pub mod app;
pub mod config;
pub mod controller;
pub mod errors;

pub use app::{RunMode, RunOptions, RunSummary, Viewer, init_logging, parse_quaternion_arg, run};
pub use config::{ConfigError, LoggingConfig, PlaybackConfig, SurfaceConfig, ViewerConfig};
pub use controller::{AutoRotate, Controller, DriverMode, Playback, frame_delay};
pub use errors::AppError;
