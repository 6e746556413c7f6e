//! Top-level error type for the viewer binary.

use crate::config::ConfigError;
use quatview_core::TrailError;
use quatview_data::LoadError;
use quatview_render::SurfaceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to load quaternions: {0}")]
    Load(#[from] LoadError),

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Trail(#[from] TrailError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
