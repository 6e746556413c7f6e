//! Quaternion stream loading functions

use crate::sample::sample_quaternions;
use quatview_core::Quaternion;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while loading a quaternion stream.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No valid quaternion records in {0}")]
    Empty(String),
}

/// Parse newline-separated `w: <f>, x: <f>, y: <f>, z: <f>` records.
///
/// Fields are read by position; the labels are not checked. Records with a
/// field count other than four, or with a value that is not a number, are
/// skipped.
pub fn parse_quaternions(text: &str) -> Vec<Quaternion> {
    let mut quaternions = Vec::new();
    let mut dropped = 0usize;

    for (line_no, line) in text.trim().lines().enumerate() {
        match parse_record(line) {
            Some(q) => quaternions.push(q),
            None => {
                dropped += 1;
                warn!("Dropping malformed quaternion record at line {}", line_no + 1);
            }
        }
    }

    debug!(
        "Parsed {} quaternion records ({} dropped)",
        quaternions.len(),
        dropped
    );
    quaternions
}

fn parse_record(line: &str) -> Option<Quaternion> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return None;
    }

    fn field(part: &str) -> Option<f64> {
        let (_, value) = part.split_once(':')?;
        value.trim().parse().ok()
    }

    Some(Quaternion::new(
        field(parts[0])?,
        field(parts[1])?,
        field(parts[2])?,
        field(parts[3])?,
    ))
}

/// Load a quaternion stream from a text file.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_quaternions<P: AsRef<Path>>(path: P) -> Result<Vec<Quaternion>, LoadError> {
    let path = path.as_ref();
    debug!("Loading quaternion stream from: {}", path.display());
    let text = fs::read_to_string(path)?;

    let quaternions = parse_quaternions(&text);
    if quaternions.is_empty() {
        return Err(LoadError::Empty(path.display().to_string()));
    }

    info!(
        "Loaded {} quaternion frames from {}",
        quaternions.len(),
        path.display()
    );
    Ok(quaternions)
}

/// File looked up by [`load_default_stream`].
pub const DEFAULT_STREAM_FILE: &str = "quaternion.txt";

/// Load [`DEFAULT_STREAM_FILE`] from `dir`, falling back to the built-in
/// sample when it is missing or holds no valid records.
pub fn load_default_stream<P: AsRef<Path>>(dir: P) -> Vec<Quaternion> {
    let path = dir.as_ref().join(DEFAULT_STREAM_FILE);
    match load_quaternions(&path) {
        Ok(quaternions) => quaternions,
        Err(LoadError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No {} found, using the built-in sample stream", path.display());
            sample_quaternions()
        }
        Err(e) => {
            warn!("Falling back to the built-in sample stream: {e}");
            sample_quaternions()
        }
    }
}
