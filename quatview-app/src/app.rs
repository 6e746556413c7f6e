//! Viewer state and the headless run loop.

use crate::config::{LoggingConfig, ViewerConfig};
use crate::controller::{Controller, DriverMode, Playback};
use crate::errors::AppError;
use quatview_core::{Quaternion, Readout, Visualizer};
use quatview_data::{load_default_stream, load_quaternions};
use quatview_render::{PixmapSurface, ProjectedCube, SceneRenderer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Simulated display refresh used by the headless loop.
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Timestamp of display frame `index` on the simulated clock.
pub fn frame_time(index: usize) -> Duration {
    let nanos = (FRAME_INTERVAL.as_nanos() as u64).saturating_mul(index as u64);
    Duration::from_nanos(nanos)
}

/// How the run loop drives the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RunMode {
    /// Show a single quaternion.
    Manual,
    /// Synthetic smooth rotation.
    Auto,
    /// Play back a recorded stream.
    #[default]
    Play,
}

/// Initialize the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
pub fn init_logging(config: &LoggingConfig) {
    #[cfg(feature = "tracy")]
    {
        if config.enable_tracy {
            use tracing_subscriber::Layer;
            use tracing_subscriber::layer::SubscriberExt;
            use tracing_subscriber::util::SubscriberInitExt;
            tracing_subscriber::registry()
                .with(tracing_tracy::TracyLayer::default())
                .with(
                    tracing_subscriber::fmt::layer().with_target(false).with_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| config.level.as_str().into()),
                    ),
                )
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level)),
        )
        .with_target(false)
        .init();
}

/// Parse `w,x,y,z` into a quaternion.
pub fn parse_quaternion_arg(text: &str) -> Result<Quaternion, String> {
    let values = text
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid component in '{text}': {e}"))?;
    match values.as_slice() {
        &[w, x, y, z] => Ok(Quaternion::new(w, x, y, z)),
        _ => Err(format!("expected 4 comma-separated values, got {}", values.len())),
    }
}

/// Pose state, drivers and both render targets.
pub struct Viewer {
    state: Visualizer,
    controller: Controller,
    renderer: SceneRenderer,
    surface_3d: PixmapSurface,
    surface_2d: PixmapSurface,
}

impl Viewer {
    /// Build a viewer from a validated config and a playback stream.
    pub fn new(config: &ViewerConfig, frames: Vec<Quaternion>) -> Result<Self, AppError> {
        config.validate()?;
        let state = Visualizer::new(config.trail_capacity)?.with_normalize(config.normalize);
        let playback = Playback::new(frames)
            .with_speed(config.playback.speed)
            .with_looping(config.playback.looping);

        Ok(Self {
            state,
            controller: Controller::new(playback),
            renderer: SceneRenderer::new(config.view_distance),
            surface_3d: PixmapSurface::new(config.view_3d.width, config.view_3d.height, config.background)?,
            surface_2d: PixmapSurface::new(config.view_2d.width, config.view_2d.height, config.background)?,
        })
    }

    pub fn state(&self) -> &Visualizer {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut Visualizer {
        &mut self.state
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn surfaces(&self) -> (&PixmapSurface, &PixmapSurface) {
        (&self.surface_3d, &self.surface_2d)
    }

    pub fn start_auto_rotate(&mut self) {
        self.controller.start_auto_rotate();
    }

    pub fn play(&mut self, now: Duration) -> bool {
        self.controller.play(now)
    }

    pub fn reset(&mut self) {
        self.controller.reset(&mut self.state);
    }

    pub fn tick(&mut self, now: Duration) -> Option<Quaternion> {
        self.controller.tick(now, &mut self.state)
    }

    /// Repaint both surfaces from the current state.
    pub fn render(&mut self) -> ProjectedCube {
        self.renderer
            .render_frame(&self.state, &mut self.surface_3d, &mut self.surface_2d)
    }

    /// Write both surfaces as `frame_NNNN_3d.png` and `frame_NNNN_2d.png`.
    pub fn save_frame(&self, dir: &Path, index: usize) -> Result<[PathBuf; 2], AppError> {
        let path_3d = dir.join(format!("frame_{index:04}_3d.png"));
        let path_2d = dir.join(format!("frame_{index:04}_2d.png"));
        self.surface_3d.save_png(&path_3d)?;
        self.surface_2d.save_png(&path_2d)?;
        Ok([path_3d, path_2d])
    }

    pub fn readout(&self) -> Readout {
        Readout::from_state(&self.state)
    }
}

/// Parameters of one headless run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub mode: RunMode,
    pub data: Option<PathBuf>,
    pub quaternion: Option<Quaternion>,
    pub frames: usize,
    pub out: PathBuf,
    /// Write every n-th frame; 0 writes only the last.
    pub every: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            mode: RunMode::Play,
            data: None,
            quaternion: None,
            frames: 120,
            out: PathBuf::from("frames"),
            every: 0,
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub frames_rendered: usize,
    pub written: Vec<PathBuf>,
    pub readout: Readout,
}

/// Drive the viewer for `options.frames` simulated display frames and write
/// the selected frames as PNG.
pub fn run(config: &ViewerConfig, options: &RunOptions) -> Result<RunSummary, AppError> {
    let stream = match (&options.data, options.mode) {
        (Some(path), _) => load_quaternions(path)?,
        (None, RunMode::Play) => load_default_stream("."),
        (None, _) => Vec::new(),
    };

    let mut viewer = Viewer::new(config, stream)?;
    std::fs::create_dir_all(&options.out)?;

    let frame_count = match options.mode {
        RunMode::Manual => {
            let q = options
                .quaternion
                .ok_or_else(|| AppError::InvalidArgument("manual mode needs --quaternion".into()))?;
            let applied = viewer.state_mut().set_quaternion(q);
            debug!("Manual quaternion {q} applied as {applied}");
            1
        }
        RunMode::Auto => {
            viewer.start_auto_rotate();
            options.frames
        }
        RunMode::Play => {
            if !viewer.play(Duration::ZERO) {
                return Err(AppError::InvalidArgument("no frames to play".into()));
            }
            options.frames
        }
    };
    if frame_count == 0 {
        return Err(AppError::InvalidArgument("frame count must be at least 1".into()));
    }

    let mut written = Vec::new();
    for index in 0..frame_count {
        let now = frame_time(index);
        if viewer.controller().mode() != DriverMode::Idle {
            viewer.tick(now);
        }
        viewer.render();

        let last = index + 1 == frame_count;
        let selected = options.every > 0 && index % options.every == 0;
        if last || selected {
            written.extend(viewer.save_frame(&options.out, index)?);
        }
    }

    let readout = viewer.readout();
    info!(
        "Rendered {frame_count} frames, wrote {} images to {}",
        written.len(),
        options.out.display()
    );
    info!("Final pose\n{readout}");

    Ok(RunSummary {
        frames_rendered: frame_count,
        written,
        readout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quatview_data::sample_quaternions;

    fn small_config() -> ViewerConfig {
        ViewerConfig::default()
            .with_view_3d(60, 40)
            .with_view_2d(40, 40)
            .with_speed(100)
    }

    #[test]
    fn test_parse_quaternion_arg() {
        assert_eq!(
            parse_quaternion_arg("1, 0,0.5 ,-2").unwrap(),
            Quaternion::new(1.0, 0.0, 0.5, -2.0)
        );
        assert!(parse_quaternion_arg("1,2,3").is_err());
        assert!(parse_quaternion_arg("1,2,3,x").is_err());
    }

    #[test]
    fn test_frame_time() {
        assert_eq!(frame_time(0), Duration::ZERO);
        assert_eq!(frame_time(3), Duration::from_micros(50_001));
        assert_eq!(frame_time(60), Duration::from_micros(1_000_020));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_frame_time_past_u32_range() {
        let index = u32::MAX as usize + 1;
        assert_eq!(frame_time(index), Duration::from_nanos(16_667_000 * (1u64 << 32)));
        assert!(frame_time(index) > frame_time(index - 1));
    }

    #[test]
    fn test_viewer_rejects_invalid_config() {
        let config = ViewerConfig::default().with_trail_capacity(0);
        assert!(matches!(Viewer::new(&config, Vec::new()), Err(AppError::Config(_))));
    }

    #[test]
    fn test_viewer_playback_and_reset() {
        let frames = sample_quaternions();
        let mut viewer = Viewer::new(&small_config(), frames.clone()).unwrap();
        assert!(viewer.play(Duration::ZERO));
        assert_eq!(viewer.tick(Duration::ZERO), Some(frames[0]));
        viewer.render();
        assert_eq!(viewer.state().trail().len(), 1);

        viewer.reset();
        assert_eq!(viewer.controller().mode(), DriverMode::Idle);
        assert_eq!(viewer.state().quaternion(), Quaternion::IDENTITY);
        assert!(viewer.state().trail().is_empty());
        assert_eq!(viewer.tick(Duration::from_secs(1)), None);
    }

    #[test]
    fn test_run_play_writes_last_frame() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions {
            frames: 12,
            out: dir.path().to_path_buf(),
            ..RunOptions::default()
        };
        let summary = run(&small_config(), &options).unwrap();
        assert_eq!(summary.frames_rendered, 12);
        assert_eq!(summary.written.len(), 2);
        assert!(summary.written.iter().all(|p| p.exists()));
        assert!(summary.written[0].ends_with("frame_0011_3d.png"));
    }

    #[test]
    fn test_run_auto_writes_every_nth() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions {
            mode: RunMode::Auto,
            frames: 10,
            every: 4,
            out: dir.path().to_path_buf(),
            ..RunOptions::default()
        };
        let summary = run(&small_config(), &options).unwrap();
        // Frames 0, 4, 8 and the last one, two images each.
        assert_eq!(summary.written.len(), 8);
        assert!((summary.readout.quaternion.magnitude() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_manual() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions {
            mode: RunMode::Manual,
            quaternion: Some(Quaternion::new(0.0, 0.0, 0.0, 0.0)),
            out: dir.path().to_path_buf(),
            ..RunOptions::default()
        };
        let summary = run(&small_config(), &options).unwrap();
        assert_eq!(summary.frames_rendered, 1);
        assert_eq!(summary.readout.quaternion, Quaternion::IDENTITY);

        let missing = RunOptions {
            quaternion: None,
            ..options
        };
        assert!(matches!(
            run(&small_config(), &missing),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_run_missing_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions {
            data: Some(dir.path().join("missing.txt")),
            out: dir.path().to_path_buf(),
            ..RunOptions::default()
        };
        assert!(matches!(run(&small_config(), &options), Err(AppError::Load(_))));
    }
}
