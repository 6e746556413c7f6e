use clap::Parser;
use quatview_app::{AppError, RunMode, RunOptions, ViewerConfig, init_logging, parse_quaternion_arg, run};
use quatview_core::Quaternion;
use std::path::PathBuf;

/// Quatview - quaternion rotation viewer
#[derive(Parser, Debug)]
#[command(name = "quatview")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Quaternion stream to play (built-in sample when omitted)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// How the rotation is driven
    #[arg(short, long, value_enum, default_value_t = RunMode::Play)]
    mode: RunMode,

    /// Quaternion for manual mode, as w,x,y,z
    #[arg(short, long, value_parser = parse_quaternion_arg, allow_hyphen_values = true)]
    quaternion: Option<Quaternion>,

    /// Number of simulated display frames
    #[arg(short, long, default_value_t = 120)]
    frames: usize,

    /// Output directory for PNG frames
    #[arg(short, long, default_value = "frames")]
    out: PathBuf,

    /// Write every n-th frame (0 = only the last)
    #[arg(long, default_value_t = 0)]
    every: usize,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Apply manual and auto-rotate quaternions without normalizing
    #[arg(long)]
    no_normalize: bool,

    /// Stop playback after the last frame
    #[arg(long)]
    no_loop: bool,

    /// Playback speed, 1 (slowest) to 100 (fastest)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=100))]
    speed: Option<u32>,

    /// Log filter, e.g. "debug" or "quatview_app=trace"
    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(args: &Args) -> Result<ViewerConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => ViewerConfig::from_json_file(path)?,
        None => ViewerConfig::default(),
    };
    if args.no_normalize {
        config.normalize = false;
    }
    if args.no_loop {
        config.playback.looping = false;
    }
    if let Some(speed) = args.speed {
        config.playback.speed = speed;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

fn main() {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config.logging);

    let options = RunOptions {
        mode: args.mode,
        data: args.data,
        quaternion: args.quaternion,
        frames: args.frames,
        out: args.out,
        every: args.every,
    };
    if let Err(e) = run(&config, &options) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
