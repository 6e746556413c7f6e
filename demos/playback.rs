//! Play the built-in sample stream and print where the tracked corner goes.
//!
//! Nothing is drawn; this walks the controller the way a UI host would, one
//! tick per 60 Hz frame.

use quatview::Visualizer;
use quatview::app::{Controller, DriverMode, Playback};
use quatview::data::sample_quaternions;
use std::time::Duration;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_target(false)
        .init();

    let frames = sample_quaternions();
    let mut controller = Controller::new(Playback::new(frames).with_speed(50).with_looping(false));
    let mut state = Visualizer::default();

    controller.play(Duration::ZERO);
    let mut frame = 0u32;
    while controller.mode() == DriverMode::Playing {
        let now = Duration::from_micros(16_667) * frame;
        if let Some(q) = controller.tick(now, &mut state) {
            let corner = state.trail().latest_3d().unwrap_or_default();
            println!(
                "{:>7.3}s  q = {q}  corner = ({:.4}, {:.4}, {:.4})",
                now.as_secs_f64(),
                corner.x,
                corner.y,
                corner.z
            );
        }
        frame += 1;
    }
    println!("{} samples in trail", state.trail().len());
}
