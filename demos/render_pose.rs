//! Render a single pose to PNG and print its readout.
//!
//! Usage: cargo run --example render_pose -- [w x y z]

use quatview::Quaternion;
use quatview::quat::{Readout, Visualizer};
use quatview::render::{Color, PixmapSurface, SceneRenderer};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let values: Vec<f64> = std::env::args()
        .skip(1)
        .map(|arg| arg.parse())
        .collect::<Result<_, _>>()?;
    let q = match values.as_slice() {
        &[w, x, y, z] => Quaternion::new(w, x, y, z),
        [] => Quaternion::new(0.9533649, -0.30172053, 0.9533649, -0.007400504),
        _ => return Err("expected four components: w x y z".into()),
    };

    let mut state = Visualizer::default();
    let applied = state.set_quaternion(q);
    tracing::info!("Input {q}, magnitude {:.6}, applied {applied}", q.magnitude());

    let background = Color::from_hex(0x111111);
    let mut view_3d = PixmapSurface::new(600, 400, background)?;
    let mut view_2d = PixmapSurface::new(400, 400, background)?;
    let cube = SceneRenderer::default().render_frame(&state, &mut view_3d, &mut view_2d);
    tracing::info!("Paint order {:?}", cube.paint_order());

    view_3d.save_png("pose_3d.png")?;
    view_2d.save_png("pose_2d.png")?;
    println!("{}", Readout::from_state(&state));
    Ok(())
}
