//! InkReveal command-line player (native).
//!
//! Plays the reveal of an agent drawing result in real time against an
//! in-memory canvas and optionally writes the final scene as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use inkreveal_core::{
    play, CanvasConfig, DrawingResult, FrameClock, RevealBuilder, RevealConfig, SceneCanvas,
    ThreadClock,
};
use kurbo::Size;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "inkreveal", version, about = "Play a hand-drawn stroke reveal")]
struct Args {
    /// Drawing result JSON (`{"strokes": [...], "labels": [...]}`).
    input: PathBuf,
    /// Reveal config JSON; unspecified fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the final scene elements here.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Frame rate (overrides the config's frame interval).
    #[arg(long)]
    fps: Option<f64>,
    #[arg(long, default_value_t = 1280.0)]
    width: f64,
    #[arg(long, default_value_t = 800.0)]
    height: f64,
}

impl Args {
    fn reveal_config(&self) -> Result<RevealConfig> {
        let mut config = match &self.config {
            Some(path) => RevealConfig::load(path)?,
            None => RevealConfig::default(),
        };
        if let Some(fps) = self.fps {
            anyhow::ensure!(fps > 0.0, "--fps must be positive, got {}", fps);
            config.frame_interval_ms = 1000.0 / fps;
        }
        Ok(config)
    }
}

/// Play `drawing` on `canvas` with `clock`, then settle the camera.
fn play_drawing<C: FrameClock>(
    drawing: &DrawingResult,
    config: RevealConfig,
    canvas: &mut SceneCanvas,
    clock: &mut C,
) -> Result<usize> {
    let mut last_reported = None;
    let mut run = RevealBuilder::from_result(drawing)
        .surface(&mut *canvas)
        .config(config)
        .on_progress(move |done, total| {
            if last_reported != Some(done) {
                log::info!("{}/{} strokes drawn", done, total);
                last_reported = Some(done);
            }
        })
        .on_complete(|| log::info!("Reveal complete"))
        .start()?;

    let frames = play(&mut run, clock)?;
    drop(run);

    while canvas.update(clock.next_frame()) {}
    Ok(frames)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Starting InkReveal");

    let json = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let drawing = DrawingResult::from_json(&json)
        .with_context(|| format!("parsing {}", args.input.display()))?;
    let config = args.reveal_config()?;

    let mut canvas = SceneCanvas::new(CanvasConfig {
        viewport: Size::new(args.width, args.height),
        ..CanvasConfig::default()
    });
    let mut clock = ThreadClock::new(config.frame_interval_ms);
    let frames = play_drawing(&drawing, config, &mut canvas, &mut clock)?;

    let camera = canvas.camera();
    println!(
        "{} frames, {} elements, camera zoom {:.3} offset ({:.1}, {:.1})",
        frames,
        canvas.elements().len(),
        camera.zoom,
        camera.offset.x,
        camera.offset.y
    );

    if let Some(out) = &args.out {
        std::fs::write(out, canvas.to_json()?)
            .with_context(|| format!("writing {}", out.display()))?;
        log::info!("Wrote scene to {}", out.display());
    }
    Ok(())
}
