use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use longview_core::config::ViewerConfig;
use longview_core::gesture::Invalidation;
use longview_core::render::RasterCanvas;

#[derive(Args)]
pub struct FlingArgs {
    /// Input image file
    pub file: PathBuf,

    /// Viewport width in pixels
    #[arg(long, default_value = "1080")]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "1920")]
    pub height: u32,

    /// Scroll velocity in pixels/second (positive moves the window down)
    #[arg(long, default_value = "4000", allow_negative_numbers = true)]
    pub velocity: f32,

    /// Scroll distance applied before the fling starts
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub start: f32,

    /// Output directory for numbered frames
    #[arg(short, long, default_value = "fling")]
    pub output: PathBuf,
}

pub fn run(args: &FlingArgs, config: &ViewerConfig) -> Result<()> {
    let mut view = super::open_viewer(&args.file, config, args.width, args.height)?;
    if args.start != 0.0 {
        view.scroll_by(args.start);
    }

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    // A pointer moving up the screen scrolls the window down.
    if view.fling(-args.velocity) == Invalidation::None {
        println!(
            "Fling of {} px/s does not move the window (top {})",
            args.velocity,
            view.viewport().current_source_rect().top
        );
        return Ok(());
    }

    let estimate = view
        .physics()
        .state()
        .map(|s| (s.duration_ms() / config.physics.frame_interval_ms.max(1) as f64).ceil() as u64)
        .unwrap_or(0);
    let pb = ProgressBar::new(estimate);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Flinging [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let mut canvas = RasterCanvas::new(args.width, args.height);
    let mut frame = 0u64;
    while view.is_animating() {
        view.on_animation_tick();
        canvas.clear();
        view.on_draw(&mut canvas);

        let path = args.output.join(format!("frame_{frame:04}.png"));
        canvas
            .save_png(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(
            frame,
            top = view.viewport().current_source_rect().top,
            "Frame written"
        );
        frame += 1;
        pb.set_position(frame);
    }
    pb.finish();

    let rect = view.viewport().current_source_rect();
    println!(
        "Wrote {} frames to {}, settled at top {}",
        frame,
        args.output.display(),
        rect.top
    );
    Ok(())
}
