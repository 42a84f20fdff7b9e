use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use longview_core::config::ViewerConfig;
use longview_core::render::{FrameOutcome, RasterCanvas};

#[derive(Args)]
pub struct RenderArgs {
    /// Input image file
    pub file: PathBuf,

    /// Viewport width in pixels
    #[arg(long, default_value = "1080")]
    pub width: u32,

    /// Viewport height in pixels
    #[arg(long, default_value = "1920")]
    pub height: u32,

    /// Finger displacement in screen pixels before rendering (positive moves the window down)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub scroll: f32,

    /// Output file path
    #[arg(short, long, default_value = "frame.png")]
    pub output: PathBuf,
}

pub fn run(args: &RenderArgs, config: &ViewerConfig) -> Result<()> {
    let mut view = super::open_viewer(&args.file, config, args.width, args.height)?;
    if args.scroll != 0.0 {
        view.scroll_by(args.scroll);
    }

    let mut canvas = RasterCanvas::new(args.width, args.height);
    match view.on_draw(&mut canvas) {
        FrameOutcome::Painted => {}
        outcome => anyhow::bail!("Frame was not painted ({outcome:?})"),
    }

    canvas
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let rect = view.viewport().current_source_rect();
    println!(
        "Rendered rows {}..{} of {} to {}",
        rect.top,
        rect.bottom,
        args.file.display(),
        args.output.display()
    );
    Ok(())
}
