use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use longview_core::config::ViewerConfig;
use longview_core::viewer::LongView;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,

    /// Viewport width to derive scale and window for
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// Viewport height to derive scale and window for
    #[arg(long, requires = "width")]
    pub height: Option<u32>,
}

pub fn run(args: &InfoArgs, config: &ViewerConfig) -> Result<()> {
    let mut view = LongView::new(config.clone());
    view.open_path(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    if let (Some(width), Some(height)) = (args.width, args.height) {
        view.on_measure(width, height);
    }

    crate::summary::print_viewport_summary(&args.file, view.viewport(), config);
    Ok(())
}
