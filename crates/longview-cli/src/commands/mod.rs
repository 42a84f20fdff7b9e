pub mod config;
pub mod fling;
pub mod info;
pub mod render;

use std::path::Path;

use anyhow::{Context, Result};
use longview_core::config::ViewerConfig;
use longview_core::viewer::LongView;

/// Open `file` in a fresh viewer and lay it out for a `width` x `height` viewport.
pub(crate) fn open_viewer(
    file: &Path,
    config: &ViewerConfig,
    width: u32,
    height: u32,
) -> Result<LongView> {
    let mut view = LongView::new(config.clone());
    view.open_path(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    view.on_measure(width, height);
    if !view.viewport().is_ready() {
        anyhow::bail!("Viewport {width}x{height} cannot show {}", file.display());
    }
    Ok(view)
}
