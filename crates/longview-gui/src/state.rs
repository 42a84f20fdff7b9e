use std::path::PathBuf;

use longview_core::render::FrameOutcome;

const MAX_LOG_MESSAGES: usize = 200;

/// UI state that is not owned by the viewer itself.
#[derive(Default)]
pub struct UIState {
    pub file_path: Option<PathBuf>,
    /// Config file the viewer was built from, if one was imported.
    pub config_path: Option<PathBuf>,
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        if self.log_messages.len() == MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
        self.log_messages.push(msg);
    }
}

/// Display state of the central viewer panel.
#[derive(Default)]
pub struct ViewportState {
    /// Texture holding the last painted frame.
    pub texture: Option<egui::TextureHandle>,
    /// On-screen size of the texture, in points.
    pub paint_size: Option<egui::Vec2>,
    /// Last size handed to the viewer's layout hook, in physical pixels.
    pub measured: Option<[u32; 2]>,
    /// A primary-button press that started inside the panel is in progress.
    pub pointer_down: bool,
    /// The texture is stale and the next pass must re-render.
    pub dirty: bool,
    pub last_outcome: Option<FrameOutcome>,
}

impl ViewportState {
    /// Forget everything tied to the previous image.
    pub fn reset(&mut self) {
        self.texture = None;
        self.paint_size = None;
        self.measured = None;
        self.pointer_down = false;
        self.dirty = true;
        self.last_outcome = None;
    }
}
