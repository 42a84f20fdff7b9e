use std::path::Path;
use std::sync::mpsc;

use anyhow::{Context, Result};
use longview_core::config::ViewerConfig;
use longview_core::viewer::LongView;

use crate::messages::DialogResult;
use crate::panels;
use crate::state::{UIState, ViewportState};

pub struct LongviewApp {
    pub view: LongView,
    pub result_tx: mpsc::Sender<DialogResult>,
    pub result_rx: mpsc::Receiver<DialogResult>,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub show_about: bool,
}

impl LongviewApp {
    pub fn new() -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        Self {
            view: LongView::default(),
            result_tx,
            result_rx,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            show_about: false,
        }
    }

    /// Drain all pending dialog results.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                DialogResult::OpenImage { path } => {
                    if let Err(e) = self.open_image(&path) {
                        tracing::warn!(error = %e, "Open failed");
                        self.ui_state.add_log(format!("ERROR: {e:#}"));
                    }
                }
                DialogResult::ConfigImported { path, config } => {
                    self.apply_config(config);
                    self.ui_state
                        .add_log(format!("Config imported: {}", path.display()));
                    self.ui_state.config_path = Some(path);
                }
                DialogResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }

    fn open_image(&mut self, path: &Path) -> Result<()> {
        self.viewport.reset();
        self.ui_state.file_path = None;
        let meta = self
            .view
            .open_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        self.ui_state.add_log(format!(
            "Opened: {} ({}x{})",
            path.display(),
            meta.native_width,
            meta.native_height
        ));
        self.ui_state.file_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Rebuild the viewer with `config`, reopening the current image.
    fn apply_config(&mut self, config: ViewerConfig) {
        self.view = LongView::new(config);
        self.viewport.reset();
        if let Some(path) = self.ui_state.file_path.clone() {
            if let Err(e) = self.open_image(&path) {
                self.ui_state.add_log(format!("ERROR: {e:#}"));
            }
        }
    }
}

impl eframe::App for LongviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);

        if self.show_about {
            egui::Window::new("About Longview")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Longview");
                        ui.label("Viewer for very tall images");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
