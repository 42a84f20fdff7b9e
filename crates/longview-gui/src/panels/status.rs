use longview_core::render::FrameOutcome;

use crate::app::LongviewApp;

pub fn show(ctx: &egui::Context, app: &mut LongviewApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area: fixed height for 3 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..3 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            let viewport = app.view.viewport();
            if let Some(meta) = viewport.metadata() {
                ui.label(format!("{}x{}", meta.native_width, meta.native_height));
                ui.separator();
            }
            if let Some(scale) = viewport.current_scale() {
                ui.label(format!("Scale: {:.0}%", scale * 100.0));
                ui.separator();
                let rect = viewport.current_source_rect();
                let native_height = viewport.metadata().map_or(0, |m| m.native_height);
                ui.label(format!("Rows {}..{} of {}", rect.top, rect.bottom, native_height));
                ui.separator();
            }
            ui.label(format!("Format: {}", app.view.config().pixel_format));
            if app.viewport.last_outcome == Some(FrameOutcome::Skipped) {
                ui.separator();
                ui.colored_label(egui::Color32::YELLOW, "Frame skipped");
            }
        });

        ui.add_space(2.0);
    });
}
