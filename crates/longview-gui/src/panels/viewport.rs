use std::time::Duration;

use longview_core::buffer::PixelBuffer;
use longview_core::gesture::{Invalidation, PointerEvent};
use longview_core::render::{Canvas, ScaleTransform};

use crate::app::LongviewApp;
use crate::convert::buffer_to_color_image;
use crate::state::ViewportState;

/// Repaint cadence while a press is held, so long-press is noticed without input.
const PRESS_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Canvas that uploads each painted frame into the panel texture.
///
/// The viewer works in physical pixels; egui lays out in points.
struct TextureCanvas<'a> {
    ctx: &'a egui::Context,
    state: &'a mut ViewportState,
    pixels_per_point: f32,
}

impl Canvas for TextureCanvas<'_> {
    fn size(&self) -> (u32, u32) {
        self.state.measured.map_or((0, 0), |[w, h]| (w, h))
    }

    fn draw_buffer(&mut self, buffer: &PixelBuffer, transform: ScaleTransform) {
        let image = buffer_to_color_image(buffer);
        match self.state.texture.as_mut() {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.state.texture = Some(self.ctx.load_texture(
                    "viewport",
                    image,
                    egui::TextureOptions::LINEAR,
                ));
            }
        }
        let (w, h) = transform.apply(buffer.width() as f32, buffer.height() as f32);
        self.state.paint_size = Some(egui::vec2(w, h) / self.pixels_per_point);
    }
}

pub fn show(ctx: &egui::Context, app: &mut LongviewApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        if !app.view.has_image() {
            show_placeholder(ui);
            return;
        }

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let ppp = ctx.pixels_per_point();

        measure(app, rect, ppp);

        let mut invalidation = handle_pointer(ui, app, rect, ppp);
        invalidation = invalidation.merge(handle_wheel(ui, &response, app, ppp));

        if app.viewport.pointer_down {
            let now_ms = ui.input(|i| (i.time * 1000.0) as u64);
            invalidation = invalidation.merge(app.view.poll_gestures(now_ms));
            ctx.request_repaint_after(PRESS_POLL_INTERVAL);
        }
        if app.view.is_animating() {
            invalidation = invalidation.merge(app.view.on_animation_tick());
        }

        if invalidation.needs_redraw() {
            app.viewport.dirty = true;
        }
        if invalidation == Invalidation::Animate {
            ctx.request_repaint();
        }

        if app.viewport.dirty {
            let mut canvas = TextureCanvas {
                ctx,
                state: &mut app.viewport,
                pixels_per_point: ppp,
            };
            let outcome = app.view.on_draw(&mut canvas);
            app.viewport.last_outcome = Some(outcome);
            app.viewport.dirty = false;
        }

        draw_image(ui, rect, &app.viewport);
    });
}

/// Forward the panel size to the layout hook when it changes.
fn measure(app: &mut LongviewApp, rect: egui::Rect, ppp: f32) {
    let size = [
        (rect.width() * ppp).round() as u32,
        (rect.height() * ppp).round() as u32,
    ];
    if app.viewport.measured != Some(size) {
        app.view.on_measure(size[0], size[1]);
        app.viewport.measured = Some(size);
        app.viewport.dirty = true;
    }
}

/// Translate this pass's primary-button pointer events into viewer pointer events.
fn handle_pointer(ui: &egui::Ui, app: &mut LongviewApp, rect: egui::Rect, ppp: f32) -> Invalidation {
    let (events, time) = ui.input(|i| (i.events.clone(), i.time));
    let time_ms = (time * 1000.0) as u64;
    let local = |pos: egui::Pos2| (pos - rect.min) * ppp;

    let mut invalidation = Invalidation::None;
    for event in events {
        let pointer = match event {
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: true,
                ..
            } if rect.contains(pos) => {
                app.viewport.pointer_down = true;
                let p = local(pos);
                Some(PointerEvent::Down {
                    x: p.x,
                    y: p.y,
                    time_ms,
                })
            }
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed: false,
                ..
            } if app.viewport.pointer_down => {
                app.viewport.pointer_down = false;
                let p = local(pos);
                Some(PointerEvent::Up {
                    x: p.x,
                    y: p.y,
                    time_ms,
                })
            }
            egui::Event::PointerMoved(pos) if app.viewport.pointer_down => {
                let p = local(pos);
                Some(PointerEvent::Move {
                    x: p.x,
                    y: p.y,
                    time_ms,
                })
            }
            egui::Event::PointerGone if app.viewport.pointer_down => {
                app.viewport.pointer_down = false;
                Some(PointerEvent::Cancel { time_ms })
            }
            _ => None,
        };
        if let Some(pointer) = pointer {
            invalidation = invalidation.merge(app.view.on_pointer(pointer));
        }
    }
    invalidation
}

fn handle_wheel(ui: &egui::Ui, response: &egui::Response, app: &mut LongviewApp, ppp: f32) -> Invalidation {
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return Invalidation::None;
    }
    // egui reports content motion; the viewer wants window motion.
    app.view.scroll_by(-scroll_delta * ppp)
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn draw_image(ui: &egui::Ui, rect: egui::Rect, state: &ViewportState) {
    let (Some(texture), Some(size)) = (state.texture.as_ref(), state.paint_size) else {
        return;
    };
    ui.painter().image(
        texture.id(),
        egui::Rect::from_min_size(rect.min, size),
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open a tall image to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
