use crate::gesture::{GestureEvent, Invalidation};
use crate::physics::ScrollPhysics;
use crate::viewport::ViewportModel;

/// Applies recognised gestures to the viewport and fling simulation.
///
/// Only the vertical axis scrolls; horizontal components are dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureRouter;

impl GestureRouter {
    pub fn new() -> Self {
        Self
    }

    pub fn route(
        &self,
        event: GestureEvent,
        viewport: &mut ViewportModel,
        physics: &mut ScrollPhysics,
    ) -> Invalidation {
        match event {
            GestureEvent::Down => self.on_down(physics),
            GestureEvent::Scroll { distance_y, .. } => self.on_scroll(distance_y, viewport),
            GestureEvent::Fling { velocity_y, .. } => self.on_fling(velocity_y, viewport, physics),
            // Recognised so the stream classifies correctly, but they do nothing here.
            GestureEvent::ShowPress | GestureEvent::SingleTapUp | GestureEvent::LongPress => {
                Invalidation::None
            }
        }
    }

    /// A new touch cancels any fling in flight.
    pub fn on_down(&self, physics: &mut ScrollPhysics) -> Invalidation {
        if physics.is_active() {
            physics.stop();
        }
        Invalidation::None
    }

    pub fn on_scroll(&self, distance_y: f32, viewport: &mut ViewportModel) -> Invalidation {
        if !viewport.is_ready() {
            return Invalidation::None;
        }
        viewport.scroll_by(distance_y);
        Invalidation::Redraw
    }

    /// Positive `velocity_y` is a downward finger, which pulls the window up,
    /// so the simulation runs on the negated velocity.
    pub fn on_fling(
        &self,
        velocity_y: f32,
        viewport: &ViewportModel,
        physics: &mut ScrollPhysics,
    ) -> Invalidation {
        if !viewport.is_ready() {
            return Invalidation::None;
        }
        let top = viewport.current_source_rect().top;
        physics.start(top, -velocity_y, 0, viewport.max_top());
        if physics.is_active() {
            Invalidation::Animate
        } else {
            Invalidation::None
        }
    }
}
