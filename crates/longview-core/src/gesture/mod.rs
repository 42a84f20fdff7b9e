//! Pointer input classification and dispatch.
//!
//! [`GestureDetector`] turns raw [`PointerEvent`]s into [`GestureEvent`]s;
//! [`GestureRouter`] applies each gesture to the viewport and fling state.

pub mod detector;
pub mod router;
pub mod velocity;

pub use detector::GestureDetector;
pub use router::GestureRouter;
pub use velocity::VelocityTracker;

/// Raw single-pointer input as delivered by the host, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32, time_ms: u64 },
    Move { x: f32, y: f32, time_ms: u64 },
    Up { x: f32, y: f32, time_ms: u64 },
    Cancel { time_ms: u64 },
}

impl PointerEvent {
    pub fn time_ms(&self) -> u64 {
        match *self {
            PointerEvent::Down { time_ms, .. }
            | PointerEvent::Move { time_ms, .. }
            | PointerEvent::Up { time_ms, .. }
            | PointerEvent::Cancel { time_ms } => time_ms,
        }
    }
}

/// Semantic gestures recognised from a pointer stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Down,
    /// Pressed and held still for the tap timeout.
    ShowPress,
    SingleTapUp,
    LongPress,
    /// Distance moved since the previous scroll, `previous - current`, so a
    /// finger moving up yields a positive `distance_y`.
    Scroll { distance_x: f32, distance_y: f32 },
    /// Release velocity in pixels/second; positive `velocity_y` is a downward finger.
    Fling { velocity_x: f32, velocity_y: f32 },
}

/// What the host should do after an input or animation callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Invalidation {
    #[default]
    None,
    /// Draw one more frame.
    Redraw,
    /// Draw and keep delivering animation ticks.
    Animate,
}

impl Invalidation {
    /// The stronger of two requests.
    pub fn merge(self, other: Invalidation) -> Invalidation {
        self.max(other)
    }

    pub fn needs_redraw(self) -> bool {
        self != Invalidation::None
    }
}
