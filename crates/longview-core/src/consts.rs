/// Minimum pixel count (w*h) of a paint target to fill rows in parallel with Rayon.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default fling deceleration in pixels/second².
pub const DEFAULT_DECELERATION: f32 = 2000.0;

/// Default animation frame interval in milliseconds (~60 Hz).
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 16;

/// Flings slower than this (pixels/second) never start a simulation.
pub const DEFAULT_MIN_PHYSICS_VELOCITY: f32 = 50.0;

/// Distance in pixels a pointer may wander before a press becomes a scroll.
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;

/// Minimum release velocity (pixels/second) recognised as a fling.
pub const DEFAULT_MIN_FLING_VELOCITY: f32 = 50.0;

/// Release velocities are capped to this magnitude (pixels/second).
pub const DEFAULT_MAX_FLING_VELOCITY: f32 = 8000.0;

/// Time a press must be held still before it is reported as a show-press.
pub const DEFAULT_TAP_TIMEOUT_MS: u64 = 100;

/// Time a press must be held still before it is reported as a long-press.
pub const DEFAULT_LONG_PRESS_TIMEOUT_MS: u64 = 500;

/// Only pointer samples this recent contribute to the release velocity.
pub const VELOCITY_WINDOW_MS: u64 = 100;

/// Upper bound on the pointer samples kept by the velocity tracker.
pub const VELOCITY_MAX_SAMPLES: usize = 20;
