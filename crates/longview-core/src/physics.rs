//! One-dimensional fling simulation with constant deceleration.
//!
//! `start` converts a release velocity into a motion that slows at a fixed
//! rate until it stops or reaches a bound. Each `tick` advances simulated time
//! by one frame interval, so the trajectory depends only on the tick count.
//!
//! Positions follow the rounded continuous curve, but each step is capped by
//! the previous one and is at least one pixel, so per-tick displacement never
//! grows and every fling lands in a bounded number of ticks.

use crate::config::PhysicsConfig;

/// Parameters and progress of one fling.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollState {
    start_y: i32,
    /// Signed initial velocity in pixels/second.
    velocity: f32,
    min_y: i32,
    max_y: i32,
    /// Where the fling comes to rest, already clamped to `[min_y, max_y]`.
    final_y: i32,
    duration_ms: f64,
    elapsed_ms: f64,
    /// Position at `start`, clamped to the bounds.
    origin_y: i32,
    current_y: i32,
    /// Pixels covered so far, measured from `origin_y`.
    travelled: i64,
    last_step: i64,
}

impl ScrollState {
    pub fn start_y(&self) -> i32 {
        self.start_y
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.min_y, self.max_y)
    }

    pub fn final_y(&self) -> i32 {
        self.final_y
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn current_y(&self) -> i32 {
        self.current_y
    }

    fn total(&self) -> i64 {
        (self.final_y as i64 - self.origin_y as i64).abs()
    }

    /// Distance along the continuous curve after `elapsed_ms`.
    fn distance_at(&self, elapsed_ms: f64, deceleration: f32) -> f64 {
        let t = elapsed_ms.min(self.duration_ms) / 1000.0;
        let speed = self.velocity.abs() as f64;
        speed * t - 0.5 * deceleration as f64 * t * t
    }

    /// Move one frame. Returns true once the resting position is reached.
    fn advance(&mut self, interval_ms: f64, deceleration: f32) -> bool {
        self.elapsed_ms += interval_ms;
        let total = self.total();
        let target = (self.distance_at(self.elapsed_ms, deceleration).round() as i64).clamp(0, total);
        let remaining = total - self.travelled;

        let step = (target - self.travelled)
            .clamp(1, self.last_step.max(1))
            .min(remaining);
        self.travelled += step;
        self.last_step = step;

        let sign = if self.velocity < 0.0 { -1 } else { 1 };
        self.current_y = (self.origin_y as i64 + sign * self.travelled) as i32;
        self.travelled == total
    }
}

#[derive(Clone, Debug, Default)]
pub struct ScrollPhysics {
    config: PhysicsConfig,
    state: Option<ScrollState>,
    last_y: Option<i32>,
}

impl ScrollPhysics {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            state: None,
            last_y: None,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Begin a fling from `start_y`. Positive velocity increases the position.
    ///
    /// Any running fling is replaced. Velocities below the configured minimum
    /// leave the simulation idle.
    pub fn start(&mut self, start_y: i32, initial_velocity_y: f32, min_y: i32, max_y: i32) {
        self.state = None;
        self.last_y = Some(start_y);

        let deceleration = self.config.deceleration;
        if !initial_velocity_y.is_finite()
            || initial_velocity_y.abs() < self.config.min_velocity
            || !(deceleration.is_finite() && deceleration > 0.0)
        {
            tracing::debug!(velocity = initial_velocity_y, "Fling too slow, ignored");
            return;
        }

        let max_y = max_y.max(min_y);
        let speed = initial_velocity_y.abs() as f64;
        let duration_ms = speed / deceleration as f64 * 1000.0;
        let distance = (speed * speed / (2.0 * deceleration as f64)).copysign(initial_velocity_y as f64);
        let final_y = ((start_y as f64 + distance).round() as i32).clamp(min_y, max_y);
        let current_y = start_y.clamp(min_y, max_y);

        if final_y == current_y {
            tracing::debug!(start_y, "Fling has nowhere to go");
            return;
        }

        tracing::debug!(
            start_y,
            velocity = initial_velocity_y,
            final_y,
            duration_ms,
            "Fling started"
        );
        self.state = Some(ScrollState {
            start_y,
            velocity: initial_velocity_y,
            min_y,
            max_y,
            final_y,
            duration_ms,
            elapsed_ms: 0.0,
            origin_y: current_y,
            current_y,
            travelled: 0,
            last_step: i64::MAX,
        });
    }

    /// Halt the fling where it is. Does nothing when idle.
    pub fn stop(&mut self) {
        if let Some(state) = self.state.take() {
            tracing::debug!(at = state.current_y, "Fling stopped");
        }
    }

    /// Advance one frame. `Some(position)` while moving, including the frame
    /// that lands on the resting position; `None` once finished or stopped.
    pub fn tick(&mut self) -> Option<i32> {
        let deceleration = self.config.deceleration;
        // A zero interval would never advance simulated time.
        let interval = self.config.frame_interval_ms.max(1) as f64;
        let state = self.state.as_mut()?;

        let done = state.advance(interval, deceleration);
        let position = state.current_y;
        self.last_y = Some(position);

        if done {
            tracing::debug!(final_y = position, "Fling settled");
            self.state = None;
        }
        Some(position)
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&ScrollState> {
        self.state.as_ref()
    }

    /// Most recent position produced by `start` or `tick`.
    pub fn current_y(&self) -> Option<i32> {
        self.last_y
    }

    /// Resting position of the running fling.
    pub fn final_y(&self) -> Option<i32> {
        self.state.as_ref().map(|s| s.final_y)
    }

    /// Instantaneous signed velocity of the running fling, pixels/second.
    pub fn velocity(&self) -> f32 {
        self.state.as_ref().map_or(0.0, |s| {
            let t = (s.elapsed_ms.min(s.duration_ms) / 1000.0) as f32;
            let speed = (s.velocity.abs() - self.config.deceleration * t).max(0.0);
            speed.copysign(s.velocity)
        })
    }
}
