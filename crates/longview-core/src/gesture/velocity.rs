use std::collections::VecDeque;

use crate::consts::{VELOCITY_MAX_SAMPLES, VELOCITY_WINDOW_MS};

#[derive(Clone, Copy, Debug)]
struct Sample {
    x: f32,
    y: f32,
    time_ms: u64,
}

/// Estimates pointer velocity from recent samples with a least-squares line fit.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    samples: VecDeque<Sample>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn add(&mut self, x: f32, y: f32, time_ms: u64) {
        if self.samples.len() == VELOCITY_MAX_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample { x, y, time_ms });
    }

    /// Velocity in pixels/second over the last [`VELOCITY_WINDOW_MS`], each axis
    /// clamped to `±max`. Zero with fewer than two usable samples.
    pub fn velocity(&self, max: f32) -> (f32, f32) {
        let Some(last) = self.samples.back() else {
            return (0.0, 0.0);
        };
        let recent: Vec<&Sample> = self
            .samples
            .iter()
            .filter(|s| last.time_ms.saturating_sub(s.time_ms) <= VELOCITY_WINDOW_MS)
            .collect();
        if recent.len() < 2 {
            return (0.0, 0.0);
        }

        let n = recent.len() as f64;
        let origin = recent[0].time_ms;
        let t: Vec<f64> = recent
            .iter()
            .map(|s| s.time_ms.saturating_sub(origin) as f64 / 1000.0)
            .collect();
        let t_mean = t.iter().sum::<f64>() / n;
        let denom: f64 = t.iter().map(|ti| (ti - t_mean).powi(2)).sum();
        if denom <= f64::EPSILON {
            return (0.0, 0.0);
        }

        let slope = |value: fn(&Sample) -> f32| -> f32 {
            let mean = recent.iter().map(|s| value(s) as f64).sum::<f64>() / n;
            let num: f64 = recent
                .iter()
                .zip(&t)
                .map(|(s, ti)| (ti - t_mean) * (value(s) as f64 - mean))
                .sum();
            ((num / denom) as f32).clamp(-max, max)
        };

        (slope(|s| s.x), slope(|s| s.y))
    }
}
