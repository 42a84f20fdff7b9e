use crate::config::GestureConfig;
use crate::gesture::velocity::VelocityTracker;
use crate::gesture::{GestureEvent, PointerEvent};

#[derive(Clone, Copy, Debug)]
struct Press {
    down_x: f32,
    down_y: f32,
    down_time_ms: u64,
    last_x: f32,
    last_y: f32,
    /// Still within touch slop of the down position.
    in_tap_region: bool,
    show_press_sent: bool,
    long_pressed: bool,
}

/// Single-pointer gesture recogniser.
///
/// Time-based gestures (show-press, long-press) have no timer of their own:
/// they are reported on the next pointer event or [`GestureDetector::poll`]
/// after their timeout elapses.
#[derive(Clone, Debug, Default)]
pub struct GestureDetector {
    config: GestureConfig,
    tracker: VelocityTracker,
    press: Option<Press>,
}

impl GestureDetector {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            tracker: VelocityTracker::new(),
            press: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// True between a down and the matching up or cancel.
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn on_event(&mut self, event: PointerEvent) -> Vec<GestureEvent> {
        match event {
            PointerEvent::Down { x, y, time_ms } => self.on_down(x, y, time_ms),
            PointerEvent::Move { x, y, time_ms } => self.on_move(x, y, time_ms),
            PointerEvent::Up { x, y, time_ms } => self.on_up(x, y, time_ms),
            PointerEvent::Cancel { .. } => {
                self.press = None;
                self.tracker.clear();
                Vec::new()
            }
        }
    }

    /// Report show-press / long-press whose timeout elapsed by `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        self.timed_gestures(now_ms, &mut events);
        events
    }

    fn on_down(&mut self, x: f32, y: f32, time_ms: u64) -> Vec<GestureEvent> {
        self.tracker.clear();
        self.tracker.add(x, y, time_ms);
        self.press = Some(Press {
            down_x: x,
            down_y: y,
            down_time_ms: time_ms,
            last_x: x,
            last_y: y,
            in_tap_region: true,
            show_press_sent: false,
            long_pressed: false,
        });
        vec![GestureEvent::Down]
    }

    fn on_move(&mut self, x: f32, y: f32, time_ms: u64) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        self.timed_gestures(time_ms, &mut events);
        self.tracker.add(x, y, time_ms);

        let slop = self.config.touch_slop;
        let Some(press) = self.press.as_mut() else {
            return events;
        };
        if press.long_pressed {
            return events;
        }

        let distance_x = press.last_x - x;
        let distance_y = press.last_y - y;
        if press.in_tap_region {
            let dx = x - press.down_x;
            let dy = y - press.down_y;
            if dx * dx + dy * dy > slop * slop {
                press.in_tap_region = false;
                events.push(GestureEvent::Scroll {
                    distance_x,
                    distance_y,
                });
                press.last_x = x;
                press.last_y = y;
            }
        } else if distance_x != 0.0 || distance_y != 0.0 {
            events.push(GestureEvent::Scroll {
                distance_x,
                distance_y,
            });
            press.last_x = x;
            press.last_y = y;
        }
        events
    }

    fn on_up(&mut self, x: f32, y: f32, time_ms: u64) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        self.timed_gestures(time_ms, &mut events);
        self.tracker.add(x, y, time_ms);

        let Some(press) = self.press.take() else {
            return events;
        };
        if press.long_pressed {
            return events;
        }

        if press.in_tap_region {
            events.push(GestureEvent::SingleTapUp);
        } else {
            let (velocity_x, velocity_y) = self.tracker.velocity(self.config.max_fling_velocity);
            let min = self.config.min_fling_velocity;
            if velocity_x.abs() >= min || velocity_y.abs() >= min {
                events.push(GestureEvent::Fling {
                    velocity_x,
                    velocity_y,
                });
            }
        }
        self.tracker.clear();
        events
    }

    fn timed_gestures(&mut self, now_ms: u64, events: &mut Vec<GestureEvent>) {
        let Some(press) = self.press.as_mut() else {
            return;
        };
        if !press.in_tap_region {
            return;
        }
        let held = now_ms.saturating_sub(press.down_time_ms);

        if !press.show_press_sent && held >= self.config.tap_timeout_ms {
            press.show_press_sent = true;
            events.push(GestureEvent::ShowPress);
        }
        if self.config.long_press_enabled
            && !press.long_pressed
            && held >= self.config.long_press_timeout_ms
        {
            press.long_pressed = true;
            events.push(GestureEvent::LongPress);
        }
    }
}
