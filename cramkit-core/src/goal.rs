//! Daily study-goal model. The one-minute tick cadence belongs to whoever
//! drives this (a TUI loop, a timer task); the model only accumulates minutes
//! and auto-pauses at the target, so tearing the driver down is always enough
//! to stop the clock.

use serde::{Deserialize, Serialize};

pub const TARGET_MIN_MINUTES: u32 = 15;
pub const TARGET_MAX_MINUTES: u32 = 480;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StudyGoal {
    studied_minutes: u32,
    target_minutes: u32,
    running: bool,
}

impl StudyGoal {
    pub fn new(target_minutes: u32) -> Self {
        Self {
            studied_minutes: 0,
            target_minutes: target_minutes.clamp(TARGET_MIN_MINUTES, TARGET_MAX_MINUTES),
            running: false,
        }
    }

    pub fn studied_minutes(&self) -> u32 {
        self.studied_minutes
    }

    pub fn target_minutes(&self) -> u32 {
        self.target_minutes
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.studied_minutes = 0;
    }

    /// One minute of study time. Ignored while paused; reaching the target
    /// pauses automatically.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.studied_minutes += 1;
        if self.studied_minutes >= self.target_minutes {
            self.running = false;
        }
    }

    /// Nudge the target by `delta` minutes; changes that would leave the
    /// [15, 480] range are ignored.
    pub fn adjust_target(&mut self, delta: i32) {
        let next = self.target_minutes as i64 + delta as i64;
        if (TARGET_MIN_MINUTES as i64..=TARGET_MAX_MINUTES as i64).contains(&next) {
            self.target_minutes = next as u32;
        }
    }

    pub fn progress_percent(&self) -> u8 {
        let pct = (self.studied_minutes as f32 / self.target_minutes as f32) * 100.0;
        pct.round().min(100.0) as u8
    }
}

/// "2h 15m" style rendering used by the dashboard widgets.
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_only_counts_while_running() {
        let mut goal = StudyGoal::new(30);
        goal.tick();
        assert_eq!(goal.studied_minutes(), 0);
        goal.start();
        goal.tick();
        assert_eq!(goal.studied_minutes(), 1);
    }

    #[test]
    fn reaching_target_pauses() {
        let mut goal = StudyGoal::new(15);
        goal.start();
        for _ in 0..15 {
            goal.tick();
        }
        assert!(!goal.is_running());
        assert_eq!(goal.progress_percent(), 100);
        // extra ticks are ignored once paused
        goal.tick();
        assert_eq!(goal.studied_minutes(), 15);
    }

    #[test]
    fn target_adjustment_is_bounded() {
        let mut goal = StudyGoal::new(30);
        goal.adjust_target(-30);
        assert_eq!(goal.target_minutes(), 30);
        goal.adjust_target(-15);
        assert_eq!(goal.target_minutes(), 15);
        goal.adjust_target(i32::MAX);
        assert_eq!(goal.target_minutes(), 15);
    }

    #[test]
    fn formats_study_time() {
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(120), "2h");
        assert_eq!(format_minutes(135), "2h 15m");
    }
}
