//! Timer duration and cycle settings with clamped setters.

use beprod_core::config::TimerDefaults;
use beprod_core::SessionType;
use serde::{Deserialize, Serialize};

/// Clamp bounds, in minutes (cycles for the last two).
pub const WORK_RANGE: (u32, u32) = (1, 60);
pub const SHORT_BREAK_RANGE: (u32, u32) = (1, 30);
pub const LONG_BREAK_RANGE: (u32, u32) = (5, 60);
pub const GOAL_CYCLES_RANGE: (u32, u32) = (1, 10);
pub const CYCLES_BEFORE_LONG_BREAK_RANGE: (u32, u32) = (1, 10);

fn clamp(value: u32, (lo, hi): (u32, u32)) -> u32 {
    value.clamp(lo, hi)
}

/// Per-user timer configuration. All mutation goes through the clamped
/// setters so an out-of-range value can never be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    work_minutes: u32,
    short_break_minutes: u32,
    long_break_minutes: u32,
    goal_cycles: u32,
    cycles_before_long_break: u32,
}

impl TimerSettings {
    pub fn new(defaults: &TimerDefaults) -> Self {
        Self {
            work_minutes: clamp(defaults.work_minutes, WORK_RANGE),
            short_break_minutes: clamp(defaults.short_break_minutes, SHORT_BREAK_RANGE),
            long_break_minutes: clamp(defaults.long_break_minutes, LONG_BREAK_RANGE),
            goal_cycles: clamp(defaults.goal_cycles, GOAL_CYCLES_RANGE),
            cycles_before_long_break: clamp(
                defaults.cycles_before_long_break,
                CYCLES_BEFORE_LONG_BREAK_RANGE,
            ),
        }
    }

    pub fn work_minutes(&self) -> u32 {
        self.work_minutes
    }

    pub fn short_break_minutes(&self) -> u32 {
        self.short_break_minutes
    }

    pub fn long_break_minutes(&self) -> u32 {
        self.long_break_minutes
    }

    pub fn goal_cycles(&self) -> u32 {
        self.goal_cycles
    }

    pub fn cycles_before_long_break(&self) -> u32 {
        self.cycles_before_long_break
    }

    pub fn set_work_minutes(&mut self, minutes: u32) {
        self.work_minutes = clamp(minutes, WORK_RANGE);
    }

    pub fn set_short_break_minutes(&mut self, minutes: u32) {
        self.short_break_minutes = clamp(minutes, SHORT_BREAK_RANGE);
    }

    pub fn set_long_break_minutes(&mut self, minutes: u32) {
        self.long_break_minutes = clamp(minutes, LONG_BREAK_RANGE);
    }

    pub fn set_goal_cycles(&mut self, cycles: u32) {
        self.goal_cycles = clamp(cycles, GOAL_CYCLES_RANGE);
    }

    pub fn set_cycles_before_long_break(&mut self, cycles: u32) {
        self.cycles_before_long_break = clamp(cycles, CYCLES_BEFORE_LONG_BREAK_RANGE);
    }

    /// Full duration of a phase, in seconds.
    pub fn duration_seconds(&self, phase: SessionType) -> u32 {
        let minutes = match phase {
            SessionType::Work => self.work_minutes,
            SessionType::ShortBreak => self.short_break_minutes,
            SessionType::LongBreak => self.long_break_minutes,
        };
        minutes * 60
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self::new(&TimerDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_classic_pomodoro() {
        let s = TimerSettings::default();
        assert_eq!(s.work_minutes(), 25);
        assert_eq!(s.short_break_minutes(), 5);
        assert_eq!(s.long_break_minutes(), 15);
        assert_eq!(s.goal_cycles(), 4);
        assert_eq!(s.cycles_before_long_break(), 4);
    }

    #[test]
    fn setters_clamp_to_bounds() {
        let mut s = TimerSettings::default();
        s.set_work_minutes(0);
        assert_eq!(s.work_minutes(), 1);
        s.set_work_minutes(90);
        assert_eq!(s.work_minutes(), 60);
        s.set_short_break_minutes(45);
        assert_eq!(s.short_break_minutes(), 30);
        s.set_long_break_minutes(1);
        assert_eq!(s.long_break_minutes(), 5);
        s.set_goal_cycles(0);
        assert_eq!(s.goal_cycles(), 1);
        s.set_cycles_before_long_break(99);
        assert_eq!(s.cycles_before_long_break(), 10);
    }

    #[test]
    fn out_of_range_env_defaults_are_clamped() {
        let defaults = TimerDefaults {
            work_minutes: 500,
            short_break_minutes: 0,
            long_break_minutes: 2,
            goal_cycles: 11,
            cycles_before_long_break: 0,
        };
        let s = TimerSettings::new(&defaults);
        assert_eq!(s.work_minutes(), 60);
        assert_eq!(s.short_break_minutes(), 1);
        assert_eq!(s.long_break_minutes(), 5);
        assert_eq!(s.goal_cycles(), 10);
        assert_eq!(s.cycles_before_long_break(), 1);
    }

    #[test]
    fn duration_seconds_per_phase() {
        let s = TimerSettings::default();
        assert_eq!(s.duration_seconds(SessionType::Work), 1500);
        assert_eq!(s.duration_seconds(SessionType::ShortBreak), 300);
        assert_eq!(s.duration_seconds(SessionType::LongBreak), 900);
    }
}
