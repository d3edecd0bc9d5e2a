//! The countdown state machine: phase transitions, cycle counting, and
//! notification triggering.

use beprod_core::{CompletedSession, SessionType};
use serde::{Deserialize, Serialize};

use crate::settings::TimerSettings;

/// Notification severity, mirrored in the UI banner styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Work is starting — time to focus.
    Info,
    /// A break is starting.
    Success,
}

/// A phase-transition notice, held until the owner takes or dismisses it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    fn for_phase(next: SessionType) -> Self {
        let (message, kind) = match next {
            SessionType::Work => ("Work time! Focus on your task.", NotificationKind::Info),
            SessionType::ShortBreak => ("Break time! Take a short rest.", NotificationKind::Success),
            SessionType::LongBreak => {
                ("Long break time! Take a good rest.", NotificationKind::Success)
            }
        };
        Self {
            message: message.to_string(),
            kind,
        }
    }
}

/// The Pomodoro countdown.
///
/// Owns no clock: call [`tick`](Self::tick) once per second while running.
/// Each completed phase yields a [`CompletedSession`] for persistence and
/// leaves a [`Notification`] describing the phase that just started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroTimer {
    running: bool,
    phase: SessionType,
    session_name: String,
    remaining_seconds: u32,
    completed_cycles: u32,
    settings: TimerSettings,
    notification: Option<Notification>,
}

impl PomodoroTimer {
    pub fn new(settings: TimerSettings) -> Self {
        let remaining = settings.duration_seconds(SessionType::Work);
        Self {
            running: false,
            phase: SessionType::Work,
            session_name: SessionType::Work.default_label().to_string(),
            remaining_seconds: remaining,
            completed_cycles: 0,
            settings,
            notification: None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> SessionType {
        self.phase
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// True once the daily goal has been met.
    pub fn goal_reached(&self) -> bool {
        self.completed_cycles >= self.settings.goal_cycles()
    }

    /// Fraction of the current phase already elapsed, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let total = self.settings.duration_seconds(self.phase);
        if total == 0 {
            return 0.0;
        }
        1.0 - f64::from(self.remaining_seconds) / f64::from(total)
    }

    /// Remaining time as `MM:SS`.
    pub fn formatted_remaining(&self) -> String {
        let minutes = self.remaining_seconds / 60;
        let seconds = self.remaining_seconds % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    // ── Control ───────────────────────────────────────────────────

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Stop and return to a fresh work phase with zero completed cycles.
    pub fn reset(&mut self) {
        self.running = false;
        self.phase = SessionType::Work;
        self.session_name = SessionType::Work.default_label().to_string();
        self.remaining_seconds = self.settings.duration_seconds(SessionType::Work);
        self.completed_cycles = 0;
        self.notification = None;
    }

    pub fn set_session_name(&mut self, name: impl Into<String>) {
        self.session_name = name.into();
    }

    /// Take the pending phase-transition notification, if any.
    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    // ── Settings (restart the countdown when the active phase changes) ──

    pub fn set_work_minutes(&mut self, minutes: u32) {
        self.settings.set_work_minutes(minutes);
        self.sync_remaining_if_phase(SessionType::Work);
    }

    pub fn set_short_break_minutes(&mut self, minutes: u32) {
        self.settings.set_short_break_minutes(minutes);
        self.sync_remaining_if_phase(SessionType::ShortBreak);
    }

    pub fn set_long_break_minutes(&mut self, minutes: u32) {
        self.settings.set_long_break_minutes(minutes);
        self.sync_remaining_if_phase(SessionType::LongBreak);
    }

    pub fn set_goal_cycles(&mut self, cycles: u32) {
        self.settings.set_goal_cycles(cycles);
    }

    pub fn set_cycles_before_long_break(&mut self, cycles: u32) {
        self.settings.set_cycles_before_long_break(cycles);
    }

    fn sync_remaining_if_phase(&mut self, phase: SessionType) {
        if self.phase == phase {
            self.remaining_seconds = self.settings.duration_seconds(phase);
        }
    }

    // ── The tick ──────────────────────────────────────────────────

    /// Advance the countdown by one second.
    ///
    /// Returns a [`CompletedSession`] when this tick finished a phase; the
    /// timer is then already in the next phase with a full countdown and a
    /// pending notification.
    pub fn tick(&mut self) -> Option<CompletedSession> {
        if !self.running {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return None;
        }

        Some(self.finish_phase())
    }

    fn finish_phase(&mut self) -> CompletedSession {
        let finished = CompletedSession {
            session_type: self.phase,
            name: self.session_name.clone(),
            duration_seconds: self.settings.duration_seconds(self.phase),
            completed: true,
        };

        if self.phase == SessionType::Work {
            self.completed_cycles += 1;
        }

        let next = self.next_phase();
        self.phase = next;
        self.session_name = next.default_label().to_string();
        self.remaining_seconds = self.settings.duration_seconds(next);
        self.notification = Some(Notification::for_phase(next));

        finished
    }

    /// After work: a break (long every `cycles_before_long_break` cycles).
    /// After any break: work.
    fn next_phase(&self) -> SessionType {
        match self.phase {
            SessionType::Work => {
                if self.completed_cycles % self.settings.cycles_before_long_break() == 0 {
                    SessionType::LongBreak
                } else {
                    SessionType::ShortBreak
                }
            }
            SessionType::ShortBreak | SessionType::LongBreak => SessionType::Work,
        }
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}
