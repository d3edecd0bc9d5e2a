//! Pomodoro timer state machine.
//!
//! Pure countdown logic with no I/O: the owner drives [`PomodoroTimer::tick`]
//! once per second (a tokio interval in the CLI) and persists the
//! [`CompletedSession`] records it emits.

pub mod machine;
pub mod settings;

pub use machine::{Notification, NotificationKind, PomodoroTimer};
pub use settings::TimerSettings;
