//! Terminal rendering for the running timer and the history tables.

use std::io::{stdout, Write};

use anyhow::Result;
use beprod_core::SessionType;
use beprod_timer::{Notification, NotificationKind, PomodoroTimer};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, execute};

use crate::client::{DailyStatInfo, SessionRecordInfo};

const PROGRESS_WIDTH: usize = 24;

pub struct Terminal;

impl Terminal {
    pub fn new() -> Self {
        Self
    }

    fn phase_color(phase: SessionType) -> Color {
        match phase {
            SessionType::Work => Color::Red,
            SessionType::ShortBreak => Color::Green,
            SessionType::LongBreak => Color::Cyan,
        }
    }

    /// Redraw the single status line in place.
    pub fn draw_status(&self, timer: &PomodoroTimer) -> Result<()> {
        let filled = (timer.progress() * PROGRESS_WIDTH as f64).round() as usize;
        let filled = filled.min(PROGRESS_WIDTH);
        let bar = format!(
            "[{}{}]",
            "#".repeat(filled),
            "-".repeat(PROGRESS_WIDTH - filled)
        );

        execute!(
            stdout(),
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Self::phase_color(timer.phase())),
            Print(format!("{:<13}", timer.session_name())),
            ResetColor,
            Print(format!(
                " {} {} cycles: {}/{}",
                timer.formatted_remaining(),
                bar,
                timer.completed_cycles(),
                timer.settings().goal_cycles()
            )),
        )?;
        stdout().flush()?;
        Ok(())
    }

    /// Print a phase-transition notification on its own line.
    pub fn print_notification(&self, note: &Notification) -> Result<()> {
        let color = match note.kind {
            NotificationKind::Info => Color::Yellow,
            NotificationKind::Success => Color::Green,
        };
        execute!(
            stdout(),
            Print("\n"),
            SetForegroundColor(color),
            Print(format!("  {}\n", note.message)),
            ResetColor,
        )?;
        Ok(())
    }

    pub fn print_sessions(&self, sessions: &[SessionRecordInfo]) -> Result<()> {
        if sessions.is_empty() {
            println!("No sessions recorded yet.");
            return Ok(());
        }
        println!(
            "{:<20}  {:<12}  {:<20}  {:>8}  {}",
            "WHEN", "TYPE", "NAME", "MINUTES", "DONE"
        );
        for s in sessions {
            println!(
                "{:<20}  {:<12}  {:<20}  {:>8}  {}",
                s.created_at.format("%Y-%m-%d %H:%M"),
                s.session_type,
                truncate(&s.name, 20),
                s.duration_seconds / 60,
                if s.completed { "yes" } else { "no" }
            );
        }
        Ok(())
    }

    pub fn print_stats(&self, stats: &[DailyStatInfo]) -> Result<()> {
        if stats.is_empty() {
            println!("No activity in this window.");
            return Ok(());
        }
        println!(
            "{:<12}  {:>12}  {:>13}  {:>7}",
            "DAY", "WORK (MIN)", "BREAK (MIN)", "CYCLES"
        );
        for d in stats {
            println!(
                "{:<12}  {:>12}  {:>13}  {:>7}",
                d.day, d.work_minutes, d.break_minutes, d.completed_cycles
            );
        }
        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
