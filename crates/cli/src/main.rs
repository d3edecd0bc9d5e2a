mod cli;
mod client;
mod terminal;

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use beprod_core::config::TimerDefaults;
use beprod_timer::{PomodoroTimer, TimerSettings};

use crate::cli::{CliArgs, Command};
use crate::client::ApiClient;
use crate::terminal::Terminal;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    beprod_core::config::load_dotenv();
    let args = CliArgs::parse();
    let terminal = Terminal::new();
    let mut client = ApiClient::new(&args.server);

    match args.command {
        Command::Run {
            name,
            work,
            short_break,
            long_break,
            goal,
            long_every,
            no_sync,
        } => {
            let mut settings = TimerSettings::new(&TimerDefaults::from_env());
            if let Some(m) = work {
                settings.set_work_minutes(m);
            }
            if let Some(m) = short_break {
                settings.set_short_break_minutes(m);
            }
            if let Some(m) = long_break {
                settings.set_long_break_minutes(m);
            }
            if let Some(c) = goal {
                settings.set_goal_cycles(c);
            }
            if let Some(c) = long_every {
                settings.set_cycles_before_long_break(c);
            }

            let mut timer = PomodoroTimer::new(settings);
            timer.set_session_name(name);

            let sync = !no_sync;
            if sync {
                if client.health_check().await.is_err() {
                    warn!("server unreachable — sessions will not be recorded");
                } else if !client.is_logged_in() {
                    warn!("not logged in — run `beprod login` to record sessions");
                }
            }

            run_timer(&client, &terminal, &mut timer, sync).await?;
        }

        Command::History => {
            let sessions = client.list_sessions().await?;
            terminal.print_sessions(&sessions)?;
        }

        Command::Stats { days } => {
            let stats = client.daily_stats(days).await?;
            terminal.print_stats(&stats)?;
        }

        Command::Register { username, password } => {
            let user = client.register(&username, &password).await?;
            println!("Registered and logged in as {}", user.username);
        }

        Command::Login { username, password } => {
            let user = client.login(&username, &password).await?;
            println!("Logged in as {}", user.username);
        }

        Command::Logout => {
            client.logout().await?;
            println!("Logged out");
        }

        Command::Whoami => {
            let user = client.current_user().await?;
            println!("{} (id {})", user.username, user.id);
        }
    }

    Ok(())
}

/// Drive the state machine on a 1-second interval until the cycle goal is
/// reached or Ctrl+C. Completed phases are posted to the server; a failed
/// post is logged and the timer keeps running.
async fn run_timer(
    client: &ApiClient,
    terminal: &Terminal,
    timer: &mut PomodoroTimer,
    sync: bool,
) -> Result<()> {
    timer.start();
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
    // The first tick fires immediately; consume it so second one lands at +1s.
    interval.tick().await;

    loop {
        terminal.draw_status(timer)?;

        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("Stopped after {} completed cycles.", timer.completed_cycles());
                return Ok(());
            }
        }

        let Some(done) = timer.tick() else { continue };

        if sync {
            if let Err(e) = client.create_session(&done).await {
                warn!("failed to record session: {}", e);
            }
        }
        if let Some(note) = timer.take_notification() {
            terminal.print_notification(&note)?;
        }

        if done.session_type == beprod_core::SessionType::Work && timer.goal_reached() {
            println!(
                "Goal reached: {} work cycles. Well done!",
                timer.completed_cycles()
            );
            return Ok(());
        }
    }
}
