use clap::{Parser, Subcommand};

/// Terminal Pomodoro timer for BeProd.
///
/// Runs the countdown locally and syncs completed sessions to the
/// BeProd server.
#[derive(Parser, Debug)]
#[command(name = "beprod", about = "Pomodoro timer with server-side history")]
pub struct CliArgs {
    /// BeProd server URL
    #[arg(long, env = "BEPROD_SERVER", default_value = "http://localhost:3001")]
    pub server: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the timer until the cycle goal is reached (Ctrl+C to stop)
    Run {
        /// Label attached to recorded work sessions
        #[arg(long, default_value = "Work Session")]
        name: String,

        /// Work phase length in minutes (1-60)
        #[arg(long)]
        work: Option<u32>,

        /// Short break length in minutes (1-30)
        #[arg(long)]
        short_break: Option<u32>,

        /// Long break length in minutes (5-60)
        #[arg(long)]
        long_break: Option<u32>,

        /// Daily goal in completed work cycles (1-10)
        #[arg(long)]
        goal: Option<u32>,

        /// Work cycles between long breaks (1-10)
        #[arg(long)]
        long_every: Option<u32>,

        /// Keep the timer local; don't post sessions to the server
        #[arg(long)]
        no_sync: bool,
    },

    /// Print recorded sessions, newest first
    History,

    /// Print per-day work/break totals
    Stats {
        /// Window size in days
        #[arg(long, default_value = "7")]
        days: u32,
    },

    /// Create an account and log in
    Register {
        #[arg(long)]
        username: String,

        #[arg(long, env = "BEPROD_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in to an existing account
    Login {
        #[arg(long)]
        username: String,

        #[arg(long, env = "BEPROD_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,
}
