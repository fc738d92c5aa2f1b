use clap::{Parser, Subcommand};

/// Inspect cron schedules: when they fire, and when they stop matching.
///
/// Expressions without a `TZ=` prefix are evaluated in `--tz`
/// (or `STUPID_CRON_TZ`, or UTC).
#[derive(Parser, Debug)]
#[command(name = "stupid-cron", about = "Cron activation and inactivity search")]
pub struct CliArgs {
    /// Parse 6-field expressions with a leading seconds field
    #[arg(long, global = true)]
    pub seconds: bool,

    /// IANA timezone used for reference instants and output
    #[arg(long, global = true)]
    pub tz: Option<String>,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upcoming activation times
    Next {
        /// Cron expression
        expr: String,
        /// Reference instant (RFC 3339, default: now)
        #[arg(long)]
        from: Option<String>,
        /// Number of activations to list
        #[arg(long, default_value = "1")]
        count: usize,
    },
    /// First second after the reference at which the schedule is inactive
    Inactive {
        /// Cron expression
        expr: String,
        /// Reference instant (RFC 3339, default: now)
        #[arg(long)]
        from: Option<String>,
        /// Also run the slower calendar walk and report disagreement
        #[arg(long)]
        cross_check: bool,
    },
    /// Upcoming active windows as start/end pairs
    Windows {
        /// Cron expression
        expr: String,
        /// Reference instant (RFC 3339, default: now)
        #[arg(long)]
        from: Option<String>,
        /// Number of windows to list
        #[arg(long, default_value = "3")]
        count: usize,
    },
    /// Whether the schedule matches at an instant
    Check {
        /// Cron expression
        expr: String,
        /// Instant to test (RFC 3339, default: now)
        #[arg(long)]
        at: Option<String>,
    },
}
