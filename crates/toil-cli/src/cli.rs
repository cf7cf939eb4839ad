//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::balance::BalanceArgs;

/// Time-off-in-lieu ledger.
///
/// Marks calendar days as worked, national holiday, day off or TOIL day and
/// keeps a running balance of TOIL earned and used.
#[derive(Debug, Parser)]
#[command(name = "toil", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show where the state lives and the current balance.
    Status,

    /// Show one day's flags.
    Get {
        /// Day as YYYY-MM-DD, or "today".
        date: String,
    },

    /// Replace one day's flags. Pass no flags to unmark the day.
    Set {
        /// Day as YYYY-MM-DD, or "today".
        date: String,

        /// The day was worked.
        #[arg(long)]
        worked: bool,

        /// The day is a national holiday.
        #[arg(long)]
        national: bool,

        /// The day is a day off.
        #[arg(long)]
        day_off: bool,

        /// The day off is paid for with TOIL (implies --day-off).
        #[arg(long)]
        toil_day: bool,
    },

    /// List a month's days and its TOIL summary.
    Month {
        /// Month as YYYY-MM.
        month: String,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show or adjust the cumulative TOIL balance.
    Balance(BalanceArgs),

    /// Delete every day record and the balance adjustment.
    Clear {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },

    /// Write the snapshot document.
    Export {
        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace all state from a snapshot document.
    Import {
        /// Input file (defaults to stdin).
        path: Option<PathBuf>,
    },
}
