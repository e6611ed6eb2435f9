//! CLI subcommand definitions

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Manage daily and weekly message goals
    Goals {
        #[command(subcommand)]
        command: GoalsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum GoalsCommand {
    /// Set message goals, e.g. `goals set 200 1000`
    Set {
        /// Messages per day
        #[arg(allow_negative_numbers = true)]
        daily: i64,
        /// Messages per rolling 7 days
        #[arg(allow_negative_numbers = true)]
        weekly: i64,
    },
    /// Remove configured goals
    Clear,
    /// Print configured goals
    Show,
}
