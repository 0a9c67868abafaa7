use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::{Leg, TeamId};
use crate::eligibility::Regime;

#[derive(Parser, Debug)]
#[command(author, version, about = "roster eligibility checks for club team line-ups")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Validate a stored composition against the league rules
    Validate {
        /// Club snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,
        #[arg(short, long)]
        team: TeamId,
        #[arg(short, long)]
        round: u32,
        /// first or second
        #[arg(short, long, default_value = "first")]
        leg: Leg,
        /// classic or group
        #[arg(long, default_value = "classic")]
        regime: Regime,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the lock a player would get by playing for a team
    Lock {
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Player license
        #[arg(short, long)]
        player: String,
        #[arg(short, long)]
        team: TeamId,
        #[arg(short, long, default_value = "first")]
        leg: Leg,
        #[arg(long, default_value = "classic")]
        regime: Regime,
        #[arg(long)]
        json: bool,
    },
    /// Report players of a team at risk of overuse
    Burnout {
        #[arg(short, long)]
        snapshot: PathBuf,
        #[arg(short, long)]
        team: TeamId,
        #[arg(long)]
        max_matches: Option<u32>,
        #[arg(long)]
        max_consecutive: Option<u32>,
        /// Matches closer than this are back-to-back
        #[arg(long)]
        min_days: Option<i64>,
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
