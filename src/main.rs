use anyhow::Result;

use roster_eligibility::cli::Command;
use roster_eligibility::config::settings::AppConfig;
use roster_eligibility::{
    burnout_conditions, handle_burnout, handle_completions, handle_lock, handle_validate, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Validate {
            snapshot,
            team,
            round,
            leg,
            regime,
            json,
        } => handle_validate(snapshot, *team, *round, *leg, *regime, *json),
        Command::Lock {
            snapshot,
            player,
            team,
            leg,
            regime,
            json,
        } => handle_lock(snapshot, player, *team, *leg, *regime, *json),
        Command::Burnout {
            snapshot,
            team,
            max_matches,
            max_consecutive,
            min_days,
            json,
        } => {
            let conditions = burnout_conditions(AppConfig::new().fatigue, *max_matches, *max_consecutive, *min_days);
            handle_burnout(snapshot, *team, conditions, *json)
        }
        Command::Completions { shell } => handle_completions(*shell),
    }
}
