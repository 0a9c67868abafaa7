pub mod cli;
pub mod config;
pub mod domain;
pub mod eligibility;
pub mod errors;
pub mod fatigue;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use std::path::Path;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::{Leg, TeamId};
use crate::eligibility::Regime;
use crate::fatigue::BurnoutConditions;
use crate::services::eligibility::EligibilityService;
use crate::services::output;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_validate(snapshot: &Path, team: TeamId, round: u32, leg: Leg, regime: Regime, json: bool) -> Result<()> {
    let service = EligibilityService::from_path(AppConfig::new(), snapshot)?;
    let report = service.validate_composition(team, round, leg, regime)?;

    if json {
        println!("{}", output::to_json(&report)?);
    } else {
        let header = format!("Team {} round {} ({} leg, {})", team, round, leg, regime);
        println!("{}", output::render_report(&header, &report));
    }
    Ok(())
}

pub fn handle_lock(snapshot: &Path, player: &str, team: TeamId, leg: Leg, regime: Regime, json: bool) -> Result<()> {
    let service = EligibilityService::from_path(AppConfig::new(), snapshot)?;
    let prediction = service.predict_lock(player, team, leg, regime)?;

    if json {
        println!("{}", output::to_json(&prediction)?);
    } else {
        let name = service.player_name(player).unwrap_or(player);
        println!("{}", output::render_prediction(&prediction, name));
    }
    Ok(())
}

/// Flags left unset fall back to the configured thresholds
pub fn burnout_conditions(
    defaults: BurnoutConditions,
    max_matches: Option<u32>,
    max_consecutive: Option<u32>,
    min_days: Option<i64>,
) -> BurnoutConditions {
    BurnoutConditions {
        max_matches_per_player: max_matches.unwrap_or(defaults.max_matches_per_player),
        max_consecutive_matches: max_consecutive.unwrap_or(defaults.max_consecutive_matches),
        min_days_between_matches: min_days.unwrap_or(defaults.min_days_between_matches),
    }
}

pub fn handle_burnout(snapshot: &Path, team: TeamId, conditions: BurnoutConditions, json: bool) -> Result<()> {
    let service = EligibilityService::from_path(AppConfig::new(), snapshot)?;
    let report = service.team_burnout(team, &conditions)?;

    if json {
        println!("{}", output::to_json(&report)?);
    } else {
        let team_name = format!("team {}", team);
        println!(
            "{}",
            output::render_burnout(&team_name, report, |p| service.player_name(p))
        );
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
