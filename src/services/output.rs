use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use crate::eligibility::{ValidationReport, ViolationKind};
use crate::fatigue::{self, BurnoutInfo};

use super::eligibility::LockPrediction;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize report")
}

fn kind_label(kind: ViolationKind) -> String {
    match kind {
        ViolationKind::Lock | ViolationKind::GroupLockCap => kind.as_str().red().bold().to_string(),
        ViolationKind::QuotaFemale | ViolationKind::QuotaForeign | ViolationKind::Round2Quota => {
            kind.as_str().yellow().bold().to_string()
        }
        _ => kind.as_str().magenta().to_string(),
    }
}

pub fn render_report(header: &str, report: &ValidationReport) -> String {
    let mut lines = vec![header.bold().to_string()];

    if report.is_valid {
        lines.push(format!("  {}", "valid".green().bold()));
        return lines.join("\n");
    }

    lines.push(format!(
        "  {} ({} violation(s))",
        "invalid".red().bold(),
        report.errors.len()
    ));
    for error in &report.errors {
        let player = error.player.as_deref().unwrap_or("-");
        lines.push(format!("  [{}] {}: {}", kind_label(error.kind), player.cyan(), error.message));
    }
    lines.join("\n")
}

fn tier_label(tier: Option<u32>) -> String {
    tier.map(|t| format!("tier {t}")).unwrap_or_else(|| "none".to_string())
}

pub fn render_prediction(prediction: &LockPrediction, player_name: &str) -> String {
    let verdict = if prediction.changes_lock() {
        format!("would lock at {}", tier_label(prediction.future_lock))
            .as_str()
            .yellow()
            .bold()
    } else {
        "lock unchanged".green()
    };

    format!(
        "{} ({}) into team {} (tier {}), {} leg, {} rules\n  current lock: {}\n  after this match: {}\n  → {}",
        player_name.bold(),
        prediction.player,
        prediction.team_id,
        prediction.candidate_tier,
        prediction.leg,
        prediction.regime,
        tier_label(prediction.current_lock),
        tier_label(prediction.future_lock),
        verdict
    )
}

fn burnout_line(info: &BurnoutInfo, name: &str) -> String {
    let last = info
        .last_match_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!(
        "  {} ({}): {} match(es), streak {}, last {}",
        name, info.player, info.matches_played, info.longest_streak, last
    );
    if let Some(reason) = &info.risk_reason {
        line.push_str(&format!(" ({})", reason.red()));
    }
    line
}

pub fn render_burnout<'a, F>(team_name: &str, report: Vec<BurnoutInfo>, name_of: F) -> String
where
    F: Fn(&str) -> Option<&'a str>,
{
    let (at_risk, safe) = fatigue::partition(report);
    let mut lines = vec![format!("Fatigue report for {}", team_name.bold())];

    lines.push(format!("{} ({})", "At risk".red().bold(), at_risk.len()));
    lines.extend(
        at_risk
            .iter()
            .map(|info| burnout_line(info, name_of(&info.player).unwrap_or("?"))),
    );
    lines.push(format!("{} ({})", "Safe".green().bold(), safe.len()));
    lines.extend(
        safe.iter()
            .map(|info| burnout_line(info, name_of(&info.player).unwrap_or("?"))),
    );
    lines.join("\n")
}
