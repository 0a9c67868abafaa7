use log::debug;
use std::collections::HashMap;

use crate::config::settings::AppConfig;
use crate::domain::{Composition, Player, Team};

use super::groups::{self, GroupMember};
use super::history::{ParticipationIndex, PlayerHistory};
use super::lock::LockPolicy;
use super::quota::QuotaChecker;
use super::round2;
use super::types::{Regime, ValidationError, ValidationReport, ViolationKind};

/// Immutable inputs a validation pass reads from
#[derive(Debug, Clone, Copy)]
pub struct RoundContext<'a> {
    pub players: &'a [Player],
    /// Participation of the leg being composed, without the fixture itself
    pub history: &'a ParticipationIndex,
}

impl<'a> RoundContext<'a> {
    pub fn new(players: &'a [Player], history: &'a ParticipationIndex) -> Self {
        Self { players, history }
    }
}

/// Validate a proposed composition for `team` under `regime`.
///
/// Never fails: every rule breach ends up in the report, in slot order for
/// per-player checks, followed by roster-wide checks.
pub fn validate(
    composition: &Composition,
    team: &Team,
    context: &RoundContext,
    regime: Regime,
    config: &AppConfig,
) -> ValidationReport {
    let directory: HashMap<&str, &Player> = context
        .players
        .iter()
        .map(|p| (p.license.as_str(), p))
        .collect();

    // locks are scoped per leg, a history from the other leg says nothing
    let history = if context.history.leg() == composition.leg {
        Some(context.history)
    } else {
        debug!(
            "History covers the {} leg, composition is for the {} leg",
            context.history.leg(),
            composition.leg
        );
        None
    };
    let lookup = |license: &str| history.and_then(|h| h.history(license));

    let policy = regime.lock_policy(&config.eligibility);
    let mut errors = Vec::new();
    let mut fielded: Vec<(u8, &Player)> = Vec::new();

    for (slot, license) in composition.slots() {
        let Some(player) = directory.get(license.as_str()).copied() else {
            errors.push(
                ValidationError::new(
                    ViolationKind::UnknownPlayer,
                    format!("slot {} holds unknown license {}", slot, license),
                )
                .for_player(license),
            );
            continue;
        };

        errors.extend(check_player(player, team, composition.round, lookup(license.as_str()), &policy));
        fielded.push((slot, player));
    }

    match regime {
        Regime::Classic => {
            let roster: Vec<&Player> = fielded.iter().map(|(_, p)| *p).collect();
            let quota = QuotaChecker::new(config.quota.clone());
            errors.extend(quota.check(&roster, team));

            let round1_tiers = history.map(|h| h.round_tiers(1)).unwrap_or_default();
            errors.extend(round2::check(
                &roster,
                composition.round,
                team.tier,
                &round1_tiers,
                config.eligibility.round2_stronger_cap,
            ));
        }
        Regime::GroupLeague => {
            if let Some(structure) = groups::structure_for(&team.division) {
                let members: Vec<GroupMember> = fielded
                    .iter()
                    .map(|&(slot, player)| GroupMember {
                        slot,
                        player,
                        locked: policy
                            .current_lock(lookup(player.license.as_str()), team.category)
                            .is_some_and(|lock| lock < team.tier),
                    })
                    .collect();

                errors.extend(groups::check_layout(&structure, &members));
                errors.extend(groups::check_ordering(&structure, &members));
                errors.extend(groups::check_lock_cap(
                    &structure,
                    &members,
                    config.eligibility.group_locked_cap,
                ));
            } else {
                debug!("Division '{}' has no group layout, skipping group rules", team.division);
            }
        }
    }

    ValidationReport::from_errors(errors)
}

fn check_player(
    player: &Player,
    team: &Team,
    round: u32,
    history: Option<&PlayerHistory>,
    policy: &LockPolicy,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if player.is_inactive() {
        errors.push(
            ValidationError::new(
                ViolationKind::InactivePlayer,
                format!("{} is not an active member", player.name),
            )
            .for_player(&player.license),
        );
    }

    if let Some(other) = history
        .into_iter()
        .flat_map(|h| h.appearances_in_round(round))
        .find(|a| a.team_id != team.id)
    {
        errors.push(
            ValidationError::new(
                ViolationKind::RoundConflict,
                format!("{} already played round {} for team {}", player.name, round, other.team_id),
            )
            .for_player(&player.license)
            .at_tier(other.tier),
        );
    }

    if let Some(lock) = policy.current_lock(history, team.category) {
        if team.tier < lock {
            errors.push(
                ValidationError::new(
                    ViolationKind::Lock,
                    format!(
                        "{} is locked at tier {} and cannot play for tier {}",
                        player.name, lock, team.tier
                    ),
                )
                .for_player(&player.license)
                .at_tier(lock),
            );
        }
    }

    errors
}
