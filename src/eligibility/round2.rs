use std::collections::HashMap;

use crate::domain::{Player, PlayerId, Tier};

use super::types::{ValidationError, ViolationKind};

const SPECIAL_ROUND: u32 = 2;

/// Classic league round-2 rule: only `cap` players of the round-2 line-up
/// may have played round 1 for a stronger team. Every player past the cap
/// gets a violation.
pub fn check(
    roster: &[&Player],
    round: u32,
    team_tier: Tier,
    round1_tiers: &HashMap<PlayerId, Tier>,
    cap: usize,
) -> Vec<ValidationError> {
    if round != SPECIAL_ROUND {
        return Vec::new();
    }

    roster
        .iter()
        .filter_map(|p| {
            let tier = *round1_tiers.get(&p.license)?;
            (tier < team_tier).then_some((*p, tier))
        })
        .skip(cap)
        .map(|(player, tier)| {
            ValidationError::new(
                ViolationKind::Round2Quota,
                format!(
                    "{} played round 1 for tier {}, only {} such player(s) allowed in round 2",
                    player.name, tier, cap
                ),
            )
            .for_player(&player.license)
            .at_tier(tier)
        })
        .collect()
}
