use log::trace;

pub use crate::config::divisions::GroupStructure;
use crate::config::divisions::get_group_structures;
use crate::domain::Player;

use super::types::{ValidationError, ViolationKind};

/// Resolve a group-league division label to its group layout.
///
/// Only the exact labels of the division table resolve; anything else
/// means the fixture carries no group constraints.
pub fn structure_for(division_label: &str) -> Option<GroupStructure> {
    let structure = get_group_structures()
        .into_iter()
        .find(|d| d.label == division_label)
        .map(|d| d.structure);
    trace!("Division '{}' resolved to {:?}", division_label, structure);
    structure
}

/// A fielded player together with where they sit in the line-up
#[derive(Debug, Clone, Copy)]
pub struct GroupMember<'a> {
    pub slot: u8,
    pub player: &'a Player,
    /// Locked to a tier stronger than the team's
    pub locked: bool,
}

/// Zero-based group of a one-based slot; groups are filled in order,
/// the first group being the strongest
pub fn group_of(slot: u8, structure: &GroupStructure) -> usize {
    (slot.saturating_sub(1) as usize) / structure.players_per_group.max(1) as usize
}

fn split_groups<'m, 'a>(
    structure: &GroupStructure,
    members: &'m [GroupMember<'a>],
) -> Vec<Vec<&'m GroupMember<'a>>> {
    let mut groups: Vec<Vec<&GroupMember>> = vec![Vec::new(); structure.groups as usize];
    for member in members {
        if let Some(group) = groups.get_mut(group_of(member.slot, structure)) {
            group.push(member);
        }
    }
    groups
}

/// Members sitting in slots the layout does not have.
///
/// Compositions built through `CompositionRecord::into_composition` are
/// already capped at the layout size; this catches callers that hand
/// `validate` a composition built with a larger capacity.
pub fn check_layout(structure: &GroupStructure, members: &[GroupMember]) -> Vec<ValidationError> {
    members
        .iter()
        .filter(|m| m.slot == 0 || m.slot as u32 > structure.total)
        .map(|m| {
            ValidationError::new(
                ViolationKind::GroupOrder,
                format!(
                    "slot {} does not exist in a {}x{} layout",
                    m.slot, structure.groups, structure.players_per_group
                ),
            )
            .for_player(&m.player.license)
        })
        .collect()
}

/// Article 8: every player of a group must rank no higher than the
/// strongest player of the stronger neighbouring group and no lower than
/// the weakest player of the weaker one. Order inside a group does not
/// matter. Empty groups are skipped when looking for neighbours.
pub fn check_ordering(structure: &GroupStructure, members: &[GroupMember]) -> Vec<ValidationError> {
    let groups: Vec<_> = split_groups(structure, members)
        .into_iter()
        .enumerate()
        .filter(|(_, g)| !g.is_empty())
        .collect();

    let mut errors = Vec::new();
    for (position, (group, players)) in groups.iter().enumerate() {
        let ceiling = position
            .checked_sub(1)
            .and_then(|p| groups.get(p))
            .and_then(|(index, stronger)| {
                let highest = stronger.iter().map(|m| m.player.points).max()?;
                Some((index + 1, highest))
            });
        let floor = groups.get(position + 1).and_then(|(index, weaker)| {
            let lowest = weaker.iter().map(|m| m.player.points).min()?;
            Some((index + 1, lowest))
        });

        for member in players {
            let points = member.player.points;
            let above = ceiling.filter(|&(_, highest)| points > highest);
            let below = floor.filter(|&(_, lowest)| points < lowest);

            let message = match (above, below) {
                (Some((other, highest)), _) => format!(
                    "{} ({} pts) in group {} outranks all of group {} (highest {} pts)",
                    member.player.name,
                    points,
                    group + 1,
                    other,
                    highest
                ),
                (None, Some((other, lowest))) => format!(
                    "{} ({} pts) in group {} is outranked by all of group {} (lowest {} pts)",
                    member.player.name,
                    points,
                    group + 1,
                    other,
                    lowest
                ),
                (None, None) => continue,
            };

            errors.push(ValidationError::new(ViolationKind::GroupOrder, message).for_player(&member.player.license));
        }
    }
    errors
}

/// Article 12: a group tolerates `cap` players locked to a stronger team;
/// past that, every such player of the group is disqualified, not only the
/// last one.
pub fn check_lock_cap(structure: &GroupStructure, members: &[GroupMember], cap: usize) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (group, players) in split_groups(structure, members).iter().enumerate() {
        let locked: Vec<_> = players.iter().filter(|m| m.locked).collect();
        if locked.len() <= cap {
            continue;
        }

        for member in &locked {
            errors.push(
                ValidationError::new(
                    ViolationKind::GroupLockCap,
                    format!(
                        "{} is one of {} locked players in group {}",
                        member.player.name,
                        locked.len(),
                        group + 1
                    ),
                )
                .for_player(&member.player.license),
            );
        }
    }
    errors
}
