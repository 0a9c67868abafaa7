use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

use super::models::{Leg, PlayerId, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionKind {
    /// Line-up for one round of the classic league
    #[default]
    Round,
    /// Reusable default line-up of the classic league
    Template,
    /// Line-up of a group-league fixture, slots filled group after group
    Group,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompositionError {
    #[error("slot {slot} is outside 1..={capacity}")]
    SlotOutOfRange { slot: u8, capacity: usize },
    #[error("player {0} is assigned to more than one slot")]
    DuplicatePlayer(PlayerId),
}

/// Slot to player assignment for one team, round and leg.
///
/// Slots are numbered from 1 and bounded by the capacity given at
/// construction, so a composition can never hold more players than its
/// regime allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    pub team_id: TeamId,
    pub round: u32,
    pub leg: Leg,
    pub kind: CompositionKind,
    slots: BTreeMap<u8, PlayerId>,
}

impl Composition {
    pub fn new<I>(
        team_id: TeamId,
        round: u32,
        leg: Leg,
        kind: CompositionKind,
        capacity: usize,
        slots: I,
    ) -> Result<Self, CompositionError>
    where
        I: IntoIterator<Item = (u8, PlayerId)>,
    {
        let mut assigned = BTreeMap::new();
        let mut seen = HashSet::new();

        for (slot, player) in slots {
            if slot == 0 || slot as usize > capacity {
                return Err(CompositionError::SlotOutOfRange { slot, capacity });
            }
            if !seen.insert(player.clone()) {
                return Err(CompositionError::DuplicatePlayer(player));
            }
            // a later assignment to the same slot replaces the earlier one
            if let Some(replaced) = assigned.insert(slot, player) {
                seen.remove(&replaced);
            }
        }

        Ok(Self {
            team_id,
            round,
            leg,
            kind,
            slots: assigned,
        })
    }

    /// Slots in ascending order
    pub fn slots(&self) -> impl Iterator<Item = (u8, &PlayerId)> {
        self.slots.iter().map(|(slot, player)| (*slot, player))
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerId> {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Composition as stored in a snapshot, before capacity checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionRecord {
    pub team_id: TeamId,
    pub round: u32,
    pub leg: Leg,
    #[serde(default)]
    pub kind: CompositionKind,
    pub slots: BTreeMap<u8, PlayerId>,
}

impl CompositionRecord {
    pub fn into_composition(self, capacity: usize) -> Result<Composition, CompositionError> {
        Composition::new(
            self.team_id,
            self.round,
            self.leg,
            self.kind,
            capacity,
            self.slots,
        )
    }
}
