use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::divisions::get_group_structures;
use crate::config::settings::EligibilitySettings;
use crate::domain::{CompositionKind, PlayerId, Team, Tier};

use super::groups::structure_for;
use super::lock::LockPolicy;

/// Closed set of rule violations a composition can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Player assigned to a tier stronger than the one they are locked to
    Lock,
    QuotaFemale,
    QuotaForeign,
    /// Division ranking points floor not met
    RankingOrder,
    #[serde(rename = "round2_quota")]
    Round2Quota,
    /// Group league: player points out of order with a neighbouring group
    GroupOrder,
    /// Group league: more than one locked player in a group
    GroupLockCap,
    UnknownPlayer,
    InactivePlayer,
    /// Player already fielded in this round by another team
    RoundConflict,
}

impl ViolationKind {
    pub fn as_str(&self) -> &str {
        match self {
            ViolationKind::Lock => "lock",
            ViolationKind::QuotaFemale => "quota_female",
            ViolationKind::QuotaForeign => "quota_foreign",
            ViolationKind::RankingOrder => "ranking_order",
            ViolationKind::Round2Quota => "round2_quota",
            ViolationKind::GroupOrder => "group_order",
            ViolationKind::GroupLockCap => "group_lock_cap",
            ViolationKind::UnknownPlayer => "unknown_player",
            ViolationKind::InactivePlayer => "inactive_player",
            ViolationKind::RoundConflict => "round_conflict",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub kind: ViolationKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
}

impl ValidationError {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            player: None,
            tier: None,
        }
    }

    pub fn for_player(mut self, player: &str) -> Self {
        self.player = Some(player.to_string());
        self
    }

    pub fn at_tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }
}

/// Outcome of one validation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn count(&self, kind: ViolationKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }

    pub fn errors_for<'a>(&'a self, player: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors
            .iter()
            .filter(move |e| e.player.as_deref() == Some(player))
    }
}

/// Rule regime of a competition; exactly one applies to a fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Four-player team-vs-team league
    Classic,
    /// Groups of three, individual and pairs matches
    GroupLeague,
}

impl Regime {
    pub fn as_str(&self) -> &str {
        match self {
            Regime::Classic => "classic",
            Regime::GroupLeague => "group_league",
        }
    }

    pub fn lock_policy(&self, settings: &EligibilitySettings) -> LockPolicy {
        match self {
            Regime::Classic => LockPolicy::per_category(settings.classic_lock_threshold),
            Regime::GroupLeague => LockPolicy::club_wide(settings.group_lock_threshold),
        }
    }

    /// Most slots a composition may fill for this team under this regime
    pub fn slot_capacity(&self, kind: CompositionKind, team: &Team, settings: &EligibilitySettings) -> usize {
        match (self, kind) {
            (Regime::Classic, CompositionKind::Template) => settings.max_template_slots,
            (Regime::Classic, _) => settings.max_round_slots,
            (Regime::GroupLeague, _) => structure_for(&team.division)
                .map(|s| s.total as usize)
                .unwrap_or_else(largest_group_layout),
        }
    }
}

fn largest_group_layout() -> usize {
    get_group_structures()
        .iter()
        .map(|d| d.structure.total as usize)
        .max()
        .unwrap_or(0)
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Regime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(Regime::Classic),
            "group" | "group_league" | "group-league" => Ok(Regime::GroupLeague),
            other => Err(format!("unknown regime '{other}', expected 'classic' or 'group'")),
        }
    }
}
