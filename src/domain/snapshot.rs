use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::composition::CompositionRecord;
use super::models::{Leg, Match, Player, Team, TeamId};
use crate::errors::{with_parse_context, with_read_context};

/// Point-in-time copy of the club data handed over by the data supplier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClubSnapshot {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub compositions: Vec<CompositionRecord>,
}

impl ClubSnapshot {
    /// Load a snapshot from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let json = with_read_context(fs::read_to_string(path), &display)?;
        let snapshot = Self::from_json(&json)?;

        info!(
            "Loaded snapshot {}: {} players, {} teams, {} matches, {} compositions",
            display,
            snapshot.players.len(),
            snapshot.teams.len(),
            snapshot.matches.len(),
            snapshot.compositions.len()
        );
        Ok(snapshot)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        with_parse_context(serde_json::from_str(json), "club snapshot")
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn player(&self, license: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.license == license)
    }

    pub fn composition(&self, team_id: TeamId, round: u32, leg: Leg) -> Option<&CompositionRecord> {
        self.compositions
            .iter()
            .find(|c| c.team_id == team_id && c.round == round && c.leg == leg)
    }

    /// History to validate a line-up against: every match except the
    /// fixture the line-up is meant for.
    pub fn history_excluding(&self, team_id: TeamId, round: u32, leg: Leg) -> Vec<Match> {
        self.matches
            .iter()
            .filter(|m| !(m.team_id == team_id && m.round == round && m.leg == leg))
            .cloned()
            .collect()
    }
}
