use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, TeamId};

/// Overuse thresholds; every field can be overridden per report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnoutConditions {
    pub max_matches_per_player: u32,
    pub max_consecutive_matches: u32,
    /// Matches closer than this many days are back-to-back
    pub min_days_between_matches: i64,
}

impl Default for BurnoutConditions {
    fn default() -> Self {
        Self {
            max_matches_per_player: 7,
            max_consecutive_matches: 3,
            min_days_between_matches: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnoutInfo {
    pub player: PlayerId,
    pub team_id: TeamId,
    pub matches_played: u32,
    pub last_match_date: Option<NaiveDate>,
    pub longest_streak: u32,
    pub shortest_rest_days: Option<i64>,
    pub at_risk: bool,
    pub risk_reason: Option<String>,
}
