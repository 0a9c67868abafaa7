use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Federation license number
pub type PlayerId = String;
pub type TeamId = i64;
/// Rank of a team inside the club, 1 being the strongest
pub type Tier = u32;

/// Result label the federation feed uses for fixtures not yet played
pub const UPCOMING_RESULT: &str = "upcoming";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Gender category a team competes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    #[default]
    Active,
    Temporary,
    Inactive,
}

/// Half of the season; history and locks are scoped per leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    First,
    Second,
}

impl Leg {
    pub fn as_str(&self) -> &str {
        match self {
            Leg::First => "first",
            Leg::Second => "second",
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Leg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" | "1" => Ok(Leg::First),
            "second" | "2" => Ok(Leg::Second),
            other => Err(format!("unknown leg '{other}', expected 'first' or 'second'")),
        }
    }
}

/// Lock tiers cached by the data supplier, one per leg
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockHint {
    #[serde(default)]
    pub first: Option<Tier>,
    #[serde(default)]
    pub second: Option<Tier>,
}

impl LockHint {
    pub fn for_leg(&self, leg: Leg) -> Option<Tier> {
        match leg {
            Leg::First => self.first,
            Leg::Second => self.second,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub license: PlayerId,
    pub name: String,
    pub gender: Gender,
    pub nationality: String,
    pub points: u32,
    #[serde(default)]
    pub status: ActivityStatus,
    #[serde(default)]
    pub locked_tier_hint: Option<LockHint>,
}

impl Player {
    pub fn is_female(&self) -> bool {
        self.gender == Gender::Female
    }

    /// A player with no nationality on file is treated as a national
    pub fn is_foreign(&self, home_nationality: &str) -> bool {
        let code = self.nationality.trim();
        !code.is_empty() && !code.eq_ignore_ascii_case(home_nationality)
    }

    /// Category of the teams the player is registered for
    pub fn category(&self) -> Category {
        match self.gender {
            Gender::Male => Category::Men,
            Gender::Female => Category::Women,
        }
    }

    pub fn is_inactive(&self) -> bool {
        self.status == ActivityStatus::Inactive
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub tier: Tier,
    pub category: Category,
    #[serde(default)]
    pub division: String,
}

/// A fixture of one of the club's teams
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub team_id: TeamId,
    pub round: u32,
    pub leg: Leg,
    pub date: NaiveDate,
    #[serde(default)]
    pub opponent: String,
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    /// Players who actually competed, in line-up order
    #[serde(default)]
    pub roster: Vec<PlayerId>,
}

impl Match {
    pub fn has_roster(&self) -> bool {
        !self.roster.is_empty()
    }

    pub fn is_upcoming(&self) -> bool {
        self.result
            .as_deref()
            .map(|r| r.trim().eq_ignore_ascii_case(UPCOMING_RESULT))
            .unwrap_or(false)
    }
}
