use crate::fatigue::BurnoutConditions;

#[derive(Debug, Clone)]
pub struct EligibilitySettings {
    pub classic_lock_threshold: u32,
    pub group_lock_threshold: u32,
    pub max_round_slots: usize,
    pub max_template_slots: usize,
    /// Round-2 players allowed to come from a stronger round-1 team
    pub round2_stronger_cap: usize,
    /// Locked players tolerated in one group of the group league
    pub group_locked_cap: usize,
}

impl Default for EligibilitySettings {
    fn default() -> Self {
        Self {
            classic_lock_threshold: 2,
            group_lock_threshold: 3,
            max_round_slots: 4,
            max_template_slots: 5,
            round2_stronger_cap: 1,
            group_locked_cap: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuotaSettings {
    pub max_foreign_players: usize,
    pub max_women_in_men_team: usize,
    pub home_nationality: &'static str,
}

impl Default for QuotaSettings {
    fn default() -> Self {
        Self {
            max_foreign_players: 1,
            max_women_in_men_team: 2,
            home_nationality: "FR",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub eligibility: EligibilitySettings,
    pub quota: QuotaSettings,
    pub fatigue: BurnoutConditions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            eligibility: EligibilitySettings::default(),
            quota: QuotaSettings::default(),
            fatigue: BurnoutConditions::default(),
        }
    }
}
