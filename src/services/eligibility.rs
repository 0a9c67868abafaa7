use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;
use std::path::Path;

use crate::config::settings::AppConfig;
use crate::domain::{ClubSnapshot, Leg, Match, MatchStatus, PlayerId, Team, TeamId, Tier};
use crate::eligibility::{self, ParticipationIndex, Regime, RoundContext, ValidationReport};
use crate::errors::missing_context;
use crate::fatigue::{self, BurnoutConditions, BurnoutInfo};

/// Lock warning shown before a player is dropped into a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockPrediction {
    pub player: PlayerId,
    pub team_id: TeamId,
    pub candidate_tier: Tier,
    pub leg: Leg,
    pub regime: Regime,
    pub current_lock: Option<Tier>,
    pub future_lock: Option<Tier>,
}

impl LockPrediction {
    /// Whether this assignment would create or move the lock
    pub fn changes_lock(&self) -> bool {
        self.future_lock.is_some() && self.future_lock != self.current_lock
    }
}

/// Runs the eligibility engine over a loaded club snapshot
pub struct EligibilityService {
    config: AppConfig,
    snapshot: ClubSnapshot,
    status: MatchStatus,
}

impl EligibilityService {
    pub fn new(config: AppConfig, snapshot: ClubSnapshot) -> Result<Self> {
        Ok(Self {
            config,
            snapshot,
            status: MatchStatus::new().context("Failed to compile score pattern")?,
        })
    }

    pub fn from_path<P: AsRef<Path>>(config: AppConfig, path: P) -> Result<Self> {
        let snapshot = ClubSnapshot::load(path)?;
        Self::new(config, snapshot)
    }

    pub fn validate_composition(
        &self,
        team_id: TeamId,
        round: u32,
        leg: Leg,
        regime: Regime,
    ) -> Result<ValidationReport> {
        let team = self.find_team(team_id)?;
        let key = format!("team {} round {} ({} leg)", team_id, round, leg);

        info!("=== Validating composition of {} under {} rules ===", key, regime);

        let record = self
            .snapshot
            .composition(team_id, round, leg)
            .ok_or_else(|| anyhow::anyhow!(missing_context("composition", &key)))?;
        let capacity = regime.slot_capacity(record.kind, team, &self.config.eligibility);
        let composition = record
            .clone()
            .into_composition(capacity)
            .with_context(|| format!("Invalid composition for {}", key))?;

        let full_index = self.build_index(&self.snapshot.matches, leg);
        if full_index.is_round_played(team_id, round) {
            info!("  → Round already played, checking the recorded line-up");
        }
        self.warn_on_stale_hints(&full_index, leg, regime);

        let history_matches = self.snapshot.history_excluding(team_id, round, leg);
        let history = self.build_index(&history_matches, leg);
        info!("  → History covers {} players", history.len());

        let context = RoundContext::new(&self.snapshot.players, &history);
        let report = eligibility::validate(&composition, team, &context, regime, &self.config);

        info!("  → {} slot(s), {} violation(s)", composition.len(), report.errors.len());
        Ok(report)
    }

    pub fn predict_lock(&self, license: &str, team_id: TeamId, leg: Leg, regime: Regime) -> Result<LockPrediction> {
        let team = self.find_team(team_id)?;
        if self.snapshot.player(license).is_none() {
            anyhow::bail!(missing_context("player", license));
        }

        let index = self.build_index(&self.snapshot.matches, leg);
        let history = index.history(license);
        let policy = regime.lock_policy(&self.config.eligibility);

        Ok(LockPrediction {
            player: license.to_string(),
            team_id,
            candidate_tier: team.tier,
            leg,
            regime,
            current_lock: policy.current_lock(history, team.category),
            future_lock: policy.future_lock(history, team.tier, team.category),
        })
    }

    pub fn team_burnout(&self, team_id: TeamId, conditions: &BurnoutConditions) -> Result<Vec<BurnoutInfo>> {
        let team = self.find_team(team_id)?;
        info!("=== Fatigue report for {} ===", team.name);

        let report = fatigue::team_burnout(team, &self.snapshot.matches, conditions);
        info!(
            "  → {} players, {} at risk",
            report.len(),
            report.iter().filter(|i| i.at_risk).count()
        );
        Ok(report)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn player_name(&self, license: &str) -> Option<&str> {
        self.snapshot.player(license).map(|p| p.name.as_str())
    }

    fn find_team(&self, team_id: TeamId) -> Result<&Team> {
        self.snapshot
            .team(team_id)
            .ok_or_else(|| anyhow::anyhow!(missing_context("team", &team_id.to_string())))
    }

    fn build_index(&self, matches: &[Match], leg: Leg) -> ParticipationIndex {
        ParticipationIndex::build(matches, &self.snapshot.teams, leg, &self.status)
    }

    /// Players whose supplier-cached lock for `leg` no longer matches what
    /// their history gives, with (cached, computed)
    pub fn stale_hints(
        &self,
        index: &ParticipationIndex,
        leg: Leg,
        regime: Regime,
    ) -> Vec<(PlayerId, Option<Tier>, Option<Tier>)> {
        let policy = regime.lock_policy(&self.config.eligibility);

        self.snapshot
            .players
            .iter()
            .filter_map(|player| {
                let cached = player.locked_tier_hint.as_ref()?.for_leg(leg);
                let computed = policy.current_lock(index.history(&player.license), player.category());
                (cached != computed).then(|| (player.license.clone(), cached, computed))
            })
            .collect()
    }

    fn warn_on_stale_hints(&self, index: &ParticipationIndex, leg: Leg, regime: Regime) {
        for (license, cached, computed) in self.stale_hints(index, leg, regime) {
            warn!(
                "Cached lock of {} ({:?}) differs from history ({:?})",
                license, cached, computed
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "players": [
            {"license": "A", "name": "Anna", "gender": "female", "nationality": "FR", "points": 1500,
             "locked_tier_hint": {"first": 2}},
            {"license": "B", "name": "Bruno", "gender": "male", "nationality": "FR", "points": 1450}
        ],
        "teams": [
            {"id": 1, "name": "Club 1", "tier": 1, "category": "men", "division": "Division 3"},
            {"id": 2, "name": "Club 2", "tier": 2, "category": "men", "division": "Division 3"}
        ],
        "matches": [
            {"id": 1, "team_id": 2, "round": 1, "leg": "first", "date": "2025-09-20", "roster": ["A"]},
            {"id": 2, "team_id": 2, "round": 2, "leg": "first", "date": "2025-10-04", "roster": ["A"]},
            {"id": 3, "team_id": 1, "round": 3, "leg": "first", "date": "2025-10-18", "roster": ["A", "B"]}
        ],
        "compositions": [
            {"team_id": 1, "round": 3, "leg": "first", "slots": {"1": "A", "2": "B"}},
            {"team_id": 1, "round": 4, "leg": "first", "slots": {"1": "A", "2": "B", "5": "C"}}
        ]
    }"#;

    fn service() -> EligibilityService {
        let snapshot = ClubSnapshot::from_json(SNAPSHOT).unwrap();
        EligibilityService::new(AppConfig::default(), snapshot).unwrap()
    }

    #[test]
    fn test_validation_excludes_fixture_being_checked() {
        let report = service()
            .validate_composition(1, 3, Leg::First, Regime::Classic)
            .unwrap();

        assert_eq!(report.count(eligibility::ViolationKind::Lock), 1);
        assert_eq!(report.errors_for("A").count(), 1);
        assert_eq!(report.errors_for("B").count(), 0);
    }

    #[test]
    fn test_overfull_composition_is_an_error() {
        let err = service()
            .validate_composition(1, 4, Leg::First, Regime::Classic)
            .unwrap_err();

        assert!(format!("{err:#}").contains("slot 5"));
    }

    #[test]
    fn test_missing_composition_and_team() {
        let service = service();

        assert!(service.validate_composition(1, 9, Leg::First, Regime::Classic).is_err());
        assert!(service.validate_composition(42, 3, Leg::First, Regime::Classic).is_err());
    }

    #[test]
    fn test_lock_prediction() {
        let service = service();

        let prediction = service.predict_lock("B", 2, Leg::First, Regime::Classic).unwrap();
        assert_eq!(prediction.current_lock, None);
        assert_eq!(prediction.future_lock, Some(1));
        assert!(prediction.changes_lock());

        let prediction = service.predict_lock("B", 1, Leg::First, Regime::GroupLeague).unwrap();
        assert_eq!(prediction.future_lock, None);
        assert!(!prediction.changes_lock());

        assert!(service.predict_lock("Z", 1, Leg::First, Regime::Classic).is_err());
    }

    #[test]
    fn test_stale_hints_follow_regime_lock_scope() {
        let snapshot = ClubSnapshot::from_json(
            r#"{
            "players": [
                {"license": "M", "name": "Mia", "gender": "female", "nationality": "FR", "points": 900,
                 "locked_tier_hint": {"first": null}},
                {"license": "A", "name": "Anna", "gender": "female", "nationality": "FR", "points": 900,
                 "locked_tier_hint": {"first": 2}}
            ],
            "teams": [
                {"id": 1, "name": "Men 1", "tier": 1, "category": "men"},
                {"id": 2, "name": "Women 1", "tier": 2, "category": "women"}
            ],
            "matches": [
                {"id": 1, "team_id": 1, "round": 1, "leg": "first", "date": "2025-09-20", "roster": ["M"]},
                {"id": 2, "team_id": 2, "round": 2, "leg": "first", "date": "2025-10-04", "roster": ["M"]}
            ]
        }"#,
        )
        .unwrap();
        let service = EligibilityService::new(AppConfig::default(), snapshot).unwrap();
        let index = service.build_index(&service.snapshot.matches, Leg::First);

        let stale = service.stale_hints(&index, Leg::First, Regime::Classic);

        assert_eq!(stale, vec![("A".to_string(), Some(2), None)]);
    }

    #[test]
    fn test_burnout_for_team() {
        let service = service();

        let report = service.team_burnout(2, &BurnoutConditions::default()).unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].player, "A");
        assert_eq!(report[0].matches_played, 2);
        assert_eq!(service.player_name("A"), Some("Anna"));
    }
}
