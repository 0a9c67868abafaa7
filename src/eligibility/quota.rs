use crate::config::divisions::{get_ranking_floors, RankingFloor};
use crate::config::settings::QuotaSettings;
use crate::domain::{Category, Player, Team};

use super::types::{ValidationError, ViolationKind};

/// Roster constraints that only depend on who is fielded, never on history
pub struct QuotaChecker {
    settings: QuotaSettings,
    floors: Vec<RankingFloor>,
}

impl QuotaChecker {
    pub fn new(settings: QuotaSettings) -> Self {
        Self::with_floors(settings, get_ranking_floors())
    }

    pub fn with_floors(settings: QuotaSettings, floors: Vec<RankingFloor>) -> Self {
        Self { settings, floors }
    }

    pub fn check(&self, roster: &[&Player], team: &Team) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        errors.extend(self.check_foreign(roster));
        errors.extend(self.check_female(roster, team));
        errors.extend(self.check_ranking_floor(roster, team));
        errors
    }

    fn check_foreign(&self, roster: &[&Player]) -> Option<ValidationError> {
        let cap = self.settings.max_foreign_players;
        let over_cap = roster
            .iter()
            .filter(|p| p.is_foreign(self.settings.home_nationality))
            .nth(cap)?;

        Some(
            ValidationError::new(
                ViolationKind::QuotaForeign,
                format!("{} exceeds the limit of {} foreign player(s)", over_cap.name, cap),
            )
            .for_player(&over_cap.license),
        )
    }

    fn check_female(&self, roster: &[&Player], team: &Team) -> Option<ValidationError> {
        if team.category != Category::Men {
            return None;
        }

        let cap = self.settings.max_women_in_men_team;
        let over_cap = roster.iter().filter(|p| p.is_female()).nth(cap)?;

        Some(
            ValidationError::new(
                ViolationKind::QuotaFemale,
                format!("{} exceeds the limit of {} women in a men's team", over_cap.name, cap),
            )
            .for_player(&over_cap.license),
        )
    }

    fn check_ranking_floor(&self, roster: &[&Player], team: &Team) -> Option<ValidationError> {
        let floor = self
            .floors
            .iter()
            .find(|f| f.applies_to(team.category, &team.division))?;

        let qualified = roster.iter().filter(|p| p.points >= floor.min_points).count();
        if qualified >= floor.min_players {
            return None;
        }

        Some(
            ValidationError::new(
                ViolationKind::RankingOrder,
                format!(
                    "{} requires {} players with at least {} points, found {}",
                    floor.division, floor.min_players, floor.min_points, qualified
                ),
            )
            .at_tier(team.tier),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ActivityStatus, Gender};

    fn player(license: &str, gender: Gender, nationality: &str, points: u32) -> Player {
        Player {
            license: license.to_string(),
            name: format!("Player {license}"),
            gender,
            nationality: nationality.to_string(),
            points,
            status: ActivityStatus::Active,
            locked_tier_hint: None,
        }
    }

    fn team(category: Category, division: &str) -> Team {
        Team {
            id: 1,
            name: "Club 1".to_string(),
            tier: 1,
            category,
            division: division.to_string(),
        }
    }

    #[test]
    fn test_three_women_in_men_team_single_violation() {
        let checker = QuotaChecker::new(QuotaSettings::default());
        let players = [
            player("1", Gender::Female, "FR", 1000),
            player("2", Gender::Female, "FR", 1000),
            player("3", Gender::Female, "FR", 1000),
            player("4", Gender::Male, "FR", 1000),
        ];
        let roster: Vec<&Player> = players.iter().collect();

        let errors = checker.check(&roster, &team(Category::Men, "Pre-regional"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ViolationKind::QuotaFemale);
        assert_eq!(errors[0].player.as_deref(), Some("3"));
    }

    #[test]
    fn test_women_team_has_no_female_cap() {
        let checker = QuotaChecker::new(QuotaSettings::default());
        let players: Vec<Player> = (1..=4)
            .map(|i| player(&i.to_string(), Gender::Female, "FR", 500))
            .collect();
        let roster: Vec<&Player> = players.iter().collect();

        assert!(checker.check(&roster, &team(Category::Women, "Pre-regional")).is_empty());
    }

    #[test]
    fn test_second_foreign_player_flagged() {
        let checker = QuotaChecker::new(QuotaSettings::default());
        let players = [
            player("1", Gender::Male, "BE", 1000),
            player("2", Gender::Male, "fr", 1000),
            player("3", Gender::Male, "DE", 1000),
            player("4", Gender::Male, "", 1000),
        ];
        let roster: Vec<&Player> = players.iter().collect();

        let errors = checker.check(&roster, &team(Category::Men, "Pre-regional"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ViolationKind::QuotaForeign);
        assert_eq!(errors[0].player.as_deref(), Some("3"));
    }

    #[test]
    fn test_ranking_floor_needs_two_qualified_players() {
        let checker = QuotaChecker::new(QuotaSettings::default());
        let players = [
            player("1", Gender::Male, "FR", 1850),
            player("2", Gender::Male, "FR", 1799),
            player("3", Gender::Male, "FR", 1500),
        ];
        let roster: Vec<&Player> = players.iter().collect();

        let errors = checker.check(&roster, &team(Category::Men, "Division 1"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ViolationKind::RankingOrder);
        assert_eq!(errors[0].tier, Some(1));

        // the same roster clears the Division 3 floor
        assert!(checker.check(&roster, &team(Category::Men, "Division 3")).is_empty());
    }

    #[test]
    fn test_women_floor_uses_its_own_table_entry() {
        let checker = QuotaChecker::new(QuotaSettings::default());
        let players = [
            player("1", Gender::Female, "FR", 950),
            player("2", Gender::Female, "FR", 920),
        ];
        let roster: Vec<&Player> = players.iter().collect();

        assert!(checker.check(&roster, &team(Category::Women, "Division 2")).is_empty());
        assert_eq!(checker.check(&roster, &team(Category::Women, "Division 1")).len(), 1);
    }

    #[test]
    fn test_custom_floor_table() {
        let floors = vec![RankingFloor::new(Category::Men, "Cup", 100, 4)];
        let checker = QuotaChecker::with_floors(QuotaSettings::default(), floors);
        let players = [player("1", Gender::Male, "FR", 2000)];
        let roster: Vec<&Player> = players.iter().collect();

        assert_eq!(checker.check(&roster, &team(Category::Men, "Cup")).len(), 1);
        assert!(checker.check(&roster, &team(Category::Men, "Division 1")).is_empty());
    }
}
