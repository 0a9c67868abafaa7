use log::{debug, trace};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::domain::{Category, Leg, Match, MatchStatus, PlayerId, Team, TeamId, Tier};

/// Matches played per tier
pub type TierCounts = BTreeMap<Tier, u32>;

/// One line-up a player appeared in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub team_id: TeamId,
    pub tier: Tier,
    pub category: Category,
}

/// Participation of one player within a leg
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerHistory {
    by_category: BTreeMap<Category, TierCounts>,
    rounds: BTreeMap<u32, Vec<Appearance>>,
}

impl PlayerHistory {
    /// History made of bare per-tier counts, with no round information
    pub fn from_counts(category: Category, counts: TierCounts) -> Self {
        let mut by_category = BTreeMap::new();
        by_category.insert(category, counts);
        Self {
            by_category,
            rounds: BTreeMap::new(),
        }
    }

    fn record(&mut self, round: u32, appearance: Appearance) {
        *self
            .by_category
            .entry(appearance.category)
            .or_default()
            .entry(appearance.tier)
            .or_insert(0) += 1;
        self.rounds.entry(round).or_default().push(appearance);
    }

    /// Counts for one category, or summed over both when `None`
    pub fn tier_counts(&self, category: Option<Category>) -> TierCounts {
        match category {
            Some(category) => self.by_category.get(&category).cloned().unwrap_or_default(),
            None => {
                let mut merged = TierCounts::new();
                for counts in self.by_category.values() {
                    for (tier, count) in counts {
                        *merged.entry(*tier).or_insert(0) += count;
                    }
                }
                merged
            }
        }
    }

    pub fn total_matches(&self) -> u32 {
        self.by_category.values().flat_map(|c| c.values()).sum()
    }

    pub fn appearances_in_round(&self, round: u32) -> &[Appearance] {
        self.rounds.get(&round).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Strongest tier the player was fielded at in a round
    pub fn round_tier(&self, round: u32) -> Option<Tier> {
        self.appearances_in_round(round).iter().map(|a| a.tier).min()
    }

    pub fn is_empty(&self) -> bool {
        self.total_matches() == 0
    }
}

/// Per-player participation derived from a snapshot of matches.
///
/// Rebuilt from scratch for every validation pass; it holds no reference to
/// the store the matches came from.
#[derive(Debug, Clone)]
pub struct ParticipationIndex {
    leg: Leg,
    players: HashMap<PlayerId, PlayerHistory>,
    played_rounds: HashSet<(TeamId, u32)>,
}

impl ParticipationIndex {
    pub fn empty(leg: Leg) -> Self {
        Self {
            leg,
            players: HashMap::new(),
            played_rounds: HashSet::new(),
        }
    }

    /// Fold every played match of `leg` into per-player tallies, keyed by
    /// the tier of the team that fielded the line-up.
    pub fn build(matches: &[Match], teams: &[Team], leg: Leg, status: &MatchStatus) -> Self {
        let teams_by_id: HashMap<TeamId, &Team> = teams.iter().map(|t| (t.id, t)).collect();
        let mut index = Self::empty(leg);

        for game in matches.iter().filter(|m| m.leg == leg) {
            if !status.is_played(game) {
                trace!("Match {} not played yet, skipping", game.id);
                continue;
            }

            let Some(team) = teams_by_id.get(&game.team_id) else {
                debug!("Match {} belongs to unknown team {}, skipping", game.id, game.team_id);
                continue;
            };

            index.record_match(game, team);
        }

        debug!(
            "Built {} leg participation index for {} players",
            leg,
            index.players.len()
        );
        index
    }

    fn record_match(&mut self, game: &Match, team: &Team) {
        self.played_rounds.insert((team.id, game.round));

        let appearance = Appearance {
            team_id: team.id,
            tier: team.tier,
            category: team.category,
        };

        let mut seen = HashSet::new();
        for player in game.roster.iter().filter(|p| seen.insert(p.as_str())) {
            self.players
                .entry(player.clone())
                .or_default()
                .record(game.round, appearance);
        }
    }

    pub fn leg(&self) -> Leg {
        self.leg
    }

    pub fn history(&self, player: &str) -> Option<&PlayerHistory> {
        self.players.get(player)
    }

    /// Matches per tier for every player, all categories merged
    pub fn tier_counts(&self) -> HashMap<PlayerId, TierCounts> {
        self.players
            .iter()
            .map(|(id, history)| (id.clone(), history.tier_counts(None)))
            .collect()
    }

    /// Strongest tier each player was fielded at in `round`
    pub fn round_tiers(&self, round: u32) -> HashMap<PlayerId, Tier> {
        self.players
            .iter()
            .filter_map(|(id, history)| history.round_tier(round).map(|t| (id.clone(), t)))
            .collect()
    }

    pub fn is_round_played(&self, team_id: TeamId, round: u32) -> bool {
        self.played_rounds.contains(&(team_id, round))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UPCOMING_RESULT;
    use chrono::NaiveDate;

    fn team(id: TeamId, tier: Tier, category: Category) -> Team {
        Team {
            id,
            name: format!("Team {id}"),
            tier,
            category,
            division: String::new(),
        }
    }

    fn game(id: i64, team_id: TeamId, round: u32, leg: Leg, roster: &[&str]) -> Match {
        Match {
            id,
            team_id,
            round,
            leg,
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap() + chrono::Duration::days(round as i64 * 14),
            opponent: String::new(),
            score: None,
            result: None,
            roster: roster.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn teams() -> Vec<Team> {
        vec![
            team(1, 1, Category::Men),
            team(2, 2, Category::Men),
            team(3, 3, Category::Men),
            team(4, 1, Category::Women),
        ]
    }

    #[test]
    fn test_counts_are_keyed_by_team_tier() {
        let status = MatchStatus::new().unwrap();
        let matches = vec![
            game(1, 1, 1, Leg::First, &["A", "B"]),
            game(2, 2, 2, Leg::First, &["A"]),
            game(3, 1, 3, Leg::First, &["A"]),
        ];

        let index = ParticipationIndex::build(&matches, &teams(), Leg::First, &status);
        let counts = index.tier_counts();

        assert_eq!(counts["A"], TierCounts::from([(1, 2), (2, 1)]));
        assert_eq!(counts["B"], TierCounts::from([(1, 1)]));
    }

    #[test]
    fn test_other_leg_is_ignored() {
        let status = MatchStatus::new().unwrap();
        let matches = vec![
            game(1, 1, 1, Leg::First, &["A"]),
            game(2, 1, 1, Leg::Second, &["A"]),
        ];

        let index = ParticipationIndex::build(&matches, &teams(), Leg::Second, &status);

        assert_eq!(index.history("A").unwrap().total_matches(), 1);
        assert_eq!(index.leg(), Leg::Second);
    }

    #[test]
    fn test_empty_history_yields_empty_index() {
        let status = MatchStatus::new().unwrap();

        let index = ParticipationIndex::build(&[], &teams(), Leg::First, &status);

        assert!(index.is_empty());
        assert!(index.tier_counts().is_empty());
        assert!(index.history("A").is_none());
    }

    #[test]
    fn test_unknown_team_and_unplayed_matches_skipped() {
        let status = MatchStatus::new().unwrap();
        let mut upcoming = game(2, 1, 2, Leg::First, &[]);
        upcoming.score = Some("0-0".to_string());
        upcoming.result = Some(UPCOMING_RESULT.to_string());
        let matches = vec![game(1, 99, 1, Leg::First, &["A"]), upcoming];

        let index = ParticipationIndex::build(&matches, &teams(), Leg::First, &status);

        assert!(index.is_empty());
        assert!(!index.is_round_played(1, 2));
    }

    #[test]
    fn test_played_round_without_roster_is_flagged() {
        let status = MatchStatus::new().unwrap();
        let mut scored = game(1, 2, 4, Leg::First, &[]);
        scored.score = Some("10-4".to_string());

        let index = ParticipationIndex::build(&[scored], &teams(), Leg::First, &status);

        assert!(index.is_round_played(2, 4));
        assert!(index.is_empty());
    }

    #[test]
    fn test_categories_kept_apart() {
        let status = MatchStatus::new().unwrap();
        let matches = vec![
            game(1, 1, 1, Leg::First, &["F"]),
            game(2, 4, 2, Leg::First, &["F"]),
        ];

        let index = ParticipationIndex::build(&matches, &teams(), Leg::First, &status);
        let history = index.history("F").unwrap();

        assert_eq!(history.tier_counts(Some(Category::Women)), TierCounts::from([(1, 1)]));
        assert_eq!(history.tier_counts(Some(Category::Men)), TierCounts::from([(1, 1)]));
        assert_eq!(history.tier_counts(None), TierCounts::from([(1, 2)]));
    }

    #[test]
    fn test_round_tiers_pick_strongest_team() {
        let status = MatchStatus::new().unwrap();
        let matches = vec![
            game(1, 3, 1, Leg::First, &["A", "B"]),
            game(2, 2, 1, Leg::First, &["A"]),
        ];

        let index = ParticipationIndex::build(&matches, &teams(), Leg::First, &status);
        let tiers = index.round_tiers(1);

        assert_eq!(tiers["A"], 2);
        assert_eq!(tiers["B"], 3);
        assert!(index.round_tiers(2).is_empty());
    }

    #[test]
    fn test_duplicate_roster_entry_counts_once() {
        let status = MatchStatus::new().unwrap();
        let matches = vec![game(1, 1, 1, Leg::First, &["A", "A"])];

        let index = ParticipationIndex::build(&matches, &teams(), Leg::First, &status);

        assert_eq!(index.history("A").unwrap().total_matches(), 1);
    }
}
