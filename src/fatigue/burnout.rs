use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

use super::types::{BurnoutConditions, BurnoutInfo};
use crate::domain::{Match, PlayerId, Team};

/// Classify every player fielded by `team` against the overuse thresholds.
///
/// Only line-ups actually recorded count. Reporting only: the result never
/// feeds back into eligibility.
pub fn team_burnout(team: &Team, matches: &[Match], conditions: &BurnoutConditions) -> Vec<BurnoutInfo> {
    let dates = collect_match_dates(team, matches);
    debug!("Fatigue report for team {}: {} players", team.id, dates.len());

    let mut report: Vec<BurnoutInfo> = dates
        .into_iter()
        .map(|(player, dates)| build_info(player, team, dates, conditions))
        .collect();

    report.sort_by(|a, b| {
        b.matches_played
            .cmp(&a.matches_played)
            .then_with(|| a.player.cmp(&b.player))
    });
    report
}

/// Split a report into (at risk, safe), keeping order
pub fn partition(report: Vec<BurnoutInfo>) -> (Vec<BurnoutInfo>, Vec<BurnoutInfo>) {
    report.into_iter().partition(|info| info.at_risk)
}

fn collect_match_dates(team: &Team, matches: &[Match]) -> HashMap<PlayerId, Vec<NaiveDate>> {
    let mut dates: HashMap<PlayerId, Vec<NaiveDate>> = HashMap::new();

    for game in matches.iter().filter(|m| m.team_id == team.id) {
        let mut fielded: Vec<&PlayerId> = game.roster.iter().collect();
        fielded.sort_unstable();
        fielded.dedup();

        for player in fielded {
            dates.entry(player.clone()).or_default().push(game.date);
        }
    }

    for player_dates in dates.values_mut() {
        player_dates.sort_unstable();
    }
    dates
}

fn build_info(player: PlayerId, team: &Team, dates: Vec<NaiveDate>, conditions: &BurnoutConditions) -> BurnoutInfo {
    let matches_played = dates.len() as u32;
    let longest_streak = longest_streak(&dates, conditions.min_days_between_matches);
    let shortest_rest_days = shortest_gap(&dates);
    let reasons = collect_reasons(matches_played, longest_streak, shortest_rest_days, conditions);

    BurnoutInfo {
        player,
        team_id: team.id,
        matches_played,
        last_match_date: dates.last().copied(),
        longest_streak,
        shortest_rest_days,
        at_risk: !reasons.is_empty(),
        risk_reason: (!reasons.is_empty()).then(|| reasons.join("; ")),
    }
}

fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    later.signed_duration_since(earlier).num_days()
}

/// Longest run of matches each within `min_days` of the previous one
fn longest_streak(dates: &[NaiveDate], min_days: i64) -> u32 {
    if dates.is_empty() {
        return 0;
    }

    let mut current = 1;
    let mut longest = 1;
    for pair in dates.windows(2) {
        if days_between(pair[0], pair[1]) <= min_days {
            current += 1;
        } else {
            current = 1;
        }
        longest = longest.max(current);
    }
    longest
}

fn shortest_gap(dates: &[NaiveDate]) -> Option<i64> {
    dates.windows(2).map(|pair| days_between(pair[0], pair[1])).min()
}

fn collect_reasons(
    matches_played: u32,
    longest_streak: u32,
    shortest_rest_days: Option<i64>,
    conditions: &BurnoutConditions,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if matches_played > conditions.max_matches_per_player {
        reasons.push(format!(
            "{} matches played (max {})",
            matches_played, conditions.max_matches_per_player
        ));
    }

    if longest_streak > conditions.max_consecutive_matches {
        reasons.push(format!(
            "{} consecutive matches (max {})",
            longest_streak, conditions.max_consecutive_matches
        ));
    }

    if let Some(rest) = shortest_rest_days.filter(|&d| d < conditions.min_days_between_matches) {
        reasons.push(format!(
            "only {} rest day(s) between matches (min {})",
            rest, conditions.min_days_between_matches
        ));
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Leg};

    fn team() -> Team {
        Team {
            id: 7,
            name: "Club 2".to_string(),
            tier: 2,
            category: Category::Men,
            division: "Division 2".to_string(),
        }
    }

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap() + chrono::Duration::days(offset)
    }

    fn game(id: i64, team_id: i64, offset: i64, roster: &[&str]) -> Match {
        Match {
            id,
            team_id,
            round: id as u32,
            leg: Leg::First,
            date: day(offset),
            opponent: String::new(),
            score: None,
            result: None,
            roster: roster.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_too_many_matches_flags_player() {
        let matches: Vec<Match> = (0..8).map(|i| game(i, 7, i * 14, &["A", "B"])).collect();
        let conditions = BurnoutConditions {
            max_matches_per_player: 7,
            ..BurnoutConditions::default()
        };

        let report = team_burnout(&team(), &matches[..], &conditions);
        let a = report.iter().find(|i| i.player == "A").unwrap();

        assert_eq!(a.matches_played, 8);
        assert!(a.at_risk);
        let reason = a.risk_reason.as_deref().unwrap();
        assert!(reason.contains('8') && reason.contains('7'), "{reason}");
        assert_eq!(a.last_match_date, Some(day(98)));
    }

    #[test]
    fn test_weekly_schedule_is_safe() {
        let matches: Vec<Match> = (0..5).map(|i| game(i, 7, i * 7, &["A"])).collect();

        let report = team_burnout(&team(), &matches, &BurnoutConditions::default());

        assert_eq!(report.len(), 1);
        assert!(!report[0].at_risk);
        assert_eq!(report[0].risk_reason, None);
        assert_eq!(report[0].longest_streak, 1);
    }

    #[test]
    fn test_back_to_back_days_build_streak() {
        let matches = vec![
            game(1, 7, 0, &["A"]),
            game(2, 7, 1, &["A"]),
            game(3, 7, 2, &["A"]),
            game(4, 7, 3, &["A"]),
            game(5, 7, 20, &["A"]),
        ];

        let report = team_burnout(&team(), &matches, &BurnoutConditions::default());

        assert_eq!(report[0].longest_streak, 4);
        assert!(report[0].at_risk);
        assert!(report[0].risk_reason.as_deref().unwrap().contains("4 consecutive"));
    }

    #[test]
    fn test_same_day_matches_break_rest_rule() {
        let matches = vec![game(1, 7, 5, &["A"]), game(2, 7, 5, &["A"])];

        let report = team_burnout(&team(), &matches, &BurnoutConditions::default());

        assert_eq!(report[0].shortest_rest_days, Some(0));
        assert!(report[0].at_risk);
    }

    #[test]
    fn test_thresholds_overridable_per_call() {
        let matches: Vec<Match> = (0..4).map(|i| game(i, 7, i * 7, &["A"])).collect();
        let strict = BurnoutConditions {
            max_matches_per_player: 3,
            max_consecutive_matches: 3,
            min_days_between_matches: 7,
        };

        let report = team_burnout(&team(), &matches, &strict);

        assert_eq!(report[0].longest_streak, 4);
        let reason = report[0].risk_reason.as_deref().unwrap();
        assert!(reason.contains("4 matches played (max 3)"));
        assert!(reason.contains("4 consecutive matches (max 3)"));
    }

    #[test]
    fn test_other_teams_and_order() {
        let matches = vec![
            game(1, 7, 0, &["B"]),
            game(2, 7, 7, &["A", "B"]),
            game(3, 8, 8, &["A", "C"]),
        ];

        let report = team_burnout(&team(), &matches, &BurnoutConditions::default());
        let players: Vec<_> = report.iter().map(|i| i.player.as_str()).collect();

        assert_eq!(players, vec!["B", "A"]);
        assert_eq!(report[1].matches_played, 1);
    }

    #[test]
    fn test_partition_splits_risk() {
        let mut matches: Vec<Match> = (0..8).map(|i| game(i, 7, i * 10, &["A"])).collect();
        matches.push(game(100, 7, 3, &["B"]));

        let (at_risk, safe) = partition(team_burnout(&team(), &matches, &BurnoutConditions::default()));

        assert_eq!(at_risk.len(), 1);
        assert_eq!(at_risk[0].player, "A");
        assert_eq!(safe[0].player, "B");
    }
}
