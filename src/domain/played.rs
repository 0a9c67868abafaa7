use regex::Regex;

use super::models::Match;

/// Decides whether a fixture is a source of participation
pub struct MatchStatus {
    score_regex: Regex,
}

impl MatchStatus {
    pub fn new() -> Result<Self, regex::Error> {
        let score_regex = Self::compile_regex()?;
        Ok(Self { score_regex })
    }

    fn compile_regex() -> Result<Regex, regex::Error> {
        Regex::new(r"^\s*(\d+)\s*-\s*(\d+)\s*$")
    }

    /// A match is played once a line-up was recorded, or once a real score
    /// (not the 0-0 placeholder of an upcoming fixture) was entered.
    pub fn is_played(&self, game: &Match) -> bool {
        game.has_roster() || self.has_recorded_score(game)
    }

    fn has_recorded_score(&self, game: &Match) -> bool {
        let Some(score) = game.score.as_deref() else {
            return false;
        };

        match self.is_placeholder(score) {
            Some(true) | None => false,
            Some(false) => !game.is_upcoming(),
        }
    }

    /// `None` when the text is not a score at all. Sides are compared as
    /// digit strings so that no score is too large to count.
    pub fn is_placeholder(&self, score: &str) -> Option<bool> {
        let caps = self.score_regex.captures(score)?;
        let zero = |side: &str| side.trim_start_matches('0').is_empty();
        Some(zero(&caps[1]) && zero(&caps[2]))
    }
}
