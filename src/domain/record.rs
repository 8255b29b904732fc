//! Core match-history types shared by the dataset and stats layers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical comparison key derived from a team's display name.
///
/// Two display names mapping to the same key are treated as the same team
/// everywhere in the system. Display strings are kept separately and never
/// normalized in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamKey(String);

impl TeamKey {
    pub fn new(key: String) -> Self {
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for TeamKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of a fixture a team occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

/// Result of a fixture from one team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchOutcome {
    /// League scoring: 3 for a win, 1 for a draw, 0 for a loss
    pub fn points(self) -> u32 {
        match self {
            MatchOutcome::Win => 3,
            MatchOutcome::Draw => 1,
            MatchOutcome::Loss => 0,
        }
    }
}

/// One historical fixture.
///
/// `home_key`/`away_key` are cached at load time with the dataset's
/// normalizer. `metrics` holds the raw values of every discovered numeric
/// column, aligned with the dataset schema's declared columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub home_team: String,
    pub away_team: String,
    pub home_key: TeamKey,
    pub away_key: TeamKey,
    pub home_goals: u32,
    pub away_goals: u32,
    pub date: NaiveDate,
    pub metrics: Vec<Option<f64>>,
}

impl MatchRecord {
    /// Side the team occupied in this fixture, if it took part
    pub fn side_of(&self, key: &TeamKey) -> Option<Side> {
        if &self.home_key == key {
            Some(Side::Home)
        } else if &self.away_key == key {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn involves(&self, key: &TeamKey) -> bool {
        self.side_of(key).is_some()
    }

    /// True when this fixture is a direct meeting of `a` and `b`, either side home
    pub fn is_between(&self, a: &TeamKey, b: &TeamKey) -> bool {
        (&self.home_key == a && &self.away_key == b)
            || (&self.home_key == b && &self.away_key == a)
    }

    /// Goals scored by the given team in this fixture, side-aware
    pub fn goals_for(&self, key: &TeamKey) -> Option<u32> {
        match self.side_of(key)? {
            Side::Home => Some(self.home_goals),
            Side::Away => Some(self.away_goals),
        }
    }

    /// Goals conceded by the given team in this fixture, side-aware
    pub fn goals_against(&self, key: &TeamKey) -> Option<u32> {
        match self.side_of(key)? {
            Side::Home => Some(self.away_goals),
            Side::Away => Some(self.home_goals),
        }
    }

    pub fn total_goals(&self) -> u32 {
        self.home_goals + self.away_goals
    }

    /// Fixture result from the given team's perspective
    pub fn outcome_for(&self, key: &TeamKey) -> Option<MatchOutcome> {
        let scored = self.goals_for(key)?;
        let conceded = self.goals_against(key)?;
        Some(if scored > conceded {
            MatchOutcome::Win
        } else if scored == conceded {
            MatchOutcome::Draw
        } else {
            MatchOutcome::Loss
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(home: &str, away: &str, hg: u32, ag: u32) -> MatchRecord {
        MatchRecord {
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_key: TeamKey::new(home.to_lowercase()),
            away_key: TeamKey::new(away.to_lowercase()),
            home_goals: hg,
            away_goals: ag,
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            metrics: vec![],
        }
    }

    #[test]
    fn test_goals_attribution_is_side_aware() {
        let rec = record("Roma", "Lazio", 2, 1);
        let roma = TeamKey::new("roma".into());
        let lazio = TeamKey::new("lazio".into());

        assert_eq!(rec.goals_for(&roma), Some(2));
        assert_eq!(rec.goals_against(&roma), Some(1));
        assert_eq!(rec.goals_for(&lazio), Some(1));
        assert_eq!(rec.goals_against(&lazio), Some(2));
    }

    #[test]
    fn test_outcome_perspective() {
        let rec = record("Roma", "Lazio", 0, 3);
        let roma = TeamKey::new("roma".into());
        let lazio = TeamKey::new("lazio".into());

        assert_eq!(rec.outcome_for(&roma), Some(MatchOutcome::Loss));
        assert_eq!(rec.outcome_for(&lazio), Some(MatchOutcome::Win));
    }

    #[test]
    fn test_uninvolved_team_has_no_outcome() {
        let rec = record("Roma", "Lazio", 1, 1);
        let milan = TeamKey::new("milan".into());

        assert_eq!(rec.goals_for(&milan), None);
        assert_eq!(rec.outcome_for(&milan), None);
        assert!(!rec.involves(&milan));
    }

    #[test]
    fn test_is_between_ignores_side() {
        let rec = record("Roma", "Lazio", 1, 1);
        let roma = TeamKey::new("roma".into());
        let lazio = TeamKey::new("lazio".into());

        assert!(rec.is_between(&roma, &lazio));
        assert!(rec.is_between(&lazio, &roma));
    }

    #[test]
    fn test_outcome_points() {
        assert_eq!(MatchOutcome::Win.points(), 3);
        assert_eq!(MatchOutcome::Draw.points(), 1);
        assert_eq!(MatchOutcome::Loss.points(), 0);
    }
}
