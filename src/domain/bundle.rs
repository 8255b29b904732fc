//! Per-query statistics bundle and forecast labels.
//!
//! A `MatchStatsBundle` is the ephemeral result of one head-to-head query:
//! created on query, rendered, discarded. Nothing here is persisted.

use serde::{Deserialize, Serialize};

/// Aggregates for one team within a head-to-head query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStats {
    /// Display name as passed to the query
    pub display_name: String,
    /// Wins in direct meetings
    pub wins: u32,
    /// Win share of direct meetings, 0..=100
    pub win_pct: f64,
    /// Mean goals scored per direct meeting
    pub avg_scored: f64,
    /// Mean goals conceded per direct meeting
    pub avg_conceded: f64,
    /// Form points over the recent-form window (3/1/0 per match)
    pub form_points: u32,
    /// Matches that actually fed the form window (may be < window)
    pub form_matches: usize,
    /// Share of direct meetings in which this team scored, 0..=100
    pub scored_in_match_pct: f64,
}

/// Share of direct meetings clearing each total-goals line, 0..=100
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GoalLinePcts {
    pub over_0_5: f64,
    pub over_1_5: f64,
    pub over_2_5: f64,
}

/// Match result forecast label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultForecast {
    #[serde(rename = "1")]
    HomeWin,
    #[serde(rename = "X")]
    Draw,
    #[serde(rename = "2")]
    AwayWin,
}

impl std::fmt::Display for ResultForecast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultForecast::HomeWin => write!(f, "1"),
            ResultForecast::Draw => write!(f, "X"),
            ResultForecast::AwayWin => write!(f, "2"),
        }
    }
}

/// Double-chance forecast label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoubleChanceForecast {
    #[serde(rename = "1X")]
    HomeOrDraw,
    #[serde(rename = "X2")]
    DrawOrAway,
    #[serde(rename = "12")]
    EitherTeam,
}

impl std::fmt::Display for DoubleChanceForecast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DoubleChanceForecast::HomeOrDraw => write!(f, "1X"),
            DoubleChanceForecast::DrawOrAway => write!(f, "X2"),
            DoubleChanceForecast::EitherTeam => write!(f, "12"),
        }
    }
}

/// Over/Under goal-line forecast label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalLineForecast {
    #[serde(rename = "OVER 2.5")]
    Over25,
    #[serde(rename = "OVER 1.5")]
    Over15,
    #[serde(rename = "OVER 0.5")]
    Over05,
}

impl std::fmt::Display for GoalLineForecast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalLineForecast::Over25 => write!(f, "OVER 2.5"),
            GoalLineForecast::Over15 => write!(f, "OVER 1.5"),
            GoalLineForecast::Over05 => write!(f, "OVER 0.5"),
        }
    }
}

/// Both-teams-to-score forecast label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BothScoreForecast {
    #[serde(rename = "GOAL")]
    Goal,
    #[serde(rename = "NOGOAL")]
    NoGoal,
}

impl std::fmt::Display for BothScoreForecast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BothScoreForecast::Goal => write!(f, "GOAL"),
            BothScoreForecast::NoGoal => write!(f, "NOGOAL"),
        }
    }
}

/// The four derived forecast labels for a pairing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForecastSet {
    pub result: ResultForecast,
    pub double_chance: DoubleChanceForecast,
    pub goal_line: GoalLineForecast,
    pub both_score: BothScoreForecast,
}

/// Which team leads a metric comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricLeader {
    Team1,
    Team2,
    Level,
}

/// One row of the per-metric comparison table.
///
/// Own-history averages cover each team's full match history; the
/// head-to-head average is restricted to direct meetings and may be absent
/// when the metric was never recorded there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerMetricComparison {
    pub label: String,
    pub team1_avg: f64,
    pub team2_avg: f64,
    pub head_to_head_avg: Option<f64>,
    pub leader: MetricLeader,
}

/// Full result of one head-to-head query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchStatsBundle {
    pub team1: TeamStats,
    pub team2: TeamStats,
    /// Direct meetings found
    pub total_matches: u32,
    pub draws: u32,
    pub draw_pct: f64,
    /// Sum of both teams' scoring averages in direct meetings
    pub combined_avg_goals: f64,
    /// Share of direct meetings where both teams scored, 0..=100
    pub both_scored_pct: f64,
    pub goal_lines: GoalLinePcts,
    pub forecast: ForecastSet,
    pub metric_comparisons: Vec<PerMetricComparison>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_display_labels() {
        assert_eq!(ResultForecast::HomeWin.to_string(), "1");
        assert_eq!(ResultForecast::Draw.to_string(), "X");
        assert_eq!(ResultForecast::AwayWin.to_string(), "2");
        assert_eq!(DoubleChanceForecast::HomeOrDraw.to_string(), "1X");
        assert_eq!(DoubleChanceForecast::DrawOrAway.to_string(), "X2");
        assert_eq!(DoubleChanceForecast::EitherTeam.to_string(), "12");
        assert_eq!(GoalLineForecast::Over25.to_string(), "OVER 2.5");
        assert_eq!(BothScoreForecast::NoGoal.to_string(), "NOGOAL");
    }

    #[test]
    fn test_forecast_serde_labels_match_display() {
        let json = serde_json::to_string(&GoalLineForecast::Over15).unwrap();
        assert_eq!(json, "\"OVER 1.5\"");
        let json = serde_json::to_string(&ResultForecast::Draw).unwrap();
        assert_eq!(json, "\"X\"");
    }
}
