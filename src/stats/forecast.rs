//! Deterministic forecast rules.
//!
//! Frequency percentages and scoring averages go in, fixed labels come out.
//! All thresholds are exclusive: equality falls to the lower bucket.

use crate::domain::{BothScoreForecast, DoubleChanceForecast, GoalLineForecast, ResultForecast};

/// Minimum average goals scored per direct meeting, per team, for a GOAL call
const BOTH_SCORE_THRESHOLD: f64 = 0.8;

/// Outcome with the greatest percentage; ties resolved by the fixed
/// preference 1 > X > 2.
pub fn result_forecast(pct_home: f64, pct_draw: f64, pct_away: f64) -> ResultForecast {
    if pct_home >= pct_draw && pct_home >= pct_away {
        ResultForecast::HomeWin
    } else if pct_draw >= pct_away {
        ResultForecast::Draw
    } else {
        ResultForecast::AwayWin
    }
}

/// Double-chance pick over the three pair sums.
///
/// A unique strict maximum among 1X, X2, and 12 selects that pair; any tie
/// for the maximum defaults to "12" (covers the all-draws case where the 1X
/// and X2 sums are equal).
pub fn double_chance_forecast(
    pct_home: f64,
    pct_draw: f64,
    pct_away: f64,
) -> DoubleChanceForecast {
    let home_or_draw = pct_home + pct_draw;
    let draw_or_away = pct_draw + pct_away;
    let either_team = pct_home + pct_away;

    if home_or_draw > draw_or_away && home_or_draw > either_team {
        DoubleChanceForecast::HomeOrDraw
    } else if draw_or_away > home_or_draw && draw_or_away > either_team {
        DoubleChanceForecast::DrawOrAway
    } else {
        DoubleChanceForecast::EitherTeam
    }
}

/// Goal-line pick from the combined scoring averages of both teams.
pub fn goal_line_forecast(combined_avg_goals: f64) -> GoalLineForecast {
    if combined_avg_goals > 2.5 {
        GoalLineForecast::Over25
    } else if combined_avg_goals > 1.5 {
        GoalLineForecast::Over15
    } else {
        GoalLineForecast::Over05
    }
}

/// GOAL only when both teams' direct-meeting scoring averages strictly
/// exceed the threshold.
pub fn both_score_forecast(avg_scored_team1: f64, avg_scored_team2: f64) -> BothScoreForecast {
    if avg_scored_team1 > BOTH_SCORE_THRESHOLD && avg_scored_team2 > BOTH_SCORE_THRESHOLD {
        BothScoreForecast::Goal
    } else {
        BothScoreForecast::NoGoal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_forecast_picks_strict_max() {
        assert_eq!(result_forecast(66.7, 0.0, 33.3), ResultForecast::HomeWin);
        assert_eq!(result_forecast(10.0, 70.0, 20.0), ResultForecast::Draw);
        assert_eq!(result_forecast(10.0, 20.0, 70.0), ResultForecast::AwayWin);
    }

    #[test]
    fn test_result_forecast_tie_prefers_home_then_draw() {
        // three-way tie → 1
        assert_eq!(
            result_forecast(33.3, 33.3, 33.3),
            ResultForecast::HomeWin
        );
        // X vs 2 tie with 1 below → X
        assert_eq!(result_forecast(20.0, 40.0, 40.0), ResultForecast::Draw);
        // 1 vs 2 tie → 1
        assert_eq!(result_forecast(40.0, 20.0, 40.0), ResultForecast::HomeWin);
    }

    #[test]
    fn test_double_chance_unique_max() {
        // 1X = 80, X2 = 50, 12 = 70 → 1X
        assert_eq!(
            double_chance_forecast(50.0, 30.0, 20.0),
            DoubleChanceForecast::HomeOrDraw
        );
        // 1X = 50, X2 = 80, 12 = 70 → X2
        assert_eq!(
            double_chance_forecast(20.0, 30.0, 50.0),
            DoubleChanceForecast::DrawOrAway
        );
        // 1X = 60, X2 = 50, 12 = 90 → 12
        assert_eq!(
            double_chance_forecast(50.0, 10.0, 40.0),
            DoubleChanceForecast::EitherTeam
        );
    }

    #[test]
    fn test_double_chance_tie_defaults_to_either_team() {
        // all draws: 1X = X2 = 100 tie → 12
        assert_eq!(
            double_chance_forecast(0.0, 100.0, 0.0),
            DoubleChanceForecast::EitherTeam
        );
        // symmetric wins, no draws: 1X = X2 = 50, 12 = 100 unique → 12
        assert_eq!(
            double_chance_forecast(50.0, 0.0, 50.0),
            DoubleChanceForecast::EitherTeam
        );
    }

    #[test]
    fn test_goal_line_thresholds_are_exclusive() {
        assert_eq!(goal_line_forecast(3.0), GoalLineForecast::Over25);
        // exactly 2.5 falls to the lower bucket
        assert_eq!(goal_line_forecast(2.5), GoalLineForecast::Over15);
        assert_eq!(goal_line_forecast(2.0), GoalLineForecast::Over15);
        // exactly 1.5 falls to the lower bucket
        assert_eq!(goal_line_forecast(1.5), GoalLineForecast::Over05);
        assert_eq!(goal_line_forecast(0.0), GoalLineForecast::Over05);
    }

    #[test]
    fn test_both_score_requires_strict_threshold() {
        assert_eq!(both_score_forecast(1.2, 0.9), BothScoreForecast::Goal);
        // exactly 0.8 on either side is not enough
        assert_eq!(both_score_forecast(0.8, 2.0), BothScoreForecast::NoGoal);
        assert_eq!(both_score_forecast(2.0, 0.8), BothScoreForecast::NoGoal);
        assert_eq!(both_score_forecast(0.5, 0.5), BothScoreForecast::NoGoal);
    }
}
