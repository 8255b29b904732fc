//! Statistics & forecast engine.
//!
//! Consumes an immutable dataset snapshot and two display names, and
//! produces the full per-query statistics bundle. Pure and synchronous:
//! no I/O, no shared mutable state, safe to call from parallel readers.

use tracing::debug;

use crate::dataset::{Dataset, MetricColumn};
use crate::domain::{
    ForecastSet, GoalLinePcts, MatchRecord, MatchStatsBundle, MatchOutcome, MetricLeader,
    PerMetricComparison, Side, TeamKey, TeamStats,
};

use super::aggregate::{head_to_head, recent_form, team_history};
use super::forecast;

/// Default recent-form window (matches)
pub const DEFAULT_FORM_WINDOW: usize = 5;

/// Head-to-head statistics engine
#[derive(Debug, Clone)]
pub struct StatsEngine {
    form_window: usize,
}

impl Default for StatsEngine {
    fn default() -> Self {
        Self {
            form_window: DEFAULT_FORM_WINDOW,
        }
    }
}

impl StatsEngine {
    pub fn new(form_window: usize) -> Self {
        Self { form_window }
    }

    /// Compute the statistics bundle for a pairing.
    ///
    /// Returns `None` when there is no meaningful head-to-head history:
    /// no prior direct meetings, a blank team name, or both names
    /// normalizing to the same team. `None` is a normal outcome, not a
    /// failure.
    pub fn compute(
        &self,
        dataset: &Dataset,
        team1: &str,
        team2: &str,
    ) -> Option<MatchStatsBundle> {
        let key1 = dataset.normalizer().key(team1);
        let key2 = dataset.normalizer().key(team2);

        if key1.is_empty() || key2.is_empty() || key1 == key2 {
            debug!(team1, team2, "query rejected: blank or identical team keys");
            return None;
        }

        let records = dataset.records();
        let direct = head_to_head(records, &key1, &key2);
        if direct.is_empty() {
            debug!(team1, team2, "no direct meetings in dataset");
            return None;
        }

        let total = direct.len();
        let wins1 = count_wins(&direct, &key1);
        let wins2 = count_wins(&direct, &key2);
        // Derived by subtraction so the three counts always sum to total
        let draws = total - wins1 - wins2;

        let pct1 = pct(wins1, total);
        let pct2 = pct(wins2, total);
        let pct_draw = pct(draws, total);

        let history1 = team_history(records, &key1);
        let history2 = team_history(records, &key2);

        let team1_stats = self.team_stats(team1, &key1, wins1, pct1, &direct, &history1);
        let team2_stats = self.team_stats(team2, &key2, wins2, pct2, &direct, &history2);

        let combined_avg_goals = team1_stats.avg_scored + team2_stats.avg_scored;

        let goal_lines = GoalLinePcts {
            over_0_5: pct(direct.iter().filter(|r| r.total_goals() > 0).count(), total),
            over_1_5: pct(direct.iter().filter(|r| r.total_goals() > 1).count(), total),
            over_2_5: pct(direct.iter().filter(|r| r.total_goals() > 2).count(), total),
        };
        let both_scored = direct
            .iter()
            .filter(|r| r.home_goals > 0 && r.away_goals > 0)
            .count();

        let forecast = ForecastSet {
            result: forecast::result_forecast(pct1, pct_draw, pct2),
            double_chance: forecast::double_chance_forecast(pct1, pct_draw, pct2),
            goal_line: forecast::goal_line_forecast(combined_avg_goals),
            both_score: forecast::both_score_forecast(
                team1_stats.avg_scored,
                team2_stats.avg_scored,
            ),
        };

        let metric_comparisons = compare_metrics(
            dataset.schema().metrics(),
            &direct,
            &history1,
            &history2,
            &key1,
            &key2,
        );

        debug!(
            team1,
            team2,
            total,
            wins1,
            wins2,
            draws,
            metrics = metric_comparisons.len(),
            "head-to-head bundle computed"
        );

        Some(MatchStatsBundle {
            team1: team1_stats,
            team2: team2_stats,
            total_matches: total as u32,
            draws: draws as u32,
            draw_pct: pct_draw,
            combined_avg_goals,
            both_scored_pct: pct(both_scored, total),
            goal_lines,
            forecast,
            metric_comparisons,
        })
    }

    fn team_stats(
        &self,
        display_name: &str,
        key: &TeamKey,
        wins: usize,
        win_pct: f64,
        direct: &[&MatchRecord],
        history: &[&MatchRecord],
    ) -> TeamStats {
        let total = direct.len();
        let avg_scored = mean(direct.iter().filter_map(|r| r.goals_for(key)).map(f64::from))
            .unwrap_or(0.0);
        let avg_conceded = mean(
            direct
                .iter()
                .filter_map(|r| r.goals_against(key))
                .map(f64::from),
        )
        .unwrap_or(0.0);

        let recent = recent_form(history, self.form_window);
        let form_points: u32 = recent
            .iter()
            .filter_map(|r| r.outcome_for(key))
            .map(MatchOutcome::points)
            .sum();

        let scored_in = direct
            .iter()
            .filter(|r| r.goals_for(key).is_some_and(|g| g > 0))
            .count();

        TeamStats {
            display_name: display_name.to_string(),
            wins: wins as u32,
            win_pct,
            avg_scored,
            avg_conceded,
            form_points,
            form_matches: recent.len(),
            scored_in_match_pct: pct(scored_in, total),
        }
    }
}

fn count_wins(direct: &[&MatchRecord], key: &TeamKey) -> usize {
    direct
        .iter()
        .filter(|r| r.outcome_for(key) == Some(MatchOutcome::Win))
        .count()
}

fn pct(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        sum += v;
        n += 1;
    }
    (n > 0).then(|| sum / n as f64)
}

/// Metric value attributed to one team in one record, side-aware for
/// paired columns.
fn metric_for_team(record: &MatchRecord, key: &TeamKey, column: &MetricColumn) -> Option<f64> {
    match column {
        MetricColumn::Paired { home, away, .. } => match record.side_of(key)? {
            Side::Home => record.metrics.get(*home).copied().flatten(),
            Side::Away => record.metrics.get(*away).copied().flatten(),
        },
        MetricColumn::Single { col, .. } => record.metrics.get(*col).copied().flatten(),
    }
}

/// Average of a metric across the direct meetings; paired columns
/// contribute both sides' samples.
fn metric_h2h_avg(direct: &[&MatchRecord], column: &MetricColumn) -> Option<f64> {
    match column {
        MetricColumn::Paired { home, away, .. } => mean(
            direct
                .iter()
                .flat_map(|r| {
                    [
                        r.metrics.get(*home).copied().flatten(),
                        r.metrics.get(*away).copied().flatten(),
                    ]
                })
                .flatten(),
        ),
        MetricColumn::Single { col, .. } => {
            mean(direct.iter().filter_map(|r| r.metrics.get(*col).copied().flatten()))
        }
    }
}

fn compare_metrics(
    columns: &[MetricColumn],
    direct: &[&MatchRecord],
    history1: &[&MatchRecord],
    history2: &[&MatchRecord],
    key1: &TeamKey,
    key2: &TeamKey,
) -> Vec<PerMetricComparison> {
    columns
        .iter()
        .filter_map(|column| {
            // Own-history averages; a team with no numeric data for this
            // metric drops the whole row, silently.
            let team1_avg = mean(
                history1
                    .iter()
                    .filter_map(|r| metric_for_team(r, key1, column)),
            )?;
            let team2_avg = mean(
                history2
                    .iter()
                    .filter_map(|r| metric_for_team(r, key2, column)),
            )?;

            let leader = match team1_avg.partial_cmp(&team2_avg) {
                Some(std::cmp::Ordering::Greater) => MetricLeader::Team1,
                Some(std::cmp::Ordering::Less) => MetricLeader::Team2,
                _ => MetricLeader::Level,
            };

            Some(PerMetricComparison {
                label: column.label().to_string(),
                team1_avg,
                team2_avg,
                head_to_head_avg: metric_h2h_avg(direct, column),
                leader,
            })
        })
        .collect()
}
