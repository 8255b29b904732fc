//! Plain-text rendering of a statistics bundle.
//!
//! `render_summary` produces the line-per-statistic text handed to the
//! narrative service and printed by the CLI; `metric_table` renders the
//! per-metric comparison matrix.

use tabled::{Table, Tabled};

use crate::domain::{MatchStatsBundle, MetricLeader};

/// One line per base statistic, one line per metric comparison.
pub fn render_summary(bundle: &MatchStatsBundle) -> String {
    let t1 = &bundle.team1;
    let t2 = &bundle.team2;
    let mut lines = vec![
        format!("Head-to-head: {} vs {}", t1.display_name, t2.display_name),
        format!("Total matches: {}", bundle.total_matches),
        format!(
            "{} wins: {} ({:.1}%)",
            t1.display_name, t1.wins, t1.win_pct
        ),
        format!(
            "{} wins: {} ({:.1}%)",
            t2.display_name, t2.wins, t2.win_pct
        ),
        format!("Draws: {} ({:.1}%)", bundle.draws, bundle.draw_pct),
        format!(
            "{} avg goals scored/conceded: {:.1}/{:.1}",
            t1.display_name, t1.avg_scored, t1.avg_conceded
        ),
        format!(
            "{} avg goals scored/conceded: {:.1}/{:.1}",
            t2.display_name, t2.avg_scored, t2.avg_conceded
        ),
        format!(
            "Recent form: {}={} pts ({} matches) | {}={} pts ({} matches)",
            t1.display_name,
            t1.form_points,
            t1.form_matches,
            t2.display_name,
            t2.form_points,
            t2.form_matches
        ),
        format!(
            "Goal lines: Over 0.5={:.1}% | Over 1.5={:.1}% | Over 2.5={:.1}%",
            bundle.goal_lines.over_0_5, bundle.goal_lines.over_1_5, bundle.goal_lines.over_2_5
        ),
        format!(
            "Scored in match: {}={:.1}% | {}={:.1}% | both={:.1}%",
            t1.display_name,
            t1.scored_in_match_pct,
            t2.display_name,
            t2.scored_in_match_pct,
            bundle.both_scored_pct
        ),
        format!("Forecast result: {}", bundle.forecast.result),
        format!("Forecast double chance: {}", bundle.forecast.double_chance),
        format!("Forecast goal line: {}", bundle.forecast.goal_line),
        format!("Forecast both score: {}", bundle.forecast.both_score),
    ];

    for row in &bundle.metric_comparisons {
        let h2h = row
            .head_to_head_avg
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{}: {}={:.2} | {}={:.2} | head-to-head={} | edge: {}",
            row.label,
            t1.display_name,
            row.team1_avg,
            t2.display_name,
            row.team2_avg,
            h2h,
            leader_name(bundle, row.leader),
        ));
    }

    lines.join("\n")
}

fn leader_name(bundle: &MatchStatsBundle, leader: MetricLeader) -> String {
    match leader {
        MetricLeader::Team1 => bundle.team1.display_name.clone(),
        MetricLeader::Team2 => bundle.team2.display_name.clone(),
        MetricLeader::Level => "level".to_string(),
    }
}

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Team 1 avg")]
    team1: String,
    #[tabled(rename = "Team 2 avg")]
    team2: String,
    #[tabled(rename = "H2H avg")]
    head_to_head: String,
    #[tabled(rename = "Edge")]
    edge: String,
}

/// Human-readable table of the per-metric comparisons; empty string when
/// no metric rows were computed.
pub fn metric_table(bundle: &MatchStatsBundle) -> String {
    if bundle.metric_comparisons.is_empty() {
        return String::new();
    }
    let rows: Vec<MetricRow> = bundle
        .metric_comparisons
        .iter()
        .map(|row| MetricRow {
            metric: row.label.clone(),
            team1: format!("{:.2}", row.team1_avg),
            team2: format!("{:.2}", row.team2_avg),
            head_to_head: row
                .head_to_head_avg
                .map(|v| format!("{v:.2}"))
                .unwrap_or_else(|| "-".to_string()),
            edge: leader_name(bundle, row.leader),
        })
        .collect();
    Table::new(rows).to_string()
}
