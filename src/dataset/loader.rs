//! CSV dataset loader.
//!
//! Reads the match-history CSV, validates the required columns, discovers
//! numeric metric columns, applies the recency window, and builds the
//! immutable snapshot with normalized team keys cached on every record.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, warn};

use crate::config::DatasetConfig;
use crate::domain::MatchRecord;
use crate::error::Result;
use crate::stats::normalize::Normalizer;

use super::schema::{pair_metric_columns, resolve_required, DatasetSchema};
use super::snapshot::Dataset;

/// Accepted date spellings, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

/// Cell contents treated as missing data
const EMPTY_MARKERS: &[&str] = &["", "na", "n/a", "nan", "null"];

/// A discovered numeric column: header name plus its slot among the
/// candidate (non-required) columns
struct NumericColumn {
    name: String,
    cand_idx: usize,
}

struct RawRow {
    date: NaiveDate,
    home_team: String,
    away_team: String,
    home_goals: u32,
    away_goals: u32,
    /// Raw cells of every candidate metric column, in candidate order
    extras: Vec<String>,
}

/// Load and validate the match history described by `cfg`.
pub fn load_dataset(cfg: &DatasetConfig) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(&cfg.path)?;

    // Duplicate headers: first occurrence wins, later ones are ignored
    let mut headers: Vec<(String, usize)> = Vec::new();
    for (idx, name) in reader.headers()?.iter().enumerate() {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        if headers
            .iter()
            .any(|(seen, _)| seen.eq_ignore_ascii_case(name))
        {
            debug!(column = name, "duplicate header dropped");
            continue;
        }
        headers.push((name.to_string(), idx));
    }

    let required = resolve_required(&headers)?;
    let candidates: Vec<(String, usize)> = headers
        .iter()
        .filter(|(_, idx)| !required.contains(*idx))
        .cloned()
        .collect();

    let mut rows: Vec<RawRow> = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record = record?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let Some(date) = parse_date(cell(required.date)) else {
            skipped += 1;
            debug!(row = ?record.position().map(|p| p.line()), "skipped row: bad date");
            continue;
        };
        let home_team = cell(required.home_team).to_string();
        let away_team = cell(required.away_team).to_string();
        if home_team.is_empty() || away_team.is_empty() {
            skipped += 1;
            debug!(row = ?record.position().map(|p| p.line()), "skipped row: blank team name");
            continue;
        }
        let (Some(home_goals), Some(away_goals)) = (
            parse_goals(cell(required.home_goals)),
            parse_goals(cell(required.away_goals)),
        ) else {
            skipped += 1;
            debug!(row = ?record.position().map(|p| p.line()), "skipped row: bad goal count");
            continue;
        };

        let extras = candidates
            .iter()
            .map(|(_, idx)| cell(*idx).to_string())
            .collect();

        rows.push(RawRow {
            date,
            home_team,
            away_team,
            home_goals,
            away_goals,
            extras,
        });
    }

    // Recency window: keep the last `years_back` calendar years relative
    // to the newest match
    if let (Some(years_back), Some(max_year)) = (
        cfg.years_back,
        rows.iter().map(|r| r.date.year()).max(),
    ) {
        let cutoff = max_year - years_back as i32 + 1;
        let before = rows.len();
        rows.retain(|r| r.date.year() >= cutoff);
        if rows.len() < before {
            debug!(
                dropped = before - rows.len(),
                cutoff, "recency window applied"
            );
        }
    }

    // A candidate column is numeric when it has at least one parseable
    // non-empty cell and no unparseable non-empty cell
    let mut numeric: Vec<NumericColumn> = Vec::new();
    for (cand_idx, (name, _)) in candidates.iter().enumerate() {
        let mut any_value = false;
        let mut invalid = false;
        for row in &rows {
            match parse_metric(&row.extras[cand_idx]) {
                ParsedCell::Missing => {}
                ParsedCell::Value(_) => any_value = true,
                ParsedCell::Invalid => {
                    invalid = true;
                    break;
                }
            }
        }
        if any_value && !invalid {
            debug!(column = name.as_str(), "numeric metric column declared");
            numeric.push(NumericColumn {
                name: name.clone(),
                cand_idx,
            });
        }
    }

    let schema = DatasetSchema::new(pair_metric_columns(
        &numeric
            .iter()
            .enumerate()
            .map(|(metric_idx, col)| (col.name.clone(), metric_idx))
            .collect::<Vec<_>>(),
    ));

    let normalizer = Normalizer::new(cfg.strip_prefixes);
    let records: Vec<MatchRecord> = rows
        .into_iter()
        .filter_map(|row| {
            let home_key = normalizer.key(&row.home_team);
            let away_key = normalizer.key(&row.away_team);
            // a team never plays itself; such rows are data defects
            if home_key == away_key {
                skipped += 1;
                debug!(
                    home = row.home_team.as_str(),
                    away = row.away_team.as_str(),
                    "skipped row: both sides normalize to the same team"
                );
                return None;
            }
            let metrics = numeric
                .iter()
                .map(|col| match parse_metric(&row.extras[col.cand_idx]) {
                    ParsedCell::Value(v) => Some(v),
                    _ => None,
                })
                .collect();
            Some(MatchRecord {
                home_key,
                away_key,
                home_team: row.home_team,
                away_team: row.away_team,
                home_goals: row.home_goals,
                away_goals: row.away_goals,
                date: row.date,
                metrics,
            })
        })
        .collect();

    if skipped > 0 {
        warn!(skipped, "malformed rows skipped during dataset load");
    }
    info!(
        path = %cfg.path.display(),
        matches = records.len(),
        metric_columns = schema.metrics().len(),
        "dataset loaded"
    );

    Ok(Dataset::new(schema, records, normalizer))
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    // tolerate datetime suffixes ("2023-05-01 20:45")
    let date_part = cell.split_whitespace().next()?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

fn parse_goals(cell: &str) -> Option<u32> {
    if let Ok(goals) = cell.parse::<u32>() {
        return Some(goals);
    }
    // some exports write integral floats ("2.0")
    let value = cell.parse::<f64>().ok()?;
    (value >= 0.0 && value.fract() == 0.0).then_some(value as u32)
}

enum ParsedCell {
    Missing,
    Value(f64),
    Invalid,
}

fn parse_metric(cell: &str) -> ParsedCell {
    let trimmed = cell.trim();
    if EMPTY_MARKERS.contains(&trimmed.to_lowercase().as_str()) {
        return ParsedCell::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(v) => ParsedCell::Value(v),
        Err(_) => ParsedCell::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MetricColumn;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn cfg(path: &std::path::Path) -> DatasetConfig {
        DatasetConfig {
            path: path.to_path_buf(),
            years_back: None,
            strip_prefixes: true,
        }
    }

    #[test]
    fn test_load_basic_dataset() {
        let file = write_csv(
            "MatchDate,HomeTeam,AwayTeam,FTHome,FTAway\n\
             2023-01-08,AS Roma,Lazio,1,0\n\
             2023-05-20,Lazio,AS Roma,2,2\n",
        );
        let dataset = load_dataset(&cfg(file.path())).unwrap();

        assert_eq!(dataset.len(), 2);
        let rec = &dataset.records()[0];
        assert_eq!(rec.home_team, "AS Roma");
        assert_eq!(rec.home_key.as_str(), "roma");
        assert_eq!(rec.home_goals, 1);
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2023, 1, 8).unwrap());
    }

    #[test]
    fn test_missing_required_columns_is_fatal() {
        let file = write_csv("MatchDate,HomeTeam,AwayTeam\n2023-01-08,Roma,Lazio\n");
        let err = load_dataset(&cfg(file.path())).unwrap_err();
        match err {
            crate::error::ScoutError::Schema { missing } => {
                assert_eq!(missing, vec!["home_goals", "away_goals"]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_metric_discovery_and_pairing() {
        let file = write_csv(
            "MatchDate,HomeTeam,AwayTeam,FTHome,FTAway,HomeShots,AwayShots,Referee\n\
             2023-01-08,Roma,Lazio,1,0,14,6,Rocchi\n\
             2023-05-20,Lazio,Roma,2,2,9,11,Orsato\n",
        );
        let dataset = load_dataset(&cfg(file.path())).unwrap();

        let metrics = dataset.schema().metrics();
        // Referee is not numeric and must not be declared
        assert_eq!(metrics.len(), 1);
        assert_eq!(
            metrics[0],
            MetricColumn::Paired {
                label: "Shots".to_string(),
                home: 0,
                away: 1
            }
        );
        assert_eq!(dataset.records()[0].metrics, vec![Some(14.0), Some(6.0)]);
    }

    #[test]
    fn test_metric_with_gaps_keeps_missing_cells() {
        let file = write_csv(
            "MatchDate,HomeTeam,AwayTeam,FTHome,FTAway,Attendance\n\
             2023-01-08,Roma,Lazio,1,0,61500\n\
             2023-05-20,Lazio,Roma,2,2,NA\n",
        );
        let dataset = load_dataset(&cfg(file.path())).unwrap();
        assert_eq!(dataset.schema().metrics().len(), 1);
        assert_eq!(dataset.records()[1].metrics, vec![None]);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let file = write_csv(
            "MatchDate,HomeTeam,AwayTeam,FTHome,FTAway\n\
             not-a-date,Roma,Lazio,1,0\n\
             2023-01-08,,Lazio,1,0\n\
             2023-05-20,Lazio,Roma,two,2\n\
             2023-06-04,Roma,Milan,2.0,1\n",
        );
        let dataset = load_dataset(&cfg(file.path())).unwrap();
        // only the integral-float row survives
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].home_goals, 2);
    }

    #[test]
    fn test_recency_window_filters_old_matches() {
        let file = write_csv(
            "MatchDate,HomeTeam,AwayTeam,FTHome,FTAway\n\
             2010-01-08,Roma,Lazio,1,0\n\
             2022-05-20,Lazio,Roma,2,2\n\
             2023-06-04,Roma,Lazio,0,1\n",
        );
        let mut config = cfg(file.path());
        config.years_back = Some(2);
        let dataset = load_dataset(&config).unwrap();

        // newest year 2023, window of 2 keeps 2022 and 2023
        assert_eq!(dataset.len(), 2);
        assert!(dataset.records().iter().all(|r| r.date.year() >= 2022));
    }

    #[test]
    fn test_self_pairing_rows_are_dropped() {
        let file = write_csv(
            "MatchDate,HomeTeam,AwayTeam,FTHome,FTAway\n\
             2023-01-08,AS Roma,Roma,1,0\n\
             2023-05-20,Roma,Lazio,2,2\n",
        );
        let dataset = load_dataset(&cfg(file.path())).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].away_team, "Lazio");
    }

    #[test]
    fn test_duplicate_headers_first_wins() {
        let file = write_csv(
            "MatchDate,HomeTeam,AwayTeam,FTHome,FTAway,Odds,Odds\n\
             2023-01-08,Roma,Lazio,1,0,1.85,2.10\n",
        );
        let dataset = load_dataset(&cfg(file.path())).unwrap();
        assert_eq!(dataset.schema().metrics().len(), 1);
        assert_eq!(dataset.records()[0].metrics, vec![Some(1.85)]);
    }

    #[test]
    fn test_date_with_time_suffix_and_slash_format() {
        let file = write_csv(
            "MatchDate,HomeTeam,AwayTeam,FTHome,FTAway\n\
             2023-01-08 20:45,Roma,Lazio,1,0\n\
             20/05/2023,Lazio,Roma,2,2\n",
        );
        let dataset = load_dataset(&cfg(file.path())).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.records()[1].date,
            NaiveDate::from_ymd_opt(2023, 5, 20).unwrap()
        );
    }
}
