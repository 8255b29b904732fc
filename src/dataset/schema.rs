//! Dataset schema: required columns and the declared metric-column list.
//!
//! The loader resolves required columns through case-insensitive header
//! aliases and declares every extra numeric column as a metric. The engine
//! iterates the declared list; it never introspects cell types at runtime.

use crate::error::{Result, ScoutError};

/// One declared numeric metric column.
///
/// Indices point into `MatchRecord::metrics`. `Paired` columns carry one
/// value per side (e.g. `HomeShots`/`AwayShots` → "Shots"); `Single`
/// columns carry one value per match.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricColumn {
    Paired {
        label: String,
        home: usize,
        away: usize,
    },
    Single {
        label: String,
        col: usize,
    },
}

impl MetricColumn {
    pub fn label(&self) -> &str {
        match self {
            MetricColumn::Paired { label, .. } => label,
            MetricColumn::Single { label, .. } => label,
        }
    }
}

/// Declared metric columns of a loaded dataset
#[derive(Debug, Clone, Default)]
pub struct DatasetSchema {
    metrics: Vec<MetricColumn>,
}

impl DatasetSchema {
    pub fn new(metrics: Vec<MetricColumn>) -> Self {
        Self { metrics }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn metrics(&self) -> &[MetricColumn] {
        &self.metrics
    }
}

/// Logical required fields and their accepted header spellings
const REQUIRED_ALIASES: &[(&str, &[&str])] = &[
    ("date", &["date", "matchdate", "match_date"]),
    ("home_team", &["hometeam", "home_team", "home"]),
    ("away_team", &["awayteam", "away_team", "away"]),
    (
        "home_goals",
        &["fthome", "home_goals", "fulltime_home_goals"],
    ),
    (
        "away_goals",
        &["ftaway", "away_goals", "fulltime_away_goals"],
    ),
];

/// CSV indices of the required columns
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequiredColumns {
    pub date: usize,
    pub home_team: usize,
    pub away_team: usize,
    pub home_goals: usize,
    pub away_goals: usize,
}

impl RequiredColumns {
    pub(crate) fn contains(&self, idx: usize) -> bool {
        idx == self.date
            || idx == self.home_team
            || idx == self.away_team
            || idx == self.home_goals
            || idx == self.away_goals
    }
}

/// Resolve the required columns from deduplicated `(header, csv_index)`
/// pairs, or fail with the full list of missing logical fields.
pub(crate) fn resolve_required(headers: &[(String, usize)]) -> Result<RequiredColumns> {
    let find = |aliases: &[&str]| -> Option<usize> {
        headers
            .iter()
            .find(|(name, _)| aliases.contains(&name.to_lowercase().as_str()))
            .map(|(_, idx)| *idx)
    };

    let mut resolved = Vec::with_capacity(REQUIRED_ALIASES.len());
    let mut missing = Vec::new();
    for (logical, aliases) in REQUIRED_ALIASES {
        match find(aliases) {
            Some(idx) => resolved.push(idx),
            None => missing.push((*logical).to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(ScoutError::Schema { missing });
    }

    Ok(RequiredColumns {
        date: resolved[0],
        home_team: resolved[1],
        away_team: resolved[2],
        home_goals: resolved[3],
        away_goals: resolved[4],
    })
}

/// Pair up numeric columns by Home*/Away* prefix or *Home/*Away suffix
/// stems; everything else becomes a `Single` column. `columns` holds
/// `(header, metric_index)` pairs in dataset order.
pub(crate) fn pair_metric_columns(columns: &[(String, usize)]) -> Vec<MetricColumn> {
    #[derive(Default)]
    struct Pairing {
        label: String,
        /// original header of the first column seen for this stem
        first_name: String,
        home: Option<usize>,
        away: Option<usize>,
    }

    fn split_side(name: &str) -> Option<(String, bool)> {
        let lower = name.to_lowercase();
        for (marker, is_home) in [("home", true), ("away", false)] {
            if lower.starts_with(marker)
                && name.len() > marker.len()
                && name.is_char_boundary(marker.len())
            {
                return Some((name[marker.len()..].to_string(), is_home));
            }
            let cut = name.len().saturating_sub(marker.len());
            if lower.ends_with(marker) && cut > 0 && name.is_char_boundary(cut) {
                return Some((name[..cut].to_string(), is_home));
            }
        }
        None
    }

    let mut stems: Vec<(String, Pairing)> = Vec::new();
    let mut singles: Vec<MetricColumn> = Vec::new();

    for (name, idx) in columns {
        match split_side(name) {
            Some((stem, is_home)) => {
                let stem_key = stem.to_lowercase();
                let pos = match stems.iter().position(|(k, _)| *k == stem_key) {
                    Some(pos) => pos,
                    None => {
                        stems.push((
                            stem_key,
                            Pairing {
                                label: stem,
                                first_name: name.clone(),
                                ..Default::default()
                            },
                        ));
                        stems.len() - 1
                    }
                };
                let entry = &mut stems[pos].1;
                if is_home {
                    entry.home.get_or_insert(*idx);
                } else {
                    entry.away.get_or_insert(*idx);
                }
            }
            None => singles.push(MetricColumn::Single {
                label: name.clone(),
                col: *idx,
            }),
        }
    }

    let mut out = Vec::new();
    for (_, pairing) in stems {
        match (pairing.home, pairing.away) {
            (Some(home), Some(away)) => out.push(MetricColumn::Paired {
                label: pairing.label,
                home,
                away,
            }),
            // a sided column without a partner keeps its original header
            (Some(col), None) | (None, Some(col)) => {
                out.push(MetricColumn::Single {
                    label: pairing.first_name,
                    col,
                });
            }
            (None, None) => {}
        }
    }
    out.extend(singles);
    out
}
