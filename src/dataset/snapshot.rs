//! Immutable dataset snapshot and the reloadable handle around it.
//!
//! Queries read a shared `Arc<Dataset>`; the history is never mutated after
//! load. `DatasetHandle::reload` swaps in a freshly loaded snapshot without
//! disturbing readers holding the previous one.

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use tracing::info;

use crate::config::DatasetConfig;
use crate::domain::MatchRecord;
use crate::error::Result;
use crate::stats::normalize::Normalizer;

use super::loader::load_dataset;
use super::schema::DatasetSchema;

/// Validated, immutable match history.
///
/// Owns the normalizer used to cache record keys so query-side key
/// derivation can never diverge from the load-side one.
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: DatasetSchema,
    records: Vec<MatchRecord>,
    normalizer: Normalizer,
}

impl Dataset {
    pub fn new(schema: DatasetSchema, records: Vec<MatchRecord>, normalizer: Normalizer) -> Self {
        Self {
            schema,
            records,
            normalizer,
        }
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct display names appearing in the history, sorted
    pub fn team_names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for record in &self.records {
            names.insert(record.home_team.clone());
            names.insert(record.away_team.clone());
        }
        names.into_iter().collect()
    }
}

/// Process-wide handle to the current dataset snapshot
pub struct DatasetHandle {
    cfg: DatasetConfig,
    current: RwLock<Arc<Dataset>>,
}

impl DatasetHandle {
    /// Load the dataset once and wrap it for shared access
    pub fn load(cfg: DatasetConfig) -> Result<Self> {
        let dataset = load_dataset(&cfg)?;
        Ok(Self {
            cfg,
            current: RwLock::new(Arc::new(dataset)),
        })
    }

    /// The current snapshot; cheap to clone, safe to hold across a reload
    pub fn snapshot(&self) -> Arc<Dataset> {
        // writers are rare (explicit reload) and never panic while holding
        // the lock
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Reload from disk and swap the snapshot. On failure the previous
    /// snapshot stays in place.
    pub fn reload(&self) -> Result<()> {
        let dataset = load_dataset(&self.cfg)?;
        let matches = dataset.len();
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Arc::new(dataset);
        info!(matches, "dataset snapshot reloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(home: &str, away: &str) -> MatchRecord {
        let norm = Normalizer::default();
        MatchRecord {
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_key: norm.key(home),
            away_key: norm.key(away),
            home_goals: 0,
            away_goals: 0,
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            metrics: vec![],
        }
    }

    #[test]
    fn test_team_names_sorted_and_distinct() {
        let dataset = Dataset::new(
            DatasetSchema::empty(),
            vec![record("Roma", "Lazio"), record("Lazio", "Milan")],
            Normalizer::default(),
        );
        assert_eq!(dataset.team_names(), vec!["Lazio", "Milan", "Roma"]);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::new(DatasetSchema::empty(), vec![], Normalizer::default());
        assert!(dataset.is_empty());
        assert!(dataset.team_names().is_empty());
    }

    #[test]
    fn test_reload_swaps_snapshot_without_touching_old_readers() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "MatchDate,HomeTeam,AwayTeam,FTHome,FTAway").unwrap();
        writeln!(file, "2023-01-08,Roma,Lazio,1,0").unwrap();
        file.flush().unwrap();

        let handle = DatasetHandle::load(DatasetConfig {
            path: file.path().to_path_buf(),
            years_back: None,
            strip_prefixes: true,
        })
        .unwrap();
        let before = handle.snapshot();
        assert_eq!(before.len(), 1);

        writeln!(file, "2023-05-20,Lazio,Roma,2,2").unwrap();
        file.flush().unwrap();
        handle.reload().unwrap();

        assert_eq!(handle.snapshot().len(), 2);
        // the snapshot taken before the reload is untouched
        assert_eq!(before.len(), 1);
    }
}
