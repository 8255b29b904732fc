pub mod cli;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod narrative;
pub mod report;
pub mod stats;

pub use config::AppConfig;
pub use dataset::{load_dataset, Dataset, DatasetHandle, DatasetSchema, MetricColumn};
pub use domain::{
    BothScoreForecast, DoubleChanceForecast, ForecastSet, GoalLineForecast, MatchOutcome,
    MatchRecord, MatchStatsBundle, MetricLeader, PerMetricComparison, ResultForecast, TeamKey,
    TeamStats,
};
pub use error::{Result, ScoutError};
pub use narrative::{narrate_or_fallback, NarrativeClient, NarrativeConfig, NarrativeGenerator};
pub use stats::{head_to_head, team_history, Normalizer, StatsEngine};
