use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::config::AppConfig;
use crate::dataset::DatasetHandle;
use crate::narrative::{narrate_or_fallback, NarrativeClient};
use crate::report;
use crate::stats::StatsEngine;

#[derive(Parser)]
#[command(name = "scoutline")]
#[command(version = "0.1.0")]
#[command(about = "Head-to-head football match statistics and forecasts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// CSV dataset path (overrides the configured one)
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute head-to-head statistics and forecasts for two teams
    Forecast {
        /// First team (rendered as the home side of the forecast labels)
        team1: String,
        /// Second team
        team2: String,
        /// Generate a narrative preview via the configured service
        #[arg(long)]
        narrative: bool,
        /// Print the bundle as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List team names present in the dataset
    Teams {
        /// Case-insensitive substring filter
        #[arg(long)]
        filter: Option<String>,
    },
    /// Validate the dataset and print a schema summary
    Inspect,
}

pub async fn run_forecast(
    config: &AppConfig,
    team1: &str,
    team2: &str,
    narrative: bool,
    json: bool,
) -> anyhow::Result<()> {
    let handle = DatasetHandle::load(config.dataset.clone()).context("failed to load dataset")?;
    let dataset = handle.snapshot();
    let engine = StatsEngine::new(config.stats.form_window);

    let Some(bundle) = engine.compute(&dataset, team1, team2) else {
        println!("No head-to-head data for {} vs {}", team1, team2);
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
        return Ok(());
    }

    let summary = report::render_summary(&bundle);
    println!("{summary}");

    let table = report::metric_table(&bundle);
    if !table.is_empty() {
        println!("\n{table}");
    }

    if narrative {
        if !config.narrative.enabled {
            println!("\n(narrative generation disabled in config)");
            return Ok(());
        }
        let client = NarrativeClient::new(config.narrative.clone())?;
        let text = narrate_or_fallback(&client, &summary).await;
        println!("\n{text}");
    }

    Ok(())
}

pub fn list_teams(config: &AppConfig, filter: Option<&str>) -> anyhow::Result<()> {
    let handle = DatasetHandle::load(config.dataset.clone()).context("failed to load dataset")?;
    let dataset = handle.snapshot();

    let filter_lower = filter.map(str::to_lowercase);
    let mut shown = 0usize;
    for name in dataset.team_names() {
        if let Some(f) = &filter_lower {
            if !name.to_lowercase().contains(f) {
                continue;
            }
        }
        println!("{name}");
        shown += 1;
    }
    if shown == 0 {
        println!("(no teams matched)");
    }
    Ok(())
}

pub fn inspect_dataset(config: &AppConfig) -> anyhow::Result<()> {
    let handle = DatasetHandle::load(config.dataset.clone()).context("failed to load dataset")?;
    let dataset = handle.snapshot();

    println!("Dataset: {}", config.dataset.path.display());
    println!("Matches: {}", dataset.len());
    println!("Teams: {}", dataset.team_names().len());
    println!("Metric columns:");
    if dataset.schema().metrics().is_empty() {
        println!("  (none)");
    }
    for column in dataset.schema().metrics() {
        println!("  {}", column.label());
    }
    info!("dataset inspection complete");
    Ok(())
}
