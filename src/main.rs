use anyhow::Context;
use clap::Parser;
use scoutline::cli::{self, Cli, Commands};
use scoutline::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load_from(&cli.config).context("failed to load configuration")?;
    if let Some(path) = &cli.data {
        config.dataset.path = path.clone();
    }

    init_logging(&config.logging.level);

    match &cli.command {
        Commands::Forecast {
            team1,
            team2,
            narrative,
            json,
        } => cli::run_forecast(&config, team1, team2, *narrative, *json).await?,
        Commands::Teams { filter } => cli::list_teams(&config, filter.as_deref())?,
        Commands::Inspect => cli::inspect_dataset(&config)?,
    }

    Ok(())
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
