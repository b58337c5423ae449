mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod server;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use datasources::{EcoCropLoader, OpenWeatherMapClient};
use logic::{CropAdvisor, CropRepository, SuitabilityEngine};
use models::ScoringMode;
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let level = match cli.verbose {
        0 => cli.command.default_log_level(),
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let mut config = Config::load(cli.config.clone()).context("loading configuration")?;
    if let Some(path) = cli.dataset.clone() {
        config.dataset.path = path;
    }

    // Crop table is built once and shared read-only from here on
    let records = EcoCropLoader::load(&config.dataset.path)
        .with_context(|| format!("loading crop dataset {}", config.dataset.path.display()))?;
    let repository = Arc::new(CropRepository::new(records));
    if repository.is_empty() {
        tracing::warn!(
            "Crop dataset {} has no usable rows - every lookup will fail",
            config.dataset.path.display()
        );
    }

    let weather = OpenWeatherMapClient::new(config.openweathermap.clone())?;
    let engine = SuitabilityEngine::new(config.scoring);

    match cli.command {
        Commands::Lookup { name } => {
            let advisor = CropAdvisor::new(repository, engine, weather);
            match advisor.lookup_crop(&name) {
                Ok(record) => print_json(record)?,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Check { city, crop, graded } => {
            require_weather_credentials(&config)?;
            let mode = graded.then_some(ScoringMode::Graded);
            let advisor = CropAdvisor::new(repository, engine, weather);
            match advisor.check_suitability(&city, &crop, mode).await {
                Ok(payload) => print_json(&payload)?,
                Err(payload) => {
                    print_json(&payload)?;
                    std::process::exit(1);
                }
            }
        }
        Commands::Weather { city } => {
            require_weather_credentials(&config)?;
            let advisor = CropAdvisor::new(repository, engine, weather);
            let snapshot = advisor.current_weather(&city).await?;
            print_json(&snapshot)?;
        }
        Commands::Serve { bind } => {
            if !config.has_weather_credentials() {
                tracing::warn!(
                    "OpenWeatherMap API key not configured - weather and check endpoints will fail"
                );
            }
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            tracing::info!(
                "Serving {} crops in {} mode",
                repository.len(),
                config.scoring.mode
            );
            let advisor = Arc::new(CropAdvisor::new(repository, engine, weather));
            server::serve(advisor, &bind)
                .await
                .with_context(|| format!("serving on {}", bind))?;
        }
        Commands::Validate => {
            println!("Config: OK");
            println!(
                "Dataset: {} crops from {}",
                repository.len(),
                config.dataset.path.display()
            );
            let rules: Vec<_> = engine.list_rules().iter().map(|(_, name)| *name).collect();
            println!("Scoring: {} mode, rules: {}", engine.mode(), rules.join(", "));

            if !config.has_weather_credentials() {
                println!("OpenWeatherMap: NOT CONFIGURED");
            } else if weather.test_connection().await? {
                println!("OpenWeatherMap: OK");
            } else {
                println!("OpenWeatherMap: OFFLINE");
            }
        }
    }

    Ok(())
}

fn require_weather_credentials(config: &Config) -> anyhow::Result<()> {
    if !config.has_weather_credentials() {
        bail!("OpenWeatherMap API key not configured - set OPENWEATHER_API_KEY or openweathermap.api_key");
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
