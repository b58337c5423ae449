use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cropcheck",
    version,
    about = "Check whether current weather suits a crop"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the EcoCrop CSV path
    #[arg(short, long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up a crop by scientific or common name
    Lookup {
        /// Crop name, e.g. "okra" or "Abelmoschus esculentus"
        name: String,
    },
    /// Check whether current weather in a city suits a crop
    Check {
        #[arg(long)]
        city: String,
        #[arg(long)]
        crop: String,
        /// Also compute the graded suitability index
        #[arg(long)]
        graded: bool,
    },
    /// Show current weather for a city
    Weather {
        city: String,
    },
    /// Run the HTTP API
    Serve {
        /// Address to bind, overriding the config
        #[arg(long)]
        bind: Option<String>,
    },
    /// Validate config, load the dataset and test the weather API
    Validate,
}

impl Commands {
    /// Default log level when neither RUST_LOG nor -v is given
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Commands::Serve { .. } => "info",
            _ => "warn",
        }
    }
}
