use crate::error::{CropCheckError, Result};
use crate::models::ScoringMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_OWM_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_DATASET_PATH: &str = "data/EcoCrop_DB.csv";
const DEFAULT_BIND: &str = "127.0.0.1:8000";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub openweathermap: OpenWeatherMapConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_OWM_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub mode: ScoringMode,
    /// Units of deficit that take the graded index from 1 to 0
    #[serde(default = "default_decay")]
    pub decay: f64,
    #[serde(default)]
    pub precipitation_gates_verdict: bool,
}

fn default_decay() -> f64 {
    10.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mode: ScoringMode::Boolean,
            decay: default_decay(),
            precipitation_gates_verdict: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Config {
    /// Load config from the override path, the standard locations, or the
    /// environment when no file exists anywhere.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(CropCheckError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                Some(p)
            }
            None => Self::find_config_path(),
        };

        let config = match config_path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                let config_str = std::fs::read_to_string(&path)
                    .map_err(|e| CropCheckError::Config(format!("Failed to read config: {}", e)))?;
                Self::from_yaml(&config_str)?
            }
            None => {
                tracing::info!("No config file found - using environment variables");
                Self::from_env()
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content);

        serde_yaml::from_str(&content)
            .map_err(|e| CropCheckError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Ok(key) = std::env::var("OPENWEATHER_API_KEY") {
            config.openweathermap.api_key = key;
        }
        if let Ok(path) = std::env::var("ECOCROP_PATH") {
            config.dataset.path = PathBuf::from(path);
        }
        if let Ok(bind) = std::env::var("CROPCHECK_BIND") {
            config.server.bind = bind;
        }
        config
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Then the XDG config directory
        dirs::config_dir()
            .map(|dir| dir.join("cropcheck").join("config.yaml"))
            .filter(|p| p.exists())
    }

    pub fn validate(&self) -> Result<()> {
        if self.dataset.path.as_os_str().is_empty() {
            return Err(CropCheckError::Config("dataset.path must not be empty".into()));
        }
        if !(self.scoring.decay.is_finite() && self.scoring.decay > 0.0) {
            return Err(CropCheckError::Config(format!(
                "scoring.decay must be a positive number, got {}",
                self.scoring.decay
            )));
        }
        Ok(())
    }

    /// True when a usable weather API key is present.
    pub fn has_weather_credentials(&self) -> bool {
        let key = self.openweathermap.api_key.trim();
        !key.is_empty() && !key.starts_with("${")
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig {
                path: PathBuf::from(DEFAULT_DATASET_PATH),
            },
            openweathermap: OpenWeatherMapConfig {
                api_key: String::new(),
                base_url: default_base_url(),
                timeout_secs: default_timeout_secs(),
            },
            scoring: ScoringConfig::default(),
            server: ServerConfig::default(),
        }
    }
}
