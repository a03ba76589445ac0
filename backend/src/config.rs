//! Application configuration.
//!
//! Settings come from an optional TOML file and are then overridden by
//! environment variables:
//!
//! - `STRIKE_CONFIG`: path of the TOML file (otherwise `strike-forecast.toml`
//!   is searched for in the usual locations; defaults apply when none exists)
//! - `HOST`, `PORT`: bind address
//! - `UPLOAD_DIR`: directory created at startup
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 5000
//!
//! [ingest]
//! date_column = "FlightDate"
//!
//! [forecast]
//! model = "random_forest"
//! horizon_days = 30
//! test_fraction = 0.2
//! seed = 42
//! n_estimators = 100
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::algorithms::{ModelKind, ModelParams};

/// Errors while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ingest: IngestSettings,
    #[serde(default)]
    pub forecast: ForecastSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Created at startup; uploads are processed in memory.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// Spreadsheet schema settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestSettings {
    #[serde(default = "default_date_column")]
    pub date_column: String,
}

/// Model and forecast settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSettings {
    #[serde(default)]
    pub model: ModelKind,
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_upload_bytes() -> usize {
    50 * 1024 * 1024
}

fn default_date_column() -> String {
    "FlightDate".to_string()
}

fn default_horizon_days() -> u32 {
    30
}

fn default_test_fraction() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

fn default_n_estimators() -> usize {
    100
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upload_dir: default_upload_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            date_column: default_date_column(),
        }
    }
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            model: ModelKind::default(),
            horizon_days: default_horizon_days(),
            test_fraction: default_test_fraction(),
            seed: default_seed(),
            n_estimators: default_n_estimators(),
            max_depth: None,
        }
    }
}

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Search `strike-forecast.toml` in the working directory and `backend/`.
    ///
    /// Returns `Ok(None)` when no file exists.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from("strike-forecast.toml"),
            PathBuf::from("backend/strike-forecast.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// File (from `STRIKE_CONFIG` or the default location, else defaults),
    /// then environment overrides, then validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("STRIKE_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location()?.unwrap_or_default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT` and `UPLOAD_DIR` from `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT must be a valid port number, got '{}'", port)))?;
        }
        if let Some(dir) = lookup("UPLOAD_DIR") {
            self.server.upload_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.forecast;
        if !(f.test_fraction > 0.0 && f.test_fraction < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "forecast.test_fraction must be between 0 and 1, got {}",
                f.test_fraction
            )));
        }
        if f.horizon_days == 0 {
            return Err(ConfigError::Invalid("forecast.horizon_days must be at least 1".into()));
        }
        if f.model == ModelKind::RandomForest && f.n_estimators == 0 {
            return Err(ConfigError::Invalid("forecast.n_estimators must be at least 1".into()));
        }
        if self.ingest.date_column.trim().is_empty() {
            return Err(ConfigError::Invalid("ingest.date_column must not be empty".into()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn model_params(&self) -> ModelParams {
        ModelParams {
            kind: self.forecast.model,
            n_estimators: self.forecast.n_estimators,
            max_depth: self.forecast.max_depth,
            seed: self.forecast.seed,
        }
    }
}
