//! CLI configuration management.
//!
//! Handles loading of `gbm_pricer.toml` with environment variable
//! override support. Command-line flags take precedence over both.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use pricer_pricing::mc::ExecutionMode;
use thiserror::Error;

/// Upper bound on configured worker threads.
const MAX_THREADS: usize = 1024;

/// Which generator(s) a price run uses
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Sequential generator only
    Sequential,
    /// Parallel generator only
    Parallel,
    /// Sequential, then parallel, with a speedup report
    #[default]
    Both,
}

impl RunMode {
    /// Execution modes in run order.
    pub fn execution_modes(self) -> &'static [ExecutionMode] {
        match self {
            Self::Sequential => &[ExecutionMode::Sequential],
            Self::Parallel => &[ExecutionMode::Parallel],
            Self::Both => &[ExecutionMode::Sequential, ExecutionMode::Parallel],
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sequential" => Some(Self::Sequential),
            "parallel" => Some(Self::Parallel),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Generator selection
    #[serde(default)]
    pub mode: RunMode,

    /// Pinned base seed (random when absent)
    pub seed: Option<u64>,

    /// Parallel worker count (rayon default when absent)
    pub threads: Option<usize>,

    /// CSV export path
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Environment overrides that could not be parsed
    #[serde(skip)]
    rejected: Vec<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist/paths.csv")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            seed: None,
            threads: None,
            output: default_output(),
            log_level: default_log_level(),
            rejected: Vec::new(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `GBM_PRICER_*` environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("GBM_PRICER_MODE") {
            match RunMode::parse(&mode) {
                Some(m) => self.mode = m,
                None => self.reject("GBM_PRICER_MODE", &mode),
            }
        }

        if let Some(seed) = lookup("GBM_PRICER_SEED") {
            match seed.trim().parse() {
                Ok(s) => self.seed = Some(s),
                Err(_) => self.reject("GBM_PRICER_SEED", &seed),
            }
        }

        if let Some(threads) = lookup("GBM_PRICER_THREADS") {
            match threads.trim().parse() {
                Ok(t) => self.threads = Some(t),
                Err(_) => self.reject("GBM_PRICER_THREADS", &threads),
            }
        }

        if let Some(output) = lookup("GBM_PRICER_OUTPUT") {
            self.output = PathBuf::from(output);
        }

        if let Some(log_level) = lookup("GBM_PRICER_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    fn reject(&mut self, key: &str, value: &str) {
        self.rejected.push(format!("Invalid value '{}' for {}", value, key));
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = self.rejected.clone();

        // Validate log level
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        // Validate thread count
        if let Some(threads) = self.threads {
            if threads == 0 {
                errors.push("threads must be greater than 0".to_string());
            }
            if threads > MAX_THREADS {
                errors.push(format!(
                    "threads {} exceeds maximum allowed ({})",
                    threads, MAX_THREADS
                ));
            }
        }

        // Validate output names a file
        if self.output.file_name().is_none() {
            errors.push(format!("output '{}' must name a file", self.output.display()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error reading '{}': {}", .path.display(), .message)]
    Io {
        /// Config file path
        path: PathBuf,
        /// Error description
        message: String,
    },

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
