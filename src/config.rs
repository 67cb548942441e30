//! Layered configuration.
//!
//! Values are resolved from lowest to highest priority: built-in defaults,
//! a TOML file (`greenmind.toml` in the working directory, or `--config`),
//! `GREENMIND_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use greenmind_client::DEFAULT_API_URL;
use greenmind_types::Language;
use serde::Deserialize;

use crate::data::duration::parse_duration;

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "greenmind.toml";
/// Log file used by the interactive TUI.
pub const DEFAULT_LOG_FILE: &str = "greenmind-demo.log";

/// Color theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Auto,
    Dark,
    Light,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api_url: String,
    /// Locale code; anything other than en/ru/uz means English.
    pub language: String,
    /// Request timeout such as "30s" or "500ms".
    pub timeout: String,
    pub log_file: PathBuf,
    pub theme: ThemeChoice,
}

/// Command-line values that take precedence over every other layer.
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub language: Option<String>,
    pub timeout: Option<String>,
}

impl AppConfig {
    /// Load configuration from defaults, file and process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let builder = Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("language", Language::default().code())?
            .set_default("timeout", "30s")?
            .set_default("log_file", DEFAULT_LOG_FILE)?
            .set_default("theme", "auto")?;

        let builder = match path {
            Some(path) => builder.add_source(File::from(path).format(FileFormat::Toml)),
            None => builder
                .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false)),
        };

        let config = builder
            .add_source(Environment::with_prefix("GREENMIND").source(env))
            .build()
            .context("Failed to read configuration")?;

        let config: Self = config.try_deserialize().context("Invalid configuration")?;
        // Reject a bad timeout at startup rather than on first request.
        config.timeout()?;
        Ok(config)
    }

    /// Apply command-line flags on top of the loaded values.
    pub fn apply(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(api_url) = overrides.api_url {
            self.api_url = api_url;
        }
        if let Some(language) = overrides.language {
            self.language = language;
        }
        if let Some(timeout) = overrides.timeout {
            self.timeout = timeout;
        }
        self.timeout()?;
        Ok(self)
    }

    pub fn language(&self) -> Language {
        Language::from_code(&self.language)
    }

    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(&self.timeout).with_context(|| format!("Invalid timeout {:?}", self.timeout))
    }
}
