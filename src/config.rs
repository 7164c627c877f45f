//! Configuration loading.
//!
//! Settings come from `personaforge.toml` (or `$PERSONAFORGE_CONFIG_PATH`).
//! Environment variables override file values; file values override defaults.
//!
//! Precedence: env vars > config file > defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::fetch::DEFAULT_LIMIT;
use crate::generate::huggingface::DEFAULT_MODEL;
use crate::generate::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Content fetch settings.
    pub fetch: FetchConfig,
    /// Persona generation settings.
    pub generation: GenerationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Content fetch settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum submissions and comments fetched per user.
    pub limit: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Persona generation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Chat model identifier.
    pub model: String,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory persona files are written into.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Load configuration with precedence: env vars > TOML file > defaults.
    ///
    /// Config file path: `$PERSONAFORGE_CONFIG_PATH` or `./personaforge.toml`.
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_with(None)
    }

    /// Load configuration from an explicit file path (the `--config` flag),
    /// falling back to the usual path resolution when `None`.
    ///
    /// Env overrides still apply on top of the file values.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load_with(path_override: Option<&Path>) -> Result<Self> {
        Self::load_with_resolver(path_override, |key| std::env::var(key).ok())
    }

    /// Load with a custom env resolver (for testing).
    fn load_with_resolver(
        path_override: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let path = match path_override {
            Some(path) => path.to_path_buf(),
            None => Self::config_path_with(&env),
        };
        let mut config = Self::load_from_file(&path)?;
        config.apply_overrides(env);
        Ok(config)
    }

    /// Load from the TOML file only, no env overrides.
    fn load_from_file(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                tracing::info!(path = %path.display(), "loading config from file");
                let config: AppConfig =
                    toml::from_str(&contents).context("failed to parse config TOML")?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config file found, using defaults");
                Ok(AppConfig::default())
            }
            Err(e) => Err(anyhow::anyhow!("failed to read config file: {e}")),
        }
    }

    /// Resolve the config path using a custom env resolver (for testing).
    fn config_path_with(env: impl Fn(&str) -> Option<String>) -> PathBuf {
        env("PERSONAFORGE_CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("personaforge.toml"))
    }

    /// Apply environment variable overrides (env > config > defaults).
    ///
    /// Takes a resolver function for testability.
    fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("PERSONAFORGE_FETCH_LIMIT") {
            match v.parse() {
                Ok(n) => self.fetch.limit = n,
                Err(_) => tracing::warn!(
                    var = "PERSONAFORGE_FETCH_LIMIT",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }

        if let Some(v) = env("PERSONAFORGE_MODEL") {
            self.generation.model = v;
        }
        if let Some(v) = env("PERSONAFORGE_MAX_TOKENS") {
            match v.parse() {
                Ok(n) => self.generation.max_tokens = n,
                Err(_) => tracing::warn!(
                    var = "PERSONAFORGE_MAX_TOKENS",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }
        if let Some(v) = env("PERSONAFORGE_TEMPERATURE") {
            match v.parse() {
                Ok(n) => self.generation.temperature = n,
                Err(_) => tracing::warn!(
                    var = "PERSONAFORGE_TEMPERATURE",
                    value = %v,
                    "ignoring invalid env override"
                ),
            }
        }

        if let Some(v) = env("PERSONAFORGE_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(v);
        }
    }

    /// Parse a TOML string into config (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error when the TOML does not match the config schema.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str).context("failed to parse config TOML")?;
        Ok(config)
    }
}
