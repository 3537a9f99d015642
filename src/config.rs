//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rscomposite/rscomposite.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `RSCOMPOSITE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::DEFAULT_MAX_DEPTH;

const ENV_PREFIX: &str = "RSCOMPOSITE";

/// Output settings for listings and trees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Unit printed after file and folder sizes
    pub size_unit: String,
    /// Unit printed after salaries (empty: none)
    pub salary_unit: String,
    /// Print weights next to names in tree output
    pub show_weights: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            size_unit: "bytes".into(),
            salary_unit: String::new(),
            show_weights: true,
        }
    }
}

/// Raw display settings for intermediate parsing (`None` → not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplaySettings {
    pub size_unit: Option<String>,
    pub salary_unit: Option<String>,
    pub show_weights: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub max_depth: Option<usize>,
    pub display: RawDisplaySettings,
}

/// Unified configuration for rscomposite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Maximum tree height accepted on insert
    pub max_depth: usize,
    pub display: DisplaySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            display: DisplaySettings::default(),
        }
    }
}

/// Get the XDG config directory for rscomposite.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rscomposite").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rscomposite.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            display: DisplaySettings {
                size_unit: overlay
                    .display
                    .size_unit
                    .clone()
                    .unwrap_or_else(|| self.display.size_unit.clone()),
                salary_unit: overlay
                    .display
                    .salary_unit
                    .clone()
                    .unwrap_or_else(|| self.display.salary_unit.clone()),
                show_weights: overlay
                    .display
                    .show_weights
                    .unwrap_or(self.display.show_weights),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_config` - Optional config file layered over the global one
    pub fn load(local_config: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(local) = local_config {
            if !local.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", local.display()),
                });
            }
            debug!("loading local config: {}", local.display());
            current = current.merge_with(&load_raw_settings(local)?);
        }

        current = Self::apply_env_overrides(current, ENV_PREFIX)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply `<prefix>_*` environment variables as explicit overrides.
    ///
    /// Nested keys use `__`: `RSCOMPOSITE_DISPLAY__SIZE_UNIT=KiB`.
    fn apply_env_overrides(mut settings: Self, prefix: &str) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("max_depth") {
            settings.max_depth = val.parse().map_err(|_| ApplicationError::Config {
                message: format!("{}_MAX_DEPTH: not a number: {}", prefix, val),
            })?;
        }
        if let Ok(val) = config.get_string("display.size_unit") {
            settings.display.size_unit = val;
        }
        if let Ok(val) = config.get_string("display.salary_unit") {
            settings.display.salary_unit = val;
        }
        if let Ok(val) = config.get_bool("display.show_weights") {
            settings.display.show_weights = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_depth == 0 {
            return Err(ApplicationError::Config {
                message: "max_depth must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Render as TOML, e.g. for `config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}
