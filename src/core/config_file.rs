//! User configuration file handling
//!
//! Manages settings from ~/.config/glyphmath/settings.json

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::errors::{AppResult, FileContext};

/// Interpolation factor used when neither the CLI nor the settings name one
pub const DEFAULT_FACTOR: f64 = 0.5;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// User configuration from ~/.config/glyphmath/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Interpolation factor for `interpolate` without `--factor`
    pub default_factor: Option<f64>,
    /// Also require component compatibility in `check`
    pub test_components: Option<bool>,
    /// Also require anchor compatibility in `check`
    pub test_anchors: Option<bool>,
    /// `tracing` filter directive used when RUST_LOG is unset
    pub log_filter: Option<String>,
}

impl ConfigFile {
    /// Get the path to the glyphmath config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("glyphmath")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Get the path to the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Load configuration from the user config file
    ///
    /// A missing file yields the defaults. A file that cannot be read or
    /// parsed is an error, so the caller can report it once logging is up.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).with_file_context("read", path)?;
        let config: Self = serde_json::from_str(&contents).with_file_context("parse", path)?;
        debug!("Loaded user settings from {:?}", path);
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_file_context("create", parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).with_file_context("write", path)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Settings file content written by `--new-config`
    pub fn with_defaults() -> Self {
        Self {
            default_factor: Some(DEFAULT_FACTOR),
            test_components: Some(false),
            test_anchors: Some(false),
            log_filter: Some(DEFAULT_LOG_FILTER.to_string()),
        }
    }

    pub fn factor(&self) -> f64 {
        self.default_factor.unwrap_or(DEFAULT_FACTOR)
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Initialize the user configuration directory
    ///
    /// This creates the config directory, its logs/ directory and a
    /// settings.json with default values unless one already exists.
    pub fn initialize_config_directory() -> AppResult<()> {
        let config_dir = Self::config_dir();
        Self::initialize_in(&config_dir)?;

        println!("Configuration initialized in {:?}", config_dir);
        println!("  - Edit settings at: {:?}", Self::config_path());
        println!("  - Log files go to: {:?}", Self::logs_dir());
        Ok(())
    }

    fn initialize_in(config_dir: &Path) -> AppResult<()> {
        let logs_dir = config_dir.join("logs");
        fs::create_dir_all(&logs_dir).with_file_context("create", &logs_dir)?;

        let settings_path = config_dir.join("settings.json");
        if settings_path.exists() {
            println!("Settings file already exists: {:?}", settings_path);
        } else {
            Self::with_defaults().save_to(&settings_path)?;
        }
        Ok(())
    }
}
