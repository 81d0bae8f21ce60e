// SPDX-License-Identifier: MPL-2.0
//! This module handles the engine's configuration, including loading and saving
//! timing preferences to a `settings.toml` file.
//!
//! Every field is optional; missing or out-of-range values fall back to the
//! constants in [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use checkpace::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.hold_window_ms = Some(200);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.hold_window_ms, Some(200));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::pacing::{HoldWindow, MinimumStep, Pacing, PollInterval};
use crate::error::Result;
use crate::pacing::Tuning;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "checkpace";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,
    #[serde(default)]
    pub minimum_step_secs: Option<f64>,
    #[serde(default)]
    pub hold_window_ms: Option<u64>,
    #[serde(default)]
    pub seek_epsilon_secs: Option<f64>,
    #[serde(default)]
    pub degenerate_span_secs: Option<f64>,
    #[serde(default)]
    pub end_margin_secs: Option<f64>,
    #[serde(default)]
    pub detect_end_by_position: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_ms: Some(DEFAULT_POLL_INTERVAL_MS),
            minimum_step_secs: Some(DEFAULT_MINIMUM_STEP_SECS),
            hold_window_ms: Some(DEFAULT_HOLD_WINDOW_MS),
            seek_epsilon_secs: None,
            degenerate_span_secs: None,
            end_margin_secs: None,
            detect_end_by_position: Some(false),
        }
    }
}

impl Config {
    /// Builds the controller timing margins.
    #[must_use]
    pub fn tuning(&self) -> Tuning {
        let defaults = Tuning::default();
        Tuning {
            poll_interval: self
                .poll_interval_ms
                .map_or(defaults.poll_interval, PollInterval::new),
            seek_epsilon_secs: margin(self.seek_epsilon_secs, defaults.seek_epsilon_secs),
            degenerate_span_secs: margin(self.degenerate_span_secs, defaults.degenerate_span_secs),
            end_margin_secs: margin(self.end_margin_secs, defaults.end_margin_secs),
            detect_end_by_position: self
                .detect_end_by_position
                .unwrap_or(defaults.detect_end_by_position),
        }
    }

    /// Builds pacing rules using the configured step floor and hold window.
    #[must_use]
    pub fn pacing(&self, checkpoint_secs: f64, required_inputs: u32) -> Pacing {
        let mut pacing = Pacing::new(checkpoint_secs, required_inputs);
        if let Some(secs) = self.minimum_step_secs {
            pacing = pacing.with_minimum_step(MinimumStep::new(secs));
        }
        if let Some(ms) = self.hold_window_ms {
            pacing = pacing.with_hold_window(HoldWindow::new(ms));
        }
        pacing
    }
}

/// Keeps a configured margin only if it is finite and non-negative.
fn margin(value: Option<f64>, fallback: f64) -> f64 {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(fallback)
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a config file. Unparseable content yields the default config.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("Ignoring invalid config {}: {}", path.display(), err);
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
