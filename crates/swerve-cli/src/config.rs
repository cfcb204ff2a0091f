//! Configuration vault – reads/writes `~/.swerve/config.toml`.
//!
//! Every field is defaulted, so a missing file (or an empty one) means the
//! stock constants: 0.5 m threshold, 0.5 m/s cruise, 0.5 rad/s turn, 500 ms
//! tick.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use swerve_runtime::ControlLoopConfig;

/// Persisted deploy-time configuration stored in `~/.swerve/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Distance below which a reading counts as an obstacle (meters).
    #[serde(default = "default_obstacle_threshold_m")]
    pub obstacle_threshold_m: f32,

    /// Forward speed when the path is clear (m/s).
    #[serde(default = "default_cruise_linear_mps")]
    pub cruise_linear_mps: f32,

    /// Rotation rate while avoiding an obstacle (rad/s).
    #[serde(default = "default_avoid_angular_radps")]
    pub avoid_angular_radps: f32,

    /// Cadence of the policy ticker (milliseconds).
    #[serde(default = "default_tick_period_ms")]
    pub tick_period_ms: u64,

    /// Cadence of the simulated sensor pump (milliseconds).
    #[serde(default = "default_scan_period_ms")]
    pub scan_period_ms: u64,

    /// Capacity of every event-bus topic channel.
    #[serde(default = "default_bus_capacity")]
    pub bus_capacity: usize,
}

impl Config {
    /// Translate the vault fields into a [`ControlLoopConfig`].
    pub fn control_loop(&self) -> ControlLoopConfig {
        ControlLoopConfig {
            obstacle_threshold_m: self.obstacle_threshold_m,
            cruise_linear_mps: self.cruise_linear_mps,
            avoid_angular_radps: self.avoid_angular_radps,
            tick_period: Duration::from_millis(self.tick_period_ms),
            bus_capacity: self.bus_capacity,
        }
    }

    /// Cadence of the simulated sensor pump.
    pub fn scan_period(&self) -> Duration {
        Duration::from_millis(self.scan_period_ms)
    }
}

fn default_obstacle_threshold_m() -> f32 {
    0.5
}
fn default_cruise_linear_mps() -> f32 {
    0.5
}
fn default_avoid_angular_radps() -> f32 {
    0.5
}
fn default_tick_period_ms() -> u64 {
    500
}
fn default_scan_period_ms() -> u64 {
    100
}
fn default_bus_capacity() -> usize {
    256
}

impl Default for Config {
    fn default() -> Self {
        Self {
            obstacle_threshold_m: default_obstacle_threshold_m(),
            cruise_linear_mps: default_cruise_linear_mps(),
            avoid_angular_radps: default_avoid_angular_radps(),
            tick_period_ms: default_tick_period_ms(),
            scan_period_ms: default_scan_period_ms(),
            bus_capacity: default_bus_capacity(),
        }
    }
}

/// Return the path to `~/.swerve/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

/// Build the config path relative to the given home directory.
/// Extracted for testability without mutating environment variables.
pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".swerve").join("config.toml")
}

/// Load the config from disk.  Returns `None` if the file does not exist.
pub fn load() -> Result<Option<Config>, String> {
    load_from(&config_path())
}

/// Load the config from a specific path.
pub(crate) fn load_from(path: &PathBuf) -> Result<Option<Config>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
    let cfg: Config = toml::from_str(&raw).map_err(|e| format!("Failed to parse config: {}", e))?;
    Ok(Some(cfg))
}

/// Save the config to `~/.swerve/config.toml`, creating the directory if
/// needed.
pub fn save(cfg: &Config) -> Result<(), String> {
    save_to(cfg, &config_path())
}

/// Save the config to a specific path.
pub(crate) fn save_to(cfg: &Config, path: &PathBuf) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
    }
    let raw = toml::to_string_pretty(cfg).map_err(|e| format!("Failed to serialize config: {}", e))?;
    fs::write(path, raw).map_err(|e| format!("Failed to write config at {}: {}", path.display(), e))
}
