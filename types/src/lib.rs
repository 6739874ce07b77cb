//! Shared configuration types for eewatch.
//!
//! These types are serialized to the user's config file (TOML via confy) and
//! read by both the engine and the command-line front end.

pub mod formatting;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default poll interval while the log has no new data.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Number of items/rewards kept in snapshots.
pub const DEFAULT_HISTORY_LEN: usize = 10;

/// Session timestamp jump that marks a restarted game process.
pub const DEFAULT_SESSION_JUMP_THRESHOLD: f64 = 5000.0;

/// Rolling window for the spawn density heuristic.
pub const DEFAULT_DENSITY_WINDOW_SECS: f64 = 5.0;

/// Spawns within the window that mark a mission start.
pub const DEFAULT_DENSITY_THRESHOLD: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Explicit EE.log location. Auto-detected when unset.
    pub log_path: Option<PathBuf>,
    pub poll_interval_ms: u64,
    /// How many recent items and rewards a snapshot carries.
    pub history_len: usize,
    /// Log every raw line at debug level.
    pub echo_raw_lines: bool,
    pub thresholds: MissionThresholds,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            history_len: DEFAULT_HISTORY_LEN,
            echo_raw_lines: false,
            thresholds: MissionThresholds::default(),
        }
    }
}

/// Tuning for mission start detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionThresholds {
    pub session_jump: f64,
    pub density_window_secs: f64,
    pub density_count: u32,
}

impl Default for MissionThresholds {
    fn default() -> Self {
        Self {
            session_jump: DEFAULT_SESSION_JUMP_THRESHOLD,
            density_window_secs: DEFAULT_DENSITY_WINDOW_SECS,
            density_count: DEFAULT_DENSITY_THRESHOLD,
        }
    }
}
