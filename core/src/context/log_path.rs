//! Locating the game's EE.log.

use std::path::{Path, PathBuf};

use eewatch_types::MonitorConfig;

const STEAM_LOG: &str = r"C:\Program Files (x86)\Steam\steamapps\common\Warframe\Warframe.log";

/// Known log locations, most likely first.
pub fn candidate_log_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(local) = dirs::data_local_dir() {
        candidates.push(local.join("Warframe").join("EE.log"));
    }
    candidates.push(PathBuf::from(STEAM_LOG));
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join("Library/Application Support/Warframe/EE.log"));
        candidates.push(home.join(".local/share/Warframe/EE.log"));
    }

    let mut unique = Vec::with_capacity(candidates.len());
    for path in candidates {
        if !unique.contains(&path) {
            unique.push(path);
        }
    }
    unique
}

/// The platform's standard location, whether or not it exists.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("Warframe").join("EE.log"))
}

/// First existing candidate, else the platform default.
pub fn detect_log_path() -> Option<PathBuf> {
    first_existing(&candidate_log_paths()).or_else(default_log_path)
}

/// Pick the log to watch: explicit override, then config, then detection.
pub fn resolve_log_path(config: &MonitorConfig, override_path: Option<&Path>) -> Option<PathBuf> {
    override_path
        .map(Path::to_path_buf)
        .or_else(|| config.log_path.clone())
        .or_else(detect_log_path)
}

fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.is_file()).cloned()
}
