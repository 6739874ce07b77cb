mod config;
mod log_path;
mod monitor_session;

pub use config::{APP_NAME, ConfigError, config_file_path, load_config, load_config_file};
pub use log_path::{candidate_log_paths, default_log_path, detect_log_path, resolve_log_path};
pub use monitor_session::{MonitorError, MonitorSession, RunSummary, StopHandle};
