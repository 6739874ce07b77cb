use std::ffi::OsStr;
use std::fs::{File, OpenOptions};

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment variable naming a file to append logs to instead of stderr.
pub const LOG_PATH_ENV: &str = "EEWATCH_LOG_PATH";

/// Install the global subscriber.
///
/// `--debug` lowers the default level to DEBUG. The same flag turns on
/// `echo_raw_lines`, and those echoes are debug events, so without the lower
/// level they would be filtered out. `RUST_LOG` still overrides either default.
///
/// Signals and summaries go to stdout, so logs never do.
pub fn init_logging(debug: bool) {
    let default_level = if debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let file = std::env::var_os(LOG_PATH_ENV).and_then(|path| open_log_file(&path));
    match file {
        Some(file) => builder.with_ansi(false).with_writer(file).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
}

/// Open the file named by [`LOG_PATH_ENV`] for appending.
///
/// A file that can't be opened means stderr.
fn open_log_file(path: &OsStr) -> Option<File> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("warning: cannot open log file {}: {e}", path.to_string_lossy());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_log_file_appends() {
        let path = std::env::temp_dir().join(format!("eewatch-log-{}.log", std::process::id()));
        std::fs::write(&path, "first\n").unwrap();

        let mut file = open_log_file(path.as_os_str()).unwrap();
        writeln!(file, "second").unwrap();
        drop(file);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unopenable_log_file_falls_back() {
        let dir = std::env::temp_dir();
        assert!(open_log_file(dir.as_os_str()).is_none());
    }
}
