mod console;
mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use eewatch_core::context::{self, MonitorError};
use eewatch_core::{BuiltinNames, IdentityNames, MonitorSession};
use eewatch_types::MonitorConfig;

use console::{ConsoleHandler, JsonHandler};

#[derive(Parser)]
#[command(version, about = "Follow Warframe's EE.log and report mission events")]
struct Cli {
    /// Read settings from this TOML file instead of the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every raw line and enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow the live log from its current end (default)
    Watch {
        /// Log file to follow. Auto-detected when omitted.
        path: Option<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Process an existing log from the start, then print a summary
    Replay {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show the effective configuration and log location
    Config,
}

#[derive(Args, Default)]
struct OutputArgs {
    /// Print signals and the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Name table used for enemies and drops
    #[arg(long, value_enum, default_value_t = NameTable::Builtin)]
    names: NameTable,
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum NameTable {
    /// Raw identifiers from the log
    Raw,
    #[default]
    Builtin,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.debug);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "eewatch failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), MonitorError> {
    let mut config = load_config(cli.config.as_deref())?;
    if cli.debug {
        config.echo_raw_lines = true;
    }

    let command = cli.command.unwrap_or(Commands::Watch {
        path: None,
        output: OutputArgs::default(),
    });

    match command {
        Commands::Watch { path, output } => watch(config, path.as_deref(), &output).await,
        Commands::Replay { path, output } => replay(config, &path, &output).await,
        Commands::Config => {
            show_config(&config, cli.config.as_deref());
            Ok(())
        }
    }
}

/// An explicit config file must load; the user config falls back to defaults.
fn load_config(path: Option<&Path>) -> Result<MonitorConfig, MonitorError> {
    match path {
        Some(path) => Ok(context::load_config_file(path)?),
        None => Ok(context::load_config().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            MonitorConfig::default()
        })),
    }
}

fn build_session(config: MonitorConfig, output: &OutputArgs) -> MonitorSession {
    let mut session = match output.names {
        NameTable::Raw => MonitorSession::with_names(config, IdentityNames),
        NameTable::Builtin => MonitorSession::with_names(config, BuiltinNames),
    };

    if output.json {
        session.add_signal_handler(Box::new(JsonHandler));
    } else {
        session.add_signal_handler(Box::new(ConsoleHandler));
    }
    session
}

async fn watch(
    config: MonitorConfig,
    path: Option<&Path>,
    output: &OutputArgs,
) -> Result<(), MonitorError> {
    let log_path = context::resolve_log_path(&config, path).ok_or(MonitorError::NoLogPath)?;
    let mut session = build_session(config, output);

    let stop = session.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, stopping");
            stop.stop();
        }
    });

    session.run(&log_path).await?;
    console::print_snapshot(&session.snapshot(), output.json);
    Ok(())
}

async fn replay(config: MonitorConfig, path: &Path, output: &OutputArgs) -> Result<(), MonitorError> {
    let mut session = build_session(config, output);
    let summary = session.replay(path).await?;

    tracing::info!(
        lines = summary.lines_read,
        failed = summary.failed_lines,
        "Replay finished"
    );
    console::print_snapshot(&session.snapshot(), output.json);
    Ok(())
}

fn show_config(config: &MonitorConfig, explicit: Option<&Path>) {
    match explicit {
        Some(path) => println!("Config file: {}", path.display()),
        None => match context::config_file_path() {
            Ok(path) => println!("Config file: {}", path.display()),
            Err(e) => println!("Config file: unavailable ({e})"),
        },
    }

    match context::resolve_log_path(config, None) {
        Some(path) => {
            let state = if path.is_file() { "found" } else { "missing" };
            println!("Log file:    {} ({state})", path.display());
        }
        None => println!("Log file:    unknown"),
    }

    println!("Poll interval: {} ms", config.poll_interval_ms);
    println!("History length: {}", config.history_len);
    println!(
        "Mission start: timestamp jump > {}, or {} spawns within {} s",
        config.thresholds.session_jump,
        config.thresholds.density_count,
        config.thresholds.density_window_secs
    );
}
