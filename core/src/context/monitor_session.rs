use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use eewatch_types::MonitorConfig;
use thiserror::Error;
use tokio::sync::watch;

use crate::context::ConfigError;
use crate::ee_log::{LineSource, LineSourceError, LogLine, ReadOutcome};
use crate::game_data::{IdentityNames, NameResolver};
use crate::signal_processor::{EventProcessor, GameSignal, SignalHandler};
use crate::state::{MissionSnapshot, SessionCache};

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Source(#[from] LineSourceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not determine where EE.log lives; pass a path or set log_path")]
    NoLogPath,
}

/// Cooperative stop flag, checked once per loop iteration.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines_read: u64,
    /// Lines discarded because they failed to parse.
    pub failed_lines: u64,
}

/// Drives a [`LineSource`] through the [`EventProcessor`] and dispatches the
/// resulting signals to registered handlers.
///
/// Everything runs on the caller's task. Other tasks observe state through
/// [`subscribe`](Self::subscribe) snapshots.
pub struct MonitorSession {
    config: MonitorConfig,
    processor: EventProcessor,
    cache: SessionCache,
    signal_handlers: Vec<Box<dyn SignalHandler + Send + Sync>>,
    stop: StopHandle,
    snapshots: watch::Sender<MissionSnapshot>,
    summary: RunSummary,
}

impl MonitorSession {
    pub fn new(config: MonitorConfig) -> Self {
        Self::with_names(config, IdentityNames)
    }

    pub fn with_names(config: MonitorConfig, names: impl NameResolver + Send + Sync + 'static) -> Self {
        let processor = EventProcessor::new(names).with_thresholds(config.thresholds);
        let (snapshots, _) = watch::channel(MissionSnapshot::default());
        Self {
            config,
            processor,
            cache: SessionCache::new(),
            signal_handlers: Vec::new(),
            stop: StopHandle::default(),
            snapshots,
            summary: RunSummary::default(),
        }
    }

    /// Register a signal handler to receive game signals
    pub fn add_signal_handler(&mut self, handler: Box<dyn SignalHandler + Send + Sync>) {
        self.signal_handlers.push(handler);
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Receive a fresh snapshot after every line that produced signals.
    pub fn subscribe(&self) -> watch::Receiver<MissionSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> MissionSnapshot {
        MissionSnapshot::capture(&self.cache, self.processor.names(), self.config.history_len)
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Process one line and dispatch its signals. Parse failures are logged
    /// and the line is dropped.
    pub fn process_line(&mut self, line: &LogLine) {
        self.summary.lines_read += 1;
        if self.config.echo_raw_lines {
            tracing::debug!(line = line.line_number, text = %line.text, "Raw line");
        }

        match self.processor.process_line(&line.text, &mut self.cache) {
            Ok(signals) if signals.is_empty() => {}
            Ok(signals) => {
                self.dispatch_signals(&signals);
                self.publish_snapshot();
            }
            Err(e) => {
                self.summary.failed_lines += 1;
                tracing::warn!(line = line.line_number, error = %e, "Discarding log line");
            }
        }
    }

    /// Follow `path` from its current end until stopped.
    pub async fn run(&mut self, path: &Path) -> Result<RunSummary, MonitorError> {
        let source = LineSource::open(path).await?;
        tracing::info!(path = %path.display(), "Monitoring log");
        self.follow(source).await
    }

    /// Follow an already opened source until stopped or the source fails.
    pub async fn follow(&mut self, mut source: LineSource) -> Result<RunSummary, MonitorError> {
        let poll = Duration::from_millis(self.config.poll_interval_ms);

        while !self.stop.is_stopped() {
            match source.next_line().await {
                Ok(ReadOutcome::Line(line)) => self.process_line(&line),
                Ok(ReadOutcome::Pending) => tokio::time::sleep(poll).await,
                Err(e) => {
                    tracing::error!(path = %source.path().display(), error = %e, "Log source failed");
                    return Err(e.into());
                }
            }
        }

        tracing::info!(
            lines = self.summary.lines_read,
            failed = self.summary.failed_lines,
            "Monitoring stopped"
        );
        Ok(self.summary)
    }

    /// Process everything currently in `path` from the start, then return.
    pub async fn replay(&mut self, path: &Path) -> Result<RunSummary, MonitorError> {
        let mut source = LineSource::open_from_start(path).await?;
        tracing::info!(path = %path.display(), "Replaying log");

        self.drain_available(&mut source).await?;
        // The file is finished, so an unterminated last line is complete
        if let Some(line) = source.take_partial() {
            self.process_line(&line);
        }
        Ok(self.summary)
    }

    async fn drain_available(&mut self, source: &mut LineSource) -> Result<(), MonitorError> {
        while !self.stop.is_stopped() {
            match source.next_line().await? {
                ReadOutcome::Line(line) => self.process_line(&line),
                ReadOutcome::Pending => break,
            }
        }
        Ok(())
    }

    fn dispatch_signals(&mut self, signals: &[GameSignal]) {
        for handler in &mut self.signal_handlers {
            handler.handle_signals(signals);
        }
    }

    fn publish_snapshot(&self) {
        if self.snapshots.receiver_count() > 0 {
            self.snapshots.send_replace(self.snapshot());
        }
    }
}
