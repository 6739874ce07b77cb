pub mod context;
pub mod ee_log;
pub mod game_data;
pub mod signal_processor;
pub mod state;

// Re-exports for convenience
pub use context::{MonitorError, MonitorSession, StopHandle};
pub use ee_log::{LineSource, LogLine};
pub use game_data::{BuiltinNames, IdentityNames, NameResolver};
pub use signal_processor::{EventProcessor, GameSignal, SignalHandler};
pub use state::{MissionSnapshot, SessionCache};
