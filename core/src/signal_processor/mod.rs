//! Turns log lines into [`GameSignal`]s.
//!
//! [`EventProcessor`] classifies each line, threads it through the mission
//! state machine in [`mission_state`] and records what it finds in the
//! [`SessionCache`](crate::state::SessionCache). Consumers react to the
//! resulting signals through [`SignalHandler`].

mod handler;
pub mod mission_state;
mod processor;
mod signal;


pub use handler::SignalHandler;
pub use processor::EventProcessor;
pub use signal::{GameSignal, MissionTrigger};
