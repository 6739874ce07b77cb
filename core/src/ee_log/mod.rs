//! EE.log line model.
//!
//! Every line the game writes starts with a session timestamp, seconds since
//! the game process started:
//!
//! ```text
//! 1843.217 AI [Info]: OnAgentCreated /Npc/Lancer12 Live 31 Spawned 40 Ticking 31
//! ```

mod line_source;
mod patterns;

pub use line_source::{LineSource, LineSourceError, ReadOutcome};
pub use patterns::{
    LevelSource, LineError, LineMatch, ORIGIN, PatternRegistry, PatternRule, Position, RewardKind,
    RewardMatch, parse_position_or_origin, parse_vector,
};

/// A raw line as read from the log, without its trailing newline.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub line_number: u64,
    pub text: String,
}

impl LogLine {
    pub fn new(line_number: u64, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }

    pub fn session_timestamp(&self) -> Option<f64> {
        parse_session_timestamp(&self.text)
    }
}

/// Parse the leading `<digits>.<digits>` session timestamp of a line.
///
/// Lines without one (continuation lines, banners) return `None`.
pub fn parse_session_timestamp(line: &str) -> Option<f64> {
    let b = line.as_bytes();
    let int_len = b.iter().take_while(|c| c.is_ascii_digit()).count();
    if int_len == 0 || b.get(int_len) != Some(&b'.') {
        return None;
    }
    let frac_len = b[int_len + 1..]
        .iter()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if frac_len == 0 {
        return None;
    }
    line[..int_len + 1 + frac_len].parse().ok()
}

/// Collapse a per-instance identifier into its type key by stripping the
/// trailing run of digits (`Lancer12` -> `Lancer`).
pub fn normalize_identifier(raw: &str) -> &str {
    raw.trim_end_matches(|c: char| c.is_ascii_digit())
}
