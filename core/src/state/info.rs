use serde::{Deserialize, Serialize};

use crate::ee_log::{LevelSource, Position, RewardKind};

/// A pickup seen teleporting into the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub raw_key: String,
    pub display_name: String,
    pub position: Position,
    pub session_timestamp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub kind: RewardKind,
    pub name: String,
    pub amount: u64,
    /// Survival cycle number, only for [`RewardKind::SurvivalCycle`].
    pub cycle: Option<u32>,
    pub session_timestamp: f64,
    /// Local time the line was processed, `HH:MM:SS`.
    pub wall_clock_time: String,
}

/// A conservation animal became available to track.
///
/// Encounter starts carry a position, agent creations carry the agent path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConservationSighting {
    pub animal_type: String,
    pub display_name: String,
    pub position: Option<Position>,
    pub agent_path: Option<String>,
    pub session_timestamp: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub name: Option<String>,
    pub source: Option<LevelSource>,
    /// Session timestamp of the line that named the level.
    pub detected_at: Option<f64>,
}

impl LevelInfo {
    /// Record a level name unless one is already known.
    ///
    /// Returns `true` when this call set the name.
    pub fn offer(&mut self, source: LevelSource, name: &str, timestamp: f64) -> bool {
        if self.name.is_some() || name.is_empty() {
            return false;
        }
        self.name = Some(name.to_string());
        self.source = Some(source);
        self.detected_at = Some(timestamp);
        true
    }

    pub fn is_known(&self) -> bool {
        self.name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_first_writer_wins() {
        let mut level = LevelInfo::default();
        assert!(!level.offer(LevelSource::Mission, "", 1.0));
        assert!(level.offer(LevelSource::Node, "SolNode23", 2.0));
        assert!(!level.offer(LevelSource::Level, "/Lotus/Levels/Other", 3.0));

        assert_eq!(level.name.as_deref(), Some("SolNode23"));
        assert_eq!(level.source, Some(LevelSource::Node));
        assert_eq!(level.detected_at, Some(2.0));
    }
}
