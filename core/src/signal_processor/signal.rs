use serde::Serialize;

use crate::ee_log::LevelSource;
use crate::state::{ConservationSighting, Item, Reward};

/// Why a new mission was assumed to have started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionTrigger {
    /// The session timestamp leapt forward, i.e. the game process restarted.
    TimestampJump,
    /// Enough agents spawned in a short window to look like a loaded mission.
    SpawnDensity,
}

/// Signals emitted by the EventProcessor.
/// Each carries the session timestamp of the line that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameSignal {
    // Mission lifecycle
    MissionStarted {
        timestamp: f64,
        trigger: MissionTrigger,
    },
    MissionComplete {
        success: bool,
        timestamp: f64,
    },
    LevelLoaded {
        name: String,
        source: LevelSource,
        timestamp: f64,
    },

    // Mission content
    AgentSpawned {
        raw_id: String,
        type_key: String,
        display_name: String,
        timestamp: f64,
    },
    ItemDropped {
        item: Item,
    },
    ConservationRefresh {
        sighting: ConservationSighting,
    },
    PersistentEnemy {
        spawned: bool,
        timestamp: f64,
    },

    // Rewards
    RewardReceived {
        reward: Reward,
    },
    SyndicateXp {
        base: u64,
        final_xp: u64,
        timestamp: f64,
    },

    // Player
    PlayerStateChanged {
        from: String,
        to: String,
        timestamp: f64,
    },
    PlayerDied {
        timestamp: f64,
    },
    PlayerRevived {
        timestamp: f64,
    },
}

impl GameSignal {
    pub fn timestamp(&self) -> f64 {
        match self {
            Self::MissionStarted { timestamp, .. }
            | Self::MissionComplete { timestamp, .. }
            | Self::LevelLoaded { timestamp, .. }
            | Self::AgentSpawned { timestamp, .. }
            | Self::PersistentEnemy { timestamp, .. }
            | Self::SyndicateXp { timestamp, .. }
            | Self::PlayerStateChanged { timestamp, .. }
            | Self::PlayerDied { timestamp }
            | Self::PlayerRevived { timestamp } => *timestamp,
            Self::ItemDropped { item } => item.session_timestamp,
            Self::ConservationRefresh { sighting } => sighting.session_timestamp,
            Self::RewardReceived { reward } => reward.session_timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_type_tag() {
        let signal = GameSignal::MissionStarted {
            timestamp: 12.5,
            trigger: MissionTrigger::SpawnDensity,
        };
        let json = serde_json::to_value(&signal).unwrap();
        assert_eq!(json["type"], "mission_started");
        assert_eq!(json["trigger"], "spawn_density");
        assert_eq!(json["timestamp"], 12.5);
    }
}
