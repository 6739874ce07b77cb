use hashbrown::HashMap;

use crate::state::info::{ConservationSighting, Item, LevelInfo, Reward};

/// Player state before the log has reported any transition.
pub const UNKNOWN_PLAYER_STATE: &str = "unknown";

/// Aggregates for the mission currently being watched.
///
/// Everything here is cleared when a new mission is detected, except the
/// timestamp bookkeeping that detection itself relies on.
#[derive(Debug, Clone, Default)]
pub struct MissionState {
    pub active: bool,
    /// Spawn counts keyed by normalized agent type.
    pub enemy_counts: HashMap<String, u64>,
    pub item_history: Vec<Item>,

    // Detection bookkeeping
    pub last_timestamp: f64,
    pub recent_spawn_count: u32,
    pub recent_spawn_window_start: Option<f64>,

    /// Last syndicate XP base seen this mission, paired with every final value.
    pub syndicate_xp_base: u64,
    pub started_at: Option<f64>,
}

impl MissionState {
    pub fn enemy_total(&self) -> u64 {
        self.enemy_counts.values().sum()
    }
}

/// Pure storage for monitor state.
/// Routing logic lives in EventProcessor.
#[derive(Debug, Clone)]
pub struct SessionCache {
    pub mission: MissionState,

    // Process-lifetime state, untouched by mission resets
    pub level: LevelInfo,
    pub rewards: Vec<Reward>,
    pub conservation_agents: Vec<ConservationSighting>,
    pub player_state: String,
    pub persistent_enemy_alive: bool,
    /// Number of mission starts seen since the monitor started.
    pub missions_started: u64,
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionCache {
    pub fn new() -> Self {
        Self {
            mission: MissionState::default(),
            level: LevelInfo::default(),
            rewards: Vec::new(),
            conservation_agents: Vec::new(),
            player_state: UNKNOWN_PLAYER_STATE.to_string(),
            persistent_enemy_alive: false,
            missions_started: 0,
        }
    }

    /// Start a fresh mission: clear per-mission aggregates and mark active.
    pub fn reset_mission(&mut self, timestamp: f64) {
        let mission = &mut self.mission;
        mission.enemy_counts.clear();
        mission.item_history.clear();
        mission.recent_spawn_count = 0;
        mission.syndicate_xp_base = 0;
        mission.active = true;
        mission.started_at = Some(timestamp);
        self.missions_started += 1;
    }

    pub fn is_active(&self) -> bool {
        self.mission.active
    }

    /// Count one spawn of `type_key`, returning the new count for that type.
    pub fn record_spawn(&mut self, type_key: &str) -> u64 {
        let count = self
            .mission
            .enemy_counts
            .entry_ref(type_key)
            .or_insert(0);
        *count += 1;
        *count
    }

    pub fn record_item(&mut self, item: Item) {
        self.mission.item_history.push(item);
    }

    pub fn record_reward(&mut self, reward: Reward) {
        self.rewards.push(reward);
    }

    pub fn record_conservation_agent(&mut self, sighting: ConservationSighting) {
        self.conservation_agents.push(sighting);
    }

    pub fn latest_items(&self, n: usize) -> &[Item] {
        let items = &self.mission.item_history;
        &items[items.len().saturating_sub(n)..]
    }

    pub fn latest_rewards(&self, n: usize) -> &[Reward] {
        &self.rewards[self.rewards.len().saturating_sub(n)..]
    }

    pub fn latest_conservation_agents(&self, n: usize) -> &[ConservationSighting] {
        let agents = &self.conservation_agents;
        &agents[agents.len().saturating_sub(n)..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ee_log::RewardKind;

    fn item(key: &str, ts: f64) -> Item {
        Item {
            raw_key: key.to_string(),
            display_name: key.to_string(),
            position: (0.0, 0.0, 0.0),
            session_timestamp: ts,
        }
    }

    #[test]
    fn test_reset_clears_mission_aggregates_only() {
        let mut cache = SessionCache::new();
        cache.record_spawn("Lancer");
        cache.record_item(item("Ferrite", 1.0));
        cache.mission.recent_spawn_count = 2;
        cache.mission.syndicate_xp_base = 100;
        cache.mission.last_timestamp = 42.0;
        cache.record_reward(Reward {
            kind: RewardKind::Credits,
            name: "Credits".to_string(),
            amount: 10,
            cycle: None,
            session_timestamp: 1.0,
            wall_clock_time: "12:00:00".to_string(),
        });

        cache.reset_mission(50.0);

        assert!(cache.is_active());
        assert!(cache.mission.enemy_counts.is_empty());
        assert!(cache.mission.item_history.is_empty());
        assert_eq!(cache.mission.recent_spawn_count, 0);
        assert_eq!(cache.mission.syndicate_xp_base, 0);
        assert_eq!(cache.mission.last_timestamp, 42.0);
        assert_eq!(cache.mission.started_at, Some(50.0));
        assert_eq!(cache.rewards.len(), 1);
        assert_eq!(cache.missions_started, 1);
    }

    #[test]
    fn test_record_spawn_counts_per_type() {
        let mut cache = SessionCache::new();
        assert_eq!(cache.record_spawn("Lancer"), 1);
        assert_eq!(cache.record_spawn("Lancer"), 2);
        assert_eq!(cache.record_spawn("Butcher"), 1);
        assert_eq!(cache.mission.enemy_total(), 3);
    }

    #[test]
    fn test_latest_items() {
        let mut cache = SessionCache::new();
        for i in 0..5 {
            cache.record_item(item(&format!("Item{i}"), i as f64));
        }
        let keys: Vec<_> = cache.latest_items(2).iter().map(|i| i.raw_key.as_str()).collect();
        assert_eq!(keys, ["Item3", "Item4"]);
        assert_eq!(cache.latest_items(10).len(), 5);
    }
}
