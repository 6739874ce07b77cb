use serde::Serialize;

use crate::game_data::NameResolver;
use crate::state::cache::SessionCache;
use crate::state::info::{ConservationSighting, Item, Reward};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyCount {
    pub type_key: String,
    pub display_name: String,
    pub count: u64,
}

/// Read-only copy of the monitor state for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MissionSnapshot {
    pub active: bool,
    pub level: Option<String>,
    pub enemy_total: u64,
    /// Sorted by count, highest first.
    pub enemies: Vec<EnemyCount>,
    pub item_count: usize,
    pub latest_items: Vec<Item>,
    pub reward_count: usize,
    pub latest_rewards: Vec<Reward>,
    pub conservation_count: usize,
    pub latest_conservation_agents: Vec<ConservationSighting>,
    pub player_state: String,
    /// Whether a persistent enemy is currently alive.
    pub persistent_enemy_alive: bool,
    pub missions_started: u64,
}

impl MissionSnapshot {
    /// Capture `cache`, keeping the last `history_len` items, rewards and
    /// conservation sightings.
    pub fn capture(cache: &SessionCache, names: &dyn NameResolver, history_len: usize) -> Self {
        let mission = &cache.mission;

        let mut enemies: Vec<EnemyCount> = mission
            .enemy_counts
            .iter()
            .map(|(key, &count)| EnemyCount {
                type_key: key.clone(),
                display_name: names.enemy_name(key),
                count,
            })
            .collect();
        enemies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.type_key.cmp(&b.type_key)));

        Self {
            active: mission.active,
            level: cache.level.name.clone(),
            enemy_total: mission.enemy_total(),
            enemies,
            item_count: mission.item_history.len(),
            latest_items: cache.latest_items(history_len).to_vec(),
            reward_count: cache.rewards.len(),
            latest_rewards: cache.latest_rewards(history_len).to_vec(),
            conservation_count: cache.conservation_agents.len(),
            latest_conservation_agents: cache.latest_conservation_agents(history_len).to_vec(),
            player_state: cache.player_state.clone(),
            persistent_enemy_alive: cache.persistent_enemy_alive,
            missions_started: cache.missions_started,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_data::{BuiltinNames, IdentityNames};

    fn item(key: &str) -> Item {
        Item {
            raw_key: key.to_string(),
            display_name: key.to_string(),
            position: (1.0, 2.0, 3.0),
            session_timestamp: 5.0,
        }
    }

    #[test]
    fn test_capture_orders_enemies_and_trims_history() {
        let mut cache = SessionCache::new();
        cache.reset_mission(1.0);
        cache.record_spawn("Lancer");
        cache.record_spawn("Butcher");
        cache.record_spawn("Butcher");
        cache.record_spawn("Ballista");
        for key in ["Ferrite", "AlloyPlate", "Salvage"] {
            cache.record_item(item(key));
        }

        let snapshot = MissionSnapshot::capture(&cache, &IdentityNames, 2);

        assert!(snapshot.active);
        assert_eq!(snapshot.enemy_total, 4);
        let keys: Vec<_> = snapshot.enemies.iter().map(|e| e.type_key.as_str()).collect();
        assert_eq!(keys, ["Butcher", "Ballista", "Lancer"]);
        assert_eq!(snapshot.item_count, 3);
        let items: Vec<_> = snapshot.latest_items.iter().map(|i| i.raw_key.as_str()).collect();
        assert_eq!(items, ["AlloyPlate", "Salvage"]);
        assert_eq!(snapshot.player_state, "unknown");
    }

    #[test]
    fn test_capture_trims_conservation_sightings() {
        let mut cache = SessionCache::new();
        for (i, animal) in ["Kubrow", "Kavat", "Condroc"].into_iter().enumerate() {
            cache.record_conservation_agent(ConservationSighting {
                animal_type: animal.to_string(),
                display_name: animal.to_string(),
                position: None,
                agent_path: None,
                session_timestamp: i as f64,
            });
        }

        let snapshot = MissionSnapshot::capture(&cache, &IdentityNames, 2);

        assert_eq!(snapshot.conservation_count, 3);
        let animals: Vec<_> = snapshot
            .latest_conservation_agents
            .iter()
            .map(|s| s.animal_type.as_str())
            .collect();
        assert_eq!(animals, ["Kavat", "Condroc"]);
    }

    #[test]
    fn test_capture_reports_persistent_enemy() {
        let mut cache = SessionCache::new();
        assert!(!MissionSnapshot::capture(&cache, &IdentityNames, 10).persistent_enemy_alive);

        cache.persistent_enemy_alive = true;
        assert!(MissionSnapshot::capture(&cache, &IdentityNames, 10).persistent_enemy_alive);
    }

    #[test]
    fn test_capture_resolves_enemy_names() {
        let mut cache = SessionCache::new();
        cache.record_spawn("Lancer");

        let snapshot = MissionSnapshot::capture(&cache, &BuiltinNames, 10);
        assert_eq!(snapshot.enemies[0].display_name, "冲锋枪兵");
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = MissionSnapshot::capture(&SessionCache::new(), &IdentityNames, 10);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["active"], false);
        assert_eq!(json["enemy_total"], 0);
        assert!(json["level"].is_null());
    }
}
