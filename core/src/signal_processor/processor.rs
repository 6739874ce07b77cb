use chrono::Local;
use eewatch_types::MissionThresholds;

use crate::ee_log::{
    LineError, LineMatch, PatternRegistry, RewardMatch, normalize_identifier,
    parse_session_timestamp,
};
use crate::game_data::{IdentityNames, NameResolver};
use crate::state::{ConservationSighting, Item, Reward, SessionCache};

use super::{GameSignal, mission_state};

/// Wall-clock format stamped on rewards.
const WALL_CLOCK_FORMAT: &str = "%H:%M:%S";

/// Processes log lines, updates the session cache and emits signals.
///
/// Holds no mission state of its own; everything mutable lives in the
/// [`SessionCache`] passed to [`process_line`](Self::process_line).
pub struct EventProcessor {
    registry: &'static PatternRegistry,
    names: Box<dyn NameResolver + Send + Sync>,
    thresholds: MissionThresholds,
}

impl Default for EventProcessor {
    fn default() -> Self {
        Self::new(IdentityNames)
    }
}

impl EventProcessor {
    pub fn new(names: impl NameResolver + Send + Sync + 'static) -> Self {
        Self {
            registry: PatternRegistry::builtin(),
            names: Box::new(names),
            thresholds: MissionThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: MissionThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn names(&self) -> &(dyn NameResolver + Send + Sync) {
        self.names.as_ref()
    }

    pub fn thresholds(&self) -> &MissionThresholds {
        &self.thresholds
    }

    /// Process a single line.
    ///
    /// Lines without a leading session timestamp are ignored. A line that
    /// fails to parse returns `Err` and leaves `cache` untouched.
    pub fn process_line(
        &self,
        line: &str,
        cache: &mut SessionCache,
    ) -> Result<Vec<GameSignal>, LineError> {
        let Some(timestamp) = parse_session_timestamp(line) else {
            return Ok(Vec::new());
        };
        let matches = self.registry.match_line(line)?;

        let mut signals = Vec::new();
        signals.extend(mission_state::observe_timestamp(timestamp, &self.thresholds, cache));

        // Map signals run regardless of mission state
        for m in matches.iter().filter(|m| m.is_ungated()) {
            self.route(m, timestamp, cache, &mut signals);
        }

        if matches
            .iter()
            .any(|m| matches!(m, LineMatch::AgentSpawned { .. }))
        {
            signals.extend(mission_state::observe_spawn(timestamp, &self.thresholds, cache));
        }

        if !cache.is_active() {
            return Ok(signals);
        }

        for m in matches.iter().filter(|m| !m.is_ungated()) {
            self.route(m, timestamp, cache, &mut signals);
        }

        Ok(signals)
    }

    fn route(
        &self,
        line_match: &LineMatch,
        timestamp: f64,
        cache: &mut SessionCache,
        signals: &mut Vec<GameSignal>,
    ) {
        match line_match {
            LineMatch::Level { source, name } => {
                if cache.level.offer(*source, name, timestamp) {
                    tracing::info!(level = %name, ?source, "Level detected");
                    signals.push(GameSignal::LevelLoaded {
                        name: name.clone(),
                        source: *source,
                        timestamp,
                    });
                }
            }

            LineMatch::AgentSpawned { raw_id } => {
                let type_key = normalize_identifier(raw_id);
                cache.record_spawn(type_key);
                signals.push(GameSignal::AgentSpawned {
                    raw_id: raw_id.clone(),
                    type_key: type_key.to_string(),
                    display_name: self.names.enemy_name(raw_id),
                    timestamp,
                });
            }

            LineMatch::ItemDropped { raw_key, position } => {
                let item = Item {
                    raw_key: raw_key.clone(),
                    display_name: self.names.drop_name(raw_key),
                    position: *position,
                    session_timestamp: timestamp,
                };
                cache.record_item(item.clone());
                signals.push(GameSignal::ItemDropped { item });
            }

            LineMatch::ConservationEncounter {
                animal_type,
                position,
            } => {
                tracing::debug!(animal = %animal_type, ?position, "Conservation encounter started");
                signals.push(GameSignal::ConservationRefresh {
                    sighting: ConservationSighting {
                        animal_type: animal_type.clone(),
                        display_name: self.names.animal_name(animal_type),
                        position: Some(*position),
                        agent_path: None,
                        session_timestamp: timestamp,
                    },
                });
            }

            LineMatch::ConservationAgent {
                agent_path,
                animal_type,
            } => {
                let sighting = ConservationSighting {
                    animal_type: animal_type.clone(),
                    display_name: self.names.animal_name(animal_type),
                    position: None,
                    agent_path: Some(agent_path.clone()),
                    session_timestamp: timestamp,
                };
                cache.record_conservation_agent(sighting.clone());
                signals.push(GameSignal::ConservationRefresh { sighting });
            }

            LineMatch::Reward(reward) => {
                let reward = make_reward(reward, timestamp);
                tracing::debug!(
                    kind = reward.kind.label(),
                    name = %reward.name,
                    amount = reward.amount,
                    "Reward"
                );
                cache.record_reward(reward.clone());
                signals.push(GameSignal::RewardReceived { reward });
            }

            LineMatch::MissionComplete { success } => {
                tracing::info!(success, "Mission complete");
                signals.push(GameSignal::MissionComplete {
                    success: *success,
                    timestamp,
                });
            }

            LineMatch::SyndicateXpBase(base) => {
                cache.mission.syndicate_xp_base = *base;
            }

            LineMatch::SyndicateXpFinal(final_xp) => {
                signals.push(GameSignal::SyndicateXp {
                    base: cache.mission.syndicate_xp_base,
                    final_xp: *final_xp,
                    timestamp,
                });
            }

            LineMatch::PlayerStateChange { from, to } => {
                cache.player_state = to.clone();
                signals.push(GameSignal::PlayerStateChanged {
                    from: from.clone(),
                    to: to.clone(),
                    timestamp,
                });
            }

            LineMatch::PlayerDied => signals.push(GameSignal::PlayerDied { timestamp }),
            LineMatch::PlayerRevived => signals.push(GameSignal::PlayerRevived { timestamp }),

            LineMatch::PersistentEnemy { spawned } => {
                cache.persistent_enemy_alive = *spawned;
                signals.push(GameSignal::PersistentEnemy {
                    spawned: *spawned,
                    timestamp,
                });
            }
        }
    }
}

fn make_reward(reward: &RewardMatch, timestamp: f64) -> Reward {
    Reward {
        kind: reward.kind,
        name: reward.name.clone(),
        amount: reward.amount,
        cycle: reward.cycle,
        session_timestamp: timestamp,
        wall_clock_time: Local::now().format(WALL_CLOCK_FORMAT).to_string(),
    }
}
