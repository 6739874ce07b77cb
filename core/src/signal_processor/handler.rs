use crate::ee_log::Position;
use crate::state::{Item, Reward};

use super::{GameSignal, MissionTrigger};

/// Receives signals from the monitor loop.
///
/// Handlers run on the loop's task, so a slow handler delays reading the log.
/// The default `handle_signal` fans each signal out to the `on_*` hooks below,
/// all of which do nothing unless overridden. Implementors either pick the
/// hooks they care about or replace `handle_signal` to see signals whole.
pub trait SignalHandler {
    fn handle_signal(&mut self, signal: &GameSignal) {
        match signal {
            GameSignal::MissionStarted { timestamp, trigger } => {
                self.on_mission_start(*trigger, *timestamp)
            }
            GameSignal::MissionComplete { success, .. } => {
                self.on_mission_complete(*success);
                if *success {
                    self.on_mission_success();
                }
            }
            GameSignal::LevelLoaded { name, .. } => self.on_level_loaded(name),
            GameSignal::AgentSpawned {
                raw_id,
                display_name,
                ..
            } => self.on_agent_spawned(raw_id, display_name),
            GameSignal::ItemDropped { item } => self.on_item_dropped(item),
            GameSignal::ConservationRefresh { sighting } => {
                self.on_conservation_refresh(&sighting.animal_type, sighting.position)
            }
            GameSignal::PersistentEnemy { spawned, .. } => self.on_persistent_enemy(*spawned),
            GameSignal::RewardReceived { reward } => {
                self.on_reward_received(reward);
                if let Some(cycle) = reward.cycle {
                    self.on_survival_cycle(cycle);
                }
            }
            GameSignal::SyndicateXp { base, final_xp, .. } => {
                self.on_syndicate_xp(*base, *final_xp)
            }
            GameSignal::PlayerStateChanged { from, to, .. } => {
                self.on_player_state_change(from, to)
            }
            GameSignal::PlayerDied { .. } => self.on_player_death(),
            GameSignal::PlayerRevived { .. } => self.on_player_revive(),
        }
    }

    fn handle_signals(&mut self, signals: &[GameSignal]) {
        for signal in signals {
            self.handle_signal(signal);
        }
    }

    fn on_mission_start(&mut self, _trigger: MissionTrigger, _timestamp: f64) {}
    fn on_mission_complete(&mut self, _success: bool) {}
    fn on_mission_success(&mut self) {}
    fn on_level_loaded(&mut self, _name: &str) {}
    /// `raw_id` keeps its instance digits; `display_name` comes from the
    /// session's name resolver.
    fn on_agent_spawned(&mut self, _raw_id: &str, _display_name: &str) {}
    fn on_item_dropped(&mut self, _item: &Item) {}
    /// `position` is only known for encounter starts, not agent creations.
    fn on_conservation_refresh(&mut self, _animal_type: &str, _position: Option<Position>) {}
    fn on_persistent_enemy(&mut self, _spawned: bool) {}
    fn on_reward_received(&mut self, _reward: &Reward) {}
    fn on_survival_cycle(&mut self, _cycle: u32) {}
    fn on_syndicate_xp(&mut self, _base: u64, _final_xp: u64) {}
    fn on_player_state_change(&mut self, _from: &str, _to: &str) {}
    fn on_player_death(&mut self) {}
    fn on_player_revive(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ee_log::RewardKind;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl SignalHandler for Recorder {
        fn on_mission_complete(&mut self, success: bool) {
            self.calls.push(format!("complete:{success}"));
        }
        fn on_mission_success(&mut self) {
            self.calls.push("success".to_string());
        }
        fn on_reward_received(&mut self, reward: &Reward) {
            self.calls.push(format!("reward:{}", reward.name));
        }
        fn on_survival_cycle(&mut self, cycle: u32) {
            self.calls.push(format!("cycle:{cycle}"));
        }
    }

    fn reward(kind: RewardKind, name: &str, cycle: Option<u32>) -> GameSignal {
        GameSignal::RewardReceived {
            reward: Reward {
                kind,
                name: name.to_string(),
                amount: 1,
                cycle,
                session_timestamp: 1.0,
                wall_clock_time: "00:00:00".to_string(),
            },
        }
    }

    #[test]
    fn test_default_dispatch_fans_out_to_hooks() {
        let mut recorder = Recorder::default();
        recorder.handle_signals(&[
            GameSignal::MissionComplete {
                success: true,
                timestamp: 1.0,
            },
            GameSignal::MissionComplete {
                success: false,
                timestamp: 2.0,
            },
            reward(RewardKind::SurvivalCycle, "Survival Cycle 2", Some(2)),
            reward(RewardKind::Extra, "Neural Sensors", None),
            GameSignal::PlayerDied { timestamp: 3.0 },
        ]);

        assert_eq!(
            recorder.calls,
            [
                "complete:true",
                "success",
                "complete:false",
                "reward:Survival Cycle 2",
                "cycle:2",
                "reward:Neural Sensors",
            ]
        );
    }
}
