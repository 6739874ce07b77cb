//! Terminal output for signals and snapshots.

use eewatch_core::ee_log::Position;
use eewatch_core::signal_processor::{GameSignal, MissionTrigger, SignalHandler};
use eewatch_core::state::{Item, MissionSnapshot, Reward};
use eewatch_types::formatting::{format_compact, format_position, format_session_time, format_thousands};

/// Prints one human-readable line per signal.
#[derive(Debug, Default)]
pub struct ConsoleHandler;

impl SignalHandler for ConsoleHandler {
    fn on_mission_start(&mut self, trigger: MissionTrigger, timestamp: f64) {
        let reason = match trigger {
            MissionTrigger::TimestampJump => "game restarted",
            MissionTrigger::SpawnDensity => "enemies spawning",
        };
        println!("== Mission started at {} ({reason}) ==", format_session_time(timestamp));
    }

    fn on_mission_complete(&mut self, success: bool) {
        println!("== Mission {} ==", if success { "succeeded" } else { "failed" });
    }

    fn on_level_loaded(&mut self, name: &str) {
        println!("Level: {name}");
    }

    fn on_agent_spawned(&mut self, raw_id: &str, display_name: &str) {
        if raw_id == display_name {
            println!("  + {raw_id}");
        } else {
            println!("  + {display_name} ({raw_id})");
        }
    }

    fn on_item_dropped(&mut self, item: &Item) {
        println!("  * {} @ {}", item.display_name, format_position(item.position));
    }

    fn on_conservation_refresh(&mut self, animal_type: &str, position: Option<Position>) {
        match position {
            Some(pos) => println!("  ~ {animal_type} tracks appeared @ {}", format_position(pos)),
            None => println!("  ~ {animal_type} spawned"),
        }
    }

    fn on_persistent_enemy(&mut self, spawned: bool) {
        if spawned {
            println!("  ! Persistent enemy is hunting you");
        } else {
            println!("  ! Persistent enemy defeated");
        }
    }

    fn on_reward_received(&mut self, reward: &Reward) {
        if reward.amount > 1 {
            println!(
                "  $ [{}] {} x{}",
                reward.wall_clock_time,
                reward.name,
                format_thousands(reward.amount)
            );
        } else {
            println!("  $ [{}] {}", reward.wall_clock_time, reward.name);
        }
    }

    fn on_syndicate_xp(&mut self, base: u64, final_xp: u64) {
        println!(
            "  Syndicate standing: {} base, {} total",
            format_thousands(base),
            format_thousands(final_xp)
        );
    }

    fn on_player_state_change(&mut self, from: &str, to: &str) {
        println!("  Player: {from} -> {to}");
    }

    fn on_player_death(&mut self) {
        println!("  Player died");
    }

    fn on_player_revive(&mut self) {
        println!("  Player revived");
    }
}

/// Prints every signal as one JSON object per line.
#[derive(Debug, Default)]
pub struct JsonHandler;

impl SignalHandler for JsonHandler {
    fn handle_signal(&mut self, signal: &GameSignal) {
        match serde_json::to_string(signal) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize signal"),
        }
    }
}

pub fn print_snapshot(snapshot: &MissionSnapshot, json: bool) {
    if json {
        match serde_json::to_string_pretty(snapshot) {
            Ok(out) => println!("{out}"),
            Err(e) => tracing::warn!(error = %e, "Failed to serialize snapshot"),
        }
        return;
    }

    println!();
    println!(
        "Mission: {}   Level: {}",
        if snapshot.active { "active" } else { "idle" },
        snapshot.level.as_deref().unwrap_or("unknown")
    );
    println!(
        "Missions started: {}   Player: {}",
        snapshot.missions_started, snapshot.player_state
    );

    println!("Enemies: {}", format_thousands(snapshot.enemy_total));
    for enemy in &snapshot.enemies {
        println!("  {:>6}  {}", format_compact(enemy.count), enemy.display_name);
    }

    println!("Items: {}", format_thousands(snapshot.item_count as u64));
    for item in &snapshot.latest_items {
        println!(
            "  {}  {} @ {}",
            format_session_time(item.session_timestamp),
            item.display_name,
            format_position(item.position)
        );
    }

    println!("Rewards: {}", format_thousands(snapshot.reward_count as u64));
    for reward in &snapshot.latest_rewards {
        println!("  [{}] {} x{}", reward.wall_clock_time, reward.name, reward.amount);
    }

    if snapshot.persistent_enemy_alive {
        println!("Persistent enemy: alive");
    }

    if snapshot.conservation_count > 0 {
        println!("Conservation: {}", format_thousands(snapshot.conservation_count as u64));
        for sighting in &snapshot.latest_conservation_agents {
            println!(
                "  {}  {}",
                format_session_time(sighting.session_timestamp),
                sighting.display_name
            );
        }
    }
}
