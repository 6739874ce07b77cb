//! Mission state machine.
//!
//! The log has no "mission started" line, so a new mission is inferred:
//! - a session timestamp jump means the game restarted (resets even mid-mission)
//! - a burst of agent spawns while idle means a mission map just loaded
//!
//! Mission completion is reported but does not end the active state; the
//! next start detection replaces the mission in place.

use eewatch_types::MissionThresholds;

use crate::state::SessionCache;

use super::{GameSignal, MissionTrigger};

/// Record `timestamp` as the latest seen, resetting the mission if it jumped
/// past the threshold.
pub fn observe_timestamp(
    timestamp: f64,
    thresholds: &MissionThresholds,
    cache: &mut SessionCache,
) -> Option<GameSignal> {
    let last = cache.mission.last_timestamp;
    cache.mission.last_timestamp = timestamp;

    if last > 0.0 && timestamp - last > thresholds.session_jump {
        tracing::info!(last, timestamp, "Session timestamp jumped, starting new mission");
        return Some(start_mission(timestamp, MissionTrigger::TimestampJump, cache));
    }
    None
}

/// Count an agent spawn toward the density heuristic. Only runs while idle.
pub fn observe_spawn(
    timestamp: f64,
    thresholds: &MissionThresholds,
    cache: &mut SessionCache,
) -> Option<GameSignal> {
    if cache.is_active() {
        return None;
    }

    let mission = &mut cache.mission;
    match mission.recent_spawn_window_start {
        Some(start) if timestamp - start < thresholds.density_window_secs => {
            mission.recent_spawn_count += 1;
        }
        _ => {
            mission.recent_spawn_count = 1;
            mission.recent_spawn_window_start = Some(timestamp);
        }
    }

    if mission.recent_spawn_count >= thresholds.density_count {
        tracing::info!(
            spawns = mission.recent_spawn_count,
            timestamp,
            "Spawn burst detected, starting new mission"
        );
        return Some(start_mission(timestamp, MissionTrigger::SpawnDensity, cache));
    }
    None
}

fn start_mission(timestamp: f64, trigger: MissionTrigger, cache: &mut SessionCache) -> GameSignal {
    cache.reset_mission(timestamp);
    GameSignal::MissionStarted { timestamp, trigger }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> MissionThresholds {
        MissionThresholds::default()
    }

    #[test]
    fn test_first_timestamp_never_jumps() {
        let mut cache = SessionCache::new();
        assert_eq!(observe_timestamp(9000.0, &thresholds(), &mut cache), None);
        assert_eq!(cache.mission.last_timestamp, 9000.0);
        assert!(!cache.is_active());
    }

    #[test]
    fn test_jump_threshold_is_exclusive() {
        let mut cache = SessionCache::new();
        observe_timestamp(10.0, &thresholds(), &mut cache);
        assert_eq!(observe_timestamp(5010.0, &thresholds(), &mut cache), None);
        assert!(observe_timestamp(10010.5, &thresholds(), &mut cache).is_some());
        assert!(cache.is_active());
    }

    #[test]
    fn test_jump_while_active_resets_in_place() {
        let mut cache = SessionCache::new();
        observe_timestamp(10.0, &thresholds(), &mut cache);
        cache.reset_mission(10.0);
        cache.record_spawn("Lancer");

        let signal = observe_timestamp(6000.0, &thresholds(), &mut cache);
        assert_eq!(
            signal,
            Some(GameSignal::MissionStarted {
                timestamp: 6000.0,
                trigger: MissionTrigger::TimestampJump,
            })
        );
        assert!(cache.is_active());
        assert!(cache.mission.enemy_counts.is_empty());
        assert_eq!(cache.missions_started, 2);
    }

    #[test]
    fn test_spawn_window_restarts_when_expired() {
        let mut cache = SessionCache::new();
        assert_eq!(observe_spawn(10.0, &thresholds(), &mut cache), None);
        assert_eq!(observe_spawn(14.0, &thresholds(), &mut cache), None);
        assert_eq!(cache.mission.recent_spawn_count, 2);

        // 15.0 is exactly one window after 10.0, so it opens a new window
        assert_eq!(observe_spawn(15.0, &thresholds(), &mut cache), None);
        assert_eq!(cache.mission.recent_spawn_count, 1);
        assert_eq!(cache.mission.recent_spawn_window_start, Some(15.0));
    }

    #[test]
    fn test_spawns_ignored_while_active() {
        let mut cache = SessionCache::new();
        cache.reset_mission(1.0);
        for ts in [2.0, 2.1, 2.2, 2.3] {
            assert_eq!(observe_spawn(ts, &thresholds(), &mut cache), None);
        }
        assert_eq!(cache.mission.recent_spawn_count, 0);
    }

    #[test]
    fn test_custom_density_threshold() {
        let custom = MissionThresholds {
            density_count: 2,
            ..MissionThresholds::default()
        };
        let mut cache = SessionCache::new();
        assert_eq!(observe_spawn(1.0, &custom, &mut cache), None);
        assert!(observe_spawn(1.5, &custom, &mut cache).is_some());
        assert_eq!(cache.mission.recent_spawn_count, 0);
    }
}
