pub mod cache;
pub mod info;
pub mod snapshot;

pub use cache::{MissionState, SessionCache, UNKNOWN_PLAYER_STATE};
pub use info::{ConservationSighting, Item, LevelInfo, Reward};
pub use snapshot::{EnemyCount, MissionSnapshot};
