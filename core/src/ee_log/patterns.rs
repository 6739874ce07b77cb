//! Line pattern rules.
//!
//! Each rule is a regex plus an extractor turning its captures into a
//! [`LineMatch`]. Rules are independent: one line may satisfy several of them
//! and every match is reported, in rule order.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex, RegexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// World position `(x, y, z)`.
pub type Position = (f64, f64, f64);

pub const ORIGIN: Position = (0.0, 0.0, 0.0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("rule `{rule}` captured an invalid number `{value}`")]
    InvalidNumber { rule: &'static str, value: String },
}

/// Which log signal named the current map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelSource {
    Level,
    Mission,
    Node,
    Planet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    SurvivalCycle,
    Item,
    Extra,
    Credits,
    Affinity,
    Extract,
}

impl RewardKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::SurvivalCycle => "survival cycle",
            Self::Item => "item",
            Self::Extra => "extra",
            Self::Credits => "credits",
            Self::Affinity => "affinity",
            Self::Extract => "extract",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RewardMatch {
    pub kind: RewardKind,
    pub name: String,
    pub amount: u64,
    pub cycle: Option<u32>,
}

/// Raw fields captured by one rule.
#[derive(Debug, Clone, PartialEq)]
pub enum LineMatch {
    Level { source: LevelSource, name: String },
    AgentSpawned { raw_id: String },
    ItemDropped { raw_key: String, position: Position },
    ConservationEncounter { animal_type: String, position: Position },
    ConservationAgent { agent_path: String, animal_type: String },
    Reward(RewardMatch),
    MissionComplete { success: bool },
    SyndicateXpBase(u64),
    SyndicateXpFinal(u64),
    PlayerStateChange { from: String, to: String },
    PlayerDied,
    PlayerRevived,
    PersistentEnemy { spawned: bool },
}

impl LineMatch {
    /// Map signals are handled whether or not a mission is active.
    pub fn is_ungated(&self) -> bool {
        matches!(self, Self::Level { .. })
    }
}

type Extract = fn(&'static str, &Captures<'_>) -> Result<Option<LineMatch>, LineError>;

pub struct PatternRule {
    pub name: &'static str,
    regex: Regex,
    extract: Extract,
}

impl PatternRule {
    fn new(name: &'static str, pattern: &str, extract: Extract) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).unwrap(),
            extract,
        }
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl std::fmt::Debug for PatternRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternRule")
            .field("name", &self.name)
            .field("pattern", &self.regex.as_str())
            .finish()
    }
}

/// Ordered set of line rules, prefiltered by a [`RegexSet`].
#[derive(Debug)]
pub struct PatternRegistry {
    rules: Vec<PatternRule>,
    set: RegexSet,
}

static BUILTIN_REGISTRY: LazyLock<PatternRegistry> = LazyLock::new(PatternRegistry::build);

impl PatternRegistry {
    /// The EE.log rule set, compiled once per process.
    pub fn builtin() -> &'static PatternRegistry {
        &BUILTIN_REGISTRY
    }

    fn build() -> Self {
        let rules = vec![
            PatternRule::new("level_loaded", r"Level loaded: (.+)", |_, c| {
                Ok(level(LevelSource::Level, c))
            }),
            PatternRule::new("mission_info", r"Mission: (.+)", |_, c| {
                Ok(level(LevelSource::Mission, c))
            }),
            PatternRule::new("node_loading", r"Loading level (.+)", |_, c| {
                Ok(level(LevelSource::Node, c))
            }),
            PatternRule::new("planet_loaded", r"OnLevelLoaded: (.+)", |_, c| {
                Ok(level(LevelSource::Planet, c))
            }),
            PatternRule::new(
                "agent_spawn",
                r"AI \[Info\]: OnAgentCreated /Npc/(\w+?\d+) Live \d+ Spawned \d+ Ticking \d+",
                |_, c| {
                    Ok(Some(LineMatch::AgentSpawned {
                        raw_id: text(c, 1).to_string(),
                    }))
                },
            ),
            PatternRule::new(
                "drop_teleport",
                r"Script \[Info\]: TeleportAndFade\.lua:.*? (\w+) .*? -> Vector\(([^)]*)\)",
                |_, c| {
                    Ok(parse_vector(text(c, 2)).map(|position| LineMatch::ItemDropped {
                        raw_key: text(c, 1).to_string(),
                        position,
                    }))
                },
            ),
            PatternRule::new(
                "conservation_encounter",
                r"AI \[Info\]: ENCMGR: Encounter /Lotus/Types/Gameplay/Conservation/([^/]+)/[^/]+Encounter started at [^ ]+ at pos \(([^)]*)\)",
                |_, c| {
                    Ok(Some(LineMatch::ConservationEncounter {
                        animal_type: text(c, 1).to_string(),
                        position: parse_position_or_origin(text(c, 2)),
                    }))
                },
            ),
            PatternRule::new(
                "conservation_agent",
                r"AI \[Info\]: OnAgentCreated /(Npc/Common(?:Female|Male)?(\w+)Agent\d+)",
                |_, c| {
                    Ok(Some(LineMatch::ConservationAgent {
                        agent_path: text(c, 1).to_string(),
                        animal_type: text(c, 2).to_string(),
                    }))
                },
            ),
            PatternRule::new(
                "survival_cycle",
                r"SurvivalMission\.lua: Survival: Host reward (\d+)",
                |rule, c| {
                    let cycle: u32 = number(rule, c, 1)?;
                    Ok(Some(LineMatch::Reward(RewardMatch {
                        kind: RewardKind::SurvivalCycle,
                        name: format!("Survival Cycle {cycle}"),
                        amount: 1,
                        cycle: Some(cycle),
                    })))
                },
            ),
            PatternRule::new("mission_succeeded", r"EndOfMatch\.lua: Mission Succeeded", |_, _| {
                Ok(Some(LineMatch::MissionComplete { success: true }))
            }),
            PatternRule::new("mission_failed", r"EndOfMatch\.lua: Mission Failed", |_, _| {
                Ok(Some(LineMatch::MissionComplete { success: false }))
            }),
            PatternRule::new("syndicate_xp_base", r"SyndicateXP base for mission: (\d+)", |rule, c| {
                Ok(Some(LineMatch::SyndicateXpBase(number(rule, c, 1)?)))
            }),
            PatternRule::new("syndicate_xp_final", r"SyndicateXP post multiplier: (\d+)", |rule, c| {
                Ok(Some(LineMatch::SyndicateXpFinal(number(rule, c, 1)?)))
            }),
            PatternRule::new("reward_item", r"GiveInventoryItem\.lua: Giving (.+) to player", |_, c| {
                Ok(named_reward(RewardKind::Item, c))
            }),
            PatternRule::new("extra_reward", r"LotusGameRules\.lua: Extra reward: (.+)", |_, c| {
                Ok(named_reward(RewardKind::Extra, c))
            }),
            PatternRule::new("credits_reward", r"CreditsReward\.lua: Awarding (\d+) credits", |rule, c| {
                Ok(amount_reward(RewardKind::Credits, "Credits", number(rule, c, 1)?))
            }),
            PatternRule::new("affinity_reward", r"Affinity\.lua: Awarding (\d+) affinity", |rule, c| {
                Ok(amount_reward(RewardKind::Affinity, "Affinity", number(rule, c, 1)?))
            }),
            PatternRule::new("extract_reward", r"EndlessMission\.lua: Extract reward: (.+)", |_, c| {
                Ok(named_reward(RewardKind::Extract, c))
            }),
            PatternRule::new("player_state", r"PlayerScript\.lua: (\w+) -> (\w+)", |_, c| {
                Ok(Some(LineMatch::PlayerStateChange {
                    from: text(c, 1).to_string(),
                    to: text(c, 2).to_string(),
                }))
            }),
            PatternRule::new("player_died", r"PlayerScript\.lua: Player died", |_, _| {
                Ok(Some(LineMatch::PlayerDied))
            }),
            PatternRule::new("player_revived", r"PlayerScript\.lua: Player revived", |_, _| {
                Ok(Some(LineMatch::PlayerRevived))
            }),
            PatternRule::new(
                "persistent_enemy_spawned",
                r"LotusGameRules\.lua: spawned persistent enemy!",
                |_, _| Ok(Some(LineMatch::PersistentEnemy { spawned: true })),
            ),
            PatternRule::new(
                "persistent_enemy_killed",
                r"LotusGameRules\.lua: persistent enemy was killed!",
                |_, _| Ok(Some(LineMatch::PersistentEnemy { spawned: false })),
            ),
        ];

        let set = RegexSet::new(rules.iter().map(PatternRule::pattern)).unwrap();
        Self { rules, set }
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Run every rule against `line`.
    ///
    /// Pure: no state is touched, so a failing line can be discarded whole.
    pub fn match_line(&self, line: &str) -> Result<Vec<LineMatch>, LineError> {
        let mut matches = Vec::new();
        for idx in self.set.matches(line).iter() {
            let rule = &self.rules[idx];
            let Some(caps) = rule.regex.captures(line) else {
                continue;
            };
            if let Some(m) = (rule.extract)(rule.name, &caps)? {
                matches.push(m);
            }
        }
        Ok(matches)
    }
}

fn text<'h>(caps: &Captures<'h>, group: usize) -> &'h str {
    caps.get(group).map_or("", |m| m.as_str())
}

fn number<T: FromStr>(rule: &'static str, caps: &Captures<'_>, group: usize) -> Result<T, LineError> {
    let value = text(caps, group);
    value.parse().map_err(|_| LineError::InvalidNumber {
        rule,
        value: value.to_string(),
    })
}

fn level(source: LevelSource, caps: &Captures<'_>) -> Option<LineMatch> {
    let name = text(caps, 1).trim();
    if name.is_empty() {
        return None;
    }
    Some(LineMatch::Level {
        source,
        name: name.to_string(),
    })
}

fn named_reward(kind: RewardKind, caps: &Captures<'_>) -> Option<LineMatch> {
    let name = text(caps, 1).trim();
    if name.is_empty() {
        return None;
    }
    Some(LineMatch::Reward(RewardMatch {
        kind,
        name: name.to_string(),
        amount: 1,
        cycle: None,
    }))
}

fn amount_reward(kind: RewardKind, name: &str, amount: u64) -> Option<LineMatch> {
    // Zero awards carry nothing worth reporting
    if amount == 0 {
        return None;
    }
    Some(LineMatch::Reward(RewardMatch {
        kind,
        name: name.to_string(),
        amount,
        cycle: None,
    }))
}

/// Parse `x, y, z`. Anything other than exactly three numbers is rejected.
pub fn parse_vector(s: &str) -> Option<Position> {
    let mut parts = s.split(',').map(|p| p.trim().parse::<f64>());
    let x = parts.next()?.ok()?;
    let y = parts.next()?.ok()?;
    let z = parts.next()?.ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y, z))
}

/// Parse the first three components of `s`, falling back to the origin.
pub fn parse_position_or_origin(s: &str) -> Position {
    let coords: Vec<f64> = s
        .split(',')
        .take(3)
        .map_while(|p| p.trim().parse().ok())
        .collect();
    match coords[..] {
        [x, y, z] => (x, y, z),
        _ => ORIGIN,
    }
}
