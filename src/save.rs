//! Versioned save data.
//!
//! The envelope embeds the full config, so a restored run keeps the
//! exact rules and catalogs it was started under even when the host
//! injected custom ones. Storage is the host's job: the core only
//! produces and consumes JSON strings.
//!
//! - `SAVE_VERSION` is written into every save. Bump it when fields are
//!   added; old saves still load, with missing fields at their defaults.
//! - `MIN_COMPATIBLE_VERSION` rises only on breaking changes; anything
//!   older is refused rather than misread.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::outcome::Outcome;
use crate::rng::GameRng;
use crate::state::{GameState, Pacing};

pub const SAVE_VERSION: u32 = 1;
pub const MIN_COMPATIBLE_VERSION: u32 = 1;

/// Save envelope: format version, rules, and run state.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    #[serde(default)]
    pub config: GameConfig,
    pub game: GameSave,
}

/// Serialized run state. Kept separate from `GameState` so the wire
/// format can evolve independently of the in-memory layout.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSave {
    pub money: i32,
    pub turns_remaining: u32,
    pub opinion: i32,
    pub risk: i32,
    pub research: i32,
    pub turn: u32,
    pub turns_since_last_event: u32,
    pub consecutive_quiet_turns: u32,
    pub had_event_last_turn: bool,
    pub rng_seed: u64,
    pub log: Vec<String>,
    pub outcome: Option<Outcome>,
}

// ── Errors ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum SaveError {
    Parse(serde_json::Error),
    IncompatibleVersion { saved: u32, min: u32 },
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Parse(e) => write!(f, "could not parse save data: {}", e),
            SaveError::IncompatibleVersion { saved, min } => write!(
                f,
                "save version {} predates the oldest supported version {}",
                saved, min
            ),
        }
    }
}

impl std::error::Error for SaveError {}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Parse(e)
    }
}

// ── Extract / Apply ───────────────────────────────────────────────────

pub fn extract_save(config: &GameConfig, state: &GameState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        config: config.clone(),
        game: GameSave {
            money: state.money,
            turns_remaining: state.turns_remaining,
            opinion: state.opinion,
            risk: state.risk,
            research: state.research,
            turn: state.turn,
            turns_since_last_event: state.pacing.turns_since_last_event,
            consecutive_quiet_turns: state.pacing.consecutive_quiet_turns,
            had_event_last_turn: state.pacing.had_event_last_turn,
            rng_seed: state.rng.seed,
            log: state.log.clone(),
            outcome: state.outcome.clone(),
        },
    }
}

pub fn apply_save(state: &mut GameState, save: &GameSave) {
    state.money = save.money;
    state.turns_remaining = save.turns_remaining;
    state.opinion = save.opinion;
    state.risk = save.risk;
    state.research = save.research;
    state.turn = save.turn;
    state.pacing = Pacing {
        turns_since_last_event: save.turns_since_last_event,
        consecutive_quiet_turns: save.consecutive_quiet_turns,
        had_event_last_turn: save.had_event_last_turn,
    };
    state.rng = GameRng::new(save.rng_seed);
    state.log = save.log.clone();
    state.outcome = save.outcome.clone();
}

pub fn to_json(config: &GameConfig, state: &GameState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&extract_save(config, state))
}

pub fn from_json(json: &str) -> Result<(GameConfig, GameState), SaveError> {
    let data: SaveData = serde_json::from_str(json)?;
    if data.version < MIN_COMPATIBLE_VERSION {
        return Err(SaveError::IncompatibleVersion {
            saved: data.version,
            min: MIN_COMPATIBLE_VERSION,
        });
    }
    let mut state = GameState::new(&data.config);
    apply_save(&mut state, &data.game);
    Ok((data.config, state))
}
