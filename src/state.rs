//! Live state of a run.

use serde::{Deserialize, Serialize};

use crate::catalog::EffectSet;
use crate::config::GameConfig;
use crate::outcome::Outcome;
use crate::rng::GameRng;

/// Rolling log capacity.
const LOG_LIMIT: usize = 30;

/// Event pacing counters, updated once per turn resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    pub turns_since_last_event: u32,
    pub consecutive_quiet_turns: u32,
    pub had_event_last_turn: bool,
}

/// Copy of the player-visible resources after a resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub money: i32,
    pub turns_remaining: u32,
    pub opinion: i32,
    pub risk: i32,
    pub research: i32,
    pub turn: u32,
}

/// Mutable state of a single run. Resource fields stay inside their
/// configured bounds after every mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub money: i32,
    pub turns_remaining: u32,
    pub opinion: i32,
    pub risk: i32,
    pub research: i32,
    /// Completed turn resolutions.
    pub turn: u32,
    pub pacing: Pacing,
    pub rng: GameRng,
    pub log: Vec<String>,
    /// Set exactly once, when a terminal condition fires.
    pub outcome: Option<Outcome>,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            money: config.starting_money,
            turns_remaining: config.total_turns,
            opinion: config.starting_opinion,
            risk: config.starting_risk,
            research: config.starting_research,
            turn: 0,
            pacing: Pacing::default(),
            rng: GameRng::new(config.seed),
            log: vec!["The pilot geothermal programme begins.".into()],
            outcome: None,
        }
    }

    pub fn snapshot(&self) -> ResourceSnapshot {
        ResourceSnapshot {
            money: self.money,
            turns_remaining: self.turns_remaining,
            opinion: self.opinion,
            risk: self.risk,
            research: self.research,
            turn: self.turn,
        }
    }

    /// Apply a batch of deltas, clamping every resource to its bounds.
    pub fn apply_effects(&mut self, effects: &EffectSet, config: &GameConfig) {
        self.money = (self.money + effects.money).max(0);
        if let Some(cap) = config.max_money {
            self.money = self.money.min(cap);
        }
        self.opinion = (self.opinion + effects.opinion).max(0).min(config.max_opinion);
        self.risk = (self.risk + effects.risk).max(0).min(config.max_risk);
        self.research = (self.research + effects.research)
            .max(0)
            .min(config.research_needed);
        if effects.time > 0 {
            self.turns_remaining = self.turns_remaining.saturating_sub(effects.time as u32);
        } else if effects.time < 0 {
            self.turns_remaining = self.turns_remaining.saturating_add(effects.time.unsigned_abs());
        }
    }

    pub fn add_log(&mut self, text: &str) {
        self.log.push(text.to_string());
        if self.log.len() > LOG_LIMIT {
            self.log.remove(0);
        }
    }

    /// Log a line and mirror it into the turn narrative.
    pub fn narrate(&mut self, narrative: &mut Vec<String>, text: String) {
        self.add_log(&text);
        narrative.push(text);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_effects() -> impl Strategy<Value = EffectSet> {
        (
            -300i32..300,
            -150i32..150,
            -150i32..150,
            -150i32..150,
            -3i32..4,
        )
            .prop_map(|(money, opinion, risk, research, time)| EffectSet {
                money,
                opinion,
                risk,
                research,
                time,
            })
    }

    proptest! {
        #[test]
        fn prop_effects_never_leave_the_bounds(batches in prop::collection::vec(arb_effects(), 1..30)) {
            let config = GameConfig::default();
            let mut state = GameState::new(&config);
            for effects in &batches {
                state.apply_effects(effects, &config);
                prop_assert!(state.money >= 0);
                prop_assert!(state.opinion >= 0 && state.opinion <= config.max_opinion);
                prop_assert!(state.risk >= 0 && state.risk <= config.max_risk);
                prop_assert!(state.research >= 0 && state.research <= config.research_needed);
            }
        }

        #[test]
        fn prop_money_cap_holds_when_set(batches in prop::collection::vec(arb_effects(), 1..30)) {
            let mut config = GameConfig::default();
            config.max_money = Some(300);
            let mut state = GameState::new(&config);
            for effects in &batches {
                state.apply_effects(effects, &config);
                prop_assert!(state.money <= 300);
            }
        }
    }
}
