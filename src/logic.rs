//! Turn resolution.
//!
//! Both entry points resolve exactly one turn: validate, charge, apply
//! effects, run the event phase, evaluate terminal conditions, advance
//! the turn counter. Refused actions resolve nothing and mutate nothing.

use std::fmt;

use crate::catalog::ActionSpec;
use crate::config::GameConfig;
use crate::events;
use crate::outcome::{self, Outcome};
use crate::state::{GameState, ResourceSnapshot};

// ── Errors ────────────────────────────────────────────────────────────

/// Why an action was refused. The state is untouched in every case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionError {
    InvalidActionId(String),
    InsufficientFunds { needed: u32, available: i32 },
    InsufficientTime { needed: u32, available: u32 },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::InvalidActionId(id) => write!(f, "no such action: {}", id),
            ActionError::InsufficientFunds { needed, available } => {
                write!(f, "not enough funding: need {}, have {}", needed, available)
            }
            ActionError::InsufficientTime { needed, available } => {
                write!(f, "not enough turns left: need {}, have {}", needed, available)
            }
        }
    }
}

impl std::error::Error for ActionError {}

// ── Turn Report ───────────────────────────────────────────────────────

/// What one turn resolution produced, ready for the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    pub snapshot: ResourceSnapshot,
    /// Narrative lines for this resolution, in order.
    pub narrative: Vec<String>,
    /// Id of the event that fired, if any.
    pub event: Option<String>,
    /// Present exactly when the run just ended, or was already over.
    pub outcome: Option<Outcome>,
}

impl TurnReport {
    fn already_over(state: &GameState) -> Self {
        Self {
            snapshot: state.snapshot(),
            narrative: Vec::new(),
            event: None,
            outcome: state.outcome.clone(),
        }
    }
}

// ── Turn Resolution ───────────────────────────────────────────────────

/// Validate and resolve one catalog action, then run the event and
/// outcome phases. After the run has ended, restates the stored outcome
/// without touching anything.
pub fn perform_action(
    config: &GameConfig,
    state: &mut GameState,
    action_id: &str,
) -> Result<TurnReport, ActionError> {
    let action = config
        .action(action_id)
        .ok_or_else(|| ActionError::InvalidActionId(action_id.to_string()))?;

    if state.outcome.is_some() {
        return Ok(TurnReport::already_over(state));
    }
    // An i32 balance can never cover a cost beyond i32 range.
    let cost = i32::try_from(action.cost).map_err(|_| ActionError::InsufficientFunds {
        needed: action.cost,
        available: state.money,
    })?;
    if state.money < cost {
        return Err(ActionError::InsufficientFunds {
            needed: action.cost,
            available: state.money,
        });
    }
    if state.turns_remaining < action.time_required {
        return Err(ActionError::InsufficientTime {
            needed: action.time_required,
            available: state.turns_remaining,
        });
    }

    let mut narrative = Vec::new();
    state.money -= cost;
    state.turns_remaining -= action.time_required;
    state.apply_effects(&action.effects, config);
    state.narrate(&mut narrative, describe_action(action));

    Ok(finish_turn(config, state, narrative))
}

/// Hold steady for one turn: no cost, no action effects, the same event
/// and outcome phases.
pub fn advance_turn(config: &GameConfig, state: &mut GameState) -> TurnReport {
    if state.outcome.is_some() {
        return TurnReport::already_over(state);
    }
    let mut narrative = Vec::new();
    state.turns_remaining = state.turns_remaining.saturating_sub(1);
    state.narrate(
        &mut narrative,
        "The team holds steady and reviews the data.".to_string(),
    );
    finish_turn(config, state, narrative)
}

fn finish_turn(
    config: &GameConfig,
    state: &mut GameState,
    mut narrative: Vec<String>,
) -> TurnReport {
    let event = events::run_event_phase(config, state, &mut narrative);
    let outcome = outcome::check_terminal(config, state, &mut narrative);
    state.turn += 1;
    TurnReport {
        snapshot: state.snapshot(),
        narrative,
        event,
        outcome,
    }
}

/// Log line for a resolved action, with the up-front cost folded into
/// the money delta.
fn describe_action(action: &ActionSpec) -> String {
    let mut all = action.effects;
    all.money -= action.cost as i32;
    let summary = all.summary();
    if summary.is_empty() {
        action.name.clone()
    } else {
        format!("{} ({})", action.name, summary)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_refused_actions_never_mutate(money in 0i32..40, seed in 0u64..200) {
            let mut config = GameConfig::default();
            config.seed = seed;
            let mut state = GameState::new(&config);
            state.money = money;
            let before = state.clone();
            let result = perform_action(&config, &mut state, "stimulation_test");
            prop_assert!(
                matches!(result, Err(ActionError::InsufficientFunds { .. })),
                "expected an insufficient-funds refusal, got {:?}",
                result
            );
            prop_assert_eq!(state, before);
        }

        #[test]
        fn prop_random_play_keeps_resources_in_bounds(
            seed in 0u64..10_000,
            picks in prop::collection::vec(0usize..9, 1..60),
        ) {
            let mut config = GameConfig::default();
            config.seed = seed;
            let mut state = GameState::new(&config);
            for &pick in &picks {
                if state.outcome.is_some() {
                    break;
                }
                if pick == 8 {
                    advance_turn(&config, &mut state);
                } else {
                    let id = config.actions[pick].id.clone();
                    let _ = perform_action(&config, &mut state, &id);
                }
                prop_assert!(state.money >= 0);
                prop_assert!(state.opinion >= 0 && state.opinion <= config.max_opinion);
                prop_assert!(state.risk >= 0 && state.risk <= config.max_risk);
                prop_assert!(state.research >= 0 && state.research <= config.research_needed);
            }
        }
    }
}
