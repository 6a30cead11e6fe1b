//! Per-turn random event engine.
//!
//! Each resolution rolls at most one event. The chance scales with
//! seismic risk between a floor and a cap, pacing counters force an
//! event after a long quiet stretch and block back-to-back fires, and
//! the candidate pool is weighted by category and filtered by guard
//! rules before a uniform pick.

use crate::catalog::{EffectSet, EventCategory};
use crate::config::GameConfig;
use crate::state::GameState;

// ── Probability ───────────────────────────────────────────────────────

/// Percent chance of an event firing at the given risk level.
pub fn event_chance(config: &GameConfig, risk: i32) -> f64 {
    let t = &config.tuning;
    (t.base_chance + risk as f64 * t.risk_multiplier)
        .max(t.min_chance)
        .min(t.max_chance)
}

// ── Event Phase ───────────────────────────────────────────────────────

/// Run the event phase of one turn resolution. Returns the id of the
/// fired event, if any. Narrative lines go to the log and `narrative`.
pub fn run_event_phase(
    config: &GameConfig,
    state: &mut GameState,
    narrative: &mut Vec<String>,
) -> Option<String> {
    let t = &config.tuning;
    state.pacing.turns_since_last_event += 1;

    let forced = state.pacing.consecutive_quiet_turns >= t.max_consecutive_quiet_turns;
    let blocked = state.pacing.turns_since_last_event < t.min_turns_between_events;
    let chance = event_chance(config, state.risk);
    let fires = forced || (!blocked && state.rng.percent(chance));

    let fired = if fires {
        fire_event(config, state, narrative)
    } else {
        None
    };

    if fired.is_some() {
        state.pacing.turns_since_last_event = 0;
        state.pacing.consecutive_quiet_turns = 0;
        state.pacing.had_event_last_turn = true;
    } else {
        state.pacing.consecutive_quiet_turns += 1;
        state.pacing.had_event_last_turn = false;
    }

    if state.risk > t.high_risk_threshold {
        state.apply_effects(
            &EffectSet {
                opinion: -t.high_risk_opinion_penalty,
                ..EffectSet::default()
            },
            config,
        );
        state.narrate(
            narrative,
            "Sustained high seismic risk is eroding public opinion.".to_string(),
        );
    }

    fired
}

fn fire_event(
    config: &GameConfig,
    state: &mut GameState,
    narrative: &mut Vec<String>,
) -> Option<String> {
    let idx = select_event(config, state)?;
    let spec = &config.events[idx];
    state.apply_effects(&spec.effects, config);
    let summary = spec.effects.summary();
    let line = if summary.is_empty() {
        spec.description.clone()
    } else {
        format!("{} ({})", spec.description, summary)
    };
    state.narrate(narrative, line);
    Some(spec.id.clone())
}

// ── Candidate Pool ────────────────────────────────────────────────────

/// Weighted, filtered pick over the event catalog. `None` only when the
/// catalog itself is empty.
fn select_event(config: &GameConfig, state: &mut GameState) -> Option<usize> {
    if config.events.is_empty() {
        return None;
    }
    let t = &config.tuning;

    let mut pool: Vec<usize> = Vec::new();
    for (i, spec) in config.events.iter().enumerate() {
        let severe = spec.is_severe(t.heavy_opinion_delta, t.heavy_money_delta);
        if state.money < t.money_guard && spec.effects.money < t.heavy_money_delta {
            continue;
        }
        if state.turns_remaining < t.time_guard && spec.effects.time > 0 {
            continue;
        }
        if state.pacing.had_event_last_turn && severe {
            continue;
        }
        let mut weight = category_weight(config, state, spec.category);
        if state.risk >= t.big_event_threshold && severe {
            weight += 1;
        }
        for _ in 0..weight {
            pool.push(i);
        }
    }

    if pool.is_empty() {
        // Guards can empty the pool; retry with the harmless events only.
        pool = config
            .events
            .iter()
            .enumerate()
            .filter(|(_, spec)| spec.is_benign())
            .map(|(i, _)| i)
            .collect();
    }
    if pool.is_empty() {
        pool = (0..config.events.len()).collect();
    }

    let pick = state.rng.range(pool.len() as u32) as usize;
    Some(pool[pick])
}

fn category_weight(config: &GameConfig, state: &GameState, category: EventCategory) -> u32 {
    let t = &config.tuning;
    match category {
        EventCategory::Seismic if state.risk >= t.big_event_threshold => 4,
        EventCategory::Regulatory if state.risk >= t.big_event_threshold => 3,
        EventCategory::Community if state.opinion < t.low_opinion_threshold => 4,
        EventCategory::Financial if state.money < t.low_money_threshold => 4,
        _ => 2,
    }
}
