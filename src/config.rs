//! Game configuration.
//!
//! Every tunable the simulation reads lives here, so hosts can inject
//! difficulty variants and saves can embed the exact rules a run was
//! started under. All structs deserialize leniently: absent JSON fields
//! fall back to the standard campaign values.

use serde::{Deserialize, Serialize};

use crate::catalog::{default_actions, default_events, ActionSpec, EventSpec};

/// Tunables for the per-turn event engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventTuning {
    /// Baseline percent chance of an event each turn.
    pub base_chance: f64,
    /// Extra percent chance per point of seismic risk.
    pub risk_multiplier: f64,
    /// Floor on the computed chance.
    pub min_chance: f64,
    /// Cap on the computed chance.
    pub max_chance: f64,
    /// Turns that must pass after an event before another can roll in.
    pub min_turns_between_events: u32,
    /// Quiet turns after which the next resolution fires an event outright.
    pub max_consecutive_quiet_turns: u32,
    /// Risk at which pool weights shift toward seismic and regulatory
    /// trouble and severe events get an extra pool entry.
    pub big_event_threshold: i32,
    /// Opinion deltas worse than this mark an event as severe.
    pub heavy_opinion_delta: i32,
    /// Money deltas worse than this mark an event as severe.
    pub heavy_money_delta: i32,
    /// Below this balance, money-catastrophic events are withheld.
    pub money_guard: i32,
    /// With fewer turns than this remaining, time-costing events are withheld.
    pub time_guard: u32,
    /// Opinion below this pivots event weighting toward community unrest.
    pub low_opinion_threshold: i32,
    /// Money below this pivots event weighting toward financial trouble.
    pub low_money_threshold: i32,
    /// Risk above this bleeds opinion every turn.
    pub high_risk_threshold: i32,
    /// Opinion lost per turn while risk stays above the threshold.
    pub high_risk_opinion_penalty: i32,
}

impl Default for EventTuning {
    fn default() -> Self {
        Self {
            base_chance: 25.0,
            risk_multiplier: 0.5,
            min_chance: 20.0,
            max_chance: 90.0,
            min_turns_between_events: 2,
            max_consecutive_quiet_turns: 3,
            big_event_threshold: 60,
            heavy_opinion_delta: -10,
            heavy_money_delta: -30,
            money_guard: 50,
            time_guard: 3,
            low_opinion_threshold: 40,
            low_money_threshold: 80,
            high_risk_threshold: 70,
            high_risk_opinion_penalty: 2,
        }
    }
}

/// Tunables for end-of-run scoring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    pub research_weight: f64,
    pub opinion_weight: f64,
    pub risk_weight: f64,
    /// Also the cap on the money sub-score, so a war chest beyond the
    /// starting budget earns nothing extra.
    pub money_weight: f64,
    /// Points per unspent turn, up to `turn_bonus_cap`.
    pub turn_bonus: f64,
    pub turn_bonus_cap: f64,
    /// Cumulative bonuses at 25 / 50 / 75 / 100 percent research progress.
    pub milestone_bonuses: [f64; 4],
    /// Rating denominator. Sits below the theoretical sub-score maximum.
    pub max_score: f64,
    /// Research ratio at or above which running out of time still grades
    /// as a partial success.
    pub partial_threshold: f64,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            research_weight: 100.0,
            opinion_weight: 50.0,
            risk_weight: 30.0,
            money_weight: 30.0,
            turn_bonus: 3.0,
            turn_bonus_cap: 20.0,
            milestone_bonuses: [5.0, 10.0, 15.0, 25.0],
            max_score: 255.0,
            partial_threshold: 0.5,
        }
    }
}

/// Complete rule set for one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_money: i32,
    pub total_turns: u32,
    pub starting_opinion: i32,
    pub starting_risk: i32,
    pub starting_research: i32,
    pub max_opinion: i32,
    pub max_risk: i32,
    /// Optional cap on banked money. `None` leaves the upside open.
    pub max_money: Option<i32>,
    /// Research points that complete the programme.
    pub research_needed: i32,
    /// Seed for the run's random sequence.
    pub seed: u64,
    pub tuning: EventTuning,
    pub score: ScoreTuning,
    pub actions: Vec<ActionSpec>,
    pub events: Vec<EventSpec>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_money: 200,
            total_turns: 20,
            starting_opinion: 70,
            starting_risk: 10,
            starting_research: 0,
            max_opinion: 100,
            max_risk: 100,
            max_money: None,
            research_needed: 100,
            seed: 42,
            tuning: EventTuning::default(),
            score: ScoreTuning::default(),
            actions: default_actions(),
            events: default_events(),
        }
    }
}

impl GameConfig {
    /// Look up an action by id.
    pub fn action(&self, id: &str) -> Option<&ActionSpec> {
        self.actions.iter().find(|a| a.id == id)
    }
}
