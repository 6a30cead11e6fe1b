//! End-of-run evaluation: terminal conditions, scoring, and ratings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::state::GameState;

// ── Outcome Types ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    Win,
    Partial,
    Lose,
}

/// What actually ended the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    ResearchComplete,
    TimeExpired,
    OpinionCollapse,
    Bankruptcy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rating::APlus => "A+",
            Rating::A => "A",
            Rating::B => "B",
            Rating::C => "C",
            Rating::D => "D",
            Rating::F => "F",
        };
        f.write_str(label)
    }
}

/// Score components, all in points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub research: f64,
    pub milestones: f64,
    pub opinion: f64,
    pub risk: f64,
    pub money: f64,
    pub turns: f64,
    pub total: f64,
    /// Total over the configured maximum, capped at 100.
    pub percent: f64,
}

impl ScoreBreakdown {
    fn zero() -> Self {
        Self {
            research: 0.0,
            milestones: 0.0,
            opinion: 0.0,
            risk: 0.0,
            money: 0.0,
            turns: 0.0,
            total: 0.0,
            percent: 0.0,
        }
    }
}

/// Final verdict stored on the state once a run ends.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub cause: EndCause,
    pub score: ScoreBreakdown,
    pub rating: Rating,
    pub summary: String,
}

// ── Terminal Check ────────────────────────────────────────────────────

/// Check the terminal conditions in priority order and, if one holds,
/// grade the run and store the outcome on the state.
pub fn check_terminal(
    config: &GameConfig,
    state: &mut GameState,
    narrative: &mut Vec<String>,
) -> Option<Outcome> {
    let cause = if state.opinion <= 0 {
        EndCause::OpinionCollapse
    } else if state.money <= 0 {
        EndCause::Bankruptcy
    } else if state.research >= config.research_needed {
        EndCause::ResearchComplete
    } else if state.turns_remaining == 0 {
        EndCause::TimeExpired
    } else {
        return None;
    };

    let outcome = grade(config, state, cause);
    state.narrate(narrative, outcome.summary.clone());
    state.outcome = Some(outcome.clone());
    Some(outcome)
}

fn grade(config: &GameConfig, state: &GameState, cause: EndCause) -> Outcome {
    let ratio = research_ratio(config, state);
    let kind = match cause {
        EndCause::ResearchComplete => OutcomeKind::Win,
        EndCause::OpinionCollapse | EndCause::Bankruptcy => OutcomeKind::Lose,
        EndCause::TimeExpired => {
            if ratio >= config.score.partial_threshold {
                OutcomeKind::Partial
            } else {
                OutcomeKind::Lose
            }
        }
    };
    let score = match cause {
        EndCause::OpinionCollapse | EndCause::Bankruptcy => ScoreBreakdown::zero(),
        _ => compute_score(config, state),
    };
    let rating = rating_for(score.percent);
    let summary = summary_for(state, cause, kind, ratio);
    Outcome {
        kind,
        cause,
        score,
        rating,
        summary,
    }
}

// ── Scoring ───────────────────────────────────────────────────────────

/// Research milestones that pay a cumulative bonus when reached.
const MILESTONE_STEPS: [f64; 4] = [0.25, 0.50, 0.75, 1.0];

/// Score a state against the configured weights. Pure function, usable
/// mid-run for a live projection.
pub fn compute_score(config: &GameConfig, state: &GameState) -> ScoreBreakdown {
    let s = &config.score;
    let ratio = research_ratio(config, state);
    let research = ratio * s.research_weight;
    let milestones = milestone_bonus(&s.milestone_bonuses, ratio);
    let opinion = if config.max_opinion > 0 {
        state.opinion as f64 / config.max_opinion as f64 * s.opinion_weight
    } else {
        0.0
    };
    let risk = if config.max_risk > 0 {
        ((1.0 - state.risk as f64 / config.max_risk as f64) * s.risk_weight).max(0.0)
    } else {
        s.risk_weight
    };
    let money = if config.starting_money > 0 {
        (state.money as f64 / config.starting_money as f64 * s.money_weight).min(s.money_weight)
    } else {
        0.0
    };
    let turns = (state.turns_remaining as f64 * s.turn_bonus).min(s.turn_bonus_cap);
    let total = research + milestones + opinion + risk + money + turns;
    let percent = if s.max_score > 0.0 {
        (total / s.max_score * 100.0).min(100.0)
    } else {
        0.0
    };
    ScoreBreakdown {
        research,
        milestones,
        opinion,
        risk,
        money,
        turns,
        total,
        percent,
    }
}

/// Letter grade for a score percentage.
pub fn rating_for(percent: f64) -> Rating {
    if percent >= 90.0 {
        Rating::APlus
    } else if percent >= 80.0 {
        Rating::A
    } else if percent >= 70.0 {
        Rating::B
    } else if percent >= 60.0 {
        Rating::C
    } else if percent >= 50.0 {
        Rating::D
    } else {
        Rating::F
    }
}

fn research_ratio(config: &GameConfig, state: &GameState) -> f64 {
    if config.research_needed <= 0 {
        return 1.0;
    }
    state.research as f64 / config.research_needed as f64
}

fn milestone_bonus(bonuses: &[f64; 4], ratio: f64) -> f64 {
    MILESTONE_STEPS
        .iter()
        .zip(bonuses.iter())
        .filter(|(step, _)| ratio >= **step)
        .map(|(_, bonus)| *bonus)
        .sum()
}

fn summary_for(state: &GameState, cause: EndCause, kind: OutcomeKind, ratio: f64) -> String {
    match cause {
        EndCause::ResearchComplete => format!(
            "Feasibility proven: the research programme is complete with {} turns to spare.",
            state.turns_remaining
        ),
        EndCause::TimeExpired => {
            let pct = (ratio * 100.0).round() as i32;
            if kind == OutcomeKind::Partial {
                format!(
                    "The funding window closed at {}% research progress. A partial result.",
                    pct
                )
            } else {
                format!(
                    "The funding window closed at {}% research progress. The project is shelved.",
                    pct
                )
            }
        }
        EndCause::OpinionCollapse => {
            "Public opposition has forced the project to shut down.".to_string()
        }
        EndCause::Bankruptcy => "The project has run out of money.".to_string(),
    }
}
