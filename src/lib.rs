//! Core simulation for Deep Heat, a turn-based geothermal research
//! management game.
//!
//! The player runs a pilot deep-geothermal project against a fixed
//! funding window: actions spend money and turns to generate research,
//! shore up public opinion, or work down induced-seismicity risk, while
//! a seeded event engine pushes back. This crate is the whole rules
//! engine; a presentation layer drives it through `DeepHeatGame` and
//! renders the returned reports.
//!
//! A run is a pure function of its config (seed included) and the
//! sequence of calls. Saves embed the config, the RNG position, and the
//! event pacing counters, so a restored game continues into the
//! identical future.

pub mod catalog;
pub mod config;
pub mod events;
pub mod logic;
pub mod outcome;
pub mod rng;
pub mod save;
pub mod state;

pub use catalog::{ActionCategory, ActionSpec, EffectSet, EventCategory, EventSpec};
pub use config::{EventTuning, GameConfig, ScoreTuning};
pub use logic::{ActionError, TurnReport};
pub use outcome::{EndCause, Outcome, OutcomeKind, Rating, ScoreBreakdown};
pub use save::SaveError;
pub use state::{GameState, ResourceSnapshot};

/// A complete run: rules plus live state, with the operations the
/// presentation layer calls.
pub struct DeepHeatGame {
    pub config: GameConfig,
    pub state: GameState,
}

impl DeepHeatGame {
    /// Standard campaign, default seed.
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    /// Custom rules. The config owns every tunable, catalogs and seed
    /// included.
    pub fn with_config(config: GameConfig) -> Self {
        let state = GameState::new(&config);
        Self { config, state }
    }

    /// Resolve one catalog action. Refusals leave the run untouched.
    pub fn perform_action(&mut self, action_id: &str) -> Result<TurnReport, ActionError> {
        logic::perform_action(&self.config, &mut self.state, action_id)
    }

    /// Hold steady for one turn.
    pub fn advance_turn(&mut self) -> TurnReport {
        logic::advance_turn(&self.config, &mut self.state)
    }

    pub fn snapshot(&self) -> ResourceSnapshot {
        self.state.snapshot()
    }

    pub fn is_over(&self) -> bool {
        self.state.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.state.outcome.as_ref()
    }

    /// Serialize the run, rules included, to a JSON string for the host
    /// to store.
    pub fn save(&self) -> Result<String, serde_json::Error> {
        save::to_json(&self.config, &self.state)
    }

    /// Rebuild a run from a string produced by `save`.
    pub fn restore(json: &str) -> Result<Self, SaveError> {
        let (config, state) = save::from_json(json)?;
        Ok(Self { config, state })
    }
}

impl Default for DeepHeatGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_event_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.tuning.base_chance = 0.0;
        config.tuning.risk_multiplier = 0.0;
        config.tuning.min_chance = 0.0;
        config.tuning.max_consecutive_quiet_turns = u32::MAX;
        config
    }

    #[test]
    fn fresh_game_reports_default_resources() {
        let game = DeepHeatGame::new();
        let snap = game.snapshot();
        assert_eq!(snap.money, 200);
        assert_eq!(snap.turns_remaining, 20);
        assert_eq!(snap.opinion, 70);
        assert_eq!(snap.risk, 10);
        assert_eq!(snap.research, 0);
        assert_eq!(snap.turn, 0);
        assert!(!game.is_over());
        assert!(game.outcome().is_none());
    }

    #[test]
    fn actions_flow_through_the_facade() {
        let mut game = DeepHeatGame::with_config(no_event_config());
        let report = game.perform_action("desk_study").unwrap();
        assert_eq!(report.snapshot.money, 190);
        assert_eq!(report.snapshot.research, 6);
        assert!(report.outcome.is_none());
        assert_eq!(game.snapshot(), report.snapshot);
    }

    #[test]
    fn unknown_action_is_refused() {
        let mut game = DeepHeatGame::new();
        let err = game.perform_action("orbital_laser").unwrap_err();
        assert_eq!(err, ActionError::InvalidActionId("orbital_laser".into()));
        assert_eq!(game.snapshot().turn, 0);
    }

    #[test]
    fn games_end_and_stay_ended() {
        let mut config = no_event_config();
        config.research_needed = 6;
        let mut game = DeepHeatGame::with_config(config);
        let report = game.perform_action("desk_study").unwrap();
        assert_eq!(
            report.outcome.as_ref().map(|o| o.kind),
            Some(OutcomeKind::Win)
        );
        assert!(game.is_over());

        let snap = game.snapshot();
        let replay = game.advance_turn();
        assert_eq!(replay.snapshot, snap);
        assert_eq!(replay.outcome.map(|o| o.kind), Some(OutcomeKind::Win));
    }

    #[test]
    fn save_and_restore_preserve_the_run() {
        let mut game = DeepHeatGame::new();
        game.perform_action("seismic_survey").unwrap();
        game.advance_turn();
        let json = game.save().unwrap();
        let restored = DeepHeatGame::restore(&json).unwrap();
        assert_eq!(restored.state, game.state);
        assert_eq!(restored.config, game.config);
    }

    #[test]
    fn default_trait_matches_new() {
        let a = DeepHeatGame::default();
        let b = DeepHeatGame::new();
        assert_eq!(a.state, b.state);
        assert_eq!(a.config, b.config);
    }
}
