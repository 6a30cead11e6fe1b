//! Action and event catalogs.
//!
//! Both catalogs are plain data carried by the game config, so hosts can
//! swap in scenario packs or difficulty variants without touching the
//! engine. The tables below are the standard campaign.

use serde::{Deserialize, Serialize};

/// A batch of resource deltas. Absent JSON fields deserialize to 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSet {
    pub money: i32,
    pub opinion: i32,
    pub risk: i32,
    pub research: i32,
    /// Extra turn cost. Positive consumes turns, negative grants them back.
    pub time: i32,
}

impl EffectSet {
    /// Compact signed summary of the non-zero deltas, for log lines.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.money != 0 {
            parts.push(format!("funds {:+}", self.money));
        }
        if self.opinion != 0 {
            parts.push(format!("opinion {:+}", self.opinion));
        }
        if self.risk != 0 {
            parts.push(format!("risk {:+}", self.risk));
        }
        if self.research != 0 {
            parts.push(format!("research {:+}", self.research));
        }
        if self.time != 0 {
            parts.push(format!("turns {:+}", -self.time));
        }
        parts.join(", ")
    }
}

/// Player action grouping, used for presentation and scenario packs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionCategory {
    Theoretical,
    Field,
    Community,
}

/// Random event grouping. Pool weighting in the event engine keys off this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Seismic,
    Community,
    Financial,
    Environmental,
    Regulatory,
}

/// Static definition of one player action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: ActionCategory,
    /// Up-front money cost, charged before effects apply.
    pub cost: u32,
    /// Turns consumed by the action.
    pub time_required: u32,
    #[serde(default)]
    pub effects: EffectSet,
}

/// Static definition of one random event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    pub id: String,
    pub category: EventCategory,
    pub description: String,
    #[serde(default)]
    pub effects: EffectSet,
}

impl EventSpec {
    /// Severe events deal an opinion or money blow worse than the tuned
    /// floors.
    pub fn is_severe(&self, opinion_floor: i32, money_floor: i32) -> bool {
        self.effects.opinion < opinion_floor || self.effects.money < money_floor
    }

    /// No downside on any resource.
    pub fn is_benign(&self) -> bool {
        self.effects.money >= 0
            && self.effects.opinion >= 0
            && self.effects.research >= 0
            && self.effects.risk <= 0
            && self.effects.time <= 0
    }
}

// ── Standard Actions ──────────────────────────────────────────────────

pub fn default_actions() -> Vec<ActionSpec> {
    vec![
        ActionSpec {
            id: "desk_study".into(),
            name: "Desk Study".into(),
            description: "Model reservoir behaviour against the published literature.".into(),
            category: ActionCategory::Theoretical,
            cost: 10,
            time_required: 1,
            effects: EffectSet {
                research: 6,
                ..EffectSet::default()
            },
        },
        ActionSpec {
            id: "seismic_survey".into(),
            name: "Seismic Survey".into(),
            description: "Run a reflection survey over the target fault block.".into(),
            category: ActionCategory::Field,
            cost: 25,
            time_required: 1,
            effects: EffectSet {
                research: 10,
                risk: 4,
                opinion: -2,
                ..EffectSet::default()
            },
        },
        ActionSpec {
            id: "stimulation_test".into(),
            name: "Stimulation Test".into(),
            description: "Inject at the test well and measure the fracture response.".into(),
            category: ActionCategory::Field,
            cost: 40,
            time_required: 2,
            effects: EffectSet {
                research: 18,
                risk: 12,
                opinion: -6,
                ..EffectSet::default()
            },
        },
        ActionSpec {
            id: "safety_audit".into(),
            name: "Safety Audit".into(),
            description: "Bring in outside reviewers and tighten the monitoring thresholds.".into(),
            category: ActionCategory::Field,
            cost: 30,
            time_required: 1,
            effects: EffectSet {
                risk: -15,
                opinion: 4,
                ..EffectSet::default()
            },
        },
        ActionSpec {
            id: "town_hall".into(),
            name: "Town Hall".into(),
            description: "Host an open evening and answer every question on the record.".into(),
            category: ActionCategory::Community,
            cost: 15,
            time_required: 1,
            effects: EffectSet {
                opinion: 12,
                ..EffectSet::default()
            },
        },
        ActionSpec {
            id: "school_visit".into(),
            name: "School Visit".into(),
            description: "Take the portable seismograph to the secondary school.".into(),
            category: ActionCategory::Community,
            cost: 5,
            time_required: 1,
            effects: EffectSet {
                opinion: 6,
                research: 1,
                ..EffectSet::default()
            },
        },
        ActionSpec {
            id: "publish_findings".into(),
            name: "Publish Findings".into(),
            description: "Write up interim results for an open-access journal.".into(),
            category: ActionCategory::Theoretical,
            cost: 0,
            time_required: 1,
            effects: EffectSet {
                research: 2,
                opinion: 5,
                ..EffectSet::default()
            },
        },
        ActionSpec {
            id: "grant_pitch".into(),
            name: "Grant Pitch".into(),
            description: "Spend the week courting the national research fund.".into(),
            category: ActionCategory::Community,
            cost: 0,
            time_required: 2,
            effects: EffectSet {
                money: 50,
                ..EffectSet::default()
            },
        },
    ]
}

// ── Standard Events ───────────────────────────────────────────────────

pub fn default_events() -> Vec<EventSpec> {
    vec![
        EventSpec {
            id: "microquake".into(),
            category: EventCategory::Seismic,
            description: "A swarm of microquakes registers on the valley seismographs.".into(),
            effects: EffectSet {
                risk: 6,
                opinion: -4,
                ..EffectSet::default()
            },
        },
        EventSpec {
            id: "damaging_quake".into(),
            category: EventCategory::Seismic,
            description: "A magnitude 3 tremor cracks plaster in the old town.".into(),
            effects: EffectSet {
                money: -40,
                opinion: -15,
                risk: 8,
                ..EffectSet::default()
            },
        },
        EventSpec {
            id: "quiet_ground".into(),
            category: EventCategory::Seismic,
            description: "Weeks of quiet ground let the monitoring team lower their alert level.".into(),
            effects: EffectSet {
                risk: -8,
                ..EffectSet::default()
            },
        },
        EventSpec {
            id: "protest".into(),
            category: EventCategory::Community,
            description: "Protesters blockade the site access road for days.".into(),
            effects: EffectSet {
                opinion: -12,
                time: 1,
                ..EffectSet::default()
            },
        },
        EventSpec {
            id: "support_rally".into(),
            category: EventCategory::Community,
            description: "Local tradespeople rally behind the project's jobs promise.".into(),
            effects: EffectSet {
                opinion: 8,
                ..EffectSet::default()
            },
        },
        EventSpec {
            id: "liaison_request".into(),
            category: EventCategory::Community,
            description: "The village council asks the project to fund a community liaison.".into(),
            effects: EffectSet {
                money: -10,
                opinion: 6,
                ..EffectSet::default()
            },
        },
        EventSpec {
            id: "budget_cut".into(),
            category: EventCategory::Financial,
            description: "The ministry trims regional research budgets across the board.".into(),
            effects: EffectSet {
                money: -35,
                ..EffectSet::default()
            },
        },
        EventSpec {
            id: "private_donation".into(),
            category: EventCategory::Financial,
            description: "A green-energy foundation wires an unsolicited donation.".into(),
            effects: EffectSet {
                money: 25,
                ..EffectSet::default()
            },
        },
        EventSpec {
            id: "audit_delay".into(),
            category: EventCategory::Financial,
            description: "A procurement audit freezes the project accounts for a while.".into(),
            effects: EffectSet {
                money: -10,
                time: 1,
                ..EffectSet::default()
            },
        },
        EventSpec {
            id: "heatwave".into(),
            category: EventCategory::Environmental,
            description: "A record heatwave has the town asking about geothermal cooling.".into(),
            effects: EffectSet {
                opinion: 7,
                ..EffectSet::default()
            },
        },
        EventSpec {
            id: "groundwater_scare".into(),
            category: EventCategory::Environmental,
            description: "Trace minerals in a monitoring well spark a groundwater scare.".into(),
            effects: EffectSet {
                opinion: -8,
                money: -15,
                ..EffectSet::default()
            },
        },
        EventSpec {
            id: "sensor_failure".into(),
            category: EventCategory::Environmental,
            description: "A downhole sensor string fails and part of the dataset is lost.".into(),
            effects: EffectSet {
                research: -4,
                money: -10,
                ..EffectSet::default()
            },
        },
        EventSpec {
            id: "fast_track".into(),
            category: EventCategory::Regulatory,
            description: "The energy ministry fast-tracks the project's permit review.".into(),
            effects: EffectSet {
                time: -1,
                ..EffectSet::default()
            },
        },
        EventSpec {
            id: "inspection".into(),
            category: EventCategory::Regulatory,
            description: "Regulators order a surprise site inspection.".into(),
            effects: EffectSet {
                money: -5,
                time: 1,
                ..EffectSet::default()
            },
        },
        EventSpec {
            id: "moratorium_threat".into(),
            category: EventCategory::Regulatory,
            description: "A county supervisor threatens a drilling moratorium.".into(),
            effects: EffectSet {
                opinion: -10,
                ..EffectSet::default()
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_action_ids_are_unique() {
        let actions = default_actions();
        for (i, a) in actions.iter().enumerate() {
            for b in &actions[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn default_event_ids_are_unique() {
        let events = default_events();
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn every_action_takes_at_least_one_turn() {
        for action in default_actions() {
            assert!(action.time_required >= 1, "{} takes no time", action.id);
        }
    }

    #[test]
    fn actions_cover_every_category() {
        let actions = default_actions();
        for category in [
            ActionCategory::Theoretical,
            ActionCategory::Field,
            ActionCategory::Community,
        ] {
            assert!(actions.iter().any(|a| a.category == category));
        }
    }

    #[test]
    fn events_cover_every_category() {
        let events = default_events();
        for category in [
            EventCategory::Seismic,
            EventCategory::Community,
            EventCategory::Financial,
            EventCategory::Environmental,
            EventCategory::Regulatory,
        ] {
            assert!(events.iter().any(|e| e.category == category));
        }
    }

    #[test]
    fn harmless_subset_is_stocked() {
        // The pool fallback relies on some events having no downside.
        let benign = default_events().iter().filter(|e| e.is_benign()).count();
        assert!(benign >= 2);
    }

    #[test]
    fn severity_classification() {
        let events = default_events();
        let by_id = |id: &str| events.iter().find(|e| e.id == id).unwrap();
        assert!(by_id("damaging_quake").is_severe(-10, -30));
        assert!(by_id("budget_cut").is_severe(-10, -30));
        assert!(by_id("protest").is_severe(-10, -30));
        // Exactly at a floor is not yet severe.
        assert!(!by_id("moratorium_threat").is_severe(-10, -30));
        assert!(!by_id("microquake").is_severe(-10, -30));
        assert!(!by_id("support_rally").is_severe(-10, -30));
    }

    #[test]
    fn benign_classification() {
        let events = default_events();
        let by_id = |id: &str| events.iter().find(|e| e.id == id).unwrap();
        assert!(by_id("quiet_ground").is_benign());
        assert!(by_id("fast_track").is_benign());
        assert!(by_id("private_donation").is_benign());
        assert!(!by_id("protest").is_benign());
        assert!(!by_id("sensor_failure").is_benign());
    }

    #[test]
    fn summary_lists_only_nonzero_deltas() {
        let effects = EffectSet {
            money: -25,
            risk: 4,
            ..EffectSet::default()
        };
        assert_eq!(effects.summary(), "funds -25, risk +4");
        assert_eq!(EffectSet::default().summary(), "");
    }

    #[test]
    fn summary_reports_time_from_the_player_side() {
        let costs_a_turn = EffectSet {
            time: 1,
            ..EffectSet::default()
        };
        let grants_a_turn = EffectSet {
            time: -1,
            ..EffectSet::default()
        };
        assert_eq!(costs_a_turn.summary(), "turns -1");
        assert_eq!(grants_a_turn.summary(), "turns +1");
    }
}
