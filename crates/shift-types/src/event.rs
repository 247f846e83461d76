//! The append-only run event log.
//!
//! Every state change the engine makes is recorded as a [`RunEvent`]. Events
//! carry no wall-clock data: two runs with the same seed and the same calls
//! produce byte-identical logs.

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Kind of a logged event. Serialized as a `snake_case` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EventKind {
    /// A run was started and seeded.
    RunInitialized,
    /// A pile was shuffled.
    DeckShuffled,
    /// The discard pile was recycled into the draw pile.
    DeckReshuffled,
    /// A card was drawn.
    CardDrawn,
    /// A hand was dealt.
    HandDrawn,
    /// A card was accepted and resolved.
    CardPlayed,
    /// A card's final effects were applied.
    EffectsApplied,
    /// A play was rejected.
    PlayRejected,
    /// One or more threshold rules fired.
    ThresholdTriggered,
    /// Pressure became visible.
    PressureRevealed,
    /// Resistance activated.
    ResistanceActivated,
    /// Resistance escalated its pushback.
    ResistanceEscalated,
    /// A modifier was installed.
    ModifierInstalled,
    /// A crisis modifier ran out.
    ModifierExpired,
    /// The player removed an institutional modifier.
    ModifierRemoved,
    /// A removal request was rejected.
    RemovalRejected,
    /// Capital recovered at round end.
    CapitalRecovered,
    /// Optimism and the capital cap were recomputed.
    OptimismUpdated,
    /// Tension fed the pressure counters.
    PressureDrift,
    /// Surface pressure converted into structural pressure.
    StructuralConversion,
    /// Natural drift eroded the strongest track.
    NaturalDrift,
    /// Entropy accounting ran.
    EntropyUpdated,
    /// The entropy resolution step acted.
    EntropyResolved,
    /// The parasite level changed.
    ParasiteGrowth,
    /// An emergency began.
    EmergencyTriggered,
    /// An emergency was resolved.
    EmergencyResolved,
    /// The crisis risk index was recomputed.
    CrisisRiskUpdated,
    /// A narrative commentary signal.
    Commentary,
    /// A round finished.
    RoundEnded,
    /// The run ended.
    GameOver,
    /// The outcome classifier produced a projection.
    OutcomeProjected,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::String(name)) => f.write_str(&name),
            _ => write!(f, "{self:?}"),
        }
    }
}

/// Flat key/value payload attached to an event.
pub type EventPayload = BTreeMap<String, serde_json::Value>;

/// One entry in the run log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RunEvent {
    /// Position in the log, starting at 0.
    pub sequence: u64,
    /// Round during which the event happened.
    pub round: u32,
    /// Event kind.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Event data.
    pub payload: EventPayload,
}

/// A seed as supplied by the caller: a number or arbitrary text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum RunSeed {
    /// Numeric seed used as-is.
    Number(u64),
    /// Text seed; numeric text is read as a number, anything else is hashed.
    Text(String),
}

impl Default for RunSeed {
    fn default() -> Self {
        Self::Number(0)
    }
}

impl fmt::Display for RunSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RunSeed {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RunSeed {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Header of an exported run log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RunMeta {
    /// Engine version that produced the log.
    pub version: String,
    /// Seed the run was started with.
    pub seed: RunSeed,
}

/// A complete exported run log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RunLog {
    /// Header.
    pub meta: RunMeta,
    /// Every event in order.
    pub events: Vec<RunEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_serializes_snake_case() {
        assert_eq!(EventKind::ResistanceActivated.to_string(), "resistance_activated");
        assert_eq!(EventKind::GameOver.to_string(), "game_over");
    }

    #[test]
    fn run_event_uses_type_field() {
        let event = RunEvent {
            sequence: 3,
            round: 2,
            kind: EventKind::CardDrawn,
            payload: EventPayload::from([(String::from("card_id"), serde_json::json!(6))]),
        };
        let json = serde_json::to_value(&event).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({
                "sequence": 3,
                "round": 2,
                "type": "card_drawn",
                "payload": { "card_id": 6 }
            }))
        );
    }

    #[test]
    fn seeds_deserialize_untagged() {
        let numeric: Result<RunSeed, _> = serde_json::from_str("42");
        let text: Result<RunSeed, _> = serde_json::from_str("\"spring-1848\"");
        assert_eq!(numeric.ok(), Some(RunSeed::Number(42)));
        assert_eq!(text.ok(), Some(RunSeed::from("spring-1848")));
    }
}
