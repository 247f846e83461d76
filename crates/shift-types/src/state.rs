//! Read-only views of run state handed to collaborators.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::card::Card;
use crate::modifier::ModifierSet;
use crate::tracks::Tracks;

/// Phase of the pressure state machine. Transitions only move forward.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PressurePhase {
    /// Pressure accumulates unseen.
    #[default]
    Dormant,
    /// Pressure is visible to the player.
    Revealed,
    /// The establishment is actively pushing back.
    ResistanceActive,
}

/// Accumulated pressure and its phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PressureState {
    /// Current phase.
    pub phase: PressurePhase,
    /// Accumulating pressure scalar.
    pub value: u32,
}

impl PressureState {
    /// Whether the pressure has been revealed (true for every phase past dormant).
    pub fn revealed(&self) -> bool {
        self.phase >= PressurePhase::Revealed
    }

    /// Whether resistance is active.
    pub fn resistance_active(&self) -> bool {
        self.phase == PressurePhase::ResistanceActive
    }
}

/// Emergency sub-state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EmergencyState {
    /// Whether an emergency is in progress.
    pub active: bool,
    /// Round ends elapsed since activation.
    pub rounds_active: u32,
    /// Recovery points accumulated since activation.
    pub performance_score: u32,
}

/// Serializable snapshot of a run, the only state view collaborators get.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RunSnapshot {
    /// Current round (1-based; exceeds `max_rounds` once the run is over).
    pub round: u32,
    /// Last playable round.
    pub max_rounds: u32,
    /// Whether the run has ended.
    pub over: bool,
    /// Track values.
    pub tracks: Tracks,
    /// Spendable political capital.
    pub capital: u32,
    /// Capital cap.
    pub capital_max: u32,
    /// Movement momentum.
    pub momentum: u32,
    /// Pressure state machine.
    pub pressure: PressureState,
    /// Long-lived pressure memory.
    pub structural_pressure: u32,
    /// Volatile per-round unrest.
    pub surface_pressure: u32,
    /// Systemic disorder.
    pub entropy: u32,
    /// Permanent entropy amplifier.
    pub structural_scar: u32,
    /// Cumulative overflow count.
    pub overflow_memory: u32,
    /// Cumulative collapse count.
    pub collapse_memory: u32,
    /// Extraction by entrenched interests, capped at 50.
    pub parasite_level: u32,
    /// Progress from movement-building plays.
    pub shift_progress: u32,
    /// Round ends spent with wealth below 30.
    pub debt_rounds: u32,
    /// Threshold signals fired so far.
    pub immediate_signals: u32,
    /// Plays used this round.
    pub plays_this_round: u32,
    /// Play allowance this round.
    pub max_plays: u32,
    /// Target hand size.
    pub hand_size: u32,
    /// Emergency sub-state.
    pub emergency: EmergencyState,
    /// Installed modifiers.
    pub modifiers: ModifierSet,
    /// Cards currently in hand.
    pub hand: Vec<Card>,
    /// Cards left in the draw pile.
    pub deck_remaining: u32,
    /// Cards in the discard pile.
    pub discard_count: u32,
    /// Report-only optimism figure.
    pub optimism: f64,
    /// Report-only spread between strongest and weakest societal track.
    pub imbalance: i32,
    /// Report-only crisis risk index.
    pub crisis_risk: u32,
}
