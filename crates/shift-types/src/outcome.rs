//! End-of-run projection records and the per-round timeline.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::tracks::Tracks;

/// The era a finished run projects into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Direction {
    /// Civic and institutional alignment; the rare good ending.
    Equilibrium,
    /// Entrenched elites consolidate.
    Elite,
    /// Movement reforms embed in institutions.
    Reform,
    /// Ecological restructuring leads.
    Ecological,
    /// Cohesion breaks down.
    Fragmentation,
    /// No force wins decisively.
    Contested,
}

/// Composite indices derived from terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct OutcomeIndices {
    /// Social-structural index: wellbeing + community - tension.
    pub ssi: f64,
    /// Ecological viability: planet - tension.
    pub ev: f64,
    /// Power concentration: power - community.
    pub pc: f64,
    /// Elite entrenchment: pressure + structural pressure - shift progress.
    pub ee: f64,
    /// Momentum index: momentum - structural pressure / 2.
    pub mi: f64,
    /// Rounds spent in debt.
    pub debt_weight: u32,
}

/// Four fixed narrative paragraphs for a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Narrative {
    /// The first decades after the run.
    pub aftermath: String,
    /// Institutional drift over the following century.
    pub institutions: String,
    /// Social consequences.
    pub social: String,
    /// How the era is remembered.
    pub memory: String,
}

/// Category of the closing reflective question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum QuestionCategory {
    /// Ultra rare: strong ecology with decentralized power.
    UltraEcoDecentralized,
    /// Ultra rare: high momentum meeting heavy structural pressure.
    UltraMomentumPressure,
    /// Ultra rare: recovery after a long debt period.
    UltraDebtRecovery,
    /// Balanced alignment across every index.
    RareEquilibrium,
    /// Entrenchment with concentrated power.
    EliteConsolidation,
    /// Long debt with concentrated power.
    ManagedAusterity,
    /// Severe ecological deficit.
    EcologicalConstraint,
    /// Social breakdown.
    Fragmentation,
    /// Near-alignment that stopped short.
    ContestedReform,
    /// The default: survival inside the structure.
    ManagedComfort,
}

/// The reflective question shown at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ReflectiveQuestion {
    /// Category selected from terminal state.
    pub category: QuestionCategory,
    /// The chosen variant.
    pub text: String,
}

/// The full projection computed once a run is over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Outcome {
    /// Classified direction.
    pub direction: Direction,
    /// Indices as computed from terminal state.
    pub indices: OutcomeIndices,
    /// Indices after seeded perturbation; the direction is classified on these.
    pub projected: OutcomeIndices,
    /// Narrative for the direction.
    pub narrative: Narrative,
    /// Closing question.
    pub question: ReflectiveQuestion,
}

/// Most significant transition of a round, used to label the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TimelineLabel {
    /// Resistance activated this round.
    ResistanceActivated,
    /// Pressure was revealed this round.
    PressureRevealed,
    /// An emergency began this round.
    EmergencyTriggered,
    /// An emergency resolved this round.
    EmergencyResolved,
    /// A structural scar formed this round.
    ScarFormed,
    /// Nothing notable.
    Steady,
}

/// One row of the per-round timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TimelineEntry {
    /// The round that just ended.
    pub round: u32,
    /// Most significant transition.
    pub label: TimelineLabel,
    /// Track values at the end of the round.
    pub tracks: Tracks,
    /// Entropy at the end of the round.
    pub entropy: u32,
    /// Crisis risk index at the end of the round.
    pub crisis_risk: u32,
}
