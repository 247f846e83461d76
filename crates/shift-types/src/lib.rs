//! Shared type definitions for the System Shift simulation.
//!
//! This crate is the single source of truth for every type that crosses the
//! boundary between the engine and its collaborators (renderer, log
//! exporter, analysis tooling). Types flow to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Numeric id wrappers for cards and modifier instances
//! - [`tracks`] -- The six tracks and card effect keys
//! - [`card`] -- Policy cards, suits, and risk tiers
//! - [`modifier`] -- Modifier kinds, lifecycles, and installed instances
//! - [`state`] -- Pressure phase, emergency state, and the run snapshot
//! - [`event`] -- The run event log and seeds
//! - [`results`] -- Play and removal results
//! - [`outcome`] -- End-of-run projection and the per-round timeline

pub mod card;
pub mod event;
pub mod ids;
pub mod modifier;
pub mod outcome;
pub mod results;
pub mod state;
pub mod tracks;

// Re-export all public types at crate root for convenience.
pub use card::{Card, Risk, Suit};
pub use event::{EventKind, EventPayload, RunEvent, RunLog, RunMeta, RunSeed};
pub use ids::{CardId, ModifierId};
pub use modifier::{Lifecycle, ModifierInstance, ModifierKind, ModifierSet};
pub use outcome::{
    Direction, Narrative, Outcome, OutcomeIndices, QuestionCategory, ReflectiveQuestion,
    TimelineEntry, TimelineLabel,
};
pub use results::{PlayResult, RejectReason, RemovalRejection, RemovalResult};
pub use state::{EmergencyState, PressurePhase, PressureState, RunSnapshot};
pub use tracks::{EffectKey, EffectMap, TrackName, Tracks, UnknownEffectKey};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Files land in `bindings/` relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::CardId::export_all();
        let _ = crate::ids::ModifierId::export_all();

        // Content
        let _ = crate::tracks::TrackName::export_all();
        let _ = crate::tracks::Tracks::export_all();
        let _ = crate::tracks::EffectKey::export_all();
        let _ = crate::card::Suit::export_all();
        let _ = crate::card::Risk::export_all();
        let _ = crate::card::Card::export_all();
        let _ = crate::modifier::ModifierKind::export_all();
        let _ = crate::modifier::ModifierSet::export_all();

        // Run state and log
        let _ = crate::state::RunSnapshot::export_all();
        let _ = crate::event::RunLog::export_all();
        let _ = crate::results::PlayResult::export_all();
        let _ = crate::results::RemovalResult::export_all();
        let _ = crate::outcome::Outcome::export_all();
        let _ = crate::outcome::TimelineEntry::export_all();
    }
}
