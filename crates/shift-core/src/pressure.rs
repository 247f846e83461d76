//! Pressure accumulation and the resistance state machine.
//!
//! Phases only move forward: `Dormant -> Revealed -> ResistanceActive`.
//!
//! - The threshold scan runs after every card play and at every round end.
//!   Its rules are independent; any number may fire in one pass.
//! - Reveal is one-shot and gated on the round number.
//! - Resistance activates once, when the pressure value reaches its
//!   threshold, and from then on escalates at every round end.

use shift_types::{EventKind, ModifierKind, PressurePhase};
use tracing::{debug, info};

use crate::commentary::{self, Transition};
use crate::config::ShiftConfig;
use crate::events::{EventSink, payload};
use crate::modifiers;
use crate::state::RunState;

/// Which threshold rules fired during a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThresholdHits {
    /// Wealth concentration.
    pub wealth_concentration: bool,
    /// Ecological stress.
    pub ecological_stress: bool,
    /// Power centralization.
    pub power_centralization: bool,
    /// Social breakdown.
    pub social_breakdown: bool,
    /// Community fragmentation.
    pub community_fragmentation: bool,
}

impl ThresholdHits {
    /// Whether any rule fired.
    pub const fn any(&self) -> bool {
        self.wealth_concentration
            || self.ecological_stress
            || self.power_centralization
            || self.social_breakdown
            || self.community_fragmentation
    }
}

/// Apply every threshold rule whose condition holds.
pub fn scan_thresholds(
    state: &mut RunState,
    config: &ShiftConfig,
    sink: &mut dyn EventSink,
) -> ThresholdHits {
    let t = state.tracks;
    let cfg = &config.pressure;
    let mut tension_gain = 0_i32;
    let mut surface_gain = 0_u32;
    let hits = ThresholdHits {
        wealth_concentration: t.wealth >= cfg.wealth_concentration,
        ecological_stress: t.planet <= cfg.ecological_stress,
        power_centralization: t.power >= cfg.power_centralization,
        social_breakdown: t.wellbeing <= cfg.social_breakdown,
        community_fragmentation: t.community <= cfg.community_fragmentation,
    };

    if hits.wealth_concentration {
        tension_gain = tension_gain.saturating_add(2);
        surface_gain = surface_gain.saturating_add(1);
    }
    if hits.ecological_stress {
        tension_gain = tension_gain.saturating_add(2);
        surface_gain = surface_gain.saturating_add(2);
    }
    if hits.power_centralization {
        state.pressure.value = state.pressure.value.saturating_add(1);
        state.structural_pressure = state.structural_pressure.saturating_add(1);
    }
    if hits.social_breakdown {
        tension_gain = tension_gain.saturating_add(1);
        surface_gain = surface_gain.saturating_add(1);
    }
    if hits.community_fragmentation {
        tension_gain = tension_gain.saturating_add(1);
    }

    if hits.any() {
        state.tracks.tension = state.tracks.tension.saturating_add(tension_gain);
        state.surface_pressure = state.surface_pressure.saturating_add(surface_gain);
        state.immediate_signals = state.immediate_signals.saturating_add(1);
        sink.record(
            state.round(),
            EventKind::ThresholdTriggered,
            payload!(
                "wealth_concentration" => hits.wealth_concentration,
                "ecological_stress" => hits.ecological_stress,
                "power_centralization" => hits.power_centralization,
                "social_breakdown" => hits.social_breakdown,
                "community_fragmentation" => hits.community_fragmentation,
                "tension" => state.tracks.tension,
                "surface_pressure" => state.surface_pressure,
            ),
        );
    }
    hits
}

/// One-shot reveal. Returns whether the phase changed.
pub fn check_reveal(state: &mut RunState, config: &ShiftConfig, sink: &mut dyn EventSink) -> bool {
    if state.pressure.phase != PressurePhase::Dormant {
        return false;
    }
    let cfg = &config.pressure;
    let t = state.tracks;
    let visible = t.tension >= cfg.reveal_tension
        || t.power >= cfg.reveal_power
        || t.wealth <= cfg.reveal_wealth_floor;
    if state.round() < cfg.reveal_round || !visible {
        return false;
    }
    state.pressure.phase = PressurePhase::Revealed;
    state.marks.revealed = true;
    info!(round = state.round(), value = state.pressure.value, "Pressure revealed");
    sink.record(
        state.round(),
        EventKind::PressureRevealed,
        payload!("value" => state.pressure.value, "tension" => t.tension),
    );
    commentary::announce(state, Transition::PressureReveal, sink);
    true
}

/// Tension at or above the watermark feeds the pressure counters.
pub fn apply_tension_drift(state: &mut RunState, config: &ShiftConfig, sink: &mut dyn EventSink) {
    if state.tracks.tension < config.pressure.tension_watermark {
        return;
    }
    state.pressure.value = state.pressure.value.saturating_add(1);
    state.surface_pressure = state.surface_pressure.saturating_add(1);
    sink.record(
        state.round(),
        EventKind::PressureDrift,
        payload!("value" => state.pressure.value, "surface_pressure" => state.surface_pressure),
    );
}

/// Drain surface pressure into structural pressure in whole chunks.
///
/// Afterwards surface pressure is always below the watermark.
pub fn convert_surface(state: &mut RunState, config: &ShiftConfig, sink: &mut dyn EventSink) {
    let watermark = config.pressure.surface_watermark.max(1);
    if state.surface_pressure < watermark {
        return;
    }
    let chunks = state.surface_pressure / watermark;
    let gained = chunks.saturating_mul(config.pressure.structural_per_chunk);
    state.structural_pressure = state.structural_pressure.saturating_add(gained);
    let drained = state.surface_pressure;
    state.surface_pressure = 0;
    debug!(round = state.round(), drained, gained, "Surface pressure converted");
    sink.record(
        state.round(),
        EventKind::StructuralConversion,
        payload!(
            "surface_drained" => drained,
            "structural_gained" => gained,
            "structural_pressure" => state.structural_pressure,
        ),
    );
}

/// Activate resistance once the threshold is reached, then escalate.
pub fn check_resistance(state: &mut RunState, config: &ShiftConfig, sink: &mut dyn EventSink) {
    if !state.pressure.resistance_active()
        && state.pressure.value >= config.pressure.resistance_threshold
    {
        activate_resistance(state, config, sink);
    }
    if state.pressure.resistance_active() {
        escalate(state, config, sink);
    }
}

fn activate_resistance(state: &mut RunState, config: &ShiftConfig, sink: &mut dyn EventSink) {
    let skipped_reveal = state.pressure.phase == PressurePhase::Dormant;
    state.pressure.phase = PressurePhase::ResistanceActive;
    state.marks.resistance = true;

    modifiers::install(state, ModifierKind::EliteConsolidation, sink);
    let counters: Vec<ModifierKind> = state
        .modifiers
        .movement
        .iter()
        .filter_map(|m| m.kind.countermeasure())
        .collect();
    for kind in counters {
        modifiers::install(state, kind, sink);
    }
    state.structural_pressure = state
        .structural_pressure
        .saturating_add(config.pressure.resistance_structural_bump);

    info!(
        round = state.round(),
        value = state.pressure.value,
        structural = state.structural_pressure,
        "Resistance activated"
    );
    sink.record(
        state.round(),
        EventKind::ResistanceActivated,
        payload!(
            "value" => state.pressure.value,
            "structural_pressure" => state.structural_pressure,
            "skipped_reveal" => skipped_reveal,
        ),
    );
    commentary::announce(state, Transition::Resistance, sink);
}

fn escalate(state: &mut RunState, config: &ShiftConfig, sink: &mut dyn EventSink) {
    let cfg = &config.pressure;
    let mut actions: Vec<&'static str> = Vec::new();
    if state.momentum >= cfg.crackdown_momentum {
        modifiers::install(state, ModifierKind::SecurityCrackdown, sink);
        state.structural_pressure = state.structural_pressure.saturating_add(1);
        actions.push("crackdown");
    }
    if state.structural_pressure >= cfg.slowdown_structural {
        modifiers::install(state, ModifierKind::BureaucraticSlowdown, sink);
        actions.push("slowdown");
    }
    if state.tracks.wealth >= cfg.entrenchment_wealth {
        modifiers::install(state, ModifierKind::EliteConsolidation, sink);
        state.structural_pressure = state.structural_pressure.saturating_add(1);
        actions.push("entrenchment");
    }
    if !actions.is_empty() {
        sink.record(
            state.round(),
            EventKind::ResistanceEscalated,
            payload!("actions" => actions, "structural_pressure" => state.structural_pressure),
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::deck::base_deck;
    use crate::events::EventLog;

    fn fresh() -> (RunState, ShiftConfig, EventLog) {
        let config = ShiftConfig::default();
        let state = RunState::new(&config, base_deck()).unwrap();
        (state, config, EventLog::new())
    }

    #[test]
    fn neutral_tracks_fire_nothing() {
        let (mut state, config, mut log) = fresh();
        let hits = scan_thresholds(&mut state, &config, &mut log);
        assert!(!hits.any());
        assert_eq!(state.immediate_signals, 0);
        assert!(log.is_empty());
    }

    #[test]
    fn independent_rules_stack() {
        let (mut state, config, mut log) = fresh();
        state.tracks.wealth = 95;
        state.tracks.planet = 20;
        state.tracks.power = 65;
        let hits = scan_thresholds(&mut state, &config, &mut log);
        assert!(hits.wealth_concentration && hits.ecological_stress && hits.power_centralization);
        assert_eq!(state.tracks.tension, 24);
        assert_eq!(state.surface_pressure, 3);
        assert_eq!(state.pressure.value, 1);
        assert_eq!(state.structural_pressure, 1);
        assert_eq!(state.immediate_signals, 1);
    }

    #[test]
    fn scan_lines_follow_configuration() {
        let (mut state, mut config, mut log) = fresh();
        config.pressure.power_centralization = 70;
        state.tracks.power = 65;
        assert!(!scan_thresholds(&mut state, &config, &mut log).any());
        state.tracks.power = 70;
        assert!(scan_thresholds(&mut state, &config, &mut log).power_centralization);
    }

    #[test]
    fn reveal_waits_for_round_four() {
        let (mut state, config, mut log) = fresh();
        state.tracks.power = 70;
        assert!(!check_reveal(&mut state, &config, &mut log));
        for _ in 0..3 {
            state.clock.advance();
        }
        assert!(check_reveal(&mut state, &config, &mut log));
        assert!(state.pressure.revealed());
        assert!(!check_reveal(&mut state, &config, &mut log));
        assert_eq!(log.of_kind(EventKind::PressureRevealed).count(), 1);
    }

    #[test]
    fn surface_converts_in_whole_chunks() {
        let (mut state, config, mut log) = fresh();
        state.surface_pressure = 11;
        convert_surface(&mut state, &config, &mut log);
        assert_eq!(state.structural_pressure, 4);
        assert_eq!(state.surface_pressure, 0);

        state.surface_pressure = 4;
        convert_surface(&mut state, &config, &mut log);
        assert_eq!(state.surface_pressure, 4);
        assert_eq!(state.structural_pressure, 4);
    }

    #[test]
    fn tension_drift_needs_watermark() {
        let (mut state, config, mut log) = fresh();
        apply_tension_drift(&mut state, &config, &mut log);
        assert_eq!(state.pressure.value, 0);
        state.tracks.tension = 30;
        apply_tension_drift(&mut state, &config, &mut log);
        assert_eq!(state.pressure.value, 1);
        assert_eq!(state.surface_pressure, 1);
    }

    #[test]
    fn resistance_installs_consolidation_and_counters() {
        let (mut state, config, mut log) = fresh();
        modifiers::install(&mut state, ModifierKind::ExtraDraw, &mut log);
        state.pressure.value = 40;
        check_resistance(&mut state, &config, &mut log);
        assert_eq!(state.pressure.phase, PressurePhase::ResistanceActive);
        assert!(state.modifiers.contains(ModifierKind::EliteConsolidation));
        assert!(state.modifiers.contains(ModifierKind::BureaucraticSlowdown));
        assert_eq!(state.structural_pressure, 3);
        assert_eq!(log.of_kind(EventKind::ResistanceActivated).count(), 1);
    }

    #[test]
    fn resistance_never_reverts() {
        let (mut state, config, mut log) = fresh();
        state.pressure.value = 45;
        check_resistance(&mut state, &config, &mut log);
        state.pressure.value = 0;
        check_resistance(&mut state, &config, &mut log);
        assert!(state.pressure.resistance_active());
        assert_eq!(log.of_kind(EventKind::ResistanceActivated).count(), 1);
    }

    #[test]
    fn escalation_reacts_to_momentum() {
        let (mut state, config, mut log) = fresh();
        state.pressure.value = 40;
        state.momentum = 9;
        check_resistance(&mut state, &config, &mut log);
        assert!(state.modifiers.contains(ModifierKind::SecurityCrackdown));
        // Activation bump (3) plus the crackdown bump (1).
        assert_eq!(state.structural_pressure, 4);
    }

    #[test]
    fn escalation_lines_follow_configuration() {
        let (mut state, mut config, mut log) = fresh();
        config.pressure.crackdown_momentum = 12;
        config.pressure.slowdown_structural = 3;
        state.pressure.value = 40;
        state.momentum = 9;
        check_resistance(&mut state, &config, &mut log);
        assert!(!state.modifiers.contains(ModifierKind::SecurityCrackdown));
        // The activation bump alone reaches the lowered slowdown line.
        assert!(state.modifiers.contains(ModifierKind::BureaucraticSlowdown));
    }
}
