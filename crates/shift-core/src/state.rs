//! The mutable run aggregate.
//!
//! [`RunState`] holds every number the dynamics touch. It is owned by the
//! engine and lent to component functions as `&mut RunState`; nothing else
//! holds a reference across calls.

use shift_types::{
    Card, EmergencyState, ModifierId, ModifierSet, PressureState, RunSnapshot, Tracks,
};

use crate::clock::{ClockError, RoundClock};
use crate::config::ShiftConfig;

/// Transitions that happened during the current round, used to label the
/// timeline. Cleared when the round resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundMarks {
    /// Pressure was revealed.
    pub revealed: bool,
    /// Resistance activated.
    pub resistance: bool,
    /// An emergency began.
    pub emergency_triggered: bool,
    /// An emergency resolved.
    pub emergency_resolved: bool,
    /// A structural scar formed.
    pub scarred: bool,
}

/// Everything that changes during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    /// Round counter.
    pub clock: RoundClock,
    /// Whether the run has ended.
    pub over: bool,
    /// Track values.
    pub tracks: Tracks,
    /// Spendable capital.
    pub capital: u32,
    /// Capital cap.
    pub capital_max: u32,
    /// Movement momentum.
    pub momentum: u32,
    /// Pressure phase and value.
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
    /// Extraction by entrenched interests.
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
    /// Next modifier instance id.
    pub next_modifier_id: u32,
    /// Draw pile; the top is the end of the vector.
    pub deck: Vec<Card>,
    /// Current hand.
    pub hand: Vec<Card>,
    /// Discard pile.
    pub discard: Vec<Card>,
    /// Report-only optimism.
    pub optimism: f64,
    /// Report-only imbalance.
    pub imbalance: i32,
    /// Report-only crisis risk index.
    pub crisis_risk: u32,
    /// Transitions seen this round.
    pub marks: RoundMarks,
}

impl RunState {
    /// Fresh state for a run. The deck is stored unshuffled; the caller
    /// shuffles and deals.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError`] if `run.max_rounds` is 0.
    pub fn new(config: &ShiftConfig, deck: Vec<Card>) -> Result<Self, ClockError> {
        let eco = &config.economy;
        Ok(Self {
            clock: RoundClock::new(config.run.max_rounds)?,
            over: false,
            tracks: config.tracks.to_tracks(),
            capital: eco.starting_capital.min(eco.base_capital_max),
            capital_max: eco.base_capital_max,
            momentum: 0,
            pressure: PressureState::default(),
            structural_pressure: 0,
            surface_pressure: 0,
            entropy: 0,
            structural_scar: 0,
            overflow_memory: 0,
            collapse_memory: 0,
            parasite_level: 0,
            shift_progress: 0,
            debt_rounds: 0,
            immediate_signals: 0,
            plays_this_round: 0,
            max_plays: eco.base_max_plays,
            hand_size: eco.base_hand_size,
            emergency: EmergencyState::default(),
            modifiers: ModifierSet::default(),
            next_modifier_id: 1,
            deck,
            hand: Vec::new(),
            discard: Vec::new(),
            optimism: 0.0,
            imbalance: 0,
            crisis_risk: 0,
            marks: RoundMarks::default(),
        })
    }

    /// Current round.
    pub const fn round(&self) -> u32 {
        self.clock.round()
    }

    /// Allocate the next modifier instance id.
    pub const fn allocate_modifier_id(&mut self) -> ModifierId {
        let id = ModifierId(self.next_modifier_id);
        self.next_modifier_id = self.next_modifier_id.saturating_add(1);
        id
    }

    /// Add a signed delta to momentum, flooring at 0.
    pub const fn adjust_momentum(&mut self, delta: i32) {
        self.momentum = apply_signed(self.momentum, delta);
    }

    /// Total cards across deck, hand, and discard.
    pub fn card_count(&self) -> usize {
        self.deck
            .len()
            .saturating_add(self.hand.len())
            .saturating_add(self.discard.len())
    }

    /// Serializable view for collaborators.
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            round: self.clock.round(),
            max_rounds: self.clock.max_rounds(),
            over: self.over,
            tracks: self.tracks,
            capital: self.capital,
            capital_max: self.capital_max,
            momentum: self.momentum,
            pressure: self.pressure,
            structural_pressure: self.structural_pressure,
            surface_pressure: self.surface_pressure,
            entropy: self.entropy,
            structural_scar: self.structural_scar,
            overflow_memory: self.overflow_memory,
            collapse_memory: self.collapse_memory,
            parasite_level: self.parasite_level,
            shift_progress: self.shift_progress,
            debt_rounds: self.debt_rounds,
            immediate_signals: self.immediate_signals,
            plays_this_round: self.plays_this_round,
            max_plays: self.max_plays,
            hand_size: self.hand_size,
            emergency: self.emergency,
            modifiers: self.modifiers.clone(),
            hand: self.hand.clone(),
            deck_remaining: u32::try_from(self.deck.len()).unwrap_or(u32::MAX),
            discard_count: u32::try_from(self.discard.len()).unwrap_or(u32::MAX),
            optimism: self.optimism,
            imbalance: self.imbalance,
            crisis_risk: self.crisis_risk,
        }
    }
}

/// Apply a signed delta to an unsigned counter, saturating at both ends.
pub const fn apply_signed(value: u32, delta: i32) -> u32 {
    if delta >= 0 {
        value.saturating_add(delta.unsigned_abs())
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}

/// Widen an unsigned counter for comparison against a signed track.
pub fn signed(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::deck::base_deck;

    #[test]
    fn new_state_matches_config() {
        let config = ShiftConfig::default();
        let state = RunState::new(&config, base_deck()).unwrap();
        assert_eq!(state.round(), 1);
        assert_eq!(state.capital, 10);
        assert_eq!(state.capital_max, 15);
        assert_eq!(state.tracks.tension, 20);
        assert_eq!(state.card_count(), 15);
        assert!(!state.over);
    }

    #[test]
    fn momentum_floors_at_zero() {
        let mut state = RunState::new(&ShiftConfig::default(), Vec::new()).unwrap();
        state.adjust_momentum(2);
        state.adjust_momentum(-5);
        assert_eq!(state.momentum, 0);
    }

    #[test]
    fn modifier_ids_are_monotonic() {
        let mut state = RunState::new(&ShiftConfig::default(), Vec::new()).unwrap();
        let a = state.allocate_modifier_id();
        let b = state.allocate_modifier_id();
        assert!(b > a);
    }

    #[test]
    fn apply_signed_saturates() {
        assert_eq!(apply_signed(3, -5), 0);
        assert_eq!(apply_signed(3, 4), 7);
        assert_eq!(apply_signed(u32::MAX, 1), u32::MAX);
    }
}
