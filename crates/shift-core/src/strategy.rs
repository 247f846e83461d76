//! Decision sources for autoplay.
//!
//! A [`Strategy`] looks at the current [`RunState`] and names the next
//! command. The engine never calls a strategy itself; [`autoplay`] does.
//! That keeps scripted play, test bots, and any future interactive front
//! end interchangeable.
//!
//! [`autoplay`]: crate::autoplay

use shift_types::ModifierKind;

use crate::config::ShiftConfig;
use crate::events::DiscardEvents;
use crate::resolution;
use crate::risk;
use crate::rng::ShiftRng;
use crate::state::{RunState, signed};

/// The next command to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Play the card at this hand index.
    Play(usize),
    /// Remove the institutional modifier at this index.
    Remove(usize),
    /// Close the round.
    EndRound,
}

/// A source of decisions.
pub trait Strategy {
    /// Choose the next command for `state`.
    fn decide(&mut self, state: &RunState, config: &ShiftConfig) -> Decision;
}

/// Never plays; every call ends the round.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveStrategy;

impl PassiveStrategy {
    /// Create a passive strategy.
    pub const fn new() -> Self {
        Self
    }
}

impl Strategy for PassiveStrategy {
    fn decide(&mut self, _state: &RunState, _config: &ShiftConfig) -> Decision {
        Decision::EndRound
    }
}

/// One-step lookahead over the hand.
///
/// Each playable card is resolved against a scratch copy of the state with
/// events discarded; the card that most improves [`evaluate`] is played.
/// If nothing improves the position the round ends. Costly institutional
/// modifiers are bought out first when capital allows.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyStrategy;

impl GreedyStrategy {
    /// Create a greedy strategy.
    pub const fn new() -> Self {
        Self
    }
}

/// Institutional modifiers worth paying to remove, most harmful first.
const REMOVAL_TARGETS: [ModifierKind; 3] = [
    ModifierKind::EliteCapture,
    ModifierKind::BureaucraticSlowdown,
    ModifierKind::SecurityCrackdown,
];

/// Capital kept in reserve after a removal so the round can still be played.
const REMOVAL_RESERVE: u32 = 3;

impl Strategy for GreedyStrategy {
    fn decide(&mut self, state: &RunState, config: &ShiftConfig) -> Decision {
        if state.plays_this_round == 0
            && state.capital >= config.economy.removal_cost.saturating_add(REMOVAL_RESERVE)
        {
            for target in REMOVAL_TARGETS {
                if let Some(index) = state
                    .modifiers
                    .institutional
                    .iter()
                    .position(|m| m.kind == target)
                {
                    return Decision::Remove(index);
                }
            }
        }

        let baseline = evaluate(state);
        let mut best: Option<(usize, i64)> = None;
        for index in 0..state.hand.len() {
            if resolution::validate_play(state, index).is_err() {
                continue;
            }
            let mut trial = state.clone();
            // Card resolution only draws from the RNG for commentary, so any
            // stream gives the same state.
            let mut rng = ShiftRng::from_seed(0);
            resolution::play_card(&mut trial, config, index, &mut rng, &mut DiscardEvents);
            let score = evaluate(&trial);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((index, score));
            }
        }

        match best {
            Some((index, score)) if score > baseline => Decision::Play(index),
            _ => Decision::EndRound,
        }
    }
}

/// Heuristic position value: healthy societal tracks and momentum are good;
/// tension, imbalance between power and community, and crisis risk are bad.
pub fn evaluate(state: &RunState) -> i64 {
    let t = state.tracks;
    let health = i64::from(t.wellbeing)
        .saturating_add(i64::from(t.planet))
        .saturating_add(i64::from(t.community));
    let concentration = i64::from(t.power.saturating_sub(t.community).max(0));
    let cri = i64::from(risk::crisis_risk_index(state));
    health
        .saturating_sub(i64::from(t.tension))
        .saturating_sub(concentration)
        .saturating_sub(cri.saturating_mul(2))
        .saturating_add(i64::from(signed(state.momentum)).saturating_mul(3))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::deck::base_deck;
    use crate::events::EventLog;
    use crate::modifiers;

    fn state_with_hand(titles: &[&str]) -> (RunState, ShiftConfig) {
        let config = ShiftConfig::default();
        let mut state = RunState::new(&config, Vec::new()).unwrap();
        state.hand = base_deck()
            .into_iter()
            .filter(|c| titles.contains(&c.title.as_str()))
            .collect();
        (state, config)
    }

    #[test]
    fn passive_always_ends_round() {
        let (state, config) = state_with_hand(&["Public Clinic"]);
        assert_eq!(PassiveStrategy::new().decide(&state, &config), Decision::EndRound);
    }

    #[test]
    fn greedy_prefers_a_helpful_card() {
        let (state, config) = state_with_hand(&["Public Clinic", "Privatization Drive"]);
        // Public Clinic is first in deck order and only raises wellbeing.
        assert_eq!(GreedyStrategy::new().decide(&state, &config), Decision::Play(0));
    }

    #[test]
    fn greedy_ends_round_when_nothing_is_affordable() {
        let (mut state, config) = state_with_hand(&["Wealth Tax"]);
        state.capital = 1;
        assert_eq!(GreedyStrategy::new().decide(&state, &config), Decision::EndRound);
    }

    #[test]
    fn greedy_buys_out_elite_capture() {
        let (mut state, config) = state_with_hand(&["Public Clinic"]);
        modifiers::install(&mut state, ModifierKind::MediaDistortion, &mut EventLog::new());
        modifiers::install(&mut state, ModifierKind::EliteCapture, &mut EventLog::new());
        assert_eq!(GreedyStrategy::new().decide(&state, &config), Decision::Remove(1));
    }

    #[test]
    fn lookahead_leaves_state_untouched() {
        let (state, config) = state_with_hand(&["Public Clinic", "Tree Cover"]);
        let before = state.clone();
        GreedyStrategy::new().decide(&state, &config);
        assert_eq!(state, before);
    }
}
