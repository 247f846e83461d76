//! The engine facade.
//!
//! [`ShiftEngine`] owns everything a run needs: configuration, the card
//! pool, the mutable [`RunState`], the seeded RNG, the event log, and the
//! timeline. Collaborators drive it through a handful of commands and read
//! it through snapshots; they never touch the state directly.

use shift_types::{
    Card, EventKind, Outcome, PlayResult, RemovalResult, RunEvent, RunLog, RunMeta, RunSeed,
    RunSnapshot, TimelineEntry,
};
use tracing::info;

use crate::config::ShiftConfig;
use crate::deck;
use crate::error::ShiftError;
use crate::events::{EventLog, EventSink, payload};
use crate::modifiers;
use crate::resolution;
use crate::rng::{ShiftRng, resolve_seed};
use crate::round::{self, RoundSummary};
use crate::state::RunState;

/// A single-run simulation engine.
#[derive(Debug, Clone)]
pub struct ShiftEngine {
    config: ShiftConfig,
    cards: Vec<Card>,
    seed: RunSeed,
    state: RunState,
    rng: ShiftRng,
    log: EventLog,
    timeline: Vec<TimelineEntry>,
    outcome: Option<Outcome>,
}

impl ShiftEngine {
    /// Validate configuration and deck, then start a run with the
    /// configured seed.
    ///
    /// # Errors
    ///
    /// Returns [`ShiftError`] if the configuration or deck is invalid.
    pub fn new(config: ShiftConfig, cards: Vec<Card>) -> Result<Self, ShiftError> {
        config.validate()?;
        deck::validate_deck(&cards)?;
        let state = RunState::new(&config, Vec::new())?;
        let seed = config.run.seed.clone();
        let mut engine = Self {
            config,
            cards,
            seed: seed.clone(),
            state,
            rng: ShiftRng::default(),
            log: EventLog::new(),
            timeline: Vec::new(),
            outcome: None,
        };
        engine.start_run(&seed)?;
        Ok(engine)
    }

    /// Reset everything and begin a fresh run from `seed`.
    ///
    /// Order: reseed, record `run_initialized`, shuffle the pool into the
    /// draw pile, deal the opening hand.
    ///
    /// # Errors
    ///
    /// Returns [`ShiftError::Clock`] if the round bound is invalid.
    pub fn start_run(&mut self, seed: &RunSeed) -> Result<(), ShiftError> {
        let resolved = resolve_seed(seed);
        self.state = RunState::new(&self.config, Vec::new())?;
        self.rng.seed(resolved);
        self.seed = seed.clone();
        self.log.clear();
        self.timeline.clear();
        self.outcome = None;

        info!(
            seed = %seed,
            resolved,
            max_rounds = self.config.run.max_rounds,
            deck_size = self.cards.len(),
            "Run started"
        );
        self.log.record(
            self.state.round(),
            EventKind::RunInitialized,
            payload!(
                "seed" => seed,
                "resolved_seed" => resolved,
                "max_rounds" => self.config.run.max_rounds,
                "deck_size" => self.cards.len(),
            ),
        );
        let round = self.state.round();
        self.state.deck = deck::shuffle_pile(&self.cards, &mut self.rng, &mut self.log, round);
        deck::deal_hand(&mut self.state, &mut self.rng, &mut self.log);
        Ok(())
    }

    /// Play the card at `index` in the current hand.
    pub fn play_card(&mut self, index: usize) -> PlayResult {
        resolution::play_card(&mut self.state, &self.config, index, &mut self.rng, &mut self.log)
    }

    /// Pay to remove the institutional modifier at `index`.
    pub fn remove_institutional(&mut self, index: usize) -> RemovalResult {
        modifiers::remove_institutional(&mut self.state, &self.config, index, &mut self.log)
    }

    /// Close the current round. Returns `None` once the run is over.
    pub fn end_round(&mut self) -> Option<RoundSummary> {
        let summary = round::end_round(&mut self.state, &self.config, &mut self.rng, &mut self.log)?;
        self.timeline.push(summary.entry.clone());
        if let Some(outcome) = &summary.outcome {
            self.outcome = Some(outcome.clone());
        }
        Some(summary)
    }

    /// Serializable view of the current state.
    pub fn snapshot(&self) -> RunSnapshot {
        self.state.snapshot()
    }

    /// The projected outcome, available once the run is over.
    pub const fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Every event so far, in order.
    pub fn events(&self) -> &[RunEvent] {
        self.log.events()
    }

    /// One row per completed round.
    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    /// The exportable run log.
    pub fn run_log(&self) -> RunLog {
        RunLog {
            meta: RunMeta {
                version: self.config.run.version.clone(),
                seed: self.seed.clone(),
            },
            events: self.log.events().to_vec(),
        }
    }

    /// Whether the run has ended.
    pub const fn is_over(&self) -> bool {
        self.state.over
    }

    /// Read-only access to the full state.
    pub const fn state(&self) -> &RunState {
        &self.state
    }

    /// The active configuration.
    pub const fn config(&self) -> &ShiftConfig {
        &self.config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::deck::{DeckError, base_deck};

    fn engine(seed: u64) -> ShiftEngine {
        let mut config = ShiftConfig::default();
        config.run.seed = RunSeed::Number(seed);
        ShiftEngine::new(config, base_deck()).unwrap()
    }

    #[test]
    fn new_run_deals_opening_hand() {
        let engine = engine(42);
        let snap = engine.snapshot();
        assert_eq!(snap.round, 1);
        assert_eq!(snap.hand.len(), 5);
        assert_eq!(snap.deck_remaining, 10);
        assert_eq!(engine.events()[0].kind, EventKind::RunInitialized);
        assert!(engine.outcome().is_none());
    }

    #[test]
    fn invalid_content_fails_at_construction() {
        let err = ShiftEngine::new(ShiftConfig::default(), Vec::new()).unwrap_err();
        assert!(matches!(err, ShiftError::Deck { source: DeckError::Empty }));

        let mut config = ShiftConfig::default();
        config.run.max_rounds = 0;
        let err = ShiftEngine::new(config, base_deck()).unwrap_err();
        assert!(matches!(err, ShiftError::Config { .. }));
    }

    #[test]
    fn outcome_appears_only_when_over() {
        let mut engine = engine(7);
        for _ in 0..9 {
            engine.end_round();
            assert!(engine.outcome().is_none());
        }
        engine.end_round();
        assert!(engine.is_over());
        assert!(engine.outcome().is_some());
        assert_eq!(engine.timeline().len(), 10);
        assert!(engine.end_round().is_none());
    }

    #[test]
    fn restart_clears_previous_run() {
        let mut engine = engine(3);
        engine.play_card(0);
        engine.end_round();
        engine.start_run(&RunSeed::from("fresh")).unwrap();
        assert!(engine.timeline().is_empty());
        assert_eq!(engine.snapshot().round, 1);
        assert_eq!(engine.events()[0].sequence, 0);
        assert_eq!(engine.run_log().meta.seed, RunSeed::Text("fresh".to_owned()));
    }
}
