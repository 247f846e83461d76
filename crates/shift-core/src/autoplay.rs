//! Bounded autoplay runner.
//!
//! [`run_to_completion`] feeds [`Strategy`] decisions into a
//! [`ShiftEngine`] until the run ends or the step budget runs out. A
//! rejected command ends the round, so a confused strategy cannot stall the
//! loop.

use shift_types::Outcome;
use tracing::{debug, info, warn};

use crate::engine::ShiftEngine;
use crate::round::RoundSummary;
use crate::state::RunState;
use crate::strategy::{Decision, Strategy};

/// Why autoplay stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayEnd {
    /// The run reached its last round.
    RunOver,
    /// The step budget was exhausted first.
    StepLimit,
}

/// Result of an autoplay session.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoplayResult {
    /// Why the loop stopped.
    pub end_reason: AutoplayEnd,
    /// Commands issued.
    pub steps: u32,
    /// Rounds closed.
    pub rounds: u32,
    /// Cards played.
    pub plays: u32,
    /// Institutional modifiers removed.
    pub removals: u32,
    /// Commands the engine rejected.
    pub rejected: u32,
    /// The last round summary, if any round closed.
    pub final_summary: Option<RoundSummary>,
    /// Projected outcome when the run ended.
    pub outcome: Option<Outcome>,
}

/// Called after each round closes.
pub trait RoundCallback {
    /// Observe a finished round.
    fn on_round(&mut self, summary: &RoundSummary, state: &RunState);
}

/// A callback that ignores every round.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl RoundCallback for NoOpCallback {
    fn on_round(&mut self, _summary: &RoundSummary, _state: &RunState) {}
}

/// Drive `engine` with `strategy` for at most `max_steps` commands.
pub fn run_to_completion(
    engine: &mut ShiftEngine,
    strategy: &mut dyn Strategy,
    callback: &mut dyn RoundCallback,
    max_steps: u32,
) -> AutoplayResult {
    let mut result = AutoplayResult {
        end_reason: AutoplayEnd::StepLimit,
        steps: 0,
        rounds: 0,
        plays: 0,
        removals: 0,
        rejected: 0,
        final_summary: None,
        outcome: None,
    };

    info!(max_steps, round = engine.state().round(), "Autoplay starting");

    while result.steps < max_steps {
        if engine.is_over() {
            result.end_reason = AutoplayEnd::RunOver;
            break;
        }
        result.steps = result.steps.saturating_add(1);

        let decision = strategy.decide(engine.state(), engine.config());
        debug!(step = result.steps, ?decision, "Decision");
        let accepted = match decision {
            Decision::Play(index) => {
                let played = engine.play_card(index);
                if played.applied {
                    result.plays = result.plays.saturating_add(1);
                }
                played.applied
            }
            Decision::Remove(index) => {
                let removal = engine.remove_institutional(index);
                if removal.removed {
                    result.removals = result.removals.saturating_add(1);
                }
                removal.removed
            }
            Decision::EndRound => true,
        };

        if !accepted {
            result.rejected = result.rejected.saturating_add(1);
            warn!(step = result.steps, ?decision, "Decision rejected, closing round");
        }
        if !accepted || decision == Decision::EndRound {
            if let Some(summary) = engine.end_round() {
                result.rounds = result.rounds.saturating_add(1);
                callback.on_round(&summary, engine.state());
                result.final_summary = Some(summary);
            }
        }
    }

    if engine.is_over() {
        result.end_reason = AutoplayEnd::RunOver;
    }
    result.outcome = engine.outcome().cloned();
    result
}

/// Log the end of an autoplay session.
pub fn log_autoplay_end(result: &AutoplayResult) {
    info!(
        reason = ?result.end_reason,
        steps = result.steps,
        rounds = result.rounds,
        plays = result.plays,
        removals = result.removals,
        rejected = result.rejected,
        "Autoplay ended"
    );

    if let Some(ref outcome) = result.outcome {
        info!(
            direction = ?outcome.direction,
            ssi = outcome.indices.ssi,
            ev = outcome.indices.ev,
            ee = outcome.indices.ee,
            question = %outcome.question.text,
            "Projected outcome"
        );
    } else {
        warn!("Autoplay ended before the run finished");
    }
}
