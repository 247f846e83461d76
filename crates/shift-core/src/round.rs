//! Round cycle: the end-of-round pass that drives the structural dynamics.
//!
//! Each call to [`end_round`] runs these steps, in this exact order:
//!
//! 1. **Clock** -- advance the round counter.
//! 2. **Recovery** -- capital regrows, shaped by community, tension, and
//!    structural pressure, never past the cap.
//! 3. **Optimism** -- recompute optimism and the capital cap it implies.
//! 4. **Tension drift** -- high tension feeds pressure.
//! 5. **Thresholds** -- threshold scan and the one-shot reveal.
//! 6. **Surface drift** -- surface pressure drains into structural pressure.
//! 7. **Resistance** -- activation and escalation.
//! 8. **Natural drift** -- the strongest societal track erodes.
//! 9. **Entropy** -- update, extremes, resolve, decay.
//! 10. **Momentum decay**.
//! 11. **Modifiers** -- round-start hooks and crisis decay.
//! 12. **Spawns** -- establishment responses and parasite growth.
//! 13. **Emergency** -- score, resolve, or trigger.
//! 14. **Debt and risk** -- debt memory and the crisis risk index.
//! 15. **Reset** -- per-round counters; the hand goes to discard.
//! 16. **Limits** -- plays, hand size, and capital cap from modifiers.
//! 17. **Timeline** -- label the round; round-end commentary.
//! 18. **Terminal** -- past the last round the run ends and the outcome is
//!     projected; otherwise the next hand is dealt.
//!
//! The pass is deterministic given the same state and RNG stream.

use shift_types::{EventKind, Outcome, TimelineEntry, TimelineLabel, TrackName};
use tracing::{debug, info};

use crate::commentary;
use crate::config::ShiftConfig;
use crate::deck;
use crate::emergency::{self, EmergencyOutcome};
use crate::entropy::{self, EntropyReport};
use crate::events::{EventSink, payload};
use crate::modifiers;
use crate::outcome;
use crate::pressure;
use crate::rng::ShiftRng;
use crate::risk;
use crate::state::{RoundMarks, RunState, signed};

/// Summary of one end-of-round pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    /// Timeline row for the round that ended.
    pub entry: TimelineEntry,
    /// Capital regained in step 2.
    pub recovered: u32,
    /// Optimism computed in step 3.
    pub optimism: f64,
    /// The track that natural drift eroded.
    pub drifted: TrackName,
    /// Structural pass result.
    pub entropy: EntropyReport,
    /// Emergency resolution, if one resolved this round.
    pub emergency: Option<EmergencyOutcome>,
    /// Whether the run ended.
    pub over: bool,
    /// Projected outcome when the run ended.
    pub outcome: Option<Outcome>,
}

/// Run the end-of-round pass. Returns `None` when the run is already over.
pub fn end_round(
    state: &mut RunState,
    config: &ShiftConfig,
    rng: &mut ShiftRng,
    sink: &mut dyn EventSink,
) -> Option<RoundSummary> {
    if state.over {
        debug!(round = state.round(), "End of round ignored: run is over");
        return None;
    }

    // 1. Clock
    let completed = state.round();
    state.clock.advance();

    // 2-3. Economy
    let recovered = recover_capital(state, config, sink);
    let optimism = update_optimism(state, config, sink);

    // 4-7. Pressure
    pressure::apply_tension_drift(state, config, sink);
    pressure::scan_thresholds(state, config, sink);
    pressure::check_reveal(state, config, sink);
    pressure::convert_surface(state, config, sink);
    pressure::check_resistance(state, config, sink);

    // 8-10. Drift and entropy
    let drifted = natural_drift(state, sink);
    let entropy = entropy::run_structural_update(state, config, sink);
    state.adjust_momentum(-1);

    // 11-12. Modifiers
    modifiers::run_round_start(state, sink);
    modifiers::evaluate_structural_spawns(state, config, sink);
    modifiers::parasite_growth(state, config, sink);

    // 13. Emergency
    let emergency = emergency::evaluate_round(state, config, sink);

    // 14. Debt and risk
    if state.tracks.wealth < config.economy.debt_wealth_floor {
        state.debt_rounds = state.debt_rounds.saturating_add(1);
    }
    risk::recalculate(state, sink);

    // 15. Reset
    state.plays_this_round = 0;
    let leftovers = std::mem::take(&mut state.hand);
    state.discard.extend(leftovers);

    // 16. Limits
    let limits = modifiers::compute_limits(state, config);
    state.max_plays = limits.max_plays;
    state.hand_size = limits.hand_size;
    state.capital_max = limits.capital_max;
    state.capital = state.capital.min(state.capital_max);

    // 17. Timeline
    let entry = TimelineEntry {
        round: completed,
        label: label_for(state.marks),
        tracks: state.tracks,
        entropy: state.entropy,
        crisis_risk: state.crisis_risk,
    };
    commentary::on_round_end(state, rng, sink);
    sink.record(
        state.round(),
        EventKind::RoundEnded,
        payload!(
            "completed" => completed,
            "label" => entry.label,
            "tracks" => state.tracks,
            "capital" => state.capital,
            "momentum" => state.momentum,
            "entropy" => state.entropy,
        ),
    );
    state.marks = RoundMarks::default();

    // 18. Terminal
    let outcome = if state.clock.is_past_end() {
        state.over = true;
        info!(
            rounds = completed,
            structural = state.structural_pressure,
            entropy = state.entropy,
            "Run over"
        );
        sink.record(
            state.round(),
            EventKind::GameOver,
            payload!("rounds_played" => completed),
        );
        Some(outcome::project(state, rng, sink))
    } else {
        deck::deal_hand(state, rng, sink);
        None
    };

    debug!(
        round = completed,
        label = ?entry.label,
        capital = state.capital,
        cri = state.crisis_risk,
        "Round ended"
    );

    Some(RoundSummary {
        entry,
        recovered,
        optimism,
        drifted,
        entropy,
        emergency,
        over: state.over,
        outcome,
    })
}

/// Step 2: regrow capital toward the cap.
fn recover_capital(state: &mut RunState, config: &ShiftConfig, sink: &mut dyn EventSink) -> u32 {
    let eco = &config.economy;
    let mut recovery = signed(eco.recovery_base);
    if state.tracks.community >= eco.recovery_community_bonus {
        recovery = recovery.saturating_add(1);
    }
    if state.tracks.tension >= eco.recovery_tension_penalty {
        recovery = recovery.saturating_sub(1);
    }
    if state.structural_pressure >= eco.recovery_structural_penalty {
        recovery = recovery.saturating_sub(1);
    }
    let recovery = u32::try_from(recovery)
        .unwrap_or(0)
        .max(eco.recovery_min);

    let before = state.capital;
    state.capital = state.capital.saturating_add(recovery).min(state.capital_max);
    let recovered = state.capital.saturating_sub(before);
    sink.record(
        state.round(),
        EventKind::CapitalRecovered,
        payload!("recovery" => recovery, "capital" => state.capital, "capital_max" => state.capital_max),
    );
    recovered
}

/// Step 3: optimism and the capital cap.
fn update_optimism(state: &mut RunState, config: &ShiftConfig, sink: &mut dyn EventSink) -> f64 {
    let t = state.tracks;
    let base = (f64::from(t.wellbeing) + f64::from(t.community) + f64::from(t.planet)) / 3.0;
    let optimism = base - 1.5 * f64::from(state.structural_pressure) + f64::from(state.momentum);
    state.optimism = optimism;
    state.capital_max = modifiers::compute_limits(state, config).capital_max;
    state.capital = state.capital.min(state.capital_max);
    sink.record(
        state.round(),
        EventKind::OptimismUpdated,
        payload!("optimism" => optimism, "capital_max" => state.capital_max),
    );
    optimism
}

/// Step 8: erode the strongest societal track, then apply the secondary
/// drift rules. Ties go to the first track in canonical order.
fn natural_drift(state: &mut RunState, sink: &mut dyn EventSink) -> TrackName {
    let mut strongest = TrackName::Wellbeing;
    for track in TrackName::SOCIETAL {
        if state.tracks.get(track) > state.tracks.get(strongest) {
            strongest = track;
        }
    }
    let tension = state.tracks.tension;
    let erosion: i32 = if tension < 40 {
        -1
    } else if tension < 60 {
        -2
    } else {
        -3
    };
    state.tracks.adjust(strongest, erosion);

    let t = state.tracks;
    if t.wealth >= 90 {
        state.tracks.adjust(TrackName::Tension, 1);
        state.tracks.adjust(TrackName::Community, -1);
    }
    if t.tension >= 80 {
        state.tracks.adjust(TrackName::Wellbeing, -1);
        state.tracks.adjust(TrackName::Community, -1);
    }
    if t.planet <= 25 {
        state.tracks.adjust(TrackName::Wellbeing, -1);
    }

    sink.record(
        state.round(),
        EventKind::NaturalDrift,
        payload!("track" => strongest, "erosion" => erosion, "tracks" => state.tracks),
    );
    strongest
}

/// Most significant transition of the round.
const fn label_for(marks: RoundMarks) -> TimelineLabel {
    if marks.resistance {
        TimelineLabel::ResistanceActivated
    } else if marks.revealed {
        TimelineLabel::PressureRevealed
    } else if marks.emergency_triggered {
        TimelineLabel::EmergencyTriggered
    } else if marks.emergency_resolved {
        TimelineLabel::EmergencyResolved
    } else if marks.scarred {
        TimelineLabel::ScarFormed
    } else {
        TimelineLabel::Steady
    }
}
