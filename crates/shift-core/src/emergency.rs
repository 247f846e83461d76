//! Emergency sub-state.
//!
//! An emergency starts when a track crosses a collapse line. It then runs
//! for a fixed number of round ends, scoring recovery each round, and
//! resolves exactly once as a success or a failure.

use shift_types::{EmergencyState, EventKind, ModifierKind, TrackName};
use tracing::info;

use crate::config::ShiftConfig;
use crate::events::{EventSink, payload};
use crate::modifiers;
use crate::state::RunState;

/// How an emergency ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyOutcome {
    /// Recovery scored high enough.
    Success {
        /// Final score.
        score: u32,
    },
    /// Recovery fell short.
    Failure {
        /// Final score.
        score: u32,
    },
}

/// Start an emergency if a collapse condition holds and none is active.
pub fn check_trigger(state: &mut RunState, config: &ShiftConfig, sink: &mut dyn EventSink) -> bool {
    if state.emergency.active {
        return false;
    }
    let cfg = &config.emergency;
    let t = state.tracks;
    let collapse = t.planet < cfg.planet_floor
        || t.wellbeing < cfg.wellbeing_floor
        || t.tension > cfg.tension_ceiling;
    if !collapse {
        return false;
    }
    state.emergency = EmergencyState {
        active: true,
        rounds_active: 0,
        performance_score: 0,
    };
    state.marks.emergency_triggered = true;
    info!(
        round = state.round(),
        planet = t.planet,
        wellbeing = t.wellbeing,
        tension = t.tension,
        "Emergency triggered"
    );
    sink.record(
        state.round(),
        EventKind::EmergencyTriggered,
        payload!("planet" => t.planet, "wellbeing" => t.wellbeing, "tension" => t.tension),
    );
    true
}

/// Round-end evaluation: score and possibly resolve an active emergency,
/// or check for a new one. A resolving round never re-triggers.
pub fn evaluate_round(
    state: &mut RunState,
    config: &ShiftConfig,
    sink: &mut dyn EventSink,
) -> Option<EmergencyOutcome> {
    if !state.emergency.active {
        check_trigger(state, config, sink);
        return None;
    }

    let cfg = &config.emergency;
    let mut points = 0_u32;
    if state.tracks.wellbeing > cfg.recovery_threshold {
        points = points.saturating_add(1);
    }
    if state.tracks.community > cfg.recovery_threshold {
        points = points.saturating_add(1);
    }
    if state.momentum > state.structural_pressure {
        points = points.saturating_add(1);
    }
    state.emergency.rounds_active = state.emergency.rounds_active.saturating_add(1);
    state.emergency.performance_score = state.emergency.performance_score.saturating_add(points);

    if state.emergency.rounds_active < cfg.duration_rounds {
        return None;
    }

    let score = state.emergency.performance_score;
    let outcome = if score >= cfg.success_score {
        state.tracks.adjust(TrackName::Wellbeing, 5);
        state.momentum = state.momentum.saturating_add(3);
        state.parasite_level = state.parasite_level.saturating_sub(2);
        modifiers::install(state, ModifierKind::SolidarityNetworks, sink);
        EmergencyOutcome::Success { score }
    } else {
        state.structural_pressure = state.structural_pressure.saturating_add(2);
        state.tracks.adjust(TrackName::Community, -5);
        EmergencyOutcome::Failure { score }
    };
    state.emergency = EmergencyState::default();
    state.marks.emergency_resolved = true;

    let success = matches!(outcome, EmergencyOutcome::Success { .. });
    info!(round = state.round(), score, success, "Emergency resolved");
    sink.record(
        state.round(),
        EventKind::EmergencyResolved,
        payload!("score" => score, "success" => success),
    );
    Some(outcome)
}
