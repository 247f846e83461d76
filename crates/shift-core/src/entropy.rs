//! Entropy and imbalance accounting.
//!
//! Runs once per round end, in this order:
//!
//! 1. **Update** -- imbalance and tension tiers plus the structural scar add
//!    entropy.
//! 2. **Extremes** -- tracks above 100 (overflow) add 1 each; societal
//!    tracks below 20 (collapse) add 2 each. Both feed cumulative memories.
//! 3. **Resolve** -- at 10 or more, a strong reform base halves entropy;
//!    otherwise entropy above 20 leaves a permanent scar.
//! 4. **Decay** -- entropy sheds 1 while positive.

use shift_types::{EventKind, TrackName};
use tracing::info;

use crate::config::ShiftConfig;
use crate::events::{EventSink, payload};
use crate::state::{RunState, signed};

/// Tracks above this count as overflow.
const OVERFLOW_LINE: i32 = 100;

/// Societal tracks below this count as collapse.
const COLLAPSE_LINE: i32 = 20;

/// What the resolution step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Entropy was below the resolution threshold.
    Untouched,
    /// Reform strength removed this much entropy.
    Reformed {
        /// Entropy removed.
        reduction: u32,
    },
    /// Weak reform let a structural scar form.
    Scarred,
    /// Entropy was high enough to resolve but nothing happened.
    Held,
}

/// Summary of one structural pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntropyReport {
    /// Spread between strongest and weakest societal track.
    pub imbalance: i32,
    /// Entropy added by the update step.
    pub gain: u32,
    /// Tracks over the overflow line.
    pub overflow: u32,
    /// Societal tracks under the collapse line.
    pub collapse: u32,
    /// Resolution outcome.
    pub resolution: Resolution,
    /// Entropy after decay.
    pub entropy: u32,
}

/// Max minus min over the five societal tracks.
pub fn calculate_imbalance(state: &RunState) -> i32 {
    let values = TrackName::SOCIETAL.map(|track| state.tracks.get(track));
    let max = values.iter().copied().max().unwrap_or(0);
    let min = values.iter().copied().min().unwrap_or(0);
    max.saturating_sub(min)
}

/// Step 1: tiered gain from imbalance and tension, plus the scar.
pub fn update_entropy(state: &mut RunState, config: &ShiftConfig) -> u32 {
    let cfg = &config.entropy;
    let imbalance = calculate_imbalance(state);
    state.imbalance = imbalance;
    let tension = state.tracks.tension;

    let imbalance_gain: u32 = if imbalance > cfg.imbalance_high {
        2
    } else if imbalance > cfg.imbalance_low {
        1
    } else {
        0
    };
    let tension_gain: u32 = if tension > cfg.tension_high {
        2
    } else if tension > cfg.tension_low {
        1
    } else {
        0
    };
    let gain = imbalance_gain
        .saturating_add(tension_gain)
        .saturating_add(state.structural_scar);
    state.entropy = state.entropy.saturating_add(gain);
    gain
}

/// Step 2: count extremes, feed the memories, and add entropy.
pub fn check_track_extremes(state: &mut RunState) -> (u32, u32) {
    let mut overflow = 0_u32;
    let mut collapse = 0_u32;
    for track in TrackName::ALL {
        let value = state.tracks.get(track);
        if value > OVERFLOW_LINE {
            overflow = overflow.saturating_add(1);
        }
        if track != TrackName::Tension && value < COLLAPSE_LINE {
            collapse = collapse.saturating_add(1);
        }
    }
    state.overflow_memory = state.overflow_memory.saturating_add(overflow);
    state.collapse_memory = state.collapse_memory.saturating_add(collapse);
    state.entropy = state
        .entropy
        .saturating_add(overflow)
        .saturating_add(collapse.saturating_mul(2));
    (overflow, collapse)
}

/// Step 3: reform reduction or scar formation.
pub fn resolve_entropy(state: &mut RunState, config: &ShiftConfig) -> Resolution {
    let cfg = &config.entropy;
    if state.entropy < cfg.resolution_threshold {
        return Resolution::Untouched;
    }
    let reform = state
        .tracks
        .community
        .saturating_add(state.tracks.wellbeing)
        .saturating_add(signed(state.momentum));
    if reform > cfg.reform_threshold {
        let reduction = state.entropy.saturating_mul(cfg.reduction_percent) / 100;
        state.entropy = state.entropy.saturating_sub(reduction);
        return Resolution::Reformed { reduction };
    }
    if state.entropy > cfg.scar_threshold {
        state.structural_scar = state.structural_scar.saturating_add(1);
        state.marks.scarred = true;
        info!(round = state.round(), scar = state.structural_scar, "Structural scar formed");
        return Resolution::Scarred;
    }
    Resolution::Held
}

/// Step 4: shed one point while positive.
pub const fn natural_decay(state: &mut RunState) {
    state.entropy = state.entropy.saturating_sub(1);
}

/// Run all four steps in order and record the result.
pub fn run_structural_update(
    state: &mut RunState,
    config: &ShiftConfig,
    sink: &mut dyn EventSink,
) -> EntropyReport {
    let gain = update_entropy(state, config);
    let (overflow, collapse) = check_track_extremes(state);
    let resolution = resolve_entropy(state, config);
    natural_decay(state);

    let report = EntropyReport {
        imbalance: state.imbalance,
        gain,
        overflow,
        collapse,
        resolution,
        entropy: state.entropy,
    };
    sink.record(
        state.round(),
        EventKind::EntropyUpdated,
        payload!(
            "imbalance" => report.imbalance,
            "gain" => gain,
            "overflow" => overflow,
            "collapse" => collapse,
            "entropy" => state.entropy,
        ),
    );
    match resolution {
        Resolution::Reformed { reduction } => sink.record(
            state.round(),
            EventKind::EntropyResolved,
            payload!("outcome" => "reformed", "reduction" => reduction),
        ),
        Resolution::Scarred => sink.record(
            state.round(),
            EventKind::EntropyResolved,
            payload!("outcome" => "scarred", "structural_scar" => state.structural_scar),
        ),
        Resolution::Untouched | Resolution::Held => {}
    }
    report
}
