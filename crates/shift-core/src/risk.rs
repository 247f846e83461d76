//! Crisis risk index (CRI).
//!
//! A report-only gauge recomputed at every round end. It never feeds back
//! into the dynamics.

use shift_types::EventKind;

use crate::events::{EventSink, payload};
use crate::state::RunState;

/// Interpretation band of a CRI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskBand {
    /// 0-25.
    Stable,
    /// 26-50.
    Strained,
    /// 51-70.
    Fragile,
    /// 71-84.
    Critical,
    /// 85 and above.
    Emergency,
}

impl RiskBand {
    /// Band for a CRI value.
    pub const fn of(cri: u32) -> Self {
        match cri {
            0..=25 => Self::Stable,
            26..=50 => Self::Strained,
            51..=70 => Self::Fragile,
            71..=84 => Self::Critical,
            _ => Self::Emergency,
        }
    }

    /// Lowercase label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Strained => "strained",
            Self::Fragile => "fragile",
            Self::Critical => "critical",
            Self::Emergency => "emergency",
        }
    }
}

/// Compute the index from current state.
pub fn crisis_risk_index(state: &RunState) -> u32 {
    let t = state.tracks;
    let inverse = |value: i32, weight: f64| f64::from(100_i32.saturating_sub(value)) * weight;

    let mut cri = f64::from(t.tension) * 0.6;
    cri += inverse(t.wellbeing, 0.4);
    cri += inverse(t.planet, 0.4);
    cri += inverse(t.community, 0.5);

    cri += f64::from(state.structural_pressure) * 0.8;
    cri += f64::from(state.parasite_level) * 0.7;

    let power_gap = t.power.saturating_sub(t.community);
    if power_gap > 20 {
        cri += f64::from(power_gap) * 0.3;
    }
    if t.wealth > 90 && t.tension > 50 {
        cri += 5.0;
    }
    cri -= f64::from(state.momentum) * 0.5;
    if state.emergency.active {
        cri += 5.0;
    }

    let rounded = cri.round().clamp(0.0, f64::from(u32::MAX));
    // Clamped to the u32 range on the line above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let value = rounded as u32;
    value
}

/// Recompute, store, and record the index.
pub fn recalculate(state: &mut RunState, sink: &mut dyn EventSink) -> u32 {
    let cri = crisis_risk_index(state);
    state.crisis_risk = cri;
    sink.record(
        state.round(),
        EventKind::CrisisRiskUpdated,
        payload!("cri" => cri, "band" => RiskBand::of(cri).as_str()),
    );
    cri
}
