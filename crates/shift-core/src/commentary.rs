//! Narrative commentary signals.
//!
//! Structural transitions (reveal, resistance) always produce a line. Card
//! plays and round ends produce at most one line each: rules are checked in
//! order and a seeded roll is made only for a rule whose condition holds, so
//! the RNG stream depends on state alone.

use shift_types::{Card, EffectKey, EventKind};

use crate::events::{EventSink, payload};
use crate::rng::ShiftRng;
use crate::state::RunState;

/// One commentary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commentary {
    /// Short headline.
    pub headline: &'static str,
    /// Supporting paragraph.
    pub paragraph: &'static str,
}

const PRESSURE_REVEAL: Commentary = Commentary {
    headline: "Pressure surfaced.",
    paragraph: "Institutional stress is no longer abstract. Structural friction now shapes political possibility.",
};

const RESISTANCE: Commentary = Commentary {
    headline: "The structure closed ranks.",
    paragraph: "Administrative countermeasures hardened. Reform now encounters procedural resistance rather than open debate.",
};

/// Structural transitions that always announce themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Pressure became visible.
    PressureReveal,
    /// Resistance activated.
    Resistance,
}

/// Record the fixed line for a structural transition.
pub fn announce(state: &RunState, transition: Transition, sink: &mut dyn EventSink) {
    let (topic, line) = match transition {
        Transition::PressureReveal => ("pressure_reveal", PRESSURE_REVEAL),
        Transition::Resistance => ("resistance", RESISTANCE),
    };
    emit(state, topic, line, sink);
}

/// Maybe comment on a card that was just played.
pub fn on_card_played(
    state: &RunState,
    card: &Card,
    rng: &mut ShiftRng,
    sink: &mut dyn EventSink,
) -> Option<Commentary> {
    let t = state.tracks;
    let lowers_wealth = card
        .effects
        .get(&EffectKey::Wealth)
        .is_some_and(|delta| *delta < 0);

    let line = if t.power.saturating_sub(t.community) > 30 && rng.maybe(0.6) {
        Commentary {
            headline: "Centralization accelerating.",
            paragraph: "Authority is expanding faster than participation. Efficiency rises, but so does fragility.",
        }
    } else if lowers_wealth && rng.maybe(0.7) {
        Commentary {
            headline: "You poked the top.",
            paragraph: "Redistribution rarely lands quietly. The structure absorbs it, but it remembers.",
        }
    } else if t.planet < 25 && rng.maybe(0.6) {
        Commentary {
            headline: "The ground is thinning.",
            paragraph: "Environmental constraint narrows political options. Delay compounds cost.",
        }
    } else if card.is_high_risk() && rng.maybe(0.5) {
        Commentary {
            headline: "You escalated.",
            paragraph: "High-risk moves accelerate momentum and opposition. The response may not be immediate.",
        }
    } else {
        return None;
    };
    emit(state, "card_play", line, sink);
    Some(line)
}

/// Maybe add a light nudge at round end.
pub fn on_round_end(
    state: &RunState,
    rng: &mut ShiftRng,
    sink: &mut dyn EventSink,
) -> Option<Commentary> {
    let t = state.tracks;
    let line = if state.pressure.resistance_active() && rng.maybe(0.8) {
        Commentary {
            headline: "Containment solidified.",
            paragraph: "Institutional actors adjusted internally. Reform now operates inside narrower corridors.",
        }
    } else if t.tension > 60 && rng.maybe(0.7) {
        Commentary {
            headline: "The temperature's rising.",
            paragraph: "Tension accumulates before rupture. Systems under pressure often tighten before they break.",
        }
    } else if state.momentum > 8 && rng.maybe(0.6) {
        Commentary {
            headline: "Momentum translated.",
            paragraph: "Collective energy is shifting institutional behavior. Acceleration invites counterforce.",
        }
    } else if t.wealth < 25 && rng.maybe(0.5) {
        Commentary {
            headline: "Stability feels thinner.",
            paragraph: "Short-term correction produced longer-term strain. Structural debt rarely disappears.",
        }
    } else if state.round() >= 8 && rng.maybe(0.4) {
        Commentary {
            headline: "This period tightened.",
            paragraph: "Structural conditions narrowed the range of viable paths. Each decision now compounds.",
        }
    } else {
        return None;
    };
    emit(state, "round_end", line, sink);
    Some(line)
}

fn emit(state: &RunState, topic: &str, line: Commentary, sink: &mut dyn EventSink) {
    sink.record(
        state.round(),
        EventKind::Commentary,
        payload!("topic" => topic, "headline" => line.headline, "paragraph" => line.paragraph),
    );
}
