//! End-of-run projection.
//!
//! A finished run is read three ways:
//!
//! 1. **Indices** -- five composite numbers from terminal state.
//! 2. **Direction** -- the indices are perturbed with the seeded RNG and the
//!    first matching rule names the era the run projects into. Each
//!    direction carries four fixed narrative paragraphs.
//! 3. **Question** -- a closing reflective question, classified on the
//!    unperturbed values and picked from a small bank.

use shift_types::{
    Direction, EventKind, Narrative, Outcome, OutcomeIndices, QuestionCategory,
    ReflectiveQuestion,
};
use tracing::info;

use crate::events::{EventSink, payload};
use crate::rng::ShiftRng;
use crate::state::RunState;

/// Composite indices from terminal state.
pub fn compute_indices(state: &RunState) -> OutcomeIndices {
    let t = state.tracks;
    let ssi = f64::from(t.wellbeing) + f64::from(t.community) - f64::from(t.tension);
    let ev = f64::from(t.planet) - f64::from(t.tension);
    let pc = f64::from(t.power) - f64::from(t.community);
    let ee = f64::from(state.pressure.value) + f64::from(state.structural_pressure)
        - f64::from(state.shift_progress);
    let mi = f64::from(state.momentum) - f64::from(state.structural_pressure) / 2.0;
    OutcomeIndices {
        ssi,
        ev,
        pc,
        ee,
        mi,
        debt_weight: state.debt_rounds,
    }
}

/// Nudge a value by up to ten percent (times `weight`) in either direction.
fn drift(value: f64, weight: f64, rng: &mut ShiftRng) -> f64 {
    let variance = (rng.next() * 0.2 - 0.1) * weight;
    value + value * variance
}

/// Seeded perturbation, drawn in the fixed order SSI, EV, PC, EE, MI.
pub fn perturb(indices: &OutcomeIndices, rng: &mut ShiftRng) -> OutcomeIndices {
    let ssi = drift(indices.ssi, 1.0, rng);
    let ev = drift(indices.ev, 1.0, rng);
    let pc = drift(indices.pc, 1.0, rng);
    let ee = drift(indices.ee, 1.5, rng);
    let mi = drift(indices.mi, 1.0, rng);
    OutcomeIndices {
        ssi,
        ev,
        pc,
        ee,
        mi,
        debt_weight: indices.debt_weight,
    }
}

/// First matching direction for a set of indices.
pub fn classify(m: &OutcomeIndices) -> Direction {
    if m.ssi > 25.0 && m.ev > 15.0 && m.mi > 10.0 && m.ee < 10.0 && m.debt_weight <= 2 {
        Direction::Equilibrium
    } else if m.ee > 20.0 {
        Direction::Elite
    } else if m.mi > 10.0 && m.ee < 10.0 {
        Direction::Reform
    } else if m.ev > 15.0 && m.ssi > 15.0 {
        Direction::Ecological
    } else if m.ssi < -10.0 {
        Direction::Fragmentation
    } else {
        Direction::Contested
    }
}

/// Fixed narrative paragraphs for a direction.
pub fn narrative(direction: Direction) -> Narrative {
    let [aftermath, institutions, social, memory] = match direction {
        Direction::Elite => [
            "Institutional consolidation deepens through administrative normalization and procedural expansion.",
            "Central authority expands gradually through administrative continuity rather than overt rupture.",
            "Public life becomes structured around managed participation and normalized procedural compliance.",
            "Centuries later, historians mark this era as a consolidation phase of structural power.",
        ],
        Direction::Reform => [
            "Movement-aligned reforms embed within institutional frameworks across multiple sectors.",
            "Reformist norms institutionalize, though structural pressure lingers beneath the surface.",
            "Civic participation expands, though opposition recalibrates within institutional boundaries.",
            "Centuries later, this period is studied as a partial structural turning point.",
        ],
        Direction::Ecological => [
            "Ecological restructuring begins redefining policy priorities and economic coordination.",
            "Environmental governance reshapes regulatory and economic coordination systems.",
            "Communities reorganize around sustainability and localized resilience.",
            "Centuries later, ecological recalibration defines civilizational identity.",
        ],
        Direction::Fragmentation => [
            "Structural instability destabilizes governance and weakens shared cohesion.",
            "Institutional coherence weakens unevenly across regions.",
            "Regional disparities deepen as shared trust erodes.",
            "Centuries later, the instability of this era remains a cautionary structural reference.",
        ],
        Direction::Equilibrium => [
            "Institutional and civic alignment produces a rare phase of structural equilibrium.",
            "Institutional frameworks recalibrate toward participatory alignment and adaptive balance.",
            "Civic culture stabilizes around durable structural alignment.",
            "Centuries later, this era is referenced as proof that structural alignment was once achievable.",
        ],
        Direction::Contested => [
            "Competing structural forces prevent decisive transformation.",
            "Institutional equilibrium remains tense and adaptive.",
            "Society adapts without resolving underlying structural tension.",
            "Centuries later, scholars debate whether this era marked preservation or transformation.",
        ],
    };
    Narrative {
        aftermath: aftermath.to_owned(),
        institutions: institutions.to_owned(),
        social: social.to_owned(),
        memory: memory.to_owned(),
    }
}

/// Question category from unperturbed indices and terminal state.
///
/// Ultra-rare categories are checked before the core ones.
pub fn question_category(indices: &OutcomeIndices, state: &RunState) -> QuestionCategory {
    let OutcomeIndices {
        ssi, ev, pc, ee, ..
    } = *indices;
    let momentum = f64::from(state.momentum);
    let structural = f64::from(state.structural_pressure);
    let community = f64::from(state.tracks.community);
    let debt = state.debt_rounds;

    let rare_equilibrium = ssi > 25.0
        && ev > 15.0
        && momentum > 10.0
        && ee < 10.0
        && pc > -5.0
        && pc < 5.0
        && structural < 15.0
        && debt <= 2;

    if ev > 20.0 && pc < -5.0 && community > 30.0 && structural < 10.0 {
        QuestionCategory::UltraEcoDecentralized
    } else if momentum > 15.0 && structural > 30.0 {
        QuestionCategory::UltraMomentumPressure
    } else if debt >= 5 && state.tracks.wealth > 0 && ee < 10.0 {
        QuestionCategory::UltraDebtRecovery
    } else if rare_equilibrium {
        QuestionCategory::RareEquilibrium
    } else if ee > 20.0 && pc > 5.0 {
        QuestionCategory::EliteConsolidation
    } else if debt >= 5 && pc > 5.0 {
        QuestionCategory::ManagedAusterity
    } else if ev < -30.0 {
        QuestionCategory::EcologicalConstraint
    } else if ssi < -10.0 {
        QuestionCategory::Fragmentation
    } else if ssi > 20.0 && momentum > 8.0 {
        QuestionCategory::ContestedReform
    } else {
        QuestionCategory::ManagedComfort
    }
}

/// Question variants for a category.
pub const fn question_bank(category: QuestionCategory) -> &'static [&'static str] {
    match category {
        QuestionCategory::EliteConsolidation => &[
            "Did you stabilize the system, or did the system stabilize you?",
            "Who adjusted more: you, or the structure?",
            "Was that stability, or containment?",
        ],
        QuestionCategory::ManagedAusterity => &[
            "Who actually paid for the stability you built?",
            "When budgets tightened, who absorbed the shock?",
            "What did stability cost, and to whom?",
        ],
        QuestionCategory::EcologicalConstraint => &[
            "What did you treat as temporary that was always structural?",
            "What would it have taken to move faster?",
            "When the ground shifts, what holds?",
        ],
        QuestionCategory::ContestedReform => &[
            "You shifted the structure. Why did it stop there?",
            "What was missing: alignment or courage?",
            "How close were you to something lasting?",
        ],
        QuestionCategory::Fragmentation => &[
            "What holds a system together when pressure rises?",
            "Is decentralization enough without solidarity?",
            "When structure loosens, what replaces it?",
        ],
        QuestionCategory::RareEquilibrium => &[
            "If this alignment was possible once, why not again?",
            "What keeps transformation from becoming tradition?",
            "How long can alignment be sustained?",
        ],
        QuestionCategory::ManagedComfort => &[
            "Did you change the structure, or just survive inside it?",
            "What would it take to go further?",
            "What did stability postpone?",
        ],
        QuestionCategory::UltraEcoDecentralized => &["What would it take to make this permanent?"],
        QuestionCategory::UltraMomentumPressure => &["When momentum rises, who feels threatened?"],
        QuestionCategory::UltraDebtRecovery => {
            &["What changed: the numbers, or the power behind them?"]
        }
    }
}

/// Fallback when a bank is empty.
const FALLBACK_QUESTION: &str = "What changed, and what stayed the same?";

/// Project the outcome of a finished run and record it.
///
/// RNG draws happen in a fixed order: five perturbation draws, then one
/// question pick.
pub fn project(state: &RunState, rng: &mut ShiftRng, sink: &mut dyn EventSink) -> Outcome {
    let indices = compute_indices(state);
    let projected = perturb(&indices, rng);
    let direction = classify(&projected);

    let category = question_category(&indices, state);
    let text = rng
        .pick(question_bank(category))
        .copied()
        .unwrap_or(FALLBACK_QUESTION);

    let outcome = Outcome {
        direction,
        indices,
        projected,
        narrative: narrative(direction),
        question: ReflectiveQuestion {
            category,
            text: text.to_owned(),
        },
    };

    info!(
        round = state.round(),
        direction = ?direction,
        question = ?category,
        "Outcome projected"
    );
    sink.record(
        state.round(),
        EventKind::OutcomeProjected,
        payload!(
            "direction" => direction,
            "indices" => indices,
            "projected" => projected,
            "question" => category,
        ),
    );
    outcome
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ShiftConfig;
    use crate::deck::base_deck;
    use crate::events::EventLog;

    fn fresh() -> RunState {
        RunState::new(&ShiftConfig::default(), base_deck()).unwrap()
    }

    fn indices(ssi: f64, ev: f64, pc: f64, ee: f64, mi: f64, debt: u32) -> OutcomeIndices {
        OutcomeIndices {
            ssi,
            ev,
            pc,
            ee,
            mi,
            debt_weight: debt,
        }
    }

    #[test]
    fn indices_from_starting_state() {
        let state = fresh();
        let i = compute_indices(&state);
        assert!((i.ssi - 80.0).abs() < f64::EPSILON);
        assert!((i.ev - 30.0).abs() < f64::EPSILON);
        assert!(i.pc.abs() < f64::EPSILON);
        assert!(i.ee.abs() < f64::EPSILON);
        assert!(i.mi.abs() < f64::EPSILON);
    }

    #[test]
    fn direction_rules_are_ordered() {
        assert_eq!(classify(&indices(30.0, 20.0, 0.0, 5.0, 12.0, 0)), Direction::Equilibrium);
        // Same values but too much debt falls through to reform.
        assert_eq!(classify(&indices(30.0, 20.0, 0.0, 5.0, 12.0, 3)), Direction::Reform);
        assert_eq!(classify(&indices(30.0, 20.0, 0.0, 25.0, 12.0, 0)), Direction::Elite);
        assert_eq!(classify(&indices(20.0, 20.0, 0.0, 15.0, 0.0, 0)), Direction::Ecological);
        assert_eq!(classify(&indices(-20.0, 0.0, 0.0, 15.0, 0.0, 0)), Direction::Fragmentation);
        assert_eq!(classify(&indices(0.0, 0.0, 0.0, 15.0, 0.0, 0)), Direction::Contested);
    }

    #[test]
    fn perturbation_stays_within_band() {
        let base = indices(100.0, 100.0, 100.0, 100.0, 100.0, 1);
        let mut rng = ShiftRng::from_seed(17);
        for _ in 0..200 {
            let p = perturb(&base, &mut rng);
            assert!((90.0..=110.0).contains(&p.ssi));
            assert!((85.0..=115.0).contains(&p.ee));
            assert_eq!(p.debt_weight, 1);
        }
    }

    #[test]
    fn zero_indices_are_fixed_points() {
        let base = indices(0.0, 0.0, 0.0, 0.0, 0.0, 0);
        let p = perturb(&base, &mut ShiftRng::from_seed(5));
        assert_eq!(p, base);
    }

    #[test]
    fn question_categories() {
        let mut state = fresh();
        // Neutral start: SSI 80, momentum 0.
        let i = compute_indices(&state);
        assert_eq!(question_category(&i, &state), QuestionCategory::ManagedComfort);

        state.tracks.power = 70;
        state.pressure.value = 30;
        let i = compute_indices(&state);
        assert_eq!(question_category(&i, &state), QuestionCategory::EliteConsolidation);

        state.momentum = 16;
        state.structural_pressure = 31;
        let i = compute_indices(&state);
        assert_eq!(question_category(&i, &state), QuestionCategory::UltraMomentumPressure);
    }

    #[test]
    fn every_bank_has_variants() {
        let all = [
            QuestionCategory::UltraEcoDecentralized,
            QuestionCategory::UltraMomentumPressure,
            QuestionCategory::UltraDebtRecovery,
            QuestionCategory::RareEquilibrium,
            QuestionCategory::EliteConsolidation,
            QuestionCategory::ManagedAusterity,
            QuestionCategory::EcologicalConstraint,
            QuestionCategory::Fragmentation,
            QuestionCategory::ContestedReform,
            QuestionCategory::ManagedComfort,
        ];
        for category in all {
            assert!(!question_bank(category).is_empty());
        }
    }

    #[test]
    fn projection_is_seed_stable() {
        let state = fresh();
        let mut log = EventLog::new();
        let a = project(&state, &mut ShiftRng::from_seed(9), &mut log);
        let b = project(&state, &mut ShiftRng::from_seed(9), &mut log);
        assert_eq!(a, b);
        assert_eq!(a.narrative, narrative(a.direction));
        assert!(question_bank(a.question.category).contains(&a.question.text.as_str()));
        assert_eq!(log.of_kind(EventKind::OutcomeProjected).count(), 2);
    }
}
