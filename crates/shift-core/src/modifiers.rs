//! Modifier ("joker") lifecycle and hook dispatch.
//!
//! A modifier is a [`ModifierKind`] tag plus a capability set of optional
//! hooks resolved by [`hooks`]. Composition order is fixed:
//!
//! 1. Institutional modifiers, in insertion order.
//! 2. Movement modifiers, in insertion order.
//! 3. Crisis modifiers (round start only), each firing and then decaying.
//!
//! Installs are idempotent per kind. Removal of an institutional modifier is
//! a player action that costs capital and provokes tension.

use shift_types::{
    Card, EffectKey, EffectMap, EventKind, Lifecycle, ModifierInstance, ModifierKind,
    RemovalRejection, RemovalResult, Suit, TrackName,
};
use tracing::{debug, info};

use crate::config::ShiftConfig;
use crate::events::{EventSink, payload};
use crate::state::{RunState, signed};

/// Per-round limits that persistent hooks may adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Capital cap.
    pub capital_max: u32,
    /// Plays allowed per round.
    pub max_plays: u32,
    /// Hand size before clamping.
    pub hand_size: u32,
}

/// Round-start hook.
pub type RoundStartHook = fn(&mut RunState);
/// Effect-rewriting hook, run before a card's effects are applied.
pub type EffectsHook = fn(&Card, &mut EffectMap);
/// Post-play hook.
pub type CardPlayedHook = fn(&mut RunState, &Card);
/// Limit-adjusting hook.
pub type PersistentHook = fn(&mut Limits);

/// The hooks a modifier kind provides. Absent hooks are `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifierHooks {
    /// Fires at each round start.
    pub on_round_start: Option<RoundStartHook>,
    /// Rewrites a card's effects before application.
    pub on_card_effects_computed: Option<EffectsHook>,
    /// Fires after a card resolves.
    pub on_card_played: Option<CardPlayedHook>,
    /// Adjusts per-round limits.
    pub on_persistent_apply: Option<PersistentHook>,
}

/// Resolve the hooks for a kind.
pub const fn hooks(kind: ModifierKind) -> ModifierHooks {
    let none = ModifierHooks {
        on_round_start: None,
        on_card_effects_computed: None,
        on_card_played: None,
        on_persistent_apply: None,
    };
    match kind {
        ModifierKind::ExtraDraw => ModifierHooks {
            on_persistent_apply: Some(extra_draw),
            ..none
        },
        ModifierKind::RiskBoost => ModifierHooks {
            on_card_effects_computed: Some(risk_boost),
            ..none
        },
        ModifierKind::MomentumShield => ModifierHooks {
            on_round_start: Some(momentum_shield),
            ..none
        },
        ModifierKind::SolidarityNetworks => ModifierHooks {
            on_round_start: Some(solidarity_networks),
            ..none
        },
        ModifierKind::EliteConsolidation => ModifierHooks {
            on_round_start: Some(elite_consolidation_tick),
            on_card_effects_computed: Some(elite_consolidation_effects),
            ..none
        },
        ModifierKind::BureaucraticSlowdown => ModifierHooks {
            on_persistent_apply: Some(bureaucratic_slowdown),
            ..none
        },
        ModifierKind::SecurityCrackdown => ModifierHooks {
            on_card_effects_computed: Some(security_crackdown_effects),
            on_card_played: Some(security_crackdown_played),
            ..none
        },
        ModifierKind::MediaDistortion => ModifierHooks {
            on_round_start: Some(media_distortion),
            ..none
        },
        ModifierKind::EliteCapture => ModifierHooks {
            on_round_start: Some(elite_capture),
            ..none
        },
        ModifierKind::SocialUnrest => ModifierHooks {
            on_round_start: Some(social_unrest),
            ..none
        },
    }
}

// ---------------------------------------------------------------------------
// Hook bodies
// ---------------------------------------------------------------------------

const fn extra_draw(limits: &mut Limits) {
    limits.hand_size = limits.hand_size.saturating_add(1);
}

fn risk_boost(card: &Card, effects: &mut EffectMap) {
    if card.is_high_risk() {
        let entry = effects.entry(EffectKey::Momentum).or_insert(0);
        *entry = entry.saturating_add(1);
    }
}

const fn momentum_shield(state: &mut RunState) {
    if state.momentum > 0 {
        state.momentum = state.momentum.saturating_add(1);
    }
}

const fn solidarity_networks(state: &mut RunState) {
    state.momentum = state.momentum.saturating_add(1);
}

fn elite_consolidation_tick(state: &mut RunState) {
    state.tracks.adjust(TrackName::Wealth, 1);
}

fn elite_consolidation_effects(_card: &Card, effects: &mut EffectMap) {
    soften(effects, EffectKey::Wealth, |delta| delta < 0, 1);
}

const fn bureaucratic_slowdown(limits: &mut Limits) {
    limits.max_plays = if limits.max_plays > 1 {
        limits.max_plays.saturating_sub(1)
    } else {
        1
    };
    limits.capital_max = limits.capital_max.saturating_sub(2);
}

fn security_crackdown_effects(_card: &Card, effects: &mut EffectMap) {
    soften(effects, EffectKey::Momentum, |delta| delta > 0, -1);
}

fn security_crackdown_played(state: &mut RunState, card: &Card) {
    if card.suit == Suit::Community {
        state.tracks.adjust(TrackName::Tension, 1);
    }
}

fn media_distortion(state: &mut RunState) {
    state.tracks.adjust(TrackName::Tension, 1);
}

fn elite_capture(state: &mut RunState) {
    state.parasite_level = state.parasite_level.saturating_add(1);
    state.tracks.adjust(TrackName::Wealth, 1);
}

fn social_unrest(state: &mut RunState) {
    state.tracks.adjust(TrackName::Wellbeing, -1);
    state.tracks.adjust(TrackName::Community, -1);
    state.tracks.adjust(TrackName::Tension, 1);
}

/// Nudge a matching delta toward zero; a delta that reaches zero is dropped.
fn soften(effects: &mut EffectMap, key: EffectKey, applies: fn(i32) -> bool, step: i32) {
    let Some(delta) = effects.get(&key).copied() else {
        return;
    };
    if !applies(delta) {
        return;
    }
    let softened = delta.saturating_add(step);
    if softened == 0 {
        effects.remove(&key);
    } else {
        effects.insert(key, softened);
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Install a modifier unless one of the same kind is already present.
///
/// Returns whether a new instance was added.
pub fn install(state: &mut RunState, kind: ModifierKind, sink: &mut dyn EventSink) -> bool {
    if state.modifiers.contains(kind) {
        return false;
    }
    let instance = ModifierInstance {
        id: state.allocate_modifier_id(),
        kind,
        lifecycle: kind.lifecycle(),
        duration: kind.default_duration(),
    };
    state
        .modifiers
        .collection_mut(instance.lifecycle)
        .push(instance);
    info!(round = state.round(), modifier = kind.label(), "Modifier installed");
    sink.record(
        state.round(),
        EventKind::ModifierInstalled,
        payload!(
            "id" => instance.id,
            "kind" => kind,
            "lifecycle" => instance.lifecycle,
            "duration" => instance.duration,
        ),
    );
    true
}

/// Kinds in hook order for card-time hooks: institutional, then movement.
fn card_hook_order(state: &RunState) -> Vec<ModifierKind> {
    state
        .modifiers
        .institutional
        .iter()
        .chain(state.modifiers.movement.iter())
        .map(|m| m.kind)
        .collect()
}

/// Run every `on_card_effects_computed` hook over `effects`.
pub fn apply_effect_hooks(state: &RunState, card: &Card, effects: &mut EffectMap) {
    for kind in card_hook_order(state) {
        if let Some(hook) = hooks(kind).on_card_effects_computed {
            hook(card, effects);
        }
    }
}

/// Run every `on_card_played` hook.
pub fn apply_played_hooks(state: &mut RunState, card: &Card) {
    for kind in card_hook_order(state) {
        if let Some(hook) = hooks(kind).on_card_played {
            hook(state, card);
        }
    }
}

/// Run every `on_persistent_apply` hook over `limits`.
pub fn apply_persistent(state: &RunState, limits: &mut Limits) {
    for kind in card_hook_order(state) {
        if let Some(hook) = hooks(kind).on_persistent_apply {
            hook(limits);
        }
    }
}

/// Round-start pass: persistent round hooks, then crisis hooks with decay.
pub fn run_round_start(state: &mut RunState, sink: &mut dyn EventSink) {
    for kind in card_hook_order(state) {
        if let Some(hook) = hooks(kind).on_round_start {
            hook(state);
        }
    }

    let crises = std::mem::take(&mut state.modifiers.crisis);
    let mut surviving = Vec::with_capacity(crises.len());
    for mut crisis in crises {
        if let Some(hook) = hooks(crisis.kind).on_round_start {
            hook(state);
        }
        let remaining = crisis.duration.unwrap_or(0).saturating_sub(1);
        if remaining == 0 {
            debug!(round = state.round(), modifier = crisis.kind.label(), "Crisis expired");
            sink.record(
                state.round(),
                EventKind::ModifierExpired,
                payload!("id" => crisis.id, "kind" => crisis.kind),
            );
        } else {
            crisis.duration = Some(remaining);
            surviving.push(crisis);
        }
    }
    state.modifiers.crisis = surviving;
}

/// Shift-progress milestones and the movement modifier each unlocks.
const SHIFT_UNLOCKS: [(u32, ModifierKind); 3] = [
    (3, ModifierKind::ExtraDraw),
    (6, ModifierKind::RiskBoost),
    (10, ModifierKind::MomentumShield),
];

/// Install any movement modifier whose shift milestone has been reached.
pub fn check_shift_unlocks(state: &mut RunState, sink: &mut dyn EventSink) {
    for (threshold, kind) in SHIFT_UNLOCKS {
        if state.shift_progress >= threshold {
            install(state, kind, sink);
        }
    }
}

/// Install establishment responses whose structural conditions hold.
pub fn evaluate_structural_spawns(
    state: &mut RunState,
    config: &ShiftConfig,
    sink: &mut dyn EventSink,
) {
    let spawns = &config.spawns;
    let t = state.tracks;

    if t.wealth >= spawns.capture_wealth && t.power > t.community && t.tension >= 40 {
        install(state, ModifierKind::EliteCapture, sink);
    }
    if state.structural_pressure >= spawns.distortion_structural {
        install(state, ModifierKind::MediaDistortion, sink);
    }
    if t.tension >= spawns.unrest_tension && state.momentum <= 2 {
        install(state, ModifierKind::SocialUnrest, sink);
    }
}

/// Grow the parasite level from structural pressure, concentrated wealth,
/// and active emergencies, then clamp it to the configured cap.
pub fn parasite_growth(state: &mut RunState, config: &ShiftConfig, sink: &mut dyn EventSink) {
    let before = state.parasite_level;
    let t = state.tracks;
    let mut growth = 0_u32;
    if state.structural_pressure > 10 {
        growth = growth.saturating_add(1);
    }
    if t.wealth > 85 && t.power > t.community {
        growth = growth.saturating_add(1);
    }
    if state.emergency.active {
        growth = growth.saturating_add(1);
    }
    state.parasite_level = state
        .parasite_level
        .saturating_add(growth)
        .min(config.spawns.parasite_cap);
    if state.parasite_level != before {
        sink.record(
            state.round(),
            EventKind::ParasiteGrowth,
            payload!("from" => before, "to" => state.parasite_level),
        );
    }
}

/// Pay capital to strip an institutional modifier.
///
/// Rejections leave state untouched. Success costs `removal_cost` capital,
/// adds `removal_tension` tension, and sheds `removal_parasite_relief`
/// parasite level.
pub fn remove_institutional(
    state: &mut RunState,
    config: &ShiftConfig,
    index: usize,
    sink: &mut dyn EventSink,
) -> RemovalResult {
    let round = state.round();
    let cost = config.economy.removal_cost;
    let rejection = if state.over {
        Some(RemovalRejection::RunOver)
    } else if index >= state.modifiers.institutional.len() {
        Some(RemovalRejection::NoSuchModifier)
    } else if state.capital < cost {
        Some(RemovalRejection::InsufficientCapital {
            required: cost,
            available: state.capital,
        })
    } else {
        None
    };
    if let Some(reason) = rejection {
        sink.record(round, EventKind::RemovalRejected, payload!("index" => index, "reason" => reason));
        return RemovalResult::rejected(reason);
    }

    let removed = state
        .modifiers
        .collection_mut(Lifecycle::Institutional)
        .remove(index);
    state.capital = state.capital.saturating_sub(cost);
    state
        .tracks
        .adjust(TrackName::Tension, config.economy.removal_tension);
    state.parasite_level = state
        .parasite_level
        .saturating_sub(config.economy.removal_parasite_relief);

    info!(round, modifier = removed.kind.label(), "Institutional modifier removed");
    sink.record(
        round,
        EventKind::ModifierRemoved,
        payload!(
            "id" => removed.id,
            "kind" => removed.kind,
            "cost" => cost,
            "tension" => state.tracks.tension,
            "parasite_level" => state.parasite_level,
        ),
    );
    RemovalResult::removed()
}

/// Limits from the base economy plus capital-driven hand sizing, with
/// persistent hooks applied and the hand clamped to its configured range.
pub fn compute_limits(state: &RunState, config: &ShiftConfig) -> Limits {
    let eco = &config.economy;
    let mut hand = signed(eco.base_hand_size);
    if state.capital >= 12 {
        hand = hand.saturating_add(1);
    }
    if state.capital <= 3 {
        hand = hand.saturating_sub(1);
    }
    let mut limits = Limits {
        capital_max: capital_max_for(state.optimism, config),
        max_plays: eco.base_max_plays,
        hand_size: u32::try_from(hand).unwrap_or(0),
    };
    apply_persistent(state, &mut limits);
    limits.hand_size = limits.hand_size.clamp(eco.min_hand_size, eco.max_hand_size);
    limits
}

/// Capital cap implied by optimism: base plus one per ten points above 50,
/// clamped to the configured band.
pub fn capital_max_for(optimism: f64, config: &ShiftConfig) -> u32 {
    let eco = &config.economy;
    let steps = ((optimism - 50.0) / 10.0).floor();
    let raw = f64::from(eco.base_capital_max) + steps;
    let floor = f64::from(eco.capital_max_floor);
    let ceiling = f64::from(eco.capital_max_ceiling);
    let clamped = if raw.is_nan() { floor } else { raw.clamp(floor, ceiling) };
    // The clamp keeps the value inside the u32 band configured above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cap = clamped as u32;
    cap
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::deck::base_deck;
    use crate::events::EventLog;

    fn fresh() -> (RunState, ShiftConfig, EventLog) {
        let config = ShiftConfig::default();
        let state = RunState::new(&config, base_deck()).unwrap();
        (state, config, EventLog::new())
    }

    fn card_titled(title: &str) -> Card {
        base_deck().into_iter().find(|c| c.title == title).unwrap()
    }

    #[test]
    fn install_is_idempotent() {
        let (mut state, _, mut log) = fresh();
        assert!(install(&mut state, ModifierKind::EliteConsolidation, &mut log));
        assert!(!install(&mut state, ModifierKind::EliteConsolidation, &mut log));
        assert_eq!(state.modifiers.institutional.len(), 1);
        assert_eq!(log.of_kind(EventKind::ModifierInstalled).count(), 1);
    }

    #[test]
    fn elite_consolidation_softens_wealth_losses() {
        let (mut state, _, mut log) = fresh();
        install(&mut state, ModifierKind::EliteConsolidation, &mut log);
        let card = card_titled("Wealth Tax");
        let mut effects = card.effects.clone();
        apply_effect_hooks(&state, &card, &mut effects);
        assert_eq!(effects.get(&EffectKey::Wealth), Some(&-1));

        let card = card_titled("Fossil Exit Plan");
        let mut effects = card.effects.clone();
        apply_effect_hooks(&state, &card, &mut effects);
        assert_eq!(effects.get(&EffectKey::Wealth), None);
    }

    #[test]
    fn crackdown_runs_before_risk_boost() {
        // Institutional hooks run first, so the crackdown sees the card's own
        // momentum and the boost lands afterwards untouched.
        let (mut state, _, mut log) = fresh();
        install(&mut state, ModifierKind::RiskBoost, &mut log);
        install(&mut state, ModifierKind::SecurityCrackdown, &mut log);
        let card = card_titled("General Strike");
        let mut effects = card.effects.clone();
        apply_effect_hooks(&state, &card, &mut effects);
        assert_eq!(effects.get(&EffectKey::Momentum), Some(&2));

        let card = card_titled("Fossil Exit Plan");
        let mut effects = card.effects.clone();
        apply_effect_hooks(&state, &card, &mut effects);
        assert_eq!(effects.get(&EffectKey::Momentum), Some(&1));
    }

    #[test]
    fn crackdown_taxes_community_plays() {
        let (mut state, _, mut log) = fresh();
        install(&mut state, ModifierKind::SecurityCrackdown, &mut log);
        apply_played_hooks(&mut state, &card_titled("Local Assembly"));
        assert_eq!(state.tracks.tension, 21);
        apply_played_hooks(&mut state, &card_titled("Tree Cover"));
        assert_eq!(state.tracks.tension, 21);
    }

    #[test]
    fn crisis_fires_then_expires_after_duration() {
        let (mut state, _, mut log) = fresh();
        install(&mut state, ModifierKind::SocialUnrest, &mut log);
        for _ in 0..3 {
            run_round_start(&mut state, &mut log);
        }
        assert!(state.modifiers.crisis.is_empty());
        assert_eq!(state.tracks.wellbeing, 47);
        assert_eq!(state.tracks.community, 47);
        assert_eq!(state.tracks.tension, 23);
        assert_eq!(log.of_kind(EventKind::ModifierExpired).count(), 1);
    }

    #[test]
    fn round_start_runs_institutional_and_movement() {
        let (mut state, _, mut log) = fresh();
        install(&mut state, ModifierKind::MediaDistortion, &mut log);
        install(&mut state, ModifierKind::EliteCapture, &mut log);
        install(&mut state, ModifierKind::MomentumShield, &mut log);
        state.momentum = 2;
        run_round_start(&mut state, &mut log);
        assert_eq!(state.tracks.tension, 21);
        assert_eq!(state.tracks.wealth, 51);
        assert_eq!(state.parasite_level, 1);
        assert_eq!(state.momentum, 3);
    }

    #[test]
    fn shift_unlocks_follow_milestones() {
        let (mut state, _, mut log) = fresh();
        state.shift_progress = 6;
        check_shift_unlocks(&mut state, &mut log);
        assert!(state.modifiers.contains(ModifierKind::ExtraDraw));
        assert!(state.modifiers.contains(ModifierKind::RiskBoost));
        assert!(!state.modifiers.contains(ModifierKind::MomentumShield));
    }

    #[test]
    fn spawns_respect_conditions() {
        let (mut state, config, mut log) = fresh();
        state.tracks.wealth = 90;
        state.tracks.power = 70;
        state.tracks.tension = 75;
        state.structural_pressure = 12;
        evaluate_structural_spawns(&mut state, &config, &mut log);
        assert!(state.modifiers.contains(ModifierKind::EliteCapture));
        assert!(state.modifiers.contains(ModifierKind::MediaDistortion));
        assert!(state.modifiers.contains(ModifierKind::SocialUnrest));
        assert_eq!(state.modifiers.crisis[0].duration, Some(3));
    }

    #[test]
    fn parasite_growth_caps() {
        let (mut state, config, mut log) = fresh();
        state.parasite_level = 49;
        state.structural_pressure = 11;
        state.emergency.active = true;
        parasite_growth(&mut state, &config, &mut log);
        assert_eq!(state.parasite_level, 50);
    }

    #[test]
    fn removal_costs_capital_and_adds_tension() {
        let (mut state, config, mut log) = fresh();
        install(&mut state, ModifierKind::MediaDistortion, &mut log);
        state.parasite_level = 2;
        let result = remove_institutional(&mut state, &config, 0, &mut log);
        assert!(result.removed);
        assert_eq!(state.capital, 5);
        assert_eq!(state.tracks.tension, 23);
        assert_eq!(state.parasite_level, 0);
        assert!(state.modifiers.institutional.is_empty());
    }

    #[test]
    fn removal_rejections_leave_state_alone() {
        let (mut state, config, mut log) = fresh();
        let before = state.clone();
        let result = remove_institutional(&mut state, &config, 0, &mut log);
        assert_eq!(result.reason, Some(RemovalRejection::NoSuchModifier));

        install(&mut state, ModifierKind::MediaDistortion, &mut log);
        state.capital = 4;
        let snapshot = state.clone();
        let result = remove_institutional(&mut state, &config, 0, &mut log);
        assert_eq!(
            result.reason,
            Some(RemovalRejection::InsufficientCapital {
                required: 5,
                available: 4
            })
        );
        assert_eq!(state, snapshot);
        assert_eq!(before.capital, 10);
    }

    #[test]
    fn limits_follow_capital_and_slowdown() {
        let (mut state, config, mut log) = fresh();
        state.optimism = 50.0;
        state.capital = 12;
        let limits = compute_limits(&state, &config);
        assert_eq!(limits.hand_size, 6);
        assert_eq!(limits.capital_max, 15);

        install(&mut state, ModifierKind::BureaucraticSlowdown, &mut log);
        install(&mut state, ModifierKind::ExtraDraw, &mut log);
        state.capital = 2;
        let limits = compute_limits(&state, &config);
        assert_eq!(limits.max_plays, 2);
        assert_eq!(limits.capital_max, 13);
        assert_eq!(limits.hand_size, 5);
    }

    #[test]
    fn capital_max_tracks_optimism() {
        let config = ShiftConfig::default();
        assert_eq!(capital_max_for(50.0, &config), 15);
        assert_eq!(capital_max_for(73.0, &config), 17);
        assert_eq!(capital_max_for(44.0, &config), 14);
        assert_eq!(capital_max_for(500.0, &config), 20);
        assert_eq!(capital_max_for(-500.0, &config), 10);
    }
}
