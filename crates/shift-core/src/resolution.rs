//! Card resolution.
//!
//! Preconditions are checked before anything changes, in this order: run
//! not over, plays remaining, card present, capital sufficient. A rejected
//! play is recorded and returned as a value.
//!
//! An accepted play then runs:
//!
//! 1. Deduct cost.
//! 2. Copy declared effects and run `on_card_effects_computed` hooks.
//! 3. Apply deltas (momentum floors at 0; tracks are unclamped).
//! 4. Run `on_card_played` hooks.
//! 5. Move the card to discard and count the play.
//! 6. Power and community suits build momentum and shift progress, which
//!    may unlock movement modifiers.
//! 7. Threshold scan, reveal check, emergency trigger check, commentary.

use shift_types::{EventKind, PlayResult, RejectReason};
use tracing::debug;

use crate::commentary;
use crate::config::ShiftConfig;
use crate::emergency;
use crate::events::{EventSink, payload};
use crate::modifiers;
use crate::pressure;
use crate::rng::ShiftRng;
use crate::state::RunState;

/// Check every precondition without touching state.
pub fn validate_play(state: &RunState, index: usize) -> Result<(), RejectReason> {
    if state.over {
        return Err(RejectReason::RunOver);
    }
    if state.plays_this_round >= state.max_plays {
        return Err(RejectReason::NoPlaysRemaining);
    }
    let card = state.hand.get(index).ok_or(RejectReason::NoSuchCard)?;
    if state.capital < card.cost {
        return Err(RejectReason::InsufficientCapital {
            required: card.cost,
            available: state.capital,
        });
    }
    Ok(())
}

/// Play the card at `index` in the hand.
pub fn play_card(
    state: &mut RunState,
    config: &ShiftConfig,
    index: usize,
    rng: &mut ShiftRng,
    sink: &mut dyn EventSink,
) -> PlayResult {
    let round = state.round();
    if let Err(reason) = validate_play(state, index) {
        debug!(round, index, ?reason, "Play rejected");
        sink.record(round, EventKind::PlayRejected, payload!("index" => index, "reason" => reason));
        return PlayResult::rejected(reason);
    }

    // Validated above, so the index is in range.
    let card = state.hand.remove(index);

    // 1. Cost
    state.capital = state.capital.saturating_sub(card.cost);
    sink.record(
        round,
        EventKind::CardPlayed,
        payload!(
            "card_id" => card.id,
            "title" => card.title,
            "suit" => card.suit,
            "cost" => card.cost,
            "capital" => state.capital,
        ),
    );

    // 2. Effects through hooks
    let mut effects = card.effects.clone();
    modifiers::apply_effect_hooks(state, &card, &mut effects);

    // 3. Apply
    for (&key, &delta) in &effects {
        match key.track() {
            Some(track) => state.tracks.adjust(track, delta),
            None => state.adjust_momentum(delta),
        }
    }
    sink.record(
        round,
        EventKind::EffectsApplied,
        payload!("card_id" => card.id, "effects" => effects, "tracks" => state.tracks),
    );

    // 4. Post-play hooks
    modifiers::apply_played_hooks(state, &card);

    // 5. Discard
    state.plays_this_round = state.plays_this_round.saturating_add(1);

    // 6. Movement building
    if card.suit.builds_movement() {
        state.momentum = state.momentum.saturating_add(1);
        state.shift_progress = state.shift_progress.saturating_add(1);
        modifiers::check_shift_unlocks(state, sink);
    }

    // 7. Signals
    pressure::scan_thresholds(state, config, sink);
    pressure::check_reveal(state, config, sink);
    emergency::check_trigger(state, config, sink);
    commentary::on_card_played(state, &card, rng, sink);

    debug!(
        round,
        card = %card.title,
        capital = state.capital,
        plays = state.plays_this_round,
        "Card resolved"
    );
    state.discard.push(card);
    PlayResult::applied()
}
