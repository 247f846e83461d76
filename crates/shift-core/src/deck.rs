//! Card pool, seeded shuffles, and draw-with-reshuffle.
//!
//! The draw pile's top is the end of its vector. When the pile runs dry the
//! discard pile is shuffled back in; when both are empty the draw yields
//! nothing and the hand simply stays short.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use shift_types::{Card, CardId, EffectKey, EffectMap, EventKind, Risk, Suit};
use tracing::debug;

use crate::events::{EventSink, payload};
use crate::rng::ShiftRng;
use crate::state::RunState;

/// Errors in deck content.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    /// The deck has no cards.
    #[error("deck is empty")]
    Empty,

    /// Two cards share an id.
    #[error("duplicate card id {id}")]
    DuplicateId {
        /// The repeated id.
        id: CardId,
    },

    /// A card names an effect target that does not exist.
    #[error("card {card} has unknown effect key {key:?}")]
    UnknownEffectKey {
        /// The offending card.
        card: CardId,
        /// The unrecognized key.
        key: String,
    },

    /// Failed to read the deck file.
    #[error("failed to read deck file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse deck YAML.
    #[error("failed to parse deck YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for DeckError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// A card as written in a deck file. Effect keys stay raw until validated.
#[derive(Debug, Deserialize)]
struct CardSpec {
    id: u32,
    suit: Suit,
    title: String,
    #[serde(default)]
    effects: BTreeMap<String, i32>,
    cost: u32,
    #[serde(default)]
    risk: Option<Risk>,
}

impl CardSpec {
    fn into_card(self) -> Result<Card, DeckError> {
        let id = CardId(self.id);
        let mut effects = EffectMap::new();
        for (key, delta) in self.effects {
            let parsed = key
                .parse::<EffectKey>()
                .map_err(|_err| DeckError::UnknownEffectKey { card: id, key })?;
            effects.insert(parsed, delta);
        }
        Ok(Card {
            id,
            suit: self.suit,
            title: self.title,
            effects,
            cost: self.cost,
            risk: self.risk,
        })
    }
}

/// Parse and validate a deck from YAML (a sequence of cards).
///
/// # Errors
///
/// Returns [`DeckError`] for malformed YAML, unknown effect keys, an empty
/// deck, or duplicate ids.
pub fn parse_deck(yaml: &str) -> Result<Vec<Card>, DeckError> {
    let specs: Vec<CardSpec> = serde_yml::from_str(yaml)?;
    let cards = specs
        .into_iter()
        .map(CardSpec::into_card)
        .collect::<Result<Vec<_>, _>>()?;
    validate_deck(&cards)?;
    Ok(cards)
}

/// Load a deck file.
///
/// # Errors
///
/// Returns [`DeckError::Io`] if the file cannot be read, or any error
/// from [`parse_deck`].
pub fn load_deck(path: &Path) -> Result<Vec<Card>, DeckError> {
    let contents = std::fs::read_to_string(path)?;
    parse_deck(&contents)
}

/// Check that a deck is playable: non-empty with unique ids.
///
/// # Errors
///
/// Returns [`DeckError::Empty`] or [`DeckError::DuplicateId`].
pub fn validate_deck(cards: &[Card]) -> Result<(), DeckError> {
    if cards.is_empty() {
        return Err(DeckError::Empty);
    }
    let mut seen = BTreeSet::new();
    for card in cards {
        if !seen.insert(card.id) {
            return Err(DeckError::DuplicateId { id: card.id });
        }
    }
    Ok(())
}

fn card(id: u32, suit: Suit, title: &str, effects: &[(EffectKey, i32)], risk: Risk, cost: u32) -> Card {
    Card {
        id: CardId(id),
        suit,
        title: title.to_owned(),
        effects: effects.iter().copied().collect(),
        cost,
        risk: Some(risk),
    }
}

/// The built-in 15-card policy deck: three cards per suit at rising risk.
pub fn base_deck() -> Vec<Card> {
    use EffectKey::{Community, Momentum, Planet, Power, Tension, Wealth, Wellbeing};
    vec![
        card(1, Suit::Wellbeing, "Public Clinic", &[(Wellbeing, 2)], Risk::Low, 1),
        card(2, Suit::Wellbeing, "Universal Benefit", &[(Wellbeing, 3), (Tension, 1)], Risk::Medium, 2),
        card(
            3,
            Suit::Wellbeing,
            "Universal Healthcare",
            &[(Wellbeing, 4), (Tension, 2), (Momentum, 1)],
            Risk::High,
            3,
        ),
        card(4, Suit::Planet, "Tree Cover", &[(Planet, 2)], Risk::Low, 1),
        card(5, Suit::Planet, "Public Transit", &[(Planet, 3), (Tension, 1)], Risk::Medium, 2),
        card(
            6,
            Suit::Planet,
            "Fossil Exit Plan",
            &[(Planet, 4), (Tension, 2), (Wealth, -1)],
            Risk::High,
            3,
        ),
        card(7, Suit::Community, "Local Assembly", &[(Community, 2)], Risk::Low, 1),
        card(8, Suit::Community, "Labor Rights", &[(Community, 3), (Tension, 1)], Risk::Medium, 2),
        card(
            9,
            Suit::Community,
            "General Strike",
            &[(Community, 4), (Tension, 2), (Momentum, 2)],
            Risk::High,
            3,
        ),
        card(10, Suit::Power, "Oversight Reform", &[(Power, 2)], Risk::Low, 1),
        card(
            11,
            Suit::Power,
            "Progressive Tax",
            &[(Power, 2), (Wealth, -1), (Tension, 1)],
            Risk::Medium,
            2,
        ),
        card(
            12,
            Suit::Power,
            "Wealth Tax",
            &[(Power, 3), (Wealth, -2), (Tension, 2)],
            Risk::High,
            3,
        ),
        card(13, Suit::Wealth, "Public Investment", &[(Wealth, 2), (Planet, 1)], Risk::Low, 1),
        card(
            14,
            Suit::Wealth,
            "Market Deregulation",
            &[(Wealth, 3), (Power, 1), (Tension, 1)],
            Risk::Medium,
            2,
        ),
        card(
            15,
            Suit::Wealth,
            "Privatization Drive",
            &[(Wealth, 4), (Power, 2), (Tension, 2), (Community, -1)],
            Risk::High,
            3,
        ),
    ]
}

/// Shuffle `cards` into a new pile and record it.
pub fn shuffle_pile(
    cards: &[Card],
    rng: &mut ShiftRng,
    sink: &mut dyn EventSink,
    round: u32,
) -> Vec<Card> {
    let pile = rng.shuffle(cards);
    sink.record(round, EventKind::DeckShuffled, payload!("size" => pile.len()));
    pile
}

/// Draw the top card, recycling the discard pile if the draw pile is empty.
pub fn draw(state: &mut RunState, rng: &mut ShiftRng, sink: &mut dyn EventSink) -> Option<Card> {
    let round = state.round();
    if state.deck.is_empty() {
        if state.discard.is_empty() {
            debug!(round, "Deck and discard exhausted");
            return None;
        }
        let recycled = std::mem::take(&mut state.discard);
        state.deck = shuffle_pile(&recycled, rng, sink, round);
        sink.record(round, EventKind::DeckReshuffled, payload!("size" => state.deck.len()));
    }
    let card = state.deck.pop()?;
    sink.record(
        round,
        EventKind::CardDrawn,
        payload!("card_id" => card.id, "title" => card.title),
    );
    Some(card)
}

/// Fill the hand up to `hand_size`. Returns how many cards were drawn.
pub fn deal_hand(state: &mut RunState, rng: &mut ShiftRng, sink: &mut dyn EventSink) -> usize {
    let target = usize::try_from(state.hand_size).unwrap_or(usize::MAX);
    let mut drawn = 0_usize;
    while state.hand.len() < target {
        let Some(card) = draw(state, rng, sink) else {
            break;
        };
        state.hand.push(card);
        drawn = drawn.saturating_add(1);
    }
    sink.record(
        state.round(),
        EventKind::HandDrawn,
        payload!("drawn" => drawn, "hand" => state.hand.len(), "hand_size" => state.hand_size),
    );
    drawn
}
