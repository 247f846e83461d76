//! Policy cards.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::CardId;
use crate::tracks::{EffectMap, TrackName};

/// The policy area a card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Suit {
    /// Health and welfare policy.
    Wellbeing,
    /// Environmental policy.
    Planet,
    /// Organizing and civic policy.
    Community,
    /// Institutional and fiscal policy.
    Power,
    /// Market and investment policy.
    Wealth,
    /// Cross-cutting system cards with no track of their own.
    System,
}

impl Suit {
    /// The track a suit is named after, if any.
    pub const fn track(self) -> Option<TrackName> {
        match self {
            Self::Wellbeing => Some(TrackName::Wellbeing),
            Self::Planet => Some(TrackName::Planet),
            Self::Community => Some(TrackName::Community),
            Self::Power => Some(TrackName::Power),
            Self::Wealth => Some(TrackName::Wealth),
            Self::System => None,
        }
    }

    /// Whether playing this suit builds movement momentum and shift progress.
    pub const fn builds_movement(self) -> bool {
        matches!(self, Self::Power | Self::Community)
    }
}

/// Declared risk tier of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Risk {
    /// Cheap, small effect.
    Low,
    /// Moderate effect with some tension.
    Medium,
    /// Large effect, costly, provokes tension.
    High,
}

/// A playable policy card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Card {
    /// Unique id within the run.
    pub id: CardId,
    /// Policy area.
    pub suit: Suit,
    /// Display title.
    pub title: String,
    /// Declared deltas before modifier hooks.
    pub effects: EffectMap,
    /// Political capital required to play.
    pub cost: u32,
    /// Optional risk tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<Risk>,
}

impl Card {
    /// Whether the card is tagged high risk.
    pub fn is_high_risk(&self) -> bool {
        self.risk == Some(Risk::High)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_suit_has_no_track_and_builds_nothing() {
        assert_eq!(Suit::System.track(), None);
        assert!(!Suit::System.builds_movement());
        assert_eq!(Suit::Planet.track(), Some(TrackName::Planet));
        assert!(Suit::Community.builds_movement());
    }

    #[test]
    fn system_suit_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Suit::System).unwrap_or_default(), "\"system\"");
    }
}
