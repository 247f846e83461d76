//! The six societal tracks and the keys a card effect may target.
//!
//! Tracks are signed and unclamped: a value above 100 is an overflow and a
//! value below 20 feeds the collapse accounting of the entropy engine. No
//! code in the workspace clamps them.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One of the six bounded-by-convention tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum TrackName {
    /// Material and physical wellbeing of the population.
    Wellbeing,
    /// Ecological health.
    Planet,
    /// Social cohesion and organized civic life.
    Community,
    /// Concentration of institutional power.
    Power,
    /// Concentration of private wealth.
    Wealth,
    /// Accumulated social tension.
    Tension,
}

impl TrackName {
    /// All tracks in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Wellbeing,
        Self::Planet,
        Self::Community,
        Self::Power,
        Self::Wealth,
        Self::Tension,
    ];

    /// The five societal tracks (everything except tension), canonical order.
    pub const SOCIETAL: [Self; 5] = [
        Self::Wellbeing,
        Self::Planet,
        Self::Community,
        Self::Power,
        Self::Wealth,
    ];

    /// Lowercase name as used in content files and the event log.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wellbeing => "wellbeing",
            Self::Planet => "planet",
            Self::Community => "community",
            Self::Power => "power",
            Self::Wealth => "wealth",
            Self::Tension => "tension",
        }
    }
}

impl fmt::Display for TrackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current value of every track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Tracks {
    /// Wellbeing track.
    pub wellbeing: i32,
    /// Planet track.
    pub planet: i32,
    /// Community track.
    pub community: i32,
    /// Power track.
    pub power: i32,
    /// Wealth track.
    pub wealth: i32,
    /// Tension track.
    pub tension: i32,
}

impl Tracks {
    /// Read a single track.
    pub const fn get(&self, name: TrackName) -> i32 {
        match name {
            TrackName::Wellbeing => self.wellbeing,
            TrackName::Planet => self.planet,
            TrackName::Community => self.community,
            TrackName::Power => self.power,
            TrackName::Wealth => self.wealth,
            TrackName::Tension => self.tension,
        }
    }

    /// Mutable access to a single track.
    pub const fn get_mut(&mut self, name: TrackName) -> &mut i32 {
        match name {
            TrackName::Wellbeing => &mut self.wellbeing,
            TrackName::Planet => &mut self.planet,
            TrackName::Community => &mut self.community,
            TrackName::Power => &mut self.power,
            TrackName::Wealth => &mut self.wealth,
            TrackName::Tension => &mut self.tension,
        }
    }

    /// Add `delta` to a track (saturating at the `i32` range).
    pub fn adjust(&mut self, name: TrackName, delta: i32) {
        let slot = self.get_mut(name);
        *slot = slot.saturating_add(delta);
    }
}

/// A key in a card's effect map: a track, or momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EffectKey {
    /// Targets [`TrackName::Wellbeing`].
    Wellbeing,
    /// Targets [`TrackName::Planet`].
    Planet,
    /// Targets [`TrackName::Community`].
    Community,
    /// Targets [`TrackName::Power`].
    Power,
    /// Targets [`TrackName::Wealth`].
    Wealth,
    /// Targets [`TrackName::Tension`].
    Tension,
    /// Targets the momentum resource rather than a track.
    Momentum,
}

impl EffectKey {
    /// The track this key targets, or `None` for momentum.
    pub const fn track(self) -> Option<TrackName> {
        match self {
            Self::Wellbeing => Some(TrackName::Wellbeing),
            Self::Planet => Some(TrackName::Planet),
            Self::Community => Some(TrackName::Community),
            Self::Power => Some(TrackName::Power),
            Self::Wealth => Some(TrackName::Wealth),
            Self::Tension => Some(TrackName::Tension),
            Self::Momentum => None,
        }
    }

    /// Lowercase name as used in content files.
    pub const fn as_str(self) -> &'static str {
        match self.track() {
            Some(track) => track.as_str(),
            None => "momentum",
        }
    }
}

impl From<TrackName> for EffectKey {
    fn from(track: TrackName) -> Self {
        match track {
            TrackName::Wellbeing => Self::Wellbeing,
            TrackName::Planet => Self::Planet,
            TrackName::Community => Self::Community,
            TrackName::Power => Self::Power,
            TrackName::Wealth => Self::Wealth,
            TrackName::Tension => Self::Tension,
        }
    }
}

/// An effect key string that names neither a track nor momentum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown effect key: {0}")]
pub struct UnknownEffectKey(pub String);

impl FromStr for EffectKey {
    type Err = UnknownEffectKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "momentum" {
            return Ok(Self::Momentum);
        }
        TrackName::ALL
            .into_iter()
            .find(|track| track.as_str() == s)
            .map(Self::from)
            .ok_or_else(|| UnknownEffectKey(s.to_owned()))
    }
}

/// Signed deltas a card applies, keyed by target. Ordered for stable replay.
pub type EffectMap = BTreeMap<EffectKey, i32>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_keys_parse_strictly() {
        assert_eq!("planet".parse::<EffectKey>(), Ok(EffectKey::Planet));
        assert_eq!("momentum".parse::<EffectKey>(), Ok(EffectKey::Momentum));
        assert_eq!(
            "happiness".parse::<EffectKey>(),
            Err(UnknownEffectKey(String::from("happiness")))
        );
    }

    #[test]
    fn adjust_allows_overflow_and_negatives() {
        let mut tracks = Tracks {
            wellbeing: 50,
            planet: 50,
            community: 50,
            power: 50,
            wealth: 98,
            tension: 20,
        };
        tracks.adjust(TrackName::Wealth, 5);
        tracks.adjust(TrackName::Tension, -25);
        assert_eq!(tracks.wealth, 103);
        assert_eq!(tracks.tension, -5);
    }

    #[test]
    fn momentum_has_no_track() {
        assert_eq!(EffectKey::Momentum.track(), None);
        assert_eq!(EffectKey::from(TrackName::Power).track(), Some(TrackName::Power));
    }
}
