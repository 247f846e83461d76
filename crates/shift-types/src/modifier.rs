//! Modifier ("joker") records.
//!
//! Only the data lives here. Hook behavior is resolved from
//! [`ModifierKind`] by the core crate, so these types stay plain and
//! serializable for snapshots.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::ModifierId;

/// Which collection a modifier lives in. Determines hook order and expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Lifecycle {
    /// Player-side bonuses unlocked by shift progress or emergencies.
    Movement,
    /// Establishment pushback installed by resistance and spawns.
    Institutional,
    /// Temporary shocks with a finite duration.
    Crisis,
}

/// Every modifier the engine knows how to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ModifierKind {
    /// Hand size +1.
    ExtraDraw,
    /// High-risk cards gain momentum.
    RiskBoost,
    /// Momentum tops itself up while positive.
    MomentumShield,
    /// Momentum +1 every round; granted after a successful emergency.
    SolidarityNetworks,
    /// Wealth losses are blunted and wealth creeps up.
    EliteConsolidation,
    /// Fewer plays and a lower capital cap.
    BureaucraticSlowdown,
    /// Momentum gains shrink; community actions provoke tension.
    SecurityCrackdown,
    /// Tension creeps up every round.
    MediaDistortion,
    /// Parasite level and wealth creep up every round.
    EliteCapture,
    /// Crisis shock eroding wellbeing and community.
    SocialUnrest,
}

impl ModifierKind {
    /// The collection this kind is installed into.
    pub const fn lifecycle(self) -> Lifecycle {
        match self {
            Self::ExtraDraw | Self::RiskBoost | Self::MomentumShield | Self::SolidarityNetworks => {
                Lifecycle::Movement
            }
            Self::EliteConsolidation
            | Self::BureaucraticSlowdown
            | Self::SecurityCrackdown
            | Self::MediaDistortion
            | Self::EliteCapture => Lifecycle::Institutional,
            Self::SocialUnrest => Lifecycle::Crisis,
        }
    }

    /// Number of round starts a crisis lasts; `None` for persistent kinds.
    pub const fn default_duration(self) -> Option<u32> {
        match self {
            Self::SocialUnrest => Some(3),
            _ => None,
        }
    }

    /// The institutional response resistance installs against this movement kind.
    pub const fn countermeasure(self) -> Option<Self> {
        match self {
            Self::ExtraDraw => Some(Self::BureaucraticSlowdown),
            Self::RiskBoost => Some(Self::SecurityCrackdown),
            Self::MomentumShield => Some(Self::MediaDistortion),
            _ => None,
        }
    }

    /// Display name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ExtraDraw => "Extra Draw",
            Self::RiskBoost => "Risk Boost",
            Self::MomentumShield => "Momentum Shield",
            Self::SolidarityNetworks => "Solidarity Networks",
            Self::EliteConsolidation => "Elite Consolidation",
            Self::BureaucraticSlowdown => "Bureaucratic Slowdown",
            Self::SecurityCrackdown => "Security Crackdown",
            Self::MediaDistortion => "Media Distortion",
            Self::EliteCapture => "Elite Capture",
            Self::SocialUnrest => "Social Unrest",
        }
    }
}

/// An installed modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ModifierInstance {
    /// Run-unique instance id.
    pub id: ModifierId,
    /// What the modifier does.
    pub kind: ModifierKind,
    /// Collection it belongs to.
    pub lifecycle: Lifecycle,
    /// Remaining round starts for crisis modifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

/// The three modifier collections, each kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ModifierSet {
    /// Movement modifiers.
    pub movement: Vec<ModifierInstance>,
    /// Institutional modifiers.
    pub institutional: Vec<ModifierInstance>,
    /// Crisis modifiers.
    pub crisis: Vec<ModifierInstance>,
}

impl ModifierSet {
    /// The collection for a lifecycle.
    pub const fn collection(&self, lifecycle: Lifecycle) -> &Vec<ModifierInstance> {
        match lifecycle {
            Lifecycle::Movement => &self.movement,
            Lifecycle::Institutional => &self.institutional,
            Lifecycle::Crisis => &self.crisis,
        }
    }

    /// Mutable collection for a lifecycle.
    pub const fn collection_mut(&mut self, lifecycle: Lifecycle) -> &mut Vec<ModifierInstance> {
        match lifecycle {
            Lifecycle::Movement => &mut self.movement,
            Lifecycle::Institutional => &mut self.institutional,
            Lifecycle::Crisis => &mut self.crisis,
        }
    }

    /// Whether an instance of `kind` is installed.
    pub fn contains(&self, kind: ModifierKind) -> bool {
        self.collection(kind.lifecycle())
            .iter()
            .any(|m| m.kind == kind)
    }

    /// Total installed instances.
    pub fn len(&self) -> usize {
        self.movement
            .len()
            .saturating_add(self.institutional.len())
            .saturating_add(self.crisis.len())
    }

    /// Whether no modifiers are installed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
