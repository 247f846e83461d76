//! Results of player operations.
//!
//! A rejected play or removal is an ordinary value, not an error: the caller
//! inspects `applied` and the reason, and state is left untouched.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Why a card play was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RejectReason {
    /// The run has ended.
    RunOver,
    /// The play allowance for this round is used up.
    NoPlaysRemaining,
    /// No card at the requested hand index.
    NoSuchCard,
    /// The card costs more than the available capital.
    InsufficientCapital {
        /// Cost of the card.
        required: u32,
        /// Capital on hand.
        available: u32,
    },
}

/// Outcome of a play request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayResult {
    /// Whether the card was resolved.
    pub applied: bool,
    /// Set when `applied` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,
}

impl PlayResult {
    /// A successful play.
    pub const fn applied() -> Self {
        Self {
            applied: true,
            reason: None,
        }
    }

    /// A refused play.
    pub const fn rejected(reason: RejectReason) -> Self {
        Self {
            applied: false,
            reason: Some(reason),
        }
    }
}

/// Why a modifier removal was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RemovalRejection {
    /// The run has ended.
    RunOver,
    /// No institutional modifier at the requested index.
    NoSuchModifier,
    /// Removal costs more than the available capital.
    InsufficientCapital {
        /// Removal cost.
        required: u32,
        /// Capital on hand.
        available: u32,
    },
}

/// Outcome of a removal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RemovalResult {
    /// Whether a modifier was removed.
    pub removed: bool,
    /// Set when `removed` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<RemovalRejection>,
}

impl RemovalResult {
    /// A successful removal.
    pub const fn removed() -> Self {
        Self {
            removed: true,
            reason: None,
        }
    }

    /// A refused removal.
    pub const fn rejected(reason: RemovalRejection) -> Self {
        Self {
            removed: false,
            reason: Some(reason),
        }
    }
}
