//! Type-safe identifier wrappers around `u32`.
//!
//! Cards and modifier instances carry distinct ID types so they cannot be
//! mixed up at compile time. Card ids come from deck content; modifier ids
//! are allocated monotonically per run by the engine, which keeps them
//! reproducible from the seed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around `u32` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub u32);

        impl $name {
            /// Return the inner numeric value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a policy card, unique within one run's deck.
    CardId
);

define_id!(
    /// Identifier of an installed modifier instance.
    ModifierId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_numbers() {
        let json = serde_json::to_string(&CardId(6)).ok();
        assert_eq!(json.as_deref(), Some("6"));
        let restored: Result<ModifierId, _> = serde_json::from_str("12");
        assert_eq!(restored.ok(), Some(ModifierId(12)));
    }

    #[test]
    fn id_display_matches_inner() {
        let id = CardId::from(15);
        assert_eq!(id.to_string(), "15");
        assert_eq!(u32::from(id), id.into_inner());
    }
}
