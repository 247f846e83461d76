//! Construction-time errors for the engine.
//!
//! Rejected plays and removals are values, not errors. Only content and
//! configuration problems reach this type.

/// Failure to build or restart a [`ShiftEngine`](crate::engine::ShiftEngine).
#[derive(Debug, thiserror::Error)]
pub enum ShiftError {
    /// Configuration failed validation.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// The deck is unusable.
    #[error("deck error: {source}")]
    Deck {
        /// The underlying deck error.
        #[from]
        source: crate::deck::DeckError,
    },

    /// The round clock rejected its bounds.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: crate::clock::ClockError,
    },
}
