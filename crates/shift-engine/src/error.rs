//! Error types for the runner binary.
//!
//! [`EngineError`] wraps every failure mode during startup and export so
//! `main` can propagate with `?`.

/// Top-level error for the runner binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: shift_core::config::ConfigError,
    },

    /// The deck file could not be loaded.
    #[error("deck error: {source}")]
    Deck {
        /// The underlying deck error.
        #[from]
        source: shift_core::deck::DeckError,
    },

    /// The engine rejected its configuration or content.
    #[error("engine error: {source}")]
    Shift {
        /// The underlying engine error.
        #[from]
        source: shift_core::ShiftError,
    },

    /// Serializing the run log failed.
    #[error("run log encoding failed: {source}")]
    Encode {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Writing the run log failed.
    #[error("failed to write run log to {path}: {source}")]
    Export {
        /// Destination path.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
