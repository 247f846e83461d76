//! Headless runner for the System Shift simulation.
//!
//! Plays one seeded run to completion with the greedy strategy and reports
//! the projected outcome. Useful for balance checks and for producing run
//! logs that a renderer can replay.
//!
//! # Startup Sequence
//!
//! 1. Load configuration (`SHIFT_CONFIG`, else `shift-config.yaml`, else
//!    defaults), with environment overrides applied
//! 2. Initialize structured logging (tracing)
//! 3. Load the deck from `run.deck_path`, or use the built-in deck
//! 4. Build the engine and start the run
//! 5. Autoplay until the run ends
//! 6. Log the result and export the run log if configured

mod error;

use std::path::{Path, PathBuf};

use shift_core::ShiftEngine;
use shift_core::autoplay::{self, RoundCallback};
use shift_core::config::ShiftConfig;
use shift_core::deck;
use shift_core::round::RoundSummary;
use shift_core::state::RunState;
use shift_core::strategy::GreedyStrategy;
use shift_types::Card;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Upper bound on autoplay commands. A ten-round run needs well under a
/// hundred.
const MAX_STEPS: u32 = 1_000;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "shift-config.yaml";

/// Logs one line per finished round.
struct RoundLogger;

impl RoundCallback for RoundLogger {
    fn on_round(&mut self, summary: &RoundSummary, state: &RunState) {
        info!(
            round = summary.entry.round,
            label = ?summary.entry.label,
            capital = state.capital,
            momentum = state.momentum,
            structural = state.structural_pressure,
            entropy = state.entropy,
            cri = summary.entry.crisis_risk,
            "Round closed"
        );
    }
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, deck loading, or run log export fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config);
    info!("shift-engine starting");
    info!(
        source = %source,
        seed = %config.run.seed,
        max_rounds = config.run.max_rounds,
        "Configuration loaded"
    );

    // 3. Load the deck.
    let cards = load_cards(&config)?;
    info!(deck_size = cards.len(), "Deck loaded");

    // 4. Build the engine.
    let run_log_path = config.logging.run_log_path.clone();
    let mut engine = ShiftEngine::new(config, cards).map_err(EngineError::from)?;

    // 5. Play.
    let result = autoplay::run_to_completion(
        &mut engine,
        &mut GreedyStrategy::new(),
        &mut RoundLogger,
        MAX_STEPS,
    );

    // 6. Report and export.
    autoplay::log_autoplay_end(&result);
    if let Some(path) = run_log_path {
        export_run_log(&engine, Path::new(&path))?;
        info!(path = %path, events = engine.events().len(), "Run log written");
    }

    info!("shift-engine shutdown complete");
    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over `logging.level`.
fn init_tracing(config: &ShiftConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Locate and load configuration. Returns the config and where it came from.
fn load_config() -> Result<(ShiftConfig, String), EngineError> {
    let config_path = std::env::var("SHIFT_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if config_path.exists() {
        let config = ShiftConfig::from_file(&config_path)?;
        Ok((config, config_path.display().to_string()))
    } else {
        let mut config = ShiftConfig::default();
        config.apply_env_overrides();
        Ok((config, String::from("defaults")))
    }
}

/// The configured deck file, or the built-in deck.
fn load_cards(config: &ShiftConfig) -> Result<Vec<Card>, EngineError> {
    match &config.run.deck_path {
        Some(path) => Ok(deck::load_deck(Path::new(path))?),
        None => Ok(deck::base_deck()),
    }
}

/// Write the run log as pretty JSON, creating parent directories.
fn export_run_log(engine: &ShiftEngine, path: &Path) -> Result<(), EngineError> {
    let encoded = serde_json::to_string_pretty(&engine.run_log())?;
    let export_err = |source: std::io::Error| EngineError::Export {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(export_err)?;
    }
    std::fs::write(path, encoded).map_err(export_err)?;
    Ok(())
}
