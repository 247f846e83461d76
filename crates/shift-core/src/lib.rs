//! Round cycle, structural dynamics, and outcome projection for the System
//! Shift simulation.
//!
//! This crate owns everything that happens during a run: card play, the
//! end-of-round structural pass, and the final projection. It is
//! single-threaded and fully deterministic for a given seed.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `shift-config.yaml` into
//!   strongly-typed structs.
//! - [`rng`] -- Seeded PCG stream and Fisher-Yates shuffle.
//! - [`clock`] -- Round counter and the terminal boundary.
//! - [`state`] -- The mutable [`RunState`] aggregate.
//! - [`events`] -- [`EventSink`] and the in-memory [`EventLog`].
//! - [`deck`] -- Card pool, deck files, draw with reshuffle.
//! - [`resolution`] -- Card play validation and resolution.
//! - [`modifiers`] -- Modifier catalog, hooks, installs, and removal.
//! - [`pressure`] -- Threshold scan, reveal, and the resistance machine.
//! - [`entropy`] -- Imbalance and entropy accounting.
//! - [`emergency`] -- Emergency trigger, scoring, and resolution.
//! - [`risk`] -- The report-only crisis risk index.
//! - [`commentary`] -- Narrative signals recorded in the event log.
//! - [`round`] -- The end-of-round pass.
//! - [`outcome`] -- Indices, direction, narrative, and closing question.
//! - [`engine`] -- [`ShiftEngine`], the facade collaborators drive.
//! - [`strategy`] -- [`Strategy`] trait with passive and greedy players.
//! - [`autoplay`] -- Bounded runner that pairs an engine with a strategy.
//!
//! [`RunState`]: state::RunState
//! [`EventSink`]: events::EventSink
//! [`EventLog`]: events::EventLog
//! [`ShiftEngine`]: engine::ShiftEngine
//! [`Strategy`]: strategy::Strategy

pub mod autoplay;
pub mod clock;
pub mod commentary;
pub mod config;
pub mod deck;
pub mod emergency;
pub mod engine;
pub mod entropy;
pub mod error;
pub mod events;
pub mod modifiers;
pub mod outcome;
pub mod pressure;
pub mod resolution;
pub mod risk;
pub mod rng;
pub mod round;
pub mod state;
pub mod strategy;

pub use engine::ShiftEngine;
pub use error::ShiftError;
