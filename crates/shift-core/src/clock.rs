//! Round clock for a run.
//!
//! Rounds are 1-based. The clock advances once per round end, and the run
//! is terminal once the counter has moved past `max_rounds`: with
//! `max_rounds = 10`, the tenth round end leaves the counter at 11.

use serde::Serialize;

/// Errors that can occur when building a clock.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// A run needs at least one round.
    #[error("invalid round configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// Round counter plus the terminal boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundClock {
    round: u32,
    max_rounds: u32,
}

impl RoundClock {
    /// Create a clock at round 1.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `max_rounds` is 0.
    pub fn new(max_rounds: u32) -> Result<Self, ClockError> {
        if max_rounds == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "max_rounds must be at least 1".to_owned(),
            });
        }
        Ok(Self {
            round: 1,
            max_rounds,
        })
    }

    /// Advance by one round. Returns the new round number.
    pub const fn advance(&mut self) -> u32 {
        self.round = self.round.saturating_add(1);
        self.round
    }

    /// Current round.
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Last playable round.
    pub const fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// Whether the counter has moved past the last playable round.
    pub const fn is_past_end(&self) -> bool {
        self.round > self.max_rounds
    }

    /// Rounds left to play, counting the current one.
    pub const fn rounds_remaining(&self) -> u32 {
        self.max_rounds
            .saturating_add(1)
            .saturating_sub(self.round)
    }
}

impl Default for RoundClock {
    fn default() -> Self {
        Self {
            round: 1,
            max_rounds: 10,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_round_one() {
        let clock = RoundClock::new(10).unwrap();
        assert_eq!(clock.round(), 1);
        assert_eq!(clock.rounds_remaining(), 10);
        assert!(!clock.is_past_end());
    }

    #[test]
    fn terminal_after_max_rounds_advances() {
        let mut clock = RoundClock::new(10).unwrap();
        for _ in 0..9 {
            clock.advance();
        }
        assert_eq!(clock.round(), 10);
        assert!(!clock.is_past_end());
        assert_eq!(clock.advance(), 11);
        assert!(clock.is_past_end());
        assert_eq!(clock.rounds_remaining(), 0);
    }

    #[test]
    fn zero_rounds_rejected() {
        assert!(RoundClock::new(0).is_err());
    }
}
