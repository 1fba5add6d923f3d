//! Capped exponential backoff

use std::time::Duration;

use crate::config::PollConfig;

/// Delay sequence for one poll session
///
/// Each call to [`Backoff::advance`] multiplies the current delay and clamps
/// it to `[initial_delay, max_delay]`, so the sequence never decreases and
/// never exceeds the ceiling.
#[derive(Debug, Clone)]
pub struct Backoff {
    current: Duration,
    min: Duration,
    max: Duration,
    multiplier: f64,
}

impl Backoff {
    /// Start a sequence at `initial_delay`
    ///
    /// A ceiling below the floor is raised to the floor, so a config that
    /// skipped [`PollConfig::validate`] yields a flat sequence.
    pub fn new(config: &PollConfig) -> Self {
        let min = config.initial_delay;
        Self {
            current: min,
            min,
            max: config.max_delay.max(min),
            multiplier: config.backoff_multiplier,
        }
    }

    /// Current delay without advancing
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Grow the delay and return the new value
    pub fn advance(&mut self) -> Duration {
        let grown = Duration::try_from_secs_f64(self.current.as_secs_f64() * self.multiplier)
            .unwrap_or(self.max);
        self.current = grown.clamp(self.min, self.max);
        self.current
    }
}
