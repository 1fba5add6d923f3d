//! Poller configuration
//!
//! Defines the backoff and error-tolerance parameters of the job poller.
//! Values are a deployment choice; the defaults keep a single watch at
//! one request every 10 to 30 seconds.

use std::time::Duration;

/// Job poller configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    /// Delay floor, and the starting point for backoff
    pub initial_delay: Duration,

    /// Delay ceiling
    pub max_delay: Duration,

    /// Factor applied to the delay before every scheduled wait
    pub backoff_multiplier: f64,

    /// Consecutive failed fetches after which polling gives up
    pub max_consecutive_errors: u32,
}

impl PollConfig {
    /// Creates a configuration with the default backoff parameters
    pub fn new() -> Self {
        Self {
            initial_delay: Duration::from_secs(10),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 1.5,
            max_consecutive_errors: 5,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognized environment variables (all optional):
    /// - VIDMETA_POLL_INITIAL_DELAY_MS (default: 10000)
    /// - VIDMETA_POLL_MAX_DELAY_MS (default: 30000)
    /// - VIDMETA_POLL_BACKOFF_MULTIPLIER (default: 1.5)
    /// - VIDMETA_POLL_MAX_CONSECUTIVE_ERRORS (default: 5)
    ///
    /// Unparseable values fall back to the default for that field.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::new();

        let initial_delay = std::env::var("VIDMETA_POLL_INITIAL_DELAY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.initial_delay);

        let max_delay = std::env::var("VIDMETA_POLL_MAX_DELAY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.max_delay);

        let backoff_multiplier = std::env::var("VIDMETA_POLL_BACKOFF_MULTIPLIER")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(defaults.backoff_multiplier);

        let max_consecutive_errors = std::env::var("VIDMETA_POLL_MAX_CONSECUTIVE_ERRORS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.max_consecutive_errors);

        let config = Self {
            initial_delay,
            max_delay,
            backoff_multiplier,
            max_consecutive_errors,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.initial_delay.is_zero() {
            anyhow::bail!("initial_delay must be greater than 0");
        }

        if self.max_delay < self.initial_delay {
            anyhow::bail!("max_delay must not be less than initial_delay");
        }

        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            anyhow::bail!("backoff_multiplier must be a finite number >= 1.0");
        }

        if self.max_consecutive_errors == 0 {
            anyhow::bail!("max_consecutive_errors must be greater than 0");
        }

        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PollConfig::default();
        assert_eq!(config.initial_delay, Duration::from_secs(10));
        assert_eq!(config.max_delay, Duration::from_secs(30));
        assert_eq!(config.backoff_multiplier, 1.5);
        assert_eq!(config.max_consecutive_errors, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = PollConfig::default();
        assert!(config.validate().is_ok());

        config.initial_delay = Duration::ZERO;
        assert!(config.validate().is_err());
        config.initial_delay = Duration::from_secs(10);

        config.max_delay = Duration::from_secs(5);
        assert!(config.validate().is_err());
        config.max_delay = Duration::from_secs(30);

        config.backoff_multiplier = 0.5;
        assert!(config.validate().is_err());
        config.backoff_multiplier = f64::NAN;
        assert!(config.validate().is_err());
        config.backoff_multiplier = 1.0;
        assert!(config.validate().is_ok());

        config.max_consecutive_errors = 0;
        assert!(config.validate().is_err());
    }
}
