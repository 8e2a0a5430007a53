//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;
use crate::{
    AUTO_ROUTE_DELAY_MS, CONFIRMATION_DELAY_MS, HIGH_CLARITY_THRESHOLD, INACTIVITY_THRESHOLD_MS,
};

/// Timing and threshold configuration for the mentor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    /// Delay between a navigate reply and the confirmation + move to landing.
    pub confirmation_delay: Duration,
    /// Delay between entering the chat and the auto-route check.
    pub auto_route_delay: Duration,
    /// Idle time the auto-route check requires.
    pub inactivity_threshold: Duration,
    /// Clarity at or above which auto-routing arms.
    pub high_clarity_threshold: u8,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            confirmation_delay: Duration::from_millis(CONFIRMATION_DELAY_MS),
            auto_route_delay: Duration::from_millis(AUTO_ROUTE_DELAY_MS),
            inactivity_threshold: Duration::from_millis(INACTIVITY_THRESHOLD_MS),
            high_clarity_threshold: HIGH_CLARITY_THRESHOLD,
        }
    }
}

impl FlowConfig {
    /// Defaults overridden by `TELIOS_*` environment variables.
    ///
    /// - `TELIOS_CONFIRM_DELAY_MS`
    /// - `TELIOS_AUTO_ROUTE_DELAY_MS`
    /// - `TELIOS_INACTIVITY_MS`
    /// - `TELIOS_HIGH_CLARITY` (0..=100)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`FlowConfig::from_env`] with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ms) = parse_var::<u64, _>(&lookup, "TELIOS_CONFIRM_DELAY_MS")? {
            config.confirmation_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "TELIOS_AUTO_ROUTE_DELAY_MS")? {
            config.auto_route_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "TELIOS_INACTIVITY_MS")? {
            config.inactivity_threshold = Duration::from_millis(ms);
        }
        if let Some(threshold) = parse_var::<u8, _>(&lookup, "TELIOS_HIGH_CLARITY")? {
            if threshold > 100 {
                return Err(ConfigError::InvalidValue {
                    key: "TELIOS_HIGH_CLARITY".to_string(),
                    message: format!("{threshold} is above 100"),
                });
            }
            config.high_clarity_threshold = threshold;
        }

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }),
    }
}
