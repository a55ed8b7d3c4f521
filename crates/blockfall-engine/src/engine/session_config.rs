use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default gravity interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Settings for a [`GameSession`](super::GameSession).
///
/// Deserializes from JSON with every field optional; unknown fields are
/// rejected.
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::SessionConfig;
///
/// let config: SessionConfig = serde_json::from_str(r#"{ "seed": 7 }"#).unwrap();
/// assert_eq!(config.tick_interval(), Duration::from_secs(1));
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Milliseconds between gravity ticks.
    pub tick_interval_ms: u64,
    /// Seed for the shape generator. Drawn from the thread-local generator
    /// when absent.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Checks that the settings describe a playable session.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTickInterval`] if the tick interval is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}
