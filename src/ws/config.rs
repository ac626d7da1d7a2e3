#![expect(
    clippy::module_name_repetitions,
    reason = "Configuration types intentionally mirror the module name for clarity"
)]

use std::time::Duration;

const DEFAULT_MAX_ATTEMPTS: u32 = 5;
const DEFAULT_RETRY_DELAY_DURATION: Duration = Duration::from_secs(3);

/// Configuration for WebSocket client behavior.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Reconnection strategy configuration
    pub reconnect: ReconnectConfig,
}

/// Configuration for automatic reconnection behavior.
///
/// Retries use a fixed delay between attempts. There is no backoff and no
/// jitter; once `max_attempts` is reached, reconnection stops silently.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Maximum number of reconnection attempts before giving up
    pub max_attempts: u32,
    /// Fixed delay between reconnection attempts
    pub retry_delay: Duration,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY_DURATION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_retry_delay_is_three_seconds() {
        let config = Config::default();
        assert_eq!(config.reconnect.retry_delay, Duration::from_secs(3));
    }

    #[test]
    fn default_budget_is_five_attempts() {
        let config = ReconnectConfig::default();
        assert_eq!(config.max_attempts, 5);
    }
}
