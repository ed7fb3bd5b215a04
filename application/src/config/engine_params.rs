//! Engine parameters: timing control for voter calls and autonomous cycles.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default period between autonomous cycles
pub const DEFAULT_CYCLE_INTERVAL: Duration = Duration::from_millis(30_000);

/// Default bound on a single voter call
pub const DEFAULT_VOTER_TIMEOUT: Duration = Duration::from_secs(60);

/// Timing parameters shared by deliberation and the autonomous engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineParams {
    /// Period of the recurring cycle timer
    pub cycle_interval: Duration,
    /// Upper bound for one voter call; `None` waits indefinitely
    pub voter_timeout: Option<Duration>,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            cycle_interval: DEFAULT_CYCLE_INTERVAL,
            voter_timeout: Some(DEFAULT_VOTER_TIMEOUT),
        }
    }
}

impl EngineParams {
    pub fn with_cycle_interval(mut self, interval: Duration) -> Self {
        self.cycle_interval = interval;
        self
    }

    pub fn with_voter_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.voter_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = EngineParams::default();
        assert_eq!(params.cycle_interval, Duration::from_millis(30_000));
        assert_eq!(params.voter_timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_builders() {
        let params = EngineParams::default()
            .with_cycle_interval(Duration::from_secs(5))
            .with_voter_timeout(None);
        assert_eq!(params.cycle_interval, Duration::from_secs(5));
        assert!(params.voter_timeout.is_none());
    }
}
