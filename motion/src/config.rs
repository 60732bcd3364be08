use std::time::Duration;

/// Update-rate configuration shared by all motion subscriptions.
///
/// The source of truth is the interval; the stock delivery rate is 8 Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Interval between sample deliveries, applied to every subscription
    pub sample_interval: Duration,
}

impl SessionConfig {
    /// Configuration delivering `hz` samples per second
    pub fn with_rate_hz(hz: f64) -> Self {
        debug_assert!(hz > 0.0);
        Self {
            sample_interval: Duration::from_secs_f64(1.0 / hz),
        }
    }

    /// The configured delivery rate in Hz
    pub fn rate_hz(&self) -> f64 {
        1.0 / self.sample_interval.as_secs_f64()
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::with_rate_hz(8.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_8_hz() {
        let config = SessionConfig::default();
        assert_eq!(config.sample_interval, Duration::from_millis(125));
        assert!((config.rate_hz() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_with_rate_hz_round_trips() {
        let config = SessionConfig::with_rate_hz(50.0);
        assert!((config.rate_hz() - 50.0).abs() < 1e-9);
    }
}
