//! Widget configuration.

use crate::error::ConfigError;
use std::time::Duration;

/// Default pull distance in logical pixels at which a release refreshes.
pub const DEFAULT_THRESHOLD: f32 = 60.0;

/// Length of the single haptic pulse fired when the threshold is reached.
pub const HAPTIC_PULSE: Duration = Duration::from_millis(1000);

/// Transition used when the content settles back after release.
pub const SETTLE_TRANSITION: Duration = Duration::from_millis(300);

/// Distance above the container's top edge at which the indicator rests.
pub const INDICATOR_OFFSET: f32 = 40.0;

/// Tunables for a pull-to-refresh widget.
///
/// The threshold is fixed once the widget is built.
#[derive(Clone, Debug, PartialEq)]
pub struct PullRefreshConfig {
    pub threshold: f32,
    pub haptic_duration: Duration,
    pub settle_transition: Duration,
    pub indicator_offset: f32,
}

impl Default for PullRefreshConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            haptic_duration: HAPTIC_PULSE,
            settle_transition: SETTLE_TRANSITION,
            indicator_offset: INDICATOR_OFFSET,
        }
    }
}

impl PullRefreshConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_settle_transition(mut self, transition: Duration) -> Self {
        self.settle_transition = transition;
        self
    }

    pub fn with_indicator_offset(mut self, offset: f32) -> Self {
        self.indicator_offset = offset;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_constants() {
        let config = PullRefreshConfig::default();
        assert_eq!(config.threshold, 60.0);
        assert_eq!(config.haptic_duration, Duration::from_millis(1000));
        assert_eq!(config.settle_transition, Duration::from_millis(300));
        assert_eq!(config.indicator_offset, 40.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unusable_thresholds() {
        for threshold in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            let config = PullRefreshConfig::new().with_threshold(threshold);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidThreshold(_))
            ));
        }
    }
}
