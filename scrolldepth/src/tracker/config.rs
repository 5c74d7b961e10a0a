//! Tracker configuration.

use std::time::Duration;

/// Default throttle window between scroll-check executions (in milliseconds).
pub const DEFAULT_THROTTLE_MS: u64 = 500;

/// Configuration for a [`ScrollDepthTracker`](crate::tracker::ScrollDepthTracker).
///
/// Immutable after the tracker is built, except for the tracked-element list
/// which the tracker mutates through `add_elements` / `remove_elements`.
#[derive(Clone, Debug)]
pub struct TrackerConfig {
    /// Minimum document height required before tracking activates.
    ///
    /// A document shorter than this leaves the tracker permanently inert -
    /// a silent no-op, not an error.
    pub min_height: u64,

    /// Element identifiers to watch individually, in addition to the
    /// percentage marks.
    pub elements: Vec<String>,

    /// Track the four standard percentage marks (25/50/75/100%).
    pub percentage: bool,

    /// Attach an elapsed-time timing event to each mark/element event.
    pub user_timing: bool,

    /// Emit "deepest pixel reached" events on new scroll maxima.
    pub pixel_depth: bool,

    /// Non-interaction flag propagated into emitted events (affects
    /// downstream bounce-rate interpretation).
    pub non_interaction: bool,

    /// Minimum spacing between scroll-check executions.
    pub throttle: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            min_height: 0,
            elements: Vec::new(),
            percentage: true,
            user_timing: true,
            pixel_depth: true,
            non_interaction: true,
            throttle: Duration::from_millis(DEFAULT_THROTTLE_MS),
        }
    }
}

impl TrackerConfig {
    /// Set the minimum document height.
    pub fn with_min_height(mut self, min_height: u64) -> Self {
        self.min_height = min_height;
        self
    }

    /// Set the tracked-element list.
    pub fn with_elements<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.elements = elements.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable percentage-mark tracking.
    pub fn with_percentage(mut self, enabled: bool) -> Self {
        self.percentage = enabled;
        self
    }

    /// Enable or disable user-timing events.
    pub fn with_user_timing(mut self, enabled: bool) -> Self {
        self.user_timing = enabled;
        self
    }

    /// Enable or disable pixel-depth events.
    pub fn with_pixel_depth(mut self, enabled: bool) -> Self {
        self.pixel_depth = enabled;
        self
    }

    /// Set the non-interaction flag.
    pub fn with_non_interaction(mut self, non_interaction: bool) -> Self {
        self.non_interaction = non_interaction;
        self
    }

    /// Set the throttle window.
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Total number of thresholds this configuration can fire: tracked
    /// elements plus the four percentage marks when enabled.
    pub fn threshold_count(&self) -> usize {
        self.elements.len() + if self.percentage { 4 } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_reference() {
        let config = TrackerConfig::default();
        assert_eq!(config.min_height, 0);
        assert!(config.elements.is_empty());
        assert!(config.percentage);
        assert!(config.user_timing);
        assert!(config.pixel_depth);
        assert!(config.non_interaction);
        assert_eq!(config.throttle, Duration::from_millis(500));
    }

    #[test]
    fn test_builder_methods() {
        let config = TrackerConfig::default()
            .with_min_height(800)
            .with_elements(["#footer", "#cta"])
            .with_percentage(false)
            .with_user_timing(false)
            .with_pixel_depth(false)
            .with_non_interaction(false)
            .with_throttle(Duration::from_millis(100));

        assert_eq!(config.min_height, 800);
        assert_eq!(config.elements, vec!["#footer", "#cta"]);
        assert!(!config.percentage);
        assert!(!config.user_timing);
        assert!(!config.pixel_depth);
        assert!(!config.non_interaction);
        assert_eq!(config.throttle, Duration::from_millis(100));
    }

    #[test]
    fn test_threshold_count() {
        let config = TrackerConfig::default();
        assert_eq!(config.threshold_count(), 4);

        let config = config.with_elements(["#a", "#b"]);
        assert_eq!(config.threshold_count(), 6);

        let config = config.with_percentage(false);
        assert_eq!(config.threshold_count(), 2);
    }
}
