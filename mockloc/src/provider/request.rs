//! Update request descriptors.

use std::time::Duration;

/// Default update interval (1Hz).
const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Accuracy/power tradeoff for an update subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    /// Best possible accuracy regardless of power cost.
    HighAccuracy,
    /// Block-level accuracy with moderate power use.
    #[default]
    Balanced,
    /// City-level accuracy, minimal power.
    LowPower,
    /// No active fixes; piggyback on other consumers' requests.
    Passive,
}

/// Describes how often and how precisely a subscriber wants fixes.
///
/// The router stores the request verbatim so the original cadence can be
/// re-registered with the real provider when an override is cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    /// Desired interval between fixes.
    pub interval: Duration,
    /// Fastest interval the subscriber can absorb (fixes produced for
    /// other consumers may arrive at this rate).
    pub fastest_interval: Duration,
    /// Accuracy/power priority.
    pub priority: Priority,
    /// Minimum movement in meters before a new fix is delivered;
    /// 0.0 delivers every fix.
    pub displacement: f64,
}

impl UpdateRequest {
    /// Creates a request with the given interval and default priority.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            fastest_interval: interval,
            priority: Priority::default(),
            displacement: 0.0,
        }
    }

    /// Sets the fastest acceptable interval.
    pub fn with_fastest_interval(mut self, fastest: Duration) -> Self {
        self.fastest_interval = fastest;
        self
    }

    /// Sets the accuracy/power priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the minimum displacement filter.
    pub fn with_displacement(mut self, meters: f64) -> Self {
        self.displacement = meters;
        self
    }
}

impl Default for UpdateRequest {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}
