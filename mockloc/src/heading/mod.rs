//! Heading override relay.
//!
//! Compass heading uses a different mocking strategy than position:
//! instead of detaching subscriptions from the real source, the relay
//! keeps receiving real readings and suppresses them while an override
//! is present. Setting an override fans it out to observers immediately;
//! clearing it lets real readings through again.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A compass reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading relative to magnetic north, in degrees (0.0 to 360.0).
    pub magnetic: f64,
    /// Heading relative to true north, if declination is known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_heading: Option<f64>,
    /// Maximum deviation between reported and actual heading, in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl Heading {
    /// Creates a magnetic-only heading.
    pub fn magnetic(degrees: f64) -> Self {
        Self {
            magnetic: degrees.rem_euclid(360.0),
            true_heading: None,
            accuracy: None,
        }
    }

    /// Sets the true-north heading.
    pub fn with_true_heading(mut self, degrees: f64) -> Self {
        self.true_heading = Some(degrees.rem_euclid(360.0));
        self
    }

    /// Sets the accuracy channel.
    pub fn with_accuracy(mut self, degrees: f64) -> Self {
        self.accuracy = Some(degrees);
        self
    }
}

/// Receiver for heading readings.
pub trait HeadingObserver: Send + Sync {
    /// Called with each delivered reading, real or overridden.
    fn on_heading(&self, heading: Heading);
}

struct RelayInner {
    override_heading: Option<Heading>,
    observers: Vec<std::sync::Arc<dyn HeadingObserver>>,
}

/// Filters real heading readings through an optional override.
///
/// Unlike [`OverrideRouter`](crate::router::OverrideRouter), the relay
/// never detaches from the real source; it stays subscribed and drops
/// readings while an override is present.
pub struct HeadingRelay {
    inner: Mutex<RelayInner>,
}

impl Default for HeadingRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadingRelay {
    /// Creates a relay with no override and no observers.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RelayInner {
                override_heading: None,
                observers: Vec::new(),
            }),
        }
    }

    /// Registers an observer for delivered readings.
    pub fn add_observer(&self, observer: std::sync::Arc<dyn HeadingObserver>) {
        self.inner.lock().observers.push(observer);
    }

    /// Whether an override heading is currently present.
    pub fn is_overridden(&self) -> bool {
        self.inner.lock().override_heading.is_some()
    }

    /// Installs or clears the override heading.
    ///
    /// Installing fans the heading out to all observers immediately;
    /// clearing produces no delivery (real readings resume on their own).
    pub fn set_override(&self, heading: Option<Heading>) {
        let fan_out = {
            let mut inner = self.inner.lock();
            inner.override_heading = heading;
            heading.map(|h| (h, inner.observers.clone()))
        };

        match fan_out {
            Some((heading, observers)) => {
                info!(?heading, "Heading override installed");
                for observer in observers {
                    observer.on_heading(heading);
                }
            }
            None => info!("Heading override cleared"),
        }
    }

    /// Delivers a reading from the real source.
    ///
    /// Suppressed while an override is present.
    pub fn forward(&self, heading: Heading) {
        let observers = {
            let inner = self.inner.lock();
            if inner.override_heading.is_some() {
                debug!("Real heading suppressed by override");
                return;
            }
            inner.observers.clone()
        };

        for observer in observers {
            observer.on_heading(heading);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Collector {
        readings: Mutex<Vec<Heading>>,
    }

    impl Collector {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                readings: Mutex::new(Vec::new()),
            })
        }

        fn count(&self) -> usize {
            self.readings.lock().len()
        }
    }

    impl HeadingObserver for Collector {
        fn on_heading(&self, heading: Heading) {
            self.readings.lock().push(heading);
        }
    }

    #[test]
    fn test_magnetic_normalizes_degrees() {
        assert_eq!(Heading::magnetic(370.0).magnetic, 10.0);
        assert_eq!(Heading::magnetic(-90.0).magnetic, 270.0);
    }

    #[test]
    fn test_real_readings_pass_through_without_override() {
        let relay = HeadingRelay::new();
        let collector = Collector::new();
        relay.add_observer(collector.clone());

        relay.forward(Heading::magnetic(45.0));
        assert_eq!(collector.count(), 1);
        assert_eq!(collector.readings.lock()[0].magnetic, 45.0);
    }

    #[test]
    fn test_override_fans_out_immediately() {
        let relay = HeadingRelay::new();
        let collector = Collector::new();
        relay.add_observer(collector.clone());

        relay.set_override(Some(Heading::magnetic(180.0)));
        assert!(relay.is_overridden());
        assert_eq!(collector.count(), 1);
        assert_eq!(collector.readings.lock()[0].magnetic, 180.0);
    }

    #[test]
    fn test_real_readings_suppressed_while_overridden() {
        let relay = HeadingRelay::new();
        let collector = Collector::new();
        relay.add_observer(collector.clone());

        relay.set_override(Some(Heading::magnetic(180.0)));
        relay.forward(Heading::magnetic(90.0));
        // Only the override delivery is observed.
        assert_eq!(collector.count(), 1);
    }

    #[test]
    fn test_clear_resumes_real_readings_without_fan_out() {
        let relay = HeadingRelay::new();
        let collector = Collector::new();
        relay.add_observer(collector.clone());

        relay.set_override(Some(Heading::magnetic(180.0)));
        relay.set_override(None);
        assert_eq!(collector.count(), 1, "clearing must not fan out");
        assert!(!relay.is_overridden());

        relay.forward(Heading::magnetic(90.0));
        assert_eq!(collector.count(), 2);
    }
}
