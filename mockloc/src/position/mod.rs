//! Geographic position types.
//!
//! Provides the `Position` value delivered to location consumers and the
//! `PositionUpdate` envelope callbacks receive. Positions carry WGS84
//! latitude/longitude plus the optional channels real receivers report
//! (altitude, accuracy, bearing, speed).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Errors for out-of-range coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PositionError {
    /// Latitude outside [-90, 90] degrees.
    #[error("Invalid latitude: {0} (expected -90.0 to 90.0)")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] degrees.
    #[error("Invalid longitude: {0} (expected -180.0 to 180.0)")]
    InvalidLongitude(f64),
}

/// A single geographic fix.
///
/// Latitude and longitude are mandatory; the remaining channels are
/// optional because neither a mocked position nor every real receiver
/// populates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in degrees (-90.0 to 90.0).
    pub latitude: f64,
    /// Longitude in degrees (-180.0 to 180.0).
    pub longitude: f64,
    /// Altitude above the WGS84 ellipsoid, in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Estimated horizontal accuracy radius, in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    /// Direction of travel in degrees clockwise from true north.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,
    /// Ground speed in meters per second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    /// When this fix was produced.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Position {
    /// Creates a position from validated coordinates, timestamped now.
    ///
    /// # Errors
    ///
    /// Returns `PositionError` if latitude or longitude is out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, PositionError> {
        if !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(PositionError::InvalidLatitude(latitude));
        }
        if !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(PositionError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
            altitude: None,
            accuracy: None,
            bearing: None,
            speed: None,
            timestamp: Utc::now(),
        })
    }

    /// Sets the altitude channel.
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Sets the horizontal accuracy channel.
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    /// Sets the bearing channel.
    pub fn with_bearing(mut self, bearing: f64) -> Self {
        self.bearing = Some(bearing);
        self
    }

    /// Sets the speed channel.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Sets an explicit timestamp (replay scripts, tests).
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Re-validates coordinate ranges.
    ///
    /// Deserialized positions bypass `new()`, so script loaders call this
    /// before accepting a fix.
    pub fn validate(&self) -> Result<(), PositionError> {
        if !(MIN_LAT..=MAX_LAT).contains(&self.latitude) {
            return Err(PositionError::InvalidLatitude(self.latitude));
        }
        if !(MIN_LON..=MAX_LON).contains(&self.longitude) {
            return Err(PositionError::InvalidLongitude(self.longitude));
        }
        Ok(())
    }
}

/// The value delivered to a location callback.
///
/// Carries one or more positions, oldest first. Real providers may batch
/// fixes; mocked delivery always carries exactly one.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionUpdate {
    positions: Vec<Position>,
}

impl PositionUpdate {
    /// Creates an update from a batch of positions, oldest first.
    pub fn new(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    /// Creates an update carrying a single position.
    pub fn from_position(position: Position) -> Self {
        Self {
            positions: vec![position],
        }
    }

    /// The most recent position in this update, if any.
    pub fn last(&self) -> Option<&Position> {
        self.positions.last()
    }

    /// All positions in this update, oldest first.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_valid_coordinates() {
        let pos = Position::new(53.5511, 9.9937).unwrap();
        assert_eq!(pos.latitude, 53.5511);
        assert_eq!(pos.longitude, 9.9937);
        assert!(pos.altitude.is_none());
    }

    #[test]
    fn test_new_rejects_bad_latitude() {
        let err = Position::new(90.1, 0.0).unwrap_err();
        assert_eq!(err, PositionError::InvalidLatitude(90.1));
    }

    #[test]
    fn test_new_rejects_bad_longitude() {
        let err = Position::new(0.0, -180.5).unwrap_err();
        assert_eq!(err, PositionError::InvalidLongitude(-180.5));
    }

    #[test]
    fn test_builder_channels() {
        let pos = Position::new(40.7128, -74.0060)
            .unwrap()
            .with_altitude(10.0)
            .with_accuracy(5.0)
            .with_bearing(270.0)
            .with_speed(1.5);
        assert_eq!(pos.altitude, Some(10.0));
        assert_eq!(pos.accuracy, Some(5.0));
        assert_eq!(pos.bearing, Some(270.0));
        assert_eq!(pos.speed, Some(1.5));
    }

    #[test]
    fn test_validate_catches_deserialized_out_of_range() {
        let mut pos = Position::new(0.0, 0.0).unwrap();
        pos.latitude = 123.0;
        assert!(pos.validate().is_err());
    }

    #[test]
    fn test_update_last_returns_newest() {
        let a = Position::new(1.0, 1.0).unwrap();
        let b = Position::new(2.0, 2.0).unwrap();
        let update = PositionUpdate::new(vec![a, b.clone()]);
        assert_eq!(update.last(), Some(&b));
        assert_eq!(update.positions().len(), 2);
    }

    #[test]
    fn test_update_from_single_position() {
        let pos = Position::new(48.8566, 2.3522).unwrap();
        let update = PositionUpdate::from_position(pos.clone());
        assert_eq!(update.last(), Some(&pos));
    }

    #[test]
    fn test_serde_round_trip_preserves_channels() {
        let pos = Position::new(35.6762, 139.6503).unwrap().with_speed(3.2);
        let json = serde_json::to_string(&pos).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pos);
    }
}
