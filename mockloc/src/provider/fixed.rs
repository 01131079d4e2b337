//! A provider that serves a single configurable position.

use parking_lot::RwLock;

use crate::position::{Position, PositionUpdate};

use super::callback::CallbackRef;
use super::request::UpdateRequest;
use super::types::{DeliveryContext, IntentToken, LocationProvider};

/// Minimal [`LocationProvider`] backed by one static position.
///
/// Useful as the fallback in demos and harnesses where no real
/// positioning backend exists: queries and new subscriptions receive the
/// configured position once, synchronously; there is no continuous
/// delivery and token registrations are accepted but inert.
pub struct FixedProvider {
    position: RwLock<Position>,
}

impl FixedProvider {
    /// Creates a provider serving the given position.
    pub fn new(position: Position) -> Self {
        Self {
            position: RwLock::new(position),
        }
    }

    /// Replaces the served position.
    pub fn set_position(&self, position: Position) {
        *self.position.write() = position;
    }

    /// The currently served position.
    pub fn position(&self) -> Position {
        self.position.read().clone()
    }
}

impl LocationProvider for FixedProvider {
    fn last_location(&self, callback: CallbackRef) {
        callback.on_success(PositionUpdate::from_position(self.position()));
    }

    fn request_updates(
        &self,
        _request: &UpdateRequest,
        callback: CallbackRef,
        _context: DeliveryContext,
    ) {
        // One immediate delivery stands in for a real update stream.
        callback.on_success(PositionUpdate::from_position(self.position()));
    }

    fn remove_updates(&self, _callback: &CallbackRef) {}

    fn request_updates_by_token(&self, _request: &UpdateRequest, _token: IntentToken) {}

    fn remove_updates_by_token(&self, _token: IntentToken) {}
}
