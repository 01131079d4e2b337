//! Core provider trait and supporting types.

use thiserror::Error;

use super::callback::CallbackRef;
use super::request::UpdateRequest;

/// Errors a location provider can report to its callbacks.
///
/// The router never produces or translates these itself; they flow
/// unchanged from the downstream provider through `on_failure`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The platform denied access to positioning.
    #[error("Location permission denied")]
    PermissionDenied,

    /// The provider cannot currently produce fixes.
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// The provider gave up waiting for a fix.
    #[error("Timed out waiting for a fix")]
    Timeout,

    /// The provider is shutting down.
    #[error("Provider is shutting down")]
    Shutdown,
}

/// How a subscription's callbacks should be delivered.
///
/// Pure passthrough: providers that own a delivery thread honor it, the
/// router only forwards it. Re-registration after an override is cleared
/// always uses the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryContext {
    /// Deliver on whatever thread produced the fix.
    #[default]
    CallingThread,
    /// Deliver on the provider's dedicated delivery thread.
    Dedicated,
}

/// Opaque handle for token-based (fire-and-forget) registrations.
///
/// Token registrations have no callback to migrate, so they bypass
/// override routing entirely and always reach the real provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntentToken(u64);

impl IntentToken {
    /// Creates a token from a caller-chosen identifier.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The location capability set.
///
/// Implemented by real positioning backends and by
/// [`OverrideRouter`](crate::router::OverrideRouter), which wraps one of
/// them. All methods are fire-and-forget: results and failures arrive
/// through the supplied callback on the provider's own schedule.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so they can be shared as
/// `Arc<dyn LocationProvider>` across threads.
pub trait LocationProvider: Send + Sync {
    /// Requests the last known position.
    ///
    /// Invokes the callback's `on_success` with the most recent fix, or
    /// `on_failure` if none can be produced. Delivery may be synchronous
    /// or asynchronous depending on the implementation.
    fn last_location(&self, callback: CallbackRef);

    /// Subscribes a callback to continuous position updates.
    ///
    /// # Arguments
    ///
    /// * `request` - Desired update cadence and accuracy
    /// * `callback` - Receives every subsequent fix
    /// * `context` - Delivery thread preference
    fn request_updates(
        &self,
        request: &UpdateRequest,
        callback: CallbackRef,
        context: DeliveryContext,
    );

    /// Cancels a callback subscription.
    ///
    /// Removing a callback that was never registered is a no-op;
    /// duplicate removals are expected in normal consumer lifecycles.
    fn remove_updates(&self, callback: &CallbackRef);

    /// Registers a token-based subscription.
    ///
    /// Token deliveries are dispatched by the platform, not through a
    /// callback, so they cannot be mocked and always reach the real
    /// provider.
    fn request_updates_by_token(&self, request: &UpdateRequest, token: IntentToken);

    /// Cancels a token-based subscription.
    fn remove_updates_by_token(&self, token: IntentToken);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::PermissionDenied;
        assert_eq!(format!("{}", err), "Location permission denied");

        let err = ProviderError::Unavailable("no GNSS".to_string());
        assert!(format!("{}", err).contains("no GNSS"));
    }

    #[test]
    fn test_delivery_context_default_is_calling_thread() {
        assert_eq!(DeliveryContext::default(), DeliveryContext::CallingThread);
    }

    #[test]
    fn test_intent_token_identity() {
        let a = IntentToken::new(7);
        let b = IntentToken::new(7);
        let c = IntentToken::new(8);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.id(), 7);
    }
}
