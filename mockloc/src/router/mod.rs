//! Override routing between a real provider and mocked positions.
//!
//! [`OverrideRouter`] wraps a fallback [`LocationProvider`] and lets a
//! control surface (test harness, debug UI, replay script) substitute an
//! in-memory position for the real one. Consumers talk to the router
//! through the same provider trait, so it installs as a drop-in
//! replacement for the provider it wraps.
//!
//! # State Machine
//!
//! ```text
//! FallbackActive --[set_override(Some(p))]--> OverrideActive
//! OverrideActive --[set_override(None)]----> FallbackActive
//! ```
//!
//! Entering override mode unsubscribes every active subscription from the
//! fallback provider and fans the new position out to all of them;
//! leaving it re-registers each subscription with its original request.
//! Every other routing decision is a pure function of the current mode.
//!
//! # Thread Safety
//!
//! Interior mutability via a single `Mutex` over the table and override
//! value. The lock is never held across callback or fallback provider
//! invocations, so a callback that re-enters the router does not deadlock.
//!
//! # Example
//!
//! ```ignore
//! use mockloc::position::Position;
//! use mockloc::provider::{CallbackRef, LocationProvider, UpdateRequest};
//! use mockloc::router::OverrideRouter;
//! use std::sync::Arc;
//!
//! let router = OverrideRouter::new(real_provider);
//! router.request_updates(
//!     &UpdateRequest::default(),
//!     CallbackRef::from_fn(|update| println!("{:?}", update.last())),
//!     Default::default(),
//! );
//!
//! // Simulate a position; all subscribers receive it immediately.
//! router.set_override(Some(Position::new(53.55, 9.99)?));
//!
//! // Back to the real provider.
//! router.set_override(None);
//! ```

mod table;

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::position::{Position, PositionUpdate};
use crate::provider::{
    CallbackRef, DeliveryContext, IntentToken, LocationProvider, UpdateRequest,
};

use table::{SubscriptionEntry, SubscriptionTable};

/// Which producer currently serves queries and subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterMode {
    /// No override present; the fallback provider is authoritative.
    FallbackActive,
    /// An override position is present and replaces the fallback.
    OverrideActive,
}

/// Mutable router state, guarded by one lock.
#[derive(Debug, Default)]
struct RouterInner {
    override_position: Option<Position>,
    table: SubscriptionTable,
}

/// Work to perform against the fallback provider after a mode change,
/// computed under the lock, executed after it is released.
enum Migration {
    None,
    /// Entering override mode: stop fallback delivery for these handles.
    Detach(Vec<CallbackRef>),
    /// Leaving override mode: re-register these subscriptions.
    Reattach(Vec<SubscriptionEntry>),
}

/// Routing shim that substitutes mocked positions for a real provider.
///
/// Owns the subscription table and the override value exclusively; holds
/// the fallback provider for the router's whole lifetime, supplied once
/// at construction. Multiple routers never share state, so instances in
/// tests cannot interfere.
pub struct OverrideRouter {
    fallback: Arc<dyn LocationProvider>,
    inner: Mutex<RouterInner>,
}

impl OverrideRouter {
    /// Creates a router over the given fallback provider, starting in
    /// fallback mode.
    pub fn new(fallback: Arc<dyn LocationProvider>) -> Self {
        Self {
            fallback,
            inner: Mutex::new(RouterInner::default()),
        }
    }

    /// Current routing mode.
    pub fn mode(&self) -> RouterMode {
        if self.inner.lock().override_position.is_some() {
            RouterMode::OverrideActive
        } else {
            RouterMode::FallbackActive
        }
    }

    /// Number of active subscriptions, independent of mode.
    pub fn subscription_count(&self) -> usize {
        self.inner.lock().table.len()
    }

    /// Installs, replaces, or clears the override position.
    ///
    /// - `Some` while in fallback mode: detaches every subscription from
    ///   the fallback provider, then fans the position out to all of them.
    /// - `Some` while already overriding: fan-out only.
    /// - `None` while overriding: re-registers every subscription with the
    ///   fallback provider using its original request and the default
    ///   delivery context; no fan-out (delivery resumes with the next real
    ///   fix).
    /// - `None` while already in fallback mode: no-op.
    pub fn set_override(&self, position: Option<Position>) {
        let (migration, fan_out) = {
            let mut inner = self.inner.lock();
            let was_overriding = inner.override_position.is_some();

            let migration = match (was_overriding, position.is_some()) {
                (false, true) => Migration::Detach(inner.table.callbacks()),
                (true, false) => Migration::Reattach(inner.table.snapshot()),
                _ => Migration::None,
            };

            inner.override_position = position;

            let fan_out = inner
                .override_position
                .clone()
                .map(|p| (p, inner.table.callbacks()));

            (migration, fan_out)
        };

        match migration {
            Migration::Detach(callbacks) => {
                info!(
                    subscriptions = callbacks.len(),
                    "Override activated; detaching subscriptions from fallback provider"
                );
                for callback in &callbacks {
                    self.fallback.remove_updates(callback);
                }
            }
            Migration::Reattach(entries) => {
                info!(
                    subscriptions = entries.len(),
                    "Override cleared; re-registering subscriptions with fallback provider"
                );
                for entry in entries {
                    self.fallback.request_updates(
                        &entry.request,
                        entry.callback,
                        DeliveryContext::default(),
                    );
                }
            }
            Migration::None => {}
        }

        if let Some((position, callbacks)) = fan_out {
            debug!(subscribers = callbacks.len(), "Fanning out override position");
            for callback in callbacks {
                callback.on_success(PositionUpdate::from_position(position.clone()));
            }
        }
    }
}

impl LocationProvider for OverrideRouter {
    fn last_location(&self, callback: CallbackRef) {
        let override_position = self.inner.lock().override_position.clone();
        match override_position {
            Some(position) => callback.on_success(PositionUpdate::from_position(position)),
            None => self.fallback.last_location(callback),
        }
    }

    fn request_updates(
        &self,
        request: &UpdateRequest,
        callback: CallbackRef,
        context: DeliveryContext,
    ) {
        let forward = {
            let mut inner = self.inner.lock();
            inner.table.push(request.clone(), callback.clone());
            debug!(subscriptions = inner.table.len(), "Subscription added");
            inner.override_position.is_none()
        };

        // While an override is present the subscription stays dormant:
        // the subscriber receives nothing until the next set_override.
        if forward {
            self.fallback.request_updates(request, callback, context);
        }
    }

    fn remove_updates(&self, callback: &CallbackRef) {
        let (forward, removed) = {
            let mut inner = self.inner.lock();
            let forward = inner.override_position.is_none();
            let removed = inner.table.remove(callback).is_some();
            (forward, removed)
        };

        if !removed {
            trace!("remove_updates for unknown callback; ignoring");
        }

        // Forwarded even when the table had no entry; removal is
        // idempotent on the provider side.
        if forward {
            self.fallback.remove_updates(callback);
        }
    }

    fn request_updates_by_token(&self, request: &UpdateRequest, token: IntentToken) {
        // Token deliveries bypass override routing entirely.
        self.fallback.request_updates_by_token(request, token);
    }

    fn remove_updates_by_token(&self, token: IntentToken) {
        self.fallback.remove_updates_by_token(token);
    }
}
