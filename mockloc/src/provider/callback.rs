//! Callback handles for update delivery.
//!
//! A subscription is keyed by the identity of its callback: the same
//! handle passed to `request_updates` must be passed to `remove_updates`.
//! `CallbackRef` makes that identity explicit - clones of a handle compare
//! equal, independently created handles never do, even if they wrap
//! identical closures.

use std::fmt;
use std::sync::Arc;

use crate::position::PositionUpdate;

use super::types::ProviderError;

/// Receiver for position updates and provider failures.
pub trait LocationCallback: Send + Sync {
    /// Called with each delivered fix.
    fn on_success(&self, update: PositionUpdate);

    /// Called when the provider cannot produce a fix.
    ///
    /// Default implementation drops the error; consumers that only care
    /// about fixes need not override it.
    fn on_failure(&self, error: ProviderError) {
        let _ = error;
    }
}

/// Shareable handle to a [`LocationCallback`].
///
/// Cheap to clone. Equality is pointer identity on the underlying
/// callback, which is what subscription matching uses.
#[derive(Clone)]
pub struct CallbackRef(Arc<dyn LocationCallback>);

impl CallbackRef {
    /// Wraps a callback implementation.
    pub fn new(callback: Arc<dyn LocationCallback>) -> Self {
        Self(callback)
    }

    /// Builds a handle from a success closure; failures are dropped.
    pub fn from_fn<F>(on_success: F) -> Self
    where
        F: Fn(PositionUpdate) + Send + Sync + 'static,
    {
        Self(Arc::new(FnCallback {
            on_success,
            on_failure: |_| {},
        }))
    }

    /// Builds a handle from success and failure closures.
    pub fn from_fns<S, E>(on_success: S, on_failure: E) -> Self
    where
        S: Fn(PositionUpdate) + Send + Sync + 'static,
        E: Fn(ProviderError) + Send + Sync + 'static,
    {
        Self(Arc::new(FnCallback {
            on_success,
            on_failure,
        }))
    }

    /// Delivers a fix to the underlying callback.
    pub fn on_success(&self, update: PositionUpdate) {
        self.0.on_success(update);
    }

    /// Delivers a failure to the underlying callback.
    pub fn on_failure(&self, error: ProviderError) {
        self.0.on_failure(error);
    }
}

impl PartialEq for CallbackRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for CallbackRef {}

impl fmt::Debug for CallbackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallbackRef({:p})", Arc::as_ptr(&self.0))
    }
}

/// Closure-backed callback.
struct FnCallback<S, E> {
    on_success: S,
    on_failure: E,
}

impl<S, E> LocationCallback for FnCallback<S, E>
where
    S: Fn(PositionUpdate) + Send + Sync,
    E: Fn(ProviderError) + Send + Sync,
{
    fn on_success(&self, update: PositionUpdate) {
        (self.on_success)(update);
    }

    fn on_failure(&self, error: ProviderError) {
        (self.on_failure)(error);
    }
}
