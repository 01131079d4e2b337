//! Location provider abstraction.
//!
//! This module defines the capability set every location source exposes:
//! a one-shot last-known-position query plus callback- and token-based
//! update subscriptions. Both real providers and the override router
//! implement [`LocationProvider`], so the router can be installed as a
//! drop-in substitute wherever a provider is expected.
//!
//! # Example
//!
//! ```ignore
//! use mockloc::provider::{CallbackRef, FixedProvider, LocationProvider};
//! use mockloc::position::Position;
//! use std::sync::Arc;
//!
//! let provider: Arc<dyn LocationProvider> =
//!     Arc::new(FixedProvider::new(Position::new(53.55, 9.99)?));
//!
//! let cb = CallbackRef::from_fn(|update| {
//!     println!("fix: {:?}", update.last());
//! });
//! provider.last_location(cb);
//! ```

mod callback;
mod fixed;
mod request;
mod types;

pub use callback::{CallbackRef, LocationCallback};
pub use fixed::FixedProvider;
pub use request::{Priority, UpdateRequest};
pub use types::{DeliveryContext, IntentToken, LocationProvider, ProviderError};
