//! Mockloc - mockable location routing for mapping clients.
//!
//! Mapping SDKs consume positions through a provider interface. Mockloc
//! wraps any such provider in an [`router::OverrideRouter`] that can
//! substitute caller-supplied positions for real ones - for test
//! harnesses, debug tooling, and scripted replay - while transparently
//! falling back to the wrapped provider whenever no override is active.
//!
//! # Architecture
//!
//! ```text
//! Consumers ──► OverrideRouter ──┬──► Fallback provider (real fixes)
//!                                └──► Override position (mocked fixes)
//! ```
//!
//! The router implements the same [`provider::LocationProvider`] trait it
//! wraps, so it installs wherever a provider is expected. Override state
//! is controlled through a single operation,
//! [`router::OverrideRouter::set_override`]; the [`replay`] module drives
//! it from recorded scripts, and [`heading`] applies the same idea to
//! compass readings.

pub mod heading;
pub mod position;
pub mod provider;
pub mod replay;
pub mod router;
