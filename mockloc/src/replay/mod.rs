//! Scripted position replay.
//!
//! A replay script is a JSON sequence of timed fixes. The driver walks a
//! script against an [`OverrideRouter`](crate::router::OverrideRouter),
//! installing each fix as the override at its scheduled offset and
//! restoring the fallback provider when the script ends.
//!
//! # Script Format
//!
//! ```text
//! {
//!   "fixes": [
//!     { "offset_ms": 0,    "position": { "latitude": 53.55, "longitude": 9.99 } },
//!     { "offset_ms": 1000, "position": { "latitude": 53.56, "longitude": 9.98 } }
//!   ]
//! }
//! ```

mod driver;
mod script;

pub use driver::{ReplayConfig, ReplayDriver};
pub use script::{ReplayError, ReplayFix, ReplayScript};
