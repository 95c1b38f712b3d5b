//! # Domain Types
//!
//! Small value types shared by the catalog, compiler and session.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ScreenerKind`] | Asset class targeted by a query (stock, forex, crypto, ...) |
//! | [`KindSet`] | Set of kinds a field is valid for |
//! | [`Interval`] | Time resolution for interval-capable fields |
//! | [`UtcDateTime`] | UTC timestamp |

mod interval;
mod kind;
mod timestamp;

pub use interval::Interval;
pub use kind::{KindSet, ScreenerKind};
pub use timestamp::UtcDateTime;
