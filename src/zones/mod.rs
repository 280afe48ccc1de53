//! Zone system for card locations.
//!
//! ## Key Types
//!
//! - `Zone`: Fixed-length slot row (the common zone, each personal zone)
//! - `GainPile`: Append-only per-player score pile
//! - `CardLocation`: Which table zone a card sits in

pub mod zone;

pub use zone::{CardLocation, GainPile, Zone};
