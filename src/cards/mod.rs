//! Card system: the card model and the deck factory.
//!
//! ## Key Types
//!
//! - `CardId`: Stable card identity, assigned once at deck construction
//! - `Orientation`: `Front` (number visible) or `Back`
//! - `Card`: Number + orientation + identity
//! - `Deal`: The common zone and both personal zones after a deal

pub mod card;
pub mod deck;

pub use card::{Card, CardId, Orientation};
pub use deck::{build_deck, deal, shuffle, Deal};
