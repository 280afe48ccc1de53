//! Card model.
//!
//! A card has a stable `CardId` (its only identity, used by flip requests),
//! a number in `1..=max_number` that the common zone rotates once per round,
//! and an orientation.

use serde::{Deserialize, Serialize};

/// Stable identity of a physical card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Which side of the card faces up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Number visible.
    Front,
    /// Face down.
    #[default]
    Back,
}

impl Orientation {
    /// The opposite side.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Orientation::Front => Orientation::Back,
            Orientation::Back => Orientation::Front,
        }
    }
}

/// A card on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub number: u8,
    pub orientation: Orientation,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn new(id: CardId, number: u8) -> Self {
        Self {
            id,
            number,
            orientation: Orientation::Back,
        }
    }

    /// Is the number visible?
    #[must_use]
    pub fn is_face_up(&self) -> bool {
        self.orientation == Orientation::Front
    }

    /// Turn the card over.
    pub fn flip(&mut self) {
        self.orientation = self.orientation.flipped();
    }

    /// Advance the number by one, wrapping `max_number` back to 1.
    ///
    /// ```
    /// use ploutos::cards::{Card, CardId};
    ///
    /// let mut card = Card::new(CardId(0), 4);
    /// card.rotate_number(5);
    /// assert_eq!(card.number, 5);
    /// card.rotate_number(5);
    /// assert_eq!(card.number, 1);
    /// ```
    pub fn rotate_number(&mut self, max_number: u8) {
        self.number = self.number % max_number + 1;
    }
}
