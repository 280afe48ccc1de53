//! Slot zones and gain piles.
//!
//! A `Zone` is a fixed-length row of slots. When a card is matched its slot
//! becomes empty but keeps its position, so renderers can address slots by
//! index for the whole game. A `GainPile` is an append-only score pile.
//!
//! Both are backed by `im::Vector`, so cloning a zone for a snapshot is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::player::PlayerId;

/// Where a card on the table currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardLocation {
    /// The shared zone.
    Common,
    /// A player's personal zone.
    Personal(PlayerId),
}

/// Fixed-length row of card slots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Zone {
    slots: Vector<Option<Card>>,
}

impl Zone {
    /// Create an empty zone with no slots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a zone with one occupied slot per card.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            slots: cards.into_iter().map(Some).collect(),
        }
    }

    /// Number of slots, occupied or not.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// All slots in order; `None` marks a matched-and-removed card.
    pub fn slots(&self) -> impl Iterator<Item = Option<&Card>> + '_ {
        self.slots.iter().map(Option::as_ref)
    }

    /// Cards still present, in slot order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.slots.iter().flatten()
    }

    /// Face-up cards, in slot order.
    pub fn face_up(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards().filter(|card| card.is_face_up())
    }

    /// Number of cards still present.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.cards().count()
    }

    /// Number of face-up cards.
    #[must_use]
    pub fn face_up_count(&self) -> usize {
        self.face_up().count()
    }

    /// True once every slot has been emptied.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cards().next().is_none()
    }

    /// Look up a present card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards().find(|card| card.id == id)
    }

    /// Check if a card with this id is present.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.card(id).is_some()
    }

    /// Turn over the card with this id.
    ///
    /// Returns false if no such card is present.
    pub fn flip(&mut self, id: CardId) -> bool {
        let position = self
            .slots
            .iter()
            .position(|slot| matches!(slot, Some(card) if card.id == id));

        match position {
            Some(index) => {
                if let Some(Some(card)) = self.slots.get_mut(index) {
                    card.flip();
                }
                true
            }
            None => false,
        }
    }

    /// Empty every slot holding a face-up card with `number`.
    ///
    /// Returns the removed cards in slot order.
    pub fn take_face_up(&mut self, number: u8) -> Vec<Card> {
        let mut taken = Vec::new();
        for slot in self.slots.iter_mut() {
            if matches!(slot, Some(card) if card.is_face_up() && card.number == number) {
                taken.extend(slot.take());
            }
        }
        taken
    }

    /// Turn every face-up card face down.
    pub fn turn_face_down(&mut self) {
        for card in self.slots.iter_mut().flatten() {
            if card.is_face_up() {
                card.flip();
            }
        }
    }

    /// Advance every present card's number, wrapping `max_number` to 1.
    pub fn rotate_numbers(&mut self, max_number: u8) {
        for card in self.slots.iter_mut().flatten() {
            card.rotate_number(max_number);
        }
    }
}

/// Append-only pile of cards a player has matched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GainPile {
    cards: Vector<Card>,
}

impl GainPile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add matched cards to the top of the pile.
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Cards in the order they were won.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// Score contributed by this pile: one point per card.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Empty the pile.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}
