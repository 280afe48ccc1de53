//! Rules configuration.
//!
//! Every table constant of the game lives here instead of in the engine:
//! zone sizes, the card values and their copies, the per-turn flip
//! threshold, the face-up cap per zone and the pacing delay before a turn
//! is judged. `RulesConfig::default()` is the classic game.
//!
//! ```
//! use std::time::Duration;
//! use ploutos::core::RulesConfig;
//!
//! let config = RulesConfig::default();
//! assert_eq!(config.deck_size(), 20);
//! assert_eq!(config.resolution_delay, Duration::from_millis(800));
//!
//! let quick = RulesConfig::default().with_resolution_delay(Duration::ZERO);
//! assert!(quick.validate().is_ok());
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Table constants for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Cards dealt to the shared zone.
    pub common_cards: usize,

    /// Cards dealt to each player's personal zone.
    pub personal_cards: usize,

    /// Highest card number; numbers run `1..=max_number` and rotate back to 1.
    pub max_number: u8,

    /// Copies of each number in the deck.
    pub copies_per_number: usize,

    /// Flips after which a turn is resolved.
    pub flip_threshold: u32,

    /// Maximum face-up cards per zone while a turn is open.
    pub zone_open_cap: usize,

    /// Pause between the last flip and resolution.
    pub resolution_delay: Duration,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            common_cards: 10,
            personal_cards: 5,
            max_number: 5,
            copies_per_number: 4,
            flip_threshold: 3,
            zone_open_cap: 2,
            resolution_delay: Duration::from_millis(800),
        }
    }
}

impl RulesConfig {
    /// Classic rules without the pacing delay, for non-interactive runs.
    #[must_use]
    pub fn instant() -> Self {
        Self::default().with_resolution_delay(Duration::ZERO)
    }

    /// Set the common and per-player zone sizes.
    #[must_use]
    pub fn with_zone_sizes(mut self, common_cards: usize, personal_cards: usize) -> Self {
        self.common_cards = common_cards;
        self.personal_cards = personal_cards;
        self
    }

    /// Set the highest card number and the copies of each.
    #[must_use]
    pub fn with_numbers(mut self, max_number: u8, copies_per_number: usize) -> Self {
        self.max_number = max_number;
        self.copies_per_number = copies_per_number;
        self
    }

    /// Set the flips after which a turn is resolved.
    #[must_use]
    pub fn with_flip_threshold(mut self, threshold: u32) -> Self {
        self.flip_threshold = threshold;
        self
    }

    /// Set the face-up cap per zone.
    #[must_use]
    pub fn with_zone_open_cap(mut self, cap: usize) -> Self {
        self.zone_open_cap = cap;
        self
    }

    /// Set the pause before a closed turn is resolved.
    #[must_use]
    pub fn with_resolution_delay(mut self, delay: Duration) -> Self {
        self.resolution_delay = delay;
        self
    }

    /// Number of cards the deck factory builds.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.max_number as usize * self.copies_per_number
    }

    /// Number of cards the deal consumes.
    #[must_use]
    pub fn dealt_cards(&self) -> usize {
        self.common_cards + 2 * self.personal_cards
    }

    /// Most cards a player can hold face up at once: the capped common zone
    /// plus the capped personal zone.
    #[must_use]
    pub fn max_open_cards(&self) -> usize {
        self.zone_open_cap.min(self.common_cards) + self.zone_open_cap.min(self.personal_cards)
    }

    /// Check that the constants describe a playable table.
    pub fn validate(&self) -> Result<(), EngineError> {
        let zero_field = [
            ("common_cards", self.common_cards),
            ("personal_cards", self.personal_cards),
            ("max_number", self.max_number as usize),
            ("copies_per_number", self.copies_per_number),
            ("flip_threshold", self.flip_threshold as usize),
            ("zone_open_cap", self.zone_open_cap),
        ]
        .into_iter()
        .find(|(_, value)| *value == 0);

        if let Some((name, _)) = zero_field {
            return Err(EngineError::InvalidConfig(format!("{name} must be positive")));
        }

        if self.deck_size() != self.dealt_cards() {
            return Err(EngineError::InvalidConfig(format!(
                "deck of {} cards cannot fill {} common and 2x{} personal slots",
                self.deck_size(),
                self.common_cards,
                self.personal_cards
            )));
        }

        // flips past the caps are refused, so a higher threshold never trips
        if self.flip_threshold as usize > self.max_open_cards() {
            return Err(EngineError::InvalidConfig(format!(
                "flip_threshold {} exceeds the {} cards that can be face up at once",
                self.flip_threshold,
                self.max_open_cards()
            )));
        }

        Ok(())
    }
}
