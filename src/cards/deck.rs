//! Deck factory: build, shuffle, deal.
//!
//! IDs are assigned number-major, copy-minor before shuffling, so with the
//! classic table card `0..4` carry a 1, `4..8` a 2, and so on. The shuffle
//! only permutes positions; identities never change.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId};
use crate::core::config::RulesConfig;
use crate::core::error::EngineError;
use crate::core::player::PlayerMap;
use crate::core::rng::GameRng;

/// The three hands produced by a deal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub common: Vec<Card>,
    pub personal: PlayerMap<Vec<Card>>,
}

/// Build the ordered, face-down deck.
///
/// ```
/// use ploutos::cards::build_deck;
/// use ploutos::core::RulesConfig;
///
/// let deck = build_deck(&RulesConfig::default());
/// assert_eq!(deck.len(), 20);
/// assert_eq!(deck[0].number, 1);
/// assert_eq!(deck[19].number, 5);
/// ```
#[must_use]
pub fn build_deck(config: &RulesConfig) -> Vec<Card> {
    (1..=config.max_number)
        .flat_map(|number| std::iter::repeat(number).take(config.copies_per_number))
        .enumerate()
        .map(|(id, number)| Card::new(CardId(id as u32), number))
        .collect()
}

/// Uniformly permute the deck.
#[must_use]
pub fn shuffle(mut deck: Vec<Card>, rng: &mut GameRng) -> Vec<Card> {
    rng.shuffle(&mut deck);
    deck
}

/// Partition a shuffled deck by position: common slots first, then player 1,
/// then player 2.
pub fn deal(deck: Vec<Card>, config: &RulesConfig) -> Result<Deal, EngineError> {
    let expected = config.dealt_cards();
    if deck.len() != expected {
        return Err(EngineError::DeckSizeMismatch {
            expected,
            actual: deck.len(),
        });
    }

    let mut common = deck;
    let mut first = common.split_off(config.common_cards);
    let second = first.split_off(config.personal_cards);

    Ok(Deal {
        common,
        personal: PlayerMap::from_pair(first, second),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::PlayerId;

    #[test]
    fn test_ids_are_number_major() {
        let deck = build_deck(&RulesConfig::default());

        for (index, card) in deck.iter().enumerate() {
            assert_eq!(card.id, CardId(index as u32));
            assert_eq!(card.number as usize, index / 4 + 1);
            assert!(!card.is_face_up());
        }
    }

    #[test]
    fn test_deal_partitions_by_position() {
        let config = RulesConfig::default();
        let deck = build_deck(&config);

        let deal = deal(deck.clone(), &config).unwrap();

        assert_eq!(deal.common, deck[0..10].to_vec());
        assert_eq!(deal.personal[PlayerId::FIRST], deck[10..15].to_vec());
        assert_eq!(deal.personal[PlayerId::SECOND], deck[15..20].to_vec());
    }

    #[test]
    fn test_deal_rejects_wrong_size() {
        let config = RulesConfig::default();
        let mut deck = build_deck(&config);
        deck.pop();

        assert_eq!(
            deal(deck, &config),
            Err(EngineError::DeckSizeMismatch {
                expected: 20,
                actual: 19
            })
        );
    }

    #[test]
    fn test_shuffle_is_seed_deterministic() {
        let config = RulesConfig::default();
        let a = shuffle(build_deck(&config), &mut GameRng::new(9));
        let b = shuffle(build_deck(&config), &mut GameRng::new(9));
        assert_eq!(a, b);
        assert_ne!(a, build_deck(&config));
    }
}
