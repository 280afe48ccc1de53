//! Game state: the single source of truth for one game.
//!
//! ## GameState
//!
//! - The common zone, both personal zones and both gain piles
//! - Turn player, completed rounds, flips in the open turn
//! - The most recent matched set
//! - The privilege flag and the scene
//!
//! Every mutation is a method taking `&mut self` and leaving the state
//! consistent when it returns; nothing here does I/O, randomness or timing.
//! Zones are persistent vectors, so `clone()` is the snapshot operation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use super::config::RulesConfig;
use super::error::EngineError;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{Card, CardId};
use crate::zones::{CardLocation, GainPile, Zone};

/// Top-level game phase. Only ever moves forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Scene {
    /// Created, not yet dealt.
    #[default]
    Preparing,
    /// Dealt; players are taking turns.
    Playing,
    /// A zone ran out of cards. Read-only from here on.
    Finished,
}

/// Cards removed by the most recent match. At most one number's worth.
pub type MatchedSet = SmallVec<[Card; 4]>;

/// Pick the number with the most occurrences.
///
/// Ties go to the smallest number. Returns `(number, group size)`, or `None`
/// when there are no numbers at all.
///
/// ```
/// use ploutos::core::select_winning_number;
///
/// assert_eq!(select_winning_number([4, 2, 4, 2, 5]), Some((2, 2)));
/// assert_eq!(select_winning_number([3, 1, 3]), Some((3, 2)));
/// assert_eq!(select_winning_number(Vec::<u8>::new()), None);
/// ```
pub fn select_winning_number(numbers: impl IntoIterator<Item = u8>) -> Option<(u8, usize)> {
    let mut groups: FxHashMap<u8, usize> = FxHashMap::default();
    for number in numbers {
        *groups.entry(number).or_default() += 1;
    }

    groups
        .into_iter()
        .max_by(|(a_number, a_size), (b_number, b_size)| {
            a_size.cmp(b_size).then_with(|| b_number.cmp(a_number))
        })
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    common: Zone,
    personal: PlayerMap<Zone>,
    gains: PlayerMap<GainPile>,

    turn_player: PlayerId,
    /// Fully completed rounds.
    turn_count: u32,
    /// Flips in the current, unresolved turn.
    flipped_count: u32,
    matched: MatchedSet,

    /// Stored and reset, never consulted by resolution.
    privilege_available: bool,
    scene: Scene,

    max_number: u8,
}

impl GameState {
    /// Create an empty state in `Preparing`.
    #[must_use]
    pub fn new(config: &RulesConfig) -> Self {
        Self {
            common: Zone::new(),
            personal: PlayerMap::with_default(),
            gains: PlayerMap::with_default(),
            turn_player: PlayerId::FIRST,
            turn_count: 0,
            flipped_count: 0,
            matched: MatchedSet::new(),
            privilege_available: true,
            scene: Scene::Preparing,
            max_number: config.max_number,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn common(&self) -> &Zone {
        &self.common
    }

    #[must_use]
    pub fn personal(&self, player: PlayerId) -> &Zone {
        &self.personal[player]
    }

    #[must_use]
    pub fn gain_pile(&self, player: PlayerId) -> &GainPile {
        &self.gains[player]
    }

    /// A player's score: cards in their gain pile.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> usize {
        self.gains[player].len()
    }

    #[must_use]
    pub fn turn_player(&self) -> PlayerId {
        self.turn_player
    }

    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    #[must_use]
    pub fn flipped_count(&self) -> u32 {
        self.flipped_count
    }

    #[must_use]
    pub fn matched(&self) -> &[Card] {
        &self.matched
    }

    #[must_use]
    pub fn privilege_available(&self) -> bool {
        self.privilege_available
    }

    #[must_use]
    pub fn scene(&self) -> Scene {
        self.scene
    }

    /// Which table zone holds the card, if it is still on the table.
    #[must_use]
    pub fn location_of(&self, id: CardId) -> Option<CardLocation> {
        if self.common.contains(id) {
            return Some(CardLocation::Common);
        }
        self.personal
            .iter()
            .find(|(_, zone)| zone.contains(id))
            .map(|(player, _)| CardLocation::Personal(player))
    }

    /// Look up a card still on the table.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        match self.location_of(id)? {
            CardLocation::Common => self.common.card(id),
            CardLocation::Personal(player) => self.personal[player].card(id),
        }
    }

    /// Cards the acting player may still flip: common plus their own zone.
    #[must_use]
    pub fn reachable_cards(&self, player: PlayerId) -> usize {
        self.common.present_count() + self.personal[player].present_count()
    }

    /// True when the common zone or either personal zone is exhausted.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.common.is_exhausted() || self.personal.iter().any(|(_, zone)| zone.is_exhausted())
    }

    // === Mutations ===

    /// Seed the three table zones.
    pub fn set_zones(&mut self, common: Vec<Card>, first: Vec<Card>, second: Vec<Card>) {
        self.common = Zone::from_cards(common);
        self.personal = PlayerMap::from_pair(Zone::from_cards(first), Zone::from_cards(second));
    }

    /// Clear scores and per-game counters.
    pub fn reset_round_meta(&mut self) {
        for (_, pile) in self.gains.iter_mut() {
            pile.clear();
        }
        self.turn_count = 0;
        self.matched.clear();
        self.privilege_available = true;
        self.flipped_count = 0;
    }

    pub fn set_privilege(&mut self, available: bool) {
        self.privilege_available = available;
    }

    pub fn set_turn_player(&mut self, player: PlayerId) {
        self.turn_player = player;
    }

    /// Turn over the card with `id` wherever it sits and count the flip.
    ///
    /// Returns false, leaving the state untouched, when the card is no
    /// longer on the table.
    pub fn flip(&mut self, id: CardId) -> bool {
        let flipped = match self.location_of(id) {
            Some(CardLocation::Common) => self.common.flip(id),
            Some(CardLocation::Personal(player)) => self.personal[player].flip(id),
            None => false,
        };

        if flipped {
            self.flipped_count += 1;
        } else {
            debug!(card = id.raw(), "flip ignored, card not on table");
        }
        flipped
    }

    /// Advance every common card's number, wrapping back to 1.
    pub fn rotate_common_numbers(&mut self) {
        self.common.rotate_numbers(self.max_number);
    }

    /// Detect, remove and score the best face-up group for the turn player.
    ///
    /// Considers face-up cards in the common zone and the turn player's own
    /// zone. The number with the most face-up cards wins, smallest number on
    /// ties; a group of at least two is a match. Matched cards leave empty
    /// slots and go to the turn player's gain pile.
    ///
    /// Returns the matched cards (empty when nothing matched).
    pub fn resolve_match(&mut self) -> &[Card] {
        let player = self.turn_player;
        self.matched.clear();

        let open = self.common.face_up().chain(self.personal[player].face_up());
        let winner = select_winning_number(open.map(|card| card.number));

        if let Some((number, size)) = winner {
            if size >= 2 {
                let mut matched: MatchedSet = self.common.take_face_up(number).into_iter().collect();
                matched.extend(self.personal[player].take_face_up(number));
                self.gains[player].extend(matched.iter().copied());
                self.matched = matched;
            }
        }

        &self.matched
    }

    /// Turn every face-up card on the table face down.
    pub fn unflip_unmatched(&mut self) {
        self.common.turn_face_down();
        for (_, zone) in self.personal.iter_mut() {
            zone.turn_face_down();
        }
    }

    /// Hand the turn to `next`.
    ///
    /// Handing it back to the first player completes a round: the round
    /// counter advances and the common numbers rotate. Returns whether a
    /// round completed.
    pub fn advance_turn(&mut self, next: PlayerId) -> bool {
        self.turn_player = next;
        let round_completed = next == PlayerId::FIRST;
        if round_completed {
            self.turn_count += 1;
            self.rotate_common_numbers();
            debug!(rounds = self.turn_count, "round completed, common numbers rotated");
        }
        round_completed
    }

    /// Zero the flip counter once a turn is resolved.
    pub fn reset_flipped_count(&mut self) {
        self.flipped_count = 0;
    }

    /// End the game. A finished game stays finished.
    pub fn finish(&mut self) {
        self.scene = Scene::Finished;
    }

    /// Move the scene forward. Staying put is allowed; going back is not.
    pub fn set_scene(&mut self, scene: Scene) -> Result<(), EngineError> {
        if scene < self.scene {
            return Err(EngineError::SceneRegression {
                from: self.scene,
                to: scene,
            });
        }
        self.scene = scene;
        Ok(())
    }
}
