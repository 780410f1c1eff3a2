//! Multi-deck shoe.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::EngineError;

/// Remaining-card count below which the shoe is rebuilt before the next round.
pub const RESHUFFLE_THRESHOLD: usize = 52;

/// An ordered shoe of cards, consumed from the front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shoe {
    cards: VecDeque<Card>,
    deck_count: u8,
}

impl Shoe {
    /// Builds `deck_count` standard decks and shuffles them with `rng`.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::Shoe;
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let mut rng = ChaCha8Rng::seed_from_u64(7);
    /// let shoe = Shoe::new(6, &mut rng);
    /// assert_eq!(shoe.len(), 312);
    /// ```
    #[must_use]
    pub fn new<R: Rng + ?Sized>(deck_count: u8, rng: &mut R) -> Self {
        let mut cards = Vec::with_capacity(deck_count as usize * DECK_SIZE);

        for _ in 0..deck_count {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        // Fisher-Yates
        cards.shuffle(rng);

        Self {
            cards: cards.into(),
            deck_count,
        }
    }

    /// Builds a stacked shoe. The first card of `cards` is drawn first.
    ///
    /// The deck count is derived from the number of cards, rounded up.
    #[must_use]
    pub fn from_cards<I: IntoIterator<Item = Card>>(cards: I) -> Self {
        let cards: VecDeque<Card> = cards.into_iter().collect();
        let deck_count = cards.len().div_ceil(DECK_SIZE).clamp(1, u8::MAX as usize) as u8;
        Self { cards, deck_count }
    }

    /// Draws the front card.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyShoe`] if no cards remain.
    pub fn draw(&mut self) -> Result<Card, EngineError> {
        let card = self.cards.pop_front().ok_or(EngineError::EmptyShoe)?;
        trace!(card = %card, remaining = self.cards.len(), "card drawn");
        Ok(card)
    }

    /// Returns the number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the shoe is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the number of decks the shoe was built from.
    #[must_use]
    pub const fn deck_count(&self) -> u8 {
        self.deck_count
    }

    /// Returns the number of cards dealt since the shoe was built.
    #[must_use]
    pub fn cards_dealt(&self) -> usize {
        (self.deck_count as usize * DECK_SIZE).saturating_sub(self.cards.len())
    }

    /// Returns whether the shoe should be rebuilt before the next round.
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        self.cards.len() < RESHUFFLE_THRESHOLD
    }

    /// Iterates over the remaining cards in draw order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }
}
