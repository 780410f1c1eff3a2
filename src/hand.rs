//! Hand-value arithmetic and the player and dealer hands.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank};
use crate::rules::Outcome;

/// The value of a set of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandValue {
    /// Best total, with aces demoted to 1 only as needed.
    pub value: u8,
    /// Whether an ace is still counted as 11.
    pub is_soft: bool,
}

/// Computes the value of `cards`.
///
/// Aces start at 11. While the total is over 21 and an ace is still counted
/// high, one ace is demoted to 1.
///
/// ```
/// use bjtable::{Card, Rank, Suit, hand_value};
///
/// let cards = [
///     Card::new(Suit::Spades, Rank::Ace),
///     Card::new(Suit::Hearts, Rank::Ace),
///     Card::new(Suit::Clubs, Rank::Nine),
/// ];
/// let value = hand_value(&cards);
/// assert_eq!(value.value, 21);
/// assert!(value.is_soft);
/// ```
#[must_use]
pub fn hand_value(cards: &[Card]) -> HandValue {
    let mut value: u8 = 0;
    let mut soft_aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            soft_aces += 1;
        }
        value = value.saturating_add(card.value());
    }

    while value > 21 && soft_aces > 0 {
        value -= 10;
        soft_aces -= 1;
    }

    HandValue {
        value,
        is_soft: soft_aces > 0 && value <= 21,
    }
}

/// Returns whether `cards` is a natural: exactly two cards totalling 21.
#[must_use]
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards).value == 21
}

/// Returns whether `cards` totals more than 21.
#[must_use]
pub fn is_bust(cards: &[Card]) -> bool {
    hand_value(cards).value > 21
}

/// Returns whether `cards` is exactly two cards of the same rank.
///
/// A King and a Queen are not a pair.
#[must_use]
pub fn is_pair(cards: &[Card]) -> bool {
    matches!(cards, [a, b] if a.rank == b.rank)
}

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandStatus {
    /// Hand is waiting for decisions.
    Active,
    /// Player has stood, or the hand was closed by a double or split aces.
    Stand,
    /// Hand has busted (over 21).
    Bust,
    /// Player has surrendered.
    Surrender,
}

/// A player's hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hand {
    cards: Vec<Card>,
    bet: u64,
    status: HandStatus,
    doubled: bool,
    from_split: bool,
    #[serde(default)]
    result: Option<Outcome>,
    #[serde(default)]
    payout: Option<u64>,
}

impl Hand {
    /// Creates a dealt hand with the given bet.
    #[must_use]
    pub fn new(cards: Vec<Card>, bet: u64) -> Self {
        let mut hand = Self {
            cards,
            bet,
            status: HandStatus::Active,
            doubled: false,
            from_split: false,
            result: None,
            payout: None,
        };
        hand.refresh_status();
        hand
    }

    /// Creates one of the two hands produced by a split.
    #[must_use]
    pub fn from_split(first: Card, second: Card, bet: u64) -> Self {
        let mut hand = Self::new(alloc::vec![first, second], bet);
        hand.from_split = true;
        hand
    }

    fn refresh_status(&mut self) {
        if self.status == HandStatus::Active && is_bust(&self.cards) {
            self.status = HandStatus::Bust;
        }
    }

    /// Adds a card, busting the hand if it goes over 21.
    pub(crate) fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.refresh_status();
    }

    pub(crate) const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Doubles the stake and marks the hand as doubled.
    pub(crate) const fn double_bet(&mut self) {
        self.bet *= 2;
        self.doubled = true;
    }

    pub(crate) const fn settle(&mut self, outcome: Outcome, payout: u64) {
        self.result = Some(outcome);
        self.payout = Some(payout);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Returns whether the hand still takes decisions.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == HandStatus::Active
    }

    /// Returns the bet amount for this hand.
    #[must_use]
    pub const fn bet(&self) -> u64 {
        self.bet
    }

    /// Returns whether the hand was doubled.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Returns whether this hand is from a split.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Returns whether this hand is a split ace.
    #[must_use]
    pub fn is_split_ace(&self) -> bool {
        self.from_split && self.cards.first().is_some_and(|card| card.is_ace())
    }

    /// Returns the settled outcome, once the round is over.
    #[must_use]
    pub const fn result(&self) -> Option<Outcome> {
        self.result
    }

    /// Returns the settled payout, once the round is over.
    #[must_use]
    pub const fn payout(&self) -> Option<u64> {
        self.payout
    }

    /// Returns the value of the hand.
    #[must_use]
    pub fn hand_value(&self) -> HandValue {
        hand_value(&self.cards)
    }

    /// Returns the total of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.hand_value().value
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.hand_value().is_soft
    }

    /// Returns whether the hand is a two-card 21.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        is_blackjack(&self.cards)
    }

    /// Returns whether the hand is a two-card pair.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        is_pair(&self.cards)
    }

    /// Returns how many cards of `rank` the hand holds.
    #[must_use]
    pub fn count_rank(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|card| card.rank == rank).count()
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// The dealer's hand.
///
/// The first card is the up card, the second the hole card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerHand {
    cards: Vec<Card>,
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            hole_revealed: false,
        }
    }

    /// Adds a card to the hand.
    pub(crate) fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the up card.
    #[must_use]
    pub fn up_card(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    /// Returns the hole card.
    #[must_use]
    pub fn hole_card(&self) -> Option<Card> {
        self.cards.get(1).copied()
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    pub(crate) const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Returns the cards the player can see.
    #[must_use]
    pub fn visible_cards(&self) -> &[Card] {
        if self.hole_revealed {
            &self.cards
        } else {
            &self.cards[..self.cards.len().min(1)]
        }
    }

    /// Calculates the visible value (only the up card if the hole is hidden).
    #[must_use]
    pub fn visible_value(&self) -> u8 {
        hand_value(self.visible_cards()).value
    }

    /// Returns the full value of the hand.
    #[must_use]
    pub fn hand_value(&self) -> HandValue {
        hand_value(&self.cards)
    }

    /// Calculates the full value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.hand_value().value
    }

    /// Returns whether the hand is a blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        is_bust(&self.cards)
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.hand_value().is_soft
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
