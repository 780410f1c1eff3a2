//! Settlement records.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::rules::Outcome;

/// Result for a single hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandResult {
    /// The hand index (for split hands).
    pub hand_index: usize,
    /// The cards the hand finished with.
    pub cards: Vec<Card>,
    /// The outcome of the hand.
    pub outcome: Outcome,
    /// The final stake on this hand.
    pub bet: u64,
    /// Total returned for this hand (stake included).
    pub payout: u64,
    /// The player's hand value.
    pub player_value: u8,
    /// Whether the hand was doubled.
    pub doubled: bool,
    /// Whether the hand came from a split.
    pub from_split: bool,
}

impl HandResult {
    /// Net result for this hand.
    #[must_use]
    #[expect(clippy::cast_possible_wrap, reason = "stakes fit in i64")]
    pub const fn net(&self) -> i64 {
        self.payout as i64 - self.bet as i64
    }
}

/// Result of a settled round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    /// Results for each hand, in table order.
    pub hands: Vec<HandResult>,
    /// The dealer's final cards.
    pub dealer_cards: Vec<Card>,
    /// The dealer's final value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// Insurance stake (0 if none was taken).
    pub insurance_bet: u64,
    /// Insurance return (stake plus 2:1, or 0).
    pub insurance_payout: u64,
    /// Everything staked this round, insurance included.
    pub total_bet: u64,
    /// Everything returned this round, insurance included.
    pub total_payout: u64,
    /// `total_payout - total_bet`.
    pub net: i64,
    /// Aggregate result for the round.
    pub outcome: Outcome,
    /// One line per settled item, then a total.
    pub messages: Vec<String>,
}

impl RoundResult {
    /// Returns whether an insurance bet paid out.
    #[must_use]
    pub const fn insurance_won(&self) -> bool {
        self.insurance_payout > 0
    }

    /// Returns the message trail as a single string.
    #[must_use]
    pub fn message(&self) -> String {
        self.messages.join("\n")
    }
}
