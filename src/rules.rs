//! Dealer draw rule, outcome determination and payouts.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::config::{PayoutRatio, RoundingMode};
use crate::hand::{hand_value, is_blackjack, is_bust};

/// Result of a single hand against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Player wins (dealer busts or player has the higher total).
    Win,
    /// Player loses (player busts or dealer has the higher total).
    Lose,
    /// Push (tie).
    Push,
    /// Player has a natural and the dealer does not.
    Blackjack,
    /// Player surrendered.
    Surrender,
}

impl Outcome {
    /// Returns whether the outcome pays the player more than the stake.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win | Self::Blackjack)
    }

    /// Returns a short label for messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Win => "Win",
            Self::Lose => "Lose",
            Self::Push => "Push",
            Self::Blackjack => "Blackjack",
            Self::Surrender => "Surrender",
        }
    }
}

/// Returns whether the dealer must draw another card.
///
/// The dealer hits below 17 and stands above it. On exactly 17 the dealer
/// hits only a soft total, and only when `hits_soft_17` is set.
#[must_use]
pub fn dealer_should_hit(cards: &[Card], hits_soft_17: bool) -> bool {
    let value = hand_value(cards);
    match value.value.cmp(&17) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => value.is_soft && hits_soft_17,
    }
}

/// Compares a finished player hand with the dealer's hand.
///
/// A player bust loses even when the dealer also busts. Any two-card 21
/// counts as a natural, split hands included.
#[must_use]
pub fn determine_outcome(player: &[Card], dealer: &[Card]) -> Outcome {
    if is_bust(player) {
        return Outcome::Lose;
    }

    let player_natural = is_blackjack(player);
    let dealer_natural = is_blackjack(dealer);

    match (player_natural, dealer_natural) {
        (true, true) => return Outcome::Push,
        (true, false) => return Outcome::Blackjack,
        (false, true) => return Outcome::Lose,
        (false, false) => {}
    }

    if is_bust(dealer) {
        return Outcome::Win;
    }

    match hand_value(player).value.cmp(&hand_value(dealer).value) {
        Ordering::Greater => Outcome::Win,
        Ordering::Less => Outcome::Lose,
        Ordering::Equal => Outcome::Push,
    }
}

/// Divides `amount` by `divisor`, rounding the remainder per `mode`.
pub(crate) const fn divide_rounded(amount: u64, divisor: u64, mode: RoundingMode) -> u64 {
    let quotient = amount / divisor;
    let remainder = amount % divisor;
    if remainder == 0 {
        return quotient;
    }
    match mode {
        RoundingMode::Up => quotient + 1,
        RoundingMode::Down => quotient,
        RoundingMode::Nearest => {
            if remainder * 2 >= divisor {
                quotient + 1
            } else {
                quotient
            }
        }
    }
}

/// Returns the total amount handed back for `bet` with the given outcome.
///
/// Blackjack returns the stake plus `bet * num / den`, with fractional units
/// rounded per `rounding`. [`Outcome::Surrender`] yields 0 here; use
/// [`surrender_refund`].
///
/// ```
/// use bjtable::{Outcome, PayoutRatio, RoundingMode, calculate_payout};
///
/// let three_to_two = PayoutRatio::new(3, 2);
/// assert_eq!(calculate_payout(100, Outcome::Blackjack, three_to_two, RoundingMode::Down), 250);
/// assert_eq!(calculate_payout(100, Outcome::Win, three_to_two, RoundingMode::Down), 200);
/// assert_eq!(calculate_payout(100, Outcome::Push, three_to_two, RoundingMode::Down), 100);
/// assert_eq!(calculate_payout(100, Outcome::Lose, three_to_two, RoundingMode::Down), 0);
/// ```
#[must_use]
pub const fn calculate_payout(
    bet: u64,
    outcome: Outcome,
    ratio: PayoutRatio,
    rounding: RoundingMode,
) -> u64 {
    match outcome {
        Outcome::Blackjack => bet.saturating_add(ratio.winnings(bet, rounding)),
        Outcome::Win => bet.saturating_mul(2),
        Outcome::Push => bet,
        Outcome::Lose | Outcome::Surrender => 0,
    }
}

/// Returns half of `bet`, rounded per `rounding`.
#[must_use]
pub const fn surrender_refund(bet: u64, rounding: RoundingMode) -> u64 {
    divide_rounded(bet, 2, rounding)
}
