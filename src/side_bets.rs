//! Perfect Pairs and 21+3 side bets.
//!
//! Both wagers are judged on the opening deal only. A winning side bet
//! returns the stake plus `stake * multiplier`.

use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank};

/// Which side bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SideBetKind {
    /// Perfect Pairs, on the player's first two cards.
    PerfectPairs,
    /// 21+3, on the player's first two cards plus the dealer up card.
    #[serde(rename = "twentyOnePlus3")]
    TwentyOnePlusThree,
}

/// A winning Perfect Pairs hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerfectPairsHand {
    /// Same rank and suit.
    Perfect,
    /// Same rank and colour, different suit.
    Colored,
    /// Same rank, different colour.
    Mixed,
}

impl PerfectPairsHand {
    /// Winnings per unit staked.
    #[must_use]
    pub const fn multiplier(self) -> u64 {
        match self {
            Self::Perfect => 25,
            Self::Colored => 12,
            Self::Mixed => 6,
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect Pair! (25:1)",
            Self::Colored => "Colored Pair! (12:1)",
            Self::Mixed => "Mixed Pair! (6:1)",
        }
    }
}

/// A winning 21+3 hand, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwentyOnePlusThreeHand {
    /// Three cards of the same rank and suit.
    SuitedTrips,
    /// Consecutive ranks in one suit.
    StraightFlush,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Consecutive ranks.
    Straight,
    /// One suit.
    Flush,
}

impl TwentyOnePlusThreeHand {
    /// Winnings per unit staked.
    #[must_use]
    pub const fn multiplier(self) -> u64 {
        match self {
            Self::SuitedTrips => 100,
            Self::StraightFlush => 40,
            Self::ThreeOfAKind => 30,
            Self::Straight => 10,
            Self::Flush => 5,
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::SuitedTrips => "Suited Trips! (100:1)",
            Self::StraightFlush => "Straight Flush! (40:1)",
            Self::ThreeOfAKind => "Three of a Kind! (30:1)",
            Self::Straight => "Straight! (10:1)",
            Self::Flush => "Flush! (5:1)",
        }
    }
}

/// The result of one side bet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideBetResult {
    /// Which side bet.
    pub kind: SideBetKind,
    /// Amount staked.
    pub bet: u64,
    /// Whether it won.
    pub won: bool,
    /// Winnings, excluding the stake.
    pub winnings: u64,
    /// Total returned to the player (stake plus winnings, or 0).
    pub payout: u64,
    /// Human-readable result.
    pub description: String,
    /// The Perfect Pairs hand, when it won.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair: Option<PerfectPairsHand>,
    /// The 21+3 hand, when it won.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poker_hand: Option<TwentyOnePlusThreeHand>,
}

impl SideBetResult {
    fn lost(kind: SideBetKind, bet: u64, description: &str) -> Self {
        Self {
            kind,
            bet,
            won: false,
            winnings: 0,
            payout: 0,
            description: String::from(description),
            pair: None,
            poker_hand: None,
        }
    }

    fn won(kind: SideBetKind, bet: u64, multiplier: u64, description: &str) -> Self {
        let winnings = bet.saturating_mul(multiplier);
        Self {
            kind,
            bet,
            won: true,
            winnings,
            payout: bet.saturating_add(winnings),
            description: String::from(description),
            pair: None,
            poker_hand: None,
        }
    }
}

/// Classifies the player's opening two cards for Perfect Pairs.
#[must_use]
pub fn perfect_pairs_hand(cards: &[Card]) -> Option<PerfectPairsHand> {
    let [first, second] = cards else {
        return None;
    };
    if first.rank != second.rank {
        return None;
    }
    Some(if first.suit == second.suit {
        PerfectPairsHand::Perfect
    } else if first.suit.is_red() == second.suit.is_red() {
        PerfectPairsHand::Colored
    } else {
        PerfectPairsHand::Mixed
    })
}

/// Evaluates a Perfect Pairs wager.
#[must_use]
pub fn evaluate_perfect_pairs(cards: &[Card], bet: u64) -> SideBetResult {
    match perfect_pairs_hand(cards) {
        Some(hand) => SideBetResult {
            pair: Some(hand),
            ..SideBetResult::won(
                SideBetKind::PerfectPairs,
                bet,
                hand.multiplier(),
                hand.description(),
            )
        },
        None => SideBetResult::lost(SideBetKind::PerfectPairs, bet, "No pair"),
    }
}

fn is_straight(cards: &[Card; 3]) -> bool {
    let mut ordinals = cards.map(|card| card.rank.ordinal());
    ordinals.sort_unstable();
    let [low, mid, high] = ordinals;
    // A-2-3 is already consecutive with the ace low.
    (mid == low + 1 && high == mid + 1) || ordinals == [Rank::Ace.ordinal(), 12, 13]
}

/// Classifies the three-card poker hand for 21+3.
#[must_use]
pub fn twenty_one_plus_three_hand(
    player: &[Card],
    dealer_up: Card,
) -> Option<TwentyOnePlusThreeHand> {
    let [first, second] = player else {
        return None;
    };
    let cards = [*first, *second, dealer_up];

    let flush = cards.iter().all(|card| card.suit == first.suit);
    let trips = cards.iter().all(|card| card.rank == first.rank);
    let straight = is_straight(&cards);

    match (trips, straight, flush) {
        (true, _, true) => Some(TwentyOnePlusThreeHand::SuitedTrips),
        (_, true, true) => Some(TwentyOnePlusThreeHand::StraightFlush),
        (true, _, false) => Some(TwentyOnePlusThreeHand::ThreeOfAKind),
        (false, true, false) => Some(TwentyOnePlusThreeHand::Straight),
        (false, false, true) => Some(TwentyOnePlusThreeHand::Flush),
        (false, false, false) => None,
    }
}

/// Evaluates a 21+3 wager.
#[must_use]
pub fn evaluate_twenty_one_plus_three(player: &[Card], dealer_up: Card, bet: u64) -> SideBetResult {
    if player.len() != 2 {
        return SideBetResult::lost(SideBetKind::TwentyOnePlusThree, bet, "Not eligible");
    }
    match twenty_one_plus_three_hand(player, dealer_up) {
        Some(hand) => SideBetResult {
            poker_hand: Some(hand),
            ..SideBetResult::won(
                SideBetKind::TwentyOnePlusThree,
                bet,
                hand.multiplier(),
                hand.description(),
            )
        },
        None => SideBetResult::lost(
            SideBetKind::TwentyOnePlusThree,
            bet,
            "No winning combination",
        ),
    }
}

/// Side-bet stakes for the next deal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideBets {
    /// Perfect Pairs stake.
    pub perfect_pairs: u64,
    /// 21+3 stake.
    #[serde(rename = "twentyOnePlus3")]
    pub twenty_one_plus_three: u64,
}

impl SideBets {
    /// Returns the stake for `kind`.
    #[must_use]
    pub const fn get(&self, kind: SideBetKind) -> u64 {
        match kind {
            SideBetKind::PerfectPairs => self.perfect_pairs,
            SideBetKind::TwentyOnePlusThree => self.twenty_one_plus_three,
        }
    }

    pub(crate) const fn set(&mut self, kind: SideBetKind, amount: u64) {
        match kind {
            SideBetKind::PerfectPairs => self.perfect_pairs = amount,
            SideBetKind::TwentyOnePlusThree => self.twenty_one_plus_three = amount,
        }
    }

    /// Returns the combined stake.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.perfect_pairs.saturating_add(self.twenty_one_plus_three)
    }
}
