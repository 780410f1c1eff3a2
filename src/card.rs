//! Card types and deck utilities.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Card suit.
///
/// Serialized as the suit symbol (`"♠"`, `"♥"`, `"♦"`, `"♣"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    /// Spades.
    #[serde(rename = "♠")]
    Spades,
    /// Hearts.
    #[serde(rename = "♥")]
    Hearts,
    /// Diamonds.
    #[serde(rename = "♦")]
    Diamonds,
    /// Clubs.
    #[serde(rename = "♣")]
    Clubs,
}

impl Suit {
    /// All suits in shoe-building order.
    pub const ALL: [Self; 4] = [Self::Spades, Self::Hearts, Self::Diamonds, Self::Clubs];

    /// Returns whether the suit is red (hearts or diamonds).
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Self::Hearts | Self::Diamonds)
    }

    /// Returns the suit symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Spades => '♠',
            Self::Hearts => '♥',
            Self::Diamonds => '♦',
            Self::Clubs => '♣',
        }
    }
}

/// Card rank.
///
/// Serialized as the rank label (`"A"`, `"2"` .. `"10"`, `"J"`, `"Q"`, `"K"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    /// Ace.
    #[serde(rename = "A")]
    Ace,
    /// Two.
    #[serde(rename = "2")]
    Two,
    /// Three.
    #[serde(rename = "3")]
    Three,
    /// Four.
    #[serde(rename = "4")]
    Four,
    /// Five.
    #[serde(rename = "5")]
    Five,
    /// Six.
    #[serde(rename = "6")]
    Six,
    /// Seven.
    #[serde(rename = "7")]
    Seven,
    /// Eight.
    #[serde(rename = "8")]
    Eight,
    /// Nine.
    #[serde(rename = "9")]
    Nine,
    /// Ten.
    #[serde(rename = "10")]
    Ten,
    /// Jack.
    #[serde(rename = "J")]
    Jack,
    /// Queen.
    #[serde(rename = "Q")]
    Queen,
    /// King.
    #[serde(rename = "K")]
    King,
}

impl Rank {
    /// All ranks from Ace to King.
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Returns the blackjack value of the rank, counting an Ace as 11.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Ace => 11,
            Self::Jack | Self::Queen | Self::King => 10,
            other => other.ordinal(),
        }
    }

    /// Returns the position of the rank, 1 (Ace) through 13 (King).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8 + 1
    }

    /// Returns the zero-based table index of the rank.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the rank label used on the card face.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        }
    }

    /// Returns whether the rank is ten-valued (10, J, Q, K).
    #[must_use]
    pub const fn is_ten_value(self) -> bool {
        matches!(self, Self::Ten | Self::Jack | Self::Queen | Self::King)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card.
    pub rank: Rank,
}

impl Card {
    /// Creates a new card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Returns the blackjack value of the card, counting an Ace as 11.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    /// Returns whether the card is an Ace.
    #[must_use]
    pub const fn is_ace(self) -> bool {
        matches!(self.rank, Rank::Ace)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
