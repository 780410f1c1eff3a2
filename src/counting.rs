//! Card counting.
//!
//! Running count, true count and betting advice for five counting systems.

use serde::{Deserialize, Serialize};

use crate::card::{Card, DECK_SIZE, Rank};

/// A card-counting system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountingSystem {
    /// Hi-Lo.
    #[default]
    HiLo,
    /// Knock-Out (unbalanced).
    Ko,
    /// Hi-Opt I.
    HiOptI,
    /// Hi-Opt II.
    #[serde(rename = "hi-opt-ii")]
    HiOptII,
    /// Omega II.
    #[serde(rename = "omega-ii")]
    OmegaII,
}

// Columns follow Rank order: A, 2 .. 10, J, Q, K.
const HI_LO: [i8; 13] = [-1, 1, 1, 1, 1, 1, 0, 0, 0, -1, -1, -1, -1];
const KO: [i8; 13] = [-1, 1, 1, 1, 1, 1, 1, 0, 0, -1, -1, -1, -1];
const HI_OPT_I: [i8; 13] = [0, 0, 1, 1, 1, 1, 0, 0, 0, -1, -1, -1, -1];
const HI_OPT_II: [i8; 13] = [0, 1, 1, 2, 2, 1, 0, 0, 0, -2, -2, -2, -2];
const OMEGA_II: [i8; 13] = [0, 1, 1, 2, 2, 1, 1, 0, -1, -2, -2, -2, -2];

impl CountingSystem {
    /// All systems.
    pub const ALL: [Self; 5] = [Self::HiLo, Self::Ko, Self::HiOptI, Self::HiOptII, Self::OmegaII];

    const fn table(self) -> &'static [i8; 13] {
        match self {
            Self::HiLo => &HI_LO,
            Self::Ko => &KO,
            Self::HiOptI => &HI_OPT_I,
            Self::HiOptII => &HI_OPT_II,
            Self::OmegaII => &OMEGA_II,
        }
    }

    /// Point value of `rank` in this system.
    #[must_use]
    pub const fn rank_value(self, rank: Rank) -> i8 {
        self.table()[rank.index()]
    }

    /// Short description of the system.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::HiLo => "Hi-Lo: Most popular system. +1 for 2-6, 0 for 7-9, -1 for 10-A.",
            Self::Ko => "Knock-Out (KO): Unbalanced system. +1 for 2-7, 0 for 8-9, -1 for 10-A.",
            Self::HiOptI => "Hi-Opt I: Ignores aces. +1 for 3-6, 0 for 2,7-9,A, -1 for 10-K.",
            Self::HiOptII => {
                "Hi-Opt II: More powerful. +2 for 4-5, +1 for 2-3,6, 0 for 7-9,A, -2 for 10-K."
            }
            Self::OmegaII => "Omega II: Advanced multi-level system with higher correlation.",
        }
    }
}

/// Point value of `card` under `system`.
#[must_use]
pub const fn card_count_value(card: Card, system: CountingSystem) -> i8 {
    system.rank_value(card.rank)
}

// Halves round toward positive infinity.
#[cfg(feature = "std")]
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_half_up(value: f64) -> f64 {
    libm::floor(value + 0.5)
}

/// Estimated decks left, never below half a deck.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "card counts are far below f64 precision limits"
)]
pub fn decks_remaining(total_decks: u8, cards_dealt: u32) -> f64 {
    let total = f64::from(total_decks) * DECK_SIZE as f64;
    ((total - f64::from(cards_dealt)) / DECK_SIZE as f64).max(0.5)
}

/// Running count per remaining deck, rounded to one decimal.
#[must_use]
pub fn true_count(running_count: i32, decks_remaining: f64) -> f64 {
    if decks_remaining <= 0.0 {
        return 0.0;
    }
    round_half_up(f64::from(running_count) / decks_remaining * 10.0) / 10.0
}

/// Betting advice for a true count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountRecommendation {
    /// Units to bet, as a multiple of the table minimum.
    pub bet_multiplier: u8,
    /// Whether insurance is worth taking.
    pub should_insure: bool,
    /// Whether to apply index-play deviations.
    pub should_deviate: bool,
    /// Human-readable advice.
    pub suggestion: &'static str,
}

impl CountRecommendation {
    const fn new(
        bet_multiplier: u8,
        should_insure: bool,
        should_deviate: bool,
        suggestion: &'static str,
    ) -> Self {
        Self {
            bet_multiplier,
            should_insure,
            should_deviate,
            suggestion,
        }
    }

    /// Advice before any card has been counted.
    pub const INITIAL: Self = Self::new(1, false, false, "Count starting. Play table minimum.");
}

/// Returns the advice bucket for `true_count`.
#[must_use]
pub fn recommendation(true_count: f64) -> CountRecommendation {
    match true_count {
        tc if tc >= 5.0 => CountRecommendation::new(
            8,
            true,
            true,
            "Very favorable! Max bet recommended. Consider insurance and strategy deviations.",
        ),
        tc if tc >= 4.0 => CountRecommendation::new(
            6,
            true,
            true,
            "Highly favorable. Increase bet significantly. Insurance and deviations recommended.",
        ),
        tc if tc >= 3.0 => CountRecommendation::new(
            4,
            true,
            true,
            "Favorable count. Increase bet. Consider insurance on borderline hands.",
        ),
        tc if tc >= 2.0 => CountRecommendation::new(
            3,
            false,
            true,
            "Slightly favorable. Moderate bet increase. Some deviations appropriate.",
        ),
        tc if tc >= 1.0 => CountRecommendation::new(
            2,
            false,
            false,
            "Slightly positive. Small bet increase recommended.",
        ),
        tc if tc >= -1.0 => {
            CountRecommendation::new(1, false, false, "Neutral count. Play table minimum.")
        }
        tc if tc >= -2.0 => CountRecommendation::new(
            1,
            false,
            false,
            "Slightly negative. Consider table minimum or leaving.",
        ),
        _ => CountRecommendation::new(
            1,
            false,
            false,
            "Unfavorable count. Table minimum only or find another table.",
        ),
    }
}

/// Count state for the current shoe.
///
/// Seen cards are tallied per rank, so the running count can be recomputed
/// for any system.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardCounter {
    is_active: bool,
    system: CountingSystem,
    #[serde(skip)]
    seen: [u16; 13],
    running_count: i32,
    true_count: f64,
    decks_remaining: f64,
    cards_dealt: u32,
    total_decks: u8,
    recommendations: CountRecommendation,
    #[serde(skip)]
    whole_shoe: bool,
}

impl CardCounter {
    /// Creates an inactive Hi-Lo counter for a fresh shoe.
    #[must_use]
    pub fn new(total_decks: u8) -> Self {
        Self {
            is_active: false,
            system: CountingSystem::HiLo,
            seen: [0; 13],
            running_count: 0,
            true_count: 0.0,
            decks_remaining: f64::from(total_decks),
            cards_dealt: 0,
            total_decks,
            recommendations: CountRecommendation::INITIAL,
            whole_shoe: false,
        }
    }

    /// Records a card that became visible.
    pub fn observe(&mut self, card: Card) {
        self.seen[card.rank.index()] = self.seen[card.rank.index()].saturating_add(1);
        self.cards_dealt += 1;
        self.recompute();
    }

    /// Switches the counting system and recounts the cards seen so far.
    pub fn set_system(&mut self, system: CountingSystem) {
        self.system = system;
        if self.cards_dealt > 0 {
            self.recompute();
        }
    }

    /// Turns counting on or off.
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.whole_shoe = active && self.cards_dealt == 0;
    }

    /// Starts counting a new shoe.
    ///
    /// Returns whether the finished shoe was counted from its first card.
    pub fn reset_shoe(&mut self, total_decks: u8) -> bool {
        let counted_whole_shoe = self.is_active && self.whole_shoe && self.cards_dealt > 0;
        *self = Self {
            is_active: self.is_active,
            system: self.system,
            whole_shoe: self.is_active,
            ..Self::new(total_decks)
        };
        counted_whole_shoe
    }

    fn recompute(&mut self) {
        self.running_count = Rank::ALL
            .iter()
            .map(|rank| i32::from(self.system.rank_value(*rank)) * i32::from(self.seen[rank.index()]))
            .sum();
        self.decks_remaining = decks_remaining(self.total_decks, self.cards_dealt);
        self.true_count = true_count(self.running_count, self.decks_remaining);
        self.recommendations = recommendation(self.true_count);
    }

    /// Returns whether counting is shown.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the counting system.
    #[must_use]
    pub const fn system(&self) -> CountingSystem {
        self.system
    }

    /// Returns the running count.
    #[must_use]
    pub const fn running_count(&self) -> i32 {
        self.running_count
    }

    /// Returns the true count.
    #[must_use]
    pub const fn true_count(&self) -> f64 {
        self.true_count
    }

    /// Returns the estimated decks remaining.
    #[must_use]
    pub const fn decks_remaining(&self) -> f64 {
        self.decks_remaining
    }

    /// Returns how many cards have been counted in this shoe.
    #[must_use]
    pub const fn cards_dealt(&self) -> u32 {
        self.cards_dealt
    }

    /// Returns the number of decks in the shoe being counted.
    #[must_use]
    pub const fn total_decks(&self) -> u8 {
        self.total_decks
    }

    /// Returns the current advice.
    #[must_use]
    pub const fn recommendations(&self) -> CountRecommendation {
        self.recommendations
    }
}
