//! Basic strategy advisor.
//!
//! The charts are static matrices indexed by player total (or pair rank) and
//! the dealer's up-card value, 2 through 11 (Ace). Conditional chart entries
//! are resolved against what the table and the hand currently allow.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank};
use crate::config::GameConfig;
use crate::hand::{HandValue, hand_value, is_pair};

/// A chart entry, possibly conditional on table rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChartAction {
    /// Hit.
    Hit,
    /// Stand.
    Stand,
    /// Double if allowed, otherwise hit.
    DoubleOrHit,
    /// Double if allowed, otherwise stand.
    DoubleOrStand,
    /// Split.
    Split,
    /// Split if doubling after a split is allowed, otherwise hit.
    SplitIfDas,
    /// Surrender if allowed, otherwise hit.
    SurrenderOrHit,
    /// Surrender if allowed, otherwise stand.
    SurrenderOrStand,
    /// Surrender if allowed, otherwise split, otherwise hit.
    SurrenderOrSplit,
}

/// A concrete player decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerAction {
    /// Take a card.
    Hit,
    /// Keep the hand.
    Stand,
    /// Double the bet and take exactly one card.
    Double,
    /// Split a pair into two hands.
    Split,
    /// Give up half the bet.
    Surrender,
}

impl PlayerAction {
    /// Returns the action name in upper case.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Stand => "STAND",
            Self::Double => "DOUBLE",
            Self::Split => "SPLIT",
            Self::Surrender => "SURRENDER",
        }
    }
}

/// How good an available action is compared with the optimal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// The chart play.
    Optimal,
    /// A forgiving substitute.
    Acceptable,
    /// A mistake.
    Poor,
}

/// One graded option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// The action.
    pub action: PlayerAction,
    /// Its grade.
    pub quality: Quality,
    /// Whether it is the primary action.
    pub is_optimal: bool,
}

/// Which optional actions the hand can take right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    /// Doubling is legal.
    pub can_double: bool,
    /// Splitting is legal.
    pub can_split: bool,
    /// Surrendering is legal.
    pub can_surrender: bool,
}

/// The advisor's answer for one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyDecision {
    /// The resolved best action.
    pub primary_action: PlayerAction,
    /// The raw chart entry.
    pub chart_action: ChartAction,
    /// Every available action, graded.
    pub recommendations: Vec<Recommendation>,
    /// Short description of the position, e.g. `Hard 16 vs dealer 10`.
    pub explanation: String,
    /// Why the primary action is best.
    pub reasoning: String,
}

use ChartAction::{
    DoubleOrHit as Dh, DoubleOrStand as Ds, Hit as H, Split as P, SplitIfDas as Pd, Stand as S,
    SurrenderOrHit as Rh, SurrenderOrSplit as Rp,
};

const HARD_MIN: u8 = 4;
const SOFT_MIN: u8 = 12;

// Rows: hard 4..=21. Columns: dealer 2..=11.
const HARD: [[ChartAction; 10]; 18] = [
    [H, H, H, H, H, H, H, H, H, H],
    [H, H, H, H, H, H, H, H, H, H],
    [H, H, H, H, H, H, H, H, H, H],
    [H, H, H, H, H, H, H, H, H, H],
    [H, H, H, H, H, H, H, H, H, H],
    [H, Dh, Dh, Dh, Dh, H, H, H, H, H],
    [Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, H, H],
    [Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh],
    [H, H, S, S, S, H, H, H, H, H],
    [S, S, S, S, S, H, H, H, H, H],
    [S, S, S, S, S, H, H, H, H, H],
    [S, S, S, S, S, H, H, H, Rh, Rh],
    [S, S, S, S, S, H, H, Rh, Rh, Rh],
    [S, S, S, S, S, S, S, S, S, S],
    [S, S, S, S, S, S, S, S, S, S],
    [S, S, S, S, S, S, S, S, S, S],
    [S, S, S, S, S, S, S, S, S, S],
    [S, S, S, S, S, S, S, S, S, S],
];

// Rows: soft 12..=21 (A,A through A,10).
const SOFT: [[ChartAction; 10]; 10] = [
    [H, H, H, H, H, H, H, H, H, H],
    [H, H, H, Dh, Dh, H, H, H, H, H],
    [H, H, H, Dh, Dh, H, H, H, H, H],
    [H, H, Dh, Dh, Dh, H, H, H, H, H],
    [H, H, Dh, Dh, Dh, H, H, H, H, H],
    [H, Dh, Dh, Dh, Dh, H, H, H, H, H],
    [Ds, Ds, Ds, Ds, Ds, S, S, H, H, H],
    [S, S, S, S, Ds, S, S, S, S, S],
    [S, S, S, S, S, S, S, S, S, S],
    [S, S, S, S, S, S, S, S, S, S],
];

// Rows: pair rank A, 2 .. 10, J, Q, K.
const PAIRS: [[ChartAction; 10]; 13] = [
    [P, P, P, P, P, P, P, P, P, P],
    [Pd, Pd, P, P, P, P, H, H, H, H],
    [Pd, Pd, P, P, P, P, H, H, H, H],
    [H, H, H, Pd, Pd, H, H, H, H, H],
    [Dh, Dh, Dh, Dh, Dh, Dh, Dh, Dh, H, H],
    [Pd, P, P, P, P, H, H, H, H, H],
    [P, P, P, P, P, P, H, H, H, H],
    [P, P, P, P, P, P, P, P, Rp, P],
    [P, P, P, P, P, S, P, P, S, S],
    [S, S, S, S, S, S, S, S, S, S],
    [S, S, S, S, S, S, S, S, S, S],
    [S, S, S, S, S, S, S, S, S, S],
    [S, S, S, S, S, S, S, S, S, S],
];

/// Read access to the strategy charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyChart;

impl StrategyChart {
    fn column(dealer_value: u8) -> Option<usize> {
        (2..=11)
            .contains(&dealer_value)
            .then(|| usize::from(dealer_value - 2))
    }

    /// Chart entry for a hard total (4 through 21).
    #[must_use]
    pub fn hard(self, total: u8, dealer_value: u8) -> Option<ChartAction> {
        let row = HARD.get(usize::from(total.checked_sub(HARD_MIN)?))?;
        Some(row[Self::column(dealer_value)?])
    }

    /// Chart entry for a soft total (12 through 21).
    #[must_use]
    pub fn soft(self, total: u8, dealer_value: u8) -> Option<ChartAction> {
        let row = SOFT.get(usize::from(total.checked_sub(SOFT_MIN)?))?;
        Some(row[Self::column(dealer_value)?])
    }

    /// Chart entry for a pair of `rank`.
    #[must_use]
    pub fn pair(self, rank: Rank, dealer_value: u8) -> Option<ChartAction> {
        Some(PAIRS[rank.index()][Self::column(dealer_value)?])
    }
}

/// Resolves a conditional chart entry.
#[must_use]
pub fn resolve_chart_action(
    action: ChartAction,
    config: &GameConfig,
    available: Availability,
    from_split: bool,
) -> PlayerAction {
    let can_double = available.can_double && (!from_split || config.double_after_split);
    let can_surrender = available.can_surrender && config.surrender_allowed;

    match action {
        ChartAction::Hit => PlayerAction::Hit,
        ChartAction::Stand => PlayerAction::Stand,
        ChartAction::Split => PlayerAction::Split,
        ChartAction::DoubleOrHit if can_double => PlayerAction::Double,
        ChartAction::DoubleOrHit => PlayerAction::Hit,
        ChartAction::DoubleOrStand if can_double => PlayerAction::Double,
        ChartAction::DoubleOrStand => PlayerAction::Stand,
        ChartAction::SplitIfDas if available.can_split && config.double_after_split => {
            PlayerAction::Split
        }
        ChartAction::SplitIfDas => PlayerAction::Hit,
        ChartAction::SurrenderOrHit if can_surrender => PlayerAction::Surrender,
        ChartAction::SurrenderOrHit => PlayerAction::Hit,
        ChartAction::SurrenderOrStand if can_surrender => PlayerAction::Surrender,
        ChartAction::SurrenderOrStand => PlayerAction::Stand,
        ChartAction::SurrenderOrSplit if can_surrender => PlayerAction::Surrender,
        ChartAction::SurrenderOrSplit if available.can_split => PlayerAction::Split,
        ChartAction::SurrenderOrSplit => PlayerAction::Hit,
    }
}

/// Looks up the soft or hard chart entry for a hand value.
fn total_entry(chart: StrategyChart, value: HandValue, dealer_value: u8) -> Option<ChartAction> {
    if value.is_soft {
        chart.soft(value.value, dealer_value)
    } else {
        chart.hard(value.value, dealer_value)
    }
}

/// Returns the basic-strategy play for `player` against `dealer_up`.
///
/// Any two-card pair is looked up in the pair chart. When the chart says to
/// split but the split is unavailable, the hand is played by its total.
///
/// ```
/// use bjtable::{Availability, Card, GameConfig, PlayerAction, Rank, Suit, basic_strategy};
///
/// let hand = [Card::new(Suit::Hearts, Rank::Ten), Card::new(Suit::Clubs, Rank::Six)];
/// let dealer = Card::new(Suit::Spades, Rank::Ten);
/// let available = Availability { can_double: true, can_split: false, can_surrender: true };
/// let decision = basic_strategy(&hand, dealer, &GameConfig::default(), available, false);
/// assert_eq!(decision.primary_action, PlayerAction::Surrender);
/// assert_eq!(decision.explanation, "Hard 16 vs dealer 10");
/// ```
#[must_use]
pub fn basic_strategy(
    player: &[Card],
    dealer_up: Card,
    config: &GameConfig,
    available: Availability,
    from_split: bool,
) -> StrategyDecision {
    let chart = StrategyChart;
    let dealer_value = dealer_up.value();
    let value = hand_value(player);
    let pair_rank = is_pair(player).then(|| player[0].rank);

    let (chart_action, explanation) = if let Some(rank) = pair_rank {
        (
            chart.pair(rank, dealer_value),
            format!("Pair of {rank}s vs dealer {dealer_value}"),
        )
    } else if value.is_soft {
        (
            chart.soft(value.value, dealer_value),
            format!("Soft {} vs dealer {dealer_value}", value.value),
        )
    } else {
        (
            chart.hard(value.value, dealer_value),
            format!("Hard {} vs dealer {dealer_value}", value.value),
        )
    };

    // Only a bust total falls outside the charts.
    let mut chart_action = chart_action.unwrap_or(ChartAction::Stand);
    let mut primary_action = resolve_chart_action(chart_action, config, available, from_split);
    if primary_action == PlayerAction::Split && !available.can_split {
        chart_action = total_entry(chart, value, dealer_value).unwrap_or(ChartAction::Stand);
        primary_action = resolve_chart_action(chart_action, config, available, from_split);
    }

    StrategyDecision {
        primary_action,
        chart_action,
        recommendations: grade_actions(primary_action, available),
        explanation,
        reasoning: reasoning(primary_action, value.value, dealer_value, value.is_soft, pair_rank),
    }
}

/// Grades every available action against `optimal`.
#[must_use]
pub fn grade_actions(optimal: PlayerAction, available: Availability) -> Vec<Recommendation> {
    let optional = [
        (available.can_double, PlayerAction::Double),
        (available.can_split, PlayerAction::Split),
        (available.can_surrender, PlayerAction::Surrender),
    ];

    [PlayerAction::Hit, PlayerAction::Stand]
        .into_iter()
        .chain(optional.into_iter().filter_map(|(ok, action)| ok.then_some(action)))
        .map(|action| Recommendation {
            action,
            quality: grade(optimal, action),
            is_optimal: action == optimal,
        })
        .collect()
}

/// Grades `taken` against `optimal`.
#[must_use]
pub fn grade(optimal: PlayerAction, taken: PlayerAction) -> Quality {
    use PlayerAction::{Double, Hit, Split, Stand, Surrender};

    if optimal == taken {
        return Quality::Optimal;
    }
    match (optimal, taken) {
        (Double, Hit | Stand) | (Surrender | Split, Hit) => Quality::Acceptable,
        _ => Quality::Poor,
    }
}

fn reasoning(
    action: PlayerAction,
    value: u8,
    dealer: u8,
    is_soft: bool,
    pair_rank: Option<Rank>,
) -> String {
    let strength = if dealer >= 7 {
        "strong"
    } else if dealer >= 4 {
        "weak"
    } else {
        "moderate"
    };
    let bust_chance = if dealer <= 6 { "high" } else { "low" };

    match action {
        PlayerAction::Hit => match value {
            ..=11 => format!(
                "You can't bust with {value}, so hitting is risk-free. You need a stronger hand to compete."
            ),
            12 => format!(
                "With 12 against the dealer's {strength} card, you need to improve. Only a 10-value card will bust you (31% chance)."
            ),
            13..=16 => format!(
                "Your {value} is weak against the dealer's {strength} {dealer}. You're likely losing if you stand, so hitting gives you the best chance despite bust risk."
            ),
            _ if is_soft => format!(
                "With a soft {value}, you can hit safely because the ace can be counted as 1 if you'd bust. Try to improve your hand without risk."
            ),
            _ => format!(
                "Your hand needs improvement against the dealer's {dealer}. Hitting gives you the best mathematical chance of winning."
            ),
        },
        PlayerAction::Stand => {
            if value >= 17 && !is_soft {
                let bust_percent = (u32::from(value.min(21) - 16) * 77 + 5) / 10;
                format!(
                    "Hard {value} is strong enough to beat most dealer outcomes. The risk of busting ({bust_percent}% chance) outweighs the potential gain."
                )
            } else if value >= 19 && is_soft {
                format!(
                    "Soft {value} is a strong hand. Standing preserves your excellent position without unnecessary risk."
                )
            } else if (13..=16).contains(&value) && dealer <= 6 {
                format!(
                    "The dealer shows a weak {dealer} with a {bust_chance} bust probability. Let them take the risk while you protect your hand."
                )
            } else if pair_rank.is_some_and(Rank::is_ten_value) {
                String::from(
                    "You have 20, one of the strongest hands in blackjack. Never break up this winning hand.",
                )
            } else {
                format!(
                    "Standing gives you the best chance of winning in this situation. Your hand is strong enough against the dealer's {dealer}."
                )
            }
        }
        PlayerAction::Double => match value {
            11 => String::from(
                "11 is the best doubling hand! You have a 31% chance of getting 21, and you can't bust on the next card. Maximize your profit on this favorable situation.",
            ),
            10 if dealer <= 9 => format!(
                "With 10, you have excellent odds (31% chance) of making 20. The dealer's {dealer} is weak enough that doubling maximizes your edge."
            ),
            10 => format!(
                "With 10 against the dealer's strong {dealer}, doubling is risky. You have good odds of making 20, but the dealer is also strong."
            ),
            9 => format!(
                "Against the dealer's weak {dealer}, your 9 has good potential. Doubling lets you capitalize on the dealer's disadvantage."
            ),
            13..=18 if is_soft => String::from(
                "Soft hands against weak dealers are excellent doubling opportunities. You can't bust, and the dealer is likely to bust. Double to maximize profit!",
            ),
            _ => String::from(
                "This situation favors you mathematically. Doubling your bet maximizes expected value when you have the advantage.",
            ),
        },
        PlayerAction::Split => match pair_rank {
            Some(Rank::Ace) => String::from(
                "Always split aces! Starting two hands with 11 each gives you excellent chances of making strong hands or blackjacks (though split blackjacks usually pay even money).",
            ),
            Some(Rank::Eight) => String::from(
                "Always split 8s. A hand of 16 is terrible, but two hands starting with 8 each have much better prospects. This is one of the most important splits in blackjack.",
            ),
            Some(Rank::Nine) => format!(
                "Split 9s against the dealer's {strength} card. Two hands of 9 have better expected value than one hand of 18 in this situation."
            ),
            Some(Rank::Two | Rank::Three | Rank::Six | Rank::Seven) => String::from(
                "Split low pairs against the dealer's weak card. You're creating two hands with potential, exploiting the dealer's disadvantage.",
            ),
            Some(Rank::Four) => String::from(
                "Split 4s only because you can double after the split. Two hands of 4 against a weak dealer can both become doubling hands.",
            ),
            _ => String::from(
                "Splitting gives you better mathematical expectation than playing this pair as a single hand.",
            ),
        },
        PlayerAction::Surrender => match (value, dealer) {
            (16, 9..) => format!(
                "Hard 16 vs dealer {dealer} is one of the worst situations in blackjack. You'll lose over 50% of the time either way, so surrendering minimizes your losses to 50% of your bet."
            ),
            (15, 10..) => String::from(
                "Hard 15 vs dealer 10 or Ace is extremely unfavorable. Surrendering recovers half your bet, which is better than the expected loss from playing out this hand.",
            ),
            _ => String::from(
                "This is a very unfavorable situation. Surrendering lets you save half your bet instead of likely losing the entire amount.",
            ),
        },
    }
}
