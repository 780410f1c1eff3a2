//! Achievement catalog and unlock rules.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::side_bets::TwentyOnePlusThreeHand;
use crate::training::DifficultyLevel;

/// Achievement identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[expect(missing_docs, reason = "names mirror the catalog entries")]
pub enum AchievementId {
    FirstWin,
    FirstBlackjack,
    #[serde(rename = "win_streak_5")]
    WinStreak5,
    #[serde(rename = "win_streak_10")]
    WinStreak10,
    #[serde(rename = "win_100_hands")]
    Win100Hands,
    #[serde(rename = "win_500_hands")]
    Win500Hands,
    DoubleDownWin,
    SplitWinBoth,
    #[serde(rename = "perfect_21")]
    Perfect21,
    BasicStrategyPerfect,
    #[serde(rename = "strategy_accuracy_90")]
    StrategyAccuracy90,
    SpeedTrainingComplete,
    SpeedExpert,
    CardCounter,
    #[serde(rename = "profit_100")]
    Profit100,
    #[serde(rename = "profit_500")]
    Profit500,
    #[serde(rename = "profit_1000")]
    Profit1000,
    #[serde(rename = "profit_5000")]
    Profit5000,
    Comeback,
    #[serde(rename = "play_1000_hands")]
    Play1000Hands,
    #[serde(rename = "play_10000_hands")]
    Play10000Hands,
    InsuranceWin,
    LuckySevens,
    PerfectPairsWin,
    #[serde(rename = "twenty_one_plus_3_win")]
    TwentyOnePlus3Win,
    SuitedTrips,
}

/// Achievement group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Hand-level feats.
    Gameplay,
    /// Training and counting.
    Strategy,
    /// Long-running totals.
    Progression,
    /// Rare events.
    Special,
}

/// How hard an achievement is to get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[expect(missing_docs, reason = "self-describing")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Static description of an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDef {
    /// Identifier.
    pub id: AchievementId,
    /// Display name.
    pub name: &'static str,
    /// How to earn it.
    pub description: &'static str,
    /// Emoji icon.
    pub icon: &'static str,
    /// Group.
    pub category: Category,
    /// Rarity.
    pub rarity: Rarity,
}

const fn def(
    id: AchievementId,
    name: &'static str,
    description: &'static str,
    icon: &'static str,
    category: Category,
    rarity: Rarity,
) -> AchievementDef {
    AchievementDef {
        id,
        name,
        description,
        icon,
        category,
        rarity,
    }
}

/// Every achievement, in display order.
pub const CATALOG: [AchievementDef; 26] = {
    use AchievementId as Id;
    use Category::{Gameplay, Progression, Special, Strategy};
    use Rarity::{Common, Epic, Legendary, Rare, Uncommon};

    [
        def(Id::FirstWin, "First Victory", "Win your first hand", "🎉", Gameplay, Common),
        def(Id::FirstBlackjack, "Natural!", "Get your first blackjack", "🃏", Gameplay, Common),
        def(Id::WinStreak5, "Hot Streak", "Win 5 hands in a row", "🔥", Gameplay, Uncommon),
        def(Id::WinStreak10, "On Fire!", "Win 10 hands in a row", "🔥🔥", Gameplay, Rare),
        def(Id::Win100Hands, "Century", "Win 100 hands", "💯", Gameplay, Uncommon),
        def(Id::Win500Hands, "Professional", "Win 500 hands", "🎰", Gameplay, Rare),
        def(Id::DoubleDownWin, "Double Trouble", "Win a doubled hand", "⚡", Gameplay, Common),
        def(Id::SplitWinBoth, "Split Success", "Win both hands after a split", "✌️", Gameplay, Uncommon),
        def(Id::Perfect21, "Exactly 21", "Get exactly 21 with 3 or more cards", "🎯", Gameplay, Common),
        def(
            Id::BasicStrategyPerfect,
            "By the Book",
            "Play 20 hands with perfect basic strategy",
            "📖",
            Strategy,
            Uncommon,
        ),
        def(
            Id::StrategyAccuracy90,
            "Strategy Master",
            "Achieve 90% accuracy over 50 hands",
            "🎓",
            Strategy,
            Rare,
        ),
        def(
            Id::SpeedTrainingComplete,
            "Quick Draw",
            "Complete a speed training session",
            "⚡",
            Strategy,
            Common,
        ),
        def(
            Id::SpeedExpert,
            "Lightning Fast",
            "Reach Expert difficulty in speed training",
            "⚡⚡",
            Strategy,
            Epic,
        ),
        def(Id::CardCounter, "Rain Man", "Use card counting for an entire shoe", "🧠", Strategy, Rare),
        def(Id::Profit100, "Small Win", "Earn $100 profit in a session", "💵", Progression, Common),
        def(Id::Profit500, "Nice Profit", "Earn $500 profit in a session", "💰", Progression, Uncommon),
        def(Id::Profit1000, "Big Winner", "Earn $1,000 profit in a session", "💎", Progression, Rare),
        def(Id::Profit5000, "High Roller", "Earn $5,000 profit in a session", "👑", Progression, Epic),
        def(
            Id::Comeback,
            "Phoenix Rising",
            "Go from negative balance to positive in one session",
            "🔄",
            Progression,
            Uncommon,
        ),
        def(Id::Play1000Hands, "Veteran", "Play 1,000 hands total", "⭐", Progression, Rare),
        def(Id::Play10000Hands, "Legend", "Play 10,000 hands total", "🌟", Progression, Legendary),
        def(Id::InsuranceWin, "Insured", "Win an insurance bet", "🛡️", Special, Uncommon),
        def(Id::LuckySevens, "Lucky Sevens", "Get three 7s in one hand", "🎰", Special, Rare),
        def(Id::PerfectPairsWin, "Perfect Match", "Win a Perfect Pairs side bet", "👯", Special, Uncommon),
        def(Id::TwentyOnePlus3Win, "Poker Player", "Win a 21+3 side bet", "🎴", Special, Uncommon),
        def(Id::SuitedTrips, "Triple Threat", "Hit Suited Trips on 21+3 side bet", "💥", Special, Epic),
    ]
};

impl AchievementId {
    /// Returns the catalog entry for this achievement.
    #[must_use]
    pub const fn definition(self) -> &'static AchievementDef {
        &CATALOG[self as usize]
    }
}

/// A game event that may unlock achievements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AchievementEvent {
    /// At least one hand won this round.
    HandWon,
    /// A natural was paid.
    Blackjack,
    /// The session streak after a winning round.
    WinStreak {
        /// Current streak length.
        streak: u32,
    },
    /// A doubled hand won.
    DoubleWin,
    /// Every hand of a split round won.
    SplitBothWin,
    /// A hand reached 21 with three or more cards.
    #[serde(rename = "exact_21")]
    Exact21,
    /// A hand held three sevens.
    ThreeSevens,
    /// Session net after a profitable round.
    SessionProfit {
        /// Session net profit.
        profit: i64,
    },
    /// Session net went from negative to positive.
    Comeback,
    /// A round was recorded.
    HandsPlayed,
    /// Insurance paid out.
    InsuranceWon,
    /// Perfect Pairs paid out.
    PerfectPairsWon,
    /// 21+3 paid out.
    #[serde(rename = "21plus3_won")]
    TwentyOnePlusThreeWon {
        /// The winning poker hand.
        hand: TwentyOnePlusThreeHand,
    },
    /// Consecutive decisions matching basic strategy.
    BasicStrategyStreak {
        /// Streak length.
        correct: u32,
    },
    /// Learning-mode accuracy so far.
    StrategyAccuracy {
        /// Accuracy in percent.
        accuracy: f64,
        /// Decisions graded.
        hands: u64,
    },
    /// A speed-training session finished.
    SpeedTrainingComplete {
        /// Difficulty the session ended at.
        difficulty: DifficultyLevel,
    },
    /// Counting stayed on for a whole shoe.
    CardCountingShoe,
}

/// Lifetime counters some unlock rules read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    /// Hands won, all time.
    pub total_wins: u64,
    /// Rounds played, all time.
    pub total_hands_played: u64,
}

/// Unlock state for one achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unlock {
    /// Whether the achievement is held.
    pub unlocked: bool,
    /// When it was unlocked (ms).
    #[serde(default)]
    pub unlocked_at: u64,
}

/// Unlocked achievements, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementBook {
    unlocked: BTreeMap<AchievementId, Unlock>,
}

/// Unlocked / total for one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    /// Achievements in the group.
    pub total: usize,
    /// Unlocked achievements in the group.
    pub unlocked: usize,
}

/// Summary for the achievements screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStats {
    /// Catalog size.
    pub total: usize,
    /// Unlocked count.
    pub unlocked: usize,
    /// Unlocked share, rounded to a whole percent.
    pub percentage: usize,
    /// Per category.
    pub by_category: BTreeMap<Category, Tally>,
    /// Per rarity.
    pub by_rarity: BTreeMap<Rarity, Tally>,
}

impl AchievementBook {
    /// Returns an empty book.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            unlocked: BTreeMap::new(),
        }
    }

    /// Returns whether `id` is unlocked.
    #[must_use]
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.get(&id).is_some_and(|unlock| unlock.unlocked)
    }

    /// Returns when `id` was unlocked.
    #[must_use]
    pub fn unlocked_at(&self, id: AchievementId) -> Option<u64> {
        self.unlocked
            .get(&id)
            .filter(|unlock| unlock.unlocked)
            .map(|unlock| unlock.unlocked_at)
    }

    /// Iterates over unlocked achievements.
    pub fn unlocked(&self) -> impl Iterator<Item = (AchievementId, u64)> + '_ {
        self.unlocked
            .iter()
            .filter(|(_, unlock)| unlock.unlocked)
            .map(|(id, unlock)| (*id, unlock.unlocked_at))
    }

    /// Returns the number of unlocked achievements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.unlocked().count()
    }

    /// Returns whether nothing is unlocked yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unlocks `id` unless it is already held. Returns whether it was new.
    fn unlock(&mut self, id: AchievementId, now: u64) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.unlocked.insert(
            id,
            Unlock {
                unlocked: true,
                unlocked_at: now,
            },
        );
        true
    }

    /// Computes totals by category and rarity.
    #[must_use]
    pub fn stats(&self) -> AchievementStats {
        let mut by_category: BTreeMap<Category, Tally> = BTreeMap::new();
        let mut by_rarity: BTreeMap<Rarity, Tally> = BTreeMap::new();

        for def in &CATALOG {
            let unlocked = usize::from(self.is_unlocked(def.id));
            let tally = by_category.entry(def.category).or_default();
            tally.total += 1;
            tally.unlocked += unlocked;
            let tally = by_rarity.entry(def.rarity).or_default();
            tally.total += 1;
            tally.unlocked += unlocked;
        }

        let total = CATALOG.len();
        let unlocked = CATALOG.iter().filter(|def| self.is_unlocked(def.id)).count();
        AchievementStats {
            total,
            unlocked,
            percentage: (unlocked * 100 + total / 2) / total,
            by_category,
            by_rarity,
        }
    }
}

/// Outcome of [`check_achievements`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementCheck {
    /// The updated book.
    pub achievements: AchievementBook,
    /// Achievements unlocked by this event, in unlock order.
    pub newly_unlocked: Vec<AchievementId>,
}

/// Evaluates `event` against the unlock rules.
///
/// Unlocking is idempotent: an achievement already in `book` is never
/// reported again.
#[must_use]
pub fn check_achievements(
    book: &AchievementBook,
    progress: AchievementProgress,
    event: &AchievementEvent,
    now: u64,
) -> AchievementCheck {
    use AchievementId as Id;

    let mut candidates: Vec<Id> = Vec::new();
    let mut when = |condition: bool, id: Id| {
        if condition {
            candidates.push(id);
        }
    };

    match *event {
        AchievementEvent::HandWon => {
            when(true, Id::FirstWin);
            when(progress.total_wins >= 100, Id::Win100Hands);
            when(progress.total_wins >= 500, Id::Win500Hands);
        }
        AchievementEvent::Blackjack => when(true, Id::FirstBlackjack),
        AchievementEvent::WinStreak { streak } => {
            when(streak >= 5, Id::WinStreak5);
            when(streak >= 10, Id::WinStreak10);
        }
        AchievementEvent::DoubleWin => when(true, Id::DoubleDownWin),
        AchievementEvent::SplitBothWin => when(true, Id::SplitWinBoth),
        AchievementEvent::Exact21 => when(true, Id::Perfect21),
        AchievementEvent::ThreeSevens => when(true, Id::LuckySevens),
        AchievementEvent::SessionProfit { profit } => {
            when(profit >= 100, Id::Profit100);
            when(profit >= 500, Id::Profit500);
            when(profit >= 1000, Id::Profit1000);
            when(profit >= 5000, Id::Profit5000);
        }
        AchievementEvent::Comeback => when(true, Id::Comeback),
        AchievementEvent::HandsPlayed => {
            when(progress.total_hands_played >= 1000, Id::Play1000Hands);
            when(progress.total_hands_played >= 10_000, Id::Play10000Hands);
        }
        AchievementEvent::InsuranceWon => when(true, Id::InsuranceWin),
        AchievementEvent::PerfectPairsWon => when(true, Id::PerfectPairsWin),
        AchievementEvent::TwentyOnePlusThreeWon { hand } => {
            when(true, Id::TwentyOnePlus3Win);
            when(hand == TwentyOnePlusThreeHand::SuitedTrips, Id::SuitedTrips);
        }
        AchievementEvent::BasicStrategyStreak { correct } => {
            when(correct >= 20, Id::BasicStrategyPerfect);
        }
        AchievementEvent::StrategyAccuracy { accuracy, hands } => {
            when(accuracy >= 90.0 && hands >= 50, Id::StrategyAccuracy90);
        }
        AchievementEvent::SpeedTrainingComplete { difficulty } => {
            when(true, Id::SpeedTrainingComplete);
            when(difficulty == DifficultyLevel::Expert, Id::SpeedExpert);
        }
        AchievementEvent::CardCountingShoe => when(true, Id::CardCounter),
    }

    let mut achievements = book.clone();
    let newly_unlocked = candidates
        .into_iter()
        .filter(|id| achievements.unlock(*id, now))
        .collect();

    AchievementCheck {
        achievements,
        newly_unlocked,
    }
}
