//! Table rules, player settings and partial updates.

use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rules::divide_rounded;

pub mod library;
pub mod presets;

/// Smallest number of decks a shoe may hold.
pub const MIN_DECK_COUNT: u8 = 1;
/// Largest number of decks a shoe may hold.
pub const MAX_DECK_COUNT: u8 = 8;
/// Smallest split limit.
pub const MIN_SPLITS: u8 = 1;
/// Largest split limit.
pub const MAX_SPLITS: u8 = 4;
/// Smallest legal table minimum.
pub const MIN_BET_VALUE: u64 = 1;

/// Rounding mode for fractional payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    #[default]
    Down,
    /// Round to nearest, halves up.
    Nearest,
}

/// Blackjack payout ratio, such as 3:2 or 6:5.
///
/// Serialized as a `[numerator, denominator]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct PayoutRatio {
    /// Units won.
    pub numerator: u32,
    /// Units staked.
    pub denominator: u32,
}

impl PayoutRatio {
    /// The common 3:2 payout.
    pub const THREE_TO_TWO: Self = Self::new(3, 2);
    /// The reduced 6:5 payout.
    pub const SIX_TO_FIVE: Self = Self::new(6, 5);

    /// Creates a payout ratio.
    #[must_use]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Returns the winnings (excluding the stake) for `bet`.
    #[must_use]
    pub const fn winnings(self, bet: u64, rounding: RoundingMode) -> u64 {
        if self.denominator == 0 {
            return 0;
        }
        divide_rounded(
            bet.saturating_mul(self.numerator as u64),
            self.denominator as u64,
            rounding,
        )
    }
}

impl From<[u32; 2]> for PayoutRatio {
    fn from([numerator, denominator]: [u32; 2]) -> Self {
        Self::new(numerator, denominator)
    }
}

impl From<PayoutRatio> for [u32; 2] {
    fn from(ratio: PayoutRatio) -> Self {
        [ratio.numerator, ratio.denominator]
    }
}

/// The rules of a table.
///
/// Use the builder pattern to customize a configuration:
///
/// ```
/// use bjtable::{GameConfig, PayoutRatio};
///
/// let config = GameConfig::default()
///     .with_deck_count(2)
///     .with_blackjack_payout(PayoutRatio::SIX_TO_FIVE)
///     .with_dealer_hits_soft_17(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Display name.
    pub name: String,
    /// Number of decks in the shoe.
    pub deck_count: u8,
    /// Whether the dealer hits soft 17.
    pub dealer_hits_soft_17: bool,
    /// Payout for a natural.
    pub blackjack_payout: PayoutRatio,
    /// Table minimum.
    pub min_bet: u64,
    /// Table maximum.
    pub max_bet: u64,
    /// Balance for a fresh bankroll.
    pub starting_balance: u64,
    /// Whether doubling is allowed on split hands.
    pub double_after_split: bool,
    /// Whether split aces may be split again.
    pub resplit_aces_allowed: bool,
    /// Maximum number of splits per round.
    pub max_splits: u8,
    /// Whether late surrender is offered.
    pub surrender_allowed: bool,
    /// Whether insurance is offered against an ace.
    pub insurance_allowed: bool,
    /// Master switch for side bets.
    #[serde(default)]
    pub side_bets_enabled: bool,
    /// Whether Perfect Pairs is offered.
    #[serde(default)]
    pub perfect_pairs_enabled: bool,
    /// Whether 21+3 is offered.
    #[serde(default, rename = "twentyOnePlus3Enabled")]
    pub twenty_one_plus_three_enabled: bool,
    /// Rounding for fractional blackjack payouts.
    #[serde(default)]
    pub rounding_blackjack: RoundingMode,
    /// Rounding for the half-bet surrender refund.
    #[serde(default = "default_surrender_rounding")]
    pub rounding_surrender: RoundingMode,
}

const fn default_surrender_rounding() -> RoundingMode {
    RoundingMode::Nearest
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            name: String::from("Standard"),
            deck_count: 6,
            dealer_hits_soft_17: false,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
            min_bet: 5,
            max_bet: 500,
            starting_balance: 1000,
            double_after_split: true,
            resplit_aces_allowed: false,
            max_splits: 3,
            surrender_allowed: true,
            insurance_allowed: true,
            side_bets_enabled: false,
            perfect_pairs_enabled: false,
            twenty_one_plus_three_enabled: false,
            rounding_blackjack: RoundingMode::Down,
            rounding_surrender: RoundingMode::Nearest,
        }
    }
}

impl GameConfig {
    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameConfig;
    ///
    /// let config = GameConfig::default().with_deck_count(8);
    /// assert_eq!(config.deck_count, 8);
    /// ```
    #[must_use]
    pub const fn with_deck_count(mut self, deck_count: u8) -> Self {
        self.deck_count = deck_count;
        self
    }

    /// Sets whether the dealer hits soft 17.
    #[must_use]
    pub const fn with_dealer_hits_soft_17(mut self, hits: bool) -> Self {
        self.dealer_hits_soft_17 = hits;
        self
    }

    /// Sets the blackjack payout ratio.
    #[must_use]
    pub const fn with_blackjack_payout(mut self, ratio: PayoutRatio) -> Self {
        self.blackjack_payout = ratio;
        self
    }

    /// Sets the table limits.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameConfig;
    ///
    /// let config = GameConfig::default().with_bet_limits(10, 1000);
    /// assert_eq!((config.min_bet, config.max_bet), (10, 1000));
    /// ```
    #[must_use]
    pub const fn with_bet_limits(mut self, min_bet: u64, max_bet: u64) -> Self {
        self.min_bet = min_bet;
        self.max_bet = max_bet;
        self
    }

    /// Sets the starting balance.
    #[must_use]
    pub const fn with_starting_balance(mut self, balance: u64) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Sets whether doubling is allowed after a split.
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets whether split aces may be re-split.
    #[must_use]
    pub const fn with_resplit_aces(mut self, allowed: bool) -> Self {
        self.resplit_aces_allowed = allowed;
        self
    }

    /// Sets the maximum number of splits per round.
    #[must_use]
    pub const fn with_max_splits(mut self, max_splits: u8) -> Self {
        self.max_splits = max_splits;
        self
    }

    /// Sets whether surrender is offered.
    #[must_use]
    pub const fn with_surrender(mut self, allowed: bool) -> Self {
        self.surrender_allowed = allowed;
        self
    }

    /// Sets whether insurance is offered.
    #[must_use]
    pub const fn with_insurance(mut self, allowed: bool) -> Self {
        self.insurance_allowed = allowed;
        self
    }

    /// Enables side bets, turning on each wager individually.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameConfig;
    ///
    /// let config = GameConfig::default().with_side_bets(true, false);
    /// assert!(config.side_bets_enabled);
    /// assert!(config.perfect_pairs_enabled);
    /// assert!(!config.twenty_one_plus_three_enabled);
    /// ```
    #[must_use]
    pub const fn with_side_bets(mut self, perfect_pairs: bool, twenty_one_plus_three: bool) -> Self {
        self.side_bets_enabled = perfect_pairs || twenty_one_plus_three;
        self.perfect_pairs_enabled = perfect_pairs;
        self.twenty_one_plus_three_enabled = twenty_one_plus_three;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the rounding mode for surrender refunds.
    #[must_use]
    pub const fn with_rounding_surrender(mut self, mode: RoundingMode) -> Self {
        self.rounding_surrender = mode;
        self
    }

    /// Checks that the configuration describes a playable table.
    ///
    /// # Errors
    ///
    /// Returns the first rule that is out of range.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.deck_count < MIN_DECK_COUNT || self.deck_count > MAX_DECK_COUNT {
            return Err(ConfigError::DeckCount);
        }
        if self.min_bet < MIN_BET_VALUE {
            return Err(ConfigError::MinBet);
        }
        if self.max_bet < self.min_bet {
            return Err(ConfigError::MaxBet);
        }
        if self.max_splits < MIN_SPLITS || self.max_splits > MAX_SPLITS {
            return Err(ConfigError::MaxSplits);
        }
        if self.starting_balance < self.min_bet {
            return Err(ConfigError::StartingBalance);
        }
        if self.blackjack_payout.numerator == 0 || self.blackjack_payout.denominator == 0 {
            return Err(ConfigError::BlackjackPayout);
        }
        Ok(())
    }

    /// Returns whether `amount` is within the table limits.
    #[must_use]
    pub const fn bet_in_range(&self, amount: u64) -> bool {
        amount >= self.min_bet && amount <= self.max_bet
    }
}

/// A partial configuration change. Absent fields keep their current value.
#[expect(missing_docs, reason = "fields mirror GameConfig")]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigUpdate {
    pub name: Option<String>,
    pub deck_count: Option<u8>,
    pub dealer_hits_soft_17: Option<bool>,
    pub blackjack_payout: Option<PayoutRatio>,
    pub min_bet: Option<u64>,
    pub max_bet: Option<u64>,
    pub starting_balance: Option<u64>,
    pub double_after_split: Option<bool>,
    pub resplit_aces_allowed: Option<bool>,
    pub max_splits: Option<u8>,
    pub surrender_allowed: Option<bool>,
    pub insurance_allowed: Option<bool>,
    pub side_bets_enabled: Option<bool>,
    pub perfect_pairs_enabled: Option<bool>,
    #[serde(rename = "twentyOnePlus3Enabled")]
    pub twenty_one_plus_three_enabled: Option<bool>,
    pub rounding_blackjack: Option<RoundingMode>,
    pub rounding_surrender: Option<RoundingMode>,
}

impl ConfigUpdate {
    /// Returns `base` with every present field replaced.
    #[must_use]
    pub fn apply_to(&self, base: &GameConfig) -> GameConfig {
        let mut config = base.clone();
        if let Some(name) = &self.name {
            config.name.clone_from(name);
        }
        config.deck_count = self.deck_count.unwrap_or(config.deck_count);
        config.dealer_hits_soft_17 = self.dealer_hits_soft_17.unwrap_or(config.dealer_hits_soft_17);
        config.blackjack_payout = self.blackjack_payout.unwrap_or(config.blackjack_payout);
        config.min_bet = self.min_bet.unwrap_or(config.min_bet);
        config.max_bet = self.max_bet.unwrap_or(config.max_bet);
        config.starting_balance = self.starting_balance.unwrap_or(config.starting_balance);
        config.double_after_split = self.double_after_split.unwrap_or(config.double_after_split);
        config.resplit_aces_allowed = self
            .resplit_aces_allowed
            .unwrap_or(config.resplit_aces_allowed);
        config.max_splits = self.max_splits.unwrap_or(config.max_splits);
        config.surrender_allowed = self.surrender_allowed.unwrap_or(config.surrender_allowed);
        config.insurance_allowed = self.insurance_allowed.unwrap_or(config.insurance_allowed);
        config.side_bets_enabled = self.side_bets_enabled.unwrap_or(config.side_bets_enabled);
        config.perfect_pairs_enabled = self
            .perfect_pairs_enabled
            .unwrap_or(config.perfect_pairs_enabled);
        config.twenty_one_plus_three_enabled = self
            .twenty_one_plus_three_enabled
            .unwrap_or(config.twenty_one_plus_three_enabled);
        config.rounding_blackjack = self.rounding_blackjack.unwrap_or(config.rounding_blackjack);
        config.rounding_surrender = self.rounding_surrender.unwrap_or(config.rounding_surrender);
        config
    }
}

impl From<&GameConfig> for ConfigUpdate {
    fn from(config: &GameConfig) -> Self {
        Self {
            name: Some(config.name.clone()),
            deck_count: Some(config.deck_count),
            dealer_hits_soft_17: Some(config.dealer_hits_soft_17),
            blackjack_payout: Some(config.blackjack_payout),
            min_bet: Some(config.min_bet),
            max_bet: Some(config.max_bet),
            starting_balance: Some(config.starting_balance),
            double_after_split: Some(config.double_after_split),
            resplit_aces_allowed: Some(config.resplit_aces_allowed),
            max_splits: Some(config.max_splits),
            surrender_allowed: Some(config.surrender_allowed),
            insurance_allowed: Some(config.insurance_allowed),
            side_bets_enabled: Some(config.side_bets_enabled),
            perfect_pairs_enabled: Some(config.perfect_pairs_enabled),
            twenty_one_plus_three_enabled: Some(config.twenty_one_plus_three_enabled),
            rounding_blackjack: Some(config.rounding_blackjack),
            rounding_surrender: Some(config.rounding_surrender),
        }
    }
}

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light scheme.
    #[default]
    Light,
    /// Dark scheme.
    Dark,
}

impl Theme {
    /// Returns the other scheme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Returns the stored name of the scheme.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a stored scheme name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Player preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Deal automatically after a bet is placed.
    pub auto_deal: bool,
    /// Amount of the most recent main bet.
    pub last_bet_amount: u64,
    /// Whether learning mode is on.
    pub learning_mode_enabled: bool,
    /// Whether strategy hints are shown.
    pub show_hints: bool,
    /// Whether expected value is shown.
    pub show_expected_value: bool,
}

impl Settings {
    /// Default settings for a table, with the last bet at its minimum.
    #[must_use]
    pub const fn for_config(config: &GameConfig) -> Self {
        Self {
            auto_deal: false,
            last_bet_amount: config.min_bet,
            learning_mode_enabled: false,
            show_hints: true,
            show_expected_value: false,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::for_config(&GameConfig::default())
    }
}

/// A partial settings change.
#[expect(missing_docs, reason = "fields mirror Settings")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub auto_deal: Option<bool>,
    pub last_bet_amount: Option<u64>,
    pub learning_mode_enabled: Option<bool>,
    pub show_hints: Option<bool>,
    pub show_expected_value: Option<bool>,
}

impl SettingsUpdate {
    /// Returns `base` with every present field replaced.
    #[must_use]
    pub fn apply_to(&self, base: &Settings) -> Settings {
        Settings {
            auto_deal: self.auto_deal.unwrap_or(base.auto_deal),
            last_bet_amount: self.last_bet_amount.unwrap_or(base.last_bet_amount),
            learning_mode_enabled: self
                .learning_mode_enabled
                .unwrap_or(base.learning_mode_enabled),
            show_hints: self.show_hints.unwrap_or(base.show_hints),
            show_expected_value: self.show_expected_value.unwrap_or(base.show_expected_value),
        }
    }
}
