//! Error types for engine operations.

use alloc::string::String;

use thiserror::Error;

/// Faults that break the round and cannot be treated as a rejected action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A card was requested from an empty shoe.
    #[error("shoe is empty")]
    EmptyShoe,
}

/// Reasons an action was refused.
///
/// A refused action leaves the game state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action is not valid in the current phase.
    #[error("invalid game phase for this action")]
    InvalidPhase,
    /// There is no hand waiting for a decision.
    #[error("no active hand")]
    NoActiveHand,
    /// Bet is outside the table limits.
    #[error("bet must be between {min} and {max}")]
    BetOutOfRange {
        /// Table minimum.
        min: u64,
        /// Table maximum.
        max: u64,
    },
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Doubling after a split is disabled at this table.
    #[error("double after split is not allowed")]
    DoubleAfterSplitDisabled,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Maximum splits reached.
    #[error("maximum splits reached")]
    MaxSplitsReached,
    /// Re-splitting aces is disabled at this table.
    #[error("re-splitting aces is not allowed")]
    ResplitAcesDisabled,
    /// Split aces only accept another split or a stand.
    #[error("split aces cannot take further cards")]
    SplitAcesLocked,
    /// Surrender is disabled at this table.
    #[error("surrender is not allowed at this table")]
    SurrenderDisabled,
    /// Cannot surrender at this point.
    #[error("cannot surrender at this point")]
    CannotSurrender,
    /// Insurance is not being offered.
    #[error("insurance is not offered")]
    InsuranceNotOffered,
    /// Configuration can only change between rounds.
    #[error("configuration can only change between rounds")]
    ConfigLocked,
    /// The supplied configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// Side bets are disabled at this table.
    #[error("side bet is not enabled at this table")]
    SideBetDisabled,
    /// Learning mode is switched off.
    #[error("learning mode is disabled")]
    LearningModeDisabled,
    /// No speed-training session is running.
    #[error("speed training is not active")]
    SpeedTrainingInactive,
    /// A fatal engine fault.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ActionError {
    /// Returns whether the error is a fatal engine fault rather than a rejection.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Engine(_))
    }
}

/// Configuration values that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Deck count outside 1..=8.
    #[error("invalid deckCount: must be between 1 and 8")]
    DeckCount,
    /// Minimum bet below 1.
    #[error("invalid minBet: must be at least 1")]
    MinBet,
    /// Maximum bet below the minimum.
    #[error("invalid maxBet: must not be below minBet")]
    MaxBet,
    /// Split limit outside 1..=4.
    #[error("invalid maxSplits: must be between 1 and 4")]
    MaxSplits,
    /// Starting balance below the minimum bet.
    #[error("invalid startingBalance: must cover minBet")]
    StartingBalance,
    /// Payout ratio with a zero term.
    #[error("invalid blackjackPayout: terms must be positive")]
    BlackjackPayout,
}

/// Errors raised while reading external data (imports, saved configurations,
/// share links).
#[derive(Debug, Error)]
pub enum DataError {
    /// The input is not valid JSON or does not match the expected shape.
    #[error("malformed JSON: {0}")]
    Json(serde_json::Error),
    /// The share string is not valid URL-safe base64.
    #[error("invalid share encoding: {0}")]
    Encoding(base64::DecodeError),
    /// A required field is absent.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// A field has the wrong type or an out-of-range value.
    #[error("invalid {0}")]
    InvalidField(&'static str),
    /// The snapshot version is not supported.
    #[error("unsupported snapshot version: {0}")]
    UnsupportedVersion(String),
    /// The configuration parsed but failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<base64::DecodeError> for DataError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Encoding(err)
    }
}
