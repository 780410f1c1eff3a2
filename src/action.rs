//! The closed set of actions the engine accepts.

use alloc::boxed::Box;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigUpdate, GameConfig, SettingsUpdate, Theme};
use crate::counting::CountingSystem;
use crate::share::ExportSnapshot;
use crate::side_bets::SideBetKind;
use crate::training::{DifficultyLevel, SpeedTrainingGoal};

/// An action dispatched into [`GameState::apply`](crate::GameState::apply).
///
/// Serialized with a `type` tag, e.g. `{"type":"PLACE_BET","amount":10}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Stake the main bet (and any side bets) and move to dealing.
    PlaceBet {
        /// Main bet amount.
        amount: u64,
    },
    /// Deal two cards each.
    DealInitial,
    /// Draw a card on the active hand.
    Hit,
    /// Stand on the active hand.
    Stand,
    /// Double the active hand.
    Double,
    /// Split the active pair.
    Split,
    /// Surrender the hand.
    Surrender,
    /// Take insurance.
    Insurance,
    /// Decline insurance.
    DeclineInsurance,
    /// Play out the dealer's hand and settle.
    DealerPlay,
    /// Clear the table for the next round.
    NewGame,
    /// Restore the starting balance.
    ResetBalance,
    /// Change some settings.
    UpdateSettings {
        /// Fields to change.
        settings: SettingsUpdate,
    },
    /// Change some table rules.
    UpdateConfig {
        /// Fields to change.
        config: ConfigUpdate,
    },
    /// Replace the table rules.
    LoadConfig {
        /// New rules.
        config: GameConfig,
    },
    /// Switch learning mode on or off.
    ToggleLearningMode,
    /// Recompute the strategy hint.
    UpdateStrategyHint,
    /// Clear the learning-mode log.
    ClearMistakes,
    /// Start a speed-training session.
    StartSpeedTraining {
        /// Starting difficulty.
        difficulty: DifficultyLevel,
        /// Session targets.
        #[serde(default)]
        goal: SpeedTrainingGoal,
    },
    /// End the speed-training session.
    StopSpeedTraining,
    /// The decision timer ran out.
    TimeoutDecision,
    /// Set a side-bet stake for the next deal.
    SetSideBet {
        /// Which side bet.
        kind: SideBetKind,
        /// Stake (0 removes it).
        amount: u64,
    },
    /// Remove all side-bet stakes.
    ClearSideBets,
    /// Show or hide the count.
    ToggleCardCounting,
    /// Change the counting system.
    SetCountingSystem {
        /// New system.
        system: CountingSystem,
    },
    /// Start a new statistics session.
    ResetSessionStatistics,
    /// Wipe all statistics.
    ClearStatistics,
    /// Set the colour scheme.
    SetTheme {
        /// New scheme.
        theme: Theme,
    },
    /// Flip the colour scheme.
    ToggleTheme,
    /// Load an exported snapshot.
    ImportState {
        /// Validated snapshot.
        snapshot: Box<ExportSnapshot>,
    },
}

impl Action {
    /// Returns the wire name of the action.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PlaceBet { .. } => "PLACE_BET",
            Self::DealInitial => "DEAL_INITIAL",
            Self::Hit => "HIT",
            Self::Stand => "STAND",
            Self::Double => "DOUBLE",
            Self::Split => "SPLIT",
            Self::Surrender => "SURRENDER",
            Self::Insurance => "INSURANCE",
            Self::DeclineInsurance => "DECLINE_INSURANCE",
            Self::DealerPlay => "DEALER_PLAY",
            Self::NewGame => "NEW_GAME",
            Self::ResetBalance => "RESET_BALANCE",
            Self::UpdateSettings { .. } => "UPDATE_SETTINGS",
            Self::UpdateConfig { .. } => "UPDATE_CONFIG",
            Self::LoadConfig { .. } => "LOAD_CONFIG",
            Self::ToggleLearningMode => "TOGGLE_LEARNING_MODE",
            Self::UpdateStrategyHint => "UPDATE_STRATEGY_HINT",
            Self::ClearMistakes => "CLEAR_MISTAKES",
            Self::StartSpeedTraining { .. } => "START_SPEED_TRAINING",
            Self::StopSpeedTraining => "STOP_SPEED_TRAINING",
            Self::TimeoutDecision => "TIMEOUT_DECISION",
            Self::SetSideBet { .. } => "SET_SIDE_BET",
            Self::ClearSideBets => "CLEAR_SIDE_BETS",
            Self::ToggleCardCounting => "TOGGLE_CARD_COUNTING",
            Self::SetCountingSystem { .. } => "SET_COUNTING_SYSTEM",
            Self::ResetSessionStatistics => "RESET_SESSION_STATISTICS",
            Self::ClearStatistics => "CLEAR_STATISTICS",
            Self::SetTheme { .. } => "SET_THEME",
            Self::ToggleTheme => "TOGGLE_THEME",
            Self::ImportState { .. } => "IMPORT_STATE",
        }
    }
}
