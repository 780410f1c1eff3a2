//! A single-player blackjack engine with optional `no_std` support.
//!
//! The game is a value, [`GameState`], advanced by [`Action`]s through
//! [`GameState::apply`]. Around the round flow (betting, insurance, player
//! decisions, dealer play, settlement) the engine tracks basic-strategy
//! advice, card counting, statistics, achievements, speed training and side
//! bets. [`Table`] binds a game to a [`KeyValueStore`](storage::KeyValueStore)
//! and a [`Clock`].
//!
//! # Example
//!
//! ```
//! use bjtable::{Action, GameConfig, GameState, Phase};
//!
//! let mut state = GameState::new(GameConfig::default(), 42);
//! for action in [Action::PlaceBet { amount: 10 }, Action::DealInitial] {
//!     state = state.apply(&action).unwrap();
//! }
//! if state.is_insurance_offered() {
//!     state = state.apply(&Action::DeclineInsurance).unwrap();
//! }
//! while state.phase() == Phase::PlayerTurn {
//!     state = state.apply(&Action::Stand).unwrap();
//! }
//! if state.phase() == Phase::DealerTurn {
//!     state = state.apply(&Action::DealerPlay).unwrap();
//! }
//! assert_eq!(state.phase(), Phase::GameOver);
//! assert!(state.result().is_some());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod achievements;
pub mod action;
pub mod card;
pub mod config;
pub mod counting;
pub mod error;
pub mod game;
pub mod hand;
pub mod result;
pub mod rules;
pub mod share;
pub mod shoe;
pub mod side_bets;
pub mod statistics;
pub mod storage;
pub mod strategy;
mod sync;
pub mod table;
pub mod training;

// Re-export main types
pub use achievements::{AchievementBook, AchievementEvent, AchievementId, check_achievements};
pub use action::Action;
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use config::{ConfigUpdate, GameConfig, PayoutRatio, RoundingMode, Settings, SettingsUpdate, Theme};
pub use counting::{CardCounter, CountingSystem};
pub use error::{ActionError, ConfigError, DataError, EngineError};
pub use game::{GameState, Phase};
pub use hand::{DealerHand, Hand, HandStatus, HandValue, hand_value};
pub use result::{HandResult, RoundResult};
pub use rules::{Outcome, calculate_payout, dealer_should_hit, determine_outcome};
pub use shoe::Shoe;
pub use side_bets::{SideBetKind, SideBetResult};
pub use strategy::{Availability, PlayerAction, StrategyDecision, basic_strategy};
#[cfg(feature = "std")]
pub use table::SystemClock;
pub use table::{Clock, Table};
pub use training::{DifficultyLevel, SpeedTrainingGoal};
