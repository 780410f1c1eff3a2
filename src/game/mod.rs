//! Game state and the action reducer.

use alloc::string::String;
use alloc::vec::Vec;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::achievements::{AchievementBook, AchievementEvent, AchievementId, AchievementProgress, check_achievements};
use crate::card::Card;
use crate::config::library::active_config_name;
use crate::config::{ConfigUpdate, GameConfig, Settings, SettingsUpdate, Theme};
use crate::counting::CardCounter;
use crate::error::EngineError;
use crate::hand::{DealerHand, Hand};
use crate::result::RoundResult;
use crate::shoe::Shoe;
use crate::side_bets::{SideBetResult, SideBets};
use crate::statistics::{AllTimeStatistics, BankrollSnapshot, HandRecord, StatisticsState};
use crate::storage::{
    KeyValueStore, STORAGE_KEY_ACHIEVEMENTS, STORAGE_KEY_BALANCE, STORAGE_KEY_BANKROLL_HISTORY,
    STORAGE_KEY_HAND_HISTORY, STORAGE_KEY_SETTINGS, STORAGE_KEY_STATISTICS, STORAGE_KEY_TABLE_RULES,
    STORAGE_KEY_THEME, load_json,
};
use crate::training::{LearningModeState, SpeedTrainingState};

mod actions;
mod bet;
mod dealer;
mod dispatch;
mod insurance;
mod session;
pub mod state;

pub use state::Phase;

/// The whole game: the round in progress plus everything around it.
///
/// `GameState` is a value. [`GameState::apply`] consumes it and returns the
/// next state. Each transition is also available as a `&mut self` method
/// that reports why an action was refused.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    phase: Phase,
    balance: u64,
    current_bet: u64,
    #[serde(rename = "cardsRemaining", serialize_with = "serialize_shoe_len")]
    shoe: Shoe,
    player_hands: Vec<Hand>,
    dealer_hand: DealerHand,
    active_hand_index: usize,
    insurance: u64,
    insurance_offered: bool,
    splits_performed: u8,
    side_bets: SideBets,
    side_bet_results: Vec<SideBetResult>,
    result: Option<RoundResult>,
    result_message: String,
    config: GameConfig,
    settings: Settings,
    theme: Theme,
    learning_mode: LearningModeState,
    speed_training: SpeedTrainingState,
    card_counting: CardCounter,
    statistics: StatisticsState,
    achievements: AchievementBook,
    recent_unlocks: Vec<AchievementId>,
    clock_ms: u64,
    #[serde(skip)]
    rng: ChaCha8Rng,
}

fn serialize_shoe_len<S: serde::Serializer>(shoe: &Shoe, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(shoe.len() as u64)
}

impl GameState {
    /// Creates a game at the betting phase with a freshly shuffled shoe.
    ///
    /// The config is taken as given; run [`GameConfig::validate`] first if it
    /// comes from outside.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{GameConfig, GameState, Phase};
    ///
    /// let state = GameState::new(GameConfig::default(), 42);
    /// assert_eq!(state.phase(), Phase::Betting);
    /// assert_eq!(state.balance(), 1000);
    /// assert_eq!(state.cards_remaining(), 312);
    /// ```
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let shoe = Shoe::new(config.deck_count, &mut rng);

        Self {
            phase: Phase::Betting,
            balance: config.starting_balance,
            current_bet: 0,
            shoe,
            player_hands: Vec::new(),
            dealer_hand: DealerHand::new(),
            active_hand_index: 0,
            insurance: 0,
            insurance_offered: false,
            splits_performed: 0,
            side_bets: SideBets::default(),
            side_bet_results: Vec::new(),
            result: None,
            result_message: String::new(),
            settings: Settings::for_config(&config),
            theme: Theme::default(),
            learning_mode: LearningModeState::default(),
            speed_training: SpeedTrainingState::default(),
            card_counting: CardCounter::new(config.deck_count),
            statistics: StatisticsState::new(0),
            achievements: AchievementBook::new(),
            recent_unlocks: Vec::new(),
            clock_ms: 0,
            config,
            rng,
        }
    }

    /// Creates a game from persisted data.
    ///
    /// Stored table rules are merged over `base`. Balance, settings, theme,
    /// lifetime statistics, histories and achievements are loaded when
    /// present. Missing keys fall back to defaults; corrupt keys are logged
    /// and ignored.
    #[must_use]
    pub fn restore<S: KeyValueStore + ?Sized>(base: GameConfig, store: &S, seed: u64) -> Self {
        let mut config = base;
        if let Some(rules) = load_json::<ConfigUpdate, _>(store, STORAGE_KEY_TABLE_RULES) {
            let merged = rules.apply_to(&config);
            match merged.validate() {
                Ok(()) => config = merged,
                Err(err) => warn!(error = %err, "ignoring invalid stored table rules"),
            }
        }
        if let Some(name) = active_config_name(store) {
            config.name = name;
        }

        let mut state = Self::new(config, seed);

        if let Some(raw) = store.get(STORAGE_KEY_BALANCE) {
            match raw.trim().parse::<u64>() {
                Ok(balance) => state.balance = balance,
                Err(err) => warn!(error = %err, "ignoring corrupt stored balance"),
            }
        }
        if let Some(stored) = load_json::<SettingsUpdate, _>(store, STORAGE_KEY_SETTINGS) {
            state.settings = stored.apply_to(&state.settings);
        }
        if let Some(raw) = store.get(STORAGE_KEY_THEME) {
            match Theme::parse(raw.trim()) {
                Some(theme) => state.theme = theme,
                None => warn!(value = %raw, "ignoring unknown stored theme"),
            }
        }
        if let Some(all_time) = load_json::<AllTimeStatistics, _>(store, STORAGE_KEY_STATISTICS) {
            state.statistics.all_time = all_time;
        }
        if let Some(history) = load_json::<Vec<HandRecord>, _>(store, STORAGE_KEY_HAND_HISTORY) {
            state.statistics.hand_history = history.into();
        }
        if let Some(history) = load_json::<Vec<BankrollSnapshot>, _>(store, STORAGE_KEY_BANKROLL_HISTORY) {
            state.statistics.bankroll_history = history.into();
        }
        let limits = (
            state.statistics.max_hand_history_size,
            state.statistics.max_bankroll_history_size,
        );
        state.statistics = core::mem::take(&mut state.statistics).with_history_limits(limits.0, limits.1);
        if let Some(book) = load_json::<AchievementBook, _>(store, STORAGE_KEY_ACHIEVEMENTS) {
            state.achievements = book;
        }

        debug!(balance = state.balance, config = %state.config.name, "state restored");
        state
    }

    /// Replaces the shoe, e.g. with a stacked one from [`Shoe::from_cards`].
    ///
    /// The count restarts for the new shoe.
    #[must_use]
    pub fn with_shoe(mut self, shoe: Shoe) -> Self {
        self.card_counting.reset_shoe(shoe.deck_count());
        self.shoe = shoe;
        self
    }

    /// Sets the balance.
    #[must_use]
    pub const fn with_balance(mut self, balance: u64) -> Self {
        self.balance = balance;
        self
    }

    /// Sets the logical clock used for timestamps and decision timing.
    #[must_use]
    pub const fn at(mut self, now_ms: u64) -> Self {
        self.clock_ms = now_ms;
        self
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the balance. Stakes on the table are already deducted.
    #[must_use]
    pub const fn balance(&self) -> u64 {
        self.balance
    }

    /// Returns the main bet for the current round.
    #[must_use]
    pub const fn current_bet(&self) -> u64 {
        self.current_bet
    }

    /// Returns the shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Returns the number of cards left in the shoe.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.shoe.len()
    }

    /// Returns the player's hands.
    #[must_use]
    pub fn player_hands(&self) -> &[Hand] {
        &self.player_hands
    }

    /// Returns the index of the hand waiting for a decision.
    ///
    /// Past the end once the player's turn is over.
    #[must_use]
    pub const fn active_hand_index(&self) -> usize {
        self.active_hand_index
    }

    /// Returns the hand waiting for a decision, if any.
    #[must_use]
    pub fn active_hand(&self) -> Option<&Hand> {
        if self.phase != Phase::PlayerTurn {
            return None;
        }
        self.player_hands
            .get(self.active_hand_index)
            .filter(|hand| hand.is_active())
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn dealer_hand(&self) -> &DealerHand {
        &self.dealer_hand
    }

    /// Returns the insurance stake.
    #[must_use]
    pub const fn insurance(&self) -> u64 {
        self.insurance
    }

    /// Returns whether an insurance decision is pending.
    #[must_use]
    pub const fn is_insurance_offered(&self) -> bool {
        self.insurance_offered
    }

    /// Returns the number of splits made this round.
    #[must_use]
    pub const fn splits_performed(&self) -> u8 {
        self.splits_performed
    }

    /// Returns the side-bet stakes for the next deal.
    #[must_use]
    pub const fn side_bets(&self) -> &SideBets {
        &self.side_bets
    }

    /// Returns the side-bet results of the current round.
    #[must_use]
    pub fn side_bet_results(&self) -> &[SideBetResult] {
        &self.side_bet_results
    }

    /// Returns the settled round, once there is one.
    #[must_use]
    pub const fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    /// Returns the settlement message trail.
    #[must_use]
    pub fn result_message(&self) -> &str {
        &self.result_message
    }

    /// Returns the table rules.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the player's preferences.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the colour scheme.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns learning-mode progress.
    #[must_use]
    pub const fn learning_mode(&self) -> &LearningModeState {
        &self.learning_mode
    }

    /// Returns speed-training state.
    #[must_use]
    pub const fn speed_training(&self) -> &SpeedTrainingState {
        &self.speed_training
    }

    /// Returns the card counter.
    #[must_use]
    pub const fn card_counting(&self) -> &CardCounter {
        &self.card_counting
    }

    /// Returns statistics.
    #[must_use]
    pub const fn statistics(&self) -> &StatisticsState {
        &self.statistics
    }

    /// Returns unlocked achievements.
    #[must_use]
    pub const fn achievements(&self) -> &AchievementBook {
        &self.achievements
    }

    /// Returns achievements unlocked by the most recent action.
    #[must_use]
    pub fn recent_unlocks(&self) -> &[AchievementId] {
        &self.recent_unlocks
    }

    /// Returns the logical clock.
    #[must_use]
    pub const fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!(from = ?self.phase, to = ?phase, "phase change");
            self.phase = phase;
        }
    }

    /// Draws a card that the player can see and counts it.
    fn draw_visible(&mut self) -> Result<Card, EngineError> {
        let card = self.shoe.draw()?;
        self.card_counting.observe(card);
        Ok(card)
    }

    /// Turns the hole card over and counts it, once.
    fn reveal_dealer_hole(&mut self) {
        if self.dealer_hand.is_hole_revealed() {
            return;
        }
        self.dealer_hand.reveal_hole();
        if let Some(hole) = self.dealer_hand.hole_card() {
            self.card_counting.observe(hole);
        }
    }

    /// Replaces the shoe after the previous one ran low.
    fn reshuffle(&mut self) {
        self.shoe = Shoe::new(self.config.deck_count, &mut self.rng);
        info!(decks = self.config.deck_count, "shoe reshuffled");
        if self.card_counting.reset_shoe(self.config.deck_count) {
            self.emit(AchievementEvent::CardCountingShoe);
        }
    }

    /// Reshuffles before the next round if the shoe has run low.
    fn reshuffle_if_low(&mut self) {
        if self.shoe.needs_reshuffle() {
            self.reshuffle();
        }
    }

    /// Replaces the shoe after a rule change. The count restarts.
    fn rebuild_shoe(&mut self) {
        self.shoe = Shoe::new(self.config.deck_count, &mut self.rng);
        self.card_counting.reset_shoe(self.config.deck_count);
        info!(decks = self.config.deck_count, "shoe rebuilt");
    }

    /// Clears the table and returns to betting.
    fn reset_round(&mut self) {
        self.player_hands.clear();
        self.dealer_hand = DealerHand::new();
        self.active_hand_index = 0;
        self.current_bet = 0;
        self.insurance = 0;
        self.insurance_offered = false;
        self.splits_performed = 0;
        self.side_bet_results.clear();
        self.result = None;
        self.result_message.clear();
        self.enter(Phase::Betting);
    }

    /// Runs the unlock rules for `event`.
    fn emit(&mut self, event: AchievementEvent) {
        let progress = AchievementProgress {
            total_wins: self.statistics.all_time.total_hands_won,
            total_hands_played: self.statistics.all_time.total_hands_played,
        };
        let check = check_achievements(&self.achievements, progress, &event, self.clock_ms);
        for id in &check.newly_unlocked {
            info!(achievement = ?id, "achievement unlocked");
        }
        self.achievements = check.achievements;
        self.recent_unlocks.extend(check.newly_unlocked);
    }
}
