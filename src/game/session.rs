use tracing::{debug, info};

use crate::achievements::AchievementEvent;
use crate::config::{ConfigUpdate, GameConfig, Settings, SettingsUpdate, Theme};
use crate::counting::CountingSystem;
use crate::error::ActionError;
use crate::share::ExportSnapshot;
use crate::side_bets::SideBets;
use crate::training::{DifficultyLevel, SpeedTrainingGoal};

use super::GameState;

impl GameState {
    /// Clears the table for the next round, reshuffling a low shoe.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidPhase`] while a round is in progress.
    pub fn new_game(&mut self) -> Result<(), ActionError> {
        if !self.phase.is_between_rounds() {
            return Err(ActionError::InvalidPhase);
        }
        self.reset_round();
        self.side_bets = SideBets::default();
        self.reshuffle_if_low();
        Ok(())
    }

    /// Restores the starting balance and abandons any round in progress.
    ///
    /// Stakes on the table are forfeited.
    pub fn reset_balance(&mut self) {
        self.balance = self.config.starting_balance;
        self.reset_round();
        self.side_bets = SideBets::default();
        self.rebuild_shoe();
        info!(balance = self.balance, "balance reset");
    }

    /// Changes some settings.
    pub fn update_settings(&mut self, update: &SettingsUpdate) {
        self.settings = update.apply_to(&self.settings);
    }

    /// Changes some table rules. See [`GameState::load_config`].
    ///
    /// # Errors
    ///
    /// Same as [`GameState::load_config`].
    pub fn update_config(&mut self, update: &ConfigUpdate) -> Result<(), ActionError> {
        self.load_config(update.apply_to(&self.config))
    }

    /// Replaces the table rules and returns to betting.
    ///
    /// The last bet is clamped into the new limits and side-bet stakes are
    /// cleared. A changed deck count rebuilds the shoe; otherwise a low shoe
    /// is reshuffled as at [`GameState::new_game`].
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::ConfigLocked`] while a round is in progress, or
    /// [`ActionError::InvalidConfig`] if the rules fail validation.
    pub fn load_config(&mut self, config: GameConfig) -> Result<(), ActionError> {
        if !self.phase.is_between_rounds() {
            return Err(ActionError::ConfigLocked);
        }
        config.validate()?;

        let decks_changed = config.deck_count != self.config.deck_count;
        self.settings.last_bet_amount = self
            .settings
            .last_bet_amount
            .clamp(config.min_bet, config.max_bet);
        self.config = config;
        self.side_bets = SideBets::default();
        if decks_changed {
            self.rebuild_shoe();
        } else {
            self.reshuffle_if_low();
        }
        self.reset_round();
        info!(config = %self.config.name, decks = self.config.deck_count, "table rules changed");
        Ok(())
    }

    /// Switches learning mode on or off.
    pub fn toggle_learning_mode(&mut self) {
        self.settings.learning_mode_enabled = !self.settings.learning_mode_enabled;
        if !self.settings.learning_mode_enabled {
            self.learning_mode.current_strategy = None;
        }
    }

    /// Recomputes the strategy hint for the active hand.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::LearningModeDisabled`] if learning mode is off,
    /// or [`ActionError::InvalidPhase`] if no hand is waiting for a decision.
    pub fn update_strategy_hint(&mut self) -> Result<(), ActionError> {
        if !self.settings.learning_mode_enabled {
            return Err(ActionError::LearningModeDisabled);
        }
        let advice = self.advice().ok_or(ActionError::InvalidPhase)?;
        self.learning_mode.current_strategy = Some(advice);
        Ok(())
    }

    /// Clears the learning-mode log and counters.
    pub fn clear_mistakes(&mut self) {
        self.learning_mode.clear();
    }

    /// Starts a speed-training session, replacing any running one.
    pub fn start_speed_training(&mut self, difficulty: DifficultyLevel, goal: SpeedTrainingGoal) {
        self.speed_training.start(difficulty, goal, self.clock_ms);
        debug!(?difficulty, hands = goal.hands_target, "speed training started");
    }

    /// Ends the running speed-training session and archives it.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::SpeedTrainingInactive`] without a running
    /// session.
    pub fn stop_speed_training(&mut self) -> Result<(), ActionError> {
        if !self.speed_training.is_active() {
            return Err(ActionError::SpeedTrainingInactive);
        }
        if let Some(difficulty) = self.speed_training.stop(self.clock_ms) {
            self.emit(AchievementEvent::SpeedTrainingComplete { difficulty });
        }
        debug!("speed training stopped");
        Ok(())
    }

    /// Shows or hides the count.
    pub fn toggle_card_counting(&mut self) {
        let active = !self.card_counting.is_active();
        self.card_counting.set_active(active);
    }

    /// Changes the counting system. The running count is recomputed.
    pub fn set_counting_system(&mut self, system: CountingSystem) {
        self.card_counting.set_system(system);
    }

    /// Starts a new statistics session. Lifetime totals are kept.
    pub fn reset_session_statistics(&mut self) {
        self.statistics = core::mem::take(&mut self.statistics).reset_session(self.clock_ms);
    }

    /// Wipes all statistics and histories.
    pub fn clear_statistics(&mut self) {
        self.statistics = core::mem::take(&mut self.statistics).clear_all(self.clock_ms);
    }

    /// Sets the colour scheme.
    pub const fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Flips the colour scheme.
    pub const fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Loads an exported snapshot and returns to betting.
    ///
    /// Balance, rules, settings, statistics, the learning log and the
    /// speed-training history are replaced together.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::ConfigLocked`] while a round is in progress, or
    /// [`ActionError::InvalidConfig`] if the snapshot's rules fail validation.
    pub fn import_state(&mut self, snapshot: &ExportSnapshot) -> Result<(), ActionError> {
        if !self.phase.is_between_rounds() {
            return Err(ActionError::ConfigLocked);
        }
        snapshot.config.validate()?;

        let decks_changed = snapshot.config.deck_count != self.config.deck_count;
        self.balance = snapshot.balance;
        self.config = snapshot.config.clone();
        self.settings = snapshot
            .settings
            .clone()
            .unwrap_or_else(|| Settings::for_config(&self.config));
        if let Some(statistics) = &snapshot.statistics {
            self.statistics = statistics.clone();
        }

        let learning = &snapshot.learning_mode;
        self.learning_mode.mistakes.clone_from(&learning.mistakes);
        self.learning_mode.correct_decisions = learning.correct_decisions;
        self.learning_mode.total_decisions = learning.total_decisions;
        self.learning_mode.correct_streak = 0;
        self.learning_mode.last_decision = None;
        self.speed_training
            .session_history
            .clone_from(&snapshot.speed_training.session_history);

        if decks_changed {
            self.rebuild_shoe();
        } else {
            self.reshuffle_if_low();
        }
        self.side_bets = SideBets::default();
        self.reset_round();
        info!(balance = self.balance, config = %self.config.name, "state imported");
        Ok(())
    }
}
