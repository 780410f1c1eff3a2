use tracing::{debug, warn};

use crate::action::Action;
use crate::error::{ActionError, EngineError};

use super::{GameState, Phase};

impl GameState {
    /// Applies `action` and returns the next state.
    ///
    /// An action the current state does not allow is a no-op: the state comes
    /// back unchanged and the reason is logged at debug level. Only engine
    /// faults, such as drawing from an empty shoe, are returned as errors.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{Action, GameConfig, GameState, Phase};
    ///
    /// let state = GameState::new(GameConfig::default(), 7);
    /// let state = state.apply(&Action::PlaceBet { amount: 25 }).unwrap();
    /// assert_eq!(state.phase(), Phase::Dealing);
    /// assert_eq!(state.balance(), 975);
    ///
    /// // Standing is not possible while dealing; nothing changes.
    /// let same = state.clone().apply(&Action::Stand).unwrap();
    /// assert_eq!(same.phase(), Phase::Dealing);
    /// assert_eq!(same.balance(), 975);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyShoe`] if a card is needed and the shoe is
    /// empty.
    pub fn apply(self, action: &Action) -> Result<Self, EngineError> {
        let mut next = self.clone();
        match next.perform(action) {
            Ok(()) => Ok(next),
            Err(ActionError::Engine(err)) => {
                warn!(action = action.name(), error = %err, "engine fault");
                Err(err)
            }
            Err(err) => {
                debug!(action = action.name(), reason = %err, "action rejected");
                Ok(self)
            }
        }
    }

    /// Applies `action` in place.
    ///
    /// Unlike [`GameState::apply`], a refused action is reported. The state
    /// is only left untouched for refusals; after an engine fault it may be
    /// partially updated.
    ///
    /// # Errors
    ///
    /// Returns why the action was refused, or the engine fault.
    pub fn perform(&mut self, action: &Action) -> Result<(), ActionError> {
        self.recent_unlocks.clear();

        match action {
            Action::PlaceBet { amount } => self.place_bet(*amount),
            Action::DealInitial => self.deal_initial(),
            Action::Hit => self.hit(),
            Action::Stand => self.stand(),
            Action::Double => self.double(),
            Action::Split => self.split(),
            Action::Surrender => self.surrender(),
            Action::Insurance => self.take_insurance(),
            Action::DeclineInsurance => self.decline_insurance(),
            Action::DealerPlay => self.dealer_play(),
            Action::NewGame => self.new_game(),
            Action::ResetBalance => {
                self.reset_balance();
                Ok(())
            }
            Action::UpdateSettings { settings } => {
                self.update_settings(settings);
                Ok(())
            }
            Action::UpdateConfig { config } => self.update_config(config),
            Action::LoadConfig { config } => self.load_config(config.clone()),
            Action::ToggleLearningMode => {
                self.toggle_learning_mode();
                Ok(())
            }
            Action::UpdateStrategyHint => self.update_strategy_hint(),
            Action::ClearMistakes => {
                self.clear_mistakes();
                Ok(())
            }
            Action::StartSpeedTraining { difficulty, goal } => {
                self.start_speed_training(*difficulty, *goal);
                Ok(())
            }
            Action::StopSpeedTraining => self.stop_speed_training(),
            Action::TimeoutDecision => self.timeout_decision(),
            Action::SetSideBet { kind, amount } => self.set_side_bet(*kind, *amount),
            Action::ClearSideBets => self.clear_side_bets(),
            Action::ToggleCardCounting => {
                self.toggle_card_counting();
                Ok(())
            }
            Action::SetCountingSystem { system } => {
                self.set_counting_system(*system);
                Ok(())
            }
            Action::ResetSessionStatistics => {
                self.reset_session_statistics();
                Ok(())
            }
            Action::ClearStatistics => {
                self.clear_statistics();
                Ok(())
            }
            Action::SetTheme { theme } => {
                self.set_theme(*theme);
                Ok(())
            }
            Action::ToggleTheme => {
                self.toggle_theme();
                Ok(())
            }
            Action::ImportState { snapshot } => self.import_state(snapshot),
        }?;

        self.refresh_derived();
        Ok(())
    }

    /// Recomputes the strategy hint and the speed-training decision timer.
    fn refresh_derived(&mut self) {
        self.learning_mode.current_strategy = if self.settings.learning_mode_enabled {
            self.advice()
        } else {
            None
        };

        if self.phase == Phase::PlayerTurn && self.active_hand().is_some() {
            self.speed_training.start_timer(self.clock_ms);
        } else {
            self.speed_training.clear_timer();
        }
    }
}
