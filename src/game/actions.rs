use alloc::vec::Vec;

use tracing::debug;

use crate::achievements::AchievementEvent;
use crate::card::Card;
use crate::error::ActionError;
use crate::hand::{Hand, HandStatus};
use crate::strategy::{Availability, PlayerAction, StrategyDecision, basic_strategy};
use crate::training::DecisionAction;

use super::{GameState, Phase};

impl GameState {
    /// Returns the hand waiting for a decision.
    fn decision_hand(&self) -> Result<&Hand, ActionError> {
        if self.phase != Phase::PlayerTurn {
            return Err(ActionError::InvalidPhase);
        }
        self.player_hands
            .get(self.active_hand_index)
            .filter(|hand| hand.is_active())
            .ok_or(ActionError::NoActiveHand)
    }

    /// Returns how many hands on the table came from a split.
    fn split_hand_count(&self) -> usize {
        self.player_hands
            .iter()
            .filter(|hand| hand.is_from_split())
            .count()
    }

    fn active_hand_mut(&mut self) -> Result<&mut Hand, ActionError> {
        self.player_hands
            .get_mut(self.active_hand_index)
            .ok_or(ActionError::NoActiveHand)
    }

    /// Checks whether the active hand may take a card.
    ///
    /// # Errors
    ///
    /// Returns the reason a hit would be refused.
    pub fn ensure_can_hit(&self) -> Result<(), ActionError> {
        let hand = self.decision_hand()?;
        if hand.is_split_ace() {
            return Err(ActionError::SplitAcesLocked);
        }
        Ok(())
    }

    /// Checks whether the active hand may stand.
    ///
    /// # Errors
    ///
    /// Returns the reason a stand would be refused.
    pub fn ensure_can_stand(&self) -> Result<(), ActionError> {
        self.decision_hand().map(|_| ())
    }

    /// Checks whether the active hand may double.
    ///
    /// # Errors
    ///
    /// Returns the reason a double would be refused.
    pub fn ensure_can_double(&self) -> Result<(), ActionError> {
        let hand = self.decision_hand()?;
        if hand.is_split_ace() {
            return Err(ActionError::SplitAcesLocked);
        }
        if hand.len() != 2 || hand.is_doubled() {
            return Err(ActionError::CannotDouble);
        }
        if hand.is_from_split() && !self.config.double_after_split {
            return Err(ActionError::DoubleAfterSplitDisabled);
        }
        if hand.bet() > self.balance {
            return Err(ActionError::InsufficientFunds);
        }
        Ok(())
    }

    /// Checks whether the active hand may split.
    ///
    /// # Errors
    ///
    /// Returns the reason a split would be refused.
    pub fn ensure_can_split(&self) -> Result<(), ActionError> {
        let hand = self.decision_hand()?;
        if !hand.is_pair() {
            return Err(ActionError::CannotSplit);
        }
        if self.split_hand_count() >= usize::from(self.config.max_splits) {
            return Err(ActionError::MaxSplitsReached);
        }
        if hand.is_split_ace() && !self.config.resplit_aces_allowed {
            return Err(ActionError::ResplitAcesDisabled);
        }
        if hand.bet() > self.balance {
            return Err(ActionError::InsufficientFunds);
        }
        Ok(())
    }

    /// Checks whether the player may surrender.
    ///
    /// Surrender is only possible on the untouched opening hand.
    ///
    /// # Errors
    ///
    /// Returns the reason a surrender would be refused.
    pub fn ensure_can_surrender(&self) -> Result<(), ActionError> {
        let hand = self.decision_hand()?;
        if !self.config.surrender_allowed {
            return Err(ActionError::SurrenderDisabled);
        }
        if self.player_hands.len() != 1 || hand.len() != 2 || hand.is_doubled() {
            return Err(ActionError::CannotSurrender);
        }
        Ok(())
    }

    /// Returns which optional actions the active hand allows.
    #[must_use]
    pub fn availability(&self) -> Availability {
        Availability {
            can_double: self.ensure_can_double().is_ok(),
            can_split: self.ensure_can_split().is_ok(),
            can_surrender: self.ensure_can_surrender().is_ok(),
        }
    }

    /// Returns basic-strategy advice for the active hand.
    #[must_use]
    pub fn advice(&self) -> Option<StrategyDecision> {
        let hand = self.decision_hand().ok()?;
        let up = self.dealer_hand.up_card()?;
        Some(basic_strategy(
            hand.cards(),
            up,
            &self.config,
            self.availability(),
            hand.is_from_split(),
        ))
    }

    /// Grades a decision for learning mode and speed training.
    fn grade_decision(&mut self, action: PlayerAction) {
        let learning = self.settings.learning_mode_enabled;
        let timed = self.speed_training.is_active();
        if !learning && !timed {
            return;
        }
        let Some(advice) = self.advice() else {
            return;
        };
        let optimal = advice.primary_action;

        if learning {
            let cards: Vec<Card> = self
                .decision_hand()
                .map(|hand| hand.cards().to_vec())
                .unwrap_or_default();
            if let Some(up) = self.dealer_hand.up_card() {
                let correct = self
                    .learning_mode
                    .record(&cards, up, optimal, action, self.clock_ms);
                debug!(action = action.as_str(), optimal = optimal.as_str(), correct, "decision graded");
                self.emit(AchievementEvent::BasicStrategyStreak {
                    correct: self.learning_mode.correct_streak,
                });
                self.emit(AchievementEvent::StrategyAccuracy {
                    accuracy: self.learning_mode.accuracy(),
                    hands: self.learning_mode.total_decisions,
                });
            }
        }

        if timed {
            self.speed_training
                .record_decision(action.into(), optimal, self.clock_ms);
        }
    }

    /// Draws a card on the active hand.
    ///
    /// A bust ends the hand. A pending insurance decision is declined first;
    /// if the dealer then shows blackjack, the round settles and no card is
    /// drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no active hand, the hand is a locked split
    /// ace, or the shoe is empty.
    pub fn hit(&mut self) -> Result<(), ActionError> {
        self.ensure_can_hit()?;
        self.grade_decision(PlayerAction::Hit);
        if self.close_insurance_window() {
            return Ok(());
        }

        let card = self.draw_visible()?;
        let hand = self.active_hand_mut()?;
        hand.add_card(card);
        let finished = !hand.is_active();
        debug!(card = %card, value = hand.value(), "hit");

        if finished {
            self.advance();
        }
        Ok(())
    }

    /// Stands on the active hand.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no active hand.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        self.ensure_can_stand()?;
        self.grade_decision(PlayerAction::Stand);
        if self.close_insurance_window() {
            return Ok(());
        }
        self.stand_active_hand()
    }

    pub(super) fn stand_active_hand(&mut self) -> Result<(), ActionError> {
        self.active_hand_mut()?.set_status(HandStatus::Stand);
        self.advance();
        Ok(())
    }

    /// Doubles the stake on the active hand, draws one card and stands.
    ///
    /// # Errors
    ///
    /// Returns an error if the hand is not an untouched two-card hand, doubling
    /// after a split is disabled, the balance cannot cover the extra stake, or
    /// the shoe is empty.
    pub fn double(&mut self) -> Result<(), ActionError> {
        self.ensure_can_double()?;
        self.grade_decision(PlayerAction::Double);
        if self.close_insurance_window() {
            return Ok(());
        }

        let card = self.draw_visible()?;
        let hand = self.active_hand_mut()?;
        let extra = hand.bet();
        hand.double_bet();
        hand.add_card(card);
        if hand.is_active() {
            hand.set_status(HandStatus::Stand);
        }
        debug!(card = %card, bet = hand.bet(), "doubled");

        self.balance -= extra;
        self.statistics = core::mem::take(&mut self.statistics).record_double();
        self.advance();
        Ok(())
    }

    /// Splits the active pair into two hands, each with the original stake.
    ///
    /// Each new hand gets one card. Split aces stand at once, unless the new
    /// card is another ace that may still be re-split.
    ///
    /// # Errors
    ///
    /// Returns an error if the hand is not a pair, `max_splits` split hands are
    /// already on the table, aces may not be re-split, the balance cannot
    /// cover the extra stake, or the shoe is empty.
    pub fn split(&mut self) -> Result<(), ActionError> {
        self.ensure_can_split()?;
        self.grade_decision(PlayerAction::Split);
        if self.close_insurance_window() {
            return Ok(());
        }

        let index = self.active_hand_index;
        let hand = self.active_hand_mut()?;
        let bet = hand.bet();
        let &[first, second] = hand.cards() else {
            return Err(ActionError::CannotSplit);
        };

        let card_one = self.draw_visible()?;
        let card_two = self.draw_visible()?;
        self.balance -= bet;
        self.splits_performed += 1;

        self.player_hands[index] = Hand::from_split(first, card_one, bet);
        self.player_hands
            .insert(index + 1, Hand::from_split(second, card_two, bet));

        if first.is_ace() {
            let can_resplit = self.config.resplit_aces_allowed
                && self.split_hand_count() < usize::from(self.config.max_splits);
            for hand in &mut self.player_hands[index..=index + 1] {
                if !(can_resplit && hand.is_pair()) {
                    hand.set_status(HandStatus::Stand);
                }
            }
        }
        self.statistics = core::mem::take(&mut self.statistics).record_split();
        debug!(hands = self.player_hands.len(), splits = self.splits_performed, "split");

        if !self.player_hands[index].is_active() {
            self.advance();
        }
        Ok(())
    }

    /// Surrenders the opening hand. Half the stake comes back at settlement.
    ///
    /// # Errors
    ///
    /// Returns an error if surrender is disabled or the hand is not the
    /// untouched opening hand.
    pub fn surrender(&mut self) -> Result<(), ActionError> {
        self.ensure_can_surrender()?;
        self.grade_decision(PlayerAction::Surrender);
        if self.close_insurance_window() {
            return Ok(());
        }

        self.active_hand_mut()?.set_status(HandStatus::Surrender);
        self.statistics = core::mem::take(&mut self.statistics).record_surrender();
        debug!("surrendered");
        self.advance();
        Ok(())
    }

    /// Moves to the next active hand, or to the dealer when none is left.
    pub(super) fn advance(&mut self) {
        let next = self
            .player_hands
            .iter()
            .enumerate()
            .skip(self.active_hand_index + 1)
            .find(|(_, hand)| hand.is_active())
            .map(|(index, _)| index);

        match next {
            Some(index) => self.active_hand_index = index,
            None => {
                self.active_hand_index = self.player_hands.len();
                self.enter(Phase::DealerTurn);
            }
        }
    }

    /// Handles an expired speed-training timer: the decision is graded as a
    /// timeout and the active hand stands.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::SpeedTrainingInactive`] without a running
    /// session, or an error if there is no active hand.
    pub fn timeout_decision(&mut self) -> Result<(), ActionError> {
        if !self.speed_training.is_active() {
            return Err(ActionError::SpeedTrainingInactive);
        }
        self.ensure_can_stand()?;

        if let Some(advice) = self.advice() {
            self.speed_training
                .record_decision(DecisionAction::Timeout, advice.primary_action, self.clock_ms);
        }
        debug!("decision timed out");
        if self.close_insurance_window() {
            return Ok(());
        }
        self.stand_active_hand()
    }
}
