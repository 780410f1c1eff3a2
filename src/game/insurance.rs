use tracing::debug;

use crate::error::ActionError;
use crate::hand::Hand;

use super::{GameState, Phase};

impl GameState {
    /// Takes insurance: half the main bet, rounded down, paying 2:1 if the
    /// dealer holds blackjack.
    ///
    /// Closes the insurance window, so the dealer peeks right after.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InsuranceNotOffered`] outside the insurance
    /// window, or [`ActionError::InsufficientFunds`] if the balance cannot
    /// cover the stake.
    pub fn take_insurance(&mut self) -> Result<(), ActionError> {
        if self.phase != Phase::PlayerTurn || !self.insurance_offered {
            return Err(ActionError::InsuranceNotOffered);
        }

        let stake = self.current_bet / 2;
        if stake > self.balance {
            return Err(ActionError::InsufficientFunds);
        }

        self.balance -= stake;
        self.insurance = stake;
        debug!(stake, "insurance taken");
        self.close_insurance_window();
        Ok(())
    }

    /// Declines insurance. The dealer peeks right after.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InsuranceNotOffered`] outside the insurance
    /// window.
    pub fn decline_insurance(&mut self) -> Result<(), ActionError> {
        if self.phase != Phase::PlayerTurn || !self.insurance_offered {
            return Err(ActionError::InsuranceNotOffered);
        }

        debug!("insurance declined");
        self.close_insurance_window();
        Ok(())
    }

    /// Ends a pending insurance decision and lets the dealer peek.
    ///
    /// Returns `true` if the round settled because the dealer or the player
    /// holds a natural. Returns `false` when no window was open or play goes
    /// on.
    pub(super) fn close_insurance_window(&mut self) -> bool {
        if !self.insurance_offered {
            return false;
        }
        self.insurance_offered = false;

        let player_natural = self.player_hands.first().is_some_and(Hand::is_natural);
        if self.dealer_hand.is_blackjack() || player_natural {
            debug!(dealer_blackjack = self.dealer_hand.is_blackjack(), "dealer peeked");
            self.reveal_dealer_hole();
            self.settle_round();
            return true;
        }
        false
    }
}
