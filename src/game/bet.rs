use alloc::vec;

use tracing::debug;

use crate::achievements::AchievementEvent;
use crate::error::ActionError;
use crate::hand::{DealerHand, Hand};
use crate::side_bets::{SideBetKind, SideBets, evaluate_perfect_pairs, evaluate_twenty_one_plus_three};

use super::{GameState, Phase};

impl GameState {
    /// Places the main bet and moves to [`Phase::Dealing`].
    ///
    /// The bet and any side-bet stakes are deducted from the balance now.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not [`Phase::Betting`], the amount is
    /// outside the table limits, or the balance cannot cover the bet plus side
    /// bets.
    pub fn place_bet(&mut self, amount: u64) -> Result<(), ActionError> {
        if self.phase != Phase::Betting {
            return Err(ActionError::InvalidPhase);
        }

        if !self.config.bet_in_range(amount) {
            return Err(ActionError::BetOutOfRange {
                min: self.config.min_bet,
                max: self.config.max_bet,
            });
        }

        let total = amount.saturating_add(self.side_bets.total());
        if total > self.balance {
            return Err(ActionError::InsufficientFunds);
        }

        self.balance -= total;
        self.current_bet = amount;
        self.settings.last_bet_amount = amount;
        self.result = None;
        self.result_message.clear();
        debug!(amount, side_bets = self.side_bets.total(), "bet placed");
        self.enter(Phase::Dealing);

        Ok(())
    }

    /// Sets the stake for one side bet. A stake of 0 removes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not [`Phase::Betting`], the side bet is
    /// not enabled at this table, or the stake exceeds the balance.
    pub fn set_side_bet(&mut self, kind: SideBetKind, amount: u64) -> Result<(), ActionError> {
        if self.phase != Phase::Betting {
            return Err(ActionError::InvalidPhase);
        }

        let enabled = self.config.side_bets_enabled
            && match kind {
                SideBetKind::PerfectPairs => self.config.perfect_pairs_enabled,
                SideBetKind::TwentyOnePlusThree => self.config.twenty_one_plus_three_enabled,
            };
        if !enabled {
            return Err(ActionError::SideBetDisabled);
        }

        if amount > self.balance {
            return Err(ActionError::InsufficientFunds);
        }

        self.side_bets.set(kind, amount);
        Ok(())
    }

    /// Removes all side-bet stakes.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not [`Phase::Betting`].
    pub fn clear_side_bets(&mut self) -> Result<(), ActionError> {
        if self.phase != Phase::Betting {
            return Err(ActionError::InvalidPhase);
        }
        self.side_bets = SideBets::default();
        Ok(())
    }

    /// Deals player, dealer up card, player, dealer hole card.
    ///
    /// Side bets are settled against the first three visible cards. With an
    /// Ace showing and insurance available, the round opens with an insurance
    /// decision pending. Otherwise a natural on either side settles the round
    /// at once.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not [`Phase::Dealing`], or
    /// [`EngineError::EmptyShoe`](crate::EngineError::EmptyShoe) if the shoe
    /// runs out.
    pub fn deal_initial(&mut self) -> Result<(), ActionError> {
        if self.phase != Phase::Dealing {
            return Err(ActionError::InvalidPhase);
        }

        let first = self.draw_visible()?;
        let up = self.draw_visible()?;
        let second = self.draw_visible()?;
        let hole = self.shoe.draw()?;

        self.player_hands = vec![Hand::new(vec![first, second], self.current_bet)];
        let mut dealer = DealerHand::new();
        dealer.add_card(up);
        dealer.add_card(hole);
        self.dealer_hand = dealer;
        self.active_hand_index = 0;
        self.splits_performed = 0;
        self.insurance = 0;
        debug!(player = %first, player2 = %second, up = %up, "initial deal");

        self.settle_side_bets();
        self.enter(Phase::PlayerTurn);

        let stake = self.current_bet / 2;
        if up.is_ace() && self.config.insurance_allowed && stake > 0 && stake <= self.balance {
            self.insurance_offered = true;
            debug!(stake, "insurance offered");
            return Ok(());
        }

        let player_natural = self.player_hands.first().is_some_and(Hand::is_natural);
        if player_natural || self.dealer_hand.is_blackjack() {
            self.reveal_dealer_hole();
            self.settle_round();
        }

        Ok(())
    }

    fn settle_side_bets(&mut self) {
        self.side_bet_results.clear();
        let Some(&[first, second]) = self.player_hands.first().map(Hand::cards) else {
            return;
        };
        let cards = [first, second];
        let Some(up) = self.dealer_hand.up_card() else {
            return;
        };

        let mut results = vec![];
        if self.side_bets.perfect_pairs > 0 {
            results.push(evaluate_perfect_pairs(&cards, self.side_bets.perfect_pairs));
        }
        if self.side_bets.twenty_one_plus_three > 0 {
            results.push(evaluate_twenty_one_plus_three(
                &cards,
                up,
                self.side_bets.twenty_one_plus_three,
            ));
        }

        for result in &results {
            if !result.won {
                continue;
            }
            self.balance += result.payout;
            debug!(kind = ?result.kind, payout = result.payout, "side bet won");
            match result.kind {
                SideBetKind::PerfectPairs => self.emit(AchievementEvent::PerfectPairsWon),
                SideBetKind::TwentyOnePlusThree => {
                    if let Some(hand) = result.poker_hand {
                        self.emit(AchievementEvent::TwentyOnePlusThreeWon { hand });
                    }
                }
            }
        }
        self.side_bet_results = results;
    }
}
