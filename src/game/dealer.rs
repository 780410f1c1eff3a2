use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use tracing::{info, trace};

use crate::achievements::AchievementEvent;
use crate::card::Rank;
use crate::error::ActionError;
use crate::hand::HandStatus;
use crate::result::{HandResult, RoundResult};
use crate::rules::{Outcome, calculate_payout, dealer_should_hit, determine_outcome, surrender_refund};

use super::{GameState, Phase};

#[expect(clippy::cast_possible_wrap, reason = "stakes fit in i64")]
const fn signed(amount: u64) -> i64 {
    amount as i64
}

fn hand_message(index: usize, result: &HandResult) -> String {
    let number = index + 1;
    match result.outcome {
        Outcome::Surrender => format!("Hand {number}: Surrendered (recovered ${})", result.payout),
        Outcome::Lose if result.player_value > 21 => format!("Hand {number}: Bust (lost ${})", result.bet),
        Outcome::Blackjack => format!("Hand {number}: Blackjack! (+${})", result.net()),
        Outcome::Win => format!("Hand {number}: Win (+${})", result.net()),
        Outcome::Push => format!("Hand {number}: Push (bet returned)"),
        Outcome::Lose => format!("Hand {number}: Lose (-${})", result.bet),
    }
}

fn total_message(net: i64) -> String {
    match net.signum() {
        1 => format!("Total: +${net}"),
        -1 => format!("Total: -${}", net.unsigned_abs()),
        _ => String::from("Total: Break even"),
    }
}

impl GameState {
    /// Returns whether any hand is still in the running against the dealer.
    fn any_live_hands(&self) -> bool {
        self.player_hands
            .iter()
            .any(|hand| hand.status() == HandStatus::Stand)
    }

    /// Plays out the dealer's hand, then settles the round.
    ///
    /// The dealer reveals the hole card and draws to the house rule. If every
    /// player hand is bust or surrendered, the dealer does not draw.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not [`Phase::DealerTurn`], or
    /// [`EngineError::EmptyShoe`](crate::EngineError::EmptyShoe) if the shoe
    /// runs out while the dealer must draw.
    pub fn dealer_play(&mut self) -> Result<(), ActionError> {
        if self.phase != Phase::DealerTurn {
            return Err(ActionError::InvalidPhase);
        }

        self.reveal_dealer_hole();

        if self.any_live_hands() {
            while dealer_should_hit(self.dealer_hand.cards(), self.config.dealer_hits_soft_17) {
                let card = self.draw_visible()?;
                self.dealer_hand.add_card(card);
                trace!(card = %card, value = self.dealer_hand.value(), "dealer draws");
            }
        }

        self.settle_round();
        Ok(())
    }

    /// Settles every hand and the insurance bet, credits the balance and
    /// records the round.
    pub(super) fn settle_round(&mut self) {
        let dealer_cards = self.dealer_hand.cards().to_vec();
        let dealer_blackjack = self.dealer_hand.is_blackjack();
        let ratio = self.config.blackjack_payout;
        let rounding_blackjack = self.config.rounding_blackjack;
        let rounding_surrender = self.config.rounding_surrender;

        let mut hands = Vec::with_capacity(self.player_hands.len());
        let mut messages = Vec::new();

        let insurance_bet = self.insurance;
        let insurance_payout = if dealer_blackjack { insurance_bet * 3 } else { 0 };
        if insurance_bet > 0 {
            if dealer_blackjack {
                messages.push(format!("Insurance wins +${}", insurance_bet * 2));
            } else {
                messages.push(format!("Insurance loses -${insurance_bet}"));
            }
        }

        for (index, hand) in self.player_hands.iter_mut().enumerate() {
            // A natural settled at the deal or the peek never stood.
            if hand.is_active() {
                hand.set_status(HandStatus::Stand);
            }
            let bet = hand.bet();
            let (outcome, payout) = if hand.status() == HandStatus::Surrender {
                (Outcome::Surrender, surrender_refund(bet, rounding_surrender))
            } else {
                let outcome = determine_outcome(hand.cards(), &dealer_cards);
                (outcome, calculate_payout(bet, outcome, ratio, rounding_blackjack))
            };
            hand.settle(outcome, payout);

            let result = HandResult {
                hand_index: index,
                cards: hand.cards().to_vec(),
                outcome,
                bet,
                payout,
                player_value: hand.value(),
                doubled: hand.is_doubled(),
                from_split: hand.is_from_split(),
            };
            messages.push(hand_message(index, &result));
            hands.push(result);
        }

        let total_bet = hands.iter().map(|hand| hand.bet).sum::<u64>() + insurance_bet;
        let total_payout = hands.iter().map(|hand| hand.payout).sum::<u64>() + insurance_payout;
        let net = signed(total_payout) - signed(total_bet);
        messages.push(total_message(net));

        let outcome = match hands.as_slice() {
            [only] if insurance_bet == 0 => only.outcome,
            _ => match net.signum() {
                1 => Outcome::Win,
                -1 => Outcome::Lose,
                _ => Outcome::Push,
            },
        };

        self.balance += total_payout;
        self.insurance_offered = false;
        self.active_hand_index = self.player_hands.len();

        let round = RoundResult {
            hands,
            dealer_cards,
            dealer_value: self.dealer_hand.value(),
            dealer_bust: self.dealer_hand.is_bust(),
            dealer_blackjack,
            insurance_bet,
            insurance_payout,
            total_bet,
            total_payout,
            net,
            outcome,
            messages,
        };

        self.enter(Phase::GameOver);
        info!(net, balance = self.balance, outcome = round.outcome.label(), "round settled");

        let previous_net = self.statistics.session.net_profit;
        self.statistics = core::mem::take(&mut self.statistics).record_hand(
            &round,
            &self.config.name,
            self.balance,
            self.clock_ms,
        );

        if let Some(difficulty) = self.speed_training.record_round(self.clock_ms) {
            self.emit(AchievementEvent::SpeedTrainingComplete { difficulty });
        }

        self.emit_round_events(&round, previous_net);
        self.result_message = round.message();
        self.result = Some(round);
    }

    fn emit_round_events(&mut self, round: &RoundResult, previous_net: i64) {
        if round.hands.iter().any(|hand| hand.outcome.is_win()) {
            self.emit(AchievementEvent::HandWon);
        }
        if round.hands.iter().any(|hand| hand.outcome == Outcome::Blackjack) {
            self.emit(AchievementEvent::Blackjack);
        }
        if round.net > 0 {
            let session = &self.statistics.session;
            let streak = session.current_streak.unsigned_abs();
            let profit = session.net_profit;
            self.emit(AchievementEvent::WinStreak { streak });
            self.emit(AchievementEvent::SessionProfit { profit });
        }
        if round
            .hands
            .iter()
            .any(|hand| hand.doubled && hand.outcome.is_win())
        {
            self.emit(AchievementEvent::DoubleWin);
        }
        if round.hands.len() > 1 && round.hands.iter().all(|hand| hand.outcome.is_win()) {
            self.emit(AchievementEvent::SplitBothWin);
        }
        if round
            .hands
            .iter()
            .any(|hand| hand.player_value == 21 && hand.cards.len() >= 3)
        {
            self.emit(AchievementEvent::Exact21);
        }
        if round.hands.iter().any(|hand| {
            hand.cards.iter().filter(|card| card.rank == Rank::Seven).count() >= 3
        }) {
            self.emit(AchievementEvent::ThreeSevens);
        }

        let session = &self.statistics.session;
        if session.lowest_net_profit < 0 && previous_net <= 0 && session.net_profit > 0 {
            self.emit(AchievementEvent::Comeback);
        }

        self.emit(AchievementEvent::HandsPlayed);
        if round.insurance_won() {
            self.emit(AchievementEvent::InsuranceWon);
        }
    }
}
