//! Session and lifetime statistics.
//!
//! Every function here is a reducer: it consumes the previous state and
//! returns the next one.

use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::result::RoundResult;
use crate::rules::Outcome;

/// Default number of hand records kept.
pub const DEFAULT_MAX_HAND_HISTORY: usize = 500;
/// Default number of bankroll snapshots kept.
pub const DEFAULT_MAX_BANKROLL_HISTORY: usize = 1000;

/// Counters for the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionStatistics {
    /// When the session started (ms).
    pub session_start_time: u64,
    /// When the session ended, if it has.
    pub session_end_time: Option<u64>,
    /// Rounds played.
    pub hands_played: u64,
    /// Hands won, blackjacks included.
    pub hands_won: u64,
    /// Hands lost.
    pub hands_lost: u64,
    /// Hands pushed.
    pub hands_pushed: u64,
    /// Naturals paid.
    pub blackjacks_hit: u64,
    /// Total staked.
    pub total_wagered: u64,
    /// Total returned.
    pub total_payout: u64,
    /// Net result.
    pub net_profit: i64,
    /// Best round.
    pub biggest_win: i64,
    /// Worst round (zero or negative).
    pub biggest_loss: i64,
    /// Positive for a winning streak, negative for a losing one.
    pub current_streak: i32,
    /// Longest run of winning rounds.
    pub longest_win_streak: u32,
    /// Longest run of losing rounds.
    pub longest_lose_streak: u32,
    /// Splits made.
    pub splits_performed: u64,
    /// Doubles made.
    pub doubles_performed: u64,
    /// Surrenders made.
    pub surrenders_performed: u64,
    /// Insurance bets placed.
    pub insurance_taken: u64,
    /// Insurance bets paid.
    pub insurance_won: u64,
    /// Lowest net result reached during the session.
    pub lowest_net_profit: i64,
}

impl SessionStatistics {
    /// A fresh session starting at `now`.
    #[must_use]
    pub fn starting_at(now: u64) -> Self {
        Self {
            session_start_time: now,
            ..Self::default()
        }
    }

    /// Share of decided hands that were won, in percent.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "hand counts are far below f64 precision limits"
    )]
    pub fn win_rate(&self) -> f64 {
        let decided = self.hands_won + self.hands_lost;
        if decided == 0 {
            return 0.0;
        }
        self.hands_won as f64 / decided as f64 * 100.0
    }
}

/// Lifetime counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AllTimeStatistics {
    /// Rounds played.
    pub total_hands_played: u64,
    /// Hands won, blackjacks included.
    pub total_hands_won: u64,
    /// Hands lost.
    pub total_hands_lost: u64,
    /// Hands pushed.
    pub total_hands_pushed: u64,
    /// Naturals paid.
    pub total_blackjacks_hit: u64,
    /// Total staked.
    pub total_wagered: u64,
    /// Total returned.
    pub total_payout: u64,
    /// Net result.
    pub total_net_profit: i64,
    /// Best round.
    pub biggest_win: i64,
    /// Worst round (zero or negative).
    pub biggest_loss: i64,
    /// Longest run of winning rounds.
    pub longest_win_streak: u32,
    /// Longest run of losing rounds.
    pub longest_lose_streak: u32,
    /// Splits made.
    pub total_splits_performed: u64,
    /// Doubles made.
    pub total_doubles_performed: u64,
    /// Surrenders made.
    pub total_surrenders_performed: u64,
    /// Insurance bets placed.
    pub total_insurance_taken: u64,
    /// Insurance bets paid.
    pub total_insurance_won: u64,
    /// Sessions closed.
    pub sessions_played: u64,
    /// First round ever recorded (ms), 0 if none.
    pub first_played_timestamp: u64,
    /// Most recent round recorded (ms).
    pub last_played_timestamp: u64,
}

/// One hand inside a [`HandRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedHand {
    /// Final cards.
    pub cards: Vec<Card>,
    /// Final stake.
    pub bet: u64,
    /// Outcome.
    pub result: Outcome,
    /// Amount returned.
    pub payout: u64,
}

/// A settled round in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandRecord {
    /// Unique id, `<timestamp>-<sequence>`.
    pub id: String,
    /// When the round settled (ms).
    pub timestamp: u64,
    /// The player's hands.
    pub player_hands: Vec<RecordedHand>,
    /// The dealer's final cards.
    pub dealer_hand: Vec<Card>,
    /// Staked, insurance included.
    pub total_bet: u64,
    /// Returned, insurance included.
    pub total_payout: u64,
    /// Net result.
    pub net_profit: i64,
    /// Insurance stake.
    pub insurance: u64,
    /// Name of the table configuration.
    pub config_name: String,
}

/// Balance after a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankrollSnapshot {
    /// When the snapshot was taken (ms).
    pub timestamp: u64,
    /// Balance after settlement.
    pub balance: u64,
    /// Id of the round that produced it.
    pub hand_id: String,
}

/// Everything the statistics screen needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsState {
    /// Current session.
    pub session: SessionStatistics,
    /// Lifetime totals.
    pub all_time: AllTimeStatistics,
    /// Most recent rounds, oldest first.
    pub hand_history: VecDeque<HandRecord>,
    /// Balance after each recent round, oldest first.
    pub bankroll_history: VecDeque<BankrollSnapshot>,
    /// Cap on `hand_history`.
    pub max_hand_history_size: usize,
    /// Cap on `bankroll_history`.
    pub max_bankroll_history_size: usize,
    #[serde(default)]
    next_sequence: u64,
}

impl Default for StatisticsState {
    fn default() -> Self {
        Self::new(0)
    }
}

fn push_bounded<T>(buffer: &mut VecDeque<T>, item: T, cap: usize) {
    buffer.push_back(item);
    while buffer.len() > cap {
        buffer.pop_front();
    }
}

impl StatisticsState {
    /// Empty statistics with a session starting at `now`.
    #[must_use]
    pub fn new(now: u64) -> Self {
        Self {
            session: SessionStatistics::starting_at(now),
            all_time: AllTimeStatistics::default(),
            hand_history: VecDeque::new(),
            bankroll_history: VecDeque::new(),
            max_hand_history_size: DEFAULT_MAX_HAND_HISTORY,
            max_bankroll_history_size: DEFAULT_MAX_BANKROLL_HISTORY,
            next_sequence: 0,
        }
    }

    /// Sets the history caps, evicting the oldest entries if needed.
    #[must_use]
    pub fn with_history_limits(mut self, hands: usize, bankroll: usize) -> Self {
        self.max_hand_history_size = hands;
        self.max_bankroll_history_size = bankroll;
        while self.hand_history.len() > hands {
            self.hand_history.pop_front();
        }
        while self.bankroll_history.len() > bankroll {
            self.bankroll_history.pop_front();
        }
        self
    }

    /// Records a settled round.
    ///
    /// The round counts once toward `hands_played`. The streak follows the
    /// sign of the round's net result; a break-even round leaves it alone.
    #[must_use]
    pub fn record_hand(
        mut self,
        round: &RoundResult,
        config_name: &str,
        balance: u64,
        now: u64,
    ) -> Self {
        let mut won = 0;
        let mut lost = 0;
        let mut pushed = 0;
        let mut blackjacks = 0;
        for hand in &round.hands {
            match hand.outcome {
                Outcome::Blackjack => {
                    blackjacks += 1;
                    won += 1;
                }
                Outcome::Win => won += 1,
                Outcome::Lose => lost += 1,
                Outcome::Push => pushed += 1,
                Outcome::Surrender => {}
            }
        }

        let net = round.net;
        let streak = self.session.current_streak;
        let streak = match net.signum() {
            1 if streak >= 0 => streak + 1,
            1 => 1,
            -1 if streak <= 0 => streak - 1,
            -1 => -1,
            _ => streak,
        };
        let insured = u64::from(round.insurance_bet > 0);
        let insurance_won = u64::from(round.insurance_won());

        let session = &mut self.session;
        session.hands_played += 1;
        session.hands_won += won;
        session.hands_lost += lost;
        session.hands_pushed += pushed;
        session.blackjacks_hit += blackjacks;
        session.total_wagered += round.total_bet;
        session.total_payout += round.total_payout;
        session.net_profit += net;
        session.lowest_net_profit = session.lowest_net_profit.min(session.net_profit);
        session.biggest_win = session.biggest_win.max(net);
        session.biggest_loss = session.biggest_loss.min(net);
        session.current_streak = streak;
        if streak > 0 {
            session.longest_win_streak = session.longest_win_streak.max(streak.unsigned_abs());
        } else if streak < 0 {
            session.longest_lose_streak = session.longest_lose_streak.max(streak.unsigned_abs());
        }
        session.insurance_taken += insured;
        session.insurance_won += insurance_won;

        let all_time = &mut self.all_time;
        all_time.total_hands_played += 1;
        all_time.total_hands_won += won;
        all_time.total_hands_lost += lost;
        all_time.total_hands_pushed += pushed;
        all_time.total_blackjacks_hit += blackjacks;
        all_time.total_wagered += round.total_bet;
        all_time.total_payout += round.total_payout;
        all_time.total_net_profit += net;
        all_time.biggest_win = all_time.biggest_win.max(net);
        all_time.biggest_loss = all_time.biggest_loss.min(net);
        if streak > 0 {
            all_time.longest_win_streak = all_time.longest_win_streak.max(streak.unsigned_abs());
        } else if streak < 0 {
            all_time.longest_lose_streak = all_time.longest_lose_streak.max(streak.unsigned_abs());
        }
        all_time.total_insurance_taken += insured;
        all_time.total_insurance_won += insurance_won;
        all_time.last_played_timestamp = now;
        if all_time.first_played_timestamp == 0 {
            all_time.first_played_timestamp = now;
        }

        let id = format!("{now}-{}", self.next_sequence);
        self.next_sequence += 1;

        let record = HandRecord {
            id: id.clone(),
            timestamp: now,
            player_hands: round
                .hands
                .iter()
                .map(|hand| RecordedHand {
                    cards: hand.cards.clone(),
                    bet: hand.bet,
                    result: hand.outcome,
                    payout: hand.payout,
                })
                .collect(),
            dealer_hand: round.dealer_cards.clone(),
            total_bet: round.total_bet,
            total_payout: round.total_payout,
            net_profit: net,
            insurance: round.insurance_bet,
            config_name: String::from(config_name),
        };
        push_bounded(&mut self.hand_history, record, self.max_hand_history_size);
        push_bounded(
            &mut self.bankroll_history,
            BankrollSnapshot {
                timestamp: now,
                balance,
                hand_id: id,
            },
            self.max_bankroll_history_size,
        );

        self
    }

    /// Counts a split.
    #[must_use]
    pub const fn record_split(mut self) -> Self {
        self.session.splits_performed += 1;
        self.all_time.total_splits_performed += 1;
        self
    }

    /// Counts a double.
    #[must_use]
    pub const fn record_double(mut self) -> Self {
        self.session.doubles_performed += 1;
        self.all_time.total_doubles_performed += 1;
        self
    }

    /// Counts a surrender.
    #[must_use]
    pub const fn record_surrender(mut self) -> Self {
        self.session.surrenders_performed += 1;
        self.all_time.total_surrenders_performed += 1;
        self
    }

    /// Closes the session and starts a new one at `now`.
    ///
    /// Lifetime totals are kept; only the session counter grows.
    #[must_use]
    pub fn reset_session(mut self, now: u64) -> Self {
        self.all_time.sessions_played += 1;
        self.session = SessionStatistics::starting_at(now);
        self
    }

    /// Discards everything, keeping the history caps.
    #[must_use]
    pub fn clear_all(self, now: u64) -> Self {
        Self::new(now).with_history_limits(self.max_hand_history_size, self.max_bankroll_history_size)
    }

    /// Returns the most recent hand records, newest first.
    pub fn recent_hands(&self, limit: usize) -> impl Iterator<Item = &HandRecord> + '_ {
        self.hand_history.iter().rev().take(limit)
    }
}
