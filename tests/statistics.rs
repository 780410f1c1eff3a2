//! Session and lifetime statistics.

#![expect(clippy::float_cmp, reason = "exact percentages")]

use bjtable::statistics::StatisticsState;
use bjtable::{Card, HandResult, Outcome, Rank, RoundResult, Suit};

fn round(outcomes: &[(Outcome, u64, u64)], insurance: (u64, u64)) -> RoundResult {
    let hands: Vec<HandResult> = outcomes
        .iter()
        .enumerate()
        .map(|(hand_index, &(outcome, bet, payout))| HandResult {
            hand_index,
            cards: vec![Card::new(Suit::Hearts, Rank::Ten), Card::new(Suit::Clubs, Rank::Nine)],
            outcome,
            bet,
            payout,
            player_value: 19,
            doubled: false,
            from_split: outcomes.len() > 1,
        })
        .collect();
    let total_bet = hands.iter().map(|h| h.bet).sum::<u64>() + insurance.0;
    let total_payout = hands.iter().map(|h| h.payout).sum::<u64>() + insurance.1;
    RoundResult {
        hands,
        dealer_cards: vec![Card::new(Suit::Spades, Rank::Ten), Card::new(Suit::Spades, Rank::Eight)],
        dealer_value: 18,
        dealer_bust: false,
        dealer_blackjack: false,
        insurance_bet: insurance.0,
        insurance_payout: insurance.1,
        total_bet,
        total_payout,
        net: total_payout as i64 - total_bet as i64,
        outcome: Outcome::Win,
        messages: Vec::new(),
    }
}

#[test]
fn a_round_counts_once_and_hands_individually() {
    let stats = StatisticsState::new(100).record_hand(
        &round(&[(Outcome::Win, 10, 20), (Outcome::Lose, 10, 0)], (0, 0)),
        "Standard",
        1000,
        200,
    );

    assert_eq!(stats.session.hands_played, 1);
    assert_eq!(stats.session.hands_won, 1);
    assert_eq!(stats.session.hands_lost, 1);
    assert_eq!(stats.session.net_profit, 0);
    assert_eq!(stats.session.current_streak, 0);
    assert_eq!(stats.session.win_rate(), 50.0);
    assert_eq!(stats.all_time.total_wagered, 20);
    assert_eq!(stats.all_time.first_played_timestamp, 200);

    let record = &stats.hand_history[0];
    assert_eq!(record.id, "200-0");
    assert_eq!(record.player_hands.len(), 2);
    assert_eq!(record.config_name, "Standard");
    assert_eq!(stats.bankroll_history[0].hand_id, "200-0");
    assert_eq!(stats.bankroll_history[0].balance, 1000);
}

#[test]
fn streaks_follow_the_round_net() {
    let win = round(&[(Outcome::Win, 10, 20)], (0, 0));
    let loss = round(&[(Outcome::Lose, 10, 0)], (0, 0));

    let mut stats = StatisticsState::new(0);
    for now in 0..3 {
        stats = stats.record_hand(&win, "Standard", 1000, now);
    }
    assert_eq!(stats.session.current_streak, 3);
    assert_eq!(stats.session.longest_win_streak, 3);

    for now in 3..5 {
        stats = stats.record_hand(&loss, "Standard", 1000, now);
    }
    assert_eq!(stats.session.current_streak, -2);
    assert_eq!(stats.session.longest_lose_streak, 2);
    assert_eq!(stats.all_time.longest_lose_streak, 2);
    assert_eq!(stats.session.net_profit, 10);
    assert_eq!(stats.session.lowest_net_profit, 0);
    assert_eq!(stats.session.biggest_loss, -10);
}

#[test]
fn insurance_is_tracked() {
    let stats = StatisticsState::new(0).record_hand(
        &round(&[(Outcome::Lose, 20, 0)], (10, 30)),
        "Standard",
        1000,
        1,
    );
    assert_eq!(stats.session.insurance_taken, 1);
    assert_eq!(stats.session.insurance_won, 1);
    assert_eq!(stats.session.net_profit, 0);
}

#[test]
fn histories_are_bounded() {
    let win = round(&[(Outcome::Win, 10, 20)], (0, 0));
    let mut stats = StatisticsState::new(0).with_history_limits(3, 2);
    for now in 0..5 {
        stats = stats.record_hand(&win, "Standard", 1000, now);
    }
    assert_eq!(stats.hand_history.len(), 3);
    assert_eq!(stats.bankroll_history.len(), 2);
    assert_eq!(stats.hand_history[0].id, "2-2");
    assert_eq!(stats.recent_hands(1).next().map(|r| r.id.as_str()), Some("4-4"));
}

#[test]
fn reset_and_clear() {
    let win = round(&[(Outcome::Win, 10, 20)], (0, 0));
    let stats = StatisticsState::new(0)
        .record_hand(&win, "Standard", 1000, 1)
        .record_double()
        .record_split()
        .record_surrender();
    assert_eq!(stats.all_time.total_doubles_performed, 1);

    let reset = stats.clone().reset_session(50);
    assert_eq!(reset.session.hands_played, 0);
    assert_eq!(reset.session.session_start_time, 50);
    assert_eq!(reset.all_time.total_hands_played, 1);
    assert_eq!(reset.all_time.sessions_played, 1);

    let cleared = stats.clear_all(60);
    assert_eq!(cleared.all_time.total_hands_played, 0);
    assert!(cleared.hand_history.is_empty());
}
