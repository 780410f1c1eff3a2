//! Learning-mode and speed-training tests.
#![expect(clippy::float_cmp, reason = "accuracies here are exact")]

use bjtable::training::{
    DecisionAction, DifficultyLevel, LEVEL_UP_STREAK, LearningModeState, SpeedTrainingGoal,
    SpeedTrainingState,
};
use bjtable::{Card, PlayerAction, Rank, Suit};

fn decide(
    state: &mut SpeedTrainingState,
    action: DecisionAction,
    optimal: PlayerAction,
    at: u64,
    took: u64,
) {
    state.start_timer(at);
    state.record_decision(action, optimal, at + took).unwrap();
}

#[test]
fn learning_mode_logs_mistakes() {
    let mut learning = LearningModeState::default();
    let hand = [Card::new(Suit::Spades, Rank::Ten), Card::new(Suit::Hearts, Rank::Six)];
    let dealer = Card::new(Suit::Clubs, Rank::Ace);

    assert!(learning.record(&hand, dealer, PlayerAction::Surrender, PlayerAction::Surrender, 1));
    assert!(!learning.record(&hand, dealer, PlayerAction::Surrender, PlayerAction::Stand, 2));

    assert_eq!(learning.accuracy(), 50.0);
    assert_eq!(learning.correct_streak, 0);
    let mistake = &learning.mistakes[0];
    assert_eq!(mistake.hand_description, "10♠, 6♥");
    assert_eq!(mistake.dealer_up_card, "A♣");
    assert_eq!(mistake.player_action, PlayerAction::Stand);
    assert_eq!(mistake.timestamp, 2);

    learning.clear();
    assert!(learning.mistakes.is_empty());
    assert_eq!(learning.total_decisions, 0);
}

#[test]
fn correct_decisions_score_by_time_left() {
    let mut training = SpeedTrainingState::default();
    training.start(DifficultyLevel::Advanced, SpeedTrainingGoal::default(), 0);

    training.start_timer(0);
    let decision = training
        .record_decision(DecisionAction::Hit, PlayerAction::Hit, 1_250)
        .unwrap();
    assert!(decision.correct);
    // 100 x 3, plus 37 full tenths of a second left of 5 s.
    assert_eq!(decision.points, 337);

    training.start_timer(2_000);
    let decision = training
        .record_decision(DecisionAction::Stand, PlayerAction::Hit, 2_100)
        .unwrap();
    assert!(!decision.correct);
    assert_eq!(decision.points, 0);
}

#[test]
fn fast_streak_raises_difficulty() {
    let mut training = SpeedTrainingState::default();
    training.start(DifficultyLevel::Beginner, SpeedTrainingGoal::default(), 0);

    for step in 0..u64::from(LEVEL_UP_STREAK) {
        decide(&mut training, DecisionAction::Stand, PlayerAction::Stand, step * 10_000, 1_000);
    }
    let session = training.current_session.as_ref().unwrap();
    assert_eq!(session.difficulty, DifficultyLevel::Intermediate);
    assert_eq!(session.starting_difficulty, DifficultyLevel::Beginner);
    assert_eq!(session.fast_streak, 0);

    // Slow but correct: no streak.
    decide(&mut training, DecisionAction::Hit, PlayerAction::Hit, 100_000, 4_000);
    assert_eq!(training.current_session.as_ref().unwrap().fast_streak, 0);
}

#[test]
fn timeouts_cost_the_full_limit() {
    let mut training = SpeedTrainingState::default();
    training.start(DifficultyLevel::Expert, SpeedTrainingGoal::default(), 0);

    decide(&mut training, DecisionAction::Hit, PlayerAction::Hit, 0, 1_000);
    decide(&mut training, DecisionAction::Timeout, PlayerAction::Stand, 5_000, 9_999);

    let session = training.current_session.as_ref().unwrap();
    assert_eq!(session.decisions[1].time_ms, 3_000);
    assert!(!session.decisions[1].correct);
    assert_eq!(session.fastest_decision, Some(1_000));
    assert_eq!(session.slowest_decision, 3_000);
    assert_eq!(session.average_decision_time, 2_000);
    assert_eq!(session.accuracy(), 50.0);
    assert!(!session.met_goals());
}

#[test]
fn session_completes_at_the_hands_target() {
    let goal = SpeedTrainingGoal {
        hands_target: 2,
        ..SpeedTrainingGoal::default()
    };
    let mut training = SpeedTrainingState::default();
    training.start(DifficultyLevel::Beginner, goal, 0);
    decide(&mut training, DecisionAction::Stand, PlayerAction::Stand, 0, 2_000);

    assert_eq!(training.record_round(3_000), None);
    assert_eq!(training.record_round(6_000), Some(DifficultyLevel::Beginner));
    assert!(!training.is_active());

    let finished = &training.session_history[0];
    assert_eq!(finished.end_time, Some(6_000));
    assert!(finished.met_goals());
}

#[test]
fn stopping_an_empty_session_reports_nothing() {
    let mut training = SpeedTrainingState::default();
    training.start(DifficultyLevel::Advanced, SpeedTrainingGoal::default(), 0);

    assert_eq!(training.stop(10), None);
    assert_eq!(training.session_history.len(), 1);
    assert_eq!(training.stop(20), None);
    assert_eq!(training.session_history.len(), 1);
}
