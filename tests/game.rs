//! Game integration tests.

use bjtable::achievements::AchievementId;
use bjtable::side_bets::SideBetKind;
use bjtable::{
    Action, ActionError, Card, ConfigUpdate, EngineError, GameConfig, GameState, HandStatus,
    Outcome, Phase, PlayerAction, Rank, Shoe, Suit,
};

const fn card(rank: Rank) -> Card {
    Card::new(Suit::Spades, rank)
}

/// A game whose shoe deals `draws` in order: player, dealer up, player,
/// dealer hole, then any further draws.
fn stacked(config: GameConfig, draws: &[Card]) -> GameState {
    GameState::new(config, 1).with_shoe(Shoe::from_cards(draws.iter().copied()))
}

fn play(mut state: GameState, actions: &[Action]) -> GameState {
    for action in actions {
        state = state.apply(action).unwrap();
    }
    state
}

fn bet_and_deal(state: GameState, amount: u64) -> GameState {
    play(state, &[Action::PlaceBet { amount }, Action::DealInitial])
}

#[test]
fn dealer_hits_to_seventeen_and_beats_a_standing_nineteen() {
    let state = stacked(
        GameConfig::default(),
        &[
            card(Rank::Ten),  // player
            card(Rank::Six),  // dealer up
            card(Rank::Nine), // player
            card(Rank::King), // dealer hole
            card(Rank::Four), // dealer draw
        ],
    );

    let state = bet_and_deal(state, 10);
    assert_eq!(state.phase(), Phase::PlayerTurn);
    assert_eq!(state.balance(), 990);
    assert!(!state.dealer_hand().is_hole_revealed());

    let state = play(state, &[Action::Stand]);
    assert_eq!(state.phase(), Phase::DealerTurn);

    let state = play(state, &[Action::DealerPlay]);
    assert_eq!(state.phase(), Phase::GameOver);
    assert_eq!(state.dealer_hand().value(), 20);

    let result = state.result().unwrap();
    assert_eq!(result.outcome, Outcome::Lose);
    assert_eq!(result.net, -10);
    assert_eq!(state.balance(), 990);
    assert_eq!(state.result_message(), "Hand 1: Lose (-$10)\nTotal: -$10");
}

#[test]
fn natural_settles_at_the_deal() {
    let state = stacked(
        GameConfig::default(),
        &[card(Rank::Ace), card(Rank::Seven), card(Rank::King), card(Rank::Nine)],
    );

    let state = bet_and_deal(state, 10);
    assert_eq!(state.phase(), Phase::GameOver);
    assert!(state.dealer_hand().is_hole_revealed());
    assert_eq!(state.dealer_hand().len(), 2);

    let result = state.result().unwrap();
    assert_eq!(result.outcome, Outcome::Blackjack);
    assert_eq!(result.total_payout, 25);
    assert_eq!(state.balance(), 1015);
    assert_eq!(state.player_hands()[0].status(), HandStatus::Stand);
    assert_eq!(state.player_hands()[0].result(), Some(Outcome::Blackjack));

    assert_eq!(state.statistics().session.blackjacks_hit, 1);
    assert_eq!(state.statistics().hand_history.len(), 1);
    assert!(state.achievements().is_unlocked(AchievementId::FirstBlackjack));
    assert!(state.recent_unlocks().contains(&AchievementId::FirstWin));
}

#[test]
fn split_hands_are_played_in_order() {
    let state = stacked(
        GameConfig::default(),
        &[
            card(Rank::Eight),
            card(Rank::Six),
            card(Rank::Eight),
            card(Rank::Ten),
            card(Rank::Three), // first split hand
            card(Rank::Nine),  // second split hand
            card(Rank::Ten),   // double on the first hand
            card(Rank::Seven), // dealer busts
        ],
    );

    let state = bet_and_deal(state, 10);
    let state = play(state, &[Action::Split]);
    assert_eq!(state.player_hands().len(), 2);
    assert_eq!(state.active_hand_index(), 0);
    assert_eq!(state.splits_performed(), 1);
    assert_eq!(state.balance(), 980);

    let state = play(state, &[Action::Double]);
    assert_eq!(state.phase(), Phase::PlayerTurn);
    assert_eq!(state.active_hand_index(), 1);
    assert_eq!(state.player_hands()[0].value(), 21);
    assert_eq!(state.player_hands()[0].status(), HandStatus::Stand);

    let state = play(state, &[Action::Stand]);
    assert_eq!(state.phase(), Phase::DealerTurn);

    let state = play(state, &[Action::DealerPlay]);
    let result = state.result().unwrap();
    assert!(result.dealer_bust);
    assert_eq!(result.hands[0].payout, 40);
    assert_eq!(result.hands[1].payout, 20);
    assert_eq!(result.outcome, Outcome::Win);
    assert_eq!(state.balance(), 1030);
    assert!(state.achievements().is_unlocked(AchievementId::SplitWinBoth));
    assert!(state.achievements().is_unlocked(AchievementId::DoubleDownWin));
    assert!(state.achievements().is_unlocked(AchievementId::Perfect21));
    assert_eq!(state.statistics().session.splits_performed, 1);
    assert_eq!(state.statistics().session.doubles_performed, 1);
}

#[test]
fn insurance_pays_two_to_one_against_dealer_blackjack() {
    let state = stacked(
        GameConfig::default(),
        &[card(Rank::Ten), card(Rank::Ace), card(Rank::Nine), card(Rank::King)],
    );

    let state = bet_and_deal(state, 20);
    assert_eq!(state.phase(), Phase::PlayerTurn);
    assert!(state.is_insurance_offered());

    let state = play(state, &[Action::Insurance]);
    assert_eq!(state.phase(), Phase::GameOver);
    let result = state.result().unwrap();
    assert_eq!(result.insurance_bet, 10);
    assert_eq!(result.insurance_payout, 30);
    assert_eq!(result.hands[0].outcome, Outcome::Lose);
    assert_eq!(result.outcome, Outcome::Push);
    assert_eq!(state.balance(), 1000);
    assert_eq!(
        state.result_message(),
        "Insurance wins +$20\nHand 1: Lose (-$20)\nTotal: Break even"
    );
    assert!(state.achievements().is_unlocked(AchievementId::InsuranceWin));
}

#[test]
fn insured_natural_pushes_against_dealer_blackjack() {
    let state = stacked(
        GameConfig::default(),
        &[card(Rank::Ace), card(Rank::Ace), card(Rank::King), card(Rank::Queen)],
    );

    let state = play(bet_and_deal(state, 20), &[Action::Insurance]);
    let result = state.result().unwrap();
    assert_eq!(result.hands[0].outcome, Outcome::Push);
    assert_eq!(state.balance(), 1020);
    assert_eq!(state.player_hands()[0].status(), HandStatus::Stand);
}

#[test]
fn declined_insurance_continues_the_round() {
    let state = stacked(
        GameConfig::default(),
        &[card(Rank::Ten), card(Rank::Ace), card(Rank::Nine), card(Rank::Seven)],
    );

    let state = play(bet_and_deal(state, 20), &[Action::DeclineInsurance]);
    assert_eq!(state.phase(), Phase::PlayerTurn);
    assert!(!state.is_insurance_offered());
    assert_eq!(state.balance(), 980);
}

#[test]
fn player_action_closes_the_insurance_window() {
    let state = stacked(
        GameConfig::default(),
        &[
            card(Rank::Ten),
            card(Rank::Ace),
            card(Rank::Six),
            card(Rank::King),
            card(Rank::Five),
        ],
    );

    let state = play(bet_and_deal(state, 20), &[Action::Hit]);
    assert_eq!(state.phase(), Phase::GameOver);
    assert_eq!(state.player_hands()[0].len(), 2);
    assert_eq!(state.insurance(), 0);
    assert_eq!(state.balance(), 980);
}

#[test]
fn surrender_returns_half_and_dealer_does_not_draw() {
    let state = stacked(
        GameConfig::default(),
        &[card(Rank::Ten), card(Rank::Nine), card(Rank::Six), card(Rank::Six)],
    );

    let state = play(bet_and_deal(state, 10), &[Action::Surrender]);
    assert_eq!(state.phase(), Phase::DealerTurn);

    let state = play(state, &[Action::DealerPlay]);
    assert_eq!(state.dealer_hand().len(), 2);
    let result = state.result().unwrap();
    assert_eq!(result.outcome, Outcome::Surrender);
    assert_eq!(state.balance(), 995);
    assert_eq!(
        state.result_message(),
        "Hand 1: Surrendered (recovered $5)\nTotal: -$5"
    );
}

#[test]
fn dealer_soft_seventeen_rule() {
    let draws = [
        card(Rank::Ten),
        card(Rank::Six),
        card(Rank::Nine),
        card(Rank::Ace),
        card(Rank::Two),
    ];

    let stands = play(
        bet_and_deal(stacked(GameConfig::default(), &draws), 10),
        &[Action::Stand, Action::DealerPlay],
    );
    assert_eq!(stands.dealer_hand().value(), 17);
    assert_eq!(stands.result().unwrap().outcome, Outcome::Win);

    let config = GameConfig::default().with_dealer_hits_soft_17(true);
    let hits = play(
        bet_and_deal(stacked(config, &draws), 10),
        &[Action::Stand, Action::DealerPlay],
    );
    assert_eq!(hits.dealer_hand().value(), 19);
    assert_eq!(hits.result().unwrap().outcome, Outcome::Push);
}

#[test]
fn split_aces_stand_and_split_twenty_one_pays_as_a_natural() {
    let state = stacked(
        GameConfig::default(),
        &[
            card(Rank::Ace),
            card(Rank::Six),
            card(Rank::Ace),
            card(Rank::Ten),
            card(Rank::King),
            card(Rank::Two),
            card(Rank::Five),
        ],
    );

    let state = play(bet_and_deal(state, 10), &[Action::Split]);
    assert_eq!(state.phase(), Phase::DealerTurn);

    let state = play(state, &[Action::DealerPlay]);
    let result = state.result().unwrap();
    assert_eq!(result.dealer_value, 21);
    assert_eq!(result.hands[0].outcome, Outcome::Blackjack);
    assert_eq!(result.hands[0].payout, 25);
    assert_eq!(result.hands[1].outcome, Outcome::Lose);
    assert_eq!(state.balance(), 1005);
    assert!(state.player_hands().iter().all(|hand| !hand.is_active()));
}

#[test]
fn resplittable_ace_only_splits_or_stands() {
    let config = GameConfig::default().with_resplit_aces(true);
    let state = stacked(
        config,
        &[
            card(Rank::Ace),
            card(Rank::Six),
            card(Rank::Ace),
            card(Rank::Ten),
            card(Rank::Ace),
            card(Rank::Five),
        ],
    );

    let mut state = play(bet_and_deal(state, 10), &[Action::Split]);
    assert_eq!(state.phase(), Phase::PlayerTurn);
    assert!(state.active_hand().unwrap().is_pair());
    assert_eq!(state.perform(&Action::Hit), Err(ActionError::SplitAcesLocked));
    assert_eq!(state.perform(&Action::Double), Err(ActionError::SplitAcesLocked));
    assert!(state.availability().can_split);
}

#[test]
fn one_split_hand_limit_allows_a_single_split() {
    let config = GameConfig::default().with_max_splits(1);
    let state = stacked(
        config,
        &[
            card(Rank::Eight),
            card(Rank::Six),
            card(Rank::Eight),
            card(Rank::Ten),
            card(Rank::Eight),
            card(Rank::Three),
        ],
    );

    let mut state = play(bet_and_deal(state, 10), &[Action::Split]);
    assert!(state.active_hand().unwrap().is_pair());
    assert_eq!(state.perform(&Action::Split), Err(ActionError::MaxSplitsReached));
}

fn split_hands(state: &GameState) -> usize {
    state
        .player_hands()
        .iter()
        .filter(|hand| hand.is_from_split())
        .count()
}

#[test]
fn split_limit_counts_split_hands() {
    let state = stacked(
        GameConfig::default(),
        &[
            card(Rank::Eight),
            card(Rank::Six),
            card(Rank::Eight),
            card(Rank::Ten),
            card(Rank::Eight),
            card(Rank::Three),
            card(Rank::Eight),
            card(Rank::Two),
        ],
    );

    let state = play(bet_and_deal(state, 10), &[Action::Split]);
    assert_eq!(split_hands(&state), 2);
    let mut state = play(state, &[Action::Split]);
    assert_eq!(split_hands(&state), 3);
    assert!(state.active_hand().unwrap().is_pair());
    assert!(!state.availability().can_split);
    assert_eq!(state.perform(&Action::Split), Err(ActionError::MaxSplitsReached));

    assert_eq!(state.player_hands().len(), 3);
    assert!(split_hands(&state) <= usize::from(state.config().max_splits));
    assert_eq!(state.balance(), 1000 - 30);
}

#[test]
fn resplit_aces_stop_at_the_split_hand_limit() {
    let config = GameConfig::default().with_resplit_aces(true);
    let state = stacked(
        config,
        &[
            card(Rank::Ace),
            card(Rank::Six),
            card(Rank::Ace),
            card(Rank::Ten),
            card(Rank::Ace),
            card(Rank::Five),
            card(Rank::Ace),
            card(Rank::Nine),
        ],
    );

    let state = play(bet_and_deal(state, 10), &[Action::Split]);
    assert_eq!(state.phase(), Phase::PlayerTurn);
    assert!(state.availability().can_split);

    let state = play(state, &[Action::Split]);
    assert_eq!(split_hands(&state), 3);
    assert!(state.player_hands().iter().all(|hand| hand.status() == HandStatus::Stand));
    assert_eq!(state.phase(), Phase::DealerTurn);
}

#[test]
fn rule_reloads_reshuffle_a_low_shoe() {
    let config = GameConfig::default().with_deck_count(1);
    let mut state = GameState::new(config.clone(), 11);
    for _ in 0..30 {
        state = play(state, &[Action::PlaceBet { amount: 10 }, Action::DealInitial]);
        if state.is_insurance_offered() {
            state = play(state, &[Action::DeclineInsurance]);
        }
        while state.phase() == Phase::PlayerTurn {
            state = play(state, &[Action::Stand]);
        }
        if state.phase() == Phase::DealerTurn {
            state = play(state, &[Action::DealerPlay]);
        }
        state = play(
            state,
            &[Action::LoadConfig {
                config: config.clone(),
            }],
        );
        assert_eq!(state.phase(), Phase::Betting);
        assert!(!state.shoe().needs_reshuffle());
    }
}

#[test]
fn double_rules() {
    let config = GameConfig::default().with_double_after_split(false);
    let state = stacked(
        config,
        &[
            card(Rank::Eight),
            card(Rank::Six),
            card(Rank::Eight),
            card(Rank::Ten),
            card(Rank::Two),
            card(Rank::Three),
        ],
    );
    let mut state = play(bet_and_deal(state, 10), &[Action::Split]);
    assert_eq!(
        state.perform(&Action::Double),
        Err(ActionError::DoubleAfterSplitDisabled)
    );

    let state = stacked(
        GameConfig::default(),
        &[
            card(Rank::Five),
            card(Rank::Six),
            card(Rank::Four),
            card(Rank::Ten),
            card(Rank::Two),
        ],
    );
    let mut state = play(bet_and_deal(state, 10), &[Action::Hit]);
    assert_eq!(state.perform(&Action::Double), Err(ActionError::CannotDouble));
    assert_eq!(state.perform(&Action::Surrender), Err(ActionError::CannotSurrender));
}

#[test]
fn rejected_actions_leave_state_untouched() {
    let state = GameState::new(GameConfig::default(), 9);

    let same = state.clone().apply(&Action::Hit).unwrap();
    assert_eq!(same.phase(), Phase::Betting);
    assert_eq!(same.balance(), state.balance());
    assert_eq!(same.cards_remaining(), state.cards_remaining());

    let mut state = state;
    assert_eq!(state.perform(&Action::Hit), Err(ActionError::InvalidPhase));
    assert_eq!(
        state.perform(&Action::PlaceBet { amount: 1 }),
        Err(ActionError::BetOutOfRange { min: 5, max: 500 })
    );

    let mut poor = GameState::new(GameConfig::default(), 9).with_balance(20);
    assert_eq!(
        poor.perform(&Action::PlaceBet { amount: 30 }),
        Err(ActionError::InsufficientFunds)
    );
    assert_eq!(poor.balance(), 20);
}

#[test]
fn empty_shoe_is_an_engine_error() {
    let state = stacked(
        GameConfig::default(),
        &[card(Rank::Five), card(Rank::Nine), card(Rank::Six), card(Rank::Seven)],
    );
    let state = bet_and_deal(state, 10);

    assert_eq!(state.apply(&Action::Hit).unwrap_err(), EngineError::EmptyShoe);
}

#[test]
fn config_changes_only_between_rounds() {
    let state = stacked(
        GameConfig::default(),
        &[
            card(Rank::Ten),
            card(Rank::Six),
            card(Rank::Nine),
            card(Rank::Seven),
            card(Rank::Ten),
        ],
    );
    let mut state = bet_and_deal(state, 10);

    let update = ConfigUpdate {
        deck_count: Some(2),
        ..ConfigUpdate::default()
    };
    assert_eq!(
        state.perform(&Action::UpdateConfig { config: update.clone() }),
        Err(ActionError::ConfigLocked)
    );

    let state = play(state, &[Action::Stand, Action::DealerPlay, Action::NewGame]);
    assert_eq!(state.phase(), Phase::Betting);
    assert!(state.player_hands().is_empty());

    let state = play(state, &[Action::UpdateConfig { config: update }]);
    assert_eq!(state.config().deck_count, 2);
    assert_eq!(state.cards_remaining(), 104);
    assert_eq!(state.card_counting().cards_dealt(), 0);
}

#[test]
fn new_game_is_refused_mid_round() {
    let state = stacked(
        GameConfig::default(),
        &[card(Rank::Ten), card(Rank::Six), card(Rank::Nine), card(Rank::Seven)],
    );
    let mut state = bet_and_deal(state, 10);
    assert_eq!(state.perform(&Action::NewGame), Err(ActionError::InvalidPhase));
}

#[test]
fn reset_balance_abandons_the_round() {
    let state = stacked(
        GameConfig::default(),
        &[card(Rank::Ten), card(Rank::Six), card(Rank::Nine), card(Rank::Seven)],
    );
    let state = play(bet_and_deal(state, 100), &[Action::ResetBalance]);
    assert_eq!(state.phase(), Phase::Betting);
    assert_eq!(state.balance(), 1000);
    assert_eq!(state.cards_remaining(), 312);
}

#[test]
fn learning_mode_grades_decisions() {
    let state = stacked(
        GameConfig::default(),
        &[
            card(Rank::Ten),
            card(Rank::Six),
            card(Rank::Six),
            card(Rank::Seven),
            card(Rank::Two),
        ],
    );
    let state = play(state, &[Action::ToggleLearningMode]);
    let state = bet_and_deal(state, 10);

    let hint = state.learning_mode().current_strategy.clone().unwrap();
    assert_eq!(hint.primary_action, PlayerAction::Stand);

    let state = play(state, &[Action::Hit]);
    let learning = state.learning_mode();
    assert_eq!(learning.total_decisions, 1);
    assert_eq!(learning.correct_decisions, 0);
    assert_eq!(learning.mistakes.len(), 1);
    assert_eq!(learning.mistakes[0].optimal_action, PlayerAction::Stand);
    assert_eq!(learning.mistakes[0].player_action, PlayerAction::Hit);

    let state = play(state, &[Action::ClearMistakes]);
    assert!(state.learning_mode().mistakes.is_empty());
}

#[test]
fn speed_training_times_decisions() {
    let state = stacked(
        GameConfig::default(),
        &[
            card(Rank::Ten),
            card(Rank::Six),
            card(Rank::Six),
            card(Rank::Seven),
            card(Rank::Ten),
        ],
    );
    let state = play(
        state.at(1_000),
        &[Action::StartSpeedTraining {
            difficulty: bjtable::DifficultyLevel::Beginner,
            goal: bjtable::SpeedTrainingGoal::default(),
        }],
    );
    let state = bet_and_deal(state, 10);
    let state = play(state.at(2_500), &[Action::Stand]);

    let session = state.speed_training().current_session.as_ref().unwrap();
    assert_eq!(session.total_decisions, 1);
    assert_eq!(session.decisions[0].time_ms, 1_500);
    assert!(session.decisions[0].correct);

    let state = play(state, &[Action::DealerPlay, Action::StopSpeedTraining]);
    assert!(!state.speed_training().is_active());
    assert_eq!(state.speed_training().session_history.len(), 1);
    assert!(state.achievements().is_unlocked(AchievementId::SpeedTrainingComplete));
}

#[test]
fn perfect_pair_side_bet_pays_at_the_deal() {
    let config = GameConfig::default().with_side_bets(true, false);
    let state = stacked(
        config,
        &[
            Card::new(Suit::Hearts, Rank::Eight),
            card(Rank::Six),
            Card::new(Suit::Hearts, Rank::Eight),
            card(Rank::Ten),
        ],
    );

    let mut refused = state.clone();
    assert_eq!(
        refused.perform(&Action::SetSideBet {
            kind: SideBetKind::TwentyOnePlusThree,
            amount: 5,
        }),
        Err(ActionError::SideBetDisabled)
    );

    let state = play(
        state,
        &[Action::SetSideBet {
            kind: SideBetKind::PerfectPairs,
            amount: 5,
        }],
    );
    let state = bet_and_deal(state, 10);
    let results = state.side_bet_results();
    assert_eq!(results.len(), 1);
    assert!(results[0].won);
    assert_eq!(results[0].payout, 130);
    assert_eq!(state.balance(), 1000 - 15 + 130);
    assert!(state.achievements().is_unlocked(AchievementId::PerfectPairsWin));
}

#[test]
fn side_bet_and_statistics_actions() {
    let config = GameConfig::default().with_side_bets(true, true);
    let state = stacked(
        config,
        &[
            card(Rank::Six),
            card(Rank::Six),
            card(Rank::Five),
            card(Rank::Ten),
            card(Rank::Ten),
            card(Rank::Ten),
        ],
    );
    let state = play(
        state,
        &[
            Action::SetSideBet {
                kind: SideBetKind::PerfectPairs,
                amount: 5,
            },
            Action::SetSideBet {
                kind: SideBetKind::TwentyOnePlusThree,
                amount: 10,
            },
        ],
    );
    assert_eq!(state.side_bets().total(), 15);
    let state = play(state, &[Action::ClearSideBets]);
    assert_eq!(state.side_bets().total(), 0);

    let state = bet_and_deal(state, 10);
    assert!(state.side_bet_results().is_empty());
    let state = play(state, &[Action::Double, Action::DealerPlay]);
    assert_eq!(state.balance(), 1020);
    assert_eq!(state.statistics().session.doubles_performed, 1);

    let state = play(state, &[Action::ResetSessionStatistics]);
    let stats = state.statistics();
    assert_eq!(stats.session.hands_played, 0);
    assert_eq!(stats.session.doubles_performed, 0);
    assert_eq!(stats.all_time.total_hands_played, 1);
    assert_eq!(stats.all_time.total_doubles_performed, 1);
    assert_eq!(stats.all_time.sessions_played, 1);

    let state = play(state, &[Action::ClearStatistics]);
    assert_eq!(state.statistics().all_time.total_hands_played, 0);
}
