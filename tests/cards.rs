//! Card arithmetic, payouts and round accounting.

use bjtable::hand::{is_blackjack, is_bust};
use bjtable::{
    Action, Card, DECK_SIZE, GameConfig, GameState, Outcome, PayoutRatio, Phase, PlayerAction,
    Rank, RoundingMode, Shoe, Suit, calculate_payout, dealer_should_hit, determine_outcome,
    hand_value,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn arb_card() -> impl Strategy<Value = Card> {
    (0..4usize, 0..13usize).prop_map(|(suit, rank)| Card::new(Suit::ALL[suit], Rank::ALL[rank]))
}

fn arb_rounding() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![
        Just(RoundingMode::Up),
        Just(RoundingMode::Down),
        Just(RoundingMode::Nearest),
    ]
}

const fn card(rank: Rank) -> Card {
    Card::new(Suit::Clubs, rank)
}

#[test]
fn aces_are_demoted_one_at_a_time() {
    let soft = hand_value(&[card(Rank::Ace), card(Rank::Six)]);
    assert_eq!((soft.value, soft.is_soft), (17, true));

    let hard = hand_value(&[card(Rank::Ace), card(Rank::Six), card(Rank::Ten)]);
    assert_eq!((hard.value, hard.is_soft), (17, false));

    let pair = hand_value(&[card(Rank::Ace), card(Rank::Ace)]);
    assert_eq!((pair.value, pair.is_soft), (12, true));

    let bust = hand_value(&[card(Rank::King), card(Rank::Queen), card(Rank::Two)]);
    assert_eq!(bust.value, 22);
}

#[test]
fn dealer_draw_rule() {
    let soft_17 = [card(Rank::Ace), card(Rank::Six)];
    let hard_17 = [card(Rank::Ten), card(Rank::Seven)];
    assert!(!dealer_should_hit(&soft_17, false));
    assert!(dealer_should_hit(&soft_17, true));
    assert!(!dealer_should_hit(&hard_17, true));
    assert!(dealer_should_hit(&[card(Rank::Ten), card(Rank::Six)], false));
}

#[test]
fn outcomes() {
    let natural = [card(Rank::Ace), card(Rank::King)];
    let twenty = [card(Rank::King), card(Rank::Queen)];
    let three_card_21 = [card(Rank::Seven), card(Rank::Seven), card(Rank::Seven)];
    let bust = [card(Rank::King), card(Rank::Queen), card(Rank::Five)];

    assert_eq!(determine_outcome(&natural, &twenty), Outcome::Blackjack);
    assert_eq!(determine_outcome(&natural, &natural), Outcome::Push);
    assert_eq!(determine_outcome(&three_card_21, &natural), Outcome::Lose);
    assert_eq!(determine_outcome(&bust, &bust), Outcome::Lose);
    assert_eq!(determine_outcome(&twenty, &bust), Outcome::Win);
    assert_eq!(determine_outcome(&twenty, &twenty), Outcome::Push);
}

#[test]
fn six_to_five_rounding() {
    let ratio = PayoutRatio::SIX_TO_FIVE;
    assert_eq!(calculate_payout(7, Outcome::Blackjack, ratio, RoundingMode::Down), 15);
    assert_eq!(calculate_payout(7, Outcome::Blackjack, ratio, RoundingMode::Up), 16);
    assert_eq!(calculate_payout(7, Outcome::Blackjack, ratio, RoundingMode::Nearest), 15);
    assert_eq!(calculate_payout(8, Outcome::Blackjack, ratio, RoundingMode::Nearest), 18);
}

#[test]
fn shoe_holds_every_card_once_per_deck() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let shoe = Shoe::new(2, &mut rng);
    assert_eq!(shoe.len(), 104);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            let copies = shoe.cards().filter(|c| **c == Card::new(suit, rank)).count();
            assert_eq!(copies, 2);
        }
    }
}

/// Plays one round with the strategy advice, or stands when there is none.
fn play_round(mut state: GameState, bet: u64) -> GameState {
    state = state.apply(&Action::PlaceBet { amount: bet }).unwrap();
    state = state.apply(&Action::DealInitial).unwrap();
    if state.is_insurance_offered() {
        state = state.apply(&Action::DeclineInsurance).unwrap();
    }
    while state.phase() == Phase::PlayerTurn {
        let action = match state.advice().map(|advice| advice.primary_action) {
            Some(PlayerAction::Hit) => Action::Hit,
            Some(PlayerAction::Double) => Action::Double,
            Some(PlayerAction::Split) => Action::Split,
            Some(PlayerAction::Surrender) => Action::Surrender,
            Some(PlayerAction::Stand) | None => Action::Stand,
        };
        state = state.apply(&action).unwrap();
    }
    if state.phase() == Phase::DealerTurn {
        state = state.apply(&Action::DealerPlay).unwrap();
    }
    state
}

proptest! {
    #[test]
    fn hand_value_never_exceeds_21_while_an_ace_is_soft(cards in prop::collection::vec(arb_card(), 0..8)) {
        let value = hand_value(&cards);
        if value.is_soft {
            prop_assert!(value.value <= 21);
            prop_assert!(cards.iter().any(|c| c.is_ace()));
        }
        let hard: u32 = cards.iter().map(|c| if c.is_ace() { 1 } else { u32::from(c.value()) }).sum();
        prop_assert!(u32::from(value.value) >= hard.min(u32::from(u8::MAX)));
    }

    #[test]
    fn naturals_never_bust(cards in prop::collection::vec(arb_card(), 2..6)) {
        prop_assert!(!(is_blackjack(&cards) && is_bust(&cards)));
    }

    #[test]
    fn outcomes_mirror_when_nobody_busts(
        left in prop::collection::vec(arb_card(), 2..5),
        right in prop::collection::vec(arb_card(), 2..5),
    ) {
        prop_assume!(!is_bust(&left) && !is_bust(&right));
        let forward = determine_outcome(&left, &right);
        let backward = determine_outcome(&right, &left);
        match forward {
            Outcome::Win | Outcome::Blackjack => prop_assert_eq!(backward, Outcome::Lose),
            Outcome::Lose => prop_assert!(backward.is_win()),
            Outcome::Push => prop_assert_eq!(backward, Outcome::Push),
            Outcome::Surrender => prop_assert!(false, "no surrender without a decision"),
        }
    }

    #[test]
    fn seeded_shoes_are_complete_and_reproducible(seed in any::<u64>(), decks in 1u8..=8) {
        let shoe = Shoe::new(decks, &mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert_eq!(shoe.len(), usize::from(decks) * DECK_SIZE);
        let mut tally = [0usize; 13];
        for card in shoe.cards() {
            tally[card.rank.index()] += 1;
        }
        prop_assert!(tally.iter().all(|count| *count == usize::from(decks) * 4));
        prop_assert_eq!(shoe, Shoe::new(decks, &mut ChaCha8Rng::seed_from_u64(seed)));
    }

    #[test]
    fn payouts_are_ordered(bet in 1u64..10_000, rounding in arb_rounding()) {
        let ratio = PayoutRatio::THREE_TO_TWO;
        let blackjack = calculate_payout(bet, Outcome::Blackjack, ratio, rounding);
        let win = calculate_payout(bet, Outcome::Win, ratio, rounding);
        let push = calculate_payout(bet, Outcome::Push, ratio, rounding);
        prop_assert!(blackjack >= win);
        prop_assert_eq!(win, bet * 2);
        prop_assert_eq!(push, bet);
        prop_assert_eq!(calculate_payout(bet, Outcome::Lose, ratio, rounding), 0);
    }

    #[test]
    fn settlement_accounts_for_every_stake(seed in any::<u64>(), bet in 5u64..=100) {
        let mut state = GameState::new(GameConfig::default(), seed);
        for _ in 0..5 {
            let before = state.balance();
            state = play_round(state, bet);
            prop_assert_eq!(state.phase(), Phase::GameOver);
            let result = state.result().unwrap();
            prop_assert_eq!(state.balance() + result.total_bet, before + result.total_payout);
            prop_assert!(state.player_hands().iter().all(|hand| !hand.is_active()));
            state = state.apply(&Action::NewGame).unwrap();
            if state.balance() < 100 {
                break;
            }
        }
    }
}
