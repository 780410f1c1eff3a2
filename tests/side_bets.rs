//! Perfect Pairs and 21+3.

use bjtable::side_bets::{
    PerfectPairsHand, SideBetKind, TwentyOnePlusThreeHand, evaluate_perfect_pairs,
    evaluate_twenty_one_plus_three, perfect_pairs_hand, twenty_one_plus_three_hand,
};
use bjtable::{Card, Rank, Suit};

const fn c(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

#[test]
fn perfect_pairs_classification() {
    let perfect = [c(Suit::Hearts, Rank::Nine), c(Suit::Hearts, Rank::Nine)];
    let colored = [c(Suit::Hearts, Rank::Nine), c(Suit::Diamonds, Rank::Nine)];
    let mixed = [c(Suit::Hearts, Rank::Nine), c(Suit::Spades, Rank::Nine)];
    let none = [c(Suit::Hearts, Rank::Nine), c(Suit::Hearts, Rank::Ten)];

    assert_eq!(perfect_pairs_hand(&perfect), Some(PerfectPairsHand::Perfect));
    assert_eq!(perfect_pairs_hand(&colored), Some(PerfectPairsHand::Colored));
    assert_eq!(perfect_pairs_hand(&mixed), Some(PerfectPairsHand::Mixed));
    assert_eq!(perfect_pairs_hand(&none), None);
    assert_eq!(perfect_pairs_hand(&perfect[..1]), None);
}

#[test]
fn perfect_pairs_payouts() {
    let mixed = [c(Suit::Clubs, Rank::Jack), c(Suit::Hearts, Rank::Jack)];
    let result = evaluate_perfect_pairs(&mixed, 10);
    assert_eq!(result.kind, SideBetKind::PerfectPairs);
    assert!(result.won);
    assert_eq!(result.winnings, 60);
    assert_eq!(result.payout, 70);
    assert_eq!(result.pair, Some(PerfectPairsHand::Mixed));

    let lost = evaluate_perfect_pairs(&[c(Suit::Clubs, Rank::Jack), c(Suit::Clubs, Rank::Queen)], 10);
    assert!(!lost.won);
    assert_eq!(lost.payout, 0);
    assert_eq!(lost.description, "No pair");
}

#[test]
fn twenty_one_plus_three_classification() {
    let up = c(Suit::Spades, Rank::Seven);
    let hand = |a: Card, b: Card| twenty_one_plus_three_hand(&[a, b], up);

    assert_eq!(
        hand(c(Suit::Spades, Rank::Seven), c(Suit::Spades, Rank::Seven)),
        Some(TwentyOnePlusThreeHand::SuitedTrips)
    );
    assert_eq!(
        hand(c(Suit::Spades, Rank::Eight), c(Suit::Spades, Rank::Nine)),
        Some(TwentyOnePlusThreeHand::StraightFlush)
    );
    assert_eq!(
        hand(c(Suit::Hearts, Rank::Seven), c(Suit::Clubs, Rank::Seven)),
        Some(TwentyOnePlusThreeHand::ThreeOfAKind)
    );
    assert_eq!(
        hand(c(Suit::Hearts, Rank::Five), c(Suit::Clubs, Rank::Six)),
        Some(TwentyOnePlusThreeHand::Straight)
    );
    assert_eq!(
        hand(c(Suit::Spades, Rank::Two), c(Suit::Spades, Rank::King)),
        Some(TwentyOnePlusThreeHand::Flush)
    );
    assert_eq!(hand(c(Suit::Hearts, Rank::Two), c(Suit::Clubs, Rank::King)), None);
}

#[test]
fn ace_plays_high_and_low_in_straights() {
    let low = twenty_one_plus_three_hand(
        &[c(Suit::Hearts, Rank::Ace), c(Suit::Clubs, Rank::Two)],
        c(Suit::Spades, Rank::Three),
    );
    let high = twenty_one_plus_three_hand(
        &[c(Suit::Hearts, Rank::Queen), c(Suit::Clubs, Rank::King)],
        c(Suit::Spades, Rank::Ace),
    );
    let wrap = twenty_one_plus_three_hand(
        &[c(Suit::Hearts, Rank::King), c(Suit::Clubs, Rank::Ace)],
        c(Suit::Spades, Rank::Two),
    );
    assert_eq!(low, Some(TwentyOnePlusThreeHand::Straight));
    assert_eq!(high, Some(TwentyOnePlusThreeHand::Straight));
    assert_eq!(wrap, None);
}

#[test]
fn twenty_one_plus_three_payouts() {
    let result = evaluate_twenty_one_plus_three(
        &[c(Suit::Hearts, Rank::Four), c(Suit::Hearts, Rank::Nine)],
        c(Suit::Hearts, Rank::King),
        5,
    );
    assert!(result.won);
    assert_eq!(result.poker_hand, Some(TwentyOnePlusThreeHand::Flush));
    assert_eq!(result.payout, 30);

    let ineligible = evaluate_twenty_one_plus_three(
        &[c(Suit::Hearts, Rank::Four)],
        c(Suit::Hearts, Rank::King),
        5,
    );
    assert!(!ineligible.won);
    assert_eq!(ineligible.description, "Not eligible");
}
