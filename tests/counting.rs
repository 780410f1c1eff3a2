//! Card counting.

#![expect(clippy::float_cmp, reason = "counts are exact at one decimal")]

use bjtable::counting::{card_count_value, decks_remaining, recommendation, true_count};
use bjtable::{Action, Card, CardCounter, CountingSystem, GameConfig, GameState, Rank, Shoe, Suit};

const fn card(rank: Rank) -> Card {
    Card::new(Suit::Diamonds, rank)
}

#[test]
fn system_values() {
    assert_eq!(card_count_value(card(Rank::Five), CountingSystem::HiLo), 1);
    assert_eq!(card_count_value(card(Rank::Seven), CountingSystem::Ko), 1);
    assert_eq!(card_count_value(card(Rank::Ace), CountingSystem::HiOptI), 0);
    assert_eq!(card_count_value(card(Rank::Four), CountingSystem::HiOptII), 2);
    assert_eq!(card_count_value(card(Rank::Nine), CountingSystem::OmegaII), -1);
    assert_eq!(card_count_value(card(Rank::Seven), CountingSystem::OmegaII), 1);

    for system in CountingSystem::ALL {
        assert!(!system.description().is_empty());
    }
}

#[test]
fn true_count_uses_remaining_decks() {
    assert_eq!(decks_remaining(6, 0), 6.0);
    assert_eq!(decks_remaining(1, 52), 0.5);
    assert_eq!(true_count(6, 3.0), 2.0);
    assert_eq!(true_count(5, 3.0), 1.7);
    assert_eq!(true_count(-5, 3.0), -1.7);
    assert_eq!(recommendation(5.2).bet_multiplier, 8);
    assert_eq!(recommendation(2.0).bet_multiplier, 3);
    assert!(!recommendation(-3.0).should_insure);
}

#[test]
fn switching_systems_recounts_seen_cards() {
    let mut counter = CardCounter::new(1);
    for rank in [Rank::Two, Rank::Four, Rank::Seven, Rank::King] {
        counter.observe(card(rank));
    }
    assert_eq!(counter.running_count(), 1);
    assert_eq!(counter.cards_dealt(), 4);

    counter.set_system(CountingSystem::HiOptII);
    assert_eq!(counter.running_count(), 1);

    counter.set_system(CountingSystem::Ko);
    assert_eq!(counter.running_count(), 2);
}

#[test]
fn reshuffle_after_a_fully_counted_shoe() {
    let mut counter = CardCounter::new(1);
    counter.set_active(true);
    counter.observe(card(Rank::Two));
    assert!(counter.reset_shoe(1));
    assert_eq!(counter.running_count(), 0);
    assert!(counter.is_active());

    let mut late = CardCounter::new(1);
    late.observe(card(Rank::Two));
    late.set_active(true);
    assert!(!late.reset_shoe(1));
}

#[test]
fn hole_card_counts_once_revealed() {
    let shoe = Shoe::from_cards([
        card(Rank::Two),
        card(Rank::Three),
        card(Rank::Ten),
        card(Rank::Four),
        card(Rank::Five),
        card(Rank::Ten),
    ]);
    let state = GameState::new(GameConfig::default(), 5).with_shoe(shoe);
    let state = state.apply(&Action::PlaceBet { amount: 10 }).unwrap();
    let state = state.apply(&Action::DealInitial).unwrap();
    assert_eq!(state.card_counting().cards_dealt(), 3);
    assert_eq!(state.card_counting().running_count(), 1);

    let state = state.apply(&Action::Stand).unwrap();
    let state = state.apply(&Action::DealerPlay).unwrap();
    assert_eq!(
        state.card_counting().cards_dealt() as usize,
        state.player_hands()[0].len() + state.dealer_hand().len()
    );
}

#[test]
fn system_names_match_stored_values() {
    let names: Vec<String> = CountingSystem::ALL
        .iter()
        .map(|system| serde_json::to_string(system).unwrap())
        .collect();
    assert_eq!(
        names,
        [r#""hi-lo""#, r#""ko""#, r#""hi-opt-i""#, r#""hi-opt-ii""#, r#""omega-ii""#]
    );
    let parsed: CountingSystem = serde_json::from_str(r#""omega-ii""#).unwrap();
    assert_eq!(parsed, CountingSystem::OmegaII);
}
