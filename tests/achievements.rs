//! Achievement catalog and unlock rules.

use bjtable::achievements::{AchievementProgress, CATALOG, Category, Rarity};
use bjtable::side_bets::TwentyOnePlusThreeHand;
use bjtable::{AchievementBook, AchievementEvent, AchievementId, DifficultyLevel, check_achievements};

fn unlock(book: &AchievementBook, event: AchievementEvent) -> (AchievementBook, Vec<AchievementId>) {
    let check = check_achievements(book, AchievementProgress::default(), &event, 42);
    (check.achievements, check.newly_unlocked)
}

#[test]
fn catalog_is_indexed_by_id() {
    for (index, def) in CATALOG.iter().enumerate() {
        assert_eq!(def.id as usize, index);
        assert_eq!(def.id.definition().name, def.name);
    }
    assert_eq!(AchievementId::SuitedTrips.definition().rarity, Rarity::Epic);
}

#[test]
fn unlocking_is_idempotent() {
    let (book, new) = unlock(&AchievementBook::new(), AchievementEvent::HandWon);
    assert_eq!(new, vec![AchievementId::FirstWin]);
    assert_eq!(book.unlocked_at(AchievementId::FirstWin), Some(42));

    let check = check_achievements(&book, AchievementProgress::default(), &AchievementEvent::HandWon, 99);
    assert!(check.newly_unlocked.is_empty());
    assert_eq!(check.achievements.unlocked_at(AchievementId::FirstWin), Some(42));
}

#[test]
fn thresholds() {
    let book = AchievementBook::new();

    let (_, new) = unlock(&book, AchievementEvent::WinStreak { streak: 4 });
    assert!(new.is_empty());
    let (_, new) = unlock(&book, AchievementEvent::WinStreak { streak: 10 });
    assert_eq!(new, vec![AchievementId::WinStreak5, AchievementId::WinStreak10]);

    let (_, new) = unlock(&book, AchievementEvent::SessionProfit { profit: 750 });
    assert_eq!(new, vec![AchievementId::Profit100, AchievementId::Profit500]);

    let (_, new) = unlock(&book, AchievementEvent::StrategyAccuracy { accuracy: 95.0, hands: 49 });
    assert!(new.is_empty());
    let (_, new) = unlock(&book, AchievementEvent::StrategyAccuracy { accuracy: 90.0, hands: 50 });
    assert_eq!(new, vec![AchievementId::StrategyAccuracy90]);

    let (_, new) = unlock(&book, AchievementEvent::BasicStrategyStreak { correct: 20 });
    assert_eq!(new, vec![AchievementId::BasicStrategyPerfect]);

    let (_, new) = unlock(
        &book,
        AchievementEvent::SpeedTrainingComplete {
            difficulty: DifficultyLevel::Expert,
        },
    );
    assert_eq!(new, vec![AchievementId::SpeedTrainingComplete, AchievementId::SpeedExpert]);

    let (_, new) = unlock(
        &book,
        AchievementEvent::TwentyOnePlusThreeWon {
            hand: TwentyOnePlusThreeHand::Flush,
        },
    );
    assert_eq!(new, vec![AchievementId::TwentyOnePlus3Win]);
}

#[test]
fn lifetime_progress_gates_counters() {
    let progress = AchievementProgress {
        total_wins: 100,
        total_hands_played: 1000,
    };
    let book = AchievementBook::new();

    let won = check_achievements(&book, progress, &AchievementEvent::HandWon, 1);
    assert_eq!(won.newly_unlocked, vec![AchievementId::FirstWin, AchievementId::Win100Hands]);

    let played = check_achievements(&book, progress, &AchievementEvent::HandsPlayed, 1);
    assert_eq!(played.newly_unlocked, vec![AchievementId::Play1000Hands]);
}

#[test]
fn stats_by_group() {
    let (book, _) = unlock(&AchievementBook::new(), AchievementEvent::HandWon);
    let (book, _) = unlock(&book, AchievementEvent::Blackjack);

    let stats = book.stats();
    assert_eq!(stats.total, 26);
    assert_eq!(stats.unlocked, 2);
    assert_eq!(stats.percentage, 8);
    assert_eq!(stats.by_category[&Category::Gameplay].total, 9);
    assert_eq!(stats.by_category[&Category::Gameplay].unlocked, 2);
    assert_eq!(stats.by_rarity[&Rarity::Legendary].total, 1);
    assert_eq!(stats.by_rarity[&Rarity::Common].unlocked, 2);
}

#[test]
fn stored_book_format() {
    let json = r#"{"first_win":{"unlocked":true,"unlockedAt":5},"comeback":{"unlocked":false}}"#;
    let book: AchievementBook = serde_json::from_str(json).expect("valid book");
    assert!(book.is_unlocked(AchievementId::FirstWin));
    assert!(!book.is_unlocked(AchievementId::Comeback));
    assert_eq!(book.len(), 1);

    let (book, new) = unlock(&book, AchievementEvent::Comeback);
    assert_eq!(new, vec![AchievementId::Comeback]);
    let json = serde_json::to_string(&book).expect("serializable");
    assert!(json.contains(r#""comeback":{"unlocked":true,"unlockedAt":42}"#));
}

#[test]
fn ids_with_numbers_keep_their_separators() {
    let ids = [
        (AchievementId::WinStreak5, "win_streak_5"),
        (AchievementId::Win100Hands, "win_100_hands"),
        (AchievementId::Perfect21, "perfect_21"),
        (AchievementId::StrategyAccuracy90, "strategy_accuracy_90"),
        (AchievementId::Profit5000, "profit_5000"),
        (AchievementId::Play10000Hands, "play_10000_hands"),
        (AchievementId::TwentyOnePlus3Win, "twenty_one_plus_3_win"),
    ];
    for (id, name) in ids {
        assert_eq!(serde_json::to_value(id).unwrap(), name);
    }
}
