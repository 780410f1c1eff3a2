//! Named table presets.

use alloc::string::String;
use alloc::vec::Vec;

use super::{GameConfig, PayoutRatio};

/// Keys of the built-in presets, in display order.
pub const PRESET_KEYS: [&str; 7] = [
    "standard",
    "vegas-strip",
    "atlantic-city",
    "european",
    "liberal",
    "vegas-downtown",
    "high-roller",
];

/// Returns the preset stored under `key`.
///
/// ```
/// use bjtable::config::presets::preset;
///
/// let downtown = preset("vegas-downtown").unwrap();
/// assert!(downtown.dealer_hits_soft_17);
/// assert!(preset("no-such-table").is_none());
/// ```
#[must_use]
pub fn preset(key: &str) -> Option<GameConfig> {
    let base = GameConfig::default();
    let config = match key {
        "standard" => base,
        "vegas-strip" => base
            .with_name("Vegas Strip")
            .with_bet_limits(10, 1000),
        "atlantic-city" => base
            .with_name("Atlantic City")
            .with_deck_count(8)
            .with_bet_limits(10, 500)
            .with_resplit_aces(true),
        "european" => base
            .with_name("European")
            .with_double_after_split(false)
            .with_max_splits(1)
            .with_surrender(false),
        "liberal" => base
            .with_name("Liberal Rules")
            .with_deck_count(2)
            .with_bet_limits(5, 1000)
            .with_resplit_aces(true)
            .with_max_splits(4),
        "vegas-downtown" => base
            .with_name("Vegas Downtown (6:5)")
            .with_dealer_hits_soft_17(true)
            .with_blackjack_payout(PayoutRatio::SIX_TO_FIVE)
            .with_max_splits(2)
            .with_surrender(false),
        "high-roller" => base
            .with_name("High Roller")
            .with_deck_count(8)
            .with_bet_limits(100, 10_000)
            .with_starting_balance(5000)
            .with_resplit_aces(true),
        _ => return None,
    };
    Some(config)
}

/// Returns every preset paired with its key.
#[must_use]
pub fn presets() -> Vec<(String, GameConfig)> {
    PRESET_KEYS
        .iter()
        .filter_map(|key| preset(key).map(|config| (String::from(*key), config)))
        .collect()
}

/// Returns whether `key` names a built-in preset.
#[must_use]
pub fn is_preset(key: &str) -> bool {
    PRESET_KEYS.contains(&key)
}
