//! Saved custom configurations.
//!
//! Custom tables live in the key-value store under
//! [`STORAGE_KEY_SAVED_CONFIGS`] as a JSON object keyed by name. Presets are
//! read-only and never written there.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;

use serde_json::Value;
use tracing::warn;

use super::GameConfig;
use super::presets::{self, presets};
use crate::error::DataError;
use crate::storage::{KeyValueStore, STORAGE_KEY_ACTIVE_CONFIG, STORAGE_KEY_SAVED_CONFIGS};

const REQUIRED_FIELDS: [&str; 12] = [
    "name",
    "deckCount",
    "dealerHitsSoft17",
    "blackjackPayout",
    "minBet",
    "maxBet",
    "startingBalance",
    "doubleAfterSplit",
    "resplitAcesAllowed",
    "maxSplits",
    "surrenderAllowed",
    "insuranceAllowed",
];

/// Returns the saved custom configurations.
///
/// A corrupt entry is logged and treated as empty.
#[must_use]
pub fn saved_configurations<S: KeyValueStore + ?Sized>(store: &S) -> BTreeMap<String, GameConfig> {
    let Some(raw) = store.get(STORAGE_KEY_SAVED_CONFIGS) else {
        return BTreeMap::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!(key = STORAGE_KEY_SAVED_CONFIGS, error = %err, "discarding corrupt saved configurations");
        BTreeMap::new()
    })
}

fn write_saved<S: KeyValueStore + ?Sized>(store: &S, saved: &BTreeMap<String, GameConfig>) {
    match serde_json::to_string(saved) {
        Ok(json) => store.set(STORAGE_KEY_SAVED_CONFIGS, &json),
        Err(err) => warn!(error = %err, "failed to serialize saved configurations"),
    }
}

/// Saves `config` under `name`, renaming the configuration to match.
pub fn save_configuration<S: KeyValueStore + ?Sized>(store: &S, name: &str, config: &GameConfig) {
    let mut saved = saved_configurations(store);
    saved.insert(String::from(name), config.clone().with_name(name));
    write_saved(store, &saved);
}

/// Deletes the custom configuration saved under `name`.
pub fn delete_configuration<S: KeyValueStore + ?Sized>(store: &S, name: &str) {
    let mut saved = saved_configurations(store);
    if saved.remove(name).is_some() {
        write_saved(store, &saved);
    }
}

/// Returns presets and saved configurations. A saved entry shadows a preset
/// with the same key.
#[must_use]
pub fn all_configurations<S: KeyValueStore + ?Sized>(store: &S) -> BTreeMap<String, GameConfig> {
    let mut all: BTreeMap<String, GameConfig> = presets().into_iter().collect();
    all.extend(saved_configurations(store));
    all
}

/// Loads a preset or saved configuration by key.
#[must_use]
pub fn load_configuration<S: KeyValueStore + ?Sized>(store: &S, name: &str) -> Option<GameConfig> {
    saved_configurations(store)
        .remove(name)
        .or_else(|| presets::preset(name))
}

/// Records the name of the configuration in use.
pub fn set_active_config_name<S: KeyValueStore + ?Sized>(store: &S, name: &str) {
    store.set(STORAGE_KEY_ACTIVE_CONFIG, name);
}

/// Returns the name of the configuration in use, if one was recorded.
#[must_use]
pub fn active_config_name<S: KeyValueStore + ?Sized>(store: &S) -> Option<String> {
    store.get(STORAGE_KEY_ACTIVE_CONFIG)
}

/// Parses and validates a configuration exported as JSON.
///
/// # Errors
///
/// Returns [`DataError::MissingField`] naming the first absent required
/// field, [`DataError::InvalidField`] for a field of the wrong type, and
/// [`DataError::Config`] when the values are out of range.
pub fn import_configuration(json: &str) -> Result<GameConfig, DataError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(fields) = &value else {
        return Err(DataError::InvalidField("configuration"));
    };

    if let Some(missing) = REQUIRED_FIELDS.iter().find(|field| !fields.contains_key(**field)) {
        return Err(DataError::MissingField(*missing));
    }

    if !fields["name"].is_string() {
        return Err(DataError::InvalidField("name"));
    }
    if !fields["deckCount"].is_u64() {
        return Err(DataError::InvalidField("deckCount"));
    }
    if !fields["dealerHitsSoft17"].is_boolean() {
        return Err(DataError::InvalidField("dealerHitsSoft17"));
    }
    if !fields["blackjackPayout"]
        .as_array()
        .is_some_and(|terms| terms.len() == 2)
    {
        return Err(DataError::InvalidField("blackjackPayout"));
    }

    let config: GameConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}

/// Returns `base`, or `base (1)`, `base (2)`, ... whichever is not taken.
#[must_use]
pub fn generate_unique_name<S: KeyValueStore + ?Sized>(store: &S, base: &str) -> String {
    let all = all_configurations(store);
    let mut name = String::from(base);
    let mut counter = 1_u32;
    while all.contains_key(&name) {
        name = format!("{base} ({counter})");
        counter += 1;
    }
    name
}

/// Returns whether `name` is a read-only preset key.
#[must_use]
pub fn is_preset_config(name: &str) -> bool {
    presets::is_preset(name)
}

/// Copies `config` under `new_name`, or under a fresh `"<name> Copy"` name.
#[must_use]
pub fn duplicate_configuration<S: KeyValueStore + ?Sized>(
    store: &S,
    config: &GameConfig,
    new_name: Option<&str>,
) -> GameConfig {
    let name = new_name.map_or_else(
        || generate_unique_name(store, &format!("{} Copy", config.name)),
        String::from,
    );
    config.clone().with_name(name)
}
