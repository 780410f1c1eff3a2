//! Key-value persistence boundary.
//!
//! The engine core never touches storage. [`Table`](crate::Table) and
//! [`GameState::restore`](crate::GameState::restore) take a store explicitly
//! and read or write JSON values under the keys below.

use alloc::string::String;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
#[cfg(feature = "std")]
use std::collections::HashMap;
use tracing::warn;

use crate::sync::Locked;

/// Current balance.
pub const STORAGE_KEY_BALANCE: &str = "blackjack_balance";
/// Player settings.
pub const STORAGE_KEY_SETTINGS: &str = "blackjack_settings";
/// Table rules merged over the base configuration on start.
pub const STORAGE_KEY_TABLE_RULES: &str = "blackjack_table_rules";
/// Saved custom configurations.
pub const STORAGE_KEY_SAVED_CONFIGS: &str = "blackjack_saved_configs";
/// Name of the configuration in use.
pub const STORAGE_KEY_ACTIVE_CONFIG: &str = "blackjack_active_config";
/// All-time statistics.
pub const STORAGE_KEY_STATISTICS: &str = "blackjack_statistics";
/// Recent hand records.
pub const STORAGE_KEY_HAND_HISTORY: &str = "blackjack_hand_history";
/// Balance snapshots.
pub const STORAGE_KEY_BANKROLL_HISTORY: &str = "blackjack_bankroll_history";
/// Achievement progress.
pub const STORAGE_KEY_ACHIEVEMENTS: &str = "blackjack_achievements";
/// Colour scheme.
pub const STORAGE_KEY_THEME: &str = "blackjack_theme";

/// Synchronous string key-value storage, such as browser `localStorage`.
///
/// Methods take `&self`; implementations use interior mutability.
pub trait KeyValueStore {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    fn set(&self, key: &str, value: &str);

    /// Removes `key`.
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// In-memory store, shareable across threads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Locked<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.with(|entries| entries.len())
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.with(|entries| entries.is_empty())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.with(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.with(|entries| {
            entries.insert(String::from(key), String::from(value));
        });
    }

    fn remove(&self, key: &str) {
        self.entries.with(|entries| entries.remove(key));
    }
}

/// Reads and decodes the JSON value under `key`.
///
/// Returns `None` when the key is absent, or corrupt (logged).
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, error = %err, "ignoring corrupt stored value");
            None
        }
    }
}

/// Encodes `value` as JSON and stores it under `key`.
pub fn save_json<T, S>(store: &S, key: &str, value: &T)
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(json) => store.set(key, &json),
        Err(err) => warn!(key, error = %err, "failed to serialize value for storage"),
    }
}
