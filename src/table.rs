//! The persistence boundary around a [`GameState`].

use alloc::string::ToString;

use crate::action::Action;
use crate::config::library::set_active_config_name;
use crate::config::{ConfigUpdate, GameConfig};
use crate::error::EngineError;
use crate::game::GameState;
use crate::storage::{
    KeyValueStore, STORAGE_KEY_ACHIEVEMENTS, STORAGE_KEY_BALANCE, STORAGE_KEY_BANKROLL_HISTORY,
    STORAGE_KEY_HAND_HISTORY, STORAGE_KEY_SETTINGS, STORAGE_KEY_STATISTICS, STORAGE_KEY_TABLE_RULES,
    STORAGE_KEY_THEME, save_json,
};

/// A source of wall-clock time in milliseconds.
pub trait Clock {
    /// Returns the current time (ms since the Unix epoch, or any monotonic
    /// origin the caller prefers).
    fn now_ms(&self) -> u64;
}

impl<F: Fn() -> u64> Clock for F {
    fn now_ms(&self) -> u64 {
        self()
    }
}

/// The system clock.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as u64)
    }
}

/// A game bound to a store and a clock.
///
/// Every dispatched action is stamped with the clock, and whatever it changed
/// among balance, settings, table rules, statistics and achievements is
/// written back to the store.
///
/// # Example
///
/// ```
/// use bjtable::storage::{KeyValueStore, MemoryStore, STORAGE_KEY_BALANCE};
/// use bjtable::{Action, GameConfig, Table};
///
/// let store = MemoryStore::new();
/// let mut table = Table::new(GameConfig::default(), &store, || 1_000_u64, 3);
/// table.dispatch(&Action::PlaceBet { amount: 50 }).unwrap();
/// assert_eq!(store.get(STORAGE_KEY_BALANCE).as_deref(), Some("950"));
/// ```
#[derive(Debug)]
pub struct Table<S, C> {
    state: GameState,
    store: S,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> Table<S, C> {
    /// Restores a game from `store` and binds it.
    #[must_use]
    pub fn new(base: GameConfig, store: S, clock: C, seed: u64) -> Self {
        let state = GameState::restore(base, &store, seed).at(clock.now_ms());
        Self { state, store, clock }
    }

    /// Binds an existing game. Nothing is read from `store`.
    #[must_use]
    pub const fn from_state(state: GameState, store: S, clock: C) -> Self {
        Self { state, store, clock }
    }

    /// Returns the game.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the table and returns the game.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Applies `action` and persists what it changed.
    ///
    /// Refused actions change nothing and write nothing.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyShoe`] if a card is needed and the shoe is
    /// empty. The game is left as it was before the action.
    pub fn dispatch(&mut self, action: &Action) -> Result<&GameState, EngineError> {
        let current = self.state.clone().at(self.clock.now_ms());
        let next = current.apply(action)?;
        self.persist(&next);
        self.state = next;
        Ok(&self.state)
    }

    fn persist(&self, next: &GameState) {
        let previous = &self.state;
        let store = &self.store;

        if next.balance() != previous.balance() {
            store.set(STORAGE_KEY_BALANCE, &next.balance().to_string());
        }
        if next.settings() != previous.settings() {
            save_json(store, STORAGE_KEY_SETTINGS, next.settings());
        }
        if next.theme() != previous.theme() {
            store.set(STORAGE_KEY_THEME, next.theme().as_str());
        }
        if next.config() != previous.config() {
            let rules = ConfigUpdate {
                name: None,
                ..ConfigUpdate::from(next.config())
            };
            save_json(store, STORAGE_KEY_TABLE_RULES, &rules);
            set_active_config_name(store, &next.config().name);
        }

        let stats = next.statistics();
        let prev_stats = previous.statistics();
        if stats.all_time != prev_stats.all_time {
            save_json(store, STORAGE_KEY_STATISTICS, &stats.all_time);
        }
        if stats.hand_history != prev_stats.hand_history {
            save_json(store, STORAGE_KEY_HAND_HISTORY, &stats.hand_history);
        }
        if stats.bankroll_history != prev_stats.bankroll_history {
            save_json(store, STORAGE_KEY_BANKROLL_HISTORY, &stats.bankroll_history);
        }
        if next.achievements() != previous.achievements() {
            save_json(store, STORAGE_KEY_ACHIEVEMENTS, next.achievements());
        }
    }
}
