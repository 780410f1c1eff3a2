use bjtable::share::{
    ShareableState, export_game_state, export_json, import_game_state, share_url, state_from_query,
};
use bjtable::storage::KeyValueStore;
use bjtable::{Action, Availability, Clock, GameConfig, StrategyDecision, Table};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Anything with the `localStorage` interface.
    pub type JsStore;

    #[wasm_bindgen(method, js_name = getItem)]
    fn get_item(this: &JsStore, key: &str) -> Option<String>;

    #[wasm_bindgen(method, js_name = setItem)]
    fn set_item(this: &JsStore, key: &str, value: &str);

    #[wasm_bindgen(method, js_name = removeItem)]
    fn remove_item(this: &JsStore, key: &str);

    #[wasm_bindgen(js_namespace = Date, js_name = now)]
    fn date_now() -> f64;
}

impl KeyValueStore for JsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.get_item(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.set_item(key, value);
    }

    fn remove(&self, key: &str) {
        self.remove_item(key);
    }
}

struct JsClock;

impl Clock for JsClock {
    fn now_ms(&self) -> u64 {
        date_now() as u64
    }
}

#[wasm_bindgen]
pub struct WasmTable {
    table: Table<JsStore, JsClock>,
}

#[wasm_bindgen]
impl WasmTable {
    #[wasm_bindgen(constructor)]
    pub fn new(store: JsStore, seed: u32) -> Self {
        Self {
            table: Table::new(GameConfig::default(), store, JsClock, u64::from(seed)),
        }
    }

    /// Restores from `store`, then applies the rules and balance carried by a
    /// share link's query string, if any.
    pub fn from_query(store: JsStore, seed: u32, query: &str) -> Result<Self, JsValue> {
        let mut table = Self::new(store, seed);
        if let Some(shared) = state_from_query(query).map_err(js_err)? {
            table.apply_shared(shared)?;
        }
        Ok(table)
    }

    /// Dispatches an action object such as `{ type: "PLACE_BET", amount: 10 }`
    /// and returns the new state.
    pub fn dispatch(&mut self, action: JsValue) -> Result<JsValue, JsValue> {
        let action: Action = serde_wasm_bindgen::from_value(action)?;
        let state = self.table.dispatch(&action).map_err(js_err)?;
        to_js_value(state)
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js_value(self.table.state())
    }

    pub fn hints(&self) -> Result<JsValue, JsValue> {
        let state = self.table.state();
        to_js_value(&Hints {
            availability: state.availability(),
            advice: state.advice(),
        })
    }

    pub fn share_url(&self, base: &str) -> Result<String, JsValue> {
        let shared = ShareableState::from_game(self.table.state(), date_now() as u64);
        share_url(base, &shared).map_err(js_err)
    }

    pub fn export_json(&self) -> Result<String, JsValue> {
        export_json(self.table.state(), date_now() as u64).map_err(js_err)
    }

    pub fn import_json(&mut self, json: &str) -> Result<JsValue, JsValue> {
        let snapshot = import_game_state(json).map_err(js_err)?;
        self.dispatch_action(&Action::ImportState {
            snapshot: Box::new(snapshot),
        })
    }
}

impl WasmTable {
    fn dispatch_action(&mut self, action: &Action) -> Result<JsValue, JsValue> {
        let state = self.table.dispatch(action).map_err(js_err)?;
        to_js_value(state)
    }

    fn apply_shared(&mut self, shared: ShareableState) -> Result<(), JsValue> {
        let mut snapshot = export_game_state(self.table.state(), shared.timestamp);
        snapshot.balance = shared.balance;
        snapshot.config = shared.config.with_name(shared.config_name);
        self.dispatch_action(&Action::ImportState {
            snapshot: Box::new(snapshot),
        })
        .map(|_| ())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Hints {
    availability: Availability,
    advice: Option<StrategyDecision>,
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
