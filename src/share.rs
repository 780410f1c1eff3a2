//! JSON export/import and shareable links.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{GameConfig, Settings};
use crate::error::DataError;
use crate::game::GameState;
use crate::statistics::StatisticsState;
use crate::training::{MistakeRecord, SpeedTrainingSession};

/// The only snapshot version this crate reads and writes.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// Query parameter carrying an encoded [`ShareableState`].
pub const STATE_PARAM: &str = "state";

/// Learning-mode part of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningExport {
    /// Logged mistakes.
    pub mistakes: Vec<MistakeRecord>,
    /// Correct decisions.
    pub correct_decisions: u64,
    /// Graded decisions.
    pub total_decisions: u64,
}

/// Speed-training part of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeedTrainingExport {
    /// Finished sessions.
    pub session_history: Vec<SpeedTrainingSession>,
}

/// A full export of the player's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSnapshot {
    /// Always [`SNAPSHOT_VERSION`].
    pub version: String,
    /// When the snapshot was taken (ms).
    #[serde(default)]
    pub exported_at: u64,
    /// Balance.
    pub balance: u64,
    /// Table rules.
    pub config: GameConfig,
    /// Preferences.
    #[serde(default)]
    pub settings: Option<Settings>,
    /// Statistics.
    #[serde(default)]
    pub statistics: Option<StatisticsState>,
    /// Learning-mode log.
    #[serde(default)]
    pub learning_mode: LearningExport,
    /// Speed-training history.
    #[serde(default)]
    pub speed_training: SpeedTrainingExport,
}

/// Builds a snapshot of `state`.
#[must_use]
pub fn export_game_state(state: &GameState, now: u64) -> ExportSnapshot {
    let learning = state.learning_mode();
    ExportSnapshot {
        version: String::from(SNAPSHOT_VERSION),
        exported_at: now,
        balance: state.balance(),
        config: state.config().clone(),
        settings: Some(state.settings().clone()),
        statistics: Some(state.statistics().clone()),
        learning_mode: LearningExport {
            mistakes: learning.mistakes.clone(),
            correct_decisions: learning.correct_decisions,
            total_decisions: learning.total_decisions,
        },
        speed_training: SpeedTrainingExport {
            session_history: state.speed_training().session_history.clone(),
        },
    }
}

/// Serializes a snapshot of `state` as pretty JSON.
///
/// # Errors
///
/// Returns [`DataError::Json`] if serialization fails.
pub fn export_json(state: &GameState, now: u64) -> Result<String, DataError> {
    Ok(serde_json::to_string_pretty(&export_game_state(state, now))?)
}

fn require_balance_and_config(value: &Value) -> Result<(), DataError> {
    match value.get("balance") {
        None => return Err(DataError::MissingField("balance")),
        Some(balance) if !balance.is_u64() => return Err(DataError::InvalidField("balance")),
        Some(_) => {}
    }
    match value.get("config") {
        None => Err(DataError::MissingField("config")),
        Some(config) if !config.is_object() => Err(DataError::InvalidField("config")),
        Some(_) => Ok(()),
    }
}

/// Parses and validates an exported snapshot.
///
/// Nothing is applied here; pass the result to
/// [`Action::ImportState`](crate::Action::ImportState).
///
/// # Errors
///
/// Returns a [`DataError`] naming the first problem found: malformed JSON, a
/// missing or unsupported `version`, a missing or mistyped `balance` or
/// `config`, or a configuration that fails validation.
pub fn import_game_state(json: &str) -> Result<ExportSnapshot, DataError> {
    let value: Value = serde_json::from_str(json)?;
    let version = value
        .get("version")
        .ok_or(DataError::MissingField("version"))?
        .as_str()
        .ok_or(DataError::InvalidField("version"))?;
    if version != SNAPSHOT_VERSION {
        return Err(DataError::UnsupportedVersion(String::from(version)));
    }
    require_balance_and_config(&value)?;

    let snapshot: ExportSnapshot = serde_json::from_value(value)?;
    snapshot.config.validate()?;
    Ok(snapshot)
}

/// The state carried by a share link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareableState {
    /// Balance.
    pub balance: u64,
    /// Table rules.
    pub config: GameConfig,
    /// Name shown for the rules.
    pub config_name: String,
    /// When the link was made (ms).
    #[serde(default)]
    pub timestamp: u64,
}

impl ShareableState {
    /// Captures the shareable part of `state`.
    #[must_use]
    pub fn from_game(state: &GameState, now: u64) -> Self {
        Self {
            balance: state.balance(),
            config: state.config().clone(),
            config_name: state.config().name.clone(),
            timestamp: now,
        }
    }
}

/// Encodes `state` as unpadded URL-safe base64 JSON.
///
/// # Errors
///
/// Returns [`DataError::Json`] if serialization fails.
pub fn encode_state(state: &ShareableState) -> Result<String, DataError> {
    let json = serde_json::to_vec(state)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decodes and validates a share string. Trailing `=` padding is accepted.
///
/// # Errors
///
/// Returns [`DataError::Encoding`] for bad base64, [`DataError::Json`] for
/// bad JSON, or a field error when `balance` or `config` is missing or
/// mistyped.
pub fn decode_state(encoded: &str) -> Result<ShareableState, DataError> {
    let bytes = URL_SAFE_NO_PAD.decode(encoded.trim().trim_end_matches('='))?;
    let value: Value = serde_json::from_slice(&bytes)?;
    require_balance_and_config(&value)?;
    let state: ShareableState = serde_json::from_value(value)?;
    state.config.validate()?;
    Ok(state)
}

/// Builds `base?state=<encoded>` (or `&state=` if `base` has a query).
///
/// # Errors
///
/// Propagates [`encode_state`] errors.
pub fn share_url(base: &str, state: &ShareableState) -> Result<String, DataError> {
    let separator = if base.contains('?') { '&' } else { '?' };
    Ok(format!("{base}{separator}{STATE_PARAM}={}", encode_state(state)?))
}

/// Extracts and decodes the `state` parameter from a query string.
///
/// The query may start with `?`. Returns `Ok(None)` when the parameter is
/// absent.
///
/// # Errors
///
/// Propagates [`decode_state`] errors.
pub fn state_from_query(query: &str) -> Result<Option<ShareableState>, DataError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix(STATE_PARAM)?.strip_prefix('='))
        .map(decode_state)
        .transpose()
}
