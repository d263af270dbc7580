//! Reader settings persistence
//!
//! The display preferences live as one JSON object under a fixed key in a
//! small key-value store. Loading is forgiving: a missing, unreadable or
//! malformed entry yields defaults, and each field is validated on its own so
//! one bad value does not throw away the rest.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::view::{FontFamily, FontSize, ViewMode, ViewState};

/// Key the settings object is stored under
pub const SETTINGS_KEY: &str = "bibleReaderSettings";

/// Errors from the settings store
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("stored settings are not valid JSON: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("settings storage at {path:?} is unavailable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// String key-value storage
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError>;
}

/// Store backed by a JSON object in a file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<HashMap<String, String>, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(SettingsError::Corrupt),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(source) => Err(SettingsError::Io { path: self.path.clone(), source }),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError> {
        // A corrupt file is replaced rather than blocking every future save
        let mut entries = self.read_all().unwrap_or_default();
        entries.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|source| SettingsError::Io { path: parent.to_path_buf(), source })?;
        }
        let contents = serde_json::to_string_pretty(&entries).map_err(SettingsError::Serialize)?;
        std::fs::write(&self.path, contents)
            .map_err(|source| SettingsError::Io { path: self.path.clone(), source })
    }
}

/// In-process store, used when no data directory is available
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SettingsError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredSettings<'a> {
    view_mode: &'a str,
    font_size: f64,
    font_family: &'a str,
    theme: &'a str,
    continuous_scrolling: bool,
}

/// Loads and saves [`ViewState`]
pub struct SettingsStore {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore").finish_non_exhaustive()
    }
}

impl SettingsStore {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self { store: Box::new(store) }
    }

    /// Settings kept only for this run
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    /// Stored settings, or defaults for anything missing or invalid
    pub fn load(&self) -> ViewState {
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Ignoring stored settings: {}", e);
                ViewState::default()
            }
        }
    }

    fn try_load(&self) -> Result<ViewState, SettingsError> {
        let Some(raw) = self.store.get(SETTINGS_KEY)? else {
            return Ok(ViewState::default());
        };
        let value: Value = serde_json::from_str(&raw).map_err(SettingsError::Corrupt)?;
        Ok(parse_settings(&value))
    }

    /// Persist `state`; failures are logged and otherwise ignored
    pub fn save(&mut self, state: &ViewState) {
        if let Err(e) = self.try_save(state) {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }

    fn try_save(&mut self, state: &ViewState) -> Result<(), SettingsError> {
        let stored = StoredSettings {
            view_mode: state.view_mode.key(),
            font_size: state.font_size.rem(),
            font_family: state.font_family.key(),
            theme: &state.theme,
            continuous_scrolling: state.continuous_scroll,
        };
        let json = serde_json::to_string(&stored).map_err(SettingsError::Serialize)?;
        self.store.set(SETTINGS_KEY, json)
    }
}

fn parse_settings(value: &Value) -> ViewState {
    let mut state = ViewState::default();

    if let Some(mode) = value.get("viewMode").and_then(Value::as_str).and_then(ViewMode::from_key) {
        state.view_mode = mode;
    }
    if let Some(rem) = value.get("fontSize").and_then(rem_value) {
        state.font_size = FontSize::nearest(rem);
    }
    if let Some(family) =
        value.get("fontFamily").and_then(Value::as_str).and_then(FontFamily::from_key)
    {
        state.font_family = family;
    }
    if let Some(theme) = value.get("theme").and_then(Value::as_str).filter(|t| !t.is_empty()) {
        state.theme = theme.to_string();
    }
    if let Some(enabled) = value.get("continuousScrolling").and_then(Value::as_bool) {
        state.continuous_scroll = enabled;
    }

    state
}

/// Accepts `1.2`, `"1.2"` or `"1.2rem"`
fn rem_value(value: &Value) -> Option<f64> {
    let rem: f64 = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches("rem").trim().parse().ok()?,
        _ => return None,
    };
    rem.is_finite().then_some(rem)
}
