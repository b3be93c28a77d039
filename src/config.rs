use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::core::services::KeyValueStore;

/// Slot holding the JSON settings object read at startup.
pub const SETTINGS_KEY: &str = "task-board-settings";

pub const DEFAULT_BOARD_KEY: &str = "kanban-tasks-v1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub storage_key: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_BOARD_KEY.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads settings from storage, keeping defaults for anything missing.
    /// Unreadable or malformed settings give the defaults.
    pub fn load<S: KeyValueStore + ?Sized>(storage: &S) -> Self {
        match storage.get(SETTINGS_KEY) {
            Ok(Some(raw)) => Self::from_json(&raw),
            Ok(None) => Self::default(),
            Err(_) => Self::default(),
        }
    }

    pub fn from_json(raw: &str) -> Self {
        let mut config: AppConfig = serde_json::from_str(raw).unwrap_or_default();
        if config.storage_key.trim().is_empty() {
            config.storage_key = DEFAULT_BOARD_KEY.to_string();
        }
        config
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
