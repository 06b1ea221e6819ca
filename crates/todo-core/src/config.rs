use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_MAX_LIST_NAME_LENGTH: usize = 50;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage_file: Option<PathBuf>,
    #[serde(default)]
    pub max_list_name_length: Option<usize>,
    #[serde(default)]
    pub storage_quota_bytes: Option<usize>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/todo-lists/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("todo-lists/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("todo-lists\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = Self::parse(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Storage file used when no `--file` is given
    pub fn effective_storage_file(&self) -> PathBuf {
        self.storage_file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("todo-lists")
                .join("storage.json")
        })
    }

    pub fn effective_max_list_name_length(&self) -> usize {
        self.max_list_name_length.unwrap_or(DEFAULT_MAX_LIST_NAME_LENGTH)
    }
}
