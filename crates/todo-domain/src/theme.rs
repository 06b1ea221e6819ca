use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use todo_core::{KeyValueStore, TodoError, THEME_KEY};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stored preference; missing, unreadable or unknown values mean light.
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        match storage.get(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring unknown theme '{}'", value);
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::error!("Error loading theme: {}", e);
                Self::default()
            }
        }
    }

    /// Returns whether the write landed; failures are logged.
    pub fn save(self, storage: &dyn KeyValueStore) -> bool {
        match storage.set(THEME_KEY, self.as_str()) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error saving theme: {}", e);
                false
            }
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(TodoError::Validation(format!(
                "Unknown theme '{}', expected 'light' or 'dark'",
                other
            ))),
        }
    }
}
