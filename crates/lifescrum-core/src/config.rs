use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SPRINT_WINDOW_WEEKS: u32 = 12;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding one JSON file per persisted slot.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Number of weekly sprints generated when no sprints are stored.
    #[serde(default = "default_sprint_window_weeks")]
    pub sprint_window_weeks: u32,
}

fn default_sprint_window_weeks() -> u32 {
    DEFAULT_SPRINT_WINDOW_WEEKS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            sprint_window_weeks: DEFAULT_SPRINT_WINDOW_WEEKS,
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/lifescrum/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("lifescrum/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("lifescrum\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Reads a config file, falling back to defaults when it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn effective_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("lifescrum")))
            .unwrap_or_else(|| PathBuf::from(".lifescrum"))
    }

    /// Window size, never zero so the sprint list can never be generated empty.
    pub fn effective_sprint_window_weeks(&self) -> u32 {
        self.sprint_window_weeks.max(1)
    }
}
