use std::env;
use std::fs;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use log::{debug, error};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::utils::config_file_path;

/// Main structure holding runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
}

impl Settings {
    /// Loads settings from disk, then lets the process environment override them
    pub fn load() -> Self {
        let config = Self::load_config().with_env_overrides(|key| env::var(key).ok());
        Settings { config }
    }

    fn load_config() -> Config {
        let config_path = config_file_path(|key| env::var(key).ok());

        fs::read_to_string(&config_path)
            .and_then(|content| serde_json::from_str(&content).map_err(Into::into))
            .unwrap_or_else(|err| {
                error!(
                    "Failed to load {}: {}. Using default config.",
                    config_path.display(),
                    err
                );
                Config::default()
            })
    }
}

/// Serializable structure for app config
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    /// Directory uploaded media is written under.
    pub media_root: String,
    /// Public prefix media is served from.
    pub media_url: String,
    pub language: String,
    /// Bounding box (pixels) for headshot thumbnails.
    pub thumbnail_size: u32,
    pub thumbnail_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://listings.db?mode=rwc".to_string(),
            media_root: "media".to_string(),
            media_url: "/media/".to_string(),
            language: "en".to_string(),
            thumbnail_size: 500,
            thumbnail_quality: 80,
        }
    }
}

impl Config {
    /// Applies `DATABASE_URL`, `MEDIA_ROOT` and `MEDIA_URL` on top of the file values.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            debug!("DATABASE_URL overrides config.json");
            self.database_url = url;
        }
        if let Some(root) = lookup("MEDIA_ROOT").filter(|v| !v.trim().is_empty()) {
            self.media_root = root;
        }
        if let Some(media_url) = lookup("MEDIA_URL").filter(|v| !v.trim().is_empty()) {
            self.media_url = media_url;
        }
        self
    }
}

// ===================================
//         GLOBAL CONFIG SINGLETON
// ===================================

static SETTINGS: Lazy<RwLock<Settings>> = Lazy::new(|| {
    let settings = Settings::load();
    RwLock::new(settings)
});

/// Gets a read-only lock on the global Settings
pub fn get_settings() -> RwLockReadGuard<'static, Settings> {
    SETTINGS.read().unwrap_or_else(PoisonError::into_inner)
}
