//! Persistent user settings for mdl
//!
//! This component owns everything that survives between runs:
//! - `AppConfig`, the validated settings record
//! - the fixed table of settings and their allowed values
//! - `SettingsStore`, the JSON file behind it
//! - `Defaults`, the built-in values used when nothing is configured
//!
//! # Examples
//!
//! ```
//! use settings_store::{AppConfig, Setting};
//!
//! let config = AppConfig::default();
//! let config = config.set(Setting::Preset, " FAST ").unwrap();
//! assert_eq!(config.preset, "fast");
//! ```

mod config;
mod defaults;
mod error;
pub mod paths;
mod setting;
mod store;

pub use config::AppConfig;
pub use defaults::{
    Defaults, AUDIO_PLAYLIST_TEMPLATE, AUDIO_SINGLE_TEMPLATE, VIDEO_PLAYLIST_TEMPLATE,
    VIDEO_SINGLE_TEMPLATE,
};
pub use error::SettingsError;
pub use setting::{list_allowed, Setting};
pub use store::{config_dir_from, SettingsStore, CONFIG_DIR_ENV, CONFIG_FILE};
