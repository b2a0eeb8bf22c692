use crate::config::AppConfig;
use crate::error::SettingsError;
use crate::paths;
use serde_json::{Map, Value};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Environment variable that overrides the settings directory
pub const CONFIG_DIR_ENV: &str = "MDL_CONFIG_DIR";

/// File name of the settings file inside the settings directory
pub const CONFIG_FILE: &str = "config.json";

/// JSON settings file on disk
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    /// Store settings in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store settings in `$MDL_CONFIG_DIR`, or the platform config directory
    pub fn from_env() -> Self {
        Self::new(config_dir_from(std::env::var_os(CONFIG_DIR_ENV)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    /// Read the settings file.
    ///
    /// Never fails: a missing, unreadable or corrupt file yields the default
    /// config, and invalid individual keys fall back one by one.
    pub fn load(&self) -> AppConfig {
        let path = self.path();

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No settings file at {}, using defaults", path.display());
                return AppConfig::default();
            }
            Err(e) => {
                tracing::warn!("Could not read {}: {} - using defaults", path.display(), e);
                return AppConfig::default();
            }
        };

        match serde_json::from_str::<Map<String, Value>>(&text) {
            Ok(data) => AppConfig::from_json(&data),
            Err(e) => {
                tracing::warn!("Ignoring corrupt settings file {}: {}", path.display(), e);
                AppConfig::default()
            }
        }
    }

    /// Write the settings file, creating its directory if needed.
    ///
    /// The new contents go to a temporary file in the same directory which is
    /// then renamed over the old file, so readers never see a partial write.
    pub fn save(&self, config: &AppConfig) -> Result<(), SettingsError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| SettingsError::io("create directory", &self.dir, e))?;

        let mut json = serde_json::to_string_pretty(config)?;
        json.push('\n');

        let path = self.path();
        let mut file = NamedTempFile::new_in(&self.dir)
            .map_err(|e| SettingsError::io("create temporary file in", &self.dir, e))?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| SettingsError::io("write", file.path(), e))?;
        file.persist(&path)
            .map_err(|e| SettingsError::io("replace", &path, e.error))?;

        tracing::debug!("Saved settings to {}", path.display());
        Ok(())
    }
}

/// Pick the settings directory from the raw value of `MDL_CONFIG_DIR`
pub fn config_dir_from(raw: Option<OsString>) -> PathBuf {
    match raw.filter(|raw| !raw.is_empty()) {
        Some(raw) => paths::expand_home(Path::new(&raw)),
        None => dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("mdl"),
    }
}
