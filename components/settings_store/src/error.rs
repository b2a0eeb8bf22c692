use crate::setting::Setting;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("invalid value '{value}' for {setting}. Allowed: {allowed}")]
    InvalidValue {
        setting: Setting,
        value: String,
        allowed: String,
    },

    #[error("{0} does not have a fixed list of values")]
    NoAllowedValues(Setting),

    #[error("{0} requires a PATH")]
    EmptyPath(Setting),

    #[error("could not resolve {path}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode settings")]
    Encode(#[from] serde_json::Error),
}

impl SettingsError {
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SettingsError::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// True when the error was caused by what the user typed
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            SettingsError::UnknownSetting(_)
                | SettingsError::InvalidValue { .. }
                | SettingsError::NoAllowedValues(_)
                | SettingsError::EmptyPath(_)
        )
    }
}
