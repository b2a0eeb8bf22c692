use settings_store::SettingsError;
use thiserror::Error;

/// Exit code for a finished run
pub const EXIT_OK: i32 = 0;

/// Generic failure (I/O, process launch)
pub const EXIT_FAILURE: i32 = 1;

/// Bad command line or setting value
pub const EXIT_USAGE: i32 = 2;

/// Internal inconsistency (EX_SOFTWARE)
pub const EXIT_SOFTWARE: i32 = 70;

/// A required program is not on PATH
pub const EXIT_NOT_FOUND: i32 = 127;

/// Interrupted by the user (128 + SIGINT)
pub const EXIT_INTERRUPTED: i32 = 130;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("{command} requires URL. Try: mdl {command} -h")]
    MissingUrl { command: &'static str },

    #[error("unknown smoke kind '{0}' (expected: audio|video)")]
    UnknownSmokeKind(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("internal settings are invalid: {0}")]
    ConfigIntegrity(String),

    #[error("{tool} not found in PATH. {hint}")]
    DependencyNotFound {
        tool: &'static str,
        hint: &'static str,
    },

    #[error("failed to run {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DownloadError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DownloadError::MissingUrl { .. } | DownloadError::UnknownSmokeKind(_) => EXIT_USAGE,
            DownloadError::Settings(e) if e.is_usage() => EXIT_USAGE,
            DownloadError::ConfigIntegrity(_) => EXIT_SOFTWARE,
            DownloadError::DependencyNotFound { .. } => EXIT_NOT_FOUND,
            DownloadError::Settings(_) | DownloadError::Spawn { .. } | DownloadError::IoError(_) => {
                EXIT_FAILURE
            }
        }
    }
}
