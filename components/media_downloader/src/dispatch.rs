use crate::builders::{build_audio_command, build_info_command, build_video_command};
use crate::command::CommandLine;
use crate::options::{resolve, RunOptions};
use crate::types::{DownloadError, EXIT_OK};
use crate::ytdlp::{Executor, YtDlp};
use settings_store::{list_allowed, Defaults, Setting, SettingsStore};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Fixed target for `smoke audio`
pub const SMOKE_AUDIO_URL: &str = "https://www.youtube.com/watch?v=dWRCooFKk3c";

/// Fixed target for `smoke video`
pub const SMOKE_VIDEO_URL: &str = "https://www.youtube.com/watch?v=aqz-KE-bpKQ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokeKind {
    Audio,
    Video,
}

impl SmokeKind {
    pub fn url(&self) -> &'static str {
        match self {
            SmokeKind::Audio => SMOKE_AUDIO_URL,
            SmokeKind::Video => SMOKE_VIDEO_URL,
        }
    }
}

impl FromStr for SmokeKind {
    type Err = DownloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "audio" => Ok(SmokeKind::Audio),
            "video" => Ok(SmokeKind::Video),
            _ => Err(DownloadError::UnknownSmokeKind(s.to_string())),
        }
    }
}

/// What the user asked for, already parsed from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Audio { url: String, out_dir: Option<PathBuf> },
    Video { url: String, out_dir: Option<PathBuf> },
    Info { url: String },
    Smoke(SmokeKind),
    /// Show, change or list a persistent setting
    Setting {
        setting: Setting,
        value: Option<String>,
        list: bool,
    },
}

/// Whether a built command is printed or run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Print,
    Execute,
}

/// A command ready to print or run
struct Job {
    command: CommandLine,
    requires_media_tool: bool,
}

/// Routes intents to the builders and then to the printer or the executor
pub struct Dispatcher {
    store: SettingsStore,
    defaults: Defaults,
    executor: Arc<dyn Executor + Send + Sync>,
}

impl Dispatcher {
    /// Dispatcher that runs commands with the real yt-dlp
    pub fn new(store: SettingsStore, defaults: Defaults) -> Self {
        Self::with_executor(store, defaults, Arc::new(YtDlp::default()))
    }

    /// Dispatcher with a specific executor implementation
    pub fn with_executor(
        store: SettingsStore,
        defaults: Defaults,
        executor: Arc<dyn Executor + Send + Sync>,
    ) -> Self {
        Self {
            store,
            defaults,
            executor,
        }
    }

    /// Handle one intent, writing user-facing lines to `out`.
    ///
    /// Returns the exit code for the process: 0 for printed commands and
    /// settings, the child's exit code for executed commands.
    pub async fn dispatch(
        &self,
        intent: Intent,
        mode: Mode,
        out: &mut impl Write,
    ) -> Result<i32, DownloadError> {
        let job = match intent {
            Intent::Setting {
                setting,
                value,
                list,
            } => {
                if mode == Mode::Print {
                    tracing::warn!("--print is ignored for settings commands");
                }
                return self.setting(setting, value.as_deref(), list, out);
            }
            Intent::Audio { url, out_dir } => {
                let url = require_url("audio", &url)?;
                let options = self.run_options(out_dir.as_deref())?;
                Job {
                    command: build_audio_command(url, &options),
                    requires_media_tool: options.cover,
                }
            }
            Intent::Video { url, out_dir } => {
                let url = require_url("video", &url)?;
                let options = self.run_options(out_dir.as_deref())?;
                Job {
                    command: build_video_command(url, &options),
                    requires_media_tool: options.cover,
                }
            }
            Intent::Info { url } => {
                let url = require_url("info", &url)?;
                let options = self.run_options(None)?;
                Job {
                    command: build_info_command(url, &options),
                    requires_media_tool: false,
                }
            }
            Intent::Smoke(kind) => {
                let options = self.run_options(None)?;
                let command = match kind {
                    SmokeKind::Audio => build_audio_command(kind.url(), &options),
                    SmokeKind::Video => build_video_command(kind.url(), &options),
                };
                Job {
                    command,
                    requires_media_tool: options.cover,
                }
            }
        };

        // Shown in both modes, and before the dependency checks, so the user
        // always sees what would run.
        writeln!(out, "[mdl] exec: {}", job.command)?;
        out.flush()?;

        match mode {
            Mode::Print => Ok(EXIT_OK),
            Mode::Execute => {
                self.executor
                    .run(&job.command, job.requires_media_tool)
                    .await
            }
        }
    }

    fn run_options(&self, requested_out_dir: Option<&Path>) -> Result<RunOptions, DownloadError> {
        resolve(&self.store.load(), &self.defaults, requested_out_dir)
    }

    fn setting(
        &self,
        setting: Setting,
        value: Option<&str>,
        list: bool,
        out: &mut impl Write,
    ) -> Result<i32, DownloadError> {
        if list {
            let allowed = list_allowed(setting)?;
            writeln!(out, "[mdl] {} allowed: {}", setting, allowed.join(", "))?;
            return Ok(EXIT_OK);
        }

        let config = self.store.load();
        let config = match value {
            None => config,
            Some(raw) => {
                let updated = config.set(setting, raw)?;
                self.store.save(&updated)?;
                updated
            }
        };

        writeln!(
            out,
            "[mdl] {}: {}",
            setting,
            config.describe(setting, &self.defaults)
        )?;
        Ok(EXIT_OK)
    }
}

fn require_url<'a>(command: &'static str, url: &'a str) -> Result<&'a str, DownloadError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(DownloadError::MissingUrl { command });
    }
    Ok(url)
}
