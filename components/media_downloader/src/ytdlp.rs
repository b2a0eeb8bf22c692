use crate::builders::YT_DLP;
use crate::command::CommandLine;
use crate::types::{DownloadError, EXIT_FAILURE, EXIT_INTERRUPTED};
use async_trait::async_trait;
use std::process::ExitStatus;
use tokio::process::Command;

pub const FFMPEG: &str = "ffmpeg";

const YT_DLP_HINT: &str =
    "Install it (recommended): pipx install yt-dlp, or make sure it is in your PATH.";
const FFMPEG_HINT: &str =
    "Install it (Ubuntu/Debian): sudo apt install ffmpeg, or make sure it is in your PATH.";

/// Runs a finished command line and reports its exit code
#[async_trait]
pub trait Executor {
    /// Run `command` to completion.
    ///
    /// `requires_media_tool` is set when post-processing needs ffmpeg, e.g.
    /// for embedding thumbnails.
    async fn run(&self, command: &CommandLine, requires_media_tool: bool)
        -> Result<i32, DownloadError>;
}

/// Whether `name` can be found on PATH
pub fn command_exists(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Runs yt-dlp as a child process, checking that it (and ffmpeg, when
/// post-processing needs it) is on PATH first
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: &'static str,
    media_tool: &'static str,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::with_programs(YT_DLP, FFMPEG)
    }
}

impl YtDlp {
    /// Look up different program names than `yt-dlp` and `ffmpeg`
    pub fn with_programs(program: &'static str, media_tool: &'static str) -> Self {
        Self {
            program,
            media_tool,
        }
    }

    fn check_available(&self, requires_media_tool: bool) -> Result<(), DownloadError> {
        if !command_exists(self.program) {
            return Err(DownloadError::DependencyNotFound {
                tool: self.program,
                hint: YT_DLP_HINT,
            });
        }
        if requires_media_tool && !command_exists(self.media_tool) {
            return Err(DownloadError::DependencyNotFound {
                tool: self.media_tool,
                hint: FFMPEG_HINT,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Executor for YtDlp {
    async fn run(
        &self,
        command: &CommandLine,
        requires_media_tool: bool,
    ) -> Result<i32, DownloadError> {
        self.check_available(requires_media_tool)?;

        tracing::info!("Launching {}", command.program());
        let spawn_error = |source: std::io::Error| DownloadError::Spawn {
            command: command.program().to_string(),
            source,
        };

        // stdio is inherited: yt-dlp's own progress output goes straight
        // to the terminal.
        let mut child = Command::new(command.program())
            .args(command.arguments())
            .kill_on_drop(true)
            .spawn()
            .map_err(spawn_error)?;

        // Ctrl-C is checked first so an interrupt always maps to 130, even
        // when the child has already exited from the same signal.
        tokio::select! {
            biased;

            interrupted = tokio::signal::ctrl_c() => match interrupted {
                Ok(()) => {
                    tracing::debug!("Interrupted, stopping {}", command.program());
                    if let Err(e) = child.kill().await {
                        tracing::debug!("{} already exited: {}", command.program(), e);
                    }
                    Ok(EXIT_INTERRUPTED)
                }
                Err(e) => {
                    tracing::warn!("Could not listen for Ctrl-C: {}", e);
                    Ok(exit_code(child.wait().await.map_err(spawn_error)?))
                }
            },
            status = child.wait() => Ok(exit_code(status.map_err(spawn_error)?)),
        }
    }
}

/// The child's exit code, or `128 + signal` when it was killed by a signal
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    EXIT_FAILURE
}
