// components/media_downloader/src/lib.rs
//! Turns what the user asked for into a yt-dlp invocation.
//!
//! Settings and defaults are resolved into [`RunOptions`], the builders turn
//! those into a [`CommandLine`], and the [`Dispatcher`] either prints it or
//! hands it to an [`Executor`].

mod builders;
mod command;
mod dispatch;
mod options;
mod playlist;
mod types;
mod ytdlp;

pub use builders::{
    base_command, build_audio_command, build_info_command, build_video_command, YT_DLP,
};
pub use command::{quote, CommandLine};
pub use dispatch::{Dispatcher, Intent, Mode, SmokeKind, SMOKE_AUDIO_URL, SMOKE_VIDEO_URL};
pub use options::{resolve, Preset, RunOptions, Throttle};
pub use playlist::is_playlist;
pub use types::{
    DownloadError, EXIT_FAILURE, EXIT_INTERRUPTED, EXIT_NOT_FOUND, EXIT_OK, EXIT_SOFTWARE,
    EXIT_USAGE,
};
pub use ytdlp::{command_exists, Executor, YtDlp, FFMPEG};
