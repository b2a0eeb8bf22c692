//! yt-dlp argument vectors
//!
//! Builders are pure: the same URL and options always give the same
//! command, argument for argument. Format selectors always ask for the best
//! streams available and video containers are remuxed, never re-encoded.

use crate::command::CommandLine;
use crate::options::RunOptions;
use crate::playlist::is_playlist;
use settings_store::{
    AUDIO_PLAYLIST_TEMPLATE, AUDIO_SINGLE_TEMPLATE, VIDEO_PLAYLIST_TEMPLATE, VIDEO_SINGLE_TEMPLATE,
};

pub const YT_DLP: &str = "yt-dlp";

const BEST_AUDIO: &str = "bestaudio/best";
const BEST_VIDEO_AUDIO: &str = "bv*+ba/b";

/// Skip failed items, resume partial files, keep existing files
const ROBUSTNESS_FLAGS: [&str; 3] = ["--ignore-errors", "--continue", "--no-overwrites"];
const METADATA_FLAGS: [&str; 2] = ["--add-metadata", "--embed-metadata"];
const THUMBNAIL_FLAGS: [&str; 2] = ["--write-thumbnail", "--embed-thumbnail"];

/// `yt-dlp` with the flags every invocation shares: cookies and throttling
pub fn base_command(options: &RunOptions) -> CommandLine {
    let mut command = CommandLine::new(YT_DLP);

    if let Some(browser) = &options.cookies_from {
        command.arg("--cookies-from-browser").arg(browser);
    }

    if let Some(throttle) = &options.throttle {
        command.arg("--limit-rate").arg(&throttle.limit_rate);
        command
            .arg("--sleep-interval")
            .arg(throttle.sleep_min.to_string())
            .arg("--max-sleep-interval")
            .arg(throttle.sleep_max.to_string());
    }

    command
}

/// Best-quality audio, extracted to the configured container
pub fn build_audio_command(url: &str, options: &RunOptions) -> CommandLine {
    let template = if is_playlist(url) {
        AUDIO_PLAYLIST_TEMPLATE
    } else {
        AUDIO_SINGLE_TEMPLATE
    };

    let mut command = base_command(options);
    command
        .args(["-f", BEST_AUDIO])
        .args(["-x", "--audio-format", options.audio_format.as_str()])
        .args(METADATA_FLAGS);
    if options.cover {
        command.args(THUMBNAIL_FLAGS);
    }
    finish_download(command, options, template, url)
}

/// Best video plus best audio, remuxed to the configured container
pub fn build_video_command(url: &str, options: &RunOptions) -> CommandLine {
    let template = if is_playlist(url) {
        VIDEO_PLAYLIST_TEMPLATE
    } else {
        VIDEO_SINGLE_TEMPLATE
    };

    let mut command = base_command(options);
    command
        .args(["-f", BEST_VIDEO_AUDIO])
        .args(["--remux-video", options.video_format.as_str()]);
    if options.cover {
        command.args(THUMBNAIL_FLAGS);
    }
    finish_download(command, options, template, url)
}

/// List the formats available for `url` without downloading
pub fn build_info_command(url: &str, options: &RunOptions) -> CommandLine {
    let mut command = base_command(options);
    command.arg("-F").arg(url);
    command
}

fn finish_download(
    mut command: CommandLine,
    options: &RunOptions,
    template: &str,
    url: &str,
) -> CommandLine {
    let output = options.out_dir.join(template);
    command
        .args(ROBUSTNESS_FLAGS)
        .arg("-o")
        .arg(output.to_string_lossy())
        .arg(url);
    command
}
