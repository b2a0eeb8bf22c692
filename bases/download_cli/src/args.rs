// bases/download_cli/src/args.rs
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// A human-friendly wrapper around yt-dlp
#[derive(Parser, Debug)]
#[command(name = "mdl", author, version, about, long_about = None)]
pub struct Args {
    /// Print the final yt-dlp command and exit (no execution)
    #[arg(long, global = true)]
    pub print: bool,

    /// Show the full cause chain on errors
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download best-quality audio
    Audio(DownloadArgs),

    /// Download best-quality video
    Video(DownloadArgs),

    /// Show available formats for a URL (no download)
    Info {
        /// Target URL to inspect
        url: String,
    },

    /// Download a fixed sample to verify the setup
    Smoke {
        /// Which sample to download
        #[arg(value_parser = ["audio", "video"])]
        kind: String,
    },

    /// Configure cover behaviour (write and embed thumbnails)
    Cover(SettingArgs),

    /// Configure which browser to read cookies from, or none
    Cookies(SettingArgs),

    /// Configure the preset (safe is throttled, fast is not)
    Preset(SettingArgs),

    /// Configure the audio container
    AudioFormat(SettingArgs),

    /// Configure the video container (remux only)
    VideoFormat(SettingArgs),

    /// Configure the base output directory
    Out {
        /// New output directory; omit to show the current one
        path: Option<String>,
    },
}

#[derive(ClapArgs, Debug)]
pub struct DownloadArgs {
    /// Target URL (single item or playlist)
    pub url: String,

    /// Output base directory for this run
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct SettingArgs {
    /// New value; omit to show the current one
    pub value: Option<String>,

    /// List allowed values
    #[arg(long)]
    pub list: bool,
}
