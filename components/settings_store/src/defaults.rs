use std::path::PathBuf;

/// Output template for a single audio item, relative to the output directory
pub const AUDIO_SINGLE_TEMPLATE: &str = "%(artist|uploader)s/%(title)s.%(ext)s";
pub const AUDIO_PLAYLIST_TEMPLATE: &str =
    "%(artist|uploader)s/%(playlist_title)s/%(playlist_index)02d - %(title)s.%(ext)s";
pub const VIDEO_SINGLE_TEMPLATE: &str = "%(uploader|channel)s/%(title)s.%(ext)s";
pub const VIDEO_PLAYLIST_TEMPLATE: &str =
    "%(uploader|channel)s/%(playlist_title)s/%(playlist_index)02d - %(title)s.%(ext)s";

/// Built-in values used when the user has not configured anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    /// Base output directory
    pub out_dir: PathBuf,

    /// Download rate cap used by the safe preset (yt-dlp syntax, e.g. "1M")
    pub limit_rate: String,

    /// Lower bound of the pause between downloads, in seconds
    pub sleep_min: u32,

    /// Upper bound of the pause between downloads, in seconds
    pub sleep_max: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            out_dir: music_dir().join("mdl"),
            limit_rate: "1M".to_string(),
            sleep_min: 5,
            sleep_max: 15,
        }
    }
}

/// The user's music folder: `XDG_MUSIC_DIR` on Linux, `~/Music` otherwise
fn music_dir() -> PathBuf {
    dirs::audio_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Music")))
        .unwrap_or_else(|| PathBuf::from("Music"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_throttling_defaults_are_consistent() {
        let defaults = Defaults::default();
        assert_eq!(defaults.limit_rate, "1M");
        assert!(defaults.sleep_min > 0);
        assert!(defaults.sleep_min <= defaults.sleep_max);
    }

    #[test]
    fn default_out_dir_is_an_mdl_folder() {
        assert!(Defaults::default().out_dir.ends_with("mdl"));
    }

    #[test]
    fn playlist_templates_number_their_items() {
        assert!(AUDIO_PLAYLIST_TEMPLATE.contains("%(playlist_index)02d"));
        assert!(VIDEO_PLAYLIST_TEMPLATE.contains("%(playlist_index)02d"));
        assert!(!AUDIO_SINGLE_TEMPLATE.contains("playlist"));
        assert!(!VIDEO_SINGLE_TEMPLATE.contains("playlist"));
    }
}
