use crate::error::SettingsError;
use std::{fmt, str::FromStr};

/// A user-facing setting, named the way the command line names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Cover,
    Cookies,
    Preset,
    AudioFormat,
    VideoFormat,
    Out,
}

const COVER: &[&str] = &["on", "off"];
const COOKIES: &[&str] = &["none", "brave", "chrome", "chromium", "firefox", "edge"];
const PRESET: &[&str] = &["safe", "fast"];
const AUDIO_FORMAT: &[&str] = &["flac", "mp3", "opus", "m4a"];
const VIDEO_FORMAT: &[&str] = &["mp4", "mkv"];

impl Setting {
    pub const ALL: [Setting; 6] = [
        Setting::Cover,
        Setting::Cookies,
        Setting::Preset,
        Setting::AudioFormat,
        Setting::VideoFormat,
        Setting::Out,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Setting::Cover => "cover",
            Setting::Cookies => "cookies",
            Setting::Preset => "preset",
            Setting::AudioFormat => "audio-format",
            Setting::VideoFormat => "video-format",
            Setting::Out => "out",
        }
    }

    /// Allowed values in display order, or `None` for free-form settings
    pub fn allowed(&self) -> Option<&'static [&'static str]> {
        match self {
            Setting::Cover => Some(COVER),
            Setting::Cookies => Some(COOKIES),
            Setting::Preset => Some(PRESET),
            Setting::AudioFormat => Some(AUDIO_FORMAT),
            Setting::VideoFormat => Some(VIDEO_FORMAT),
            Setting::Out => None,
        }
    }

    /// Normalize `raw` and check it against the allowed table.
    ///
    /// Returns the normalized value. Free-form settings accept anything.
    pub fn validate(&self, raw: &str) -> Result<String, SettingsError> {
        let value = normalize(raw);
        match self.allowed() {
            Some(allowed) if !allowed.contains(&value.as_str()) => {
                Err(SettingsError::InvalidValue {
                    setting: *self,
                    value: raw.to_string(),
                    allowed: allowed.join(", "),
                })
            }
            _ => Ok(value),
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Setting {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize(s);
        Setting::ALL
            .into_iter()
            .find(|setting| setting.name() == name)
            .ok_or(SettingsError::UnknownSetting(name))
    }
}

/// The fixed list of values a setting accepts
pub fn list_allowed(setting: Setting) -> Result<&'static [&'static str], SettingsError> {
    setting
        .allowed()
        .ok_or(SettingsError::NoAllowedValues(setting))
}

pub(crate) fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
