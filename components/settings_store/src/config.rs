use crate::defaults::Defaults;
use crate::error::SettingsError;
use crate::paths;
use crate::setting::Setting;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Persistent user configuration.
///
/// Enumerated fields always hold a normalized value from their allowed set.
/// Instances are never mutated in place: every change produces a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// "safe" | "fast"
    pub preset: String,

    /// "none" or a browser to read cookies from
    pub cookies: String,

    /// Write and embed thumbnails
    pub cover: bool,

    /// "flac" | "mp3" | "opus" | "m4a"
    pub audio_format: String,

    /// "mp4" | "mkv"
    pub video_format: String,

    /// Absolute base output directory; `None` means use the default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preset: "safe".to_string(),
            cookies: "none".to_string(),
            cover: false,
            audio_format: "flac".to_string(),
            video_format: "mp4".to_string(),
            out_dir: None,
        }
    }
}

impl AppConfig {
    /// Build a config from a decoded settings object.
    ///
    /// Each key falls back to its default on its own when it is missing or
    /// holds something outside its allowed set.
    pub fn from_json(data: &Map<String, Value>) -> Self {
        let defaults = Self::default();

        let out_dir = data
            .get("out_dir")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Self {
            preset: enumerated(data, "preset", Setting::Preset, defaults.preset),
            cookies: enumerated(data, "cookies", Setting::Cookies, defaults.cookies),
            cover: data
                .get("cover")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.cover),
            audio_format: enumerated(
                data,
                "audio_format",
                Setting::AudioFormat,
                defaults.audio_format,
            ),
            video_format: enumerated(
                data,
                "video_format",
                Setting::VideoFormat,
                defaults.video_format,
            ),
            out_dir,
        }
    }

    pub fn with_preset(&self, preset: impl Into<String>) -> Self {
        Self {
            preset: preset.into(),
            ..self.clone()
        }
    }

    pub fn with_cookies(&self, cookies: impl Into<String>) -> Self {
        Self {
            cookies: cookies.into(),
            ..self.clone()
        }
    }

    pub fn with_cover(&self, cover: bool) -> Self {
        Self {
            cover,
            ..self.clone()
        }
    }

    pub fn with_audio_format(&self, audio_format: impl Into<String>) -> Self {
        Self {
            audio_format: audio_format.into(),
            ..self.clone()
        }
    }

    pub fn with_video_format(&self, video_format: impl Into<String>) -> Self {
        Self {
            video_format: video_format.into(),
            ..self.clone()
        }
    }

    pub fn with_out_dir(&self, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: Some(out_dir.into()),
            ..self.clone()
        }
    }

    /// Validate `raw` for `setting` and return the updated config.
    ///
    /// On error `self` is untouched, so nothing changes on disk either.
    pub fn set(&self, setting: Setting, raw: &str) -> Result<Self, SettingsError> {
        Ok(match setting {
            Setting::Cover => self.with_cover(setting.validate(raw)? == "on"),
            Setting::Cookies => self.with_cookies(setting.validate(raw)?),
            Setting::Preset => self.with_preset(setting.validate(raw)?),
            Setting::AudioFormat => self.with_audio_format(setting.validate(raw)?),
            Setting::VideoFormat => self.with_video_format(setting.validate(raw)?),
            Setting::Out => self.with_out_dir(resolve_out_dir(raw)?),
        })
    }

    /// Render the current value of `setting` for display
    pub fn describe(&self, setting: Setting, defaults: &Defaults) -> String {
        match setting {
            Setting::Cover => String::from(if self.cover { "on" } else { "off" }),
            Setting::Cookies => self.cookies.clone(),
            Setting::Preset => self.preset.clone(),
            Setting::AudioFormat => self.audio_format.clone(),
            Setting::VideoFormat => self.video_format.clone(),
            Setting::Out => self
                .out_dir
                .as_deref()
                .unwrap_or(&defaults.out_dir)
                .display()
                .to_string(),
        }
    }
}

fn resolve_out_dir(raw: &str) -> Result<PathBuf, SettingsError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SettingsError::EmptyPath(Setting::Out));
    }

    let path = Path::new(raw);
    paths::resolve(path).map_err(|source| SettingsError::Resolve {
        path: path.to_path_buf(),
        source,
    })
}

fn enumerated(
    data: &Map<String, Value>,
    key: &str,
    setting: Setting,
    fallback: String,
) -> String {
    let Some(raw) = data.get(key) else {
        return fallback;
    };

    match raw.as_str().map(|s| setting.validate(s)) {
        Some(Ok(value)) => value,
        _ => {
            tracing::warn!(
                "Ignoring invalid {} value {} in settings, using {}",
                setting,
                raw,
                fallback
            );
            fallback
        }
    }
}
