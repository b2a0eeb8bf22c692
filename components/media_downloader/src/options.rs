use crate::types::DownloadError;
use settings_store::{paths, AppConfig, Defaults};
use std::fmt;
use std::path::{Path, PathBuf};

/// Named bundle of internal throttling behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Rate and sleep limited
    Safe,
    /// Unthrottled
    Fast,
}

impl Preset {
    /// Parse a persisted preset, treating anything unrecognised as `Safe`.
    ///
    /// The settings store already validates presets, but the resolver must
    /// not depend on every caller going through it.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "safe" => Preset::Safe,
            "fast" => Preset::Fast,
            other => {
                tracing::warn!("Unknown preset '{}', falling back to safe", other);
                Preset::Safe
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Safe => "safe",
            Preset::Fast => "fast",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rate cap and sleep window applied together under the safe preset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Throttle {
    pub limit_rate: String,
    pub sleep_min: u32,
    pub sleep_max: u32,
}

impl Throttle {
    fn for_preset(preset: Preset, defaults: &Defaults) -> Option<Self> {
        match preset {
            Preset::Safe => Some(Self {
                limit_rate: defaults.limit_rate.clone(),
                sleep_min: defaults.sleep_min,
                sleep_max: defaults.sleep_max,
            }),
            Preset::Fast => None,
        }
    }

    /// Throttling is never user-settable, so a bad value here is a defect in
    /// the defaults rather than bad input.
    fn validate(&self) -> Result<(), DownloadError> {
        if self.limit_rate.trim().is_empty() {
            return Err(DownloadError::ConfigIntegrity(
                "rate limit is empty".to_string(),
            ));
        }
        if self.sleep_min == 0 || self.sleep_max == 0 {
            return Err(DownloadError::ConfigIntegrity(format!(
                "sleep interval must be positive (min {}, max {})",
                self.sleep_min, self.sleep_max
            )));
        }
        if self.sleep_min > self.sleep_max {
            return Err(DownloadError::ConfigIntegrity(format!(
                "sleep-min {} must be <= sleep-max {}",
                self.sleep_min, self.sleep_max
            )));
        }
        Ok(())
    }
}

/// Options for a single invocation, resolved from settings and defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Absolute base output directory
    pub out_dir: PathBuf,
    pub preset: Preset,
    /// Browser to read cookies from; `None` when cookies are disabled
    pub cookies_from: Option<String>,
    pub cover: bool,
    pub audio_format: String,
    pub video_format: String,
    /// Present exactly when `preset` is `Safe`
    pub throttle: Option<Throttle>,
}

impl RunOptions {
    pub fn limit_rate(&self) -> Option<&str> {
        self.throttle.as_ref().map(|t| t.limit_rate.as_str())
    }

    pub fn sleep_min(&self) -> Option<u32> {
        self.throttle.as_ref().map(|t| t.sleep_min)
    }

    pub fn sleep_max(&self) -> Option<u32> {
        self.throttle.as_ref().map(|t| t.sleep_max)
    }
}

/// Merge persisted settings and defaults into the options for one run.
///
/// `requested_out_dir` (from `--out`) wins over the persisted directory,
/// which wins over the default. Only fails if the derived throttling is
/// inconsistent.
pub fn resolve(
    config: &AppConfig,
    defaults: &Defaults,
    requested_out_dir: Option<&Path>,
) -> Result<RunOptions, DownloadError> {
    let out_dir = resolve_out_dir(config, defaults, requested_out_dir);

    let preset = Preset::normalize(&config.preset);
    let throttle = Throttle::for_preset(preset, defaults);
    if let Some(throttle) = &throttle {
        throttle.validate()?;
    }

    let cookies = normalize(&config.cookies);
    let cookies_from = (cookies != "none").then_some(cookies);

    let options = RunOptions {
        out_dir,
        preset,
        cookies_from,
        cover: config.cover,
        audio_format: normalize(&config.audio_format),
        video_format: normalize(&config.video_format),
        throttle,
    };
    tracing::debug!("Resolved run options: {:?}", options);

    Ok(options)
}

fn resolve_out_dir(
    config: &AppConfig,
    defaults: &Defaults,
    requested: Option<&Path>,
) -> PathBuf {
    let chosen = requested
        .filter(|path| !path.as_os_str().is_empty())
        .or(config.out_dir.as_deref())
        .unwrap_or(defaults.out_dir.as_path());

    paths::resolve(chosen).unwrap_or_else(|e| {
        tracing::warn!(
            "Could not resolve output directory {}: {} - using {}",
            chosen.display(),
            e,
            defaults.out_dir.display()
        );
        paths::resolve(&defaults.out_dir).unwrap_or_else(|_| defaults.out_dir.clone())
    })
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    fn defaults() -> Defaults {
        Defaults {
            out_dir: PathBuf::from("/home/u/Music/mdl"),
            limit_rate: "1M".to_string(),
            sleep_min: 5,
            sleep_max: 15,
        }
    }

    #[rstest]
    #[case("safe")]
    #[case(" SAFE ")]
    #[case("turbo")]
    #[case("")]
    fn safe_and_unknown_presets_are_throttled(#[case] preset: &str) {
        let config = AppConfig::default().with_preset(preset);
        let options = resolve(&config, &defaults(), None).unwrap();

        assert_eq!(options.preset, Preset::Safe);
        assert_eq!(options.limit_rate(), Some("1M"));
        assert_eq!(options.sleep_min(), Some(5));
        assert_eq!(options.sleep_max(), Some(15));
    }

    #[rstest]
    #[case("fast")]
    #[case("Fast\n")]
    fn fast_preset_is_unthrottled(#[case] preset: &str) {
        let config = AppConfig::default().with_preset(preset);
        let options = resolve(&config, &defaults(), None).unwrap();

        assert_eq!(options.preset, Preset::Fast);
        assert_eq!(options.throttle, None);
        assert_eq!(options.limit_rate(), None);
        assert_eq!(options.sleep_min(), None);
        assert_eq!(options.sleep_max(), None);
    }

    #[rstest]
    #[case(0, 15)]
    #[case(5, 0)]
    #[case(20, 10)]
    fn inconsistent_sleep_defaults_are_fatal(#[case] sleep_min: u32, #[case] sleep_max: u32) {
        let defaults = Defaults {
            sleep_min,
            sleep_max,
            ..defaults()
        };
        assert_matches!(
            resolve(&AppConfig::default(), &defaults, None),
            Err(DownloadError::ConfigIntegrity(_))
        );
    }

    #[test]
    fn inconsistent_sleep_defaults_do_not_matter_when_fast() {
        let defaults = Defaults {
            sleep_min: 20,
            sleep_max: 10,
            ..defaults()
        };
        let config = AppConfig::default().with_preset("fast");
        assert!(resolve(&config, &defaults, None).is_ok());
    }

    #[test]
    fn equal_sleep_bounds_are_allowed() {
        let defaults = Defaults {
            sleep_min: 7,
            sleep_max: 7,
            ..defaults()
        };
        let options = resolve(&AppConfig::default(), &defaults, None).unwrap();
        assert_eq!((options.sleep_min(), options.sleep_max()), (Some(7), Some(7)));
    }

    #[rstest]
    #[case("brave")]
    #[case("chrome")]
    #[case("chromium")]
    #[case("firefox")]
    #[case("edge")]
    fn cookies_browser_is_passed_through(#[case] browser: &str) {
        let config = AppConfig::default().with_cookies(browser);
        let options = resolve(&config, &defaults(), None).unwrap();
        assert_eq!(options.cookies_from.as_deref(), Some(browser));
    }

    #[rstest]
    #[case("none")]
    #[case(" NONE ")]
    fn cookies_none_disables_cookies(#[case] cookies: &str) {
        let config = AppConfig::default().with_cookies(cookies);
        let options = resolve(&config, &defaults(), None).unwrap();
        assert_eq!(options.cookies_from, None);
    }

    #[test]
    fn formats_are_normalized() {
        let config = AppConfig::default()
            .with_audio_format(" MP3")
            .with_video_format("MKV ");
        let options = resolve(&config, &defaults(), None).unwrap();
        assert_eq!(options.audio_format, "mp3");
        assert_eq!(options.video_format, "mkv");
    }

    #[test]
    fn cover_is_passed_through() {
        let config = AppConfig::default().with_cover(true);
        assert!(resolve(&config, &defaults(), None).unwrap().cover);
    }

    #[test]
    fn out_dir_defaults_to_builtin() {
        let options = resolve(&AppConfig::default(), &defaults(), None).unwrap();
        assert_eq!(options.out_dir, Path::new("/home/u/Music/mdl"));
    }

    #[test]
    fn persisted_out_dir_beats_default() {
        let config = AppConfig::default().with_out_dir("/srv/media");
        let options = resolve(&config, &defaults(), None).unwrap();
        assert_eq!(options.out_dir, Path::new("/srv/media"));
    }

    #[test]
    fn requested_out_dir_beats_persisted() {
        let config = AppConfig::default().with_out_dir("/srv/media");
        let options = resolve(&config, &defaults(), Some(Path::new("/mnt/usb"))).unwrap();
        assert_eq!(options.out_dir, Path::new("/mnt/usb"));
    }

    #[test]
    fn empty_requested_out_dir_is_ignored() {
        let config = AppConfig::default().with_out_dir("/srv/media");
        let options = resolve(&config, &defaults(), Some(Path::new(""))).unwrap();
        assert_eq!(options.out_dir, Path::new("/srv/media"));
    }

    #[test]
    fn out_dir_is_absolute_and_home_expanded() {
        let options = resolve(&AppConfig::default(), &defaults(), Some(Path::new("rips")))
            .unwrap();
        assert!(options.out_dir.is_absolute());
        assert!(options.out_dir.ends_with("rips"));

        let home = paths::expand_home(Path::new("~"));
        if home.is_absolute() {
            let options =
                resolve(&AppConfig::default(), &defaults(), Some(Path::new("~/rips"))).unwrap();
            assert_eq!(options.out_dir, home.join("rips"));
        }
    }

    #[test]
    fn resolving_is_deterministic() {
        let config = AppConfig::default().with_cookies("firefox").with_cover(true);
        assert_eq!(
            resolve(&config, &defaults(), None).unwrap(),
            resolve(&config, &defaults(), None).unwrap()
        );
    }
}
