// bases/download_cli/src/app.rs
use crate::args::{Args, Command};
use crate::output::OutputHandler;
use color_eyre::Result;
use media_downloader::{Dispatcher, DownloadError, Intent, Mode, SmokeKind};
use settings_store::{Defaults, Setting, SettingsStore};

pub struct App {
    args: Args,
    output: OutputHandler,
}

impl App {
    pub fn new(args: Args) -> Self {
        let output = OutputHandler::new(args.verbose);
        Self { args, output }
    }

    /// Run the command and return the process exit code
    pub async fn run(&self) -> Result<i32> {
        let intent = self.intent()?;
        let mode = self.mode();
        tracing::debug!("Dispatching {:?} in {:?} mode", intent, mode);

        let dispatcher = Dispatcher::new(SettingsStore::from_env(), Defaults::default());
        let code = dispatcher
            .dispatch(intent, mode, &mut std::io::stdout())
            .await?;

        Ok(code)
    }

    pub fn mode(&self) -> Mode {
        if self.args.print {
            Mode::Print
        } else {
            Mode::Execute
        }
    }

    /// Translate the parsed command line into an intent
    pub fn intent(&self) -> Result<Intent, DownloadError> {
        let intent = match &self.args.command {
            Command::Audio(download) => Intent::Audio {
                url: download.url.clone(),
                out_dir: download.out.clone(),
            },
            Command::Video(download) => Intent::Video {
                url: download.url.clone(),
                out_dir: download.out.clone(),
            },
            Command::Info { url } => Intent::Info { url: url.clone() },
            Command::Smoke { kind } => Intent::Smoke(kind.parse::<SmokeKind>()?),
            Command::Cover(args) => setting(Setting::Cover, args.value.clone(), args.list),
            Command::Cookies(args) => setting(Setting::Cookies, args.value.clone(), args.list),
            Command::Preset(args) => setting(Setting::Preset, args.value.clone(), args.list),
            Command::AudioFormat(args) => {
                setting(Setting::AudioFormat, args.value.clone(), args.list)
            }
            Command::VideoFormat(args) => {
                setting(Setting::VideoFormat, args.value.clone(), args.list)
            }
            Command::Out { path } => setting(Setting::Out, path.clone(), false),
        };
        Ok(intent)
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        self.output.print_error(error);
    }
}

fn setting(setting: Setting, value: Option<String>, list: bool) -> Intent {
    Intent::Setting {
        setting,
        value,
        list,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use clap::{CommandFactory, Parser};
    use rstest::rstest;
    use std::path::PathBuf;

    fn app(argv: &[&str]) -> App {
        let args = Args::try_parse_from(std::iter::once("mdl").chain(argv.iter().copied()))
            .unwrap_or_else(|e| panic!("failed to parse {argv:?}: {e}"));
        App::new(args)
    }

    #[test]
    fn audio_with_out_dir() {
        let app = app(&["audio", "https://x/watch?v=1", "--out", "/mnt/usb"]);
        assert_eq!(
            app.intent().unwrap(),
            Intent::Audio {
                url: "https://x/watch?v=1".to_string(),
                out_dir: Some(PathBuf::from("/mnt/usb")),
            }
        );
        assert_eq!(app.mode(), Mode::Execute);
    }

    #[rstest]
    #[case(&["--print", "video", "https://x"])]
    #[case(&["video", "https://x", "--print"])]
    fn print_flag_is_accepted_anywhere(#[case] argv: &[&str]) {
        let app = app(argv);
        assert_eq!(app.mode(), Mode::Print);
        assert_matches!(app.intent().unwrap(), Intent::Video { out_dir: None, .. });
    }

    #[test]
    fn info_takes_a_url() {
        assert_eq!(
            app(&["info", "https://x"]).intent().unwrap(),
            Intent::Info {
                url: "https://x".to_string()
            }
        );
    }

    #[rstest]
    #[case("audio", SmokeKind::Audio)]
    #[case("video", SmokeKind::Video)]
    fn smoke_kinds(#[case] kind: &str, #[case] expected: SmokeKind) {
        assert_eq!(
            app(&["smoke", kind]).intent().unwrap(),
            Intent::Smoke(expected)
        );
    }

    #[test]
    fn unknown_smoke_kind_is_rejected_by_the_parser() {
        let error = Args::try_parse_from(["mdl", "smoke", "podcast"]).unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::InvalidValue);
        assert_eq!(error.exit_code(), media_downloader::EXIT_USAGE);
    }

    #[test]
    fn smoke_help_lists_the_kinds() {
        let help = Args::command()
            .find_subcommand_mut("smoke")
            .map(|smoke| smoke.render_help().to_string())
            .unwrap();
        assert!(help.contains("[possible values: audio, video]"), "{help}");
    }

    #[rstest]
    #[case(&["cover"], Setting::Cover, None, false)]
    #[case(&["cover", "on"], Setting::Cover, Some("on"), false)]
    #[case(&["cookies", "--list"], Setting::Cookies, None, true)]
    #[case(&["preset", "fast"], Setting::Preset, Some("fast"), false)]
    #[case(&["audio-format", "opus"], Setting::AudioFormat, Some("opus"), false)]
    #[case(&["video-format", "--list"], Setting::VideoFormat, None, true)]
    #[case(&["out", "~/Media"], Setting::Out, Some("~/Media"), false)]
    #[case(&["out"], Setting::Out, None, false)]
    fn settings_commands(
        #[case] argv: &[&str],
        #[case] expected_setting: Setting,
        #[case] expected_value: Option<&str>,
        #[case] expected_list: bool,
    ) {
        assert_eq!(
            app(argv).intent().unwrap(),
            Intent::Setting {
                setting: expected_setting,
                value: expected_value.map(str::to_string),
                list: expected_list,
            }
        );
    }

    #[test]
    fn download_commands_require_a_url() {
        assert!(Args::try_parse_from(["mdl", "audio"]).is_err());
        assert!(Args::try_parse_from(["mdl", "info"]).is_err());
    }
}
