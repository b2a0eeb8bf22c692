// bases/download_cli/src/output.rs
use media_downloader::{DownloadError, EXIT_FAILURE};

pub struct OutputHandler {
    verbose: bool,
}

impl OutputHandler {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        eprintln!("[mdl] ERROR: {}", error);

        if self.verbose {
            eprintln!("\nError details:");
            error.chain().skip(1).for_each(|cause| {
                eprintln!("  caused by: {}", cause);
            });
        }
    }
}

/// Exit code for an error that escaped the app
pub fn exit_code(error: &color_eyre::Report) -> i32 {
    error
        .downcast_ref::<DownloadError>()
        .map_or(EXIT_FAILURE, DownloadError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_downloader::{EXIT_NOT_FOUND, EXIT_USAGE};

    #[test]
    fn exit_code_comes_from_download_errors() {
        let report = color_eyre::Report::new(DownloadError::MissingUrl { command: "info" });
        assert_eq!(exit_code(&report), EXIT_USAGE);

        let report = color_eyre::Report::new(DownloadError::DependencyNotFound {
            tool: "yt-dlp",
            hint: "",
        });
        assert_eq!(exit_code(&report), EXIT_NOT_FOUND);
    }

    #[test]
    fn foreign_errors_exit_with_failure() {
        let report = color_eyre::eyre::eyre!("something else");
        assert_eq!(exit_code(&report), EXIT_FAILURE);
    }
}
