//! Path helpers shared by the settings file and option resolution

use path_absolutize::Absolutize;
use std::io;
use std::path::{Path, PathBuf};

/// Expand a leading `~` to the user's home directory.
///
/// `~user` forms are left alone, as is everything when no home is known.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Make `path` absolute against the current directory without touching the
/// filesystem, so the directory does not have to exist yet.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    path.absolutize().map(|p| p.into_owned())
}

/// `expand_home` followed by `absolute`
pub fn resolve(path: &Path) -> io::Result<PathBuf> {
    absolute(&expand_home(path))
}
