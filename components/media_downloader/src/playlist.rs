/// Best-effort guess whether `url` points at a playlist.
///
/// Only used to pick an output template; yt-dlp decides what is fetched.
pub fn is_playlist(url: &str) -> bool {
    url.contains("list=")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://x/watch?v=1&list=PL1", true)]
    #[case("https://www.youtube.com/playlist?list=PLabc", true)]
    #[case("https://x/watch?v=1", false)]
    #[case("https://x/listen?id=1", false)]
    #[case("", false)]
    fn detects_playlist_marker(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(is_playlist(url), expected);
    }
}
