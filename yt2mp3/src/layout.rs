//! Output layout: `<base>/<artist>/[<playlist_title>/]<title>.mp3`.

use std::path::{Path, PathBuf};
use yt2mp3_dl::info::{PlaylistInfo, VideoInfo};
use yt2mp3_dl::mp3::MP3_EXT;

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Replacement for names that sanitize to nothing.
const EMPTY_COMPONENT: &str = "untitled";

/// Make `name` safe to use as a single path component.
///
/// Strips `/`, `\`, `:` and control characters, then trims whitespace and
/// trailing dots. `.` and `..` end up empty and are replaced.
pub fn sanitize_component(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':') && !c.is_control())
        .collect();

    let trimmed = stripped
        .trim_start()
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace());

    if trimmed.is_empty() {
        EMPTY_COMPONENT.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Resolved metadata of one item to download.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub artist: String,
    pub album: String,
    pub title: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub size_hint: Option<u64>,
}

impl Track {
    /// Single video requested by `url`.
    pub fn from_video(info: &VideoInfo, url: &str) -> Self {
        Self {
            artist: artist_of(info).unwrap_or(UNKNOWN_ARTIST).to_string(),
            album: info.album.as_deref().unwrap_or(UNKNOWN_ALBUM).to_string(),
            title: info.title.as_deref().unwrap_or(UNKNOWN_TITLE).to_string(),
            url: url.to_string(),
            thumbnail: info.thumbnail.clone(),
            size_hint: info.size_hint(),
        }
    }

    /// Playlist entry. `None` if the entry has no page URL to download from.
    pub fn from_entry(info: &VideoInfo, playlist: &PlaylistInfo) -> Option<Self> {
        let url = info.webpage_url.as_deref()?;

        let artist = artist_of(info)
            .or(playlist.uploader.as_deref())
            .unwrap_or(UNKNOWN_ARTIST);

        let album = info
            .album
            .as_deref()
            .or(playlist.title.as_deref())
            .unwrap_or(UNKNOWN_ALBUM);

        Some(Self {
            artist: artist.to_string(),
            album: album.to_string(),
            title: info.title.as_deref().unwrap_or(UNKNOWN_TITLE).to_string(),
            url: url.to_string(),
            thumbnail: info.thumbnail.clone(),
            size_hint: info.size_hint(),
        })
    }

    /// Sanitized file stem, without extension.
    pub fn file_stem(&self) -> String {
        sanitize_component(&self.title)
    }
}

fn artist_of(info: &VideoInfo) -> Option<&str> {
    info.uploader.as_deref().or(info.uploader_id.as_deref())
}

/// `<base>/<artist>` or `<base>/<artist>/<playlist_title>`.
pub fn target_dir(base: &Path, artist: &str, playlist_title: Option<&str>) -> PathBuf {
    let mut dir = base.join(sanitize_component(artist));

    if let Some(playlist) = playlist_title {
        dir.push(sanitize_component(playlist));
    }

    dir
}

/// Full path of the MP3 file for `track`.
pub fn target_path(base: &Path, track: &Track, playlist_title: Option<&str>) -> PathBuf {
    let mut path = target_dir(base, &track.artist, playlist_title);
    path.push(format!("{}.{MP3_EXT}", track.file_stem()));
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(title: Option<&str>, uploader: Option<&str>) -> VideoInfo {
        VideoInfo {
            id: "abc123".to_string(),
            title: title.map(str::to_string),
            uploader: uploader.map(str::to_string),
            uploader_id: None,
            album: None,
            thumbnail: None,
            filesize: None,
            filesize_approx: Some(1024),
            webpage_url: Some("https://www.youtube.com/watch?v=abc123".to_string()),
        }
    }

    fn playlist(title: Option<&str>, uploader: Option<&str>) -> PlaylistInfo {
        PlaylistInfo {
            id: "PL1".to_string(),
            title: title.map(str::to_string),
            uploader: uploader.map(str::to_string),
            entries: vec![],
        }
    }

    #[test]
    fn strips_separators_and_colons() {
        assert_eq!(sanitize_component("AC/DC: Live\\Set"), "ACDC LiveSet");
        assert_eq!(sanitize_component("a\u{0}b\nc"), "abc");
    }

    #[test]
    fn trims_whitespace_and_trailing_dots() {
        assert_eq!(sanitize_component("  Title...  "), "Title");
        assert_eq!(sanitize_component("Mr. Brightside"), "Mr. Brightside");
        assert_eq!(sanitize_component("Title. ."), "Title");
        assert_eq!(sanitize_component("Vol. 2 . . "), "Vol. 2");
    }

    #[test]
    fn empty_and_dot_names_are_replaced() {
        assert_eq!(sanitize_component(""), EMPTY_COMPONENT);
        assert_eq!(sanitize_component("::/"), EMPTY_COMPONENT);
        assert_eq!(sanitize_component("."), EMPTY_COMPONENT);
        assert_eq!(sanitize_component(".."), EMPTY_COMPONENT);
        assert_eq!(sanitize_component(" . . "), EMPTY_COMPONENT);
    }

    #[test]
    fn single_video_path() {
        let track = Track::from_video(&video(Some("Song: Live"), Some("Band")), "url");
        let path = target_path(Path::new("/music"), &track, None);

        assert_eq!(path, PathBuf::from("/music/Band/Song Live.mp3"));
    }

    #[test]
    fn playlist_entry_path_includes_playlist_title() {
        let list = playlist(Some("Best of: 2020"), None);
        let track = Track::from_entry(&video(Some("Song"), Some("Band")), &list).unwrap();
        let path = target_path(Path::new("/music"), &track, list.title.as_deref());

        assert_eq!(path, PathBuf::from("/music/Band/Best of 2020/Song.mp3"));
    }

    #[test]
    fn missing_metadata_uses_defaults() {
        let track = Track::from_video(&video(None, None), "url");

        assert_eq!(track.artist, UNKNOWN_ARTIST);
        assert_eq!(track.album, UNKNOWN_ALBUM);
        assert_eq!(track.title, UNKNOWN_TITLE);
        assert_eq!(track.size_hint, Some(1024));
    }

    #[test]
    fn uploader_id_fallback() {
        let mut info = video(Some("Song"), None);
        info.uploader_id = Some("@band".to_string());

        assert_eq!(Track::from_video(&info, "url").artist, "@band");
    }

    #[test]
    fn entry_falls_back_to_playlist_metadata() {
        let list = playlist(Some("Mixtape"), Some("Curator"));
        let track = Track::from_entry(&video(Some("Song"), None), &list).unwrap();

        assert_eq!(track.artist, "Curator");
        assert_eq!(track.album, "Mixtape");
        assert_eq!(track.url, "https://www.youtube.com/watch?v=abc123");
    }

    #[test]
    fn entry_without_url_is_rejected() {
        let mut info = video(Some("Song"), Some("Band"));
        info.webpage_url = None;

        assert_eq!(Track::from_entry(&info, &playlist(None, None)), None);
    }
}
