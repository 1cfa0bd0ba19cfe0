//! Metadata extracted from yt-dlp info dicts and progress hooks.
//!
//! The embedded helper normalizes every dict so all keys are present,
//! which lets these types derive `FromPyObject` with `from_item_all`.

use pyo3::prelude::*;

/// Essential metadata of a single video.
#[derive(Clone, Debug, FromPyObject)]
#[pyo3(from_item_all)]
pub struct VideoInfo {
    /// Video identifier (required by yt-dlp)
    pub id: String,
    /// Video title
    pub title: Option<String>,
    /// Full name of the video uploader
    pub uploader: Option<String>,
    /// Nickname or ID of the video uploader
    pub uploader_id: Option<String>,
    /// Album name, set by music extractors
    pub album: Option<String>,
    /// URL of the preferred thumbnail image
    pub thumbnail: Option<String>,
    /// Exact size in bytes of the selected format
    pub filesize: Option<u64>,
    /// Estimated size in bytes
    pub filesize_approx: Option<u64>,
    /// URL to the video webpage
    pub webpage_url: Option<String>,
}

impl VideoInfo {
    /// Exact file size if known, otherwise the estimate.
    pub fn size_hint(&self) -> Option<u64> {
        self.filesize.or(self.filesize_approx)
    }
}

/// Unresolved playlist entry, as listed by a flat playlist extraction.
#[derive(Clone, Debug, Default, FromPyObject)]
#[pyo3(from_item_all)]
pub struct PlaylistEntry {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Video URL to resolve with a second `extract` call
    pub url: Option<String>,
}

/// Playlist metadata with one entry per listed item.
///
/// Entries are listed without being resolved, so private and removed videos
/// are still present here and only fail once resolved.
#[derive(Clone, Debug, FromPyObject)]
#[pyo3(from_item_all)]
pub struct PlaylistInfo {
    pub id: String,
    pub title: Option<String>,
    pub uploader: Option<String>,
    pub entries: Vec<PlaylistEntry>,
}

/// Result of `extract_info`: either a playlist or a single video.
#[derive(Clone, Debug)]
pub enum MediaInfo {
    Video(VideoInfo),
    Playlist(PlaylistInfo),
}

impl MediaInfo {
    pub(crate) fn from_py(obj: &Bound<'_, PyAny>) -> PyResult<Self> {
        let kind: Option<String> = obj.get_item("_type")?.extract()?;

        match kind.as_deref() {
            Some("playlist") => Ok(Self::Playlist(obj.extract()?)),
            _ => Ok(Self::Video(obj.extract()?)),
        }
    }
}

/// Phase reported by a progress hook.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProgressStatus {
    Downloading,
    Finished,
    Error,
    Other,
}

/// One progress hook event.
#[derive(Clone, Debug, FromPyObject)]
#[pyo3(from_item_all)]
pub struct ProgressUpdate {
    pub status: String,
    pub downloaded_bytes: Option<u64>,
    /// Exact total, or yt-dlp's estimate when the exact size is unknown
    pub total_bytes: Option<u64>,
    pub filename: Option<String>,
}

impl ProgressUpdate {
    pub fn status(&self) -> ProgressStatus {
        match self.status.as_str() {
            "downloading" => ProgressStatus::Downloading,
            "finished" => ProgressStatus::Finished,
            "error" => ProgressStatus::Error,
            _ => ProgressStatus::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    fn eval<'py>(py: Python<'py>, code: &CStr) -> Bound<'py, PyAny> {
        py.eval(code, None, None).unwrap()
    }

    const VIDEO: &CStr = c"{'_type': 'video', 'id': 'abc123', 'title': 'Test Video', \
        'uploader': 'someone', 'uploader_id': None, \
        'album': None, 'thumbnail': 'https://i.ytimg.com/vi/abc123/hq.jpg', \
        'filesize': None, 'filesize_approx': 4096, \
        'webpage_url': 'https://www.youtube.com/watch?v=abc123'}";

    #[test]
    fn extracts_video() {
        Python::attach(|py| {
            let info = MediaInfo::from_py(&eval(py, VIDEO)).unwrap();

            match info {
                MediaInfo::Video(video) => {
                    assert_eq!(video.id, "abc123");
                    assert_eq!(video.title.as_deref(), Some("Test Video"));
                    assert_eq!(video.uploader.as_deref(), Some("someone"));
                    assert_eq!(video.size_hint(), Some(4096));
                }
                other => panic!("expected video, got {other:?}"),
            }
        });
    }

    #[test]
    fn extracts_flat_playlist() {
        Python::attach(|py| {
            let obj = eval(
                py,
                c"{'_type': 'playlist', 'id': 'PL1', 'title': 'Mix', 'uploader': None, \
                   'entries': [{'id': 'a', 'title': 'First', 'url': 'https://www.youtube.com/watch?v=a'}, \
                               {'id': 'b', 'title': '[Private video]', 'url': 'https://www.youtube.com/watch?v=b'}, \
                               {'id': None, 'title': None, 'url': None}]}",
            );

            match MediaInfo::from_py(&obj).unwrap() {
                MediaInfo::Playlist(playlist) => {
                    assert_eq!(playlist.title.as_deref(), Some("Mix"));
                    assert_eq!(playlist.entries.len(), 3);
                    assert_eq!(playlist.entries[1].title.as_deref(), Some("[Private video]"));
                    assert_eq!(playlist.entries[2].url, None);
                }
                other => panic!("expected playlist, got {other:?}"),
            }
        });
    }

    #[test]
    fn size_hint_prefers_exact_size() {
        Python::attach(|py| {
            let MediaInfo::Video(mut video) = MediaInfo::from_py(&eval(py, VIDEO)).unwrap() else {
                panic!("expected video");
            };
            video.filesize = Some(100);
            assert_eq!(video.size_hint(), Some(100));
        });
    }

    #[test]
    fn progress_status() {
        Python::attach(|py| {
            let update: ProgressUpdate = eval(
                py,
                c"{'status': 'finished', 'downloaded_bytes': 10, 'total_bytes': 10, 'filename': 'a.webm'}",
            )
            .extract()
            .unwrap();

            assert_eq!(update.status(), ProgressStatus::Finished);
            assert_eq!(update.total_bytes, Some(10));
        });
    }
}
