//! Per-URL pipeline: extract metadata, branch on playlist vs. single video,
//! then download, convert and tag each item.

use crate::layout::{Track, UNKNOWN_TITLE, target_path};
use crate::progress::DownloadBar;
use crate::tag;
use eyre::{Context, OptionExt, Result, eyre};
use std::fmt;
use std::path::{Path, PathBuf};
use yt2mp3_dl::dl::{DownloadOptions, OutputPaths, OutputTemplates, escape_template};
use yt2mp3_dl::info::{MediaInfo, PlaylistEntry, PlaylistInfo, VideoInfo};
use yt2mp3_dl::mp3::Bitrate;

/// One download: fetch `url` into `dir/<stem>.mp3`.
#[derive(Clone, Debug)]
pub struct DownloadRequest<'a> {
    pub url: &'a str,
    pub dir: &'a Path,
    pub stem: &'a str,
}

/// Media extraction backend.
pub trait Extractor {
    /// Resolve metadata without downloading. `None` when nothing could be resolved.
    fn extract(&self, url: &str) -> Result<Option<MediaInfo>>;

    /// Download and convert to MP3, returning the final path if the backend reports one.
    fn download(&self, request: &DownloadRequest<'_>, bar: DownloadBar) -> Result<Option<PathBuf>>;
}

/// yt-dlp through the embedded Python interpreter.
#[derive(Clone, Copy, Debug, Default)]
pub struct YtDlp {
    pub bitrate: Bitrate,
}

impl Extractor for YtDlp {
    fn extract(&self, url: &str) -> Result<Option<MediaInfo>> {
        yt2mp3_dl::dl::extract(url, DownloadOptions::probe())
            .wrap_err_with(|| format!("failed to extract info for {url}"))
    }

    fn download(&self, request: &DownloadRequest<'_>, bar: DownloadBar) -> Result<Option<PathBuf>> {
        let mut opts: DownloadOptions = self.bitrate.into();
        opts.paths = Some(OutputPaths::default().with_home(request.dir));
        opts.outtmpl = Some(OutputTemplates::simple(format!(
            "{}.%(ext)s",
            escape_template(request.stem)
        )));

        let hook = bar.clone();
        let result = yt2mp3_dl::dl::download(request.url, opts, move |update| hook.update(update));
        bar.abandon();

        result.wrap_err("error downloading video")
    }
}

/// Outcome counts of one `process` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub downloaded: usize,
    pub failed: usize,
    /// Unavailable or private entries
    pub skipped: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} downloaded, {} failed, {} unavailable skipped",
            self.downloaded, self.failed, self.skipped
        )
    }
}

/// Downloads into `<base>/<artist>/[<playlist_title>/]<title>.mp3`.
pub struct Downloader<E> {
    extractor: E,
    base: PathBuf,
    show_progress: bool,
}

impl<E: Extractor> Downloader<E> {
    pub fn new(extractor: E, base: PathBuf) -> Self {
        Self {
            extractor,
            base,
            show_progress: true,
        }
    }

    /// Disable terminal progress bars.
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Process one user-supplied URL.
    ///
    /// Fails only if metadata extraction fails. Playlist entry failures are
    /// reported and counted.
    pub fn process(&self, url: &str) -> Result<Summary> {
        tracing::info!(url, "extracting info");

        let info = self
            .extractor
            .extract(url)?
            .ok_or_eyre("no media info returned for this URL")?;

        match info {
            MediaInfo::Video(video) => {
                let track = Track::from_video(&video, url);
                let path = self.process_track(&track, None)?;
                println!("Successfully downloaded and processed: {}", path.display());

                Ok(Summary {
                    downloaded: 1,
                    ..Default::default()
                })
            }
            MediaInfo::Playlist(playlist) => Ok(self.process_playlist(&playlist)),
        }
    }

    fn process_playlist(&self, playlist: &PlaylistInfo) -> Summary {
        let title = playlist.title.as_deref().unwrap_or(&playlist.id);
        let total = playlist.entries.len();
        println!("Playlist: {title} ({total} entries)");

        let mut summary = Summary::default();

        for (index, entry) in playlist.entries.iter().enumerate() {
            let Some(track) = self
                .resolve_entry(entry)
                .and_then(|video| Track::from_entry(&video, playlist))
            else {
                let name = entry.title.as_deref().unwrap_or(UNKNOWN_TITLE);
                println!("[{}/{total}] Skipping unavailable entry: {name}", index + 1);
                summary.skipped += 1;
                continue;
            };

            println!("[{}/{total}] {}", index + 1, track.title);

            match self.process_track(&track, Some(title)) {
                Ok(path) => {
                    println!("Successfully downloaded and processed: {}", path.display());
                    summary.downloaded += 1;
                }
                Err(e) => {
                    tracing::warn!(url = %track.url, error = %e, "playlist entry failed");
                    eprintln!("Error processing {:?}: {e:#}", track.title);
                    summary.failed += 1;
                }
            }
        }

        println!("Playlist {title}: {summary}");
        summary
    }

    /// Resolve a flat playlist entry to its video metadata.
    ///
    /// `None` for private, removed or otherwise unresolvable entries. Nested
    /// playlists are not followed.
    fn resolve_entry(&self, entry: &PlaylistEntry) -> Option<VideoInfo> {
        let Some(url) = entry.url.as_deref() else {
            tracing::warn!(id = ?entry.id, "playlist entry has no url");
            return None;
        };

        match self.extractor.extract(url) {
            Ok(Some(MediaInfo::Video(video))) => Some(video),
            Ok(Some(MediaInfo::Playlist(_))) => {
                tracing::warn!(url, "skipping nested playlist");
                None
            }
            Ok(None) => {
                tracing::warn!(url, "playlist entry unavailable");
                None
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "playlist entry unavailable");
                None
            }
        }
    }

    /// Download, convert and tag one track. Returns the MP3 path.
    fn process_track(&self, track: &Track, playlist_title: Option<&str>) -> Result<PathBuf> {
        let expected = target_path(&self.base, track, playlist_title);
        let dir = expected
            .parent()
            .ok_or_else(|| eyre!("invalid target path: {}", expected.display()))?;

        std::fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create directory {}", dir.display()))?;

        tracing::debug!(path = %expected.display(), "resolved target path");

        let bar = if self.show_progress {
            DownloadBar::new(&track.title, track.size_hint)
        } else {
            DownloadBar::hidden()
        };

        let stem = track.file_stem();
        let request = DownloadRequest {
            url: &track.url,
            dir,
            stem: &stem,
        };

        let reported = self.extractor.download(&request, bar)?;
        let path = reported.unwrap_or(expected);

        if !path.exists() {
            return Err(eyre!(
                "audio downloaded but file not found at expected location: {}",
                path.display()
            ));
        }

        tag::embed_metadata(&path, track)
            .wrap_err_with(|| format!("failed to tag {}", path.display()))?;

        Ok(path)
    }
}
