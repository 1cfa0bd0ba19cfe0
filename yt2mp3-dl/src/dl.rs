//! yt-dlp Python API wrappers.
//!
//! Type-safe bindings to [yt-dlp](https://github.com/yt-dlp/yt-dlp) `YoutubeDL` parameters.
//!
//! ```no_run
//! use yt2mp3_dl::dl::{DownloadOptions, download, extract};
//! use yt2mp3_dl::{info::MediaInfo, mp3::Bitrate};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "https://youtube.com/watch?v=example";
//! if let Some(MediaInfo::Video(info)) = extract(url, DownloadOptions::probe())? {
//!     println!("Downloading: {:?}", info.title);
//!     download(url, Bitrate::default().into(), |_| {})?;
//! }
//! # Ok(())
//! # }
//! ```

use crate::info::{MediaInfo, ProgressUpdate};
use pyo3::ffi::c_str;
use pyo3::prelude::*;
use pyo3::types::{PyCFunction, PyDict, PyTuple};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Filename templates using `%(field)s` syntax. Key `default` required.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct OutputTemplates(pub Option<HashMap<String, String>>);

impl OutputTemplates {
    /// Create with a single default template.
    pub fn simple(default: String) -> Self {
        Self(Some(HashMap::from([("default".to_string(), default)])))
    }
}

/// Download directories: `home`, `temp`, optional type-specific paths.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct OutputPaths(pub Option<HashMap<String, String>>);

impl OutputPaths {
    /// Create with home and temp directories.
    pub fn simple(home: &Path, temp: &Path) -> Self {
        Self::default().with_home(home).with_temp(temp)
    }

    pub fn with_home(self, home: &Path) -> Self {
        self.with_key("home".to_string(), home)
    }

    pub fn with_temp(self, temp: &Path) -> Self {
        self.with_key("temp".to_string(), temp)
    }

    fn with_key(self, key: String, value: &Path) -> Self {
        let mut inner = self.0.unwrap_or_default();
        inner.insert(key, value.to_string_lossy().to_string());
        Self(Some(inner))
    }
}

/// Post-download operation: `key` (e.g., `"FFmpegExtractAudio"`), optional codec and quality.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct PostProcessor {
    pub key: String,
    pub preferredcodec: Option<String>,
    pub preferredquality: Option<String>,
}

/// yt-dlp configuration passed to `YoutubeDL(params)`.
///
/// `None` fields are dropped before reaching yt-dlp, so its own defaults apply.
#[derive(Clone, Debug, Default, IntoPyObject)]
pub struct DownloadOptions {
    pub format: Option<String>,
    pub paths: Option<OutputPaths>,
    pub outtmpl: Option<OutputTemplates>,
    pub postprocessors: Option<Vec<PostProcessor>>,
    pub quiet: Option<bool>,
    pub no_warnings: Option<bool>,
    pub noprogress: Option<bool>,
    pub noplaylist: Option<bool>,
    pub ignoreerrors: Option<bool>,
    /// `"in_playlist"` lists playlist entries without resolving them
    pub extract_flat: Option<String>,
}

impl DownloadOptions {
    /// Metadata-only options.
    ///
    /// Playlists are listed flat, so every entry comes back, unavailable ones
    /// included. An unavailable video resolves to `None` instead of failing.
    pub fn probe() -> Self {
        Self {
            quiet: Some(true),
            no_warnings: Some(true),
            ignoreerrors: Some(true),
            extract_flat: Some("in_playlist".to_string()),
            ..Default::default()
        }
    }
}

/// Escape a literal so yt-dlp does not expand it as a template field.
pub fn escape_template(literal: &str) -> String {
    literal.replace('%', "%%")
}

fn load_module(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    PyModule::from_code(py, c_str!(include_str!("./dl.py")), c"dl.py", c"dl")
}

/// Python callable forwarding yt-dlp logger output to `tracing`.
fn log_sink(py: Python<'_>) -> PyResult<Bound<'_, PyCFunction>> {
    PyCFunction::new_closure(
        py,
        None,
        None,
        |args: &Bound<'_, PyTuple>, _kwargs: Option<&Bound<'_, PyDict>>| -> PyResult<()> {
            let (level, msg): (String, String) = args.extract()?;

            match level.as_str() {
                "error" => tracing::error!(target: "yt_dlp", "{msg}"),
                "warning" => tracing::warn!(target: "yt_dlp", "{msg}"),
                "info" => tracing::info!(target: "yt_dlp", "{msg}"),
                _ => tracing::debug!(target: "yt_dlp", "{msg}"),
            }

            Ok(())
        },
    )
}

/// Resolve metadata without downloading.
///
/// Returns `None` when yt-dlp yields no info (e.g., the video is unavailable
/// and `ignoreerrors` is set). Playlist entries are returned as listed when
/// `extract_flat` is set.
pub fn extract(url: &str, opts: DownloadOptions) -> PyResult<Option<MediaInfo>> {
    tracing::debug!(url, ?opts, "extracting info");

    Python::attach(|py| {
        let module = load_module(py)?;

        let py_params = opts.into_pyobject(py)?;

        let info = module
            .getattr("extract")?
            .call1((url, py_params, log_sink(py)?))?;

        if info.is_none() {
            return Ok(None);
        }

        MediaInfo::from_py(&info).map(Some)
    })
}

/// Download a single URL, reporting progress through `on_progress`.
///
/// Returns the final file path reported by yt-dlp after all post-processors ran.
pub fn download<F>(url: &str, opts: DownloadOptions, on_progress: F) -> PyResult<Option<PathBuf>>
where
    F: Fn(&ProgressUpdate) + Send + 'static,
{
    tracing::debug!(url, ?opts, "downloading");

    Python::attach(|py| {
        let module = load_module(py)?;

        let py_params = opts.into_pyobject(py)?;

        let hook = PyCFunction::new_closure(
            py,
            None,
            None,
            move |args: &Bound<'_, PyTuple>, _kwargs: Option<&Bound<'_, PyDict>>| -> PyResult<()> {
                let update: ProgressUpdate = args.get_item(0)?.extract()?;
                on_progress(&update);
                Ok(())
            },
        )?;

        let path = module
            .getattr("download")?
            .call1((url, py_params, log_sink(py)?, hook))?;

        Ok(path.extract()?)
    })
}
