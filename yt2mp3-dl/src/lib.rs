//! Type-safe Rust bindings to the [yt-dlp](https://github.com/yt-dlp/yt-dlp) Python library,
//! focused on MP3 extraction.
//!
//! ## Modules
//!
//! - [`dl`] - Core yt-dlp API wrappers
//! - [`info`] - Video, playlist and progress metadata
//! - [`mp3`] - MP3 presets
//!
//! ## Quick Start
//!
//! **Probe, then download** (192 kbps MP3):
//! ```no_run
//! use yt2mp3_dl::dl::{DownloadOptions, download, extract};
//! use yt2mp3_dl::info::MediaInfo;
//! use yt2mp3_dl::mp3::Bitrate;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "https://youtube.com/watch?v=example";
//!
//! match extract(url, DownloadOptions::probe())? {
//!     Some(MediaInfo::Video(_)) => {
//!         download(url, Bitrate::default().into(), |p| println!("{:?}", p.downloaded_bytes))?;
//!     }
//!     Some(MediaInfo::Playlist(playlist)) => println!("{} entries", playlist.entries.len()),
//!     None => println!("nothing to download"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! **Custom output location**:
//! ```no_run
//! use yt2mp3_dl::dl::{DownloadOptions, OutputPaths, OutputTemplates, download};
//! use yt2mp3_dl::mp3::Bitrate;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut opts: DownloadOptions = Bitrate::Kbps320.into();
//! opts.paths = Some(OutputPaths::default().with_home(Path::new("/music/someone")));
//! opts.outtmpl = Some(OutputTemplates::simple("%(title)s.%(ext)s".to_string()));
//!
//! download("https://youtube.com/watch?v=example", opts, |_| {})?;
//! # Ok(())
//! # }
//! ```

pub mod dl;
pub mod info;
pub mod mp3;
