//! Download YouTube videos and playlists as MP3 files organized by artist and album,
//! with ID3 metadata and cover art embedded.
//!
//! ## Modules
//!
//! - [`cli`] - Argument parsing and dispatch
//! - [`config`] - Persistent JSON configuration
//! - [`fetch`] - Extraction, download and tagging pipeline
//! - [`layout`] - Path sanitization and directory layout
//! - [`logging`] - Tracing subscriber and log flushing
//! - [`progress`] - Progress bars fed by yt-dlp hooks
//! - [`prompt`] - Interactive URL prompt
//! - [`tag`] - ID3 tags and cover art

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod layout;
pub mod logging;
pub mod progress;
pub mod prompt;
pub mod tag;
