//! MP3 presets: best available audio transcoded by FFmpeg.
//!
//! **Bitrates:** 128, 192 (default), 256 and 320 kbps
//!
//! ```no_run
//! use yt2mp3_dl::{dl::download, mp3::Bitrate};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! download("https://youtube.com/watch?v=example", Bitrate::Kbps320.into(), |_| {})?;
//! # Ok(())
//! # }
//! ```

use crate::dl::{DownloadOptions, PostProcessor};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Extension of files produced by the MP3 presets.
pub const MP3_EXT: &str = "mp3";

/// Target MP3 bitrate passed to FFmpeg.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Bitrate {
    Kbps128,
    #[default]
    Kbps192,
    Kbps256,
    Kbps320,
}

impl Bitrate {
    pub fn kbps(self) -> u16 {
        match self {
            Self::Kbps128 => 128,
            Self::Kbps192 => 192,
            Self::Kbps256 => 256,
            Self::Kbps320 => 320,
        }
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kbps())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported bitrate {0:?} (expected one of 128, 192, 256, 320)")]
pub struct ParseBitrateError(String);

impl FromStr for Bitrate {
    type Err = ParseBitrateError;

    /// Accepts `192` as well as `192k`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_end_matches(['k', 'K']);

        match digits {
            "128" => Ok(Self::Kbps128),
            "192" => Ok(Self::Kbps192),
            "256" => Ok(Self::Kbps256),
            "320" => Ok(Self::Kbps320),
            _ => Err(ParseBitrateError(s.to_string())),
        }
    }
}

impl From<Bitrate> for PostProcessor {
    /// `FFmpegExtractAudio` with codec `mp3` at the given bitrate
    fn from(bitrate: Bitrate) -> Self {
        Self {
            key: "FFmpegExtractAudio".to_string(),
            preferredcodec: Some(MP3_EXT.to_string()),
            preferredquality: Some(bitrate.to_string()),
        }
    }
}

impl From<Bitrate> for DownloadOptions {
    /// MP3 preset: best audio → MP3, one item per call, yt-dlp output silenced
    fn from(bitrate: Bitrate) -> Self {
        Self {
            format: Some("bestaudio/best".to_string()),
            paths: None,
            outtmpl: None,
            postprocessors: Some(vec![bitrate.into()]),
            quiet: Some(true),
            no_warnings: Some(true),
            noprogress: Some(true),
            noplaylist: Some(true),
            ignoreerrors: None,
            extract_flat: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitrate_to_postprocessor() {
        let processor: PostProcessor = Bitrate::Kbps192.into();

        assert_eq!(processor.key, "FFmpegExtractAudio");
        assert_eq!(processor.preferredcodec.as_deref(), Some("mp3"));
        assert_eq!(processor.preferredquality.as_deref(), Some("192"));
    }

    #[test]
    fn test_bitrate_to_download_options() {
        let opts: DownloadOptions = Bitrate::Kbps320.into();

        assert!(matches!(
            &opts,
            DownloadOptions {
                format: Some(format),
                paths: None,
                outtmpl: None,
                postprocessors: Some(_),
                quiet: Some(true),
                no_warnings: Some(true),
                noprogress: Some(true),
                noplaylist: Some(true),
                ignoreerrors: None,
                extract_flat: None,
            } if format == "bestaudio/best"
        ));

        let processors = opts.postprocessors.unwrap();
        assert_eq!(processors.len(), 1);
        assert_eq!(processors[0].preferredquality.as_deref(), Some("320"));
    }

    #[test]
    fn test_bitrate_default() {
        assert_eq!(Bitrate::default(), Bitrate::Kbps192);
        assert_eq!(Bitrate::default().to_string(), "192");
    }

    #[test]
    fn test_bitrate_parse() {
        assert_eq!("128".parse::<Bitrate>(), Ok(Bitrate::Kbps128));
        assert_eq!("256k".parse::<Bitrate>(), Ok(Bitrate::Kbps256));
        assert_eq!(" 320K ".parse::<Bitrate>(), Ok(Bitrate::Kbps320));
        assert!("96".parse::<Bitrate>().is_err());
        assert!("".parse::<Bitrate>().is_err());
    }
}
