//! CLI argument definitions using clap.

use crate::config::Config;
use crate::fetch::{Downloader, Extractor, YtDlp};
use crate::prompt::run_prompt;
use clap::Parser;
use eyre::{Context, Result};
use std::path::PathBuf;
use yt2mp3_dl::mp3::Bitrate;

#[derive(Debug, Parser)]
#[command(name = "yt2mp3")]
#[command(about = "Download YouTube videos and playlists as tagged MP3 files")]
#[command(version)]
pub struct Cli {
    /// URLs to download (default: prompt for links interactively)
    pub urls: Vec<String>,

    /// Base download directory, saved to the config file
    #[arg(short, long)]
    pub folder: Option<PathBuf>,

    /// Config file path (default: platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// MP3 bitrate in kbps: 128, 192, 256 or 320
    #[arg(short, long, default_value_t = Bitrate::default())]
    pub quality: Bitrate,
}

/// Execute CLI command - separated for testing.
pub fn run_cli(cli: Cli) -> Result<()> {
    let extractor = YtDlp {
        bitrate: cli.quality,
    };
    run_cli_with(cli, extractor)
}

/// Execute CLI command against any extraction backend.
pub fn run_cli_with<E: Extractor>(cli: Cli, extractor: E) -> Result<()> {
    tracing::debug!(?cli, "parsed arguments");

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    let config = Config::resolve(&config_path, cli.folder.as_deref())
        .wrap_err("failed to load configuration")?;

    tracing::info!(
        base = %config.base_download_location.display(),
        config = %config_path.display(),
        "configuration loaded"
    );

    let downloader = Downloader::new(extractor, config.base_download_location);

    if cli.urls.is_empty() {
        let stdin = std::io::stdin();
        return run_prompt(stdin.lock(), std::io::stdout(), |url| {
            downloader.process(url).map(|_| ())
        });
    }

    for url in &cli.urls {
        if let Err(e) = downloader.process(url) {
            tracing::error!(url, error = %e, "failed to process url");
            eprintln!("Error: {e:#}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parses_no_arguments() {
        let cli = Cli::parse_from(["yt2mp3"]);

        assert!(matches!(
            &cli,
            Cli {
                urls,
                folder: None,
                config: None,
                quality: Bitrate::Kbps192,
            } if urls.is_empty()
        ));
    }

    #[test]
    fn parses_short_folder() {
        let cli = Cli::parse_from(["yt2mp3", "-f", "/music/yt"]);

        assert!(cli.folder.as_deref().is_some_and(|p| p == Path::new("/music/yt")));
    }

    #[test]
    fn parses_long_folder_and_config() {
        let cli = Cli::parse_from([
            "yt2mp3",
            "--folder",
            "/music/yt",
            "--config",
            "/tmp/yt2mp3.json",
        ]);

        assert!(cli.folder.as_deref().is_some_and(|p| p == Path::new("/music/yt")));
        assert!(cli.config.as_deref().is_some_and(|p| p == Path::new("/tmp/yt2mp3.json")));
    }

    #[test]
    fn parses_urls_and_quality() {
        let cli = Cli::parse_from([
            "yt2mp3",
            "-q",
            "320k",
            "https://youtu.be/a",
            "https://youtu.be/b",
        ]);

        assert_eq!(cli.quality, Bitrate::Kbps320);
        assert_eq!(cli.urls, ["https://youtu.be/a", "https://youtu.be/b"]);
    }

    #[test]
    fn rejects_unknown_quality() {
        assert!(Cli::try_parse_from(["yt2mp3", "-q", "64"]).is_err());
    }
}
