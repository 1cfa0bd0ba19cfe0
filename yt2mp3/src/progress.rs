//! Terminal progress bar fed by yt-dlp progress hooks.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use yt2mp3_dl::info::{ProgressStatus, ProgressUpdate};

const BAR_STYLE: &str = "{spinner:.blue} {prefix:.cyan.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const SPINNER_STYLE: &str = "{spinner:.blue} {prefix:.cyan.bold} [{elapsed_precise}] {bytes} ({bytes_per_sec})";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const BAR_CHARS: &str = "█▓▒░  ";

/// Longest prefix shown before the bar.
const MAX_PREFIX: usize = 32;

static BAR_TEMPLATE: LazyLock<Option<ProgressStyle>> = LazyLock::new(|| {
    ProgressStyle::with_template(BAR_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK).progress_chars(BAR_CHARS))
});

static SPINNER_TEMPLATE: LazyLock<Option<ProgressStyle>> = LazyLock::new(|| {
    ProgressStyle::with_template(SPINNER_STYLE)
        .ok()
        .map(|style| style.tick_chars(TICK))
});

/// Byte progress of one download.
///
/// Cheap to clone; clones drive the same bar, so one can be moved into the
/// extractor's progress hook.
#[derive(Clone, Debug)]
pub struct DownloadBar {
    pb: ProgressBar,
}

impl DownloadBar {
    /// Bar with a known total when `size_hint` is non-zero, spinner otherwise.
    pub fn new(title: &str, size_hint: Option<u64>) -> Self {
        let pb = match size_hint.filter(|&len| len > 0) {
            Some(len) => styled(ProgressBar::new(len), &BAR_TEMPLATE),
            None => styled(ProgressBar::no_length(), &SPINNER_TEMPLATE),
        };

        pb.set_prefix(truncate(title, MAX_PREFIX));
        Self { pb }
    }

    /// Bar that draws nothing.
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn update(&self, update: &ProgressUpdate) {
        match update.status() {
            ProgressStatus::Downloading => {
                if let Some(total) = update.total_bytes.filter(|&t| t > 0)
                    && self.pb.length() != Some(total)
                {
                    if self.pb.length().is_none() {
                        set_style(&self.pb, &BAR_TEMPLATE);
                    }
                    self.pb.set_length(total);
                }

                if let Some(done) = update.downloaded_bytes {
                    self.pb.set_position(done);
                }
            }
            ProgressStatus::Finished => {
                if let Some(total) = update.total_bytes.or(update.downloaded_bytes) {
                    self.pb.set_length(total);
                    self.pb.set_position(total);
                }
                self.pb.finish();
                self.pb.println("Done downloading, now converting ...");
            }
            ProgressStatus::Error => self.pb.abandon(),
            ProgressStatus::Other => {}
        }
    }

    /// Clear the bar if the download ended without a `finished` event.
    pub fn abandon(&self) {
        if !self.pb.is_finished() {
            self.pb.abandon();
        }
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.pb.position()
    }

    #[cfg(test)]
    fn length(&self) -> Option<u64> {
        self.pb.length()
    }

    #[cfg(test)]
    fn is_finished(&self) -> bool {
        self.pb.is_finished()
    }
}

fn styled(pb: ProgressBar, template: &LazyLock<Option<ProgressStyle>>) -> ProgressBar {
    set_style(&pb, template);
    pb
}

fn set_style(pb: &ProgressBar, template: &LazyLock<Option<ProgressStyle>>) {
    if let Some(style) = template.as_ref() {
        pb.set_style(style.clone());
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}…", &text[..end]),
        None => text.to_string(),
    }
}
