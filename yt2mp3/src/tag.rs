//! ID3 tagging: artist, album, title and cover art.

use crate::error::TagError;
use crate::layout::Track;
use id3::frame::{Picture, PictureType};
use id3::{ErrorKind, Tag, TagLike, Version};
use std::path::Path;

const COVER_DESCRIPTION: &str = "Cover";

/// Cover image ready to embed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cover {
    pub mime_type: &'static str,
    pub data: Vec<u8>,
}

/// Text frames written to every file.
#[derive(Clone, Copy, Debug)]
pub struct TrackTags<'a> {
    pub artist: &'a str,
    pub album: &'a str,
    pub title: &'a str,
}

impl<'a> From<&'a Track> for TrackTags<'a> {
    fn from(track: &'a Track) -> Self {
        Self {
            artist: &track.artist,
            album: &track.album,
            title: &track.title,
        }
    }
}

/// `image/png` for URLs ending in `.png`, `image/jpeg` for everything else.
pub fn mime_type(url: &str) -> &'static str {
    if url.to_lowercase().ends_with(".png") {
        "image/png"
    } else {
        "image/jpeg"
    }
}

/// Download the thumbnail at `url`.
pub fn fetch_cover(url: &str) -> Result<Cover, TagError> {
    tracing::debug!(url, "fetching thumbnail");

    let data = ureq::get(url).call()?.body_mut().read_to_vec()?;

    Ok(Cover {
        mime_type: mime_type(url),
        data,
    })
}

/// Write `tags` (and `cover`, replacing any existing front cover) into the file at `path`.
pub fn write_tags(path: &Path, tags: &TrackTags<'_>, cover: Option<Cover>) -> Result<(), TagError> {
    let mut tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(id3::Error {
            kind: ErrorKind::NoTag,
            ..
        }) => Tag::new(),
        Err(e) => return Err(e.into()),
    };

    tag.set_artist(tags.artist);
    tag.set_album(tags.album);
    tag.set_title(tags.title);

    if let Some(cover) = cover {
        tag.remove_picture_by_type(PictureType::CoverFront);
        tag.add_frame(Picture {
            mime_type: cover.mime_type.to_string(),
            picture_type: PictureType::CoverFront,
            description: COVER_DESCRIPTION.to_string(),
            data: cover.data,
        });
    }

    tag.write_to_path(path, Version::Id3v24)?;
    Ok(())
}

/// Tag a downloaded file, embedding the thumbnail when one can be fetched.
///
/// A failed thumbnail fetch is reported and tagging continues without a cover.
pub fn embed_metadata(path: &Path, track: &Track) -> Result<(), TagError> {
    let cover = match track.thumbnail.as_deref() {
        Some(url) => match fetch_cover(url) {
            Ok(cover) => Some(cover),
            Err(e) => {
                tracing::warn!(url, error = %e, "thumbnail fetch failed");
                println!("Error downloading thumbnail: {e}");
                None
            }
        },
        None => {
            println!("No thumbnail URL found for this video.");
            None
        }
    };

    let has_cover = cover.is_some();
    write_tags(path, &TrackTags::from(track), cover)?;

    if has_cover {
        println!("Thumbnail embedded successfully.");
    }
    Ok(())
}
