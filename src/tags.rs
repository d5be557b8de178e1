//! ID3 metadata store: per-file artist/title reads and writes.
//!
//! The rest of the crate never touches the `id3` crate directly — it goes
//! through the [`TagStore`] trait, which models exactly the two operations
//! the pipeline needs: read `{artist, title}` from a file, and write
//! `{artist, title}` back (optionally clearing every pre-existing frame
//! first). Tests substitute an in-memory store; production uses [`Id3Store`].
//!
//! Writes emit ID3v2.4 only. The original tooling this replaces also wrote a
//! v1 tag for ancient player compatibility; nothing we target still needs it.

use std::path::{Path, PathBuf};

use id3::{Tag, TagLike, Version};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagError {
    #[error("ID3 error: {0}")]
    Id3(#[from] id3::Error),
    #[error("missing or empty {field} tag: {path}")]
    MissingField { field: &'static str, path: PathBuf },
}

/// Artist/title pair for one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags {
    pub artist: String,
    pub title: String,
}

/// Capability seam for tag I/O.
pub trait TagStore {
    /// Read artist and title from `path`. Both must be present and
    /// non-empty; a tag with either missing is an error, not a blank entry.
    fn read(&self, path: &Path) -> Result<TrackTags, TagError>;

    /// Persist artist and title to `path`. With `clean`, all existing
    /// frames are dropped first; otherwise they are preserved.
    fn write(&self, path: &Path, tags: &TrackTags, clean: bool) -> Result<(), TagError>;
}

/// The real store, backed by the `id3` crate.
pub struct Id3Store;

impl TagStore for Id3Store {
    fn read(&self, path: &Path) -> Result<TrackTags, TagError> {
        let tag = Tag::read_from_path(path)?;
        let artist = required_field(tag.artist(), "artist", path)?;
        let title = required_field(tag.title(), "title", path)?;
        Ok(TrackTags { artist, title })
    }

    fn write(&self, path: &Path, tags: &TrackTags, clean: bool) -> Result<(), TagError> {
        // `clean` starts from a fresh tag, discarding every existing frame.
        // Otherwise keep whatever is there and only replace artist/title.
        let mut tag = if clean {
            Tag::new()
        } else {
            Tag::read_from_path(path).unwrap_or_else(|_| Tag::new())
        };

        tag.set_artist(&tags.artist);
        tag.set_title(&tags.title);

        tag.write_to_path(path, Version::Id3v24)?;
        Ok(())
    }
}

fn required_field(
    value: Option<&str>,
    field: &'static str,
    path: &Path,
) -> Result<String, TagError> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .ok_or_else(|| TagError::MissingField {
            field,
            path: path.to_path_buf(),
        })
}
