//! Shared test utilities for the songlist test suite.
//!
//! Provides a catalog builder, an in-memory tag store, and a recording
//! render backend so pipeline tests never need real MP3s or PDF parsing.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, Entry};
use crate::render::{DrawOp, RenderBackend, RenderError};
use crate::tags::{TagError, TagStore, TrackTags};

/// Build a catalog directly from `(artist, title)` pairs. Paths are
/// synthesized; no filesystem involved.
pub fn catalog_of(songs: &[(&str, &str)]) -> Catalog {
    let mut catalog = Catalog::new();
    for (i, (artist, title)) in songs.iter().enumerate() {
        catalog.add(Entry {
            artist: artist.to_string(),
            title: title.to_string(),
            path: PathBuf::from(format!("song-{i}.mp3")),
        });
    }
    catalog
}

/// All text op payloads on a page, in draw order.
pub fn op_texts(ops: &[DrawOp]) -> Vec<&str> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// In-memory [`TagStore`]: knows the tags of a fixed set of paths, errors
/// on everything else (standing in for an unreadable file).
pub struct FakeStore {
    tracks: BTreeMap<PathBuf, TrackTags>,
}

impl FakeStore {
    pub fn new(tracks: &[(&Path, &str, &str)]) -> Self {
        FakeStore {
            tracks: tracks
                .iter()
                .map(|(path, artist, title)| {
                    (
                        path.to_path_buf(),
                        TrackTags {
                            artist: artist.to_string(),
                            title: title.to_string(),
                        },
                    )
                })
                .collect(),
        }
    }
}

impl TagStore for FakeStore {
    fn read(&self, path: &Path) -> Result<TrackTags, TagError> {
        self.tracks
            .get(path)
            .cloned()
            .ok_or_else(|| TagError::MissingField {
                field: "artist",
                path: path.to_path_buf(),
            })
    }

    fn write(&self, _path: &Path, _tags: &TrackTags, _clean: bool) -> Result<(), TagError> {
        Ok(())
    }
}

/// Render backend that records every page's ops instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub pages: Vec<Vec<DrawOp>>,
}

impl RenderBackend for RecordingBackend {
    fn add_page(&mut self, ops: &[DrawOp]) -> Result<(), RenderError> {
        self.pages.push(ops.to_vec());
        Ok(())
    }
}
