//! MP3 discovery and the in-memory library.
//!
//! Walks a directory tree, reads artist/title tags from every `.mp3` found,
//! and builds the [`Catalog`]: the flat entry list plus the set of distinct
//! artists. Discovery is best-effort — a file whose tags cannot be read (or
//! whose artist/title is empty) is skipped with a diagnostic and the walk
//! continues. An empty catalog is a valid terminal state; the caller decides
//! whether to short-circuit the rest of the pipeline.
//!
//! Entries are kept in discovery order. That order is never user-visible:
//! every downstream consumer re-sorts by artist and title.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::section::artist_sort_key;
use crate::tags::TagStore;

pub const AUDIO_EXTENSIONS: &[&str] = &["mp3"];

/// One catalog record: where the song lives and how it is labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub artist: String,
    pub title: String,
    pub path: PathBuf,
}

/// The library built by one discovery run. Read-only after construction.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<Entry>,
    artists: BTreeSet<String>,
    skipped: usize,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Ingest one entry. Entries with an empty artist or title are rejected
    /// here — downstream stages rely on never seeing one.
    pub fn add(&mut self, entry: Entry) -> bool {
        if entry.artist.trim().is_empty() || entry.title.trim().is_empty() {
            return false;
        }
        self.artists.insert(entry.artist.clone());
        self.entries.push(entry);
        true
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Count a file seen during the walk whose tags could not be used.
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn song_count(&self) -> usize {
        self.entries.len()
    }

    pub fn artist_count(&self) -> usize {
        self.artists.len()
    }

    /// Zero entries (equivalently, zero artists) — nothing to render.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct artists, ordered section-first so bucket order and sort
    /// order agree (see [`crate::section`]).
    pub fn sorted_artists(&self) -> Vec<&str> {
        let mut artists: Vec<&str> = self.artists.iter().map(String::as_str).collect();
        artists.sort_by(|a, b| artist_sort_key(a).cmp(&artist_sort_key(b)));
        artists
    }

    /// All titles recorded for one artist, ascending.
    pub fn titles_for(&self, artist: &str) -> Vec<&str> {
        let mut titles: Vec<&str> = self
            .entries
            .iter()
            .filter(|e| e.artist == artist)
            .map(|e| e.title.as_str())
            .collect();
        titles.sort_unstable();
        titles
    }
}

/// True for paths carrying one of the [`AUDIO_EXTENSIONS`].
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.iter().any(|a| e.eq_ignore_ascii_case(a)))
        .unwrap_or(false)
}

/// Walk `root` and build the catalog from every readable MP3.
///
/// Per-file failures (unreadable tags, missing artist/title, unreadable
/// directory entries) are skipped, counted, and reported — never fatal.
pub fn discover(root: &Path, store: &dyn TagStore, debug: bool) -> Catalog {
    let mut catalog = Catalog::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                println!("Skipping unreadable entry: {err}");
                catalog.record_skip();
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_audio_file(path) {
            continue;
        }

        if debug {
            println!("Processing file '{}'...", path.display());
        }

        match store.read(path) {
            Ok(tags) => {
                let accepted = catalog.add(Entry {
                    artist: tags.artist,
                    title: tags.title,
                    path: path.to_path_buf(),
                });
                if !accepted {
                    println!("Skipping {}: empty artist or title", path.display());
                    catalog.record_skip();
                }
            }
            Err(err) => {
                println!("Skipping {}: {err}", path.display());
                catalog.record_skip();
            }
        }
    }

    catalog
}
