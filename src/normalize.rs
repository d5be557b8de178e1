//! `fix-tags`: rewrite ID3 artist/title from the filename convention.
//!
//! Files must be named `Artist - Title.mp3` — the first `" - "` splits the
//! two halves, so dashes inside the title survive (`Queen - Now - I'm
//! Here.mp3` titles as `Now - I'm Here`). A file that does not match the
//! convention aborts the entire run with a diagnostic naming it, as does a
//! tag-write failure: a half-normalized library is worse than a loudly
//! failed run.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::catalog::is_audio_file;
use crate::tags::{TagError, TagStore, TrackTags};

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("filename does not match 'Artist - Title.mp3': {0}")]
    BadFilename(PathBuf),
    #[error("error resetting tags for {path}: {source}")]
    TagWrite { path: PathBuf, source: TagError },
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub path: PathBuf,
    /// Drop all existing frames before setting artist/title.
    pub clean: bool,
    pub debug: bool,
}

/// Split a filename stem into `(artist, title)` at the first `" - "`.
///
/// Returns `None` when the separator is absent or either half is empty.
pub fn parse_track_filename(stem: &str) -> Option<(String, String)> {
    let (artist, title) = stem.split_once(" - ")?;
    if artist.is_empty() || title.is_empty() {
        return None;
    }
    Some((artist.to_string(), title.to_string()))
}

/// Walk `opts.path` and normalize every MP3. Returns the number of files
/// rewritten; the first malformed filename, unreadable entry, or write
/// failure is fatal. The generator's discovery walk is best-effort, but a
/// normalizer that cannot see part of the library must not pretend it
/// finished.
pub fn run(opts: &NormalizeOptions, store: &dyn TagStore) -> Result<usize, NormalizeError> {
    let mut processed = 0;

    for entry in WalkDir::new(&opts.path) {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_audio_file(path) {
            continue;
        }

        println!("Processing {}...", path.display());
        normalize_file(path, opts, store)?;
        processed += 1;
    }

    Ok(processed)
}

fn normalize_file(
    path: &Path,
    opts: &NormalizeOptions,
    store: &dyn TagStore,
) -> Result<(), NormalizeError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (artist, title) = parse_track_filename(&stem)
        .ok_or_else(|| NormalizeError::BadFilename(path.to_path_buf()))?;

    if opts.debug {
        if opts.clean {
            println!("\tClearing existing tags");
        }
        println!("\tSaving...");
    }

    store
        .write(path, &TrackTags { artist, title }, opts.clean)
        .map_err(|source| NormalizeError::TagWrite {
            path: path.to_path_buf(),
            source,
        })
}
