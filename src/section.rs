//! Alphabetical sectioning of the artist index.
//!
//! Artists are partitioned into sections by first character: ASCII letters
//! map to their uppercase form, everything else (digits, punctuation,
//! non-ASCII) collapses into the `'#'` bucket. Sort order and bucket rule
//! must agree or a section could appear twice in the index, so artists are
//! ordered by the composite key [`artist_sort_key`]: section character
//! first, then the raw artist string. `'#'` precedes `'A'` in ASCII, which
//! puts the `'#'` section at the front and makes every section one
//! contiguous run of the sorted artist list.

use std::fmt;

/// One alphabetical bucket: `'A'..='Z'`, or `'#'` for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Section(char);

impl Section {
    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bucket an artist by its first character.
///
/// Total over all strings: an empty artist buckets to `'#'` (the catalog
/// rejects empty artists at ingestion, but the rule stays defined).
pub fn section_of(artist: &str) -> Section {
    match artist.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => Section(c.to_ascii_uppercase()),
        _ => Section('#'),
    }
}

/// Sort key that keeps artist order aligned with the bucket rule.
pub fn artist_sort_key(artist: &str) -> (char, &str) {
    (section_of(artist).as_char(), artist)
}

/// Ordered sequence of distinct sections, in the order first encountered
/// while walking the artist set in sorted order.
///
/// Built once after the full artist set is known; the pagination engine
/// advances through it one entry per section break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionIndex {
    sections: Vec<Section>,
}

impl SectionIndex {
    /// Single linear pass over artists already sorted by [`artist_sort_key`].
    /// Appends a section whenever it differs from the last appended value.
    pub fn build<'a, I>(artists_sorted: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sections: Vec<Section> = Vec::new();
        for artist in artists_sorted {
            let section = section_of(artist);
            if sections.last() != Some(&section) {
                sections.push(section);
            }
        }
        SectionIndex { sections }
    }

    pub fn first(&self) -> Option<Section> {
        self.sections.first().copied()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
