//! Builds the layout block stream the pagination engine consumes.
//!
//! One [`LayoutBlock::ArtistGroup`] per distinct artist, in sorted order,
//! with an explicit [`LayoutBlock::SectionBreak`] inserted wherever the
//! section changes. The break before the very first artist is suppressed:
//! the pagination engine pre-initializes its current section to the first
//! index entry, so a leading break would double-advance the template.

use crate::catalog::Catalog;
use crate::section::{section_of, Section};

/// A unit of content or a structural marker in the layout stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutBlock {
    /// The section changed; carries the section now becoming current.
    SectionBreak(Section),
    /// One artist and all their titles, titles sorted ascending.
    ArtistGroup { artist: String, titles: Vec<String> },
}

/// Walk artists in sorted order and emit the block stream.
pub fn build_stream(catalog: &Catalog) -> Vec<LayoutBlock> {
    let mut blocks = Vec::new();
    let mut last_section: Option<Section> = None;

    for artist in catalog.sorted_artists() {
        let section = section_of(artist);
        if last_section.is_some() && last_section != Some(section) {
            blocks.push(LayoutBlock::SectionBreak(section));
        }
        last_section = Some(section);

        blocks.push(LayoutBlock::ArtistGroup {
            artist: artist.to_string(),
            titles: catalog
                .titles_for(artist)
                .into_iter()
                .map(String::from)
                .collect(),
        });
    }

    blocks
}
