//! # Songlist
//!
//! Finds MP3 files within a filesystem path and generates a PDF song list
//! grouped by artist. Your filesystem is the data source: files follow the
//! `Artist - Title.mp3` naming convention, and embedded ID3 tags carry the
//! artist/title metadata the catalog is built from.
//!
//! # Architecture: Catalog → Sections → Layout → Pages
//!
//! The generator is a pipeline of small, independently testable stages:
//!
//! ```text
//! 1. Catalog   walk + ID3 reads  →  library + artist set
//! 2. Sections  sorted artists    →  ordered section index ('#', 'A'..'Z')
//! 3. Layout    artists           →  block stream (groups + section breaks)
//! 4. Paginate  block stream      →  placed pages (two passes)
//! 5. Render    placed pages      →  PDF artifact
//! ```
//!
//! The interesting part is pagination: footers carry a `Page X of N` counter,
//! and `N` is only known once every block has been placed. So layout runs in
//! two passes — pass 1 streams blocks into column frames and logs a
//! [`paginate::PageState`] snapshot at every page cut, pass 2 replays the log
//! (now knowing the total) and paints each page's header/footer chrome before
//! committing it to the backend.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`tags`] | ID3 metadata store — read/write artist and title per file |
//! | [`catalog`] | Recursive MP3 discovery and the in-memory library |
//! | [`section`] | Alphabetical bucketing and the ordered section index |
//! | [`layout`] | Turns the catalog into a stream of layout blocks |
//! | [`template`] | The two alternating page templates and frame geometry |
//! | [`paginate`] | Two-pass pagination engine and page chrome |
//! | [`render`] | Backend seam: draw ops, text metrics, PDF output |
//! | [`normalize`] | `fix-tags` — rewrites tags from filename conventions |
//! | [`generate`] | Generator orchestration: catalog in, PDF out |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Section breaks are data, not hooks
//!
//! Section transitions travel through the block stream as an explicit
//! [`layout::LayoutBlock::SectionBreak`] variant. The pagination engine never
//! inspects a group to decide whether a new section started — the stream
//! builder already decided, and the engine just reacts. One producer, one
//! consumer, no ambient cursors.
//!
//! ## Backend-agnostic pagination
//!
//! The engine emits plain [`render::DrawOp`] values (text at a position, a
//! rule between two points) and hands finished pages to anything implementing
//! [`render::RenderBackend`]. The PDF backend is one implementer; tests use a
//! recording backend and assert on ops instead of parsing PDF bytes.
//!
//! ## Book-style duplex chrome
//!
//! The two page templates mirror their column margins (wide inner edge), and
//! the footer mirrors its alignment by page parity, so a double-sided
//! printout binds like a book. Template alternation is driven by section
//! boundaries, not page count — a section that overflows across three pages
//! keeps its template until the next section starts.

pub mod catalog;
pub mod generate;
pub mod layout;
pub mod normalize;
pub mod output;
pub mod paginate;
pub mod render;
pub mod section;
pub mod tags;
pub mod template;

#[cfg(test)]
pub(crate) mod test_helpers;
