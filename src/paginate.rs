//! Two-pass pagination engine.
//!
//! Pass 1 ([`layout`]) streams layout blocks into the active template's
//! column frames. Artist groups are placed row by row; a group that does
//! not fit in the remaining frame splits at row granularity, repeating its
//! artist header at the top of the continuation. A [`LayoutBlock::SectionBreak`]
//! forces a page cut, advances the current section, and flips the template.
//! At every page cut the engine captures a [`PageState`] snapshot — page
//! number, section, template — together with the draw ops already placed on
//! that page. Nothing is painted yet.
//!
//! Pass 2 ([`finalize`]) runs once the page-state log is complete and the
//! total page count is therefore known. It replays the log in order, paints
//! each page's header/footer chrome (section title, rule, `Page X of N`
//! counter with parity-mirrored alignment), and commits the page to the
//! backend. Pass 2 is a pure function of the log, so replaying it twice
//! produces identical pages.

use crate::layout::LayoutBlock;
use crate::render::{text_width, DrawOp, RenderBackend, RenderError};
use crate::section::{Section, SectionIndex};
use crate::template::{TemplateId, BODY_FONT_SIZE, ROWS_PER_FRAME, ROW_HEIGHT};

/// Snapshot captured at a page cut during pass 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based physical page number.
    pub page_number: usize,
    /// Section current while this page was being filled.
    pub section: Section,
    pub template: TemplateId,
}

/// One laid-out page: its snapshot plus the content ops placed on it.
#[derive(Debug, Clone)]
pub struct PlacedPage {
    pub state: PageState,
    pub content: Vec<DrawOp>,
}

/// Header/footer text templates; `{}` is the slot for the current section.
#[derive(Debug, Clone)]
pub struct Chrome {
    pub header_template: String,
    pub footer_template: String,
}

impl Chrome {
    pub fn uniform(template: &str) -> Self {
        Chrome {
            header_template: template.to_string(),
            footer_template: template.to_string(),
        }
    }

    fn fill(template: &str, section: Section) -> String {
        template.replacen("{}", &section.to_string(), 1)
    }
}

// Row internals: text baseline sits this far above the row's bottom edge.
const BASELINE_LIFT: f32 = 3.5;
// Small horizontal inset for row text inside the frame.
const CELL_INSET: f32 = 2.0;
// Rules between rows (table grid lines).
const GRID_RULE_WIDTH: f32 = 0.5;
// Black level of the artist header row's background.
const HEADER_SHADE: f32 = 0.1;

// Chrome geometry, in points. Header centered at (4.25 in, 10.25 in);
// footer baseline at 0.25 in with its rule at 0.40 in.
const HEADER_CENTER_X: f32 = 306.0;
const HEADER_Y: f32 = 738.0;
const HEADER_SIZE: f32 = 18.0;
const FOOTER_SIZE: f32 = 8.0;
const FOOTER_Y: f32 = 18.0;
const FOOTER_RULE_Y: f32 = 28.8;
const FOOTER_RULE_WIDTH: f32 = 0.25;
// Footer extents mirror by parity: even pages span 0.25–7.50 in, odd pages
// 1.00–8.25 in.
const FOOTER_EVEN_LEFT: f32 = 18.0;
const FOOTER_EVEN_RIGHT: f32 = 540.0;
const FOOTER_ODD_LEFT: f32 = 72.0;
const FOOTER_ODD_RIGHT: f32 = 594.0;

/// Pass 1: stream `blocks` into frames and log a page per cut.
///
/// The current section is pre-initialized to the first index entry (the
/// stream builder suppresses the break before the first artist), and the
/// template starts at [`TemplateId::first`].
pub fn layout(blocks: &[LayoutBlock], sections: &SectionIndex) -> Vec<PlacedPage> {
    let first_section = match sections.first() {
        Some(s) => s,
        None => return Vec::new(),
    };

    let mut engine = Engine::new(first_section);
    for block in blocks {
        match block {
            LayoutBlock::SectionBreak(next) => engine.section_break(*next),
            LayoutBlock::ArtistGroup { artist, titles } => engine.place_group(artist, titles),
        }
    }
    engine.finish()
}

/// Pass 2: paint chrome over every logged page and commit it.
pub fn finalize<B: RenderBackend>(
    pages: &[PlacedPage],
    chrome: &Chrome,
    backend: &mut B,
) -> Result<(), RenderError> {
    let total = pages.len();
    for page in pages {
        let mut ops = chrome_ops(&page.state, total, chrome);
        ops.extend(page.content.iter().cloned());
        backend.add_page(&ops)?;
    }
    Ok(())
}

fn chrome_ops(state: &PageState, total: usize, chrome: &Chrome) -> Vec<DrawOp> {
    let header = Chrome::fill(&chrome.header_template, state.section);
    let footer = Chrome::fill(&chrome.footer_template, state.section);
    let counter = format!("Page {} of {}", state.page_number, total);

    let mut ops = Vec::with_capacity(4);

    ops.push(DrawOp::Text {
        x: HEADER_CENTER_X - text_width(&header, HEADER_SIZE, true) / 2.0,
        y: HEADER_Y,
        size: HEADER_SIZE,
        bold: true,
        text: header,
    });

    let (left, right) = if state.page_number % 2 == 0 {
        (FOOTER_EVEN_LEFT, FOOTER_EVEN_RIGHT)
    } else {
        (FOOTER_ODD_LEFT, FOOTER_ODD_RIGHT)
    };
    ops.push(DrawOp::Rule {
        x1: left,
        y1: FOOTER_RULE_Y,
        x2: right,
        y2: FOOTER_RULE_Y,
        width: FOOTER_RULE_WIDTH,
    });

    if state.page_number % 2 == 0 {
        // Even pages: section title right-aligned, counter on the left.
        ops.push(DrawOp::Text {
            x: right - text_width(&footer, FOOTER_SIZE, false),
            y: FOOTER_Y,
            size: FOOTER_SIZE,
            bold: false,
            text: footer,
        });
        ops.push(DrawOp::Text {
            x: left,
            y: FOOTER_Y,
            size: FOOTER_SIZE,
            bold: false,
            text: counter,
        });
    } else {
        // Odd pages: mirrored.
        ops.push(DrawOp::Text {
            x: left,
            y: FOOTER_Y,
            size: FOOTER_SIZE,
            bold: false,
            text: footer,
        });
        ops.push(DrawOp::Text {
            x: right - text_width(&counter, FOOTER_SIZE, false),
            y: FOOTER_Y,
            size: FOOTER_SIZE,
            bold: false,
            text: counter,
        });
    }

    ops
}

// ---------------------------------------------------------------------------
// Pass-1 engine
// ---------------------------------------------------------------------------

struct Engine {
    pages: Vec<PlacedPage>,
    template: TemplateId,
    section: Section,
    /// Active frame within the template: 0 or 1.
    frame: usize,
    /// Rows already consumed in the active frame.
    used_rows: usize,
    /// Content ops placed on the page currently being filled.
    content: Vec<DrawOp>,
}

impl Engine {
    fn new(first_section: Section) -> Self {
        Engine {
            pages: Vec::new(),
            template: TemplateId::first(),
            section: first_section,
            frame: 0,
            used_rows: 0,
            content: Vec::new(),
        }
    }

    fn section_break(&mut self, next: Section) {
        // A break at the very start of the document would double-advance
        // the template; anywhere else it forces a page cut and a flip.
        if !self.content.is_empty() || !self.pages.is_empty() {
            self.cut_page();
            self.template = self.template.next(true);
        }
        self.section = next;
    }

    fn place_group(&mut self, artist: &str, titles: &[String]) {
        let mut remaining = titles;
        loop {
            let mut capacity = ROWS_PER_FRAME.saturating_sub(self.used_rows);
            // A segment is worthless without the header plus one title.
            if capacity < 2 {
                self.advance_frame();
                capacity = ROWS_PER_FRAME;
            }
            let take = remaining.len().min(capacity - 1);
            let last_segment = take == remaining.len();
            self.place_segment(artist, &remaining[..take], last_segment);
            remaining = &remaining[take..];
            if remaining.is_empty() {
                break;
            }
        }
    }

    /// Place the artist header plus `titles` rows into the active frame.
    /// Caller guarantees they fit.
    fn place_segment(&mut self, artist: &str, titles: &[String], last_segment: bool) {
        let frame = self.template.frames()[self.frame];
        let top = frame.top() - ROW_HEIGHT * self.used_rows as f32;

        // Shaded background first, so the rule and text paint over it.
        self.content.push(DrawOp::Rect {
            x: frame.x,
            y: top - ROW_HEIGHT,
            width: frame.width,
            height: ROW_HEIGHT,
            shade: HEADER_SHADE,
        });
        self.push_rule(frame.x, frame.x + frame.width, top);
        self.content.push(DrawOp::Text {
            x: frame.x + CELL_INSET,
            y: top - ROW_HEIGHT + BASELINE_LIFT,
            size: BODY_FONT_SIZE,
            bold: true,
            text: artist.to_string(),
        });

        let mut row_bottom = top - ROW_HEIGHT;
        // Grid line below the header, unless the header is the group's
        // last row.
        if !(titles.is_empty() && last_segment) {
            self.push_rule(frame.x, frame.x + frame.width, row_bottom);
        }

        for (i, title) in titles.iter().enumerate() {
            self.content.push(DrawOp::Text {
                x: frame.x + CELL_INSET,
                y: row_bottom - ROW_HEIGHT + BASELINE_LIFT,
                size: BODY_FONT_SIZE,
                bold: false,
                text: title.clone(),
            });
            row_bottom -= ROW_HEIGHT;

            let group_last_row = last_segment && i == titles.len() - 1;
            if !group_last_row {
                self.push_rule(frame.x, frame.x + frame.width, row_bottom);
            }
        }

        self.used_rows += 1 + titles.len();
    }

    fn push_rule(&mut self, x1: f32, x2: f32, y: f32) {
        self.content.push(DrawOp::Rule {
            x1,
            y1: y,
            x2,
            y2: y,
            width: GRID_RULE_WIDTH,
        });
    }

    /// Move to the next frame; past the last frame, cut the page. Natural
    /// overflow keeps the template.
    fn advance_frame(&mut self) {
        if self.frame + 1 < self.template.frames().len() {
            self.frame += 1;
            self.used_rows = 0;
        } else {
            self.cut_page();
        }
    }

    fn cut_page(&mut self) {
        self.pages.push(PlacedPage {
            state: PageState {
                page_number: self.pages.len() + 1,
                section: self.section,
                template: self.template,
            },
            content: std::mem::take(&mut self.content),
        });
        self.frame = 0;
        self.used_rows = 0;
    }

    fn finish(mut self) -> Vec<PlacedPage> {
        if !self.content.is_empty() {
            self.cut_page();
        }
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::build_stream;
    use crate::section::SectionIndex;
    use crate::test_helpers::{catalog_of, op_texts, RecordingBackend};

    fn pages_for(songs: &[(&str, &str)]) -> Vec<PlacedPage> {
        let catalog = catalog_of(songs);
        let index = SectionIndex::build(catalog.sorted_artists());
        layout(&build_stream(&catalog), &index)
    }

    fn many_titles(artist: &str, n: usize) -> Vec<(String, String)> {
        (0..n)
            .map(|i| (artist.to_string(), format!("Song {i:03}")))
            .collect()
    }

    fn pages_for_owned(songs: &[(String, String)]) -> Vec<PlacedPage> {
        let borrowed: Vec<(&str, &str)> = songs
            .iter()
            .map(|(a, t)| (a.as_str(), t.as_str()))
            .collect();
        pages_for(&borrowed)
    }

    // =====================================================================
    // Pass 1
    // =====================================================================

    #[test]
    fn section_break_cuts_page_and_flips_template() {
        let pages = pages_for(&[
            ("ABBA", "Dancing Queen"),
            ("Queen", "Bohemian Rhapsody"),
            ("Queen", "We Will Rock You"),
        ]);
        // ABBA and Queen share no section, so the Q break cuts a page.
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].state.page_number, 1);
        assert_eq!(pages[0].state.section.as_char(), 'A');
        assert_eq!(pages[0].state.template, TemplateId::Right);
        assert_eq!(pages[1].state.section.as_char(), 'Q');
        assert_eq!(pages[1].state.template, TemplateId::Left);
    }

    #[test]
    fn same_section_artists_share_a_page() {
        let pages = pages_for(&[("ABBA", "SOS"), ("Ace of Base", "The Sign")]);
        assert_eq!(pages.len(), 1);
        let texts = op_texts(&pages[0].content);
        assert!(texts.contains(&"ABBA"));
        assert!(texts.contains(&"Ace of Base"));
    }

    #[test]
    fn natural_overflow_keeps_template_and_section() {
        // 1 header + 120 titles cannot fit 102 rows per page.
        let pages = pages_for_owned(&many_titles("ABBA", 120));
        assert_eq!(pages.len(), 2);
        for page in &pages {
            assert_eq!(page.state.template, TemplateId::Right);
            assert_eq!(page.state.section.as_char(), 'A');
        }
    }

    #[test]
    fn split_group_repeats_its_header() {
        // 60 titles: frame 1 takes the header + 50, frame 2 repeats the
        // header before the remaining 10.
        let pages = pages_for_owned(&many_titles("ABBA", 60));
        assert_eq!(pages.len(), 1);
        let headers = pages[0]
            .content
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { bold: true, text, .. } if text == "ABBA"))
            .count();
        assert_eq!(headers, 2);
    }

    #[test]
    fn every_header_row_is_shaded() {
        // Two artists on one page, one split header on another: each bold
        // header row gets exactly one background rect behind it.
        let pages = pages_for_owned(&many_titles("ABBA", 60));
        let headers = pages[0]
            .content
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { bold: true, .. }))
            .count();
        let rects = pages[0]
            .content
            .iter()
            .filter(|op| matches!(op, DrawOp::Rect { shade, .. } if *shade == HEADER_SHADE))
            .count();
        assert_eq!(headers, 2);
        assert_eq!(rects, headers);
    }

    #[test]
    fn template_sequence_flips_per_section() {
        let pages = pages_for(&[
            ("10cc", "I'm Not in Love"),
            ("ABBA", "Dancing Queen"),
            ("Bob Dylan", "Hurricane"),
        ]);
        let templates: Vec<TemplateId> = pages.iter().map(|p| p.state.template).collect();
        let sections: Vec<char> = pages.iter().map(|p| p.state.section.as_char()).collect();
        assert_eq!(
            templates,
            vec![TemplateId::Right, TemplateId::Left, TemplateId::Right]
        );
        assert_eq!(sections, vec!['#', 'A', 'B']);
    }

    #[test]
    fn page_numbers_are_sequential() {
        let pages = pages_for(&[
            ("ABBA", "SOS"),
            ("Beck", "Loser"),
            ("Coldplay", "Yellow"),
        ]);
        let numbers: Vec<usize> = pages.iter().map(|p| p.state.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn empty_stream_produces_no_pages() {
        let index = SectionIndex::build(std::iter::empty());
        assert!(layout(&[], &index).is_empty());
    }

    // =====================================================================
    // Pass 2
    // =====================================================================

    fn finalize_recorded(pages: &[PlacedPage], template: &str) -> RecordingBackend {
        let mut backend = RecordingBackend::default();
        finalize(pages, &Chrome::uniform(template), &mut backend).unwrap();
        backend
    }

    #[test]
    fn chrome_fills_section_slot_and_page_counter() {
        let pages = pages_for(&[("ABBA", "SOS"), ("Beck", "Loser")]);
        let backend = finalize_recorded(&pages, "Songs ({})");

        assert_eq!(backend.pages.len(), 2);
        let first = op_texts(&backend.pages[0]);
        assert!(first.contains(&"Songs (A)"));
        assert!(first.contains(&"Page 1 of 2"));
        let second = op_texts(&backend.pages[1]);
        assert!(second.contains(&"Songs (B)"));
        assert!(second.contains(&"Page 2 of 2"));
    }

    #[test]
    fn footer_alignment_mirrors_by_parity() {
        let pages = pages_for(&[
            ("ABBA", "SOS"),
            ("Beck", "Loser"),
            ("Coldplay", "Yellow"),
        ]);
        let backend = finalize_recorded(&pages, "Songs ({})");

        // Odd page 1: counter right-aligned against the odd footer edge.
        let counter_x = |ops: &[DrawOp], wanted: &str| -> f32 {
            ops.iter()
                .find_map(|op| match op {
                    DrawOp::Text { x, text, .. } if text == wanted => Some(*x),
                    _ => None,
                })
                .unwrap()
        };
        let p1 = counter_x(&backend.pages[0], "Page 1 of 3");
        let expected =
            FOOTER_ODD_RIGHT - text_width("Page 1 of 3", FOOTER_SIZE, false);
        assert!((p1 - expected).abs() < 0.001);

        // Even page 2: counter flush left.
        let p2 = counter_x(&backend.pages[1], "Page 2 of 3");
        assert!((p2 - FOOTER_EVEN_LEFT).abs() < 0.001);
    }

    #[test]
    fn header_is_centered() {
        let pages = pages_for(&[("ABBA", "SOS")]);
        let backend = finalize_recorded(&pages, "Songs ({})");
        let header = backend.pages[0]
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { x, text, size, .. } if *size == HEADER_SIZE => {
                    Some((*x, text.clone()))
                }
                _ => None,
            })
            .unwrap();
        let width = text_width(&header.1, HEADER_SIZE, true);
        assert!((header.0 + width / 2.0 - HEADER_CENTER_X).abs() < 0.001);
    }

    #[test]
    fn finalize_is_idempotent() {
        let pages = pages_for(&[("ABBA", "SOS"), ("Beck", "Loser")]);
        let first = finalize_recorded(&pages, "Songs ({})");
        let second = finalize_recorded(&pages, "Songs ({})");
        assert_eq!(first.pages, second.pages);
    }

    #[test]
    fn template_without_slot_is_used_verbatim() {
        let pages = pages_for(&[("ABBA", "SOS")]);
        let backend = finalize_recorded(&pages, "Song List");
        assert!(op_texts(&backend.pages[0]).contains(&"Song List"));
    }
}
