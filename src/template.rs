//! The two alternating page templates and their frame geometry.
//!
//! Every page is US Letter with two side-by-side column frames. The `Left`
//! template indents both columns 0.75 in from the left edge; the `Right`
//! template sits 0.25 in from it — mirrored margins, so duplex output binds
//! like a book. Which template a page gets is a two-state machine: the
//! document starts on `Right`, and the state flips exactly once per section
//! boundary. Ordinary overflow page breaks keep the current template.
//!
//! All geometry is in PDF points (1/72 in), origin at the bottom-left.

/// US Letter, in points.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

/// Document margin on all four edges (0.25 in).
pub const MARGIN: f32 = 18.0;

const DOC_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const DOC_HEIGHT: f32 = PAGE_HEIGHT - 2.0 * MARGIN;

/// Width of one column frame: half the usable width, minus gutters.
pub const COLUMN_WIDTH: f32 = DOC_WIDTH / 2.0 - 36.0;

const FRAME_BOTTOM: f32 = MARGIN + 10.8;
const FRAME_HEIGHT: f32 = DOC_HEIGHT - 10.8;

/// Frame padding reserves room for the page header above the columns and a
/// gap above the footer rule below them.
const TOP_PADDING: f32 = 54.0;
const BOTTOM_PADDING: f32 = 18.0;

/// Height of one table row (9 pt body text plus leading).
pub const ROW_HEIGHT: f32 = 13.0;
pub const BODY_FONT_SIZE: f32 = 9.0;

/// How many rows fit in one column frame.
pub const ROWS_PER_FRAME: usize =
    ((FRAME_HEIGHT - TOP_PADDING - BOTTOM_PADDING) / ROW_HEIGHT) as usize;

/// One column frame: outer box, origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    fn at(x: f32) -> Self {
        Frame {
            x,
            y: FRAME_BOTTOM,
            width: COLUMN_WIDTH,
            height: FRAME_HEIGHT,
        }
    }

    /// Y of the first row's top edge (below the header padding).
    pub fn top(&self) -> f32 {
        self.y + self.height - TOP_PADDING
    }
}

/// The two page layouts. Content fills frame 0 top-to-bottom, then frame 1,
/// then triggers a new page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    Left,
    Right,
}

impl TemplateId {
    /// Template for the first page of a document.
    pub fn first() -> Self {
        TemplateId::Right
    }

    /// Advance the two-state machine: flip on a section boundary, hold
    /// otherwise.
    pub fn next(self, section_boundary: bool) -> Self {
        if section_boundary {
            self.flipped()
        } else {
            self
        }
    }

    fn flipped(self) -> Self {
        match self {
            TemplateId::Left => TemplateId::Right,
            TemplateId::Right => TemplateId::Left,
        }
    }

    /// The two column frames of this template, left to right.
    pub fn frames(self) -> [Frame; 2] {
        match self {
            // Columns pushed 0.75 in off the left edge.
            TemplateId::Left => [
                Frame::at(MARGIN + 54.0),
                Frame::at(MARGIN + DOC_WIDTH / 2.0 + 36.0),
            ],
            // Columns hugging the left margin.
            TemplateId::Right => [
                Frame::at(MARGIN),
                Frame::at(MARGIN + DOC_WIDTH / 2.0 - 18.0),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_starts_on_right() {
        assert_eq!(TemplateId::first(), TemplateId::Right);
    }

    #[test]
    fn flips_only_on_section_boundaries() {
        // Boundary sequence [false, false, true, false, true] from Right
        // must produce [Right, Right, Left, Left, Right].
        let boundaries = [false, false, true, false, true];
        let mut template = TemplateId::first();
        let mut seen = Vec::new();
        for boundary in boundaries {
            template = template.next(boundary);
            seen.push(template);
        }
        assert_eq!(
            seen,
            vec![
                TemplateId::Right,
                TemplateId::Right,
                TemplateId::Left,
                TemplateId::Left,
                TemplateId::Right,
            ]
        );
    }

    #[test]
    fn frames_are_mirrored_across_templates() {
        let [l1, l2] = TemplateId::Left.frames();
        let [r1, r2] = TemplateId::Right.frames();

        // Same column width everywhere.
        for f in [l1, l2, r1, r2] {
            assert_eq!(f.width, COLUMN_WIDTH);
        }

        // Left template is pushed right; right template hugs the margin.
        assert!(l1.x > r1.x);
        assert_eq!(r1.x, MARGIN);

        // The left template's right overhang equals the right template's
        // left offset relative to the page (duplex mirror).
        let left_inset = l1.x - MARGIN;
        let right_overhang = (PAGE_WIDTH - MARGIN) - (r2.x + r2.width);
        assert!((left_inset - right_overhang).abs() < 0.01);
    }

    #[test]
    fn frames_hold_a_plausible_row_count() {
        // 9 pt rows at 13 pt leading in a ~673 pt text area.
        assert_eq!(ROWS_PER_FRAME, 51);
    }
}
