//! Rendering backend seam: draw ops, text metrics, and the PDF backend.
//!
//! The pagination engine describes each finished page as a flat list of
//! [`DrawOp`] values — text at an absolute position, or a rule between two
//! points — and hands it to a [`RenderBackend`]. Alignment is resolved
//! before ops are emitted (using the Helvetica metrics in this module), so
//! backends stay dumb: they place what they are given.
//!
//! [`PdfBackend`] is the production implementer, built on `printpdf` with
//! the built-in Type1 Helvetica fonts. Tests use a recording backend
//! instead and assert on ops.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Cmyk, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerIndex, PdfPageIndex, Point, Polygon, Pt,
};
use thiserror::Error;

use crate::template::{PAGE_HEIGHT, PAGE_WIDTH};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] printpdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One drawing instruction. Coordinates in points, origin bottom-left;
/// text `x`/`y` is the baseline start.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        text: String,
    },
    Rule {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
    },
    /// Filled rectangle; `shade` is the black level (0.0 white, 1.0 black).
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        shade: f32,
    },
}

/// Consumer of finished pages, in order.
pub trait RenderBackend {
    fn add_page(&mut self, ops: &[DrawOp]) -> Result<(), RenderError>;
}

// ---------------------------------------------------------------------------
// Helvetica metrics
// ---------------------------------------------------------------------------

/// Advance widths for Helvetica, chars 0x20..=0x7E, in 1/1000 em
/// (standard Adobe core-font AFM values).
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278,
    584, 584, 584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278,
    500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500,
    278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Advance widths for Helvetica-Bold, same range and units.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333,
    278, 278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333,
    584, 584, 584, 611, 975, 722, 722, 722, 722, 667, 611, 778, 722, 278,
    556, 722, 611, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944,
    667, 667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556, 611, 556,
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556,
    333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width any glyph outside the ASCII table is assumed to occupy.
const FALLBACK_GLYPH_WIDTH: u16 = 600;

/// Rendered width of `text` at `size` points.
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let table = if bold {
        &HELVETICA_BOLD_WIDTHS
    } else {
        &HELVETICA_WIDTHS
    };
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (0x20..=0x7E).contains(&code) {
                u32::from(table[(code - 0x20) as usize])
            } else {
                u32::from(FALLBACK_GLYPH_WIDTH)
            }
        })
        .sum();
    units as f32 / 1000.0 * size
}

// ---------------------------------------------------------------------------
// PDF backend
// ---------------------------------------------------------------------------

/// Writes pages to a PDF via `printpdf`, one layer per page.
pub struct PdfBackend {
    doc: PdfDocumentReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    // The blank page `PdfDocument::new` creates, consumed by the first
    // `add_page` call.
    pending: Option<(PdfPageIndex, PdfLayerIndex)>,
}

impl PdfBackend {
    pub fn new(title: &str) -> Result<Self, RenderError> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm::from(Pt(PAGE_WIDTH)),
            Mm::from(Pt(PAGE_HEIGHT)),
            "content",
        );
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        Ok(PdfBackend {
            doc,
            regular,
            bold,
            pending: Some((page, layer)),
        })
    }

    /// Finish the document and write it to `path`.
    pub fn save(self, path: &Path) -> Result<(), RenderError> {
        let file = File::create(path)?;
        self.doc.save(&mut BufWriter::new(file))?;
        Ok(())
    }
}

fn pt(v: f32) -> Mm {
    Mm::from(Pt(v))
}

impl RenderBackend for PdfBackend {
    fn add_page(&mut self, ops: &[DrawOp]) -> Result<(), RenderError> {
        let (page, layer) = match self.pending.take() {
            Some(first) => first,
            None => self.doc.add_page(
                pt(PAGE_WIDTH),
                pt(PAGE_HEIGHT),
                "content",
            ),
        };
        let layer = self.doc.get_page(page).get_layer(layer);

        for op in ops {
            match op {
                DrawOp::Text {
                    x,
                    y,
                    size,
                    bold,
                    text,
                } => {
                    let font = if *bold { &self.bold } else { &self.regular };
                    layer.use_text(text.clone(), *size, pt(*x), pt(*y), font);
                }
                DrawOp::Rule {
                    x1,
                    y1,
                    x2,
                    y2,
                    width,
                } => {
                    layer.set_outline_thickness(*width);
                    layer.add_line(Line {
                        points: vec![
                            (Point::new(pt(*x1), pt(*y1)), false),
                            (Point::new(pt(*x2), pt(*y2)), false),
                        ],
                        is_closed: false,
                    });
                }
                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                    shade,
                } => {
                    layer.set_fill_color(Color::Cmyk(Cmyk::new(
                        0.0,
                        0.0,
                        0.0,
                        *shade,
                        None,
                    )));
                    layer.add_polygon(Polygon {
                        rings: vec![vec![
                            (Point::new(pt(*x), pt(*y)), false),
                            (Point::new(pt(*x + *width), pt(*y)), false),
                            (Point::new(pt(*x + *width), pt(*y + *height)), false),
                            (Point::new(pt(*x), pt(*y + *height)), false),
                        ]],
                        mode: PaintMode::Fill,
                        winding_order: WindingOrder::NonZero,
                    });
                    // Text shares the fill color; put it back to black.
                    layer.set_fill_color(Color::Cmyk(Cmyk::new(0.0, 0.0, 0.0, 1.0, None)));
                }
            }
        }
        Ok(())
    }
}
