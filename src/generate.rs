//! Generator orchestration: catalog in, PDF out.
//!
//! Ties the pipeline together — section index, block stream, two-pass
//! pagination, PDF backend — and reports what happened as a
//! [`GenerateOutcome`]. An empty catalog is not an error: the generator
//! answers [`GenerateOutcome::Skipped`] and produces no artifact, not even
//! an empty one.

use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::Catalog;
use crate::layout::build_stream;
use crate::paginate::{self, Chrome, PlacedPage};
use crate::render::{PdfBackend, RenderError};
use crate::section::SectionIndex;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Output filename for the PDF artifact.
    pub output: PathBuf,
    /// Header/footer template; `{}` is replaced with the current section.
    pub title: String,
}

#[derive(Debug)]
pub enum GenerateOutcome {
    /// Nothing to render — no entries or no artists were found.
    Skipped,
    Written { path: PathBuf, pages: usize },
}

/// Pass 1 as a pure function: catalog to placed pages. Exposed separately
/// so the layout can be exercised without touching a PDF.
pub fn plan(catalog: &Catalog) -> Vec<PlacedPage> {
    let index = SectionIndex::build(catalog.sorted_artists());
    paginate::layout(&build_stream(catalog), &index)
}

/// Render `catalog` into the PDF named by `opts`.
pub fn generate(catalog: &Catalog, opts: &GenerateOptions) -> Result<GenerateOutcome, GenerateError> {
    if catalog.is_empty() {
        return Ok(GenerateOutcome::Skipped);
    }

    let pages = plan(catalog);
    let chrome = Chrome::uniform(&opts.title);

    let mut backend = PdfBackend::new("Song List")?;
    paginate::finalize(&pages, &chrome, &mut backend)?;
    backend.save(&opts.output)?;

    Ok(GenerateOutcome::Written {
        path: opts.output.clone(),
        pages: pages.len(),
    })
}
