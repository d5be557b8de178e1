//! CLI output formatting.
//!
//! Each significant event has a pure `format_*` function (returns strings,
//! no I/O) and a `print_*` wrapper that writes to stdout. Tests assert on
//! the format functions.

use crate::catalog::Catalog;
use crate::generate::GenerateOutcome;

/// `Found N songs for M artists`, with a skipped-file note when relevant.
pub fn format_catalog_summary(catalog: &Catalog) -> String {
    let mut line = format!(
        "Found {} songs for {} artists",
        catalog.song_count(),
        catalog.artist_count()
    );
    if catalog.skipped() > 0 {
        line.push_str(&format!(" ({} files skipped)", catalog.skipped()));
    }
    line
}

/// Debug listing: every artist followed by their titles, indented.
pub fn format_artist_listing(catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::new();
    for artist in catalog.sorted_artists() {
        lines.push(artist.to_string());
        for title in catalog.titles_for(artist) {
            lines.push(format!("\t{title}"));
        }
    }
    lines
}

pub fn format_generate_outcome(outcome: &GenerateOutcome) -> String {
    match outcome {
        GenerateOutcome::Skipped => "Skipping PDF generation".to_string(),
        GenerateOutcome::Written { path, pages } => {
            format!("Wrote {} ({} pages)", path.display(), pages)
        }
    }
}

pub fn print_catalog_summary(catalog: &Catalog) {
    println!("{}", format_catalog_summary(catalog));
}

pub fn print_artist_listing(catalog: &Catalog) {
    for line in format_artist_listing(catalog) {
        println!("{line}");
    }
}

pub fn print_generate_outcome(outcome: &GenerateOutcome) {
    println!("{}", format_generate_outcome(outcome));
}
