use clap::{Parser, Subcommand};
use songlist::tags::Id3Store;
use songlist::{catalog, generate, normalize, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "songlist")]
#[command(about = "Finds MP3 files and generates a PDF song list grouped by artist")]
#[command(long_about = "\
Finds MP3 files and generates a PDF song list grouped by artist

Your filesystem is the data source. Files follow the 'Artist - Title.mp3'
naming convention; fix-tags rewrites each file's ID3 artist/title from its
filename, and generate reads those tags back to build the catalog.

The generated list groups songs by artist, partitions artists into
alphabetical sections ('#' holds anything not starting with a letter), and
lays them out across two alternating two-column page templates with
per-section running headers and 'Page X of N' footers.")]
#[command(version = version_string())]
struct Cli {
    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Path to search for MP3 files
    #[arg(short, long, default_value = ".", global = true)]
    path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite ID3 artist/title tags from the filename convention
    FixTags {
        /// Clear all existing ID3 frames before setting artist/title
        #[arg(short, long)]
        clean: bool,
    },
    /// Generate the PDF song list from embedded tags
    Generate {
        /// Output filename
        #[arg(short, long, default_value = "SongList.pdf")]
        output: PathBuf,

        /// Header and footer title; '{}' is replaced with the current section
        #[arg(short, long, default_value = "Karaoke Songs by Artist ({})")]
        title: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.debug {
        println!("Debug mode enabled");
    }

    match cli.command {
        Command::FixTags { clean } => {
            println!("Searching for files in: {}", cli.path.display());
            let opts = normalize::NormalizeOptions {
                path: cli.path,
                clean,
                debug: cli.debug,
            };
            let processed = normalize::run(&opts, &Id3Store)?;
            println!("Updated {processed} files");
        }
        Command::Generate { output: out, title } => {
            println!("Searching for files in: {}", cli.path.display());
            let catalog = catalog::discover(&cli.path, &Id3Store, cli.debug);
            output::print_catalog_summary(&catalog);
            if cli.debug {
                output::print_artist_listing(&catalog);
            }

            if !catalog.is_empty() {
                println!("Generating PDF: {}", out.display());
            }
            let opts = generate::GenerateOptions { output: out, title };
            let outcome = generate::generate(&catalog, &opts)?;
            output::print_generate_outcome(&outcome);
        }
    }

    Ok(())
}
