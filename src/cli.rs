use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tocsplit")]
#[command(about = "Split a PDF book into per-chapter files from a table of contents")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split the book into one PDF per chapter
    Split {
        /// Source PDF
        #[arg(long, value_name = "FILE")]
        pdf: PathBuf,

        /// TOC as tab-separated "start<TAB>title" lines
        #[arg(
            long,
            value_name = "FILE",
            conflicts_with = "toc_json",
            required_unless_present = "toc_json"
        )]
        toc_tsv: Option<PathBuf>,

        /// TOC as JSON: an object mapping title to start page (nesting
        /// allowed), or a list of {"title", "start"} objects
        #[arg(long, value_name = "FILE")]
        toc_json: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "chapters")]
        outdir: PathBuf,

        /// Constant added to a book page number to get the physical PDF page
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        page_offset: i64,
    },

    /// Print the chapter ranges a split would produce, without writing files
    Plan {
        /// Source PDF
        #[arg(long, value_name = "FILE")]
        pdf: PathBuf,

        /// TOC as tab-separated "start<TAB>title" lines
        #[arg(
            long,
            value_name = "FILE",
            conflicts_with = "toc_json",
            required_unless_present = "toc_json"
        )]
        toc_tsv: Option<PathBuf>,

        /// TOC as JSON
        #[arg(long, value_name = "FILE")]
        toc_json: Option<PathBuf>,

        /// Constant added to a book page number to get the physical PDF page
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        page_offset: i64,
    },

    /// Display PDF metadata (useful for picking the page offset)
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },
}
