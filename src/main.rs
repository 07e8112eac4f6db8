mod chapters;
mod cli;
mod commands;
mod pdf;
mod toc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            pdf,
            toc_tsv,
            toc_json,
            outdir,
            page_offset,
        } => {
            let entries = toc::load(toc_tsv.as_deref(), toc_json.as_deref())?;
            commands::split::run(&pdf, &entries, &outdir, page_offset)?;
        }
        Commands::Plan {
            pdf,
            toc_tsv,
            toc_json,
            page_offset,
        } => {
            let entries = toc::load(toc_tsv.as_deref(), toc_json.as_deref())?;
            commands::plan::run(&pdf, &entries, page_offset)?;
        }
        Commands::Info { path } => {
            commands::info::run(&path)?;
        }
    }

    Ok(())
}
