use crate::chapters::{self, INDEX_FILENAME};
use crate::pdf::PdfDocument;
use crate::toc::TocEntry;
use anyhow::{Context, Result};
use std::path::Path;

pub fn run(pdf: &Path, entries: &[TocEntry], outdir: &Path, page_offset: i64) -> Result<()> {
    let doc = PdfDocument::open(pdf)?;
    let total_pages = doc.page_count();

    // Compute the whole plan up front so a bad TOC aborts before any file
    // is written.
    let index = chapters::compute_ranges(entries, total_pages, page_offset)?;

    std::fs::create_dir_all(outdir)
        .with_context(|| format!("Failed to create directory: {}", outdir.display()))?;

    for chapter in &index.chapters {
        let output_path = outdir.join(&chapter.output_filename);

        let mut new_doc = doc.extract_range(chapter.pdf_start_page, chapter.pdf_end_page)?;
        PdfDocument::save(&mut new_doc, &output_path)?;

        println!(
            "Wrote {}  [{}-{} / {}]",
            chapter.output_filename, chapter.pdf_start_page, chapter.pdf_end_page, total_pages
        );
    }

    let index_path = outdir.join(INDEX_FILENAME);
    std::fs::write(&index_path, index.to_tsv())
        .with_context(|| format!("Failed to write index: {}", index_path.display()))?;
    println!("Wrote index: {}", index_path.display());

    println!(
        "Split {} chapter(s) into {}",
        index.chapters.len(),
        outdir.display()
    );

    Ok(())
}
