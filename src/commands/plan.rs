use crate::chapters;
use crate::pdf::PdfDocument;
use crate::toc::TocEntry;
use anyhow::Result;
use std::path::Path;

pub fn run(pdf: &Path, entries: &[TocEntry], page_offset: i64) -> Result<()> {
    let doc = PdfDocument::open(pdf)?;
    let total_pages = doc.page_count();

    let index = chapters::compute_ranges(entries, total_pages, page_offset)?;

    for chapter in &index.chapters {
        println!(
            "{}-{}\t{}\t{}",
            chapter.pdf_start_page, chapter.pdf_end_page, chapter.output_filename, chapter.title
        );
    }

    println!(
        "\n{} chapter(s) over {} pages (offset {})",
        index.chapters.len(),
        total_pages,
        page_offset
    );

    Ok(())
}
