use crate::toc::TocEntry;
use anyhow::{bail, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Name of the run log written next to the chapter files.
pub const INDEX_FILENAME: &str = "SPLIT_INDEX.tsv";

/// One chapter's slice of the physical document, 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRange {
    pub title: String,
    pub output_filename: String,
    pub pdf_start_page: u32,
    pub pdf_end_page: u32,
}

/// The plan for one run, in reading order.
#[derive(Debug, Clone)]
pub struct SplitIndex {
    pub chapters: Vec<ChapterRange>,
}

impl SplitIndex {
    /// Render the tab-separated index log: header plus one row per chapter.
    pub fn to_tsv(&self) -> String {
        let mut out = String::from("title\tfilename\tstart_page\tend_page\n");
        for chapter in &self.chapters {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\n",
                chapter.title,
                chapter.output_filename,
                chapter.pdf_start_page,
                chapter.pdf_end_page
            ));
        }
        out
    }
}

/// Map sorted TOC entries onto physical page ranges.
///
/// A chapter starts at `book_page + page_offset` and ends one page before the
/// next chapter starts; the last chapter runs to the end of the document.
pub fn compute_ranges(
    entries: &[TocEntry],
    total_pages: u32,
    page_offset: i64,
) -> Result<SplitIndex> {
    if entries.is_empty() {
        bail!("TOC contains no entries");
    }

    let mut chapters = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let start = i64::from(entry.book_page) + page_offset;
        if start < 1 || start > i64::from(total_pages) {
            bail!(
                "Start page {} for '{}' is outside the document (1-{}); check --page-offset",
                start,
                entry.title,
                total_pages
            );
        }

        let end = match entries.get(idx + 1) {
            Some(next) => {
                (i64::from(next.book_page) + page_offset - 1).min(i64::from(total_pages))
            }
            None => i64::from(total_pages),
        };
        if end < start {
            bail!(
                "Chapter '{}' ends before it starts ({}-{}); check TOC ordering and --page-offset",
                entry.title,
                start,
                end
            );
        }

        chapters.push(ChapterRange {
            title: entry.title.clone(),
            output_filename: infer_filename(idx + 1, &entry.title),
            pdf_start_page: start as u32,
            pdf_end_page: end as u32,
        });
    }

    Ok(SplitIndex { chapters })
}

/// "12 Natural Language Processing" becomes "Ch12_Natural_Language_Processing.pdf";
/// titles without a leading chapter number fall back to a positional prefix.
fn infer_filename(idx: usize, title: &str) -> String {
    let trimmed = title.trim();
    if let Some((num, rest)) = trimmed.split_once(char::is_whitespace) {
        if let Ok(n) = num.parse::<u32>() {
            let rest = rest.trim();
            if !rest.is_empty() {
                return format!("Ch{:02}_{}.pdf", n, sanitize_title(rest));
            }
        }
    }
    format!("Part_{:02}_{}.pdf", idx, sanitize_title(trimmed))
}

/// Strip characters that don't belong in a filename and collapse whitespace
/// runs to underscores. Capped at 180 chars.
fn sanitize_title(title: &str) -> String {
    static STRIP: OnceLock<Regex> = OnceLock::new();
    static SPACES: OnceLock<Regex> = OnceLock::new();
    let strip = STRIP.get_or_init(|| Regex::new(r"[^\w\s\-.]").expect("valid pattern"));
    let spaces = SPACES.get_or_init(|| Regex::new(r"\s+").expect("valid pattern"));

    let cleaned = strip.replace_all(title, "");
    let name = spaces.replace_all(cleaned.trim(), "_").into_owned();
    if name.chars().count() > 180 {
        name.chars().take(180).collect()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, book_page: u32) -> TocEntry {
        TocEntry {
            title: title.to_string(),
            book_page,
        }
    }

    #[test]
    fn offset_maps_book_pages_to_physical_pages() {
        let toc = vec![entry("1 Intro", 1), entry("2 Agents", 34)];
        let index = compute_ranges(&toc, 100, 19).unwrap();

        assert_eq!(index.chapters[0].pdf_start_page, 20);
        assert_eq!(index.chapters[0].pdf_end_page, 52);
        assert_eq!(index.chapters[1].pdf_start_page, 53);
        assert_eq!(index.chapters[1].pdf_end_page, 100);
        assert_eq!(index.chapters[0].output_filename, "Ch01_Intro.pdf");
        assert_eq!(index.chapters[1].output_filename, "Ch02_Agents.pdf");
    }

    #[test]
    fn one_range_per_entry() {
        let toc = vec![entry("1 A", 1), entry("2 B", 10), entry("3 C", 40)];
        let index = compute_ranges(&toc, 60, 0).unwrap();
        assert_eq!(index.chapters.len(), toc.len());
    }

    #[test]
    fn ranges_are_contiguous_and_cover_the_span() {
        let toc = vec![entry("1 A", 1), entry("2 B", 10), entry("3 C", 40)];
        let index = compute_ranges(&toc, 60, 5).unwrap();

        assert_eq!(index.chapters[0].pdf_start_page, 6);
        for pair in index.chapters.windows(2) {
            assert_eq!(pair[1].pdf_start_page, pair[0].pdf_end_page + 1);
        }
        assert_eq!(index.chapters.last().unwrap().pdf_end_page, 60);
    }

    #[test]
    fn single_chapter_runs_to_document_end() {
        let index = compute_ranges(&[entry("1 Everything", 1)], 25, 0).unwrap();
        assert_eq!(index.chapters[0].pdf_start_page, 1);
        assert_eq!(index.chapters[0].pdf_end_page, 25);
    }

    #[test]
    fn start_beyond_document_fails() {
        let toc = vec![entry("1 A", 1), entry("9 Epilogue", 200)];
        assert!(compute_ranges(&toc, 100, 0).is_err());
    }

    #[test]
    fn offset_pushing_start_past_document_fails() {
        let toc = vec![entry("1 A", 1), entry("2 B", 95)];
        assert!(compute_ranges(&toc, 100, 10).is_err());
    }

    #[test]
    fn negative_offset_mapping_before_first_page_fails() {
        assert!(compute_ranges(&[entry("1 A", 3)], 100, -5).is_err());
    }

    #[test]
    fn negative_offset_within_bounds_is_fine() {
        let index = compute_ranges(&[entry("1 A", 10)], 100, -5).unwrap();
        assert_eq!(index.chapters[0].pdf_start_page, 5);
    }

    #[test]
    fn empty_toc_fails() {
        assert!(compute_ranges(&[], 100, 0).is_err());
    }

    #[test]
    fn filename_keeps_chapter_number_prefix() {
        assert_eq!(
            infer_filename(3, "12 Natural Language Processing"),
            "Ch12_Natural_Language_Processing.pdf"
        );
    }

    #[test]
    fn filename_without_number_uses_position() {
        assert_eq!(infer_filename(1, "Preface"), "Part_01_Preface.pdf");
    }

    #[test]
    fn filename_bare_number_uses_position() {
        assert_eq!(infer_filename(2, "42"), "Part_02_42.pdf");
    }

    #[test]
    fn sanitize_strips_punctuation_and_collapses_whitespace() {
        assert_eq!(sanitize_title("What's  next: AI?"), "Whats_next_AI");
    }

    #[test]
    fn sanitize_keeps_dashes_and_dots() {
        assert_eq!(sanitize_title("Ch. 1 - Intro"), "Ch._1_-_Intro");
    }

    #[test]
    fn sanitize_caps_length() {
        let long = "x".repeat(400);
        assert_eq!(sanitize_title(&long).chars().count(), 180);
    }

    #[test]
    fn index_tsv_has_header_and_rows_in_order() {
        let toc = vec![entry("1 Intro", 1), entry("2 Agents", 34)];
        let index = compute_ranges(&toc, 100, 19).unwrap();
        let tsv = index.to_tsv();

        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines[0], "title\tfilename\tstart_page\tend_page");
        assert_eq!(lines[1], "1 Intro\tCh01_Intro.pdf\t20\t52");
        assert_eq!(lines[2], "2 Agents\tCh02_Agents.pdf\t53\t100");
    }
}
