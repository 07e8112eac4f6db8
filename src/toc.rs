use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// One table-of-contents row: a chapter title and the book page it starts on
/// (1-based, before any page offset is applied).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub title: String,
    pub book_page: u32,
}

/// JSON list form: [{"title": "Introduction", "start": 1}, ...]
#[derive(Debug, Deserialize)]
struct JsonTocItem {
    title: String,
    start: u32,
}

/// Load a TOC from whichever of the two sources was given.
pub fn load(tsv: Option<&Path>, json: Option<&Path>) -> Result<Vec<TocEntry>> {
    match (tsv, json) {
        (Some(path), None) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read TOC: {}", path.display()))?;
            parse_tsv(&text).with_context(|| format!("Invalid TOC: {}", path.display()))
        }
        (None, Some(path)) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read TOC: {}", path.display()))?;
            parse_json(&text).with_context(|| format!("Invalid TOC: {}", path.display()))
        }
        _ => bail!("Exactly one of --toc-tsv or --toc-json must be given"),
    }
}

/// Parse two-column TSV, one "start<TAB>title" per line. Blank lines and
/// lines starting with '#' are skipped.
pub fn parse_tsv(text: &str) -> Result<Vec<TocEntry>> {
    let mut entries = Vec::new();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() < 2 {
            bail!(
                "Line {}: expected 'start<TAB>title', got: {}",
                lineno + 1,
                line
            );
        }

        let book_page: u32 = columns[0].trim().parse().with_context(|| {
            format!("Line {}: invalid page number: {}", lineno + 1, columns[0])
        })?;
        if book_page == 0 {
            bail!("Line {}: page numbers must be >= 1", lineno + 1);
        }

        let title = columns[1].trim();
        if title.is_empty() {
            bail!("Line {}: empty chapter title", lineno + 1);
        }

        entries.push(TocEntry {
            title: title.to_string(),
            book_page,
        });
    }

    normalize(entries)
}

/// Parse a JSON TOC. Accepts a list of {"title", "start"} objects, an object
/// mapping title to start page, or nested objects grouping chapters by part
/// (flattened depth-first).
pub fn parse_json(text: &str) -> Result<Vec<TocEntry>> {
    let value: Value = serde_json::from_str(text).context("Failed to parse TOC JSON")?;

    let mut entries = Vec::new();
    match value {
        Value::Array(items) => {
            for item in items {
                let item: JsonTocItem = serde_json::from_value(item)
                    .context("JSON list items must have 'title' and 'start' keys")?;
                if item.start == 0 {
                    bail!("Start page for '{}' must be >= 1", item.title);
                }
                entries.push(TocEntry {
                    title: item.title,
                    book_page: item.start,
                });
            }
        }
        Value::Object(map) => flatten_object(&map, &mut entries)?,
        _ => bail!("TOC JSON must be an object or a list of objects"),
    }

    normalize(entries)
}

fn flatten_object(map: &serde_json::Map<String, Value>, out: &mut Vec<TocEntry>) -> Result<()> {
    for (title, value) in map {
        match value {
            Value::Object(inner) => flatten_object(inner, out)?,
            Value::Number(n) => {
                let book_page = n
                    .as_u64()
                    .filter(|&p| p >= 1 && p <= u32::MAX as u64)
                    .with_context(|| format!("Invalid start page for '{}': {}", title, n))?;
                out.push(TocEntry {
                    title: title.clone(),
                    book_page: book_page as u32,
                });
            }
            other => bail!("Start page for '{}' must be a number, got: {}", title, other),
        }
    }
    Ok(())
}

/// Sort by book page and reject TOCs no split can be computed from.
fn normalize(mut entries: Vec<TocEntry>) -> Result<Vec<TocEntry>> {
    if entries.is_empty() {
        bail!("TOC contains no entries");
    }

    entries.sort_by_key(|e| e.book_page);

    for pair in entries.windows(2) {
        if pair[0].book_page == pair[1].book_page {
            bail!(
                "'{}' and '{}' both start on page {}",
                pair[0].title,
                pair[1].title,
                pair[0].book_page
            );
        }
    }

    Ok(entries)
}
