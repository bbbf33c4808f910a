//! Whole-document text extraction via lopdf.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use convert_core::error::{ConvertError, Result};

use crate::document;

/// Written after every page's text, the last page included.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Extract the text of every page of `input` into `output`.
///
/// Returns the number of pages written.
pub fn extract_text(input: &Path, output: &Path) -> Result<usize> {
    let doc = document::load(input)?;
    let page_numbers = document::page_numbers(&doc);
    log::info!("PDF has {} pages", page_numbers.len());

    let file = File::create(output).map_err(|e| ConvertError::FileOpen {
        path: output.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);

    let pages = page_numbers.iter().map(|&page_num| {
        doc.extract_text(&[page_num]).unwrap_or_else(|e| {
            log::warn!("No text extracted from page {}: {}", page_num, e);
            String::new()
        })
    });
    let count = write_pages(&mut writer, pages)?;
    writer.flush()?;

    Ok(count)
}

/// Write each page's text followed by [`PAGE_SEPARATOR`].
///
/// Line terminators at the end of a page are dropped first, so every block
/// is separated by exactly one blank line.
pub fn write_pages<W, I, S>(writer: &mut W, pages: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut count = 0;
    for text in pages {
        let text = text.as_ref().trim_end_matches(['\r', '\n']);
        writer.write_all(text.as_bytes())?;
        writer.write_all(PAGE_SEPARATOR.as_bytes())?;
        count += 1;
    }
    Ok(count)
}
