//! PDF converters: first page to a raster image, all pages to plain text.

mod document;
#[doc(hidden)]
pub mod fixtures;
mod output;
mod render;
mod text;

use convert_core::error::Result;
use convert_core::format::{Converter, OutputFormat, TextKind};
use convert_core::options::ConversionOptions;
use convert_core::request::ConversionRequest;

pub use render::{check_pdftoppm, normalize_color, render_page_to_image};
pub use text::{extract_text, write_pages, PAGE_SEPARATOR};

/// What a finished conversion produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub converter: Converter,
    /// Pages read from the input document.
    pub pages: usize,
}

/// Run the converter selected by `request`.
pub fn run(request: &ConversionRequest, options: &ConversionOptions) -> Result<Summary> {
    log::info!(
        "Converting {} → {} ({}, {})",
        request.input_path().display(),
        request.output_path().display(),
        request.output_format(),
        request.converter()
    );

    let pages = match request.output_format() {
        OutputFormat::Image(kind) => {
            render_page_to_image(request.input_path(), request.output_path(), kind, options)?
        }
        OutputFormat::Text(kind) => {
            if kind != TextKind::Plain {
                log::warn!(
                    "{} output is written as plain text, not as a {} document",
                    kind.extension(),
                    kind.extension()
                );
            }
            extract_text(request.input_path(), request.output_path())?
        }
    };

    Ok(Summary {
        converter: request.converter(),
        pages,
    })
}
