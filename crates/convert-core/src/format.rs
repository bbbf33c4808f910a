//! Output formats and the extension table used to pick a converter.

use std::fmt;
use std::path::Path;

use crate::error::{ConvertError, Result};

/// Raster formats a rendered page can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Jpeg,
    Png,
    Bmp,
    Tiff,
    Gif,
}

impl ImageKind {
    /// Canonical file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Gif => "gif",
        }
    }
}

/// Text containers accepted on the output side.
///
/// Every kind is written as plain UTF-8 text; `Docx` and `Odt` only record
/// what the destination name asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextKind {
    Plain,
    Docx,
    Odt,
}

impl TextKind {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Plain => "txt",
            Self::Docx => "docx",
            Self::Odt => "odt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Image(ImageKind),
    Text(TextKind),
}

impl OutputFormat {
    /// Parse the flag accepted by flag dispatch (`img` or `txt`).
    ///
    /// `img` always means JPEG; the destination name is never consulted.
    pub fn from_flag(flag: &str) -> Result<Self> {
        match flag {
            "img" => Ok(Self::Image(ImageKind::Jpeg)),
            "txt" => Ok(Self::Text(TextKind::Plain)),
            other => Err(ConvertError::InvalidFlag(other.to_string())),
        }
    }

    /// The conversion operation that produces this format.
    pub fn converter(&self) -> Converter {
        match self {
            Self::Image(_) => Converter::RenderPageToImage,
            Self::Text(_) => Converter::ExtractText,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Image(kind) => kind.extension(),
            Self::Text(kind) => kind.extension(),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}

/// The two conversion operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// Render the first page to a raster image.
    RenderPageToImage,
    /// Extract the text of every page.
    ExtractText,
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RenderPageToImage => f.write_str("render_page_to_image"),
            Self::ExtractText => f.write_str("extract_text"),
        }
    }
}

/// How a tool decides which converter to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// The destination file's extension decides; any format argument is ignored.
    Extension,
    /// An explicit `img`/`txt` argument decides; the destination name is ignored.
    Flag,
}

/// Immutable extension → format mapping.
///
/// Build one at startup and pass it by reference to whoever resolves paths.
#[derive(Debug, Clone)]
pub struct FormatTable {
    entries: Vec<(&'static str, OutputFormat)>,
}

impl FormatTable {
    /// Every extension the converters understand, text kinds first.
    pub fn standard() -> Self {
        let mut entries = vec![
            ("txt", OutputFormat::Text(TextKind::Plain)),
            ("docx", OutputFormat::Text(TextKind::Docx)),
            ("odt", OutputFormat::Text(TextKind::Odt)),
        ];
        entries.extend(Self::image_entries());
        Self { entries }
    }

    /// Raster extensions only.
    pub fn images_only() -> Self {
        Self {
            entries: Self::image_entries(),
        }
    }

    fn image_entries() -> Vec<(&'static str, OutputFormat)> {
        vec![
            ("jpg", OutputFormat::Image(ImageKind::Jpeg)),
            ("jpeg", OutputFormat::Image(ImageKind::Jpeg)),
            ("png", OutputFormat::Image(ImageKind::Png)),
            ("bmp", OutputFormat::Image(ImageKind::Bmp)),
            ("tiff", OutputFormat::Image(ImageKind::Tiff)),
            ("gif", OutputFormat::Image(ImageKind::Gif)),
        ]
    }

    /// Look up a bare extension (no leading dot). Matching is exact, so
    /// `PNG` is not `png`.
    pub fn lookup(&self, extension: &str) -> Option<OutputFormat> {
        self.entries
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, format)| *format)
    }

    /// Resolve a destination path to an output format.
    ///
    /// The extension is whatever follows the last `.` of the file name.
    pub fn resolve(&self, output_path: &Path) -> Result<OutputFormat> {
        let extension = extension_of(output_path).unwrap_or_default();
        self.lookup(extension)
            .ok_or_else(|| ConvertError::UnsupportedFormat {
                extension: extension.to_string(),
                supported: self.supported_list(),
            })
    }

    /// Comma-separated list of supported extensions, e.g. `.txt, .docx`.
    pub fn supported_list(&self) -> String {
        self.entries
            .iter()
            .map(|(ext, _)| format!(".{}", ext))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn extensions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(ext, _)| *ext)
    }
}

/// Substring after the last `.` of the path's file name, if there is one.
fn extension_of(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rsplit_once('.').map(|(_, ext)| ext)
}
