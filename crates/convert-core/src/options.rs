//! Conversion options shared by the converters and the CLI tools.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// Settings controlling a conversion.
///
/// Missing fields in a TOML file fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    pub verbose: u8,

    /// Rendering resolution. `None` keeps the renderer's own default.
    pub pdf_dpi: Option<u16>,

    /// JPEG quality (1-100).
    pub jpeg_quality: u8,

    /// The `pdftoppm` executable, by name or path.
    pub pdftoppm: PathBuf,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            verbose: 0,
            pdf_dpi: None,
            jpeg_quality: 92,
            pdftoppm: PathBuf::from("pdftoppm"),
        }
    }
}

impl ConversionOptions {
    /// Read options from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
            .map_err(|e| ConvertError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut opts: Self =
            toml::from_str(contents).map_err(|e| ConvertError::Config(e.to_string()))?;
        opts.jpeg_quality = opts.jpeg_quality.clamp(1, 100);
        if opts.pdf_dpi == Some(0) {
            return Err(ConvertError::Config("pdf_dpi must be positive".to_string()));
        }
        Ok(opts)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConvertError::Config(e.to_string()))
    }
}
