//! The resolved conversion request handed to the converters.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::format::{Converter, DispatchPolicy, FormatTable, OutputFormat};

/// One conversion: what to produce, from where, to where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    output_format: OutputFormat,
    input_path: PathBuf,
    output_path: PathBuf,
}

impl ConversionRequest {
    pub fn new(
        output_format: OutputFormat,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            output_format,
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }

    /// Build a request whose format comes from the destination's extension.
    pub fn by_extension(
        table: &FormatTable,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let output_path = output_path.into();
        let output_format = table.resolve(&output_path)?;
        Ok(Self::new(output_format, input_path, output_path))
    }

    /// Build a request whose format comes from an `img`/`txt` flag.
    pub fn by_flag(
        flag: &str,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let output_format = OutputFormat::from_flag(flag)?;
        Ok(Self::new(output_format, input_path, output_path))
    }

    /// Dispatch under `policy`. `format_arg` is only read for flag dispatch.
    pub fn dispatch(
        policy: DispatchPolicy,
        table: &FormatTable,
        format_arg: &str,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        match policy {
            DispatchPolicy::Extension => {
                log::debug!("Ignoring format argument '{}'", format_arg);
                Self::by_extension(table, input_path, output_path)
            }
            DispatchPolicy::Flag => Self::by_flag(format_arg, input_path, output_path),
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn converter(&self) -> Converter {
        self.output_format.converter()
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
