use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("wrong number of arguments: {0}")]
    ArgumentCount(String),

    #[error("Unsupported file format '{extension}'. Supported formats: {supported}.")]
    UnsupportedFormat {
        extension: String,
        supported: String,
    },

    #[error("Invalid format specified: '{0}'. Expected 'img' or 'txt'.")]
    InvalidFlag(String),

    #[error("Error occurred while opening PDF: {}: {reason}", .path.display())]
    DocumentOpen { path: PathBuf, reason: String },

    #[error("Error occurred while opening output file: {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Library error: {0}")]
    Library(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
