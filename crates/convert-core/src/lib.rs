//! Shared types for the pdfconv tools: output formats, the format table,
//! conversion requests, options and the error type.

pub mod error;
pub mod format;
pub mod options;
pub mod request;
