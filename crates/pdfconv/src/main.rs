//! pdfconv — convert a PDF to an image or text, picked by the output extension.
//!
//! `pdfconv <format_to> <input_pdf> <output_file>`
//!
//! The format argument is accepted for compatibility and never consulted:
//! `out.png` renders page 1 as PNG, `out.txt` extracts every page's text.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use convert_core::format::{DispatchPolicy, FormatTable};
use convert_core::request::ConversionRequest;
use pdfconv::{parse_args, required, run_tool, CommonArgs};

#[derive(Parser)]
#[command(
    name = "pdfconv",
    version,
    about = "Convert a PDF to an image or plain text, chosen by the output file's extension"
)]
struct Cli {
    /// Requested format (ignored; the output extension decides)
    #[arg(required_unless_present = "dump_config")]
    format_to: Option<String>,

    /// Input PDF
    #[arg(required_unless_present = "dump_config")]
    input_pdf: Option<PathBuf>,

    /// Output file (.jpg .jpeg .png .bmp .tiff .gif .txt .docx .odt)
    #[arg(required_unless_present = "dump_config")]
    output_file: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let cli: Cli = parse_args();
    let table = FormatTable::standard();

    run_tool(&cli.common, || {
        let format_to = cli.format_to.clone().unwrap_or_default();
        ConversionRequest::dispatch(
            DispatchPolicy::Extension,
            &table,
            &format_to,
            required(cli.input_pdf.clone(), "input_pdf")?,
            required(cli.output_file.clone(), "output_file")?,
        )
    })
}
