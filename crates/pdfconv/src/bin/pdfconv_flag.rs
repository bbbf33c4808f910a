//! pdfconv-flag — convert a PDF to an image or text, picked by an explicit flag.
//!
//! `pdfconv-flag <img|txt> <input_pdf> <output_file>`
//!
//! `img` always writes JPEG and `txt` always writes plain text, whatever the
//! output file is called.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use convert_core::format::{DispatchPolicy, FormatTable};
use convert_core::request::ConversionRequest;
use pdfconv::{parse_args, required, run_tool, CommonArgs};

#[derive(Parser)]
#[command(
    name = "pdfconv-flag",
    version,
    about = "Convert a PDF to a JPEG (img) or plain text (txt)"
)]
struct Cli {
    /// Output kind: img or txt
    #[arg(required_unless_present = "dump_config")]
    format_to: Option<String>,

    /// Input PDF
    #[arg(required_unless_present = "dump_config")]
    input_pdf: Option<PathBuf>,

    /// Output file (its extension is not inspected)
    #[arg(required_unless_present = "dump_config")]
    output_file: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let cli: Cli = parse_args();
    let table = FormatTable::standard();

    run_tool(&cli.common, || {
        let format_to = required(cli.format_to.clone(), "img|txt")?;
        ConversionRequest::dispatch(
            DispatchPolicy::Flag,
            &table,
            &format_to,
            required(cli.input_pdf.clone(), "input_pdf")?,
            required(cli.output_file.clone(), "output_file")?,
        )
    })
}
