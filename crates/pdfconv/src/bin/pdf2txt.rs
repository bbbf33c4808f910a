//! pdf2txt — extract the text of every page of a PDF.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use convert_core::format::{OutputFormat, TextKind};
use convert_core::request::ConversionRequest;
use pdfconv::{parse_args, required, run_tool, CommonArgs};

#[derive(Parser)]
#[command(name = "pdf2txt", version, about = "Extract the text of every page of a PDF")]
struct Cli {
    /// Input PDF
    #[arg(required_unless_present = "dump_config")]
    input_pdf: Option<PathBuf>,

    /// Output text file
    #[arg(required_unless_present = "dump_config")]
    output_txt: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let cli: Cli = parse_args();

    run_tool(&cli.common, || {
        Ok(ConversionRequest::new(
            OutputFormat::Text(TextKind::Plain),
            required(cli.input_pdf.clone(), "input_pdf")?,
            required(cli.output_txt.clone(), "output_txt")?,
        ))
    })
}
