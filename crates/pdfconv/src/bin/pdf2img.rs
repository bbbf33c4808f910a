//! pdf2img — render the first page of a PDF to an image.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use convert_core::format::FormatTable;
use convert_core::request::ConversionRequest;
use pdfconv::{parse_args, required, run_tool, CommonArgs};

#[derive(Parser)]
#[command(name = "pdf2img", version, about = "Render the first page of a PDF to an image")]
struct Cli {
    /// Input PDF
    #[arg(required_unless_present = "dump_config")]
    input_pdf: Option<PathBuf>,

    /// Output image (.jpg .jpeg .png .bmp .tiff .gif)
    #[arg(required_unless_present = "dump_config")]
    output_image: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let cli: Cli = parse_args();
    let table = FormatTable::images_only();

    run_tool(&cli.common, || {
        ConversionRequest::by_extension(
            &table,
            required(cli.input_pdf.clone(), "input_pdf")?,
            required(cli.output_image.clone(), "output_image")?,
        )
    })
}
