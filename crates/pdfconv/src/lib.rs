//! Shared plumbing for the pdfconv command-line tools.
//!
//! Each binary parses its own positionals, flattens [`CommonArgs`] and hands
//! a request builder to [`run_tool`].

use std::path::PathBuf;
use std::process::{self, ExitCode};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Args, Parser};

use convert_core::error::ConvertError;
use convert_core::format::Converter;
use convert_core::options::ConversionOptions;
use convert_core::request::ConversionRequest;

/// Flags accepted by every tool.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// TOML file with conversion options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rendering resolution for image output (default: pdftoppm's own)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub dpi: Option<u16>,

    /// JPEG quality for image output (1-100, default 92)
    #[arg(long)]
    pub jpeg_quality: Option<u8>,

    /// pdftoppm executable to render pages with
    #[arg(long)]
    pub pdftoppm: Option<PathBuf>,

    /// Print the effective options as TOML and exit
    #[arg(long)]
    pub dump_config: bool,
}

/// Parse arguments, exiting with status 1 on any usage error.
///
/// `--help` and `--version` still print and exit 0.
pub fn parse_args<P: Parser>() -> P {
    match P::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                process::exit(1);
            }
        },
    }
}

/// Unwrap a positional that clap only guarantees when `--dump-config` is absent.
pub fn required<T>(value: Option<T>, name: &str) -> convert_core::error::Result<T> {
    value.ok_or_else(|| ConvertError::ArgumentCount(format!("missing <{}>", name)))
}

/// Build options: defaults → `--config` file → CLI flags.
pub fn load_options(common: &CommonArgs) -> Result<ConversionOptions> {
    let mut opts = match &common.config {
        Some(path) => ConversionOptions::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ConversionOptions::default(),
    };
    apply_cli_overrides(&mut opts, common);
    Ok(opts)
}

/// Apply CLI flags on top of config-loaded options.
/// Only overrides when the flag was given.
fn apply_cli_overrides(opts: &mut ConversionOptions, common: &CommonArgs) {
    if common.verbose > 0 {
        opts.verbose = common.verbose;
    }
    if common.dpi.is_some() {
        opts.pdf_dpi = common.dpi;
    }
    if let Some(quality) = common.jpeg_quality {
        opts.jpeg_quality = quality.clamp(1, 100);
    }
    if let Some(ref pdftoppm) = common.pdftoppm {
        opts.pdftoppm = pdftoppm.clone();
    }
}

/// Initialise env_logger. `RUST_LOG` wins over the verbosity count.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Load options, build the request, convert, and report.
///
/// Success prints one line to stdout; every failure prints `Error: ...` to
/// stderr and yields exit status 1.
pub fn run_tool<F>(common: &CommonArgs, build_request: F) -> ExitCode
where
    F: FnOnce() -> convert_core::error::Result<ConversionRequest>,
{
    let options = match load_options(common) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(options.verbose);

    if common.dump_config {
        return match options.to_toml_string() {
            Ok(s) => {
                println!("{}", s);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error serializing config: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let outcome = build_request().and_then(|request| {
        let summary = convert_pdf::run(&request, &options)?;
        Ok((request, summary))
    });

    match outcome {
        Ok((request, summary)) => {
            log::info!("Read {} page(s)", summary.pages);
            println!("{}", success_message(&request));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

pub fn success_message(request: &ConversionRequest) -> String {
    let target = match request.converter() {
        Converter::RenderPageToImage => "image",
        Converter::ExtractText => "text",
    };
    format!(
        "PDF successfully converted to {}: {}",
        target,
        request.output_path().display()
    )
}
