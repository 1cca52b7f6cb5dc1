//! Command line entry point: renders typed CSV files as text tables on stdout.

use anyhow::Context;
use anyhow::Result;
use clap::builder::BoolishValueParser;
use clap::Parser;
use rusty_grid::Converter;
use rusty_grid::ConverterOptions;
use std::io::BufWriter;
use std::io::Write;
use std::process::ExitCode;
use tracing::error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Render a typed CSV file as a text table
#[derive(Parser, Debug)]
#[command(name = "converter")]
#[command(version)]
struct Args {
    /// Input csv file, glob pattern or file:// URL
    #[arg(short = 'f', long = "file")]
    file: String,

    /// Allow empty values in the input csv file
    #[arg(short = 'e', long, env = "CONVERTER_ALLOW_EMPTY", value_parser = BoolishValueParser::new())]
    allow_empty: bool,

    /// Allow any header type as is
    #[arg(short = 'd', long, env = "CONVERTER_ANY_HEADER", value_parser = BoolishValueParser::new())]
    any_header: bool,

    /// Field delimiter, a single ASCII character
    #[arg(long, default_value = ";", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Input encoding label (e.g. windows-1251) or Windows code page number
    #[arg(long, env = "CONVERTER_ENCODING")]
    encoding: Option<String>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!("delimiter must be a single ASCII character, got '{value}'")),
    }
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let options = ConverterOptions {
        allow_empty: args.allow_empty,
        any_header: args.any_header,
        delimiter: args.delimiter,
        encoding: args.encoding,
    };
    let stdout = std::io::stdout();
    let mut sink = BufWriter::new(stdout.lock());
    let tables = Converter::new(args.file.as_str(), options)
        .run(&mut sink)
        .with_context(|| format!("Failed to convert '{}'", args.file))?;
    sink.flush().context("Failed to write output")?;
    info!(tables, "conversion finished");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(&args.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "converter started");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
