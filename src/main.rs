use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tyson_core::{compile_tyson, TysonOptions, UnknownFieldPolicy};

/// Compile tyson documents (relaxed, optionally typed object literals) to
/// strict JSON.
#[derive(Parser, Debug)]
#[command(
    name = "tyson",
    version,
    about = "Compile .tyson files (JSON with comments, bare keys, trailing commas, and an optional type header) to strict JSON"
)]
struct Cli {
    /// Input .tyson file.
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output .json file. Defaults to the input path with a .json extension.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Interface declaration file to validate against.
    #[arg(short = 'f', long = "interface", value_name = "FILE")]
    interface: Option<PathBuf>,

    /// Interface name to validate against.
    #[arg(short = 'n', long = "interface-name", value_name = "NAME")]
    interface_name: Option<String>,

    /// Project build settings, passed through to the declaration provider.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Permit object fields the interface does not declare.
    #[arg(long)]
    allow_unknown_fields: bool,

    /// Enable debug output (dumps the normalized text on decode failure).
    #[arg(short = 'd', long)]
    debug: bool,

    /// Input then output, when given without flags.
    #[arg(value_name = "FILE")]
    positional: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .init();

    let mut positional = cli.positional.into_iter();
    let Some(input_file) = cli.input.or_else(|| positional.next()) else {
        eprintln!("error: an input file is required (pass it positionally or with --input)");
        return ExitCode::from(2);
    };
    if !input_file.exists() {
        eprintln!("error: input file {} does not exist", input_file.display());
        return ExitCode::from(2);
    }
    let output_file = cli
        .output
        .or_else(|| positional.next())
        .unwrap_or_else(|| input_file.with_extension("json"));

    let options = TysonOptions {
        input_file,
        output_file: Some(output_file),
        interface_file: cli.interface,
        interface_name: cli.interface_name,
        extra_config: cli.config,
        unknown_fields: if cli.allow_unknown_fields {
            UnknownFieldPolicy::Allow
        } else {
            UnknownFieldPolicy::Deny
        },
        debug: cli.debug,
    };

    match compile_tyson(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::FAILURE
        }
    }
}
