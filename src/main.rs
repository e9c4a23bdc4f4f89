//! Converts CP2K cube files with binary voxel data to standard cube files

// standard library
use std::path::PathBuf;
use std::process::ExitCode;

// cubetools modules
use cubetools::cube::{CubeConverter, FormattingMode};

// external crates
use clap::{ArgAction, Parser};
use log::error;

/// Converts CP2K cube files with binary voxel data to standard cube files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input cube file with binary voxel data
    infile: PathBuf,

    /// Output cube file
    outfile: PathBuf,

    /// Exactly match the CP2K non-binary output format
    #[arg(long = "exact_match", conflicts_with = "max_precision")]
    exact_match: bool,

    /// Print every significant digit of the binary values
    #[arg(long = "max_precision")]
    max_precision: bool,

    /// Show a running count of rows converted
    #[arg(long)]
    progress: bool,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// The three formatting options collapsed into one
    fn mode(&self) -> FormattingMode {
        if self.exact_match {
            FormattingMode::Legacy
        } else if self.max_precision {
            FormattingMode::MaxPrecision
        } else {
            FormattingMode::Standard
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut converter = CubeConverter::new();
    converter.set_mode(cli.mode());
    if !cli.progress {
        converter.disable_progress();
    }

    match converter.convert_file(&cli.infile, &cli.outfile) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", error_chain(&e));
            ExitCode::FAILURE
        }
    }
}

/// Warnings by default, more with every -v
fn init_logging(cli: &Cli) {
    let result = stderrlog::new()
        .module(module_path!())
        .module("cubetools_cube")
        .quiet(cli.quiet)
        .verbosity(cli.verbose as usize + 1)
        .show_level(true)
        .init();

    if let Err(e) = result {
        eprintln!("unable to initialise logging: {e}");
    }
}

/// Error message followed by every underlying cause
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message += &format!(": {cause}");
        source = cause.source();
    }
    message
}
