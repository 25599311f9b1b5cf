use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, info};
use simple_logger::SimpleLogger;

use rtl::{EncodeOptions, ParseOptions, Pattern, encode, parse_file_with, parse_with, save_to_file};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pattern file to read, standard input if omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Write the re-encoded pattern here instead of standard output
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Only check the pattern, write nothing
    #[arg(short = 'c', long)]
    check: bool,

    /// Errors reported before the rest are counted silently
    #[arg(short = 'e', long, default_value_t = 4)]
    max_errors: usize,

    /// Line width of the encoded body
    #[arg(short = 'w', long, default_value_t = 80)]
    width: usize,

    /// Log more detail (repeat for more)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let options = ParseOptions {
        max_errors: args.max_errors,
        ..ParseOptions::default()
    };
    let pattern: Pattern = match &args.file {
        Some(path) => parse_file_with(path, &options)?,
        None => parse_with(io::stdin().lock(), "stdin", &options)?,
    };
    info!(
        "{}x{} grid, {} live cell{}, rule {}",
        pattern.grid.width(),
        pattern.grid.height(),
        pattern.grid.population(),
        if pattern.grid.population() == 1 { "" } else { "s" },
        pattern.rules
    );
    if args.check {
        return Ok(());
    }

    let options = EncodeOptions {
        line_width: args.width,
        ..EncodeOptions::default()
    };
    match &args.output {
        Some(path) => save_to_file(&pattern, path, &options),
        None => Ok(encode(&pattern.grid, &pattern.rules, &options, &mut io::stdout().lock())?),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = SimpleLogger::new().with_level(level(args.verbose)).init() {
        eprintln!("Failed to initialise logging: {err}");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
