//! interop-preflight CLI entry point
//!
//! Conformance checks for OpenCL external memory and external semaphore
//! capability reporting.

use clap::error::ErrorKind;
use clap::Parser;
use interop_preflight::cli::args::{Args, Command};
use interop_preflight::cli::output::get_formatter;
use interop_preflight::config::FileConfig;
use interop_preflight::version::get_build_info;
use interop_preflight::{run_preflight, PreflightConfig, PreflightError, Suite};
use tracing_subscriber::EnvFilter;

use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(3);
        }
    };

    init_logging(&args);

    match args.command() {
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
        Command::List => {
            print_suite_list();
            ExitCode::SUCCESS
        }
        Command::Check => match run_checks(&args) {
            Ok(code) => ExitCode::from(code),
            Err(e) => {
                eprintln!("Error running checks: {}", e);
                ExitCode::from(3)
            }
        },
    }
}

/// Diagnostics go to stderr so report output on stdout stays parseable.
fn init_logging(args: &Args) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!no_color(args))
        .try_init();
}

fn no_color(args: &Args) -> bool {
    args.no_color || std::env::var_os("NO_COLOR").is_some()
}

fn print_version() {
    let info = get_build_info();
    println!("{}", info);
}

fn print_suite_list() {
    println!("Available suites:");
    println!();
    for suite in Suite::ALL {
        println!("  {:<15}{}", suite.name(), suite.description());
    }
}

fn run_checks(args: &Args) -> Result<u8, PreflightError> {
    let file = match args.config {
        Some(ref path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let config = PreflightConfig::from_args(args, &file);
    let format = args.format.or(file.format).unwrap_or_default();
    let formatter = get_formatter(format, no_color(args), args.verbose, args.quiet)?;

    let report = run_preflight(&config)?;
    println!("{}", formatter.format(&report));

    Ok(report.exit_code())
}
