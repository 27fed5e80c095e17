//! mirth: Command-line front end for the Mirth scanner.
//!
//! Usage:
//!   mirth [options] [file...]
//!
//! Each file is scanned to its end or its first lexical error. Tokens go to
//! stdout; diagnostics go to stderr.

mod logging;
mod render;

use clap::Parser as ClapParser;
use logging::LogFormat;
use mirth_core::source::{SourceError, SourceText};
use mirth_options::{MirthConfig, ScannerOptions};
use mirth_scanner::{ScanOutput, Scanner};
use rayon::prelude::*;
use serde::Serialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;
use tracing::{debug, info};

const DEFAULT_CONFIG: &str = "mirth.json";

#[derive(ClapParser, Debug)]
#[command(name = "mirth", about = "mirth - Scan Mirth source files into tokens", version)]
struct Cli {
    /// Mirth source files to scan.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Path to mirth.json. Defaults to ./mirth.json when present.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Token output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable coloured diagnostics.
    #[arg(long)]
    no_color: bool,

    /// Open interpolations allowed before the nesting warning fires.
    #[arg(long)]
    max_interpolation_depth: Option<usize>,

    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// The result of scanning one file.
struct FileReport {
    source: SourceText,
    output: ScanOutput,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    file: &'a str,
    #[serde(flatten)]
    output: &'a ScanOutput,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_format, cli.verbose);
    let exit_code = run_scan(&cli);
    process::exit(exit_code);
}

fn run_scan(cli: &Cli) -> i32 {
    let start = Instant::now();
    let use_color = !cli.no_color && std::io::stderr().is_terminal();

    let config = match load_config(cli) {
        Ok(config) => config,
        Err(message) => {
            print_error(&message);
            return 1;
        }
    };

    let files = resolve_input_files(cli, &config);
    if files.is_empty() {
        print_error("No input files found.");
        return 1;
    }

    // CLI options override mirth.json
    let mut options = config.scanner;
    if let Some(depth) = cli.max_interpolation_depth {
        options.max_interpolation_depth = depth;
    }
    info!(files = files.len(), max_interpolation_depth = options.max_interpolation_depth, "scanning");

    // Scanners share nothing, so files are scanned in parallel. `collect`
    // keeps input order.
    let results: Vec<Result<FileReport, SourceError>> = files
        .par_iter()
        .map(|path| scan_file(path, options))
        .collect();

    let mut io_failures = 0;
    let mut lexical_errors = 0;
    let mut reports = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(report) => {
                if report.output.has_error() {
                    lexical_errors += 1;
                }
                reports.push(report);
            }
            Err(err) => {
                io_failures += 1;
                print_error(&err.to_string());
            }
        }
    }

    match cli.format {
        OutputFormat::Text => print_text(&reports, use_color),
        OutputFormat::Json => {
            if let Err(err) = print_json(&reports) {
                print_error(&format!("Failed to write JSON output: {}", err));
                return 1;
            }
        }
    }

    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "scan finished");

    if io_failures > 0 {
        return 1;
    }
    if lexical_errors > 0 {
        eprintln!(
            "\nFound {} error{}.",
            lexical_errors,
            if lexical_errors == 1 { "" } else { "s" }
        );
        return 2;
    }
    0
}

fn load_config(cli: &Cli) -> Result<MirthConfig, String> {
    if let Some(ref path) = cli.config {
        return mirth_options::parse_config_file(path)
            .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e));
    }
    let default_path = Path::new(DEFAULT_CONFIG);
    if default_path.exists() {
        return mirth_options::parse_config_file(default_path)
            .map_err(|e| format!("Failed to read {}: {}", DEFAULT_CONFIG, e));
    }
    Ok(MirthConfig::default())
}

/// Files named on the command line, or else the config's `files` resolved
/// against the config's directory.
fn resolve_input_files(cli: &Cli, config: &MirthConfig) -> Vec<PathBuf> {
    if !cli.files.is_empty() {
        return cli.files.clone();
    }
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let root_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    config.files().iter().map(|f| root_dir.join(f)).collect()
}

fn scan_file(path: &Path, options: ScannerOptions) -> Result<FileReport, SourceError> {
    let source = SourceText::read(path)?;
    let output = Scanner::with_options(source.text(), options).scan_to_end();
    debug!(
        file = source.name(),
        tokens = output.tokens.len(),
        warnings = output.warnings.len(),
        failed = output.has_error(),
        "scanned file"
    );
    Ok(FileReport { source, output })
}

fn print_text(reports: &[FileReport], use_color: bool) {
    let show_headers = reports.len() > 1;
    for report in reports {
        let name = report.source.name();
        if show_headers {
            println!("==> {} <==", name);
        }
        for token in &report.output.tokens {
            println!("{}\t{}\t{:?}", token.position, token.kind, token.text);
        }
        for diagnostic in report
            .output
            .warnings
            .iter()
            .chain(report.output.error.as_ref())
        {
            eprint!(
                "{}",
                render::render(diagnostic, name, report.source.text(), use_color)
            );
        }
    }
}

fn print_json(reports: &[FileReport]) -> Result<(), serde_json::Error> {
    let json: Vec<JsonReport<'_>> = reports
        .iter()
        .map(|report| JsonReport {
            file: report.source.name(),
            output: &report.output,
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn print_error(msg: &str) {
    eprintln!("error: {}", msg);
}
