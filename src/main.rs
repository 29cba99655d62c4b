//! profcheck: verify that a ProfilesData protobuf file conforms to the
//! profiles dictionary conventions.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use profcheck::{read_profiles_file, CheckerConfig, ConformanceChecker, Finding, ValidationResult};

#[derive(Debug, Parser)]
#[command(name = "profcheck")]
#[command(about = "Check a ProfilesData file against the profiles signal conventions")]
#[command(version)]
struct Command {
    /// ProfilesData protobuf file (.pb, or .gz for gzip-compressed input)
    file: PathBuf,

    /// Enable check for duplicates in the dictionary string table
    #[arg(long)]
    check_dupes: bool,

    /// Enable check that all samples of a profile share one values/timestamps shape
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    check_sample_shapes: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log decoding and check details to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    file: String,
    valid: bool,
    findings: &'a [Finding],
}

fn print_report(path: &Path, result: &ValidationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if result.is_valid() {
                println!("{}: conformance checks passed", path.display());
            } else {
                println!("{}: conformance checks failed:", path.display());
                for finding in &result.findings {
                    println!("  {finding}");
                }
            }
        }
        OutputFormat::Json => {
            let report = Report {
                file: path.display().to_string(),
                valid: result.is_valid(),
                findings: &result.findings,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cmd = Command::parse();

    let default_level = if cmd.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let data = read_profiles_file(&cmd.file)?;
    info!(
        path = %cmd.file.display(),
        resource_profiles = data.resource_profiles.len(),
        "decoded profiles file"
    );

    let config = CheckerConfig {
        check_dictionary_duplicates: cmd.check_dupes,
        check_sample_timestamp_shape: cmd.check_sample_shapes,
    };
    let result = ConformanceChecker::new(config).check(&data);
    print_report(&cmd.file, &result, cmd.format)?;

    if result.has_errors() {
        process::exit(1);
    }
    Ok(())
}
