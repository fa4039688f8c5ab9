//! Command-line interface parsing
//!
//! Handles argument parsing, validation, and help text generation.

use std::path::PathBuf;

use crate::config::{ExportFormat, ReportConfig};

/// CLI parsing result
pub enum CliResult {
    /// Run the report with this configuration
    Run(ReportConfig),
    /// Show help and exit
    Help,
    /// Error with message
    Error(String),
}

/// Parse command-line arguments
pub fn parse_args(args: &[String]) -> CliResult {
    let program_name = args
        .first()
        .map(|s| s.as_str())
        .unwrap_or("trivy_compliance_agent");

    let mut base_dir: Option<&str> = None;
    let mut export = ExportFormat::Hdf;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args.get(i).map(|s| s.as_str()) {
            Some("--help" | "-h") => {
                return CliResult::Help;
            }
            Some("--quiet" | "-q") => {
                quiet = true;
            }
            Some("--export" | "-e") => {
                i += 1;
                match args.get(i).map(|s| s.as_str()) {
                    Some("hdf") => export = ExportFormat::Hdf,
                    Some("xccdf") => export = ExportFormat::Xccdf,
                    Some("all") => export = ExportFormat::All,
                    Some(other) => {
                        return CliResult::Error(format!(
                            "Unknown export '{}'. Use: hdf, xccdf, all",
                            other
                        ));
                    }
                    None => return CliResult::Error("--export requires a value".to_string()),
                }
            }
            Some(arg) if !arg.starts_with('-') => {
                base_dir = Some(arg);
            }
            Some(arg) => {
                return CliResult::Error(format!("Unknown option: {}", arg));
            }
            None => break,
        }
        i += 1;
    }

    let base_dir = match base_dir {
        Some(p) => PathBuf::from(p),
        None => {
            return CliResult::Error(format!(
                "Missing base directory\nUsage: {} [OPTIONS] <directory>",
                program_name
            ));
        }
    };

    if !base_dir.is_dir() {
        return CliResult::Error(format!("Directory not found: {}", base_dir.display()));
    }

    CliResult::Run(ReportConfig {
        base_dir,
        export,
        quiet,
    })
}

/// Print full help text
pub fn print_help(program_name: &str) {
    println!("Trivy Compliance Agent v{}", env!("CARGO_PKG_VERSION"));
    println!("Trivy scan results to NIST 800-53 Rev5 compliance artifacts\n");

    println!("USAGE:");
    println!(
        "    {} [OPTIONS] <directory>      Map scans under <directory>/trivy_scans",
        program_name
    );
    println!(
        "    {} --help                     Show this help message\n",
        program_name
    );

    println!("OPTIONS:");
    println!("    -h, --help                  Show this help message");
    println!("    -q, --quiet                 Suppress console output");
    println!("    -e, --export <format>       Artifacts to export: hdf (default), xccdf, all");
    println!();

    println!("EXPORTS:");
    println!("    hdf           MITRE SAF HDF JSON, eMASS-ready (default)");
    println!("    xccdf         HDF plus OpenSCAP XCCDF via the mitre/saf converter");
    println!("    all           Everything above");
    println!();

    println!("INPUT:");
    println!("    <directory>/trivy_scans/ holding vuln_*.json, secret_*.json,");
    println!("    misconfig_*.json and license_*.json Trivy output files.");
    println!();

    println!("OUTPUT:");
    println!("    <directory>/MITRE/hdf/trivy-hdf-<image>_<timestamp>.json");
    println!("    <directory>/MITRE/openscap/<image>_<timestamp>.xccdf.xml (with --export xccdf)");
    println!();

    println!("EXIT CODES:");
    println!("    0    HDF artifact produced (converter failures are non-fatal)");
    println!("    2    Execution error");
}
