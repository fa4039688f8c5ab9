//! # Trivy Compliance Agent
//!
//! Converts Trivy container scan output into NIST 800-53 Rev5 compliance
//! artifacts (MITRE SAF HDF, optionally OpenSCAP XCCDF via the SAF
//! converter).
//!
//! ## Usage
//!
//! ```bash
//! # Map scans under ./artifacts/trivy_scans and write the HDF artifact
//! trivy_compliance_agent ./artifacts
//!
//! # Also run the hdf2xccdf converter
//! trivy_compliance_agent --export xccdf ./artifacts
//! ```
//!
//! ## Exports
//!
//! - **hdf** (default): MITRE SAF HDF JSON, eMASS-ready
//! - **xccdf**: HDF plus an OpenSCAP XCCDF converted by `mitre/saf`
//! - **all**: everything above
//!
//! The exit code reflects only whether the HDF artifact was produced;
//! converter failures are reported but non-fatal.

mod cli;
mod config;
mod converter;
mod discovery;
mod output;
mod reporter;

use cli::{parse_args, print_help, CliResult};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args
        .first()
        .map(|s| s.as_str())
        .unwrap_or("trivy_compliance_agent");

    let exit_code = match parse_args(&args) {
        CliResult::Help => {
            print_help(program_name);
            0
        }
        CliResult::Error(msg) => {
            eprintln!("Error: {}", msg);
            2
        }
        CliResult::Run(config) => match run(config) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {}", e);
                2
            }
        },
    };

    std::process::exit(exit_code);
}

/// Run the report with the given configuration
fn run(config: config::ReportConfig) -> Result<i32, Box<dyn std::error::Error>> {
    let scan_files = discovery::discover_scan_files(&config.scans_dir())?;

    if scan_files.is_empty() {
        return Err(format!(
            "No Trivy scan JSON files found in {}",
            config.scans_dir().display()
        )
        .into());
    }

    let exit_code = reporter::run_report(&config, &scan_files)?;
    Ok(exit_code)
}
