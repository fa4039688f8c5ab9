//! External format converter invocation
//!
//! Shells out to the MITRE SAF CLI (via its container image) to convert a
//! written HDF artifact into sibling checklist/benchmark formats. The call
//! blocks with no timeout; a nonzero exit or spawn failure is reported to
//! the caller, which treats it as a non-fatal failure of that one export.

use std::path::Path;
use std::process::Command;

/// Converter container image
const SAF_IMAGE: &str = "mitre/saf:latest";

/// Convert an HDF artifact to OpenSCAP XCCDF
///
/// `share_dir` is mounted into the container; `input_rel` and `output_rel`
/// are paths relative to it (e.g. `hdf/scan.json`, `openscap/scan.xccdf.xml`).
pub fn convert_hdf_to_xccdf(
    share_dir: &Path,
    input_rel: &str,
    output_rel: &str,
) -> Result<(), ConverterError> {
    run_saf_convert(share_dir, "hdf2xccdf", input_rel, output_rel)
}

fn run_saf_convert(
    share_dir: &Path,
    subcommand: &str,
    input_rel: &str,
    output_rel: &str,
) -> Result<(), ConverterError> {
    let volume = format!("{}:/share", share_dir.display());

    let status = Command::new("docker")
        .args([
            "run",
            "--rm",
            "-v",
            &volume,
            "-w",
            "/share",
            SAF_IMAGE,
            "convert",
            subcommand,
            "-i",
            input_rel,
            "-o",
            output_rel,
        ])
        .status()
        .map_err(|e| ConverterError::Spawn(subcommand.to_string(), e))?;

    if status.success() {
        Ok(())
    } else {
        Err(ConverterError::Failed(
            subcommand.to_string(),
            status.code(),
        ))
    }
}

/// Errors that can occur while running the external converter
#[derive(Debug)]
pub enum ConverterError {
    /// The converter process could not be started
    Spawn(String, std::io::Error),
    /// The converter exited with a nonzero status
    Failed(String, Option<i32>),
}

impl std::fmt::Display for ConverterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConverterError::Spawn(subcommand, e) => {
                write!(f, "Could not start saf {}: {}", subcommand, e)
            }
            ConverterError::Failed(subcommand, Some(code)) => {
                write!(f, "saf {} exited with status {}", subcommand, code)
            }
            ConverterError::Failed(subcommand, None) => {
                write!(f, "saf {} terminated by signal", subcommand)
            }
        }
    }
}

impl std::error::Error for ConverterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConverterError::Spawn(_, e) => Some(e),
            ConverterError::Failed(..) => None,
        }
    }
}
