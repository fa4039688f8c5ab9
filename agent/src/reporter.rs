//! Report orchestration
//!
//! Runs the full pipeline for one invocation: load corpus, normalize,
//! map onto the control catalog, assemble the HDF artifact, write it,
//! then run any requested external conversions.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{Local, Utc};

use compliance_kit::catalog::ControlCatalog;
use compliance_kit::corpus::{load_corpus, CorpusError};
use compliance_kit::pipeline::{format_summary, run_mapping};
use compliance_kit::profile::{run_timestamp, sanitize_artifact_name, ProfileDocument};

use crate::config::{ExportFormat, ReportConfig};
use crate::converter;
use crate::output;

/// Profile identity used when no template seeds the document
const PROFILE_NAME: &str = "Trivy Container Scan";
const PROFILE_TITLE: &str = "Automated scan of container image";

/// Run a report with the given configuration
pub fn run_report(config: &ReportConfig, scan_files: &[PathBuf]) -> Result<i32, ReportError> {
    let start = Instant::now();

    log::info!(
        "Starting compliance mapping of {} scan file(s)",
        scan_files.len()
    );
    if !config.quiet {
        println!();
        println!("Trivy Compliance Agent v{}", env!("CARGO_PKG_VERSION"));
        println!("Mapping {} Trivy scan file(s)...", scan_files.len());
    }

    let corpus = load_corpus(scan_files).map_err(ReportError::Corpus)?;
    let catalog = ControlCatalog::nist_800_53();
    let outcome = run_mapping(&corpus, &catalog);

    if !config.quiet {
        output::print_run_header(&corpus, &outcome.findings);
    }

    create_artifact_dirs(config)?;

    let artifact_name = sanitize_artifact_name(corpus.artifact_name());
    let timestamp = run_timestamp(Local::now());

    // Seed from a template if present; its existing controls are kept and
    // appended to.
    let mut doc = ProfileDocument::from_template(&config.template_path())
        .unwrap_or_else(|| ProfileDocument::minimal(PROFILE_NAME, PROFILE_TITLE));
    doc.append_evidence(&outcome.evidence, Utc::now());

    let hdf_filename = format!("trivy-hdf-{}_{}.json", artifact_name, timestamp);
    let hdf_path = config.hdf_dir().join(&hdf_filename);
    output::write_artifact(&hdf_path, &doc).map_err(ReportError::Output)?;

    if !config.quiet {
        output::print_control_summary(&outcome.evidence);
        println!("{}", format_summary(&outcome));
        println!();
        println!("MITRE SAF HDF (eMASS-ready) saved as {}", hdf_path.display());
        println!(
            "   → Upload with: saf emasser post findings -f {}",
            hdf_path.display()
        );
    }

    if config.export.wants_xccdf() {
        convert_xccdf(config, &artifact_name, &timestamp, &hdf_filename);
    }
    if config.export == ExportFormat::All && !config.quiet {
        println!("DISA STIG Viewer CKL generation is not available; skipping.");
    }

    log::info!(
        "Mapping complete: {} findings, {} mapped controls, {:.2}s",
        outcome.findings.len(),
        outcome.evidence.len(),
        start.elapsed().as_secs_f64()
    );
    if !config.quiet {
        println!();
        println!("Duration: {:.2}s", start.elapsed().as_secs_f64());
        println!();
    }

    // The artifact was produced; optional export failures do not change this
    Ok(0)
}

/// Create the MITRE artifact tree: hdf/, openscap/, ckl/
fn create_artifact_dirs(config: &ReportConfig) -> Result<(), ReportError> {
    for dir in [config.hdf_dir(), config.openscap_dir(), config.ckl_dir()] {
        std::fs::create_dir_all(&dir).map_err(|e| ReportError::CreateDir(dir.clone(), e))?;
    }
    Ok(())
}

/// Run the external XCCDF conversion; failures are reported, never fatal
fn convert_xccdf(config: &ReportConfig, artifact_name: &str, timestamp: &str, hdf_filename: &str) {
    let input_rel = format!("hdf/{}", hdf_filename);
    let output_rel = format!("openscap/{}_{}.xccdf.xml", artifact_name, timestamp);
    let xccdf_path = config.artifacts_dir().join(&output_rel);

    if !config.quiet {
        println!("Generating OpenSCAP XCCDF...");
    }
    match converter::convert_hdf_to_xccdf(&config.artifacts_dir(), &input_rel, &output_rel) {
        Ok(()) => {
            if !config.quiet {
                println!("OpenSCAP XCCDF saved as {}", xccdf_path.display());
            }
        }
        Err(e) => {
            log::warn!("XCCDF conversion failed: {}", e);
            eprintln!("Warning: XCCDF conversion failed: {}", e);
        }
    }
}

/// Errors that can occur while producing the report
#[derive(Debug)]
pub enum ReportError {
    /// Failed to build the scan corpus
    Corpus(CorpusError),
    /// Failed to create an artifact directory
    CreateDir(PathBuf, std::io::Error),
    /// Failed to generate or write the artifact
    Output(output::OutputError),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Corpus(e) => write!(f, "Corpus loading failed: {}", e),
            ReportError::CreateDir(path, e) => {
                write!(f, "Failed to create {}: {}", path.display(), e)
            }
            ReportError::Output(e) => write!(f, "Artifact generation failed: {}", e),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Corpus(e) => Some(e),
            ReportError::CreateDir(_, e) => Some(e),
            ReportError::Output(e) => Some(e),
        }
    }
}
