//! Configuration types for the compliance agent
//!
//! Defines the configuration structures used throughout the agent.

use std::path::PathBuf;

/// Fixed subdirectory the scanner drops its JSON files into
pub const SCANS_SUBDIR: &str = "trivy_scans";

/// Root of the artifact tree the agent writes
pub const ARTIFACTS_SUBDIR: &str = "MITRE";

/// Optional HDF seed template looked up in the base directory
pub const TEMPLATE_FILENAME: &str = "container_hardening.hdf.json";

/// Which artifacts a run exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// MITRE SAF HDF JSON only
    Hdf,
    /// HDF plus the converted OpenSCAP XCCDF
    Xccdf,
    /// Every available export
    All,
}

impl ExportFormat {
    /// Whether this selection runs the external XCCDF converter
    pub fn wants_xccdf(self) -> bool {
        matches!(self, ExportFormat::Xccdf | ExportFormat::All)
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Hdf => write!(f, "hdf"),
            ExportFormat::Xccdf => write!(f, "xccdf"),
            ExportFormat::All => write!(f, "all"),
        }
    }
}

/// Configuration for a report run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Base directory holding `trivy_scans/`; artifacts land under
    /// `<base>/MITRE/`
    pub base_dir: PathBuf,

    /// Which artifacts to export
    pub export: ExportFormat,

    /// Suppress progress output
    pub quiet: bool,
}

impl ReportConfig {
    /// Directory expected to contain the scan JSON files
    pub fn scans_dir(&self) -> PathBuf {
        self.base_dir.join(SCANS_SUBDIR)
    }

    /// Root of the artifact tree
    pub fn artifacts_dir(&self) -> PathBuf {
        self.base_dir.join(ARTIFACTS_SUBDIR)
    }

    /// Where the HDF artifact is written
    pub fn hdf_dir(&self) -> PathBuf {
        self.artifacts_dir().join("hdf")
    }

    /// Where converted XCCDF files are written
    pub fn openscap_dir(&self) -> PathBuf {
        self.artifacts_dir().join("openscap")
    }

    /// Reserved for CKL checklists
    pub fn ckl_dir(&self) -> PathBuf {
        self.artifacts_dir().join("ckl")
    }

    /// Optional HDF template path in the base directory
    pub fn template_path(&self) -> PathBuf {
        self.base_dir.join(TEMPLATE_FILENAME)
    }
}
