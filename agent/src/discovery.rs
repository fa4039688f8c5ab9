//! Scan file discovery
//!
//! Finds Trivy output files in the scans directory by filename prefix.
//! Files are grouped by category in the order vulnerability, secret,
//! misconfiguration, license; cross-category ordering beyond that grouping
//! is not a contract consumers may rely on.

use std::path::{Path, PathBuf};

/// Filename prefixes, in grouping order
const CATEGORY_PREFIXES: [&str; 4] = ["vuln_", "secret_", "misconfig_", "license_"];

/// Discover all Trivy scan JSON files in a directory
///
/// Returns the matching `<prefix>*.json` files grouped by category,
/// sorted within each category. An empty result is not an error here;
/// the caller decides whether that is fatal.
pub fn discover_scan_files(scans_dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !scans_dir.is_dir() {
        return Err(DiscoveryError::MissingScansDir(scans_dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(scans_dir)
        .map_err(|e| DiscoveryError::ReadDir(scans_dir.to_path_buf(), e))?;

    let mut by_category: Vec<Vec<PathBuf>> = vec![Vec::new(); CATEGORY_PREFIXES.len()];
    for entry in entries {
        let entry = entry.map_err(|e| DiscoveryError::ReadEntry(scans_dir.to_path_buf(), e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".json") {
            continue;
        }
        if let Some(idx) = CATEGORY_PREFIXES
            .iter()
            .position(|prefix| name.starts_with(prefix))
        {
            by_category[idx].push(path);
        }
    }

    let mut scan_files = Vec::new();
    for mut category in by_category {
        category.sort();
        scan_files.extend(category);
    }
    Ok(scan_files)
}

/// Errors that can occur during file discovery
#[derive(Debug)]
pub enum DiscoveryError {
    /// The scans directory does not exist
    MissingScansDir(PathBuf),
    /// Failed to read directory
    ReadDir(PathBuf, std::io::Error),
    /// Failed to read directory entry
    ReadEntry(PathBuf, std::io::Error),
}

impl std::fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryError::MissingScansDir(p) => {
                write!(f, "Scans directory not found: {}", p.display())
            }
            DiscoveryError::ReadDir(p, e) => {
                write!(f, "Failed to read directory {}: {}", p.display(), e)
            }
            DiscoveryError::ReadEntry(p, e) => {
                write!(f, "Failed to read entry in {}: {}", p.display(), e)
            }
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiscoveryError::MissingScansDir(_) => None,
            DiscoveryError::ReadDir(_, e) | DiscoveryError::ReadEntry(_, e) => Some(e),
        }
    }
}
