//! Output generation module
//!
//! Serializes the assembled HDF profile document and writes it to disk,
//! plus human-readable console output.

mod console;

pub use console::{print_control_summary, print_run_header};

use std::path::Path;

use compliance_kit::profile::ProfileDocument;

/// Serialize an HDF document to pretty JSON
pub fn build_artifact_json(doc: &ProfileDocument) -> Result<String, OutputError> {
    serde_json::to_string_pretty(doc).map_err(|e| OutputError::Serialization(e.to_string()))
}

/// Write an HDF document to the given path
pub fn write_artifact(path: &Path, doc: &ProfileDocument) -> Result<(), OutputError> {
    let json = build_artifact_json(doc)?;
    std::fs::write(path, &json)
        .map_err(|e| OutputError::WriteFile(path.display().to_string(), e))?;
    Ok(())
}

/// Errors that can occur during output generation
#[derive(Debug)]
pub enum OutputError {
    /// Failed to serialize the artifact
    Serialization(String),
    /// Failed to write the artifact file
    WriteFile(String, std::io::Error),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Serialization(msg) => write!(f, "Failed to serialize output: {}", msg),
            OutputError::WriteFile(path, e) => write!(f, "Failed to write {}: {}", path, e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Serialization(_) => None,
            OutputError::WriteFile(_, e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_write_artifact_round_trip() {
        let dir = std::env::temp_dir().join(format!("agent_output_{}", std::process::id()));
        let _ = fs::create_dir_all(&dir);
        let path: PathBuf = dir.join("artifact.json");

        let doc = ProfileDocument::minimal("Trivy Container Scan", "Automated scan");
        write_artifact(&path, &doc).expect("write");

        let raw = fs::read_to_string(&path).expect("read back");
        let parsed: ProfileDocument = serde_json::from_str(&raw).expect("parse back");
        assert_eq!(parsed, doc);

        let _ = fs::remove_dir_all(&dir);
    }
}
