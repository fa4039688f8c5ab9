//! Loading and merging scan documents
//!
//! Reads Trivy JSON files and merges them into a single `ScanCorpus`.
//! `Results` arrays concatenate in load order; every other top-level key is
//! last-write-wins. A file that is missing or unparseable contributes
//! nothing and is logged as a warning; an empty input set is fatal.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::trivy::ResultBlock;

/// The merged union of all loaded scan documents.
#[derive(Debug, Clone, Default)]
pub struct ScanCorpus {
    /// All Result blocks from all documents, concatenated, none dropped.
    pub results: Vec<ResultBlock>,
    /// All other top-level keys; last-loaded document wins per key.
    pub metadata: Map<String, Value>,
}

impl ScanCorpus {
    /// Scanned artifact name, e.g. `registry.example.com/app:1.2`.
    pub fn artifact_name(&self) -> &str {
        self.metadata
            .get("ArtifactName")
            .and_then(Value::as_str)
            .unwrap_or("unknown-image")
    }

    /// Short container name: last path segment, tag stripped.
    pub fn container_name(&self) -> &str {
        let image = self.artifact_name();
        let base = image.rsplit('/').next().unwrap_or(image);
        base.split(':').next().unwrap_or(base)
    }

    /// First repo digest from scanner metadata, if recorded.
    pub fn repo_digest(&self) -> &str {
        self.metadata
            .get("Metadata")
            .and_then(|m| m.get("RepoDigests"))
            .and_then(|d| d.get(0))
            .and_then(Value::as_str)
            .unwrap_or("No digest found")
    }
}

/// Errors that can occur while building a corpus
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The input set was empty; there is nothing to report on
    #[error("no Trivy scan files to load")]
    NoScanFiles,
}

/// Load and merge a set of scan documents.
///
/// Each path is parsed as JSON. Missing or malformed files are skipped with
/// a warning; one bad file never aborts the run. An empty `paths` set is a
/// fatal configuration error.
pub fn load_corpus(paths: &[PathBuf]) -> Result<ScanCorpus, CorpusError> {
    if paths.is_empty() {
        return Err(CorpusError::NoScanFiles);
    }

    let mut corpus = ScanCorpus::default();
    for path in paths {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Could not load {}: {}", path.display(), e);
                continue;
            }
        };
        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Could not load {}: {}", path.display(), e);
                continue;
            }
        };
        merge_document(&mut corpus, value, path);
    }
    Ok(corpus)
}

/// Merge one parsed document into the corpus.
fn merge_document(corpus: &mut ScanCorpus, value: Value, path: &Path) {
    let Value::Object(map) = value else {
        log::warn!(
            "Skipping {}: top level is not a JSON object",
            path.display()
        );
        return;
    };

    for (key, val) in map {
        if key == "Results" {
            match serde_json::from_value::<Vec<ResultBlock>>(val) {
                Ok(blocks) => corpus.results.extend(blocks),
                Err(e) => {
                    log::warn!("Skipping Results in {}: {}", path.display(), e);
                }
            }
        } else {
            // Last-write-wins for every non-Results key
            corpus.metadata.insert(key, val);
        }
    }
}
