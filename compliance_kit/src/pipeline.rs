//! High-level mapping API
//!
//! Thin facade over the normalize → map phases, plus summary formatting
//! helpers for callers that only want strings.
//!
//! ## Example
//!
//! ```rust,ignore
//! let corpus = load_corpus(&scan_files)?;
//! let outcome = run_mapping(&corpus, &ControlCatalog::nist_800_53());
//! println!("{}", format_summary(&outcome));
//! ```

use crate::catalog::ControlCatalog;
use crate::corpus::ScanCorpus;
use crate::finding::Finding;
use crate::mapper::{map_findings, ControlEvidence};
use crate::normalize::extract_findings;

/// Everything the mapping phases produced for one run.
#[derive(Debug, Clone)]
pub struct MappingOutcome {
    /// Findings in normalization order.
    pub findings: Vec<Finding>,
    /// Evidence in catalog order; only controls with matches.
    pub evidence: Vec<ControlEvidence>,
}

impl MappingOutcome {
    /// Total evidence records across all controls (findings counted once
    /// per control they matched).
    pub fn evidence_records(&self) -> usize {
        self.evidence.iter().map(|ev| ev.findings.len()).sum()
    }
}

/// Run normalization and control mapping over a merged corpus.
pub fn run_mapping(corpus: &ScanCorpus, catalog: &ControlCatalog) -> MappingOutcome {
    let findings = extract_findings(corpus);
    let evidence = map_findings(catalog, &findings);
    MappingOutcome { findings, evidence }
}

/// One-line human-readable summary of a mapping run.
pub fn format_summary(outcome: &MappingOutcome) -> String {
    format!(
        "Findings: {} | Mapped controls: {} | Evidence records: {}",
        outcome.findings.len(),
        outcome.evidence.len(),
        outcome.evidence_records()
    )
}
