//! The static control catalog
//!
//! A catalog is an immutable, injectable value: build it once at startup
//! and pass it by reference into the mapper. The default catalog is the
//! container-relevant subset of NIST 800-53 Rev5 — only controls that can
//! be meaningfully tested against a container image.

use serde::{Deserialize, Serialize};

use crate::finding::Finding;
use crate::severity::{rank_of, Severity};

/// One compliance-catalog entry: a testable security requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlDefinition {
    /// Control identifier, e.g. `SC-28`.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Case-insensitive keywords; an empty set means the control applies
    /// to every finding that clears the severity threshold.
    pub keywords: Vec<String>,
    /// Minimum severity that counts as a hit for this control.
    pub severity_threshold: Severity,
}

impl ControlDefinition {
    /// Whether a finding counts as evidence against this control.
    ///
    /// Both tests must hold: the finding's severity rank meets the
    /// threshold rank, and (unless the keyword set is empty) at least one
    /// keyword is a case-insensitive substring of the title or description.
    ///
    /// A LOW threshold admits every finding, including those whose severity
    /// string ranks 0; stricter thresholds compare ranks exactly.
    pub fn matches(&self, finding: &Finding) -> bool {
        if self.severity_threshold != Severity::Low
            && rank_of(&finding.severity) < self.severity_threshold.rank()
        {
            return false;
        }
        if self.keywords.is_empty() {
            return true;
        }
        let title = finding.title.to_lowercase();
        let description = finding.description.to_lowercase();
        self.keywords
            .iter()
            .any(|kw| title.contains(&kw.to_lowercase()) || description.contains(&kw.to_lowercase()))
    }
}

/// A read-only, ordered set of control definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlCatalog {
    controls: Vec<ControlDefinition>,
}

impl ControlCatalog {
    pub fn new(controls: Vec<ControlDefinition>) -> Self {
        Self { controls }
    }

    /// Controls in declaration order.
    pub fn controls(&self) -> &[ControlDefinition] {
        &self.controls
    }

    /// The default NIST 800-53 Rev5 container-relevant subset.
    pub fn nist_800_53() -> Self {
        fn control(
            id: &str,
            name: &str,
            description: &str,
            keywords: &[&str],
            severity_threshold: Severity,
        ) -> ControlDefinition {
            ControlDefinition {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                keywords: keywords.iter().map(|kw| kw.to_string()).collect(),
                severity_threshold,
            }
        }

        Self::new(vec![
            control(
                "SC-28",
                "Protection of Information at Rest",
                "Encrypt sensitive data at rest",
                &["crypto", "ssl", "tls", "cipher", "insecure"],
                Severity::High,
            ),
            control(
                "SI-2",
                "Flaw Remediation",
                "Identify, report, and correct system flaws",
                &[],
                Severity::Critical,
            ),
            control(
                "SI-7",
                "Software, Firmware, and Information Integrity",
                "Employ integrity verification tools",
                &["signature", "hash", "verification", "unsigned"],
                Severity::High,
            ),
            control(
                "CM-6",
                "Configuration Settings",
                "Establish and document configuration settings",
                &["config", "misconfiguration", "exposure", "debug"],
                Severity::Medium,
            ),
            control(
                "IA-5",
                "Authenticator Management",
                "Manage system authenticators",
                &["password", "credential", "secret", "key"],
                Severity::High,
            ),
            control(
                "AC-6",
                "Least Privilege",
                "Enforce least privilege",
                &["root", "privileged", "capability", "suid"],
                Severity::High,
            ),
            control(
                "SA-8",
                "Security and Privacy Engineering Principles",
                "Apply secure design principles",
                &["insecure", "deprecated", "vulnerable"],
                Severity::Medium,
            ),
            // All findings count, regardless of keyword
            control(
                "RA-5",
                "Vulnerability Monitoring and Scanning",
                "Monitor and scan for vulnerabilities",
                &[],
                Severity::Low,
            ),
        ])
    }
}
