//! The normalized finding model
//!
//! One `Finding` per security-relevant observation, regardless of which
//! Trivy section it came from. Created once during normalization and
//! immutable afterward.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of observation a finding records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingType {
    Vulnerability,
    Misconfiguration,
    Secret,
}

impl fmt::Display for FindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingType::Vulnerability => f.write_str("vulnerability"),
            FindingType::Misconfiguration => f.write_str("misconfiguration"),
            FindingType::Secret => f.write_str("secret"),
        }
    }
}

/// A normalized security finding.
///
/// `severity` is the scanner's string verbatim; it is never revalidated
/// against the known levels. The package/version fields are only filled
/// for vulnerability findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub finding_type: FindingType,
    pub id: String,
    pub title: String,
    pub severity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installed_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_version: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer_digest: Option<String>,
}
