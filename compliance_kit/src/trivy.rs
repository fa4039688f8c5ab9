//! Source record shapes for Trivy scan documents
//!
//! Trivy omits fields freely, so every field here is optional or defaulted.
//! Defaults for the normalized model are applied explicitly in `normalize`,
//! not here.

use serde::{Deserialize, Serialize};

/// One `Results` block: a scanned target with its raw findings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResultBlock {
    pub target: Option<String>,
    pub class: Option<String>,
    pub vulnerabilities: Vec<VulnerabilityRecord>,
    pub misconfigurations: Vec<MisconfigurationRecord>,
    pub secrets: Vec<SecretRecord>,
}

/// A raw vulnerability record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VulnerabilityRecord {
    #[serde(rename = "VulnerabilityID")]
    pub vulnerability_id: Option<String>,
    pub title: Option<String>,
    pub severity: Option<String>,
    pub pkg_name: Option<String>,
    pub installed_version: Option<String>,
    pub fixed_version: Option<String>,
    pub description: Option<String>,
    pub references: Vec<String>,
    pub published_date: Option<String>,
    pub layer: Option<LayerRef>,
}

/// Layer provenance attached to a vulnerability record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LayerRef {
    #[serde(rename = "DiffID")]
    pub diff_id: Option<String>,
    pub digest: Option<String>,
}

/// A raw misconfiguration record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MisconfigurationRecord {
    #[serde(rename = "ID")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub severity: Option<String>,
    pub message: Option<String>,
    pub references: Vec<String>,
}

/// A raw exposed-secret record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SecretRecord {
    #[serde(rename = "RuleID")]
    pub rule_id: Option<String>,
    pub title: Option<String>,
    pub severity: Option<String>,
    #[serde(rename = "Match")]
    pub match_text: Option<String>,
}
