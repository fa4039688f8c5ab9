//! Corpus-to-findings extraction
//!
//! Single pass over the corpus, order-preserving: within each Result block,
//! vulnerabilities, then misconfigurations, then secrets. Every default for
//! an absent source field is applied here, explicitly.
//!
//! A record missing its required identifier is skipped with a warning; the
//! pass continues (the lenient reading of the source contract, recorded in
//! DESIGN.md).

use crate::corpus::ScanCorpus;
use crate::finding::{Finding, FindingType};
use crate::trivy::{MisconfigurationRecord, SecretRecord, VulnerabilityRecord};

/// Severity used when the scanner omitted one.
const DEFAULT_SEVERITY: &str = "UNKNOWN";

/// Extract the normalized finding list from a merged corpus.
pub fn extract_findings(corpus: &ScanCorpus) -> Vec<Finding> {
    let mut findings = Vec::new();
    for block in &corpus.results {
        for vuln in &block.vulnerabilities {
            if let Some(finding) = normalize_vulnerability(vuln) {
                findings.push(finding);
            }
        }
        for misconfig in &block.misconfigurations {
            if let Some(finding) = normalize_misconfiguration(misconfig) {
                findings.push(finding);
            }
        }
        for secret in &block.secrets {
            if let Some(finding) = normalize_secret(secret) {
                findings.push(finding);
            }
        }
    }
    findings
}

fn normalize_vulnerability(vuln: &VulnerabilityRecord) -> Option<Finding> {
    let Some(id) = vuln.vulnerability_id.clone() else {
        log::warn!("Skipping vulnerability record without VulnerabilityID");
        return None;
    };
    Some(Finding {
        finding_type: FindingType::Vulnerability,
        title: vuln.title.clone().unwrap_or_else(|| id.clone()),
        severity: severity_or_default(vuln.severity.as_deref()),
        package: Some(vuln.pkg_name.clone().unwrap_or_else(|| "N/A".to_string())),
        installed_version: Some(
            vuln.installed_version
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
        ),
        fixed_version: Some(
            vuln.fixed_version
                .clone()
                .unwrap_or_else(|| "No fix available".to_string()),
        ),
        description: vuln.description.clone().unwrap_or_default(),
        references: vuln.references.clone(),
        published_date: Some(vuln.published_date.clone().unwrap_or_default()),
        layer_digest: Some(
            vuln.layer
                .as_ref()
                .and_then(|layer| layer.diff_id.clone())
                .unwrap_or_else(|| "N/A".to_string()),
        ),
        id,
    })
}

fn normalize_misconfiguration(misconfig: &MisconfigurationRecord) -> Option<Finding> {
    let Some(id) = misconfig.id.clone() else {
        log::warn!("Skipping misconfiguration record without ID");
        return None;
    };
    Some(Finding {
        finding_type: FindingType::Misconfiguration,
        title: misconfig.title.clone().unwrap_or_else(|| id.clone()),
        severity: severity_or_default(misconfig.severity.as_deref()),
        package: None,
        installed_version: None,
        fixed_version: None,
        description: misconfig.message.clone().unwrap_or_default(),
        references: misconfig.references.clone(),
        published_date: None,
        layer_digest: None,
        id,
    })
}

fn normalize_secret(secret: &SecretRecord) -> Option<Finding> {
    let Some(rule_id) = secret.rule_id.as_deref() else {
        log::warn!("Skipping secret record without RuleID");
        return None;
    };
    let id = format!("SECRET-{rule_id}");
    Some(Finding {
        finding_type: FindingType::Secret,
        title: secret.title.clone().unwrap_or_else(|| id.clone()),
        severity: severity_or_default(secret.severity.as_deref()),
        package: None,
        installed_version: None,
        fixed_version: None,
        description: secret.match_text.clone().unwrap_or_default(),
        references: Vec::new(),
        published_date: None,
        layer_digest: None,
        id,
    })
}

fn severity_or_default(severity: Option<&str>) -> String {
    severity.unwrap_or(DEFAULT_SEVERITY).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trivy::{LayerRef, ResultBlock};

    fn corpus_with_block(block: ResultBlock) -> ScanCorpus {
        ScanCorpus {
            results: vec![block],
            metadata: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_vulnerability_defaults() {
        let block = ResultBlock {
            vulnerabilities: vec![VulnerabilityRecord {
                vulnerability_id: Some("CVE-2024-0001".to_string()),
                severity: Some("HIGH".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let findings = extract_findings(&corpus_with_block(block));
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.finding_type, FindingType::Vulnerability);
        assert_eq!(f.id, "CVE-2024-0001");
        assert_eq!(f.title, "CVE-2024-0001");
        assert_eq!(f.package.as_deref(), Some("N/A"));
        assert_eq!(f.installed_version.as_deref(), Some("N/A"));
        assert_eq!(f.fixed_version.as_deref(), Some("No fix available"));
        assert_eq!(f.description, "");
        assert!(f.references.is_empty());
        assert_eq!(f.layer_digest.as_deref(), Some("N/A"));
    }

    #[test]
    fn test_vulnerability_layer_diff_id() {
        let block = ResultBlock {
            vulnerabilities: vec![VulnerabilityRecord {
                vulnerability_id: Some("CVE-2024-0002".to_string()),
                severity: Some("LOW".to_string()),
                layer: Some(LayerRef {
                    diff_id: Some("sha256:feed".to_string()),
                    digest: None,
                }),
                ..Default::default()
            }],
            ..Default::default()
        };

        let findings = extract_findings(&corpus_with_block(block));
        assert_eq!(findings[0].layer_digest.as_deref(), Some("sha256:feed"));
    }

    #[test]
    fn test_misconfiguration_title_falls_back_to_id() {
        let block = ResultBlock {
            misconfigurations: vec![MisconfigurationRecord {
                id: Some("DS002".to_string()),
                severity: Some("MEDIUM".to_string()),
                message: Some("Image runs as root".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let findings = extract_findings(&corpus_with_block(block));
        assert_eq!(findings[0].title, "DS002");
        assert_eq!(findings[0].description, "Image runs as root");
    }

    #[test]
    fn test_secret_id_synthesis() {
        let block = ResultBlock {
            secrets: vec![SecretRecord {
                rule_id: Some("AWS-001".to_string()),
                severity: Some("CRITICAL".to_string()),
                match_text: Some("AKIA****".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let findings = extract_findings(&corpus_with_block(block));
        assert_eq!(findings[0].id, "SECRET-AWS-001");
        assert_eq!(findings[0].title, "SECRET-AWS-001");
        assert_eq!(findings[0].description, "AKIA****");
    }

    #[test]
    fn test_missing_identifier_is_skipped() {
        let block = ResultBlock {
            vulnerabilities: vec![
                VulnerabilityRecord::default(),
                VulnerabilityRecord {
                    vulnerability_id: Some("CVE-2024-0003".to_string()),
                    ..Default::default()
                },
            ],
            misconfigurations: vec![MisconfigurationRecord::default()],
            secrets: vec![SecretRecord::default()],
            ..Default::default()
        };

        let findings = extract_findings(&corpus_with_block(block));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "CVE-2024-0003");
    }

    #[test]
    fn test_extraction_order_within_block() {
        let block = ResultBlock {
            vulnerabilities: vec![VulnerabilityRecord {
                vulnerability_id: Some("CVE-1".to_string()),
                ..Default::default()
            }],
            misconfigurations: vec![MisconfigurationRecord {
                id: Some("M-1".to_string()),
                ..Default::default()
            }],
            secrets: vec![SecretRecord {
                rule_id: Some("S-1".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let findings = extract_findings(&corpus_with_block(block));
        let ids: Vec<&str> = findings.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["CVE-1", "M-1", "SECRET-S-1"]);
    }

    #[test]
    fn test_missing_severity_defaults_to_unknown() {
        let block = ResultBlock {
            vulnerabilities: vec![VulnerabilityRecord {
                vulnerability_id: Some("CVE-2024-0004".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let findings = extract_findings(&corpus_with_block(block));
        assert_eq!(findings[0].severity, "UNKNOWN");
    }
}
