//! Projection of findings onto catalog controls
//!
//! Controls come out in catalog-declaration order; within a control,
//! findings keep normalization order. A finding may count against several
//! controls independently; no deduplication. A control with zero matches
//! produces nothing at all — absence of evidence, not negative evidence.

use crate::catalog::{ControlCatalog, ControlDefinition};
use crate::finding::Finding;

/// One control with the findings that count as evidence against it.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlEvidence {
    pub control: ControlDefinition,
    pub findings: Vec<Finding>,
}

/// Collect evidence for every catalog control that has at least one match.
pub fn map_findings(catalog: &ControlCatalog, findings: &[Finding]) -> Vec<ControlEvidence> {
    catalog
        .controls()
        .iter()
        .filter_map(|control| {
            let matched: Vec<Finding> = findings
                .iter()
                .filter(|finding| control.matches(finding))
                .cloned()
                .collect();
            if matched.is_empty() {
                None
            } else {
                Some(ControlEvidence {
                    control: control.clone(),
                    findings: matched,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ControlDefinition;
    use crate::finding::FindingType;
    use crate::severity::Severity;

    fn finding(id: &str, title: &str, severity: &str) -> Finding {
        Finding {
            finding_type: FindingType::Vulnerability,
            id: id.to_string(),
            title: title.to_string(),
            severity: severity.to_string(),
            package: None,
            installed_version: None,
            fixed_version: None,
            description: String::new(),
            references: Vec::new(),
            published_date: None,
            layer_digest: None,
        }
    }

    fn control(id: &str, keywords: &[&str], threshold: Severity) -> ControlDefinition {
        ControlDefinition {
            id: id.to_string(),
            name: format!("{id} name"),
            description: String::new(),
            keywords: keywords.iter().map(|kw| kw.to_string()).collect(),
            severity_threshold: threshold,
        }
    }

    #[test]
    fn test_unmatched_controls_are_omitted() {
        let catalog = ControlCatalog::new(vec![
            control("A-1", &["nomatch"], Severity::Low),
            control("B-2", &[], Severity::Low),
        ]);
        let findings = vec![finding("CVE-1", "something", "HIGH")];

        let evidence = map_findings(&catalog, &findings);
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].control.id, "B-2");
    }

    #[test]
    fn test_finding_can_match_multiple_controls() {
        let catalog = ControlCatalog::new(vec![
            control("A-1", &["password"], Severity::High),
            control("B-2", &[], Severity::Low),
        ]);
        let findings = vec![finding("CVE-1", "weak password hashing", "CRITICAL")];

        let evidence = map_findings(&catalog, &findings);
        assert_eq!(evidence.len(), 2);
        assert_eq!(evidence[0].findings, evidence[1].findings);
    }

    #[test]
    fn test_catalog_order_and_normalization_order_preserved() {
        let catalog = ControlCatalog::new(vec![
            control("Z-9", &[], Severity::Low),
            control("A-1", &[], Severity::Low),
        ]);
        let findings = vec![
            finding("CVE-2", "b", "LOW"),
            finding("CVE-1", "a", "HIGH"),
        ];

        let evidence = map_findings(&catalog, &findings);
        let control_ids: Vec<&str> = evidence.iter().map(|e| e.control.id.as_str()).collect();
        assert_eq!(control_ids, vec!["Z-9", "A-1"]);
        let finding_ids: Vec<&str> =
            evidence[0].findings.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(finding_ids, vec!["CVE-2", "CVE-1"]);
    }

    #[test]
    fn test_password_critical_scenario() {
        // A CRITICAL "password" finding must land under the authenticator
        // control and the catch-all CRITICAL control, but not under an
        // unrelated HIGH-threshold keyword control.
        let catalog = ControlCatalog::new(vec![
            control("IA-5", &["password", "credential", "secret", "key"], Severity::High),
            control("SI-2", &[], Severity::Critical),
            control("CM-6", &["config"], Severity::High),
        ]);
        let findings = vec![finding(
            "CVE-2024-9999",
            "Hardcoded password in base layer",
            "CRITICAL",
        )];

        let evidence = map_findings(&catalog, &findings);
        let control_ids: Vec<&str> = evidence.iter().map(|e| e.control.id.as_str()).collect();
        assert_eq!(control_ids, vec!["IA-5", "SI-2"]);
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let catalog = ControlCatalog::nist_800_53();
        let findings = vec![
            finding("CVE-1", "insecure tls default", "HIGH"),
            finding("CVE-2", "root login enabled", "CRITICAL"),
        ];

        let first = map_findings(&catalog, &findings);
        let second = map_findings(&catalog, &findings);
        assert_eq!(first, second);
    }
}
