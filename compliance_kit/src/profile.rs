//! HDF profile document types and the append-only assembler
//!
//! The assembled artifact is a MITRE SAF HDF document: a `profiles`
//! sequence whose first profile accumulates one control entry per mapped
//! catalog control. Assembly is additive: appending into a document that
//! already has controls extends the sequence, so running twice against the
//! same document duplicates controls.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::mapper::ControlEvidence;
use crate::severity::{impact_score, rank_of};

/// Status recorded on every result: the artifact records exposure, not
/// remediation state.
const RESULT_STATUS: &str = "failed";

/// Root HDF artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub profiles: Vec<Profile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub controls: Vec<ProfileControl>,
}

/// One mapped catalog control with its failed-result evidence records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileControl {
    pub id: String,
    pub title: String,
    pub desc: String,
    pub impact: f64,
    pub tags: ControlTags,
    pub results: Vec<ControlResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlTags {
    /// Highest severity among the control's matched findings.
    pub severity: String,
    pub nist: Vec<String>,
}

/// A rendered evidence record for one matching finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlResult {
    pub status: String,
    pub code_desc: String,
    pub start_time: String,
}

impl ProfileDocument {
    /// A fresh one-profile document with no controls.
    pub fn minimal(name: &str, title: &str) -> Self {
        Self {
            profiles: vec![Profile {
                name: name.to_string(),
                title: title.to_string(),
                controls: Vec::new(),
            }],
        }
    }

    /// Seed a document from an HDF template file, if one is present and
    /// parseable. A missing file is normal and silent; a file that exists
    /// but cannot be used is reported as a warning. Either yields `None`.
    pub fn from_template(path: &Path) -> Option<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return None,
        };
        match serde_json::from_str::<Self>(&raw) {
            Ok(doc) if !doc.profiles.is_empty() => Some(doc),
            Ok(_) => {
                log::warn!("Template {} has no profiles, ignoring", path.display());
                None
            }
            Err(e) => {
                log::warn!("Could not parse template {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Append one control entry per evidence record to the first profile.
    ///
    /// Existing controls are kept; this never replaces. `captured_at` is
    /// stamped on every result record emitted by this call.
    pub fn append_evidence(&mut self, evidence: &[ControlEvidence], captured_at: DateTime<Utc>) {
        let start_time = captured_at.to_rfc3339_opts(SecondsFormat::Micros, true);
        let controls = evidence.iter().map(|ev| assemble_control(ev, &start_time));

        if self.profiles.is_empty() {
            self.profiles.push(Profile {
                name: String::new(),
                title: String::new(),
                controls: Vec::new(),
            });
        }
        if let Some(profile) = self.profiles.first_mut() {
            profile.controls.extend(controls);
        }
    }
}

fn assemble_control(evidence: &ControlEvidence, start_time: &str) -> ProfileControl {
    let impact = evidence
        .findings
        .iter()
        .map(|f| impact_score(&f.severity))
        .fold(0.0_f64, f64::max);

    let worst_severity = evidence
        .findings
        .iter()
        .max_by_key(|f| rank_of(&f.severity))
        .map(|f| f.severity.clone())
        .unwrap_or_default();

    ProfileControl {
        id: evidence.control.id.clone(),
        title: evidence.control.name.clone(),
        desc: evidence.control.description.clone(),
        impact,
        tags: ControlTags {
            severity: worst_severity,
            nist: vec![evidence.control.id.clone()],
        },
        results: evidence
            .findings
            .iter()
            .map(|finding| ControlResult {
                status: RESULT_STATUS.to_string(),
                code_desc: code_description(finding),
                start_time: start_time.to_string(),
            })
            .collect(),
    }
}

/// The evidence line for one finding.
///
/// Vulnerabilities render `<package> <installed> → <fixed>`; other types
/// render their own description.
fn code_description(finding: &crate::finding::Finding) -> String {
    use crate::finding::FindingType;
    match finding.finding_type {
        FindingType::Vulnerability => format!(
            "{} {} → {}",
            finding.package.as_deref().unwrap_or("N/A"),
            finding.installed_version.as_deref().unwrap_or("N/A"),
            finding.fixed_version.as_deref().unwrap_or("No fix available"),
        ),
        FindingType::Misconfiguration | FindingType::Secret => finding.description.clone(),
    }
}

/// Artifact names become path components: `/` and `:` map to `_`.
pub fn sanitize_artifact_name(name: &str) -> String {
    name.replace(['/', ':'], "_")
}

/// Run timestamp for artifact filenames, `YYYYMMDD_HHMMSS`.
pub fn run_timestamp<Tz: chrono::TimeZone>(now: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%Y%m%d_%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ControlDefinition;
    use crate::finding::{Finding, FindingType};
    use crate::severity::Severity;
    use chrono::TimeZone;

    fn vuln_finding(id: &str, severity: &str) -> Finding {
        Finding {
            finding_type: FindingType::Vulnerability,
            id: id.to_string(),
            title: id.to_string(),
            severity: severity.to_string(),
            package: Some("openssl".to_string()),
            installed_version: Some("3.0.7".to_string()),
            fixed_version: Some("3.0.8".to_string()),
            description: String::new(),
            references: Vec::new(),
            published_date: None,
            layer_digest: None,
        }
    }

    fn evidence(severities: &[&str]) -> ControlEvidence {
        ControlEvidence {
            control: ControlDefinition {
                id: "SC-28".to_string(),
                name: "Protection of Information at Rest".to_string(),
                description: "Encrypt sensitive data at rest".to_string(),
                keywords: vec!["crypto".to_string()],
                severity_threshold: Severity::High,
            },
            findings: severities
                .iter()
                .enumerate()
                .map(|(i, sev)| vuln_finding(&format!("CVE-{i}"), sev))
                .collect(),
        }
    }

    fn capture_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 3, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_append_not_replace() {
        let mut doc = ProfileDocument::minimal("Trivy Container Scan", "Automated scan");
        doc.append_evidence(&[evidence(&["HIGH"])], capture_time());
        assert_eq!(doc.profiles[0].controls.len(), 1);

        // A second pass against the same document duplicates, by design
        doc.append_evidence(&[evidence(&["HIGH"])], capture_time());
        assert_eq!(doc.profiles[0].controls.len(), 2);
    }

    #[test]
    fn test_control_rendering() {
        let mut doc = ProfileDocument::minimal("p", "t");
        doc.append_evidence(&[evidence(&["HIGH", "CRITICAL"])], capture_time());

        let control = &doc.profiles[0].controls[0];
        assert_eq!(control.id, "SC-28");
        assert_eq!(control.title, "Protection of Information at Rest");
        assert_eq!(control.impact, 0.9);
        assert_eq!(control.tags.severity, "CRITICAL");
        assert_eq!(control.tags.nist, vec!["SC-28".to_string()]);
        assert_eq!(control.results.len(), 2);
        for result in &control.results {
            assert_eq!(result.status, "failed");
            assert_eq!(result.code_desc, "openssl 3.0.7 → 3.0.8");
            assert_eq!(result.start_time, "2025-12-03T14:30:00.000000Z");
        }
    }

    #[test]
    fn test_unknown_severity_impact_floor() {
        let mut doc = ProfileDocument::minimal("p", "t");
        doc.append_evidence(&[evidence(&["NEGLIGIBLE"])], capture_time());
        assert_eq!(doc.profiles[0].controls[0].impact, 0.1);
    }

    #[test]
    fn test_non_vulnerability_code_desc_uses_description() {
        let mut ev = evidence(&["HIGH"]);
        ev.findings[0].finding_type = FindingType::Secret;
        ev.findings[0].description = "AKIA**** in /app/.env".to_string();

        let mut doc = ProfileDocument::minimal("p", "t");
        doc.append_evidence(&[ev], capture_time());
        assert_eq!(
            doc.profiles[0].controls[0].results[0].code_desc,
            "AKIA**** in /app/.env"
        );
    }

    #[test]
    fn test_assembly_is_deterministic_given_timestamp() {
        let ev = vec![evidence(&["HIGH", "LOW"])];
        let mut first = ProfileDocument::minimal("p", "t");
        let mut second = ProfileDocument::minimal("p", "t");
        first.append_evidence(&ev, capture_time());
        second.append_evidence(&ev, capture_time());
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut doc = ProfileDocument::minimal("Trivy Container Scan", "Automated scan");
        doc.append_evidence(&[evidence(&["HIGH"])], capture_time());

        let value = serde_json::to_value(&doc).expect("serialize");
        let control = &value["profiles"][0]["controls"][0];
        assert!(control.get("code_desc").is_none());
        assert!(control["results"][0].get("code_desc").is_some());
        assert!(control["results"][0].get("start_time").is_some());
        assert!(control.get("desc").is_some());
        assert!(control.get("impact").is_some());
    }

    #[test]
    fn test_sanitize_artifact_name() {
        assert_eq!(
            sanitize_artifact_name("registry.example.com/team/app:1.2"),
            "registry.example.com_team_app_1.2"
        );
        assert_eq!(sanitize_artifact_name("alpine"), "alpine");
    }

    #[test]
    fn test_run_timestamp_format() {
        let stamp = run_timestamp(capture_time());
        assert_eq!(stamp, "20251203_143000");
    }
}
