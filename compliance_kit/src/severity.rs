//! Severity ordering and impact scoring
//!
//! Severity strings are passed through from scanner output verbatim; the
//! ordering table below is consulted only for threshold comparisons. A
//! string not present in the table ranks 0, same as UNKNOWN.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Known severity levels, totally ordered CRITICAL > HIGH > MEDIUM > LOW > UNKNOWN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    /// Rank used for threshold comparisons (higher is more severe).
    pub const fn rank(self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
            Severity::Unknown => 0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank of an arbitrary severity string.
///
/// Strings outside the known table rank 0, so they only satisfy
/// LOW-threshold controls. Never fails.
pub fn rank_of(severity: &str) -> u8 {
    match severity {
        "CRITICAL" => 4,
        "HIGH" => 3,
        "MEDIUM" => 2,
        "LOW" => 1,
        _ => 0,
    }
}

/// Impact score for an HDF control, derived from a severity string.
pub fn impact_score(severity: &str) -> f64 {
    match severity {
        "CRITICAL" => 0.9,
        "HIGH" => 0.7,
        "MEDIUM" => 0.5,
        "LOW" => 0.3,
        _ => 0.1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ranks_are_ordered() {
        assert!(Severity::Critical.rank() > Severity::High.rank());
        assert!(Severity::High.rank() > Severity::Medium.rank());
        assert!(Severity::Medium.rank() > Severity::Low.rank());
        assert!(Severity::Low.rank() > Severity::Unknown.rank());
    }

    #[test]
    fn test_rank_of_unknown_strings() {
        assert_eq!(rank_of("UNKNOWN"), 0);
        assert_eq!(rank_of("NEGLIGIBLE"), 0);
        assert_eq!(rank_of(""), 0);
        // Table lookup is exact: lowercase is not in the table
        assert_eq!(rank_of("critical"), 0);
    }

    #[test]
    fn test_impact_score_lookup() {
        assert_eq!(impact_score("CRITICAL"), 0.9);
        assert_eq!(impact_score("HIGH"), 0.7);
        assert_eq!(impact_score("MEDIUM"), 0.5);
        assert_eq!(impact_score("LOW"), 0.3);
        assert_eq!(impact_score("UNKNOWN"), 0.1);
        assert_eq!(impact_score("anything else"), 0.1);
    }
}
