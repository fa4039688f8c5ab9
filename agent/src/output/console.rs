//! Console output formatting
//!
//! Provides formatted console output for mapping runs.

use compliance_kit::corpus::ScanCorpus;
use compliance_kit::finding::Finding;
use compliance_kit::mapper::ControlEvidence;
use compliance_kit::severity::rank_of;

/// Print the run header: image identity and finding count
pub fn print_run_header(corpus: &ScanCorpus, findings: &[Finding]) {
    println!();
    println!(
        "Found {} findings in {}",
        findings.len(),
        corpus.artifact_name()
    );
    println!();
    println!("Container name: {}", corpus.container_name());
    println!("Image digest:   {}", corpus.repo_digest());
    println!();
    print_severity_tally(findings);
}

/// Print the per-control evidence summary
pub fn print_control_summary(evidence: &[ControlEvidence]) {
    if evidence.is_empty() {
        println!("No catalog controls matched any finding.");
        println!();
        return;
    }

    println!("╔═══════════════════════════════════════════════════════════════════════════════╗");
    println!("║                              MAPPED CONTROLS                                  ║");
    println!("╚═══════════════════════════════════════════════════════════════════════════════╝");
    println!();

    for ev in evidence {
        println!("┌───────────────────────────────────────────────────────────────────────────────┐");
        println!("│ {}: {}", ev.control.id, ev.control.name);
        println!("├───────────────────────────────────────────────────────────────────────────────┤");
        println!("│ Threshold:   {}", ev.control.severity_threshold);
        if ev.control.keywords.is_empty() {
            println!("│ Keywords:    (any finding)");
        } else {
            println!("│ Keywords:    {}", ev.control.keywords.join(", "));
        }
        println!("│ Evidence ({}):", ev.findings.len());
        for finding in ev.findings.iter().take(5) {
            println!(
                "│   • [{}] {}",
                finding.severity,
                truncate(&finding.title, 60)
            );
        }
        if ev.findings.len() > 5 {
            println!("│   … and {} more", ev.findings.len() - 5);
        }
        println!("└───────────────────────────────────────────────────────────────────────────────┘");
        println!();
    }
}

/// Print findings tallied by severity, worst first
fn print_severity_tally(findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }

    let mut tally: Vec<(String, usize)> = Vec::new();
    for finding in findings {
        match tally.iter_mut().find(|(sev, _)| *sev == finding.severity) {
            Some((_, count)) => *count += 1,
            None => tally.push((finding.severity.clone(), 1)),
        }
    }
    tally.sort_by_key(|(sev, _)| std::cmp::Reverse(rank_of(sev)));

    println!("By severity:");
    for (severity, count) in &tally {
        println!("  {:<12} {:>4}", severity, count);
    }
    println!();
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
