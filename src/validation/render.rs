//! Human-readable rendering of a lifecycle report. Pure serialization; no
//! decision logic lives here.

use crate::validation::issue::Phase;
use crate::validation::report::LifecycleReport;

pub fn render_text(report: &LifecycleReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Validation report for '{}' at {}\n",
        report.material_name,
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "Status: {} ({} phases, {} ms, {} auto-fixes)\n",
        report.overall_status,
        report.phases_completed,
        report.duration_ms,
        report.auto_fixes_applied
    ));
    out.push_str(&format!(
        "Issues: {} critical, {} high, {} medium, {} low\n",
        report.severity_counts.critical,
        report.severity_counts.high,
        report.severity_counts.medium,
        report.severity_counts.low
    ));

    for phase in Phase::ALL {
        let issues = report.issues_for(phase);
        if issues.is_empty() {
            continue;
        }
        out.push_str(&format!("\n[{}]\n", phase));
        for issue in issues {
            match &issue.field_path {
                Some(path) => out.push_str(&format!(
                    "  {} {} ({})\n",
                    issue.severity, issue.message, path
                )),
                None => out.push_str(&format!("  {} {}\n", issue.severity, issue.message)),
            }
        }
    }

    out
}
