use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::issue::{Phase, Severity, ValidationIssue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Pass,
    Warning,
    Fail,
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Warning => write!(f, "WARNING"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Aggregate result of one lifecycle run. Built incrementally by the
/// orchestrator as phases complete, then finalized once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleReport {
    pub material_name: String,
    pub timestamp: DateTime<Utc>,
    pub overall_status: OverallStatus,
    pub issues: Vec<ValidationIssue>,
    pub severity_counts: SeverityCounts,
    pub phases_completed: usize,
    pub duration_ms: u64,
    pub auto_fixes_applied: u32,
}

impl LifecycleReport {
    pub fn begin(material_name: impl Into<String>) -> Self {
        Self {
            material_name: material_name.into(),
            timestamp: Utc::now(),
            overall_status: OverallStatus::Pass,
            issues: Vec::new(),
            severity_counts: SeverityCounts::default(),
            phases_completed: 0,
            duration_ms: 0,
            auto_fixes_applied: 0,
        }
    }

    /// Folds one phase's findings into the aggregate. The status lattice only
    /// ever moves toward Fail, never back.
    pub fn record_phase(&mut self, issues: Vec<ValidationIssue>, auto_fixes: u32) {
        for issue in &issues {
            self.severity_counts.record(issue.severity);
        }
        self.issues.extend(issues);
        self.auto_fixes_applied += auto_fixes;
        self.phases_completed += 1;
        self.update_status();
    }

    fn update_status(&mut self) {
        if self.severity_counts.critical > 0 {
            self.overall_status = OverallStatus::Fail;
        } else if self.severity_counts.high > 0 && self.overall_status != OverallStatus::Fail {
            self.overall_status = OverallStatus::Warning;
        }
    }

    pub fn finalize(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
    }

    pub fn issues_for(&self, phase: Phase) -> Vec<&ValidationIssue> {
        self.issues.iter().filter(|i| i.phase == phase).collect()
    }

    pub fn passed(&self) -> bool {
        self.overall_status == OverallStatus::Pass
    }
}
