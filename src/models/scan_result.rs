use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::endpoint::Endpoint;
use super::enums::{Framework, Severity};
use super::finding::Finding;

/// Aggregate output of scanning one project.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub scan_path: PathBuf,
    pub files_scanned: Vec<String>,
    /// File path mapped to the reason it could not be analyzed.
    pub parse_errors: BTreeMap<String, String>,
    pub frameworks_detected: BTreeSet<Framework>,
    pub endpoints: Vec<Arc<Endpoint>>,
    pub findings: Vec<Finding>,
    pub duration: Duration,
}

impl ScanResult {
    pub fn new(scan_path: impl Into<PathBuf>) -> Self {
        Self {
            scan_path: scan_path.into(),
            ..Self::default()
        }
    }

    /// Findings that were not suppressed.
    pub fn active_findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.suppressed)
    }

    pub fn suppressed_findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.suppressed)
    }

    pub fn findings_by_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.active_findings().filter(move |f| f.severity == severity)
    }

    pub fn findings_at_or_above(&self, min: Severity) -> impl Iterator<Item = &Finding> {
        self.active_findings()
            .filter(move |f| f.severity.greater_or_equal(min))
    }

    pub fn has_critical(&self) -> bool {
        self.findings_by_severity(Severity::Critical).next().is_some()
    }

    pub fn has_high(&self) -> bool {
        self.findings_by_severity(Severity::High).next().is_some()
    }

    /// Active finding count per severity. Every severity is present, even at
    /// zero.
    pub fn severity_summary(&self) -> BTreeMap<Severity, usize> {
        let mut summary: BTreeMap<Severity, usize> =
            Severity::DESCENDING.iter().map(|s| (*s, 0)).collect();
        for finding in self.active_findings() {
            *summary.entry(finding.severity).or_default() += 1;
        }
        summary
    }

    pub fn duration_ms(&self) -> u128 {
        self.duration.as_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;

    fn finding(severity: Severity) -> Finding {
        let endpoint = Arc::new(Endpoint::new(
            "/x",
            [HttpMethod::Get],
            "main.go",
            1,
            Framework::Gin,
        ));
        Finding::new("AP001", "Test", severity, endpoint, "m", "r")
    }

    #[test]
    fn test_queries_skip_suppressed() {
        let mut result = ScanResult::new(".");
        result.findings.push(finding(Severity::Critical));
        result.findings.push(finding(Severity::High));
        result.findings.push(finding(Severity::Low));
        result.findings[0].suppress("known");

        assert_eq!(result.active_findings().count(), 2);
        assert_eq!(result.suppressed_findings().count(), 1);
        assert!(!result.has_critical());
        assert!(result.has_high());
        assert_eq!(result.findings_at_or_above(Severity::Medium).count(), 1);

        let summary = result.severity_summary();
        assert_eq!(summary.len(), 5);
        assert_eq!(summary[&Severity::Critical], 0);
        assert_eq!(summary[&Severity::Low], 1);
    }
}
