//! Output formatting for scan results.
//!
//! Four formats share one entry point, [`write_report`]:
//! - Terminal: colored tables for humans
//! - JSON: the full result for programmatic consumption
//! - Markdown: a report suitable for pull requests and wikis
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration
//!
//! Writers take any `io::Write` so the CLI can target stdout or a file and
//! tests can target a buffer.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use colored::*;
use serde::Serialize;

use crate::models::{
    AuthorizationInfo, Endpoint, Finding, HttpMethod, ScanResult, SecurityClassification, Severity,
};
use crate::rules::Engine;

/// Report format selected with `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Markdown,
    Sarif,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Terminal => "terminal",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Sarif => "sarif",
        };
        f.write_str(name)
    }
}

/// Presentation switches. Only the terminal format honours them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    pub no_color: bool,
    pub no_icons: bool,
}

/// Write `result` in the requested format.
pub fn write_report(
    format: OutputFormat,
    result: &ScanResult,
    options: ReportOptions,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Terminal => write_terminal(result, options, out),
        OutputFormat::Json => write_json(result, out),
        OutputFormat::Markdown => write_markdown(result, out),
        OutputFormat::Sarif => write_sarif(result, out),
    }
}

/// Cut `text` to `keep` characters plus `marker` when longer than `max`.
fn clip(text: &str, max: usize, keep: usize, marker: &str) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(keep).collect();
    clipped.push_str(marker);
    clipped
}

fn frameworks_line(result: &ScanResult) -> String {
    if result.frameworks_detected.is_empty() {
        return "None".to_string();
    }
    result
        .frameworks_detected
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn title_case(severity: Severity) -> String {
    let name = severity.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// JSON Format
// =============================================================================

#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: &'static str,
    pub scan_path: String,
    pub files_scanned: usize,
    pub parse_errors: &'a BTreeMap<String, String>,
    pub frameworks_detected: Vec<&'static str>,
    pub duration_ms: u128,
    pub summary: JsonSummary,
    pub endpoints: Vec<JsonEndpoint<'a>>,
    pub findings: Vec<JsonFinding<'a>>,
}

#[derive(Serialize)]
pub struct JsonSummary {
    pub total_endpoints: usize,
    pub total_findings: usize,
    pub suppressed_findings: usize,
    pub severity_counts: BTreeMap<&'static str, usize>,
}

#[derive(Serialize)]
pub struct JsonEndpoint<'a> {
    pub route: String,
    pub methods: Vec<&'static str>,
    pub file_path: &'a str,
    pub line_number: usize,
    pub framework: &'static str,
    pub classification: SecurityClassification,
    pub handler_name: &'a str,
    pub router_prefix: &'a str,
    pub authorization: &'a AuthorizationInfo,
}

#[derive(Serialize)]
pub struct JsonFinding<'a> {
    pub rule_id: &'static str,
    pub rule_name: &'static str,
    pub severity: Severity,
    pub message: &'a str,
    pub recommendation: &'a str,
    pub suppressed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppression_reason: Option<&'a str>,
    pub endpoint: JsonEndpoint<'a>,
}

fn endpoint_to_json(endpoint: &Endpoint) -> JsonEndpoint<'_> {
    JsonEndpoint {
        route: endpoint.full_route(),
        methods: endpoint.methods.iter().map(HttpMethod::as_str).collect(),
        file_path: &endpoint.file_path,
        line_number: endpoint.line_number,
        framework: endpoint.framework.as_str(),
        classification: endpoint.classification,
        handler_name: &endpoint.handler_name,
        router_prefix: &endpoint.router_prefix,
        authorization: &endpoint.authorization,
    }
}

fn finding_to_json(finding: &Finding) -> JsonFinding<'_> {
    JsonFinding {
        rule_id: finding.rule_id,
        rule_name: finding.rule_name,
        severity: finding.severity,
        message: &finding.message,
        recommendation: &finding.recommendation,
        suppressed: finding.suppressed,
        suppression_reason: finding.suppression_reason.as_deref(),
        endpoint: endpoint_to_json(&finding.endpoint),
    }
}

/// Write the full result as pretty-printed JSON.
pub fn write_json(result: &ScanResult, out: &mut dyn Write) -> anyhow::Result<()> {
    let severity_counts = result
        .severity_summary()
        .into_iter()
        .map(|(severity, count)| (severity.as_str(), count))
        .collect();

    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION"),
        scan_path: result.scan_path.to_string_lossy().to_string(),
        files_scanned: result.files_scanned.len(),
        parse_errors: &result.parse_errors,
        frameworks_detected: result.frameworks_detected.iter().map(|f| f.as_str()).collect(),
        duration_ms: result.duration_ms(),
        summary: JsonSummary {
            total_endpoints: result.endpoints.len(),
            total_findings: result.active_findings().count(),
            suppressed_findings: result.suppressed_findings().count(),
            severity_counts,
        },
        endpoints: result.endpoints.iter().map(|e| endpoint_to_json(e)).collect(),
        findings: result.findings.iter().map(finding_to_json).collect(),
    };

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

// =============================================================================
// SARIF Format
// =============================================================================

const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const TOOL_NAME: &str = "apiposture";

#[derive(Serialize)]
struct SarifReport {
    version: &'static str,
    #[serde(rename = "$schema")]
    schema: &'static str,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
struct SarifDriver {
    name: &'static str,
    version: &'static str,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
struct SarifRule {
    id: String,
    name: String,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
    #[serde(rename = "fullDescription")]
    full_description: SarifMessage,
    #[serde(rename = "defaultConfiguration")]
    default_config: SarifRuleConfig,
}

#[derive(Serialize)]
struct SarifRuleConfig {
    level: &'static str,
}

#[derive(Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: &'static str,
    level: &'static str,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    suppressions: Vec<SarifSuppression>,
}

#[derive(Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifact,
    region: SarifRegion,
}

#[derive(Serialize)]
struct SarifArtifact {
    uri: String,
}

#[derive(Serialize)]
struct SarifRegion {
    #[serde(rename = "startLine")]
    start_line: usize,
}

#[derive(Serialize)]
struct SarifSuppression {
    kind: &'static str,
    justification: String,
}

fn sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low | Severity::Info => "note",
    }
}

fn make_relative_path(file_path: &str, base_path: &Path) -> String {
    let file = Path::new(file_path);

    // Single file scan: keep just the file name.
    if file == base_path {
        return file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.to_string());
    }

    file.strip_prefix(base_path)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| file_path.to_string())
}

/// Write findings as a SARIF 2.1.0 log. Suppressed findings are kept and
/// marked with an external suppression.
pub fn write_sarif(result: &ScanResult, out: &mut dyn Write) -> anyhow::Result<()> {
    let engine = Engine::default();
    let rule_ids: BTreeSet<&str> = result.findings.iter().map(|f| f.rule_id).collect();

    let rules: Vec<SarifRule> = rule_ids
        .iter()
        .filter_map(|id| engine.rule(id))
        .map(|rule| SarifRule {
            id: rule.id().to_string(),
            name: rule.name().to_string(),
            short_description: SarifMessage {
                text: rule.name().to_string(),
            },
            full_description: SarifMessage {
                text: rule.description(),
            },
            default_config: SarifRuleConfig {
                level: sarif_level(rule.severity()),
            },
        })
        .collect();

    let results: Vec<SarifResult> = result
        .findings
        .iter()
        .map(|f| SarifResult {
            rule_id: f.rule_id,
            level: sarif_level(f.severity),
            message: SarifMessage {
                text: format!("{} [{} {}]", f.message, f.endpoint.display_methods(), f.route()),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifact {
                        uri: make_relative_path(&f.endpoint.file_path, &result.scan_path),
                    },
                    region: SarifRegion {
                        start_line: f.endpoint.line_number.max(1),
                    },
                },
            }],
            suppressions: f
                .suppression_reason
                .iter()
                .filter(|_| f.suppressed)
                .map(|reason| SarifSuppression {
                    kind: "external",
                    justification: reason.clone(),
                })
                .collect(),
        })
        .collect();

    let report = SarifReport {
        version: SARIF_VERSION,
        schema: SARIF_SCHEMA,
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: TOOL_NAME,
                    version: env!("CARGO_PKG_VERSION"),
                    rules,
                },
            },
            results,
        }],
    };

    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

// =============================================================================
// Markdown Format
// =============================================================================

fn severity_emoji(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴",
        Severity::High => "🟠",
        Severity::Medium => "🟡",
        Severity::Low => "🔵",
        Severity::Info => "⚪",
    }
}

/// Write a Markdown report.
pub fn write_markdown(result: &ScanResult, out: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(out, "# ApiPosture Security Scan Report")?;
    writeln!(out)?;

    writeln!(out, "## Summary")?;
    writeln!(out)?;
    writeln!(out, "- **Scan Path:** `{}`", result.scan_path.display())?;
    writeln!(out, "- **Files Scanned:** {}", result.files_scanned.len())?;
    writeln!(out, "- **Frameworks Detected:** {}", frameworks_line(result))?;
    writeln!(out, "- **Endpoints Found:** {}", result.endpoints.len())?;
    writeln!(out, "- **Security Findings:** {}", result.active_findings().count())?;
    let suppressed = result.suppressed_findings().count();
    if suppressed > 0 {
        writeln!(out, "- **Suppressed Findings:** {}", suppressed)?;
    }
    if !result.parse_errors.is_empty() {
        writeln!(out, "- **Parse Errors:** {}", result.parse_errors.len())?;
    }
    writeln!(out)?;

    let summary = result.severity_summary();
    writeln!(out, "### Findings by Severity")?;
    writeln!(out)?;
    writeln!(out, "| Severity | Count |")?;
    writeln!(out, "|----------|-------|")?;
    for severity in Severity::DESCENDING {
        writeln!(out, "| {} | {} |", title_case(severity), summary[&severity])?;
    }
    writeln!(out)?;

    if result.active_findings().next().is_some() {
        writeln!(out, "## Security Findings")?;
        writeln!(out)?;
        for severity in Severity::DESCENDING {
            let findings: Vec<&Finding> = result.findings_by_severity(severity).collect();
            if findings.is_empty() {
                continue;
            }
            writeln!(out, "### {} {} Severity", severity_emoji(severity), title_case(severity))?;
            writeln!(out)?;
            for f in findings {
                writeln!(out, "#### {}: {}", f.rule_id, f.rule_name)?;
                writeln!(out)?;
                writeln!(out, "- **Route:** `{}`", f.route())?;
                writeln!(out, "- **Methods:** {}", f.endpoint.display_methods())?;
                writeln!(out, "- **Location:** `{}`", f.location())?;
                writeln!(out, "- **Message:** {}", f.message)?;
                if !f.recommendation.is_empty() {
                    writeln!(out, "- **Recommendation:** {}", f.recommendation)?;
                }
                writeln!(out)?;
            }
        }
    }

    if !result.endpoints.is_empty() {
        writeln!(out, "## Discovered Endpoints")?;
        writeln!(out)?;
        writeln!(out, "| Route | Methods | Classification | Framework | Function | Location |")?;
        writeln!(out, "|-------|---------|----------------|-----------|----------|----------|")?;
        for e in &result.endpoints {
            writeln!(
                out,
                "| `{}` | {} | {} | {} | {} | {} |",
                e.full_route(),
                e.display_methods(),
                e.classification,
                e.framework,
                e.handler_name,
                e.short_location()
            )?;
        }
        writeln!(out)?;
    }

    Ok(())
}

// =============================================================================
// Terminal Format
// =============================================================================

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "!!",
        Severity::High => "!",
        Severity::Medium => "*",
        Severity::Low => "-",
        Severity::Info => "i",
    }
}

fn paint_severity(severity: Severity, text: &str) -> ColoredString {
    match severity {
        Severity::Critical => text.red().bold(),
        Severity::High => text.red(),
        Severity::Medium => text.yellow(),
        Severity::Low => text.blue(),
        Severity::Info => text.dimmed(),
    }
}

fn paint_classification(classification: SecurityClassification, text: &str) -> ColoredString {
    match classification {
        SecurityClassification::Public => text.red(),
        SecurityClassification::Authenticated => text.green(),
        SecurityClassification::RoleRestricted => text.cyan(),
        SecurityClassification::PolicyRestricted => text.magenta(),
    }
}

/// Write human-readable tables.
pub fn write_terminal(
    result: &ScanResult,
    options: ReportOptions,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if options.no_color {
        colored::control::set_override(false);
    }
    let rule = "─".repeat(60);

    // Header
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", "ApiPosture Security Scan".bold())?;
    writeln!(out, "Path: {}", result.scan_path.display())?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;

    // Summary
    let summary = result.severity_summary();
    let parts: Vec<String> = Severity::DESCENDING
        .iter()
        .filter(|s| summary[*s] > 0)
        .map(|s| paint_severity(*s, &format!("{} {}", summary[s], s)).to_string())
        .collect();
    let findings_line = if parts.is_empty() {
        "No findings".green().to_string()
    } else {
        parts.join(", ")
    };

    writeln!(out, "{}{}", "Files scanned: ".bold(), result.files_scanned.len())?;
    writeln!(out, "{}{}", "Frameworks: ".bold(), frameworks_line(result))?;
    writeln!(out, "{}{}", "Endpoints: ".bold(), result.endpoints.len())?;
    writeln!(out, "{}{}", "Findings: ".bold(), findings_line)?;
    let suppressed = result.suppressed_findings().count();
    if suppressed > 0 {
        writeln!(out, "{}{}", "Suppressed: ".bold(), suppressed)?;
    }
    if !result.parse_errors.is_empty() {
        writeln!(out, "{}", format!("Parse errors: {}", result.parse_errors.len()).yellow())?;
    }
    writeln!(out)?;

    // Findings
    if result.active_findings().next().is_some() {
        writeln!(out, "{}", "Security Findings".bold())?;
        writeln!(out, "{}", rule)?;
        writeln!(out, "{:<4} {:<8} {:<25} {:<8} {}", "Sev", "Rule", "Route", "Method", "Message")?;
        writeln!(out, "{}", "-".repeat(80))?;
        for f in result.active_findings() {
            let icon = if options.no_icons {
                f.severity.as_str()[..1].to_uppercase()
            } else {
                severity_icon(f.severity).to_string()
            };
            writeln!(
                out,
                "{} {:<8} {:<25} {:<8} {}",
                paint_severity(f.severity, &format!("{:<4}", icon)),
                f.rule_id,
                clip(&f.route(), 23, 20, "..."),
                clip(&f.endpoint.display_methods(), 6, 6, ".."),
                clip(&f.message, 40, 37, "...")
            )?;
        }
        writeln!(out)?;
    }

    // Endpoints
    if !result.endpoints.is_empty() {
        writeln!(out, "{}", "Discovered Endpoints".bold())?;
        writeln!(out, "{}", rule)?;
        writeln!(
            out,
            "{:<30} {:<10} {:<17} {:<10} {}",
            "Route", "Method", "Classification", "Framework", "Function"
        )?;
        writeln!(out, "{}", "-".repeat(90))?;
        for e in &result.endpoints {
            writeln!(
                out,
                "{:<30} {:<10} {} {:<10} {}",
                clip(&e.full_route(), 28, 25, "..."),
                clip(&e.display_methods(), 8, 8, ".."),
                paint_classification(e.classification, &format!("{:<17}", e.classification.as_str())),
                e.framework.as_str(),
                clip(&e.handler_name, 20, 17, "...")
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", format!("Scan completed in {}ms", result.duration_ms()).dimmed())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Framework;
    use std::sync::Arc;

    fn sample() -> ScanResult {
        let mut endpoint = Endpoint::new(
            "/users/:id",
            [HttpMethod::Delete],
            "/srv/app/api/users.go",
            42,
            Framework::Gin,
        );
        endpoint.router_prefix = "/api".into();
        endpoint.handler_name = "deleteUser".into();
        let endpoint = Arc::new(endpoint);

        let mut result = ScanResult::new("/srv/app");
        result.files_scanned = vec!["/srv/app/api/users.go".into()];
        result.frameworks_detected.insert(Framework::Gin);
        result.endpoints.push(Arc::clone(&endpoint));
        result.findings.push(Finding::new(
            "AP004",
            "Missing authentication on write endpoint",
            Severity::Critical,
            Arc::clone(&endpoint),
            "Write endpoint has no authentication",
            "Add auth middleware",
        ));
        let mut suppressed = Finding::new(
            "AP008",
            "Endpoint without authorization",
            Severity::High,
            endpoint,
            "No auth",
            "Add auth",
        );
        suppressed.suppress("accepted risk");
        result.findings.push(suppressed);
        result
    }

    fn render(format: OutputFormat) -> String {
        let mut buf = Vec::new();
        let options = ReportOptions {
            no_color: true,
            no_icons: false,
        };
        write_report(format, &sample(), options, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip("short", 10, 7, "..."), "short");
        assert_eq!(clip("/api/v1/organizations/:id", 23, 20, "..."), "/api/v1/organization...");
        assert_eq!(clip("GET, POST", 6, 6, ".."), "GET, P..");
    }

    #[test]
    fn test_json_report_shape() {
        let value: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(value["scan_path"], "/srv/app");
        assert_eq!(value["files_scanned"], 1);
        assert_eq!(value["frameworks_detected"][0], "gin");
        assert_eq!(value["summary"]["total_endpoints"], 1);
        assert_eq!(value["summary"]["total_findings"], 1);
        assert_eq!(value["summary"]["suppressed_findings"], 1);
        assert_eq!(value["summary"]["severity_counts"]["critical"], 1);
        assert_eq!(value["summary"]["severity_counts"]["high"], 0);
        assert_eq!(value["endpoints"][0]["route"], "/api/users/:id");
        assert_eq!(value["endpoints"][0]["methods"][0], "DELETE");
        assert_eq!(value["endpoints"][0]["classification"], "public");
        assert_eq!(value["findings"][1]["suppression_reason"], "accepted risk");
        assert!(value["findings"][0].get("suppression_reason").is_none());
    }

    #[test]
    fn test_sarif_report() {
        let value: serde_json::Value = serde_json::from_str(&render(OutputFormat::Sarif)).unwrap();
        assert_eq!(value["version"], "2.1.0");
        let run = &value["runs"][0];
        let rules = run["tool"]["driver"]["rules"].as_array().unwrap();
        let ids: Vec<&str> = rules.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["AP004", "AP008"]);
        assert_eq!(rules[0]["defaultConfiguration"]["level"], "error");

        let results = run["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0]["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
            "api/users.go"
        );
        assert_eq!(results[0]["locations"][0]["physicalLocation"]["region"]["startLine"], 42);
        assert!(results[0].get("suppressions").is_none());
        assert_eq!(results[1]["suppressions"][0]["justification"], "accepted risk");
    }

    #[test]
    fn test_markdown_report() {
        let md = render(OutputFormat::Markdown);
        assert!(md.starts_with("# ApiPosture Security Scan Report"));
        assert!(md.contains("- **Frameworks Detected:** gin"));
        assert!(md.contains("| Critical | 1 |"));
        assert!(md.contains("| High | 0 |"));
        assert!(md.contains("### 🔴 Critical Severity"));
        assert!(md.contains("#### AP004: Missing authentication on write endpoint"));
        assert!(!md.contains("#### AP008"));
        assert!(md.contains("| `/api/users/:id` | DELETE | public | gin | deleteUser | users.go:42 |"));
    }

    #[test]
    fn test_terminal_report() {
        let text = render(OutputFormat::Terminal);
        assert!(text.contains("ApiPosture Security Scan"));
        assert!(text.contains("Path: /srv/app"));
        assert!(text.contains("Frameworks: gin"));
        assert!(text.contains("1 critical"));
        assert!(text.contains("Suppressed: 1"));
        assert!(text.contains("AP004"));
        assert!(!text.contains("AP008"));
        assert!(text.contains("deleteUser"));
        assert!(text.contains("Scan completed in"));
    }

    #[test]
    fn test_terminal_without_icons() {
        let mut buf = Vec::new();
        let options = ReportOptions {
            no_color: true,
            no_icons: true,
        };
        write_terminal(&sample(), options, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("C    AP004"));
    }

    #[test]
    fn test_empty_result() {
        let mut buf = Vec::new();
        write_terminal(
            &ScanResult::new("."),
            ReportOptions {
                no_color: true,
                no_icons: false,
            },
            &mut buf,
        )
        .unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Frameworks: None"));
        assert!(text.contains("No findings"));
        assert!(!text.contains("Discovered Endpoints"));
    }
}
