//! Project scanning: file collection, per-file discovery and rule evaluation.
//!
//! Files are parsed and analyzed in parallel with rayon. Every worker builds
//! its own tree-sitter parser; per-file outcomes are merged back in file
//! order so endpoint and finding order do not depend on scheduling.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use rayon::prelude::*;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::analysis::SourceLoader;
use crate::authorization::AuthKeywords;
use crate::classification::classify_all;
use crate::config::{Config, PathFilter, SuppressionSet};
use crate::discovery::{all_discoverers, Discoverer};
use crate::models::{Endpoint, Framework, ScanResult};
use crate::rules::{Engine, RuleVocabulary};

/// What one file contributed to the scan.
enum FileOutcome {
    Analyzed {
        frameworks: Vec<Framework>,
        endpoints: Vec<Endpoint>,
    },
    Failed(String),
}

/// Runs the full pipeline over a file or directory.
pub struct Scanner {
    config: Config,
    loader: SourceLoader,
    discoverers: Vec<Box<dyn Discoverer>>,
    engine: Engine,
    suppressions: SuppressionSet,
}

impl Scanner {
    pub fn new(config: Config) -> Self {
        Self::with_vocabulary(config, RuleVocabulary::default())
    }

    pub fn with_vocabulary(config: Config, vocabulary: RuleVocabulary) -> Self {
        let keywords = AuthKeywords::default().with_auth_patterns(&config.auth_patterns);
        let engine = Engine::with_vocabulary(config.active_rules(), vocabulary);
        Self {
            loader: SourceLoader::new(),
            discoverers: all_discoverers(&keywords),
            engine,
            suppressions: config.suppression_set(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Go files under `root`, sorted. A single `.go` file is returned as is;
    /// any other single file yields nothing.
    pub fn collect_files(&self, root: &Path) -> anyhow::Result<Vec<PathBuf>> {
        if root.is_file() {
            let is_go = root.extension().map_or(false, |ext| ext == "go");
            return Ok(if is_go { vec![root.to_path_buf()] } else { Vec::new() });
        }

        let filter: PathFilter = self.config.path_filter()?;
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| {
                // The root itself may be ".".
                let hidden = e.depth() > 0 && e.file_name().to_string_lossy().starts_with('.');
                !(e.file_type().is_dir() && hidden)
            })
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(path);
            if filter.accepts(relative) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Scan a file or directory.
    pub fn scan(&self, path: &Path) -> anyhow::Result<ScanResult> {
        let started = Instant::now();
        let root = path
            .canonicalize()
            .with_context(|| format!("path not found: {}", path.display()))?;

        let files = self.collect_files(&root)?;
        info!(path = %root.display(), files = files.len(), "scanning");

        let outcomes: Vec<FileOutcome> = files.par_iter().map(|file| self.scan_file(file)).collect();

        let mut result = ScanResult::new(&root);
        let mut endpoints = Vec::new();
        for (file, outcome) in files.iter().zip(outcomes) {
            let display = file.to_string_lossy().to_string();
            match outcome {
                FileOutcome::Analyzed {
                    frameworks,
                    endpoints: found,
                } => {
                    result.frameworks_detected.extend(frameworks);
                    endpoints.extend(found);
                }
                FileOutcome::Failed(reason) => {
                    result.parse_errors.insert(display.clone(), reason);
                }
            }
            result.files_scanned.push(display);
        }

        classify_all(&mut endpoints);
        result.endpoints = endpoints.into_iter().map(Arc::new).collect();

        let mut findings = self.engine.evaluate_all(&result.endpoints);
        findings.retain(|f| self.config.is_rule_enabled(f.rule_id));
        for finding in &mut findings {
            let route = finding.route();
            if let Some(reason) = self.suppressions.is_suppressed(finding.rule_id, &route) {
                debug!(rule = finding.rule_id, route = %route, "finding suppressed");
                finding.suppress(reason);
            }
        }
        result.findings = findings;
        result.duration = started.elapsed();

        info!(
            endpoints = result.endpoints.len(),
            findings = result.findings.len(),
            parse_errors = result.parse_errors.len(),
            duration_ms = result.duration_ms() as u64,
            "scan complete"
        );
        Ok(result)
    }

    fn scan_file(&self, file: &Path) -> FileOutcome {
        let source = match self.loader.parse_file(file) {
            Ok(source) => source,
            Err(e) => {
                warn!(path = %file.display(), error = %e, "skipping file");
                return FileOutcome::Failed(e.to_string());
            }
        };

        let mut frameworks = BTreeSet::new();
        let mut endpoints = Vec::new();
        for discoverer in self.discoverers.iter().filter(|d| d.can_handle(&source)) {
            frameworks.insert(discoverer.framework());
            match discoverer.discover(&source) {
                Ok(found) => endpoints.extend(found),
                Err(e) => warn!(
                    path = %file.display(),
                    framework = %discoverer.framework(),
                    error = %e,
                    "route discovery failed"
                ),
            }
        }

        FileOutcome::Analyzed {
            frameworks: frameworks.into_iter().collect(),
            endpoints,
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Suppression;
    use std::fs;
    use tempfile::TempDir;

    const GIN_APP: &str = r#"package main

import "github.com/gin-gonic/gin"

func main() {
    r := gin.Default()
    r.GET("/health", health)
    r.DELETE("/admin/users/:id", deleteUser)
}
"#;

    fn project(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn test_collect_files_applies_filters() {
        let dir = project(&[
            ("main.go", GIN_APP),
            ("api/handlers.go", "package api\n"),
            ("api/handlers_test.go", "package api\n"),
            ("vendor/lib/lib.go", "package lib\n"),
            (".hidden/x.go", "package x\n"),
            ("README.md", "# readme\n"),
        ]);
        let scanner = Scanner::default();
        let files = scanner.collect_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(names, vec!["api/handlers.go", "main.go"]);
    }

    #[test]
    fn test_single_file_scan() {
        let dir = project(&[("main.go", GIN_APP), ("notes.txt", "x")]);
        let scanner = Scanner::default();
        assert_eq!(scanner.collect_files(&dir.path().join("main.go")).unwrap().len(), 1);
        assert!(scanner.collect_files(&dir.path().join("notes.txt")).unwrap().is_empty());

        let result = scanner.scan(&dir.path().join("main.go")).unwrap();
        assert_eq!(result.endpoints.len(), 2);
        assert!(result.frameworks_detected.contains(&Framework::Gin));
    }

    #[test]
    fn test_parse_errors_do_not_abort() {
        let dir = project(&[
            ("main.go", GIN_APP),
            ("broken.go", "package main\n\nfunc broken( {\n"),
        ]);
        let result = Scanner::default().scan(dir.path()).unwrap();
        assert_eq!(result.files_scanned.len(), 2);
        assert_eq!(result.parse_errors.len(), 1);
        assert!(result.parse_errors.keys().next().unwrap().ends_with("broken.go"));
        assert_eq!(result.endpoints.len(), 2);
    }

    #[test]
    fn test_suppression_and_enablement() {
        let dir = project(&[("main.go", GIN_APP)]);
        let config = Config {
            suppressions: vec![Suppression {
                rule: "*".into(),
                route: "^/health$".into(),
                reason: "probe".into(),
            }],
            rules: crate::config::RulesConfig {
                enabled: Vec::new(),
                disabled: vec!["AP007".into()],
            },
            ..Config::default()
        };
        let result = Scanner::new(config).scan(dir.path()).unwrap();

        assert!(result.findings.iter().all(|f| f.rule_id != "AP007"));
        let suppressed: Vec<_> = result.suppressed_findings().collect();
        assert!(!suppressed.is_empty());
        assert!(suppressed.iter().all(|f| f.route() == "/health"));
        assert!(suppressed
            .iter()
            .all(|f| f.suppression_reason.as_deref() == Some("probe")));
        assert!(result.active_findings().all(|f| f.route() == "/admin/users/:id"));
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = Scanner::default().scan(&dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("path not found"));
    }
}
