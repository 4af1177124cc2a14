//! YAML configuration for apiposture.
//!
//! Looked up from the scan path upward unless given explicitly:
//!
//! ```yaml
//! rules:
//!   enabled: []          # empty means all
//!   disabled: [AP007]
//! include: ["**/*.go"]
//! exclude: ["**/vendor/**", "**/*_test.go"]
//! suppressions:
//!   - rule: AP001        # or "*"
//!     route: "^/health"
//!     reason: health probe
//! auth_patterns: [gatekeeper]
//! min_severity: info
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::models::Severity;

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".apiposture.yaml",
    ".apiposture.yml",
    "apiposture.yaml",
    "apiposture.yml",
];

const DEFAULT_INCLUDE: &[&str] = &["**/*.go"];

const DEFAULT_EXCLUDE: &[&str] = &[
    "**/vendor/**",
    "**/*_test.go",
    "**/testdata/**",
    "**/.git/**",
    "**/node_modules/**",
];

lazy_static! {
    static ref RULE_ID: Regex = Regex::new(r"^AP\d{3}$").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub enabled: Vec<String>,
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// Silences findings of one rule (or `*`) on matching routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suppression {
    pub rule: String,
    /// Regex over the full route. Invalid regexes fall back to substring
    /// matching; empty matches every route.
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub reason: String,
}

/// How a suppression's `route` is matched.
#[derive(Debug, Clone)]
enum RoutePattern {
    Any,
    Regex(Regex),
    /// The pattern did not compile as a regex.
    Substring(String),
}

impl RoutePattern {
    fn compile(route: &str) -> Self {
        if route.is_empty() {
            return RoutePattern::Any;
        }
        match Regex::new(route) {
            Ok(re) => RoutePattern::Regex(re),
            Err(e) => {
                debug!(route, error = %e, "suppression route is not a regex, matching as substring");
                RoutePattern::Substring(route.to_string())
            }
        }
    }

    fn is_match(&self, route: &str) -> bool {
        match self {
            RoutePattern::Any => true,
            RoutePattern::Regex(re) => re.is_match(route),
            RoutePattern::Substring(text) => route.contains(text.as_str()),
        }
    }
}

/// Suppressions with their route patterns compiled once per scan.
#[derive(Debug, Clone, Default)]
pub struct SuppressionSet {
    entries: Vec<(Suppression, RoutePattern)>,
}

impl SuppressionSet {
    pub fn new(suppressions: &[Suppression]) -> Self {
        let entries = suppressions
            .iter()
            .map(|s| (s.clone(), RoutePattern::compile(&s.route)))
            .collect();
        Self { entries }
    }

    /// Reason of the first suppression matching this finding, if any.
    pub fn is_suppressed(&self, rule_id: &str, route: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(s, pattern)| (s.rule == rule_id || s.rule == "*") && pattern.is_match(route))
            .map(|(s, _)| s.reason.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: RulesConfig,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub suppressions: Vec<Suppression>,
    /// Extra auth-indicating middleware substrings.
    pub auth_patterns: Vec<String>,
    pub min_severity: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            include: DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            suppressions: Vec::new(),
            auth_patterns: Vec::new(),
            min_severity: Severity::Info.to_string(),
        }
    }
}

impl Config {
    /// Parse a config file. Fields not present keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document is a valid, all-default config.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Config = serde_yaml::from_str(content)?;
        if config.include.is_empty() {
            config.include = DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect();
        }
        config.warn_unknown_rules();
        Ok(config)
    }

    /// Walk up from `start` (or its directory, for a file) looking for a
    /// config file. The first hit wins.
    pub fn find(start: &Path) -> Option<PathBuf> {
        let start = start.canonicalize().ok()?;
        let mut current = if start.is_dir() {
            start
        } else {
            start.parent()?.to_path_buf()
        };

        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Rule IDs to run, or `None` for all of them.
    pub fn active_rules(&self) -> Option<Vec<String>> {
        if self.rules.enabled.is_empty() {
            return None;
        }
        Some(
            self.rules
                .enabled
                .iter()
                .filter(|id| !self.rules.disabled.contains(id))
                .cloned()
                .collect(),
        )
    }

    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if !self.rules.enabled.is_empty() && !self.rules.enabled.iter().any(|r| r == rule_id) {
            return false;
        }
        !self.rules.disabled.iter().any(|r| r == rule_id)
    }

    /// Compile the configured suppressions for matching.
    pub fn suppression_set(&self) -> SuppressionSet {
        SuppressionSet::new(&self.suppressions)
    }

    pub fn min_severity(&self) -> Severity {
        Severity::parse(&self.min_severity)
    }

    /// Compile include and exclude patterns.
    pub fn path_filter(&self) -> Result<PathFilter, ConfigError> {
        Ok(PathFilter {
            include: build_glob_set(&self.include)?,
            exclude: build_glob_set(&self.exclude)?,
        })
    }

    fn warn_unknown_rules(&self) {
        let ids = self
            .rules
            .enabled
            .iter()
            .chain(&self.rules.disabled)
            .chain(self.suppressions.iter().map(|s| &s.rule).filter(|r| *r != "*"));
        for id in ids {
            if !RULE_ID.is_match(id) {
                warn!(rule = %id, "config references an unknown rule id");
            }
        }
    }
}

/// Compiled include and exclude globs.
#[derive(Debug, Clone)]
pub struct PathFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl PathFilter {
    /// A path relative to the scan root is accepted when it matches an
    /// include pattern and no exclude pattern.
    pub fn accepts(&self, relative: &Path) -> bool {
        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ConfigError::Glob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ConfigError::Glob {
        pattern: patterns.join(", "),
        source,
    })
}

/// Commented starter config written by `apiposture init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("templates/apiposture.yaml");
