//! Command-line interface for apiposture.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use crate::config::{Config, DEFAULT_CONFIG_TEMPLATE};
use crate::models::{Endpoint, Finding, Framework, HttpMethod, ScanResult, SecurityClassification, Severity};
use crate::report::{self, OutputFormat, ReportOptions};
use crate::scan::Scanner;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Static authorization posture scanner for Go APIs.
///
/// Finds routes registered with Gin, Echo, Chi, Fiber and net/http, works
/// out which middleware protects each one and reports endpoints whose
/// authorization looks missing, contradictory or too weak.
#[derive(Parser)]
#[command(name = "apiposture")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a Go project for API authorization issues
    Scan(ScanArgs),
    /// Write a default configuration file
    Init(InitArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortField {
    #[default]
    Severity,
    Route,
    Method,
    Classification,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Arguments for the scan command.
#[derive(Parser)]
pub struct ScanArgs {
    /// File or directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub output: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short = 'f', long)]
    pub output_file: Option<PathBuf>,

    /// Configuration file (default: search upward for .apiposture.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Minimum severity to report: info, low, medium, high, critical
    #[arg(long)]
    pub severity: Option<String>,

    /// Exit with code 1 when findings at this severity or above remain
    #[arg(long)]
    pub fail_on: Option<String>,

    #[arg(long, value_enum, default_value_t = SortField::Severity)]
    pub sort_by: SortField,

    #[arg(long, value_enum, default_value_t = SortDirection::Desc)]
    pub sort_dir: SortDirection,

    /// Only these classifications (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub classification: Vec<String>,

    /// Only endpoints with one of these HTTP methods (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub method: Vec<String>,

    /// Only routes containing this substring
    #[arg(long)]
    pub route_contains: Option<String>,

    /// Only these frameworks (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub framework: Vec<String>,

    /// Only findings of these rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub rule: Vec<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Use severity letters instead of icons
    #[arg(long)]
    pub no_icons: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = ".apiposture.yaml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Parsed result filters. Empty sets match everything.
#[derive(Debug, Default)]
pub struct Filters {
    pub classifications: Vec<SecurityClassification>,
    pub methods: Vec<HttpMethod>,
    pub route_contains: Option<String>,
    pub frameworks: Vec<Framework>,
    pub rules: Vec<String>,
}

impl Filters {
    pub fn from_args(args: &ScanArgs) -> anyhow::Result<Self> {
        let classifications = args
            .classification
            .iter()
            .map(|c| c.trim().parse::<SecurityClassification>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(anyhow::Error::msg)?;
        let methods = args
            .method
            .iter()
            .map(|m| m.parse::<HttpMethod>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(anyhow::Error::msg)?;
        let frameworks = args
            .framework
            .iter()
            .map(|f| f.trim().parse::<Framework>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(anyhow::Error::msg)?;

        Ok(Self {
            classifications,
            methods,
            route_contains: args.route_contains.clone().filter(|s| !s.is_empty()),
            frameworks,
            rules: args.rule.iter().map(|r| r.trim().to_uppercase()).collect(),
        })
    }

    fn matches_endpoint(&self, endpoint: &Endpoint) -> bool {
        if !self.classifications.is_empty() && !self.classifications.contains(&endpoint.classification)
        {
            return false;
        }
        if !self.methods.is_empty() && !endpoint.methods.iter().any(|m| self.methods.contains(m)) {
            return false;
        }
        if let Some(needle) = &self.route_contains {
            if !endpoint.full_route().contains(needle.as_str()) {
                return false;
            }
        }
        self.frameworks.is_empty() || self.frameworks.contains(&endpoint.framework)
    }

    fn matches_finding(&self, finding: &Finding) -> bool {
        self.matches_endpoint(&finding.endpoint)
            && (self.rules.is_empty() || self.rules.iter().any(|r| r == finding.rule_id))
    }

    /// Narrow endpoints and findings. The rule filter only affects findings.
    pub fn apply(&self, result: &mut ScanResult) {
        result.endpoints.retain(|e| self.matches_endpoint(e));
        result.findings.retain(|f| self.matches_finding(f));
    }
}

/// Stable sort; ties keep scan order in both directions.
pub fn sort_findings(findings: &mut [Finding], field: SortField, direction: SortDirection) {
    findings.sort_by(|a, b| {
        let ordering = match field {
            SortField::Severity => a.severity.cmp(&b.severity),
            SortField::Route => a.route().cmp(&b.route()),
            SortField::Method => a.endpoint.display_methods().cmp(&b.endpoint.display_methods()),
            SortField::Classification => a
                .endpoint
                .classification
                .as_str()
                .cmp(b.endpoint.classification.as_str()),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn load_config(args: &ScanArgs) -> anyhow::Result<Config> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => Config::find(&args.path),
    };
    match path {
        Some(path) => {
            debug!(path = %path.display(), "using config");
            Ok(Config::load(&path)?)
        }
        None => Ok(Config::default()),
    }
}

fn parse_severity(value: &str, flag: &str) -> anyhow::Result<Severity> {
    value
        .parse::<Severity>()
        .map_err(|e| anyhow!("invalid {} value: {}", flag, e))
}

/// Run the scan command.
pub fn run_scan(args: &ScanArgs) -> anyhow::Result<i32> {
    let config = load_config(args)?;
    let filters = Filters::from_args(args)?;
    let min_severity = match &args.severity {
        Some(value) => parse_severity(value, "--severity")?,
        None => config.min_severity(),
    };
    let fail_on = args
        .fail_on
        .as_deref()
        .map(|value| parse_severity(value, "--fail-on"))
        .transpose()?;

    let scanner = Scanner::new(config);
    let mut result = scanner.scan(&args.path)?;

    result.findings.retain(|f| f.severity.greater_or_equal(min_severity));
    filters.apply(&mut result);
    sort_findings(&mut result.findings, args.sort_by, args.sort_dir);

    let options = ReportOptions {
        no_color: args.no_color || args.output_file.is_some(),
        no_icons: args.no_icons,
    };
    match &args.output_file {
        Some(path) => {
            write_output_file(path, args.output, &result, options)?;
            println!("Output written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            report::write_report(args.output, &result, options, &mut out)?;
            out.flush()?;
        }
    }

    if let Some(threshold) = fail_on {
        if result.findings_at_or_above(threshold).next().is_some() {
            return Ok(EXIT_FAILED);
        }
    }
    Ok(EXIT_SUCCESS)
}

fn write_output_file(
    path: &Path,
    format: OutputFormat,
    result: &ScanResult,
    options: ReportOptions,
) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to write output file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    report::write_report(format, result, options, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() && !args.force {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Use --force to overwrite it");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }

    if let Err(e) = fs::write(&args.output, DEFAULT_CONFIG_TEMPLATE) {
        bail!("failed to write {}: {}", args.output.display(), e);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to tune rules and suppressions", args.output.display());
    println!("  2. Run: apiposture scan . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
