//! apiposture - static authorization posture scanner for Go web APIs.
//!
//! Parses Go sources with tree-sitter, discovers HTTP routes registered
//! with Gin, Echo, Chi, Fiber and net/http, works out which middleware
//! guards each route and evaluates a fixed rule set (AP001..AP008) over
//! the result. Nothing is compiled or executed; analysis is syntactic and
//! scoped to one file at a time.
//!
//! # Architecture
//!
//! - `analysis`: Go parsing, import tables and syntax helpers
//! - `discovery`: per-framework grammars and the group/route resolver
//! - `authorization`: middleware name dictionaries and signal extraction
//! - `classification`: exposure tier of each endpoint
//! - `rules`: the AP rule set and its engine
//! - `scan`: file collection and the parallel per-file pipeline
//! - `config`: YAML configuration
//! - `report`: terminal, JSON, Markdown and SARIF output
//!
//! # Adding a Framework
//!
//! Describe its call shapes in a new `FrameworkGrammar` under
//! `src/discovery/frameworks/` and list it in `frameworks::ALL`.

pub mod analysis;
pub mod authorization;
pub mod classification;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod models;
pub mod report;
pub mod rules;
pub mod scan;

pub use config::Config;
pub use error::{AnalysisError, ConfigError};
pub use models::{Endpoint, Finding, ScanResult, SecurityClassification, Severity};
pub use rules::Engine;
pub use scan::Scanner;
