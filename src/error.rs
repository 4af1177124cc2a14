//! Error types shared by the analysis and configuration layers.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning a Go file into a syntax tree or walking it.
///
/// The scanner never propagates these past a single file: they are recorded
/// in the scan result's parse errors and the file is skipped.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("invalid syntax query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    #[error("parser produced no tree for {0}")]
    NoTree(PathBuf),
    #[error("{path}:{line}:{column}: syntax error")]
    Syntax {
        path: String,
        line: usize,
        column: usize,
    },
}

/// Errors raised while loading a YAML configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid glob pattern {pattern:?}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
