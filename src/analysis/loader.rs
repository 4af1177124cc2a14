//! Go source loading with tree-sitter.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use once_cell::sync::OnceCell;
use streaming_iterator::StreamingIterator;
use tracing::debug;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

use super::source::{default_alias, ParsedSource, Position};
use super::syntax::{cached_query, string_value};
use crate::error::AnalysisError;

/// Tree-sitter query for import specs, both single and grouped.
const IMPORT_QUERY: &str = r#"
(import_declaration
  (import_spec
    name: (package_identifier)? @alias
    path: (_) @path
  )
)

(import_declaration
  (import_spec_list
    (import_spec
      name: (package_identifier)? @alias
      path: (_) @path
    )
  )
)
"#;

static IMPORTS: OnceCell<Query> = OnceCell::new();

/// Reads and parses Go files.
///
/// A file whose tree contains any ERROR or MISSING node is rejected as a
/// parse failure rather than analyzed partially.
///
/// # Thread Safety
///
/// `tree_sitter::Parser` is not `Sync`, so a fresh parser is created per
/// call. The loader itself can be shared freely across rayon workers.
pub struct SourceLoader {
    language: Language,
}

impl SourceLoader {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> Result<Parser, AnalysisError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Read and parse a file from disk.
    pub fn parse_file(&self, path: &Path) -> Result<ParsedSource, AnalysisError> {
        let content = fs::read(path)?;
        self.parse_content(path, &content)
    }

    /// Parse in-memory Go source attributed to `path`.
    pub fn parse_content(&self, path: &Path, content: &[u8]) -> Result<ParsedSource, AnalysisError> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(content, None)
            .ok_or_else(|| AnalysisError::NoTree(path.to_path_buf()))?;
        let display_path = path.to_string_lossy().to_string();

        if let Some(node) = first_error(tree.root_node()) {
            let pos = Position::of(node);
            return Err(AnalysisError::Syntax {
                path: display_path,
                line: pos.line,
                column: pos.column,
            });
        }

        let mut parsed = ParsedSource {
            path: display_path,
            tree,
            source: content.to_vec(),
            imports: BTreeMap::new(),
        };
        parsed.imports = extract_imports(&parsed)?;

        debug!(path = %parsed.path, imports = parsed.imports.len(), "parsed Go source");
        Ok(parsed)
    }
}

impl Default for SourceLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error).or(Some(node))
}

/// Map every import path to its effective alias: the explicit name when one
/// is given, else the last path segment.
fn extract_imports(parsed: &ParsedSource) -> Result<BTreeMap<String, String>, AnalysisError> {
    let query = cached_query(&IMPORTS, IMPORT_QUERY)?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, parsed.root(), &parsed.source[..]);

    let mut imports = BTreeMap::new();
    while let Some(m) = matches.next() {
        let mut path = None;
        let mut alias = None;

        for capture in m.captures {
            match query.capture_names()[capture.index as usize] {
                "path" => path = string_value(parsed, capture.node),
                "alias" => alias = Some(parsed.node_text(capture.node).to_string()),
                _ => {}
            }
        }

        if let Some(path) = path.filter(|p| !p.is_empty()) {
            let alias = alias.unwrap_or_else(|| default_alias(&path).to_string());
            imports.entry(path).or_insert(alias);
        }
    }

    Ok(imports)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_go(source: &str) -> Result<ParsedSource, AnalysisError> {
        SourceLoader::new().parse_content(Path::new("test.go"), source.as_bytes())
    }

    #[test]
    fn test_extract_imports_with_aliases() {
        let parsed = parse_go(
            r#"
package main

import "net/http"

import (
    "fmt"
    ginpkg "github.com/gin-gonic/gin"
    "github.com/labstack/echo/v4"
)
"#,
        )
        .unwrap();

        assert_eq!(parsed.imports.len(), 4);
        assert_eq!(parsed.import_alias("net/http"), Some("http"));
        assert_eq!(parsed.import_alias("fmt"), Some("fmt"));
        assert_eq!(parsed.import_alias("github.com/gin-gonic/gin"), Some("ginpkg"));
        assert_eq!(parsed.import_alias("github.com/labstack/echo/v4"), Some("v4"));
        assert!(parsed.has_import_prefix("github.com/labstack/echo"));
        assert!(!parsed.has_import("github.com/labstack/echo"));
    }

    #[test]
    fn test_syntax_error_is_rejected() {
        let err = parse_go("package main\n\nfunc main() {\n    r.GET(\"/x\", \n").unwrap_err();
        match err {
            AnalysisError::Syntax { path, line, .. } => {
                assert_eq!(path, "test.go");
                assert!(line > 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_file_missing() {
        let loader = SourceLoader::new();
        let err = loader
            .parse_file(Path::new("/definitely/not/here.go"))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Io(_)));
    }
}
