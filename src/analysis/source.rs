//! Parsed Go sources and their import tables.

use std::collections::BTreeMap;
use std::fmt;

use tree_sitter::{Node, Tree};

/// Line and column of a syntax node, both 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Position of the first byte of a tree-sitter node.
    pub fn of(node: Node) -> Self {
        let start = node.start_position();
        Self {
            line: start.row + 1, // tree-sitter rows are 0-indexed
            column: start.column + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A Go file that parsed cleanly, together with everything route discovery
/// needs from it.
///
/// The raw bytes are kept next to the tree so node text can be recovered
/// during both discovery passes without re-reading the file.
pub struct ParsedSource {
    /// Path used for endpoint locations and error reporting.
    pub path: String,
    /// The tree-sitter parse tree.
    pub tree: Tree,
    /// Original source bytes.
    pub source: Vec<u8>,
    /// Import path mapped to its effective local alias.
    pub imports: BTreeMap<String, String>,
}

impl ParsedSource {
    /// Root node of the file.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Text covered by a node.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// Whether the file imports exactly this package path.
    pub fn has_import(&self, import_path: &str) -> bool {
        self.imports.contains_key(import_path)
    }

    /// Whether any import path starts with the given prefix.
    pub fn has_import_prefix(&self, prefix: &str) -> bool {
        self.imports.keys().any(|path| path.starts_with(prefix))
    }

    /// Local alias for an import path, if the file imports it.
    pub fn import_alias(&self, import_path: &str) -> Option<&str> {
        self.imports.get(import_path).map(String::as_str)
    }
}

impl fmt::Debug for ParsedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedSource")
            .field("path", &self.path)
            .field("imports", &self.imports)
            .finish_non_exhaustive()
    }
}

/// Conventional alias for an import path: its last segment.
pub fn default_alias(import_path: &str) -> &str {
    import_path.rsplit('/').next().unwrap_or(import_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_alias() {
        assert_eq!(default_alias("net/http"), "http");
        assert_eq!(default_alias("github.com/labstack/echo/v4"), "v4");
        assert_eq!(default_alias("fmt"), "fmt");
    }

    #[test]
    fn test_position_display() {
        let pos = Position { line: 12, column: 3 };
        assert_eq!(pos.to_string(), "12:3");
    }
}
