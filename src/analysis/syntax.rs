//! Helpers for reading Go call shapes out of tree-sitter nodes.
//!
//! Everything here is purely lexical: names are rendered from the tree text,
//! string literals are unquoted, and nothing is resolved through types or
//! data flow.

use once_cell::sync::OnceCell;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Query, QueryCursor};

use super::source::{ParsedSource, Position};
use crate::error::AnalysisError;

/// Handler name recorded for function literals.
pub const ANONYMOUS_HANDLER: &str = "<anonymous>";

const CALL_QUERY: &str = "(call_expression) @call";

static CALLS: OnceCell<Query> = OnceCell::new();

/// Compile a query once per process.
pub(crate) fn cached_query(
    cell: &'static OnceCell<Query>,
    pattern: &str,
) -> Result<&'static Query, AnalysisError> {
    cell.get_or_try_init(|| {
        let language: Language = tree_sitter_go::LANGUAGE.into();
        Query::new(&language, pattern)
    })
    .map_err(AnalysisError::from)
}

/// All call expressions in the file, in source order.
///
/// Nested calls are included, so `r.GET("/x", Auth())` yields both the route
/// registration and the middleware factory call.
pub fn call_expressions(source: &ParsedSource) -> Result<Vec<Node<'_>>, AnalysisError> {
    let query = cached_query(&CALLS, CALL_QUERY)?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, source.root(), &source.source[..]);

    let mut calls = Vec::new();
    while let Some(m) = matches.next() {
        for capture in m.captures {
            calls.push(capture.node);
        }
    }
    calls.sort_by_key(|n| n.start_byte());
    Ok(calls)
}

/// Dotted name of the callee, e.g. `r.GET` or `http.HandleFunc`.
///
/// Selector chains are flattened (`s.router.GET`). When the chain is rooted
/// in something other than an identifier, only the selector names are kept,
/// so `r.Group("/v1").GET` renders as `GET`.
pub fn call_name(source: &ParsedSource, call: Node) -> String {
    let Some(function) = call.child_by_field_name("function") else {
        return String::new();
    };

    match function.kind() {
        "identifier" => source.node_text(function).to_string(),
        "selector_expression" => {
            let mut parts = Vec::new();
            let mut current = function;
            loop {
                match current.kind() {
                    "selector_expression" => {
                        if let Some(field) = current.child_by_field_name("field") {
                            parts.push(source.node_text(field));
                        }
                        match current.child_by_field_name("operand") {
                            Some(operand) => current = operand,
                            None => break,
                        }
                    }
                    "identifier" => {
                        parts.push(source.node_text(current));
                        break;
                    }
                    _ => break,
                }
            }
            parts.reverse();
            parts.join(".")
        }
        _ => String::new(),
    }
}

/// Render an identifier or a selector chain made only of identifiers.
///
/// Returns `None` for anything else (calls, index expressions, literals).
pub fn selector_path(source: &ParsedSource, node: Node) -> Option<String> {
    match node.kind() {
        "identifier" | "field_identifier" => Some(source.node_text(node).to_string()),
        "selector_expression" => {
            let operand = node.child_by_field_name("operand")?;
            let field = node.child_by_field_name("field")?;
            let base = selector_path(source, operand)?;
            Some(format!("{}.{}", base, source.node_text(field)))
        }
        "parenthesized_expression" => selector_path(source, node.named_child(0)?),
        _ => None,
    }
}

/// Value of a string literal node, with quotes removed.
///
/// Returns `None` when the node is not a literal, which is how callers learn
/// that a path or verb cannot be known without running the program.
pub fn string_value(source: &ParsedSource, node: Node) -> Option<String> {
    let text = source.node_text(node);
    match node.kind() {
        "interpreted_string_literal" => {
            let inner = text
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .unwrap_or(text);
            Some(unescape(inner))
        }
        "raw_string_literal" => Some(text.trim_matches('`').replace('\r', "")),
        "parenthesized_expression" => string_value(source, node.named_child(0)?),
        _ => None,
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Positional arguments of a call, comments skipped.
pub fn arguments<'t>(call: Node<'t>) -> Vec<Node<'t>> {
    let Some(list) = call.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut cursor = list.walk();
    list.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

/// Best-effort identity of a handler or middleware argument.
///
/// Identifiers are taken as-is, selectors as `recv.sel`, nested calls by
/// their call name (middleware factories), and function literals get the
/// anonymous marker. Anything else yields an empty string.
pub fn handler_name(source: &ParsedSource, node: Node) -> String {
    match node.kind() {
        "identifier" => source.node_text(node).to_string(),
        "selector_expression" => selector_path(source, node).unwrap_or_default(),
        "call_expression" => call_name(source, node),
        "func_literal" => ANONYMOUS_HANDLER.to_string(),
        "parenthesized_expression" | "variadic_argument" => node
            .named_child(0)
            .map(|inner| handler_name(source, inner))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Local name bound to the result of `call` by `x := call`, `x = call`
/// or `var x = call`.
///
/// Only single-target, single-value bindings count.
pub fn binding_target(source: &ParsedSource, call: Node) -> Option<String> {
    let list = call.parent()?;
    if list.kind() != "expression_list" || list.named_child_count() != 1 {
        return None;
    }
    let statement = list.parent()?;

    match statement.kind() {
        "short_var_declaration" | "assignment_statement" => {
            let right = statement.child_by_field_name("right")?;
            if right.id() != list.id() {
                return None;
            }
            let left = statement.child_by_field_name("left")?;
            if left.named_child_count() != 1 {
                return None;
            }
            selector_path(source, left.named_child(0)?)
        }
        "var_spec" => {
            let value = statement.child_by_field_name("value")?;
            if value.id() != list.id() {
                return None;
            }
            let mut cursor = statement.walk();
            let names: Vec<_> = statement
                .children_by_field_name("name", &mut cursor)
                .collect();
            match names.as_slice() {
                [name] => Some(source.node_text(*name).to_string()),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Name of the first parameter of a function literal, e.g. `r` in
/// `func(r chi.Router) { ... }`.
pub fn first_parameter(source: &ParsedSource, func_literal: Node) -> Option<String> {
    let params = func_literal.child_by_field_name("parameters")?;
    let mut cursor = params.walk();
    let first = params
        .named_children(&mut cursor)
        .find(|n| n.kind() == "parameter_declaration")?;
    let name = first.child_by_field_name("name")?;
    Some(source.node_text(name).to_string())
}

/// 1-indexed line of a node.
pub fn line_number(node: Node) -> usize {
    Position::of(node).line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SourceLoader;
    use std::path::Path;

    fn parse_go(source: &str) -> ParsedSource {
        SourceLoader::new()
            .parse_content(Path::new("test.go"), source.as_bytes())
            .unwrap()
    }

    fn first_call_named<'a>(parsed: &'a ParsedSource, name: &str) -> Node<'a> {
        call_expressions(parsed)
            .unwrap()
            .into_iter()
            .find(|c| call_name(parsed, *c) == name)
            .unwrap()
    }

    #[test]
    fn test_call_name_flattens_selectors() {
        let parsed = parse_go(
            r#"
package main

func main() {
    s.router.GET("/x", h)
    http.HandleFunc("/y", h)
    HandleFunc("/z", h)
}
"#,
        );
        let names: Vec<String> = call_expressions(&parsed)
            .unwrap()
            .into_iter()
            .map(|c| call_name(&parsed, c))
            .collect();
        assert_eq!(names, vec!["s.router.GET", "http.HandleFunc", "HandleFunc"]);
    }

    #[test]
    fn test_call_name_on_chained_call_keeps_selector_only() {
        let parsed = parse_go(
            r#"
package main

func main() {
    r.Group("/v1").GET("/x", h)
}
"#,
        );
        let calls = call_expressions(&parsed).unwrap();
        assert_eq!(call_name(&parsed, calls[0]), "GET");
        assert_eq!(call_name(&parsed, calls[1]), "r.Group");
    }

    #[test]
    fn test_string_value_variants() {
        let parsed = parse_go(
            r#"
package main

func main() {
    f("/plain", `/raw`, "/esc\"aped", path)
}
"#,
        );
        let call = first_call_named(&parsed, "f");
        let args = arguments(call);
        assert_eq!(string_value(&parsed, args[0]).as_deref(), Some("/plain"));
        assert_eq!(string_value(&parsed, args[1]).as_deref(), Some("/raw"));
        assert_eq!(string_value(&parsed, args[2]).as_deref(), Some("/esc\"aped"));
        assert_eq!(string_value(&parsed, args[3]), None);
    }

    #[test]
    fn test_handler_name_precedence() {
        let parsed = parse_go(
            r#"
package main

func main() {
    f(listUsers, h.Create, middleware.JWT("secret"), func(c *gin.Context) {}, 42)
}
"#,
        );
        let call = first_call_named(&parsed, "f");
        let names: Vec<String> = arguments(call)
            .into_iter()
            .map(|a| handler_name(&parsed, a))
            .collect();
        assert_eq!(
            names,
            vec!["listUsers", "h.Create", "middleware.JWT", ANONYMOUS_HANDLER, ""]
        );
    }

    #[test]
    fn test_binding_target_shapes() {
        let parsed = parse_go(
            r#"
package main

var admin = r.Group("/admin")

func main() {
    api := r.Group("/api")
    s.v1 = r.Group("/v1")
    a, b := r.Group("/a"), r.Group("/b")
    r.Group("/unbound")
}
"#,
        );
        let targets: Vec<Option<String>> = call_expressions(&parsed)
            .unwrap()
            .into_iter()
            .map(|c| binding_target(&parsed, c))
            .collect();
        assert_eq!(
            targets,
            vec![
                Some("admin".to_string()),
                Some("api".to_string()),
                Some("s.v1".to_string()),
                None,
                None,
                None,
            ]
        );
    }

    #[test]
    fn test_first_parameter() {
        let parsed = parse_go(
            r#"
package main

func main() {
    r.Route("/admin", func(ar chi.Router) {})
}
"#,
        );
        let call = first_call_named(&parsed, "r.Route");
        let args = arguments(call);
        assert_eq!(first_parameter(&parsed, args[1]).as_deref(), Some("ar"));
    }
}
