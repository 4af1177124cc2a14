//! Route discovery: from a parsed Go file to candidate endpoints.
//!
//! Every framework is handled by the same two-pass algorithm driven by a
//! [`FrameworkGrammar`]:
//!
//! 1. [`GroupTable::build`] records group handles (`v1 := r.Group("/v1")`,
//!    `r.Route("/v1", func(sub chi.Router) {...})`) and `Use` middleware.
//! 2. [`RouteResolver`] matches registration calls, resolves their receiver
//!    against the table and builds the merged authorization record.
//!
//! Both passes are purely syntactic and file-scoped. Calls whose path or
//! verb is not a string literal are skipped; receivers with no group entry
//! produce ungrouped endpoints.

pub mod frameworks;
mod grammar;
mod groups;
mod routes;

use tracing::debug;
use tree_sitter::Node;

pub use grammar::{FrameworkGrammar, GroupShape, HandlerPosition, MethodArgument};
pub use groups::{GroupInfo, GroupTable};
pub use routes::RouteResolver;

use crate::analysis::syntax::{arguments, call_expressions, handler_name, string_value};
use crate::analysis::ParsedSource;
use crate::authorization::{AuthKeywords, AuthorizationExtractor, Middleware};
use crate::error::AnalysisError;
use crate::models::{Endpoint, Framework};

/// Endpoint discovery for one framework.
///
/// Implementations share no state, so a file accepted by several
/// discoverers is processed independently by each.
pub trait Discoverer: Send + Sync {
    fn framework(&self) -> Framework;

    /// True if the file imports the framework's package or anything under
    /// its namespace.
    fn can_handle(&self, source: &ParsedSource) -> bool;

    /// Endpoints registered in the file, unclassified, in source order.
    fn discover(&self, source: &ParsedSource) -> Result<Vec<Endpoint>, AnalysisError>;
}

/// A [`Discoverer`] backed by a static grammar.
pub struct GrammarDiscoverer {
    grammar: &'static FrameworkGrammar,
    extractor: AuthorizationExtractor,
}

impl GrammarDiscoverer {
    pub fn new(grammar: &'static FrameworkGrammar, keywords: AuthKeywords) -> Self {
        Self {
            grammar,
            extractor: AuthorizationExtractor::new(keywords),
        }
    }
}

impl Discoverer for GrammarDiscoverer {
    fn framework(&self) -> Framework {
        self.grammar.framework
    }

    fn can_handle(&self, source: &ParsedSource) -> bool {
        source.imports.keys().any(|path| self.grammar.matches_import(path))
    }

    fn discover(&self, source: &ParsedSource) -> Result<Vec<Endpoint>, AnalysisError> {
        let calls = call_expressions(source)?;
        let groups = GroupTable::build(self.grammar, source, &calls);
        let endpoints = RouteResolver::new(self.grammar, &self.extractor).resolve(source, &calls, &groups);

        debug!(
            path = %source.path,
            framework = %self.grammar.framework,
            groups = groups.len(),
            endpoints = endpoints.len(),
            "discovered routes"
        );
        Ok(endpoints)
    }
}

/// One discoverer per supported framework, sharing the same dictionaries.
pub fn all_discoverers(keywords: &AuthKeywords) -> Vec<Box<dyn Discoverer>> {
    frameworks::ALL
        .iter()
        .copied()
        .map(|grammar| Box::new(GrammarDiscoverer::new(grammar, keywords.clone())) as Box<dyn Discoverer>)
        .collect()
}

/// Middleware reference for a group or route argument. Call arguments that
/// are string literals are kept for requirement extraction.
pub(crate) fn middleware_of(source: &ParsedSource, node: Node) -> Option<Middleware> {
    let name = handler_name(source, node);
    if name.is_empty() {
        return None;
    }
    let literals = if node.kind() == "call_expression" {
        arguments(node)
            .into_iter()
            .filter_map(|arg| string_value(source, arg))
            .collect()
    } else {
        Vec::new()
    };
    Some(Middleware {
        name,
        literal_args: literals,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::Path;

    use super::*;
    use crate::analysis::SourceLoader;

    /// Parse `code` and run one grammar over it.
    pub fn discover(grammar: &'static FrameworkGrammar, code: &str) -> Vec<Endpoint> {
        let parsed = SourceLoader::new()
            .parse_content(Path::new("main.go"), code.as_bytes())
            .unwrap();
        GrammarDiscoverer::new(grammar, AuthKeywords::default())
            .discover(&parsed)
            .unwrap()
    }
}
