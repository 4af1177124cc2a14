//! Second pass: route registrations resolved against the group table.

use tree_sitter::Node;

use super::grammar::{FrameworkGrammar, HandlerPosition};
use super::groups::GroupTable;
use super::middleware_of;
use crate::analysis::syntax::{arguments, call_name, handler_name, line_number, selector_path, string_value};
use crate::analysis::ParsedSource;
use crate::authorization::{AuthorizationExtractor, Middleware};
use crate::models::{Endpoint, HttpMethod};

/// Node kinds that can never be a handler.
const LITERAL_KINDS: &[&str] = &[
    "interpreted_string_literal",
    "raw_string_literal",
    "int_literal",
    "float_literal",
    "imaginary_literal",
    "rune_literal",
    "true",
    "false",
    "nil",
];

/// Receiver and method of a registration call, after stripping inline
/// middleware chains.
struct CallTarget<'t> {
    method: String,
    receiver: Option<String>,
    inline_middleware: Vec<Node<'t>>,
}

/// Resolves route registrations for one grammar.
pub struct RouteResolver<'a> {
    grammar: &'a FrameworkGrammar,
    extractor: &'a AuthorizationExtractor,
}

impl<'a> RouteResolver<'a> {
    pub fn new(grammar: &'a FrameworkGrammar, extractor: &'a AuthorizationExtractor) -> Self {
        Self { grammar, extractor }
    }

    /// One endpoint per recognized registration, in source order.
    pub fn resolve(&self, source: &ParsedSource, calls: &[Node], groups: &GroupTable) -> Vec<Endpoint> {
        calls
            .iter()
            .filter_map(|call| self.resolve_call(source, *call, groups))
            .collect()
    }

    fn resolve_call(&self, source: &ParsedSource, call: Node, groups: &GroupTable) -> Option<Endpoint> {
        let target = self.call_target(source, call)?;
        let all_args = arguments(call);

        let (mut methods, args): (Vec<HttpMethod>, &[Node]) =
            if let Some(verb) = self.grammar.verb(&target.method) {
                (vec![verb], &all_args[..])
            } else if let Some(min_args) = self.grammar.method_argument_min(&target.method) {
                if all_args.len() < min_args {
                    return None;
                }
                let verb = string_value(source, all_args[0]).and_then(|v| HttpMethod::parse(&v))?;
                (vec![verb], &all_args[1..])
            } else if self.grammar.is_all_verbs(&target.method) {
                (HttpMethod::ALL.to_vec(), &all_args[..])
            } else {
                return None;
            };

        if args.len() < 2 {
            return None;
        }

        let mut route = string_value(source, args[0]).filter(|p| !p.is_empty())?;
        if self.grammar.method_patterns {
            let (verb, path) = split_method_pattern(&route)?;
            if let Some(verb) = verb {
                methods = vec![verb];
            }
            route = path;
        }

        let (handler, positional) = match self.grammar.handler_position {
            HandlerPosition::Last => (args[args.len() - 1], &args[1..args.len() - 1]),
            HandlerPosition::Second => (args[1], &args[2..]),
        };
        if LITERAL_KINDS.contains(&handler.kind()) {
            return None;
        }

        let mut route_middleware: Vec<Middleware> = target
            .inline_middleware
            .iter()
            .chain(positional)
            .filter_map(|node| middleware_of(source, *node))
            .collect();
        if self.grammar.unwrap_handler {
            route_middleware.extend(handler_wrappers(source, handler));
        }

        let group = target.receiver.as_deref().and_then(|r| groups.get(r));
        let (prefix, group_middleware) = match group {
            Some(info) => (info.prefix.clone(), info.middleware.as_slice()),
            None => (String::new(), &[][..]),
        };

        let mut endpoint = Endpoint::new(
            route,
            methods,
            source.path.clone(),
            line_number(call),
            self.grammar.framework,
        );
        endpoint.handler_name = handler_name(source, handler);
        endpoint.router_prefix = prefix;
        endpoint.authorization = self.extractor.for_route(group_middleware, &route_middleware);
        Some(endpoint)
    }

    fn call_target<'t>(&self, source: &ParsedSource, call: Node<'t>) -> Option<CallTarget<'t>> {
        let function = call.child_by_field_name("function")?;
        match function.kind() {
            "selector_expression" => {
                let field = function.child_by_field_name("field")?;
                let mut operand = function.child_by_field_name("operand")?;
                let mut inline_middleware = Vec::new();

                // r.With(a).With(b).Get(...): peel chained calls from the outside in.
                while operand.kind() == "call_expression" {
                    let Some(inner) = operand
                        .child_by_field_name("function")
                        .filter(|f| f.kind() == "selector_expression")
                    else {
                        break;
                    };
                    let Some(inner_field) = inner.child_by_field_name("field") else {
                        break;
                    };
                    if !self
                        .grammar
                        .is_inline_middleware_method(source.node_text(inner_field))
                    {
                        break;
                    }
                    let mut outer = arguments(operand);
                    outer.extend(inline_middleware);
                    inline_middleware = outer;
                    operand = inner.child_by_field_name("operand")?;
                }

                Some(CallTarget {
                    method: source.node_text(field).to_string(),
                    receiver: selector_path(source, operand),
                    inline_middleware,
                })
            }
            "identifier" if self.grammar.bare_calls => Some(CallTarget {
                method: source.node_text(function).to_string(),
                receiver: None,
                inline_middleware: Vec::new(),
            }),
            _ => None,
        }
    }
}

/// Split a `"METHOD /path"` pattern. Returns `None` when the pattern has no
/// path component at all.
fn split_method_pattern(pattern: &str) -> Option<(Option<HttpMethod>, String)> {
    let (verb, path) = match pattern.split_once(' ') {
        Some((head, rest)) => match HttpMethod::parse(head) {
            Some(verb) => (Some(verb), rest.trim_start()),
            None => (None, pattern),
        },
        None => (None, pattern),
    };
    if !path.contains('/') {
        return None;
    }
    Some((verb, path.to_string()))
}

/// Calls wrapping a handler, outermost first: `Auth(Log(h))` yields `Auth`
/// then `Log`.
fn handler_wrappers(source: &ParsedSource, handler: Node) -> Vec<Middleware> {
    let mut wrappers = Vec::new();
    let mut current = handler;
    while current.kind() == "call_expression" {
        let name = call_name(source, current);
        if name.is_empty() {
            break;
        }
        let args = arguments(current);
        let literals = args.iter().filter_map(|a| string_value(source, *a));
        wrappers.push(Middleware::with_literals(name, literals));
        match args.last() {
            Some(last) => current = *last,
            None => break,
        }
    }
    wrappers
}
