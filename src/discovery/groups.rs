//! First pass: group handles, their prefixes and attached middleware.

use std::collections::HashMap;

use tree_sitter::Node;

use super::grammar::{FrameworkGrammar, GroupShape};
use super::middleware_of;
use crate::analysis::syntax::{arguments, binding_target, first_parameter, selector_path, string_value};
use crate::analysis::ParsedSource;
use crate::authorization::Middleware;

/// Prefix and middleware contributed by one group handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupInfo {
    pub prefix: String,
    pub middleware: Vec<Middleware>,
}

/// File-scoped map from handle name to group information.
///
/// Keys are plain identifier text (or `a.b` selector paths); there is no
/// scope analysis, so two groups bound to the same name alias and the last
/// binding in source order wins.
#[derive(Debug, Default)]
pub struct GroupTable {
    groups: HashMap<String, GroupInfo>,
}

impl GroupTable {
    /// Scan `calls` (source order) for group constructors and `Use` calls.
    ///
    /// Bindings are recorded first and `Use` attachments applied after, so
    /// a `Use` written above the binding of its handle still counts.
    pub fn build(grammar: &FrameworkGrammar, source: &ParsedSource, calls: &[Node]) -> Self {
        let mut table = Self::default();
        let mut attachments: Vec<(String, Vec<Middleware>)> = Vec::new();
        if grammar.group_shape == GroupShape::Ungrouped && grammar.use_methods.is_empty() {
            return table;
        }

        for call in calls {
            let Some(function) = call.child_by_field_name("function") else {
                continue;
            };
            if function.kind() != "selector_expression" {
                continue;
            }
            let (Some(field), Some(operand)) = (
                function.child_by_field_name("field"),
                function.child_by_field_name("operand"),
            ) else {
                continue;
            };
            let method = source.node_text(field);

            if grammar.is_group_method(method) {
                if let Some((key, info)) = group_binding(grammar, source, *call) {
                    table.groups.insert(key, info);
                }
            } else if grammar.is_use_method(method) {
                if let Some(key) = selector_path(source, operand) {
                    let attached = arguments(*call)
                        .into_iter()
                        .filter_map(|arg| middleware_of(source, arg))
                        .collect();
                    attachments.push((key, attached));
                }
            }
        }

        for (key, attached) in attachments {
            table.groups.entry(key).or_default().middleware.extend(attached);
        }

        table
    }

    pub fn get(&self, handle: &str) -> Option<&GroupInfo> {
        self.groups.get(handle)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }
}

fn group_binding(
    grammar: &FrameworkGrammar,
    source: &ParsedSource,
    call: Node,
) -> Option<(String, GroupInfo)> {
    let args = arguments(call);
    // A computed prefix keeps the group with an empty prefix.
    let literal_prefix = |node: Option<&Node>| {
        node.and_then(|n| string_value(source, *n))
            .unwrap_or_default()
    };

    match grammar.group_shape {
        GroupShape::Assigned => {
            let key = binding_target(source, call)?;
            let middleware = args
                .iter()
                .skip(1)
                .filter_map(|arg| middleware_of(source, *arg))
                .collect();
            Some((
                key,
                GroupInfo {
                    prefix: literal_prefix(args.first()),
                    middleware,
                },
            ))
        }
        GroupShape::ClosureParameter => {
            let closure = args.last().filter(|n| n.kind() == "func_literal")?;
            let key = first_parameter(source, *closure)?;
            let prefix = if args.len() >= 2 {
                literal_prefix(args.first())
            } else {
                String::new()
            };
            Some((
                key,
                GroupInfo {
                    prefix,
                    middleware: Vec::new(),
                },
            ))
        }
        GroupShape::Ungrouped => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::syntax::call_expressions;
    use crate::analysis::SourceLoader;
    use crate::discovery::frameworks::{CHI, GIN, NET_HTTP};
    use std::path::Path;

    fn table(grammar: &FrameworkGrammar, code: &str) -> GroupTable {
        let parsed = SourceLoader::new()
            .parse_content(Path::new("groups.go"), code.as_bytes())
            .unwrap();
        let calls = call_expressions(&parsed).unwrap();
        GroupTable::build(grammar, &parsed, &calls)
    }

    #[test]
    fn test_assigned_groups() {
        let groups = table(
            &GIN,
            r#"
package main

func main() {
    v1 := r.Group("/v1", AuthMiddleware(), Logger)
    var v2 = r.Group(prefix)
    s.admin = r.Group("/admin")
    s.admin.Use(RequireRole("admin", "ops"))
    r.Group("/dangling")
}
"#,
        );

        assert_eq!(groups.len(), 3);
        let v1 = groups.get("v1").unwrap();
        assert_eq!(v1.prefix, "/v1");
        let names: Vec<&str> = v1.middleware.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["AuthMiddleware", "Logger"]);

        assert_eq!(groups.get("v2").unwrap().prefix, "");

        let admin = groups.get("s.admin").unwrap();
        assert_eq!(admin.prefix, "/admin");
        assert_eq!(
            admin.middleware,
            vec![Middleware::with_literals("RequireRole", ["admin", "ops"])]
        );
    }

    #[test]
    fn test_use_on_ungrouped_handle_creates_entry() {
        let groups = table(
            &GIN,
            r#"
package main

func main() {
    r := gin.New()
    r.Use(gin.Logger(), AuthRequired)
}
"#,
        );
        let root = groups.get("r").unwrap();
        assert_eq!(root.prefix, "");
        assert_eq!(root.middleware.len(), 2);
        assert_eq!(root.middleware[0].name, "gin.Logger");
    }

    #[test]
    fn test_last_binding_wins() {
        let groups = table(
            &GIN,
            r#"
package main

func a() {
    g := r.Group("/first")
}

func b() {
    g := r.Group("/second")
}
"#,
        );
        assert_eq!(groups.get("g").unwrap().prefix, "/second");
    }

    #[test]
    fn test_closure_parameter_groups() {
        let groups = table(
            &CHI,
            r#"
package main

func main() {
    r.Route("/api", func(api chi.Router) {
        api.Use(Authenticator)
    })
    r.Group(func(g chi.Router) {})
    r.Route(base, func(dyn chi.Router) {})
}
"#,
        );
        let api = groups.get("api").unwrap();
        assert_eq!(api.prefix, "/api");
        assert_eq!(api.middleware, vec![Middleware::named("Authenticator")]);
        assert_eq!(groups.get("g").unwrap().prefix, "");
        assert_eq!(groups.get("dyn").unwrap().prefix, "");
    }

    #[test]
    fn test_use_before_binding_is_kept() {
        let groups = table(
            &GIN,
            r#"
package main

func registerAdmin(admin *gin.RouterGroup) {
    admin.Use(AuthRequired())
    admin.DELETE("/users/:id", deleteUser)
}

func main() {
    r := gin.Default()
    admin := r.Group("/admin", Logger)
    registerAdmin(admin)
}
"#,
        );
        let admin = groups.get("admin").unwrap();
        assert_eq!(admin.prefix, "/admin");
        let names: Vec<&str> = admin.middleware.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Logger", "AuthRequired"]);
    }

    #[test]
    fn test_ungrouped_grammar_builds_nothing() {
        let groups = table(
            &NET_HTTP,
            r#"
package main

func main() {
    mux.Use(Auth)
}
"#,
        );
        assert_eq!(groups.len(), 0);
        assert!(groups.get("mux").is_none());
    }
}
