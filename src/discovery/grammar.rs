//! Per-framework call-shape descriptors.
//!
//! Every supported framework registers routes with the same handful of call
//! shapes; they differ only in vocabulary and argument positions. A
//! [`FrameworkGrammar`] captures that vocabulary so one resolver can serve
//! all of them.

use crate::models::{Framework, HttpMethod};

/// How group handles are bound in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupShape {
    /// `v1 := r.Group("/v1", mw...)`: the assigned name is the key.
    Assigned,
    /// `r.Route("/v1", func(sub chi.Router) {...})`: the closure parameter is
    /// the key and the prefix argument is optional.
    ClosureParameter,
    /// No grouping construct.
    Ungrouped,
}

/// Where the handler sits among the arguments after the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerPosition {
    /// `(path, mw..., handler)`; middleware precedes the handler.
    Last,
    /// `(path, handler, mw...)`; middleware follows the handler.
    Second,
}

/// A dispatch method that takes the HTTP verb as its first argument, e.g.
/// gin's `Handle("GET", path, h)`.
#[derive(Debug, Clone, Copy)]
pub struct MethodArgument {
    pub names: &'static [&'static str],
    /// Minimum argument count, verb included.
    pub min_args: usize,
}

/// Vocabulary for one routing framework.
#[derive(Debug, Clone, Copy)]
pub struct FrameworkGrammar {
    pub framework: Framework,
    /// Import path that enables this grammar.
    pub import_path: &'static str,
    /// Any import under this prefix also enables it (major-version suffixes).
    pub import_prefix: Option<&'static str>,
    /// Method name to verb, for `r.GET(path, ...)` shapes.
    pub verbs: Option<&'static phf::Map<&'static str, HttpMethod>>,
    pub method_argument: Option<MethodArgument>,
    /// Methods registering the route for every verb.
    pub all_verbs: &'static [&'static str],
    /// Accept unqualified calls such as `HandleFunc(path, h)`.
    pub bare_calls: bool,
    /// Paths may carry a leading verb (`"POST /items"`) and must contain a
    /// `/` to count as a route.
    pub method_patterns: bool,
    pub group_methods: &'static [&'static str],
    pub group_shape: GroupShape,
    pub handler_position: HandlerPosition,
    /// Methods attaching middleware to an existing handle (`r.Use(mw)`).
    pub use_methods: &'static [&'static str],
    /// Chained calls that add route-level middleware, like chi's
    /// `r.With(mw).Get(...)`.
    pub inline_middleware_methods: &'static [&'static str],
    /// Treat calls wrapping the handler (`Auth(handler)`) as middleware.
    pub unwrap_handler: bool,
}

impl FrameworkGrammar {
    /// Whether a file's imports enable this grammar.
    pub fn matches_import(&self, import_path: &str) -> bool {
        import_path == self.import_path
            || self
                .import_prefix
                .is_some_and(|prefix| import_path.starts_with(prefix))
    }

    pub fn verb(&self, method_name: &str) -> Option<HttpMethod> {
        self.verbs.and_then(|verbs| verbs.get(method_name).copied())
    }

    pub fn is_group_method(&self, method_name: &str) -> bool {
        self.group_shape != GroupShape::Ungrouped && self.group_methods.contains(&method_name)
    }

    pub fn is_use_method(&self, method_name: &str) -> bool {
        self.use_methods.contains(&method_name)
    }

    pub fn is_inline_middleware_method(&self, method_name: &str) -> bool {
        self.inline_middleware_methods.contains(&method_name)
    }

    pub fn method_argument_min(&self, method_name: &str) -> Option<usize> {
        self.method_argument
            .filter(|shape| shape.names.contains(&method_name))
            .map(|shape| shape.min_args)
    }

    pub fn is_all_verbs(&self, method_name: &str) -> bool {
        self.all_verbs.contains(&method_name)
    }
}
