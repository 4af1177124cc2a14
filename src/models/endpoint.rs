use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use super::authorization::AuthorizationInfo;
use super::enums::{Framework, HttpMethod, SecurityClassification};

/// One statically discovered route binding.
///
/// Equality and hashing only look at the route path, the method set, the
/// file and the line: the same registration seen twice is one endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Endpoint {
    pub route: String,
    pub methods: BTreeSet<HttpMethod>,
    pub file_path: String,
    pub line_number: usize,
    pub framework: Framework,
    /// Best-effort handler identity; may be empty or `<anonymous>`.
    pub handler_name: String,
    pub authorization: AuthorizationInfo,
    pub classification: SecurityClassification,
    /// Group prefix the route was registered under, possibly empty.
    pub router_prefix: String,
}

impl Endpoint {
    pub fn new(
        route: impl Into<String>,
        methods: impl IntoIterator<Item = HttpMethod>,
        file_path: impl Into<String>,
        line_number: usize,
        framework: Framework,
    ) -> Self {
        Self {
            route: route.into(),
            methods: methods.into_iter().collect(),
            file_path: file_path.into(),
            line_number,
            framework,
            handler_name: String::new(),
            authorization: AuthorizationInfo::default(),
            classification: SecurityClassification::default(),
            router_prefix: String::new(),
        }
    }

    /// Prefix with its trailing slash trimmed, joined to the route with a
    /// leading slash enforced.
    pub fn full_route(&self) -> String {
        if self.router_prefix.is_empty() {
            return self.route.clone();
        }
        let prefix = self.router_prefix.trim_end_matches('/');
        if self.route.starts_with('/') {
            format!("{}{}", prefix, self.route)
        } else {
            format!("{}/{}", prefix, self.route)
        }
    }

    /// Methods joined with `, ` in canonical order.
    pub fn display_methods(&self) -> String {
        self.methods
            .iter()
            .map(HttpMethod::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `file:line`.
    pub fn location(&self) -> String {
        format!("{}:{}", self.file_path, self.line_number)
    }

    /// `file:line` using only the file name.
    pub fn short_location(&self) -> String {
        let name = self
            .file_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.file_path);
        format!("{}:{}", name, self.line_number)
    }

    /// True when any registered method modifies state.
    pub fn is_write_endpoint(&self) -> bool {
        self.methods.iter().any(HttpMethod::is_write)
    }
}

impl PartialEq for Endpoint {
    fn eq(&self, other: &Self) -> bool {
        self.route == other.route
            && self.methods == other.methods
            && self.file_path == other.file_path
            && self.line_number == other.line_number
    }
}

impl Eq for Endpoint {}

impl Hash for Endpoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.route.hash(state);
        self.methods.hash(state);
        self.file_path.hash(state);
        self.line_number.hash(state);
    }
}
