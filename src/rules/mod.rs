//! Security rules evaluated against classified endpoints.
//!
//! Each rule is a stateless predicate over one endpoint. Rules do not see
//! each other's results; overlap between them is expected (a public write
//! endpoint with no auth trips AP001, AP004 and AP008 together).

mod ap001;
mod ap002;
mod ap003;
mod ap004;
mod ap005;
mod ap006;
mod ap007;
mod ap008;
mod engine;

use std::sync::Arc;

pub use ap001::PublicWithoutIntent;
pub use ap002::AnonymousOnWrite;
pub use ap003::AuthConflict;
pub use ap004::MissingAuthOnWrite;
pub use ap005::ExcessiveRoles;
pub use ap006::WeakRoleNaming;
pub use ap007::SensitiveKeywords;
pub use ap008::EndpointWithoutAuth;
pub use engine::Engine;

use crate::models::{Endpoint, Finding, SecurityClassification, Severity};

/// Route substrings that suggest an endpoint should not be public.
pub const DEFAULT_SENSITIVE_KEYWORDS: &[&str] = &[
    "admin", "debug", "export", "import", "internal", "config", "settings", "secret",
    "private", "management", "manage", "system", "backup", "restore", "migrate", "database",
    "db", "console", "shell", "exec", "execute", "eval", "log", "logs", "trace", "metrics",
    "health", "status", "info", "actuator",
];

/// Role names too generic to describe a permission.
pub const DEFAULT_WEAK_ROLES: &[&str] = &[
    "user", "users", "admin", "admins", "guest", "guests", "member", "members", "default",
    "basic", "standard", "normal", "regular",
];

/// Roles allowed on one endpoint before AP005 fires.
pub const DEFAULT_MAX_ROLES: usize = 3;

/// Injectable dictionaries and thresholds used by the rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleVocabulary {
    /// Lower-case substrings matched against the lower-cased full route.
    pub sensitive_keywords: Vec<String>,
    /// Lower-case role names matched case-insensitively.
    pub weak_roles: Vec<String>,
    pub max_roles: usize,
}

impl Default for RuleVocabulary {
    fn default() -> Self {
        Self {
            sensitive_keywords: DEFAULT_SENSITIVE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            weak_roles: DEFAULT_WEAK_ROLES.iter().map(|s| s.to_string()).collect(),
            max_roles: DEFAULT_MAX_ROLES,
        }
    }
}

/// A security rule.
pub trait Rule: Send + Sync {
    /// Stable identifier, e.g. `AP001`.
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    fn severity(&self) -> Severity;

    fn description(&self) -> String;

    /// Zero or more findings for one endpoint.
    fn evaluate(&self, endpoint: &Arc<Endpoint>) -> Vec<Finding>;

    /// Build a finding carrying this rule's metadata.
    fn finding(
        &self,
        endpoint: &Arc<Endpoint>,
        message: String,
        recommendation: impl Into<String>,
    ) -> Finding
    where
        Self: Sized,
    {
        Finding::new(
            self.id(),
            self.name(),
            self.severity(),
            Arc::clone(endpoint),
            message,
            recommendation,
        )
    }
}

/// Public, not explicitly anonymous, and without a single auth signal.
pub(crate) fn is_unprotected_public(endpoint: &Endpoint) -> bool {
    endpoint.classification == SecurityClassification::Public
        && endpoint.authorization.is_unconfigured()
}
