//! Keyword dictionaries used to label middleware identifiers.

/// Substrings that mark a middleware as enforcing authentication.
pub const DEFAULT_AUTH_PATTERNS: &[&str] = &[
    "auth",
    "jwt",
    "oauth",
    "session",
    "token",
    "bearer",
    "apikey",
    "api_key",
    "authenticate",
    "authorized",
    "requireauth",
    "require_auth",
    "protected",
    "secure",
    "guard",
    "permission",
    "role",
    "acl",
    "casbin",
];

/// Substrings that mark a middleware as an explicit anonymous opt-out.
pub const DEFAULT_ANONYMOUS_PATTERNS: &[&str] = &[
    "allowanonymous",
    "allow_anonymous",
    "public",
    "noauth",
    "no_auth",
    "skipauth",
    "skip_auth",
    "permitall",
    "permit_all",
];

/// Which requirement list a middleware's literal arguments belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
    Policy,
    Permission,
    Scope,
    Role,
}

/// Injectable dictionaries for middleware labelling.
///
/// Matching is case-insensitive substring containment, so `AdminRoleGuard`
/// is both auth-indicating and role-bearing. All patterns are stored
/// lower-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthKeywords {
    pub auth: Vec<String>,
    pub anonymous: Vec<String>,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    pub scopes: Vec<String>,
    pub policies: Vec<String>,
}

impl Default for AuthKeywords {
    fn default() -> Self {
        Self {
            auth: lowered(DEFAULT_AUTH_PATTERNS),
            anonymous: lowered(DEFAULT_ANONYMOUS_PATTERNS),
            roles: lowered(&["role"]),
            permissions: lowered(&["permission"]),
            scopes: lowered(&["scope"]),
            policies: lowered(&["policy"]),
        }
    }
}

impl AuthKeywords {
    /// Extend the auth-indicating dictionary, e.g. with project-specific
    /// middleware names from configuration.
    pub fn with_auth_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pattern in patterns {
            let pattern = pattern.as_ref().trim().to_lowercase();
            if !pattern.is_empty() && !self.auth.contains(&pattern) {
                self.auth.push(pattern);
            }
        }
        self
    }

    pub fn is_auth(&self, name: &str) -> bool {
        contains_any(&name.to_lowercase(), &self.auth)
    }

    pub fn is_anonymous(&self, name: &str) -> bool {
        contains_any(&name.to_lowercase(), &self.anonymous)
    }

    /// Requirement list for a middleware name, strongest signal first.
    pub fn requirement_kind(&self, name: &str) -> Option<RequirementKind> {
        let lower = name.to_lowercase();
        [
            (RequirementKind::Policy, &self.policies),
            (RequirementKind::Permission, &self.permissions),
            (RequirementKind::Scope, &self.scopes),
            (RequirementKind::Role, &self.roles),
        ]
        .into_iter()
        .find(|(_, patterns)| contains_any(&lower, patterns))
        .map(|(kind, _)| kind)
    }
}

fn lowered(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(|p| p.to_lowercase()).collect()
}

fn contains_any(haystack: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|p| haystack.contains(p.as_str()))
}
