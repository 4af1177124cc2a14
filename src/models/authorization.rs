//! Per-endpoint authorization record and its merge semantics.

use serde::{Deserialize, Serialize};

use super::enums::AuthSource;

/// Authorization facts gathered for one endpoint.
///
/// `requires_auth` and `allows_anonymous` may both be true at once (an
/// explicit override); classification resolves that conflict, not this
/// record. List fields keep insertion order and never hold duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationInfo {
    pub requires_auth: bool,
    pub allows_anonymous: bool,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub policies: Vec<String>,
    /// Raw middleware identifiers that made `requires_auth` true.
    #[serde(default)]
    pub auth_dependencies: Vec<String>,
    /// True when `requires_auth` comes from an enclosing group.
    pub inherited: bool,
    pub source: AuthSource,
}

impl AuthorizationInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any role, scope, permission or policy present.
    pub fn has_specific_requirements(&self) -> bool {
        !self.roles.is_empty()
            || !self.scopes.is_empty()
            || !self.permissions.is_empty()
            || !self.policies.is_empty()
    }

    /// Any auth signal at all, including an explicit anonymous marker.
    pub fn has_configuration(&self) -> bool {
        self.requires_auth
            || self.allows_anonymous
            || !self.auth_dependencies.is_empty()
            || self.has_specific_requirements()
    }

    /// No requirement and no anonymous marker: nothing was declared.
    pub fn is_unconfigured(&self) -> bool {
        !self.allows_anonymous
            && !self.requires_auth
            && self.auth_dependencies.is_empty()
            && !self.has_specific_requirements()
    }

    pub fn add_role(&mut self, role: impl Into<String>) {
        push_unique(&mut self.roles, role.into());
    }

    pub fn add_scope(&mut self, scope: impl Into<String>) {
        push_unique(&mut self.scopes, scope.into());
    }

    pub fn add_permission(&mut self, permission: impl Into<String>) {
        push_unique(&mut self.permissions, permission.into());
    }

    pub fn add_policy(&mut self, policy: impl Into<String>) {
        push_unique(&mut self.policies, policy.into());
    }

    pub fn add_dependency(&mut self, dependency: impl Into<String>) {
        push_unique(&mut self.auth_dependencies, dependency.into());
    }

    /// Combine a parent (group) record with a child (route) record.
    ///
    /// With `allow_override`, a child that explicitly allows anonymous access
    /// wins outright and the parent's auth state is discarded. Otherwise
    /// `requires_auth` is OR'd, `allows_anonymous` is taken from the child when
    /// it has any configuration (override) or AND'd (no override), lists are
    /// unioned parent-first, `inherited` is cleared by a child requirement, and
    /// `source` prefers the child.
    pub fn merge(parent: &Self, child: &Self, allow_override: bool) -> Self {
        if allow_override && child.allows_anonymous {
            return Self {
                allows_anonymous: true,
                source: child.source,
                ..Self::default()
            };
        }

        let allows_anonymous = if allow_override {
            if child.has_configuration() {
                child.allows_anonymous
            } else {
                parent.allows_anonymous
            }
        } else {
            parent.allows_anonymous && child.allows_anonymous
        };

        Self {
            requires_auth: parent.requires_auth || child.requires_auth,
            allows_anonymous,
            roles: union(&parent.roles, &child.roles),
            scopes: union(&parent.scopes, &child.scopes),
            permissions: union(&parent.permissions, &child.permissions),
            policies: union(&parent.policies, &child.policies),
            auth_dependencies: union(&parent.auth_dependencies, &child.auth_dependencies),
            inherited: parent.inherited && !child.requires_auth,
            source: if child.source.is_none() {
                parent.source
            } else {
                child.source
            },
        }
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

fn union(first: &[String], second: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(first.len() + second.len());
    for item in first.iter().chain(second) {
        push_unique(&mut out, item.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_auth() -> AuthorizationInfo {
        AuthorizationInfo {
            requires_auth: true,
            inherited: true,
            auth_dependencies: vec!["AuthMiddleware".into()],
            roles: vec!["editor".into()],
            source: AuthSource::Router,
            ..Default::default()
        }
    }

    #[test]
    fn test_override_with_anonymous_child_discards_parent() {
        let child = AuthorizationInfo {
            allows_anonymous: true,
            source: AuthSource::Middleware,
            ..Default::default()
        };
        let merged = AuthorizationInfo::merge(&group_auth(), &child, true);

        assert!(merged.allows_anonymous);
        assert!(!merged.requires_auth);
        assert!(!merged.inherited);
        assert!(merged.roles.is_empty());
        assert!(merged.auth_dependencies.is_empty());
        assert_eq!(merged.source, AuthSource::Middleware);
    }

    #[test]
    fn test_unconfigured_child_inherits_parent() {
        let merged = AuthorizationInfo::merge(&group_auth(), &AuthorizationInfo::new(), true);

        assert!(merged.requires_auth);
        assert!(merged.inherited);
        assert_eq!(merged.auth_dependencies, vec!["AuthMiddleware"]);
        assert_eq!(merged.source, AuthSource::Router);
    }

    #[test]
    fn test_child_requirement_clears_inherited() {
        let child = AuthorizationInfo {
            requires_auth: true,
            auth_dependencies: vec!["RequireRole".into(), "AuthMiddleware".into()],
            roles: vec!["billing_admin".into(), "editor".into()],
            source: AuthSource::Middleware,
            ..Default::default()
        };
        let merged = AuthorizationInfo::merge(&group_auth(), &child, true);

        assert!(merged.requires_auth);
        assert!(!merged.inherited);
        assert_eq!(merged.roles, vec!["editor", "billing_admin"]);
        assert_eq!(merged.auth_dependencies, vec!["AuthMiddleware", "RequireRole"]);
    }

    #[test]
    fn test_without_override_anonymous_needs_both() {
        let parent = AuthorizationInfo {
            allows_anonymous: true,
            ..Default::default()
        };
        let anon_child = AuthorizationInfo {
            allows_anonymous: true,
            ..Default::default()
        };
        assert!(AuthorizationInfo::merge(&parent, &anon_child, false).allows_anonymous);
        assert!(!AuthorizationInfo::merge(&parent, &AuthorizationInfo::new(), false).allows_anonymous);
        assert!(!AuthorizationInfo::merge(&AuthorizationInfo::new(), &anon_child, false).allows_anonymous);
    }

    #[test]
    fn test_override_takes_child_anonymous_only_when_configured() {
        let parent = AuthorizationInfo {
            allows_anonymous: true,
            ..Default::default()
        };
        let configured_child = AuthorizationInfo {
            requires_auth: true,
            ..Default::default()
        };
        assert!(AuthorizationInfo::merge(&parent, &AuthorizationInfo::new(), true).allows_anonymous);
        assert!(!AuthorizationInfo::merge(&parent, &configured_child, true).allows_anonymous);
    }

    #[test]
    fn test_merge_is_deterministic() {
        let child = AuthorizationInfo {
            scopes: vec!["write".into(), "read".into()],
            ..Default::default()
        };
        let parent = AuthorizationInfo {
            scopes: vec!["read".into(), "admin".into()],
            ..Default::default()
        };
        let first = AuthorizationInfo::merge(&parent, &child, false);
        let second = AuthorizationInfo::merge(&parent, &child, false);
        assert_eq!(first, second);
        assert_eq!(first.scopes, vec!["read", "admin", "write"]);
    }

    #[test]
    fn test_add_helpers_deduplicate() {
        let mut auth = AuthorizationInfo::new();
        auth.add_role("admin");
        auth.add_role("admin");
        auth.add_dependency("JWT");
        auth.add_dependency("JWT");
        assert_eq!(auth.roles, vec!["admin"]);
        assert_eq!(auth.auth_dependencies, vec!["JWT"]);
        assert!(auth.has_specific_requirements());
        assert!(!auth.is_unconfigured());
    }
}
