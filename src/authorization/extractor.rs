use super::keywords::{AuthKeywords, RequirementKind};
use super::Middleware;
use crate::models::{AuthSource, AuthorizationInfo};

/// Turns middleware chains into authorization records.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationExtractor {
    keywords: AuthKeywords,
}

impl AuthorizationExtractor {
    pub fn new(keywords: AuthKeywords) -> Self {
        Self { keywords }
    }

    /// Label every middleware in order and collect the signals.
    ///
    /// An anonymous marker short-circuits the other checks for that entry.
    /// Literal arguments of a requirement-bearing middleware populate the
    /// matching requirement list; other shapes only contribute
    /// `requires_auth` and a dependency entry.
    pub fn extract(&self, middleware: &[Middleware], source: AuthSource) -> AuthorizationInfo {
        let mut auth = AuthorizationInfo::new();

        for mw in middleware {
            if mw.name.is_empty() {
                continue;
            }

            if self.keywords.is_anonymous(&mw.name) {
                auth.allows_anonymous = true;
                auth.source = source;
                continue;
            }

            if self.keywords.is_auth(&mw.name) {
                auth.requires_auth = true;
                auth.add_dependency(mw.name.clone());
                auth.source = source;
            }

            if let Some(kind) = self.keywords.requirement_kind(&mw.name) {
                for value in &mw.literal_args {
                    match kind {
                        RequirementKind::Policy => auth.add_policy(value.clone()),
                        RequirementKind::Permission => auth.add_permission(value.clone()),
                        RequirementKind::Scope => auth.add_scope(value.clone()),
                        RequirementKind::Role => auth.add_role(value.clone()),
                    }
                }
                if !mw.literal_args.is_empty() {
                    auth.source = source;
                }
            }
        }

        auth
    }

    /// Authorization for one route: group signals (tagged as router
    /// provenance) merged with route signals under override semantics.
    ///
    /// When the route's anonymous marker overrides a group that required
    /// authentication, `inherited` stays set on the anonymous-only record so
    /// the conflict can be reported.
    pub fn for_route(&self, group: &[Middleware], route: &[Middleware]) -> AuthorizationInfo {
        let mut parent = self.extract(group, AuthSource::Router);
        parent.inherited = parent.requires_auth;
        let child = self.extract(route, AuthSource::Middleware);

        let mut merged = AuthorizationInfo::merge(&parent, &child, true);
        if child.allows_anonymous && parent.requires_auth {
            merged.inherited = true;
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mw(name: &str) -> Middleware {
        Middleware::named(name)
    }

    #[test]
    fn test_extract_labels_chain() {
        let extractor = AuthorizationExtractor::default();
        let auth = extractor.extract(
            &[mw("Logger"), mw("AuthMiddleware"), mw("middleware.JWT")],
            AuthSource::Middleware,
        );
        assert!(auth.requires_auth);
        assert!(!auth.allows_anonymous);
        assert_eq!(auth.auth_dependencies, vec!["AuthMiddleware", "middleware.JWT"]);
        assert_eq!(auth.source, AuthSource::Middleware);
    }

    #[test]
    fn test_extract_role_literals() {
        let extractor = AuthorizationExtractor::default();
        let auth = extractor.extract(
            &[Middleware::with_literals("RequireRole", ["admin", "editor", "admin"])],
            AuthSource::Middleware,
        );
        assert!(auth.requires_auth);
        assert_eq!(auth.roles, vec!["admin", "editor"]);
    }

    #[test]
    fn test_extract_role_without_literals_records_requirement_only() {
        let extractor = AuthorizationExtractor::default();
        let auth = extractor.extract(&[mw("RoleMiddleware")], AuthSource::Router);
        assert!(auth.requires_auth);
        assert!(auth.roles.is_empty());
        assert_eq!(auth.auth_dependencies, vec!["RoleMiddleware"]);
    }

    #[test]
    fn test_scope_literals_without_auth_keyword() {
        let extractor = AuthorizationExtractor::default();
        let auth = extractor.extract(
            &[Middleware::with_literals("RequireScope", ["orders:write"])],
            AuthSource::Middleware,
        );
        assert!(!auth.requires_auth);
        assert_eq!(auth.scopes, vec!["orders:write"]);
    }

    #[test]
    fn test_anonymous_marker_skips_auth_check() {
        let extractor = AuthorizationExtractor::default();
        // "PublicAuth" matches both dictionaries; anonymous wins for that entry.
        let auth = extractor.extract(&[mw("PublicAuth")], AuthSource::Middleware);
        assert!(auth.allows_anonymous);
        assert!(!auth.requires_auth);
    }

    #[test]
    fn test_for_route_inherits_group_auth() {
        let extractor = AuthorizationExtractor::default();
        let auth = extractor.for_route(&[mw("AuthMiddleware")], &[]);
        assert!(auth.requires_auth);
        assert!(auth.inherited);
        assert_eq!(auth.source, AuthSource::Router);
    }

    #[test]
    fn test_for_route_anonymous_override_marks_conflict() {
        let extractor = AuthorizationExtractor::default();
        let auth = extractor.for_route(&[mw("AuthMiddleware")], &[mw("PublicMiddleware")]);
        assert!(auth.allows_anonymous);
        assert!(!auth.requires_auth);
        assert!(auth.inherited);
        assert!(auth.auth_dependencies.is_empty());
    }

    #[test]
    fn test_for_route_anonymous_without_group_auth() {
        let extractor = AuthorizationExtractor::default();
        let auth = extractor.for_route(&[], &[mw("PublicMiddleware")]);
        assert!(auth.allows_anonymous);
        assert!(!auth.inherited);
    }

    #[test]
    fn test_for_route_own_auth_is_not_inherited() {
        let extractor = AuthorizationExtractor::default();
        let auth = extractor.for_route(&[mw("AuthMiddleware")], &[mw("RequireAuth")]);
        assert!(auth.requires_auth);
        assert!(!auth.inherited);
        assert_eq!(auth.source, AuthSource::Middleware);
    }
}
