use std::sync::Arc;

use super::Rule;
use crate::models::{Endpoint, Finding, Severity};

/// AP003: route-level anonymous marker overriding group authentication.
pub struct AuthConflict;

impl Rule for AuthConflict {
    fn id(&self) -> &'static str {
        "AP003"
    }

    fn name(&self) -> &'static str {
        "Group/route authorization conflict"
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn description(&self) -> String {
        "Route-level anonymous access overrides group-level authentication. \
         This may indicate a configuration mistake."
            .to_string()
    }

    fn evaluate(&self, endpoint: &Arc<Endpoint>) -> Vec<Finding> {
        let auth = &endpoint.authorization;
        if !(auth.allows_anonymous && auth.inherited) {
            return Vec::new();
        }
        vec![self.finding(
            endpoint,
            format!(
                "Route '{}' allows anonymous access, overriding group-level authentication",
                endpoint.full_route()
            ),
            "Verify this override is intentional. If the route should be public, consider documenting why with a comment",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorizationInfo, HttpMethod};
    use crate::rules::testing::{anonymous, endpoint};

    #[test]
    fn test_needs_both_anonymous_and_inherited() {
        let rule = AuthConflict;
        let conflict = AuthorizationInfo {
            allows_anonymous: true,
            inherited: true,
            ..Default::default()
        };
        assert_eq!(rule.evaluate(&endpoint("/api/login", &[HttpMethod::Post], conflict)).len(), 1);
        assert!(rule.evaluate(&endpoint("/login", &[HttpMethod::Post], anonymous())).is_empty());

        let inherited_only = AuthorizationInfo {
            requires_auth: true,
            inherited: true,
            ..Default::default()
        };
        assert!(rule.evaluate(&endpoint("/api/me", &[HttpMethod::Get], inherited_only)).is_empty());
    }
}
