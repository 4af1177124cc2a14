//! Exposure classification of authorization records.

use crate::models::{AuthorizationInfo, Endpoint, SecurityClassification};

/// Map an authorization record to its exposure tier.
///
/// Order matters: an anonymous marker always yields `Public`, and policy,
/// permission or scope requirements outrank roles.
pub fn classify(auth: &AuthorizationInfo) -> SecurityClassification {
    if auth.allows_anonymous {
        return SecurityClassification::Public;
    }
    if !auth.requires_auth && !auth.has_specific_requirements() {
        return SecurityClassification::Public;
    }
    if !auth.policies.is_empty() || !auth.permissions.is_empty() || !auth.scopes.is_empty() {
        return SecurityClassification::PolicyRestricted;
    }
    if !auth.roles.is_empty() {
        return SecurityClassification::RoleRestricted;
    }
    if auth.requires_auth || !auth.auth_dependencies.is_empty() {
        return SecurityClassification::Authenticated;
    }
    SecurityClassification::Public
}

/// Classify every endpoint in place.
pub fn classify_all(endpoints: &mut [Endpoint]) {
    for endpoint in endpoints {
        endpoint.classification = classify(&endpoint.authorization);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> AuthorizationInfo {
        AuthorizationInfo::default()
    }

    #[test]
    fn test_anonymous_dominates() {
        let mut a = auth();
        a.allows_anonymous = true;
        a.requires_auth = true;
        a.roles = vec!["admin".into()];
        a.policies = vec!["CanEdit".into()];
        assert_eq!(classify(&a), SecurityClassification::Public);
    }

    #[test]
    fn test_unconfigured_is_public() {
        assert_eq!(classify(&auth()), SecurityClassification::Public);
    }

    #[test]
    fn test_policy_outranks_roles() {
        let mut a = auth();
        a.requires_auth = true;
        a.roles = vec!["editor".into()];
        a.scopes = vec!["write".into()];
        assert_eq!(classify(&a), SecurityClassification::PolicyRestricted);

        a.scopes.clear();
        assert_eq!(classify(&a), SecurityClassification::RoleRestricted);

        a.roles.clear();
        assert_eq!(classify(&a), SecurityClassification::Authenticated);
    }

    #[test]
    fn test_requirements_without_requires_auth() {
        let mut a = auth();
        a.permissions = vec!["orders:read".into()];
        assert_eq!(classify(&a), SecurityClassification::PolicyRestricted);
    }

    #[test]
    fn test_dependencies_alone_stay_public() {
        let mut a = auth();
        a.auth_dependencies = vec!["Something".into()];
        assert_eq!(classify(&a), SecurityClassification::Public);
    }
}
