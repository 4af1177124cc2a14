use std::sync::Arc;

use super::Rule;
use crate::models::{Endpoint, Finding, Severity};

/// AP006: role names drawn from a generic-name dictionary.
pub struct WeakRoleNaming {
    weak_roles: Vec<String>,
}

impl WeakRoleNaming {
    pub fn new(weak_roles: Vec<String>) -> Self {
        Self { weak_roles }
    }

    fn is_weak(&self, role: &str) -> bool {
        let lower = role.to_lowercase();
        self.weak_roles.iter().any(|w| *w == lower)
    }
}

impl Rule for WeakRoleNaming {
    fn id(&self) -> &'static str {
        "AP006"
    }

    fn name(&self) -> &'static str {
        "Weak role naming"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn description(&self) -> String {
        "Role names are too generic. \
         Consider using more descriptive names that indicate specific permissions."
            .to_string()
    }

    fn evaluate(&self, endpoint: &Arc<Endpoint>) -> Vec<Finding> {
        let weak: Vec<&str> = endpoint
            .authorization
            .roles
            .iter()
            .filter(|r| self.is_weak(r))
            .map(String::as_str)
            .collect();
        if weak.is_empty() {
            return Vec::new();
        }
        vec![self.finding(
            endpoint,
            format!(
                "Endpoint '{}' uses generic role names: {}",
                endpoint.full_route(),
                weak.join(", ")
            ),
            "Use more descriptive role names that indicate permissions, e.g., 'billing_admin', 'content_editor', 'report_viewer'",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;
    use crate::rules::testing::{endpoint, with_roles};
    use crate::rules::RuleVocabulary;

    #[test]
    fn test_generic_roles_case_insensitive() {
        let rule = WeakRoleNaming::new(RuleVocabulary::default().weak_roles);
        let ep = endpoint("/x", &[HttpMethod::Get], with_roles(&["Admin", "billing_admin", "user"]));
        let findings = rule.evaluate(&ep);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Endpoint '/x' uses generic role names: Admin, user");

        let ep = endpoint("/x", &[HttpMethod::Get], with_roles(&["report_viewer"]));
        assert!(rule.evaluate(&ep).is_empty());
    }
}
