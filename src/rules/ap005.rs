use std::sync::Arc;

use super::Rule;
use crate::models::{Endpoint, Finding, Severity};

/// AP005: more distinct roles than the configured threshold.
pub struct ExcessiveRoles {
    max_roles: usize,
}

impl ExcessiveRoles {
    pub fn new(max_roles: usize) -> Self {
        Self { max_roles }
    }
}

impl Rule for ExcessiveRoles {
    fn id(&self) -> &'static str {
        "AP005"
    }

    fn name(&self) -> &'static str {
        "Excessive role access"
    }

    fn severity(&self) -> Severity {
        Severity::Low
    }

    fn description(&self) -> String {
        format!(
            "Endpoint allows access to more than {} roles. \
             Consider using broader permission categories.",
            self.max_roles
        )
    }

    fn evaluate(&self, endpoint: &Arc<Endpoint>) -> Vec<Finding> {
        let roles = &endpoint.authorization.roles;
        if roles.len() <= self.max_roles {
            return Vec::new();
        }
        vec![self.finding(
            endpoint,
            format!(
                "Endpoint '{}' allows access to {} roles: {}",
                endpoint.full_route(),
                roles.len(),
                roles.join(", ")
            ),
            "Consider grouping roles into broader permission categories or using policies",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;
    use crate::rules::testing::{endpoint, with_roles};

    #[test]
    fn test_threshold_is_exclusive() {
        let rule = ExcessiveRoles::new(3);
        let three = endpoint("/r", &[HttpMethod::Get], with_roles(&["a", "b", "c"]));
        assert!(rule.evaluate(&three).is_empty());

        let four = endpoint("/r", &[HttpMethod::Get], with_roles(&["a", "b", "c", "d"]));
        let findings = rule.evaluate(&four);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Endpoint '/r' allows access to 4 roles: a, b, c, d");
        assert!(rule.description().contains("more than 3 roles"));
    }
}
