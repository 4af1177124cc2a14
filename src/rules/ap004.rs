use std::sync::Arc;

use super::{is_unprotected_public, Rule};
use crate::models::{Endpoint, Finding, Severity};

/// AP004: public write endpoint with no auth signal at all.
///
/// Explicit anonymous markers are AP002's concern, not this rule's.
pub struct MissingAuthOnWrite;

impl Rule for MissingAuthOnWrite {
    fn id(&self) -> &'static str {
        "AP004"
    }

    fn name(&self) -> &'static str {
        "Missing authentication on write endpoint"
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn description(&self) -> String {
        "Write endpoints (POST, PUT, DELETE, PATCH) without any authentication. \
         This is a critical security risk allowing unauthorized data modification."
            .to_string()
    }

    fn evaluate(&self, endpoint: &Arc<Endpoint>) -> Vec<Finding> {
        if !endpoint.is_write_endpoint() || !is_unprotected_public(endpoint) {
            return Vec::new();
        }
        vec![self.finding(
            endpoint,
            format!(
                "Write endpoint '{}' [{}] has no authentication",
                endpoint.full_route(),
                endpoint.display_methods()
            ),
            "Add authentication middleware to protect this write endpoint",
        )]
    }
}
