use std::sync::Arc;

use super::Rule;
use crate::models::{Endpoint, Finding, Severity};

/// AP002: write endpoint that explicitly allows anonymous callers.
pub struct AnonymousOnWrite;

impl Rule for AnonymousOnWrite {
    fn id(&self) -> &'static str {
        "AP002"
    }

    fn name(&self) -> &'static str {
        "Anonymous access on write endpoint"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn description(&self) -> String {
        "Write endpoints (POST, PUT, DELETE, PATCH) with explicit anonymous access. \
         This can allow unauthorized data modification."
            .to_string()
    }

    fn evaluate(&self, endpoint: &Arc<Endpoint>) -> Vec<Finding> {
        if !endpoint.is_write_endpoint() || !endpoint.authorization.allows_anonymous {
            return Vec::new();
        }
        vec![self.finding(
            endpoint,
            format!(
                "Write endpoint '{}' [{}] explicitly allows anonymous access",
                endpoint.full_route(),
                endpoint.display_methods()
            ),
            "Remove anonymous access from write endpoints, or add rate limiting and validation if public access is required",
        )]
    }
}
