use std::sync::Arc;

use super::{is_unprotected_public, Rule};
use crate::models::{Endpoint, Finding, Severity};

/// AP001: public endpoint that never declared its authorization intent.
pub struct PublicWithoutIntent;

impl Rule for PublicWithoutIntent {
    fn id(&self) -> &'static str {
        "AP001"
    }

    fn name(&self) -> &'static str {
        "Public without explicit intent"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn description(&self) -> String {
        "Public endpoint without explicit authorization intent. \
         Endpoints should explicitly declare their authorization requirements."
            .to_string()
    }

    fn evaluate(&self, endpoint: &Arc<Endpoint>) -> Vec<Finding> {
        if !is_unprotected_public(endpoint) {
            return Vec::new();
        }
        vec![self.finding(
            endpoint,
            format!(
                "Endpoint '{}' is public without explicit authorization intent",
                endpoint.full_route()
            ),
            "Add explicit authorization middleware or mark as intentionally public",
        )]
    }
}
