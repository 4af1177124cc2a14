use std::sync::Arc;

use super::{is_unprotected_public, Rule};
use crate::models::{Endpoint, Finding, Framework, Severity};

/// AP008: endpoint with no authentication configuration, with a remedy
/// tailored to its framework.
pub struct EndpointWithoutAuth;

fn recommendation(framework: Framework) -> &'static str {
    match framework {
        Framework::Gin => {
            "Add authentication middleware: use gin-jwt, gin-session, or custom auth middleware"
        }
        Framework::Echo => {
            "Add authentication middleware: use echo-jwt, echo middleware, or custom auth handler"
        }
        Framework::Chi => {
            "Add authentication middleware: use chi middleware with jwtauth or custom auth handler"
        }
        Framework::Fiber => {
            "Add authentication middleware: use fiber-jwt, fiber-session, or custom auth middleware"
        }
        Framework::NetHttp => {
            "Add authentication: wrap handler with auth middleware or check auth in handler"
        }
    }
}

impl Rule for EndpointWithoutAuth {
    fn id(&self) -> &'static str {
        "AP008"
    }

    fn name(&self) -> &'static str {
        "Endpoint without authentication"
    }

    fn severity(&self) -> Severity {
        Severity::High
    }

    fn description(&self) -> String {
        "Endpoint has no authentication configuration. \
         Consider adding authentication middleware."
            .to_string()
    }

    fn evaluate(&self, endpoint: &Arc<Endpoint>) -> Vec<Finding> {
        if !is_unprotected_public(endpoint) {
            return Vec::new();
        }
        vec![self.finding(
            endpoint,
            format!(
                "Endpoint '{}' has no authentication configuration",
                endpoint.full_route()
            ),
            recommendation(endpoint.framework),
        )]
    }
}
