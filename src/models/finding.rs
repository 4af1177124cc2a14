use std::sync::Arc;

use super::endpoint::Endpoint;
use super::enums::Severity;

/// One rule violation tied to one endpoint.
///
/// Everything except the suppression fields is fixed at creation.
#[derive(Debug, Clone)]
pub struct Finding {
    pub rule_id: &'static str,
    pub rule_name: &'static str,
    pub severity: Severity,
    pub message: String,
    pub recommendation: String,
    pub endpoint: Arc<Endpoint>,
    pub suppressed: bool,
    pub suppression_reason: Option<String>,
}

impl Finding {
    pub fn new(
        rule_id: &'static str,
        rule_name: &'static str,
        severity: Severity,
        endpoint: Arc<Endpoint>,
        message: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            rule_id,
            rule_name,
            severity,
            message: message.into(),
            recommendation: recommendation.into(),
            endpoint,
            suppressed: false,
            suppression_reason: None,
        }
    }

    pub fn suppress(&mut self, reason: impl Into<String>) {
        self.suppressed = true;
        self.suppression_reason = Some(reason.into());
    }

    pub fn route(&self) -> String {
        self.endpoint.full_route()
    }

    pub fn location(&self) -> String {
        self.endpoint.location()
    }
}
