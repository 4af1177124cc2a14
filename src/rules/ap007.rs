use std::sync::Arc;

use super::Rule;
use crate::models::{Endpoint, Finding, SecurityClassification, Severity};

/// AP007: public route whose path hints at something sensitive.
pub struct SensitiveKeywords {
    keywords: Vec<String>,
}

impl SensitiveKeywords {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }
}

impl Rule for SensitiveKeywords {
    fn id(&self) -> &'static str {
        "AP007"
    }

    fn name(&self) -> &'static str {
        "Sensitive keyword in public route"
    }

    fn severity(&self) -> Severity {
        Severity::Medium
    }

    fn description(&self) -> String {
        "Public route contains sensitive keywords suggesting it should be protected. \
         Routes with admin, debug, export, or internal keywords often require authentication."
            .to_string()
    }

    fn evaluate(&self, endpoint: &Arc<Endpoint>) -> Vec<Finding> {
        if endpoint.classification != SecurityClassification::Public
            || endpoint.authorization.allows_anonymous
        {
            return Vec::new();
        }

        let route = endpoint.full_route();
        let lower = route.to_lowercase();
        let found: Vec<&str> = self
            .keywords
            .iter()
            .filter(|k| lower.contains(k.as_str()))
            .map(String::as_str)
            .collect();
        if found.is_empty() {
            return Vec::new();
        }

        vec![self.finding(
            endpoint,
            format!(
                "Public route '{}' contains sensitive keywords: {}",
                route,
                found.join(", ")
            ),
            "Consider adding authentication to this endpoint or marking it as intentionally public",
        )]
    }
}
