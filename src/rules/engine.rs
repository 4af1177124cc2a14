use std::collections::HashSet;
use std::sync::Arc;

use super::{
    AnonymousOnWrite, AuthConflict, EndpointWithoutAuth, ExcessiveRoles, MissingAuthOnWrite,
    PublicWithoutIntent, Rule, RuleVocabulary, SensitiveKeywords, WeakRoleNaming,
};
use crate::models::{Endpoint, Finding};

/// Runs the rule set over endpoints.
///
/// Findings come out in endpoint order, then rule registration order. Every
/// enabled rule runs against every endpoint.
pub struct Engine {
    rules: Vec<Box<dyn Rule>>,
    /// `None` enables every rule.
    enabled: Option<HashSet<String>>,
}

impl Engine {
    pub fn new(enabled: Option<Vec<String>>) -> Self {
        Self::with_vocabulary(enabled, RuleVocabulary::default())
    }

    pub fn with_vocabulary(enabled: Option<Vec<String>>, vocabulary: RuleVocabulary) -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(PublicWithoutIntent),
            Box::new(AnonymousOnWrite),
            Box::new(AuthConflict),
            Box::new(MissingAuthOnWrite),
            Box::new(ExcessiveRoles::new(vocabulary.max_roles)),
            Box::new(WeakRoleNaming::new(vocabulary.weak_roles)),
            Box::new(SensitiveKeywords::new(vocabulary.sensitive_keywords)),
            Box::new(EndpointWithoutAuth),
        ];
        Self {
            rules,
            enabled: enabled.map(|ids| ids.into_iter().collect()),
        }
    }

    /// Every registered rule, enabled or not.
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn rule(&self, id: &str) -> Option<&dyn Rule> {
        self.rules.iter().find(|r| r.id() == id).map(|r| r.as_ref())
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled.as_ref().map_or(true, |ids| ids.contains(id))
    }

    pub fn evaluate(&self, endpoint: &Arc<Endpoint>) -> Vec<Finding> {
        self.rules
            .iter()
            .filter(|rule| self.is_enabled(rule.id()))
            .flat_map(|rule| rule.evaluate(endpoint))
            .collect()
    }

    pub fn evaluate_all(&self, endpoints: &[Arc<Endpoint>]) -> Vec<Finding> {
        endpoints.iter().flat_map(|ep| self.evaluate(ep)).collect()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(None)
    }
}
