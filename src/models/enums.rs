//! Small closed vocabularies used across the scanner.

use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// HTTP methods recognised by route discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

/// Canonical upper-case method names.
static METHOD_NAMES: phf::Map<&'static str, HttpMethod> = phf_map! {
    "GET" => HttpMethod::Get,
    "POST" => HttpMethod::Post,
    "PUT" => HttpMethod::Put,
    "DELETE" => HttpMethod::Delete,
    "PATCH" => HttpMethod::Patch,
    "HEAD" => HttpMethod::Head,
    "OPTIONS" => HttpMethod::Options,
};

impl HttpMethod {
    /// Every method, in canonical order. Used for "any verb" registrations.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Case-insensitive lookup, normalised to the canonical method.
    pub fn parse(name: &str) -> Option<Self> {
        METHOD_NAMES.get(name.trim().to_ascii_uppercase().as_str()).copied()
    }

    /// Whether the method modifies server state.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete | HttpMethod::Patch
        )
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::parse(s).ok_or_else(|| format!("unknown HTTP method: {}", s))
    }
}

/// Supported Go routing frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Framework {
    #[serde(rename = "gin")]
    Gin,
    #[serde(rename = "echo")]
    Echo,
    #[serde(rename = "chi")]
    Chi,
    #[serde(rename = "fiber")]
    Fiber,
    #[serde(rename = "net/http")]
    NetHttp,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Gin => "gin",
            Framework::Echo => "echo",
            Framework::Chi => "chi",
            Framework::Fiber => "fiber",
            Framework::NetHttp => "net/http",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gin" => Ok(Framework::Gin),
            "echo" => Ok(Framework::Echo),
            "chi" => Ok(Framework::Chi),
            "fiber" => Ok(Framework::Fiber),
            "net/http" | "nethttp" | "http" => Ok(Framework::NetHttp),
            _ => Err(format!("unknown framework: {}", s)),
        }
    }
}

/// Exposure tier of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityClassification {
    #[default]
    Public,
    Authenticated,
    RoleRestricted,
    PolicyRestricted,
}

impl SecurityClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityClassification::Public => "public",
            SecurityClassification::Authenticated => "authenticated",
            SecurityClassification::RoleRestricted => "role_restricted",
            SecurityClassification::PolicyRestricted => "policy_restricted",
        }
    }
}

impl fmt::Display for SecurityClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityClassification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(SecurityClassification::Public),
            "authenticated" => Ok(SecurityClassification::Authenticated),
            "role_restricted" => Ok(SecurityClassification::RoleRestricted),
            "policy_restricted" => Ok(SecurityClassification::PolicyRestricted),
            _ => Err(format!("unknown classification: {}", s)),
        }
    }
}

/// Severity of a finding, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All severities from most to least severe.
    pub const DESCENDING: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    /// Numeric rank, higher is more severe.
    pub fn order(&self) -> u8 {
        match self {
            Severity::Info => 0,
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    pub fn greater_or_equal(&self, other: Severity) -> bool {
        self.order() >= other.order()
    }

    /// Lenient parse used for configuration values: unknown names map to
    /// `Info` so a typo never hides findings.
    pub fn parse(s: &str) -> Self {
        s.parse().unwrap_or(Severity::Info)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("unknown severity: {}", s)),
        }
    }
}

/// Where an endpoint's authorization signals came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthSource {
    #[default]
    None,
    /// Middleware attached directly to the route registration.
    Middleware,
    /// Middleware attached to the enclosing group or router.
    Router,
}

impl AuthSource {
    pub fn is_none(&self) -> bool {
        matches!(self, AuthSource::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthSource::None => "none",
            AuthSource::Middleware => "middleware",
            AuthSource::Router => "router",
        }
    }
}

impl fmt::Display for AuthSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_is_case_insensitive() {
        assert_eq!(HttpMethod::parse("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::parse("Post"), Some(HttpMethod::Post));
        assert_eq!(HttpMethod::parse("OPTIONS"), Some(HttpMethod::Options));
        assert_eq!(HttpMethod::parse("TRACE"), None);
    }

    #[test]
    fn test_write_methods() {
        let writes: Vec<_> = HttpMethod::ALL.iter().filter(|m| m.is_write()).collect();
        assert_eq!(
            writes,
            vec![&HttpMethod::Post, &HttpMethod::Put, &HttpMethod::Delete, &HttpMethod::Patch]
        );
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::Medium.greater_or_equal(Severity::Medium));
        assert!(!Severity::Low.greater_or_equal(Severity::Medium));
        assert_eq!(Severity::parse("HIGH"), Severity::High);
        assert_eq!(Severity::parse("bogus"), Severity::Info);
        assert!("bogus".parse::<Severity>().is_err());
    }

    #[test]
    fn test_framework_names() {
        assert_eq!(Framework::NetHttp.to_string(), "net/http");
        assert_eq!("Gin".parse::<Framework>(), Ok(Framework::Gin));
        assert_eq!(
            serde_json::to_string(&Framework::NetHttp).unwrap(),
            "\"net/http\""
        );
    }

    #[test]
    fn test_classification_serde() {
        assert_eq!(
            serde_json::to_string(&SecurityClassification::RoleRestricted).unwrap(),
            "\"role_restricted\""
        );
        assert_eq!(
            "policy_restricted".parse::<SecurityClassification>(),
            Ok(SecurityClassification::PolicyRestricted)
        );
    }
}
