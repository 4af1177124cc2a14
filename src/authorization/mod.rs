//! Middleware labelling and per-endpoint authorization records.
//!
//! Middleware identities come from route discovery as plain names plus any
//! string-literal arguments the call exposed. Labelling is a pure function of
//! those names and an injectable [`AuthKeywords`] dictionary.

mod extractor;
mod keywords;

pub use extractor::AuthorizationExtractor;
pub use keywords::{AuthKeywords, RequirementKind, DEFAULT_ANONYMOUS_PATTERNS, DEFAULT_AUTH_PATTERNS};

/// A middleware reference attached to a group or route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Middleware {
    /// Identity rendered like a handler name (`AuthMiddleware`, `middleware.JWT`).
    pub name: String,
    /// String-literal arguments when the middleware is a call, e.g. the
    /// `"admin"` in `RequireRole("admin")`.
    pub literal_args: Vec<String>,
}

impl Middleware {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            literal_args: Vec::new(),
        }
    }

    pub fn with_literals<I, S>(name: impl Into<String>, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            literal_args: literals.into_iter().map(Into::into).collect(),
        }
    }
}
