//! Route rule compilation and matching.
//!
//! # Responsibilities
//! - Parse a config entry into a validated rule
//! - Match request paths against the rule's prefix (case-sensitive)
//!
//! # Design Decisions
//! - Targets are restricted to plain HTTP origins; any path or query on
//!   the target is rejected rather than silently dropped
//! - Matching is `starts_with` only, O(prefix length)

use axum::http::uri::{Authority, Scheme, Uri};

use crate::config::RouteConfig;

/// Errors produced while compiling a [`RouteConfig`] into a [`RouteRule`].
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("path prefix {0:?} must be non-empty and start with '/'")]
    PrefixNotAbsolute(String),

    #[error("target {0:?} is not a valid URI")]
    InvalidTarget(String),

    #[error("target {0:?} must include an http or https scheme and a host")]
    MissingOrigin(String),

    #[error("target {0:?} must be a plain origin with no path or query")]
    TargetNotOrigin(String),
}

/// A compiled proxy route: static mapping from a path prefix to an
/// upstream origin.
#[derive(Debug, Clone)]
pub struct RouteRule {
    /// Prefix matched against the start of the request path.
    pub path_prefix: String,

    /// Upstream scheme (http or https).
    pub scheme: Scheme,

    /// Upstream host and port.
    pub authority: Authority,

    /// Present the target's authority as the `Host` header upstream.
    pub rewrite_origin: bool,

    /// Forward protocol-upgrade handshakes on this prefix.
    pub allow_upgrade: bool,
}

impl RouteRule {
    /// Compile a config entry, rejecting malformed prefixes and targets.
    pub fn from_config(config: &RouteConfig) -> Result<Self, RuleError> {
        check_prefix(&config.path_prefix)?;
        let (scheme, authority) = parse_target(&config.target)?;

        Ok(Self {
            path_prefix: config.path_prefix.clone(),
            scheme,
            authority,
            rewrite_origin: config.rewrite_origin,
            allow_upgrade: config.allow_upgrade,
        })
    }

    /// Simple prefix test against a request path.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.path_prefix)
    }
}

pub(crate) fn check_prefix(prefix: &str) -> Result<(), RuleError> {
    if !prefix.starts_with('/') {
        return Err(RuleError::PrefixNotAbsolute(prefix.to_string()));
    }
    Ok(())
}

pub(crate) fn parse_target(target: &str) -> Result<(Scheme, Authority), RuleError> {
    let uri: Uri = target
        .parse()
        .map_err(|_| RuleError::InvalidTarget(target.to_string()))?;

    let scheme = match uri.scheme() {
        Some(s) if s == &Scheme::HTTP || s == &Scheme::HTTPS => s.clone(),
        _ => return Err(RuleError::MissingOrigin(target.to_string())),
    };
    let authority = uri
        .authority()
        .cloned()
        .ok_or_else(|| RuleError::MissingOrigin(target.to_string()))?;

    // "http://host:port" parses with path "/"; anything beyond that means
    // the config tried to smuggle a path into the origin.
    if uri.path() != "/" && !uri.path().is_empty() {
        return Err(RuleError::TargetNotOrigin(target.to_string()));
    }
    if uri.query().is_some() {
        return Err(RuleError::TargetNotOrigin(target.to_string()));
    }

    Ok((scheme, authority))
}
