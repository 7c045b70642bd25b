//! Route lookup.
//!
//! # Responsibilities
//! - Hold compiled rules in declaration order
//! - Look up the first matching rule for a request path
//! - Report shadowed (unreachable) rules
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan; the table holds a handful of dev routes
//! - Explicit `None` on no match rather than a silent default

use crate::config::RouteConfig;
use crate::routing::rule::{RouteRule, RuleError};

/// Ordered, immutable route rule table.
///
/// Evaluation is top-to-bottom and the first matching rule wins. If one
/// prefix contains another, the longer prefix must be declared first or
/// it will never be reached; [`RouteTable::shadowed`] surfaces such pairs.
#[derive(Debug)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// Compile config entries in declaration order.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, RuleError> {
        let rules = routes
            .iter()
            .map(RouteRule::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// First rule in declaration order whose prefix matches `path`.
    /// `None` means the request is served by the local static handler.
    pub fn matches(&self, path: &str) -> Option<&RouteRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    /// Pairs `(earlier, later)` of rule indices where the later rule can
    /// never match because an earlier prefix contains it. Reported for
    /// startup warnings; the table never reorders itself.
    pub fn shadowed(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, earlier) in self.rules.iter().enumerate() {
            for (j, later) in self.rules.iter().enumerate().skip(i + 1) {
                if later.path_prefix.starts_with(&earlier.path_prefix) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
