//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → rule.rs (parse prefix + upstream origin)
//!     → Freeze as immutable RouteTable
//!
//! Incoming Request (path):
//!     → table.rs (scan rules in declaration order)
//!     → Return: first matching RouteRule, or None (serve locally)
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - Plain `starts_with` prefix test, no glob or regex engine
//! - First match wins in declaration order; longest-prefix is NOT
//!   implied, so overlapping prefixes are order-sensitive
//! - Shadowed rules are reported, never silently reordered

pub mod rule;
pub mod table;

pub use rule::{RouteRule, RuleError};
pub use table::RouteTable;
