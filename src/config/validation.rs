//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route prefixes and upstream origins
//! - Check bind address and content scan patterns
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: DevConfig → Result<(), Vec<ValidationError>>
//! - Shadowed routes are NOT an error here; they are legal, order-sensitive
//!   config and are surfaced as startup warnings instead

use std::net::IpAddr;

use crate::config::schema::DevConfig;
use crate::routing::rule::{check_prefix, parse_target};
use crate::routing::RuleError;

/// A single semantic problem found in the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("route {index}: {source}")]
    Route { index: usize, source: RuleError },

    #[error("server.bind {bind:?} is not an IP address")]
    Bind { bind: String },

    #[error("content.scan pattern {pattern:?}: {source}")]
    ScanPattern {
        pattern: String,
        source: globset::Error,
    },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &DevConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind.parse::<IpAddr>().is_err() {
        errors.push(ValidationError::Bind {
            bind: config.server.bind.clone(),
        });
    }

    for (index, route) in config.routes.iter().enumerate() {
        if let Err(source) = check_prefix(&route.path_prefix) {
            errors.push(ValidationError::Route { index, source });
        }
        if let Err(source) = parse_target(&route.target) {
            errors.push(ValidationError::Route { index, source });
        }
    }

    for pattern in &config.content.scan {
        if let Err(source) = globset::Glob::new(pattern.trim_start_matches("./")) {
            errors.push(ValidationError::ScanPattern {
                pattern: pattern.clone(),
                source,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
