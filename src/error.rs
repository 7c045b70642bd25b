//! Top-level error type for the dev server.

use crate::config::loader::ConfigError;
use crate::routing::RuleError;

/// Errors surfaced during startup.
///
/// Request-time failures never reach this type: a dead upstream is answered
/// with `502 Bad Gateway` on the wire and logged, nothing more.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid route rule: {0}")]
    Rule(#[from] RuleError),

    #[error("invalid content scan pattern: {0}")]
    Scan(#[from] globset::Error),

    /// The process-wide server slot is already taken. There is no
    /// reinitialization path; mounting twice is a caller bug.
    #[error("dev server is already mounted in this process")]
    AlreadyMounted,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
