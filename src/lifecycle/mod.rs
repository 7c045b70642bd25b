//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → mount() exactly once → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → serve loop drains and exits
//!
//! Signals (signals.rs):
//!     SIGTERM / Ctrl+C → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Mounting is a one-shot, process-wide operation with no
//!   reinitialization path; a second mount fails fast
//! - Shutdown is a broadcast channel any long-running task can subscribe
//!   to

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::mount;
