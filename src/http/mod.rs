//! HTTP handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, catch-all handler)
//!     → route table lookup
//!     → forward.rs (plain request/response proxying)
//!       or upgrade.rs (protocol-upgrade tunnel)
//!       or static assets (no route matched)
//! ```

pub mod forward;
pub mod server;
pub mod upgrade;

pub use forward::HttpClient;
pub use server::DevServer;
