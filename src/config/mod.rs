//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, all errors reported)
//!     → DevConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at startup and immutable for the process
//!   lifetime; there is no reload or dynamic registration.
//! - All fields have defaults so a missing or minimal config file yields
//!   a working dev setup (port 3000, the two `/remote` routes).
//! - Validation separates syntactic (serde) from semantic checks.

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ContentConfig;
pub use schema::DevConfig;
pub use schema::RouteConfig;
pub use schema::ServerConfig;
