//! Development proxy server.
//!
//! A local dev server that serves the application's built assets and
//! forwards selected path prefixes to a fixed upstream origin.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────┐
//!                 │                  DEV SERVER                  │
//!                 │                                              │
//!  Request ───────┼─▶ http/server ──▶ routing (first match wins) │
//!                 │       │                  │                   │
//!                 │       │ no match         │ match             │
//!                 │       ▼          ┌───────┴────────┐          │
//!                 │  static assets   ▼                ▼          │
//!                 │  (local build)   http/forward     http/      │
//!                 │                  (plain proxy)    upgrade    │
//!                 │                       │          (tunnel)    │
//!                 │                       └───▶ upstream ◀──┘    │
//!                 └──────────────────────────────────────────────┘
//! ```
//!
//! The route table is built once at startup and never mutated. Requests
//! that match no rule fall through to the local static file service.

// Core subsystems
pub mod config;
pub mod http;
pub mod routing;

// Build-time content scanning
pub mod content;

// Cross-cutting concerns
pub mod error;
pub mod lifecycle;

pub use config::DevConfig;
pub use error::Error;
pub use http::DevServer;
pub use lifecycle::Shutdown;
