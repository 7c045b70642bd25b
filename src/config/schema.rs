//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dev
//! server. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the dev server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DevConfig {
    /// Local listener configuration (bind address, port, asset root).
    pub server: ServerConfig,

    /// Ordered proxy route rules. Evaluation is top-to-bottom and the
    /// first matching rule wins; declare more specific prefixes first.
    pub routes: Vec<RouteConfig>,

    /// Content scan settings for the utility-class generator. Build-time
    /// only; has no influence on routing.
    pub content: ContentConfig,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            routes: default_routes(),
            content: ContentConfig::default(),
        }
    }
}

/// Local dev server listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the local listener.
    pub bind: String,

    /// Listen port.
    pub port: u16,

    /// Directory the built assets are served from when no route matches.
    pub static_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            static_root: PathBuf::from("dist"),
        }
    }
}

/// A single proxy route entry.
///
/// Matching is a plain prefix test against the request path, not a glob
/// or regex. Overlapping prefixes are legal but order-sensitive: a broad
/// prefix declared before a more specific one makes the latter
/// unreachable. Startup logs a warning for such pairs, it does not
/// reorder them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path prefix to match, e.g. `/remote`. Must start with `/`.
    pub path_prefix: String,

    /// Upstream origin to forward to: scheme + host + port, no path.
    pub target: String,

    /// Replace the `Host` header presented upstream with the target's
    /// authority.
    #[serde(default)]
    pub rewrite_origin: bool,

    /// Also forward protocol-upgrade handshakes (WebSocket) on this
    /// prefix, keeping the upgraded connection open as a byte tunnel.
    #[serde(default)]
    pub allow_upgrade: bool,
}

/// Content scan configuration for the utility-class generator.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Root the scan globs are resolved against.
    pub root: PathBuf,

    /// Glob patterns naming the source files scanned for utility-class
    /// usage.
    pub scan: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            scan: vec![
                "index.html".to_string(),
                "src/**/*.{vue,js,ts,jsx,tsx}".to_string(),
                "pages/**/*.{html,js}".to_string(),
                "components/**/*.{html,js}".to_string(),
            ],
        }
    }
}

/// Default route table: the upgrade-capable `/remote/connect` rule must
/// come before the broader `/remote` rule or it is never reached.
fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig {
            path_prefix: "/remote/connect".to_string(),
            target: "http://127.0.0.1:9000".to_string(),
            rewrite_origin: true,
            allow_upgrade: true,
        },
        RouteConfig {
            path_prefix: "/remote".to_string(),
            target: "http://127.0.0.1:9000".to_string(),
            rewrite_origin: true,
            allow_upgrade: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_declares_specific_route_first() {
        let config = DevConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].path_prefix, "/remote/connect");
        assert!(config.routes[0].allow_upgrade);
        assert_eq!(config.routes[1].path_prefix, "/remote");
        assert!(!config.routes[1].allow_upgrade);
    }

    #[test]
    fn minimal_toml_falls_back_to_defaults() {
        let config: DevConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.routes.len(), 2);
        assert!(!config.content.scan.is_empty());
    }

    #[test]
    fn routes_section_overrides_defaults() {
        let config: DevConfig = toml::from_str(
            r#"
            [server]
            port = 4000

            [[routes]]
            path_prefix = "/api"
            target = "http://127.0.0.1:8080"
            rewrite_origin = true
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].path_prefix, "/api");
        assert!(config.routes[0].rewrite_origin);
        assert!(!config.routes[0].allow_upgrade);
    }
}
