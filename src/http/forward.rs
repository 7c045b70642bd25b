//! Plain request forwarding.
//!
//! # Responsibilities
//! - Rewrite the request URI to point at the matched rule's origin
//! - Rewrite the `Host` header when the rule asks for it
//! - Strip connection-level headers that only describe the client hop
//!
//! # Design Decisions
//! - The request is otherwise forwarded verbatim: method, path, query,
//!   remaining headers and body all pass through untouched
//! - No retry, timeout, or fallback of our own; an upstream transport
//!   failure is answered with 502 by the caller

use axum::body::Body;
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::uri::InvalidUriParts;
use axum::http::{Request, Response, Uri};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;

use crate::routing::RouteRule;

/// Shared upstream client. Connection pooling is hyper-util's concern.
pub type HttpClient = Client<HttpConnector, Body>;

/// Errors while forwarding a matched request upstream.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("rewritten URI is invalid: {0}")]
    Uri(#[from] InvalidUriParts),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

/// Headers that describe the client-to-proxy hop and must not travel
/// upstream on a plain forward.
const HOP_HEADERS: [HeaderName; 5] = [
    header::CONNECTION,
    header::UPGRADE,
    header::TE,
    header::TRAILER,
    header::PROXY_AUTHORIZATION,
];

/// Forward `request` to the rule's origin and hand back the upstream
/// response. Upgrade intent, if any, has already been stripped or taken
/// by the upgrade path.
pub async fn forward(
    client: &HttpClient,
    rule: &RouteRule,
    mut request: Request<Body>,
) -> Result<Response<Body>, ForwardError> {
    *request.uri_mut() = rewrite_target(rule, request.uri())?;
    strip_hop_headers(request.headers_mut());
    apply_host(rule, request.headers_mut());

    let response = client.request(request).await?;
    Ok(response.map(Body::new))
}

/// Same origin rewrite used by the upgrade tunnel, which keeps the
/// handshake headers instead of stripping them.
pub(crate) fn rewrite_target(rule: &RouteRule, original: &Uri) -> Result<Uri, InvalidUriParts> {
    let mut parts = original.clone().into_parts();
    parts.scheme = Some(rule.scheme.clone());
    parts.authority = Some(rule.authority.clone());
    Uri::from_parts(parts)
}

pub(crate) fn apply_host(rule: &RouteRule, headers: &mut HeaderMap) {
    if !rule.rewrite_origin {
        return;
    }
    // Authority is always valid header material.
    if let Ok(host) = HeaderValue::from_str(rule.authority.as_str()) {
        headers.insert(header::HOST, host);
    }
}

pub(crate) fn strip_hop_headers(headers: &mut HeaderMap) {
    for name in HOP_HEADERS {
        headers.remove(name);
    }
    headers.remove("keep-alive");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteConfig;

    fn rule(rewrite_origin: bool) -> RouteRule {
        RouteRule::from_config(&RouteConfig {
            path_prefix: "/remote".to_string(),
            target: "http://127.0.0.1:9000".to_string(),
            rewrite_origin,
            allow_upgrade: false,
        })
        .unwrap()
    }

    #[test]
    fn rewrites_origin_but_keeps_path_and_query() {
        let original: Uri = "/remote/list?limit=5".parse().unwrap();
        let rewritten = rewrite_target(&rule(true), &original).unwrap();
        assert_eq!(
            rewritten.to_string(),
            "http://127.0.0.1:9000/remote/list?limit=5"
        );
    }

    #[test]
    fn host_is_rewritten_only_when_asked() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));

        apply_host(&rule(false), &mut headers);
        assert_eq!(headers[header::HOST], "localhost:3000");

        apply_host(&rule(true), &mut headers);
        assert_eq!(headers[header::HOST], "127.0.0.1:9000");
    }

    #[test]
    fn hop_headers_are_dropped() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, HeaderValue::from_static("upgrade"));
        headers.insert(header::UPGRADE, HeaderValue::from_static("websocket"));
        headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));

        strip_hop_headers(&mut headers);
        assert_eq!(headers.len(), 1);
        assert!(headers.contains_key(header::ACCEPT));
    }
}
