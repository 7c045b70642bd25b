//! Protocol-upgrade tunneling.
//!
//! # Responsibilities
//! - Detect upgrade intent on an incoming request
//! - Forward the handshake to the upstream origin
//! - On `101 Switching Protocols`, splice both upgraded connections into
//!   a bidirectional byte pipe
//!
//! # Design Decisions
//! - The tunnel is protocol-agnostic: bytes are copied verbatim, frames
//!   are never parsed
//! - Pipe lifetime is the transport connection's; it ends when either
//!   side closes, with no timeout or cancellation of our own
//! - A non-101 upstream answer is relayed as a plain response

use axum::body::Body;
use axum::http::header::{self, HeaderMap};
use axum::http::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;

use crate::http::forward::{apply_host, rewrite_target, ForwardError, HttpClient};
use crate::routing::RouteRule;

/// True when the request asks to switch protocols.
pub fn wants_upgrade(headers: &HeaderMap) -> bool {
    let connection_names_upgrade = headers
        .get(header::CONNECTION)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            value
                .split(',')
                .any(|token| token.trim().eq_ignore_ascii_case("upgrade"))
        })
        .unwrap_or(false);
    connection_names_upgrade && headers.contains_key(header::UPGRADE)
}

/// Forward an upgrade handshake and, if the upstream accepts, tunnel the
/// upgraded connection.
///
/// The `101` response is returned to the caller so the server completes
/// the client-side upgrade; the byte pipe runs in a spawned task until
/// either side hangs up.
pub async fn tunnel(
    client: &HttpClient,
    rule: &RouteRule,
    mut request: Request<Body>,
) -> Result<Response<Body>, ForwardError> {
    // Take the client-side upgrade before the request is consumed.
    let client_upgrade = hyper::upgrade::on(&mut request);

    let (mut parts, _body) = request.into_parts();
    parts.uri = rewrite_target(rule, &parts.uri)?;
    apply_host(rule, &mut parts.headers);
    // Handshake headers (Connection, Upgrade, Sec-WebSocket-*) travel
    // upstream untouched; the handshake carries no body.
    let upstream_request = Request::from_parts(parts, Body::empty());

    let mut response = client.request(upstream_request).await?;

    if response.status() == StatusCode::SWITCHING_PROTOCOLS {
        let upstream_upgrade = hyper::upgrade::on(&mut response);
        tokio::spawn(async move {
            let upgraded = tokio::try_join!(client_upgrade, upstream_upgrade);
            match upgraded {
                Ok((client_io, upstream_io)) => {
                    let mut client_io = TokioIo::new(client_io);
                    let mut upstream_io = TokioIo::new(upstream_io);
                    match tokio::io::copy_bidirectional(&mut client_io, &mut upstream_io).await {
                        Ok((to_upstream, to_client)) => {
                            tracing::debug!(to_upstream, to_client, "tunnel closed");
                        }
                        Err(error) => {
                            tracing::debug!(%error, "tunnel ended with transport error");
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(%error, "upgrade handshake failed after 101");
                }
            }
        });
    } else {
        tracing::debug!(
            status = %response.status(),
            "upstream declined protocol upgrade"
        );
    }

    Ok(response.map(Body::new))
}
