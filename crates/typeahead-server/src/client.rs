//! Caller identity for rate limiting.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::convert::Infallible;
use std::net::SocketAddr;

/// Key used when no header or peer address identifies the caller.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// The rate-limit key of the caller.
///
/// Resolved from `X-Real-IP`, then the first hop of `X-Forwarded-For`, then
/// the peer socket address. Never rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientKey(pub String);

impl ClientKey {
    pub fn resolve(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let from_header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let key = from_header("x-real-ip")
            .or_else(|| from_header("x-forwarded-for"))
            .or_else(|| peer.map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());
        ClientKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for ClientKey
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(ClientKey::resolve(&parts.headers, peer))
    }
}
