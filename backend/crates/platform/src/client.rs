//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;

/// Rate-limit key for the client.
///
/// Uses the first X-Forwarded-For hop (for reverse proxy setups), then the
/// direct connection IP. A hop that parses as an IP is written in canonical
/// form; any other non-empty hop (`1.2.3.4:5678`, an obfuscated node name)
/// is kept verbatim.
///
/// ## Returns
/// The client key, or None if not determinable
pub fn extract_client_key(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<String> {
    let first_hop = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty());

    if let Some(hop) = first_hop {
        return Some(match hop.parse::<IpAddr>() {
            Ok(ip) => ip.to_string(),
            Err(_) => hop.to_string(),
        });
    }
    direct_ip.map(|ip| ip.to_string())
}

/// Client IP as a string key, usable directly as a handler argument.
///
/// Falls back to `"unknown"` when the server was started without connect
/// info and no forwarding header is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        let ip = extract_client_key(&parts.headers, direct).unwrap_or_else(|| "unknown".to_string());

        Ok(ClientIp(ip))
    }
}
