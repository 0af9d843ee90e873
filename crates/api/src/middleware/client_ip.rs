//! Caller identity extraction.
//!
//! Usage: add `ClientIdentity` as an extractor parameter. It never rejects;
//! when no origin can be determined the identity is the literal `unknown`.
//!
//! Resolution order:
//! 1. The configured proxy header (default `CF-Connecting-IP`)
//! 2. The first `X-Forwarded-For` entry, if `trust_forwarded_for` is set
//! 3. The peer socket address
//! 4. `unknown`

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};

use crate::{identity::UNKNOWN_IDENTITY, state::AppState};

/// Raw identity of the caller. Only ever passed to the hasher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity(pub String);

impl FromRequestParts<AppState> for ClientIdentity {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let config = &state.config;

        let identity = header_value(&parts.headers, &config.client_ip_header)
            .or_else(|| {
                config
                    .trust_forwarded_for
                    .then(|| forwarded_for(&parts.headers))
                    .flatten()
            })
            .or_else(|| {
                parts
                    .extensions
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip().to_string())
            })
            .unwrap_or_else(|| UNKNOWN_IDENTITY.to_string());

        Ok(ClientIdentity(identity))
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    header_value(headers, "x-forwarded-for")?
        .split(',')
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}
