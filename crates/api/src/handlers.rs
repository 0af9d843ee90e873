//! HTTP surface.
//!
//! Every request goes through a single fallback handler that classifies it
//! into an [`Endpoint`] and dispatches to that endpoint's handler.
//!
//! ## Endpoints
//!
//! - OPTIONS * - CORS preflight, empty 200
//! - POST /report - Record a detection for the calling address
//! - GET /stats - Today's distinct callers and lifetime detections
//! - anything else - Service description
//!
//! Every response, errors included, carries permissive CORS headers so the
//! reporting script can call the API from any origin.

mod index;
mod report;
mod stats;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Method, Request, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::{error::AppError, middleware::client_ip::ClientIdentity, state::AppState};

/// Route a request resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Report,
    Stats,
    Options,
    Unknown,
}

impl Endpoint {
    pub fn resolve(method: &Method, path: &str) -> Self {
        match (method, path) {
            (&Method::OPTIONS, _) => Endpoint::Options,
            (&Method::POST, "/report") => Endpoint::Report,
            (&Method::GET, "/stats") => Endpoint::Stats,
            _ => Endpoint::Unknown,
        }
    }
}

/// Application router with request tracing and CORS headers.
///
/// The CORS layers are outermost so every response, including ones produced
/// by inner layers, carries them. Request bodies are never read, so no body
/// limit is applied.
pub fn router(state: AppState) -> Router {
    let x_request_id = HeaderName::from_static("x-request-id");

    Router::new()
        .fallback(dispatch)
        .with_state(state)
        // Request ID: generate UUID, include in logs, return in response
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}

async fn dispatch(
    State(state): State<AppState>,
    identity: ClientIdentity,
    method: Method,
    uri: Uri,
) -> Result<Response, AppError> {
    let response = match Endpoint::resolve(&method, uri.path()) {
        Endpoint::Options => StatusCode::OK.into_response(),
        Endpoint::Report => report::report(State(state), identity).await?.into_response(),
        Endpoint::Stats => stats::stats(State(state)).await?.into_response(),
        Endpoint::Unknown => index::index(State(state)).await.into_response(),
    };

    Ok(response)
}
