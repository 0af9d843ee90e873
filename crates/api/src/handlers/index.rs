//! Usage description, served for any route that is not an endpoint.

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use shared::api::ServiceInfo;

use crate::state::AppState;

pub async fn index(State(state): State<AppState>) -> Json<ServiceInfo> {
    let endpoints = BTreeMap::from([
        (
            "POST /report".to_string(),
            "Report a detection (increments counters)".to_string(),
        ),
        (
            "GET /stats".to_string(),
            "Get current statistics".to_string(),
        ),
    ]);

    Json(ServiceInfo {
        name: state.config.service_name.clone(),
        endpoints,
        github: state.config.repository_url.clone(),
    })
}
