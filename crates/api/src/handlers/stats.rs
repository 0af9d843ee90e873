//! Aggregate statistics endpoint.

use axum::{Json, extract::State};
use chrono::Utc;
use shared::api::StatsResponse;

use crate::{error::AppError, state::AppState};

pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.counters.get_stats(Utc::now()).await?;

    Ok(Json(StatsResponse {
        today_unique_ips: stats.today_unique,
        total_detections: stats.lifetime_total,
        date: stats.day,
    }))
}
