//! Detection reporting endpoint.
//!
//! The request body is ignored. The caller is identified by its network
//! origin, which is hashed before it reaches the store.

use axum::{Json, extract::State};
use chrono::Utc;
use shared::api::ReportResponse;

use crate::{error::AppError, middleware::client_ip::ClientIdentity, state::AppState};

pub async fn report(
    State(state): State<AppState>,
    ClientIdentity(identity): ClientIdentity,
) -> Result<Json<ReportResponse>, AppError> {
    state.counters.record_detection(&identity, Utc::now()).await?;

    Ok(Json(ReportResponse::reported()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::TOTAL_KEY;
    use crate::stores::{CounterStore, MemoryCounterStore};
    use crate::test_utils::TestStateBuilder;
    use std::sync::Arc;

    #[tokio::test]
    async fn report_increments_total() {
        let store = Arc::new(MemoryCounterStore::new());
        store.put(TOTAL_KEY, "41", None).await.unwrap();
        let state = TestStateBuilder::new().with_store(store.clone()).build();

        let Json(response) = report(State(state), ClientIdentity("1.2.3.4".into()))
            .await
            .unwrap();

        assert_eq!(response, ReportResponse::reported());
        assert_eq!(store.get(TOTAL_KEY).await.unwrap().as_deref(), Some("42"));
    }
}
