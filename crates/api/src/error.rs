use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::api::ErrorResponse;

/// Any failure while handling a request.
///
/// There is a single category: the store failed or something unexpected
/// happened. The caller gets a 500 carrying the error message and is expected
/// to treat reporting as best-effort.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError(err) = self;
        tracing::error!("internal error: {:?}", err);
        sentry::capture_error(err.as_ref() as &(dyn std::error::Error + Send + Sync + 'static));

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(err.to_string())),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn response_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn returns_500_with_error_message() {
        let err = AppError(anyhow::anyhow!("redis connection refused"));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response_json(response).await,
            serde_json::json!({ "success": false, "error": "redis connection refused" })
        );
    }

    #[tokio::test]
    async fn io_error_converts_to_internal() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "store down");
        let err: AppError = io_err.into();

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response_json(response).await["error"], "store down");
    }

    #[tokio::test]
    async fn response_is_json() {
        let response = AppError(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.headers()["content-type"], "application/json");
    }
}
