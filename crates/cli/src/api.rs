//! HTTP client for the checkstats API.

use anyhow::Result;
use reqwest::{Client, Response};
use shared::api::{ReportResponse, StatsResponse};

pub struct Api {
    pub http: Client,
    pub base_url: String,
}

impl Api {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Reports one detection for this machine's address.
    pub async fn report(&self) -> Result<ReportResponse> {
        let response = Self::check_response(
            self.http
                .post(format!("{}/report", self.base_url))
                .send()
                .await?,
        )
        .await?;

        Ok(response.json().await?)
    }

    /// Fetches today's distinct callers and the lifetime detection count.
    pub async fn stats(&self) -> Result<StatsResponse> {
        let response = Self::check_response(
            self.http
                .get(format!("{}/stats", self.base_url))
                .send()
                .await?,
        )
        .await?;

        Ok(response.json().await?)
    }

    async fn check_response(response: Response) -> Result<Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            // Try to extract error message from JSON response
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|json| {
                    json.get("error")
                        .or_else(|| json.get("message"))
                        .and_then(|v| v.as_str())
                        .map(|s| s.to_string())
                })
                .unwrap_or_else(|| {
                    if body.is_empty() {
                        status
                            .canonical_reason()
                            .unwrap_or("Request failed")
                            .to_string()
                    } else {
                        body
                    }
                });

            anyhow::bail!("{}", message);
        }

        Ok(response)
    }
}
