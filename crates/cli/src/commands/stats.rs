//! Show the current usage statistics.

use crate::{api::Api, config::Config, ui};

pub async fn run(config: &Config, json: bool) -> anyhow::Result<()> {
    let api = Api::new(config.api_url.clone());
    let stats = ui::spin("Fetching...", api.stats()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Date (UTC):        {}", ui::bold(&stats.date.to_string()));
    println!("Unique callers:    {}", ui::bold(&stats.today_unique_ips.to_string()));
    println!("Total detections:  {}", ui::bold(&stats.total_detections.to_string()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[tokio::test]
    async fn prints_stats_from_server() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "today_unique_ips": 2,
                "total_detections": 3,
                "date": Utc::now().date_naive()
            })))
            .expect(2)
            .mount(&mock_server)
            .await;

        let config = Config {
            api_url: mock_server.uri(),
        };

        run(&config, false).await.unwrap();
        run(&config, true).await.unwrap();
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "UnlockCheck Statistics API"
            })))
            .mount(&mock_server)
            .await;

        let config = Config {
            api_url: mock_server.uri(),
        };

        assert!(run(&config, false).await.is_err());
    }
}
