//! Report one detection to the stats API.
//!
//! Meant to be called from the detection script once per run. With
//! `--best-effort`, a failure is printed but the command still succeeds so
//! the calling script never stops because statistics are unavailable.

use crate::{api::Api, config::Config, ui};

pub async fn run(config: &Config, best_effort: bool) -> anyhow::Result<()> {
    let api = Api::new(config.api_url.clone());

    match ui::spin("Reporting...", api.report()).await {
        Ok(response) => {
            ui::success(&response.message);
            Ok(())
        }
        Err(err) if best_effort => {
            ui::info(&format!("Detection not reported: {err}"));
            Ok(())
        }
        Err(err) => Err(err),
    }
}
