use crate::{config::Config, counters::Counters};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Detection counters over the injected store.
    pub counters: Counters,
}
