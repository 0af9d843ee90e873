//! Shared test utilities for API handler tests.
//!
//! `TestStateBuilder` constructs an `AppState` backed by a fresh
//! `MemoryCounterStore` unless a store is supplied.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::test_utils::TestStateBuilder;
//!
//! let mut store = MockCounterStore::new();
//! store.expect_get().returning(|_| Ok(None));
//!
//! let state = TestStateBuilder::new()
//!     .with_store(Arc::new(store))
//!     .build();
//! ```

use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use crate::counters::Counters;
use crate::state::AppState;
use crate::stores::{CounterStore, MemoryCounterStore};

/// Creates a test configuration with dummy values.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 3000,
        store: StoreBackend::Memory,
        redis_url: None,
        env: "test".to_string(),
        sentry_dsn: None,
        client_ip_header: "cf-connecting-ip".to_string(),
        trust_forwarded_for: false,
        service_name: "UnlockCheck Statistics API".to_string(),
        repository_url: "https://github.com/uniquMonte/unlockcheck".to_string(),
    }
}

/// Builder for constructing test `AppState`.
pub struct TestStateBuilder {
    config: Option<Config>,
    store: Option<Arc<dyn CounterStore>>,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            store: None,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn CounterStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the `AppState` using the configured store or an empty in-memory one.
    pub fn build(self) -> AppState {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryCounterStore::new()));

        AppState {
            config: self.config.unwrap_or_else(test_config),
            counters: Counters::new(store),
        }
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
