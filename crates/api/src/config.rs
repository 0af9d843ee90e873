use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Redis,
    /// Process-local, lost on restart. For development only.
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub store: StoreBackend,
    /// Required when `store` is `redis`.
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Set to "production" for JSON logging, anything else for human-readable.
    #[serde(default)]
    pub env: String,
    /// Sentry DSN for error tracking
    #[serde(default)]
    pub sentry_dsn: Option<String>,
    /// Header set by the edge proxy carrying the caller's address.
    #[serde(default = "default_client_ip_header")]
    pub client_ip_header: String,
    /// Fall back to the first `X-Forwarded-For` entry when the header above is missing.
    #[serde(default)]
    pub trust_forwarded_for: bool,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_repository_url")]
    pub repository_url: String,
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.env == "production"
    }
}

fn default_client_ip_header() -> String {
    "cf-connecting-ip".into()
}

fn default_service_name() -> String {
    "UnlockCheck Statistics API".into()
}

fn default_repository_url() -> String {
    "https://github.com/uniquMonte/unlockcheck".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_for_optional_fields() {
        let config: Config = envy::from_iter(vars(&[("HOST", "0.0.0.0"), ("PORT", "8787")])).unwrap();

        assert_eq!(config.store, StoreBackend::Redis);
        assert_eq!(config.redis_url, None);
        assert_eq!(config.client_ip_header, "cf-connecting-ip");
        assert!(!config.trust_forwarded_for);
        assert!(!config.is_production());
    }

    #[test]
    fn memory_backend_parses_lowercase() {
        let config: Config = envy::from_iter(vars(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("STORE", "memory"),
            ("ENV", "production"),
        ]))
        .unwrap();

        assert_eq!(config.store, StoreBackend::Memory);
        assert!(config.is_production());
    }

    #[test]
    fn missing_port_is_an_error() {
        let result = envy::from_iter::<_, Config>(vars(&[("HOST", "127.0.0.1")]));
        assert!(result.is_err());
    }
}
