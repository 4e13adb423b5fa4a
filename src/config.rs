use crate::adapters::outbound::DEFAULT_BASE_URL;
use crate::application::ResolverConfig;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    // Provider settings
    pub provider_url: String,
    pub lookup_timeout_ms: u64,
    pub batch_timeout_ms: u64,

    // Batching settings
    pub batch_size: usize,
    pub max_in_flight_chunks: usize,

    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider_url: DEFAULT_BASE_URL.to_string(),
            lookup_timeout_ms: 3000,
            batch_timeout_ms: 10_000,
            batch_size: 100,
            max_in_flight_chunks: 1,
            debug: false,
        }
    }
}

impl Config {
    /// Resolver settings derived from this configuration.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::new()
            .lookup_timeout(Duration::from_millis(self.lookup_timeout_ms))
            .batch_timeout(Duration::from_millis(self.batch_timeout_ms))
            .batch_size(self.batch_size)
            .max_in_flight_chunks(self.max_in_flight_chunks)
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Build the configuration from an arbitrary variable source.
pub fn load_config_from<F>(lookup: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();

    let provider_url = lookup("NODEGEO_PROVIDER_URL")
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(defaults.provider_url);

    let lookup_timeout_ms = lookup("NODEGEO_LOOKUP_TIMEOUT_MS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.lookup_timeout_ms);

    let batch_timeout_ms = lookup("NODEGEO_BATCH_TIMEOUT_MS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.batch_timeout_ms);

    let batch_size = lookup("NODEGEO_BATCH_SIZE")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.batch_size);

    let max_in_flight_chunks = lookup("NODEGEO_MAX_IN_FLIGHT_CHUNKS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.max_in_flight_chunks);

    let debug = lookup("DEBUG").is_some();

    Ok(Config {
        provider_url,
        lookup_timeout_ms,
        batch_timeout_ms,
        batch_size,
        max_in_flight_chunks,
        debug,
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_config_from(|key| vars.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.provider_url, "http://ip-api.com");
        assert_eq!(cfg.lookup_timeout_ms, 3000);
        assert_eq!(cfg.batch_timeout_ms, 10_000);
        assert_eq!(cfg.batch_size, 100);
        assert_eq!(cfg.max_in_flight_chunks, 1);
        assert!(!cfg.debug);
    }

    #[test]
    fn test_load_config_defaults() {
        let cfg = load_with(&[]);
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_load_config_with_custom_values() {
        let cfg = load_with(&[
            ("NODEGEO_PROVIDER_URL", "http://127.0.0.1:9999"),
            ("NODEGEO_LOOKUP_TIMEOUT_MS", "500"),
            ("NODEGEO_BATCH_TIMEOUT_MS", "2500"),
            ("NODEGEO_BATCH_SIZE", "25"),
            ("NODEGEO_MAX_IN_FLIGHT_CHUNKS", "4"),
        ]);
        assert_eq!(cfg.provider_url, "http://127.0.0.1:9999");
        assert_eq!(cfg.lookup_timeout_ms, 500);
        assert_eq!(cfg.batch_timeout_ms, 2500);
        assert_eq!(cfg.batch_size, 25);
        assert_eq!(cfg.max_in_flight_chunks, 4);
    }

    #[test]
    fn test_load_config_with_debug() {
        let cfg = load_with(&[("DEBUG", "1")]);
        assert!(cfg.debug);
    }

    #[test]
    fn test_load_config_parse_error_uses_default() {
        let cfg = load_with(&[
            ("NODEGEO_BATCH_SIZE", "lots"),
            ("NODEGEO_LOOKUP_TIMEOUT_MS", "-3"),
        ]);
        assert_eq!(cfg.batch_size, 100);
        assert_eq!(cfg.lookup_timeout_ms, 3000);
    }

    #[test]
    fn test_blank_provider_url_uses_default() {
        let cfg = load_with(&[("NODEGEO_PROVIDER_URL", "  ")]);
        assert_eq!(cfg.provider_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_resolver_config_conversion() {
        let cfg = load_with(&[
            ("NODEGEO_LOOKUP_TIMEOUT_MS", "750"),
            ("NODEGEO_BATCH_SIZE", "40"),
            ("NODEGEO_MAX_IN_FLIGHT_CHUNKS", "2"),
        ]);
        let resolver = cfg.resolver_config();
        assert_eq!(resolver.lookup_timeout, Duration::from_millis(750));
        assert_eq!(resolver.batch_timeout, Duration::from_secs(10));
        assert_eq!(resolver.batch_size, 40);
        assert_eq!(resolver.max_in_flight_chunks, 2);
        assert!(resolver.validate().is_ok());
    }

    #[test]
    fn test_resolver_config_out_of_range_fails_validation() {
        let cfg = load_with(&[("NODEGEO_BATCH_SIZE", "250")]);
        assert!(cfg.resolver_config().validate().is_err());
    }

    #[test]
    fn test_load_config_from_process_env() {
        // Only checks that the env-backed entry point works; values depend on the host
        assert!(load_config().is_ok());
    }
}
