//! Geo Resolver - Main application use case
//!
//! Enriches node addresses with geolocation: strips ports, serves repeats from
//! the cache, and resolves the rest through batched, timeout-bounded provider
//! calls. Failures never reach the caller; they only shrink the result.

use crate::domain::entities::GeoLocation;
use crate::domain::ports::{GeoCache, GeoProvider, ProviderError};
use crate::domain::value_objects::NodeAddress;
use crate::infrastructure::BoundedExecutor;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Largest batch the upstream accepts in one request.
pub const MAX_BATCH_SIZE: usize = 100;

/// Resolver tuning knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Bound on a single-IP lookup
    pub lookup_timeout: Duration,
    /// Bound on one batch request
    pub batch_timeout: Duration,
    /// IPs per batch request (1..=100)
    pub batch_size: usize,
    /// How many batch requests may be outstanding at once.
    /// 1 keeps chunks strictly sequential to stay polite to the provider.
    pub max_in_flight_chunks: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(3),
            batch_timeout: Duration::from_secs(10),
            batch_size: MAX_BATCH_SIZE,
            max_in_flight_chunks: 1,
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the single lookup timeout.
    pub fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Set the batch lookup timeout.
    pub fn batch_timeout(mut self, timeout: Duration) -> Self {
        self.batch_timeout = timeout;
        self
    }

    /// Set the number of IPs per batch.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Set the chunk concurrency policy.
    pub fn max_in_flight_chunks(mut self, limit: usize) -> Self {
        self.max_in_flight_chunks = limit;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        if self.max_in_flight_chunks == 0 {
            return Err(ConfigError::ZeroInFlightChunks);
        }
        if self.lookup_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("lookup"));
        }
        if self.batch_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("batch"));
        }
        Ok(())
    }

    /// Force every field into its valid range.
    fn clamped(mut self) -> Self {
        self.batch_size = self.batch_size.clamp(1, MAX_BATCH_SIZE);
        self.max_in_flight_chunks = self.max_in_flight_chunks.max(1);
        let defaults = Self::default();
        if self.lookup_timeout.is_zero() {
            self.lookup_timeout = defaults.lookup_timeout;
        }
        if self.batch_timeout.is_zero() {
            self.batch_timeout = defaults.batch_timeout;
        }
        self
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("batch_size must be between 1 and 100, got {0}")]
    InvalidBatchSize(usize),
    #[error("max_in_flight_chunks must be at least 1")]
    ZeroInFlightChunks,
    #[error("{0} timeout must be non-zero")]
    ZeroTimeout(&'static str),
}

/// Geolocation resolver - main application use case.
///
/// This service orchestrates lookups:
/// 1. Reduces addresses to bare IPs and deduplicates them
/// 2. Answers from the cache when possible
/// 3. Sends the misses to the provider in batches of up to 100
/// 4. Caches and returns whatever resolved
pub struct GeoResolver {
    provider: Arc<dyn GeoProvider>,
    cache: Arc<dyn GeoCache>,
    config: ResolverConfig,
}

impl GeoResolver {
    /// Create a resolver; out-of-range settings are clamped.
    pub fn new(
        provider: Arc<dyn GeoProvider>,
        cache: Arc<dyn GeoCache>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            provider,
            cache,
            config: config.clamped(),
        }
    }

    /// Create a resolver, rejecting invalid settings.
    pub fn try_new(
        provider: Arc<dyn GeoProvider>,
        cache: Arc<dyn GeoCache>,
        config: ResolverConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            provider,
            cache,
            config,
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve one address (`host` or `host:port`).
    ///
    /// Returns None on any failure: timeout, transport error, HTTP error,
    /// or the provider reporting a non-success status.
    pub async fn resolve_one(&self, address: &str) -> Option<GeoLocation> {
        let address = NodeAddress::parse(address);
        if address.is_empty() {
            return None;
        }
        let ip = address.bare_ip();

        if let Some(hit) = self.cache.get(ip) {
            return Some(hit);
        }

        match with_timeout(self.config.lookup_timeout, self.provider.lookup(ip)).await {
            Ok(location) => {
                self.cache.put(ip.to_string(), location.clone());
                Some(location)
            }
            Err(e) => {
                tracing::debug!(ip, error = %e, "single lookup failed");
                None
            }
        }
    }

    /// Resolve many addresses, keyed by bare IP.
    ///
    /// Keys are normalized the way [`NodeAddress::parse`] does it: surrounding
    /// whitespace is trimmed and `[v6]:port` is keyed by the address inside the
    /// brackets. Addresses that could not be resolved are simply absent from the map.
    pub async fn resolve_many<I, S>(&self, addresses: I) -> HashMap<String, GeoLocation>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved = HashMap::new();
        let mut queued = HashSet::new();
        let mut pending = Vec::new();

        for address in addresses {
            let address = NodeAddress::parse(address.as_ref());
            if address.is_empty()
                || resolved.contains_key(address.bare_ip())
                || queued.contains(address.bare_ip())
            {
                continue;
            }
            let ip = address.into_bare_ip();
            match self.cache.get(&ip) {
                Some(hit) => {
                    resolved.insert(ip, hit);
                }
                None => {
                    queued.insert(ip.clone());
                    pending.push(ip);
                }
            }
        }

        if pending.is_empty() {
            return resolved;
        }

        let cached = resolved.len();
        let chunks: Vec<(usize, Vec<String>)> = pending
            .chunks(self.config.batch_size)
            .map(<[String]>::to_vec)
            .enumerate()
            .collect();
        let chunk_count = chunks.len();

        let executor = BoundedExecutor::new(self.config.max_in_flight_chunks);
        let batches = executor
            .map_bounded(chunks, |(n, chunk)| async move {
                let result =
                    with_timeout(self.config.batch_timeout, self.provider.lookup_batch(&chunk))
                        .await;
                if let Err(e) = &result {
                    tracing::warn!(chunk = n, size = chunk.len(), error = %e, "batch lookup failed");
                }
                result
            })
            .await;

        let mut fresh = 0usize;
        for record in batches.into_iter().flatten() {
            match record.result {
                Ok(location) => {
                    self.cache.put(record.ip.clone(), location.clone());
                    resolved.insert(record.ip, location);
                    fresh += 1;
                }
                Err(e) => {
                    tracing::debug!(ip = %record.ip, error = %e, "lookup dropped");
                }
            }
        }

        tracing::info!(
            "geo resolve: {} cached, {} fresh, {} unresolved, {} chunk(s)",
            cached,
            fresh,
            pending.len().saturating_sub(fresh),
            chunk_count
        );

        resolved
    }

    /// Empty the cache so every IP is looked up again.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Number of cached IPs.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Bound a provider call; on expiry the call is dropped, aborting the request.
async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .unwrap_or(Err(ProviderError::Timeout(limit)))
}
