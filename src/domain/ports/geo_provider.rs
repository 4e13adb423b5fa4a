//! Geo Provider Port
//!
//! Defines the interface to the upstream geolocation service.

use crate::domain::entities::GeoLocation;
use async_trait::async_trait;
use std::time::Duration;

/// Why a lookup produced no location.
///
/// Variants stay distinct so callers can branch on them later, even though
/// the resolver currently treats all of them as "unknown location".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("lookup timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider returned HTTP {0}")]
    Status(u16),
    #[error("malformed provider response: {0}")]
    Parse(String),
    #[error("provider rejected {ip}: {message}")]
    Rejected { ip: String, message: String },
}

/// Outcome for one IP inside a batch response.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupRecord {
    /// IP echoed back by the provider
    pub ip: String,
    pub result: Result<GeoLocation, ProviderError>,
}

impl LookupRecord {
    pub fn resolved(ip: impl Into<String>, location: GeoLocation) -> Self {
        Self {
            ip: ip.into(),
            result: Ok(location),
        }
    }

    pub fn rejected(ip: impl Into<String>, message: impl Into<String>) -> Self {
        let ip = ip.into();
        Self {
            result: Err(ProviderError::Rejected {
                ip: ip.clone(),
                message: message.into(),
            }),
            ip,
        }
    }
}

/// Upstream resolver for IP addresses to geographic locations.
///
/// Implementations perform exactly one attempt per call; timeouts are
/// applied by the caller, which drops the future to abort the request.
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// Resolve a single IP.
    async fn lookup(&self, ip: &str) -> Result<GeoLocation, ProviderError>;

    /// Resolve up to one batch of IPs in a single request.
    ///
    /// An `Err` means the whole request failed; per-IP failures are
    /// reported inside the returned records.
    async fn lookup_batch(&self, ips: &[String]) -> Result<Vec<LookupRecord>, ProviderError>;
}
