//! ip-api.com Geo Provider
//!
//! Implements GeoProvider against the ip-api.com JSON API:
//! `GET /json/{ip}` for single lookups and `POST /batch` for up to 100 IPs.
//!
//! See: https://ip-api.com/docs

use crate::domain::entities::GeoLocation;
use crate::domain::ports::{GeoProvider, LookupRecord, ProviderError};
use async_trait::async_trait;
use serde::Deserialize;

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "http://ip-api.com";

const SINGLE_FIELDS: &str = "status,message,country,regionName,city,lat,lon,timezone";
const BATCH_FIELDS: &str = "status,message,country,regionName,city,lat,lon,timezone,query";

/// One result object as returned by ip-api.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpApiRecord {
    status: Option<String>,
    message: Option<String>,
    country: Option<String>,
    region_name: Option<String>,
    city: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    timezone: Option<String>,
    /// Echoed IP (batch only)
    query: Option<String>,
}

impl IpApiRecord {
    fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    fn failure_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.status.clone())
            .unwrap_or_else(|| "missing status".to_string())
    }

    fn into_location(self) -> GeoLocation {
        GeoLocation::from_parts(
            self.country,
            self.region_name,
            self.city,
            self.lat,
            self.lon,
            self.timezone,
        )
    }
}

/// HTTP client for the ip-api.com contract.
#[derive(Clone)]
pub struct IpApiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl IpApiProvider {
    /// Create a provider pointing at `base_url` (e.g. "http://ip-api.com").
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a provider reusing an existing HTTP client.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn single_url(&self, ip: &str) -> String {
        format!("{}/json/{}?fields={}", self.base_url, ip, SINGLE_FIELDS)
    }

    fn batch_url(&self) -> String {
        format!("{}/batch?fields={}", self.base_url, BATCH_FIELDS)
    }

    /// Check the HTTP status and read the body as text.
    async fn read_body(response: reqwest::Response) -> Result<String, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }
        response.text().await.map_err(transport)
    }
}

impl Default for IpApiProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn transport(err: reqwest::Error) -> ProviderError {
    ProviderError::Transport(err.to_string())
}

#[async_trait]
impl GeoProvider for IpApiProvider {
    async fn lookup(&self, ip: &str) -> Result<GeoLocation, ProviderError> {
        let response = self
            .client
            .get(self.single_url(ip))
            .send()
            .await
            .map_err(transport)?;

        let body = Self::read_body(response).await?;
        let record: IpApiRecord =
            serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))?;

        if record.is_success() {
            Ok(record.into_location())
        } else {
            Err(ProviderError::Rejected {
                ip: ip.to_string(),
                message: record.failure_message(),
            })
        }
    }

    async fn lookup_batch(&self, ips: &[String]) -> Result<Vec<LookupRecord>, ProviderError> {
        if ips.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .post(self.batch_url())
            .json(ips)
            .send()
            .await
            .map_err(transport)?;

        let body = Self::read_body(response).await?;
        let records: Vec<IpApiRecord> =
            serde_json::from_str(&body).map_err(|e| ProviderError::Parse(e.to_string()))?;

        let mut out = Vec::with_capacity(records.len());
        for record in records {
            // Without the echoed IP there is nothing to key the result on
            let Some(ip) = record.query.clone().filter(|q| !q.is_empty()) else {
                tracing::debug!("batch record without query field dropped");
                continue;
            };

            if record.is_success() {
                out.push(LookupRecord::resolved(ip, record.into_location()));
            } else {
                let message = record.failure_message();
                out.push(LookupRecord::rejected(ip, message));
            }
        }

        Ok(out)
    }
}
