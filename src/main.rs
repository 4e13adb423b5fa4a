//! node-geo - resolve storage node addresses to geolocation
//!
//! This is the composition root that wires together all the components.
//! Usage: `node-geo [ADDRESS...]`; with no arguments, addresses are read
//! from stdin, one per line.

use node_geo::{load_config, DashMapGeoCache, GeoResolver, IpApiProvider};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging; stdout is reserved for the JSON result
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    let resolver_config = cfg.resolver_config();
    if let Err(e) = resolver_config.validate() {
        tracing::warn!("invalid resolver settings ({}), clamping", e);
    }

    // ===== COMPOSITION ROOT =====
    let provider = Arc::new(IpApiProvider::new(cfg.provider_url.clone()));
    let cache = Arc::new(DashMapGeoCache::new());
    let resolver = GeoResolver::new(provider, cache, resolver_config);

    let addresses = read_addresses().await?;
    tracing::info!(
        "resolving {} address(es) via {}",
        addresses.len(),
        cfg.provider_url
    );

    let resolved: BTreeMap<_, _> = resolver.resolve_many(&addresses).await.into_iter().collect();

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

/// Addresses from argv, or from stdin when none were given.
async fn read_addresses() -> anyhow::Result<Vec<String>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        return Ok(args);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut addresses = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            addresses.push(line.to_string());
        }
    }
    Ok(addresses)
}
